//! The tag catalog: one constructor per known HTML tag.
//!
//! Every entry is a data row `(name, category, layout)` over the single
//! [`Element`] representation - there is no per-tag behavior. The same
//! table backs [`Element::named`] for data-driven construction.
//!
//! The category and layout assignments reproduce the classification this
//! crate has always shipped, quirks included (`main`, `ins`, and `kbd`
//! self-closing; `hr` a plain container; `option` and `select`
//! block-layout), so trees keep rendering byte-identically.

use crate::dom::{Category, Element, Layout};

macro_rules! tags {
    ($($fname:ident => $tag:literal, $category:ident, $layout:ident;)*) => {
        static CATALOG: &[(&str, Category, Layout)] = &[
            $(($tag, Category::$category, Layout::$layout),)*
        ];

        $(
            #[doc = concat!("Create an empty `<", $tag, ">` element.")]
            pub fn $fname() -> Element {
                Element::from_parts($tag, Category::$category, Layout::$layout)
            }
        )*
    };
}

tags! {
    // Block containers
    address => "address", Container, Block;
    article => "article", Container, Block;
    aside => "aside", Container, Block;
    audio => "audio", Container, Block;
    blockquote => "blockquote", Container, Block;
    body => "body", Container, Block;
    canvas => "canvas", Container, Block;
    caption => "caption", Container, Block;
    colgroup => "colgroup", Container, Block;
    datalist => "datalist", Container, Block;
    dd => "dd", Container, Block;
    details => "details", Container, Block;
    dialog => "dialog", Container, Block;
    div => "div", Container, Block;
    dl => "dl", Container, Block;
    dt => "dt", Container, Block;
    fieldset => "fieldset", Container, Block;
    figcaption => "figcaption", Container, Block;
    figure => "figure", Container, Block;
    footer => "footer", Container, Block;
    form => "form", Container, Block;
    h1 => "h1", Container, Block;
    h2 => "h2", Container, Block;
    h3 => "h3", Container, Block;
    h4 => "h4", Container, Block;
    h5 => "h5", Container, Block;
    h6 => "h6", Container, Block;
    head => "head", Container, Block;
    header => "header", Container, Block;
    hr => "hr", Container, Block;
    html => "html", Container, Block;
    iframe => "iframe", Container, Block;
    li => "li", Container, Block;
    map => "map", Container, Block;
    menu => "menu", Container, Block;
    nav => "nav", Container, Block;
    noscript => "noscript", Container, Block;
    object => "object", Container, Block;
    ol => "ol", Container, Block;
    optgroup => "optgroup", Container, Block;
    option => "option", Container, Block;
    p => "p", Container, Block;
    pre => "pre", Container, Block;
    ruby => "ruby", Container, Block;
    samp => "samp", Container, Block;
    script => "script", Container, Block;
    section => "section", Container, Block;
    select => "select", Container, Block;
    slot => "slot", Container, Block;
    style => "style", Container, Block;
    summary => "summary", Container, Block;
    table => "table", Container, Block;
    tbody => "tbody", Container, Block;
    td => "td", Container, Block;
    template => "template", Container, Block;
    tfoot => "tfoot", Container, Block;
    th => "th", Container, Block;
    thead => "thead", Container, Block;
    title => "title", Container, Block;
    tr => "tr", Container, Block;
    ul => "ul", Container, Block;
    video => "video", Container, Block;

    // Block self-closing
    area => "area", SelfClosing, Block;
    base => "base", SelfClosing, Block;
    col => "col", SelfClosing, Block;
    embed => "embed", SelfClosing, Block;
    link => "link", SelfClosing, Block;
    main => "main", SelfClosing, Block;
    meta => "meta", SelfClosing, Block;
    param => "param", SelfClosing, Block;
    source => "source", SelfClosing, Block;
    track => "track", SelfClosing, Block;

    // Inline containers
    a => "a", Container, Inline;
    abbr => "abbr", Container, Inline;
    b => "b", Container, Inline;
    bdi => "bdi", Container, Inline;
    bdo => "bdo", Container, Inline;
    button => "button", Container, Inline;
    cite => "cite", Container, Inline;
    code => "code", Container, Inline;
    data => "data", Container, Inline;
    del => "del", Container, Inline;
    dfn => "dfn", Container, Inline;
    em => "em", Container, Inline;
    i => "i", Container, Inline;
    label => "label", Container, Inline;
    legend => "legend", Container, Inline;
    mark => "mark", Container, Inline;
    meter => "meter", Container, Inline;
    output => "output", Container, Inline;
    progress => "progress", Container, Inline;
    q => "q", Container, Inline;
    rp => "rp", Container, Inline;
    rt => "rt", Container, Inline;
    rtc => "rtc", Container, Inline;
    s => "s", Container, Inline;
    small => "small", Container, Inline;
    span => "span", Container, Inline;
    strong => "strong", Container, Inline;
    sub => "sub", Container, Inline;
    sup => "sup", Container, Inline;
    time => "time", Container, Inline;
    u => "u", Container, Inline;
    var => "var", Container, Inline;

    // Inline self-closing
    br => "br", SelfClosing, Inline;
    img => "img", SelfClosing, Inline;
    input => "input", SelfClosing, Inline;
    ins => "ins", SelfClosing, Inline;
    kbd => "kbd", SelfClosing, Inline;
    wbr => "wbr", SelfClosing, Inline;

    // Generic element, no layout of its own
    element => "element", Container, None;
}

/// Look up a catalog entry by tag name.
pub(crate) fn lookup(name: &str) -> Option<(&'static str, Category, Layout)> {
    CATALOG.iter().copied().find(|(tag, _, _)| *tag == name)
}

// =============================================================================
// Tests
// =============================================================================
