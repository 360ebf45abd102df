//! Node and element tree model.
//!
//! A document is a tree of [`Node`]s: text, comments, and [`Element`]s.
//! Elements carry a tag name plus two behavior tags - a structural
//! [`Category`] and a whitespace [`Layout`] - which together drive the
//! renderer. The ~100 concrete HTML tags are plain data rows over this one
//! representation; see [`crate::tags`].
//!
//! Trees are built by appending: children are owned by their parent's child
//! list, one parent per node, no sharing and no cycles by construction.

use std::collections::HashMap;
use std::fmt;

use compact_str::{CompactString, format_compact};

use crate::attrs::{AttrValue, Attrs};
use crate::render::{self, RenderOptions};
use crate::tags;

/// Structural category of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Open tag, children, close tag.
    Container,
    /// Open tag only; the child list is structurally empty and every append
    /// fails.
    SelfClosing,
    /// No tags at all; only the children render.
    TagLess,
}

/// Whitespace behavior of an element during indented rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Participates in indentation: tag lines are padded to the current
    /// depth and followed by line separators, children render one level
    /// deeper.
    Block,
    /// Never adds whitespace of its own; an enclosing block parent indents
    /// its whole serialized form as a single line.
    Inline,
    /// Neither: no whitespace of its own and no treatment from a block
    /// parent. Carried by the generic `element()` and tag-less elements.
    None,
}

/// Errors raised by tree construction.
///
/// These are the only failure modes of the crate: rendering never fails on a
/// successfully built tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Append was called on a node whose category forbids children: a text
    /// or comment node, or a self-closing element.
    #[error("'{name}' element cannot contain children")]
    ChildrenForbidden {
        /// Name of the node that rejected the append.
        name: CompactString,
    },

    /// By-name element construction with a tag missing from the catalog.
    #[error("unknown tag '{name}'")]
    UnknownTag {
        /// The unrecognized tag name.
        name: CompactString,
    },
}

/// Tree content - an element, a text run, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element node.
    Element(Element),
    /// A text node. Content is stored verbatim; escaping happens at
    /// construction via [`Node::escaped_text`], never at render time.
    Text(CompactString),
    /// A comment node; rendering wraps the content in `<!-- -->`.
    Comment(CompactString),
}

impl Node {
    /// Create a text node. The content is stored as given, unescaped.
    pub fn text(content: impl Into<CompactString>) -> Node {
        Node::Text(content.into())
    }

    /// Create a text node with reserved HTML characters escaped up front.
    pub fn escaped_text(content: impl AsRef<str>) -> Node {
        Node::Text(CompactString::from(crate::attrs::escape_html(
            content.as_ref(),
        )))
    }

    /// Create a comment node.
    pub fn comment(content: impl Into<CompactString>) -> Node {
        Node::Comment(content.into())
    }

    /// The node's name: the tag name for elements, `"text"` / `"comment"`
    /// otherwise.
    pub fn name(&self) -> &str {
        match self {
            Node::Element(el) => el.name(),
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
        }
    }

    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Returns true if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Returns true if this is a comment node.
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Get as element reference.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Append a child to this node.
    ///
    /// Only element nodes can carry children; text and comment nodes fail
    /// with [`TreeError::ChildrenForbidden`].
    pub fn append_child(&mut self, child: impl Into<Node>) -> Result<&mut Node, TreeError> {
        match self {
            Node::Element(el) => el.append_child(child),
            Node::Text(_) | Node::Comment(_) => Err(TreeError::ChildrenForbidden {
                name: CompactString::from(self.name()),
            }),
        }
    }

    /// Append this node into `wrapper` and return the wrapper.
    ///
    /// Re-roots the node one level deeper without touching its own children.
    pub fn wrap(self, mut wrapper: Element) -> Result<Element, TreeError> {
        wrapper.append_child(self)?;
        Ok(wrapper)
    }

    /// Concatenated text content of this node and all descendants.
    /// Comments contribute nothing.
    pub fn text_content(&self) -> CompactString {
        match self {
            Node::Text(t) => t.clone(),
            Node::Comment(_) => CompactString::default(),
            Node::Element(el) => el.text_content(),
        }
    }

    /// Render this node, with indentation enabled or not, at the default
    /// indent width.
    pub fn render(&self, indent: bool) -> String {
        self.render_with(&RenderOptions::new().indent(indent))
    }

    /// Render this node with explicit options.
    pub fn render_with(&self, options: &RenderOptions) -> String {
        render::render_node(self, options)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::text(s)
    }
}

impl From<CompactString> for Node {
    fn from(s: CompactString) -> Self {
        Node::Text(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

/// An HTML element: a tag name, its category/layout pair, attributes, and
/// an ordered child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: CompactString,
    category: Category,
    layout: Layout,
    attrs: Attrs,
    children: Vec<Node>,
    /// Direct children by id, as positions into `children`. Maintained by
    /// the append path only; children are append-only, so positions stay
    /// valid. Reflects each child's id at append time.
    children_by_id: HashMap<CompactString, usize>,
}

impl Element {
    pub(crate) fn from_parts(
        name: impl Into<CompactString>,
        category: Category,
        layout: Layout,
    ) -> Element {
        Element {
            name: name.into(),
            category,
            layout,
            attrs: Attrs::new(),
            children: Vec::new(),
            children_by_id: HashMap::new(),
        }
    }

    /// Create an element by catalog tag name.
    ///
    /// `Element::named("div")` is equivalent to [`crate::tags::div()`].
    /// Names are matched exactly (catalog names are lowercase). Unknown
    /// names fail with [`TreeError::UnknownTag`].
    pub fn named(name: &str) -> Result<Element, TreeError> {
        match tags::lookup(name) {
            Some((tag, category, layout)) => Ok(Element::from_parts(tag, category, layout)),
            None => Err(TreeError::UnknownTag {
                name: CompactString::from(name),
            }),
        }
    }

    /// Create a tag-less element: a container that renders no tags of its
    /// own, only its children, in both render modes.
    pub fn tagless() -> Element {
        Element::from_parts("tagless", Category::TagLess, Layout::None)
    }

    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's structural category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The element's whitespace layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether this element heads a document: document roots emit the
    /// `<!DOCTYPE html>` declaration before their open tag.
    pub fn is_document_root(&self) -> bool {
        self.name == "html"
    }

    /// The element's `id` attribute, when set to a string.
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").and_then(AttrValue::as_str)
    }

    /// Snapshot copy of the attribute map. Mutating the returned map never
    /// affects the element.
    pub fn attrs(&self) -> Attrs {
        self.attrs.clone()
    }

    pub(crate) fn attrs_ref(&self) -> &Attrs {
        &self.attrs
    }

    /// Get an attribute by its stored key. Direct lookup: no renaming, no
    /// normalization (keys were normalized when set).
    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// String form of an attribute, or `default` if the key is absent.
    pub fn attr_or(&self, key: &str, default: &str) -> CompactString {
        match self.attrs.get(key) {
            Some(value) => format_compact!("{}", value),
            None => CompactString::from(default),
        }
    }

    /// Set an attribute. The key is stored with underscores replaced by
    /// dashes; the `css`/`label_for` renames apply at serialization only,
    /// so stored keys are never renamed.
    pub fn set_attr(&mut self, key: impl AsRef<str>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.set(key.as_ref().replace('_', "-"), value);
        self
    }

    /// Builder form of [`set_attr`](Element::set_attr) for construction
    /// chains.
    pub fn attr(mut self, key: impl AsRef<str>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set a `data-*` attribute from its suffix: `data("role", "nav")`
    /// stores `data-role`.
    pub fn data(mut self, suffix: impl AsRef<str>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(format_compact!("data-{}", suffix.as_ref()), value);
        self
    }

    /// The element's children, in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child node. Raw strings are wrapped as (unescaped) text
    /// nodes.
    ///
    /// Fails with [`TreeError::ChildrenForbidden`] on self-closing
    /// elements; a failed append leaves the element untouched. On success
    /// the appended node is returned, and if it is an element with a
    /// non-empty string `id`, the id index records it (overwriting any
    /// earlier child with the same id).
    pub fn append_child(&mut self, child: impl Into<Node>) -> Result<&mut Node, TreeError> {
        let idx = self.push_node(child.into())?;
        Ok(&mut self.children[idx])
    }

    /// Append a child element, returning it typed for further chaining.
    pub fn append_element(&mut self, el: Element) -> Result<&mut Element, TreeError> {
        let idx = self.push_node(Node::Element(el))?;
        match &mut self.children[idx] {
            Node::Element(el) => Ok(el),
            _ => unreachable!("just pushed an element"),
        }
    }

    /// Append a text node with the content stored as given.
    pub fn append_text(&mut self, text: impl Into<CompactString>) -> Result<&mut Node, TreeError> {
        self.append_child(Node::text(text))
    }

    /// Append a comment node.
    pub fn append_comment(
        &mut self,
        comment: impl Into<CompactString>,
    ) -> Result<&mut Node, TreeError> {
        self.append_child(Node::comment(comment))
    }

    fn push_node(&mut self, child: Node) -> Result<usize, TreeError> {
        if self.category == Category::SelfClosing {
            return Err(TreeError::ChildrenForbidden {
                name: self.name.clone(),
            });
        }

        crate::trace!("appending {} to <{}>", child.name(), self.name);

        let id = match &child {
            Node::Element(el) => el
                .id()
                .filter(|id| !id.is_empty())
                .map(CompactString::from),
            _ => None,
        };

        let idx = self.children.len();
        self.children.push(child);
        if let Some(id) = id {
            self.children_by_id.insert(id, idx);
        }
        Ok(idx)
    }

    /// Append this element into `wrapper` and return the wrapper.
    pub fn wrap(self, wrapper: Element) -> Result<Element, TreeError> {
        Node::Element(self).wrap(wrapper)
    }

    /// Check if the element's `css` attribute contains `css_class`.
    ///
    /// This is substring containment, not token matching: `"btn"` matches
    /// inside `"btn-primary"`. Longstanding quirk, kept for compatibility.
    pub fn has_css(&self, css_class: &str) -> bool {
        self.css().contains(css_class)
    }

    /// Add a CSS class, space-separated, to the `css` attribute.
    pub fn add_css(&mut self, css_class: &str) -> &mut Self {
        let merged = format_compact!("{} {}", self.css(), css_class);
        let merged = merged.trim();
        self.set_attr("css", merged)
    }

    /// Remove every occurrence of `css_class` from the `css` attribute.
    ///
    /// Substring-based like [`has_css`](Element::has_css): removing `"btn"`
    /// also eats the prefix of `"btn-primary"`. Same quirk, same
    /// compatibility reason.
    pub fn remove_css(&mut self, css_class: &str) -> &mut Self {
        let cleaned = self.css().replace(css_class, "");
        let cleaned = cleaned.trim().to_owned();
        self.set_attr("css", cleaned)
    }

    /// Remove the class if present, add it otherwise.
    pub fn toggle_css(&mut self, css_class: &str) -> &mut Self {
        if self.has_css(css_class) {
            self.remove_css(css_class)
        } else {
            self.add_css(css_class)
        }
    }

    fn css(&self) -> &str {
        match self.attrs.get("css") {
            Some(AttrValue::Str(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Find a descendant element by id.
    ///
    /// The direct-children index is consulted first; on a miss the search
    /// recurses depth-first into element children in order, skipping text
    /// and comment children. The index reflects ids as they were at append
    /// time.
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        if let Some(&idx) = self.children_by_id.get(id)
            && let Some(Node::Element(el)) = self.children.get(idx)
        {
            return Some(el);
        }

        for child in &self.children {
            if let Node::Element(el) = child
                && let Some(found) = el.get_element_by_id(id)
            {
                return Some(found);
            }
        }

        None
    }

    /// Mutable twin of [`get_element_by_id`](Element::get_element_by_id):
    /// same search order, resolved as a child-index path first and then
    /// descended mutably.
    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let mut path = Vec::new();
        if !self.find_path_by_id(id, &mut path) {
            return None;
        }

        let mut current = self;
        for idx in path {
            current = match current.children.get_mut(idx) {
                Some(Node::Element(el)) => el,
                _ => return None,
            };
        }
        Some(current)
    }

    fn find_path_by_id(&self, id: &str, path: &mut Vec<usize>) -> bool {
        if let Some(&idx) = self.children_by_id.get(id)
            && matches!(self.children.get(idx), Some(Node::Element(_)))
        {
            path.push(idx);
            return true;
        }

        for (i, child) in self.children.iter().enumerate() {
            if let Node::Element(el) = child {
                path.push(i);
                if el.find_path_by_id(id, path) {
                    return true;
                }
                path.pop();
            }
        }

        false
    }

    /// Concatenated text content of this element and all descendants.
    pub fn text_content(&self) -> CompactString {
        let mut out = String::new();
        self.collect_text(&mut out);
        CompactString::from(out)
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    /// Render this element, with indentation enabled or not, at the
    /// default indent width.
    pub fn render(&self, indent: bool) -> String {
        self.render_with(&RenderOptions::new().indent(indent))
    }

    /// Render this element with explicit options.
    pub fn render_with(&self, options: &RenderOptions) -> String {
        render::render_element(self, options)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{br, div, img, input, p, span, ul};

    #[test]
    fn test_append_child() {
        let mut parent = div();
        assert_eq!(parent.len(), 0);

        parent.append_child(span()).unwrap();
        parent.append_child("plain text").unwrap();
        assert_eq!(parent.len(), 2);
        assert!(parent.children()[0].is_element());
        assert!(parent.children()[1].is_text());
    }

    #[test]
    fn test_append_returns_child() {
        let mut parent = div();
        let child = parent.append_element(span().attr("id", "x")).unwrap();
        assert_eq!(child.name(), "span");
        child.append_text("nested").unwrap();
        assert_eq!(parent.render(false), "<div><span id=\"x\">nested</span></div>");
    }

    #[test]
    fn test_self_closing_rejects_children() {
        for mut el in [br(), img(), input()] {
            let name = CompactString::from(el.name());
            let err = el.append_child(span()).unwrap_err();
            assert_eq!(err, TreeError::ChildrenForbidden { name });
            assert_eq!(el.len(), 0);
        }
    }

    #[test]
    fn test_append_is_atomic() {
        let mut el = img().attr("src", "x.png");
        assert!(el.append_child(span().attr("id", "orphan")).is_err());
        assert_eq!(el.len(), 0);
        assert!(el.get_element_by_id("orphan").is_none());
    }

    #[test]
    fn test_text_node_rejects_children() {
        let mut text = Node::text("hello");
        let err = text.append_child(span()).unwrap_err();
        assert_eq!(
            err,
            TreeError::ChildrenForbidden {
                name: CompactString::from("text")
            }
        );

        let mut comment = Node::comment("hello");
        assert!(comment.append_child("x").is_err());
    }

    #[test]
    fn test_wrap() {
        let wrapped = span().wrap(div()).unwrap();
        assert_eq!(wrapped.name(), "div");
        assert_eq!(wrapped.render(false), "<div><span></span></div>");

        assert!(span().wrap(br()).is_err());
    }

    #[test]
    fn test_set_attr_normalizes_key() {
        let mut el = div();
        el.set_attr("aria_label", "close");
        assert!(el.get_attr("aria-label").is_some());
        assert!(el.get_attr("aria_label").is_none());
    }

    #[test]
    fn test_stored_keys_not_renamed() {
        let el = div().attr("css", "box").attr("label_for", "field");
        // stored under 'css' and 'label-for'; renames only happen when
        // serializing
        assert_eq!(el.get_attr("css").and_then(AttrValue::as_str), Some("box"));
        assert_eq!(
            el.get_attr("label-for").and_then(AttrValue::as_str),
            Some("field")
        );
        assert_eq!(
            el.render(false),
            "<div class=\"box\" label-for=\"field\"></div>"
        );
    }

    #[test]
    fn test_attrs_snapshot_is_defensive() {
        let el = div().attr("id", "main");
        let mut snapshot = el.attrs();
        snapshot.set("id", "changed");
        snapshot.set("extra", "1");
        assert_eq!(el.id(), Some("main"));
        assert!(el.get_attr("extra").is_none());
    }

    #[test]
    fn test_data_bag() {
        let el = div().data("toggle", "modal").data("row_index", 3);
        assert_eq!(
            el.get_attr("data-toggle").and_then(AttrValue::as_str),
            Some("modal")
        );
        assert_eq!(el.get_attr("data-row-index"), Some(&AttrValue::Int(3)));
    }

    #[test]
    fn test_attr_or() {
        let el = div().attr("title", "x");
        assert_eq!(el.attr_or("title", "fallback"), "x");
        assert_eq!(el.attr_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_get_element_by_id_direct() {
        let mut parent = div();
        parent.append_element(span().attr("id", "target")).unwrap();

        let found = parent.get_element_by_id("target").unwrap();
        assert!(std::ptr::eq(
            found,
            parent.children()[0].as_element().unwrap()
        ));
        assert!(parent.get_element_by_id("missing").is_none());
    }

    #[test]
    fn test_get_element_by_id_recursive() {
        let mut grandchild = p().attr("id", "deep");
        grandchild.append_text("found me").unwrap();

        let mut child = div().attr("id", "mid");
        child.append_element(grandchild).unwrap();

        let mut root = div();
        root.append_text("noise").unwrap();
        root.append_comment("more noise").unwrap();
        root.append_element(child).unwrap();

        let found = root.get_element_by_id("deep").unwrap();
        assert_eq!(found.text_content(), "found me");
        assert_eq!(root.get_element_by_id("mid").unwrap().name(), "div");
    }

    #[test]
    fn test_get_element_by_id_duplicate_last_wins() {
        let mut parent = div();
        parent
            .append_element(span().attr("id", "dup").attr("n", 1))
            .unwrap();
        parent
            .append_element(p().attr("id", "dup").attr("n", 2))
            .unwrap();

        let found = parent.get_element_by_id("dup").unwrap();
        assert_eq!(found.name(), "p");
    }

    #[test]
    fn test_id_index_not_updated_after_append() {
        let mut parent = div();
        parent.append_element(span().attr("id", "before")).unwrap();
        parent
            .get_element_by_id_mut("before")
            .unwrap()
            .set_attr("id", "after");

        // the index still knows the append-time id; the recursive scan
        // cannot see "after" either since the index entry shadows only
        // "before"
        assert!(parent.get_element_by_id("before").is_some());
    }

    #[test]
    fn test_get_element_by_id_mut() {
        let mut child = ul().attr("id", "list");
        child.append_element(span().attr("id", "inner")).unwrap();
        let mut root = div();
        root.append_element(child).unwrap();

        root.get_element_by_id_mut("inner")
            .unwrap()
            .append_text("x")
            .unwrap();
        assert_eq!(
            root.get_element_by_id("inner").unwrap().text_content(),
            "x"
        );
        assert!(root.get_element_by_id_mut("absent").is_none());
    }

    #[test]
    fn test_css_helpers() {
        let mut el = div().attr("css", "alpha beta");
        assert!(el.has_css("alpha"));
        assert!(el.has_css("beta"));
        assert!(!el.has_css("gamma"));

        el.add_css("gamma");
        assert!(el.has_css("gamma"));

        el.remove_css("alpha");
        assert!(!el.has_css("alpha"));

        el.toggle_css("alpha");
        assert!(el.has_css("alpha"));
        el.toggle_css("alpha");
        assert!(!el.has_css("alpha"));
    }

    #[test]
    fn test_css_substring_quirk() {
        let mut el = div().attr("css", "btn-primary");
        // substring match, not token match
        assert!(el.has_css("btn"));

        el.remove_css("btn");
        assert_eq!(el.get_attr("css").and_then(AttrValue::as_str), Some("-primary"));
    }

    #[test]
    fn test_add_css_from_empty() {
        let mut el = div();
        el.add_css("solo");
        assert_eq!(el.get_attr("css").and_then(AttrValue::as_str), Some("solo"));
    }

    #[test]
    fn test_named_lookup() {
        let el = Element::named("div").unwrap();
        assert_eq!(el.category(), Category::Container);
        assert_eq!(el.layout(), Layout::Block);

        let el = Element::named("br").unwrap();
        assert_eq!(el.category(), Category::SelfClosing);
        assert_eq!(el.layout(), Layout::Inline);

        let err = Element::named("blink").unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownTag {
                name: CompactString::from("blink")
            }
        );
    }

    #[test]
    fn test_text_content() {
        let mut el = div();
        el.append_text("Hello ").unwrap();
        let strong = el.append_element(span()).unwrap();
        strong.append_text("world").unwrap();
        el.append_comment("ignored").unwrap();
        el.append_text("!").unwrap();

        assert_eq!(el.text_content(), "Hello world!");
    }

    #[test]
    fn test_error_display() {
        let err = TreeError::ChildrenForbidden {
            name: CompactString::from("br"),
        };
        assert_eq!(err.to_string(), "'br' element cannot contain children");
    }
}
