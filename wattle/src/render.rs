//! Two-mode tree rendering.
//!
//! Every node renders either compact (no whitespace beyond the content
//! itself) or indented. Indented rendering pads block-layout tags by a
//! per-depth number of spaces and separates them with the host platform's
//! line separator; inline and layout-free elements never add whitespace of
//! their own. Depth is a render-time parameter threaded through block
//! nesting - it is never stored on nodes - so rendering is a pure function
//! of the tree and the options: repeatable and byte-identical across calls.

use std::fmt::Write;

use crate::attrs::attrs_to_string;
use crate::dom::{Category, Element, Layout, Node};

/// Line separator used by indented rendering (host platform convention).
#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
/// Line separator used by indented rendering (host platform convention).
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

/// Options for rendering.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Whether to indent block-layout elements (default: true).
    pub indent: bool,
    /// Spaces per nesting depth level when indenting (default: 4).
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: true,
            indent_width: 4,
        }
    }
}

impl RenderOptions {
    /// Create new default options (indented, width 4).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable indentation.
    pub fn indent(mut self, enabled: bool) -> Self {
        self.indent = enabled;
        self
    }

    /// Disable indentation.
    pub fn compact(mut self) -> Self {
        self.indent = false;
        self
    }

    /// Set the number of spaces per depth level (implies indentation).
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self.indent = true;
        self
    }
}

/// Render a node to a string.
pub fn render_node(node: &Node, options: &RenderOptions) -> String {
    crate::debug!("render {} (indent={})", node.name(), options.indent);
    let mut out = String::new();
    let mut r = Renderer::new(&mut out, options);
    r.write_node(node, 0);
    out
}

/// Render an element and its subtree to a string.
pub fn render_element(el: &Element, options: &RenderOptions) -> String {
    crate::debug!("render <{}> (indent={})", el.name(), options.indent);
    let mut out = String::new();
    let mut r = Renderer::new(&mut out, options);
    r.write_element(el, 0);
    out
}

/// Render a slice of sibling nodes to a string, each starting at depth 0.
pub fn render_fragment(nodes: &[Node], options: &RenderOptions) -> String {
    let mut out = String::new();
    let mut r = Renderer::new(&mut out, options);
    for node in nodes {
        r.write_node(node, 0);
    }
    out
}

/// How a block parent treats one of its children when laying out
/// indentation.
enum ChildKind {
    /// Text, comments, and inline-layout elements: the parent pads the
    /// line they start and terminates the line they end.
    Textual,
    /// Block-layout elements: they pad themselves.
    Block,
    /// Layout-free elements: no treatment either way.
    Neutral,
}

fn child_kind(node: &Node) -> ChildKind {
    match node {
        Node::Text(_) | Node::Comment(_) => ChildKind::Textual,
        Node::Element(el) => match el.layout() {
            Layout::Block => ChildKind::Block,
            Layout::Inline => ChildKind::Textual,
            Layout::None => ChildKind::Neutral,
        },
    }
}

struct Renderer<'a, W: Write> {
    out: &'a mut W,
    options: &'a RenderOptions,
}

impl<'a, W: Write> Renderer<'a, W> {
    fn new(out: &'a mut W, options: &'a RenderOptions) -> Self {
        Self { out, options }
    }

    fn pad(&mut self, depth: usize) {
        let _ = write!(self.out, "{:pad$}", "", pad = depth * self.options.indent_width);
    }

    fn newline(&mut self) {
        let _ = write!(self.out, "{}", LINE_SEP);
    }

    /// Whether `el`'s own tags get indentation affixes.
    fn block_indent(&self, el: &Element) -> bool {
        self.options.indent && el.layout() == Layout::Block
    }

    fn write_node(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Element(el) => self.write_element(el, depth),
            Node::Text(text) => {
                let _ = write!(self.out, "{}", text);
            }
            Node::Comment(text) => {
                let _ = write!(self.out, "<!-- {} -->", text);
            }
        }
    }

    fn write_element(&mut self, el: &Element, depth: usize) {
        match el.category() {
            Category::SelfClosing => self.write_open_tag(el, depth),
            Category::TagLess => self.write_children(el, depth),
            Category::Container => {
                self.write_open_tag(el, depth);
                self.write_children(el, depth);
                self.write_close_tag(el, depth);
            }
        }
    }

    fn write_open_tag(&mut self, el: &Element, depth: usize) {
        if el.is_document_root() {
            let _ = write!(self.out, "<!DOCTYPE html>");
            if self.options.indent {
                self.newline();
            }
        }

        if self.block_indent(el) {
            self.pad(depth);
        }
        let _ = write!(self.out, "<{}{}>", el.name(), attrs_to_string(el.attrs_ref()));
        if self.block_indent(el) {
            self.newline();
        }
    }

    fn write_close_tag(&mut self, el: &Element, depth: usize) {
        if self.block_indent(el) {
            self.pad(depth);
        }
        let _ = write!(self.out, "</{}>", el.name());
        if self.block_indent(el) {
            self.newline();
        }
    }

    fn write_children(&mut self, el: &Element, depth: usize) {
        if self.block_indent(el) {
            self.write_block_children(el, depth + 1);
        } else {
            // depth threads only through block nesting; everything else
            // starts its children over at depth 0
            for child in el.children() {
                self.write_node(child, 0);
            }
        }
    }

    /// Children of an indenting block parent. Textual children share
    /// lines: the parent pads the first textual child of a line (at the
    /// start, or after a block sibling closed its line) and breaks the
    /// line when a block sibling follows or the child list ends.
    fn write_block_children(&mut self, el: &Element, depth: usize) {
        let children = el.children();
        let mut prev: Option<ChildKind> = None;

        for (i, child) in children.iter().enumerate() {
            let kind = child_kind(child);
            let line_start = i == 0 || matches!(prev, Some(ChildKind::Block));

            if line_start && matches!(kind, ChildKind::Textual) {
                self.pad(depth);
            }
            if matches!(kind, ChildKind::Block) && matches!(prev, Some(ChildKind::Textual)) {
                self.newline();
            }

            self.write_node(child, depth);

            if i == children.len() - 1 && matches!(kind, ChildKind::Textual) {
                self.newline();
            }

            prev = Some(kind);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
