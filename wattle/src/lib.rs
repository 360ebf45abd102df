//! Write-only HTML tree builder.
//!
//! wattle provides:
//! - **Tree model**: an [`Element`]/[`Node`] tree built by appending, with
//!   attribute helpers, CSS-class helpers, and id-indexed descendant lookup
//! - **Tag catalog**: one constructor per HTML tag in [`tags`], all plain
//!   data rows over the single element representation
//! - **Rendering**: compact or indented output, with a configurable indent
//!   width, proper attribute escaping, and boolean-attribute handling
//!
//! There is no parser: trees only ever flow from code to markup text.
//!
//! # Example
//!
//! ```rust
//! use wattle::tags::{body, div, h1, html, p};
//!
//! let mut page = html();
//! let content = page
//!     .append_element(body())?
//!     .append_element(div().attr("css", "content"))?;
//! content.append_element(h1())?.append_text("Wattle")?;
//! content
//!     .append_element(p())?
//!     .append_text("Build the tree, then render it.")?;
//!
//! let compact = page.render(false);
//! assert!(compact.starts_with("<!DOCTYPE html><html><body>"));
//!
//! // Display renders with indentation enabled (width 4)
//! let pretty = page.to_string();
//! assert!(pretty.contains("<div class=\"content\">"));
//! # Ok::<(), wattle::TreeError>(())
//! ```

mod tracing_macros;

pub mod attrs;
pub mod dom;
pub mod render;
pub mod tags;

// Re-export the tree model at crate root for convenience
pub use dom::{Category, Element, Layout, Node, TreeError};

// Re-export attribute utilities
pub use attrs::{AttrValue, Attrs, attrs_to_string, escape_html};

// Re-export rendering
pub use render::{LINE_SEP, RenderOptions, render_element, render_fragment, render_node};
