//! Attribute storage and serialization.
//!
//! Attributes live in an insertion-ordered map ([`Attrs`]) and serialize
//! through [`attrs_to_string`], which applies key normalization, the
//! `css`/`label_for` rename table, and the boolean-attribute rules.

use compact_str::CompactString;
use indexmap::IndexMap;
use std::fmt;

/// Attributes that serialize as a bare name when truthy and disappear
/// entirely when falsy (`checked`, not `checked="false"`).
const BOOLEAN_ATTRS: &[&str] = &[
    "allowfullscreen",
    "async",
    "checked",
    "hidden",
    "selected",
    "required",
];

/// Key renames applied during serialization only. Matched against the
/// trimmed key before underscores are replaced with dashes.
const RENAMED_ATTRS: &[(&str, &str)] = &[("css", "class"), ("label_for", "for")];

/// Escape the four reserved HTML characters in `s`.
///
/// Substitutions run in a fixed order - `&` first, then `<`, `>`, `"` - so
/// the entities introduced by the later replacements are not themselves
/// re-escaped within a single call.
///
/// Applying this function twice is NOT idempotent: a second pass escapes the
/// ampersands of the entities produced by the first (`&amp;` becomes
/// `&amp;amp;`). Escape exactly once, at the boundary where untrusted text
/// enters the tree.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// An attribute value.
///
/// `Null` keeps the key in the map but is omitted entirely from serialized
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A string value, rendered as `key="value"`.
    Str(CompactString),
    /// An integer value, rendered through its decimal string form.
    Int(i64),
    /// A boolean value. Only meaningful for the boolean-attribute set;
    /// elsewhere it renders as `"true"`/`"false"`.
    Bool(bool),
    /// Present but never serialized.
    Null,
}

impl AttrValue {
    /// Whether this value turns a boolean attribute on.
    ///
    /// Non-empty strings, nonzero integers, and `true` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Str(s) => !s.is_empty(),
            AttrValue::Int(n) => *n != 0,
            AttrValue::Bool(b) => *b,
            AttrValue::Null => false,
        }
    }

    /// The string slice if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{}", n),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Null => Ok(()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(CompactString::from(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(CompactString::from(s))
    }
}

impl From<CompactString> for AttrValue {
    fn from(s: CompactString) -> Self {
        AttrValue::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Int(n as i64)
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        AttrValue::Int(n as i64)
    }
}

impl<V: Into<AttrValue>> From<Option<V>> for AttrValue {
    fn from(v: Option<V>) -> Self {
        match v {
            Some(v) => v.into(),
            None => AttrValue::Null,
        }
    }
}

/// An insertion-ordered attribute map.
///
/// Iteration order is the order keys were first inserted; overwriting a key
/// keeps its original position, so serialized output is stable for a given
/// sequence of calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: IndexMap<CompactString, AttrValue>,
}

impl Attrs {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by its stored key. No renaming or normalization is
    /// applied here; lookup is exact.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Insert or overwrite a value under `key`, as given.
    pub fn set(&mut self, key: impl Into<CompactString>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key, returning its old value if it existed.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.shift_remove(key)
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialize an attribute map to its textual form.
///
/// For each entry, in map order:
/// 1. the key is trimmed, then checked against the rename table (`css` to
///    `class`, `label_for` to `for`); on a miss, underscores become dashes;
/// 2. [`AttrValue::Null`] entries are skipped entirely;
/// 3. keys in the boolean-attribute set emit a bare ` key` iff the value is
///    truthy, and nothing at all otherwise;
/// 4. every other entry emits ` key="value"` with the value's string form
///    trimmed and HTML-escaped.
///
/// Each fragment carries its own leading space, so the result drops straight
/// after a tag name.
pub fn attrs_to_string(attrs: &Attrs) -> String {
    let mut out = String::new();

    for (key, value) in attrs.iter() {
        let trimmed = key.trim();
        let name: CompactString = match RENAMED_ATTRS.iter().find(|(from, _)| *from == trimmed) {
            Some((_, to)) => CompactString::from(*to),
            None => CompactString::from(trimmed.replace('_', "-")),
        };

        if matches!(value, AttrValue::Null) {
            continue;
        }

        if BOOLEAN_ATTRS.contains(&name.as_str()) {
            if value.is_truthy() {
                out.push(' ');
                out.push_str(&name);
            }
        } else {
            let form = value.to_string();
            out.push(' ');
            out.push_str(&name);
            out.push_str("=\"");
            out.push_str(&escape_html(form.trim()));
            out.push('"');
        }
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
