//! String Interner - Deduplicate tag and attribute names
//!
//! Widget markup reuses a handful of names ("div", "button", "class",
//! "aria-label", the SVG icon tags) on every render, so they are stored
//! once and referenced by a 4-byte ID.

use std::collections::HashMap;

/// Interned string ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// Names seeded into every interner
const PRE_INTERNED: &[&str] = &[
    // HTML used by the widget chrome
    "html", "head", "body", "div", "span", "p", "a", "h1", "h2", "h3",
    "button", "input", "label", "dialog", "section", "header", "footer",
    // SVG icon elements
    "svg", "circle", "ellipse", "g", "line", "path", "polygon", "polyline",
    "rect", "text", "use",
    // Attributes
    "id", "class", "style", "href", "type", "name", "value", "checked",
    "disabled", "role", "aria-label", "aria-checked", "data-open",
    "fill", "stroke", "stroke-width", "fill-rule", "clip-rule", "viewBox",
];

/// String interner for deduplicating names
#[derive(Debug)]
pub struct StringInterner {
    /// Interned strings, indexed by ID
    strings: Vec<Box<str>>,
    /// Map from string content to ID
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create an interner with the common widget names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(64),
            map: HashMap::with_capacity(64),
        };

        // Index 0 is always the empty string
        interner.intern("");
        for name in PRE_INTERNED {
            interner.intern(name);
        }

        interner
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&id) = self.map.get(s) {
            return InternedString(id);
        }

        let id = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), id);
        InternedString(id)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&id| InternedString(id))
    }

    /// Get the string for an interned ID (empty for unknown IDs)
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
