//! Attribute system for document nodes
//!
//! - `Attrs`: block-level attributes as ordered key-value pairs
//! - `DocAttrs`: document-level attribute table
//! - `AttrScope`: block-then-document lookup, the way block attributes
//!   inherit from the document header

use rustc_hash::FxHashMap;

/// Block attributes as simple key-value pairs
///
/// Insertion order is preserved, which keeps generated image attributes in
/// a predictable order (`target`, `alt`, `align`, `width`, `height`).
pub type Attrs = Vec<(String, String)>;

/// Document attributes (header entries, API-supplied values)
pub type DocAttrs = FxHashMap<String, String>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

// =============================================================================
// AttrScope
// =============================================================================

/// Attribute lookup for a block that falls back to the document.
#[derive(Debug, Clone, Copy)]
pub struct AttrScope<'a> {
    local: Option<&'a Attrs>,
    document: &'a DocAttrs,
}

impl<'a> AttrScope<'a> {
    /// Scope of a block owned directly by the document.
    pub fn document(document: &'a DocAttrs) -> Self {
        Self { local: None, document }
    }

    /// Scope of a block with its own attributes.
    pub fn block(local: &'a Attrs, document: &'a DocAttrs) -> Self {
        Self {
            local: Some(local),
            document,
        }
    }

    /// Resolve `name` on the block, then on the document.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.local
            .and_then(|attrs| attrs.get_attr(name))
            .or_else(|| self.document.get(name).map(String::as_str))
    }
}

// =============================================================================
// Tests
// =============================================================================
