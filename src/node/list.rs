//! Lists and list items

use crate::attr::{Attrs, AttrsExt};

use super::{Block, Children};

/// List flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    pub kind: ListKind,
    pub id: Option<String>,
    pub title: Option<String>,
    pub attrs: Attrs,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn item(mut self, item: ListItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A list item: principal text plus any attached blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    /// Principal text, unsubstituted
    pub text: Option<String>,
    pub id: Option<String>,
    pub attrs: Attrs,
    pub blocks: Children,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Attach a block to this item.
    pub fn child(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }
}
