//! Sections

use crate::attr::{Attrs, AttrsExt};

use super::{Block, Children};

/// A section: a titled container of blocks.
///
/// The converted title is cached by whoever renders the document. Changing
/// the raw title through [`Section::set_title`] drops that cache so the new
/// text is converted again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub level: u8,
    pub id: Option<String>,
    pub attrs: Attrs,
    pub blocks: Children,
    title: Option<String>,
    converted_title: Option<String>,
}

impl Section {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    pub fn child(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Raw (unconverted) title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace the raw title and invalidate the converted one.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
        self.invalidate_converted_title();
    }

    /// Cached converted title, if one was stored.
    pub fn converted_title(&self) -> Option<&str> {
        self.converted_title.as_deref()
    }

    /// Store the converted title.
    pub fn cache_converted_title(&mut self, converted: impl Into<String>) {
        self.converted_title = Some(converted.into());
    }

    pub fn invalidate_converted_title(&mut self) {
        self.converted_title = None;
    }
}
