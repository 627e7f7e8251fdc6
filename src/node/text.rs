//! Text-bearing nodes
//!
//! Paragraphs, list items, table cells and section titles all carry raw
//! text that may contain inline stem macros. [`TextHost`] lets the walker
//! read and rewrite that text without knowing which of them it holds.

use std::borrow::Cow;

use super::{Cell, ListItem, Paragraph, Section};

/// A node with a mutable raw text payload.
pub trait TextHost {
    /// Raw text, or `None` when the node carries none.
    fn source(&self) -> Option<Cow<'_, str>>;

    /// Write new raw text back to the node.
    fn replace_source(&mut self, text: String);
}

impl TextHost for Paragraph {
    fn source(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.text()))
    }

    fn replace_source(&mut self, text: String) {
        self.set_text(&text);
    }
}

impl TextHost for ListItem {
    fn source(&self) -> Option<Cow<'_, str>> {
        self.text.as_deref().map(Cow::Borrowed)
    }

    fn replace_source(&mut self, text: String) {
        self.text = Some(text);
    }
}

impl TextHost for Cell {
    fn source(&self) -> Option<Cow<'_, str>> {
        self.text.as_deref().map(Cow::Borrowed)
    }

    fn replace_source(&mut self, text: String) {
        self.text = Some(text);
    }
}

impl TextHost for Section {
    fn source(&self) -> Option<Cow<'_, str>> {
        self.title().map(Cow::Borrowed)
    }

    /// Also drops the cached converted title.
    fn replace_source(&mut self, text: String) {
        self.set_title(text);
    }
}
