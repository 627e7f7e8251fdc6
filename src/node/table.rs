//! Tables, rows and cells
//!
//! A cell styled `asciidoc` owns a complete nested [`Document`]; every other
//! cell holds plain text.

use crate::attr::{Attrs, AttrsExt};

use super::Document;

// =============================================================================
// CellStyle
// =============================================================================

/// Cell content style, as written in column or cell specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStyle {
    #[default]
    Default,
    /// Nested document (`a`)
    Asciidoc,
    /// Preformatted, never substituted (`l`)
    Literal,
    Emphasis,
    Strong,
    Monospace,
    Header,
    Verse,
}

impl CellStyle {
    /// Parse a style letter or name (`a`, `asciidoc`, `l`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let style = match name {
            "d" | "default" => Self::Default,
            "a" | "asciidoc" => Self::Asciidoc,
            "l" | "literal" => Self::Literal,
            "e" | "emphasis" => Self::Emphasis,
            "s" | "strong" => Self::Strong,
            "m" | "monospace" => Self::Monospace,
            "h" | "header" => Self::Header,
            "v" | "verse" => Self::Verse,
            _ => return None,
        };
        Some(style)
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub style: CellStyle,
    /// Cell text (unused for asciidoc cells)
    pub text: Option<String>,
    /// Nested document of an asciidoc cell
    pub inner: Option<Box<Document>>,
    pub attrs: Attrs,
}

impl Cell {
    /// Plain text cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Text cell with an explicit style.
    pub fn styled(style: CellStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Asciidoc cell owning a nested document.
    pub fn asciidoc(inner: Document) -> Self {
        Self {
            style: CellStyle::Asciidoc,
            text: None,
            inner: Some(Box::new(inner)),
            attrs: Attrs::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }
}

/// A row of cells.
pub type Row = Vec<Cell>;

// =============================================================================
// Table
// =============================================================================

/// Rows grouped by table section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    pub head: Vec<Row>,
    pub body: Vec<Row>,
    pub foot: Vec<Row>,
}

/// A table block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub id: Option<String>,
    pub title: Option<String>,
    pub attrs: Attrs,
    pub rows: Rows,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head_row(mut self, row: Row) -> Self {
        self.rows.head.push(row);
        self
    }

    pub fn body_row(mut self, row: Row) -> Self {
        self.rows.body.push(row);
        self
    }

    pub fn foot_row(mut self, row: Row) -> Self {
        self.rows.foot.push(row);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Body rows followed by foot rows. Head rows are never scanned.
    pub fn content_rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.body.iter_mut().chain(self.rows.foot.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_style_names() {
        assert_eq!(CellStyle::from_name("a"), Some(CellStyle::Asciidoc));
        assert_eq!(CellStyle::from_name("literal"), Some(CellStyle::Literal));
        assert_eq!(CellStyle::from_name("x"), None);
    }

    #[test]
    fn test_content_rows_skip_head() {
        let mut table = Table::new()
            .head_row(vec![Cell::new("head")])
            .body_row(vec![Cell::new("body")])
            .foot_row(vec![Cell::new("foot")]);
        let texts: Vec<_> = table
            .content_rows_mut()
            .flat_map(|row| row.iter().filter_map(|c| c.text.clone()))
            .collect();
        assert_eq!(texts, vec!["body", "foot"]);
    }

    #[test]
    fn test_asciidoc_cell_has_no_text() {
        let cell = Cell::asciidoc(Document::new("pdf"));
        assert_eq!(cell.style, CellStyle::Asciidoc);
        assert!(cell.text.is_none());
        assert!(cell.inner.is_some());
    }
}
