//! Document type and related utilities
//!
//! The root container for block trees, with query and traversal APIs.
//! Queries never descend into the nested documents of asciidoc table
//! cells; those are documents in their own right.

use std::path::PathBuf;

use crate::attr::DocAttrs;

use super::{Block, Children};

// =============================================================================
// DocOptions
// =============================================================================

/// API options the document was loaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct DocOptions {
    /// Directory of the source document; relative paths resolve against it
    pub base_dir: PathBuf,
    /// Output directory requested by the caller
    pub to_dir: Option<PathBuf>,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            to_dir: None,
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// Root document container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document attributes (`backend`, `imagesdir`, `mathematical-format`, ...)
    pub attrs: DocAttrs,
    pub options: DocOptions,
    /// Top-level blocks
    pub blocks: Children,
}

impl Document {
    /// Create an empty document for a backend (`pdf`, `html5`, ...).
    ///
    /// Sets `backend` and derives `basebackend` by stripping trailing
    /// digits, so `html5` belongs to the `html` family.
    pub fn new(backend: &str) -> Self {
        let mut attrs = DocAttrs::default();
        attrs.insert("backend".into(), backend.to_owned());
        attrs.insert(
            "basebackend".into(),
            backend.trim_end_matches(|c: char| c.is_ascii_digit()).to_owned(),
        );
        Self {
            attrs,
            options: DocOptions::default(),
            blocks: Children::new(),
        }
    }

    /// Create a nested document (asciidoc table cell) inheriting the
    /// parent's attributes and options.
    pub fn nested(parent: &Document) -> Self {
        Self {
            attrs: parent.attrs.clone(),
            options: parent.options.clone(),
            blocks: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builders
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a top-level block
    pub fn block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Set a document attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.base_dir = dir.into();
        self
    }

    pub fn with_to_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.to_dir = Some(dir.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a document attribute
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Backend name (`pdf`, `html5`, ...)
    pub fn backend(&self) -> &str {
        self.get_attr("backend").unwrap_or_default()
    }

    /// Whether the backend belongs to the given family (`html`, `docbook`)
    pub fn is_basebackend(&self, base: &str) -> bool {
        self.get_attr("basebackend") == Some(base)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first block matching predicate (depth-first search)
    pub fn find<F>(&self, predicate: F) -> Option<&Block>
    where
        F: Fn(&Block) -> bool,
    {
        self.iter_blocks().find(|b| predicate(b))
    }

    /// Find all blocks matching predicate, in document order
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Block>
    where
        F: Fn(&Block) -> bool,
    {
        self.iter_blocks().filter(|b| predicate(b)).collect()
    }

    /// Check if any block matches predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Block) -> bool,
    {
        self.find(predicate).is_some()
    }

    /// Iterate over all blocks (depth-first, document order)
    pub fn iter_blocks(&self) -> BlockIterator<'_> {
        BlockIterator::new(&self.blocks)
    }

    /// Count all blocks in the document
    pub fn count_blocks(&self) -> usize {
        self.iter_blocks().count()
    }

    /// Collect statistics about the document
    pub fn collect_stats(&self) -> Stats {
        let mut stats = Stats::default();
        for block in self.iter_blocks() {
            stats.block_count += 1;
            match block {
                Block::Stem(_) => stats.stem_count += 1,
                Block::Paragraph(_) => stats.paragraph_count += 1,
                Block::Image(_) => stats.image_count += 1,
                Block::Pass(_) => stats.pass_count += 1,
                Block::List(list) => stats.list_item_count += list.items.len(),
                Block::Table(table) => {
                    stats.table_count += 1;
                    for row in table.rows.body.iter().chain(&table.rows.foot) {
                        stats.nested_document_count +=
                            row.iter().filter(|cell| cell.inner.is_some()).count();
                    }
                }
                Block::Section(_) => stats.section_count += 1,
                Block::Compound(_) => {}
            }
        }
        stats
    }
}

// =============================================================================
// BlockIterator - depth-first block traversal
// =============================================================================

/// Depth-first iterator over blocks
pub struct BlockIterator<'a> {
    stack: Vec<&'a Block>,
}

impl<'a> BlockIterator<'a> {
    fn new(roots: &'a [Block]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for BlockIterator<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stack.pop()?;
        // Push children in reverse order so they're visited in document order
        self.stack.extend(block.child_blocks().into_iter().rev());
        Some(block)
    }
}

// =============================================================================
// Stats - document statistics
// =============================================================================

/// Document statistics collected from traversal
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub block_count: usize,
    pub stem_count: usize,
    pub paragraph_count: usize,
    pub list_item_count: usize,
    pub table_count: usize,
    pub section_count: usize,
    pub image_count: usize,
    pub pass_count: usize,
    /// Asciidoc cells in body and foot rows
    pub nested_document_count: usize,
}

impl Stats {
    /// Check if the document has any equation blocks
    pub fn has_stem_blocks(&self) -> bool {
        self.stem_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Cell, Compound, CompoundKind, ListItem, List, ListKind, Paragraph, Section, StemBlock, Table};

    fn sample() -> Document {
        Document::new("pdf")
            .block(Paragraph::new("intro"))
            .block(
                Section::new(1, "One")
                    .child(StemBlock::new("a"))
                    .child(Compound::new(CompoundKind::Example).child(StemBlock::new("b"))),
            )
            .block(List::new(ListKind::Unordered).item(ListItem::new("x").child(Paragraph::new("y"))))
            .block(Table::new().body_row(vec![Cell::asciidoc(
                Document::new("pdf").block(StemBlock::new("hidden")),
            )]))
    }

    #[test]
    fn test_backend_family() {
        let doc = Document::new("html5");
        assert_eq!(doc.backend(), "html5");
        assert!(doc.is_basebackend("html"));
        assert!(!Document::new("pdf").is_basebackend("html"));
    }

    #[test]
    fn test_iter_blocks_document_order() {
        let doc = sample();
        let contexts: Vec<_> = doc.iter_blocks().map(Block::context).collect();
        assert_eq!(
            contexts,
            vec!["paragraph", "section", "stem", "example", "stem", "ulist", "paragraph", "table"]
        );
    }

    #[test]
    fn test_find_all_skips_nested_documents() {
        let doc = sample();
        let stems = doc.find_all(Block::is_stem);
        assert_eq!(stems.len(), 2);
        assert!(doc.any(|b| b.is_table()));
        assert!(doc.find(|b| b.is_image()).is_none());
    }

    #[test]
    fn test_collect_stats() {
        let stats = sample().collect_stats();
        assert_eq!(stats.block_count, 8);
        assert_eq!(stats.stem_count, 2);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.list_item_count, 1);
        assert_eq!(stats.nested_document_count, 1);
        assert!(stats.has_stem_blocks());
    }

    #[test]
    fn test_nested_inherits_attrs() {
        let parent = Document::new("pdf")
            .attr("mathematical-format", "svg")
            .with_to_dir("out");
        let nested = Document::nested(&parent);
        assert_eq!(nested.get_attr("mathematical-format"), Some("svg"));
        assert_eq!(nested.options.to_dir, Some(PathBuf::from("out")));
        assert!(nested.blocks.is_empty());
    }
}
