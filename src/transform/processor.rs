//! Stem processor: renders every equation of a document.
//!
//! One pass runs four stages in order:
//!
//! 1. stem blocks are replaced by image blocks (or pass blocks in inline mode)
//! 2. inline macros are rendered in simple paragraphs with macro
//!    substitution enabled and in list item text
//! 3. table body and foot cells are scanned; literal cells are skipped and
//!    asciidoc cells run this whole pass on their nested document
//! 4. inline macros are rendered in section titles
//!
//! The engine and settings are created per document and passed down. The
//! first error aborts the pass, leaving the tree partly rewritten.

use crate::attr::{AttrScope, Attrs, DocAttrs};
use crate::config::StemSettings;
use crate::engine::{EngineFactory, MathEngine};
use crate::error::{StemError, StemResult};
use crate::node::{Block, CellStyle, ContentModel, DocOptions, Document, StemBlock, TextHost};
use crate::render::EquationRenderer;
use crate::rewrite::{image_block, pass_block, replace_at};
use crate::scanner::MacroScanner;
use crate::store::ArtifactStore;

use super::Transform;

// =============================================================================
// ProcessReport
// =============================================================================

/// Summary of one processor run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Equations rendered, blocks and inline macros alike
    pub rendered: usize,
    /// Image files written
    pub written: usize,
    /// Documents walked, nested ones included
    pub documents: usize,
}

// =============================================================================
// StemProcessor
// =============================================================================

/// Renders equations with engines made by `F`.
///
/// # Example
///
/// ```ignore
/// let processor = StemProcessor::new(|options: &EngineOptions| MyEngine::new(options));
/// let report = processor.run(&mut doc)?;
/// ```
#[derive(Debug, Clone)]
pub struct StemProcessor<F> {
    factory: F,
}

impl<F: EngineFactory> StemProcessor<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Whether documents of this backend need equations pre-rendered.
    pub fn applies_to(&self, doc: &Document) -> bool {
        StemSettings::applies_to_backend(doc.backend())
    }

    /// Render every equation in `doc`, whatever its backend.
    pub fn run(&self, doc: &mut Document) -> StemResult<ProcessReport> {
        let mut report = ProcessReport::default();
        self.process(doc, &mut report)?;
        Ok(report)
    }

    fn process(&self, doc: &mut Document, report: &mut ProcessReport) -> StemResult<()> {
        let settings = StemSettings::from_attrs(&doc.attrs);
        let engine = self
            .factory
            .create(&settings.engine_options())
            .map_err(StemError::EngineInit)?;
        let renderer = EquationRenderer::new(engine, settings);
        let to_html = doc.is_basebackend("html");
        report.documents += 1;
        log::debug!(
            "rendering equations as {} at {} ppi (inline: {})",
            settings.format,
            settings.ppi,
            settings.inline
        );

        let Document { attrs, options, blocks } = doc;
        let attrs: &DocAttrs = attrs;
        let walk = Walk {
            renderer: &renderer,
            scanner: MacroScanner::new(attrs, to_html),
            attrs,
            options,
        };

        // Stem blocks
        visit_blocks(None, blocks, &mut |parent, block| match block {
            Block::Stem(stem) if !stem.content.trim().is_empty() => {
                walk.stem_block(parent, stem, report).map(Some)
            }
            _ => Ok(None),
        })?;

        // Prose
        visit_blocks(None, blocks, &mut |parent, block| {
            match block {
                Block::Paragraph(para)
                    if para.content_model == ContentModel::Simple && para.has_macros() =>
                {
                    walk.text(parent, para, report)?;
                }
                Block::List(list) => {
                    let list = &mut **list;
                    for item in &mut list.items {
                        walk.text(Some(&list.attrs), item, report)?;
                    }
                }
                _ => {}
            }
            Ok(None)
        })?;

        // Table cells
        visit_blocks(None, blocks, &mut |_, block| {
            if let Block::Table(table) = block {
                for row in table.content_rows_mut() {
                    for cell in row.iter_mut() {
                        match cell.style {
                            CellStyle::Literal => {}
                            CellStyle::Asciidoc => {
                                if let Some(inner) = cell.inner.as_deref_mut() {
                                    self.process(inner, report)?;
                                }
                            }
                            _ => walk.text(None, cell, report)?,
                        }
                    }
                }
            }
            Ok(None)
        })?;

        // Section titles
        visit_blocks(None, blocks, &mut |parent, block| {
            if let Block::Section(section) = block {
                walk.text(parent, &mut **section, report)?;
            }
            Ok(None)
        })?;

        Ok(())
    }
}

impl<F: EngineFactory> Transform for StemProcessor<F> {
    type Error = StemError;

    /// Runs only for backends that need pre-rendered equations.
    fn transform(&self, doc: &mut Document) -> StemResult<()> {
        if !self.applies_to(doc) {
            log::debug!("backend '{}' typesets math itself, skipping", doc.backend());
            return Ok(());
        }
        let report = self.run(doc)?;
        log::debug!(
            "rendered {} equations in {} documents, wrote {} images",
            report.rendered,
            report.documents,
            report.written
        );
        Ok(())
    }
}

// =============================================================================
// Walk
// =============================================================================

/// Per-document state shared by the stages.
struct Walk<'a, E> {
    renderer: &'a EquationRenderer<E>,
    scanner: MacroScanner<'a>,
    attrs: &'a DocAttrs,
    options: &'a DocOptions,
}

impl<E: MathEngine> Walk<'_, E> {
    fn inline(&self) -> bool {
        self.renderer.settings().inline
    }

    /// Store for the children of a block with `parent` attributes.
    fn store(&self, parent: Option<&Attrs>) -> ArtifactStore {
        let scope = match parent {
            Some(local) => AttrScope::block(local, self.attrs),
            None => AttrScope::document(self.attrs),
        };
        ArtifactStore::resolve(scope, self.options)
    }

    fn stem_block(
        &self,
        parent: Option<&Attrs>,
        stem: &StemBlock,
        report: &mut ProcessReport,
    ) -> StemResult<Block> {
        let rendered = self.renderer.render(&stem.content, false)?;
        report.rendered += 1;
        if self.inline() {
            return Ok(pass_block(stem, &rendered).into());
        }

        let record = self.store(parent).persist(&rendered, stem.id.as_deref())?;
        report.written += 1;
        Ok(image_block(stem, &record, rendered.format).into())
    }

    /// Render the inline macros of `host` and write the text back if it
    /// changed.
    fn text<H: TextHost + ?Sized>(
        &self,
        parent: Option<&Attrs>,
        host: &mut H,
        report: &mut ProcessReport,
    ) -> StemResult<()> {
        let modified = {
            let Some(source) = host.source() else {
                return Ok(());
            };
            let scanned = self.scanner.render(&source, self.renderer, &self.store(parent))?;
            report.rendered += scanned.rendered;
            if !self.inline() {
                report.written += scanned.rendered;
            }
            scanned.into_modified()
        };
        if let Some(text) = modified {
            host.replace_source(text);
        }
        Ok(())
    }
}

/// Visit every block under `blocks` in document order, together with the
/// attributes of its parent (`None` at document level).
///
/// A block returned by `visit` replaces the visited one at the same index
/// before its children are visited. Nested documents of table cells are
/// not entered.
fn visit_blocks<F>(parent: Option<&Attrs>, blocks: &mut [Block], visit: &mut F) -> StemResult<()>
where
    F: FnMut(Option<&Attrs>, &mut Block) -> StemResult<Option<Block>>,
{
    for index in 0..blocks.len() {
        if let Some(replacement) = visit(parent, &mut blocks[index])? {
            replace_at(blocks, index, replacement);
        }
        match &mut blocks[index] {
            Block::Section(section) => {
                let section = &mut **section;
                visit_blocks(Some(&section.attrs), &mut section.blocks, visit)?;
            }
            Block::Compound(compound) => {
                let compound = &mut **compound;
                visit_blocks(Some(&compound.attrs), &mut compound.blocks, visit)?;
            }
            Block::List(list) => {
                for item in &mut list.items {
                    visit_blocks(Some(&item.attrs), &mut item.blocks, visit)?;
                }
            }
            Block::Stem(_) | Block::Paragraph(_) | Block::Image(_) | Block::Pass(_) | Block::Table(_) => {}
        }
    }
    Ok(())
}
