//! Node rewriting
//!
//! Builds the nodes and inline markup that replace rendered equations.
//! Block images carry dimensions only for PNG; inline image references
//! always carry them.

use crate::attr::AttrsExt;
use crate::config::ImageFormat;
use crate::node::{Block, ImageBlock, PassBlock, StemBlock};
use crate::render::{Rendered, wrap_equation};
use crate::store::ArtifactRecord;

// =============================================================================
// Block replacements
// =============================================================================

/// Image block standing in for a stem block.
///
/// Alt text defaults to the wrapped block equation. Id and title carry
/// over from the stem block.
pub fn image_block(stem: &StemBlock, record: &ArtifactRecord, format: ImageFormat) -> ImageBlock {
    let alt = stem
        .alt()
        .map_or_else(|| wrap_equation(&stem.content, false), str::to_owned);

    let mut image = ImageBlock::new(record.target())
        .attr("alt", alt)
        .attr("align", "center");
    if format.needs_dimensions() {
        image.attrs.set_attr("width", format_dimension(record.width));
        image.attrs.set_attr("height", format_dimension(record.height));
    }
    image.id = stem.id.clone();
    image.title = stem.title.clone();
    image
}

/// Pass block embedding the rendered markup of a stem block.
pub fn pass_block(stem: &StemBlock, rendered: &Rendered) -> PassBlock {
    PassBlock {
        id: stem.id.clone(),
        title: stem.title.clone(),
        content: format!(r#"<div class="stemblock"> {} </div>"#, rendered.markup()),
    }
}

/// Replace the block at `index`, returning the old one.
///
/// The new block takes the same position among its siblings.
pub fn replace_at(blocks: &mut [Block], index: usize, block: impl Into<Block>) -> Block {
    std::mem::replace(&mut blocks[index], block.into())
}

// =============================================================================
// Inline replacements
// =============================================================================

/// Inline passthrough embedding rendered markup.
pub fn inline_pass(rendered: &Rendered) -> String {
    format!(r#"pass:[<span class="steminline"> {} </span>]"#, rendered.markup())
}

/// Inline image reference with explicit dimensions.
pub fn inline_image(record: &ArtifactRecord) -> String {
    format!(
        "image:{}[width={},height={}]",
        record.target(),
        format_dimension(record.width),
        format_dimension(record.height)
    )
}

/// Dimension as written into attributes (`42`, `10.5`).
fn format_dimension(value: f64) -> String {
    value.to_string()
}
