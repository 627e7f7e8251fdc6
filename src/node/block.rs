//! Leaf and compound block types
//!
//! Builders follow the same shape everywhere: `new(...)` for required data,
//! `with_*` for optional identity and presentation attributes.

use crate::attr::{Attrs, AttrsExt};
use crate::subs::Substitution;

use super::Children;

// =============================================================================
// StemBlock
// =============================================================================

/// Notation declared on a stem block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StemStyle {
    /// Notation chosen by the document's `stem` attribute
    #[default]
    Stem,
    Latexmath,
    Asciimath,
}

impl StemStyle {
    /// Parse a block style name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stem" => Some(Self::Stem),
            "latexmath" => Some(Self::Latexmath),
            "asciimath" => Some(Self::Asciimath),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stem => "stem",
            Self::Latexmath => "latexmath",
            Self::Asciimath => "asciimath",
        }
    }
}

/// A standalone equation block whose whole content is one expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StemBlock {
    pub style: StemStyle,
    /// Raw equation source
    pub content: String,
    pub id: Option<String>,
    pub title: Option<String>,
    /// Block attributes (`alt`, `imagesdir`, ...)
    pub attrs: Attrs,
}

impl StemBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: StemStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Explicit alt text, if the author set one.
    pub fn alt(&self) -> Option<&str> {
        self.attrs.get_attr("alt")
    }
}

// =============================================================================
// Paragraph
// =============================================================================

/// How a block's content is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentModel {
    /// Inline text with substitutions
    #[default]
    Simple,
    /// Preformatted text (literal, listing)
    Verbatim,
}

/// A block of lines: normal paragraphs as well as literal and listing
/// blocks, distinguished by content model and substitutions.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub lines: Vec<String>,
    pub content_model: ContentModel,
    pub subs: Vec<Substitution>,
    pub style: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub attrs: Attrs,
}

impl Paragraph {
    /// Normal paragraph (simple content, normal substitutions).
    pub fn new(text: impl AsRef<str>) -> Self {
        Self::with_model(text, ContentModel::Simple, Substitution::NORMAL)
    }

    /// Literal paragraph (verbatim, special characters only).
    pub fn literal(text: impl AsRef<str>) -> Self {
        Self::with_model(text, ContentModel::Verbatim, Substitution::VERBATIM).with_style("literal")
    }

    /// Listing block (verbatim, special characters only).
    pub fn listing(text: impl AsRef<str>) -> Self {
        Self::with_model(text, ContentModel::Verbatim, Substitution::VERBATIM).with_style("listing")
    }

    fn with_model(text: impl AsRef<str>, content_model: ContentModel, subs: &[Substitution]) -> Self {
        Self {
            lines: split_lines(text.as_ref()),
            content_model,
            subs: subs.to_vec(),
            style: None,
            id: None,
            title: None,
            attrs: Attrs::new(),
        }
    }

    /// Replace the substitution list (`[subs=...]`).
    pub fn with_subs(mut self, subs: &[Substitution]) -> Self {
        self.subs = subs.to_vec();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Lines joined with line feeds.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the content, splitting on line feeds.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
    }

    /// Whether inline macros in this block are substituted.
    pub fn has_macros(&self) -> bool {
        self.subs.contains(&Substitution::Macros)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

// =============================================================================
// ImageBlock
// =============================================================================

/// A block image. Presentation lives in `attrs` the way block attribute
/// lists carry it (`target`, `alt`, `align`, `width`, `height`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBlock {
    pub id: Option<String>,
    pub title: Option<String>,
    pub attrs: Attrs,
}

impl ImageBlock {
    pub fn new(target: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.set_attr("target", target);
        Self {
            id: None,
            title: None,
            attrs,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    pub fn target(&self) -> &str {
        self.attrs.get_attr("target").unwrap_or_default()
    }

    pub fn alt(&self) -> Option<&str> {
        self.attrs.get_attr("alt")
    }

    pub fn align(&self) -> Option<&str> {
        self.attrs.get_attr("align")
    }

    pub fn width(&self) -> Option<&str> {
        self.attrs.get_attr("width")
    }

    pub fn height(&self) -> Option<&str> {
        self.attrs.get_attr("height")
    }
}

// =============================================================================
// PassBlock
// =============================================================================

/// Content emitted to the output verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassBlock {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: String,
}

impl PassBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Compound
// =============================================================================

/// Delimited container kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompoundKind {
    #[default]
    Open,
    Example,
    Sidebar,
    Quote,
    Admonition,
}

/// A delimited block holding other blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    pub kind: CompoundKind,
    pub id: Option<String>,
    pub title: Option<String>,
    pub attrs: Attrs,
    pub blocks: Children,
}

impl Compound {
    pub fn new(kind: CompoundKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn child(mut self, block: impl Into<super::Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_lines_round_trip() {
        let mut para = Paragraph::new("first\nsecond");
        assert_eq!(para.lines, vec!["first", "second"]);
        assert_eq!(para.text(), "first\nsecond");

        para.set_text("only");
        assert_eq!(para.lines, vec!["only"]);
    }

    #[test]
    fn test_paragraph_macro_subs() {
        assert!(Paragraph::new("x").has_macros());
        assert!(!Paragraph::literal("x").has_macros());
        assert_eq!(Paragraph::listing("x").content_model, ContentModel::Verbatim);
        assert!(!Paragraph::new("x").with_subs(&[]).has_macros());
    }

    #[test]
    fn test_image_block_attrs() {
        let image = ImageBlock::new("stem-1.png").attr("alt", "$$x$$").attr("width", "12");
        assert_eq!(image.target(), "stem-1.png");
        assert_eq!(image.alt(), Some("$$x$$"));
        assert_eq!(image.width(), Some("12"));
        assert_eq!(image.height(), None);
    }

    #[test]
    fn test_stem_style_names() {
        assert_eq!(StemStyle::from_name("latexmath"), Some(StemStyle::Latexmath));
        assert_eq!(StemStyle::from_name("mathml"), None);
        assert_eq!(StemStyle::Asciimath.name(), "asciimath");
    }
}
