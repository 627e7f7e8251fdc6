//! Document tree types.
//!
//! The tree is fully owned: every container keeps its children in an
//! indexable ordered collection, so replacing a block means writing a new
//! value into its slot.
//!
//! # Key Types
//!
//! - [`Document`]: root container with attributes and options
//! - [`Block`]: sum type over every block context
//! - [`TextHost`]: common interface of the text-bearing nodes scanned for
//!   inline stem macros

mod block;
mod document;
mod list;
mod section;
mod table;
mod text;

pub use block::{
    Compound, CompoundKind, ContentModel, ImageBlock, Paragraph, PassBlock, StemBlock, StemStyle,
};
pub use document::{BlockIterator, DocOptions, Document, Stats};
pub use list::{List, ListItem, ListKind};
pub use section::Section;
pub use table::{Cell, CellStyle, Row, Rows, Table};
pub use text::TextHost;

use smallvec::SmallVec;

/// Type alias for children collection.
pub type Children = SmallVec<[Block; 4]>;

/// Block in a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Stem(StemBlock),
    Paragraph(Paragraph),
    Image(ImageBlock),
    Pass(PassBlock),
    List(Box<List>),
    Table(Box<Table>),
    Section(Box<Section>),
    Compound(Box<Compound>),
}

impl Block {
    // Generates for each variant (stem -> Stem, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(
        stem => StemBlock,
        paragraph => Paragraph,
        image => ImageBlock,
        pass => PassBlock,
        list => List,
        table => Table,
        section => Section,
        compound => Compound,
    );

    // Generates: id(&self) -> Option<&str>
    impl_variant_field_get!(id, id, Stem, Paragraph, Image, Pass, List, Table, Section, Compound);

    /// Context name, as used in selectors and logs.
    pub fn context(&self) -> &'static str {
        match self {
            Self::Stem(_) => "stem",
            Self::Paragraph(_) => "paragraph",
            Self::Image(_) => "image",
            Self::Pass(_) => "pass",
            Self::List(list) => match list.kind {
                ListKind::Unordered => "ulist",
                ListKind::Ordered => "olist",
            },
            Self::Table(_) => "table",
            Self::Section(_) => "section",
            Self::Compound(compound) => match compound.kind {
                CompoundKind::Open => "open",
                CompoundKind::Example => "example",
                CompoundKind::Sidebar => "sidebar",
                CompoundKind::Quote => "quote",
                CompoundKind::Admonition => "admonition",
            },
        }
    }

    /// Block title (the `.Title` line), or a section's heading.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Stem(b) => b.title.as_deref(),
            Self::Paragraph(b) => b.title.as_deref(),
            Self::Image(b) => b.title.as_deref(),
            Self::Pass(b) => b.title.as_deref(),
            Self::List(b) => b.title.as_deref(),
            Self::Table(b) => b.title.as_deref(),
            Self::Section(b) => b.title(),
            Self::Compound(b) => b.title.as_deref(),
        }
    }

    /// Direct child blocks, in order.
    ///
    /// Blocks attached to list items count as children of the list. Nested
    /// documents in table cells are not children.
    pub fn child_blocks(&self) -> SmallVec<[&Block; 8]> {
        match self {
            Self::Section(section) => section.blocks.iter().collect(),
            Self::Compound(compound) => compound.blocks.iter().collect(),
            Self::List(list) => list.items.iter().flat_map(|item| item.blocks.iter()).collect(),
            Self::Stem(_) | Self::Paragraph(_) | Self::Image(_) | Self::Pass(_) | Self::Table(_) => {
                SmallVec::new()
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from_block {
    ($($variant:ident($ty:ty) => |$v:ident| $wrap:expr),* $(,)?) => {
        $(
            impl From<$ty> for Block {
                fn from($v: $ty) -> Self {
                    Block::$variant($wrap)
                }
            }
        )*
    };
}

impl_from_block!(
    Stem(StemBlock) => |v| v,
    Paragraph(Paragraph) => |v| v,
    Image(ImageBlock) => |v| v,
    Pass(PassBlock) => |v| v,
    List(List) => |v| Box::new(v),
    Table(Table) => |v| Box::new(v),
    Section(Section) => |v| Box::new(v),
    Compound(Compound) => |v| Box::new(v),
);
