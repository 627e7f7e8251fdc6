//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_stem::prelude::*;
//! ```

// Node types
pub use crate::node::{
    Block, Cell, CellStyle, Children, Compound, CompoundKind, ContentModel, DocOptions, Document,
    ImageBlock, List, ListItem, ListKind, Paragraph, PassBlock, Section, StemBlock, StemStyle,
    Table, TextHost,
};

// Transform
pub use crate::transform::{IdentityTransform, Pipeline, ProcessReport, StemProcessor, Transform};

// Attributes
pub use crate::attr::{AttrScope, Attrs, AttrsExt, DocAttrs};

// Configuration and engine seam
pub use crate::config::{EngineOptions, ImageFormat, StemSettings};
pub use crate::engine::{EngineFactory, EngineOutput, MathEngine};

// Substitutions
pub use crate::subs::Substitution;

// Error
pub use crate::error::{EngineError, StemError, StemResult};
