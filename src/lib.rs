//! tola-stem - Render equations in a parsed document tree
//!
//! ## Core Concepts
//!
//! Output formats such as PDF cannot typeset math. Before conversion, every
//! equation in the tree is rendered by an external math engine and the
//! owning node is rewritten: stem blocks become image blocks, inline
//! `stem:[...]` macros become inline image references. In inline mode the
//! rendered SVG is embedded directly instead.
//!
//! Artifacts are named by content: an equation without an explicit id is
//! written to `stem-<digest>.<ext>`, so the same equation always maps to
//! the same file.
//!
//! ## Modules
//! - `node`: Document tree (`Document`, `Block`, `TextHost`)
//! - `transform`: `StemProcessor`, `Transform`, `Pipeline`
//! - `scanner`: Inline macro detection and decoding
//! - `render`: Engine invocation with equation delimiters
//! - `store`: Output directory resolution and artifact writing
//! - `rewrite`: Replacement nodes and inline markup
//! - `config`: Per-document settings
//! - `subs`: Substitutions applied to equation source
//!
//! ## Usage
//!
//! ```ignore
//! use tola_stem::prelude::*;
//!
//! let processor = StemProcessor::new(|options: &EngineOptions| MyEngine::new(options));
//!
//! let mut doc = Document::new("pdf")
//!     .attr("imagesoutdir", "build/images")
//!     .block(StemBlock::new("x^2"))
//!     .block(Paragraph::new("area is stem:[pi r^2]"));
//!
//! let report = processor.run(&mut doc)?;
//! ```

// Must come first: the node module uses these macros.
#[macro_use]
mod macros;

// =============================================================================
// Modules
// =============================================================================

/// Attribute types and lookup
pub mod attr;

/// Per-document settings
pub mod config;

/// Math engine seam
pub mod engine;

/// Error types
pub mod error;

/// Stable content hashing
pub mod hash;

/// Document tree types
pub mod node;

/// Prelude for common imports
pub mod prelude;

/// Equation rendering
pub mod render;

/// Replacement nodes and inline markup
pub mod rewrite;

/// Inline macro scanning
pub mod scanner;

/// Artifact storage
pub mod store;

/// Text substitutions
pub mod subs;

/// Document transforms
pub mod transform;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Block, Children, Document, TextHost};

// Transform
pub use transform::{Pipeline, ProcessReport, StemProcessor, Transform};

// Engine seam
pub use config::{EngineOptions, ImageFormat, StemSettings};
pub use engine::{EngineFactory, EngineOutput, MathEngine};

// Error types
pub use error::{EngineError, StemError, StemResult};

// Algorithms
pub use hash::StableHasher;

// =============================================================================
// Static assertions
// =============================================================================
