//! Document transforms.
//!
//! # Module Structure
//!
//! - `Transform` - Core trait for in-place document transforms
//! - `StemProcessor` - Renders every equation of a document
//! - `Pipeline` - Synchronous document processing pipeline
//!
//! # Example
//!
//! ```ignore
//! use tola_stem::transform::{Pipeline, StemProcessor};
//!
//! let processor = StemProcessor::new(engine_factory);
//! let doc = Pipeline::new(doc)
//!     .pipe(&processor)?
//!     .into_inner();
//! ```

mod core;
mod pipeline;
mod processor;

pub use self::core::{IdentityTransform, Transform};
pub use pipeline::Pipeline;
pub use processor::{ProcessReport, StemProcessor};
