//! Error types for tola-stem.
//!
//! Every failure here is fatal for the document being converted: the walk
//! stops at the first error and the caller decides what to do with a
//! partially rewritten tree.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a math engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    /// Create an engine error with a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors that can occur while rendering equations in a document.
#[derive(Debug, Error)]
pub enum StemError {
    /// The math engine rejected the equation or failed to render it
    #[error("failed to render equation `{input}`: {source}")]
    Engine {
        /// Wrapped equation source handed to the engine
        input: String,
        /// Engine failure
        #[source]
        source: EngineError,
    },

    /// The math engine could not be created for this document
    #[error("failed to create math engine: {0}")]
    EngineInit(#[source] EngineError),

    /// The image output directory could not be created
    #[error("cannot create image output directory {path}: {source}")]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The rendered artifact could not be written
    #[error("cannot write equation image {path}: {source}")]
    Write {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<std::convert::Infallible> for StemError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Result type alias for stem processing.
pub type StemResult<T> = Result<T, StemError>;

impl StemError {
    /// Wrap an engine failure together with the input that caused it.
    pub fn engine(input: impl Into<String>, source: EngineError) -> Self {
        Self::Engine {
            input: input.into(),
            source,
        }
    }

    /// Path involved in a filesystem failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => Some(path),
            Self::Engine { .. } | Self::EngineInit(_) => None,
        }
    }
}
