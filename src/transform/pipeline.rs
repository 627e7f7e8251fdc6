//! Document processing pipeline.

use crate::node::Document;

use super::Transform;

/// Synchronous pipeline for document processing.
///
/// Wraps a `Document` and provides a fluent API for transformations. The
/// first failing transform ends the chain.
///
/// # Example
///
/// ```ignore
/// use tola_stem::transform::Pipeline;
///
/// let processed = Pipeline::new(doc)
///     .pipe(&processor)?
///     .inspect(|doc| log::debug!("{} blocks", doc.count_blocks()))
///     .into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    doc: Document,
}

impl Pipeline {
    /// Create a new pipeline from a document.
    #[inline]
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    /// Apply a transform to the document.
    #[inline]
    pub fn pipe<T>(mut self, transform: T) -> Result<Self, T::Error>
    where
        T: Transform,
    {
        transform.transform(&mut self.doc)?;
        Ok(self)
    }

    /// Conditionally apply a transform.
    ///
    /// Only applies the transform if `condition` is true.
    #[inline]
    pub fn pipe_if<T>(self, condition: bool, transform: T) -> Result<Self, T::Error>
    where
        T: Transform,
    {
        if condition {
            self.pipe(transform)
        } else {
            Ok(self)
        }
    }

    /// Conditionally apply one of two transforms.
    ///
    /// Both transforms must fail with the same error type.
    #[inline]
    pub fn pipe_either<T1, T2>(self, condition: bool, then_transform: T1, else_transform: T2) -> Result<Self, T1::Error>
    where
        T1: Transform,
        T2: Transform,
        T1::Error: From<T2::Error>,
    {
        if condition {
            self.pipe(then_transform)
        } else {
            self.pipe(else_transform).map_err(T1::Error::from)
        }
    }

    /// Inspect the document without consuming the pipeline.
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&Document),
    {
        f(&self.doc);
        self
    }

    /// Tap into the pipeline to extract data while continuing the chain.
    #[inline]
    pub fn tap<F, R>(self, f: F) -> (Self, R)
    where
        F: FnOnce(&Document) -> R,
    {
        let result = f(&self.doc);
        (self, result)
    }

    /// Get a reference to the underlying document.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Get a mutable reference to the underlying document.
    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Consume the pipeline and return the document.
    #[inline]
    pub fn into_inner(self) -> Document {
        self.doc
    }
}

impl From<Document> for Pipeline {
    #[inline]
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}

impl From<Pipeline> for Document {
    #[inline]
    fn from(pipeline: Pipeline) -> Self {
        pipeline.into_inner()
    }
}
