//! Core transform trait.

use std::convert::Infallible;

use crate::node::Document;

/// Transform a document in place.
pub trait Transform {
    /// Error that aborts the transform.
    type Error;

    /// Transform the document.
    fn transform(&self, doc: &mut Document) -> Result<(), Self::Error>;
}

impl<T: Transform + ?Sized> Transform for &T {
    type Error = T::Error;

    #[inline]
    fn transform(&self, doc: &mut Document) -> Result<(), Self::Error> {
        (**self).transform(doc)
    }
}

// =============================================================================
// IdentityTransform
// =============================================================================

/// Identity transform that leaves the document unchanged.
///
/// Useful for conditional transforms where one branch doesn't need to modify
/// the document.
///
/// # Example
///
/// ```ignore
/// Pipeline::new(doc)
///     .pipe_either(condition, processor, IdentityTransform)?
///     .into_inner()
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    type Error = Infallible;

    #[inline]
    fn transform(&self, _doc: &mut Document) -> Result<(), Infallible> {
        Ok(())
    }
}
