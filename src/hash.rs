//! Deterministic hashing for artifact names
//!
//! Equation images without an explicit id are named after a hash of their
//! wrapped input, so the same equation always lands in the same file across
//! runs and across nodes.

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, this produces the same output across
/// process restarts for the same input.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a string
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update(s.as_bytes())
    }

    /// Finish and return the hash as u64
    ///
    /// Takes the first 8 bytes of blake3 output as little-endian u64.
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Finish and return the hash as 16 lowercase hex digits
    #[inline]
    pub fn finish_hex(self) -> String {
        format!("{:016x}", self.finish())
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix of content-addressed artifact ids.
pub const STEM_ID_PREFIX: &str = "stem-";

/// Digest of a wrapped equation (`$…$` or `$$…$$`).
pub fn content_digest(wrapped: &str) -> String {
    StableHasher::new().update_str(wrapped).finish_hex()
}

/// Artifact id for an equation without an explicit id: `stem-<digest>`.
pub fn content_id(wrapped: &str) -> String {
    format!("{STEM_ID_PREFIX}{}", content_digest(wrapped))
}
