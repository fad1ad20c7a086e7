//! Error type for the wire-message and data-model layer.

use nero_mpc_core::CoreError;

/// Failures that can occur while building or parsing a wire-facing type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TypesError {
    /// A lower-level cryptographic decode failed (bad hex, off-curve point,
    /// out-of-range scalar).
    #[error("cryptographic decode failed: {0}")]
    Core(#[from] CoreError),
    /// A fixed-size byte field (AES-GCM nonce, tag) had the wrong length.
    #[error("wire field {field} had length {actual}, expected {expected}")]
    WrongLength {
        /// Name of the offending field.
        field: &'static str,
        /// The length actually supplied.
        actual: usize,
        /// The length required by the wire format.
        expected: usize,
    },
    /// Hex decoding of a byte field failed.
    #[error("invalid hex in field {0}")]
    InvalidHex(&'static str),
}

/// Convenience alias for this crate's fallible operations.
pub type TypesResult<T> = Result<T, TypesError>;
