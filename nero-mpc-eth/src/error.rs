//! Error type for Ethereum-facing hashing and encoding.

/// Failures in UserOp hashing, EIP-712 field encoding, or address decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EthError {
    /// A `bytesN` or numeric field's raw byte representation exceeded the
    /// 32-byte EIP-712 word size.
    #[error("field of kind {kind} has {actual} bytes, which does not fit in a 32-byte word")]
    FieldTooLarge {
        /// The EIP-712 type name being encoded (`"bytes20"`, `"uint256"`, ...).
        kind: &'static str,
        /// The number of bytes actually supplied.
        actual: usize,
    },
    /// An EIP-712 type name was not one this encoder understands.
    #[error("unknown EIP-712 field type: {0}")]
    UnknownType(String),
    /// Lower-case hex decoding of an address or byte field failed.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    /// A hex-encoded Ethereum address did not decode to exactly 20 bytes.
    #[error("address must be 20 bytes, got {0}")]
    InvalidAddressLength(usize),
}

/// Convenience alias for this crate's fallible operations.
pub type EthResult<T> = Result<T, EthError>;
