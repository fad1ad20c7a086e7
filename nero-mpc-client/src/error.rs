//! Session-level error type, wrapping the lower crates' errors and adding
//! the protocol/transport/storage kinds this engine's sessions need.

use nero_mpc_core::CoreError;
use nero_mpc_eth::EthError;
use nero_mpc_types::TypesError;

/// Failures a session can report to its caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lower-level cryptographic check failed (bad proof, off-curve
    /// point, bad decryption). The failing peer has misbehaved.
    #[error("cryptographic verification failed: {0}")]
    Core(#[from] CoreError),
    /// A wire-message or data-model type failed to build or parse.
    #[error("message type error: {0}")]
    Types(#[from] TypesError),
    /// An Ethereum hashing/encoding call failed (input domain error, no
    /// session was started).
    #[error("ethereum encoding error: {0}")]
    Eth(#[from] EthError),
    /// A message arrived out of round order, with a mismatched session
    /// id, or otherwise violated the protocol's expected shape.
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),
    /// A round's wall-clock budget (see [`crate::config::SessionConfig`])
    /// elapsed before the expected response arrived.
    #[error("round timed out")]
    Timeout,
    /// The caller cancelled the session.
    #[error("session cancelled")]
    Cancelled,
    /// The injected `Transport` reported a network-level failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The injected `Store` reported a read/write failure.
    #[error("storage error: {0}")]
    Storage(String),
    /// A derived scalar used as a nonce or signature component was zero.
    /// The caller MAY start a new session; the current one is unusable.
    #[error("derived scalar was degenerate (zero); retry with a new session")]
    NonceDegenerate,
}

/// Convenience alias for this crate's fallible operations.
pub type ClientResult<T> = Result<T, Error>;
