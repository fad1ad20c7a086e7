//! Error kinds for the cryptographic core.
//!
//! These map onto the "Cryptographic verification failure" and
//! "Input domain" kinds described for the engine as a whole; the session
//! layer (`nero-mpc-client`) adds the protocol/transport/storage kinds on
//! top of these.

/// Errors produced by scalar/point decoding, commitments, proofs, the
/// share channel, OT and MtA.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A byte string was not a valid encoding of a point on the curve, or
    /// decoded to the identity where the identity is disallowed.
    #[error("invalid or identity point encoding")]
    InvalidPoint,
    /// A byte string was not a canonical scalar encoding or is out of range.
    #[error("invalid scalar encoding")]
    InvalidScalar,
    /// A scalar was zero where zero is reserved as "unset" and forbidden.
    #[error("unexpected zero scalar")]
    ZeroScalar,
    /// A Schnorr proof of knowledge failed to verify.
    #[error("Schnorr proof of knowledge failed to verify")]
    InvalidProof,
    /// A Feldman VSS share failed the verification equation.
    #[error("VSS share failed verification")]
    InvalidVssShare,
    /// A Pedersen commitment did not reproduce the committed value.
    #[error("Pedersen commitment mismatch")]
    InvalidCommitment,
    /// AES-GCM authentication tag failed to verify, or encryption failed.
    #[error("symmetric decryption failed")]
    DecryptionFailed,
    /// An oblivious-transfer message was inconsistent with its session.
    #[error("oblivious transfer protocol violation: {0}")]
    OtViolation(&'static str),
    /// An MtA session-identifier mismatch between the two halves of an MtA.
    #[error("MtA session id mismatch")]
    MtaSessionMismatch,
    /// Entropy source failed; fatal to the process per the engine's design.
    #[error("failed to obtain cryptographic randomness")]
    Entropy,
}

/// Convenience alias.
pub type CoreResult<T> = Result<T, CoreError>;
