//! Request/response payloads for additive signing's three `Transport`
//! operations: `sign.init`, `sign.nonce`, `sign.complete`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nonce::NonceCommitmentAdditive;
use crate::signature::{PartialSignatureAdditive, Signature};

/// Request to begin additive signing over a 32-byte message hash.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignInitRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// Lower-case hex, 32-byte message hash to sign.
    pub message_hash: String,
}

/// `sign.init` response: the peer's nonce commitment.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignInitResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The peer's nonce commitment, `(D, E, proof)`.
    pub peer_commitment: NonceCommitmentAdditive,
}

/// `sign.nonce` request: this party's nonce commitment.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignNonceRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// This party's nonce commitment, `(D, E, proof)`.
    pub commitment: NonceCommitmentAdditive,
}

/// `sign.nonce` response: the peer's partial signature.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignNonceResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The peer's partial signature.
    pub peer_partial: PartialSignatureAdditive,
}

/// `sign.complete` request: this party's partial signature.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignCompleteRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// This party's partial signature.
    pub partial: PartialSignatureAdditive,
}

/// `sign.complete` response: the combined, low-s-normalized signature.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignCompleteResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The combined `(r, s, v)` signature.
    pub signature: Signature,
}
