//! Request/response payloads for the DKLS-style multiplicative DKG and
//! signing `Transport` operations: `dkls.keygen.init/commitment/complete`,
//! `dkls.signing.init/nonce`, `dkls.signing.mta.round1/round2`,
//! `dkls.signing.partial`.

use nero_mpc_core::commitments::SchnorrPok;
use nero_mpc_core::mta::{MtaRound1, MtaRound2, MtaRound3};
use nero_mpc_core::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keyshare::KeyShareMultiplicative;
use crate::nonce::{NonceCommitmentMultiplicative, NonceRevealMultiplicative};
use crate::signature::{PartialSignatureMultiplicative, Signature};

// ---------------------------------------------------------------------
// Multiplicative DKG
// ---------------------------------------------------------------------

/// `dkls.keygen.init`: exchange of commitments `c_i = SHA-256(compress(P_i))`.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenInitRequest {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's commitment `c_i`.
    pub commitment: [u8; 32],
}

/// `dkls.keygen.init` response: the peer's commitment.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenInitResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// The peer's commitment `c_peer`.
    pub peer_commitment: [u8; 32],
}

/// `dkls.keygen.commitment`: reveal of `P_i` plus its Schnorr proof of
/// knowledge of `sk_i`. (Named for the operation's place in the table, not
/// its own content — it's the reveal step of the commit-reveal pair.)
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenCommitmentRequest {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's public point `P_i = sk_i * G`.
    pub public: Point,
    /// Proof of knowledge of `sk_i`.
    pub proof: SchnorrPok,
}

/// `dkls.keygen.commitment` response: the peer's reveal.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenCommitmentResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// The peer's public point `P_peer`.
    pub peer_public: Point,
    /// The peer's proof of knowledge of `sk_peer`.
    pub peer_proof: SchnorrPok,
}

/// `dkls.keygen.complete`: finalization acknowledgement.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenCompleteRequest {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
}

/// `dkls.keygen.complete` response: the finished share and derived address.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsKeygenCompleteResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's finished key share.
    pub key_share: KeyShareMultiplicative,
    /// EIP-55 checksummed Ethereum address derived from `joint_public_key`.
    pub address: String,
}

// ---------------------------------------------------------------------
// Multiplicative signing
// ---------------------------------------------------------------------

/// `dkls.signing.init`: nonce commitment exchange (phase 1a).
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningInitRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// Lower-case hex, 32-byte message hash to sign.
    pub message_hash: String,
    /// This party's nonce commitment `c_i = SHA-256(compress(k_i*G))`.
    pub commitment: NonceCommitmentMultiplicative,
}

/// `dkls.signing.init` response: the peer's nonce commitment.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningInitResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The peer's nonce commitment `c_peer`.
    pub peer_commitment: NonceCommitmentMultiplicative,
}

/// `dkls.signing.nonce`: nonce reveal (phase 1b).
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningNonceRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// This party's opened nonce point `R_i = k_i * G`.
    pub reveal: NonceRevealMultiplicative,
}

/// `dkls.signing.nonce` response: the peer's opened nonce point.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningNonceResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The peer's opened nonce point `R_peer`.
    pub peer_reveal: NonceRevealMultiplicative,
}

/// `dkls.signing.mta.round1`: both MtA instances' round-1 setup messages,
/// sent together since phase 2 runs them in parallel ("MtA x2").
#[derive(Serialize, Deserialize)]
pub struct DklsSigningMtaRound1Request {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// MtA1: `k_A^-1` (this party's input) batch-COT setup.
    pub mta1: MtaRound1,
    /// MtA2: `sk_A*k_A^-1` (this party's input) batch-COT setup.
    pub mta2: MtaRound1,
}

/// `dkls.signing.mta.round1` response: the peer's batch-COT responses for
/// both MtA instances.
#[derive(Serialize, Deserialize)]
pub struct DklsSigningMtaRound1Response {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// MtA1 response.
    pub mta1: MtaRound2,
    /// MtA2 response.
    pub mta2: MtaRound2,
}

/// `dkls.signing.mta.round2`: both MtA instances' round-3 sender payloads.
#[derive(Serialize, Deserialize)]
pub struct DklsSigningMtaRound2Request {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// MtA1 sender payload.
    pub mta1: MtaRound3,
    /// MtA2 sender payload.
    pub mta2: MtaRound3,
}

/// `dkls.signing.mta.round2` response: a bare acknowledgement — both MtA
/// instances complete locally on the receiving side.
#[derive(Serialize, Deserialize)]
pub struct DklsSigningMtaRound2Response {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
}

/// `dkls.signing.partial`: submit local `s_i`, receive the combined signature.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningPartialRequest {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// This party's partial `s_i`.
    pub partial: PartialSignatureMultiplicative,
}

/// `dkls.signing.partial` response: the combined, low-s-normalized signature.
#[derive(Clone, Serialize, Deserialize)]
pub struct DklsSigningPartialResponse {
    /// Correlates this signing session's round-trips.
    pub session_id: Uuid,
    /// The combined `(r, s, v)` signature.
    pub signature: Signature,
}
