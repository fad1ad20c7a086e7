//! Wire forms of the per-signature nonce commitment.
//!
//! The two protocol variants use genuinely different commitment shapes —
//! the additive engine binds two discrete logs under one Schnorr proof, the
//! multiplicative engine commits to a single point with a hash — so they
//! get distinct wire types rather than one over-general message.

use nero_mpc_core::commitments::TwoWitnessPok;
use nero_mpc_core::Point;
use serde::{Deserialize, Serialize};

use crate::party::PartyId;

/// Additive-protocol nonce commitment: `(D_i, E_i)` plus the two-witness
/// Schnorr proof binding both to `party_id`.
#[derive(Clone, Serialize, Deserialize)]
pub struct NonceCommitmentAdditive {
    /// Sending party.
    pub party_id: PartyId,
    /// `D_i = gamma_i * G`.
    pub d: Point,
    /// `E_i = k_i * G`.
    pub e: Point,
    /// Proof of knowledge of `gamma_i`, `k_i`.
    pub proof: TwoWitnessPok,
}

/// Multiplicative-protocol nonce commitment, round 1: a hash commitment to
/// `R_i = k_i * G`, opened later by [`NonceRevealMultiplicative`].
///
/// This is hash-only — no PoK of `k_i` — which
/// is weaker than the additive variant against a biased-nonce peer.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct NonceCommitmentMultiplicative {
    /// Sending party.
    pub party_id: PartyId,
    /// `SHA-256(compress(R_i))`.
    pub commitment: [u8; 32],
}

/// Multiplicative-protocol nonce reveal, round 2: the opened point.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct NonceRevealMultiplicative {
    /// Sending party.
    pub party_id: PartyId,
    /// `R_i = k_i * G`.
    pub r: Point,
}
