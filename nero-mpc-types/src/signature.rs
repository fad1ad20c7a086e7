//! Partial and combined signature wire types.

use nero_mpc_core::{Point, Scalar};
use serde::{Deserialize, Serialize};

use crate::party::PartyId;

/// A party's partial signature, additive protocol. Verified against the
/// identity `E_j * sigma_j == m*G + (r*lambda_j)*P_j` before being combined.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct PartialSignatureAdditive {
    /// The producing party.
    pub party_id: PartyId,
    /// `sigma_i = k_i^-1 * (m + r*lambda_i*x_i) mod n`.
    pub sigma: Scalar,
    /// The claimed public share `x_i * G`, checked against the value
    /// recorded at DKG time.
    pub public_share: Point,
    /// The nonce public point `E_i` this party committed to.
    pub nonce_public: Point,
}

/// A party's partial `s_i`, multiplicative protocol.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct PartialSignatureMultiplicative {
    /// The producing party.
    pub party_id: PartyId,
    /// `s_i = m*t_i^(1) + r*t_i^(2) mod n`.
    pub s_i: Scalar,
}

/// A complete, combined, low-s-normalized ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// `R.x mod n`.
    pub r: Scalar,
    /// Combined `s`, normalized so `1 <= s <= n/2`.
    pub s: Scalar,
    /// Recovery id, `27` or `28`, flipped alongside the low-s normalization.
    pub v: u8,
}

impl Signature {
    /// The 65-byte `r || s || v` Ethereum wire encoding.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..64].copy_from_slice(&self.s.to_bytes());
        out[64] = self.v;
        out
    }

    /// Lower-case hex of [`Signature::to_bytes`], `0x`-prefixed.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}
