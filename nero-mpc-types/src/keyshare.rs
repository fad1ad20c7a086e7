//! Persisted key-share types for both protocol variants.

use nero_mpc_core::{Point, Scalar};
use serde::{Deserialize, Serialize};

use crate::party::PartyId;

/// Tag identifying the protocol a [`KeyShareAdditive`] or
/// [`KeyShareMultiplicative`] was produced by, stored alongside the share so
/// a stale or mismatched import is caught before it's used.
pub const PROTOCOL_VERSION: &str = "nero-mpc-1";

/// This party's share of the joint signing key, Pedersen-additive protocol
/// Pedersen-additive protocol.
///
/// `private_share` is the only secret field; everything else is public and
/// safe to log or display.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyShareAdditive {
    /// This party's id (`1` or `2`).
    pub party_id: PartyId,
    /// This party's share `x_i` of the joint secret key.
    pub private_share: Scalar,
    /// `x_i * G`, this party's public share.
    pub public_share: Point,
    /// The counterparty's public share `x_j * G`, recorded at DKG
    /// completion so a signing session can detect a peer presenting a
    /// different key than the one this share was generated against.
    pub peer_public_share: Point,
    /// Always `2` in this deployment.
    pub threshold: u16,
    /// Always `2` in this deployment.
    pub total_parties: u16,
    /// Protocol tag, always [`PROTOCOL_VERSION`] for shares produced by this
    /// engine; checked on import.
    pub protocol_version: String,
    /// Joint public key `Y = sum_j A_j^(0)`, cached at DKG completion.
    pub joint_public_key: Point,
    /// Domain-separated hash of `private_share`, used as an integrity check
    /// independent of the signature path (e.g. after decrypting a backup).
    pub commitment: [u8; 32],
}

impl KeyShareAdditive {
    /// `true` iff `public_share == private_share * G`, the share's own
    /// internal consistency invariant.
    pub fn is_self_consistent(&self) -> bool {
        Point::mul_base(&self.private_share).equals(&self.public_share)
    }
}

/// This party's share of the joint signing key, DKLS-style multiplicative
/// protocol.
///
/// The joint public key here is a *scalar product* `sk_A * sk_B * G`, not a
/// sum — there is no Lagrange interpolation in this variant.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyShareMultiplicative {
    /// This party's id (`1` or `2`).
    pub party_id: PartyId,
    /// This party's secret scalar `sk_i`.
    pub secret_share: Scalar,
    /// `sk_i * G`.
    pub public_share: Point,
    /// `sk_A * sk_B * G`, equal to `sk_i * peer_public_share` on either side
    /// by commutativity.
    pub joint_public_key: Point,
    /// Protocol tag, checked on import.
    pub protocol_version: String,
}

impl KeyShareMultiplicative {
    /// `true` iff `public_share == secret_share * G`.
    pub fn is_self_consistent(&self) -> bool {
        Point::mul_base(&self.secret_share).equals(&self.public_share)
    }
}
