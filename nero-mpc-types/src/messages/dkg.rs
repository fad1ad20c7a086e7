//! Request/response payloads for the additive DKG's three `Transport`
//! operations: `dkg.init`, `dkg.commit`, `dkg.share`.

use nero_mpc_core::commitments::{SchnorrPok, VssCommitments};
use nero_mpc_core::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keyshare::KeyShareAdditive;
use crate::party::PartyId;
use crate::share::EncryptedShareMessage;

/// Request to begin additive DKG.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgInitRequest {
    /// Correlates this ceremony's three round-trips.
    pub ceremony_id: Uuid,
    /// The initiating party.
    pub party_id: PartyId,
}

/// `dkg.init` response: the peer's commitment round-1 material, arriving
/// pre-built so the local session's round 1 can verify it immediately.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgInitResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// Peer's Feldman VSS coefficient commitments.
    pub peer_commitments: VssCommitments,
    /// Proof of knowledge of the peer's constant-term coefficient.
    pub peer_pok: SchnorrPok,
    /// Peer's fresh ephemeral public key for the share channel.
    pub peer_ephemeral_public: Point,
}

/// `dkg.commit` request: this party's round-1 material.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgCommitRequest {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's Feldman VSS coefficient commitments.
    pub commitments: VssCommitments,
    /// Proof of knowledge of this party's constant-term coefficient.
    pub pok: SchnorrPok,
    /// This party's fresh ephemeral public key for the share channel.
    pub ephemeral_public: Point,
}

/// `dkg.commit` response: the peer's encrypted share for this party.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgCommitResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// The peer's Shamir share evaluated at this party's index, encrypted
    /// for this party.
    pub peer_share: EncryptedShareMessage,
}

/// `dkg.share` request: this party's encrypted share for the peer.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgShareRequest {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's Shamir share evaluated at the peer's index, encrypted
    /// for the peer.
    pub share: EncryptedShareMessage,
}

/// `dkg.share` response: ceremony finalization — the joint public key and
/// derived Ethereum address, plus this party's finished share.
#[derive(Clone, Serialize, Deserialize)]
pub struct DkgShareResponse {
    /// Correlates this ceremony's round-trips.
    pub ceremony_id: Uuid,
    /// This party's finished key share.
    pub key_share: KeyShareAdditive,
    /// EIP-55 checksummed Ethereum address derived from `key_share.joint_public_key`.
    pub address: String,
}
