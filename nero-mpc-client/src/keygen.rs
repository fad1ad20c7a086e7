//! Additive DKG session: a 3-round Pedersen-style key
//! generation producing a [`KeyShareAdditive`].

use nero_mpc_core::commitments::{SchnorrPok, VssCommitments};
use nero_mpc_core::hash_symmetric::sha256_concat;
use nero_mpc_core::polynomial::Polynomial;
use nero_mpc_core::share_channel::{decrypt_share, encrypt_share};
use nero_mpc_core::{CoreError, Point, Scalar};
use nero_mpc_eth::address::{address_from_public_key, to_checksum_address};
use nero_mpc_types::keyshare::{KeyShareAdditive, PROTOCOL_VERSION};
use nero_mpc_types::messages::dkg::{DkgCommitRequest, DkgInitRequest, DkgShareRequest};
use nero_mpc_types::party::PartyId;
use nero_mpc_types::share::EncryptedShareMessage;
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

use crate::config::{guarded_round, CancelToken, SessionConfig};
use crate::error::{ClientResult, Error};
use crate::transport::Transport;

fn u16_scalar(v: u16) -> Scalar {
    let mut bytes = [0u8; 32];
    bytes[30..32].copy_from_slice(&v.to_be_bytes());
    Scalar::from_bytes_mod_n(&bytes)
}

/// Drives the additive DKG to completion against `transport`, returning the
/// finished [`KeyShareAdditive`]. `local_party`/`remote_party` are always
/// `1`/`2` (in either order) in this deployment. Each round is bounded by
/// `config.round_timeout` and aborts early if `cancel` fires.
#[tracing::instrument(level = "debug", skip(rng, transport, config, cancel), fields(ceremony_id = tracing::field::Empty))]
pub async fn run_keygen<R: RngCore + CryptoRng>(
    rng: &mut R,
    transport: &dyn Transport,
    local_party: PartyId,
    remote_party: PartyId,
    config: &SessionConfig,
    cancel: Option<&CancelToken>,
) -> ClientResult<KeyShareAdditive> {
    let ceremony_id = Uuid::new_v4();
    tracing::Span::current().record("ceremony_id", ceremony_id.to_string());
    tracing::debug!("starting additive dkg");

    // Round 1: commit to a fresh degree-1 polynomial, prove knowledge of its
    // constant term, and publish a fresh ephemeral key for the share channel.
    let poly = Polynomial::generate(rng, 1);
    let commitments = VssCommitments::commit(&poly);
    let my_transcript: [&[u8]; 1] = [&local_party.into_inner().to_be_bytes()];
    let pok = SchnorrPok::prove(rng, poly.constant_term(), &my_transcript);
    let ephemeral_secret = Scalar::random_nonzero(rng);
    let ephemeral_public = Point::mul_base(&ephemeral_secret);

    let init_resp = guarded_round(
        config,
        cancel,
        transport.dkg_init(DkgInitRequest {
            ceremony_id,
            party_id: local_party,
        }),
    )
    .await?;
    if init_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkg.init ceremony id mismatch"));
    }
    let peer_transcript: [&[u8]; 1] = [&remote_party.into_inner().to_be_bytes()];
    if !init_resp
        .peer_pok
        .verify(init_resp.peer_commitments.constant_commitment(), &peer_transcript)
    {
        return Err(Error::Core(CoreError::InvalidProof));
    }

    let commit_resp = guarded_round(
        config,
        cancel,
        transport.dkg_commit(DkgCommitRequest {
            ceremony_id,
            commitments: commitments.clone(),
            pok,
            ephemeral_public,
        }),
    )
    .await?;
    if commit_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkg.commit ceremony id mismatch"));
    }

    // Round 2: decrypt the peer's share of us, verify it against their
    // published commitments, then return our share of them.
    let my_index = local_party.into_inner();
    let peer_index = remote_party.into_inner();
    let core_share = commit_resp.peer_share.into_core()?;
    let peer_share = decrypt_share(&core_share, ephemeral_secret, peer_index, my_index)?;
    if !init_resp.peer_commitments.verify_share(my_index, peer_share) {
        return Err(Error::Core(CoreError::InvalidVssShare));
    }

    let my_share_for_peer = poly.evaluate(u16_scalar(peer_index));
    let encrypted_for_peer = encrypt_share(
        rng,
        my_share_for_peer,
        init_resp.peer_ephemeral_public,
        my_index,
        peer_index,
    );
    let share_message =
        EncryptedShareMessage::from_core(local_party, remote_party, &encrypted_for_peer)?;

    let share_resp = guarded_round(
        config,
        cancel,
        transport.dkg_share(DkgShareRequest {
            ceremony_id,
            share: share_message,
        }),
    )
    .await?;
    if share_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkg.share ceremony id mismatch"));
    }

    // Round 3: finalize. The private share is never trusted from the wire —
    // only this party can compute it, from its own polynomial plus the
    // peer's decrypted share.
    let private_share = poly.evaluate(u16_scalar(my_index)) + peer_share;
    let public_share = Point::mul_base(&private_share);
    let joint_public_key = commitments
        .constant_commitment()
        .add(&init_resp.peer_commitments.constant_commitment());
    let commitment = sha256_concat(&[b"nero-mpc-keyshare-commitment", &private_share.to_bytes()]);
    let peer_public_share = commitments
        .evaluate_commitment(peer_index)
        .add(&init_resp.peer_commitments.evaluate_commitment(peer_index));

    let key_share = KeyShareAdditive {
        party_id: local_party,
        private_share,
        public_share,
        peer_public_share,
        threshold: 2,
        total_parties: 2,
        protocol_version: PROTOCOL_VERSION.to_string(),
        joint_public_key,
        commitment,
    };

    let derived_address = to_checksum_address(&address_from_public_key(&joint_public_key));
    if share_resp.address != derived_address {
        return Err(Error::ProtocolViolation(
            "backend's reported address disagrees with the locally derived joint public key",
        ));
    }

    tracing::debug!("additive dkg complete");
    Ok(key_share)
}
