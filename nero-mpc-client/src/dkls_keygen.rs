//! Multiplicative (DKLS-style) DKG session: commit-reveal of a
//! single public point per party, combined by scalar multiplication rather
//! than Lagrange interpolation.

use nero_mpc_core::commitments::SchnorrPok;
use nero_mpc_core::hash_symmetric::sha256_concat;
use nero_mpc_core::{CoreError, Point, Scalar};
use nero_mpc_types::keyshare::{KeyShareMultiplicative, PROTOCOL_VERSION};
use nero_mpc_types::messages::dkls::{
    DklsKeygenCommitmentRequest, DklsKeygenCompleteRequest, DklsKeygenInitRequest,
};
use nero_mpc_types::party::PartyId;
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

use crate::config::{guarded_round, CancelToken, SessionConfig};
use crate::error::{ClientResult, Error};
use crate::transport::Transport;

/// Drives the DKLS-style multiplicative DKG to completion, returning the
/// finished [`KeyShareMultiplicative`]. Each round is bounded by
/// `config.round_timeout` and aborts early if `cancel` fires.
#[tracing::instrument(level = "debug", skip(rng, transport, config, cancel), fields(ceremony_id = tracing::field::Empty))]
pub async fn run_dkls_keygen<R: RngCore + CryptoRng>(
    rng: &mut R,
    transport: &dyn Transport,
    local_party: PartyId,
    config: &SessionConfig,
    cancel: Option<&CancelToken>,
) -> ClientResult<KeyShareMultiplicative> {
    let ceremony_id = Uuid::new_v4();
    tracing::Span::current().record("ceremony_id", ceremony_id.to_string());
    tracing::debug!("starting multiplicative dkg");

    let sk = Scalar::random_nonzero(rng);
    let public = Point::mul_base(&sk);
    let commitment = sha256_concat(&[b"nero-mpc-dkls-keygen-commit", &public.to_compressed()]);

    let init_resp = guarded_round(
        config,
        cancel,
        transport.dkls_keygen_init(DklsKeygenInitRequest {
            ceremony_id,
            commitment,
        }),
    )
    .await?;
    if init_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkls.keygen.init ceremony id mismatch"));
    }

    let transcript: [&[u8]; 2] = [&public.to_compressed(), &Point::generator().to_compressed()];
    let proof = SchnorrPok::prove(rng, sk, &transcript);

    let commitment_resp = guarded_round(
        config,
        cancel,
        transport.dkls_keygen_commitment(DklsKeygenCommitmentRequest {
            ceremony_id,
            public,
            proof,
        }),
    )
    .await?;
    if commitment_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkls.keygen.commitment ceremony id mismatch"));
    }

    let peer_expected_commitment = sha256_concat(&[
        b"nero-mpc-dkls-keygen-commit",
        &commitment_resp.peer_public.to_compressed(),
    ]);
    if peer_expected_commitment != init_resp.peer_commitment {
        return Err(Error::ProtocolViolation("peer's revealed point disagrees with its commitment"));
    }
    let peer_transcript: [&[u8]; 2] = [
        &commitment_resp.peer_public.to_compressed(),
        &Point::generator().to_compressed(),
    ];
    if !commitment_resp
        .peer_proof
        .verify(commitment_resp.peer_public, &peer_transcript)
    {
        return Err(Error::Core(CoreError::InvalidProof));
    }

    let joint_public_key = commitment_resp.peer_public.mul(&sk);

    let complete_resp = guarded_round(
        config,
        cancel,
        transport.dkls_keygen_complete(DklsKeygenCompleteRequest { ceremony_id }),
    )
    .await?;
    if complete_resp.ceremony_id != ceremony_id {
        return Err(Error::ProtocolViolation("dkls.keygen.complete ceremony id mismatch"));
    }

    let key_share = KeyShareMultiplicative {
        party_id: local_party,
        secret_share: sk,
        public_share: public,
        joint_public_key,
        protocol_version: PROTOCOL_VERSION.to_string(),
    };

    let derived_address =
        nero_mpc_eth::address::to_checksum_address(&nero_mpc_eth::address::address_from_public_key(&joint_public_key));
    if complete_resp.address != derived_address {
        return Err(Error::ProtocolViolation(
            "backend's reported address disagrees with the locally derived joint public key",
        ));
    }

    tracing::debug!("multiplicative dkg complete");
    Ok(key_share)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn commutative_product_matches_on_both_sides() {
        let mut rng = rand::thread_rng();
        let sk_a = Scalar::random_nonzero(&mut rng);
        let sk_b = Scalar::random_nonzero(&mut rng);
        let public_a = Point::mul_base(&sk_a);
        let public_b = Point::mul_base(&sk_b);
        let joint_from_a = public_b.mul(&sk_a);
        let joint_from_b = public_a.mul(&sk_b);
        assert!(joint_from_a.equals(&joint_from_b));
    }
}
