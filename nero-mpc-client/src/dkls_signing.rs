//! Multiplicative (DKLS-style) signing session: nonce
//! commit-reveal, two parallel MtA instances, and partial-`s` combination.

use nero_mpc_core::hash_symmetric::{sha256, sha256_concat};
use nero_mpc_core::mta::{mta_alice_complete, mta_alice_init};
use nero_mpc_core::{Point, Scalar};
use nero_mpc_types::keyshare::KeyShareMultiplicative;
use nero_mpc_types::messages::dkls::{
    DklsSigningInitRequest, DklsSigningMtaRound1Request, DklsSigningMtaRound2Request,
    DklsSigningNonceRequest, DklsSigningPartialRequest,
};
use nero_mpc_types::nonce::{NonceCommitmentMultiplicative, NonceRevealMultiplicative};
use nero_mpc_types::party::PartyId;
use nero_mpc_types::signature::{PartialSignatureMultiplicative, Signature};
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

use crate::config::{guarded_round, CancelToken, SessionConfig};
use crate::error::{ClientResult, Error};
use crate::transport::Transport;

/// Drives the DKLS-style multiplicative signing protocol to completion,
/// returning the combined, low-s-normalized, `v`-tagged signature. Each
/// round is bounded by `config.round_timeout` and aborts early if `cancel`
/// fires.
#[tracing::instrument(level = "debug", skip(rng, transport, key_share, config, cancel), fields(session_id = tracing::field::Empty))]
pub async fn run_dkls_signing<R: RngCore + CryptoRng>(
    rng: &mut R,
    transport: &dyn Transport,
    key_share: &KeyShareMultiplicative,
    message_hash: [u8; 32],
    config: &SessionConfig,
    cancel: Option<&CancelToken>,
) -> ClientResult<Signature> {
    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", session_id.to_string());
    tracing::debug!("starting multiplicative signing");

    let m = Scalar::from_bytes_mod_n(&message_hash);

    // Phase 1: nonce commit-reveal.
    let k = Scalar::random_nonzero(rng);
    let nonce_point = Point::mul_base(&k);
    let commitment = sha256(&nonce_point.to_compressed());

    let init_resp = guarded_round(
        config,
        cancel,
        transport.dkls_signing_init(DklsSigningInitRequest {
            session_id,
            message_hash: hex::encode(message_hash),
            commitment: NonceCommitmentMultiplicative {
                party_id: key_share.party_id,
                commitment,
            },
        }),
    )
    .await?;
    if init_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("dkls.signing.init session id mismatch"));
    }

    let nonce_resp = guarded_round(
        config,
        cancel,
        transport.dkls_signing_nonce(DklsSigningNonceRequest {
            session_id,
            reveal: NonceRevealMultiplicative {
                party_id: key_share.party_id,
                r: nonce_point,
            },
        }),
    )
    .await?;
    if nonce_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("dkls.signing.nonce session id mismatch"));
    }
    let expected_commitment = sha256(&nonce_resp.peer_reveal.r.to_compressed());
    if expected_commitment != init_resp.peer_commitment.commitment {
        return Err(Error::ProtocolViolation("peer's revealed nonce disagrees with its commitment"));
    }

    let combined_r = nonce_resp.peer_reveal.r.mul(&k);
    let r = combined_r.x_scalar();
    if r.is_zero() {
        return Err(Error::NonceDegenerate);
    }

    // Phase 2: two parallel MtA instances.
    let k_inv = k.invert().ok_or(Error::NonceDegenerate)?;
    let sk_times_k_inv = key_share.secret_share * k_inv;

    let session_bytes = session_id.as_bytes().to_vec();
    let mta1_session = sha256_concat(&[&session_bytes, b"mta1"]);
    let mta2_session = sha256_concat(&[&session_bytes, b"mta2"]);

    let (alice1, round1_1) = mta_alice_init(rng, mta1_session, k_inv);
    let (alice2, round1_2) = mta_alice_init(rng, mta2_session, sk_times_k_inv);

    let round1_resp = guarded_round(
        config,
        cancel,
        transport.dkls_signing_mta_round1(DklsSigningMtaRound1Request {
            session_id,
            mta1: round1_1,
            mta2: round1_2,
        }),
    )
    .await?;
    if round1_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("dkls.signing.mta.round1 session id mismatch"));
    }

    let (t1, round3_1) = mta_alice_complete(rng, &alice1, &round1_resp.mta1)?;
    let (t2, round3_2) = mta_alice_complete(rng, &alice2, &round1_resp.mta2)?;

    let round2_resp = guarded_round(
        config,
        cancel,
        transport.dkls_signing_mta_round2(DklsSigningMtaRound2Request {
            session_id,
            mta1: round3_1,
            mta2: round3_2,
        }),
    )
    .await?;
    if round2_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("dkls.signing.mta.round2 session id mismatch"));
    }

    // Phase 3: partial s, combined by the backend.
    let s_i = m * t1 + r * t2;
    let partial_resp = guarded_round(
        config,
        cancel,
        transport.dkls_signing_partial(DklsSigningPartialRequest {
            session_id,
            partial: PartialSignatureMultiplicative {
                party_id: key_share.party_id,
                s_i,
            },
        }),
    )
    .await?;
    if partial_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("dkls.signing.partial session id mismatch"));
    }

    tracing::debug!("multiplicative signing complete");
    Ok(partial_resp.signature)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use async_trait::async_trait;
    use nero_mpc_types::messages::dkg::{
        DkgCommitRequest, DkgCommitResponse, DkgInitRequest, DkgInitResponse, DkgShareRequest,
        DkgShareResponse,
    };
    use nero_mpc_types::messages::dkls::{
        DklsKeygenCommitmentRequest, DklsKeygenCommitmentResponse, DklsKeygenCompleteRequest,
        DklsKeygenCompleteResponse, DklsKeygenInitRequest, DklsKeygenInitResponse,
        DklsSigningInitResponse, DklsSigningMtaRound1Response, DklsSigningMtaRound2Response,
        DklsSigningNonceResponse, DklsSigningPartialResponse,
    };
    use nero_mpc_types::messages::signing::{
        SignCompleteRequest, SignCompleteResponse, SignInitRequest, SignInitResponse,
        SignNonceRequest, SignNonceResponse,
    };

    /// Commits honestly to a nonce point in `dkls.signing.init`, then reveals
    /// a *different* point in `dkls.signing.nonce` — the commit-reveal
    /// mismatch `run_dkls_signing` must catch before any MtA round starts.
    struct TamperingNonceTransport;

    #[async_trait]
    impl Transport for TamperingNonceTransport {
        async fn dkg_init(&self, _req: DkgInitRequest) -> Result<DkgInitResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn dkg_commit(&self, _req: DkgCommitRequest) -> Result<DkgCommitResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn dkg_share(&self, _req: DkgShareRequest) -> Result<DkgShareResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn sign_init(&self, _req: SignInitRequest) -> Result<SignInitResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn sign_nonce(&self, _req: SignNonceRequest) -> Result<SignNonceResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn sign_complete(
            &self,
            _req: SignCompleteRequest,
        ) -> Result<SignCompleteResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn dkls_keygen_init(
            &self,
            _req: DklsKeygenInitRequest,
        ) -> Result<DklsKeygenInitResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn dkls_keygen_commitment(
            &self,
            _req: DklsKeygenCommitmentRequest,
        ) -> Result<DklsKeygenCommitmentResponse, String> {
            unimplemented!("not exercised by this test")
        }
        async fn dkls_keygen_complete(
            &self,
            _req: DklsKeygenCompleteRequest,
        ) -> Result<DklsKeygenCompleteResponse, String> {
            unimplemented!("not exercised by this test")
        }

        async fn dkls_signing_init(
            &self,
            req: DklsSigningInitRequest,
        ) -> Result<DklsSigningInitResponse, String> {
            let mut rng = rand::thread_rng();
            let real_k = Scalar::random_nonzero(&mut rng);
            let real_r = Point::mul_base(&real_k);
            Ok(DklsSigningInitResponse {
                session_id: req.session_id,
                peer_commitment: NonceCommitmentMultiplicative {
                    party_id: PartyId::REMOTE,
                    commitment: sha256(&real_r.to_compressed()),
                },
            })
        }
        async fn dkls_signing_nonce(
            &self,
            req: DklsSigningNonceRequest,
        ) -> Result<DklsSigningNonceResponse, String> {
            let mut rng = rand::thread_rng();
            let fake_k = Scalar::random_nonzero(&mut rng);
            let fake_r = Point::mul_base(&fake_k);
            Ok(DklsSigningNonceResponse {
                session_id: req.session_id,
                peer_reveal: NonceRevealMultiplicative {
                    party_id: PartyId::REMOTE,
                    r: fake_r,
                },
            })
        }
        async fn dkls_signing_mta_round1(
            &self,
            _req: DklsSigningMtaRound1Request,
        ) -> Result<DklsSigningMtaRound1Response, String> {
            unimplemented!("session must abort on the commit-reveal mismatch before this round")
        }
        async fn dkls_signing_mta_round2(
            &self,
            _req: DklsSigningMtaRound2Request,
        ) -> Result<DklsSigningMtaRound2Response, String> {
            unimplemented!("session must abort on the commit-reveal mismatch before this round")
        }
        async fn dkls_signing_partial(
            &self,
            _req: DklsSigningPartialRequest,
        ) -> Result<DklsSigningPartialResponse, String> {
            unimplemented!("session must abort on the commit-reveal mismatch before this round")
        }
    }

    #[tokio::test]
    async fn signing_aborts_when_the_peer_s_reveal_disagrees_with_its_commitment() {
        let mut rng = rand::thread_rng();
        let secret_share = Scalar::random_nonzero(&mut rng);
        let key_share = KeyShareMultiplicative {
            party_id: PartyId::LOCAL,
            secret_share,
            public_share: Point::mul_base(&secret_share),
            joint_public_key: Point::mul_base(&secret_share),
            protocol_version: nero_mpc_types::keyshare::PROTOCOL_VERSION.to_string(),
        };
        let transport = TamperingNonceTransport;
        let config = SessionConfig::default();
        let result = run_dkls_signing(&mut rng, &transport, &key_share, [3u8; 32], &config, None).await;
        assert!(matches!(result, Err(Error::ProtocolViolation(_))));
    }

    #[test]
    fn combined_nonce_agrees_from_both_sides() {
        let mut rng = rand::thread_rng();
        let k_a = Scalar::random_nonzero(&mut rng);
        let k_b = Scalar::random_nonzero(&mut rng);
        let r_a = Point::mul_base(&k_a);
        let r_b = Point::mul_base(&k_b);
        let combined_from_a = r_b.mul(&k_a);
        let combined_from_b = r_a.mul(&k_b);
        assert!(combined_from_a.equals(&combined_from_b));
    }

    #[test]
    fn partial_s_sums_to_canonical_ecdsa_s() {
        let mut rng = rand::thread_rng();
        let t1_a = Scalar::random_nonzero(&mut rng);
        let t1_b = Scalar::random_nonzero(&mut rng);
        let t2_a = Scalar::random_nonzero(&mut rng);
        let t2_b = Scalar::random_nonzero(&mut rng);
        let m = Scalar::random_nonzero(&mut rng);
        let r = Scalar::random_nonzero(&mut rng);

        let s_a = m * t1_a + r * t2_a;
        let s_b = m * t1_b + r * t2_b;
        let combined = s_a + s_b;
        let expected = m * (t1_a + t1_b) + r * (t2_a + t2_b);
        assert_eq!(combined.to_bytes(), expected.to_bytes());
    }
}
