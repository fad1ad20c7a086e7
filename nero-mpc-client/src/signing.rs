//! Additive signing session: nonce commit/reveal, partial
//! signature exchange, and low-s/`v` combination into a final signature.

use nero_mpc_core::commitments::TwoWitnessPok;
use nero_mpc_core::polynomial::lagrange_coefficient;
use nero_mpc_core::{CoreError, Point, Scalar};
use nero_mpc_types::keyshare::KeyShareAdditive;
use nero_mpc_types::messages::signing::{
    SignCompleteRequest, SignInitRequest, SignNonceRequest,
};
use nero_mpc_types::nonce::NonceCommitmentAdditive;
use nero_mpc_types::party::PartyId;
use nero_mpc_types::signature::{PartialSignatureAdditive, Signature};
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

use crate::config::{guarded_round, CancelToken, SessionConfig};
use crate::error::{ClientResult, Error};
use crate::transport::Transport;

/// The secp256k1 group order divided by two, floored — the low-s threshold
/// Ethereum signatures must respect.
const HALF_N: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Drives two-party additive signing of `message_hash` to completion,
/// returning the combined, low-s-normalized, `v`-tagged signature. Each
/// round is bounded by `config.round_timeout` and aborts early if `cancel`
/// fires.
#[tracing::instrument(level = "debug", skip(rng, transport, key_share, config, cancel), fields(session_id = tracing::field::Empty))]
pub async fn run_signing<R: RngCore + CryptoRng>(
    rng: &mut R,
    transport: &dyn Transport,
    key_share: &KeyShareAdditive,
    remote_party: PartyId,
    message_hash: [u8; 32],
    config: &SessionConfig,
    cancel: Option<&CancelToken>,
) -> ClientResult<Signature> {
    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", session_id.to_string());
    tracing::debug!("starting additive signing");

    let local_party = key_share.party_id;
    let participants = sorted_pair(local_party, remote_party);
    let m = Scalar::from_bytes_mod_n(&message_hash);

    // Nonce commit. Fresh (gamma, k) per session; never reused.
    let gamma = Scalar::random_nonzero(rng);
    let k = Scalar::random_nonzero(rng);
    let d = Point::mul_base(&gamma);
    let e = Point::mul_base(&k);
    let my_transcript: [&[u8]; 1] = [&local_party.into_inner().to_be_bytes()];
    let proof = TwoWitnessPok::prove(rng, gamma, k, d, e, &my_transcript);
    let my_commitment = NonceCommitmentAdditive {
        party_id: local_party,
        d,
        e,
        proof,
    };

    let init_resp = guarded_round(
        config,
        cancel,
        transport.sign_init(SignInitRequest {
            session_id,
            message_hash: hex::encode(message_hash),
        }),
    )
    .await?;
    if init_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("sign.init session id mismatch"));
    }
    verify_peer_commitment(&init_resp.peer_commitment, remote_party)?;

    let nonce_resp = guarded_round(
        config,
        cancel,
        transport.sign_nonce(SignNonceRequest {
            session_id,
            commitment: my_commitment.clone(),
        }),
    )
    .await?;
    if nonce_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("sign.nonce session id mismatch"));
    }

    // Combine R = E_i + E_j; r = R.x mod n.
    let combined_r_point = my_commitment.e.add(&init_resp.peer_commitment.e);
    let r = combined_r_point.x_scalar();
    if r.is_zero() {
        return Err(Error::NonceDegenerate);
    }

    let lambda_local = lagrange_coefficient(local_party.into_inner(), &participants);
    let lambda_peer = lagrange_coefficient(remote_party.into_inner(), &participants);

    verify_peer_partial(
        &nonce_resp.peer_partial,
        &init_resp.peer_commitment,
        remote_party,
        key_share.peer_public_share,
        m,
        r,
        lambda_peer,
    )?;

    // Partial signature.
    let k_inv = k.invert().ok_or(Error::NonceDegenerate)?;
    let sigma = k_inv * (m + r * lambda_local * key_share.private_share);
    let my_partial = PartialSignatureAdditive {
        party_id: local_party,
        sigma,
        public_share: key_share.public_share,
        nonce_public: e,
    };

    let complete_resp = guarded_round(
        config,
        cancel,
        transport.sign_complete(SignCompleteRequest {
            session_id,
            partial: my_partial,
        }),
    )
    .await?;
    if complete_resp.session_id != session_id {
        return Err(Error::ProtocolViolation("sign.complete session id mismatch"));
    }

    tracing::debug!("additive signing complete");
    Ok(complete_resp.signature)
}

/// Combines this party's own partial with a peer's (already-verified)
/// partial into the final low-s-normalized signature. Used by the
/// counterparty side of [`run_signing`] (the transport's `sign.complete`
/// handler), kept here so both sides share one combination routine.
pub fn combine_partials(
    r: Scalar,
    combined_r: Point,
    sigma_sum: Scalar,
) -> Signature {
    let (s, flipped) = normalize_low_s(sigma_sum);
    let y_odd = combined_r.y_is_odd();
    let v_base = if y_odd { 28 } else { 27 };
    let v = if flipped { flip_v(v_base) } else { v_base };
    Signature { r, s, v }
}

fn normalize_low_s(s: Scalar) -> (Scalar, bool) {
    if s.to_bytes() > HALF_N {
        (Scalar::ZERO - s, true)
    } else {
        (s, false)
    }
}

fn flip_v(v: u8) -> u8 {
    if v == 27 {
        28
    } else {
        27
    }
}

fn sorted_pair(a: PartyId, b: PartyId) -> [u16; 2] {
    let mut pair = [a.into_inner(), b.into_inner()];
    pair.sort_unstable();
    pair
}

fn verify_peer_commitment(commitment: &NonceCommitmentAdditive, expected: PartyId) -> ClientResult<()> {
    if commitment.party_id != expected {
        return Err(Error::ProtocolViolation("nonce commitment from unexpected party"));
    }
    let transcript: [&[u8]; 1] = [&commitment.party_id.into_inner().to_be_bytes()];
    commitment
        .proof
        .verify(commitment.d, commitment.e, &transcript)
        .map_err(Error::Core)
}

#[allow(clippy::too_many_arguments)]
fn verify_peer_partial(
    partial: &PartialSignatureAdditive,
    commitment: &NonceCommitmentAdditive,
    expected: PartyId,
    expected_public_share: Point,
    m: Scalar,
    r: Scalar,
    lambda: Scalar,
) -> ClientResult<()> {
    if partial.party_id != expected {
        return Err(Error::ProtocolViolation("partial signature from unexpected party"));
    }
    if partial.sigma.is_zero() {
        return Err(Error::Core(CoreError::InvalidProof));
    }
    if !partial.nonce_public.equals(&commitment.e) {
        return Err(Error::ProtocolViolation("partial signature's nonce disagrees with its commitment"));
    }
    if !partial.public_share.equals(&expected_public_share) {
        return Err(Error::ProtocolViolation("partial signature's public share disagrees with the DKG record"));
    }
    let lhs = partial.nonce_public.mul(&partial.sigma);
    let rhs = Point::mul_base(&m).add(&partial.public_share.mul(&(r * lambda)));
    if lhs.equals(&rhs) {
        Ok(())
    } else {
        Err(Error::Core(CoreError::InvalidProof))
    }
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
        DklsSigningInitRequest, DklsSigningInitResponse, DklsSigningMtaRound1Request,
        DklsSigningMtaRound1Response, DklsSigningMtaRound2Request, DklsSigningMtaRound2Response,
        DklsSigningNonceRequest, DklsSigningNonceResponse, DklsSigningPartialRequest,
        DklsSigningPartialResponse,
    };
    use nero_mpc_types::messages::signing::{SignCompleteResponse, SignInitResponse, SignNonceResponse};
    use std::sync::Mutex;

    #[test]
    fn low_s_normalization_flips_high_s() {
        let high = Scalar::from_bytes(&HALF_N).unwrap() + Scalar::from_bytes(&u16_scalar(2)).unwrap();
        let (s, flipped) = normalize_low_s(high);
        assert!(flipped);
        assert!(s.to_bytes() <= HALF_N);
    }

    #[test]
    fn low_s_normalization_leaves_low_s_untouched() {
        let low = Scalar::from_bytes(&u16_scalar(5)).unwrap();
        let (s, flipped) = normalize_low_s(low);
        assert!(!flipped);
        assert_eq!(s.to_bytes(), low.to_bytes());
    }

    fn u16_scalar(v: u16) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[30..32].copy_from_slice(&v.to_be_bytes());
        bytes
    }

    /// A two-party test double that plays the "remote" side of signing
    /// entirely in-process, so a single test can drive both halves of the
    /// protocol and check the combined signature's partial-verification
    /// identity.
    struct LoopbackTransport {
        remote_share: Scalar,
        remote_public: Point,
        state: Mutex<Option<(Scalar, Point, Scalar)>>,
    }

    #[async_trait]
    impl Transport for LoopbackTransport {
        async fn dkg_init(&self, _req: DkgInitRequest) -> Result<DkgInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkg_commit(&self, _req: DkgCommitRequest) -> Result<DkgCommitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkg_share(&self, _req: DkgShareRequest) -> Result<DkgShareResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }

        async fn sign_init(
            &self,
            req: nero_mpc_types::messages::signing::SignInitRequest,
        ) -> Result<SignInitResponse, String> {
            let mut rng = rand::thread_rng();
            let remote_gamma = Scalar::random_nonzero(&mut rng);
            let remote_k = Scalar::random_nonzero(&mut rng);
            let remote_d = Point::mul_base(&remote_gamma);
            let remote_e = Point::mul_base(&remote_k);
            let transcript: [&[u8]; 1] = [&PartyId::REMOTE.into_inner().to_be_bytes()];
            let proof = TwoWitnessPok::prove(&mut rng, remote_gamma, remote_k, remote_d, remote_e, &transcript);
            let hash_bytes: [u8; 32] = hex::decode(&req.message_hash)
                .unwrap()
                .try_into()
                .unwrap();
            let m = Scalar::from_bytes_mod_n(&hash_bytes);
            *self.state.lock().unwrap() = Some((remote_k, remote_e, m));
            Ok(SignInitResponse {
                session_id: req.session_id,
                peer_commitment: NonceCommitmentAdditive {
                    party_id: PartyId::REMOTE,
                    d: remote_d,
                    e: remote_e,
                    proof,
                },
            })
        }

        async fn sign_nonce(
            &self,
            req: nero_mpc_types::messages::signing::SignNonceRequest,
        ) -> Result<SignNonceResponse, String> {
            let (remote_k, remote_e, m) = self.state.lock().unwrap().unwrap();
            let combined = req.commitment.e.add(&remote_e);
            let r = combined.x_scalar();
            let participants = [1u16, 2u16];
            let lambda_remote = lagrange_coefficient(PartyId::REMOTE.into_inner(), &participants);
            let k_inv = remote_k.invert().unwrap();
            let sigma = k_inv * (m + r * lambda_remote * self.remote_share);
            Ok(SignNonceResponse {
                session_id: req.session_id,
                peer_partial: PartialSignatureAdditive {
                    party_id: PartyId::REMOTE,
                    sigma,
                    public_share: self.remote_public,
                    nonce_public: remote_e,
                },
            })
        }

        async fn sign_complete(
            &self,
            req: nero_mpc_types::messages::signing::SignCompleteRequest,
        ) -> Result<SignCompleteResponse, String> {
            let (remote_k, remote_e, m) = self.state.lock().unwrap().unwrap();
            let combined = req.partial.nonce_public.add(&remote_e);
            let r = combined.x_scalar();
            let participants = [1u16, 2u16];
            let lambda_remote = lagrange_coefficient(PartyId::REMOTE.into_inner(), &participants);
            let k_inv = remote_k.invert().unwrap();
            let remote_sigma = k_inv * (m + r * lambda_remote * self.remote_share);
            let sigma_sum = req.partial.sigma + remote_sigma;
            let signature = combine_partials(r, combined, sigma_sum);
            Ok(SignCompleteResponse {
                session_id: req.session_id,
                signature,
            })
        }

        async fn dkls_keygen_init(
            &self,
            _req: DklsKeygenInitRequest,
        ) -> Result<DklsKeygenInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_keygen_commitment(
            &self,
            _req: DklsKeygenCommitmentRequest,
        ) -> Result<DklsKeygenCommitmentResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_keygen_complete(
            &self,
            _req: DklsKeygenCompleteRequest,
        ) -> Result<DklsKeygenCompleteResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_init(
            &self,
            _req: DklsSigningInitRequest,
        ) -> Result<DklsSigningInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_nonce(
            &self,
            _req: DklsSigningNonceRequest,
        ) -> Result<DklsSigningNonceResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_mta_round1(
            &self,
            _req: DklsSigningMtaRound1Request,
        ) -> Result<DklsSigningMtaRound1Response, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_mta_round2(
            &self,
            _req: DklsSigningMtaRound2Request,
        ) -> Result<DklsSigningMtaRound2Response, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_partial(
            &self,
            _req: DklsSigningPartialRequest,
        ) -> Result<DklsSigningPartialResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
    }

    fn sample_key_share(local: Scalar, remote: Scalar) -> KeyShareAdditive {
        KeyShareAdditive {
            party_id: PartyId::LOCAL,
            private_share: local,
            public_share: Point::mul_base(&local),
            peer_public_share: Point::mul_base(&remote),
            threshold: 2,
            total_parties: 2,
            protocol_version: nero_mpc_types::keyshare::PROTOCOL_VERSION.to_string(),
            joint_public_key: Point::mul_base(&(local + remote)),
            commitment: [0u8; 32],
        }
    }

    #[tokio::test]
    async fn signing_session_completes_with_a_low_s_signature() {
        let mut rng = rand::thread_rng();
        let remote_share = Scalar::random_nonzero(&mut rng);
        let local_share = Scalar::random_nonzero(&mut rng);
        let key_share = sample_key_share(local_share, remote_share);
        let transport = LoopbackTransport {
            remote_share,
            remote_public: Point::mul_base(&remote_share),
            state: Mutex::new(None),
        };
        let message_hash = [7u8; 32];
        let config = crate::config::SessionConfig::default();
        let signature = run_signing(
            &mut rng,
            &transport,
            &key_share,
            PartyId::REMOTE,
            message_hash,
            &config,
            None,
        )
        .await
        .unwrap();
        assert!(signature.s.to_bytes() <= HALF_N);
        assert!(signature.v == 27 || signature.v == 28);
    }

    /// Like [`LoopbackTransport`], but draws the remote party's randomness
    /// from a seeded RNG instead of `rand::thread_rng()`, so the whole
    /// ceremony is a deterministic function of the two seeds plus the
    /// message — reproducible across runs rather than only self-consistent
    /// within one.
    struct SeededLoopbackTransport {
        remote_share: Scalar,
        remote_public: Point,
        peer_rng: Mutex<rand_chacha::ChaChaRng>,
        state: Mutex<Option<(Scalar, Point, Scalar)>>,
    }

    #[async_trait]
    impl Transport for SeededLoopbackTransport {
        async fn dkg_init(&self, _req: DkgInitRequest) -> Result<DkgInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkg_commit(&self, _req: DkgCommitRequest) -> Result<DkgCommitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkg_share(&self, _req: DkgShareRequest) -> Result<DkgShareResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }

        async fn sign_init(
            &self,
            req: nero_mpc_types::messages::signing::SignInitRequest,
        ) -> Result<SignInitResponse, String> {
            let mut peer_rng = self.peer_rng.lock().unwrap();
            let remote_gamma = Scalar::random_nonzero(&mut *peer_rng);
            let remote_k = Scalar::random_nonzero(&mut *peer_rng);
            let remote_d = Point::mul_base(&remote_gamma);
            let remote_e = Point::mul_base(&remote_k);
            let transcript: [&[u8]; 1] = [&PartyId::REMOTE.into_inner().to_be_bytes()];
            let proof =
                TwoWitnessPok::prove(&mut *peer_rng, remote_gamma, remote_k, remote_d, remote_e, &transcript);
            let hash_bytes: [u8; 32] = hex::decode(&req.message_hash)
                .unwrap()
                .try_into()
                .unwrap();
            let m = Scalar::from_bytes_mod_n(&hash_bytes);
            *self.state.lock().unwrap() = Some((remote_k, remote_e, m));
            Ok(SignInitResponse {
                session_id: req.session_id,
                peer_commitment: NonceCommitmentAdditive {
                    party_id: PartyId::REMOTE,
                    d: remote_d,
                    e: remote_e,
                    proof,
                },
            })
        }

        async fn sign_nonce(
            &self,
            req: nero_mpc_types::messages::signing::SignNonceRequest,
        ) -> Result<SignNonceResponse, String> {
            let (remote_k, remote_e, m) = self.state.lock().unwrap().unwrap();
            let combined = req.commitment.e.add(&remote_e);
            let r = combined.x_scalar();
            let participants = [1u16, 2u16];
            let lambda_remote = lagrange_coefficient(PartyId::REMOTE.into_inner(), &participants);
            let k_inv = remote_k.invert().unwrap();
            let sigma = k_inv * (m + r * lambda_remote * self.remote_share);
            Ok(SignNonceResponse {
                session_id: req.session_id,
                peer_partial: PartialSignatureAdditive {
                    party_id: PartyId::REMOTE,
                    sigma,
                    public_share: self.remote_public,
                    nonce_public: remote_e,
                },
            })
        }

        async fn sign_complete(
            &self,
            req: nero_mpc_types::messages::signing::SignCompleteRequest,
        ) -> Result<SignCompleteResponse, String> {
            let (remote_k, remote_e, m) = self.state.lock().unwrap().unwrap();
            let combined = req.partial.nonce_public.add(&remote_e);
            let r = combined.x_scalar();
            let participants = [1u16, 2u16];
            let lambda_remote = lagrange_coefficient(PartyId::REMOTE.into_inner(), &participants);
            let k_inv = remote_k.invert().unwrap();
            let remote_sigma = k_inv * (m + r * lambda_remote * self.remote_share);
            let sigma_sum = req.partial.sigma + remote_sigma;
            let signature = combine_partials(r, combined, sigma_sum);
            Ok(SignCompleteResponse {
                session_id: req.session_id,
                signature,
            })
        }

        async fn dkls_keygen_init(
            &self,
            _req: DklsKeygenInitRequest,
        ) -> Result<DklsKeygenInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_keygen_commitment(
            &self,
            _req: DklsKeygenCommitmentRequest,
        ) -> Result<DklsKeygenCommitmentResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_keygen_complete(
            &self,
            _req: DklsKeygenCompleteRequest,
        ) -> Result<DklsKeygenCompleteResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_init(
            &self,
            _req: DklsSigningInitRequest,
        ) -> Result<DklsSigningInitResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_nonce(
            &self,
            _req: DklsSigningNonceRequest,
        ) -> Result<DklsSigningNonceResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_mta_round1(
            &self,
            _req: DklsSigningMtaRound1Request,
        ) -> Result<DklsSigningMtaRound1Response, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_mta_round2(
            &self,
            _req: DklsSigningMtaRound2Request,
        ) -> Result<DklsSigningMtaRound2Response, String> {
            unimplemented!("not exercised by the signing tests")
        }
        async fn dkls_signing_partial(
            &self,
            _req: DklsSigningPartialRequest,
        ) -> Result<DklsSigningPartialResponse, String> {
            unimplemented!("not exercised by the signing tests")
        }
    }

    /// Independently checks `s^-1*(m*G + r*Q) == R` rather than trusting
    /// that `run_signing` returning `Ok` implies a valid signature.
    fn ecdsa_verifies(joint_public_key: Point, message_hash: [u8; 32], signature: &Signature) -> bool {
        let m = Scalar::from_bytes_mod_n(&message_hash);
        let s_inv = match signature.s.invert() {
            Some(inv) => inv,
            None => return false,
        };
        let candidate = Point::mul_base(&(m * s_inv)).add(&joint_public_key.mul(&(signature.r * s_inv)));
        candidate.x_scalar().to_bytes() == signature.r.to_bytes()
    }

    #[tokio::test]
    async fn signing_with_a_seeded_rng_and_a_canned_peer_is_deterministic_and_verifies() {
        use rand::SeedableRng;
        use rand_chacha::ChaChaRng;

        // Shares are themselves derived from a fixed seed so the whole
        // ceremony — not just the nonce — is pinned by the two seeds below.
        let mut share_rng = ChaChaRng::from_seed([9u8; 32]);
        let local_share = Scalar::random_nonzero(&mut share_rng);
        let remote_share = Scalar::random_nonzero(&mut share_rng);
        let key_share = sample_key_share(local_share, remote_share);
        let message_hash = nero_mpc_core::hash_symmetric::keccak256(b"hello");
        let config = crate::config::SessionConfig::default();

        let run_with_fresh_seeds = || async {
            let transport = SeededLoopbackTransport {
                remote_share,
                remote_public: Point::mul_base(&remote_share),
                peer_rng: Mutex::new(ChaChaRng::from_seed([1u8; 32])),
                state: Mutex::new(None),
            };
            let mut local_rng = ChaChaRng::from_seed([0u8; 32]);
            run_signing(
                &mut local_rng,
                &transport,
                &key_share,
                PartyId::REMOTE,
                message_hash,
                &config,
                None,
            )
            .await
            .unwrap()
        };

        let first = run_with_fresh_seeds().await;
        let second = run_with_fresh_seeds().await;

        // Same seeds, same canned peer script, same message: byte-identical
        // output every time, not merely internally self-consistent.
        assert_eq!(first.to_bytes(), second.to_bytes());
        assert!(ecdsa_verifies(key_share.joint_public_key, message_hash, &first));
    }

    #[tokio::test]
    async fn signing_session_rejects_a_peer_with_the_wrong_share() {
        let mut rng = rand::thread_rng();
        let remote_share = Scalar::random_nonzero(&mut rng);
        let local_share = Scalar::random_nonzero(&mut rng);
        let key_share = sample_key_share(local_share, remote_share);
        let transport = LoopbackTransport {
            // A remote share different from the one recorded in the key
            // share at DKG time must fail the partial-signature check.
            remote_share: Scalar::random_nonzero(&mut rng),
            remote_public: Point::mul_base(&remote_share),
            state: Mutex::new(None),
        };
        let config = crate::config::SessionConfig::default();
        let result = run_signing(
            &mut rng,
            &transport,
            &key_share,
            PartyId::REMOTE,
            [7u8; 32],
            &config,
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
