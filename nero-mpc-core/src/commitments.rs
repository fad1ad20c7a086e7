//! Commitments and zero-knowledge proofs of knowledge.
//!
//! Covers Pedersen commitments, Feldman verifiable secret sharing, and the
//! two Schnorr proof-of-knowledge shapes the engine needs: a single-witness
//! proof (used for VSS constant-term knowledge and the DKLS public-key
//! reveal) and a two-witness proof (used for the additive signing engine's
//! nonce commitment, which binds two independent discrete logs in one
//! challenge).

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{CoreError, CoreResult};
use crate::hash_symmetric::sha256_concat;
use crate::polynomial::Polynomial;
use crate::scalar_point::{Point, Scalar};

/// Domain-separation tag for the process-wide Pedersen `H` generator.
const PEDERSEN_H_TAG: &[u8] = b"NERO_MPC_PEDERSEN_H_GENERATOR";

/// The process-wide Pedersen commitment generator `H`, derived once by
/// hashing [`PEDERSEN_H_TAG`] into a scalar and multiplying the curve
/// generator by it. Every party computes the same constant independently;
/// there is no handshake to agree on it.
pub fn pedersen_h() -> Point {
    static H: LazyLock<Point> = LazyLock::new(|| {
        let digest = sha256_concat(&[PEDERSEN_H_TAG]);
        let scalar = Scalar::from_bytes_mod_n(&digest);
        Point::mul_base(&scalar)
    });
    *H
}

/// A Pedersen commitment `C = v*G + b*H`, hiding and binding under the
/// discrete-log assumption.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenCommitment(Point);

impl PedersenCommitment {
    /// Commits to `value` with blinding factor `blinding`.
    pub fn commit(value: Scalar, blinding: Scalar) -> Self {
        let c = Point::mul_base(&value).add(&pedersen_h().mul(&blinding));
        Self(c)
    }

    /// The underlying commitment point.
    pub fn point(&self) -> Point {
        self.0
    }

    /// Verifies that `value`/`blinding` open this commitment.
    pub fn verify(&self, value: Scalar, blinding: Scalar) -> bool {
        Self::commit(value, blinding).0.equals(&self.0)
    }
}

/// Public coefficient commitments to a Shamir/Feldman sharing polynomial,
/// `{A_j = a_j * G}` for `j` in `0..=degree`.
#[derive(Clone, Serialize, Deserialize)]
pub struct VssCommitments {
    commitments: Vec<Point>,
}

impl VssCommitments {
    /// Commits to every coefficient of `poly`.
    pub fn commit(poly: &Polynomial) -> Self {
        let commitments = poly.coeffs().iter().map(Point::mul_base).collect();
        Self { commitments }
    }

    /// The commitment to the constant term, `A_0` — i.e. this party's
    /// public share of the secret being distributed.
    pub fn constant_commitment(&self) -> Point {
        self.commitments[0]
    }

    /// Read access to the full commitment vector.
    pub fn commitments(&self) -> &[Point] {
        &self.commitments
    }

    /// Verifies that `share = f(x)` is consistent with these commitments:
    /// `share*G == sum_j x^j * A_j`.
    pub fn verify_share(&self, x: u16, share: Scalar) -> bool {
        self.evaluate_commitment(x).equals(&Point::mul_base(&share))
    }

    /// Computes `f(x)*G = sum_j x^j * A_j` without knowledge of `f`'s
    /// coefficients, letting a party derive the public point behind a
    /// counterparty's share from committed data alone.
    pub fn evaluate_commitment(&self, x: u16) -> Point {
        let x_scalar = Scalar::from_bytes_mod_n(&u16_be32(x));
        let mut x_pow = Scalar::from_bytes_mod_n(&u16_be32(1));
        let mut acc = Point::identity();
        for commit in &self.commitments {
            acc = acc.add(&commit.mul(&x_pow));
            x_pow = x_pow * x_scalar;
        }
        acc
    }
}

fn u16_be32(v: u16) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[30..32].copy_from_slice(&v.to_be_bytes());
    bytes
}

/// A single-witness Schnorr proof of knowledge of the discrete log of a
/// public point with respect to the curve generator.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct SchnorrPok {
    r: Point,
    s: Scalar,
}

impl SchnorrPok {
    /// Produces a proof of knowledge of `secret` where `public = secret*G`.
    ///
    /// `transcript` is hashed together with the fresh commitment `R = k*G`
    /// to build the Fiat-Shamir challenge; callers supply whatever
    /// domain-separated fields their protocol step specifies (e.g.
    /// `party_id || A_0` for VSS, or `P_i || G` for the DKLS reveal).
    pub fn prove<R: RngCore + CryptoRng>(
        rng: &mut R,
        secret: Scalar,
        transcript: &[&[u8]],
    ) -> Self {
        let k = Scalar::random_nonzero(rng);
        let r_point = Point::mul_base(&k);
        let challenge = challenge_scalar(transcript, &r_point);
        let s = k + secret * challenge;
        Self { r: r_point, s }
    }

    /// Verifies the proof against `public = secret*G` and the same
    /// `transcript` used to produce it.
    pub fn verify(&self, public: Point, transcript: &[&[u8]]) -> bool {
        let challenge = challenge_scalar(transcript, &self.r);
        let lhs = Point::mul_base(&self.s);
        let rhs = self.r.add(&public.mul(&challenge));
        lhs.equals(&rhs)
    }

    /// The proof's commitment point `R`.
    pub fn commitment(&self) -> Point {
        self.r
    }

    /// The proof's response scalar `s`.
    pub fn response(&self) -> Scalar {
        self.s
    }
}

fn challenge_scalar(transcript: &[&[u8]], r: &Point) -> Scalar {
    let r_bytes = r.to_compressed();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(transcript.len() + 1);
    parts.extend_from_slice(transcript);
    parts.push(&r_bytes);
    let digest = sha256_concat(&parts);
    Scalar::from_bytes_mod_n(&digest)
}

/// A two-witness Schnorr proof binding knowledge of two independent
/// discrete logs `gamma`, `k` (with `D = gamma*G`, `E = k*G`) under one
/// Fiat-Shamir challenge, used by the additive signing engine's nonce
/// commitment (spec component G).
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct TwoWitnessPok {
    r1: Point,
    r2: Point,
    s1: Scalar,
    s2: Scalar,
}

impl TwoWitnessPok {
    /// Proves knowledge of `gamma` and `k` where `d = gamma*G`, `e = k*G`.
    pub fn prove<R: RngCore + CryptoRng>(
        rng: &mut R,
        gamma: Scalar,
        k: Scalar,
        d: Point,
        e: Point,
        transcript: &[&[u8]],
    ) -> Self {
        let r1_scalar = Scalar::random_nonzero(rng);
        let r2_scalar = Scalar::random_nonzero(rng);
        let r1 = Point::mul_base(&r1_scalar);
        let r2 = Point::mul_base(&r2_scalar);
        let challenge = two_witness_challenge(transcript, &d, &e, &r1, &r2);
        let s1 = r1_scalar + gamma * challenge;
        let s2 = r2_scalar + k * challenge;
        Self { r1, r2, s1, s2 }
    }

    /// Verifies the proof against the claimed `d = gamma*G`, `e = k*G`.
    pub fn verify(&self, d: Point, e: Point, transcript: &[&[u8]]) -> CoreResult<()> {
        let challenge = two_witness_challenge(transcript, &d, &e, &self.r1, &self.r2);
        let lhs1 = Point::mul_base(&self.s1);
        let rhs1 = self.r1.add(&d.mul(&challenge));
        let lhs2 = Point::mul_base(&self.s2);
        let rhs2 = self.r2.add(&e.mul(&challenge));
        if lhs1.equals(&rhs1) && lhs2.equals(&rhs2) {
            Ok(())
        } else {
            Err(CoreError::InvalidProof)
        }
    }

    /// The `R1` commitment.
    pub fn r1(&self) -> Point {
        self.r1
    }

    /// The `R2` commitment.
    pub fn r2(&self) -> Point {
        self.r2
    }
}

fn two_witness_challenge(transcript: &[&[u8]], d: &Point, e: &Point, r1: &Point, r2: &Point) -> Scalar {
    let d_bytes = d.to_compressed();
    let e_bytes = e.to_compressed();
    let r1_bytes = r1.to_compressed();
    let r2_bytes = r2.to_compressed();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(transcript.len() + 4);
    parts.extend_from_slice(transcript);
    parts.push(&d_bytes);
    parts.push(&e_bytes);
    parts.push(&r1_bytes);
    parts.push(&r2_bytes);
    let digest = sha256_concat(&parts);
    Scalar::from_bytes_mod_n(&digest)
}
