//! Polynomial utilities for Shamir-style secret sharing over the
//! secp256k1 scalar field.

use rand::{CryptoRng, RngCore};

use crate::scalar_point::Scalar;

/// A polynomial `f(x) = a_0 + a_1 x + ... + a_degree x^degree` with
/// coefficients in the secp256k1 scalar field. `a_0` is conventionally the
/// shared secret.
#[derive(Clone)]
pub struct Polynomial {
    coeffs: Vec<Scalar>,
}

impl Polynomial {
    /// Generates a random polynomial of the given `degree` with `degree + 1`
    /// fresh, non-zero coefficients.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, degree: usize) -> Self {
        let coeffs = (0..=degree).map(|_| Scalar::random_nonzero(rng)).collect();
        Self { coeffs }
    }

    /// Builds a polynomial whose constant term is a caller-supplied secret
    /// (e.g. an existing key share being reshared) and whose remaining
    /// `degree` coefficients are fresh randomness.
    pub fn with_secret<R: RngCore + CryptoRng>(rng: &mut R, secret: Scalar, degree: usize) -> Self {
        let mut coeffs = Vec::with_capacity(degree + 1);
        coeffs.push(secret);
        for _ in 0..degree {
            coeffs.push(Scalar::random_nonzero(rng));
        }
        Self { coeffs }
    }

    /// Wraps an explicit coefficient vector (`coeffs[0]` is the constant term).
    pub fn from_coeffs(coeffs: Vec<Scalar>) -> Self {
        Self { coeffs }
    }

    /// The polynomial's degree.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Read-only access to the coefficients. Treat as sensitive: `coeffs[0]`
    /// is typically the shared secret.
    pub fn coeffs(&self) -> &[Scalar] {
        &self.coeffs
    }

    /// The constant term `a_0`.
    pub fn constant_term(&self) -> Scalar {
        self.coeffs[0]
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    pub fn evaluate(&self, x: Scalar) -> Scalar {
        evaluate(&self.coeffs, x)
    }
}

/// Evaluates the polynomial given by `coeffs` (constant term first) at `x`
/// using Horner's method.
pub fn evaluate(coeffs: &[Scalar], x: Scalar) -> Scalar {
    let mut acc = Scalar::ZERO;
    for coeff in coeffs.iter().rev() {
        acc = acc * x + *coeff;
    }
    acc
}

/// Computes the Lagrange coefficient for participant `i` given the full
/// participant index set, for interpolating the value of a polynomial at
/// `x = 0`:
///
/// `lambda_i = product_{j != i} (-j) / (i - j) mod n`
///
/// Participant indices are 1-based (matching the convention that party `k`
/// holds the evaluation `f(k)`).
pub fn lagrange_coefficient(i: u16, participants: &[u16]) -> Scalar {
    let i_scalar = Scalar::from_bytes_mod_n(&u16_to_scalar_bytes(i));
    let mut numerator = Scalar::from_bytes_mod_n(&u16_to_scalar_bytes(1));
    let mut denominator = numerator;
    for &j in participants {
        if j == i {
            continue;
        }
        let j_scalar = Scalar::from_bytes_mod_n(&u16_to_scalar_bytes(j));
        numerator = numerator * (Scalar::ZERO - j_scalar);
        denominator = denominator * (i_scalar - j_scalar);
    }
    numerator
        * denominator
            .invert()
            .expect("distinct participant indices yield a non-zero denominator")
}

/// Computes the full set of Lagrange coefficients for every participant in
/// `participants`, for interpolating at `x = 0`.
pub fn lagrange_coefficients(participants: &[u16]) -> Vec<Scalar> {
    participants
        .iter()
        .map(|&i| lagrange_coefficient(i, participants))
        .collect()
}

fn u16_to_scalar_bytes(v: u16) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[30..32].copy_from_slice(&v.to_be_bytes());
    bytes
}
