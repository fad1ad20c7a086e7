//! Scalar and point algebra over secp256k1.
//!
//! Thin, purpose-built wrappers around [`k256`] that expose exactly the
//! operations the rest of the engine needs, with encoding/decoding that
//! always validates points are on-curve and (where required) non-identity.
//! All scalar arithmetic routes through `k256`'s constant-time field
//! implementation; none of it is hand-rolled.

use k256::elliptic_curve::group::prime::PrimeCurveAffine;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::Field;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar as K256Scalar, U256};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{CoreError, CoreResult};

/// A scalar in `[0, n)`, the secp256k1 group order.
///
/// The zero scalar is reserved as "unset" and is never produced by
/// [`Scalar::random_nonzero`]; callers that might legitimately need zero
/// (e.g. an accumulator) should use [`Scalar::ZERO`] explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Scalar(K256Scalar);

impl Scalar {
    /// The zero scalar. Never a valid secret.
    pub const ZERO: Scalar = Scalar(K256Scalar::ZERO);

    /// Wraps a raw `k256` scalar.
    pub fn from_k256(s: K256Scalar) -> Self {
        Self(s)
    }

    /// Returns the raw `k256` scalar.
    pub fn inner(&self) -> K256Scalar {
        self.0
    }

    /// `true` iff this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        bool::from(k256::elliptic_curve::subtle::ConstantTimeEq::ct_eq(
            &self.0,
            &K256Scalar::ZERO,
        ))
    }

    /// Reduces a 32-byte big-endian string modulo `n`.
    ///
    /// Used for turning message digests (which may exceed `n`) into valid
    /// scalars, per SEC1 / ECDSA convention.
    pub fn from_bytes_mod_n(bytes: &[u8; 32]) -> Self {
        let value = U256::from_be_slice(bytes);
        Self(K256Scalar::reduce(value))
    }

    /// Draws a uniformly random non-zero scalar from `rng`, retrying on the
    /// negligible chance of drawing zero.
    pub fn random_nonzero<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let candidate = K256Scalar::random(&mut *rng);
            if !bool::from(k256::elliptic_curve::subtle::ConstantTimeEq::ct_eq(
                &candidate,
                &K256Scalar::ZERO,
            )) {
                return Self(candidate);
            }
        }
    }

    /// Modular inverse. Returns `None` iff `self` is zero.
    pub fn invert(&self) -> Option<Self> {
        Option::from(self.0.invert()).map(Self)
    }

    /// Big-endian 32-byte canonical encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    /// Decodes a canonical 32-byte big-endian scalar. Rejects values `>= n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CoreResult<Self> {
        let repr = k256::FieldBytes::clone_from_slice(bytes);
        Option::from(K256Scalar::from_repr(repr))
            .map(Self)
            .ok_or(CoreError::InvalidScalar)
    }

    /// Lower-case hex encoding, zero-padded to 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decodes a 64-hex-character scalar.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let bytes = hex::decode(s).map_err(|_| CoreError::InvalidScalar)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidScalar)?;
        Self::from_bytes(&arr)
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar(-self.0)
    }
}

impl Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A point on secp256k1, guaranteed on-curve. The identity is represented
/// but rejected by [`Point::decode_compressed`] / [`Point::decode_uncompressed`]
/// wherever it could stand in for a secret.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point(ProjectivePoint);

impl Point {
    /// The secp256k1 base point `G`.
    pub fn generator() -> Self {
        Self(ProjectivePoint::GENERATOR)
    }

    /// The identity element.
    pub fn identity() -> Self {
        Self(ProjectivePoint::IDENTITY)
    }

    /// Wraps a raw `k256` projective point.
    pub fn from_k256(p: ProjectivePoint) -> Self {
        Self(p)
    }

    /// Returns the raw `k256` projective point.
    pub fn inner(&self) -> ProjectivePoint {
        self.0
    }

    /// `true` iff this is the identity (point at infinity).
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.to_affine().is_identity())
    }

    /// `G * s`.
    pub fn mul_base(s: &Scalar) -> Self {
        Self(ProjectivePoint::GENERATOR * s.0)
    }

    /// `self * s`.
    pub fn mul(&self, s: &Scalar) -> Self {
        Self(self.0 * s.0)
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Point) -> Self {
        Self(self.0 + rhs.0)
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Point) -> Self {
        Self(self.0 - rhs.0)
    }

    /// Constant-time equality.
    pub fn equals(&self, rhs: &Point) -> bool {
        self.0 == rhs.0
    }

    /// The x-coordinate of the affine representation, reduced modulo the
    /// group order `n` (per ECDSA convention, where the field and group
    /// orders are close but distinct).
    pub fn x_scalar(&self) -> Scalar {
        let affine = self.0.to_affine();
        let x_bytes = affine.x();
        let value = U256::from_be_slice(&x_bytes);
        Scalar(K256Scalar::reduce(value))
    }

    /// `true` iff the affine y-coordinate is odd.
    pub fn y_is_odd(&self) -> bool {
        bool::from(self.0.to_affine().y_is_odd())
    }

    /// SEC1 compressed encoding (33 bytes).
    ///
    /// # Panics
    /// Never panics for a non-identity point; identity encodes to the
    /// single-byte `0x00` SEC1 marker, which callers must not transmit as a
    /// compressed point (see [`Point::decode_compressed`]).
    pub fn to_compressed(&self) -> [u8; 33] {
        let encoded = self.0.to_affine().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Decodes a SEC1 compressed point (33 bytes). Rejects off-curve
    /// encodings and the identity.
    pub fn decode_compressed(bytes: &[u8; 33]) -> CoreResult<Self> {
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| CoreError::InvalidPoint)?;
        let affine: Option<AffinePoint> = Option::from(AffinePoint::from_encoded_point(&encoded));
        let affine = affine.ok_or(CoreError::InvalidPoint)?;
        if bool::from(affine.is_identity()) {
            return Err(CoreError::InvalidPoint);
        }
        Ok(Self(ProjectivePoint::from(affine)))
    }

    /// SEC1 uncompressed encoding (65 bytes), used only for Ethereum
    /// address derivation.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let encoded = self.0.to_affine().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Decodes a SEC1 uncompressed point (65 bytes). Rejects off-curve
    /// encodings and the identity.
    pub fn decode_uncompressed(bytes: &[u8; 65]) -> CoreResult<Self> {
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| CoreError::InvalidPoint)?;
        let affine: Option<AffinePoint> = Option::from(AffinePoint::from_encoded_point(&encoded));
        let affine = affine.ok_or(CoreError::InvalidPoint)?;
        if bool::from(affine.is_identity()) {
            return Err(CoreError::InvalidPoint);
        }
        Ok(Self(ProjectivePoint::from(affine)))
    }

    /// Lower-case hex of the 33-byte compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Decodes a 66-hex-character compressed point.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let bytes = hex::decode(s).map_err(|_| CoreError::InvalidPoint)?;
        let arr: [u8; 33] = bytes.try_into().map_err(|_| CoreError::InvalidPoint)?;
        Self::decode_compressed(&arr)
    }
}

impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
