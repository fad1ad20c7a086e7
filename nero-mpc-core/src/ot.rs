//! Chou-Orlandi oblivious transfer, its correlated variant, and a batched
//! 256-bit correlated OT that converts a multiplicative relation into
//! additive shares — the building block `mta` composes into the full MtA
//! protocol (spec component I).

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{CoreError, CoreResult};
use crate::hash_symmetric::sha256;
use crate::scalar_point::{Point, Scalar};
use serde::{Deserialize, Serialize};

/// Number of bits in a secp256k1 scalar; the batched COT runs one
/// correlated-OT instance per bit.
pub const SCALAR_BITS: usize = 256;

fn xor32(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a[i] ^ b[i];
    }
    out
}

fn kdf(point: &Point) -> [u8; 32] {
    sha256(&point.to_compressed())
}

// ---------------------------------------------------------------------
// Base 1-of-2 Chou-Orlandi OT
// ---------------------------------------------------------------------

/// The sender's first-round message: `A = a*G`.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct OtSenderSetup {
    /// The sender's first-round point `A = a*G`.
    pub a_point: Point,
}

/// The sender's retained secret for one OT instance.
pub struct OtSenderState {
    a: Scalar,
}

/// Starts a base OT as the sender, drawing a fresh `a`.
pub fn ot_sender_init<R: RngCore + CryptoRng>(rng: &mut R) -> (OtSenderState, OtSenderSetup) {
    let a = Scalar::random_nonzero(rng);
    let a_point = Point::mul_base(&a);
    (OtSenderState { a }, OtSenderSetup { a_point })
}

/// The receiver's response: `B = b*G` (choice 0) or `B = A + b*G` (choice 1).
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct OtReceiverResponse {
    /// The receiver's response point `B`.
    pub b_point: Point,
}

/// The receiver's retained secret and choice bit for one OT instance.
pub struct OtReceiverState {
    b: Scalar,
    choice: bool,
}

/// Responds to [`OtSenderSetup`] as the receiver with choice bit `choice`.
pub fn ot_receiver_respond<R: RngCore + CryptoRng>(
    rng: &mut R,
    setup: &OtSenderSetup,
    choice: bool,
) -> (OtReceiverState, OtReceiverResponse) {
    let b = Scalar::random_nonzero(rng);
    let b_point = if choice {
        setup.a_point.add(&Point::mul_base(&b))
    } else {
        Point::mul_base(&b)
    };
    (OtReceiverState { b, choice }, OtReceiverResponse { b_point })
}

/// Sender's output: both messages `m0`, `m1` encrypted under keys derived
/// from `a` and the receiver's response, so only the chosen key decrypts.
#[derive(Clone, Serialize, Deserialize)]
pub struct OtSenderOutput {
    /// `m0` encrypted under the key derived for choice bit 0.
    pub ct0: [u8; 32],
    /// `m1` encrypted under the key derived for choice bit 1.
    pub ct1: [u8; 32],
}

/// Completes the OT as the sender, encrypting `m0`/`m1`.
pub fn ot_sender_complete(
    state: &OtSenderState,
    response: &OtReceiverResponse,
    m0: &[u8; 32],
    m1: &[u8; 32],
) -> OtSenderOutput {
    let k0 = kdf(&response.b_point.mul(&state.a));
    let k1 = kdf(&response.b_point.sub(&Point::mul_base(&state.a)).mul(&state.a));
    OtSenderOutput {
        ct0: xor32(&k0, m0),
        ct1: xor32(&k1, m1),
    }
}

/// Completes the OT as the receiver, recovering the chosen message.
pub fn ot_receiver_complete(
    state: &OtReceiverState,
    setup: &OtSenderSetup,
    output: &OtSenderOutput,
) -> [u8; 32] {
    let k = kdf(&setup.a_point.mul(&state.b));
    let ct = if state.choice { &output.ct1 } else { &output.ct0 };
    xor32(&k, ct)
}

// ---------------------------------------------------------------------
// Batched correlated OT over a 256-bit scalar (the MtA building block)
// ---------------------------------------------------------------------

/// Sender's setup message: one base-OT first message per bit position.
#[derive(Clone, Serialize, Deserialize)]
pub struct BatchCotSetup {
    /// One base-OT first-round point per bit position.
    pub per_bit_a: Vec<Point>,
}

/// Sender's retained per-bit secrets.
pub struct BatchCotSenderState {
    per_bit_a: Vec<Scalar>,
}

impl Drop for BatchCotSenderState {
    fn drop(&mut self) {
        self.per_bit_a.zeroize();
    }
}

/// Starts the batched COT as the sender (Alice, round 1 of MtA).
pub fn batch_cot_sender_init<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> (BatchCotSenderState, BatchCotSetup) {
    let mut per_bit_a = Vec::with_capacity(SCALAR_BITS);
    let mut per_bit_points = Vec::with_capacity(SCALAR_BITS);
    for _ in 0..SCALAR_BITS {
        let a = Scalar::random_nonzero(rng);
        per_bit_points.push(Point::mul_base(&a));
        per_bit_a.push(a);
    }
    (
        BatchCotSenderState { per_bit_a },
        BatchCotSetup { per_bit_a: per_bit_points },
    )
}

/// Receiver's response message: one base-OT second message per bit.
#[derive(Clone, Serialize, Deserialize)]
pub struct BatchCotResponse {
    /// One base-OT response point per bit position.
    pub per_bit_b: Vec<Point>,
}

/// Receiver's retained per-bit secrets and the choice bits of its scalar.
pub struct BatchCotReceiverState {
    per_bit_b: Vec<Scalar>,
    choice_bits: Vec<bool>,
}

impl Drop for BatchCotReceiverState {
    fn drop(&mut self) {
        self.per_bit_b.zeroize();
    }
}

fn scalar_bits(value: &Scalar) -> Vec<bool> {
    let bytes = value.to_bytes();
    let mut bits = Vec::with_capacity(SCALAR_BITS);
    for j in 0..SCALAR_BITS {
        let byte = bytes[31 - j / 8];
        bits.push((byte >> (j % 8)) & 1 == 1);
    }
    bits
}

/// Responds to [`BatchCotSetup`] as the receiver (Bob, round 2 of MtA)
/// with choice scalar `b` — the bits of `b` select which of each
/// correlated pair Bob will learn.
pub fn batch_cot_receiver_respond<R: RngCore + CryptoRng>(
    rng: &mut R,
    setup: &BatchCotSetup,
    b: Scalar,
) -> CoreResult<(BatchCotReceiverState, BatchCotResponse)> {
    if setup.per_bit_a.len() != SCALAR_BITS {
        return Err(CoreError::OtViolation("sender setup has wrong bit count"));
    }
    let choice_bits = scalar_bits(&b);
    let mut per_bit_b = Vec::with_capacity(SCALAR_BITS);
    let mut per_bit_points = Vec::with_capacity(SCALAR_BITS);
    for (j, &choice) in choice_bits.iter().enumerate() {
        let b_j = Scalar::random_nonzero(rng);
        let point = if choice {
            setup.per_bit_a[j].add(&Point::mul_base(&b_j))
        } else {
            Point::mul_base(&b_j)
        };
        per_bit_points.push(point);
        per_bit_b.push(b_j);
    }
    Ok((
        BatchCotReceiverState { per_bit_b, choice_bits },
        BatchCotResponse { per_bit_b: per_bit_points },
    ))
}

/// Sender's payload: per-bit encrypted correlated pairs `(t_j, t_j + a*2^j)`.
#[derive(Clone, Serialize, Deserialize)]
pub struct BatchCotPayload {
    /// Per-bit encrypted correlated pairs `(t_j, t_j + a*2^j)`.
    pub ciphertexts: Vec<([u8; 32], [u8; 32])>,
}

/// Completes the batched COT as the sender (round 3 of MtA), given its
/// input scalar `correlation` (the value being multiplied in, e.g. `a` in
/// `a*b`). Returns the sender's additive share `T_A = -sum(t_j) mod n` and
/// the encrypted payload for the receiver.
pub fn batch_cot_sender_complete<R: RngCore + CryptoRng>(
    rng: &mut R,
    state: &BatchCotSenderState,
    setup: &BatchCotSetup,
    response: &BatchCotResponse,
    correlation: Scalar,
) -> CoreResult<(Scalar, BatchCotPayload)> {
    if response.per_bit_b.len() != SCALAR_BITS {
        return Err(CoreError::OtViolation("receiver response has wrong bit count"));
    }
    let mut ciphertexts = Vec::with_capacity(SCALAR_BITS);
    let mut sum_t = Scalar::ZERO;
    let mut power_of_two = Scalar::from_bytes_mod_n(&one_be32());
    for j in 0..SCALAR_BITS {
        let a_j = state.per_bit_a[j];
        let a_point = setup.per_bit_a[j];
        let b_point = response.per_bit_b[j];
        let k0 = kdf(&b_point.mul(&a_j));
        let k1 = kdf(&b_point.sub(&a_point).mul(&a_j));

        let t_j = Scalar::random_nonzero(rng);
        let correlated = t_j + correlation * power_of_two;

        ciphertexts.push((xor32(&k0, &t_j.to_bytes()), xor32(&k1, &correlated.to_bytes())));
        sum_t = sum_t + t_j;
        power_of_two = power_of_two + power_of_two;
    }
    Ok((Scalar::ZERO - sum_t, BatchCotPayload { ciphertexts }))
}

/// Completes the batched COT as the receiver (round 4 of MtA), returning
/// its additive share `T_B = sum(t_j + b_j*correlation*2^j) mod n`, such
/// that `T_A + T_B == correlation * b (mod n)`.
pub fn batch_cot_receiver_complete(
    state: &BatchCotReceiverState,
    setup: &BatchCotSetup,
    payload: &BatchCotPayload,
) -> CoreResult<Scalar> {
    if payload.ciphertexts.len() != SCALAR_BITS {
        return Err(CoreError::OtViolation("sender payload has wrong bit count"));
    }
    let mut sum = Scalar::ZERO;
    for j in 0..SCALAR_BITS {
        let k = kdf(&setup.per_bit_a[j].mul(&state.per_bit_b[j]));
        let (ct0, ct1) = &payload.ciphertexts[j];
        let ct = if state.choice_bits[j] { ct1 } else { ct0 };
        let bytes = xor32(&k, ct);
        let value = Scalar::from_bytes(&bytes).map_err(|_| CoreError::OtViolation("decrypted value out of range"))?;
        sum = sum + value;
    }
    Ok(sum)
}

fn one_be32() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    bytes
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn base_ot_delivers_chosen_message_only() {
        let mut rng = rand::thread_rng();
        let (sender_state, setup) = ot_sender_init(&mut rng);
        let (receiver_state, response) = ot_receiver_respond(&mut rng, &setup, true);
        let m0 = [1u8; 32];
        let m1 = [2u8; 32];
        let output = ot_sender_complete(&sender_state, &response, &m0, &m1);
        let recovered = ot_receiver_complete(&receiver_state, &setup, &output);
        assert_eq!(recovered, m1);
    }

    #[test]
    fn base_ot_choice_zero() {
        let mut rng = rand::thread_rng();
        let (sender_state, setup) = ot_sender_init(&mut rng);
        let (receiver_state, response) = ot_receiver_respond(&mut rng, &setup, false);
        let m0 = [3u8; 32];
        let m1 = [4u8; 32];
        let output = ot_sender_complete(&sender_state, &response, &m0, &m1);
        let recovered = ot_receiver_complete(&receiver_state, &setup, &output);
        assert_eq!(recovered, m0);
    }

    #[test]
    fn batch_cot_yields_multiplicative_to_additive_shares() {
        let mut rng = rand::thread_rng();
        let a = Scalar::random_nonzero(&mut rng);
        let b = Scalar::random_nonzero(&mut rng);

        let (sender_state, setup) = batch_cot_sender_init(&mut rng);
        let (receiver_state, response) =
            batch_cot_receiver_respond(&mut rng, &setup, b).unwrap();
        let (t_a, payload) =
            batch_cot_sender_complete(&mut rng, &sender_state, &setup, &response, a).unwrap();
        let t_b = batch_cot_receiver_complete(&receiver_state, &setup, &payload).unwrap();

        let sum = t_a + t_b;
        let expected = a * b;
        assert_eq!(sum.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn batch_cot_rejects_wrong_bit_count() {
        let mut rng = rand::thread_rng();
        let (_sender_state, mut setup) = batch_cot_sender_init(&mut rng);
        setup.per_bit_a.pop();
        let b = Scalar::random_nonzero(&mut rng);
        assert!(batch_cot_receiver_respond(&mut rng, &setup, b).is_err());
    }
}
