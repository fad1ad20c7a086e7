//! Multiplicative-to-Additive (MtA) protocol: turns `(a, b)` held by two
//! distinct parties into additive shares `(t_A, t_B)` with
//! `t_A + t_B = a*b (mod n)`, using the batched correlated OT from [`crate::ot`].
//!
//! Four rounds, matching the session's round-trip shape:
//!   R1 Alice -> Bob:  [`MtaRound1`]  (batch-COT sender setup)
//!   R2 Bob -> Alice:  [`MtaRound2`]  (batch-COT receiver response)
//!   R3 Alice -> Bob:  [`MtaRound3`]  (batch-COT sender payload)
//!   R4 Bob completes locally, no message.
//!
//! A session identifier is threaded through every round; a mismatch aborts.

use rand::{CryptoRng, RngCore};

use crate::commitments::SchnorrPok;
use crate::error::{CoreError, CoreResult};
use crate::ot::{
    batch_cot_receiver_complete, batch_cot_receiver_respond, batch_cot_sender_complete,
    batch_cot_sender_init, BatchCotPayload, BatchCotReceiverState, BatchCotResponse,
    BatchCotSenderState, BatchCotSetup,
};
use crate::scalar_point::{Point, Scalar};
use serde::{Deserialize, Serialize};

/// Round 1 message: Alice's batch-COT setup, tagged with a session id that
/// both parties must agree on for every subsequent round.
#[derive(Serialize, Deserialize)]
pub struct MtaRound1 {
    /// Session identifier both parties must agree on for every round.
    pub session_id: [u8; 32],
    /// Alice's batch-COT sender setup.
    pub setup: BatchCotSetup,
}

/// Alice's retained state between round 1 and round 3.
pub struct MtaAliceState {
    session_id: [u8; 32],
    input: Scalar,
    sender_state: BatchCotSenderState,
    setup: BatchCotSetup,
}

/// Starts an MtA as Alice (the party contributing the COT-sender input `a`).
pub fn mta_alice_init<R: RngCore + CryptoRng>(
    rng: &mut R,
    session_id: [u8; 32],
    input: Scalar,
) -> (MtaAliceState, MtaRound1) {
    let (sender_state, setup) = batch_cot_sender_init(rng);
    let round1 = MtaRound1 {
        session_id,
        setup: BatchCotSetup {
            per_bit_a: setup.per_bit_a.clone(),
        },
    };
    (
        MtaAliceState {
            session_id,
            input,
            sender_state,
            setup,
        },
        round1,
    )
}

/// Round 2 message: Bob's batch-COT response, plus an optional
/// MtAwc Schnorr proof binding his input `b` to a public `B = b*G`.
#[derive(Serialize, Deserialize)]
pub struct MtaRound2 {
    /// Session identifier both parties must agree on for every round.
    pub session_id: [u8; 32],
    /// Bob's batch-COT receiver response.
    pub response: BatchCotResponse,
    /// Optional MtAwc proof binding Bob's input to a public `B = b*G`.
    pub with_check: Option<MtAwcProof>,
}

/// The MtAwc proof of knowledge of Bob's input, checked by Alice before she
/// proceeds, so Bob cannot use a `b` unrelated to his declared key share.
#[derive(Serialize, Deserialize)]
pub struct MtAwcProof {
    /// Bob's public key share `B = b*G`.
    pub public_b: Point,
    /// Schnorr proof of knowledge of `b`.
    pub proof: SchnorrPok,
}

/// Bob's retained state between round 2 and round 4.
pub struct MtaBobState {
    session_id: [u8; 32],
    receiver_state: BatchCotReceiverState,
}

/// Responds as Bob to [`MtaRound1`] with input `b`. If `check_public` is
/// `Some`, attaches an MtAwc proof of knowledge of `b` against it.
pub fn mta_bob_respond<R: RngCore + CryptoRng>(
    rng: &mut R,
    round1: &MtaRound1,
    input: Scalar,
    check_public: Option<Point>,
) -> CoreResult<(MtaBobState, MtaRound2)> {
    let (receiver_state, response) = batch_cot_receiver_respond(rng, &round1.setup, input)?;
    let with_check = check_public.map(|public_b| {
        let transcript: [&[u8]; 1] = [&round1.session_id];
        let proof = SchnorrPok::prove(rng, input, &transcript);
        MtAwcProof { public_b, proof }
    });
    Ok((
        MtaBobState {
            session_id: round1.session_id,
            receiver_state,
        },
        MtaRound2 {
            session_id: round1.session_id,
            response,
            with_check,
        },
    ))
}

/// Round 3 message: Alice's batch-COT payload for Bob to complete.
#[derive(Serialize, Deserialize)]
pub struct MtaRound3 {
    /// Session identifier both parties must agree on for every round.
    pub session_id: [u8; 32],
    /// Alice's batch-COT sender payload.
    pub payload: BatchCotPayload,
}

/// Completes the MtA as Alice, given Bob's round-2 message. Returns
/// Alice's additive share `t_A` and the round-3 message for Bob.
pub fn mta_alice_complete<R: RngCore + CryptoRng>(
    rng: &mut R,
    state: &MtaAliceState,
    round2: &MtaRound2,
) -> CoreResult<(Scalar, MtaRound3)> {
    if round2.session_id != state.session_id {
        return Err(CoreError::MtaSessionMismatch);
    }
    if let Some(check) = &round2.with_check {
        let transcript: [&[u8]; 1] = [&state.session_id];
        if !check.proof.verify(check.public_b, &transcript) {
            return Err(CoreError::InvalidProof);
        }
    }
    let (t_a, payload) = batch_cot_sender_complete(
        rng,
        &state.sender_state,
        &state.setup,
        &round2.response,
        state.input,
    )?;
    Ok((
        t_a,
        MtaRound3 {
            session_id: state.session_id,
            payload,
        },
    ))
}

/// Completes the MtA as Bob, given Alice's round-3 message and the round-1
/// setup Bob responded to. Returns Bob's additive share `t_B`.
pub fn mta_bob_complete(
    state: &MtaBobState,
    round1_setup: &BatchCotSetup,
    round3: &MtaRound3,
) -> CoreResult<Scalar> {
    if round3.session_id != state.session_id {
        return Err(CoreError::MtaSessionMismatch);
    }
    batch_cot_receiver_complete(&state.receiver_state, round1_setup, &round3.payload)
}
