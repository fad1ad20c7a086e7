#![deny(missing_docs, clippy::unwrap_used)]
//! Cryptographic primitives for the nero threshold-ECDSA engine.
//!
//! This crate groups together everything the session-driving layer
//! (`nero-mpc-client`) needs to run 2-of-2 threshold ECDSA over
//! secp256k1, but contains no networking and no session state machines
//! of its own:
//!
//! * Scalar/point algebra ([`scalar_point`]).
//! * Hashing and symmetric crypto ([`hash_symmetric`]).
//! * Pedersen commitments, Feldman VSS, and Schnorr proofs of knowledge
//!   ([`commitments`]).
//! * Shamir polynomial utilities and Lagrange interpolation ([`polynomial`]).
//! * The ECDH-encrypted share channel ([`share_channel`]).
//! * Chou-Orlandi oblivious transfer and batched correlated OT ([`ot`]).
//! * The Multiplicative-to-Additive protocol built on top of it ([`mta`]).
//!
//! All secret scalars are wrapped in [`scalar_point::Scalar`], which
//! derives `Zeroize` so they are scrubbed on drop; none of this crate's
//! public functions log secret material.

pub mod commitments;
pub mod error;
pub mod hash_symmetric;
pub mod mta;
pub mod ot;
pub mod polynomial;
pub mod scalar_point;
pub mod share_channel;

pub use error::{CoreError, CoreResult};
pub use scalar_point::{Point, Scalar};
