#![deny(missing_docs)]
//! Wire message and data-model types for the nero threshold-ECDSA engine.
//!
//! This crate sits between [`nero_mpc_core`]'s cryptographic primitives and
//! `nero-mpc-client`'s session state machines. It provides:
//!
//! * Persisted key-share types for both protocol variants (see
//!   [`keyshare`]).
//! * The encrypted share-channel wire form, with the AES-GCM tag split into
//!   its own field (see [`share`]).
//! * Nonce-commitment and partial/combined-signature wire types (see
//!   [`nonce`], [`signature`]).
//! * Typed request/response payloads for every `Transport` operation (see
//!   [`messages`]).
//! * The encrypted-storage envelope and exported-backup formats (see
//!   [`backup`]).

pub mod backup;
pub mod error;
pub mod keyshare;
pub mod messages;
pub mod nonce;
pub mod party;
pub mod share;
pub mod signature;

pub use error::{TypesError, TypesResult};
pub use party::PartyId;
