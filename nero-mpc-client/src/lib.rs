#![deny(missing_docs, clippy::unwrap_used)]
//! Session state machines for the nero threshold-ECDSA engine.
//!
//! This crate drives the protocols [`nero_mpc_core`] and [`nero_mpc_types`]
//! describe against an injected [`transport::Transport`]/[`transport::Store`]
//! pair, owning nothing but short-lived session state:
//!
//! * Additive Pedersen-style DKG ([`keygen`]) and signing ([`signing`]).
//! * DKLS-style multiplicative DKG ([`dkls_keygen`]) and signing
//!   ([`dkls_signing`]).
//! * Key-share rotation over the additive protocol ([`reshare`]).
//! * Device-bound encrypted persistence ([`storage`]) and
//!   password-protected export/import ([`backup`]).
//!
//! None of these session drivers trust secret-adjacent fields echoed back
//! by the transport; every secret value is derived from locally-held
//! material, with backend-reported public values (addresses, ceremony
//! ids) cross-checked and rejected on mismatch.

pub mod backup;
pub mod config;
pub mod dkls_keygen;
pub mod dkls_signing;
pub mod error;
pub mod keygen;
pub mod reshare;
pub mod signing;
pub mod storage;
pub mod transport;

pub use config::{CancelToken, SessionConfig};
pub use error::{ClientResult, Error};
pub use transport::{Store, Transport};

pub use dkls_keygen::run_dkls_keygen;
pub use dkls_signing::run_dkls_signing;
pub use keygen::run_keygen;
pub use reshare::run_reshare;
pub use signing::run_signing;
