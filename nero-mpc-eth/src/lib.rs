#![deny(missing_docs)]
//! Ethereum-facing hashing and encoding for the nero threshold-ECDSA engine.
//!
//! This crate has no cryptographic-core dependencies of its own beyond
//! [`nero_mpc_core`]'s Keccak-256 primitive; it only assembles
//! well-defined byte layouts for the three things a smart-account signer
//! needs to hash:
//!
//! * ERC-4337 `UserOperation` packed hashing (see [`userop`]).
//! * EIP-712 typed-data hashing and EIP-191 personal-message hashing (see
//!   [`eip712`], [`eip191`]).
//! * Address derivation and EIP-55 checksum encoding (see [`address`]).

pub mod address;
pub mod eip191;
pub mod eip712;
pub mod error;
pub mod userop;

pub use error::{EthError, EthResult};
