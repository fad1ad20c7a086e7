//! Hashing and symmetric cryptography primitives.
//!
//! SHA-256 backs commitments and Schnorr challenges; Keccak-256 is used
//! exclusively for Ethereum-facing hashes (component `nero-mpc-eth` calls
//! straight into `keccak256` here rather than duplicating it).
//! AES-GCM-256 protects key-share blobs and encrypted DKG shares.
//! PBKDF2-HMAC-SHA256 derives a key from a user password for exportable
//! backups.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::error::{CoreError, CoreResult};

/// Minimum PBKDF2 iteration count for password-derived keys, per the
/// engine's data-protection baseline.
pub const PBKDF2_MIN_ITERATIONS: u32 = 100_000;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of the concatenation of several byte slices, avoiding an
/// intermediate allocation. Used for domain-separated challenge hashes.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Keccak-256 of `data`, as used throughout Ethereum (distinct from the
/// NIST SHA3-256 standardized later).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// HMAC-SHA256 over `data` with `key`. Exposed for KDF composition; the
/// engine's own KDFs (device-secret and PBKDF2) are implemented directly
/// in terms of [`sha256`] / [`pbkdf2_derive_key`] rather than this helper.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        <Hmac<Sha256> as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Derives a 256-bit AES key from a password using PBKDF2-HMAC-SHA256.
///
/// `iterations` MUST be at least [`PBKDF2_MIN_ITERATIONS`]; callers that
/// pass a lower value get it clamped up rather than silently weakened.
pub fn pbkdf2_derive_key(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let iterations = iterations.max(PBKDF2_MIN_ITERATIONS);
    pbkdf2::pbkdf2_hmac_array::<Sha256, 32>(password, salt, iterations)
}

/// An AES-GCM-256 ciphertext together with its 96-bit nonce.
///
/// The authentication tag is included in `ciphertext` by the underlying
/// `aes-gcm` crate (it appends the 16-byte tag), matching the data model's
/// requirement that tag verification is mandatory and the session/blob
/// aborts on failure — here that's simply `aead::Aead::decrypt` returning
/// `Err`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SealedBlob {
    /// 96-bit random nonce used for this encryption.
    pub nonce: [u8; 12],
    /// Ciphertext with the 128-bit authentication tag appended.
    pub ciphertext: Vec<u8>,
}

/// Encrypts `plaintext` under `key` (32 bytes) using AES-GCM-256 with a
/// fresh random 96-bit nonce drawn from `rng`.
pub fn aes_gcm_encrypt<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &[u8; 32],
    plaintext: &[u8],
    associated_data: &[u8],
) -> SealedBlob {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let mut nonce_bytes = [0u8; 12];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )
        .expect("AES-256-GCM encryption with a 32-byte key cannot fail");
    SealedBlob {
        nonce: nonce_bytes,
        ciphertext,
    }
}

/// Decrypts a [`SealedBlob`] produced by [`aes_gcm_encrypt`]. Returns
/// [`CoreError::DecryptionFailed`] iff the authentication tag does not
/// verify; the caller MUST treat this as fatal to the session/blob.
pub fn aes_gcm_decrypt(
    key: &[u8; 32],
    blob: &SealedBlob,
    associated_data: &[u8],
) -> CoreResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Nonce::from_slice(&blob.nonce);
    cipher
        .decrypt(
            nonce,
            Payload {
                msg: &blob.ciphertext,
                aad: associated_data,
            },
        )
        .map_err(|_| CoreError::DecryptionFailed)
}
