//! Encrypted share channel: wraps a Shamir share for transport to its
//! recipient using an ephemeral-ECDH-derived AES-GCM-256 key, so that a
//! VSS share never crosses the wire (or the storage layer it lands on)
//! in the clear.
//!
//! Key agreement: the sender draws a fresh ephemeral keypair, computes
//! `shared = ephemeral_secret * recipient_static_public`, and derives the
//! AES key as `SHA-256(compress(shared))`. The recipient recomputes the
//! same point as `recipient_static_secret * ephemeral_public`. The
//! ephemeral public key travels alongside the ciphertext; the static keys
//! are each party's long-lived session identity key, established once per
//! session out of band. Sender/recipient ids don't enter key derivation —
//! they're bound into the AEAD associated data instead (`channel_aad`), so
//! a ciphertext addressed to one pairing can't be replayed against another
//! without that also failing.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::hash_symmetric::{aes_gcm_decrypt, aes_gcm_encrypt, sha256, SealedBlob};
use crate::scalar_point::{Point, Scalar};

/// An encrypted Shamir share together with the ephemeral public key needed
/// to decrypt it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedShare {
    /// The sender's fresh ephemeral public key for this share only.
    pub ephemeral_public: Point,
    /// The AES-GCM-sealed share scalar (32-byte plaintext once opened).
    pub blob: SealedBlob,
}

/// Encrypts `share` for `recipient_static_public`. `sender_id`/
/// `recipient_id` are bound into the AEAD associated data, not the key.
pub fn encrypt_share<R: RngCore + CryptoRng>(
    rng: &mut R,
    share: Scalar,
    recipient_static_public: Point,
    sender_id: u16,
    recipient_id: u16,
) -> EncryptedShare {
    let ephemeral_secret = Scalar::random_nonzero(rng);
    let ephemeral_public = Point::mul_base(&ephemeral_secret);
    let shared_point = recipient_static_public.mul(&ephemeral_secret);
    let key = derive_channel_key(&shared_point);
    let blob = aes_gcm_encrypt(rng, &key, &share.to_bytes(), &channel_aad(sender_id, recipient_id));
    EncryptedShare {
        ephemeral_public,
        blob,
    }
}

/// Decrypts an [`EncryptedShare`] using the recipient's static secret key.
pub fn decrypt_share(
    encrypted: &EncryptedShare,
    recipient_static_secret: Scalar,
    sender_id: u16,
    recipient_id: u16,
) -> CoreResult<Scalar> {
    let shared_point = encrypted.ephemeral_public.mul(&recipient_static_secret);
    let key = derive_channel_key(&shared_point);
    let plaintext = aes_gcm_decrypt(&key, &encrypted.blob, &channel_aad(sender_id, recipient_id))?;
    let mut bytes = [0u8; 32];
    if plaintext.len() != 32 {
        return Err(crate::error::CoreError::InvalidScalar);
    }
    bytes.copy_from_slice(&plaintext);
    Scalar::from_bytes(&bytes)
}

fn derive_channel_key(shared_point: &Point) -> [u8; 32] {
    sha256(&shared_point.to_compressed())
}

fn channel_aad(sender_id: u16, recipient_id: u16) -> Vec<u8> {
    let mut aad = Vec::with_capacity(4);
    aad.extend_from_slice(&sender_id.to_be_bytes());
    aad.extend_from_slice(&recipient_id.to_be_bytes());
    aad
}
