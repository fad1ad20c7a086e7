//! Wire form of an [`nero_mpc_core::share_channel::EncryptedShare`].
//!
//! The wire form carries `(from, to, ephemeral_public_key, ciphertext, nonce,
//! tag)` as six separate fields, so the 16-byte AES-GCM tag travels apart
//! from the ciphertext on the wire even though `nero-mpc-core`'s
//! `aes-gcm`-crate-facing [`nero_mpc_core::hash_symmetric::SealedBlob`] keeps
//! them concatenated internally (see `DESIGN.md`).

use nero_mpc_core::hash_symmetric::SealedBlob;
use nero_mpc_core::share_channel::EncryptedShare as CoreEncryptedShare;
use nero_mpc_core::Point;
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};
use crate::party::PartyId;

const TAG_LEN: usize = 16;
const NONCE_LEN: usize = 12;

/// An encrypted Shamir share in transit, addressed by sender/recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedShareMessage {
    /// The sending party.
    pub from: PartyId,
    /// The receiving party.
    pub to: PartyId,
    /// The sender's fresh ephemeral public key for this share only.
    pub ephemeral_public_key: Point,
    /// Lower-case hex ciphertext, excluding the authentication tag.
    pub ciphertext: String,
    /// Lower-case hex, 12-byte AES-GCM nonce.
    pub nonce: String,
    /// Lower-case hex, 16-byte AES-GCM authentication tag, transported
    /// separately from `ciphertext`.
    pub tag: String,
}

impl EncryptedShareMessage {
    /// Builds the wire message from a core [`CoreEncryptedShare`] and its
    /// sender/recipient party ids, splitting the combined
    /// ciphertext-then-tag blob into its two wire fields.
    pub fn from_core(from: PartyId, to: PartyId, share: &CoreEncryptedShare) -> TypesResult<Self> {
        let combined = &share.blob.ciphertext;
        if combined.len() < TAG_LEN {
            return Err(TypesError::WrongLength {
                field: "ciphertext",
                actual: combined.len(),
                expected: TAG_LEN,
            });
        }
        let split_at = combined.len() - TAG_LEN;
        let (ct, tag) = combined.split_at(split_at);
        if share.blob.nonce.len() != NONCE_LEN {
            return Err(TypesError::WrongLength {
                field: "nonce",
                actual: share.blob.nonce.len(),
                expected: NONCE_LEN,
            });
        }
        Ok(Self {
            from,
            to,
            ephemeral_public_key: share.ephemeral_public,
            ciphertext: hex::encode(ct),
            nonce: hex::encode(&share.blob.nonce),
            tag: hex::encode(tag),
        })
    }

    /// Reassembles a core [`CoreEncryptedShare`] for decryption, rejoining
    /// ciphertext and tag into `nero-mpc-core`'s combined representation.
    pub fn into_core(self) -> TypesResult<CoreEncryptedShare> {
        let mut ciphertext =
            hex::decode(&self.ciphertext).map_err(|_| TypesError::InvalidHex("ciphertext"))?;
        let mut tag = hex::decode(&self.tag).map_err(|_| TypesError::InvalidHex("tag"))?;
        if tag.len() != TAG_LEN {
            return Err(TypesError::WrongLength {
                field: "tag",
                actual: tag.len(),
                expected: TAG_LEN,
            });
        }
        ciphertext.append(&mut tag);
        let nonce_bytes = hex::decode(&self.nonce).map_err(|_| TypesError::InvalidHex("nonce"))?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| TypesError::WrongLength {
                field: "nonce",
                actual: NONCE_LEN,
                expected: NONCE_LEN,
            })?;
        Ok(CoreEncryptedShare {
            ephemeral_public: self.ephemeral_public_key,
            blob: SealedBlob { nonce, ciphertext },
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use nero_mpc_core::scalar_point::Scalar;
    use nero_mpc_core::share_channel::{decrypt_share, encrypt_share};

    #[test]
    fn splits_and_rejoins_tag_losslessly() {
        let mut rng = rand::thread_rng();
        let recipient_secret = Scalar::random_nonzero(&mut rng);
        let recipient_public = nero_mpc_core::Point::mul_base(&recipient_secret);
        let share = Scalar::random_nonzero(&mut rng);
        let encrypted = encrypt_share(&mut rng, share, recipient_public, 1, 2);

        let wire = EncryptedShareMessage::from_core(PartyId(1), PartyId(2), &encrypted).unwrap();
        assert_eq!(wire.tag.len(), TAG_LEN * 2);
        assert_eq!(wire.nonce.len(), NONCE_LEN * 2);

        let rebuilt = wire.into_core().unwrap();
        let recovered = decrypt_share(&rebuilt, recipient_secret, 1, 2).unwrap();
        assert_eq!(recovered.to_bytes(), share.to_bytes());
    }
}
