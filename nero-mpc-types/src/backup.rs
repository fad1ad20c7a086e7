//! Encrypted-storage envelope and exported-backup wire formats.

use serde::{Deserialize, Serialize};

/// The single record type the engine writes to a `Store`: a `KeyShare`
/// (either protocol variant, serialized as JSON first) wrapped in AES-GCM.
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageEnvelope {
    /// Lower-case hex ciphertext (tag included, matching the `aes-gcm`
    /// crate's combined output — this envelope is internal storage, not a
    /// cross-party wire message, so the separate-tag split used by
    /// [`crate::share::EncryptedShareMessage`] does not apply here).
    pub ciphertext: String,
    /// Lower-case hex, 12-byte AES-GCM nonce.
    pub iv: String,
    /// Lower-case hex salt. Empty when the envelope is encrypted with the
    /// device-secret KDF rather than PBKDF2.
    pub salt: String,
    /// Envelope format version, always `1`.
    pub version: u32,
}

impl Default for StorageEnvelope {
    fn default() -> Self {
        Self {
            ciphertext: String::new(),
            iv: String::new(),
            salt: String::new(),
            version: 1,
        }
    }
}

/// The password-protected export format. Base64-encoded as a whole by the
/// caller; this type is its decoded JSON payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExportedBackup {
    /// Always `1`.
    pub version: u32,
    /// Always `"nero-mpc-backup"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The encrypted key-share payload.
    pub data: BackupData,
    /// Unix milliseconds at export time.
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}

/// The `data` field of an [`ExportedBackup`]: the same three fields as
/// [`StorageEnvelope`] minus the version (carried at the outer level
/// instead).
#[derive(Clone, Serialize, Deserialize)]
pub struct BackupData {
    /// Lower-case hex ciphertext (tag included).
    pub ciphertext: String,
    /// Lower-case hex, 12-byte AES-GCM nonce.
    pub iv: String,
    /// Lower-case hex PBKDF2 salt.
    pub salt: String,
}

/// Type tag used in every [`ExportedBackup`].
pub const BACKUP_KIND: &str = "nero-mpc-backup";
