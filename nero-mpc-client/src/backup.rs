//! Encrypted backup export/import. Unlike the device-bound envelope in
//! [`crate::storage`], the backup key is derived from a user-supplied
//! password via PBKDF2 so the backup can be restored on a different device.

use base64::prelude::{Engine, BASE64_STANDARD};
use nero_mpc_core::hash_symmetric::{
    aes_gcm_decrypt, aes_gcm_encrypt, pbkdf2_derive_key, SealedBlob, PBKDF2_MIN_ITERATIONS,
};
use nero_mpc_types::backup::{BackupData, ExportedBackup, BACKUP_KIND};
use rand::{CryptoRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientResult, Error};

const SALT_LEN: usize = 16;

/// Encrypts `value` (a key share) under a key derived from `password` and
/// returns the published backup artifact: base64 of the JSON-serialized
/// [`ExportedBackup`] envelope.
pub fn export_backup<T: Serialize, R: RngCore + CryptoRng>(
    rng: &mut R,
    value: &T,
    password: &str,
    created_at_unix_ms: u64,
) -> ClientResult<String> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let key = pbkdf2_derive_key(password.as_bytes(), &salt, PBKDF2_MIN_ITERATIONS);
    let plaintext = serde_json::to_vec(value).map_err(|e| Error::Storage(e.to_string()))?;
    let blob = aes_gcm_encrypt(rng, &key, &plaintext, BACKUP_KIND.as_bytes());

    let envelope = ExportedBackup {
        version: 1,
        kind: BACKUP_KIND.to_string(),
        data: BackupData {
            ciphertext: hex::encode(blob.ciphertext),
            iv: hex::encode(blob.nonce),
            salt: hex::encode(salt),
        },
        created_at: created_at_unix_ms,
    };
    let json = serde_json::to_vec(&envelope).map_err(|e| Error::Storage(e.to_string()))?;
    Ok(BASE64_STANDARD.encode(json))
}

/// Reverses [`export_backup`]: base64-decodes, JSON-decodes the envelope,
/// then decrypts and parses the wrapped value.
pub fn import_backup<T: DeserializeOwned>(backup: &str, password: &str) -> ClientResult<T> {
    let json = BASE64_STANDARD
        .decode(backup)
        .map_err(|e| Error::Storage(e.to_string()))?;
    let backup: ExportedBackup =
        serde_json::from_slice(&json).map_err(|e| Error::Storage(e.to_string()))?;
    if backup.kind != BACKUP_KIND {
        return Err(Error::Storage(format!(
            "unexpected backup kind: {}",
            backup.kind
        )));
    }
    let salt = hex::decode(&backup.data.salt).map_err(|e| Error::Storage(e.to_string()))?;
    let nonce: [u8; 12] = hex::decode(&backup.data.iv)
        .map_err(|e| Error::Storage(e.to_string()))?
        .try_into()
        .map_err(|_| Error::Storage("backup IV had the wrong length".into()))?;
    let ciphertext = hex::decode(&backup.data.ciphertext).map_err(|e| Error::Storage(e.to_string()))?;

    let key = pbkdf2_derive_key(password.as_bytes(), &salt, PBKDF2_MIN_ITERATIONS);
    let blob = SealedBlob { nonce, ciphertext };
    let plaintext = aes_gcm_decrypt(&key, &blob, BACKUP_KIND.as_bytes())?;
    serde_json::from_slice(&plaintext).map_err(|e| Error::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn roundtrips_with_correct_password() {
        let mut rng = rand::thread_rng();
        let value = vec![1u32, 2, 3];
        let backup = export_backup(&mut rng, &value, "hunter2", 1_700_000_000_000).unwrap();
        let restored: Vec<u32> = import_backup(&backup, "hunter2").unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn wrong_password_fails() {
        let mut rng = rand::thread_rng();
        let value = vec![1u32, 2, 3];
        let backup = export_backup(&mut rng, &value, "hunter2", 1_700_000_000_000).unwrap();
        let restored = import_backup::<Vec<u32>>(&backup, "wrong");
        assert!(restored.is_err());
    }

    #[test]
    fn exported_artifact_is_base64_of_the_json_envelope() {
        let mut rng = rand::thread_rng();
        let value = vec![1u32, 2, 3];
        let backup = export_backup(&mut rng, &value, "hunter2", 1_700_000_000_000).unwrap();
        let json = BASE64_STANDARD.decode(&backup).unwrap();
        let envelope: ExportedBackup = serde_json::from_slice(&json).unwrap();
        assert_eq!(envelope.kind, BACKUP_KIND);
        assert_eq!(envelope.version, 1);
    }
}
