//! Encrypted persistence of a [`KeyShareAdditive`] or [`KeyShareMultiplicative`]
//! through the injected [`Store`]. The engine writes exactly one
//! kind of record per user: a [`StorageEnvelope`] wrapping the share's JSON
//! encoding, encrypted under a key derived from a persistent device secret.

use nero_mpc_core::hash_symmetric::{aes_gcm_decrypt, aes_gcm_encrypt, sha256};
use nero_mpc_core::hash_symmetric::SealedBlob;
use nero_mpc_types::backup::StorageEnvelope;
use rand::{CryptoRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientResult, Error};
use crate::transport::Store;

fn device_key(device_id: &str, user_id: &str) -> [u8; 32] {
    sha256(format!("{device_id}:{user_id}").as_bytes())
}

/// Encrypts `value` (any JSON-serializable key share) under a key derived
/// from `device_id`/`user_id` and writes it to `store` under `key`.
pub async fn store_encrypted<T: Serialize, R: RngCore + CryptoRng>(
    rng: &mut R,
    store: &dyn Store,
    key: &str,
    device_id: &str,
    user_id: &str,
    value: &T,
) -> ClientResult<()> {
    let plaintext = serde_json::to_vec(value).map_err(|e| Error::Storage(e.to_string()))?;
    let aes_key = device_key(device_id, user_id);
    let blob = aes_gcm_encrypt(rng, &aes_key, &plaintext, b"nero-mpc-keyshare");
    let envelope = StorageEnvelope {
        ciphertext: hex::encode(&blob.ciphertext),
        iv: hex::encode(blob.nonce),
        salt: String::new(),
        version: 1,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(|e| Error::Storage(e.to_string()))?;
    store.set(key, bytes).await.map_err(Error::Storage)
}

/// Reads and decrypts the value previously written by [`store_encrypted`],
/// or `None` if `key` was never set.
pub async fn load_encrypted<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
    device_id: &str,
    user_id: &str,
) -> ClientResult<Option<T>> {
    let Some(bytes) = store.get(key).await.map_err(Error::Storage)? else {
        return Ok(None);
    };
    let envelope: StorageEnvelope =
        serde_json::from_slice(&bytes).map_err(|e| Error::Storage(e.to_string()))?;
    let nonce: [u8; 12] = hex::decode(&envelope.iv)
        .map_err(|e| Error::Storage(e.to_string()))?
        .try_into()
        .map_err(|_| Error::Storage("stored IV had the wrong length".into()))?;
    let ciphertext = hex::decode(&envelope.ciphertext).map_err(|e| Error::Storage(e.to_string()))?;
    let aes_key = device_key(device_id, user_id);
    let blob = SealedBlob { nonce, ciphertext };
    let plaintext = aes_gcm_decrypt(&aes_key, &blob, b"nero-mpc-keyshare")?;
    let value = serde_json::from_slice(&plaintext).map_err(|e| Error::Storage(e.to_string()))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemoryStore(Mutex<HashMap<String, Vec<u8>>>);

    #[async_trait::async_trait]
    impl Store for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), String> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
        async fn delete(&self, key: &str) -> Result<(), String> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
        async fn clear(&self) -> Result<(), String> {
            self.0.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn roundtrips_through_the_encrypted_envelope() {
        let store = MemoryStore(Mutex::new(HashMap::new()));
        let mut rng = rand::thread_rng();
        let value = vec![1u32, 2, 3];
        store_encrypted(&mut rng, &store, "k", "device-1", "user-1", &value)
            .await
            .unwrap();
        let loaded: Option<Vec<u32>> = load_encrypted(&store, "k", "device-1", "user-1")
            .await
            .unwrap();
        assert_eq!(loaded, Some(value));
    }
}
