//! Storage for the generative-AI API key: OS keyring first, with an
//! encrypted-file fallback for environments without one.

use crate::app_dirs;
use std::path::{Path, PathBuf};

const KEYRING_SERVICE: &str = "silibus";
const KEYRING_KEY: &str = "silibus_assist_api_key";

/// Errors raised while reading or writing the stored API key.
#[derive(Debug, thiserror::Error)]
pub enum ApiKeyStoreError {
    #[error("Key store unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Crypto error: {0}")]
    Crypto(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("App dir error: {0}")]
    AppDir(#[from] crate::app_dirs::AppDirError),
}

/// Keyring-backed store with an encrypted file fallback under the app dir.
#[derive(Clone, Debug)]
pub struct ApiKeyStore {
    fallback_dir: PathBuf,
}

impl ApiKeyStore {
    pub fn new() -> Result<Self, ApiKeyStoreError> {
        let fallback_dir = app_dirs::app_root_dir()?.join("secrets");
        std::fs::create_dir_all(&fallback_dir)?;
        Ok(Self { fallback_dir })
    }

    /// Return the stored key, if any.
    pub fn get(&self) -> Result<Option<String>, ApiKeyStoreError> {
        if let Some(key) = self.try_keyring_get()? {
            return Ok(Some(key));
        }
        self.fallback_get()
    }

    /// Store the key, preferring the keyring. An empty key is ignored.
    pub fn set(&self, api_key: &str) -> Result<(), ApiKeyStoreError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Ok(());
        }
        if self.try_keyring_set(api_key).is_ok() {
            let _ = self.fallback_delete();
            return Ok(());
        }
        self.fallback_set(api_key)
    }

    /// Remove the key from both the keyring and the fallback file.
    pub fn delete(&self) -> Result<(), ApiKeyStoreError> {
        let _ = self.try_keyring_delete();
        let _ = self.fallback_delete();
        Ok(())
    }

    fn try_keyring_get(&self) -> Result<Option<String>, ApiKeyStoreError> {
        if keyring_disabled() {
            return Ok(None);
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY)
            .map_err(|err| ApiKeyStoreError::Unavailable(err.to_string()))?;
        match entry.get_password() {
            Ok(key) => Ok(Some(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(_) => Ok(None),
        }
    }

    fn try_keyring_set(&self, api_key: &str) -> Result<(), ApiKeyStoreError> {
        if keyring_disabled() {
            return Err(ApiKeyStoreError::Unavailable("keyring disabled".into()));
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY)
            .map_err(|err| ApiKeyStoreError::Unavailable(err.to_string()))?;
        entry
            .set_password(api_key)
            .map_err(|err| ApiKeyStoreError::Unavailable(err.to_string()))
    }

    fn try_keyring_delete(&self) -> Result<(), ApiKeyStoreError> {
        if keyring_disabled() {
            return Ok(());
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY)
            .map_err(|err| ApiKeyStoreError::Unavailable(err.to_string()))?;
        let _ = entry.delete_credential();
        Ok(())
    }

    fn fallback_key_file(&self) -> PathBuf {
        self.fallback_dir.join("assist_api_key.bin")
    }

    fn fallback_cipher_key_file(&self) -> PathBuf {
        self.fallback_dir.join("assist_api_key.key")
    }

    fn fallback_get(&self) -> Result<Option<String>, ApiKeyStoreError> {
        let key_file = self.fallback_key_file();
        if !key_file.exists() {
            return Ok(None);
        }
        let data = std::fs::read(key_file)?;
        if data.len() < 12 {
            return Err(ApiKeyStoreError::Decode("key file too short".into()));
        }
        let (nonce, ciphertext) = data.split_at(12);
        let cipher_key = std::fs::read(self.fallback_cipher_key_file())?;
        if cipher_key.len() != 32 {
            return Err(ApiKeyStoreError::Decode("cipher key invalid".into()));
        }
        let plaintext = decrypt(&cipher_key, nonce, ciphertext)?;
        let api_key =
            String::from_utf8(plaintext).map_err(|err| ApiKeyStoreError::Decode(err.to_string()))?;
        Ok(Some(api_key))
    }

    fn fallback_set(&self, api_key: &str) -> Result<(), ApiKeyStoreError> {
        let cipher_key_path = self.fallback_cipher_key_file();
        let cipher_key = if cipher_key_path.exists() {
            std::fs::read(&cipher_key_path)?
        } else {
            let bytes = random_bytes(32)?;
            write_private_file(&cipher_key_path, &bytes)?;
            bytes
        };
        if cipher_key.len() != 32 {
            return Err(ApiKeyStoreError::Decode("cipher key invalid".into()));
        }
        let nonce = random_bytes(12)?;
        let ciphertext = encrypt(&cipher_key, &nonce, api_key.as_bytes())?;
        let mut payload = Vec::with_capacity(nonce.len() + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);
        write_private_file(&self.fallback_key_file(), &payload)?;
        Ok(())
    }

    fn fallback_delete(&self) -> Result<(), ApiKeyStoreError> {
        let _ = std::fs::remove_file(self.fallback_key_file());
        let _ = std::fs::remove_file(self.fallback_cipher_key_file());
        Ok(())
    }
}

fn keyring_disabled() -> bool {
    std::env::var("SILIBUS_DISABLE_KEYRING")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn random_bytes(len: usize) -> Result<Vec<u8>, ApiKeyStoreError> {
    let mut out = vec![0u8; len];
    use rand::TryRngCore;
    rand::rngs::OsRng
        .try_fill_bytes(&mut out)
        .map_err(|err| ApiKeyStoreError::Unavailable(err.to_string()))?;
    Ok(out)
}

fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), ApiKeyStoreError> {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ApiKeyStoreError> {
    use chacha20poly1305::aead::{Aead, KeyInit};
    let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
        .map_err(|err| ApiKeyStoreError::Crypto(err.to_string()))?;
    let nonce = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .encrypt(nonce, plaintext)
        .map_err(|err| ApiKeyStoreError::Crypto(err.to_string()))
}

fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ApiKeyStoreError> {
    use chacha20poly1305::aead::{Aead, KeyInit};
    let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
        .map_err(|err| ApiKeyStoreError::Crypto(err.to_string()))?;
    let nonce = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|err| ApiKeyStoreError::Crypto(err.to_string()))
}
