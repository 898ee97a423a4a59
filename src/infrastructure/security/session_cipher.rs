use aes_gcm::{
  Aes256Gcm, Nonce,
  aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;

use crate::domain::auth::entities::Session;

const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum SessionCipherError {
  #[error("Invalid session key: {0}")]
  InvalidKey(String),

  #[error("Sealing failed: {0}")]
  SealFailed(String),

  #[error("Session cookie rejected: {0}")]
  OpenFailed(String),
}

/// Seals sessions into opaque cookie values with AES-256-GCM
///
/// The value is URL-safe base64 of nonce (12 bytes) + ciphertext of the
/// session JSON. The GCM tag makes any client-side edit fail to open.
#[derive(Clone)]
pub struct SessionCipher {
  cipher: Aes256Gcm,
}

impl SessionCipher {
  /// # Arguments
  /// * `key_base64` - Base64-encoded 32-byte (256-bit) key
  pub fn new(key_base64: &str) -> Result<Self, SessionCipherError> {
    let key_bytes = general_purpose::STANDARD
      .decode(key_base64)
      .map_err(|e| SessionCipherError::InvalidKey(format!("decode failed: {}", e)))?;

    let key_array: &[u8; 32] = key_bytes
      .as_slice()
      .try_into()
      .map_err(|_| SessionCipherError::InvalidKey("key must be exactly 32 bytes".to_string()))?;

    Ok(Self {
      cipher: Aes256Gcm::new(key_array.into()),
    })
  }

  pub fn seal(&self, session: &Session) -> Result<String, SessionCipherError> {
    let plaintext =
      serde_json::to_vec(session).map_err(|e| SessionCipherError::SealFailed(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = self
      .cipher
      .encrypt(nonce, plaintext.as_slice())
      .map_err(|e| SessionCipherError::SealFailed(e.to_string()))?;

    let mut combined = nonce_bytes.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(combined))
  }

  pub fn open(&self, sealed: &str) -> Result<Session, SessionCipherError> {
    let combined = general_purpose::URL_SAFE_NO_PAD
      .decode(sealed)
      .map_err(|e| SessionCipherError::OpenFailed(format!("base64: {}", e)))?;

    if combined.len() <= NONCE_LEN {
      return Err(SessionCipherError::OpenFailed("too short".to_string()));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
    let plaintext = self
      .cipher
      .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
      .map_err(|_| SessionCipherError::OpenFailed("authentication failed".to_string()))?;

    serde_json::from_slice(&plaintext).map_err(|e| SessionCipherError::OpenFailed(e.to_string()))
  }
}
