//! Column encryption for secret profile fields.
//!
//! AES-256-CBC with a fresh random 16-byte IV per call.
//! Blob format: base64( iv (16 bytes) | ciphertext ).

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rand::RngCore;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("ciphertext blob is malformed")]
    MalformedBlob,
    #[error("decryption failed (wrong key or corrupted data)")]
    Decrypt,
}

/// The process-wide secret-field key. Always passed in explicitly so tests
/// can substitute a deterministic one; see `keys::KeyStore` for the
/// production source.
#[derive(Clone)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

pub fn encrypt(key: &EncryptionKey, plaintext: &str) -> String {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    let cipher = Aes256CbcEnc::new(&key.0.into(), &iv.into());
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    BASE64.encode(blob)
}

/// Strict decryption: malformed base64, truncated blobs, bad padding, and
/// non-UTF-8 plaintext all fail rather than yielding a guessed value.
pub fn decrypt(key: &EncryptionKey, blob: &str) -> Result<String, CryptoError> {
    let raw = BASE64.decode(blob).map_err(|_| CryptoError::MalformedBlob)?;
    if raw.len() <= IV_LEN || (raw.len() - IV_LEN) % 16 != 0 {
        return Err(CryptoError::MalformedBlob);
    }
    let (iv, ciphertext) = raw.split_at(IV_LEN);
    let cipher =
        Aes256CbcDec::new_from_slices(&key.0, iv).map_err(|_| CryptoError::MalformedBlob)?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decrypt)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::Decrypt)
}
