use anyhow::{Context as _, anyhow};
use dbtsuna_core::Result;
use keyring::Entry;

use crate::crypto::{EncryptionKey, KEY_LEN};

/// Loads the secret-field encryption key from the OS keychain. One key per
/// install, created on first run, loaded once per process and reused for
/// every sealed field.
pub struct KeyStore {
    service_name: String,
}

impl KeyStore {
    pub fn new() -> Self {
        Self {
            service_name: "DbTsuna".into(),
        }
    }

    /// Corrupt key material is a hard error here: failing fast at load time
    /// beats silently failing to decrypt every profile later.
    pub fn load(&self) -> Result<EncryptionKey> {
        let entry = Entry::new(&self.service_name, "encryption-key")?;
        match entry.get_password() {
            Ok(encoded) => decode_key(&encoded),
            Err(keyring::Error::NoEntry) => {
                let key = EncryptionKey::generate();
                entry.set_password(&hex::encode(key.as_bytes()))?;
                Ok(key)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_key(encoded: &str) -> Result<EncryptionKey> {
    let bytes = hex::decode(encoded).context("stored encryption key is not valid hex")?;
    let bytes: [u8; KEY_LEN] = bytes
        .try_into()
        .map_err(|_| anyhow!("stored encryption key has the wrong length"))?;
    Ok(EncryptionKey::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_key_accepts_valid_material() {
        let encoded = hex::encode([42u8; KEY_LEN]);
        let key = decode_key(&encoded).unwrap();
        assert_eq!(key.as_bytes(), &[42u8; KEY_LEN]);
    }

    #[test]
    fn decode_key_rejects_bad_hex() {
        assert!(decode_key("zz not hex").is_err());
    }

    #[test]
    fn decode_key_rejects_wrong_length() {
        assert!(decode_key(&hex::encode([42u8; 16])).is_err());
    }
}
