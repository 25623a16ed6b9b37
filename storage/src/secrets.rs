use dbtsuna_core::profiles::SavedProfile;
use serde::{Deserialize, Serialize};

use crate::crypto::{self, CryptoError, EncryptionKey};

/// An encrypted secret as it appears at rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sealed(String);

impl Sealed {
    pub fn seal(plaintext: &str, key: &EncryptionKey) -> Self {
        Self(crypto::encrypt(key, plaintext))
    }

    pub fn reveal(&self, key: &EncryptionKey) -> Result<String, CryptoError> {
        crypto::decrypt(key, &self.0)
    }
}

/// The at-rest shape of a saved profile: the plain fields as the core
/// serializes them, plus the three secret fields sealed. The core skips
/// plaintext secrets during serialization, so this is the only path a
/// secret takes to disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: SavedProfile,
    #[serde(default)]
    pub password: Option<Sealed>,
    #[serde(default)]
    pub ssh_password: Option<Sealed>,
    #[serde(default)]
    pub ssh_keyfile_password: Option<Sealed>,
}

pub fn seal_profile(profile: &SavedProfile, key: &EncryptionKey) -> StoredProfile {
    StoredProfile {
        password: profile.password.as_deref().map(|p| Sealed::seal(p, key)),
        ssh_password: profile
            .connection
            .ssh_password
            .as_deref()
            .map(|p| Sealed::seal(p, key)),
        ssh_keyfile_password: profile
            .connection
            .ssh_keyfile_password
            .as_deref()
            .map(|p| Sealed::seal(p, key)),
        profile: profile.clone(),
    }
}

pub fn unseal_profile(
    stored: StoredProfile,
    key: &EncryptionKey,
) -> Result<SavedProfile, CryptoError> {
    let mut profile = stored.profile;
    profile.password = stored.password.map(|s| s.reveal(key)).transpose()?;
    profile.connection.ssh_password = stored.ssh_password.map(|s| s.reveal(key)).transpose()?;
    profile.connection.ssh_keyfile_password = stored
        .ssh_keyfile_password
        .map(|s| s.reveal(key))
        .transpose()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_LEN;

    fn test_key() -> EncryptionKey {
        EncryptionKey::from_bytes([9u8; KEY_LEN])
    }

    fn secret_profile() -> SavedProfile {
        let mut profile = SavedProfile::new("dev");
        profile.password = Some("secret".into());
        profile.connection.ssh_password = Some("tunnel-pass".into());
        profile.connection.ssh_keyfile_password = Some("passphrase".into());
        profile
    }

    #[test]
    fn seal_and_unseal_round_trip() {
        let key = test_key();
        let stored = seal_profile(&secret_profile(), &key);
        let profile = unseal_profile(stored, &key).unwrap();
        assert_eq!(profile.password.as_deref(), Some("secret"));
        assert_eq!(profile.connection.ssh_password.as_deref(), Some("tunnel-pass"));
        assert_eq!(
            profile.connection.ssh_keyfile_password.as_deref(),
            Some("passphrase")
        );
    }

    #[test]
    fn absent_secrets_stay_absent() {
        let key = test_key();
        let stored = seal_profile(&SavedProfile::new("dev"), &key);
        assert!(stored.password.is_none());
        let profile = unseal_profile(stored, &key).unwrap();
        assert!(profile.password.is_none());
        assert!(profile.connection.ssh_password.is_none());
    }

    #[test]
    fn unseal_with_wrong_key_fails() {
        let stored = seal_profile(&secret_profile(), &test_key());
        let other = EncryptionKey::from_bytes([10u8; KEY_LEN]);
        assert!(unseal_profile(stored, &other).is_err());
    }

    #[test]
    fn stored_record_has_no_plaintext() {
        let stored = seal_profile(&secret_profile(), &test_key());
        let json = serde_json::to_string(&stored).expect("serialize record");
        assert!(!json.contains("secret"));
        assert!(!json.contains("tunnel-pass"));
        assert!(!json.contains("passphrase"));
    }
}
