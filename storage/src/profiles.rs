use std::{
    fs,
    path::{Path, PathBuf},
};

use dbtsuna_core::{Result, profiles::SavedProfile};

use crate::{
    crypto::EncryptionKey,
    secrets::{StoredProfile, seal_profile, unseal_profile},
};

#[derive(Clone, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(config_dir: &Path) -> Self {
        let path = config_dir.join("profiles.json");
        Self { path }
    }

    pub fn load(&self, key: &EncryptionKey) -> Result<Vec<SavedProfile>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let stored: Vec<StoredProfile> = serde_json::from_str(&contents)?;
                stored
                    .into_iter()
                    .map(|record| unseal_profile(record, key).map_err(Into::into))
                    .collect()
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Runs the persistence hooks on a working copy of every profile, seals
    /// the surviving secrets, and writes the records. A validation failure
    /// aborts the whole save before anything reaches disk.
    pub fn save(&self, profiles: &[SavedProfile], key: &EncryptionKey) -> Result<()> {
        let mut records = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let mut profile = profile.clone();
            profile.prepare_for_persistence()?;
            records.push(seal_profile(&profile, key));
        }
        let serialized = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}
