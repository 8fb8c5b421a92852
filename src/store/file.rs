//! File-backed document store
//!
//! One JSON document per user at `<root>/<app_id>/users/<uid>/profile.json`.
//! Writes go to a temp file first and are renamed into place.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::store::identity::Identity;
use crate::store::profile::Profile;
use crate::store::DocumentStore;

/// Stores profiles as JSON files on local disk
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    app_id: String,
}

impl FileStore {
    /// Create a store rooted at `root` for application `app_id`.
    ///
    /// Nothing is created on disk until the first save.
    pub fn new<P: AsRef<Path>>(root: P, app_id: &str) -> Result<Self> {
        let app_id = app_id.trim();
        if app_id.is_empty() || app_id.contains(['/', '\\']) || app_id == ".." {
            bail!("Invalid app id '{app_id}'");
        }
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            app_id: app_id.to_string(),
        })
    }

    /// Path of the profile document for `identity`
    #[must_use]
    pub fn profile_path(&self, identity: &Identity) -> PathBuf {
        self.root
            .join(&self.app_id)
            .join("users")
            .join(identity.uid())
            .join("profile.json")
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, identity: &Identity) -> Result<Option<Profile>> {
        let path = self.profile_path(identity);
        if !tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?
        {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let profile = Profile::from_json(&content)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(Some(profile))
    }

    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<()> {
        let path = self.profile_path(identity);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path).await.with_context(|| {
            format!(
                "Failed to rename {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::Settings;
    use crate::testutil::{closed, open};
    use tempfile::TempDir;

    fn user() -> Identity {
        Identity::new("user-1").unwrap()
    }

    #[test]
    fn test_profile_path_layout() {
        let store = FileStore::new("/data", "softly").unwrap();
        assert_eq!(
            store.profile_path(&user()),
            PathBuf::from("/data/softly/users/user-1/profile.json")
        );
    }

    #[test]
    fn test_rejects_bad_app_id() {
        assert!(FileStore::new("/data", "").is_err());
        assert!(FileStore::new("/data", "a/b").is_err());
        assert!(FileStore::new("/data", "..").is_err());
    }

    #[tokio::test]
    async fn test_load_missing_document_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "softly").unwrap();
        assert!(store.load(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "softly").unwrap();
        let profile = Profile {
            logs: vec![closed(1, "2024-01-01", "2024-01-05"), open(2, "2024-01-29")],
            settings: Settings {
                cycle_length: 30,
                ..Settings::default()
            },
            updated_at: Some(chrono::Utc::now()),
        };

        store.save(&user(), &profile).await.unwrap();
        let loaded = store.load(&user()).await.unwrap().unwrap();

        assert_eq!(loaded.logs, profile.logs);
        assert_eq!(loaded.settings, profile.settings);
        assert!(!store
            .profile_path(&user())
            .with_extension("json.tmp")
            .exists());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "softly").unwrap();
        let profile = Profile {
            logs: vec![open(1, "2024-01-01")],
            ..Profile::default()
        };

        store.save(&user(), &profile).await.unwrap();
        let other = Identity::new("user-2").unwrap();
        assert!(store.load(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_error() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "softly").unwrap();
        let path = store.profile_path(&user());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = store.load(&user()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
