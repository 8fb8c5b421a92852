//! User identity resolution
//!
//! A pre-provisioned token wins when one is configured; otherwise an
//! anonymous identity is created once and remembered on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use rand::Rng;

/// An authenticated (or anonymous) user handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    uid: String,
}

impl Identity {
    /// Wrap a user id. Only ASCII letters, digits, `-` and `_` are accepted
    /// so the id can be used as a path segment.
    pub fn new(uid: &str) -> Result<Self> {
        let uid = uid.trim();
        if uid.is_empty() {
            bail!("Identity cannot be empty");
        }
        if let Some(bad) = uid
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            bail!("Invalid character '{bad}' in identity '{uid}'");
        }
        Ok(Self {
            uid: uid.to_string(),
        })
    }

    /// The user id
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uid)
    }
}

/// Capability for resolving the current user
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve who is using the tracker
    async fn current_identity(&self) -> Result<Identity>;
}

/// Where the identity comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// A pre-provisioned token used as the user id
    Token(String),
    /// An anonymous id persisted at the given path
    Anonymous(PathBuf),
}

impl IdentitySource {
    /// Prefer `token` when present and non-blank, else anonymous storage
    /// under `data_dir`.
    #[must_use]
    pub fn resolve(token: Option<&str>, data_dir: &Path) -> Self {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Self::Token(token.to_string()),
            None => Self::Anonymous(data_dir.join("identity")),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentitySource {
    async fn current_identity(&self) -> Result<Identity> {
        match self {
            Self::Token(token) => Identity::new(token).context("Invalid auth token"),
            Self::Anonymous(path) => load_or_create_anonymous(path).await,
        }
    }
}

async fn load_or_create_anonymous(path: &Path) -> Result<Identity> {
    if tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check identity file: {}", path.display()))?
    {
        let stored = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read identity file: {}", path.display()))?;
        return Identity::new(&stored)
            .with_context(|| format!("Corrupt identity file: {}", path.display()));
    }

    let uid = fresh_anonymous_uid();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, &uid)
        .await
        .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
    tokio::fs::rename(&tmp_path, path).await.with_context(|| {
        format!(
            "Failed to rename {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;
    Identity::new(&uid)
}

/// A random anonymous user id
pub fn anonymous_uid<R: Rng>(rng: &mut R) -> String {
    format!("anon-{:032x}", rng.random::<u128>())
}

fn fresh_anonymous_uid() -> String {
    anonymous_uid(&mut rand::rng())
}
