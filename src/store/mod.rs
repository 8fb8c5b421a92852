//! Profile persistence
//!
//! The session only sees the [`DocumentStore`] and [`IdentityProvider`]
//! capabilities; the file and in-memory stores are interchangeable behind
//! them.

pub mod file;
pub mod identity;
pub mod memory;
pub mod profile;

use anyhow::Result;
use async_trait::async_trait;

pub use file::FileStore;
pub use identity::{Identity, IdentityProvider, IdentitySource};
pub use memory::MemoryStore;
pub use profile::Profile;

/// Key-value document storage for profiles, keyed by identity
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the stored profile, or `None` if nothing has been saved yet
    async fn load(&self, identity: &Identity) -> Result<Option<Profile>>;

    /// Replace the stored profile
    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<()>;
}
