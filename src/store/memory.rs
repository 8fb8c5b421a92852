//! In-process document store
//!
//! Backs offline sessions and tests. Can be switched into a failing mode to
//! simulate an unreachable backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::store::identity::Identity;
use crate::store::profile::Profile;
use crate::store::DocumentStore;

/// Profiles held in a map keyed by user id
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Profile>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// An empty, working store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `profile` for `identity`
    #[must_use]
    pub fn with_document(identity: &Identity, profile: Profile) -> Self {
        let store = Self::new();
        if let Ok(mut docs) = store.documents.lock() {
            docs.insert(identity.uid().to_string(), profile);
        }
        store
    }

    /// Make every subsequent load and save fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().map_or(0, |docs| docs.len())
    }

    /// Whether no documents are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("Document store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, identity: &Identity) -> Result<Option<Profile>> {
        self.check_available()?;
        let docs = self
            .documents
            .lock()
            .map_err(|_| anyhow!("Document store lock poisoned"))?;
        Ok(docs.get(identity.uid()).cloned())
    }

    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<()> {
        self.check_available()?;
        let mut docs = self
            .documents
            .lock()
            .map_err(|_| anyhow!("Document store lock poisoned"))?;
        docs.insert(identity.uid().to_string(), profile.clone());
        Ok(())
    }
}
