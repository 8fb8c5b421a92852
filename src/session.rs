//! Session controller
//!
//! Owns the single mutable profile, runs engine mutations against it and
//! saves after each change. Storage problems never escape: the session keeps
//! working in memory and reports the degraded mode through [`SyncState`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::engine::{
    self, CycleEntry, CycleStatus, EntryPrompt, Insight, MonthCalendar, RecordOutcome, Settings,
};
use crate::store::{DocumentStore, Identity, IdentityProvider, Profile};

/// Persistence state shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Connected, nothing written yet
    Ready,
    /// Last save succeeded
    Saved,
    /// Storage is reachable in principle but the last load or save failed
    LocalFallback,
    /// No identity or store; running in memory only
    Offline,
    /// Storage is not configured or could not be opened
    Unavailable,
}

impl SyncState {
    /// Status line text
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Ready => "Connected to your storage",
            Self::Saved => "Data saved securely",
            Self::LocalFallback => "Storage active locally",
            Self::Offline => "Working locally",
            Self::Unavailable => "Storage issue",
        }
    }

    /// Whether the in-memory state may be ahead of storage
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::LocalFallback | Self::Offline | Self::Unavailable)
    }
}

/// One interactive session over a user's profile
pub struct Session<S: DocumentStore> {
    store: Option<S>,
    identity: Option<Identity>,
    profile: Profile,
    sync: SyncState,
    last_error: Option<String>,
    /// The stored document could not be read, so saving could clobber it
    load_pending: bool,
}

impl<S: DocumentStore> Session<S> {
    /// A session with no storage at all
    #[must_use]
    pub fn local(defaults: Settings) -> Self {
        Self {
            store: None,
            identity: None,
            profile: Profile::with_settings(defaults),
            sync: SyncState::Offline,
            last_error: None,
            load_pending: false,
        }
    }

    /// A session whose store could not be opened at all
    #[must_use]
    pub fn unavailable(defaults: Settings, reason: &str) -> Self {
        Self {
            sync: SyncState::Unavailable,
            last_error: Some(reason.to_string()),
            ..Self::local(defaults)
        }
    }

    /// Resolve the user and load their profile.
    ///
    /// Identity failure leaves the session offline. A failed load keeps the
    /// defaults and the store, but nothing is written back until the stored
    /// document has been read (see [`Session::persist`]).
    pub async fn connect<P>(store: S, provider: &P, defaults: Settings) -> Self
    where
        P: IdentityProvider + ?Sized,
    {
        let identity = match provider.current_identity().await {
            Ok(identity) => identity,
            Err(err) => {
                let mut session = Self::local(defaults);
                session.last_error = Some(format!("{err:#}"));
                return session;
            }
        };

        let mut profile = Profile::with_settings(defaults);
        let mut sync = SyncState::Ready;
        let mut last_error = None;
        let mut load_pending = false;
        match store.load(&identity).await {
            Ok(Some(stored)) => profile = stored.normalized(),
            Ok(None) => {}
            Err(err) => {
                sync = SyncState::LocalFallback;
                last_error = Some(format!("{err:#}"));
                load_pending = true;
            }
        }

        Self {
            store: Some(store),
            identity: Some(identity),
            profile,
            sync,
            last_error,
            load_pending,
        }
    }

    /// Record a start or end date. Saves unless the date was rejected.
    pub async fn record(&mut self, date: NaiveDate, now: DateTime<Utc>) -> RecordOutcome {
        let outcome = engine::record_entry(&mut self.profile.logs, date, now);
        if outcome.is_applied() {
            self.persist(now).await;
        }
        outcome
    }

    /// Erase every entry. Settings are kept.
    pub async fn reset(&mut self, now: DateTime<Utc>) {
        engine::reset_all(&mut self.profile.logs);
        self.persist(now).await;
    }

    /// Apply a settings change, normalize it and save
    pub async fn update_settings<F>(&mut self, change: F, now: DateTime<Utc>) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        change(&mut self.profile.settings);
        self.profile.settings = self.profile.settings.normalized();
        self.persist(now).await;
        self.profile.settings
    }

    /// Save the profile; failures only change the sync state.
    ///
    /// After a failed load the stored document is read again first. Saving
    /// resumes only once it is known to be absent; an existing document the
    /// session never loaded is left untouched.
    pub async fn persist(&mut self, now: DateTime<Utc>) {
        let (Some(store), Some(identity)) = (&self.store, &self.identity) else {
            if self.sync != SyncState::Unavailable {
                self.sync = SyncState::Offline;
            }
            return;
        };

        if self.load_pending {
            match store.load(identity).await {
                Ok(None) => self.load_pending = false,
                Ok(Some(_)) => {
                    self.sync = SyncState::LocalFallback;
                    self.last_error = Some(
                        "Stored profile was not loaded this session; not overwriting it"
                            .to_string(),
                    );
                    return;
                }
                Err(err) => {
                    self.sync = SyncState::LocalFallback;
                    self.last_error = Some(format!("{err:#}"));
                    return;
                }
            }
        }

        self.profile.updated_at = Some(now);
        match store.save(identity, &self.profile).await {
            Ok(()) => {
                self.sync = SyncState::Saved;
                self.last_error = None;
            }
            Err(err) => {
                self.sync = SyncState::LocalFallback;
                self.last_error = Some(format!("{err:#}"));
            }
        }
    }

    /// The currently open cycle
    #[must_use]
    pub fn active_cycle(&self) -> Option<&CycleEntry> {
        engine::active_cycle(&self.profile.logs)
    }

    /// Classification of the latest completed cycle
    #[must_use]
    pub fn status(&self) -> Option<CycleStatus> {
        engine::classify_status(&self.profile.logs, &self.profile.settings)
    }

    /// Badge and insight sentence. An empty session whose store could not
    /// be opened explains that instead of the welcome.
    #[must_use]
    pub fn insight(&self) -> Insight {
        if self.sync == SyncState::Unavailable && self.profile.logs.is_empty() {
            return Insight::storage_unavailable();
        }
        engine::describe(&self.profile.logs, &self.profile.settings)
    }

    /// Entry form wording
    #[must_use]
    pub fn entry_prompt(&self) -> EntryPrompt {
        EntryPrompt::for_logs(&self.profile.logs)
    }

    /// Whether `date` is covered by any entry
    #[must_use]
    pub fn is_day_occupied(&self, date: NaiveDate) -> bool {
        engine::is_day_occupied(&self.profile.logs, &self.profile.settings, date)
    }

    /// Calendar for the given month
    pub fn calendar(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> anyhow::Result<MonthCalendar> {
        MonthCalendar::build(
            year,
            month,
            today,
            &self.profile.logs,
            &self.profile.settings,
        )
    }

    /// The profile being edited
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    /// Persistence state
    #[must_use]
    pub const fn sync(&self) -> SyncState {
        self.sync
    }

    /// The resolved user, if any
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Message from the most recent storage or identity failure
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
