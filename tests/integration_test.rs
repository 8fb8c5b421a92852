#![allow(missing_docs)]

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use softly::doctor::diagnose;
use softly::engine::{EntryPrompt, StatusKind};
use softly::log::{Journal, JournalAction, JournalEvent};
use softly::store::{DocumentStore, FileStore, Identity, IdentitySource, Profile};
use softly::{AppConfig, RecordOutcome, Session, Settings, SyncState};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

async fn connect(dir: &TempDir, token: Option<&str>) -> Session<FileStore> {
    let store = FileStore::new(dir.path(), "softly-test").unwrap();
    let identity = IdentitySource::resolve(token, dir.path());
    Session::connect(store, &identity, Settings::default()).await
}

/// End-to-end: log two full cycles, reopen the session from disk and get
/// the same answers.
#[tokio::test]
async fn test_tracking_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut session = connect(&dir, Some("user-1")).await;
    assert_eq!(session.sync(), SyncState::Ready);
    assert_eq!(session.entry_prompt(), EntryPrompt::START);

    for d in ["2024-01-01", "2024-01-05", "2024-01-20", "2024-01-23"] {
        let outcome = session.record(date(d), now()).await;
        assert!(outcome.is_applied());
        assert_eq!(session.sync(), SyncState::Saved);
    }
    session.record(date("2024-02-16"), now()).await;

    let status = session.status().unwrap();
    assert_eq!(status.kind, StatusKind::Early);
    assert_eq!(status.variance, -9);
    assert_eq!(session.entry_prompt(), EntryPrompt::CONCLUDE);

    let reopened = connect(&dir, Some("user-1")).await;
    assert_eq!(reopened.profile().logs, session.profile().logs);
    assert_eq!(reopened.status(), session.status());
    assert_eq!(reopened.active_cycle(), session.active_cycle());
    for d in ["2024-02-16", "2024-02-19", "2024-02-20"] {
        assert_eq!(
            reopened.is_day_occupied(date(d)),
            session.is_day_occupied(date(d))
        );
    }
    assert!(reopened.is_day_occupied(date("2024-02-19")));
    assert!(!reopened.is_day_occupied(date("2024-02-20")));
}

#[tokio::test]
async fn test_anonymous_identity_reused_across_sessions() {
    let dir = TempDir::new().unwrap();

    let mut first = connect(&dir, None).await;
    first.record(date("2024-03-01"), now()).await;
    let uid = first.identity().unwrap().uid().to_string();
    assert!(uid.starts_with("anon-"));

    let second = connect(&dir, None).await;
    assert_eq!(second.identity().unwrap().uid(), uid);
    assert_eq!(second.profile().logs.len(), 1);
}

#[tokio::test]
async fn test_users_do_not_see_each_other() {
    let dir = TempDir::new().unwrap();

    let mut alice = connect(&dir, Some("alice")).await;
    alice.record(date("2024-03-01"), now()).await;

    let bob = connect(&dir, Some("bob")).await;
    assert!(bob.profile().logs.is_empty());
}

#[tokio::test]
async fn test_rejected_end_date_leaves_disk_untouched() {
    let dir = TempDir::new().unwrap();
    let mut session = connect(&dir, Some("user-1")).await;
    session.record(date("2024-03-10"), now()).await;

    let outcome = session.record(date("2024-03-09"), now()).await;
    assert!(matches!(outcome, RecordOutcome::Rejected { .. }));

    let store = FileStore::new(dir.path(), "softly-test").unwrap();
    let stored = store
        .load(&Identity::new("user-1").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.logs.len(), 1);
    assert!(stored.logs[0].is_open());
}

#[tokio::test]
async fn test_reset_persists_and_keeps_settings() {
    let dir = TempDir::new().unwrap();
    let mut session = connect(&dir, Some("user-1")).await;
    session
        .update_settings(|s| s.set_period_duration(6), now())
        .await;
    session.record(date("2024-03-01"), now()).await;

    session.reset(now()).await;

    let reopened = connect(&dir, Some("user-1")).await;
    assert!(reopened.profile().logs.is_empty());
    assert!(reopened.active_cycle().is_none());
    assert!(reopened.status().is_none());
    assert_eq!(reopened.settings().period_duration, 6);
}

#[tokio::test]
async fn test_unwritable_storage_degrades_to_local() {
    let dir = TempDir::new().unwrap();
    // A regular file where the store expects a directory
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "not a directory").unwrap();

    let store = FileStore::new(&blocked, "softly-test").unwrap();
    let identity = IdentitySource::Token("user-1".to_string());
    let mut session = Session::connect(store, &identity, Settings::default()).await;

    session.record(date("2024-03-01"), now()).await;

    assert_eq!(session.sync(), SyncState::LocalFallback);
    assert!(session.last_error().is_some());
    assert!(session.active_cycle().is_some());
}

#[tokio::test]
async fn test_existing_document_loads() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path(), "softly-test").unwrap();
    let identity = Identity::new("user-1").unwrap();
    let path = store.profile_path(&identity);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{
  "logs": [
    {"start": "2024-01-01", "end": "2024-01-05", "id": 1704100000000},
    {"start": "2024-01-29", "end": "2024-02-02", "id": 1706500000000},
    {"start": "2024-02-26", "end": null, "id": 1708900000000}
  ],
  "settings": {"cycleLength": 28, "periodDuration": 4, "theme": "dark"},
  "updatedAt": "2024-02-26T10:00:00Z"
}"#,
    )
    .unwrap();

    let session = connect(&dir, Some("user-1")).await;

    assert_eq!(session.status().unwrap().kind, StatusKind::Normal);
    assert_eq!(session.active_cycle().unwrap().start, date("2024-02-26"));
    assert!(diagnose(session.profile()).is_clean());
}

#[test]
fn test_config_drives_store_layout() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("softly.toml");
    std::fs::write(
        &config_path,
        format!(
            "app_id = \"custom-app\"\ndata_dir = \"{}\"\n\n[defaults]\ncycle_length = 30\n",
            dir.path().join("data").display()
        ),
    )
    .unwrap();

    let config = AppConfig::from_path(&config_path).unwrap();
    let store = FileStore::new(&config.data_dir, &config.app_id).unwrap();
    let path = store.profile_path(&Identity::new("u").unwrap());

    assert!(path.starts_with(dir.path().join("data").join("custom-app")));
    assert_eq!(config.defaults.settings().cycle_length, 30);
}

#[test]
fn test_journal_records_session_activity() {
    let dir = TempDir::new().unwrap();
    let journal = Journal::new(dir.path()).unwrap();

    let mut logs = Vec::new();
    let started = softly::record_entry(&mut logs, date("2024-03-01"), now());
    let rejected = softly::record_entry(&mut logs, date("2024-02-28"), now());
    journal
        .append(&JournalEvent::from_outcome(&started, now()))
        .unwrap();
    journal
        .append(&JournalEvent::from_outcome(&rejected, now()))
        .unwrap();

    let events = journal.read_all().unwrap();
    let actions: Vec<JournalAction> = events.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![JournalAction::Started, JournalAction::Rejected]);
}

#[test]
fn test_profile_round_trip_replays_identically() {
    let mut logs = Vec::new();
    for (i, d) in ["2024-01-01", "2024-01-04", "2024-02-05", "2024-02-08", "2024-03-04"]
        .iter()
        .enumerate()
    {
        softly::record_entry(
            &mut logs,
            date(d),
            now() + chrono::Duration::seconds(i64::try_from(i).unwrap()),
        );
    }
    let profile = Profile {
        logs,
        settings: Settings::default(),
        updated_at: None,
    };

    let json = serde_json::to_string(&profile).unwrap();
    let restored = Profile::from_json(&json).unwrap();

    assert_eq!(
        softly::classify_status(&restored.logs, &restored.settings),
        softly::classify_status(&profile.logs, &profile.settings)
    );
    assert_eq!(
        softly::active_cycle(&restored.logs),
        softly::active_cycle(&profile.logs)
    );
}
