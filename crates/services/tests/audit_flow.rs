use std::sync::Arc;

use audit_core::Effect;
use audit_core::model::{Catalog, Person, ProgressBlob, Roster, ViewMode};
use audit_core::time::{fixed_clock, fixed_now};
use services::{AppServices, AuditController, AuditError, ReferenceData, ReferenceError};
use storage::repository::{InMemoryProgressStore, ProgressStore, Storage, StorageError};

fn reference() -> ReferenceData {
    let catalog = Catalog::from_json(
        r#"{"skills_by_age": {
            "3": [{"skill": "sharing", "description": "Shares toys"}],
            "5": [
                {"skill": "counting", "description": "Counts to ten"},
                {"skill": "hopping", "description": "Hops on one foot"}
            ]
        }}"#,
    )
    .unwrap();
    let roster = Roster::from_json(r#"{"people": ["Alice", "Bob"]}"#).unwrap();
    ReferenceData::new(catalog, roster)
}

async fn controller(store: &InMemoryProgressStore) -> AuditController {
    AuditController::initialize(reference(), Arc::new(store.clone()), fixed_clock())
        .await
        .unwrap()
}

fn alice() -> Person {
    Person::from("Alice")
}

#[tokio::test]
async fn recording_last_skill_shows_chapter_summary_with_stats() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;

    let effect = ctl
        .record_selection([Person::from("Alice"), Person::from("Bob")])
        .await
        .unwrap();

    assert_eq!(effect, Effect::Save);
    assert_eq!(ctl.view_mode(), ViewMode::ChapterSummary);
    let stats = ctl.chapter_stats();
    assert_eq!((stats.completed, stats.total), (1, 1));
    assert_eq!(stats.count_for("Alice"), Some(1));
    assert_eq!(stats.count_for("Bob"), Some(1));
}

#[tokio::test]
async fn toggling_twice_leaves_empty_entry_that_does_not_count() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.start_chapter().await.unwrap();

    ctl.toggle_individual(&alice()).await.unwrap();
    ctl.toggle_individual(&alice()).await.unwrap();

    let stored = ctl.session().record().get("3", "sharing").cloned();
    assert_eq!(stored.map(|set| set.len()), Some(0));
    assert_eq!(ctl.overall_stats().completed, 0);
    assert_eq!(ctl.view_mode(), ViewMode::SkillPrompt);
}

#[tokio::test]
async fn every_mutation_is_persisted_before_returning() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;

    ctl.jump_to_group(1).await.unwrap();
    let saved = ProgressBlob::decode(&store.load().await.unwrap().unwrap()).unwrap();
    assert_eq!(saved.current_age_index, 1);
    assert!(saved.show_age_intro);
    assert_eq!(saved.saved_at, Some(fixed_now()));

    ctl.start_chapter().await.unwrap();
    ctl.toggle_individual(&alice()).await.unwrap();
    let saved = ProgressBlob::decode(&store.load().await.unwrap().unwrap()).unwrap();
    assert!(!saved.show_age_intro);
    assert_eq!(saved.view_mode, Some(ViewMode::SkillPrompt));
    assert_eq!(
        saved.audit_data.get("5", "counting").unwrap().as_slice(),
        &[alice()]
    );
    assert_eq!(ctl.last_saved_at(), Some(fixed_now()));
}

#[tokio::test]
async fn jump_reports_first_skill_progress() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.jump_to_group(1).await.unwrap();
    assert_eq!(ctl.chapter_progress().to_string(), "1/2");

    assert_eq!(ctl.jump_to_group(5).await.unwrap(), Effect::Ignored);
    assert_eq!(ctl.position().age_index, 1);
}

#[tokio::test]
async fn reset_clears_the_store() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.mark_all_capable().await.unwrap();
    assert!(store.load().await.unwrap().is_some());

    assert_eq!(ctl.reset().await.unwrap(), Effect::Clear);
    assert_eq!(store.load().await.unwrap(), None);
    assert!(ctl.session().record().is_empty());
    assert_eq!(ctl.last_saved_at(), None);
}

#[tokio::test]
async fn restart_reproduces_state_and_stats() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.mark_all_capable().await.unwrap();
    ctl.continue_after_chapter_summary().await.unwrap();
    ctl.start_chapter().await.unwrap();
    ctl.toggle_individual(&Person::from("Bob")).await.unwrap();
    ctl.advance().await.unwrap();

    let restarted = controller(&store).await;
    assert_eq!(restarted.session().record(), ctl.session().record());
    assert_eq!(restarted.position(), ctl.position());
    assert_eq!(restarted.view_mode(), ctl.view_mode());
    assert_eq!(restarted.overall_stats(), ctl.overall_stats());
    assert_eq!(restarted.last_saved_at(), Some(fixed_now()));
}

#[tokio::test]
async fn corrupt_saved_progress_starts_fresh() {
    let store = InMemoryProgressStore::with_payload("{ definitely not json");
    let ctl = controller(&store).await;
    assert!(ctl.session().record().is_empty());
    assert_eq!(ctl.view_mode(), ViewMode::AgeIntro);
    assert_eq!(ctl.position().age_index, 0);
}

#[tokio::test]
async fn advance_without_selection_is_ignored_and_not_saved() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.start_chapter().await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(ctl.advance().await.unwrap(), Effect::Ignored);
    assert_eq!(store.load().await.unwrap(), None);
}

struct BrokenStore;

#[async_trait::async_trait]
impl ProgressStore for BrokenStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn save(&self, _payload: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".to_string()))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".to_string()))
    }
}

#[tokio::test]
async fn store_failures_surface_as_errors() {
    let mut ctl = AuditController::initialize(reference(), Arc::new(BrokenStore), fixed_clock())
        .await
        .unwrap();

    let err = ctl.start_chapter().await.unwrap_err();
    assert!(matches!(err, AuditError::Storage(_)));
    assert_eq!(ctl.last_saved_at(), None);

    // Unsaved answers stay in memory for the next attempt.
    let err = ctl.toggle_individual(&alice()).await.unwrap_err();
    assert!(matches!(err, AuditError::Storage(_)));
    assert_eq!(ctl.view_mode(), ViewMode::SkillPrompt);

    let err = ctl.reset().await.unwrap_err();
    assert!(matches!(err, AuditError::Storage(_)));
    assert_eq!(ctl.view_mode(), ViewMode::SkillPrompt);
    assert_eq!(
        ctl.session().record().get("3", "sharing").unwrap().as_slice(),
        &[alice()]
    );
    assert_eq!(ctl.overall_stats().completed, 1);
}

#[tokio::test]
async fn failed_reset_keeps_saved_audit_on_screen() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.mark_all_capable().await.unwrap();
    let saved = store.load().await.unwrap();

    let mut broken = AuditController::initialize(
        reference(),
        Arc::new(ClearFailsStore(store.clone())),
        fixed_clock(),
    )
    .await
    .unwrap();
    assert_eq!(broken.view_mode(), ViewMode::ChapterSummary);

    assert!(broken.reset().await.is_err());
    assert_eq!(broken.view_mode(), ViewMode::ChapterSummary);
    assert_eq!(broken.session().record(), ctl.session().record());
    assert_eq!(broken.last_saved_at(), Some(fixed_now()));
    assert_eq!(store.load().await.unwrap(), saved);
}

/// Reads and writes through to an in-memory store but refuses to clear it.
struct ClearFailsStore(InMemoryProgressStore);

#[async_trait::async_trait]
impl ProgressStore for ClearFailsStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        self.0.load().await
    }

    async fn save(&self, payload: &str) -> Result<(), StorageError> {
        self.0.save(payload).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }
}

#[tokio::test]
async fn jump_from_final_summary_persists_the_intro() {
    let store = InMemoryProgressStore::new();
    let mut ctl = controller(&store).await;
    ctl.mark_all_capable().await.unwrap();
    ctl.continue_after_chapter_summary().await.unwrap();
    ctl.start_chapter().await.unwrap();
    ctl.mark_all_capable().await.unwrap();
    ctl.mark_all_capable().await.unwrap();
    ctl.continue_after_chapter_summary().await.unwrap();
    assert_eq!(ctl.view_mode(), ViewMode::FinalSummary);

    assert_eq!(ctl.jump_to_group(0).await.unwrap(), Effect::Save);
    assert_eq!(ctl.view_mode(), ViewMode::AgeIntro);
    assert_eq!(ctl.position().skill_index, 0);
    assert_eq!(ctl.chapter_progress().to_string(), "1/1");

    let saved = ProgressBlob::decode(&store.load().await.unwrap().unwrap()).unwrap();
    assert_eq!(saved.view_mode, Some(ViewMode::AgeIntro));
    assert_eq!(saved.current_age_index, 0);
    assert!(saved.show_age_intro);

    let restarted = controller(&store).await;
    assert_eq!(restarted.view_mode(), ViewMode::AgeIntro);
    assert_eq!(restarted.overall_stats().completed, 3);
}

#[tokio::test]
async fn app_services_share_the_storage_with_the_controller() {
    let storage = Storage::in_memory();
    let mut services = AppServices::with_storage(storage, reference(), fixed_clock())
        .await
        .unwrap();
    services.controller_mut().mark_all_capable().await.unwrap();
    assert!(services.storage().progress.load().await.unwrap().is_some());
}

#[test]
fn reference_files_are_loaded_and_validated() {
    let dir = std::env::temp_dir().join(format!("skills-audit-ref-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let roster_path = dir.join("roster.json");
    std::fs::write(&roster_path, r#"{"people": ["Zoe"]}"#).unwrap();

    let data = ReferenceData::load(None, Some(&roster_path)).unwrap();
    assert_eq!(data.roster.people(), &[Person::from("Zoe")]);
    assert!(!data.catalog.is_empty());

    std::fs::write(&roster_path, r#"{"people": []}"#).unwrap();
    let err = ReferenceData::load(None, Some(&roster_path)).unwrap_err();
    assert!(matches!(err, ReferenceError::Roster(_)));

    let missing = dir.join("missing.json");
    let err = ReferenceData::load(Some(&missing), None).unwrap_err();
    assert!(matches!(err, ReferenceError::Io { .. }));

    std::fs::remove_dir_all(&dir).unwrap();
}
