use std::sync::Arc;

use async_trait::async_trait;
use fretlog_core::history::HistoryLimit;
use fretlog_core::model::{AssignmentCatalog, DateKey};
use fretlog_core::time::fixed_clock;
use services::{PracticeService, PracticeServiceError, SnapshotError, export_snapshot, read_snapshot};
use storage::repository::{InMemoryRepository, PracticeLogRepository, StorageError};

fn date(raw: &str) -> DateKey {
    DateKey::from_raw(raw)
}

async fn service_on(repo: Arc<dyn PracticeLogRepository>) -> PracticeService {
    PracticeService::load(AssignmentCatalog::default_guitar(), repo)
        .await
        .unwrap()
}

#[tokio::test]
async fn mutations_survive_a_reload() {
    let repo = Arc::new(InMemoryRepository::new());

    let mut service = service_on(repo.clone()).await;
    service.set_completion(&date("2024-03-01"), 0, true).await.unwrap();
    service.set_memo(&date("2024-03-01"), 4, "thumb position").await.unwrap();
    service.set_completion(&date("2024-03-02"), 6, true).await.unwrap();
    drop(service);

    let reloaded = service_on(repo).await;
    let day = reloaded.day(&date("2024-03-01"));
    assert!(day.is_completed(0));
    assert_eq!(day.memo(4), "thumb position");
    assert_eq!(reloaded.stats(&date("2024-03-02")).completed, 1);
}

#[tokio::test]
async fn history_reflects_persisted_activity() {
    let repo = Arc::new(InMemoryRepository::new());

    let mut service = service_on(repo.clone()).await;
    for day in 1..=15 {
        service
            .set_completion(&date(&format!("2024-01-{day:02}")), 0, true)
            .await
            .unwrap();
    }
    drop(service);

    let reloaded = service_on(repo).await;
    let summary = reloaded.history(HistoryLimit::default());
    assert_eq!(summary.entries().len(), 10);
    assert_eq!(summary.entries()[0].date.as_str(), "2024-01-15");
    assert_eq!(summary.total_dates(), 15);
}

/// Repository whose writes are rejected for space, for surfacing checks.
#[derive(Clone, Default)]
struct FullRepository;

#[async_trait]
impl PracticeLogRepository for FullRepository {
    async fn load_document(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn save_document(&self, _document: &str) -> Result<(), StorageError> {
        Err(StorageError::Capacity)
    }
}

#[tokio::test]
async fn capacity_failure_is_surfaced_once_and_not_fatal() {
    let mut service = service_on(Arc::new(FullRepository)).await;

    let err = service
        .set_completion(&date("2024-03-01"), 0, true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PracticeServiceError::Storage(StorageError::Capacity)
    ));

    // State-first ordering: the in-memory mutation stands and reads keep
    // working after the failed persist.
    assert!(service.day(&date("2024-03-01")).is_completed(0));
}

#[tokio::test]
async fn export_then_import_replaces_the_whole_log() {
    let dir = tempfile::tempdir().unwrap();

    let repo_a = Arc::new(InMemoryRepository::new());
    let mut service_a = service_on(repo_a).await;
    service_a.set_completion(&date("2024-03-01"), 0, true).await.unwrap();
    service_a.set_memo(&date("2024-03-02"), 3, "legato").await.unwrap();

    let path = export_snapshot(service_a.log(), dir.path(), &fixed_clock())
        .await
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "guitar_homework_2023-11-14.json"
    );

    // A second tracker with unrelated data imports the snapshot.
    let repo_b = Arc::new(InMemoryRepository::new());
    let mut service_b = service_on(repo_b.clone()).await;
    service_b.set_completion(&date("2020-01-01"), 5, true).await.unwrap();

    let preview = read_snapshot(&path).await.unwrap();
    assert_eq!(preview.date_count(), 2);
    service_b.replace_all(preview.into_log()).await.unwrap();

    // Full overwrite, no merge: the old date is gone.
    assert!(service_b.day(&date("2020-01-01")).is_empty());
    assert!(service_b.day(&date("2024-03-01")).is_completed(0));
    assert_eq!(service_b.history(HistoryLimit::All).entries().len(), 2);

    // And the replacement was persisted.
    let reloaded = service_on(repo_b).await;
    assert_eq!(reloaded.log(), service_b.log());
}

#[tokio::test]
async fn malformed_snapshot_leaves_the_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let bad_path = dir.path().join("broken.json");
    tokio::fs::write(&bad_path, "{\"2024-03-01\": ").await.unwrap();

    let repo = Arc::new(InMemoryRepository::new());
    let mut service = service_on(repo.clone()).await;
    service.set_completion(&date("2024-03-01"), 1, true).await.unwrap();
    let before = repo.load_document().await.unwrap();

    let err = read_snapshot(&bad_path).await.unwrap_err();
    assert!(matches!(err, SnapshotError::Malformed(_)));

    // Byte-for-byte unchanged, in memory and in storage.
    assert_eq!(repo.load_document().await.unwrap(), before);
    assert!(service.day(&date("2024-03-01")).is_completed(1));
}

#[tokio::test]
async fn same_snapshot_file_can_be_read_twice() {
    let dir = tempfile::tempdir().unwrap();

    let repo = Arc::new(InMemoryRepository::new());
    let mut service = service_on(repo).await;
    service.set_completion(&date("2024-03-01"), 0, true).await.unwrap();

    let path = export_snapshot(service.log(), dir.path(), &fixed_clock())
        .await
        .unwrap();

    let first = read_snapshot(&path).await.unwrap();
    let second = read_snapshot(&path).await.unwrap();
    assert_eq!(first.date_count(), second.date_count());
    assert_eq!(first.into_log(), second.into_log());
}
