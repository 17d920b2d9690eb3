use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rfslot_core::models::{
    ledger::SlotLedger,
    resource::{ResourceId, ResourceRegistry},
    slot::Slot,
};
use rfslot_db::{
    DataDir, open_data_dir,
    repositories::{
        FileLedgerRepository, FileMessageHandleRepository, FileRegistryRepository,
        LedgerRepository, MessageHandleRepository, RegistryRepository,
    },
    schema::{MESSAGE_HANDLE_FILE, RESOURCE_LIST_FILE, SLOT_LEDGER_FILE},
};
use serde_json::{Value, json};
use tempfile::TempDir;

fn rf(value: u32) -> ResourceId {
    ResourceId::new(value).expect("valid resource id")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).expect("valid date")
}

async fn data_dir() -> (TempDir, DataDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = open_data_dir(tmp.path().join("data")).await.expect("open data dir");
    (tmp, dir)
}

async fn read_json(dir: &DataDir, file: &str) -> Value {
    let bytes = tokio::fs::read(dir.document(file)).await.expect("read document");
    serde_json::from_slice(&bytes).expect("document is JSON")
}

#[tokio::test]
async fn test_open_data_dir_creates_directory() {
    let (_tmp, dir) = data_dir().await;
    assert!(dir.root().is_dir());
}

#[tokio::test]
async fn test_missing_documents_load_empty() {
    let (_tmp, dir) = data_dir().await;

    let registry = FileRegistryRepository::new(&dir).load().await.expect("load registry");
    let ledger = FileLedgerRepository::new(&dir).load().await.expect("load ledger");
    let handle = FileMessageHandleRepository::new(&dir).load().await.expect("load handle");

    assert_eq!(registry.size(), 0);
    assert!(ledger.is_empty());
    assert_eq!(handle, None);
}

#[tokio::test]
async fn test_registry_is_written_sorted() {
    let (_tmp, dir) = data_dir().await;
    let repo = FileRegistryRepository::new(&dir);

    let registry: ResourceRegistry = [rf(32), rf(4), rf(31)].into_iter().collect();
    repo.save(&registry).await.expect("save registry");

    assert_eq!(read_json(&dir, RESOURCE_LIST_FILE).await, json!({ "rf": [4, 31, 32] }));
    assert_eq!(repo.load().await.expect("reload"), registry);
}

#[tokio::test]
async fn test_ledger_document_schema() {
    let (_tmp, dir) = data_dir().await;
    let repo = FileLedgerRepository::new(&dir);

    let mut ledger = SlotLedger::new();
    ledger.place(day(20), Slot::new(rf(2), "09:05".parse().expect("time"), "Budi"));
    ledger.place(day(19), Slot::new(rf(31), "23:00".parse().expect("time"), "Lan"));
    repo.save(&ledger).await.expect("save ledger");

    assert_eq!(
        read_json(&dir, SLOT_LEDGER_FILE).await,
        json!({
            "2026-10-19": [{ "rf": 31, "time": "23:00", "name": "Lan" }],
            "2026-10-20": [{ "rf": 2, "time": "09:05", "name": "Budi" }],
        })
    );
    assert_eq!(repo.load().await.expect("reload"), ledger);
}

#[tokio::test]
async fn test_ledger_load_prunes_empty_days_and_defaults_holder() {
    let (_tmp, dir) = data_dir().await;
    tokio::fs::write(
        dir.document(SLOT_LEDGER_FILE),
        r#"{ "2026-10-18": [], "2026-10-19": [{ "rf": 7, "time": "10:00" }] }"#,
    )
    .await
    .expect("seed ledger");

    let ledger = FileLedgerRepository::new(&dir).load().await.expect("load ledger");

    assert_eq!(ledger.days().count(), 1);
    assert_eq!(ledger.slots_on(day(19))[0].holder, "Unknown");
}

#[tokio::test]
async fn test_corrupt_document_is_an_error_and_left_alone() {
    let (_tmp, dir) = data_dir().await;
    let path = dir.document(SLOT_LEDGER_FILE);
    tokio::fs::write(&path, "{ not json").await.expect("seed corrupt file");

    let result = FileLedgerRepository::new(&dir).load().await;

    assert!(result.is_err());
    assert_eq!(tokio::fs::read_to_string(&path).await.expect("read back"), "{ not json");
}

#[tokio::test]
async fn test_invalid_values_are_rejected_on_load() {
    let (_tmp, dir) = data_dir().await;
    tokio::fs::write(dir.document(RESOURCE_LIST_FILE), r#"{ "rf": [0, 3] }"#)
        .await
        .expect("seed registry");
    tokio::fs::write(
        dir.document(SLOT_LEDGER_FILE),
        r#"{ "2026-10-19": [{ "rf": 7, "time": "25:00", "name": "Lan" }] }"#,
    )
    .await
    .expect("seed ledger");

    assert!(FileRegistryRepository::new(&dir).load().await.is_err());
    assert!(FileLedgerRepository::new(&dir).load().await.is_err());
}

#[tokio::test]
async fn test_blank_document_loads_empty() {
    let (_tmp, dir) = data_dir().await;
    tokio::fs::write(dir.document(RESOURCE_LIST_FILE), "\n").await.expect("seed blank file");

    let registry = FileRegistryRepository::new(&dir).load().await.expect("load registry");
    assert_eq!(registry.size(), 0);
}

#[tokio::test]
async fn test_message_handle_is_overwritten() {
    let (_tmp, dir) = data_dir().await;
    let repo = FileMessageHandleRepository::new(&dir);

    repo.save(1_100_000_000_000_000_001).await.expect("save handle");
    repo.save(1_100_000_000_000_000_002).await.expect("overwrite handle");

    assert_eq!(repo.load().await.expect("load handle"), Some(1_100_000_000_000_000_002));
    assert_eq!(
        read_json(&dir, MESSAGE_HANDLE_FILE).await,
        json!({ "message_id": 1_100_000_000_000_000_002u64 })
    );
}

#[tokio::test]
async fn test_write_leaves_no_temp_file() {
    let (_tmp, dir) = data_dir().await;
    FileRegistryRepository::new(&dir)
        .save(&ResourceRegistry::new())
        .await
        .expect("save registry");

    let mut entries = tokio::fs::read_dir(dir.root()).await.expect("list dir");
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.expect("next entry") {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec![RESOURCE_LIST_FILE.to_string()]);
}
