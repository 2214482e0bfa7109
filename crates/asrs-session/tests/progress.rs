mod common;

use std::sync::Arc;

use asrs_core::storage_keys;
use asrs_session::progress::{is_fresh, ProgressStore, STALENESS_WINDOW_MS};
use asrs_session::writer::ProgressWriter;
use asrs_storage::{KeyValueStore, MemoryStore};
use common::{hours_before, session, BrokenStore, HOUR_MS};

#[tokio::test]
async fn saved_progress_loads_back() {
    let progress = ProgressStore::new(MemoryStore::new());
    let now = jiff::Timestamp::now();
    let saved = session(4, &[(1, 2), (3, 4)]);

    progress.save_at(&saved, hours_before(now, 1)).await;
    let loaded = progress.load_at(now).await.expect("fresh record");

    assert_eq!(loaded.current_index, 4);
    assert_eq!(loaded.answers, saved.answers);
    assert_eq!(loaded.saved_at, Some(hours_before(now, 1)));
}

#[tokio::test]
async fn missing_record_loads_as_none() {
    let progress = ProgressStore::new(MemoryStore::new());
    assert!(progress.load().await.is_none());
}

#[tokio::test]
async fn record_older_than_a_day_is_ignored() {
    let progress = ProgressStore::new(MemoryStore::new());
    let now = jiff::Timestamp::now();

    progress.save_at(&session(2, &[(1, 1)]), hours_before(now, 25)).await;
    assert!(progress.load_at(now).await.is_none());
}

#[test]
fn staleness_boundary_is_exclusive() {
    let now = jiff::Timestamp::from_second(1_700_000_000).unwrap();
    let edge = jiff::Timestamp::from_millisecond(now.as_millisecond() - STALENESS_WINDOW_MS).unwrap();
    let just_inside =
        jiff::Timestamp::from_millisecond(now.as_millisecond() - STALENESS_WINDOW_MS + 1).unwrap();

    assert!(!is_fresh(edge, now));
    assert!(is_fresh(just_inside, now));
    assert!(is_fresh(now, now));
    assert_eq!(STALENESS_WINDOW_MS, 24 * HOUR_MS);
}

#[tokio::test]
async fn future_dated_record_counts_as_fresh() {
    let progress = ProgressStore::new(MemoryStore::new());
    let now = jiff::Timestamp::now();
    let ahead = jiff::Timestamp::from_millisecond(now.as_millisecond() + HOUR_MS).unwrap();

    progress.save_at(&session(1, &[(2, 2)]), ahead).await;
    assert!(progress.load_at(now).await.is_some());
}

#[tokio::test]
async fn unreadable_records_load_as_none() {
    let store = MemoryStore::new();
    let progress = ProgressStore::new(store.clone());
    let now = jiff::Timestamp::now();
    let saved_at = now.to_string();

    let bad_bodies = [
        "not json".to_string(),
        format!(r#"{{"record_version":1,"current_index":2,"answers":{{"1":9}},"saved_at":"{saved_at}"}}"#),
        format!(r#"{{"record_version":1,"current_index":2,"answers":{{"25":1}},"saved_at":"{saved_at}"}}"#),
        format!(r#"{{"record_version":1,"current_index":18,"answers":{{}},"saved_at":"{saved_at}"}}"#),
        format!(r#"{{"record_version":2,"current_index":0,"answers":{{}},"saved_at":"{saved_at}"}}"#),
        r#"{"record_version":1,"current_index":0,"answers":{}}"#.to_string(),
    ];

    for body in bad_bodies {
        store
            .set(storage_keys::PROGRESS, body.clone().into_bytes())
            .await
            .unwrap();
        assert!(progress.load_at(now).await.is_none(), "accepted {body}");
    }
}

#[tokio::test]
async fn legacy_record_is_migrated() {
    let store = MemoryStore::new();
    let progress = ProgressStore::new(store.clone());
    let now = jiff::Timestamp::now();
    let written = hours_before(now, 2).as_millisecond();

    let legacy = serde_json::json!({
        "currentQuestion": 7,
        "answers": { "1": 2, "2": 4, "8": 0 },
        "timestamp": written,
    });
    store
        .set(storage_keys::PROGRESS, serde_json::to_vec(&legacy).unwrap())
        .await
        .unwrap();

    let loaded = progress.load_at(now).await.expect("legacy record migrates");
    assert_eq!(loaded.current_index, 7);
    assert_eq!(loaded.answers, common::answers(&[(1, 2), (2, 4), (8, 0)]));
    assert_eq!(loaded.saved_at.map(|t| t.as_millisecond()), Some(written));
}

#[tokio::test]
async fn stale_legacy_record_is_ignored() {
    let store = MemoryStore::new();
    let progress = ProgressStore::new(store.clone());
    let now = jiff::Timestamp::now();

    let legacy = serde_json::json!({
        "currentQuestion": 1,
        "answers": { "1": 2 },
        "timestamp": hours_before(now, 30).as_millisecond(),
    });
    store
        .set(storage_keys::PROGRESS, serde_json::to_vec(&legacy).unwrap())
        .await
        .unwrap();

    assert!(progress.load_at(now).await.is_none());
}

#[tokio::test]
async fn clear_removes_the_record() {
    let store = MemoryStore::new();
    let progress = ProgressStore::new(store.clone());

    progress.save(&session(0, &[(1, 1)])).await;
    assert!(store.contains(storage_keys::PROGRESS).await);

    progress.clear().await;
    assert!(!store.contains(storage_keys::PROGRESS).await);
    assert!(progress.load().await.is_none());
}

#[tokio::test]
async fn storage_failures_are_absorbed() {
    let progress = ProgressStore::new(BrokenStore);
    progress.save(&session(0, &[(1, 1)])).await;
    progress.clear().await;
    assert!(progress.load().await.is_none());
}

#[tokio::test]
async fn custom_key_is_used() {
    let store = MemoryStore::new();
    let progress = ProgressStore::with_key(store.clone(), "asrs/other.json");
    progress.save(&session(0, &[(1, 1)])).await;

    assert_eq!(progress.key(), "asrs/other.json");
    assert!(store.contains("asrs/other.json").await);
    assert!(!store.contains(storage_keys::PROGRESS).await);
}

#[tokio::test]
async fn writer_applies_commands_in_order() {
    let store = MemoryStore::new();
    let progress = Arc::new(ProgressStore::new(store.clone()));
    let (writer, _task) = ProgressWriter::spawn(Arc::clone(&progress));

    writer.save(session(0, &[(1, 1)]));
    writer.save(session(3, &[(1, 1), (2, 4)]));
    writer.flush().await;

    let latest = progress.load().await.expect("latest save persisted");
    assert_eq!(latest.current_index, 3);
    assert_eq!(latest.answers.len(), 2);

    writer.save(session(5, &[(1, 1)]));
    writer.clear();
    writer.flush().await;
    assert!(!store.contains(storage_keys::PROGRESS).await);
}

#[tokio::test]
async fn writer_stops_when_handles_drop() {
    let progress = Arc::new(ProgressStore::new(MemoryStore::new()));
    let (writer, task) = ProgressWriter::spawn(progress);
    writer.save(session(0, &[(1, 1)]));
    drop(writer);
    task.await.expect("writer task exits cleanly");
}

#[tokio::test]
async fn writer_survives_broken_store() {
    let (writer, _task) = ProgressWriter::spawn(Arc::new(ProgressStore::new(BrokenStore)));
    writer.save(session(0, &[(1, 1)]));
    writer.clear();
    writer.flush().await;
}

#[tokio::test]
async fn record_version_beyond_u32_is_rejected() {
    let store = MemoryStore::new();
    let progress = ProgressStore::new(store.clone());
    let now = jiff::Timestamp::now();

    let record = serde_json::json!({
        "record_version": 4_294_967_296u64,
        "current_index": 2,
        "answers": { "1": 2 },
        "saved_at": now.to_string(),
    });
    store
        .set(storage_keys::PROGRESS, serde_json::to_vec(&record).unwrap())
        .await
        .unwrap();

    assert!(progress.load_at(now).await.is_none());
}
