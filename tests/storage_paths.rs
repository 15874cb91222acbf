//! Storage Access Path Tests
//!
//! Tests that the two ways of answering a predicate agree:
//! - Index build + search returns the first offset holding a value
//! - Linear scan returns every offset holding a value, in file order
//! - Record reads never cross a record boundary

use mydb::index::{IndexSet, RecordOffset};
use mydb::schema::TableSchema;
use mydb::storage::{RecordStore, StorageErrorCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RECORD_SIZE: u64 = 24;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_records(dir: &Path, table: &str, records: &[String]) {
    let content: String = records
        .iter()
        .map(|r| format!("{:<width$}", r, width = RECORD_SIZE as usize))
        .collect();
    fs::write(dir.join(format!("{}.data", table)), content).unwrap();
}

fn schema() -> TableSchema {
    TableSchema::new("people", RECORD_SIZE, [("id", true), ("city", true), ("age", false)])
}

fn expected_offsets(values: &[String], target: &str) -> Vec<RecordOffset> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_str() == target)
        .map(|(i, _)| i as u64 * RECORD_SIZE)
        .collect()
}

// =============================================================================
// Index vs Scan Agreement
// =============================================================================

/// Unique values: index and scan return the same single offset.
#[test]
fn test_unique_values_agree() {
    let dir = TempDir::new().unwrap();
    let records: Vec<String> = (0..50).map(|i| format!("{} c{} {}", i, i % 7, 20 + i)).collect();
    write_records(dir.path(), "people", &records);

    let schema = schema();
    let store = RecordStore::for_table(dir.path(), &schema).unwrap();
    let index = store.build_index(0).unwrap().index;

    for i in 0..50 {
        let key = i.to_string();
        let scanned = store.linear_scan(&key, 1).unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(index.search(key.as_str()), Some(&scanned[0]));
    }
    assert_eq!(index.size(), 50);
}

/// Repeated values: index keeps the first occurrence, scan returns all.
#[test]
fn test_repeated_values_first_occurrence() {
    let mut rng = StdRng::seed_from_u64(3);
    let dir = TempDir::new().unwrap();

    let cities: Vec<String> = (0..80).map(|_| format!("c{}", rng.gen_range(0..6))).collect();
    let records: Vec<String> = cities
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {} {}", i, c, 30))
        .collect();
    write_records(dir.path(), "people", &records);

    let schema = schema();
    let store = RecordStore::for_table(dir.path(), &schema).unwrap();
    let indexes = IndexSet::build(&schema, &store);

    for city in 0..6 {
        let target = format!("c{}", city);
        let expected = expected_offsets(&cities, &target);

        assert_eq!(store.linear_scan(&target, 2).unwrap(), expected);
        assert_eq!(indexes.lookup("city", &target), expected.first().copied());
    }
}

/// Unindexed columns have no index but are still scannable.
#[test]
fn test_unindexed_column_scan_only() {
    let dir = TempDir::new().unwrap();
    let records: Vec<String> = vec!["1 rome 30".into(), "2 oslo 41".into(), "3 rome 30".into()];
    write_records(dir.path(), "people", &records);

    let schema = schema();
    let store = RecordStore::for_table(dir.path(), &schema).unwrap();
    let indexes = IndexSet::build(&schema, &store);

    assert!(!indexes.is_indexed("age"));
    assert_eq!(indexes.lookup("age", "30"), None);
    assert_eq!(store.linear_scan("30", 3).unwrap(), vec![0, 2 * RECORD_SIZE]);
}

// =============================================================================
// Bounded Reads
// =============================================================================

/// NUL padding separates tokens like spaces do.
#[test]
fn test_nul_padded_records() {
    let dir = TempDir::new().unwrap();
    let mut content = Vec::new();
    for record in ["1 rome 30", "2 oslo 41"] {
        let mut slot = record.as_bytes().to_vec();
        slot.resize(RECORD_SIZE as usize, 0);
        content.extend(slot);
    }
    fs::write(dir.path().join("people.data"), content).unwrap();

    let store = RecordStore::for_table(dir.path(), &schema()).unwrap();
    let record = store.get_record(RECORD_SIZE).unwrap();
    assert_eq!(record.values(), &["2", "oslo", "41"]);
}

/// A record with too few tokens fails with its own offset.
#[test]
fn test_malformed_record_reports_offset() {
    let dir = TempDir::new().unwrap();
    write_records(dir.path(), "people", &["1 rome 30".into(), "2 oslo".into()]);

    let store = RecordStore::for_table(dir.path(), &schema()).unwrap();

    let err = store.linear_scan("rome", 2).unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::MydbMalformedRecord);
    assert_eq!(err.offset(), Some(RECORD_SIZE));

    // The well-formed record is still readable on its own
    assert_eq!(store.get_record(0).unwrap().value(1), Some("rome"));
}

/// The index build leaves malformed records out and keeps the rest; values
/// occurring once still agree with a read of their own record.
#[test]
fn test_index_build_skips_malformed_record() {
    let dir = TempDir::new().unwrap();
    write_records(
        dir.path(),
        "people",
        &["1 rome 30".into(), "2 oslo".into(), "3 lima 52".into()],
    );

    let schema = schema();
    let store = RecordStore::for_table(dir.path(), &schema).unwrap();
    let indexes = IndexSet::build(&schema, &store);

    assert_eq!(indexes.degraded().count(), 0);
    for index in &indexes {
        assert_eq!(index.skipped().len(), 1);
        assert_eq!(index.skipped()[0].offset(), Some(RECORD_SIZE));
    }

    let offset = indexes.lookup("id", "3").unwrap();
    assert_eq!(offset, 2 * RECORD_SIZE);
    assert_eq!(store.get_record(offset).unwrap().value(1), Some("lima"));
    assert_eq!(indexes.lookup("id", "2"), None);
}

/// Non-UTF-8 bytes make the record malformed instead of panicking.
#[test]
fn test_invalid_utf8_record() {
    let dir = TempDir::new().unwrap();
    let mut content = vec![0xffu8, 0xfe, b' ', b'a', b' ', b'1'];
    content.resize(RECORD_SIZE as usize, b' ');
    fs::write(dir.path().join("people.data"), content).unwrap();

    let store = RecordStore::for_table(dir.path(), &schema()).unwrap();
    let err = store.get_record(0).unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::MydbMalformedRecord);
}

/// An empty data file yields empty indexes, not errors.
#[test]
fn test_empty_data_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("people.data"), b"").unwrap();

    let schema = schema();
    let store = RecordStore::for_table(dir.path(), &schema).unwrap();
    let indexes = IndexSet::build(&schema, &store);

    assert_eq!(indexes.degraded().count(), 0);
    for index in &indexes {
        assert_eq!(index.tree().size(), 0);
        assert_eq!(index.tree().height(), -1);
    }
    assert!(store.linear_scan("1", 1).unwrap().is_empty());
}
