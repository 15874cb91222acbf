//! Fixed-record data file accessor
//!
//! Records start at `0, record_size, 2 * record_size, ...` below the file
//! length. Every operation opens its own file handle and releases it before
//! returning; nothing is held open between calls.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::index::{BalancedIndex, RecordOffset};
use crate::schema::TableSchema;

use super::errors::{StorageError, StorageErrorCode, StorageResult};
use super::record::Record;

/// An index built from a data file, plus the records it had to leave out
#[derive(Debug, Default)]
pub struct IndexBuild {
    /// Value -> offset of the first well-formed record holding it
    pub index: BalancedIndex,
    /// One `MYDB_MALFORMED_RECORD` error per skipped slot, in file order
    pub skipped: Vec<StorageError>,
}

/// Read-only accessor for one table's data file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Path to `<table>.data`
    data_path: PathBuf,
    /// Fixed size of every record slot, in bytes
    record_size: u64,
    /// Tokens per record
    num_columns: usize,
}

impl RecordStore {
    /// Creates a store over `data_path`.
    ///
    /// The file is not opened until an operation needs it.
    pub fn new(
        data_path: impl Into<PathBuf>,
        record_size: u64,
        num_columns: usize,
    ) -> StorageResult<Self> {
        if record_size == 0 || num_columns == 0 {
            return Err(StorageError::invalid_layout(record_size, num_columns));
        }

        Ok(Self {
            data_path: data_path.into(),
            record_size,
            num_columns,
        })
    }

    /// Creates the store for `<data_dir>/<table>.data`.
    pub fn for_table(data_dir: &Path, schema: &TableSchema) -> StorageResult<Self> {
        Self::new(
            data_dir.join(format!("{}.data", schema.table_name())),
            schema.record_size(),
            schema.column_count(),
        )
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.data_path
    }

    /// Returns the record size in bytes.
    pub fn record_size(&self) -> u64 {
        self.record_size
    }

    /// Returns the number of columns per record.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    fn open(&self) -> StorageResult<(File, u64)> {
        let file = File::open(&self.data_path)
            .map_err(|e| StorageError::data_file_unavailable(self.data_path.display(), e))?;

        let file_len = file
            .metadata()
            .map_err(|e| StorageError::read_failed("Failed to read file metadata", e))?
            .len();

        Ok((file, file_len))
    }

    /// Number of record slots in the data file, counting a truncated tail.
    pub fn record_count(&self) -> StorageResult<u64> {
        let (_, file_len) = self.open()?;
        Ok(file_len.div_ceil(self.record_size))
    }

    /// Sequential scan over every record in file order.
    pub fn scan(&self) -> StorageResult<RecordScan> {
        let (file, file_len) = self.open()?;
        Ok(RecordScan {
            file,
            file_len,
            next_offset: 0,
            record_size: self.record_size,
            num_columns: self.num_columns,
        })
    }

    /// Builds an index over the column at the 0-based `column_ordinal`,
    /// mapping each value to the offset of the first record holding it.
    ///
    /// Malformed records are skipped and reported in `IndexBuild::skipped`;
    /// any other failure aborts the build.
    pub fn build_index(&self, column_ordinal: usize) -> StorageResult<IndexBuild> {
        if column_ordinal >= self.num_columns {
            return Err(StorageError::invalid_column(
                column_ordinal + 1,
                self.num_columns,
            ));
        }

        let mut build = IndexBuild::default();
        for record in self.scan()? {
            let record = match record {
                Ok(record) => record,
                Err(err) if err.code() == StorageErrorCode::MydbMalformedRecord => {
                    build.skipped.push(err);
                    continue;
                }
                Err(err) => return Err(err),
            };
            let offset = record.offset();
            if let Some(key) = record.into_value(column_ordinal) {
                build.index.insert(key, offset);
            }
        }

        Ok(build)
    }

    /// Reads the record starting at `offset`.
    pub fn get_record(&self, offset: RecordOffset) -> StorageResult<Record> {
        let (mut file, file_len) = self.open()?;

        if offset >= file_len {
            return Err(StorageError::invalid_offset(
                offset,
                format!("past end of file ({} bytes)", file_len),
            ));
        }
        if offset % self.record_size != 0 {
            return Err(StorageError::invalid_offset(
                offset,
                format!("not a multiple of record size {}", self.record_size),
            ));
        }

        read_slot(&mut file, offset, file_len, self.record_size, self.num_columns)
    }

    /// Collects the offset of every record whose value in the 1-based
    /// `column_number` equals `target` exactly, in file order.
    ///
    /// Fails on the first malformed record: a partial match set would
    /// read as a complete answer.
    pub fn linear_scan(
        &self,
        target: &str,
        column_number: usize,
    ) -> StorageResult<Vec<RecordOffset>> {
        if column_number == 0 || column_number > self.num_columns {
            return Err(StorageError::invalid_column(column_number, self.num_columns));
        }
        let ordinal = column_number - 1;

        let mut matches = Vec::new();
        for record in self.scan()? {
            let record = record?;
            if record.value(ordinal) == Some(target) {
                matches.push(record.offset());
            }
        }

        Ok(matches)
    }
}

/// Reads exactly one slot starting at `offset`; the final slot may be
/// shorter than `record_size` if the file is truncated.
fn read_slot(
    file: &mut File,
    offset: u64,
    file_len: u64,
    record_size: u64,
    num_columns: usize,
) -> StorageResult<Record> {
    file.seek(SeekFrom::Start(offset)).map_err(|e| {
        StorageError::read_failed(format!("Failed to seek to offset {}", offset), e)
    })?;

    let slot_len = record_size.min(file_len - offset) as usize;
    let mut slot = vec![0u8; slot_len];
    file.read_exact(&mut slot).map_err(|e| {
        StorageError::read_failed(format!("Failed to read record at offset {}", offset), e)
    })?;

    Record::parse(offset, &slot, num_columns)
}

/// Iterator over the records of a data file, in file order.
///
/// Each item is a bounded read of one slot; a malformed record yields an
/// error without affecting the position of the next one.
pub struct RecordScan {
    file: File,
    file_len: u64,
    next_offset: u64,
    record_size: u64,
    num_columns: usize,
}

impl Iterator for RecordScan {
    type Item = StorageResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset >= self.file_len {
            return None;
        }

        let offset = self.next_offset;
        self.next_offset = offset.saturating_add(self.record_size);

        Some(read_slot(
            &mut self.file,
            offset,
            self.file_len,
            self.record_size,
            self.num_columns,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RECORD_SIZE: u64 = 20;

    fn pad(record: &str) -> String {
        format!("{:<width$}", record, width = RECORD_SIZE as usize)
    }

    fn write_data(dir: &TempDir, records: &[&str]) -> PathBuf {
        let path = dir.path().join("t.data");
        let content: String = records.iter().map(|r| pad(r)).collect();
        fs::write(&path, content).unwrap();
        path
    }

    fn store(path: PathBuf) -> RecordStore {
        RecordStore::new(path, RECORD_SIZE, 2).unwrap()
    }

    #[test]
    fn test_zero_record_size_rejected() {
        let err = RecordStore::new("t.data", 0, 2).unwrap_err();
        assert_eq!(err.code().code(), "MYDB_INVALID_LAYOUT");
    }

    #[test]
    fn test_scan_in_file_order() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 alice", "2 bob", "3 carol"]));

        let offsets: Vec<u64> = store.scan().unwrap().map(|r| r.unwrap().offset()).collect();
        assert_eq!(offsets, vec![0, 20, 40]);
        assert_eq!(store.record_count().unwrap(), 3);
    }

    #[test]
    fn test_get_record() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 alice", "2 bob", "3 carol"]));

        let record = store.get_record(20).unwrap();
        assert_eq!(record.values(), &["2".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_get_record_invalid_offsets() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 alice", "2 bob"]));

        let past_end = store.get_record(40).unwrap_err();
        assert_eq!(past_end.code().code(), "MYDB_INVALID_OFFSET");

        let misaligned = store.get_record(5).unwrap_err();
        assert_eq!(misaligned.code().code(), "MYDB_INVALID_OFFSET");
    }

    #[test]
    fn test_build_index_first_occurrence_wins() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 bob", "2 alice", "3 bob"]));

        let build = store.build_index(1).unwrap();
        assert!(build.skipped.is_empty());
        let index = build.index;
        assert_eq!(index.size(), 2);
        assert_eq!(index.search("bob"), Some(&0));
        assert_eq!(index.search("alice"), Some(&20));
    }

    #[test]
    fn test_build_index_skips_malformed_records() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 alice", "2", "3 carol"]));

        let build = store.build_index(0).unwrap();
        assert_eq!(build.index.size(), 2);
        assert_eq!(build.index.search("1"), Some(&0));
        assert_eq!(build.index.search("3"), Some(&40));
        assert_eq!(build.index.search("2"), None);

        assert_eq!(build.skipped.len(), 1);
        assert_eq!(build.skipped[0].code().code(), "MYDB_MALFORMED_RECORD");
        assert_eq!(build.skipped[0].offset(), Some(20));

        // The scan still refuses to answer past a malformed record
        let err = store.linear_scan("alice", 2).unwrap_err();
        assert_eq!(err.offset(), Some(20));
    }

    #[test]
    fn test_linear_scan_returns_all_matches() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 bob", "2 alice", "3 bob"]));

        assert_eq!(store.linear_scan("bob", 2).unwrap(), vec![0, 40]);
        assert!(store.linear_scan("dave", 2).unwrap().is_empty());
    }

    #[test]
    fn test_linear_scan_column_out_of_range() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1 bob"]));

        assert_eq!(
            store.linear_scan("bob", 0).unwrap_err().code().code(),
            "MYDB_INVALID_COLUMN"
        );
        assert_eq!(
            store.linear_scan("bob", 3).unwrap_err().code().code(),
            "MYDB_INVALID_COLUMN"
        );
    }

    #[test]
    fn test_missing_data_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path().join("missing.data"));

        assert!(store.build_index(0).unwrap_err().is_unavailable());
        assert!(store.linear_scan("x", 1).unwrap_err().is_unavailable());
    }

    #[test]
    fn test_short_record_does_not_bleed_into_next() {
        let dir = TempDir::new().unwrap();
        let store = store(write_data(&dir, &["1", "2 bob"]));

        let err = store.get_record(0).unwrap_err();
        assert_eq!(err.code().code(), "MYDB_MALFORMED_RECORD");

        // The following record is still read from its own boundary
        let record = store.get_record(20).unwrap();
        assert_eq!(record.value(1), Some("bob"));
    }

    #[test]
    fn test_truncated_final_slot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.data");
        fs::write(&path, format!("{}3 carol", pad("1 alice"))).unwrap();
        let store = store(path);

        assert_eq!(store.record_count().unwrap(), 2);
        assert_eq!(store.get_record(20).unwrap().value(1), Some("carol"));
    }
}
