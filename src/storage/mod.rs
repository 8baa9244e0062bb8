//! Result storage collaborators.
//!
//! The recorder talks to a [`Storage`] trait; any backend satisfying the
//! contract (file, key-value store, relational table) is conformant. Two
//! implementations ship here: a Vec-backed [`MemoryStorage`] and a
//! JSON-lines [`JsonlStorage`] for the CLI. All backend failures surface as
//! [`SegError::Persistence`]; the caller's computed result survives them.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SegError, SegResult};
use crate::recorder::ComputationResult;

/// Identifier assigned by a storage backend on append.
pub type RecordId = i64;

/// A computation result as retained by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Backend-assigned id.
    pub id: RecordId,
    /// The immutable computation snapshot.
    #[serde(flatten)]
    pub result: ComputationResult,
}

/// Durable retention contract for computation results.
///
/// One append per successful computation; listing returns most recent
/// first. Deleting a missing id is a no-op; updating one is an error.
pub trait Storage {
    /// Append a result, returning its assigned id.
    fn append(&mut self, result: &ComputationResult) -> SegResult<RecordId>;

    /// All retained records, most recent first.
    fn list_all(&self) -> SegResult<Vec<StoredRecord>>;

    /// Look up a single record.
    fn get_by_id(&self, id: RecordId) -> SegResult<Option<StoredRecord>>;

    /// Overwrite both areas of an existing record.
    fn update(&mut self, id: RecordId, formula_area: f64, monte_carlo_area: f64) -> SegResult<()>;

    /// Remove one record if present.
    fn delete_by_id(&mut self, id: RecordId) -> SegResult<()>;

    /// Remove every record.
    fn delete_all(&mut self) -> SegResult<()>;
}

/// In-memory storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Vec<StoredRecord>,
    next_id: RecordId,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn append(&mut self, result: &ComputationResult) -> SegResult<RecordId> {
        self.next_id += 1;
        let id = self.next_id;
        self.records.push(StoredRecord {
            id,
            result: result.clone(),
        });
        Ok(id)
    }

    fn list_all(&self) -> SegResult<Vec<StoredRecord>> {
        Ok(self.records.iter().rev().cloned().collect())
    }

    fn get_by_id(&self, id: RecordId) -> SegResult<Option<StoredRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn update(&mut self, id: RecordId, formula_area: f64, monte_carlo_area: f64) -> SegResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SegError::RecordNotFound(id))?;
        record.result.formula_area = formula_area;
        record.result.monte_carlo_area = monte_carlo_area;
        Ok(())
    }

    fn delete_by_id(&mut self, id: RecordId) -> SegResult<()> {
        self.records.retain(|r| r.id != id);
        Ok(())
    }

    fn delete_all(&mut self) -> SegResult<()> {
        self.records.clear();
        Ok(())
    }
}

/// File-backed storage: one JSON object per line.
///
/// Appends go straight to the end of the file; mutations rewrite it.
#[derive(Debug, Clone)]
pub struct JsonlStorage {
    path: PathBuf,
}

impl JsonlStorage {
    /// Open (or lazily create on first append) a store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SegResult<Vec<StoredRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| SegError::persistence(e.to_string()))?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| SegError::persistence(e.to_string()))
            })
            .collect()
    }

    fn rewrite(&self, records: &[StoredRecord]) -> SegResult<()> {
        let mut buffer = String::new();
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| SegError::persistence(e.to_string()))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }
        fs::write(&self.path, buffer).map_err(|e| SegError::persistence(e.to_string()))
    }
}

impl Storage for JsonlStorage {
    fn append(&mut self, result: &ComputationResult) -> SegResult<RecordId> {
        let id = self
            .load()?
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;
        let record = StoredRecord {
            id,
            result: result.clone(),
        };
        let line =
            serde_json::to_string(&record).map_err(|e| SegError::persistence(e.to_string()))?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SegError::persistence(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| SegError::persistence(e.to_string()))?;
        Ok(id)
    }

    fn list_all(&self) -> SegResult<Vec<StoredRecord>> {
        Ok(self.load()?.into_iter().rev().collect())
    }

    fn get_by_id(&self, id: RecordId) -> SegResult<Option<StoredRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    fn update(&mut self, id: RecordId, formula_area: f64, monte_carlo_area: f64) -> SegResult<()> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SegError::RecordNotFound(id))?;
        record.result.formula_area = formula_area;
        record.result.monte_carlo_area = monte_carlo_area;
        self.rewrite(&records)
    }

    fn delete_by_id(&mut self, id: RecordId) -> SegResult<()> {
        let mut records = self.load()?;
        records.retain(|r| r.id != id);
        self.rewrite(&records)
    }

    fn delete_all(&mut self) -> SegResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| SegError::persistence(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, CutLine};

    fn sample_result(tag: f64) -> ComputationResult {
        ComputationResult {
            circle: Circle::new(0.0, 0.0, 3.0),
            cut: CutLine::vertical(1.0),
            samples: 20_000,
            formula_area: 20.0241 + tag,
            monte_carlo_area: 20.0 + tag,
            recorded_at: format!("2026-08-29 12:00:0{}", tag as u8),
        }
    }

    #[test]
    fn test_memory_append_and_list_order() {
        let mut storage = MemoryStorage::new();
        let a = storage.append(&sample_result(0.0)).unwrap();
        let b = storage.append(&sample_result(1.0)).unwrap();
        assert!(b > a);

        let listed = storage.list_all().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b, "most recent first");
        assert_eq!(listed[1].id, a);
    }

    #[test]
    fn test_memory_get_update_delete() {
        let mut storage = MemoryStorage::new();
        let id = storage.append(&sample_result(0.0)).unwrap();

        storage.update(id, 1.5, 2.5).unwrap();
        let record = storage.get_by_id(id).unwrap().unwrap();
        assert!((record.result.formula_area - 1.5).abs() < f64::EPSILON);
        assert!((record.result.monte_carlo_area - 2.5).abs() < f64::EPSILON);

        storage.delete_by_id(id).unwrap();
        assert!(storage.get_by_id(id).unwrap().is_none());
        // Deleting again is a no-op.
        storage.delete_by_id(id).unwrap();
    }

    #[test]
    fn test_memory_update_missing_errors() {
        let mut storage = MemoryStorage::new();
        let err = storage.update(99, 1.0, 2.0).unwrap_err();
        assert!(matches!(err, SegError::RecordNotFound(99)));
    }

    #[test]
    fn test_memory_delete_all() {
        let mut storage = MemoryStorage::new();
        storage.append(&sample_result(0.0)).unwrap();
        storage.append(&sample_result(1.0)).unwrap();
        storage.delete_all().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_jsonl_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonlStorage::new(dir.path().join("results.jsonl"));

        let a = storage.append(&sample_result(0.0)).unwrap();
        let b = storage.append(&sample_result(1.0)).unwrap();
        assert_eq!((a, b), (1, 2));

        let listed = storage.list_all().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b, "most recent first");

        let record = storage.get_by_id(a).unwrap().unwrap();
        assert_eq!(record.result.samples, 20_000);
        assert_eq!(record.result.recorded_at, "2026-08-29 12:00:00");
    }

    #[test]
    fn test_jsonl_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonlStorage::new(dir.path().join("results.jsonl"));

        let id = storage.append(&sample_result(0.0)).unwrap();
        storage.update(id, 3.0, 4.0).unwrap();

        let record = storage.get_by_id(id).unwrap().unwrap();
        assert!((record.result.formula_area - 3.0).abs() < f64::EPSILON);

        storage.delete_by_id(id).unwrap();
        assert!(storage.list_all().unwrap().is_empty());

        let err = storage.update(id, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, SegError::RecordNotFound(_)));
    }

    #[test]
    fn test_jsonl_ids_continue_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");

        let mut storage = JsonlStorage::new(&path);
        storage.append(&sample_result(0.0)).unwrap();
        drop(storage);

        let mut reopened = JsonlStorage::new(&path);
        let id = reopened.append(&sample_result(1.0)).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_jsonl_empty_file_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonlStorage::new(dir.path().join("absent.jsonl"));
        assert!(storage.list_all().unwrap().is_empty());
        assert!(storage.get_by_id(1).unwrap().is_none());
    }

    #[test]
    fn test_jsonl_corrupt_line_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");
        fs::write(&path, "not json\n").unwrap();

        let storage = JsonlStorage::new(&path);
        let err = storage.list_all().unwrap_err();
        assert!(matches!(err, SegError::Persistence(_)));
    }
}
