//! JSON persistence of the fund collection.
//!
//! Reads and writes are kept apart from [`merge_record`], which is a pure
//! function over the in-memory collection. There is no locking: two
//! concurrent writers race and the last one wins.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::FundRecord;
use crate::errors::{Error, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    Added,
    Updated,
}

impl MergeOutcome {
    pub fn verb(self) -> &'static str {
        match self {
            MergeOutcome::Added => "added to",
            MergeOutcome::Updated => "updated in",
        }
    }
}

/// Replaces the record with the same id in place, or appends it.
pub fn merge_record(
    mut records: Vec<FundRecord>,
    record: FundRecord,
) -> (Vec<FundRecord>, MergeOutcome) {
    match records.iter().position(|existing| existing.id == record.id) {
        Some(index) => {
            records[index] = record;
            (records, MergeOutcome::Updated)
        }
        None => {
            records.push(record);
            (records, MergeOutcome::Added)
        }
    }
}

/// Loads the collection at `path`. A missing file is an empty collection; so
/// is a file that does not parse, after logging a warning.
pub fn load(path: &Path) -> Result<Vec<FundRecord>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(path, e)),
    };

    match parse_collection(path, &raw) {
        Ok(records) => Ok(records),
        Err(err) => {
            tracing::warn!("{err}; starting from an empty collection");
            Ok(Vec::new())
        }
    }
}

fn parse_collection(path: &Path, raw: &str) -> Result<Vec<FundRecord>> {
    serde_json::from_str(raw).map_err(|source| Error::MalformedPersistedFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the whole collection, creating the parent directory if needed.
pub fn save(path: &Path, records: &[FundRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Read-merge-write of a single record. Returns the outcome and the new
/// collection size.
pub fn persist_record(path: &Path, record: FundRecord) -> Result<(MergeOutcome, usize)> {
    let existing = load(path)?;
    let id = record.id.clone();
    let (records, outcome) = merge_record(existing, record);
    save(path, &records)?;
    tracing::info!(fund = %id, outcome = ?outcome, total = records.len(), "persisted fund");
    Ok((outcome, records.len()))
}
