// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local record storage.
//!
//! Each collection (clients, products, pending orders, ...) lives in its own
//! JSONL file under the store directory, one record per line. Writes replace
//! the whole file and are fsynced before returning.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

const EXTENSION: &str = "jsonl";

/// File-backed store of JSON records grouped by collection.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(LocalStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::InvalidCollection(collection.to_string()));
        }
        Ok(self.dir.join(format!("{collection}.{EXTENSION}")))
    }

    /// Reads every record of `collection`.
    ///
    /// A collection that was never written reads as empty. Blank lines are
    /// skipped.
    pub fn read_all(&self, collection: &str) -> Result<Vec<Value>> {
        let path = self.collection_path(collection)?;
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    /// Replaces the contents of `collection` with `records`.
    pub fn write_all(&self, collection: &str, records: &[Value]) -> Result<()> {
        let path = self.collection_path(collection)?;
        let mut file = File::create(&path)?;
        for record in records {
            writeln!(file, "{}", serde_json::to_string(record)?)?;
        }
        file.sync_all()?;
        tracing::debug!(collection, count = records.len(), "wrote collection");
        Ok(())
    }

    /// Next free identifier: one past the largest `id` in the collection, or
    /// 1 when it is empty. Records without a numeric id are ignored.
    ///
    /// Fails with [`Error::IdExhausted`] once a record holds `u64::MAX`.
    pub fn next_id(&self, collection: &str) -> Result<u64> {
        next_after(collection, &self.read_all(collection)?)
    }

    /// Appends `record` to `collection`, assigning the next id when it has
    /// none and replacing any record that already carries its id. Returns
    /// the record's id.
    pub fn insert(&self, collection: &str, mut record: Value) -> Result<u64> {
        let mut records = self.read_all(collection)?;
        let id = match record_id(&record) {
            Some(id) => id,
            None => {
                let next = next_after(collection, &records)?;
                match record.as_object_mut() {
                    Some(obj) => {
                        obj.insert("id".to_string(), Value::from(next));
                    }
                    None => {
                        return Err(Error::MissingRecordId {
                            collection: collection.to_string(),
                        })
                    }
                }
                next
            }
        };
        records.retain(|r| record_id(r) != Some(id));
        records.push(record);
        self.write_all(collection, &records)?;
        Ok(id)
    }
}

fn next_after(collection: &str, records: &[Value]) -> Result<u64> {
    let Some(max) = records.iter().filter_map(record_id).max() else {
        return Ok(1);
    };
    max.checked_add(1).ok_or_else(|| Error::IdExhausted {
        collection: collection.to_string(),
        max,
    })
}

/// The numeric `id` field of a record, if present.
pub fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
