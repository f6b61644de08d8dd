//! Shared repository utilities.
//!
//! Records are JSON files inside sharded directories derived from a canonical
//! 32-hex identifier: `<base_dir>/<s1>/<s2>/<id>/<record>.json`. This module
//! holds the directory allocation, read/write and scan primitives the
//! per-record services build on.

use crate::error::{PracticeError, PracticeResult};
use crate::uuid::ShardableUuid;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// Creates a unique sharded directory within the base records directory.
///
/// Generates identifiers using the provided source function and attempts to
/// create the corresponding sharded directory. Guards against identifier
/// collisions or pre-existing directories by retrying up to 5 times.
///
/// # Errors
///
/// Returns a `PracticeError::RecordDirCreation` if:
/// - directory creation fails after 5 attempts,
/// - parent directory creation fails.
pub(crate) fn create_unique_record_dir(
    base_dir: &Path,
    mut id_source: impl FnMut() -> ShardableUuid,
) -> PracticeResult<(ShardableUuid, PathBuf)> {
    for _attempt in 0..5 {
        let id = id_source();
        let candidate = id.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(PracticeError::RecordDirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((id, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(PracticeError::RecordDirCreation(e)),
        }
    }

    Err(PracticeError::RecordDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        "failed to allocate a unique record directory after 5 attempts",
    )))
}

/// Serializes `value` as pretty JSON into `path`.
pub(crate) fn write_json_record<T: Serialize>(path: &Path, value: &T) -> PracticeResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(PracticeError::Serialization)?;
    fs::write(path, json).map_err(PracticeError::FileWrite)
}

/// Reads and deserializes the JSON record at `path`.
pub(crate) fn read_json_record<T: DeserializeOwned>(path: &Path) -> PracticeResult<T> {
    let contents = fs::read_to_string(path).map_err(PracticeError::FileRead)?;
    serde_json::from_str(&contents).map_err(PracticeError::Deserialization)
}

/// Removes a record directory and everything in it.
pub(crate) fn remove_record_dir(dir: &Path) -> PracticeResult<()> {
    fs::remove_dir_all(dir).map_err(PracticeError::FileDelete)
}

/// Scans the sharded tree under `base_dir` for `filename` records.
///
/// Traverses the two shard levels and each record directory, reading and
/// deserializing every matching file. Records that cannot be read or parsed
/// are logged as warnings and skipped — one corrupt file must not take down a
/// listing. A missing `base_dir` yields an empty result.
///
/// Returns `(record_dir_name, value)` pairs; the directory name is the
/// record's canonical identifier.
pub(crate) fn scan_json_records<T: DeserializeOwned>(
    base_dir: &Path,
    filename: &str,
) -> Vec<(String, T)> {
    let mut records = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return records,
    };
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };
        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for id_ent in id_iter.flatten() {
                let id_path = id_ent.path();
                if !id_path.is_dir() {
                    continue;
                }

                let record_path = id_path.join(filename);
                if !record_path.is_file() {
                    continue;
                }

                match read_json_record::<T>(&record_path) {
                    Ok(value) => {
                        let id = id_path
                            .file_name()
                            .and_then(|os| os.to_str())
                            .unwrap_or("")
                            .to_string();
                        records.push((id, value));
                    }
                    Err(e) => {
                        tracing::warn!("skipping unreadable record {}: {e}", record_path.display());
                    }
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        label: String,
    }

    #[test]
    fn test_write_scan_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let (id, dir) = create_unique_record_dir(base, ShardableUuid::new).unwrap();
        write_json_record(
            &dir.join("sample.json"),
            &Sample {
                label: "first".into(),
            },
        )
        .unwrap();

        let records = scan_json_records::<Sample>(base, "sample.json");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, id.to_string());
        assert_eq!(records[0].1.label, "first");
    }

    #[test]
    fn test_scan_skips_corrupt_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let (_, good_dir) = create_unique_record_dir(base, ShardableUuid::new).unwrap();
        write_json_record(
            &good_dir.join("sample.json"),
            &Sample {
                label: "good".into(),
            },
        )
        .unwrap();

        let (_, bad_dir) = create_unique_record_dir(base, ShardableUuid::new).unwrap();
        fs::write(bad_dir.join("sample.json"), "{not json").unwrap();

        let records = scan_json_records::<Sample>(base, "sample.json");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.label, "good");
    }

    #[test]
    fn test_scan_of_missing_base_dir_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");
        assert!(scan_json_records::<Sample>(&missing, "sample.json").is_empty());
    }

    #[test]
    fn test_allocated_dirs_are_distinct() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let (id1, dir1) = create_unique_record_dir(base, ShardableUuid::new).unwrap();
        let (id2, dir2) = create_unique_record_dir(base, ShardableUuid::new).unwrap();

        assert_ne!(id1, id2);
        assert_ne!(dir1, dir2);
        assert!(dir1.is_dir());
        assert!(dir2.is_dir());
    }
}
