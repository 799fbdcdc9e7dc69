//! Structured store: the raw outlet records as a JSON array.

use crate::error::SerializationError;
use crate::models::OutletRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const JSON_FILENAME: &str = "allsides.json";

fn write_raw(records: &[OutletRecord], json_output_dir: &Path) -> Result<PathBuf, SerializationError> {
    let json = serde_json::to_string(records)?;
    fs::create_dir_all(json_output_dir)?;
    let path = json_output_dir.join(JSON_FILENAME);
    fs::write(&path, json)?;
    Ok(path)
}

/// Write every record to `{json_output_dir}/allsides.json`.
///
/// Returns the written path, or `None` after logging a warning.
#[instrument(target = "main", level = "info", skip(records), fields(count = records.len()))]
pub fn persist_raw(records: &[OutletRecord], json_output_dir: &Path) -> Option<PathBuf> {
    match write_raw(records, json_output_dir) {
        Ok(path) => {
            info!(target: "main", path = %path.display(), "Saved scraped records to JSON");
            Some(path)
        }
        Err(e) => {
            warn!(target: "main", error = %e, "Error saving records to JSON");
            None
        }
    }
}

/// Read the structured store back.
///
/// A missing, unreadable, or malformed store is logged and reads as empty.
#[instrument(target = "main", level = "info")]
pub fn load_raw(path: &Path) -> Vec<OutletRecord> {
    let read = || -> Result<Vec<OutletRecord>, SerializationError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    };
    match read() {
        Ok(records) => {
            if records.is_empty() {
                warn!(target: "main", path = %path.display(), "No data in JSON file");
            }
            records
        }
        Err(e) => {
            warn!(target: "main", path = %path.display(), error = %e, "No data in JSON file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Agreeance;

    fn record(name: &str) -> OutletRecord {
        OutletRecord {
            name: name.to_string(),
            allsides_page: format!("https://www.allsides.com/news-source/{name}"),
            bias: "right".to_string(),
            agree: 3,
            disagree: 9,
            agree_ratio: 3.0 / 9.0,
            agreeance_text: Agreeance::StronglyDisagrees,
            news_page: format!("https://{name}.example"),
        }
    }

    #[test]
    fn test_persist_and_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record("b"), record("a")];

        let path = persist_raw(&records, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(JSON_FILENAME));
        assert_eq!(load_raw(&path), records);
    }

    #[test]
    fn test_persist_raw_uses_store_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = persist_raw(&[record("outlet")], dir.path()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["name"], "outlet");
        assert_eq!(first["bias"], "right");
        assert_eq!(first["agree"], 3);
        assert_eq!(first["disagree"], 9);
        assert_eq!(first["agreeance_text"], "strongly disagrees");
        assert_eq!(first["news_page"], "https://outlet.example");
    }

    #[test]
    fn test_persist_raw_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("JSON").join("nested");
        assert!(persist_raw(&[], &nested).is_some());
        assert_eq!(fs::read_to_string(nested.join(JSON_FILENAME)).unwrap(), "[]");
    }

    #[test]
    fn test_persist_raw_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        assert!(persist_raw(&[record("x")], &blocker).is_none());
    }

    #[test]
    fn test_load_raw_missing_or_malformed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_raw(&dir.path().join("missing.json")).is_empty());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{\"name\":").unwrap();
        assert!(load_raw(&bad).is_empty());
    }
}
