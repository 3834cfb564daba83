// src/store.rs

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::process::DailyRecord;

/// Write `records` as pretty-printed JSON at `path`, creating the parent
/// directories and replacing any previous file. The document is staged next
/// to the target and renamed into place, so a failed run never leaves a
/// partial file where the dashboards read.
pub async fn write_records(path: &Path, records: &[DailyRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|source| SyncError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|source| SyncError::Write {
            path: tmp_path.clone(),
            source,
        })?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|source| SyncError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = json.len(), "output replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_records() -> Vec<DailyRecord> {
        vec![
            DailyRecord {
                date: Some("2025-03-01".into()),
                services: 12,
                birthings: 9,
                nweaned: 102,
            },
            DailyRecord {
                date: None,
                services: 0,
                birthings: 1,
                nweaned: 0,
            },
        ]
    }

    #[tokio::test]
    async fn creates_directories_and_round_trips() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sitio1/data/dailymonitor_sitio1.json");
        let records = sample_records();

        write_records(&path, &records).await?;

        let raw = std::fs::read_to_string(&path)?;
        let parsed: Vec<DailyRecord> = serde_json::from_str(&raw)?;
        assert_eq!(parsed, records);
        Ok(())
    }

    #[tokio::test]
    async fn output_is_indented_with_keys_in_record_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_records(&path, &sample_records()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n"));
        let date_at = raw.find("\"date\"").unwrap();
        let services_at = raw.find("\"services\"").unwrap();
        assert!(date_at < services_at);
    }

    #[tokio::test]
    async fn replaces_a_previous_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale contents").unwrap();

        write_records(&path, &[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn leaves_no_staging_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_records(&path, &sample_records()).await.unwrap();

        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn non_ascii_text_is_written_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![DailyRecord {
            date: Some("año 2025, semana 9".into()),
            services: 1,
            birthings: 0,
            nweaned: 0,
        }];

        write_records(&path, &records).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("año 2025, semana 9"));
        assert!(!raw.contains("\\u"));
    }
}
