//! JSON Lines stream runner
//!
//! Reads one legacy entry per line and writes one transform result per line.
//! Bad lines are reported and skipped so a single broken record does not stop
//! a migration run.

use super::MigrationError;
use super::models::LegacyEntry;
use super::transform::{RecordTransform, ZenodoRecordTransform};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Error on a single input line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineError {
    /// One-based line number
    pub line: usize,
    pub message: String,
}

/// Outcome of a stream run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use = "stream reports carry per-line errors that should be checked"]
pub struct StreamReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<LineError>,
}

impl StreamReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Transform one JSON line
pub fn transform_line(
    transform: &ZenodoRecordTransform,
    line: &str,
) -> Result<String, MigrationError> {
    let entry: LegacyEntry =
        serde_json::from_str(line).map_err(|e| MigrationError::ParseError(e.to_string()))?;
    let result = transform.transform(&entry)?;
    serde_json::to_string(&result).map_err(|e| MigrationError::SerializationError(e.to_string()))
}

/// Run the Zenodo transform over a JSON Lines stream
pub fn run<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<StreamReport, MigrationError> {
    let transform = ZenodoRecordTransform::new();
    let mut report = StreamReport::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let mut raw = raw.map_err(|e| MigrationError::IoError(e.to_string()))?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        report.processed += 1;

        let result = String::from_utf8(raw)
            .map_err(|e| MigrationError::ParseError(format!("Invalid UTF-8: {}", e)))
            .and_then(|line| transform_line(&transform, &line));
        match result {
            Ok(output) => {
                writeln!(writer, "{}", output).map_err(|e| MigrationError::IoError(e.to_string()))?;
                report.succeeded += 1;
            }
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                report.failed += 1;
                report.errors.push(LineError {
                    line: index + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    writer
        .flush()
        .map_err(|e| MigrationError::IoError(e.to_string()))?;
    info!(
        "Migrated {} of {} legacy records ({} failed)",
        report.succeeded, report.processed, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn legacy_line(recid: u64) -> String {
        json!({
            "created": "2023-01-31T10:00:00",
            "updated": "2023-01-31T10:00:00",
            "version_id": 1,
            "json": {
                "recid": recid,
                "conceptrecid": "1",
                "_oai": {"id": format!("oai:zenodo.org:{}", recid)},
                "access_right": "open",
                "title": "t",
                "description": "d",
                "publication_date": "2023-01-31",
                "resource_type": {"type": "image", "subtype": "photo"},
                "creators": [{"name": "Jane Doe"}]
            }
        })
        .to_string()
    }

    #[test]
    fn test_run_collects_line_errors() {
        let input = format!("{}\n\n{{not json}}\n{}\n", legacy_line(2), legacy_line(3));
        let mut output = Vec::new();
        let report = run(input.as_bytes(), &mut output).unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert!(!report.is_clean());
        assert_eq!(report.errors[0].line, 3);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["record"]["json"]["id"], json!("2"));
        assert_eq!(
            lines[1]["record"]["json"]["metadata"]["resource_type"]["id"],
            json!("image-photo")
        );
        assert_eq!(lines[0]["draft"], Value::Null);
    }

    #[test]
    fn test_run_reports_invalid_utf8_line() {
        let mut input = legacy_line(2).into_bytes();
        input.extend_from_slice(b"\n{\"bad\": \"\xff\xfe\"}\r\n");
        input.extend_from_slice(legacy_line(3).as_bytes());
        let mut output = Vec::new();
        let report = run(input.as_slice(), &mut output).unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors[0].line, 2);
        assert!(report.errors[0].message.contains("UTF-8"));
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 2);
    }
}
