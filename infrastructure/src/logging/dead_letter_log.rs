//! JSONL file of undelivered lead notifications.
//!
//! Each [`DeadLetter`] is written as one JSON line with a `type` field and a
//! `timestamp`, appended through a buffered writer. The file is opened in
//! append mode so earlier runs are kept.

use blueprint_application::{DeadLetter, DeadLetterSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Record type written in every line.
pub const RECORD_TYPE: &str = "undelivered_lead";

/// Dead-letter sink appending to a JSONL file.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlDeadLetterLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDeadLetterLog {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create dead-letter directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open dead-letter file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeadLetterSink for JsonlDeadLetterLog {
    fn record(&self, letter: DeadLetter) {
        warn!(
            notifier = %letter.notifier,
            email = %letter.notification.email,
            "Undelivered lead notification written to {}: {}",
            self.path.display(),
            letter.error
        );

        let timestamp = letter
            .failed_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let record = match serde_json::to_value(&letter) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("failed_at");
                map.insert("type".to_string(), RECORD_TYPE.into());
                map.insert("timestamp".to_string(), timestamp.into());
                serde_json::Value::Object(map)
            }
            _ => return,
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlDeadLetterLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_domain::LeadNotification;

    fn letter(email: &str) -> DeadLetter {
        DeadLetter::new(
            "webhook",
            "Unexpected status 500: boom",
            LeadNotification {
                name: "Ava Chen".to_string(),
                email: email.to_string(),
                phone: "—".to_string(),
                firm: "—".to_string(),
                score: "64/100".to_string(),
                tier: "Moderate Readiness".to_string(),
                answers: "SCORE: 64/100 (Moderate Readiness)".to_string(),
            },
        )
    }

    #[test]
    fn test_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undelivered.jsonl");
        let log = JsonlDeadLetterLog::open(&path).unwrap();

        log.record(letter("a@example.com"));
        log.record(letter("b@example.com"));
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], RECORD_TYPE);
        assert_eq!(first["notifier"], "webhook");
        assert_eq!(first["notification"]["email"], "a@example.com");
        assert!(first["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(first.get("failed_at").is_none());
    }

    #[test]
    fn test_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("undelivered.jsonl");

        JsonlDeadLetterLog::open(&path)
            .unwrap()
            .record(letter("a@example.com"));
        JsonlDeadLetterLog::open(&path)
            .unwrap()
            .record(letter("b@example.com"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_open_fails_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlDeadLetterLog::open(blocker.join("undelivered.jsonl")).is_none());
    }
}
