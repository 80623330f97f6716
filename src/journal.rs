//! JSONL run journal.
//!
//! Structured record of every automation run: one event per line, one
//! file per UTC day. Complements the tracing log stream — the journal is
//! what gets inspected after the fact.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Journal directory: `DROPSHIP_JOURNAL_DIR` when set, `./journal`
/// otherwise.
pub fn resolve_journal_dir() -> PathBuf {
    if let Ok(raw) = std::env::var("DROPSHIP_JOURNAL_DIR") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from("journal")
}

pub struct RunJournal {
    dir: PathBuf,
    day_key: String,
    file: File,
}

impl RunJournal {
    pub fn open(dir: PathBuf) -> std::io::Result<Self> {
        create_dir_all(&dir)?;
        let day_key = Utc::now().format("%Y-%m-%d").to_string();
        let file = Self::open_day_file(&dir, &day_key)?;
        Ok(Self { dir, day_key, file })
    }

    fn open_day_file(dir: &Path, day_key: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("runs-{}.jsonl", day_key)))
    }

    fn rotate_if_needed(&mut self) -> std::io::Result<()> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        if today != self.day_key {
            self.file = Self::open_day_file(&self.dir, &today)?;
            self.day_key = today;
        }
        Ok(())
    }

    /// Append one event. Journal failures never interrupt a run; they are
    /// logged and dropped.
    pub fn write_event(&mut self, event: serde_json::Value) {
        let result = (|| -> std::io::Result<()> {
            self.rotate_if_needed()?;
            let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
            writeln!(self.file, "{}", line)?;
            self.file.flush()?;
            Ok(())
        })();

        if let Err(e) = result {
            tracing::warn!("journal write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_journal_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dropship-bot-journal-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = temp_journal_dir("lines");
        let _ = std::fs::remove_dir_all(&dir);

        let mut journal = RunJournal::open(dir.clone()).unwrap();
        journal.write_event(json!({"kind": "run_start"}));
        journal.write_event(json!({"kind": "run_summary", "processed": 2}));

        let day_key = Utc::now().format("%Y-%m-%d").to_string();
        let content =
            std::fs::read_to_string(dir.join(format!("runs-{}.jsonl", day_key))).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("run_start"));
        assert!(lines[1].contains("\"processed\":2"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
