//! Append-only audit log.
//!
//! One event per line: `YYYY-MM-DD HH:MM:SS - <message>`. The file is only
//! ever opened in append mode for writing, so earlier lines are never
//! rewritten or reordered.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use farmdash_types::LogEntry;

use crate::error::{Error, Result};

/// Message recorded when the honeypot is touched without a known source.
pub const UNKNOWN_SOURCE: &str = "Unknown IP";

/// Line-oriented, append-only event log backed by a text file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a log handle. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event stamped with the current local time.
    ///
    /// Line breaks inside `event` are replaced by spaces so one event stays
    /// one line.
    pub fn append(&self, event: &str) -> Result<LogEntry> {
        let entry = LogEntry::now(event.replace(['\r', '\n'], " "));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;

        // Single write per line keeps concurrent appenders from interleaving.
        file.write_all(format!("{}\n", entry).as_bytes())
            .map_err(|e| Error::io(&self.path, e))?;

        debug!("Appended to {}: {}", self.path.display(), entry.message);
        Ok(entry)
    }

    /// The last `n` lines, oldest first, without line terminators.
    ///
    /// A missing file yields an empty list. At most `n` lines are held in
    /// memory at a time, and the window only grows as lines are read.
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let mut window = VecDeque::new();
        for line in BufReader::new(file).split(b'\n') {
            let line = line.map_err(|e| Error::io(&self.path, e))?;
            let text = String::from_utf8_lossy(&line);
            let text = text.strip_suffix('\r').unwrap_or(&text);

            if window.len() == n {
                window.pop_front();
            }
            window.push_back(text.to_string());
        }

        Ok(window.into())
    }

    /// The last `n` lines parsed into entries. Lines that do not follow the
    /// log format are skipped.
    pub fn tail_entries(&self, n: usize) -> Result<Vec<LogEntry>> {
        Ok(self
            .tail(n)?
            .iter()
            .filter_map(|line| LogEntry::parse_line(line).ok())
            .collect())
    }

    /// Record a touch on the decoy route.
    pub fn record_honeypot_access(&self, source: Option<&str>) -> Result<LogEntry> {
        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        self.append(&format!("Honeypot accessed from {}", source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, AuditLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("events.log"));
        (dir, log)
    }

    #[test]
    fn test_tail_missing_file_is_empty() {
        let (_dir, log) = temp_log();
        assert!(log.tail(5).unwrap().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn test_append_then_tail_one() {
        let (_dir, log) = temp_log();
        log.append("X").unwrap();

        let lines = log.tail(1).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("- X"));
        assert!(LogEntry::parse_line(&lines[0]).is_ok());
    }

    #[test]
    fn test_tail_returns_last_n_oldest_first() {
        let (_dir, log) = temp_log();
        for i in 1..=8 {
            log.append(&format!("event {}", i)).unwrap();
        }

        let messages: Vec<String> = log
            .tail_entries(3)
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["event 6", "event 7", "event 8"]);
    }

    #[test]
    fn test_tail_shorter_log() {
        let (_dir, log) = temp_log();
        log.append("only").unwrap();
        assert_eq!(log.tail(5).unwrap().len(), 1);
        assert!(log.tail(0).unwrap().is_empty());
    }

    #[test]
    fn test_tail_huge_count_returns_whole_log() {
        let (_dir, log) = temp_log();
        log.append("a").unwrap();
        log.append("b").unwrap();

        let lines = log.tail(usize::MAX).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("- a"));
        assert!(lines[1].ends_with("- b"));
    }

    #[test]
    fn test_append_never_truncates() {
        let (dir, _) = temp_log();
        let path = dir.path().join("events.log");
        fs::write(&path, "2024-01-01 00:00:00 - existing\n").unwrap();

        let log = AuditLog::new(&path);
        log.append("new").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("2024-01-01 00:00:00 - existing\n"));
        assert!(content.ends_with(" - new\n"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("a").join("b").join("events.log"));
        log.append("nested").unwrap();
        assert_eq!(log.tail(5).unwrap().len(), 1);
    }

    #[test]
    fn test_append_flattens_newlines() {
        let (_dir, log) = temp_log();
        log.append("line one\nline two").unwrap();

        let lines = log.tail(5).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("- line one line two"));
    }

    #[test]
    fn test_tail_handles_crlf_and_foreign_lines() {
        let (dir, _) = temp_log();
        let path = dir.path().join("events.log");
        fs::write(
            &path,
            "2024-01-01 00:00:00 - first\r\nnot a log line\n2024-01-01 00:00:01 - second\n",
        )
        .unwrap();

        let log = AuditLog::new(&path);
        let lines = log.tail(5).unwrap();
        assert_eq!(lines[0], "2024-01-01 00:00:00 - first");
        assert_eq!(lines.len(), 3);

        let entries = log.tail_entries(5).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].message, "second");
    }

    #[test]
    fn test_honeypot_access() {
        let (_dir, log) = temp_log();
        log.record_honeypot_access(Some("10.0.0.7")).unwrap();
        log.record_honeypot_access(None).unwrap();
        log.record_honeypot_access(Some("  ")).unwrap();

        let messages: Vec<String> = log
            .tail_entries(3)
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Honeypot accessed from 10.0.0.7",
                "Honeypot accessed from Unknown IP",
                "Honeypot accessed from Unknown IP",
            ]
        );
    }

    #[test]
    fn test_append_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();

        let log = AuditLog::new(blocker.join("events.log"));
        assert!(matches!(log.append("x"), Err(Error::Io { .. })));
    }
}
