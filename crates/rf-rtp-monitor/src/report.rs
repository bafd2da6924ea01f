//! Append-only RTP result log

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const LOG_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One finished verification run, as recorded in the result log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub timestamp: NaiveDateTime,
    pub engine_id: String,
    pub lines_played: i32,
    pub bet_per_line: i64,
    pub rtp: f32,
    /// Spin budget of the run
    pub spin_count: u32,
    pub bundle_version: String,
    pub checksum: String,
}

impl RunResult {
    /// The two log lines for this run, newline-terminated
    pub fn to_log_lines(&self) -> String {
        let stamp = self.timestamp.format(LOG_TIMESTAMP_FORMAT);
        format!(
            "{} {} \t(lines={}, bet={}) \tRTP: {:.6}. {} spins\n{} {} [jarVersion:{}, checksum:{}]\n",
            stamp,
            self.engine_id,
            self.lines_played,
            self.bet_per_line,
            self.rtp,
            self.spin_count,
            stamp,
            self.engine_id,
            self.bundle_version,
            self.checksum
        )
    }
}

/// Result log file; opened, appended and closed per record
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, result: &RunResult) -> crate::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(result.to_log_lines().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result(rtp: f32) -> RunResult {
        RunResult {
            timestamp: NaiveDate::from_ymd_opt(2024, 7, 3)
                .unwrap()
                .and_hms_opt(9, 5, 1)
                .unwrap(),
            engine_id: "lucky7".into(),
            lines_played: 20,
            bet_per_line: 5,
            rtp,
            spin_count: 1000,
            bundle_version: "0.1.0".into(),
            checksum: "abc123".into(),
        }
    }

    #[test]
    fn test_log_line_format() {
        assert_eq!(
            result(0.05).to_log_lines(),
            "03/07/2024 09:05:01 lucky7 \t(lines=20, bet=5) \tRTP: 0.050000. 1000 spins\n\
             03/07/2024 09:05:01 lucky7 [jarVersion:0.1.0, checksum:abc123]\n"
        );
    }

    #[test]
    fn test_nan_rtp_is_printed() {
        assert!(result(f32::NAN).to_log_lines().contains("RTP: NaN."));
    }

    #[test]
    fn test_append_keeps_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("rtp.out"));

        log.append(&result(0.5)).unwrap();
        log.append(&result(0.25)).unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().ends_with("RTP: 0.500000. 1000 spins"));
        assert!(text.lines().nth(2).unwrap().contains("RTP: 0.250000."));
    }

    #[test]
    fn test_append_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("missing").join("rtp.out"));
        assert!(matches!(log.append(&result(1.0)), Err(crate::MonitorError::Io(_))));
    }
}
