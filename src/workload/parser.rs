/*!
 * Workload Parser
 * Line-oriented process descriptions: `ID ARRIVAL BURST PRIORITY DEADLINE PERIOD [IO]`
 */

use crate::core::errors::WorkloadError;
use crate::core::types::Tick;
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

const MANDATORY_FIELDS: usize = 6;
const MAX_FIELDS: usize = 7;

/// A dropped input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Records read from an input plus the lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub records: Vec<ProcessRecord>,
    pub malformed: Vec<MalformedLine>,
}

impl ParseReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Parse a workload from text
///
/// Blank lines and `#` comments are ignored. Malformed lines are logged,
/// reported and skipped; they never abort the read.
pub fn parse_workload(input: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                warn!(line = index + 1, %reason, "skipping malformed workload line");
                report.malformed.push(MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        records = report.records.len(),
        malformed = report.malformed.len(),
        "workload parsed"
    );
    report
}

/// Read and parse a workload file
pub fn load_workload(path: impl AsRef<Path>) -> Result<ParseReport, WorkloadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| WorkloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_workload(&contents))
}

fn parse_line(line: &str) -> Result<ProcessRecord, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MANDATORY_FIELDS || fields.len() > MAX_FIELDS {
        return Err(format!(
            "expected {} or {} fields, found {}",
            MANDATORY_FIELDS,
            MAX_FIELDS,
            fields.len()
        ));
    }

    let pid = field(&fields, 0, "id")?;
    let arrival: Tick = field(&fields, 1, "arrival")?;
    let burst: Tick = field(&fields, 2, "burst")?;
    let priority = field(&fields, 3, "priority")?;
    let deadline = field(&fields, 4, "deadline")?;
    let period = field(&fields, 5, "period")?;
    let io = if fields.len() == MAX_FIELDS {
        field(&fields, 6, "io duration")?
    } else {
        0
    };

    if burst == 0 {
        return Err("burst must be at least 1".to_string());
    }

    Ok(ProcessRecord::new(pid, arrival, burst)
        .with_priority(priority)
        .with_deadline(deadline)
        .with_period(period)
        .with_io(io))
}

fn field<T: std::str::FromStr>(fields: &[&str], index: usize, name: &str) -> Result<T, String> {
    fields[index]
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, fields[index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let report = parse_workload("# id arr burst prio dl period\n\n1 0 5 2 20 0\n  \n2 3 4 1 15 0 6\n");
        assert!(report.is_clean());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].priority, 2);
        assert_eq!(report.records[0].io_burst_duration, 0);
        assert_eq!(report.records[1].io_burst_duration, 6);
    }

    #[test]
    fn test_parse_reports_malformed_lines() {
        let report = parse_workload("1 0 5 2 20\n2 0 x 1 10 0\n3 0 0 1 10 0\n4 0 1 1 10 0 1 9\n5 0 1 1 10 0\n");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].pid, 5);
        let lines: Vec<usize> = report.malformed.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert!(report.malformed[1].reason.contains("burst"));
    }

    #[test]
    fn test_negative_values_are_malformed() {
        let report = parse_workload("1 -2 5 1 10 0\n");
        assert!(report.records.is_empty());
        assert_eq!(report.malformed.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_workload("/no/such/workload.txt").unwrap_err();
        assert!(matches!(err, WorkloadError::Io { .. }));
    }
}
