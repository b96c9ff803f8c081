/*!
 * Gantt Log
 * Append-only record of CPU occupancy intervals
 */

use crate::core::limits::{GANTT_IDLE_PID, GANTT_SWITCH_PID};
use crate::core::types::{Pid, SimulationResult, Tick};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// What held the CPU during a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pid", rename_all = "snake_case")]
pub enum Occupant {
    Process(Pid),
    Idle,
    ContextSwitch,
}

impl Occupant {
    /// Serialized occupant id: the pid, or a negative sentinel
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> i64 {
        match self {
            Self::Process(pid) => i64::from(*pid),
            Self::Idle => GANTT_IDLE_PID,
            Self::ContextSwitch => GANTT_SWITCH_PID,
        }
    }
}

/// Closed occupancy interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GanttSegment {
    pub occupant: Occupant,
    pub start: Tick,
    pub end: Tick,
}

impl GanttSegment {
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Chronological, non-overlapping occupancy history of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttLog {
    segments: Vec<GanttSegment>,
}

impl GanttLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `segments` entries, failing instead of aborting
    pub fn with_capacity(segments: usize) -> SimulationResult<Self> {
        let mut log = Self::new();
        log.segments.try_reserve(segments)?;
        Ok(log)
    }

    /// Append `[start, end)` for `occupant`
    ///
    /// Empty spans are dropped and an idle span directly following another
    /// idle span extends it.
    pub fn record(&mut self, occupant: Occupant, start: Tick, end: Tick) {
        if end <= start {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            debug_assert!(last.end <= start, "segments must not overlap");
            if occupant == Occupant::Idle && last.occupant == Occupant::Idle && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(GanttSegment {
            occupant,
            start,
            end,
        });
    }

    #[inline]
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments held by one process, in order
    pub fn segments_of(&self, pid: Pid) -> impl Iterator<Item = &GanttSegment> {
        self.segments
            .iter()
            .filter(move |s| s.occupant == Occupant::Process(pid))
    }

    /// Total ticks spent with `occupant` on the CPU
    #[must_use]
    pub fn time_for(&self, occupant: Occupant) -> Tick {
        self.segments
            .iter()
            .filter(|s| s.occupant == occupant)
            .map(GanttSegment::duration)
            .sum()
    }

    /// Write `PID,Start,End` CSV
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "PID,Start,End")?;
        for segment in &self.segments {
            writeln!(
                writer,
                "{},{},{}",
                segment.occupant.as_raw(),
                segment.start,
                segment.end
            )?;
        }
        writer.flush()
    }

    /// Write the CSV to `path`, replacing any existing file
    pub fn save_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }

    /// CSV as an in-memory string
    pub fn to_csv_string(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_drops_empty_and_coalesces_idle() {
        let mut log = GanttLog::new();
        log.record(Occupant::Idle, 0, 2);
        log.record(Occupant::Idle, 2, 5);
        log.record(Occupant::Process(1), 5, 5);
        log.record(Occupant::Process(1), 5, 7);
        log.record(Occupant::Process(1), 7, 9);

        assert_eq!(
            log.segments(),
            &[
                GanttSegment { occupant: Occupant::Idle, start: 0, end: 5 },
                GanttSegment { occupant: Occupant::Process(1), start: 5, end: 7 },
                GanttSegment { occupant: Occupant::Process(1), start: 7, end: 9 },
            ]
        );
        assert_eq!(log.time_for(Occupant::Process(1)), 4);
        assert_eq!(log.time_for(Occupant::Idle), 5);
    }

    #[test]
    fn test_csv_uses_sentinels() {
        let mut log = GanttLog::new();
        log.record(Occupant::Process(3), 0, 2);
        log.record(Occupant::ContextSwitch, 2, 3);
        log.record(Occupant::Idle, 3, 6);

        assert_eq!(log.to_csv_string().unwrap(), "PID,Start,End\n3,0,2\n-2,2,3\n-1,3,6\n");
    }

    #[test]
    fn test_with_capacity() {
        let log = GanttLog::with_capacity(64).unwrap();
        assert!(log.is_empty());
    }
}
