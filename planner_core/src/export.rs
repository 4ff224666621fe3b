//! Schedule export (CSV, JSON, plain text).

use crate::{Result, Schedule};
use std::fmt::Write as _;
use std::io::Write;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    position: usize,
    index: usize,
    exercise_id: u32,
    sets: u32,
    reps: u32,
    estimated_seconds: u32,
    score: f64,
}

/// Write one CSV row per scheduled exercise, with a header
pub fn write_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if schedule.is_empty() {
        csv_writer.write_record([
            "position",
            "index",
            "exercise_id",
            "sets",
            "reps",
            "estimated_seconds",
            "score",
        ])?;
    }

    for (position, entry) in schedule.entries.iter().enumerate() {
        csv_writer.serialize(CsvRow {
            position: position + 1,
            index: entry.index,
            exercise_id: entry.exercise_id,
            sets: entry.sets,
            reps: entry.reps,
            estimated_seconds: entry.estimated_seconds,
            score: entry.score,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the full schedule as pretty JSON
pub fn write_json<W: Write>(schedule: &Schedule, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, schedule)?;
    writeln!(writer)?;
    Ok(())
}

/// Human-readable table
pub fn render_text(schedule: &Schedule) -> String {
    let mut out = String::new();

    if schedule.is_empty() {
        let _ = writeln!(out, "No exercises scheduled ({:?}).", schedule.stop_reason);
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3}  {:>5}  {:>6}  {:>9}  {:>6}  {:>7}",
        "#", "index", "id", "sets×reps", "time", "score"
    );
    for (position, entry) in schedule.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>5}  {:>6}  {:>9}  {:>5}s  {:>7.1}",
            position + 1,
            entry.index,
            entry.exercise_id,
            format!("{}×{}", entry.sets, entry.reps),
            entry.estimated_seconds,
            entry.score
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Work: {}s of {}s budget ({}s warmup/cooldown reserved)",
        schedule.total_estimated_seconds(),
        schedule.time_budget_seconds,
        schedule.reserve_seconds
    );
    let _ = writeln!(
        out,
        "Muscles covered: {}  Stopped: {:?}",
        schedule.coverage.len(),
        schedule.stop_reason
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Prescription, ScheduledEntry, StopReason};
    use crate::{GoalSet, MuscleSet};

    fn schedule(entries: Vec<ScheduledEntry>) -> Schedule {
        Schedule {
            entries,
            prescription: Prescription::for_goals(GoalSet::STRENGTH),
            reserve_seconds: 300,
            time_budget_seconds: 1500,
            time_remaining_seconds: 1200,
            coverage: MuscleSet::from_muscles([0, 1]),
            stop_reason: StopReason::Starved,
        }
    }

    fn entry(index: usize, exercise_id: u32) -> ScheduledEntry {
        ScheduledEntry {
            index,
            exercise_id,
            sets: 5,
            reps: 4,
            score: 42.5,
            estimated_seconds: 150,
            coverage_after: MuscleSet::from_muscles([0, 1]),
        }
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&schedule(vec![entry(3, 30), entry(0, 7)]), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "position,index,exercise_id,sets,reps,estimated_seconds,score"
        );
        assert_eq!(lines[1], "1,3,30,5,4,150,42.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_empty_schedule_keeps_header() {
        let mut buf = Vec::new();
        write_csv(&schedule(vec![]), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("position,"));
    }

    #[test]
    fn test_json_contains_stop_reason() {
        let mut buf = Vec::new();
        write_json(&schedule(vec![entry(1, 2)]), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["stop_reason"], "starved");
        assert_eq!(value["entries"][0]["exercise_id"], 2);
        assert_eq!(value["coverage"], 3);
    }

    #[test]
    fn test_text_render() {
        let text = render_text(&schedule(vec![entry(1, 2)]));
        assert!(text.contains("5×4"));
        assert!(text.contains("Work: 150s of 1500s budget"));

        let empty = render_text(&schedule(vec![]));
        assert!(empty.contains("No exercises scheduled (Starved)"));
    }
}
