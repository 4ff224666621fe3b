//! Recovery windows derived from recent training history.
//!
//! Muscles trained in the last 24 hours and those trained 24-48 hours ago
//! feed the two recovery penalties of the scoring function.

use crate::MuscleSet;
use chrono::{DateTime, Duration, Utc};

/// A past session and the muscles it trained
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingEntry {
    pub muscles: MuscleSet,
    pub performed_at: DateTime<Utc>,
}

/// Muscles still recovering, split by how recently they were trained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecoveryWindows {
    pub within_24h: MuscleSet,
    pub within_48h: MuscleSet,
}

impl RecoveryWindows {
    /// Bucket `history` relative to `now`
    ///
    /// A muscle lands in `within_48h` only when no session touched it in the
    /// last 24 hours. Future-dated entries count as within 24 hours.
    pub fn from_history(history: &[TrainingEntry], now: DateTime<Utc>) -> Self {
        let mut windows = RecoveryWindows::default();

        for entry in history {
            let age = now - entry.performed_at;
            if age <= Duration::hours(24) {
                windows.within_24h = windows.within_24h.union(entry.muscles);
            } else if age <= Duration::hours(48) {
                windows.within_48h = windows.within_48h.union(entry.muscles);
            }
        }

        windows.within_48h = windows.within_48h.difference(windows.within_24h);

        if !history.is_empty() {
            tracing::debug!(
                "Recovery windows: {} muscles <24h, {} muscles 24-48h",
                windows.within_24h.len(),
                windows.within_48h.len()
            );
        }

        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn entry(muscles: &[usize], hours_ago: i64) -> TrainingEntry {
        TrainingEntry {
            muscles: MuscleSet::from_muscles(muscles.iter().copied()),
            performed_at: now() - Duration::hours(hours_ago),
        }
    }

    #[test]
    fn test_empty_history() {
        let windows = RecoveryWindows::from_history(&[], now());
        assert!(windows.within_24h.is_empty());
        assert!(windows.within_48h.is_empty());
    }

    #[test]
    fn test_buckets_by_age() {
        let history = vec![entry(&[1, 2], 5), entry(&[3], 36), entry(&[4], 72)];
        let windows = RecoveryWindows::from_history(&history, now());

        assert_eq!(windows.within_24h, MuscleSet::from_muscles([1, 2]));
        assert_eq!(windows.within_48h, MuscleSet::from_muscles([3]));
    }

    #[test]
    fn test_recent_session_takes_precedence() {
        let history = vec![entry(&[7], 40), entry(&[7, 8], 2)];
        let windows = RecoveryWindows::from_history(&history, now());

        assert_eq!(windows.within_24h, MuscleSet::from_muscles([7, 8]));
        assert!(windows.within_48h.is_empty());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let history = vec![entry(&[0], 24), entry(&[1], 48), entry(&[2], -3)];
        let windows = RecoveryWindows::from_history(&history, now());

        assert_eq!(windows.within_24h, MuscleSet::from_muscles([0, 2]));
        assert_eq!(windows.within_48h, MuscleSet::from_muscles([1]));
    }
}
