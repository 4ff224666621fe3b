//! Boundary operations offered to the host application.
//!
//! The free functions work on the process-wide [`CatalogStore`]; the same
//! operations exist as methods for callers that own their own store.

use crate::catalog::{CatalogStore, LoadReport};
use crate::engine::{self, Schedule};
use crate::records::{ExerciseRecord, SolveRequestRecord};
use crate::{Assignment, Result, ScoringWeights, SolveRequest, MAX_EXERCISES};
use chrono::{DateTime, Utc};

/// Knobs the host may set per call
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    pub max_results: usize,
    /// Weights used for any coefficient the request leaves out
    pub default_weights: ScoringWeights,
    /// Reference time for recovery windows built from training history
    pub now: DateTime<Utc>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_results: MAX_EXERCISES,
            default_weights: ScoringWeights::default(),
            now: Utc::now(),
        }
    }
}

impl CatalogStore {
    /// Solve against the current snapshot
    pub fn solve(&self, request: &SolveRequest, max_results: usize) -> Result<Schedule> {
        let catalog = self.snapshot()?;
        Ok(engine::solve(&catalog, request, max_results))
    }

    /// Solve a host request record against the current snapshot
    pub fn solve_record(
        &self,
        record: &SolveRequestRecord,
        options: &SolveOptions,
    ) -> Result<Schedule> {
        let catalog = self.snapshot()?;
        let (request, _) = record.to_request(&options.default_weights, options.now)?;
        Ok(engine::solve(&catalog, &request, options.max_results))
    }

    /// Score catalog entries by index, ignoring hard filters and coverage
    pub fn score_batch(&self, indices: &[i64], request: &SolveRequest) -> Result<Vec<f64>> {
        let catalog = self.snapshot()?;
        Ok(engine::score_batch(&catalog, indices, request))
    }
}

/// Replace the process-wide catalog; returns what was loaded and dropped
pub fn load_catalog(records: &[ExerciseRecord]) -> Result<LoadReport> {
    CatalogStore::global().load(records)
}

/// Solve with default options; fails with `NotInitialized` before any load
pub fn solve(record: &SolveRequestRecord) -> Result<Vec<Assignment>> {
    solve_with(record, &SolveOptions::default()).map(|s| s.assignments())
}

/// Solve and keep the full schedule
pub fn solve_with(record: &SolveRequestRecord, options: &SolveOptions) -> Result<Schedule> {
    CatalogStore::global().solve_record(record, options)
}

/// Debug entry point: score `indices` against `record`
pub fn score_batch(indices: &[i64], record: &SolveRequestRecord) -> Result<Vec<f64>> {
    let store = CatalogStore::global();
    let (request, _) = record.to_request(&ScoringWeights::default(), Utc::now())?;
    store.score_batch(indices, &request)
}

/// Size of the process-wide catalog
pub fn exercise_count() -> usize {
    CatalogStore::global().exercise_count()
}
