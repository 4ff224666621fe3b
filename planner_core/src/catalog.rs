//! Exercise catalog and the shared store that hands out snapshots of it.
//!
//! A catalog is built in one bulk load and never mutated afterwards. The
//! store swaps whole catalogs behind an `Arc`, so solves that already hold a
//! snapshot keep working against it while a reload installs the next one.

use crate::records::ExerciseRecord;
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Process-wide store used by the free functions in [`crate::api`]
static GLOBAL_STORE: Lazy<CatalogStore> = Lazy::new(CatalogStore::new);

/// Outcome of a bulk load, including anything dropped for capacity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records kept in the catalog
    pub loaded: usize,
    /// Records past `MAX_EXERCISES` that were dropped
    pub dropped_records: usize,
    /// Kept records whose activation list was cut to `MAX_MUSCLES`
    pub clipped_activation_lists: usize,
}

impl LoadReport {
    pub fn truncated(&self) -> bool {
        self.dropped_records > 0 || self.clipped_activation_lists > 0
    }
}

/// Immutable collection of exercises, addressed by position
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Build a catalog from domain exercises, keeping at most `MAX_EXERCISES`
    pub fn from_exercises(mut exercises: Vec<Exercise>) -> (Self, usize) {
        let dropped = exercises.len().saturating_sub(MAX_EXERCISES);
        exercises.truncate(MAX_EXERCISES);
        (Self { exercises }, dropped)
    }

    /// Convert boundary records into a catalog
    ///
    /// Records past the capacity are dropped before conversion, so a
    /// malformed record beyond the cut never fails the load. Any malformed
    /// record inside the cut rejects the whole load.
    pub fn from_records(records: &[ExerciseRecord]) -> Result<(Self, LoadReport)> {
        let kept = records.len().min(MAX_EXERCISES);
        let mut report = LoadReport {
            dropped_records: records.len() - kept,
            ..LoadReport::default()
        };

        let mut exercises = Vec::with_capacity(kept);
        for (position, record) in records[..kept].iter().enumerate() {
            let (exercise, clipped) = record.to_exercise().map_err(|e| match e {
                Error::InvalidRecord(msg) => {
                    Error::InvalidRecord(format!("exercise #{}: {}", position, msg))
                }
                other => other,
            })?;
            if clipped {
                report.clipped_activation_lists += 1;
            }
            exercises.push(exercise);
        }

        report.loaded = exercises.len();
        Ok((Self { exercises }, report))
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Check the catalog for entries that load fine but behave oddly
    ///
    /// Returns a list of warnings, or empty Vec if nothing stands out.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, ex) in self.exercises.iter().enumerate() {
            if !seen.insert(ex.id) {
                warnings.push(format!("Exercise #{} reuses id {}", index, ex.id));
            }
            if ex.id >= EXCLUSION_CAPACITY {
                warnings.push(format!(
                    "Exercise #{} has id {} which cannot be excluded (capacity {})",
                    index, ex.id, EXCLUSION_CAPACITY
                ));
            }
            if ex.locations.is_empty() {
                warnings.push(format!("Exercise #{} (id {}) has no valid location", index, ex.id));
            }
            if ex.activations.active().is_empty() {
                warnings.push(format!("Exercise #{} (id {}) activates no muscle", index, ex.id));
            }
        }

        warnings
    }
}

/// Holder of the current catalog snapshot
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<Catalog>>>,
    version: AtomicU64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store
    pub fn global() -> &'static CatalogStore {
        &GLOBAL_STORE
    }

    /// Replace the whole catalog with `records`
    ///
    /// Conversion happens before the lock is taken; the write lock is held
    /// only for the pointer swap. On error the previous catalog stays.
    pub fn load(&self, records: &[ExerciseRecord]) -> Result<LoadReport> {
        let (catalog, report) = Catalog::from_records(records)?;

        if report.dropped_records > 0 {
            tracing::warn!(
                "Catalog capacity is {}: dropped {} trailing records",
                MAX_EXERCISES,
                report.dropped_records
            );
        }
        if report.clipped_activation_lists > 0 {
            tracing::warn!(
                "{} activation lists exceeded {} muscles and were clipped",
                report.clipped_activation_lists,
                MAX_MUSCLES
            );
        }
        for warning in catalog.validate() {
            tracing::warn!("{}", warning);
        }

        self.install(catalog);
        tracing::info!("Loaded {} exercises into catalog", report.loaded);
        Ok(report)
    }

    /// Install an already-built catalog
    pub fn install(&self, catalog: Catalog) {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(next);
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// The catalog installed most recently
    pub fn snapshot(&self) -> Result<Arc<Catalog>> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(Error::NotInitialized)
    }

    /// Number of exercises in the current catalog, 0 before the first load
    pub fn exercise_count(&self) -> usize {
        self.snapshot().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of successful loads so far
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
