//! Greedy scheduler that turns a catalog and a request into a workout.
//!
//! The candidate set is filtered once. Each round then re-scores every
//! candidate not yet selected against the muscles covered so far, ranks
//! them, and commits the best one whose estimated time still fits the
//! remaining budget. The loop stops when the budget drops to a minute or
//! less, the result cap is reached, or nothing fits.

use crate::filter::eligible_indices;
use crate::scoring::score;
use crate::timing::estimate_seconds;
use crate::{Assignment, Catalog, Exercise, Goal, GoalSet, MuscleSet, SolveRequest};
use serde::Serialize;
use std::cmp::Ordering;

/// Sessions at least this long reserve the longer warmup/cooldown
pub const LONG_SESSION_SECONDS: u32 = 1800;

/// Warmup + cooldown for long sessions
pub const LONG_RESERVE_SECONDS: u32 = 300;

/// Warmup + cooldown for short sessions
pub const SHORT_RESERVE_SECONDS: u32 = 120;

/// Scheduling continues only while more than this much time is left
pub const MIN_REMAINING_SECONDS: u32 = 60;

/// Sets, reps and rest scaling applied to every exercise of one solve
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Prescription {
    pub sets: u32,
    pub reps: u32,
    pub rest_multiplier: f64,
}

impl Prescription {
    /// Derive the prescription from the request's goals
    ///
    /// Sets/reps follow strength > hypertrophy > endurance > fat loss;
    /// rest follows strength > endurance > fat loss > mobility. Mobility
    /// keeps the default 3 x 10.
    pub fn for_goals(goals: GoalSet) -> Self {
        let (sets, reps) = [
            (Goal::Strength, (5, 4)),
            (Goal::Hypertrophy, (4, 10)),
            (Goal::Endurance, (2, 20)),
            (Goal::FatLoss, (3, 14)),
        ]
        .into_iter()
        .find(|(goal, _)| goals.has(*goal))
        .map(|(_, volume)| volume)
        .unwrap_or((3, 10));

        let rest_multiplier = [
            (Goal::Strength, 1.5),
            (Goal::Endurance, 0.5),
            (Goal::FatLoss, 0.6),
            (Goal::Mobility, 0.75),
        ]
        .into_iter()
        .find(|(goal, _)| goals.has(*goal))
        .map(|(_, multiplier)| multiplier)
        .unwrap_or(1.0);

        Self {
            sets,
            reps,
            rest_multiplier,
        }
    }
}

/// Time set aside for warmup and cooldown
pub fn reserve_seconds(time_available_seconds: u32) -> u32 {
    if time_available_seconds >= LONG_SESSION_SECONDS {
        LONG_RESERVE_SECONDS
    } else {
        SHORT_RESERVE_SECONDS
    }
}

/// Why the scheduler stopped adding exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No exercise passed the hard filters
    NoCandidates,
    /// One minute or less of the budget was left
    BudgetExhausted,
    /// The requested number of exercises was reached
    MaxResults,
    /// Candidates remained but none fit the remaining time
    Starved,
    /// Every candidate was already selected
    Exhausted,
}

/// One selected exercise with the state right after its selection
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduledEntry {
    pub index: usize,
    pub exercise_id: u32,
    pub sets: u32,
    pub reps: u32,
    pub score: f64,
    pub estimated_seconds: u32,
    pub coverage_after: MuscleSet,
}

/// The ordered result of a solve
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schedule {
    pub entries: Vec<ScheduledEntry>,
    pub prescription: Prescription,
    pub reserve_seconds: u32,
    /// Time available for exercises after the reserve
    pub time_budget_seconds: u32,
    pub time_remaining_seconds: u32,
    pub coverage: MuscleSet,
    pub stop_reason: StopReason,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bare `{index, sets, reps}` list
    pub fn assignments(&self) -> Vec<Assignment> {
        self.entries
            .iter()
            .map(|e| Assignment {
                index: e.index,
                sets: e.sets,
                reps: e.reps,
            })
            .collect()
    }

    pub fn total_estimated_seconds(&self) -> u32 {
        self.entries.iter().map(|e| e.estimated_seconds).sum()
    }
}

/// Build a workout for `request` from `catalog`, at most `max_results` long
pub fn solve(catalog: &Catalog, request: &SolveRequest, max_results: usize) -> Schedule {
    let prescription = Prescription::for_goals(request.goals);
    let reserve = reserve_seconds(request.time_available_seconds);
    let budget = request.time_available_seconds.saturating_sub(reserve);

    let mut schedule = Schedule {
        entries: Vec::new(),
        prescription,
        reserve_seconds: reserve,
        time_budget_seconds: budget,
        time_remaining_seconds: budget,
        coverage: MuscleSet::EMPTY,
        stop_reason: StopReason::NoCandidates,
    };

    let candidates = eligible_indices(catalog, request);
    tracing::info!(
        "Solving: {} of {} exercises eligible, budget {}s ({}s reserved), {}x{} rest x{}",
        candidates.len(),
        catalog.len(),
        budget,
        reserve,
        prescription.sets,
        prescription.reps,
        prescription.rest_multiplier
    );

    if candidates.is_empty() {
        return schedule;
    }

    let exercises = catalog.exercises();
    let mut selected = vec![false; exercises.len()];
    let mut ranked: Vec<(usize, f64)> = Vec::with_capacity(candidates.len());

    schedule.stop_reason = loop {
        if schedule.time_remaining_seconds <= MIN_REMAINING_SECONDS {
            break StopReason::BudgetExhausted;
        }
        if schedule.entries.len() >= max_results {
            break StopReason::MaxResults;
        }

        ranked.clear();
        ranked.extend(
            candidates
                .iter()
                .filter(|&&i| !selected[i])
                .map(|&i| (i, score(&exercises[i], request, schedule.coverage))),
        );
        if ranked.is_empty() {
            break StopReason::Exhausted;
        }
        ranked.sort_by(|a, b| rank_order(exercises, a, b));

        let pick = ranked.iter().find_map(|&(index, points)| {
            let seconds = estimate_seconds(
                &exercises[index],
                prescription.sets,
                prescription.reps,
                prescription.rest_multiplier,
            );
            (seconds <= schedule.time_remaining_seconds).then_some((index, points, seconds))
        });

        let Some((index, points, seconds)) = pick else {
            break StopReason::Starved;
        };

        let exercise = &exercises[index];
        selected[index] = true;
        schedule.coverage = schedule.coverage.union(exercise.activations.active());
        schedule.time_remaining_seconds -= seconds;

        tracing::debug!(
            "Round {}: selected exercise {} (index {}) score {:.2}, {}s, {}s left",
            schedule.entries.len() + 1,
            exercise.id,
            index,
            points,
            seconds,
            schedule.time_remaining_seconds
        );

        schedule.entries.push(ScheduledEntry {
            index,
            exercise_id: exercise.id,
            sets: prescription.sets,
            reps: prescription.reps,
            score: points,
            estimated_seconds: seconds,
            coverage_after: schedule.coverage,
        });
    };

    tracing::info!(
        "Scheduled {} exercises, {}s unused, stopped: {:?}",
        schedule.entries.len(),
        schedule.time_remaining_seconds,
        schedule.stop_reason
    );

    schedule
}

/// Descending score, then ascending exercise id, then ascending index
fn rank_order(exercises: &[Exercise], a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| exercises[a.0].id.cmp(&exercises[b.0].id))
        .then_with(|| a.0.cmp(&b.0))
}

/// Score the exercises at `indices` with nothing covered yet
///
/// Hard filters are skipped. Indices outside the catalog score 0.0.
pub fn score_batch(catalog: &Catalog, indices: &[i64], request: &SolveRequest) -> Vec<f64> {
    indices
        .iter()
        .map(|&i| {
            usize::try_from(i)
                .ok()
                .and_then(|i| catalog.get(i))
                .map(|ex| score(ex, request, MuscleSet::EMPTY))
                .unwrap_or(0.0)
        })
        .collect()
}
