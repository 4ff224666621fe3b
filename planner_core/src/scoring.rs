//! Multi-factor desirability score.
//!
//! Factors are additive and independent:
//! - Goal alignment (pattern match per goal, plus a compound bonus for
//!   strength, hypertrophy and fat loss)
//! - Compound preference
//! - Recovery penalties for muscles trained in the last 24h / 48h
//! - Fitness-level match, with a penalty for exercises that are too hard
//! - Coverage gap bonus for muscles the schedule has not hit yet

use crate::{Exercise, MuscleSet, SolveRequest};

/// Penalty per difficulty step above the fitness level's range
pub const OVER_DIFFICULTY_PENALTY: f64 = 5.0;

/// Share of the goal weight granted to compound exercises for goals that prefer them
pub const COMPOUND_GOAL_FACTOR: f64 = 0.5;

/// Score `exercise` for `request` given the muscles already covered
pub fn score(exercise: &Exercise, request: &SolveRequest, coverage: MuscleSet) -> f64 {
    goal_alignment(exercise, request)
        + compound_preference(exercise, request)
        + recovery_penalty(exercise, request)
        + fitness_match(exercise, request)
        + coverage_gap(exercise, request, coverage)
}

fn goal_alignment(exercise: &Exercise, request: &SolveRequest) -> f64 {
    let weight = request.weights.goal_alignment;
    let pattern = exercise.movement_pattern.as_set();

    request
        .goals
        .goals()
        .map(|goal| {
            let mut points = 0.0;
            if goal.preferred_patterns().contains(pattern) {
                points += weight;
            }
            if goal.prefers_compound() && exercise.is_compound {
                points += weight * COMPOUND_GOAL_FACTOR;
            }
            points
        })
        .sum()
}

fn compound_preference(exercise: &Exercise, request: &SolveRequest) -> f64 {
    if exercise.is_compound {
        request.weights.compound_preference
    } else {
        0.0
    }
}

fn recovery_penalty(exercise: &Exercise, request: &SolveRequest) -> f64 {
    let active = exercise.activations.active();
    let hit_24h = active.intersection(request.recent_24h_muscles);
    let hit_48h = active
        .intersection(request.recent_48h_muscles)
        .difference(request.recent_24h_muscles);

    hit_24h.len() as f64 * request.weights.recovery_penalty_24h
        + hit_48h.len() as f64 * request.weights.recovery_penalty_48h
}

fn fitness_match(exercise: &Exercise, request: &SolveRequest) -> f64 {
    let (min, max) = request.fitness_level.difficulty_range();
    let mut points = 0.0;

    if (min..=max).contains(&exercise.difficulty) {
        points += request.weights.fitness_level_match;
    }
    if exercise.difficulty > max {
        points -= f64::from(exercise.difficulty - max) * OVER_DIFFICULTY_PENALTY;
    }

    points
}

fn coverage_gap(exercise: &Exercise, request: &SolveRequest, coverage: MuscleSet) -> f64 {
    let uncovered = exercise.activations.active().difference(coverage);
    uncovered.len() as f64 * request.weights.muscle_coverage_gap
}
