//! Boundary records exchanged with the host application.
//!
//! Field names and integer encodings follow the host contract (camelCase,
//! enums as ordinals, sets as raw masks). Conversion into the domain model
//! rejects values that have no domain meaning and applies the capacity
//! limits.

use crate::recovery::{RecoveryWindows, TrainingEntry};
use crate::types::*;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry as supplied by the host
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: u32,
    pub difficulty: i32,
    #[serde(default)]
    pub is_compound: bool,
    pub movement_pattern: i32,
    #[serde(default)]
    pub estimated_seconds: u32,
    #[serde(default)]
    pub rest_seconds: u32,
    /// Activation percentage per muscle index
    #[serde(default)]
    pub activations: Vec<f32>,
    #[serde(default)]
    pub primary_muscles_mask: u64,
    #[serde(default)]
    pub locations_mask: u32,
    #[serde(default)]
    pub equipment_required_mask: u32,
}

impl ExerciseRecord {
    /// Convert into a domain exercise; the flag reports a clipped activation list
    pub fn to_exercise(&self) -> Result<(Exercise, bool)> {
        let difficulty = u8::try_from(self.difficulty)
            .ok()
            .filter(|d| (1..=5).contains(d))
            .ok_or_else(|| {
                Error::InvalidRecord(format!(
                    "difficulty {} outside 1-5 (id {})",
                    self.difficulty, self.id
                ))
            })?;

        let movement_pattern = MovementPattern::from_ordinal(self.movement_pattern.into())
            .ok_or_else(|| {
                Error::InvalidRecord(format!(
                    "unknown movement pattern {} (id {})",
                    self.movement_pattern, self.id
                ))
            })?;

        let (activations, clipped) = Activations::from_slice(&self.activations);

        let exercise = Exercise {
            id: self.id,
            difficulty,
            is_compound: self.is_compound,
            movement_pattern,
            estimated_seconds: self.estimated_seconds,
            rest_seconds: self.rest_seconds,
            activations,
            primary_muscles: MuscleSet::from_bits(self.primary_muscles_mask),
            locations: LocationSet::from_bits_truncate(self.locations_mask),
            equipment_required: EquipmentSet(self.equipment_required_mask),
        };

        Ok((exercise, clipped))
    }
}

/// Scoring weights as supplied by the host; missing fields take defaults
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightsRecord {
    pub goal_alignment: Option<f64>,
    pub compound_preference: Option<f64>,
    pub recovery_penalty_24h: Option<f64>,
    pub recovery_penalty_48h: Option<f64>,
    pub fitness_level_match: Option<f64>,
    pub muscle_coverage_gap: Option<f64>,
}

impl WeightsRecord {
    pub fn resolve(&self, defaults: &ScoringWeights) -> ScoringWeights {
        ScoringWeights {
            goal_alignment: self.goal_alignment.unwrap_or(defaults.goal_alignment),
            compound_preference: self
                .compound_preference
                .unwrap_or(defaults.compound_preference),
            recovery_penalty_24h: self
                .recovery_penalty_24h
                .unwrap_or(defaults.recovery_penalty_24h),
            recovery_penalty_48h: self
                .recovery_penalty_48h
                .unwrap_or(defaults.recovery_penalty_48h),
            fitness_level_match: self
                .fitness_level_match
                .unwrap_or(defaults.fitness_level_match),
            muscle_coverage_gap: self
                .muscle_coverage_gap
                .unwrap_or(defaults.muscle_coverage_gap),
        }
    }
}

/// A past session used to derive recovery masks
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    pub muscles_mask: u64,
    pub performed_at: DateTime<Utc>,
}

/// Solve request as supplied by the host
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequestRecord {
    /// Defaults to zero; scoring never reads it
    #[serde(default)]
    pub time_available_seconds: i64,
    #[serde(default)]
    pub location: i32,
    #[serde(default)]
    pub equipment_mask: u32,
    #[serde(default)]
    pub goals_mask: u32,
    pub fitness_level: i32,
    /// Packed exclusion words; values are taken modulo 2^32 so signed
    /// 32-bit words from the host keep their bit pattern
    #[serde(default)]
    pub excluded_exercises_mask: Vec<i64>,
    #[serde(default)]
    pub excluded_muscles_mask: u64,
    #[serde(default)]
    pub recent24h_muscles_mask: u64,
    #[serde(default)]
    pub recent48h_muscles_mask: u64,
    #[serde(default)]
    pub weights: Option<WeightsRecord>,
    #[serde(default)]
    pub recent_training: Vec<TrainingRecord>,
}

impl SolveRequestRecord {
    /// Convert into a domain request
    ///
    /// `defaults` fill any weight the record leaves out; `now` anchors the
    /// recovery windows derived from `recent_training`. The count reports
    /// exclusion words past the set's capacity that were ignored.
    pub fn to_request(
        &self,
        defaults: &ScoringWeights,
        now: DateTime<Utc>,
    ) -> Result<(SolveRequest, usize)> {
        let time_available_seconds = u32::try_from(self.time_available_seconds).map_err(|_| {
            Error::InvalidRecord(format!(
                "timeAvailableSeconds {} is not a valid duration",
                self.time_available_seconds
            ))
        })?;

        let location = Location::from_ordinal(self.location.into()).ok_or_else(|| {
            Error::InvalidRecord(format!("unknown location {}", self.location))
        })?;

        let fitness_level = FitnessLevel::from_ordinal(self.fitness_level.into())
            .ok_or_else(|| {
                Error::InvalidRecord(format!("unknown fitness level {}", self.fitness_level))
            })?;

        let words: Vec<u32> = self
            .excluded_exercises_mask
            .iter()
            .map(|w| *w as u32)
            .collect();
        let (excluded_exercises, ignored_words) = ExclusionSet::from_words(&words);
        if ignored_words > 0 {
            tracing::warn!(
                "Exclusion set holds {} words: ignored {} extra words",
                EXCLUSION_WORDS,
                ignored_words
            );
        }

        let history: Vec<TrainingEntry> = self
            .recent_training
            .iter()
            .map(|t| TrainingEntry {
                muscles: MuscleSet::from_bits(t.muscles_mask),
                performed_at: t.performed_at,
            })
            .collect();
        let windows = RecoveryWindows::from_history(&history, now);

        let weights = self
            .weights
            .as_ref()
            .map(|w| w.resolve(defaults))
            .unwrap_or(*defaults);

        let request = SolveRequest {
            time_available_seconds,
            location,
            equipment: EquipmentSet(self.equipment_mask),
            goals: GoalSet::from_bits_truncate(self.goals_mask),
            fitness_level,
            excluded_exercises,
            excluded_muscles: MuscleSet::from_bits(self.excluded_muscles_mask),
            recent_24h_muscles: MuscleSet::from_bits(self.recent24h_muscles_mask)
                .union(windows.within_24h),
            recent_48h_muscles: MuscleSet::from_bits(self.recent48h_muscles_mask)
                .union(windows.within_48h),
            weights,
        };

        Ok((request, ignored_words))
    }
}
