//! Core domain types for the workout planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Capacity constants shared by the catalog and the request model
//! - Enumerations (location, movement pattern, goal, fitness level)
//! - Typed bit-sets keyed by enum ordinal
//! - Exercise records, solve requests and scoring weights

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ============================================================================
// Capacities
// ============================================================================

/// Maximum number of exercises held by one catalog
pub const MAX_EXERCISES: usize = 500;

/// Size of the muscle index space
pub const MAX_MUSCLES: usize = 50;

/// Number of 32-bit words in the packed exclusion set
pub const EXCLUSION_WORDS: usize = 16;

/// Exercise ids `0..EXCLUSION_CAPACITY` can be excluded by a request
pub const EXCLUSION_CAPACITY: u32 = (EXCLUSION_WORDS as u32) * 32;

// ============================================================================
// Enumerations
// ============================================================================

/// Where the workout takes place
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Gym,
    Home,
    Park,
    Hotel,
    Office,
    Travel,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Gym,
        Location::Home,
        Location::Park,
        Location::Hotel,
        Location::Office,
        Location::Travel,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Gym sessions are assumed to have every piece of equipment
    pub fn has_all_equipment(self) -> bool {
        self == Location::Gym
    }
}

/// Primary biomechanical action of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Push,
    Pull,
    Squat,
    Hinge,
    Carry,
    Core,
    Isolation,
}

impl MovementPattern {
    pub const ALL: [MovementPattern; 7] = [
        MovementPattern::Push,
        MovementPattern::Pull,
        MovementPattern::Squat,
        MovementPattern::Hinge,
        MovementPattern::Carry,
        MovementPattern::Core,
        MovementPattern::Isolation,
    ];

    pub fn from_ordinal(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_set(self) -> PatternSet {
        PatternSet::from_bits_retain(1 << (self as u32))
    }
}

/// Training goal; a request may carry several
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Strength,
    Hypertrophy,
    Endurance,
    Mobility,
    FatLoss,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::Strength,
        Goal::Hypertrophy,
        Goal::Endurance,
        Goal::Mobility,
        Goal::FatLoss,
    ];

    pub fn as_set(self) -> GoalSet {
        GoalSet::from_bits_retain(1 << (self as u32))
    }

    /// Movement patterns that serve this goal
    pub fn preferred_patterns(self) -> PatternSet {
        match self {
            Goal::Strength | Goal::Hypertrophy | Goal::FatLoss => {
                PatternSet::SQUAT | PatternSet::HINGE | PatternSet::PUSH | PatternSet::PULL
            }
            Goal::Endurance => {
                PatternSet::PUSH | PatternSet::PULL | PatternSet::SQUAT | PatternSet::CORE
            }
            Goal::Mobility => PatternSet::CORE | PatternSet::HINGE | PatternSet::SQUAT,
        }
    }

    pub fn prefers_compound(self) -> bool {
        matches!(self, Goal::Strength | Goal::Hypertrophy | Goal::FatLoss)
    }
}

/// Self-reported training experience
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(FitnessLevel::Beginner),
            1 => Some(FitnessLevel::Intermediate),
            2 => Some(FitnessLevel::Advanced),
            _ => None,
        }
    }

    /// Inclusive difficulty band suited to this level
    pub fn difficulty_range(self) -> (u8, u8) {
        match self {
            FitnessLevel::Beginner => (1, 2),
            FitnessLevel::Intermediate => (2, 3),
            FitnessLevel::Advanced => (3, 5),
        }
    }
}

// ============================================================================
// Bit-sets
// ============================================================================

bitflags! {
    /// Locations an exercise can be performed at, bit = `Location` ordinal
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct LocationSet: u32 {
        const GYM = 1 << 0;
        const HOME = 1 << 1;
        const PARK = 1 << 2;
        const HOTEL = 1 << 3;
        const OFFICE = 1 << 4;
        const TRAVEL = 1 << 5;
    }
}

impl LocationSet {
    pub fn contains_location(self, location: Location) -> bool {
        self.bits() & (1 << location.ordinal()) != 0
    }
}

bitflags! {
    /// Training goals, bit = `Goal` ordinal
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct GoalSet: u32 {
        const STRENGTH = 1 << 0;
        const HYPERTROPHY = 1 << 1;
        const ENDURANCE = 1 << 2;
        const MOBILITY = 1 << 3;
        const FAT_LOSS = 1 << 4;
    }
}

impl GoalSet {
    pub fn has(self, goal: Goal) -> bool {
        self.contains(goal.as_set())
    }

    /// Goals in ordinal order
    pub fn goals(self) -> impl Iterator<Item = Goal> {
        Goal::ALL.into_iter().filter(move |g| self.has(*g))
    }
}

bitflags! {
    /// Movement patterns, bit = `MovementPattern` ordinal
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PatternSet: u32 {
        const PUSH = 1 << 0;
        const PULL = 1 << 1;
        const SQUAT = 1 << 2;
        const HINGE = 1 << 3;
        const CARRY = 1 << 4;
        const CORE = 1 << 5;
        const ISOLATION = 1 << 6;
    }
}

/// Equipment bit-set. Equipment kinds are host-defined, so bits carry no names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentSet(pub u32);

impl EquipmentSet {
    pub const NONE: EquipmentSet = EquipmentSet(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `required` is available in `self`
    pub fn covers(self, required: EquipmentSet) -> bool {
        required.0 & !self.0 == 0
    }
}

/// Set of muscle indices `0..MAX_MUSCLES`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleSet(u64);

impl MuscleSet {
    pub const EMPTY: MuscleSet = MuscleSet(0);
    const VALID: u64 = (1 << MAX_MUSCLES) - 1;

    /// Build from raw bits; bits at or above `MAX_MUSCLES` are discarded
    pub fn from_bits(bits: u64) -> Self {
        MuscleSet(bits & Self::VALID)
    }

    pub fn from_muscles<I: IntoIterator<Item = usize>>(muscles: I) -> Self {
        let mut set = MuscleSet::EMPTY;
        for m in muscles {
            set.insert(m);
        }
        set
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn insert(&mut self, muscle: usize) {
        if muscle < MAX_MUSCLES {
            self.0 |= 1 << muscle;
        }
    }

    pub fn contains(self, muscle: usize) -> bool {
        muscle < MAX_MUSCLES && self.0 & (1 << muscle) != 0
    }

    pub fn union(self, other: MuscleSet) -> MuscleSet {
        MuscleSet(self.0 | other.0)
    }

    pub fn intersection(self, other: MuscleSet) -> MuscleSet {
        MuscleSet(self.0 & other.0)
    }

    pub fn difference(self, other: MuscleSet) -> MuscleSet {
        MuscleSet(self.0 & !other.0)
    }

    pub fn is_disjoint(self, other: MuscleSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn is_superset(self, other: MuscleSet) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_MUSCLES).filter(move |m| self.contains(*m))
    }
}

/// Packed exclusion set over exercise ids `0..EXCLUSION_CAPACITY`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet([u32; EXCLUSION_WORDS]);

impl ExclusionSet {
    /// Build from packed words. Words past `EXCLUSION_WORDS` are ignored;
    /// the number of ignored words is returned alongside the set.
    pub fn from_words(words: &[u32]) -> (Self, usize) {
        let mut packed = [0u32; EXCLUSION_WORDS];
        let kept = words.len().min(EXCLUSION_WORDS);
        packed[..kept].copy_from_slice(&words[..kept]);
        (ExclusionSet(packed), words.len() - kept)
    }

    pub fn from_ids<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        let mut set = ExclusionSet::default();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Ids outside the capacity are not representable and are ignored
    pub fn insert(&mut self, id: u32) -> bool {
        if id >= EXCLUSION_CAPACITY {
            return false;
        }
        self.0[(id / 32) as usize] |= 1 << (id % 32);
        true
    }

    pub fn contains(&self, id: u32) -> bool {
        id < EXCLUSION_CAPACITY && self.0[(id / 32) as usize] & (1 << (id % 32)) != 0
    }

    pub fn words(&self) -> &[u32; EXCLUSION_WORDS] {
        &self.0
    }
}

// ============================================================================
// Exercise
// ============================================================================

/// Per-muscle activation percentages, indexed by muscle
///
/// Values are kept as given; out-of-range percentages are not clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Activations {
    values: [f32; MAX_MUSCLES],
    active: MuscleSet,
}

impl Activations {
    /// Build from a slice; returns the activations and whether entries past
    /// `MAX_MUSCLES` were dropped.
    pub fn from_slice(values: &[f32]) -> (Self, bool) {
        let mut packed = [0.0f32; MAX_MUSCLES];
        let kept = values.len().min(MAX_MUSCLES);
        packed[..kept].copy_from_slice(&values[..kept]);
        (Self::from_array(packed), values.len() > MAX_MUSCLES)
    }

    pub fn from_pairs<I: IntoIterator<Item = (usize, f32)>>(pairs: I) -> Self {
        let mut packed = [0.0f32; MAX_MUSCLES];
        for (m, v) in pairs {
            if m < MAX_MUSCLES {
                packed[m] = v;
            }
        }
        Self::from_array(packed)
    }

    fn from_array(values: [f32; MAX_MUSCLES]) -> Self {
        let active = MuscleSet::from_muscles((0..MAX_MUSCLES).filter(|m| values[*m] > 0.0));
        Self { values, active }
    }

    pub fn get(&self, muscle: usize) -> f32 {
        self.values.get(muscle).copied().unwrap_or(0.0)
    }

    /// Muscles with strictly positive activation
    pub fn active(&self) -> MuscleSet {
        self.active
    }
}

impl Default for Activations {
    fn default() -> Self {
        Self::from_array([0.0; MAX_MUSCLES])
    }
}

/// A catalog entry; immutable once loaded
#[derive(Clone, Debug, PartialEq)]
pub struct Exercise {
    pub id: u32,
    /// 1 (easiest) to 5
    pub difficulty: u8,
    pub is_compound: bool,
    pub movement_pattern: MovementPattern,
    pub estimated_seconds: u32,
    pub rest_seconds: u32,
    pub activations: Activations,
    pub primary_muscles: MuscleSet,
    pub locations: LocationSet,
    pub equipment_required: EquipmentSet,
}

impl Exercise {
    pub fn requires_equipment(&self) -> bool {
        !self.equipment_required.is_empty()
    }
}

// ============================================================================
// Request
// ============================================================================

/// Coefficients of the scoring function
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    #[serde(default = "default_goal_alignment")]
    pub goal_alignment: f64,
    #[serde(default = "default_compound_preference")]
    pub compound_preference: f64,
    #[serde(default = "default_recovery_penalty_24h")]
    pub recovery_penalty_24h: f64,
    #[serde(default = "default_recovery_penalty_48h")]
    pub recovery_penalty_48h: f64,
    #[serde(default = "default_fitness_level_match")]
    pub fitness_level_match: f64,
    #[serde(default = "default_muscle_coverage_gap")]
    pub muscle_coverage_gap: f64,
}

fn default_goal_alignment() -> f64 {
    10.0
}

fn default_compound_preference() -> f64 {
    5.0
}

fn default_recovery_penalty_24h() -> f64 {
    -20.0
}

fn default_recovery_penalty_48h() -> f64 {
    -10.0
}

fn default_fitness_level_match() -> f64 {
    5.0
}

fn default_muscle_coverage_gap() -> f64 {
    15.0
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            goal_alignment: default_goal_alignment(),
            compound_preference: default_compound_preference(),
            recovery_penalty_24h: default_recovery_penalty_24h(),
            recovery_penalty_48h: default_recovery_penalty_48h(),
            fitness_level_match: default_fitness_level_match(),
            muscle_coverage_gap: default_muscle_coverage_gap(),
        }
    }
}

/// One solve call's input; immutable while solving
#[derive(Clone, Debug, PartialEq)]
pub struct SolveRequest {
    pub time_available_seconds: u32,
    pub location: Location,
    pub equipment: EquipmentSet,
    pub goals: GoalSet,
    pub fitness_level: FitnessLevel,
    pub excluded_exercises: ExclusionSet,
    pub excluded_muscles: MuscleSet,
    pub recent_24h_muscles: MuscleSet,
    pub recent_48h_muscles: MuscleSet,
    pub weights: ScoringWeights,
}

impl SolveRequest {
    /// A request with no goals, exclusions or recent training
    pub fn new(time_available_seconds: u32, location: Location, fitness_level: FitnessLevel) -> Self {
        Self {
            time_available_seconds,
            location,
            equipment: EquipmentSet::NONE,
            goals: GoalSet::empty(),
            fitness_level,
            excluded_exercises: ExclusionSet::default(),
            excluded_muscles: MuscleSet::EMPTY,
            recent_24h_muscles: MuscleSet::EMPTY,
            recent_48h_muscles: MuscleSet::EMPTY,
            weights: ScoringWeights::default(),
        }
    }
}

/// One line of a schedule: which exercise and how much of it
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub index: usize,
    pub sets: u32,
    pub reps: u32,
}
