//! Wall-clock estimates for a prescribed exercise.

use crate::Exercise;

/// Seconds assumed per repetition
pub const SECONDS_PER_REP: u32 = 3;

/// Extra time when an exercise needs equipment set up
pub const EQUIPMENT_SETUP_SECONDS: u32 = 30;

/// Estimate how long `sets` x `reps` of `exercise` takes
///
/// Rest happens between sets only, and is scaled by `rest_multiplier` and
/// rounded to the nearest second.
pub fn estimate_seconds(exercise: &Exercise, sets: u32, reps: u32, rest_multiplier: f64) -> u32 {
    let rep_time = reps.saturating_mul(SECONDS_PER_REP);
    let rest_time = (f64::from(exercise.rest_seconds) * rest_multiplier)
        .round()
        .max(0.0) as u32;
    let setup_time = if exercise.requires_equipment() {
        EQUIPMENT_SETUP_SECONDS
    } else {
        0
    };

    setup_time
        .saturating_add(sets.saturating_mul(rep_time))
        .saturating_add(sets.saturating_sub(1).saturating_mul(rest_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn exercise(rest_seconds: u32, equipment: u32) -> Exercise {
        Exercise {
            id: 0,
            difficulty: 2,
            is_compound: false,
            movement_pattern: MovementPattern::Core,
            estimated_seconds: 0,
            rest_seconds,
            activations: Activations::default(),
            primary_muscles: MuscleSet::EMPTY,
            locations: LocationSet::all(),
            equipment_required: EquipmentSet(equipment),
        }
    }

    #[test]
    fn test_bodyweight_estimate() {
        // 4 sets of 10: 4 * 30 + 3 * 60
        assert_eq!(estimate_seconds(&exercise(60, 0), 4, 10, 1.0), 300);
    }

    #[test]
    fn test_equipment_adds_setup() {
        assert_eq!(estimate_seconds(&exercise(60, 0b1), 4, 10, 1.0), 330);
    }

    #[test]
    fn test_rest_multiplier_rounds() {
        // 45 * 0.5 = 22.5 rounds to 23; 5 * 12 + 4 * 23
        assert_eq!(estimate_seconds(&exercise(45, 0), 5, 4, 0.5), 152);
        // 45 * 0.6 = 27.0; 3 * 42 + 2 * 27
        assert_eq!(estimate_seconds(&exercise(45, 0), 3, 14, 0.6), 180);
    }

    #[test]
    fn test_single_set_has_no_rest() {
        assert_eq!(estimate_seconds(&exercise(600, 0), 1, 10, 1.5), 30);
    }

    #[test]
    fn test_zero_sets() {
        assert_eq!(estimate_seconds(&exercise(60, 0b1), 0, 10, 1.0), 30);
    }
}
