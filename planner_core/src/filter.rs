//! Hard eligibility filter.
//!
//! An exercise is a candidate only when it passes every rule below; scoring
//! never sees exercises that fail one.

use crate::{Catalog, Exercise, SolveRequest};

/// Activation above this percentage on an excluded muscle disqualifies
pub const EXCLUDED_ACTIVATION_LIMIT: f32 = 40.0;

/// Why an exercise was filtered out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Location,
    Equipment,
    ExcludedExercise,
    ExcludedPrimaryMuscle,
    ExcludedMuscleActivation,
}

/// First rule `exercise` breaks for `request`, or `None` if it is eligible
pub fn rejection(exercise: &Exercise, request: &SolveRequest) -> Option<Rejection> {
    if !exercise.locations.contains_location(request.location) {
        return Some(Rejection::Location);
    }

    if !request.location.has_all_equipment()
        && !request.equipment.covers(exercise.equipment_required)
    {
        return Some(Rejection::Equipment);
    }

    if request.excluded_exercises.contains(exercise.id) {
        return Some(Rejection::ExcludedExercise);
    }

    if !exercise.primary_muscles.is_disjoint(request.excluded_muscles) {
        return Some(Rejection::ExcludedPrimaryMuscle);
    }

    if request
        .excluded_muscles
        .iter()
        .any(|m| exercise.activations.get(m) > EXCLUDED_ACTIVATION_LIMIT)
    {
        return Some(Rejection::ExcludedMuscleActivation);
    }

    None
}

pub fn is_eligible(exercise: &Exercise, request: &SolveRequest) -> bool {
    rejection(exercise, request).is_none()
}

/// Catalog indices of every eligible exercise, in catalog order
pub fn eligible_indices(catalog: &Catalog, request: &SolveRequest) -> Vec<usize> {
    catalog
        .exercises()
        .iter()
        .enumerate()
        .filter(|(_, ex)| is_eligible(ex, request))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn exercise() -> Exercise {
        Exercise {
            id: 12,
            difficulty: 2,
            is_compound: true,
            movement_pattern: MovementPattern::Push,
            estimated_seconds: 120,
            rest_seconds: 60,
            activations: Activations::from_pairs([(0, 80.0), (1, 40.0)]),
            primary_muscles: MuscleSet::from_muscles([0]),
            locations: LocationSet::GYM | LocationSet::HOME,
            equipment_required: EquipmentSet(0b10),
        }
    }

    fn request() -> SolveRequest {
        let mut req = SolveRequest::new(1800, Location::Home, FitnessLevel::Intermediate);
        req.equipment = EquipmentSet(0b110);
        req
    }

    #[test]
    fn test_all_rules_pass() {
        assert!(is_eligible(&exercise(), &request()));
    }

    #[test]
    fn test_location_rule() {
        let mut req = request();
        req.location = Location::Park;
        req.equipment = EquipmentSet(u32::MAX);
        assert_eq!(rejection(&exercise(), &req), Some(Rejection::Location));
    }

    #[test]
    fn test_equipment_rule() {
        let mut req = request();
        req.equipment = EquipmentSet(0b100);
        assert_eq!(rejection(&exercise(), &req), Some(Rejection::Equipment));
    }

    #[test]
    fn test_gym_has_all_equipment() {
        let mut req = request();
        req.location = Location::Gym;
        req.equipment = EquipmentSet::NONE;
        assert!(is_eligible(&exercise(), &req));
    }

    #[test]
    fn test_excluded_exercise_rule() {
        let mut req = request();
        req.excluded_exercises = ExclusionSet::from_ids([3, 12]);
        assert_eq!(rejection(&exercise(), &req), Some(Rejection::ExcludedExercise));

        req.excluded_exercises = ExclusionSet::from_ids([13]);
        assert!(is_eligible(&exercise(), &req));
    }

    #[test]
    fn test_excluded_primary_muscle_rule() {
        let mut req = request();
        req.excluded_muscles = MuscleSet::from_muscles([0]);
        assert_eq!(
            rejection(&exercise(), &req),
            Some(Rejection::ExcludedPrimaryMuscle)
        );
    }

    #[test]
    fn test_excluded_activation_threshold_is_exclusive() {
        let mut req = request();
        // Muscle 1 sits exactly at the limit and is not primary
        req.excluded_muscles = MuscleSet::from_muscles([1]);
        assert!(is_eligible(&exercise(), &req));

        let mut ex = exercise();
        ex.activations = Activations::from_pairs([(0, 80.0), (1, 40.5)]);
        assert_eq!(
            rejection(&ex, &req),
            Some(Rejection::ExcludedMuscleActivation)
        );
    }

    #[test]
    fn test_activation_rule_ignores_muscles_not_excluded() {
        let mut ex = exercise();
        ex.activations = Activations::from_pairs([(0, 80.0), (5, 95.0)]);
        let mut req = request();
        req.excluded_muscles = MuscleSet::from_muscles([6]);
        assert!(is_eligible(&ex, &req));
    }

    #[test]
    fn test_single_failure_is_enough() {
        // Flip each rule on its own and check it is sufficient to reject
        let base = request();
        let ex = exercise();

        let mut failing = Vec::new();

        let mut req = base.clone();
        req.location = Location::Office;
        failing.push(req);

        let mut req = base.clone();
        req.equipment = EquipmentSet::NONE;
        failing.push(req);

        let mut req = base.clone();
        req.excluded_exercises = ExclusionSet::from_ids([ex.id]);
        failing.push(req);

        let mut req = base.clone();
        req.excluded_muscles = MuscleSet::from_muscles([0]);
        failing.push(req);

        let mut ex_hot = ex.clone();
        ex_hot.activations = Activations::from_pairs([(0, 80.0), (9, 60.0)]);
        let mut req = base.clone();
        req.excluded_muscles = MuscleSet::from_muscles([9]);
        assert!(!is_eligible(&ex_hot, &req));

        for req in &failing {
            assert!(!is_eligible(&ex, req), "expected rejection for {:?}", req);
        }
    }

    #[test]
    fn test_eligible_indices_preserve_catalog_order() {
        let mut away = exercise();
        away.locations = LocationSet::PARK;
        let (catalog, _) = Catalog::from_exercises(vec![exercise(), away, exercise()]);

        assert_eq!(eligible_indices(&catalog, &request()), vec![0, 2]);
    }
}
