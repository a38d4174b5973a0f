//! First-class invariants for the ring game.
//!
//! Invariants are logical properties that must hold after every accepted
//! command. They are testable independently and are checked as
//! postconditions in debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        collect(violations)
    }
}

pub mod graph_symmetric;
pub mod occupancy_consistent;
pub mod ownership;
pub mod selection_consistent;

pub use graph_symmetric::GraphSymmetricInvariant;
pub use occupancy_consistent::OccupancyConsistentInvariant;
pub use ownership::OwnershipInvariant;
pub use selection_consistent::SelectionConsistentInvariant;

/// All per-state invariants as a composable set.
pub type RingsInvariants = (
    OccupancyConsistentInvariant,
    OwnershipInvariant,
    SelectionConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FieldId, GameConfig, GameSetup, PieceId};

    #[test]
    fn test_invariant_set_holds_for_standard_setup() {
        let game = GameSetup::default().start().unwrap();
        assert!(RingsInvariants::check_all(game.state()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = GameSetup::default().start().unwrap();
        let state = game.state_mut();
        state.selected = Some(PieceId(0));

        let violations = RingsInvariants::check_all(state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            SelectionConsistentInvariant::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameSetup::new(GameConfig::default())
            .place(Color::Gray, None, FieldId(3))
            .start()
            .unwrap();

        type TwoInvariants = (OccupancyConsistentInvariant, OwnershipInvariant);
        assert!(TwoInvariants::check_all(game.state()).is_ok());
    }
}
