//! Predicate Modification.
use super::{both_typed, Scope};
use crate::type_system::error::CompositionError;
use crate::type_system::ledger::{Assignments, Rule};
use crate::type_system::SemType;

/// Sisters of one identical type. `<e, t>` sisters give the mother `<e, t>`;
/// any other shared type is a clash and the mother is marked `?` at once.
///
/// Vacuous sisters are left to Non-Branching.
pub(crate) fn apply(scope: &Scope, ledger: &mut Assignments) -> Result<usize, CompositionError> {
    let mut assigned = 0;
    for mother in scope.hierarchy.iter() {
        if mother.daughters.len() != 2 || ledger.is_resolved(&mother.label) {
            continue;
        }
        let pair = scope.pair(ledger, &mother.label, &mother.daughters)?;
        let shared = match both_typed(&pair) {
            Some((left, right)) if left == right && *left != SemType::Vacuous => left,
            _ => continue,
        };

        let written = if *shared == SemType::property() {
            ledger.assign_type(&mother.label, shared.clone(), Rule::PredicateModification)
        } else {
            tracing::debug!(mother = %mother.label, found = %shared, "predicate modification clash");
            ledger.mark_error(&mother.label)
        };
        if written {
            assigned += 1;
        }
    }
    Ok(assigned)
}
