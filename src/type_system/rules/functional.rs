//! Functional Application.
use super::{both_typed, Scope};
use crate::type_system::error::CompositionError;
use crate::type_system::ledger::{Assignments, Rule};

/// For a branching mother whose daughters both carry concrete types: if the
/// right daughter is a function over the left one's type, the mother gets its
/// codomain (`FA-right`); otherwise the mirror case (`FA-left`). Mothers that
/// fit neither direction stay open.
pub(crate) fn apply(scope: &Scope, ledger: &mut Assignments) -> Result<usize, CompositionError> {
    let mut assigned = 0;
    for mother in scope.hierarchy.iter() {
        if mother.daughters.len() != 2 || ledger.is_resolved(&mother.label) {
            continue;
        }
        let pair = scope.pair(ledger, &mother.label, &mother.daughters)?;
        let Some((left, right)) = both_typed(&pair) else {
            continue;
        };
        if !left.is_concrete() || !right.is_concrete() {
            continue;
        }

        let result = if let Some(codomain) = right.apply_to(left) {
            Some((codomain.clone(), Rule::FaRightIsFunction))
        } else {
            left.apply_to(right).map(|codomain| (codomain.clone(), Rule::FaLeftIsFunction))
        };
        if let Some((ty, rule)) = result {
            if ledger.assign_type(&mother.label, ty, rule) {
                assigned += 1;
            }
        }
    }
    Ok(assigned)
}
