//! Non-Branching: unary mothers inherit their daughter's type, and a vacuous
//! sister is transparent to composition.
use super::Scope;
use crate::type_system::error::CompositionError;
use crate::type_system::ledger::{Assignments, Rule, Typing};
use crate::type_system::SemType;

pub(crate) fn apply(scope: &Scope, ledger: &mut Assignments) -> Result<usize, CompositionError> {
    let mut assigned = 0;
    for mother in scope.hierarchy.iter() {
        if ledger.is_resolved(&mother.label) {
            continue;
        }
        let inherited = match mother.daughters.as_slice() {
            [only] => match scope.daughter(ledger, &mother.label, only)? {
                Some(Typing::Type(ty)) => Some(ty),
                _ => None,
            },
            [_, _] => match scope.pair(ledger, &mother.label, &mother.daughters)? {
                (Some(Typing::Type(SemType::Vacuous)), other) | (other, Some(Typing::Type(SemType::Vacuous))) => {
                    other.and_then(|t| t.as_type().cloned())
                }
                _ => None,
            },
            _ => None,
        };
        if let Some(ty) = inherited {
            if ledger.assign_type(&mother.label, ty, Rule::NonBranching) {
                assigned += 1;
            }
        }
    }
    Ok(assigned)
}
