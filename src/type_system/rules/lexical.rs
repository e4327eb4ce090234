//! Terminal Typing: seeds the ledger from the lexicon.
use super::Scope;
use crate::type_system::error::CompositionError;
use crate::type_system::ledger::{Assignments, Typing};

/// Types the single terminal daughter of every unary mother, and the
/// index, trace and pronoun daughters of branching mothers.
///
/// A unary mother's daughter that is neither in the lexicon nor a mother of
/// the hierarchy is an unknown terminal. Branching mothers never raise here:
/// their other daughters are left to the later rules.
pub(crate) fn apply(scope: &Scope, ledger: &mut Assignments) -> Result<usize, CompositionError> {
    let mut assigned = 0;
    for mother in scope.hierarchy.iter() {
        match mother.daughters.as_slice() {
            [only] => match scope.lexicon.category(only) {
                Some(category) => {
                    let (ty, rule) = category.classify();
                    if ledger.assign(only, Typing::Type(ty), rule) {
                        assigned += 1;
                    }
                }
                None if scope.hierarchy.contains(only) => {}
                None => {
                    return Err(CompositionError::UnknownTerminal {
                        terminal: only.clone(),
                        hint: scope.lexicon.case_insensitive_match(only).map(str::to_string),
                    })
                }
            },
            [left, right] => {
                for daughter in [left, right] {
                    if let Some(category) = scope.lexicon.category(daughter) {
                        if category.is_placeholder() {
                            let (ty, rule) = category.classify();
                            if ledger.assign(daughter, Typing::Type(ty), rule) {
                                assigned += 1;
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(assigned)
}
