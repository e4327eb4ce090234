//! The composition rules, one module per rule, applied in a fixed order by
//! the [`Composer`](super::composer::Composer).
//!
//! Every rule has the same shape: walk the hierarchy, write assignments for
//! mothers that are still open, and return how many it wrote.
pub mod abstraction;
pub mod functional;
pub mod lexical;
pub mod modification;
pub mod non_branching;

use super::error::CompositionError;
use super::ledger::{Assignments, Typing};
use crate::lexicon::Lexicon;
use crate::store::HierarchyMap;

/// The read-only inputs every rule sees.
pub(crate) struct Scope<'a> {
    pub hierarchy: &'a HierarchyMap,
    pub lexicon: &'a Lexicon,
}

impl<'a> Scope<'a> {
    /// The current entry for a daughter of `mother`.
    ///
    /// `Ok(None)` means the daughter is a mother that is not resolved yet. A
    /// daughter with no slot at all is neither a typed terminal nor a mother,
    /// which is a structural error in the hierarchy.
    pub fn daughter(
        &self,
        ledger: &Assignments,
        mother: &str,
        daughter: &str,
    ) -> Result<Option<Typing>, CompositionError> {
        match ledger.slot(daughter) {
            Some(entry) => Ok(entry.map(|d| d.typing.clone())),
            None => Err(CompositionError::TreeStructure {
                mother: mother.to_string(),
                missing: daughter.to_string(),
                note: self.missing_note(daughter),
            }),
        }
    }

    /// Both daughters of a branching mother, left first.
    pub fn pair(
        &self,
        ledger: &Assignments,
        mother: &str,
        daughters: &[String],
    ) -> Result<(Option<Typing>, Option<Typing>), CompositionError> {
        let left = self.daughter(ledger, mother, &daughters[0])?;
        let right = self.daughter(ledger, mother, &daughters[1])?;
        Ok((left, right))
    }

    fn missing_note(&self, daughter: &str) -> Option<String> {
        if self.lexicon.contains(daughter) {
            Some(format!(
                "'{}' is in the lexicon but only indices, traces and pronouns are typed directly under a branching node; give it its own non-branching mother",
                daughter
            ))
        } else {
            None
        }
    }
}

/// Resolved types of both daughters, if both have one.
pub(crate) fn both_typed(pair: &(Option<Typing>, Option<Typing>)) -> Option<(&super::SemType, &super::SemType)> {
    match pair {
        (Some(Typing::Type(l)), Some(Typing::Type(r))) => Some((l, r)),
        _ => None,
    }
}
