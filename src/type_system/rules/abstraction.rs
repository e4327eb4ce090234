//! Predicate Abstraction.
use super::{both_typed, Scope};
use crate::type_system::error::CompositionError;
use crate::type_system::ledger::{Assignments, Rule};
use crate::type_system::SemType;

/// A branching mother with one untyped daughter (an index or trace
/// placeholder) and one concrete daughter of type `T` gets `<e, T>`.
pub(crate) fn apply(scope: &Scope, ledger: &mut Assignments) -> Result<usize, CompositionError> {
    let mut assigned = 0;
    for mother in scope.hierarchy.iter() {
        if mother.daughters.len() != 2 || ledger.is_resolved(&mother.label) {
            continue;
        }
        let pair = scope.pair(ledger, &mother.label, &mother.daughters)?;
        let body = match both_typed(&pair) {
            Some((SemType::Untyped, body)) | Some((body, SemType::Untyped)) if body.is_concrete() => body.clone(),
            _ => continue,
        };
        if ledger.assign_type(&mother.label, SemType::func(SemType::entity(), body), Rule::PredicateAbstraction) {
            assigned += 1;
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::store::HierarchyMap;
    use rstest::rstest;

    fn apply_to_pair(left: &str, right: &str) -> Assignments {
        let hierarchy = HierarchyMap::from_pairs([("XP", vec!["L", "R"]), ("L", vec![]), ("R", vec![])]).unwrap();
        let lexicon = Lexicon::new();
        let scope = Scope { hierarchy: &hierarchy, lexicon: &lexicon };
        let mut ledger = Assignments::for_hierarchy(&hierarchy);
        ledger.assign_type("L", SemType::parse(left).unwrap(), Rule::NoRule);
        ledger.assign_type("R", SemType::parse(right).unwrap(), Rule::TerminalContentful);
        apply(&scope, &mut ledger).unwrap();
        ledger
    }

    #[rstest]
    #[case("-", "t", "<e, t>")]
    #[case("-", "<e, t>", "<e, <e, t>>")]
    #[case("<e, t>", "-", "<e, <e, t>>")]
    fn test_abstracts_over_placeholder(#[case] left: &str, #[case] right: &str, #[case] expected: &str) {
        let ledger = apply_to_pair(left, right);
        assert_eq!(ledger.type_of("XP"), Some(&SemType::parse(expected).unwrap()));
        assert_eq!(ledger.rule("XP"), Some(Rule::PredicateAbstraction));
    }

    #[rstest]
    #[case("-", "-")]
    #[case("-", "")]
    #[case("e", "t")]
    fn test_needs_exactly_one_placeholder_and_a_concrete_body(#[case] left: &str, #[case] right: &str) {
        assert!(!apply_to_pair(left, right).is_resolved("XP"));
    }

    #[test]
    fn test_waits_for_open_body() {
        let hierarchy = HierarchyMap::from_pairs([("XP", vec!["1", "S"]), ("S", vec![])]).unwrap();
        let lexicon = Lexicon::new();
        let scope = Scope { hierarchy: &hierarchy, lexicon: &lexicon };
        let mut ledger = Assignments::for_hierarchy(&hierarchy);
        ledger.assign_type("1", SemType::Untyped, Rule::NoRule);
        assert_eq!(apply(&scope, &mut ledger).unwrap(), 0);
    }
}
