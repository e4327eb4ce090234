//! The fixed-point driver: runs every rule once per pass until each node of
//! the hierarchy has an entry or the iteration cap is reached.
use super::error::CompositionError;
use super::ledger::Assignments;
use super::rules::{abstraction, functional, lexical, modification, non_branching, Scope};
use crate::config::{ComposeConfig, ExhaustionPolicy};
use crate::lexicon::Lexicon;
use crate::store::HierarchyMap;
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;

/// The outcome of one composition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    assignments: Assignments,
    iterations: usize,
}

impl Composition {
    pub fn assignments(&self) -> &Assignments { &self.assignments }

    /// Number of full rule passes executed.
    pub fn iterations(&self) -> usize { self.iterations }

    /// True if some node carries the `?` marker.
    pub fn has_errors(&self) -> bool { self.assignments.has_errors() }

    pub fn types(&self) -> BTreeMap<String, String> { self.assignments.types() }
    pub fn rules(&self) -> BTreeMap<String, String> { self.assignments.rules() }

    pub fn into_assignments(self) -> Assignments { self.assignments }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Composition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Composition", 3)?;
        state.serialize_field("types", &self.types())?;
        state.serialize_field("rules", &self.rules())?;
        state.serialize_field("iterations", &self.iterations)?;
        state.end()
    }
}

/// Steps a single composition run. Exposed so callers can observe the
/// ledger between passes; most code wants [`compose`] or [`compose_with`].
pub struct Composer<'a> {
    scope: Scope<'a>,
    config: ComposeConfig,
    ledger: Assignments,
    iterations: usize,
}

impl<'a> Composer<'a> {
    pub fn new(hierarchy: &'a HierarchyMap, lexicon: &'a Lexicon, config: ComposeConfig) -> Self {
        Self {
            scope: Scope { hierarchy, lexicon },
            config,
            ledger: Assignments::for_hierarchy(hierarchy),
            iterations: 0,
        }
    }

    pub fn ledger(&self) -> &Assignments { &self.ledger }
    pub fn iterations(&self) -> usize { self.iterations }

    /// Runs Terminal Typing, Non-Branching, Functional Application, Predicate
    /// Abstraction and Predicate Modification once, in that order. Returns the
    /// number of entries written.
    pub fn pass(&mut self) -> Result<usize, CompositionError> {
        self.iterations += 1;
        let mut assigned = lexical::apply(&self.scope, &mut self.ledger)?;
        assigned += non_branching::apply(&self.scope, &mut self.ledger)?;
        assigned += functional::apply(&self.scope, &mut self.ledger)?;
        assigned += abstraction::apply(&self.scope, &mut self.ledger)?;
        assigned += modification::apply(&self.scope, &mut self.ledger)?;

        tracing::debug!(
            iteration = self.iterations,
            assigned,
            open = self.ledger.unresolved().len(),
            "composition pass"
        );

        if self.config.on_exhaustion == ExhaustionPolicy::Fail {
            self.check_clash()?;
        }
        Ok(assigned)
    }

    /// Passes until every node has an entry or the cap is hit.
    pub fn run(mut self) -> Result<Composition, CompositionError> {
        while !self.ledger.is_complete() {
            if self.iterations >= self.config.max_iterations {
                return self.exhaust();
            }
            self.pass()?;
        }
        tracing::info!(
            iterations = self.iterations,
            nodes = self.ledger.len(),
            marked = self.ledger.errors().len(),
            "composition finished"
        );
        Ok(self.finish())
    }

    fn exhaust(mut self) -> Result<Composition, CompositionError> {
        let unresolved: Vec<String> = self.ledger.unresolved().into_iter().map(str::to_string).collect();
        tracing::warn!(
            iterations = self.iterations,
            unresolved = ?unresolved,
            "iteration cap reached with open nodes"
        );
        match self.config.on_exhaustion {
            ExhaustionPolicy::Fail => Err(CompositionError::NotConverged {
                iterations: self.iterations,
                unresolved,
            }),
            ExhaustionPolicy::Mark => {
                for label in &unresolved {
                    self.ledger.mark_error(label);
                }
                Ok(self.finish())
            }
        }
    }

    /// Before exhaustion the only `?` entries are Predicate Modification clashes.
    fn check_clash(&self) -> Result<(), CompositionError> {
        let Some(mother) = self.ledger.errors().first().map(|m| m.to_string()) else {
            return Ok(());
        };
        let found = self
            .scope
            .hierarchy
            .get(&mother)
            .and_then(|daughters| daughters.first())
            .and_then(|d| self.ledger.typing(d))
            .map(ToString::to_string)
            .unwrap_or_default();
        Err(CompositionError::Mismatch { mother, found })
    }

    fn finish(self) -> Composition {
        Composition {
            assignments: self.ledger,
            iterations: self.iterations,
        }
    }
}

/// Composes one hierarchy with the default policy and the given cap.
///
/// # Errors
/// - `CompositionError::UnknownTerminal` for a unary mother over a word the
///   lexicon does not know.
/// - `CompositionError::TreeStructure` for a daughter that is neither a typed
///   terminal nor a mother.
pub fn compose(
    hierarchy: &HierarchyMap,
    lexicon: &Lexicon,
    max_iterations: usize,
) -> Result<Composition, CompositionError> {
    let config = ComposeConfig { max_iterations, ..ComposeConfig::default() };
    compose_with(hierarchy, lexicon, &config)
}

pub fn compose_with(
    hierarchy: &HierarchyMap,
    lexicon: &Lexicon,
    config: &ComposeConfig,
) -> Result<Composition, CompositionError> {
    Composer::new(hierarchy, lexicon, config.clone()).run()
}

/// Composes independent hierarchies in parallel against one shared lexicon.
/// Results keep the input order.
pub fn compose_all(
    hierarchies: &[HierarchyMap],
    lexicon: &Lexicon,
    config: &ComposeConfig,
) -> Vec<Result<Composition, CompositionError>> {
    hierarchies
        .par_iter()
        .map(|hierarchy| compose_with(hierarchy, lexicon, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_ITERATIONS;
    use crate::notation::parse_hierarchy;
    use crate::type_system::ledger::{Rule, Typing};
    use crate::type_system::SemType;

    fn lexicon() -> Lexicon {
        Lexicon::from_json_str(
            r#"{
                "e": ["Andrew", "Mathis", "Nimmerland", "Mark"],
                "<e, t>": ["Junge", "Fee", "fliegt", "Blumen", "flowers", "tanzt"],
                "<e, <e, t>>": ["hits", "aus", "belästigt", "beobachtet", "bought"],
                "<<e, t>, e>": ["der", "die"],
                "<<e, t>, <<e, t>, t>>": ["all"],
                "": ["wo"],
                "index": ["der_{RP}", "alle"],
                "trace": ["$t$"]
            }"#,
        )
        .unwrap()
    }

    fn map(pairs: &[(&str, &[&str])]) -> HierarchyMap {
        HierarchyMap::from_pairs(pairs.iter().map(|(l, d)| (*l, d.iter().copied()))).unwrap()
    }

    fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    const ANDREW: &str =
        r"[.\node(top){S }; [.NP^1 [.N^1 Andrew ] ] [.VP [.V hits ] [.NP^2 [.N^2 Mathis ] ] ] ]";

    const JUNGE: &str = r"[.\node(top){S }; [.DP^1 [.D^1 der ] [.NP [.N$''$ [.N$'$ [.N Junge ] ] [.CP [.DP^2 der_{RP} ] [.C$'$ [.C wo ] [.S$'$ [.$t$ ] [.VP [.DP^3 [.D^3 die ] [.NP^2 [.N$''$^2 [.N$'$^2 [.N^2 Fee ] ] [.PP [.P aus ] [.DP^4 Nimmerland ] ] ] ] ]  [.V belästigt ] ] ] ] ] ] ] ]  [.VP^2 [.V^2 fliegt ] ] ]";

    #[test]
    fn test_transitive_sentence_composes_to_t() {
        let (_, hierarchy) = parse_hierarchy(ANDREW).unwrap();
        let composition = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();

        assert_eq!(
            composition.types(),
            expected(&[
                ("S", "t"),
                ("NP^1", "e"),
                ("N^1", "e"),
                ("VP", "<e, t>"),
                ("V", "<e, <e, t>>"),
                ("NP^2", "e"),
                ("N^2", "e"),
                ("Andrew", "e"),
                ("hits", "<e, <e, t>>"),
                ("Mathis", "e"),
            ])
        );
        assert_eq!(
            composition.rules(),
            expected(&[
                ("S", "FA-right"),
                ("NP^1", "NN"),
                ("N^1", "NN"),
                ("VP", "FA-left"),
                ("V", "NN"),
                ("NP^2", "NN"),
                ("N^2", "NN"),
                ("Andrew", "TN_1"),
                ("hits", "TN_1"),
                ("Mathis", "TN_1"),
            ])
        );
        assert_eq!(composition.iterations(), 3);
        assert!(!composition.has_errors());
    }

    #[test]
    fn test_relative_clause_composes_fully() {
        let (_, hierarchy) = parse_hierarchy(JUNGE).unwrap();
        let composition = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();

        assert_eq!(
            composition.types(),
            expected(&[
                ("S", "t"),
                ("DP^1", "e"),
                ("D^1", "<<e, t>, e>"),
                ("NP", "<e, t>"),
                ("N$''$", "<e, t>"),
                ("N$'$", "<e, t>"),
                ("N", "<e, t>"),
                ("CP", "<e, t>"),
                ("DP^2", "-"),
                ("C$'$", "t"),
                ("C", ""),
                ("S$'$", "t"),
                ("$t$", "e"),
                ("VP", "<e, t>"),
                ("DP^3", "e"),
                ("D^3", "<<e, t>, e>"),
                ("NP^2", "<e, t>"),
                ("N$''$^2", "<e, t>"),
                ("N$'$^2", "<e, t>"),
                ("N^2", "<e, t>"),
                ("PP", "<e, t>"),
                ("P", "<e, <e, t>>"),
                ("DP^4", "e"),
                ("V", "<e, <e, t>>"),
                ("VP^2", "<e, t>"),
                ("V^2", "<e, t>"),
                ("der", "<<e, t>, e>"),
                ("Junge", "<e, t>"),
                ("der_{RP}", "-"),
                ("wo", ""),
                ("die", "<<e, t>, e>"),
                ("Fee", "<e, t>"),
                ("aus", "<e, <e, t>>"),
                ("Nimmerland", "e"),
                ("belästigt", "<e, <e, t>>"),
                ("fliegt", "<e, t>"),
            ])
        );
        assert_eq!(
            composition.rules(),
            expected(&[
                ("S", "FA-right"),
                ("DP^1", "FA-left"),
                ("D^1", "NN"),
                ("NP", "NN"),
                ("N$''$", "PM"),
                ("N$'$", "NN"),
                ("N", "NN"),
                ("CP", "PA"),
                ("DP^2", "NN"),
                ("C$'$", "NN"),
                ("C", "NN"),
                ("S$'$", "FA-right"),
                ("$t$", "TN_2"),
                ("VP", "FA-right"),
                ("DP^3", "FA-left"),
                ("D^3", "NN"),
                ("NP^2", "NN"),
                ("N$''$^2", "PM"),
                ("N$'$^2", "NN"),
                ("N^2", "NN"),
                ("PP", "FA-left"),
                ("P", "NN"),
                ("DP^4", "NN"),
                ("V", "NN"),
                ("VP^2", "NN"),
                ("V^2", "NN"),
                ("der", "TN_1"),
                ("Junge", "TN_1"),
                ("der_{RP}", "-"),
                ("wo", "-"),
                ("die", "TN_1"),
                ("Fee", "TN_1"),
                ("aus", "TN_1"),
                ("Nimmerland", "TN_1"),
                ("belästigt", "TN_1"),
                ("fliegt", "TN_1"),
            ])
        );
        assert!(composition.iterations() < DEFAULT_MAX_ITERATIONS);
    }

    /// A quantifier phrase whose index has nothing to bind: the root never
    /// resolves and is marked once the cap is reached.
    fn unbound_index() -> HierarchyMap {
        map(&[
            ("S", &["NP", "VP"]),
            ("NP", &["D", "N"]),
            ("D", &["alle"]),
            ("N", &["Blumen"]),
            ("VP", &["V", "T"]),
            ("V", &["beobachtet"]),
            ("T", &["$t$"]),
        ])
    }

    #[test]
    fn test_unresolvable_root_is_marked_after_cap() {
        let composition = compose(&unbound_index(), &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();
        let ledger = composition.assignments();

        assert_eq!(composition.iterations(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(ledger.typing("S"), Some(&Typing::Error));
        assert_eq!(ledger.rule("S"), Some(Rule::Error));
        assert_eq!(ledger.errors(), vec!["S"]);
        assert_eq!(ledger.type_of("NP"), Some(&SemType::parse("<e, <e, t>>").unwrap()));
        assert_eq!(ledger.rule("NP"), Some(Rule::PredicateAbstraction));
        assert_eq!(ledger.rule("VP"), Some(Rule::FaLeftIsFunction));
    }

    #[test]
    fn test_custom_cap_is_honoured() {
        let composition = compose(&unbound_index(), &lexicon(), 4).unwrap();
        assert_eq!(composition.iterations(), 4);
        assert!(composition.has_errors());
    }

    #[test]
    fn test_fail_policy_reports_unconverged_nodes() {
        let config = ComposeConfig::default().fail_fast();
        let err = compose_with(&unbound_index(), &lexicon(), &config).unwrap_err();
        assert_eq!(
            err,
            CompositionError::NotConverged { iterations: DEFAULT_MAX_ITERATIONS, unresolved: vec!["S".into()] }
        );
    }

    #[test]
    fn test_object_quantifier_in_situ_does_not_compose() {
        let hierarchy = map(&[
            ("S", &["NP_1", "VP"]),
            ("NP_1", &["N_1"]),
            ("N_1", &["Mark"]),
            ("VP", &["V'"]),
            ("V'", &["V", "NP_2"]),
            ("V", &["bought"]),
            ("NP_2", &["D", "N_2"]),
            ("D", &["all"]),
            ("N_2", &["flowers"]),
        ]);
        let composition = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();
        assert_eq!(composition.assignments().errors(), vec!["S", "VP", "V'"]);
        assert_eq!(composition.types()["NP_2"], "<<e, t>, t>");
    }

    #[test]
    fn test_undefined_mother_is_a_structure_error() {
        let hierarchy = map(&[("S", &["NP", "tanzt"])]);
        let err = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap_err();
        assert_eq!(
            err,
            CompositionError::TreeStructure { mother: "S".into(), missing: "NP".into(), note: None }
        );
    }

    #[test]
    fn test_unknown_terminal_is_a_lexicon_error() {
        let hierarchy = map(&[("S", &["NP", "VP"]), ("NP", &["Klaus"]), ("VP", &["schmörlt"])]);
        let err = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap_err();
        assert_eq!(err, CompositionError::UnknownTerminal { terminal: "Klaus".into(), hint: None });
    }

    #[test]
    fn test_unknown_terminal_suggests_capitalization() {
        let hierarchy = map(&[("S", &["NP", "VP"]), ("NP", &["andrew"]), ("VP", &["tanzt"])]);
        let err = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap_err();
        assert_eq!(err.to_string(), "Lexicon error: terminal node 'andrew' not in lexicon (did you mean 'Andrew'?)");
    }

    #[test]
    fn test_modification_clash_marks_mother() {
        let hierarchy = map(&[("S", &["NP^1", "NP^2"]), ("NP^1", &["Andrew"]), ("NP^2", &["Mathis"])]);
        let composition = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();
        assert_eq!(composition.types()["S"], "?");
        assert_eq!(composition.rules()["S"], "?");
        // NN types both sisters before PM runs, so one pass settles it.
        assert_eq!(composition.iterations(), 1);
    }

    #[test]
    fn test_fail_policy_reports_modification_clash() {
        let hierarchy = map(&[("S", &["NP^1", "NP^2"]), ("NP^1", &["Andrew"]), ("NP^2", &["Mathis"])]);
        let config = ComposeConfig::default().fail_fast();
        let err = compose_with(&hierarchy, &lexicon(), &config).unwrap_err();
        assert_eq!(err, CompositionError::Mismatch { mother: "S".into(), found: "e".into() });
    }

    #[test]
    fn test_composition_is_idempotent() {
        let (_, hierarchy) = parse_hierarchy(JUNGE).unwrap();
        let lexicon = lexicon();
        let first = compose(&hierarchy, &lexicon, DEFAULT_MAX_ITERATIONS).unwrap();
        let second = compose(&hierarchy, &lexicon, DEFAULT_MAX_ITERATIONS).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.types(), second.types());
        assert_eq!(first.iterations(), second.iterations());
    }

    #[test]
    fn test_resolved_entries_never_change() {
        let (_, hierarchy) = parse_hierarchy(JUNGE).unwrap();
        let lexicon = lexicon();
        let mut composer = Composer::new(&hierarchy, &lexicon, ComposeConfig::default());

        let mut previous = composer.ledger().clone();
        while !composer.ledger().is_complete() {
            composer.pass().unwrap();
            for (label, derivation) in previous.iter() {
                assert_eq!(composer.ledger().get(label), Some(derivation), "'{}' changed", label);
            }
            assert!(composer.ledger().unresolved().len() <= previous.unresolved().len());
            previous = composer.ledger().clone();
        }
    }

    #[test]
    fn test_compose_all_keeps_input_order() {
        let hierarchies = vec![
            parse_hierarchy(ANDREW).unwrap().1,
            map(&[("S", &["NP", "tanzt"])]),
            unbound_index(),
        ];
        let results = compose_all(&hierarchies, &lexicon(), &ComposeConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().types()["S"], "t");
        assert!(matches!(results[1], Err(CompositionError::TreeStructure { .. })));
        assert!(results[2].as_ref().unwrap().has_errors());
    }

    #[test]
    fn test_serializes_for_presentation() {
        let hierarchy = map(&[("S", &["NP", "VP"]), ("NP", &["Andrew"]), ("VP", &["tanzt"])]);
        let composition = compose(&hierarchy, &lexicon(), DEFAULT_MAX_ITERATIONS).unwrap();
        let value: serde_json::Value = serde_json::from_str(&composition.to_json().unwrap()).unwrap();
        assert_eq!(value["types"]["S"], "t");
        assert_eq!(value["rules"]["S"], "FA-right");
        assert_eq!(value["rules"]["Andrew"], "TN_1");
        assert_eq!(value["iterations"], 1);
    }
}
