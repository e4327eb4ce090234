use crate::store::{Child, NodeId, Tree};
use crate::type_system::{Assignments, Composition, SemType, Typing};
use std::fmt::Write;

/// Renders the tree with each node's derived type and rule:
///
/// ```text
/// S : t [FA-right]
/// |-- NP : e [NN]
/// |  `-- Andrew : e [TN_1]
/// `-- VP : <e, t> [NN]
///    `-- tanzt : <e, t> [TN_1]
/// ```
pub fn format_derivation(tree: &Tree, composition: &Composition) -> String {
    let mut tracer = Tracer {
        tree,
        assignments: composition.assignments(),
        output: String::new(),
    };

    if tree.count() == 0 {
        let _ = writeln!(tracer.output, "Error: empty tree");
        return tracer.output;
    }

    let root = tree.root();
    let _ = writeln!(
        tracer.output,
        "DERIVATION for '{}' ({} iterations{}):",
        tree.label(root),
        composition.iterations(),
        if composition.has_errors() { ", incomplete" } else { "" }
    );
    let _ = writeln!(tracer.output, "--------------------------------------------------");
    tracer.trace_node(root, "");
    tracer.output
}

struct Tracer<'a> {
    tree: &'a Tree,
    assignments: &'a Assignments,
    output: String,
}

impl<'a> Tracer<'a> {
    fn trace_node(&mut self, id: NodeId, prefix: &str) {
        let label = self.tree.label(id);
        let line = self.annotate(label);
        let _ = writeln!(self.output, "{}{}", prefix, line);

        let stem = self.build_child_stem(prefix);
        let children = self.tree.children(id);
        for (i, child) in children.iter().enumerate() {
            let connector = if i == children.len() - 1 { "`-- " } else { "|-- " };
            let full_prefix = format!("{}{}", stem, connector);
            match child {
                Child::Node(child_id) => self.trace_node(*child_id, &full_prefix),
                Child::Leaf(word) => {
                    let line = self.annotate(word);
                    let _ = writeln!(self.output, "{}{}", full_prefix, line);
                }
            }
        }
    }

    fn annotate(&self, label: &str) -> String {
        match self.assignments.get(label) {
            Some(derivation) => {
                let ty = match &derivation.typing {
                    Typing::Type(SemType::Vacuous) => "\"\"".to_string(),
                    other => other.to_string(),
                };
                format!("{} : {} [{}]", label, ty, derivation.rule)
            }
            None => label.to_string(),
        }
    }

    fn build_child_stem(&self, current_prefix: &str) -> String {
        current_prefix.replace("`-- ", "   ").replace("|-- ", "|  ")
    }
}
