//! Reads the bracketed qtree-style notation into a [`Tree`].
//!
//! Grammar: a node is `[.LABEL daughters... ]`, a daughter is a nested node or
//! a whitespace-delimited terminal. The outermost node may carry its label in
//! a root marker instead: `[.\node(top){S }; ... ]`.
use crate::store::{BracketError, Child, HierarchyError, NodeId, Tree};
use std::borrow::Cow;

const ROOT_MARKER: &str = "\\node(";
const DOUBLED_ROOT_MARKER: &str = "\\\\node(";
/// What `\node(` turns into when the backslash was consumed as a `\n` escape.
const SWALLOWED_ROOT_MARKER: &str = "\node(";

/// Normalizes the root-marker escapes and rejects a marker whose backslash was
/// lost to a newline escape.
pub fn normalize_escapes(text: &str) -> Result<Cow<'_, str>, HierarchyError> {
    if let Some(pos) = text.find(SWALLOWED_ROOT_MARKER) {
        return Err(HierarchyError::Escape(format!(
            "byte {}: the backslash of '\\node' was read as a newline escape; write it as '\\\\node' or use a raw string",
            pos
        )));
    }
    if text.contains(DOUBLED_ROOT_MARKER) {
        Ok(Cow::Owned(text.replace(DOUBLED_ROOT_MARKER, ROOT_MARKER)))
    } else {
        Ok(Cow::Borrowed(text))
    }
}

/// Reads a single tree. Fails on unbalanced brackets, stray terminals, a
/// second root, or a node gaining a third daughter.
pub fn read_tree(src: &str) -> Result<Tree, HierarchyError> {
    let mut reader = Reader {
        src,
        pos: 0,
        tree: Tree::new(),
        open: Vec::new(),
    };
    reader.run()?;
    Ok(reader.tree)
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    tree: Tree,
    open: Vec<NodeId>,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn read_token(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !c.is_whitespace() && c != '[' && c != ']') {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn run(&mut self) -> Result<(), HierarchyError> {
        loop {
            self.skip_ws();
            let start = self.pos;
            match self.peek() {
                None => break,
                Some('[') => {
                    self.bump();
                    if self.peek() == Some('.') {
                        self.bump();
                    }
                    let label = if self.src[self.pos..].starts_with(ROOT_MARKER) {
                        self.read_root_marker(start)?
                    } else {
                        self.read_token().to_string()
                    };
                    if label.is_empty() {
                        return Err(BracketError::MissingLabel { position: start }.into());
                    }
                    self.open_node(label, start)?;
                }
                Some(']') => {
                    if self.open.pop().is_none() {
                        return Err(BracketError::UnmatchedClose { position: start }.into());
                    }
                    self.bump();
                }
                Some(_) => {
                    let token = self.read_token();
                    match self.open.last() {
                        Some(&parent) => self.attach(parent, Child::Leaf(token.to_string()), token)?,
                        None => {
                            return Err(BracketError::StrayTerminal {
                                token: token.to_string(),
                                position: start,
                            }
                            .into())
                        }
                    }
                }
            }
        }

        if let Some(&innermost) = self.open.last() {
            return Err(BracketError::Unclosed {
                open: self.open.len(),
                innermost: self.tree.label(innermost).to_string(),
            }
            .into());
        }
        if self.tree.count() == 0 {
            return Err(HierarchyError::Empty);
        }
        Ok(())
    }

    /// Parses `\node(NAME){LABEL };` and returns the trimmed label.
    fn read_root_marker(&mut self, start: usize) -> Result<String, HierarchyError> {
        if self.tree.count() > 0 {
            return Err(marker_error(start, "only the outermost node may carry a root marker"));
        }
        self.pos += ROOT_MARKER.len();

        let rest = &self.src[self.pos..];
        let close = rest
            .find(')')
            .ok_or_else(|| marker_error(start, "missing ')' after the node name"))?;
        self.pos += close + 1;

        if self.peek() != Some('{') {
            return Err(marker_error(start, "expected '{' after '\\node(...)'"));
        }
        self.bump();

        let rest = &self.src[self.pos..];
        let end = rest
            .find('}')
            .ok_or_else(|| marker_error(start, "missing '}' after the root label"))?;
        let label = rest[..end].trim().to_string();
        self.pos += end + 1;

        if self.peek() == Some(';') {
            self.bump();
        }
        Ok(label)
    }

    fn open_node(&mut self, label: String, start: usize) -> Result<(), HierarchyError> {
        if self.open.is_empty() && self.tree.count() > 0 {
            return Err(BracketError::MultipleRoots { position: start }.into());
        }
        let id = self.tree.add_node(label.clone());
        if let Some(&parent) = self.open.last() {
            self.attach(parent, Child::Node(id), &label)?;
        }
        self.open.push(id);
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: Child, child_name: &str) -> Result<(), HierarchyError> {
        if self.tree.children(parent).len() == 2 {
            let mut daughters: Vec<String> = self
                .tree
                .children(parent)
                .iter()
                .map(|c| match c {
                    Child::Node(id) => self.tree.label(*id).to_string(),
                    Child::Leaf(word) => word.clone(),
                })
                .collect();
            daughters.push(child_name.to_string());
            return Err(HierarchyError::TernaryBranching {
                label: self.tree.label(parent).to_string(),
                daughters,
            });
        }
        self.tree.push_child(parent, child);
        Ok(())
    }
}

fn marker_error(position: usize, reason: &str) -> HierarchyError {
    BracketError::RootMarker {
        position,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_root_marker_label() {
        let tree = read_tree(r"[.\node(top){NP }; [.AP schuldiger ] [.N Idiot ] ]").unwrap();
        assert_eq!(tree.to_string(), "(NP (AP schuldiger) (N Idiot))");
    }

    #[test]
    fn test_reads_plain_root() {
        let tree = read_tree("[.S [.NP Andrew ] [.VP sleeps ] ]").unwrap();
        assert_eq!(tree.label(tree.root()), "S");
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_leafless_nodes_are_kept() {
        let tree = read_tree(r"[.\node(top){XP }; [.1 ] [.S [.$t$ ] [.VP sleeps ] ] ]").unwrap();
        assert_eq!(tree.to_string(), "(XP (1) (S ($t$) (VP sleeps)))");
        assert_eq!(tree.leaves(), vec!["sleeps"]);
    }

    #[test]
    fn test_doubled_backslash_is_normalized() {
        let normalized = normalize_escapes(r"[.\\node(top){S }; [.N Peter ] ]").unwrap();
        assert_eq!(normalized, r"[.\node(top){S }; [.N Peter ] ]");
        assert!(matches!(normalize_escapes("[.S a ]").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_swallowed_backslash_is_an_escape_error() {
        // "\n" in a non-raw literal is a newline, leaving "ode(" behind.
        let err = normalize_escapes("[.\node(top){A }; [.B tanzt ] ]").unwrap_err();
        assert!(matches!(err, HierarchyError::Escape(_)));
    }

    #[test]
    fn test_root_marker_on_inner_node_rejected() {
        let err = read_tree(r"[.S [.\node(top){NP }; Peter ] ]").unwrap_err();
        assert!(matches!(err, HierarchyError::Bracket(BracketError::RootMarker { .. })));
    }

    #[test]
    fn test_stray_terminal_rejected() {
        let err = read_tree("Peter [.S tanzt ]").unwrap_err();
        assert!(matches!(err, HierarchyError::Bracket(BracketError::StrayTerminal { .. })));
    }

    #[test]
    fn test_second_root_rejected() {
        let err = read_tree("[.S a ] [.T b ]").unwrap_err();
        assert_eq!(err, HierarchyError::Bracket(BracketError::MultipleRoots { position: 8 }));
    }

    #[test]
    fn test_missing_label_rejected() {
        let err = read_tree("[. a ]").unwrap_err();
        assert_eq!(err, HierarchyError::Bracket(BracketError::MissingLabel { position: 0 }));
    }
}
