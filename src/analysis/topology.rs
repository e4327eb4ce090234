use crate::store::{Child, NodeId, Tree};

/// Internal nodes in pre-order (mother before daughters, left to right).
///
/// Iterative: deep unary chains do not grow the call stack.
pub fn preorder(tree: &Tree) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(tree.count());
    if tree.count() == 0 {
        return order;
    }

    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        order.push(node);
        // Push right-to-left so the leftmost daughter is visited first.
        for child in tree.children(node).iter().rev() {
            if let Child::Node(c) = child {
                stack.push(*c);
            }
        }
    }
    order
}

/// Terminal symbols in left-to-right order.
pub fn leaves(tree: &Tree) -> Vec<&str> {
    let mut out = Vec::new();
    if tree.count() == 0 {
        return out;
    }

    let mut stack: Vec<&Child> = Vec::new();
    for child in tree.children(tree.root()).iter().rev() {
        stack.push(child);
    }
    while let Some(child) = stack.pop() {
        match child {
            Child::Leaf(word) => out.push(word.as_str()),
            Child::Node(id) => {
                for grandchild in tree.children(*id).iter().rev() {
                    stack.push(grandchild);
                }
            }
        }
    }
    out
}

/// Number of internal nodes on the longest root-to-node path.
pub fn depth(tree: &Tree) -> usize {
    if tree.count() == 0 {
        return 0;
    }

    let mut deepest = 0;
    let mut stack = vec![(tree.root(), 1usize)];
    while let Some((node, level)) = stack.pop() {
        deepest = deepest.max(level);
        for child in tree.children(node) {
            if let Child::Node(c) = child {
                stack.push((*c, level + 1));
            }
        }
    }
    deepest
}
