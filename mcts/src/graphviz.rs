//! Graphviz rendering of a finished search tree.
//!
//! Debugging aid, not on any hot path: walks the tree breadth-first
//! through the public node surface and emits a `.dot` digraph with one
//! vertex per node (state, visits, mean score) and one edge per
//! parent→child link labeled with the child's incoming action.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};

use crate::tree::SearchTree;

/// Write `tree` as a Graphviz `.dot` document to `out`.
///
/// Vertex identifiers are the arena node ids, so a dump can be correlated
/// with log output. Render with e.g. `dot -Tsvg tree.dot -o tree.svg`.
pub fn write_dot<S, A, E, W>(tree: &SearchTree<S, A, E>, out: &mut W) -> io::Result<()>
where
    S: fmt::Display,
    A: fmt::Display,
    W: Write,
{
    writeln!(out, "digraph mcts {{")?;

    let mut fringe = VecDeque::new();
    fringe.push_back(tree.root());

    while let Some(id) = fringe.pop_front() {
        let node = tree.get(id);

        writeln!(
            out,
            "  {} [label=\"{}\\nVisits: {}\\nScore: {:.3}\"];",
            id.0,
            escape(&node.state.to_string()),
            node.visits,
            node.mean_score()
        )?;

        if node.parent.is_some() {
            writeln!(
                out,
                "  {} -> {} [label=\"{}\"];",
                node.parent.0,
                id.0,
                escape(&node.action.to_string())
            )?;
        }

        fringe.extend(node.children.iter().copied());
    }

    writeln!(out, "}}")
}

/// Escape a display string for use inside a double-quoted dot label.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
