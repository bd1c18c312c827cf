use std::sync::Arc;

use concord_protocol::Token;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::{Result, TreeError};

/// Checks the tree invariants: contiguous numbering, heads in bounds, a
/// single self-headed root and no other cycles.
pub fn check_tree(tokens: &[Arc<Token>]) -> Result<()> {
    if tokens.is_empty() {
        return Err(TreeError::Empty);
    }

    let mut roots = 0;
    for (position, token) in tokens.iter().enumerate() {
        if token.i != position {
            return Err(TreeError::Misnumbered { position, found: token.i });
        }
        if token.head >= tokens.len() {
            return Err(TreeError::DanglingHead { token: position, head: token.head });
        }
        if token.is_root() {
            roots += 1;
        }
    }
    match roots {
        0 => return Err(TreeError::NoRoot),
        1 => {}
        n => return Err(TreeError::MultipleRoots(n)),
    }

    // Dependent -> head edges; the root's self-loop is left out.
    let mut graph = DiGraph::<usize, ()>::with_capacity(tokens.len(), tokens.len());
    for token in tokens {
        graph.add_node(token.i);
    }
    for token in tokens.iter().filter(|t| !t.is_root()) {
        graph.add_edge(NodeIndex::new(token.i), NodeIndex::new(token.head), ());
    }
    toposort(&graph, None).map_err(|cycle| TreeError::Cycle(graph[cycle.node_id()]))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(heads: &[usize]) -> Vec<Arc<Token>> {
        heads
            .iter()
            .enumerate()
            .map(|(i, &head)| {
                let dep = if head == i { "ROOT" } else { "dep" };
                Arc::new(Token::new(i, format!("w{}", i)).with_dep(dep, head))
            })
            .collect()
    }

    #[test]
    fn test_valid_tree() {
        assert_eq!(check_tree(&tree(&[1, 1, 1])), Ok(()));
    }

    #[test]
    fn test_violations() {
        assert_eq!(check_tree(&[]), Err(TreeError::Empty));
        assert_eq!(check_tree(&tree(&[1, 0])), Err(TreeError::NoRoot));
        assert_eq!(check_tree(&tree(&[0, 1])), Err(TreeError::MultipleRoots(2)));
        assert_eq!(check_tree(&tree(&[1, 1, 7])), Err(TreeError::DanglingHead { token: 2, head: 7 }));
        assert!(matches!(check_tree(&tree(&[0, 2, 3, 1])), Err(TreeError::Cycle(_))));
    }
}
