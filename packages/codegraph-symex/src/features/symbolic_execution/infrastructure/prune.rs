//! Backward reachability from the targets

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::features::flow_graph::{BlockId, FlowGraph};

/// Blocks from which some target can be reached by following successor
/// edges (targets included). Conditions are ignored.
pub fn blocks_reaching(graph: &FlowGraph, targets: &[BlockId]) -> FxHashSet<BlockId> {
    let mut retained = FxHashSet::default();
    let mut queue = VecDeque::new();

    for &target in targets {
        if graph.contains(target) && retained.insert(target) {
            queue.push_back(target);
        }
    }

    while let Some(block) = queue.pop_front() {
        for pred in graph.predecessors(block) {
            if retained.insert(pred) {
                queue.push_back(pred);
            }
        }
    }

    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::FlowGraphBuilder;

    #[test]
    fn test_bypassed_block_excludes_entry() {
        // entry -> a -> exit ; orphan -> exit
        let mut builder = FlowGraphBuilder::new(vec![], vec![]);
        let a = builder.add_empty_block();
        let orphan = builder.add_empty_block();
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_sequence(&[entry, a, exit]).unwrap();
        builder.add_unconditional_edge(orphan, exit).unwrap();
        let graph = builder.build();

        let retained = blocks_reaching(&graph, &[orphan]);
        assert_eq!(retained.len(), 1);
        assert!(!retained.contains(&entry));

        let retained = blocks_reaching(&graph, &[exit]);
        assert_eq!(retained.len(), 4);
    }

    #[test]
    fn test_loops_terminate() {
        let mut builder = FlowGraphBuilder::new(vec![], vec![]);
        let head = builder.add_empty_block();
        let body = builder.add_empty_block();
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_sequence(&[entry, head, body, head]).unwrap();
        let graph = builder.build();

        let retained = blocks_reaching(&graph, &[body]);
        assert!(retained.contains(&entry));
        assert!(retained.contains(&head));
        assert!(!retained.contains(&exit));
    }
}
