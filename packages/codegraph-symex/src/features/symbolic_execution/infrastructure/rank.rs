//! Merge scheduling order
//!
//! Reverse post-order of a depth-first walk from Entry, restricted to the
//! retained blocks. On acyclic graphs this is a topological order, so every
//! predecessor delivers its state before a block is merged.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::flow_graph::{BlockId, FlowGraph};

pub type Ranks = FxHashMap<BlockId, usize>;

/// Rank of every retained block reachable from Entry (Entry is rank 0).
/// A true successor is ranked ahead of its false sibling.
pub fn rank_blocks(graph: &FlowGraph, retained: &FxHashSet<BlockId>) -> Ranks {
    let entry = graph.entry();
    let mut ranks = Ranks::default();
    if !retained.contains(&entry) {
        return ranks;
    }

    let mut visited = FxHashSet::default();
    let mut postorder = Vec::with_capacity(retained.len());
    // (block, successors, next successor index)
    let mut stack: Vec<(BlockId, Vec<BlockId>, usize)> = Vec::new();

    // Walked last-edge-first so that the reversed post-order lists the
    // true successor before the false one
    let successors_of = |block: BlockId| -> Vec<BlockId> {
        graph
            .successors(block)
            .into_iter()
            .rev()
            .filter(|s| retained.contains(s))
            .collect()
    };

    visited.insert(entry);
    stack.push((entry, successors_of(entry), 0));
    while let Some((block, successors, next)) = stack.last_mut() {
        if let Some(&succ) = successors.get(*next) {
            *next += 1;
            if visited.insert(succ) {
                stack.push((succ, successors_of(succ), 0));
            }
        } else {
            postorder.push(*block);
            stack.pop();
        }
    }

    for (rank, block) in postorder.into_iter().rev().enumerate() {
        ranks.insert(block, rank);
    }
    ranks
}
