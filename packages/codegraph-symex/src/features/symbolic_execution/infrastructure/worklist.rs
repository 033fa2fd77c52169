//! Rank-ordered worklist
//!
//! States are grouped by destination block; a pop hands out every state
//! queued for the lowest-ranked block at once, so each batch is merged once.

use std::collections::BTreeMap;

use crate::features::flow_graph::BlockId;
use crate::features::symbolic_execution::domain::ExecutionState;

#[derive(Debug, Default)]
pub struct Worklist {
    queue: BTreeMap<usize, (BlockId, Vec<ExecutionState>)>,
    pending: usize,
}

impl Worklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `state` for its block, whose rank is `rank`
    pub fn push(&mut self, rank: usize, state: ExecutionState) {
        self.pending += 1;
        self.queue
            .entry(rank)
            .or_insert_with(|| (state.block, Vec::new()))
            .1
            .push(state);
    }

    /// All states waiting at the lowest-ranked block
    pub fn pop_batch(&mut self) -> Option<(BlockId, Vec<ExecutionState>)> {
        let (_, batch) = self.queue.pop_first()?;
        self.pending -= batch.1.len();
        Some(batch)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued states
    pub fn len(&self) -> usize {
        self.pending
    }
}
