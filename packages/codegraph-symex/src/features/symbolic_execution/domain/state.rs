//! Execution states flowing through the worklist

use super::{ConditionStack, VersionMap};
use crate::features::flow_graph::BlockId;
use crate::features::smt::Term;

/// Edge taken but not yet folded into a merge
#[derive(Debug, Clone)]
pub struct UnmergedCondition {
    /// Reached-marker of the block the edge leaves
    pub source_marker: Term,
    /// Compiled edge condition conjoined with the source block's effect
    pub condition: Term,
    /// Versions after the source block's operation
    pub versions: VersionMap,
}

#[derive(Debug, Clone)]
pub struct ExecutionState {
    pub block: BlockId,
    pub versions: VersionMap,
    pub conditions: ConditionStack,
    pub pending: Option<UnmergedCondition>,
}

impl ExecutionState {
    /// Initial state at Entry: no constraints, nothing pending
    pub fn seed(entry: BlockId, versions: VersionMap) -> Self {
        Self {
            block: entry,
            versions,
            conditions: ConditionStack::new(),
            pending: None,
        }
    }
}
