use thiserror::Error;

use crate::features::flow_graph::{BlockId, DataType, FlowGraphError};

/// Malformed IR detected during execution.
///
/// Never retried: it points at a bug in whatever produced the flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("block {block}: operation '{operation}' is not supported by symbolic execution")]
    UnsupportedOperation {
        block: BlockId,
        operation: &'static str,
    },

    #[error("data type {data_type} has no SMT encoding")]
    UnsupportedDataType { data_type: DataType },

    #[error("ill-sorted expression '{expression}': {reason}")]
    IllSorted { expression: String, reason: String },

    #[error("block {block} has true/false successors but no conditional jump")]
    BranchWithoutCondition { block: BlockId },

    #[error("block {block} has a conditional jump without a true/false successor pair")]
    MissingBranchTarget { block: BlockId },

    #[error("target block {block} does not belong to this flow graph")]
    ForeignTarget { block: BlockId },

    #[error("malformed flow graph: {0}")]
    Topology(#[from] FlowGraphError),
}
