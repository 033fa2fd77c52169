//! Flow graph construction and shape errors

use super::{BlockId, EdgeKind};
use thiserror::Error;

/// Flow graph contract violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowGraphError {
    /// Handle was not issued by this builder/graph
    #[error("unknown block {block}")]
    UnknownBlock { block: BlockId },

    #[error("block {block} mixes unconditional and conditional successors")]
    MixedSuccessors { block: BlockId },

    #[error("block {block} has more than one {kind} successor")]
    DuplicateSuccessor { block: BlockId, kind: EdgeKind },

    #[error("block {block} has a {present} successor without its paired branch")]
    UnpairedBranch { block: BlockId, present: EdgeKind },
}
