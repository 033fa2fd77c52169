//! Immutable flow graph
//!
//! Blocks live in a `petgraph` arena and are addressed through [`BlockId`]
//! handles, so successor/predecessor tables never form ownership cycles.
//! A built graph is never mutated and can be shared across threads.

use super::{BasicBlock, EdgeKind, Expression, FlowGraphError, Variable};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn fresh_graph_id() -> u64 {
    NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle of a block inside one specific builder/graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId {
    graph: u64,
    index: NodeIndex,
}

impl BlockId {
    pub(crate) fn new(graph: u64, index: NodeIndex) -> Self {
        Self { graph, index }
    }

    pub(crate) fn node(&self) -> NodeIndex {
        self.index
    }

    pub(crate) fn graph_id(&self) -> u64 {
        self.graph
    }

    /// Arena position (stable for the lifetime of the graph)
    pub fn index(&self) -> usize {
        self.index.index()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.index.index())
    }
}

/// Outgoing edge shape of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Successors {
    None,
    Unconditional(BlockId),
    Branch { on_true: BlockId, on_false: BlockId },
}

#[derive(Debug)]
pub(crate) struct GraphData {
    pub(crate) id: u64,
    pub(crate) graph: DiGraph<BasicBlock, EdgeKind>,
    pub(crate) entry: NodeIndex,
    pub(crate) exit: NodeIndex,
}

/// Frozen flow graph (cheap to clone; clones share storage)
#[derive(Debug, Clone)]
pub struct FlowGraph {
    data: Arc<GraphData>,
}

impl FlowGraph {
    pub(crate) fn from_data(data: GraphData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    fn handle(&self, index: NodeIndex) -> BlockId {
        BlockId::new(self.data.id, index)
    }

    pub fn entry(&self) -> BlockId {
        self.handle(self.data.entry)
    }

    pub fn exit(&self) -> BlockId {
        self.handle(self.data.exit)
    }

    /// Entry parameters in declaration order
    pub fn parameters(&self) -> &[Variable] {
        match &self.data.graph[self.data.entry] {
            BasicBlock::Entry { parameters } => parameters,
            _ => &[],
        }
    }

    /// Exit return-value expressions
    pub fn returns(&self) -> &[Expression] {
        match &self.data.graph[self.data.exit] {
            BasicBlock::Exit { returns } => returns,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.data.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.graph.node_count() == 0
    }

    pub fn contains(&self, id: BlockId) -> bool {
        id.graph_id() == self.data.id && id.index() < self.data.graph.node_count()
    }

    /// All block handles in arena order
    pub fn blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.data
            .graph
            .node_indices()
            .map(move |index| self.handle(index))
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        if self.contains(id) {
            self.data.graph.node_weight(id.node())
        } else {
            None
        }
    }

    /// Outgoing edges ordered by kind (true, false, unconditional) then target
    pub fn edges(&self, id: BlockId) -> Vec<(EdgeKind, BlockId)> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut edges: Vec<_> = self
            .data
            .graph
            .edges_directed(id.node(), Direction::Outgoing)
            .map(|edge| (*edge.weight(), self.handle(edge.target())))
            .collect();
        edges.sort();
        edges
    }

    fn successor(&self, id: BlockId, kind: EdgeKind) -> Option<BlockId> {
        self.edges(id)
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, target)| target)
    }

    pub fn true_successor(&self, id: BlockId) -> Option<BlockId> {
        self.successor(id, EdgeKind::True)
    }

    pub fn false_successor(&self, id: BlockId) -> Option<BlockId> {
        self.successor(id, EdgeKind::False)
    }

    pub fn unconditional_successor(&self, id: BlockId) -> Option<BlockId> {
        self.successor(id, EdgeKind::Unconditional)
    }

    /// All successors regardless of edge kind
    pub fn successors(&self, id: BlockId) -> Vec<BlockId> {
        self.edges(id).into_iter().map(|(_, target)| target).collect()
    }

    /// All predecessors (inverse of the successor relations), in arena order
    pub fn predecessors(&self, id: BlockId) -> Vec<BlockId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut preds: Vec<_> = self
            .data
            .graph
            .neighbors_directed(id.node(), Direction::Incoming)
            .map(|index| self.handle(index))
            .collect();
        preds.sort();
        preds.dedup();
        preds
    }

    /// Classify the outgoing edges of `id`, rejecting malformed shapes
    pub fn successor_shape(&self, id: BlockId) -> Result<Successors, FlowGraphError> {
        if !self.contains(id) {
            return Err(FlowGraphError::UnknownBlock { block: id });
        }

        let mut on_true = None;
        let mut on_false = None;
        let mut unconditional = None;
        for (kind, target) in self.edges(id) {
            let slot = match kind {
                EdgeKind::True => &mut on_true,
                EdgeKind::False => &mut on_false,
                EdgeKind::Unconditional => &mut unconditional,
            };
            if slot.replace(target).is_some() {
                return Err(FlowGraphError::DuplicateSuccessor { block: id, kind });
            }
        }

        match (on_true, on_false, unconditional) {
            (None, None, None) => Ok(Successors::None),
            (None, None, Some(next)) => Ok(Successors::Unconditional(next)),
            (Some(on_true), Some(on_false), None) => Ok(Successors::Branch { on_true, on_false }),
            (_, _, Some(_)) => Err(FlowGraphError::MixedSuccessors { block: id }),
            (Some(_), None, None) => Err(FlowGraphError::UnpairedBranch {
                block: id,
                present: EdgeKind::True,
            }),
            (None, Some(_), None) => Err(FlowGraphError::UnpairedBranch {
                block: id,
                present: EdgeKind::False,
            }),
        }
    }

    /// Check the successor-shape invariant on every block.
    ///
    /// The builder does not enforce it; callers that want early rejection of
    /// malformed graphs run this after `build()`.
    pub fn validate(&self) -> Result<(), FlowGraphError> {
        for id in self.blocks() {
            self.successor_shape(id)?;
        }
        Ok(())
    }
}
