/*
 * Flow Graph Builder
 *
 * Mutable accumulator for blocks and edges, frozen into an immutable
 * FlowGraph by `build()`.
 *
 * REQUIREMENTS:
 * - Edges may only reference blocks already added to this builder
 * - Exactly one Entry and one Exit (created up front)
 * - Successor shape is NOT enforced here (see FlowGraph::validate)
 */

use crate::features::flow_graph::domain::{
    fresh_graph_id, BasicBlock, BlockId, EdgeKind, Expression, FlowGraph, FlowGraphError,
    GraphData, Operation, Variable,
};
use petgraph::graph::{DiGraph, NodeIndex};

/// Builder for [`FlowGraph`]
#[derive(Debug)]
pub struct FlowGraphBuilder {
    id: u64,
    graph: DiGraph<BasicBlock, EdgeKind>,
    entry: NodeIndex,
    exit: NodeIndex,
}

impl FlowGraphBuilder {
    /// Start a graph with its Entry (parameters) and Exit (return values)
    pub fn new(parameters: Vec<Variable>, returns: Vec<Expression>) -> Self {
        let mut graph = DiGraph::new();
        let entry = graph.add_node(BasicBlock::Entry { parameters });
        let exit = graph.add_node(BasicBlock::Exit { returns });
        Self {
            id: fresh_graph_id(),
            graph,
            entry,
            exit,
        }
    }

    pub fn entry(&self) -> BlockId {
        BlockId::new(self.id, self.entry)
    }

    pub fn exit(&self) -> BlockId {
        BlockId::new(self.id, self.exit)
    }

    /// Add an inner block carrying at most one operation
    pub fn add_block(&mut self, operation: Option<Operation>) -> BlockId {
        let index = self.graph.add_node(BasicBlock::Inner { operation });
        BlockId::new(self.id, index)
    }

    pub fn add_operation(&mut self, operation: Operation) -> BlockId {
        self.add_block(Some(operation))
    }

    pub fn add_empty_block(&mut self) -> BlockId {
        self.add_block(None)
    }

    fn check(&self, block: BlockId) -> Result<NodeIndex, FlowGraphError> {
        if block.graph_id() == self.id && block.index() < self.graph.node_count() {
            Ok(block.node())
        } else {
            Err(FlowGraphError::UnknownBlock { block })
        }
    }

    pub fn add_edge(
        &mut self,
        from: BlockId,
        to: BlockId,
        kind: EdgeKind,
    ) -> Result<(), FlowGraphError> {
        let source = self.check(from)?;
        let target = self.check(to)?;
        self.graph.add_edge(source, target, kind);
        Ok(())
    }

    pub fn add_unconditional_edge(
        &mut self,
        from: BlockId,
        to: BlockId,
    ) -> Result<(), FlowGraphError> {
        self.add_edge(from, to, EdgeKind::Unconditional)
    }

    /// Add the true/false successor pair of a conditional block
    pub fn add_branch(
        &mut self,
        from: BlockId,
        on_true: BlockId,
        on_false: BlockId,
    ) -> Result<(), FlowGraphError> {
        // Validate everything before touching the graph
        self.check(from)?;
        self.check(on_true)?;
        self.check(on_false)?;
        self.add_edge(from, on_true, EdgeKind::True)?;
        self.add_edge(from, on_false, EdgeKind::False)
    }

    /// Chain blocks with unconditional edges: `blocks[0] -> blocks[1] -> ...`
    pub fn add_sequence(&mut self, blocks: &[BlockId]) -> Result<(), FlowGraphError> {
        for pair in blocks.windows(2) {
            self.add_unconditional_edge(pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Freeze into an immutable graph
    pub fn build(self) -> FlowGraph {
        FlowGraph::from_data(GraphData {
            id: self.id,
            graph: self.graph,
            entry: self.entry,
            exit: self.exit,
        })
    }
}
