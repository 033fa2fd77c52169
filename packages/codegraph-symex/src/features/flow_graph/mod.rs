//! Flow Graph - control-flow IR
//!
//! Typed variables, expressions and operations arranged in basic blocks,
//! connected by true/false/unconditional edges.
//!
//! ## Architecture
//!
//! ```text
//! flow_graph
//! ├── domain/            # Immutable IR (DataType, Expression, BasicBlock, FlowGraph)
//! └── infrastructure/    # FlowGraphBuilder (mutable, frozen by build())
//! ```
//!
//! ## Usage
//!
//! ```text
//! let b = Variable::new("b", DataType::i32());
//! let mut builder = FlowGraphBuilder::new(vec![b.clone()], vec![]);
//! let cond = builder.add_operation(Operation::jump(
//!     Expression::eq(Expression::var(&b), Expression::signed(0, 32)),
//! ));
//! builder.add_unconditional_edge(builder.entry(), cond)?;
//! builder.add_branch(cond, builder.exit(), builder.exit())?;
//! let graph = builder.build();
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    BasicBlock, BinaryOp, BlockId, CallSignature, Constant, DataType, EdgeKind, Expression,
    FlowGraph, FlowGraphError, Location, Operation, Successors, UnaryOp, Variable, VariableId,
};
pub use infrastructure::FlowGraphBuilder;
