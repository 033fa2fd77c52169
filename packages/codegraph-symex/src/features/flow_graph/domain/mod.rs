//! Flow graph domain model
//!
//! Typed variables, expressions, operations, basic blocks and the frozen
//! flow graph they form.

pub mod cfg;
mod data_type;
mod error;
mod expression;
mod graph;
mod operation;
mod variable;

pub use cfg::EdgeKind;
pub use data_type::DataType;
pub use error::FlowGraphError;
pub use expression::{BinaryOp, Constant, Expression, Location, UnaryOp};
pub use graph::{BlockId, FlowGraph, Successors};
pub use operation::{BasicBlock, CallSignature, Operation};
pub use variable::{Variable, VariableId};

pub(crate) use expression::mask;
pub(crate) use graph::{fresh_graph_id, GraphData};
