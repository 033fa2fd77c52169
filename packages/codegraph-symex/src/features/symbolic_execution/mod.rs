//! Symbolic Execution
//!
//! Decides whether any of a set of target blocks of a [`FlowGraph`] can be
//! reached from its Entry, and produces a concrete input when one can.
//!
//! ## Architecture
//!
//! ```text
//! symbolic_execution/
//! ├── domain/            # States, version maps, condition stacks, results
//! ├── infrastructure/    # prune -> rank -> worklist -> executor, IR translation
//! └── application/       # ReachabilityUseCase
//! ```
//!
//! States queued for the same block are merged before the block is processed,
//! so every block is translated once per visit instead of once per path.
//! Each merge is recorded as one implication over reach markers, which keeps
//! the formula linear in the number of merges.
//!
//! ## Usage
//!
//! ```text
//! use codegraph_symex::features::symbolic_execution::{SymbolicExecutor, ExecutionResult};
//! use codegraph_symex::features::smt::SmtLibProcessSolver;
//!
//! let executor = SymbolicExecutor::new(SmtLibProcessSolver::default());
//! match executor.execute(&graph, &[target]).await? {
//!     ExecutionResult::Reachable(model) => println!("input: {}", model),
//!     ExecutionResult::Unreachable => println!("dead code"),
//!     ExecutionResult::Unknown => println!("solver gave up"),
//! }
//! ```
//!
//! [`FlowGraph`]: crate::features::flow_graph::FlowGraph

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ReachabilityUseCase, ReachabilityUseCaseImpl};
pub use domain::{
    ContractViolation, ExecutionModel, ExecutionResult, ExecutionStats, ExecutionState,
    SymbolKey, VersionMap,
};
pub use infrastructure::SymbolicExecutor;
