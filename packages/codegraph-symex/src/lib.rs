/*
 * Codegraph Symex - Symbolic Reachability Engine
 *
 * Feature-First Hexagonal Architecture:
 * - features/flow_graph         : Control-flow IR (Entry/Exit/Inner blocks)
 * - features/smt                : Sorts, terms, Solver port, SMT-LIB process adapter
 * - features/symbolic_execution : prune -> rank -> merge -> check -> advance
 * - features/expression_builder : Typed builders (IR expressions, string regexes)
 * - config/                     : YAML configuration with validation
 *
 * Answers: "can any of these blocks execute, and with which inputs?"
 * Reachable(model) | Unreachable | Unknown
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::len_without_is_empty)] // StrTerm::len builds a str.len term
#![allow(clippy::should_implement_trait)] // eq/ne builders return expressions

/// Feature modules
pub mod features;
/// Configuration system
pub mod config;
/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ExecutorConfig, SolverConfig, SymexConfig};
pub use errors::{Result, SymexError};
pub use features::flow_graph::{BlockId, FlowGraph, FlowGraphBuilder};
pub use features::smt::{SmtLibProcessSolver, Solver, SolverSession};
pub use features::symbolic_execution::{
    ContractViolation, ExecutionModel, ExecutionResult, ExecutionStats, ReachabilityUseCase,
    ReachabilityUseCaseImpl, SymbolicExecutor,
};
