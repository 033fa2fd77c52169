//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/         - Pure data and rules (no I/O)
//! - ports/          - Interface definitions (traits)
//! - application/    - Use cases
//! - infrastructure/ - Algorithms and external adapters

// Flow graph IR: blocks, operations, typed expressions (petgraph arena)
pub mod flow_graph;

// SMT term model + SMT-LIB process solver
pub mod smt;

// Merge-based symbolic reachability over flow graphs
pub mod symbolic_execution;

// Typed builders for IR expressions and string constraints
pub mod expression_builder;
