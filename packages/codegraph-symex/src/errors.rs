//! Error types for codegraph-symex
//!
//! Provides unified error handling across the crate.
//!
//! - Malformed IR surfaces as [`SymexError::ContractViolation`] (never retried)
//! - Solver transport faults surface as [`SymexError::Solver`], unchanged
//! - An undecidable target is not an error: it yields `ExecutionResult::Unknown`

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::flow_graph::FlowGraphError;
use crate::features::smt::{SolverError, TermError};
use crate::features::symbolic_execution::ContractViolation;

/// Main error type for codegraph-symex operations
#[derive(Debug, Error)]
pub enum SymexError {
    #[error("contract violation: {0}")]
    ContractViolation(#[from] ContractViolation),

    /// Builder misuse (unknown or foreign block handle)
    #[error("flow graph error: {0}")]
    FlowGraph(#[from] FlowGraphError),

    #[error("term error: {0}")]
    Term(#[from] TermError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SymexError {
    /// Bug in the IR producer rather than an analysis or infrastructure outcome
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            SymexError::ContractViolation(_) | SymexError::FlowGraph(_) | SymexError::Term(_)
        )
    }
}

/// Result type alias for codegraph-symex operations
pub type Result<T> = std::result::Result<T, SymexError>;
