//! Solver Port (Trait Interface)
//!
//! Session-scoped access to an external SMT decision procedure:
//! - Production: SMT-LIB process (`SmtLibProcessSolver`)
//! - Testing: scripted / call-counting mocks
//!
//! A session is released on every path: explicitly through `close`, or by
//! `Drop` when the caller bails out early.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::features::smt::domain::{Term, Value};

/// Outcome of one satisfiability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatResult {
    /// Satisfiable; the session now holds a model
    Sat,
    /// Unsatisfiable (contradiction)
    Unsat,
    /// Unknown (timeout, incomplete theory, resource limit)
    Unknown,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SatResult::Sat => "sat",
            SatResult::Unsat => "unsat",
            SatResult::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infrastructure faults raised by a solver collaborator
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn solver '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Solver answered with `(error ...)`
    #[error("solver reported an error: {0}")]
    Protocol(String),

    #[error("unexpected solver response to '{command}': {response}")]
    UnexpectedResponse { command: String, response: String },

    #[error("solver process exited unexpectedly")]
    ProcessExited,

    /// Model access without a preceding `Sat`
    #[error("no model available (last check was not sat)")]
    NoModel,
}

/// Factory for solver sessions
#[async_trait]
pub trait Solver: Send + Sync {
    type Session: SolverSession;

    /// Open a fresh session with no assertions
    async fn open_session(&self) -> Result<Self::Session, SolverError>;
}

/// One isolated assertion context
#[async_trait]
pub trait SolverSession: Send {
    /// Assert a boolean-sorted term as a hard constraint
    async fn assert(&mut self, term: &Term) -> Result<(), SolverError>;

    async fn check_sat(&mut self) -> Result<SatResult, SolverError>;

    /// Value of `term` in the model found by the last `check_sat`.
    ///
    /// Only valid after `check_sat` returned [`SatResult::Sat`].
    async fn evaluate(&mut self, term: &Term) -> Result<Value, SolverError>;

    /// Release the session
    async fn close(self) -> Result<(), SolverError>;
}
