//! Common test utilities for codegraph-symex
//!
//! - `fixtures`: scenario graphs
//! - `mock_solver`: scripted, call-counting Solver
//! - `interpreter`: concrete IR interpreter used as a witness oracle

mod fixtures;
mod interpreter;
mod mock_solver;

pub use fixtures::*;
pub use interpreter::*;
pub use mock_solver::*;

/// `z3` on PATH
pub fn z3_available() -> bool {
    std::process::Command::new("z3")
        .arg("-version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}
