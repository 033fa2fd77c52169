//! SMT infrastructure
//!
//! Concrete [`Solver`](super::ports::Solver) adapters.

pub mod sexp;
pub mod smtlib_process;

pub use smtlib_process::{SmtLibProcessSolver, SmtLibSession};
