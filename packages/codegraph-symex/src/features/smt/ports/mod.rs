pub mod solver;

pub use solver::{SatResult, Solver, SolverError, SolverSession};
