//! Symbolic execution infrastructure
//!
//! - `prune` / `rank`: graph preprocessing
//! - `translate`: IR -> SMT terms
//! - `worklist`: rank-ordered batching
//! - `executor`: the driver

pub mod executor;
pub mod model;
pub mod prune;
pub mod rank;
pub mod translate;
pub mod worklist;

pub use executor::SymbolicExecutor;
pub use translate::{reach_marker, symbol_key};
