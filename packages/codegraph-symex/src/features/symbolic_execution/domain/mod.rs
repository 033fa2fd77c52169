//! Symbolic execution domain
//!
//! States, the persistent structures they carry, and run results.

mod condition_stack;
mod error;
mod result;
mod state;
mod versions;

pub use condition_stack::ConditionStack;
pub use error::ContractViolation;
pub use result::{ExecutionModel, ExecutionResult, ExecutionStats};
pub use state::{ExecutionState, UnmergedCondition};
pub use versions::{SymbolKey, VersionMap};
