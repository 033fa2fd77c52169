//! SMT Domain Models
//!
//! Sorts, function symbols, terms and model values. Pure data: nothing here
//! talks to a solver.

pub mod builders;
mod error;
mod function;
mod sort;
mod term;
mod value;

pub use error::TermError;
pub use function::{Function, FunctionKind};
pub use sort::Sort;
pub use term::Term;
pub use value::Value;
