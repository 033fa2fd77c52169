//! Expression Builder - typed construction helpers
//!
//! Two families, both stateless:
//!
//! ```text
//! BoolExpr / IntExpr   -> flow_graph::Expression   (IR for graph builders)
//! StrTerm / Pattern    -> smt::Term                (string constraints)
//! ```
//!
//! The executor never calls into this module; it exists for code that builds
//! graphs or talks to a solver session directly.

pub mod domain;

pub use domain::{BoolExpr, CharClass, IntExpr, IntOperand, Pattern, StrTerm};
