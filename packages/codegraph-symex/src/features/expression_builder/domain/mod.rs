//! Expression builder domain

mod string_constraint;
mod typed_expr;

pub use string_constraint::{CharClass, Pattern, StrTerm};
pub use typed_expr::{BoolExpr, IntExpr, IntOperand};
