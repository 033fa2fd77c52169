//! SMT terms
//!
//! Immutable trees of constants and function applications. Arguments are
//! shared behind an `Arc`, so cloning a term never copies its subtree.

use super::{Function, Sort, TermError};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Bool(bool),
    /// Bit-vector literal; `value` is kept masked to `width` bits
    BitVec { value: u128, width: u32 },
    Apply {
        function: Arc<Function>,
        arguments: Arc<[Term]>,
    },
}

impl Term {
    /// Apply `function` to `arguments`.
    ///
    /// Only the argument count is checked; sort agreement is left to the solver.
    pub fn apply(function: Function, arguments: Vec<Term>) -> Result<Term, TermError> {
        if function.arity() != arguments.len() {
            return Err(TermError::ArityMismatch {
                function: function.name().to_string(),
                expected: function.arity(),
                actual: arguments.len(),
            });
        }
        Ok(Self::apply_unchecked(function, arguments))
    }

    /// Builders always pass the right number of arguments
    pub(crate) fn apply_unchecked(function: Function, arguments: Vec<Term>) -> Term {
        Term::Apply {
            function: Arc::new(function),
            arguments: arguments.into(),
        }
    }

    pub fn bitvec(value: u128, width: u32) -> Term {
        let mask = if width >= 128 {
            u128::MAX
        } else {
            (1u128 << width) - 1
        };
        Term::BitVec {
            value: value & mask,
            width,
        }
    }

    pub fn sort(&self) -> Sort {
        match self {
            Term::Bool(_) => Sort::Bool,
            Term::BitVec { width, .. } => Sort::BitVec(*width),
            Term::Apply { function, .. } => function.result_sort(),
        }
    }

    pub fn function(&self) -> Option<&Function> {
        match self {
            Term::Apply { function, .. } => Some(function),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[Term] {
        match self {
            Term::Apply { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Term::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Term::Bool(false))
    }

    /// Declared (non-builtin) functions reachable from this term, first occurrence first
    pub fn declarations(&self) -> Vec<Arc<Function>> {
        let mut out: Vec<Arc<Function>> = Vec::new();
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            if let Term::Apply {
                function,
                arguments,
            } = term
            {
                if !function.is_builtin() && !out.iter().any(|f| f == function) {
                    out.push(Arc::clone(function));
                }
                stack.extend(arguments.iter().rev());
            }
        }
        out
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

/// SMT-LIB v2 concrete syntax
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Bool(b) => write!(f, "{}", b),
            Term::BitVec { value, width } => write!(f, "(_ bv{} {})", value, width),
            Term::Apply {
                function,
                arguments,
            } => {
                if arguments.is_empty() {
                    return write!(f, "{}", function);
                }
                write!(f, "({}", function)?;
                for argument in arguments.iter() {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}
