//! SMT sorts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort (type) of an SMT term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sort {
    Bool,
    Int,
    /// Fixed-width bit-vector
    BitVec(u32),
    String,
    /// Regular languages over strings
    RegLan,
}

impl Sort {
    pub fn bitvec_width(&self) -> Option<u32> {
        match self {
            Sort::BitVec(width) => Some(*width),
            _ => None,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Int => write!(f, "Int"),
            Sort::BitVec(width) => write!(f, "(_ BitVec {})", width),
            Sort::String => write!(f, "String"),
            Sort::RegLan => write!(f, "RegLan"),
        }
    }
}
