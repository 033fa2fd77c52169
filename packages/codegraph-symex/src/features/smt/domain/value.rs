//! Values read back from a solver model

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    /// Raw (unsigned) bit pattern of the given width
    BitVec { value: u128, width: u32 },
    Int(i128),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Raw bits for bit-vectors and booleans; two's complement for integers
    pub fn as_bits(&self) -> Option<u128> {
        match self {
            Value::Bool(b) => Some(*b as u128),
            Value::BitVec { value, .. } => Some(*value),
            Value::Int(i) => Some(*i as u128),
            Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::BitVec { value, width } => write!(f, "#x{:x}[{}]", value, width),
            Value::Int(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}
