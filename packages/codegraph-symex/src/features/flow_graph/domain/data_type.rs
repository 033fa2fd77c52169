//! IR data types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type of a variable or expression.
///
/// Every [`Expression`](super::Expression) has exactly one inferred data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    /// Fixed-width machine integer (two's complement when signed)
    Integer { signed: bool, bits: u32 },
    /// IEEE-754 style float; carried by the IR but not encodable by the executor
    Float { exponent_bits: u32, mantissa_bits: u32 },
}

impl DataType {
    pub fn signed(bits: u32) -> Self {
        DataType::Integer { signed: true, bits }
    }

    pub fn unsigned(bits: u32) -> Self {
        DataType::Integer {
            signed: false,
            bits,
        }
    }

    pub fn i8() -> Self {
        Self::signed(8)
    }

    pub fn i32() -> Self {
        Self::signed(32)
    }

    pub fn i64() -> Self {
        Self::signed(64)
    }

    pub fn u8() -> Self {
        Self::unsigned(8)
    }

    pub fn u32() -> Self {
        Self::unsigned(32)
    }

    pub fn u64() -> Self {
        Self::unsigned(64)
    }

    pub fn f32() -> Self {
        DataType::Float {
            exponent_bits: 8,
            mantissa_bits: 24,
        }
    }

    pub fn f64() -> Self {
        DataType::Float {
            exponent_bits: 11,
            mantissa_bits: 53,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, DataType::Boolean)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::Integer { .. })
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, DataType::Integer { signed: true, .. })
    }

    /// Bit width of integer types
    pub fn bits(&self) -> Option<u32> {
        match self {
            DataType::Integer { bits, .. } => Some(*bits),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "bool"),
            DataType::Integer { signed: true, bits } => write!(f, "i{}", bits),
            DataType::Integer {
                signed: false,
                bits,
            } => write!(f, "u{}", bits),
            DataType::Float {
                exponent_bits,
                mantissa_bits,
            } => write!(f, "f[{}:{}]", exponent_bits, mantissa_bits),
        }
    }
}
