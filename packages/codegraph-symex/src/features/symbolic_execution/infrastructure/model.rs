//! Solver values -> typed IR constants

use crate::features::flow_graph::{Constant, DataType};
use crate::features::smt::Value;

/// Reinterpret a model value as a constant of `data_type`.
///
/// Bit-vectors are raw bit patterns; signed types take the two's-complement
/// reading of those bits. `None` when the value cannot represent the type.
pub fn to_constant(value: &Value, data_type: DataType) -> Option<Constant> {
    match (value, data_type) {
        (Value::Bool(b), DataType::Boolean) => Some(Constant::Bool(*b)),
        (Value::BitVec { .. } | Value::Int(_), DataType::Integer { .. }) => {
            Constant::from_bits(value.as_bits()?, data_type)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_reinterpretation() {
        let all_ones = Value::BitVec {
            value: 0xffff_ffff,
            width: 32,
        };
        assert_eq!(
            to_constant(&all_ones, DataType::i32()),
            Some(Constant::Signed {
                value: -1,
                bits: 32
            })
        );
        assert_eq!(
            to_constant(&all_ones, DataType::u32()),
            Some(Constant::Unsigned {
                value: 0xffff_ffff,
                bits: 32
            })
        );
    }

    #[test]
    fn test_booleans_and_mismatches() {
        assert_eq!(
            to_constant(&Value::Bool(true), DataType::Boolean),
            Some(Constant::Bool(true))
        );
        assert_eq!(to_constant(&Value::Bool(true), DataType::i32()), None);
        assert_eq!(
            to_constant(&Value::String("x".to_string()), DataType::i32()),
            None
        );
        assert_eq!(
            to_constant(&Value::BitVec { value: 1, width: 32 }, DataType::f32()),
            None
        );
    }

    #[test]
    fn test_narrow_width() {
        let value = Value::BitVec {
            value: 0x80,
            width: 8,
        };
        assert_eq!(
            to_constant(&value, DataType::i8()),
            Some(Constant::Signed {
                value: -128,
                bits: 8
            })
        );
    }
}
