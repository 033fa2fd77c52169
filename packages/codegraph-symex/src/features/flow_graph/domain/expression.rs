//! IR expressions
//!
//! Immutable value trees over variables and typed constants. No back-references.

use super::{DataType, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    Bool(bool),
    Signed { value: i64, bits: u32 },
    Unsigned { value: u64, bits: u32 },
}

impl Constant {
    pub fn data_type(&self) -> DataType {
        match self {
            Constant::Bool(_) => DataType::Boolean,
            Constant::Signed { bits, .. } => DataType::signed(*bits),
            Constant::Unsigned { bits, .. } => DataType::unsigned(*bits),
        }
    }

    /// Two's complement bit pattern, truncated to the constant's width
    pub fn to_bits(&self) -> u128 {
        match self {
            Constant::Bool(b) => *b as u128,
            Constant::Signed { value, bits } => (*value as i128 as u128) & mask(*bits),
            Constant::Unsigned { value, bits } => (*value as u128) & mask(*bits),
        }
    }

    /// Reinterpret a raw bit pattern as a constant of `data_type`.
    ///
    /// Bits above the declared width are discarded; signed types are
    /// sign-extended from their top bit. Returns `None` for float types and
    /// integer widths outside `1..=64`.
    pub fn from_bits(raw: u128, data_type: DataType) -> Option<Constant> {
        match data_type {
            DataType::Boolean => Some(Constant::Bool(raw & 1 == 1)),
            DataType::Integer { signed, bits } if (1..=64).contains(&bits) => {
                let truncated = raw & mask(bits);
                if signed {
                    let shift = 128 - bits;
                    let value = ((truncated << shift) as i128) >> shift;
                    Some(Constant::Signed {
                        value: value as i64,
                        bits,
                    })
                } else {
                    Some(Constant::Unsigned {
                        value: truncated as u64,
                        bits,
                    })
                }
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Constant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value widened to `i128` (signed or unsigned as declared)
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Constant::Signed { value, .. } => Some(*value as i128),
            Constant::Unsigned { value, .. } => Some(*value as i128),
            Constant::Bool(_) => None,
        }
    }
}

pub(crate) fn mask(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Signed { value, bits } => write!(f, "{}i{}", value, bits),
            Constant::Unsigned { value, bits } => write!(f, "{}u{}", value, bits),
        }
    }
}

/// Unary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical negation (boolean)
    Not,
    /// Arithmetic negation (integer)
    Neg,
    /// Bitwise complement (integer)
    BitNot,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Comparison or logical connective (result is boolean)
    pub fn yields_boolean(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or
        )
    }
}

/// IR expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Variable(Variable),
    Constant(Constant),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn var(variable: &Variable) -> Self {
        Expression::Variable(variable.clone())
    }

    pub fn bool(value: bool) -> Self {
        Expression::Constant(Constant::Bool(value))
    }

    pub fn signed(value: i64, bits: u32) -> Self {
        Expression::Constant(Constant::Signed { value, bits })
    }

    pub fn unsigned(value: u64, bits: u32) -> Self {
        Expression::Constant(Constant::Unsigned { value, bits })
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expression) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Eq, left, right)
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Ne, left, right)
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Lt, left, right)
    }

    /// Inferred data type.
    ///
    /// Comparisons and logical connectives are boolean; arithmetic, bitwise
    /// and shift operators take the type of their left operand.
    pub fn data_type(&self) -> DataType {
        match self {
            Expression::Variable(v) => v.data_type(),
            Expression::Constant(c) => c.data_type(),
            Expression::Unary { op, operand } => match op {
                UnaryOp::Not => DataType::Boolean,
                UnaryOp::Neg | UnaryOp::BitNot => operand.data_type(),
            },
            Expression::Binary { op, left, .. } => {
                if op.yields_boolean() {
                    DataType::Boolean
                } else {
                    left.data_type()
                }
            }
        }
    }

    /// Variables referenced by this expression, in first-occurrence order
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Expression::Variable(v) => {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
            Expression::Constant(_) => {}
            Expression::Unary { operand, .. } => operand.collect_variables(out),
            Expression::Binary { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
        }
    }
}

impl From<Constant> for Expression {
    fn from(constant: Constant) -> Self {
        Expression::Constant(constant)
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Expression::Variable(variable.clone())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(v) => write!(f, "{}", v),
            Expression::Constant(c) => write!(f, "{}", c),
            Expression::Unary { op, operand } => write!(f, "{}({})", op.as_str(), operand),
            Expression::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
        }
    }
}

/// Assignment target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Variable(Variable),
}

impl Location {
    pub fn variable(&self) -> &Variable {
        match self {
            Location::Variable(v) => v,
        }
    }
}

impl From<&Variable> for Location {
    fn from(variable: &Variable) -> Self {
        Location::Variable(variable.clone())
    }
}
