//! Typed IR expression builders
//!
//! `BoolExpr` / `IntExpr` wrap [`Expression`] so that graph construction code
//! reads like the source it models:
//!
//! ```text
//! let x = IntExpr::var(&x_var);
//! let cond = (x.clone() + 2).gt(10) & !BoolExpr::var(&flag);
//! builder.add_operation(Operation::jump(cond.into()));
//! ```
//!
//! Integer literals (`i64`) adopt the data type of the expression they are
//! combined with.

use std::ops::{Add, BitAnd, BitOr, Mul, Neg, Not, Sub};

use crate::features::flow_graph::{BinaryOp, Constant, DataType, Expression, UnaryOp, Variable};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoolExpr(Expression);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntExpr(Expression);

/// Right-hand side of an integer operator
pub trait IntOperand {
    fn into_operand(self, like: &IntExpr) -> IntExpr;
}

impl IntOperand for IntExpr {
    fn into_operand(self, _like: &IntExpr) -> IntExpr {
        self
    }
}

impl IntOperand for &IntExpr {
    fn into_operand(self, _like: &IntExpr) -> IntExpr {
        self.clone()
    }
}

impl IntOperand for i64 {
    fn into_operand(self, like: &IntExpr) -> IntExpr {
        like.literal(self)
    }
}

impl BoolExpr {
    pub fn var(variable: &Variable) -> Self {
        BoolExpr(Expression::var(variable))
    }

    pub fn lit(value: bool) -> Self {
        BoolExpr(Expression::bool(value))
    }

    pub fn as_expression(&self) -> &Expression {
        &self.0
    }

    pub fn into_expression(self) -> Expression {
        self.0
    }

    pub fn eq(&self, rhs: impl Into<BoolExpr>) -> BoolExpr {
        self.compare(BinaryOp::Eq, rhs.into())
    }

    pub fn ne(&self, rhs: impl Into<BoolExpr>) -> BoolExpr {
        self.compare(BinaryOp::Ne, rhs.into())
    }

    fn compare(&self, op: BinaryOp, rhs: BoolExpr) -> BoolExpr {
        BoolExpr(Expression::binary(op, self.0.clone(), rhs.0))
    }
}

impl From<bool> for BoolExpr {
    fn from(value: bool) -> Self {
        BoolExpr::lit(value)
    }
}

impl From<BoolExpr> for Expression {
    fn from(expr: BoolExpr) -> Self {
        expr.0
    }
}

impl BitAnd for BoolExpr {
    type Output = BoolExpr;

    fn bitand(self, rhs: BoolExpr) -> BoolExpr {
        BoolExpr(Expression::binary(BinaryOp::And, self.0, rhs.0))
    }
}

impl BitOr for BoolExpr {
    type Output = BoolExpr;

    fn bitor(self, rhs: BoolExpr) -> BoolExpr {
        BoolExpr(Expression::binary(BinaryOp::Or, self.0, rhs.0))
    }
}

impl Not for BoolExpr {
    type Output = BoolExpr;

    fn not(self) -> BoolExpr {
        BoolExpr(Expression::not(self.0))
    }
}

impl IntExpr {
    pub fn var(variable: &Variable) -> Self {
        IntExpr(Expression::var(variable))
    }

    pub fn signed(value: i64, bits: u32) -> Self {
        IntExpr(Expression::signed(value, bits))
    }

    pub fn unsigned(value: u64, bits: u32) -> Self {
        IntExpr(Expression::unsigned(value, bits))
    }

    pub fn data_type(&self) -> DataType {
        self.0.data_type()
    }

    pub fn as_expression(&self) -> &Expression {
        &self.0
    }

    pub fn into_expression(self) -> Expression {
        self.0
    }

    /// `value` as a constant of this expression's type (wrapping to its width)
    pub fn literal(&self, value: i64) -> IntExpr {
        let constant = Constant::from_bits(value as i128 as u128, self.data_type())
            .filter(|c| !matches!(c, Constant::Bool(_)))
            .unwrap_or(Constant::Signed { value, bits: 64 });
        IntExpr(Expression::Constant(constant))
    }

    pub fn eq(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Eq, rhs)
    }

    pub fn ne(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Ne, rhs)
    }

    pub fn lt(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Lt, rhs)
    }

    pub fn le(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Le, rhs)
    }

    pub fn gt(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Gt, rhs)
    }

    pub fn ge(&self, rhs: impl IntOperand) -> BoolExpr {
        self.compare(BinaryOp::Ge, rhs)
    }

    fn compare(&self, op: BinaryOp, rhs: impl IntOperand) -> BoolExpr {
        let rhs = rhs.into_operand(self);
        BoolExpr(Expression::binary(op, self.0.clone(), rhs.0))
    }

    fn arithmetic(self, op: BinaryOp, rhs: impl IntOperand) -> IntExpr {
        let rhs = rhs.into_operand(&self);
        IntExpr(Expression::binary(op, self.0, rhs.0))
    }
}

impl From<IntExpr> for Expression {
    fn from(expr: IntExpr) -> Self {
        expr.0
    }
}

impl<R: IntOperand> Add<R> for IntExpr {
    type Output = IntExpr;

    fn add(self, rhs: R) -> IntExpr {
        self.arithmetic(BinaryOp::Add, rhs)
    }
}

impl<R: IntOperand> Sub<R> for IntExpr {
    type Output = IntExpr;

    fn sub(self, rhs: R) -> IntExpr {
        self.arithmetic(BinaryOp::Sub, rhs)
    }
}

impl<R: IntOperand> Mul<R> for IntExpr {
    type Output = IntExpr;

    fn mul(self, rhs: R) -> IntExpr {
        self.arithmetic(BinaryOp::Mul, rhs)
    }
}

impl Neg for IntExpr {
    type Output = IntExpr;

    fn neg(self) -> IntExpr {
        IntExpr(Expression::unary(UnaryOp::Neg, self.0))
    }
}
