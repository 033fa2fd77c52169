/*
 * IR -> SMT translation
 *
 * Expressions are compiled against a version map: every variable reference
 * reads the current version of its symbol. Integers become bit-vectors of
 * their declared width; signedness picks the signed or unsigned operator
 * where the two differ (comparison, division, remainder, right shift).
 *
 * Floats and Call operations have no encoding and are contract violations.
 */

use crate::features::flow_graph::{
    BinaryOp, BlockId, Constant, DataType, Expression, Operation, UnaryOp, Variable,
};
use crate::features::smt::{terms, Sort, Term};
use crate::features::symbolic_execution::domain::{ContractViolation, SymbolKey, VersionMap};

/// Compiled form of one block's operation
#[derive(Debug, Clone)]
pub struct TranslatedOperation {
    /// Branch predicate (conditional jumps only)
    pub condition: Option<Term>,
    /// Constraint the block adds on every outgoing edge
    pub effect: Term,
    /// Versions after the operation
    pub versions: VersionMap,
}

/// Widest integer a witness can report (see [`Constant`])
pub const MAX_INTEGER_BITS: u32 = 64;

pub fn sort_of(data_type: DataType) -> Result<Sort, ContractViolation> {
    match data_type {
        DataType::Boolean => Ok(Sort::Bool),
        DataType::Integer { bits, .. } if (1..=MAX_INTEGER_BITS).contains(&bits) => {
            Ok(Sort::BitVec(bits))
        }
        _ => Err(ContractViolation::UnsupportedDataType { data_type }),
    }
}

pub fn symbol_key(variable: &Variable) -> Result<SymbolKey, ContractViolation> {
    Ok(SymbolKey::new(
        variable.symbol_stem(),
        sort_of(variable.data_type())?,
    ))
}

/// Reached-marker boolean for the `visit`-th merge of `block`
pub fn reach_marker(block: BlockId, visit: usize) -> Term {
    terms::declare_const(format!("reach!{}#{}", block, visit), Sort::Bool)
}

fn constant(c: &Constant) -> Result<Term, ContractViolation> {
    match c {
        Constant::Bool(b) => Ok(Term::Bool(*b)),
        _ => match sort_of(c.data_type())? {
            Sort::BitVec(bits) => Ok(terms::bv_const(c.to_bits(), bits)),
            _ => Err(ContractViolation::UnsupportedDataType {
                data_type: c.data_type(),
            }),
        },
    }
}

fn ill_sorted(expression: &Expression, reason: impl Into<String>) -> ContractViolation {
    ContractViolation::IllSorted {
        expression: expression.to_string(),
        reason: reason.into(),
    }
}

pub fn expression(expr: &Expression, versions: &VersionMap) -> Result<Term, ContractViolation> {
    match expr {
        Expression::Variable(v) => {
            let key = symbol_key(v)?;
            Ok(key.versioned(versions.get(&key)))
        }
        Expression::Constant(c) => constant(c),
        Expression::Unary { op, operand } => {
            let inner = expression(operand, versions)?;
            match (op, inner.sort()) {
                (UnaryOp::Not, Sort::Bool) => Ok(terms::not(inner)),
                (UnaryOp::Neg, Sort::BitVec(_)) => Ok(terms::bvneg(inner)),
                (UnaryOp::BitNot, Sort::BitVec(_)) => Ok(terms::bvnot(inner)),
                (UnaryOp::BitNot, Sort::Bool) => Ok(terms::not(inner)),
                (op, sort) => Err(ill_sorted(
                    expr,
                    format!("'{}' cannot be applied to {}", op.as_str(), sort),
                )),
            }
        }
        Expression::Binary { op, left, right } => {
            let signed = left.data_type().is_signed();
            let l = expression(left, versions)?;
            let r = expression(right, versions)?;
            binary(expr, *op, signed, l, r)
        }
    }
}

fn binary(
    expr: &Expression,
    op: BinaryOp,
    signed: bool,
    l: Term,
    r: Term,
) -> Result<Term, ContractViolation> {
    let (ls, rs) = (l.sort(), r.sort());
    if ls != rs {
        return Err(ill_sorted(
            expr,
            format!("operands of '{}' have sorts {} and {}", op.as_str(), ls, rs),
        ));
    }

    let term = match (ls, op) {
        (_, BinaryOp::Eq) => terms::eq(l, r),
        (_, BinaryOp::Ne) => terms::not(terms::eq(l, r)),

        (Sort::Bool, BinaryOp::And | BinaryOp::BitAnd) => terms::and(l, r),
        (Sort::Bool, BinaryOp::Or | BinaryOp::BitOr) => terms::or(l, r),
        (Sort::Bool, BinaryOp::BitXor) => terms::distinct(l, r),

        (Sort::BitVec(_), BinaryOp::Add) => terms::bvadd(l, r),
        (Sort::BitVec(_), BinaryOp::Sub) => terms::bvsub(l, r),
        (Sort::BitVec(_), BinaryOp::Mul) => terms::bvmul(l, r),
        (Sort::BitVec(_), BinaryOp::Div) if signed => terms::bvsdiv(l, r),
        (Sort::BitVec(_), BinaryOp::Div) => terms::bvudiv(l, r),
        (Sort::BitVec(_), BinaryOp::Rem) if signed => terms::bvsrem(l, r),
        (Sort::BitVec(_), BinaryOp::Rem) => terms::bvurem(l, r),
        (Sort::BitVec(_), BinaryOp::BitAnd) => terms::bvand(l, r),
        (Sort::BitVec(_), BinaryOp::BitOr) => terms::bvor(l, r),
        (Sort::BitVec(_), BinaryOp::BitXor) => terms::bvxor(l, r),
        (Sort::BitVec(_), BinaryOp::Shl) => terms::bvshl(l, r),
        (Sort::BitVec(_), BinaryOp::Shr) if signed => terms::bvashr(l, r),
        (Sort::BitVec(_), BinaryOp::Shr) => terms::bvlshr(l, r),

        (Sort::BitVec(_), BinaryOp::Lt) if signed => terms::bvslt(l, r),
        (Sort::BitVec(_), BinaryOp::Lt) => terms::bvult(l, r),
        (Sort::BitVec(_), BinaryOp::Le) if signed => terms::bvsle(l, r),
        (Sort::BitVec(_), BinaryOp::Le) => terms::bvule(l, r),
        (Sort::BitVec(_), BinaryOp::Gt) if signed => terms::bvsgt(l, r),
        (Sort::BitVec(_), BinaryOp::Gt) => terms::bvugt(l, r),
        (Sort::BitVec(_), BinaryOp::Ge) if signed => terms::bvsge(l, r),
        (Sort::BitVec(_), BinaryOp::Ge) => terms::bvuge(l, r),

        (sort, op) => {
            return Err(ill_sorted(
                expr,
                format!("'{}' is not defined on {}", op.as_str(), sort),
            ))
        }
    };
    Ok(term)
}

/// Compile the operation of `block` (if any) against `versions`
pub fn operation(
    block: BlockId,
    operation: Option<&Operation>,
    versions: &VersionMap,
) -> Result<TranslatedOperation, ContractViolation> {
    match operation {
        None => Ok(TranslatedOperation {
            condition: None,
            effect: Term::Bool(true),
            versions: versions.clone(),
        }),
        Some(Operation::ConditionalJump { condition }) => {
            let compiled = expression(condition, versions)?;
            if compiled.sort() != Sort::Bool {
                return Err(ill_sorted(condition, "branch condition is not boolean"));
            }
            Ok(TranslatedOperation {
                condition: Some(compiled),
                effect: Term::Bool(true),
                versions: versions.clone(),
            })
        }
        Some(Operation::Assignment { location, value }) => {
            // Right-hand side reads the prior versions
            let rhs = expression(value, versions)?;
            let key = symbol_key(location.variable())?;
            if rhs.sort() != key.sort() {
                return Err(ill_sorted(
                    value,
                    format!(
                        "assigned to '{}' of sort {} but has sort {}",
                        location.variable(),
                        key.sort(),
                        rhs.sort()
                    ),
                ));
            }
            let (next, version) = versions.bump(&key);
            Ok(TranslatedOperation {
                condition: None,
                effect: terms::eq(key.versioned(version), rhs),
                versions: next,
            })
        }
        Some(op @ Operation::Call { .. }) => Err(ContractViolation::UnsupportedOperation {
            block,
            operation: op.kind(),
        }),
    }
}
