//! Concrete IR interpreter
//!
//! Runs a flow graph on concrete parameter values with the same fixed-width
//! semantics the SMT encoding uses, independent of any solver. Used to check
//! that a returned model really drives execution into a target.

use std::collections::HashMap;

use codegraph_symex::features::flow_graph::{
    BinaryOp, BlockId, Constant, DataType, Expression, FlowGraph, Operation, Successors,
    UnaryOp, Variable, VariableId,
};
use codegraph_symex::ExecutionModel;

const MAX_STEPS: usize = 10_000;

pub struct Interpreter<'g> {
    graph: &'g FlowGraph,
    env: HashMap<VariableId, Constant>,
}

impl<'g> Interpreter<'g> {
    pub fn new(graph: &'g FlowGraph, inputs: &[(Variable, Constant)]) -> Self {
        let env = inputs.iter().map(|(v, c)| (v.id(), *c)).collect();
        Self { graph, env }
    }

    pub fn from_model(graph: &'g FlowGraph, model: &ExecutionModel) -> Self {
        Self::new(graph, model.values())
    }

    /// Blocks visited from Entry until a block without successors
    pub fn run(mut self) -> Result<Vec<BlockId>, String> {
        let mut trail = Vec::new();
        let mut current = self.graph.entry();
        for _ in 0..MAX_STEPS {
            trail.push(current);
            let operation = self.graph.block(current).and_then(|b| b.operation()).cloned();
            let shape = self
                .graph
                .successor_shape(current)
                .map_err(|e| e.to_string())?;

            let branch = match &operation {
                Some(Operation::Assignment { location, value }) => {
                    let v = self.eval(value)?;
                    self.env.insert(location.variable().id(), v);
                    None
                }
                Some(Operation::ConditionalJump { condition }) => Some(
                    self.eval(condition)?
                        .as_bool()
                        .ok_or_else(|| format!("non-boolean condition {}", condition))?,
                ),
                Some(Operation::Call { .. }) => return Err("call".to_string()),
                None => None,
            };

            current = match (shape, branch) {
                (Successors::None, _) => return Ok(trail),
                (Successors::Unconditional(next), None) => next,
                (Successors::Branch { on_true, .. }, Some(true)) => on_true,
                (Successors::Branch { on_false, .. }, Some(false)) => on_false,
                (shape, branch) => {
                    return Err(format!("shape {:?} with branch {:?}", shape, branch))
                }
            };
        }
        Err("step limit exceeded".to_string())
    }

    /// Does execution pass through any of `targets`?
    pub fn reaches(self, targets: &[BlockId]) -> Result<bool, String> {
        Ok(self.run()?.iter().any(|b| targets.contains(b)))
    }

    fn eval(&self, expr: &Expression) -> Result<Constant, String> {
        match expr {
            Expression::Variable(v) => self
                .env
                .get(&v.id())
                .copied()
                .ok_or_else(|| format!("read of unassigned {}", v)),
            Expression::Constant(c) => Ok(*c),
            Expression::Unary { op, operand } => {
                let value = self.eval(operand)?;
                let dt = value.data_type();
                match (op, value) {
                    (UnaryOp::Not, Constant::Bool(b)) | (UnaryOp::BitNot, Constant::Bool(b)) => {
                        Ok(Constant::Bool(!b))
                    }
                    (UnaryOp::Neg, _) => int(0u128.wrapping_sub(value.to_bits()), dt),
                    (UnaryOp::BitNot, _) => int(!value.to_bits(), dt),
                    _ => Err(format!("ill-typed {}", expr)),
                }
            }
            Expression::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                binary(*op, l, r).ok_or_else(|| format!("ill-typed {}", expr))
            }
        }
    }
}

fn int(bits: u128, dt: DataType) -> Result<Constant, String> {
    Constant::from_bits(bits, dt).ok_or_else(|| format!("no constant of {:?}", dt))
}

fn mask(width: u32) -> u128 {
    (1u128 << width) - 1
}

fn signed_value(bits: u128, width: u32) -> i128 {
    let shift = 128 - width;
    ((bits << shift) as i128) >> shift
}

fn binary(op: BinaryOp, l: Constant, r: Constant) -> Option<Constant> {
    if let (Constant::Bool(a), Constant::Bool(b)) = (l, r) {
        return Some(Constant::Bool(match op {
            BinaryOp::And | BinaryOp::BitAnd => a && b,
            BinaryOp::Or | BinaryOp::BitOr => a || b,
            BinaryOp::BitXor | BinaryOp::Ne => a != b,
            BinaryOp::Eq => a == b,
            _ => return None,
        }));
    }

    let dt = l.data_type();
    let (signed, width) = match dt {
        DataType::Integer { signed, bits } => (signed, bits),
        _ => return None,
    };
    if r.data_type() != dt {
        return None;
    }
    let m = mask(width);
    let (a, b) = (l.to_bits(), r.to_bits());
    let (sa, sb) = (signed_value(a, width), signed_value(b, width));
    let ones = m;

    let bits = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        // Division by zero follows SMT-LIB bit-vector semantics
        BinaryOp::Div if b == 0 => {
            if signed && sa < 0 {
                1
            } else {
                ones
            }
        }
        BinaryOp::Div if signed => sa.wrapping_div(sb) as u128,
        BinaryOp::Div => a / b,
        BinaryOp::Rem if b == 0 => a,
        BinaryOp::Rem if signed => sa.wrapping_rem(sb) as u128,
        BinaryOp::Rem => a % b,
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl if b >= width as u128 => 0,
        BinaryOp::Shl => a << b,
        BinaryOp::Shr if signed => {
            let shift = b.min(width as u128 - 1) as u32;
            (sa >> shift) as u128
        }
        BinaryOp::Shr if b >= width as u128 => 0,
        BinaryOp::Shr => a >> b,
        BinaryOp::Eq => return Some(Constant::Bool(a == b)),
        BinaryOp::Ne => return Some(Constant::Bool(a != b)),
        BinaryOp::Lt => return Some(Constant::Bool(if signed { sa < sb } else { a < b })),
        BinaryOp::Le => return Some(Constant::Bool(if signed { sa <= sb } else { a <= b })),
        BinaryOp::Gt => return Some(Constant::Bool(if signed { sa > sb } else { a > b })),
        BinaryOp::Ge => return Some(Constant::Bool(if signed { sa >= sb } else { a >= b })),
        BinaryOp::And | BinaryOp::Or => return None,
    };
    Constant::from_bits(bits & m, dt)
}
