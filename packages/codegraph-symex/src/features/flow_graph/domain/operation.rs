//! Block operations and block kinds

use super::{DataType, Expression, Location, Variable};
use std::fmt;

/// Callee signature carried by [`Operation::Call`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSignature {
    pub name: String,
    pub parameter_types: Vec<DataType>,
    pub return_types: Vec<DataType>,
}

impl CallSignature {
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<DataType>,
        return_types: Vec<DataType>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_types,
        }
    }
}

/// The single operation an inner block may carry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Branch on a boolean condition (block must have true/false successors)
    ConditionalJump { condition: Expression },
    Assignment {
        location: Location,
        value: Expression,
    },
    /// Interprocedural linkage; not interpreted by the symbolic executor
    Call {
        signature: CallSignature,
        arguments: Vec<Expression>,
        returns: Option<Vec<Location>>,
    },
}

impl Operation {
    pub fn jump(condition: Expression) -> Self {
        Operation::ConditionalJump { condition }
    }

    pub fn assign(target: &Variable, value: Expression) -> Self {
        Operation::Assignment {
            location: Location::Variable(target.clone()),
            value,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operation::ConditionalJump { .. } => "ConditionalJump",
            Operation::Assignment { .. } => "Assignment",
            Operation::Call { .. } => "Call",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ConditionalJump { condition } => write!(f, "if {}", condition),
            Operation::Assignment { location, value } => {
                write!(f, "{} = {}", location.variable(), value)
            }
            Operation::Call {
                signature,
                arguments,
                ..
            } => {
                let args: Vec<_> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "call {}({})", signature.name, args.join(", "))
            }
        }
    }
}

/// Basic block kinds.
///
/// Blocks are never compared by content; identity is the [`BlockId`](super::BlockId)
/// handle under which the graph stores them.
#[derive(Debug, Clone)]
pub enum BasicBlock {
    Entry { parameters: Vec<Variable> },
    Exit { returns: Vec<Expression> },
    Inner { operation: Option<Operation> },
}

impl BasicBlock {
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            BasicBlock::Inner { operation } => operation.as_ref(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BasicBlock::Entry { .. } => "Entry",
            BasicBlock::Exit { .. } => "Exit",
            BasicBlock::Inner { .. } => "Inner",
        }
    }
}
