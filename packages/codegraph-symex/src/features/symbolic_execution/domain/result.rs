//! Execution results

use serde::Serialize;
use std::fmt;

use crate::features::flow_graph::{Constant, Variable};

/// Witness input: one constant per Entry parameter, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionModel {
    values: Vec<(Variable, Constant)>,
}

impl ExecutionModel {
    pub fn new(values: Vec<(Variable, Constant)>) -> Self {
        Self { values }
    }

    pub fn get(&self, variable: &Variable) -> Option<Constant> {
        self.values
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, c)| *c)
    }

    pub fn values(&self) -> &[(Variable, Constant)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ExecutionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self
            .values
            .iter()
            .map(|(v, c)| format!("{} = {}", v, c))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "model", rename_all = "snake_case")]
pub enum ExecutionResult {
    Reachable(ExecutionModel),
    Unreachable,
    /// The solver could not decide some target and none was proven reachable
    Unknown,
}

impl ExecutionResult {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ExecutionResult::Reachable(_))
    }

    pub fn model(&self) -> Option<&ExecutionModel> {
        match self {
            ExecutionResult::Reachable(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionResult::Reachable(_) => "reachable",
            ExecutionResult::Unreachable => "unreachable",
            ExecutionResult::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Reachable(model) => write!(f, "reachable {}", model),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionStats {
    /// Blocks that cannot reach any target
    pub pruned_blocks: usize,
    pub retained_blocks: usize,
    /// Worklist pops (one merge each)
    pub batches: usize,
    pub states_merged: usize,
    pub solver_checks: usize,
    pub unknown_checks: usize,
    /// States discarded by the per-block visit bound
    pub dropped_states: usize,
}
