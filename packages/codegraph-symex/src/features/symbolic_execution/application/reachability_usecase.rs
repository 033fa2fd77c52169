//! Reachability UseCase Implementation

use async_trait::async_trait;
use tracing::debug;

use crate::config::{SymexConfig, Validatable};
use crate::errors::Result;
use crate::features::flow_graph::{BlockId, FlowGraph};
use crate::features::smt::{SmtLibProcessSolver, Solver};
use crate::features::symbolic_execution::domain::{ExecutionResult, ExecutionStats};
use crate::features::symbolic_execution::infrastructure::SymbolicExecutor;

/// Reachability UseCase Trait
#[async_trait]
pub trait ReachabilityUseCase: Send + Sync {
    /// Is any of `targets` reachable from the graph's Entry?
    async fn check_reachability(
        &self,
        graph: &FlowGraph,
        targets: &[BlockId],
    ) -> Result<ExecutionResult>;

    /// Same as [`check_reachability`](Self::check_reachability), with run counters
    async fn check_reachability_with_stats(
        &self,
        graph: &FlowGraph,
        targets: &[BlockId],
    ) -> Result<(ExecutionResult, ExecutionStats)>;
}

/// Reachability UseCase Implementation
#[derive(Debug, Clone)]
pub struct ReachabilityUseCaseImpl<S> {
    executor: SymbolicExecutor<S>,
}

impl<S: Solver> ReachabilityUseCaseImpl<S> {
    pub fn new(executor: SymbolicExecutor<S>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &SymbolicExecutor<S> {
        &self.executor
    }
}

impl ReachabilityUseCaseImpl<SmtLibProcessSolver> {
    /// Executor backed by an SMT-LIB solver process, as configured
    pub fn from_config(config: SymexConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            program = %config.solver.program,
            max_block_visits = config.executor.max_block_visits,
            "reachability use case configured"
        );
        let solver = SmtLibProcessSolver::new(config.solver);
        Ok(Self::new(SymbolicExecutor::with_config(
            solver,
            config.executor,
        )))
    }
}

#[async_trait]
impl<S: Solver> ReachabilityUseCase for ReachabilityUseCaseImpl<S> {
    async fn check_reachability(
        &self,
        graph: &FlowGraph,
        targets: &[BlockId],
    ) -> Result<ExecutionResult> {
        self.executor.execute(graph, targets).await
    }

    async fn check_reachability_with_stats(
        &self,
        graph: &FlowGraph,
        targets: &[BlockId],
    ) -> Result<(ExecutionResult, ExecutionStats)> {
        self.executor.execute_with_stats(graph, targets).await
    }
}
