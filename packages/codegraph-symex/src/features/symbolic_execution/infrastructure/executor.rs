/*
 * Symbolic Executor
 *
 * Decides whether any target block is reachable under some input and, if
 * so, returns the input.
 *
 * Algorithm:
 * 1. Prune: keep blocks that can reach a target. Entry pruned -> Unreachable
 *    without touching the solver.
 * 2. Rank: reverse post-order from Entry.
 * 3. Seed: version 0 of every parameter, empty stack, nothing pending.
 * 4. Drain: pop all states queued at the lowest-ranked block.
 * 5. Merge: max version per symbol, union of condition stacks, and one
 *    implication for the join:
 *        reach(B#k) => OR_i (reach(src_i) /\ cond_i /\ x@merged = x@i ...)
 * 6. Target check (own session): Sat -> witness, Unsat -> drop the state,
 *    Unknown -> remember and keep exploring.
 * 7. Advance: compile the block's operation, queue successor states.
 * 8. Terminate: Unknown if a check was Unknown or the visit bound dropped
 *    states, else Unreachable.
 *
 * The only await points are solver calls; all run state is local.
 */

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace};

use super::model;
use super::prune::blocks_reaching;
use super::rank::{rank_blocks, Ranks};
use super::translate::{self, reach_marker};
use super::worklist::Worklist;
use crate::config::ExecutorConfig;
use crate::errors::Result;
use crate::features::flow_graph::{BasicBlock, BlockId, FlowGraph, Successors};
use crate::features::smt::{terms, SatResult, Solver, SolverError, SolverSession, Term};
use crate::features::symbolic_execution::domain::{
    ConditionStack, ContractViolation, ExecutionModel, ExecutionResult, ExecutionState,
    ExecutionStats, UnmergedCondition, VersionMap,
};

/// Symbolic executor over one [`Solver`]
#[derive(Debug, Clone)]
pub struct SymbolicExecutor<S> {
    solver: S,
    config: ExecutorConfig,
}

enum TargetVerdict {
    Reachable(ExecutionModel),
    Unsat,
    Unknown,
}

impl<S: Solver> SymbolicExecutor<S> {
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, ExecutorConfig::default())
    }

    pub fn with_config(solver: S, config: ExecutorConfig) -> Self {
        Self { solver, config }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Is any of `targets` reachable from Entry?
    pub async fn execute(&self, graph: &FlowGraph, targets: &[BlockId]) -> Result<ExecutionResult> {
        let (result, _) = self.execute_with_stats(graph, targets).await?;
        Ok(result)
    }

    /// [`execute`](Self::execute) plus run counters
    pub async fn execute_with_stats(
        &self,
        graph: &FlowGraph,
        targets: &[BlockId],
    ) -> Result<(ExecutionResult, ExecutionStats)> {
        info!(
            blocks = graph.len(),
            targets = targets.len(),
            "symbolic execution started"
        );

        let mut run = Run::new(graph, targets, self.config.max_block_visits)?;
        let result = self.drain(&mut run).await?;

        let stats = run.stats;
        info!(
            result = result.as_str(),
            batches = stats.batches,
            states_merged = stats.states_merged,
            solver_checks = stats.solver_checks,
            pruned_blocks = stats.pruned_blocks,
            "symbolic execution finished"
        );
        Ok((result, stats))
    }

    async fn drain(&self, run: &mut Run<'_>) -> Result<ExecutionResult> {
        let entry = run.graph.entry();
        if !run.ranks.contains_key(&entry) {
            debug!("entry cannot reach any target");
            return Ok(ExecutionResult::Unreachable);
        }
        run.seed()?;

        let mut saw_unknown = false;
        while let Some((block, batch)) = run.worklist.pop_batch() {
            let Some(marker) = run.visit(block, batch.len()) else {
                continue;
            };
            let state = merge(block, batch, &marker);

            if run.targets.contains(&block) {
                run.stats.solver_checks += 1;
                match self.check_target(run.graph, &state, &marker).await? {
                    TargetVerdict::Reachable(model) => {
                        debug!(%block, %model, "target reachable");
                        return Ok(ExecutionResult::Reachable(model));
                    }
                    TargetVerdict::Unsat => {
                        debug!(%block, "target unsat on this batch");
                        continue;
                    }
                    TargetVerdict::Unknown => {
                        debug!(%block, "target undecided");
                        run.stats.unknown_checks += 1;
                        saw_unknown = true;
                    }
                }
            }

            run.advance(&state, &marker)?;
        }

        if saw_unknown || run.stats.dropped_states > 0 {
            Ok(ExecutionResult::Unknown)
        } else {
            Ok(ExecutionResult::Unreachable)
        }
    }

    async fn check_target(
        &self,
        graph: &FlowGraph,
        state: &ExecutionState,
        marker: &Term,
    ) -> Result<TargetVerdict> {
        let mut session = self.solver.open_session().await?;
        // On error the session is dropped, which releases it too
        let verdict = decide(&mut session, graph, state, marker).await?;
        session.close().await?;
        Ok(verdict)
    }
}

async fn decide<T: SolverSession>(
    session: &mut T,
    graph: &FlowGraph,
    state: &ExecutionState,
    marker: &Term,
) -> Result<TargetVerdict> {
    for term in state.conditions.terms() {
        session.assert(&term).await?;
    }
    session.assert(marker).await?;

    match session.check_sat().await? {
        SatResult::Sat => Ok(TargetVerdict::Reachable(witness(session, graph).await?)),
        SatResult::Unsat => Ok(TargetVerdict::Unsat),
        SatResult::Unknown => Ok(TargetVerdict::Unknown),
    }
}

/// Version-0 value of every Entry parameter, in declaration order
async fn witness<T: SolverSession>(session: &mut T, graph: &FlowGraph) -> Result<ExecutionModel> {
    let mut values = Vec::with_capacity(graph.parameters().len());
    for parameter in graph.parameters() {
        let symbol = translate::symbol_key(parameter)?.versioned(0);
        let value = session.evaluate(&symbol).await?;
        let constant = model::to_constant(&value, parameter.data_type()).ok_or_else(|| {
            SolverError::UnexpectedResponse {
                command: format!("(get-value ({}))", symbol),
                response: value.to_string(),
            }
        })?;
        values.push((parameter.clone(), constant));
    }
    Ok(ExecutionModel::new(values))
}

/// Fold a batch of states arriving at `block` into one
fn merge(block: BlockId, batch: Vec<ExecutionState>, marker: &Term) -> ExecutionState {
    let versions = VersionMap::merge_max(batch.iter().map(|s| &s.versions));
    let mut conditions = ConditionStack::merge(batch.iter().map(|s| &s.conditions));

    let merged_versions = versions.entries();
    let disjuncts: Vec<Term> = batch
        .iter()
        .filter_map(|s| s.pending.as_ref())
        .map(|edge| {
            let mut parts = vec![edge.source_marker.clone(), edge.condition.clone()];
            for &(key, version) in &merged_versions {
                let own = edge.versions.get(key);
                if own != version {
                    parts.push(terms::eq(key.versioned(version), key.versioned(own)));
                }
            }
            terms::and_all(parts)
        })
        .collect();

    trace!(
        %block,
        states = batch.len(),
        incoming_edges = disjuncts.len(),
        "merge"
    );
    if !disjuncts.is_empty() {
        conditions = conditions.push(terms::implies(marker.clone(), terms::or_all(disjuncts)));
    }

    ExecutionState {
        block,
        versions,
        conditions,
        pending: None,
    }
}

/// Mutable state of one `execute` call
struct Run<'g> {
    graph: &'g FlowGraph,
    targets: FxHashSet<BlockId>,
    ranks: Ranks,
    worklist: Worklist,
    visits: FxHashMap<BlockId, usize>,
    max_visits: usize,
    stats: ExecutionStats,
}

impl<'g> Run<'g> {
    fn new(graph: &'g FlowGraph, targets: &[BlockId], max_visits: usize) -> Result<Self> {
        if let Some(&foreign) = targets.iter().find(|t| !graph.contains(**t)) {
            return Err(ContractViolation::ForeignTarget { block: foreign }.into());
        }

        let retained = blocks_reaching(graph, targets);
        let ranks = rank_blocks(graph, &retained);
        let stats = ExecutionStats {
            retained_blocks: retained.len(),
            pruned_blocks: graph.len() - retained.len(),
            ..Default::default()
        };
        debug!(
            retained = stats.retained_blocks,
            pruned = stats.pruned_blocks,
            "pruned blocks that cannot reach a target"
        );

        Ok(Self {
            graph,
            targets: targets.iter().copied().collect(),
            ranks,
            worklist: Worklist::new(),
            visits: FxHashMap::default(),
            max_visits,
            stats,
        })
    }

    fn seed(&mut self) -> Result<()> {
        let mut versions = VersionMap::new();
        for parameter in self.graph.parameters() {
            versions.insert(translate::symbol_key(parameter)?, 0);
        }
        self.enqueue(ExecutionState::seed(self.graph.entry(), versions));
        Ok(())
    }

    /// Count a merge of `block`; `None` once the block has used up its visits
    fn visit(&mut self, block: BlockId, arrivals: usize) -> Option<Term> {
        let count = self.visits.entry(block).or_insert(0);
        if *count >= self.max_visits {
            debug!(%block, dropped = arrivals, "visit bound reached");
            self.stats.dropped_states += arrivals;
            return None;
        }
        let marker = reach_marker(block, *count);
        *count += 1;
        self.stats.batches += 1;
        self.stats.states_merged += arrivals;
        Some(marker)
    }

    fn enqueue(&mut self, state: ExecutionState) {
        match self.ranks.get(&state.block) {
            Some(&rank) => self.worklist.push(rank, state),
            None => trace!(block = %state.block, "successor pruned"),
        }
    }

    /// Compile the merged block and queue its successors
    fn advance(&mut self, state: &ExecutionState, marker: &Term) -> Result<()> {
        let block = state.block;
        let operation = self.graph.block(block).and_then(BasicBlock::operation);
        let compiled = translate::operation(block, operation, &state.versions)?;
        let shape = self
            .graph
            .successor_shape(block)
            .map_err(ContractViolation::from)?;

        match (shape, compiled.condition) {
            (Successors::None, None) => {}
            (Successors::Unconditional(next), None) => {
                self.follow(state, marker, next, compiled.effect, &compiled.versions);
            }
            (Successors::Branch { on_true, on_false }, Some(condition)) => {
                let taken = terms::and_all([condition.clone(), compiled.effect.clone()]);
                let not_taken = terms::and_all([terms::not(condition), compiled.effect]);
                self.follow(state, marker, on_true, taken, &compiled.versions);
                self.follow(state, marker, on_false, not_taken, &compiled.versions);
            }
            (Successors::Branch { .. }, None) => {
                return Err(ContractViolation::BranchWithoutCondition { block }.into());
            }
            (Successors::None | Successors::Unconditional(_), Some(_)) => {
                return Err(ContractViolation::MissingBranchTarget { block }.into());
            }
        }
        Ok(())
    }

    fn follow(
        &mut self,
        from: &ExecutionState,
        marker: &Term,
        next: BlockId,
        condition: Term,
        versions: &VersionMap,
    ) {
        self.enqueue(ExecutionState {
            block: next,
            versions: versions.clone(),
            conditions: from.conditions.clone(),
            pending: Some(UnmergedCondition {
                source_marker: marker.clone(),
                condition,
                versions: versions.clone(),
            }),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::{DataType, Expression, FlowGraphBuilder, Operation, Variable};
    use crate::features::smt::Value;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Answers every check with a fixed verdict and records what it saw
    #[derive(Clone)]
    struct FixedSolver {
        verdict: SatResult,
        sessions: Arc<AtomicUsize>,
        asserted: Arc<Mutex<Vec<Vec<Term>>>>,
    }

    impl FixedSolver {
        fn new(verdict: SatResult) -> Self {
            Self {
                verdict,
                sessions: Arc::new(AtomicUsize::new(0)),
                asserted: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    struct FixedSession {
        verdict: SatResult,
        terms: Vec<Term>,
        log: Arc<Mutex<Vec<Vec<Term>>>>,
    }

    #[async_trait]
    impl Solver for FixedSolver {
        type Session = FixedSession;

        async fn open_session(&self) -> std::result::Result<FixedSession, SolverError> {
            self.sessions.fetch_add(1, Ordering::SeqCst);
            Ok(FixedSession {
                verdict: self.verdict,
                terms: Vec::new(),
                log: Arc::clone(&self.asserted),
            })
        }
    }

    #[async_trait]
    impl SolverSession for FixedSession {
        async fn assert(&mut self, term: &Term) -> std::result::Result<(), SolverError> {
            self.terms.push(term.clone());
            Ok(())
        }

        async fn check_sat(&mut self) -> std::result::Result<SatResult, SolverError> {
            self.log.lock().unwrap().push(self.terms.clone());
            Ok(self.verdict)
        }

        async fn evaluate(&mut self, term: &Term) -> std::result::Result<Value, SolverError> {
            match term.sort() {
                crate::features::smt::Sort::BitVec(width) => Ok(Value::BitVec { value: 0, width }),
                _ => Ok(Value::Bool(false)),
            }
        }

        async fn close(self) -> std::result::Result<(), SolverError> {
            Ok(())
        }
    }

    fn straight_line() -> (FlowGraph, BlockId, Variable) {
        let x = Variable::new("x", DataType::i32());
        let mut builder = FlowGraphBuilder::new(vec![x.clone()], vec![]);
        let assign = builder.add_operation(Operation::assign(
            &x,
            Expression::add(Expression::var(&x), Expression::signed(1, 32)),
        ));
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_sequence(&[entry, assign, exit]).unwrap();
        (builder.build(), exit, x)
    }

    #[tokio::test]
    async fn test_sat_builds_witness_in_parameter_order() {
        let (graph, exit, x) = straight_line();
        let executor = SymbolicExecutor::new(FixedSolver::new(SatResult::Sat));

        let result = executor.execute(&graph, &[exit]).await.unwrap();
        let model = result.model().unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(&x), Some(crate::features::flow_graph::Constant::Signed {
            value: 0,
            bits: 32
        }));
    }

    #[tokio::test]
    async fn test_target_check_asserts_stack_and_marker() {
        let (graph, exit, _) = straight_line();
        let solver = FixedSolver::new(SatResult::Unsat);
        let executor = SymbolicExecutor::new(solver.clone());

        let (result, stats) = executor.execute_with_stats(&graph, &[exit]).await.unwrap();
        assert_eq!(result, ExecutionResult::Unreachable);
        assert_eq!(stats.solver_checks, 1);
        assert_eq!(stats.batches, 3);

        let asserted = solver.asserted.lock().unwrap();
        let terms = &asserted[0];
        // assign: reach => reach(entry); exit: reach => reach(assign) /\ x@1 = x@0 + 1; marker
        assert_eq!(terms.len(), 3);
        assert_eq!(terms.last(), Some(&reach_marker(exit, 0)));
    }

    #[tokio::test]
    async fn test_join_equates_versions_only_on_the_lagging_edge() {
        // entry -> fork ; fork: if c then bump (x = x + 1) else skip ; both -> exit
        let x = Variable::new("x", DataType::i32());
        let c = Variable::new("c", DataType::Boolean);
        let mut builder = FlowGraphBuilder::new(vec![x.clone(), c.clone()], vec![]);
        let fork = builder.add_operation(Operation::jump(Expression::var(&c)));
        let bump = builder.add_operation(Operation::assign(
            &x,
            Expression::add(Expression::var(&x), Expression::signed(1, 32)),
        ));
        let skip = builder.add_empty_block();
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_unconditional_edge(entry, fork).unwrap();
        builder.add_branch(fork, bump, skip).unwrap();
        builder.add_unconditional_edge(bump, exit).unwrap();
        builder.add_unconditional_edge(skip, exit).unwrap();
        let graph = builder.build();

        let solver = FixedSolver::new(SatResult::Unsat);
        let executor = SymbolicExecutor::new(solver.clone());
        let result = executor.execute(&graph, &[exit]).await.unwrap();
        assert_eq!(result, ExecutionResult::Unreachable);

        let key = translate::symbol_key(&x).unwrap();
        let incremented = terms::eq(
            key.versioned(1),
            terms::bvadd(key.versioned(0), terms::bv_const(1, 32)),
        );
        let carried = terms::eq(key.versioned(1), key.versioned(0));
        let join = terms::implies(
            reach_marker(exit, 0),
            terms::or(
                terms::and(reach_marker(bump, 0), incremented),
                terms::and(reach_marker(skip, 0), carried),
            ),
        );

        let asserted = solver.asserted.lock().unwrap();
        assert_eq!(asserted.len(), 1);
        assert!(
            asserted[0].contains(&join),
            "join implication missing from {:?}",
            asserted[0]
        );
        // Branch edges carry the condition and its negation, no equalities
        let c_key = translate::symbol_key(&c).unwrap();
        assert!(asserted[0].contains(&terms::implies(
            reach_marker(skip, 0),
            terms::and(reach_marker(fork, 0), terms::not(c_key.versioned(0))),
        )));
    }

    #[tokio::test]
    async fn test_parameter_wider_than_a_constant_is_rejected_before_solving() {
        let w = Variable::new("w", DataType::signed(128));
        let mut builder = FlowGraphBuilder::new(vec![w], vec![]);
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_unconditional_edge(entry, exit).unwrap();
        let graph = builder.build();

        let solver = FixedSolver::new(SatResult::Sat);
        let executor = SymbolicExecutor::new(solver.clone());
        let err = executor.execute(&graph, &[exit]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::errors::SymexError::ContractViolation(
                ContractViolation::UnsupportedDataType { .. }
            )
        ));
        assert_eq!(solver.sessions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_check_yields_unknown() {
        let (graph, exit, _) = straight_line();
        let executor = SymbolicExecutor::new(FixedSolver::new(SatResult::Unknown));

        let (result, stats) = executor.execute_with_stats(&graph, &[exit]).await.unwrap();
        assert_eq!(result, ExecutionResult::Unknown);
        assert_eq!(stats.unknown_checks, 1);
    }

    #[tokio::test]
    async fn test_foreign_target_is_a_contract_violation() {
        let (graph, _, _) = straight_line();
        let (_, foreign, _) = straight_line();
        let executor = SymbolicExecutor::new(FixedSolver::new(SatResult::Sat));

        let err = executor.execute(&graph, &[foreign]).await.unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_branch_without_condition_is_rejected() {
        let mut builder = FlowGraphBuilder::new(vec![], vec![]);
        let fork = builder.add_empty_block();
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_unconditional_edge(entry, fork).unwrap();
        builder.add_branch(fork, exit, exit).unwrap();
        let graph = builder.build();

        let executor = SymbolicExecutor::new(FixedSolver::new(SatResult::Sat));
        let err = executor.execute(&graph, &[exit]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::errors::SymexError::ContractViolation(
                ContractViolation::BranchWithoutCondition { block }
            ) if block == fork
        ));
    }

    #[tokio::test]
    async fn test_jump_without_branch_pair_is_rejected() {
        let c = Variable::new("c", DataType::Boolean);
        let mut builder = FlowGraphBuilder::new(vec![c.clone()], vec![]);
        let jump = builder.add_operation(Operation::jump(Expression::var(&c)));
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_sequence(&[entry, jump, exit]).unwrap();
        let graph = builder.build();

        let executor = SymbolicExecutor::new(FixedSolver::new(SatResult::Sat));
        let err = executor.execute(&graph, &[exit]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::errors::SymexError::ContractViolation(
                ContractViolation::MissingBranchTarget { .. }
            )
        ));
    }

    #[tokio::test]
    async fn test_loop_hits_visit_bound() {
        // entry -> head ; head: if c then body else exit ; body -> head
        let c = Variable::new("c", DataType::Boolean);
        let mut builder = FlowGraphBuilder::new(vec![c.clone()], vec![]);
        let head = builder.add_operation(Operation::jump(Expression::var(&c)));
        let body = builder.add_empty_block();
        let (entry, exit) = (builder.entry(), builder.exit());
        builder.add_unconditional_edge(entry, head).unwrap();
        builder.add_branch(head, body, exit).unwrap();
        builder.add_unconditional_edge(body, head).unwrap();
        let graph = builder.build();

        let config = ExecutorConfig::default().max_block_visits(3);
        let executor = SymbolicExecutor::with_config(FixedSolver::new(SatResult::Unsat), config);
        let (result, stats) = executor.execute_with_stats(&graph, &[exit]).await.unwrap();

        // head merges three times; the fourth arrival is dropped, and exit
        // (ranked last) is checked once with every exit-bound state merged
        assert_eq!(result, ExecutionResult::Unknown);
        assert_eq!(stats.dropped_states, 1);
        assert_eq!(stats.solver_checks, 1);
    }
}
