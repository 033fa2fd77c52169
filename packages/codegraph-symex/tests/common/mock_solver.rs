//! Scripted Solver for executor tests
//!
//! Answers `check-sat` from a script (then a default verdict), counts every
//! call, and tracks session release through `Drop`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use codegraph_symex::features::smt::{SatResult, Solver, SolverError, SolverSession, Sort, Term, Value};

#[derive(Debug, Default)]
pub struct SolverCounters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub released: AtomicUsize,
    pub asserts: AtomicUsize,
    pub checks: AtomicUsize,
    pub evaluations: AtomicUsize,
}

impl SolverCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    /// Any solver interaction at all
    pub fn total_calls(&self) -> usize {
        self.opened() + self.asserts.load(Ordering::SeqCst) + self.checks() + self.evaluations()
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    script: Arc<Mutex<VecDeque<SatResult>>>,
    default: SatResult,
    fail_checks: bool,
    pub counters: Arc<SolverCounters>,
}

impl ScriptedSolver {
    /// Every check answers `verdict`
    pub fn always(verdict: SatResult) -> Self {
        Self::scripted(vec![], verdict)
    }

    /// Checks answer `script` in order, then `default`
    pub fn scripted(script: Vec<SatResult>, default: SatResult) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            default,
            fail_checks: false,
            counters: Arc::new(SolverCounters::default()),
        }
    }

    /// Every check fails as if the solver process died
    pub fn failing() -> Self {
        Self {
            fail_checks: true,
            ..Self::always(SatResult::Unknown)
        }
    }
}

pub struct ScriptedSession {
    verdict: Result<SatResult, ()>,
    last: Option<SatResult>,
    counters: Arc<SolverCounters>,
}

#[async_trait]
impl Solver for ScriptedSolver {
    type Session = ScriptedSession;

    async fn open_session(&self) -> Result<ScriptedSession, SolverError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let verdict = if self.fail_checks {
            Err(())
        } else {
            Ok(self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.default))
        };
        Ok(ScriptedSession {
            verdict,
            last: None,
            counters: Arc::clone(&self.counters),
        })
    }
}

#[async_trait]
impl SolverSession for ScriptedSession {
    async fn assert(&mut self, _term: &Term) -> Result<(), SolverError> {
        self.counters.asserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn check_sat(&mut self) -> Result<SatResult, SolverError> {
        self.counters.checks.fetch_add(1, Ordering::SeqCst);
        let verdict = self.verdict.map_err(|_| SolverError::ProcessExited)?;
        self.last = Some(verdict);
        Ok(verdict)
    }

    /// Zero of the term's sort
    async fn evaluate(&mut self, term: &Term) -> Result<Value, SolverError> {
        self.counters.evaluations.fetch_add(1, Ordering::SeqCst);
        if self.last != Some(SatResult::Sat) {
            return Err(SolverError::NoModel);
        }
        match term.sort() {
            Sort::Bool => Ok(Value::Bool(false)),
            Sort::BitVec(width) => Ok(Value::BitVec { value: 0, width }),
            Sort::Int => Ok(Value::Int(0)),
            Sort::String | Sort::RegLan => Ok(Value::String(String::new())),
        }
    }

    async fn close(self) -> Result<(), SolverError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
