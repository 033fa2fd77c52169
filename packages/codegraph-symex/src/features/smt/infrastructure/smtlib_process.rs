//! SMT-LIB v2 process solver
//!
//! Drives an external solver (`z3 -in -smt2` by default) over stdin/stdout.
//! One child process per session; the process is killed when the session is
//! dropped, so an early return never leaks it.
//!
//! ## Protocol
//!
//! ```text
//! (set-option :produce-models true)
//! (set-logic ALL)
//! (declare-fun |x!3@0| () (_ BitVec 32))   ; lazily, first use only
//! (assert ...)
//! (check-sat)                               ; -> sat | unsat | unknown
//! (get-value (|x!3@0|))                     ; -> ((|x!3@0| #x00000000))
//! (exit)
//! ```

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use super::sexp::{self, SExpr};
use crate::config::SolverConfig;
use crate::features::smt::domain::{Term, Value};
use crate::features::smt::ports::{SatResult, Solver, SolverError, SolverSession};

const EXIT_GRACE: Duration = Duration::from_millis(500);

/// Solver backed by an SMT-LIB speaking child process
#[derive(Debug, Clone)]
pub struct SmtLibProcessSolver {
    config: SolverConfig,
}

impl SmtLibProcessSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Default for SmtLibProcessSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

#[async_trait]
impl Solver for SmtLibProcessSolver {
    type Session = SmtLibSession;

    async fn open_session(&self) -> Result<SmtLibSession, SolverError> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SolverError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(SolverError::ProcessExited)?;
        let stdout = child.stdout.take().ok_or(SolverError::ProcessExited)?;
        tracing::debug!(program = %self.config.program, pid = ?child.id(), "spawned solver");

        let mut session = SmtLibSession {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            declared: FxHashSet::default(),
            timeout: self.config.check_timeout(),
            last_check: None,
        };
        session.send("(set-option :produce-models true)").await?;
        if let Some(logic) = &self.config.logic {
            session.send(&format!("(set-logic {})", logic)).await?;
        }
        Ok(session)
    }
}

/// One solver process
#[derive(Debug)]
pub struct SmtLibSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    declared: FxHashSet<String>,
    timeout: Option<Duration>,
    last_check: Option<SatResult>,
}

impl SmtLibSession {
    async fn send(&mut self, command: &str) -> Result<(), SolverError> {
        tracing::trace!(command, "smt >");
        let written = async {
            self.stdin.write_all(command.as_bytes()).await?;
            self.stdin.write_all(b"\n").await?;
            self.stdin.flush().await
        }
        .await;
        written.map_err(|e| match e.kind() {
            std::io::ErrorKind::BrokenPipe => SolverError::ProcessExited,
            _ => SolverError::Io(e),
        })
    }

    /// Read lines until one complete s-expression has arrived
    async fn read_response(&mut self) -> Result<String, SolverError> {
        let mut response = String::new();
        loop {
            let read = self.stdout.read_line(&mut response).await?;
            if read == 0 {
                return Err(SolverError::ProcessExited);
            }
            if sexp::is_complete(&response) {
                let response = response.trim().to_string();
                tracing::trace!(response = %response, "smt <");
                return Ok(response);
            }
        }
    }

    async fn declare_symbols(&mut self, term: &Term) -> Result<(), SolverError> {
        for function in term.declarations() {
            let key = function.smtlib_name();
            if self.declared.contains(&key) {
                continue;
            }
            if let Some(declaration) = function.declaration() {
                self.send(&declaration).await?;
            }
            self.declared.insert(key);
        }
        Ok(())
    }
}

fn protocol_error(command: &str, response: &str) -> SolverError {
    match sexp::parse(response)
        .ok()
        .as_ref()
        .and_then(|e| e.error_message().map(str::to_string))
    {
        Some(message) => SolverError::Protocol(message),
        None => SolverError::UnexpectedResponse {
            command: command.to_string(),
            response: response.to_string(),
        },
    }
}

#[async_trait]
impl SolverSession for SmtLibSession {
    async fn assert(&mut self, term: &Term) -> Result<(), SolverError> {
        self.declare_symbols(term).await?;
        self.last_check = None;
        self.send(&format!("(assert {})", term)).await
    }

    async fn check_sat(&mut self) -> Result<SatResult, SolverError> {
        self.send("(check-sat)").await?;
        let response = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.read_response()).await {
                Ok(response) => response?,
                Err(_) => {
                    tracing::debug!(timeout_ms = limit.as_millis() as u64, "check-sat timed out");
                    // The process is mid-search and useless now
                    let _ = self.child.start_kill();
                    self.last_check = Some(SatResult::Unknown);
                    return Ok(SatResult::Unknown);
                }
            },
            None => self.read_response().await?,
        };

        let result = match response.as_str() {
            "sat" => SatResult::Sat,
            "unsat" => SatResult::Unsat,
            "unknown" => SatResult::Unknown,
            other => return Err(protocol_error("check-sat", other)),
        };
        self.last_check = Some(result);
        Ok(result)
    }

    async fn evaluate(&mut self, term: &Term) -> Result<Value, SolverError> {
        if self.last_check != Some(SatResult::Sat) {
            return Err(SolverError::NoModel);
        }
        // Symbols never asserted still need a declaration to be evaluated
        self.declare_symbols(term).await?;

        let command = format!("(get-value ({}))", term);
        self.send(&command).await?;
        let response = self.read_response().await?;
        let parsed = sexp::parse(&response).map_err(|_| protocol_error(&command, &response))?;

        let value = match parsed.as_list() {
            Some([SExpr::List(pair)]) if pair.len() == 2 => parse_value(&pair[1]),
            _ => None,
        };
        value.ok_or_else(|| protocol_error(&command, &response))
    }

    async fn close(mut self) -> Result<(), SolverError> {
        // Best effort; a dead process is already closed
        let _ = self.send("(exit)").await;
        match tokio::time::timeout(EXIT_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => tracing::debug!(%status, "solver exited"),
            _ => {
                let _ = self.child.start_kill();
                tracing::debug!("solver killed on close");
            }
        }
        Ok(())
    }
}

/// Convert one model value (`#b..`, `#x..`, `(_ bvN W)`, booleans, integers, strings)
fn parse_value(expr: &SExpr) -> Option<Value> {
    match expr {
        SExpr::Atom(atom) => parse_atom(atom),
        SExpr::Str(s) => Some(Value::String(s.clone())),
        SExpr::List(items) => match items.as_slice() {
            [SExpr::Atom(underscore), SExpr::Atom(bv), SExpr::Atom(width)]
                if underscore == "_" && bv.starts_with("bv") =>
            {
                Some(Value::BitVec {
                    value: bv[2..].parse().ok()?,
                    width: width.parse().ok()?,
                })
            }
            [SExpr::Atom(minus), SExpr::Atom(n)] if minus == "-" => {
                let magnitude: i128 = n.parse().ok()?;
                Some(Value::Int(-magnitude))
            }
            _ => None,
        },
    }
}

fn parse_atom(atom: &str) -> Option<Value> {
    match atom {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }
    if let Some(bits) = atom.strip_prefix("#b") {
        if bits.is_empty() || bits.len() > 128 {
            return None;
        }
        return Some(Value::BitVec {
            value: u128::from_str_radix(bits, 2).ok()?,
            width: bits.len() as u32,
        });
    }
    if let Some(hex) = atom.strip_prefix("#x") {
        if hex.is_empty() || hex.len() > 32 {
            return None;
        }
        return Some(Value::BitVec {
            value: u128::from_str_radix(hex, 16).ok()?,
            width: hex.len() as u32 * 4,
        });
    }
    atom.parse::<i128>().ok().map(Value::Int)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bitvector_values() {
        assert_eq!(
            parse_atom("#b101"),
            Some(Value::BitVec { value: 5, width: 3 })
        );
        assert_eq!(
            parse_atom("#xffffffff"),
            Some(Value::BitVec {
                value: 0xffff_ffff,
                width: 32
            })
        );
        let indexed = sexp::parse("(_ bv42 16)").unwrap();
        assert_eq!(
            parse_value(&indexed),
            Some(Value::BitVec {
                value: 42,
                width: 16
            })
        );
    }

    #[test]
    fn test_parse_other_values() {
        assert_eq!(parse_atom("true"), Some(Value::Bool(true)));
        assert_eq!(parse_atom("17"), Some(Value::Int(17)));
        assert_eq!(
            parse_value(&sexp::parse("(- 4)").unwrap()),
            Some(Value::Int(-4))
        );
        assert_eq!(
            parse_value(&SExpr::Str("ab".to_string())),
            Some(Value::String("ab".to_string()))
        );
        assert_eq!(parse_atom("#b"), None);
        assert_eq!(parse_atom("x"), None);
    }

    #[test]
    fn test_protocol_error_classification() {
        assert!(matches!(
            protocol_error("check-sat", "(error \"bad\")"),
            SolverError::Protocol(m) if m == "bad"
        ));
        assert!(matches!(
            protocol_error("check-sat", "maybe"),
            SolverError::UnexpectedResponse { .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let solver = SmtLibProcessSolver::new(
            SolverConfig::default().program("definitely-not-an-smt-solver-3f9a"),
        );
        let err = solver.open_session().await.unwrap_err();
        assert!(matches!(err, SolverError::Spawn { .. }));
    }
}
