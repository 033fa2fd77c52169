//! Symbolic execution configuration
//!
//! ```yaml
//! version: 1
//! solver:
//!   program: z3
//!   args: ["-in", "-smt2"]
//!   logic: ALL
//!   check_timeout_ms: 10000
//! executor:
//!   max_block_visits: 16
//! ```

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CURRENT_VERSION: u32 = 1;

// ============================================================================
// Solver process
// ============================================================================

/// External SMT-LIB solver process settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Executable name or path
    pub program: String,

    /// Arguments putting the solver into SMT-LIB stdin mode
    pub args: Vec<String>,

    /// Sent as `(set-logic ...)` when present
    pub logic: Option<String>,

    /// Per `check-sat` timeout in milliseconds (0 = unlimited)
    pub check_timeout_ms: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: "z3".to_string(),
            args: vec!["-in".to_string(), "-smt2".to_string()],
            logic: Some("ALL".to_string()),
            check_timeout_ms: 10_000,
        }
    }
}

impl SolverConfig {
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn check_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.check_timeout_ms = timeout_ms;
        self
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        match self.check_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Validatable for SolverConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "solver.program must not be empty".to_string(),
            ));
        }

        if self.check_timeout_ms > 3_600_000 {
            return Err(ConfigError::range_with_hint(
                "check_timeout_ms",
                self.check_timeout_ms,
                0,
                3_600_000,
                "A single check should finish within an hour (0 = unlimited)",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "SolverConfig"
    }
}

// ============================================================================
// Executor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// How many times one block may be merged in a run (1..=10000).
    /// Only cyclic graphs reach this bound.
    pub max_block_visits: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_block_visits: 16,
        }
    }
}

impl ExecutorConfig {
    pub fn max_block_visits(mut self, visits: usize) -> Self {
        self.max_block_visits = visits;
        self
    }
}

impl Validatable for ExecutorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_block_visits == 0 || self.max_block_visits > 10_000 {
            return Err(ConfigError::range_with_hint(
                "max_block_visits",
                self.max_block_visits,
                1,
                10_000,
                "Each block must be visited at least once; loops need a finite bound",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ExecutorConfig"
    }
}

// ============================================================================
// Top level
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymexConfig {
    pub version: u32,

    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl Default for SymexConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            solver: SolverConfig::default(),
            executor: ExecutorConfig::default(),
        }
    }
}

impl SymexConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: SymexConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }
}

impl Validatable for SymexConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.version != CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: vec![CURRENT_VERSION],
            });
        }
        self.solver.validate()?;
        self.executor.validate()
    }

    fn config_name(&self) -> &'static str {
        "SymexConfig"
    }
}
