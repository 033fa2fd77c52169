//! Configuration
//!
//! YAML-backed settings for the solver process and the executor, versioned
//! (`version: 1`) and range-checked through [`Validatable`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_symex::config::SymexConfig;
//!
//! // Defaults: z3 on PATH, 10s per check, 16 visits per block
//! let config = SymexConfig::default();
//!
//! // From a team file
//! let config = SymexConfig::from_yaml("symex.yaml")?;
//! ```

pub mod error;
pub mod symex_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use symex_config::{ExecutorConfig, SolverConfig, SymexConfig};
pub use validation::Validatable;
