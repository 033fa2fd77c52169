//! SMT (Satisfiability Modulo Theories) Module
//!
//! Term model for constraints handed to an external decision procedure, and
//! the port through which that procedure is reached.
//!
//! ## Architecture
//!
//! ```text
//! SMT
//! ├── domain/               # Pure data
//! │   ├── sort / function   # Sorts and function symbols (builtin or declared)
//! │   ├── term              # Constants and applications, SMT-LIB rendering
//! │   └── builders          # Named operator builders (re-exported as `terms`)
//! ├── ports/                # Solver / SolverSession traits
//! └── infrastructure/       # SMT-LIB process adapter (z3 by default)
//! ```
//!
//! ## Usage
//!
//! ```text
//! use codegraph_symex::features::smt::{terms, Sort, Solver, SolverSession, SatResult};
//!
//! let x = terms::declare_const("x", Sort::BitVec(8));
//! let mut session = solver.open_session().await?;
//! session.assert(&terms::bvugt(x.clone(), terms::bv_const(200, 8))).await?;
//! if session.check_sat().await? == SatResult::Sat {
//!     let value = session.evaluate(&x).await?;
//! }
//! session.close().await?;
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::builders as terms;
pub use domain::{Function, FunctionKind, Sort, Term, TermError, Value};
pub use infrastructure::{SmtLibProcessSolver, SmtLibSession};
pub use ports::{SatResult, Solver, SolverError, SolverSession};
