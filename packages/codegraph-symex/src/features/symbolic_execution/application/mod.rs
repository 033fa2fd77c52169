//! Application layer for symbolic execution

pub mod reachability_usecase;

pub use reachability_usecase::{ReachabilityUseCase, ReachabilityUseCaseImpl};
