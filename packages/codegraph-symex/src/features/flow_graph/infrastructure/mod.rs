//! Flow Graph infrastructure

pub mod builder;

pub use builder::FlowGraphBuilder;
