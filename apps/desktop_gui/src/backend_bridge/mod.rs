//! Backend worker: owns the tokio runtime, the remote client and the fetch orchestrator.

pub mod commands;
pub mod runtime;
