// Library root: re-exports all modules so integration tests and the binary
// can reach the orchestration layer.

pub mod app;
pub mod config;
pub mod protocol;
pub mod suggest;
