//! CLI commands for the index fund allocator.

pub mod calculate;
pub mod server;

pub use calculate::{run_calculate, CalculateArgs};
pub use server::{run_server, ServerArgs};
