//! Command Module
//!
//! This module turns caller-supplied argument lists into full invocations of
//! the node binary:
//! - the builder injects the network flags a command is missing,
//! - the executor spawns the binary and extracts structured output,
//! - the runner ties both to the network registry and carries the keyring
//!   helpers the HTTP layer uses.

mod builder;
mod executor;
mod runner;

#[cfg(test)]
mod tests;

pub use builder::build_args;
pub use executor::Executor;
pub use runner::CommandRunner;
