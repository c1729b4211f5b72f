//! Verifier execution for gobrago.
//!
//! Provides runner implementations for a Gobra invocation:
//! - Local child process

pub mod process;

pub use gobrago_core::runner::{RunOutcome, Runner};
pub use process::LocalProcessRunner;
