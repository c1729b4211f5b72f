//! Runner trait for executing a Gobra invocation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::command::Invocation;

/// Outcome of a finished verifier process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Trait for verifier runners.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Name of this runner.
    fn name(&self) -> &'static str;

    /// Run the invocation to completion.
    async fn run(&self, invocation: &Invocation) -> Result<RunOutcome>;
}
