//! Local verifier execution command.

use anyhow::{Context, Result};
use gobrago_core::Invocation;
use gobrago_executor::{LocalProcessRunner, Runner};

/// Run the invocation as a child process and fail if the verifier fails.
pub async fn run_local(invocation: &Invocation) -> Result<()> {
    let runner = LocalProcessRunner::new();
    let outcome = runner
        .run(invocation)
        .await
        .context("Failed to run verifier")?;

    if outcome.success {
        Ok(())
    } else {
        match outcome.exit_code {
            Some(code) => anyhow::bail!("Verifier exited with status {}", code),
            None => anyhow::bail!("Verifier was terminated by a signal"),
        }
    }
}
