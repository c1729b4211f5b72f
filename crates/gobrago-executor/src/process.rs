//! Local process runner implementation.

use std::process::Stdio;

use async_trait::async_trait;
use gobrago_core::{Error, Invocation, Result, RunOutcome, Runner};
use tokio::process::Command;
use tracing::{info, warn};

/// Runs the verifier as a child process of this one.
///
/// Arguments are passed as separate argv entries, so tokens with whitespace
/// reach the verifier intact. The child shares this process's stdout and
/// stderr.
#[derive(Debug, Default)]
pub struct LocalProcessRunner;

impl LocalProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Runner for LocalProcessRunner {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn run(&self, invocation: &Invocation) -> Result<RunOutcome> {
        info!(program = %invocation.program(), args = invocation.args().len(), "Starting verifier");

        let mut child = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                Error::ExecutionFailed(format!("Failed to start {}: {}", invocation.program(), e))
            })?;

        let status = child
            .wait()
            .await
            .map_err(|e| Error::ExecutionFailed(format!("Failed to wait for verifier: {}", e)))?;

        let outcome = RunOutcome {
            exit_code: status.code(),
            success: status.success(),
        };
        if outcome.success {
            info!("Verifier finished");
        } else {
            warn!(exit_code = ?outcome.exit_code, "Verifier failed");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Invocation {
        Invocation::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_runner_name() {
        assert_eq!(LocalProcessRunner::new().name(), "local");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_run() {
        let outcome = LocalProcessRunner::new().run(&sh("exit 0")).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_run_reports_exit_code() {
        let outcome = LocalProcessRunner::new().run(&sh("exit 3")).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arguments_are_not_split() {
        let invocation = Invocation::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"test "$1" = "a b""#.to_string(),
                "sh".to_string(),
                "a b".to_string(),
            ],
        );
        let outcome = LocalProcessRunner::new().run(&invocation).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_missing_program_is_execution_error() {
        let invocation = Invocation::new("gobrago-no-such-program", vec![]);
        let result = LocalProcessRunner::new().run(&invocation).await;
        assert!(matches!(result, Err(Error::ExecutionFailed(_))));
    }
}
