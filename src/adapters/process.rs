use crate::core::{CommandOutput, CommandRunner, Invocation};
use crate::utils::error::{DeployError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;

/// Runs invocations as child processes, one at a time, waiting for each to exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DeployError::ToolNotFoundError {
                    tool: invocation.program.clone(),
                },
                _ => DeployError::IoError(e),
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(
            "`{}` exited with {:?} ({} bytes stdout, {} bytes stderr)",
            invocation,
            result.code,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}

/// Prints what would run and reports success without spawning anything.
#[derive(Debug, Clone, Default)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        println!("🔍 [dry-run] {}", invocation);
        Ok(CommandOutput {
            code: Some(0),
            ..Default::default()
        })
    }
}
