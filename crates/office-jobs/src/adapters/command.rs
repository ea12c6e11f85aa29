//! External command execution for extraction tools.

use std::time::Duration;

use tokio::process::Command;

use office_core::{Error, Result};

/// Run a command with a timeout, returning stdout as a string.
pub async fn run_cmd_with_timeout(cmd: &mut Command, timeout_secs: u64) -> Result<String> {
    let stdout = run_cmd(cmd, timeout_secs).await?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Run a command that writes its output to files rather than stdout.
pub async fn run_cmd_status(cmd: &mut Command, timeout_secs: u64) -> Result<()> {
    run_cmd(cmd, timeout_secs).await.map(|_| ())
}

async fn run_cmd(cmd: &mut Command, timeout_secs: u64) -> Result<Vec<u8>> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let output = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        cmd.kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| Error::Extraction(format!("{} timed out after {}s", program, timeout_secs)))?
    .map_err(|e| Error::Extraction(format!("Failed to execute {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Extraction(format!(
            "{} failed ({}): {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}
