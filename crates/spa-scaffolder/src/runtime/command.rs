//! External process invocation with streamed output

use crate::error::ScaffoldError;
use crate::framework::CommandLine;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Generators and installs download packages; give them room
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Run `command` in `cwd`, streaming its output, and fail on a non-zero exit
pub async fn run_command(command: &CommandLine, cwd: &Path, limit: Duration) -> Result<()> {
    let display = format!("{} {}", command.program, command.args.join(" "));
    println!();
    println!("{} {}", "Running:".dimmed(), display.yellow());
    println!();
    log::debug!("spawning `{}` in {}", display, cwd.display());

    let mut child = TokioCommand::new(program_name(command.program))
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start `{}`", command.program))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let output_task = async {
        let mut stdout_open = true;
        let mut stderr_open = true;
        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }
    };

    if timeout(limit, output_task).await.is_err() {
        let _ = child.kill().await;
        let message = format!("`{}` timed out after {} seconds", display, limit.as_secs());
        return Err(anyhow::Error::new(ScaffoldError::ExternalTool {
            program: display,
            code: None,
        })
        .context(message));
    }

    let status = match timeout(Duration::from_secs(10), child.wait()).await {
        Ok(status) => status.with_context(|| format!("Failed to wait for `{}`", command.program))?,
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!("`{}` hung after closing its output", display);
        }
    };
    println!();

    if status.success() {
        Ok(())
    } else {
        Err(ScaffoldError::ExternalTool {
            program: display,
            code: status.code(),
        }
        .into())
    }
}

/// npm and npx are batch files on Windows
fn program_name(program: &str) -> String {
    if cfg!(windows) && matches!(program, "npm" | "npx" | "yarn" | "pnpm") {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}
