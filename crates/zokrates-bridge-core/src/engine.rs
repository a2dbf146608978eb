//! The subprocess engine behind every ZoKrates operation.
//!
//! A child is spawned with stdin closed and both output pipes read concurrently. Three
//! event sources (stderr data, stdout data/EOF, process exit) are reduced to a single
//! settlement:
//!
//! 1. The first stderr chunk fails the invocation immediately, without waiting for exit.
//! 2. After exit and EOF on both pipes, stdout is checked for
//!    [`FAILURE_MARKER`]. ZoKrates reports some fatal errors there instead of on stderr.
//! 3. Otherwise the invocation succeeds. The exit status is logged but not inspected.
//!
//! There is no timeout or cancellation. Callers that need one must wrap
//! [`ProcessExecutor::execute`] themselves. Concurrent invocations writing the same
//! output artifact are not coordinated.

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::capture::{CaptureBuffer, MarkerScanner};
use crate::config::{FAILURE_MARKER, TRUNCATION_MARKER};
use crate::invocation::{Executor, Invocation, InvocationFailure, Output};

const STDOUT_CHUNK: usize = 8 * 1024;
const STDERR_CHUNK: usize = 4 * 1024;

/// Executes invocations as real child processes via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(&self, invocation: Invocation) -> Result<Output, InvocationFailure> {
        invoke(invocation).await
    }
}

/// Spawn `invocation` and wait for it to settle.
pub async fn invoke(invocation: Invocation) -> Result<Output, InvocationFailure> {
    tracing::debug!("{}", invocation.command_line());

    let mut command = Command::new(&invocation.executable);
    command
        .args(&invocation.args)
        .env_clear()
        .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| InvocationFailure::Spawn {
        executable: invocation.executable.clone(),
        source,
    })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| InvocationFailure::Io(std::io::Error::other("stdout not piped")))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| InvocationFailure::Io(std::io::Error::other("stderr not piped")))?;

    let mut captured = invocation
        .capture
        .then(|| CaptureBuffer::new(invocation.max_capture_bytes));
    let mut scanner = MarkerScanner::new(FAILURE_MARKER, invocation.max_capture_bytes);

    let mut out_buf = vec![0u8; STDOUT_CHUNK];
    let mut err_buf = vec![0u8; STDERR_CHUNK];
    let mut stdout_open = true;
    let mut stderr_open = true;
    let mut status: Option<ExitStatus> = None;

    while stdout_open || stderr_open || status.is_none() {
        tokio::select! {
            biased;

            read = stderr.read(&mut err_buf), if stderr_open => {
                let n = read.map_err(InvocationFailure::Io)?;
                if n == 0 {
                    stderr_open = false;
                } else {
                    let message = String::from_utf8_lossy(&err_buf[..n]).into_owned();
                    tracing::warn!(
                        executable = %invocation.executable.display(),
                        "zokrates wrote to stderr, failing invocation"
                    );
                    return Err(InvocationFailure::Channel(message));
                }
            }

            read = stdout.read(&mut out_buf), if stdout_open => {
                let n = read.map_err(InvocationFailure::Io)?;
                if n == 0 {
                    stdout_open = false;
                } else {
                    let chunk = &out_buf[..n];
                    scanner.push(chunk);
                    if let Some(buffer) = captured.as_mut() {
                        buffer.push(chunk);
                    }
                }
            }

            exit = child.wait(), if status.is_none() => {
                status = Some(exit.map_err(InvocationFailure::Io)?);
            }
        }
    }

    if let Some(message) = scanner.into_failure() {
        let overflowed = captured.as_ref().is_some_and(CaptureBuffer::is_truncated);
        let message = if overflowed {
            TRUNCATION_MARKER.to_string()
        } else {
            message
        };
        return Err(InvocationFailure::Content(message));
    }

    if let Some(status) = status.filter(|s| !s.success()) {
        tracing::warn!(
            %status,
            "zokrates exited unsuccessfully without reporting an error, treating as success"
        );
    }

    tracing::info!("{} succeeded", invocation.args.first().map_or("zokrates", String::as_str));

    Ok(match captured {
        Some(buffer) => Output::Captured(buffer.into_string()),
        None => Output::Empty,
    })
}
