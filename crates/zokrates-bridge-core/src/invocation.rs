//! The unit of work handed to an [`Executor`] and the shapes of its outcome.
//!
//! An [`Invocation`] knows nothing about which operation built it. Failures come back
//! as [`InvocationFailure`] and are attributed to an [`Operation`] by
//! [`InvocationFailure::into_error`].

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{InvokeOptions, STDLIB_ENV_VAR};
use crate::error::{Operation, ZokratesError};

/// A single, fully validated call to the `zokrates` binary.
///
/// Built fresh per operation and consumed by exactly one [`Executor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: PathBuf,
    /// Subcommand followed by its flags, in order.
    pub args: Vec<String>,
    /// Environment of the child. Nothing else is inherited.
    pub env: Vec<(String, String)>,
    /// Keep stdout and return it on success.
    pub capture: bool,
    /// Byte limit for captured (and failure) text.
    pub max_capture_bytes: usize,
}

impl Invocation {
    pub fn new(executable: impl Into<PathBuf>, args: Vec<String>) -> Self {
        let defaults = InvokeOptions::default();
        Self {
            executable: executable.into(),
            args,
            env: Vec::new(),
            capture: defaults.verbose,
            max_capture_bytes: defaults.max_return,
        }
    }

    /// Point ZoKrates at its standard library through `ZOKRATES_HOME`.
    pub fn with_stdlib(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        let stdlib_path = stdlib_path.into();
        self.env.retain(|(key, _)| key != STDLIB_ENV_VAR);
        self.env.push((
            STDLIB_ENV_VAR.to_string(),
            stdlib_path.to_string_lossy().into_owned(),
        ));
        self
    }

    pub fn with_options(mut self, options: &InvokeOptions) -> Self {
        self.capture = options.verbose;
        self.max_capture_bytes = options.max_return;
        self
    }

    /// The command line as it would be typed in a shell, for logging.
    pub fn command_line(&self) -> String {
        let mut line = self.executable.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Successful outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The caller did not ask for output.
    Empty,
    /// Captured stdout, possibly collapsed to the truncation marker.
    Captured(String),
}

impl Output {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Captured(text) => Some(text),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Captured(text) => Some(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Why an invocation failed, before it is attributed to an operation.
#[derive(Error, Debug)]
pub enum InvocationFailure {
    /// The child wrote to stderr.
    #[error("{0}")]
    Channel(String),
    /// The child printed the failure marker on stdout.
    #[error("{0}")]
    Content(String),
    /// The executable could not be started.
    #[error("failed to start {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the child's pipes or waiting for it failed.
    #[error("child process I/O failed: {0}")]
    Io(#[source] std::io::Error),
}

impl InvocationFailure {
    /// Attach the operation that issued the invocation.
    pub fn into_error(self, operation: Operation) -> ZokratesError {
        match self {
            Self::Channel(message) => ZokratesError::ChannelFailure { operation, message },
            Self::Content(message) => ZokratesError::ContentFailure { operation, message },
            Self::Spawn { executable, source } if source.kind() == std::io::ErrorKind::NotFound => {
                ZokratesError::MissingTool {
                    operation: Some(operation),
                    path: executable,
                    install: "https://zokrates.github.io/gettingstarted.html".into(),
                }
            }
            Self::Spawn { source, .. } | Self::Io(source) => ZokratesError::Io { operation, source },
        }
    }
}

/// Runs an [`Invocation`] to settlement.
///
/// [`ProcessExecutor`](crate::engine::ProcessExecutor) is the real implementation;
/// alternative executors can record or script invocations.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, invocation: Invocation) -> Result<Output, InvocationFailure>;
}
