//! Unified error types for zokrates-bridge.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The ZoKrates subcommand an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Compile,
    ComputeWitness,
    Setup,
    GenerateProof,
    ExportVerifier,
}

impl Operation {
    /// Subcommand name as understood by the `zokrates` binary.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::ComputeWitness => "compute-witness",
            Self::Setup => "setup",
            Self::GenerateProof => "generate-proof",
            Self::ExportVerifier => "export-verifier",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compile => "Compile",
            Self::ComputeWitness => "Compute-witness",
            Self::Setup => "Setup",
            Self::GenerateProof => "Generate-proof",
            Self::ExportVerifier => "Export-verifier",
        };
        f.write_str(label)
    }
}

/// All errors that can occur while driving the ZoKrates CLI.
#[derive(Error, Debug)]
pub enum ZokratesError {
    // --- Validation ---

    /// One or more required input files do not exist.
    #[error("{operation}: input file(s) not found: {}", display_paths(.paths))]
    InputNotFound {
        operation: Operation,
        paths: Vec<PathBuf>,
    },

    /// An input path carries an extension the subcommand cannot take.
    #[error("{operation}: {reason} ({})", .path.display())]
    InvalidExtension {
        operation: Operation,
        path: PathBuf,
        reason: String,
    },

    /// The output directory is missing or is not a directory.
    #[error("{operation}: directory to output does not exist or is not a directory ({})", .path.display())]
    OutputDirInvalid { operation: Operation, path: PathBuf },

    /// A constrained option is outside its closed set.
    #[error("{operation}: {option} is not valid: {value} (supported: {supported})")]
    InvalidOption {
        operation: Operation,
        option: &'static str,
        value: String,
        supported: String,
    },

    /// The standard library path is missing or is not a directory.
    #[error("{operation}: stdlib path does not exist or is not a directory ({})", .path.display())]
    SupportLibraryInvalid { operation: Operation, path: PathBuf },

    // --- Collaborator ---

    /// ZoKrates wrote to its error channel.
    #[error("{operation} failed: {message}")]
    ChannelFailure { operation: Operation, message: String },

    /// ZoKrates reported a fatal error on its standard output.
    #[error("{operation} failed: {message}")]
    ContentFailure { operation: Operation, message: String },

    /// The `zokrates` executable could not be found.
    #[error("{}required tool '{}' not found (install: {install})", operation_prefix(.operation), .path.display())]
    MissingTool {
        /// `None` when the lookup happened outside any operation.
        operation: Option<Operation>,
        path: PathBuf,
        install: String,
    },

    /// Spawning or talking to the child process failed.
    #[error("{operation}: I/O error while running zokrates")]
    Io {
        operation: Operation,
        #[source]
        source: std::io::Error,
    },

    // --- Configuration ---

    /// The configuration file could not be read.
    #[error("config file not found at {}", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("failed to write config at {}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ZokratesError {
    /// The operation this error belongs to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InputNotFound { operation, .. }
            | Self::InvalidExtension { operation, .. }
            | Self::OutputDirInvalid { operation, .. }
            | Self::InvalidOption { operation, .. }
            | Self::SupportLibraryInvalid { operation, .. }
            | Self::ChannelFailure { operation, .. }
            | Self::ContentFailure { operation, .. }
            | Self::Io { operation, .. } => Some(*operation),
            Self::MissingTool { operation, .. } => *operation,
            Self::ConfigNotFound { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigParse { .. } => None,
        }
    }

    /// True for errors raised before any process was spawned.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::InvalidExtension { .. }
                | Self::OutputDirInvalid { .. }
                | Self::InvalidOption { .. }
                | Self::SupportLibraryInvalid { .. }
        )
    }
}

fn operation_prefix(operation: &Option<Operation>) -> String {
    operation.map(|op| format!("{op}: ")).unwrap_or_default()
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Alias for `Result<T, ZokratesError>`.
pub type Result<T> = std::result::Result<T, ZokratesError>;
