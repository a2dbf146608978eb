//! Async wrapper around the [ZoKrates](https://zokrates.github.io/) command-line tool.
//!
//! Each toolchain step is a request type implementing [`ZokratesCommand`]:
//!
//! | Request                   | Subcommand        | Produces                                  |
//! |---------------------------|-------------------|-------------------------------------------|
//! | [`CompileRequest`]        | `compile`         | binary, `.ztf` typed form, ABI spec JSON  |
//! | [`ComputeWitnessRequest`] | `compute-witness` | witness file                              |
//! | [`SetupRequest`]          | `setup`           | verification key, proving key             |
//! | [`GenerateProofRequest`]  | `generate-proof`  | proof JSON                                |
//! | [`ExportVerifierRequest`] | `export-verifier` | Solidity verifier contract                |
//!
//! Requests are validated before anything is spawned; see
//! [`zokrates_bridge_core::validate`]. The [`Zokrates`] facade then hands the resulting
//! [`Invocation`] to an [`Executor`], by default the
//! [`ProcessExecutor`] engine.
//!
//! ```rust,ignore
//! use zokrates_bridge::{CompileRequest, InvokeOptions, Zokrates};
//!
//! let zokrates = Zokrates::new();
//! let request = CompileRequest::new("./zok/test.zok")
//!     .with_output_dir("./zok/test")
//!     .with_output_name("test_out")
//!     .with_abi_name("test_abi.json");
//! zokrates.compile(&request, &InvokeOptions::default()).await?;
//! ```
//!
//! Nothing here coordinates concurrent calls that write the same artifact; callers
//! that overlap operations on one output path must serialize them.

mod compile;
mod compute_witness;
mod export_verifier;
mod generate_proof;
mod setup;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use compile::CompileRequest;
pub use compute_witness::ComputeWitnessRequest;
pub use export_verifier::ExportVerifierRequest;
pub use generate_proof::GenerateProofRequest;
pub use setup::SetupRequest;

pub use zokrates_bridge_core::config::{
    DEFAULT_EXECUTABLE, DEFAULT_STDLIB_PATH, FAILURE_MARKER, MAX_CHAR_RETURN, TRUNCATION_MARKER,
};
pub use zokrates_bridge_core::{
    Backend, Curve, Executor, Invocation, InvocationFailure, InvokeOptions, Operation, Output,
    ProcessExecutor, ProvingScheme, Result, SolidityAbi, ZokratesConfig, ZokratesError,
};

/// A ZoKrates subcommand with validated, caller-supplied parameters.
pub trait ZokratesCommand: Send + Sync {
    fn operation(&self) -> Operation;

    /// Directory exported to the child as `ZOKRATES_HOME`.
    fn stdlib_path(&self) -> &Path;

    /// Check every precondition in order, then build the flags that follow the
    /// subcommand. The first failing check is the one reported.
    fn arguments(&self) -> Result<Vec<String>>;

    /// Validate and assemble the full invocation.
    fn prepare(&self, executable: &Path, options: &InvokeOptions) -> Result<Invocation> {
        let mut args = vec![self.operation().subcommand().to_string()];
        args.extend(self.arguments()?);
        Ok(Invocation::new(executable, args)
            .with_stdlib(self.stdlib_path())
            .with_options(options))
    }
}

/// Entry point for running ZoKrates operations.
#[derive(Clone)]
pub struct Zokrates {
    executable: PathBuf,
    executor: Arc<dyn Executor>,
}

impl Default for Zokrates {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Zokrates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zokrates")
            .field("executable", &self.executable)
            .finish_non_exhaustive()
    }
}

impl Zokrates {
    /// Use the binary at [`DEFAULT_EXECUTABLE`].
    pub fn new() -> Self {
        Self::with_executable(DEFAULT_EXECUTABLE)
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            executor: Arc::new(ProcessExecutor::new()),
        }
    }

    pub fn from_config(config: &ZokratesConfig) -> Self {
        Self::with_executable(config.executable.clone())
    }

    /// Find `zokrates` on `PATH`.
    pub fn locate() -> Result<Self> {
        let executable = which::which("zokrates").map_err(|_| ZokratesError::MissingTool {
            operation: None,
            path: PathBuf::from("zokrates"),
            install: "https://zokrates.github.io/gettingstarted.html".into(),
        })?;
        Ok(Self::with_executable(executable))
    }

    /// Replace the engine that runs invocations.
    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Validate `command`, run it, and attribute any failure to its operation.
    pub async fn run<C>(&self, command: &C, options: &InvokeOptions) -> Result<Output>
    where
        C: ZokratesCommand + ?Sized,
    {
        let operation = command.operation();
        let invocation = command.prepare(&self.executable, options)?;
        tracing::debug!(%operation, "invoking zokrates");
        self.executor
            .execute(invocation)
            .await
            .map_err(|failure| failure.into_error(operation))
    }

    /// Compile a `.zok` source into a binary, its `.ztf` typed form and an ABI spec.
    pub async fn compile(&self, request: &CompileRequest, options: &InvokeOptions) -> Result<Output> {
        self.run(request, options).await
    }

    /// Compute a witness from a compiled binary and its ABI spec.
    pub async fn compute_witness(
        &self,
        request: &ComputeWitnessRequest,
        options: &InvokeOptions,
    ) -> Result<Output> {
        self.run(request, options).await
    }

    /// Run the trusted setup, writing verification and proving keys.
    pub async fn setup(&self, request: &SetupRequest, options: &InvokeOptions) -> Result<Output> {
        self.run(request, options).await
    }

    /// Generate a proof from a binary, a proving key and a witness.
    pub async fn generate_proof(
        &self,
        request: &GenerateProofRequest,
        options: &InvokeOptions,
    ) -> Result<Output> {
        self.run(request, options).await
    }

    /// Export a Solidity verifier contract for a verification key.
    pub async fn export_verifier(
        &self,
        request: &ExportVerifierRequest,
        options: &InvokeOptions,
    ) -> Result<Output> {
        self.run(request, options).await
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
