use std::path::{Path, PathBuf};

use zokrates_bridge_core::config::DEFAULT_STDLIB_PATH;
use zokrates_bridge_core::naming::{self, KEY_EXTENSION};
use zokrates_bridge_core::validate;
use zokrates_bridge_core::{Backend, Operation, ProvingScheme, Result};

use crate::{path_arg, ZokratesCommand};

/// `zokrates setup`.
///
/// ```text
/// -i, --input <FILE>                     Path of the binary [default: out]
/// -s, --proving-scheme <proving-scheme>  [default: g16]  [possible values: g16, pghr13, gm17]
/// -b, --backend <backend>                [default: bellman]  [possible values: bellman, libsnark, ark]
/// -v, --verification-key-path <FILE>     [default: verification.key]
/// -p, --proving-key-path <FILE>          [default: proving.key]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    pub binary_path: PathBuf,
    pub output_dir: PathBuf,
    pub proving_scheme: String,
    pub backend: String,
    /// `.key` is appended if absent.
    pub vk_name: String,
    /// `.key` is appended if absent.
    pub pk_name: String,
    pub stdlib_path: PathBuf,
}

impl SetupRequest {
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            output_dir: PathBuf::from("./"),
            proving_scheme: ProvingScheme::default().into(),
            backend: Backend::default().into(),
            vk_name: "verification.key".into(),
            pk_name: "proving.key".into(),
            stdlib_path: PathBuf::from(DEFAULT_STDLIB_PATH),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_proving_scheme(mut self, proving_scheme: impl Into<String>) -> Self {
        self.proving_scheme = proving_scheme.into();
        self
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    pub fn with_vk_name(mut self, vk_name: impl Into<String>) -> Self {
        self.vk_name = vk_name.into();
        self
    }

    pub fn with_pk_name(mut self, pk_name: impl Into<String>) -> Self {
        self.pk_name = pk_name.into();
        self
    }

    pub fn with_stdlib_path(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        self.stdlib_path = stdlib_path.into();
        self
    }

    pub fn verification_key_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::ensure_suffix(&self.vk_name, KEY_EXTENSION),
        )
    }

    pub fn proving_key_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::ensure_suffix(&self.pk_name, KEY_EXTENSION),
        )
    }
}

impl ZokratesCommand for SetupRequest {
    fn operation(&self) -> Operation {
        Operation::Setup
    }

    fn stdlib_path(&self) -> &Path {
        &self.stdlib_path
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let op = self.operation();
        validate::inputs_exist(op, &[&self.binary_path])?;
        validate::not_source(op, &self.binary_path)?;
        validate::output_dir(op, &self.output_dir)?;
        let backend: Backend = validate::option(op, &self.backend)?;
        let scheme: ProvingScheme = validate::option(op, &self.proving_scheme)?;
        validate::stdlib_dir(op, &self.stdlib_path)?;

        Ok(vec![
            "-i".into(),
            path_arg(&self.binary_path),
            "-s".into(),
            scheme.to_string(),
            "-b".into(),
            backend.to_string(),
            "-v".into(),
            path_arg(&self.verification_key_path()),
            "-p".into(),
            path_arg(&self.proving_key_path()),
        ])
    }
}
