use std::path::{Path, PathBuf};

use zokrates_bridge_core::config::DEFAULT_STDLIB_PATH;
use zokrates_bridge_core::naming::{self, JSON_EXTENSION, KEY_EXTENSION};
use zokrates_bridge_core::validate;
use zokrates_bridge_core::{Backend, Operation, ProvingScheme, Result};

use crate::{path_arg, ZokratesCommand};

/// `zokrates generate-proof`.
///
/// ```text
/// -i, --input <FILE>                     Path of the binary [default: out]
/// -p, --proving-key-path <FILE>          Path of the proving key file [default: proving.key]
/// -w, --witness <FILE>                   Path of the witness file [default: witness]
/// -j, --proof-path <FILE>                Path of the JSON proof file [default: proof.json]
/// -s, --proving-scheme <proving-scheme>  [default: g16]
/// -b, --backend <backend>                [default: bellman]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateProofRequest {
    pub binary_path: PathBuf,
    /// Must end with `.key`.
    pub proving_key_path: PathBuf,
    pub witness_path: PathBuf,
    pub output_dir: PathBuf,
    /// `.json` is appended if absent.
    pub output_name: String,
    pub proving_scheme: String,
    pub backend: String,
    pub stdlib_path: PathBuf,
}

impl GenerateProofRequest {
    pub fn new(
        binary_path: impl Into<PathBuf>,
        proving_key_path: impl Into<PathBuf>,
        witness_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            proving_key_path: proving_key_path.into(),
            witness_path: witness_path.into(),
            output_dir: PathBuf::from("./"),
            output_name: "proof.json".into(),
            proving_scheme: ProvingScheme::default().into(),
            backend: Backend::default().into(),
            stdlib_path: PathBuf::from(DEFAULT_STDLIB_PATH),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = output_name.into();
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

    pub fn with_stdlib_path(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        self.stdlib_path = stdlib_path.into();
        self
    }

    pub fn proof_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::ensure_suffix(&self.output_name, JSON_EXTENSION),
        )
    }
}

impl ZokratesCommand for GenerateProofRequest {
    fn operation(&self) -> Operation {
        Operation::GenerateProof
    }

    fn stdlib_path(&self) -> &Path {
        &self.stdlib_path
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let op = self.operation();
        validate::inputs_exist(
            op,
            &[&self.binary_path, &self.proving_key_path, &self.witness_path],
        )?;
        validate::not_source(op, &self.binary_path)?;
        validate::has_extension(op, &self.proving_key_path, KEY_EXTENSION)?;
        validate::output_dir(op, &self.output_dir)?;
        let backend: Backend = validate::option(op, &self.backend)?;
        let scheme: ProvingScheme = validate::option(op, &self.proving_scheme)?;
        validate::stdlib_dir(op, &self.stdlib_path)?;

        Ok(vec![
            "-i".into(),
            path_arg(&self.binary_path),
            "-p".into(),
            path_arg(&self.proving_key_path),
            "-w".into(),
            path_arg(&self.witness_path),
            "-j".into(),
            path_arg(&self.proof_path()),
            "-s".into(),
            scheme.to_string(),
            "-b".into(),
            backend.to_string(),
        ])
    }
}
