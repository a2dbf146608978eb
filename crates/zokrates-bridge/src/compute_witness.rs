use std::path::{Path, PathBuf};

use zokrates_bridge_core::config::DEFAULT_STDLIB_PATH;
use zokrates_bridge_core::naming::{self, JSON_EXTENSION};
use zokrates_bridge_core::validate;
use zokrates_bridge_core::{Operation, Result};

use crate::{path_arg, ZokratesCommand};

/// `zokrates compute-witness`.
///
/// ```text
/// -i, --input <FILE>              Path of the binary [default: out]
/// -s, --abi_spec <FILE>           Path of the ABI specification [default: abi.json]
/// -o, --output <FILE>             Path of the output file [default: witness]
/// -a, --arguments <arguments>...  Arguments for the program's main function
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeWitnessRequest {
    /// Compiled binary; `.zok` and `.ztf` files are rejected.
    pub binary_path: PathBuf,
    /// `.json` is appended if absent once the file is known to exist.
    pub abi_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_name: String,
    /// Field elements passed verbatim after `-a`.
    pub arguments: Vec<String>,
    pub stdlib_path: PathBuf,
}

impl ComputeWitnessRequest {
    pub fn new(binary_path: impl Into<PathBuf>, abi_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            abi_path: abi_path.into(),
            output_dir: PathBuf::from("./"),
            output_name: "witness".into(),
            arguments: Vec::new(),
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

    /// Main-function arguments, e.g. `[5, 25]`.
    pub fn with_arguments<I, T>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.arguments = arguments.into_iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_stdlib_path(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        self.stdlib_path = stdlib_path.into();
        self
    }

    pub fn witness_path(&self) -> PathBuf {
        naming::output_path(&self.output_dir, &self.output_name)
    }
}

impl ZokratesCommand for ComputeWitnessRequest {
    fn operation(&self) -> Operation {
        Operation::ComputeWitness
    }

    fn stdlib_path(&self) -> &Path {
        &self.stdlib_path
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let op = self.operation();
        validate::inputs_exist(op, &[&self.binary_path, &self.abi_path])?;
        validate::not_source(op, &self.binary_path)?;
        validate::output_dir(op, &self.output_dir)?;
        validate::stdlib_dir(op, &self.stdlib_path)?;

        let mut args = vec![
            "-i".into(),
            path_arg(&self.binary_path),
            "-s".into(),
            path_arg(&naming::ensure_path_suffix(&self.abi_path, JSON_EXTENSION)),
            "-o".into(),
            path_arg(&self.witness_path()),
        ];
        if !self.arguments.is_empty() {
            args.push("-a".into());
            args.extend(self.arguments.iter().cloned());
        }
        Ok(args)
    }
}
