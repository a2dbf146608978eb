use std::path::{Path, PathBuf};

use zokrates_bridge_core::config::DEFAULT_STDLIB_PATH;
use zokrates_bridge_core::naming::{self, KEY_EXTENSION, SOLIDITY_EXTENSION};
use zokrates_bridge_core::validate;
use zokrates_bridge_core::{Curve, Operation, ProvingScheme, Result, SolidityAbi};

use crate::{path_arg, ZokratesCommand};

/// `zokrates export-verifier`.
///
/// ```text
/// -i, --input <FILE>                     Path of the verifier [default: verification.key]
/// -o, --output <FILE>                    Path of the output file [default: verifier.sol]
/// -s, --proving-scheme <proving-scheme>  [default: g16]
/// -c, --curve <curve>                    [default: bn128]
/// -a, --solidity-abi <solidity-abi>      [default: v1]  [possible values: v1, v2]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportVerifierRequest {
    /// Must end with `.key`.
    pub vk_path: PathBuf,
    pub output_dir: PathBuf,
    /// `.sol` is appended if absent.
    pub output_name: String,
    pub proving_scheme: String,
    pub curve: String,
    pub solidity_abi: String,
    pub stdlib_path: PathBuf,
}

impl ExportVerifierRequest {
    pub fn new(vk_path: impl Into<PathBuf>) -> Self {
        Self {
            vk_path: vk_path.into(),
            output_dir: PathBuf::from("./"),
            output_name: "Verifier.sol".into(),
            proving_scheme: ProvingScheme::default().into(),
            curve: Curve::default().into(),
            solidity_abi: SolidityAbi::default().into(),
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

    pub fn with_curve(mut self, curve: impl Into<String>) -> Self {
        self.curve = curve.into();
        self
    }

    pub fn with_solidity_abi(mut self, solidity_abi: impl Into<String>) -> Self {
        self.solidity_abi = solidity_abi.into();
        self
    }

    pub fn with_stdlib_path(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        self.stdlib_path = stdlib_path.into();
        self
    }

    pub fn contract_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::ensure_suffix(&self.output_name, SOLIDITY_EXTENSION),
        )
    }
}

impl ZokratesCommand for ExportVerifierRequest {
    fn operation(&self) -> Operation {
        Operation::ExportVerifier
    }

    fn stdlib_path(&self) -> &Path {
        &self.stdlib_path
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let op = self.operation();
        validate::inputs_exist(op, &[&self.vk_path])?;
        validate::has_extension(op, &self.vk_path, KEY_EXTENSION)?;
        validate::output_dir(op, &self.output_dir)?;
        let curve: Curve = validate::option(op, &self.curve)?;
        let scheme: ProvingScheme = validate::option(op, &self.proving_scheme)?;
        let abi: SolidityAbi = validate::option(op, &self.solidity_abi)?;
        validate::stdlib_dir(op, &self.stdlib_path)?;

        Ok(vec![
            "-i".into(),
            path_arg(&self.vk_path),
            "-o".into(),
            path_arg(&self.contract_path()),
            "-s".into(),
            scheme.to_string(),
            "-c".into(),
            curve.to_string(),
            "-a".into(),
            abi.to_string(),
        ])
    }
}
