use std::path::{Path, PathBuf};

use zokrates_bridge_core::config::DEFAULT_STDLIB_PATH;
use zokrates_bridge_core::naming::{self, JSON_EXTENSION, SOURCE_EXTENSION};
use zokrates_bridge_core::validate;
use zokrates_bridge_core::{Curve, Operation, Result};

use crate::{path_arg, ZokratesCommand};

/// `zokrates compile`.
///
/// ```text
/// -i, --input <FILE>         Path of the source code
/// -o, --output <FILE>        Path of the output binary [default: out]
/// -s, --abi_spec <FILE>      Path of the ABI specification [default: abi.json]
/// -c, --curve <curve>        Curve to be used in the compilation [default: bn128]
///     --stdlib-path <PATH>   Path to the standard library [env: ZOKRATES_STDLIB=]
/// ```
///
/// Writes `<output_dir>/<output_name>`, `<output_dir>/<output_name>.ztf` and
/// `<output_dir>/<abi_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub code_path: PathBuf,
    pub output_dir: PathBuf,
    /// A trailing `.zok` is trimmed.
    pub output_name: String,
    /// `.json` is appended if absent.
    pub abi_name: String,
    pub curve: String,
    pub stdlib_path: PathBuf,
}

impl CompileRequest {
    pub fn new(code_path: impl Into<PathBuf>) -> Self {
        Self {
            code_path: code_path.into(),
            output_dir: PathBuf::from("./"),
            output_name: "out".into(),
            abi_name: "abi.json".into(),
            curve: Curve::default().into(),
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

    pub fn with_abi_name(mut self, abi_name: impl Into<String>) -> Self {
        self.abi_name = abi_name.into();
        self
    }

    pub fn with_curve(mut self, curve: impl Into<String>) -> Self {
        self.curve = curve.into();
        self
    }

    pub fn with_stdlib_path(mut self, stdlib_path: impl Into<PathBuf>) -> Self {
        self.stdlib_path = stdlib_path.into();
        self
    }

    /// Where the compiled binary will be written.
    pub fn binary_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::trim_suffix(&self.output_name, SOURCE_EXTENSION),
        )
    }

    /// Where the ABI specification will be written.
    pub fn abi_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_dir,
            &naming::ensure_suffix(&self.abi_name, JSON_EXTENSION),
        )
    }
}

impl ZokratesCommand for CompileRequest {
    fn operation(&self) -> Operation {
        Operation::Compile
    }

    fn stdlib_path(&self) -> &Path {
        &self.stdlib_path
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let op = self.operation();
        validate::inputs_exist(op, &[&self.code_path])?;
        validate::output_dir(op, &self.output_dir)?;
        let curve: Curve = validate::option(op, &self.curve)?;
        validate::stdlib_dir(op, &self.stdlib_path)?;

        Ok(vec![
            "-i".into(),
            path_arg(&self.code_path),
            "-o".into(),
            path_arg(&self.binary_path()),
            "-s".into(),
            path_arg(&self.abi_path()),
            "-c".into(),
            curve.to_string(),
            "--stdlib-path".into(),
            path_arg(&self.stdlib_path),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zokrates_bridge_core::ZokratesError;

    struct Fixture {
        dir: tempfile::TempDir,
        code: PathBuf,
        out: PathBuf,
        stdlib: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let code = dir.path().join("test.zok");
        std::fs::write(&code, "def main(private field a) -> field { return a * a; }").unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let stdlib = dir.path().join("stdlib");
        std::fs::create_dir(&stdlib).unwrap();
        Fixture {
            dir,
            code,
            out,
            stdlib,
        }
    }

    fn request(f: &Fixture) -> CompileRequest {
        CompileRequest::new(&f.code)
            .with_output_dir(&f.out)
            .with_stdlib_path(&f.stdlib)
    }

    #[test]
    fn test_arguments_with_defaults() {
        let f = fixture();
        let args = request(&f).arguments().unwrap();
        let out = path_arg(&f.out);
        assert_eq!(
            args,
            vec![
                "-i".to_string(),
                path_arg(&f.code),
                "-o".into(),
                format!("{out}/out"),
                "-s".into(),
                format!("{out}/abi.json"),
                "-c".into(),
                "bn128".into(),
                "--stdlib-path".into(),
                path_arg(&f.stdlib),
            ]
        );
    }

    #[test]
    fn test_names_are_normalized_idempotently() {
        let f = fixture();
        let bare = request(&f)
            .with_output_name("test_out")
            .with_abi_name("test_abi");
        let suffixed = request(&f)
            .with_output_name("test_out.zok")
            .with_abi_name("test_abi.json");
        assert_eq!(bare.arguments().unwrap(), suffixed.arguments().unwrap());
        assert_eq!(bare.binary_path(), f.out.join("test_out"));
        assert_eq!(bare.abi_path(), f.out.join("test_abi.json"));
    }

    #[test]
    fn test_every_curve_is_forwarded() {
        let f = fixture();
        for curve in Curve::ALL {
            let args = request(&f).with_curve(*curve).arguments().unwrap();
            assert_eq!(args[7], curve.as_str());
        }
    }

    #[test]
    fn test_missing_source() {
        let f = fixture();
        let err = CompileRequest::new(f.dir.path().join("foo"))
            .with_output_dir(&f.out)
            .arguments()
            .unwrap_err();
        assert!(matches!(err, ZokratesError::InputNotFound { .. }));
        assert!(err.to_string().starts_with("Compile: input file(s) not found"));
    }

    #[test]
    fn test_output_dir_is_a_file() {
        let f = fixture();
        let err = request(&f).with_output_dir(&f.code).arguments().unwrap_err();
        assert!(matches!(err, ZokratesError::OutputDirInvalid { .. }));
    }

    #[test]
    fn test_invalid_curve() {
        let f = fixture();
        let err = request(&f).with_curve("bn999").arguments().unwrap_err();
        match err {
            ZokratesError::InvalidOption { option, value, .. } => {
                assert_eq!(option, "curve");
                assert_eq!(value, "bn999");
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_stdlib_checked_last() {
        let f = fixture();
        let missing_stdlib = f.dir.path().join("no_stdlib");

        let err = request(&f)
            .with_curve("bn999")
            .with_stdlib_path(&missing_stdlib)
            .arguments()
            .unwrap_err();
        assert!(matches!(err, ZokratesError::InvalidOption { .. }));

        let err = request(&f)
            .with_stdlib_path(&missing_stdlib)
            .arguments()
            .unwrap_err();
        assert!(matches!(err, ZokratesError::SupportLibraryInvalid { .. }));
    }
}
