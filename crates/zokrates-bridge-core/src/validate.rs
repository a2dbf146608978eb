//! Precondition checks shared by the operation adapters.
//!
//! Every check returns the error variant that names the failing precondition,
//! tagged with the calling [`Operation`]. Adapters call them in a fixed order and
//! stop at the first failure.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Operation, Result, ZokratesError};
use crate::naming;
use crate::options::UnknownOption;

/// Every path must exist. All missing paths are reported together.
pub fn inputs_exist(operation: Operation, paths: &[&Path]) -> Result<()> {
    let missing: Vec<PathBuf> = paths
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.to_path_buf())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ZokratesError::InputNotFound {
            operation,
            paths: missing,
        })
    }
}

/// Reject a compiled-binary argument that is really a source or typed file.
pub fn not_source(operation: Operation, path: &Path) -> Result<()> {
    if naming::has_any_suffix(path, &[naming::SOURCE_EXTENSION, naming::TYPED_EXTENSION]) {
        return Err(ZokratesError::InvalidExtension {
            operation,
            path: path.to_path_buf(),
            reason: "cannot take the .zok or .ztf version, use the compiled binary with no extension"
                .into(),
        });
    }
    Ok(())
}

/// Require `path` to end with `extension`.
pub fn has_extension(operation: Operation, path: &Path, extension: &str) -> Result<()> {
    if !naming::has_any_suffix(path, &[extension]) {
        return Err(ZokratesError::InvalidExtension {
            operation,
            path: path.to_path_buf(),
            reason: format!("a {extension} file expected"),
        });
    }
    Ok(())
}

pub fn output_dir(operation: Operation, path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ZokratesError::OutputDirInvalid {
            operation,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

pub fn stdlib_dir(operation: Operation, path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ZokratesError::SupportLibraryInvalid {
            operation,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Parse a raw option value against its closed set.
pub fn option<T>(operation: Operation, value: &str) -> Result<T>
where
    T: FromStr<Err = UnknownOption>,
{
    value.parse::<T>().map_err(|e| ZokratesError::InvalidOption {
        operation,
        option: e.option,
        value: e.value,
        supported: e.supported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Curve, ProvingScheme};

    #[test]
    fn test_inputs_exist_reports_every_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("out");
        std::fs::write(&present, b"").unwrap();
        let missing_a = dir.path().join("a");
        let missing_b = dir.path().join("b");

        assert!(inputs_exist(Operation::Setup, &[&present]).is_ok());

        match inputs_exist(Operation::GenerateProof, &[&missing_a, &present, &missing_b]) {
            Err(ZokratesError::InputNotFound { operation, paths }) => {
                assert_eq!(operation, Operation::GenerateProof);
                assert_eq!(paths, vec![missing_a, missing_b]);
            }
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_not_source() {
        assert!(not_source(Operation::Setup, Path::new("./zok/test_out")).is_ok());
        assert!(matches!(
            not_source(Operation::Setup, Path::new("./zok/test.zok")),
            Err(ZokratesError::InvalidExtension { .. })
        ));
        assert!(matches!(
            not_source(Operation::Setup, Path::new("./zok/test_out.ztf")),
            Err(ZokratesError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_has_extension_message() {
        let err = has_extension(
            Operation::ExportVerifier,
            Path::new("./zok/vk"),
            naming::KEY_EXTENSION,
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Export-verifier: a .key file expected"));
    }

    #[test]
    fn test_output_dir_rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"").unwrap();

        assert!(output_dir(Operation::Compile, dir.path()).is_ok());
        assert!(matches!(
            output_dir(Operation::Compile, &file),
            Err(ZokratesError::OutputDirInvalid { .. })
        ));
        assert!(matches!(
            output_dir(Operation::Compile, &dir.path().join("missing")),
            Err(ZokratesError::OutputDirInvalid { .. })
        ));
    }

    #[test]
    fn test_stdlib_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(stdlib_dir(Operation::Compile, dir.path()).is_ok());
        assert!(matches!(
            stdlib_dir(Operation::Compile, Path::new("/nonexistent/stdlib")),
            Err(ZokratesError::SupportLibraryInvalid { .. })
        ));
    }

    #[test]
    fn test_option_parsing() {
        let curve: Curve = option(Operation::Compile, "bls12_377").unwrap();
        assert_eq!(curve, Curve::Bls12_377);

        match option::<ProvingScheme>(Operation::Setup, "plonk") {
            Err(ZokratesError::InvalidOption { option, value, .. }) => {
                assert_eq!(option, "proving scheme");
                assert_eq!(value, "plonk");
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }
}
