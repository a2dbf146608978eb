//! Process-wide defaults and configuration loading.
//!
//! [`ZokratesConfig`] describes where the `zokrates` binary and its standard library
//! live; it can be persisted as JSON. [`InvokeOptions`] is the per-call object that
//! controls output capture.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZokratesError};

/// Location of the `zokrates` binary inside the reference container image.
pub const DEFAULT_EXECUTABLE: &str = "/app/zokrates";

/// Location of the ZoKrates standard library inside the reference container image.
pub const DEFAULT_STDLIB_PATH: &str = "/app/stdlib";

/// Environment variable through which ZoKrates finds its standard library.
pub const STDLIB_ENV_VAR: &str = "ZOKRATES_HOME";

/// Default cap on captured standard output, in bytes.
pub const MAX_CHAR_RETURN: usize = 10_000_000;

/// Text ZoKrates prints on stdout when it panics internally.
pub const FAILURE_MARKER: &str = "panicked";

/// Replaces captured output that grew past the cap.
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Where to find ZoKrates and how much output to keep by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZokratesConfig {
    /// Path to the `zokrates` executable.
    pub executable: PathBuf,
    /// Path to the ZoKrates standard library directory.
    pub stdlib_path: PathBuf,
    /// Default capture cap applied by [`ZokratesConfig::invoke_options`].
    pub max_return: usize,
}

impl Default for ZokratesConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            stdlib_path: PathBuf::from(DEFAULT_STDLIB_PATH),
            max_return: MAX_CHAR_RETURN,
        }
    }
}

impl ZokratesConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ZokratesError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| ZokratesError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ZokratesError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ZokratesError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Non-verbose invocation options using this config's capture cap.
    pub fn invoke_options(&self) -> InvokeOptions {
        InvokeOptions {
            max_return: self.max_return,
            verbose: false,
        }
    }
}

/// Per-call output policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvokeOptions {
    /// Maximum number of stdout bytes kept before the capture collapses to
    /// [`TRUNCATION_MARKER`].
    pub max_return: usize,
    /// Return captured stdout instead of nothing.
    pub verbose: bool,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self {
            max_return: MAX_CHAR_RETURN,
            verbose: false,
        }
    }
}

impl InvokeOptions {
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    pub fn with_max_return(mut self, max_return: usize) -> Self {
        self.max_return = max_return;
        self
    }
}
