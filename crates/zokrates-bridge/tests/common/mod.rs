#![allow(dead_code)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use zokrates_bridge::{Executor, Invocation, InvocationFailure, Output};

/// Stand-in for the real binary. Uses shell builtins only: the child gets no `PATH`.
const ARTIFACT_SCRIPT: &str = r#"#!/bin/sh
cmd="$1"
shift
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift 2 ;;
    -o) output="$2"; shift 2 ;;
    -s) spec="$2"; shift 2 ;;
    -v) vk="$2"; shift 2 ;;
    -p) pk="$2"; shift 2 ;;
    -j) proof="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf 'ZOKRATES_HOME=%s\n' "$ZOKRATES_HOME"
case "$cmd" in
  compile)
    : > "$output"
    : > "$output.ztf"
    printf '{"inputs":[],"outputs":[]}' > "$spec"
    printf 'Compiled code written to %s\n' "$output"
    ;;
  compute-witness)
    : > "$output"
    printf 'Witness file written to %s\n' "$output"
    ;;
  setup)
    : > "$vk"
    : > "$pk"
    printf 'Setup completed\n'
    ;;
  generate-proof)
    printf '{"proof":{}}' > "$proof"
    printf 'Proof written to %s\n' "$proof"
    ;;
  export-verifier)
    : > "$output"
    printf 'Verifier exported to %s\n' "$output"
    ;;
esac
"#;

/// Install a subscriber once so `RUST_LOG=debug cargo test` shows engine events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const STDERR_SCRIPT: &str =
    "#!/bin/sh\necho 'Compiling'\necho \"file 'missing.zok' not found\" >&2\n";

const PANIC_SCRIPT: &str = "#!/bin/sh\necho 'Performing setup...'\necho \"thread 'main' panicked at 'unsupported curve'\"\nexit 0\n";

const SILENT_EXIT_SCRIPT: &str = "#!/bin/sh\nexit 1\n";

/// Fake `zokrates` executables, written once per test binary.
pub struct Scripts {
    /// Writes the artifacts each subcommand documents.
    pub artifacts: PathBuf,
    /// Writes to stderr and exits cleanly.
    pub stderr_failure: PathBuf,
    /// Prints a panic line on stdout and exits 0.
    pub stdout_panic: PathBuf,
    /// Prints nothing and exits 1.
    pub silent_exit: PathBuf,
}

/// Scripts are installed before any of them is spawned. Writing one while another
/// test forks would leave its write fd open in the child and fail exec with `ETXTBSY`.
pub fn scripts() -> &'static Scripts {
    static SCRIPTS: OnceLock<Scripts> = OnceLock::new();
    SCRIPTS.get_or_init(|| {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("fake-zokrates");
        std::fs::create_dir_all(&dir).unwrap();
        Scripts {
            artifacts: install_script(&dir, "zokrates", ARTIFACT_SCRIPT),
            stderr_failure: install_script(&dir, "zokrates-stderr", STDERR_SCRIPT),
            stdout_panic: install_script(&dir, "zokrates-panic", PANIC_SCRIPT),
            silent_exit: install_script(&dir, "zokrates-exit-1", SILENT_EXIT_SCRIPT),
        }
    })
}

/// Write an executable script under a temporary name, then rename it into place.
fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let staged = dir.join(format!(".{name}.{}", std::process::id()));
    {
        let mut file = std::fs::File::create(&staged).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.sync_all().unwrap();
    }
    std::fs::set_permissions(&staged, std::fs::Permissions::from_mode(0o755)).unwrap();
    let path = dir.join(name);
    std::fs::rename(&staged, &path).unwrap();
    path
}

/// Directory layout shared by the scenarios: `bin/`, `stdlib/`, `out/`, and a source file.
///
/// `bin/` stays empty, so paths under it name executables that do not exist.
pub struct Workspace {
    pub root: tempfile::TempDir,
    pub bin_dir: PathBuf,
    pub stdlib: PathBuf,
    pub out: PathBuf,
    pub source: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bin_dir = root.path().join("bin");
        let stdlib = root.path().join("stdlib");
        let out = root.path().join("out");
        for dir in [&bin_dir, &stdlib, &out] {
            std::fs::create_dir(dir).unwrap();
        }
        let source = root.path().join("test.zok");
        std::fs::write(
            &source,
            "def main(private field a, field b) {\n    assert(a * a == b);\n    return;\n}\n",
        )
        .unwrap();
        Self {
            root,
            bin_dir,
            stdlib,
            out,
            source,
        }
    }

    /// Create an empty file under the workspace root.
    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    pub fn out_entries(&self) -> usize {
        std::fs::read_dir(&self.out).unwrap().count()
    }
}

/// Executor that records invocations instead of spawning anything.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    pub calls: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingExecutor {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, invocation: Invocation) -> Result<Output, InvocationFailure> {
        let capture = invocation.capture;
        self.calls.lock().unwrap().push(invocation);
        Ok(if capture {
            Output::Captured(String::new())
        } else {
            Output::Empty
        })
    }
}
