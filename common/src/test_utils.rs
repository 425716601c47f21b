use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Workspace root, one level above the calling crate's manifest.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Returns the path to a file under `<workspace>/test_output`, creating the
/// directory on first use.
pub fn test_output_path(name: &str) -> PathBuf {
    static INIT: OnceLock<()> = OnceLock::new();
    let dir = workspace_root().join("test_output");
    INIT.get_or_init(|| {
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
    });
    dir.join(name)
}

/// Installs a test-writer subscriber. Safe to call from every test.
/// Respects `RUST_LOG`, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
