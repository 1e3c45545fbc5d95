//! Test infrastructure shared by the workspace crates.
//!
//! Rendered charts and other artifacts produced by tests are written under
//! `<workspace root>/test_output/` so they can be inspected after a run.
//!
//! ```rust
//! use test_helpers::{find_project_root, output_path};
//!
//! let root = find_project_root().expect("Failed to find project");
//! assert!(root.join("Cargo.toml").exists());
//!
//! let chart = output_path("night_sky.svg");
//! assert!(chart.starts_with(root));
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Error types for test infrastructure operations.
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No Cargo.toml with a `[workspace]` section above the current directory
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Locate the workspace root by walking up from the current directory.
///
/// The first `Cargo.toml` containing a `[workspace]` section wins.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<workspace root>/test_output`, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path of a test artifact inside the output directory.
///
/// Parent directories of nested paths are created so the caller can write
/// to the returned path directly.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let full = get_output_dir().join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create artifact directory");
    }
    full
}

/// Route `log` output through the test harness' captured stdout.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
