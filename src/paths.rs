use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config;

/// Overrides the parent directory of the staging dir.
pub const TMPDIR_ENV: &str = "JVESSEL_TMPDIR";
/// When set to `1` or `true`, the staging dir survives launcher exit.
pub const KEEP_ENV: &str = "JVESSEL_KEEP_STAGING";

pub fn staging_dir() -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("jvessel-");
    match std::env::var_os(TMPDIR_ENV) {
        Some(parent) if !parent.is_empty() => {
            std::fs::create_dir_all(&parent)
                .with_context(|| format!("create {}", Path::new(&parent).display()))?;
            builder.tempdir_in(&parent).context("create staging dir")
        }
        _ => builder.tempdir().context("create staging dir"),
    }
}

pub fn keep_staging() -> bool {
    matches!(std::env::var(KEEP_ENV).as_deref(), Ok("1") | Ok("true"))
}

pub fn java_binary(root: &Path) -> PathBuf {
    let name = if cfg!(windows) { "java.exe" } else { "java" };
    root.join(config::IMAGE_ROOT).join("bin").join(name)
}
