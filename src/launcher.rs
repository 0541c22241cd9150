use anyhow::{bail, Context, Result};
use std::{
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::{config, paths, payload};

/// Extract-then-exec with the embedded image and a real process executor.
pub fn run() -> Result<()> {
    run_with_deps(payload::embedded_image(), |cmd| {
        cmd.status().context("spawn java")
    })
}

/// The full bootstrap sequence, with the image bytes and the process
/// executor injected so tests can drive it end to end.
pub fn run_with_deps(
    image: &[u8],
    mut exec: impl FnMut(&mut Command) -> Result<ExitStatus>,
) -> Result<()> {
    let staging = paths::staging_dir()?;

    // Dropping the guard removes the tree; detaching it keeps the tree.
    let (root, _guard): (PathBuf, Option<TempDir>) = if paths::keep_staging() {
        let path = staging.keep();
        info!("staging kept at {}", path.display());
        (path, None)
    } else {
        (staging.path().to_path_buf(), Some(staging))
    };

    debug!("extracting runtime image to {}", root.display());
    payload::extract_to(image, &root).context("extract runtime image")?;

    let java = paths::java_binary(&root);
    if !java.exists() {
        bail!(
            "java binary not found in extracted image at {}",
            java.display()
        );
    }

    let mut cmd = Command::new(&java);
    cmd.arg("-m").arg(config::ENTRY_POINT).stdin(Stdio::null());

    info!("running {} -m {}", java.display(), config::ENTRY_POINT);
    let status = exec(&mut cmd)?;
    if !status.success() {
        bail!(
            "java -m {} failed (exit {:?})",
            config::ENTRY_POINT,
            status.code()
        );
    }

    Ok(())
}
