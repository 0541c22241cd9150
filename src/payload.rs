use anyhow::{bail, Context, Result};
use std::{
    fs, io,
    path::{Component, Path},
};

const EMBEDDED_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/runtime_image.zip"));

/// Archive bytes baked into the binary at build time.
pub fn embedded_image() -> &'static [u8] {
    EMBEDDED_IMAGE
}

/// Unpacks `archive` under `dest_root`, reproducing every entry at its
/// archived relative path. Aborts on the first error.
pub fn extract_to(archive: &[u8], dest_root: &Path) -> Result<()> {
    if archive.is_empty() {
        bail!("runtime image archive is empty");
    }
    let reader = io::Cursor::new(archive);
    let mut zip = zip::ZipArchive::new(reader).context("read runtime image archive")?;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let name = entry.name();
        let path = Path::new(name);
        if path.has_root()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("invalid path in image archive: {name}");
        }

        let out_path = dest_root.join(path);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("create {}", out_path.display()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }

        let mut out_file = fs::File::create(&out_path)
            .with_context(|| format!("create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out_file)
            .with_context(|| format!("write {}", out_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = entry.unix_mode().unwrap_or(0o755);
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .with_context(|| format!("chmod {}", out_path.display()))?;
        }
    }
    Ok(())
}
