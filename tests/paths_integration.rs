#[path = "../src/config.rs"]
mod config;
#[path = "../src/paths.rs"]
mod paths;

use std::sync::Mutex;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn staging_dir_honors_parent_override() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let prior = std::env::var_os(paths::TMPDIR_ENV);

    let parent = tempfile::tempdir().unwrap();
    std::env::set_var(paths::TMPDIR_ENV, parent.path());

    let staging = paths::staging_dir().unwrap();
    assert!(staging.path().starts_with(parent.path()));
    let name = staging
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(name.starts_with("jvessel-"));
    drop(staging);

    if let Some(v) = prior {
        std::env::set_var(paths::TMPDIR_ENV, v);
    } else {
        std::env::remove_var(paths::TMPDIR_ENV);
    }
}

#[test]
fn staging_dir_override_creates_missing_parent() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let prior = std::env::var_os(paths::TMPDIR_ENV);

    let base = tempfile::tempdir().unwrap();
    let parent = base.path().join("nested").join("tmp");
    std::env::set_var(paths::TMPDIR_ENV, &parent);

    let staging = paths::staging_dir().unwrap();
    assert!(staging.path().starts_with(&parent));
    drop(staging);

    if let Some(v) = prior {
        std::env::set_var(paths::TMPDIR_ENV, v);
    } else {
        std::env::remove_var(paths::TMPDIR_ENV);
    }
}

#[test]
fn staging_dir_is_removed_on_drop() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let prior = std::env::var_os(paths::TMPDIR_ENV);
    std::env::remove_var(paths::TMPDIR_ENV);

    let staging = paths::staging_dir().unwrap();
    let path = staging.path().to_path_buf();
    assert!(path.exists());
    drop(staging);
    assert!(!path.exists());

    if let Some(v) = prior {
        std::env::set_var(paths::TMPDIR_ENV, v);
    } else {
        std::env::remove_var(paths::TMPDIR_ENV);
    }
}

#[test]
fn keep_staging_only_on_truthy_values() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let prior = std::env::var_os(paths::KEEP_ENV);

    std::env::remove_var(paths::KEEP_ENV);
    assert!(!paths::keep_staging());
    std::env::set_var(paths::KEEP_ENV, "1");
    assert!(paths::keep_staging());
    std::env::set_var(paths::KEEP_ENV, "true");
    assert!(paths::keep_staging());
    std::env::set_var(paths::KEEP_ENV, "0");
    assert!(!paths::keep_staging());

    if let Some(v) = prior {
        std::env::set_var(paths::KEEP_ENV, v);
    } else {
        std::env::remove_var(paths::KEEP_ENV);
    }
}
