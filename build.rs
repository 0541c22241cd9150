use serde::Deserialize;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const IMAGE_PREFIX: &str = "image";
const PAYLOAD_NAME: &str = "runtime_image.zip";

#[derive(Debug, Deserialize)]
struct Config {
    app_id: String,
    name: String,
    product_name: String,
    company: String,
    description: String,
    version: String,
    entry_point: String,
    #[serde(default)]
    icon: String,
    #[serde(default = "default_image_dir")]
    image_dir: String,
}

fn default_image_dir() -> String {
    "image".to_string()
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    let config = load_config(&manifest_dir).unwrap_or_else(|err| {
        panic!("failed to load config.toml: {err}");
    });
    if let Err(err) = validate_config(&config) {
        panic!("invalid config.toml: {err}");
    }

    let image_dir = manifest_dir.join(&config.image_dir);
    println!("cargo:rerun-if-changed={}", image_dir.display());
    if !image_dir.is_dir() {
        panic!(
            "runtime image not found at {} (stage the jlink output there first)",
            image_dir.display()
        );
    }

    if let Err(err) = write_image_zip(&image_dir, &out_dir.join(PAYLOAD_NAME)) {
        panic!("failed to package runtime image: {err}");
    }

    #[cfg(windows)]
    if let Err(err) = embed_windows_resources(&manifest_dir, &config) {
        panic!("failed to embed windows resources: {err}");
    }

    if let Err(err) = write_config_rs(&out_dir, &config) {
        panic!("failed to write config: {err}");
    }
}

fn load_config(manifest_dir: &Path) -> io::Result<Config> {
    let config_path = manifest_dir.join("config.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let contents = fs::read_to_string(&config_path)?;
    let cfg: Config = toml::from_str(&contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(cfg)
}

fn validate_config(config: &Config) -> io::Result<()> {
    require_field("name", &config.name)?;
    require_field("product_name", &config.product_name)?;
    require_field("version", &config.version)?;
    require_field("entry_point", &config.entry_point)?;
    Ok(())
}

fn require_field(name: &str, value: &str) -> io::Result<()> {
    if value.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("config field {name} is required"),
        ));
    }
    Ok(())
}

fn write_image_zip(image_dir: &Path, out_path: &Path) -> io::Result<()> {
    let file = File::create(out_path)?;
    let mut zip = zip::ZipWriter::new(file);
    // The original image is launched in place, so every file gets exec bits.
    let options = zip::write::FileOptions::default().unix_permissions(0o755);

    add_dir_recursive(IMAGE_PREFIX, image_dir, image_dir, &mut zip, options)?;

    zip.finish()?;
    Ok(())
}

fn add_dir_recursive(
    prefix: &str,
    root: &Path,
    dir: &Path,
    zip: &mut zip::ZipWriter<File>,
    options: zip::write::FileOptions,
) -> io::Result<()> {
    // Sorted walk keeps the embedded archive byte-stable across rebuilds.
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            add_dir_recursive(prefix, root, &path, zip, options)?;
        } else if path.is_file() {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            let name = Path::new(prefix).join(rel);
            let name = name.to_string_lossy().replace('\\', "/");
            zip.start_file(name, options)?;
            let mut f = File::open(&path)?;
            io::copy(&mut f, zip)?;
        }
    }
    Ok(())
}

#[cfg(windows)]
fn embed_windows_resources(manifest_dir: &Path, config: &Config) -> io::Result<()> {
    let mut res = winres::WindowsResource::new();
    if !config.icon.is_empty() {
        let icon_path = manifest_dir.join(&config.icon);
        if icon_path.exists() {
            res.set_icon(icon_path.to_string_lossy().as_ref());
        }
    }
    if !config.product_name.is_empty() {
        res.set("ProductName", &config.product_name);
    }
    if !config.description.is_empty() {
        res.set("FileDescription", &config.description);
    }
    if !config.company.is_empty() {
        res.set("CompanyName", &config.company);
    }
    if !config.version.is_empty() {
        res.set("FileVersion", &config.version);
        res.set("ProductVersion", &config.version);
    }
    if !config.app_id.is_empty() {
        res.set("InternalName", &config.app_id);
    }
    res.compile()?;
    Ok(())
}

fn write_config_rs(out_dir: &Path, config: &Config) -> io::Result<()> {
    let out_path = out_dir.join("jvessel_config.rs");
    let mut file = File::create(&out_path)?;
    writeln!(file, "pub const APP_ID: &str = {:?};", config.app_id)?;
    writeln!(file, "pub const NAME: &str = {:?};", config.name)?;
    writeln!(file, "pub const PRODUCT_NAME: &str = {:?};", config.product_name)?;
    writeln!(file, "pub const COMPANY: &str = {:?};", config.company)?;
    writeln!(file, "pub const DESCRIPTION: &str = {:?};", config.description)?;
    writeln!(file, "pub const VERSION: &str = {:?};", config.version)?;
    writeln!(file, "pub const ENTRY_POINT: &str = {:?};", config.entry_point)?;
    writeln!(file, "pub const ICON: &str = {:?};", config.icon)?;
    writeln!(file, "pub const IMAGE_ROOT: &str = {:?};", IMAGE_PREFIX)?;
    Ok(())
}
