//! Asset loading with embedded fallbacks
//!
//! Two kinds of assets ship inside the binary: the default `config.yaml`
//! and a set of palette files (`palettes/*.txt`).
//!
//! - If no external path is configured: use embedded assets only
//! - If an external path is configured: use the filesystem, falling back to
//!   embedded assets for anything missing there

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded palette files
#[derive(RustEmbed)]
#[folder = "palettes/"]
#[include = "*.txt"]
struct EmbeddedPalettes;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// File extension of palette files
const PALETTE_EXT: &str = "txt";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Palettes,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (--config or CONFIG_FILE)
    config_file: Option<PathBuf>,
    /// External palettes directory (PALETTES_DIR)
    palettes_dir: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the user configured them. If `None`,
    /// embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, palettes_dir: Option<PathBuf>) -> Self {
        Self {
            config_file,
            palettes_dir,
        }
    }

    /// Directory that relative paths in the config are resolved against
    ///
    /// The external config file's directory, or the working directory when
    /// the embedded config is in use.
    pub fn config_base_dir(&self) -> PathBuf {
        self.config_file
            .as_deref()
            .filter(|p| p.exists())
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Read the config file
    ///
    /// An explicitly configured file must exist; without one the embedded
    /// default is used.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read a palette file by name (file stem, e.g. `pico8`)
    ///
    /// Tries the external palettes directory first, then embedded palettes.
    pub fn read_palette(&self, name: &str) -> io::Result<String> {
        let file_name = format!("{name}.{PALETTE_EXT}");

        if let Some(ref dir) = self.palettes_dir {
            let full_path = dir.join(&file_name);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading palette from filesystem");
                return fs::read_to_string(&full_path);
            }
        }

        let data = EmbeddedPalettes::get(&file_name)
            .map(|f| {
                tracing::trace!(palette = %name, "Loading palette from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Palette not found: {name}"),
                )
            })?;
        String::from_utf8(data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List palette names available as files (merged embedded + external)
    pub fn list_palettes(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = EmbeddedPalettes::iter()
            .filter_map(|f| palette_stem(Path::new(f.as_ref())))
            .collect();

        if let Some(ref dir) = self.palettes_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if let Some(name) = palette_stem(&entry.path()) {
                        names.insert(name);
                    }
                }
            }
        }

        names.into_iter().collect()
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Palettes => {
                    let dir = self
                        .palettes_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./palettes"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedPalettes::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedPalettes::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Palettes => EmbeddedPalettes::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}

fn palette_stem(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != PALETTE_EXT {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_config_is_available() {
        let loader = AssetLoader::default();
        let config = loader.read_config_string().unwrap();
        assert!(config.contains("distance_metric"));
    }

    #[test]
    fn test_missing_external_config_is_an_error() {
        let loader = AssetLoader::new(Some(PathBuf::from("/nonexistent/config.yaml")), None);
        assert!(loader.read_config().is_err());
    }

    #[test]
    fn test_embedded_palettes_listed() {
        let names = AssetLoader::default().list_palettes();
        assert!(names.contains(&"pico8".to_string()));
        assert!(names.contains(&"gameboy".to_string()));
    }

    #[test]
    fn test_external_palette_overrides_embedded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pico8.txt"), "#123456\n").unwrap();
        fs::write(dir.path().join("custom.txt"), "#000000\n").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let loader = AssetLoader::new(None, Some(dir.path().to_path_buf()));
        assert_eq!(loader.read_palette("pico8").unwrap(), "#123456\n");

        let names = loader.list_palettes();
        assert!(names.contains(&"custom".to_string()));
        assert!(!names.contains(&"notes".to_string()));
    }

    #[test]
    fn test_unknown_palette_not_found() {
        let err = AssetLoader::default().read_palette("nope").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = TempDir::new().unwrap();
        let loader = AssetLoader::new(
            Some(dir.path().join("config.yaml")),
            Some(dir.path().join("palettes")),
        );

        let report = loader
            .init(&[AssetCategory::Config, AssetCategory::Palettes], false)
            .unwrap();
        assert!(report.skipped.is_empty());
        assert!(dir.path().join("config.yaml").exists());
        assert!(dir.path().join("palettes/pico8.txt").exists());

        let report = loader.init(&[AssetCategory::Config], false).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped.len(), 1);

        let report = loader.init(&[AssetCategory::Config], true).unwrap();
        assert_eq!(report.written.len(), 1);
    }
}
