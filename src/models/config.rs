use crate::assets::AssetLoader;
use crate::error::AppError;
use palettone_core::{DistanceMetric, Palette, PipelineOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory scanned for images
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory results are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Selected palette: a key of `palettes` or a palette file name
    #[serde(default = "default_palette")]
    pub palette: String,

    /// Inline palettes as hex strings
    #[serde(default)]
    pub palettes: BTreeMap<String, Vec<String>>,

    /// Palette list file; takes precedence over `palette`
    #[serde(default)]
    pub palette_file: Option<PathBuf>,

    #[serde(default)]
    pub distance_metric: DistanceMetric,

    #[serde(default)]
    pub blur: bool,

    #[serde(default = "default_blur_radius")]
    pub blur_radius: u32,

    #[serde(default = "default_blur_threshold")]
    pub blur_threshold: f64,

    #[serde(default = "default_true")]
    pub brightness_tweak: bool,

    #[serde(default)]
    pub brightness_stepped: bool,

    #[serde(default)]
    pub preserve_hue: bool,

    /// Persist intermediate stage images next to the result
    #[serde(default)]
    pub debug: bool,

    /// Progress is logged each time a stage crosses a multiple of this
    /// many percent
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,

    /// Worker threads for batch processing (None = all cores)
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("Input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Output")
}

fn default_palette() -> String {
    "default".to_string()
}

fn default_blur_radius() -> u32 {
    3
}

fn default_blur_threshold() -> f64 {
    10.0
}

fn default_progress_step() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from AssetLoader (external file or embedded default)
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, AppError> {
        let content = loader.read_config_string().map_err(AppError::ConfigRead)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            palette = %config.palette,
            inline_palettes = config.palettes.len(),
            metric = %config.distance_metric,
            blur = config.blur,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Resolve the palette to use for this run
    ///
    /// Order: `palette_file` (relative to `base_dir`), then an inline entry
    /// of `palettes`, then a palette file known to the asset loader.
    pub fn resolve_palette(
        &self,
        loader: &AssetLoader,
        base_dir: &Path,
    ) -> Result<Palette, AppError> {
        if let Some(ref file) = self.palette_file {
            let path = base_dir.join(file);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| AppError::PaletteRead { path: path.clone(), source })?;
            tracing::debug!(path = %path.display(), "Using palette file");
            return Ok(Palette::parse_list(&text)?);
        }

        if let Some(colors) = self.palettes.get(&self.palette) {
            tracing::debug!(palette = %self.palette, "Using inline palette");
            return Ok(Palette::from_hex(colors)?);
        }

        match loader.read_palette(&self.palette) {
            Ok(text) => Ok(Palette::parse_list(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::UnknownPalette(self.palette.clone()))
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Pipeline options described by this configuration
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::new()
            .distance_metric(self.distance_metric)
            .blur(self.blur)
            .blur_radius(self.blur_radius)
            .blur_threshold(self.blur_threshold)
            .brightness_tweak(self.brightness_tweak)
            .brightness_stepped(self.brightness_stepped)
            .preserve_hue(self.preserve_hue)
            .debug(self.debug)
            .progress_step(self.progress_step)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut palettes = BTreeMap::new();
        palettes.insert(
            default_palette(),
            vec!["#000000".to_string(), "#ffffff".to_string()],
        );

        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            palette: default_palette(),
            palettes,
            palette_file: None,
            distance_metric: DistanceMetric::default(),
            blur: false,
            blur_radius: default_blur_radius(),
            blur_threshold: default_blur_threshold(),
            brightness_tweak: true,
            brightness_stepped: false,
            preserve_hue: false,
            debug: false,
            progress_step: default_progress_step(),
            jobs: None,
        }
    }
}
