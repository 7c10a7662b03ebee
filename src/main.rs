use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palettone::assets::{AssetCategory, AssetLoader};
use palettone::models::AppConfig;
use palettone::services::{list_images, BatchRunner};
use palettone_core::{DistanceMetric, Pipeline};

#[derive(Parser)]
#[command(name = "palettone")]
#[command(about = "Convert images to a fixed palette while keeping their tone")]
struct Cli {
    /// Config file (defaults to CONFIG_FILE, then the built-in config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every image in the input directory (default)
    Convert(ConvertArgs),
    /// List available palettes
    Palettes,
    /// Extract the built-in config and palette files for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config_file: bool,

        /// Extract palette files
        #[arg(long)]
        palettes: bool,

        /// Extract everything
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Command-line overrides for config.yaml settings
#[derive(clap::Args, Default)]
struct ConvertArgs {
    /// Input directory
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Palette name (inline or palette file)
    #[arg(short, long)]
    palette: Option<String>,

    /// Palette list file (one #RRGGBB per line)
    #[arg(long)]
    palette_file: Option<PathBuf>,

    /// Distance metric: manhattan or euclidean
    #[arg(short, long)]
    metric: Option<DistanceMetric>,

    /// Enable the edge-aware blur
    #[arg(long)]
    blur: bool,

    /// Blur radius (edge dilation and Gaussian sigma)
    #[arg(long)]
    blur_radius: Option<u32>,

    /// Edge detection threshold
    #[arg(long)]
    blur_threshold: Option<f64>,

    /// Skip brightness correction
    #[arg(long)]
    no_brightness: bool,

    /// Round brightness factors to one decimal
    #[arg(long)]
    stepped: bool,

    /// Cap brightness correction so no channel clips
    #[arg(long)]
    preserve_hue: bool,

    /// Write intermediate stage images
    #[arg(long)]
    debug: bool,

    /// Worker threads
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl ConvertArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
            config.palette_file = None;
        }
        if let Some(file) = self.palette_file {
            config.palette_file = Some(file);
        }
        if let Some(metric) = self.metric {
            config.distance_metric = metric;
        }
        if let Some(radius) = self.blur_radius {
            config.blur_radius = radius;
        }
        if let Some(threshold) = self.blur_threshold {
            config.blur_threshold = threshold;
        }
        if self.jobs.is_some() {
            config.jobs = self.jobs;
        }
        config.blur |= self.blur;
        config.brightness_tweak &= !self.no_brightness;
        config.brightness_stepped |= self.stepped;
        config.preserve_hue |= self.preserve_hue;
        config.debug |= self.debug;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettone=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let palettes_dir = std::env::var("PALETTES_DIR").ok().map(PathBuf::from);
    let loader = AssetLoader::new(config_file, palettes_dir);

    match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(&loader, args),
        Some(Commands::Palettes) => run_palettes_command(&loader),
        Some(Commands::Init {
            config_file,
            palettes,
            all,
            force,
            list,
        }) => run_init_command(&loader, config_file, palettes, all, force, list),
        None => run_convert_command(&loader, ConvertArgs::default()),
    }
}

/// Convert every image in the input directory
fn run_convert_command(loader: &AssetLoader, args: ConvertArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load_from_assets(loader)?;
    args.apply(&mut config);

    // All configuration errors surface here, before any image is touched
    let base_dir = loader.config_base_dir();
    let palette = config.resolve_palette(loader, &base_dir)?;
    let pipeline = Pipeline::new(palette, config.pipeline_options())?;

    let input_dir = base_dir.join(&config.input_dir);
    let output_dir = base_dir.join(&config.output_dir);
    let files = list_images(&input_dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %input_dir.display(), "No images found");
        return Ok(());
    }
    tracing::info!(
        count = files.len(),
        input = %input_dir.display(),
        output = %output_dir.display(),
        "Converting images"
    );

    let report = BatchRunner::new(pipeline, output_dir)
        .jobs(config.jobs)
        .run(&files)?;

    for (file, error) in &report.failed {
        eprintln!("  ! {}: {error}", file.display());
    }
    println!(
        "Converted {} of {} images",
        report.processed.len(),
        files.len()
    );

    if report.processed.is_empty() {
        anyhow::bail!("all {} images failed", report.failed.len());
    }
    Ok(())
}

/// List inline palettes from the config and palette files
fn run_palettes_command(loader: &AssetLoader) -> anyhow::Result<()> {
    let config = AppConfig::load_from_assets(loader)?;

    println!("Inline palettes:");
    if config.palettes.is_empty() {
        println!("  (none)");
    }
    for (name, colors) in &config.palettes {
        let marker = if *name == config.palette { "*" } else { " " };
        println!("{marker} {name} ({} colors)", colors.len());
    }

    println!("\nPalette files:");
    for name in loader.list_palettes() {
        let marker = if name == config.palette && !config.palettes.contains_key(&name) {
            "*"
        } else {
            " "
        };
        match loader.read_palette(&name) {
            Ok(text) => match palettone_core::Palette::parse_list(&text) {
                Ok(palette) => println!("{marker} {name} ({} colors)", palette.len()),
                Err(e) => println!("{marker} {name} (invalid: {e})"),
            },
            Err(e) => println!("{marker} {name} (unreadable: {e})"),
        }
    }

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    loader: &AssetLoader,
    config: bool,
    palettes: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Palettes:");
        for f in AssetLoader::list_embedded(AssetCategory::Palettes) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || palettes {
        categories.push(AssetCategory::Palettes);
    }

    if categories.is_empty() {
        anyhow::bail!(
            "No categories specified. Use --all, --config-file or --palettes \
             (run 'palettone init --list' to see embedded assets)"
        );
    }

    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}
