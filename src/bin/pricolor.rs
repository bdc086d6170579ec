//! Command-line front-end for pricolor
//!
//! Thin glue around the library: builds a [`PickerConfig`] from flags (or
//! a JSON file), runs the picker on one image and prints the color in the
//! requested format.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pricolor::{
    pick_primary_color, ChromaModel, HsvPolicy, HueWindow, OutputFormat, PickerConfig,
    PolicyConfig, PreprocessConfig, RgbPolicy, SaturationWindow,
};

/// Pick the primary (most used chromatic) color of an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image file to analyze
    image: PathBuf,

    /// Load the full configuration from a JSON file (other options ignored)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color-space policy: rgb (direct quantization) or hsv (skin-tone filter)
    #[arg(long, default_value = "rgb")]
    policy: String,

    /// Retained bits per RGB channel (rgb policy)
    #[arg(short = 'd', long, default_value_t = 4)]
    color_depth: u8,

    /// Chroma model: conic or columnar (rgb policy)
    #[arg(long, default_value = "conic")]
    chroma_model: String,

    /// First pickup chroma threshold, 0 < n < 1 (rgb policy)
    #[arg(short = 'c', long, default_value_t = 0.5)]
    upper: f32,

    /// Second pickup chroma threshold, 0 < n < 1 (rgb policy)
    #[arg(short = 'n', long, default_value_t = 0.2)]
    lower: f32,

    /// Hue shift, 0-5 (hsv policy)
    #[arg(long, default_value_t = 2)]
    hue_bits: u8,

    /// Saturation/value shift, 0-7 (hsv policy)
    #[arg(long, default_value_t = 4)]
    sat_bits: u8,

    /// Hue-exclusion window start, half-degrees; negative wraps (hsv policy)
    #[arg(long, default_value_t = -3, allow_hyphen_values = true)]
    hue_start: i16,

    /// Hue-exclusion window end, half-degrees (hsv policy)
    #[arg(long, default_value_t = 24)]
    hue_end: i16,

    /// Saturation band lower bound for the exclusion window (hsv policy)
    #[arg(long, default_value_t = 10)]
    sat_min: u8,

    /// Saturation band upper bound for the exclusion window (hsv policy)
    #[arg(long, default_value_t = 150)]
    sat_max: u8,

    /// Divide the selected value channel by this factor (hsv policy)
    #[arg(long)]
    whitening: Option<f32>,

    /// Simply pick the most used color, no chroma/hue bias
    #[arg(short = 'p', long)]
    peakonly: bool,

    /// Border fraction clipped around the center, 0-0.9
    #[arg(long, default_value_t = 0.0)]
    clip: f32,

    /// Working resolution the clipped region is resized to
    #[arg(long, default_value_t = 200)]
    resize: u32,

    /// Median filter kernel, odd 3-9; 0 disables smoothing
    #[arg(long, default_value_t = 0)]
    median: u32,

    /// Output with hexadecimals
    #[arg(short = 'x', long)]
    hex: bool,

    /// Output CSS format
    #[arg(short = 's', long)]
    css: bool,

    /// Output the HSV triple instead of RGB (hsv policy)
    #[arg(long)]
    hsv: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let pick = pick_primary_color(&args.image, &config)
        .with_context(|| format!("failed to analyze {}", args.image.display()))?;

    let output = if args.css {
        OutputFormat::Css
    } else if args.hex {
        OutputFormat::Hex
    } else if args.hsv {
        OutputFormat::Hsv
    } else {
        OutputFormat::Decimal
    };
    println!("{}", pick.render(output));

    if pick.is_no_data() {
        eprintln!("note: no usable pixels after filtering, reporting black");
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<PickerConfig> {
    if let Some(path) = &args.config {
        return pricolor::PickerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let policy = match args.policy.as_str() {
        "rgb" => PolicyConfig::Rgb(RgbPolicy {
            color_depth: args.color_depth,
            chroma_model: match args.chroma_model.as_str() {
                "conic" => ChromaModel::Conic,
                "columnar" => ChromaModel::Columnar,
                other => bail!("unknown chroma model '{other}' (expected conic or columnar)"),
            },
            upper_threshold: args.upper,
            lower_threshold: args.lower,
        }),
        "hsv" => PolicyConfig::Hsv(HsvPolicy {
            hue_bits: args.hue_bits,
            sat_bits: args.sat_bits,
            hue_window: HueWindow {
                start: args.hue_start,
                end: args.hue_end,
            },
            saturation_window: SaturationWindow {
                min: args.sat_min,
                max: args.sat_max,
            },
            whitening: args.whitening,
        }),
        other => bail!("unknown policy '{other}' (expected rgb or hsv)"),
    };

    Ok(PickerConfig {
        preprocess: PreprocessConfig {
            clip_ratio: args.clip,
            resize_width: args.resize,
            resize_height: args.resize,
            median_kernel: args.median,
        },
        policy,
        peakonly: args.peakonly,
    })
}
