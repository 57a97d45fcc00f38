use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ViewFreq Developers",
    version,
    about = "ViewFreq CLI - Extract geometries and normal modes from Gaussian frequency calculations and export them as animations or displacement arrows.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used when exporting several modes.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a Gaussian log and export its geometry (.xyz) and modes (.modes.json).
    Parse(ParseArgs),
    /// List the vibrational modes of a Gaussian log or a mode record.
    Modes(ModesArgs),
    /// Write multi-frame XYZ trajectories animating one or all modes.
    Animate(AnimateArgs),
    /// Write the displacement arrows of one mode as JSON.
    Arrows(ArrowsArgs),
}

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Path to the Gaussian log file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the exported files. Defaults to the log's directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Title written on the second line of the XYZ file.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,
}

/// Arguments for the `modes` subcommand.
#[derive(Args, Debug)]
pub struct ModesArgs {
    /// A Gaussian log file or a .json mode record.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Where the geometry and the modes come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Geometry source: an .xyz file or a Gaussian log.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub geometry: PathBuf,

    /// Mode source: a .json mode record or a Gaussian log.
    /// May be omitted when the geometry source is a Gaussian log.
    #[arg(short, long, value_name = "PATH")]
    pub modes: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S animation.frames=40
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Exactly one of `--mode` or `--all`.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ModeSelection {
    /// The 1-based number of the mode to animate.
    #[arg(long, value_name = "N")]
    pub mode: Option<usize>,
    /// Animate every mode, writing one trajectory per mode.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `animate` subcommand.
#[derive(Args, Debug)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub selection: ModeSelection,

    /// Output trajectory path. With --all, `_mode<N>` is inserted before the extension.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the peak displacement amplitude.
    #[arg(short, long, value_name = "FLOAT")]
    pub amplitude: Option<f64>,

    /// Override the number of frames per oscillation.
    #[arg(short = 'n', long, value_name = "INT")]
    pub frames: Option<usize>,

    /// Override the playback interval between frames, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}

/// Arguments for the `arrows` subcommand.
#[derive(Args, Debug)]
pub struct ArrowsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// The 1-based number of the mode to draw.
    #[arg(long, required = true, value_name = "N")]
    pub mode: usize,

    /// Output JSON path.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the arrow length scale factor.
    #[arg(long, value_name = "FLOAT")]
    pub scale: Option<f64>,

    /// Override the shaft radius.
    #[arg(long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Override the minimum displacement magnitude that gets an arrow.
    #[arg(long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Override the head width relative to the shaft radius.
    #[arg(long, value_name = "FLOAT")]
    pub head_width: Option<f64>,

    /// Override the head length.
    #[arg(long, value_name = "FLOAT")]
    pub head_length: Option<f64>,
}
