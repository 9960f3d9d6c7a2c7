use clap::{Args, Parser, Subcommand, ValueEnum};
use seqvis::engine::region::SecondRegionPolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "SeqVis CLI - Residue distance maps, structure comparison and annotation tracks for predicted and experimental biomolecular structures.",
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

    /// Set the number of threads for the distance computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the residue distance maps of two structures chain by chain
    Compare(CompareArgs),
    /// Compute the residue distance map of one structure with optional annotation tracks
    Map(MapArgs),
}

/// Structure loading options shared by both commands.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Keep modified or non-standard residues that have a usable backbone atom
    #[arg(long)]
    pub include_nonstandard: bool,

    /// Index of the model to read from multi-model files (0-based)
    #[arg(long, value_name = "INDEX")]
    pub model: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// First structure file (mmCIF or PDB)
    #[arg(short = 'a', long = "structure-a", value_name = "PATH")]
    pub structure_a: PathBuf,

    /// Second structure file (mmCIF or PDB)
    #[arg(short = 'b', long = "structure-b", value_name = "PATH")]
    pub structure_b: PathBuf,

    /// Chains of the first structure in comparison order, e.g. "A,B"
    #[arg(long, value_name = "IDS")]
    pub chains_a: Option<String>,

    /// Chains of the second structure, matched position by position with --chains-a
    #[arg(long, value_name = "IDS")]
    pub chains_b: Option<String>,

    /// Row region, e.g. "10:50", "10-50" or "B:0:20"
    #[arg(long = "region-1", value_name = "REGION")]
    pub region_1: Option<String>,

    /// Column region; see --second-region when omitted
    #[arg(long = "region-2", value_name = "REGION")]
    pub region_2: Option<String>,

    /// Explicit region pair "ROWS,COLS"; may be repeated and overrides --region-1/--region-2
    #[arg(long = "region-pair", value_name = "PAIR")]
    pub region_pairs: Vec<String>,

    /// Column region used when only --region-1 is given
    #[arg(long, value_enum, value_name = "POLICY")]
    pub second_region: Option<SecondRegionArg>,

    /// Upper limit of the distance color scale (overrides --vmax-percentile)
    #[arg(long, value_name = "ANGSTROM")]
    pub vmax: Option<f64>,

    /// Percentile of both distance maps used as the distance color-scale limit
    #[arg(long, value_name = "P")]
    pub vmax_percentile: Option<f64>,

    /// Symmetric limit of the difference color scale (overrides --vdiff-percentile)
    #[arg(long, value_name = "ANGSTROM")]
    pub vdiff: Option<f64>,

    /// Percentile of absolute differences used as the difference color-scale limit
    #[arg(long, value_name = "P")]
    pub vdiff_percentile: Option<f64>,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Directory for the written matrices and summary
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override configuration values (e.g. -S scale.vdiff-percentile=99)
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Structure file (mmCIF or PDB)
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Chains to include in order, e.g. "B,A"; all chains when omitted
    #[arg(long, value_name = "IDS")]
    pub chains: Option<String>,

    /// Tab-separated annotation table (chain, track, start, end, value)
    #[arg(short, long, value_name = "PATH")]
    pub tracks: Option<PathBuf>,

    /// Track colors: a color, a colormap name, inline JSON, or a .json/.toml file
    #[arg(long, value_name = "COLORS")]
    pub colors: Option<String>,

    /// Colormap for categorical tracks without a color setting
    #[arg(long, value_name = "NAME")]
    pub categorical_palette: Option<String>,

    /// Palette sampled for numerical tracks without a literal color
    #[arg(long, value_name = "NAME")]
    pub numerical_palette: Option<String>,

    /// Upper limit of the distance color scale (overrides --vmax-percentile)
    #[arg(long, value_name = "ANGSTROM")]
    pub vmax: Option<f64>,

    /// Percentile of the distance map used as the color-scale limit
    #[arg(long, value_name = "P")]
    pub vmax_percentile: Option<f64>,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Directory for the written matrix, chain blocks and tracks
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override configuration values (e.g. -S map.chains=A,B)
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondRegionArg {
    /// Reuse the row region for the columns
    Mirror,
    /// Use every residue for the columns
    Full,
}

impl From<SecondRegionArg> for SecondRegionPolicy {
    fn from(arg: SecondRegionArg) -> Self {
        match arg {
            SecondRegionArg::Mirror => SecondRegionPolicy::MirrorFirst,
            SecondRegionArg::Full => SecondRegionPolicy::FullStructure,
        }
    }
}
