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
    author = "The bindscope developers",
    version,
    about = "bindscope - detect and compare non-covalent ligand-receptor interactions in PDB structures.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the platform configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S detection.cutoff=4.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,

    /// Write the JSON result to a file instead of standard output
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect interactions between a ligand and its receptor in one complex.
    Detect(DetectArgs),
    /// Compare the receptor-side interaction patterns of two complexes.
    Compare(CompareArgs),
    /// List the chains and heteroatom ligands of a structure.
    Inspect(InspectArgs),
}

/// Engine and distance settings shared by `detect` and `compare`.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Interaction engine: auto, plip or heuristic. Overrides `detection.engine`.
    #[arg(short, long, value_name = "MODE")]
    pub engine: Option<String>,

    /// Distance cutoff in angstroms for the heuristic engine. Overrides `detection.cutoff`.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,
}

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to the input complex (.pdb, .ent or .txt).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Ligand residue name (e.g., ATP). Autodetected when neither this nor --chain is given.
    #[arg(short, long, value_name = "RESNAME")]
    pub ligand: Option<String>,

    /// Ligand chain. Without --ligand, every residue on this chain is treated as the ligand.
    #[arg(long, value_name = "ID")]
    pub chain: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to the first complex.
    #[arg(long, required = true, value_name = "PATH")]
    pub first: PathBuf,

    /// Path to the second complex.
    #[arg(long, required = true, value_name = "PATH")]
    pub second: PathBuf,

    /// Ligand residue name in the first complex.
    #[arg(long = "ligand-1", value_name = "RESNAME")]
    pub ligand_1: Option<String>,

    /// Ligand chain in the first complex.
    #[arg(long = "chain-1", value_name = "ID")]
    pub chain_1: Option<String>,

    /// Ligand residue name in the second complex.
    #[arg(long = "ligand-2", value_name = "RESNAME")]
    pub ligand_2: Option<String>,

    /// Ligand chain in the second complex.
    #[arg(long = "chain-2", value_name = "ID")]
    pub chain_2: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input structure (.pdb, .ent or .txt).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}
