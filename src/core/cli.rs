use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    /// All child processes will be run in this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a starter configuration file
    Init,

    /// Fabricate backdated commits against the current repository
    Run(RunArgs),

    /// Print various information about the configured campaign
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Number of commits to fabricate.
    /// Replaces config [run].commits if provided.
    #[arg(long)]
    pub commits: Option<u32>,

    /// Seed for the random number generator, for reproducible runs.
    /// Replaces config [run].seed if provided.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Marker label woven into inserted comments and metadata keys.
    /// Replaces config tag if provided.
    #[arg(long)]
    pub tag: Option<String>,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective global configuration
    Config(PrintConfigArgs),

    /// List candidate files with size categories and touch caps
    Pool(PrintPoolArgs),

    /// List the configured commit messages
    Messages(PrintMessagesArgs),
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print pool subcommand
#[derive(Parser, Debug)]
pub struct PrintPoolArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print messages subcommand
#[derive(Parser, Debug)]
pub struct PrintMessagesArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
