use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build a self-hosted Python package index from downloaded archives.
#[derive(Debug, Parser)]
#[command(name = "wheelhouse", version, about)]
pub struct Cli {
    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Log as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,
    /// Configuration file, replacing the ones in the platform config directory.
    #[arg(long, global = true, env = "WHEELHOUSE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Threads used to read archives.
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,
    /// Skip unreadable archives instead of stopping at the first one.
    #[arg(long, global = true)]
    pub keep_going: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download packages with pip, then write their metadata files.
    Download(DownloadArgs),
    /// List downloaded packages and their versions.
    List(ListArgs),
    /// Create a package index from the download directory.
    Create(CreateArgs),
    /// Write a metadata file next to every downloaded package lacking one.
    WriteMetadata(WriteMetadataArgs),
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    #[arg(short, long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,
    /// Requirements file (repeatable).
    #[arg(short, long = "requirements", value_name = "FILE")]
    pub requirements: Vec<PathBuf>,
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,
    /// Proxy in the form [user:passwd@]proxy.server:port.
    #[arg(long)]
    pub proxy: Option<String>,
    /// Allow wheels instead of source distributions only.
    #[arg(long)]
    pub allow_binary: bool,
    /// Target platform (repeatable).
    #[arg(long = "platform")]
    pub platforms: Vec<String>,
    #[arg(long)]
    pub python_version: Option<String>,
    #[arg(long)]
    pub implementation: Option<String>,
    /// Target Python ABI (repeatable).
    #[arg(long = "abi")]
    pub abis: Vec<String>,
    /// Disable isolation when building.
    #[arg(long)]
    pub no_build_isolation: bool,
    /// pip executable.
    #[arg(long, value_name = "PATH")]
    pub pip: Option<String>,
    /// Packages to download.
    pub packages: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,
    /// Only print package names.
    #[arg(long)]
    pub name_only: bool,
    /// Only list the versions of this package.
    #[arg(long)]
    pub name: Option<String>,
    /// Print JSON.
    #[arg(long)]
    pub json: bool,
    /// Show normalized names instead of display names.
    #[arg(long)]
    pub use_norm_name: bool,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(short, long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,
    #[arg(short, long, value_name = "DIR")]
    pub mirror_dir: Option<PathBuf>,
    /// Copy packages into the mirror instead of symlinking them.
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct WriteMetadataArgs {
    #[arg(short, long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,
    /// Regenerate existing metadata files.
    #[arg(long)]
    pub overwrite: bool,
}
