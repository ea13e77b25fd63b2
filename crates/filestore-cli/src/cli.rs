use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "filestore",
    about = "FileStore — key-addressed remote blob storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Storage root (default: ./files, or the config file's root for `serve`)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the FileStore server
    Serve(ServeArgs),
    /// Store a file under a freshly generated id
    Put(PutArgs),
    /// Print or save a stored file
    Get(GetArgs),
    /// Overwrite a stored file
    Update(UpdateArgs),
    /// Delete a stored file
    Rm(RmArgs),
    /// List stored files
    Ls(LsArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<String>,
    /// Write files in place instead of temp-file-and-rename
    #[arg(long)]
    pub no_atomic: bool,
}

#[derive(Args)]
pub struct PutArgs {
    /// File to store; `-` reads stdin
    pub path: PathBuf,
    /// Extension tag; defaults to the input file's extension, then `.txt`
    #[arg(short, long)]
    pub ext: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
    /// Extension as stored (default `.txt`; `""` for none)
    #[arg(short, long)]
    pub ext: Option<String>,
    /// Write to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,
    /// New content; `-` reads stdin
    pub path: PathBuf,
    /// Extension as stored (default `.txt`; `""` for none)
    #[arg(short, long)]
    pub ext: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: String,
    /// Extension as stored (default `.txt`; `""` for none)
    #[arg(short, long)]
    pub ext: Option<String>,
}

#[derive(Args)]
pub struct LsArgs {}
