use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dmg-read-more")]
#[command(about = "Find posts containing the DMG Read More block")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// SQLite database holding the posts table
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Table prefix of the posts table (default "wp_")
    #[arg(long, global = true)]
    pub table_prefix: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log scan progress to stderr
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search for posts containing the DMG Read More block and output their IDs
    Search(SearchArgs),
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Search posts published on or after this date (YYYY-MM-DD, default 30 days ago)
    #[arg(long)]
    pub date_after: Option<String>,

    /// Search posts published on or before this date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date_before: Option<String>,

    /// Output format: default or csv. csv prints one comma separated list of IDs
    #[arg(long, default_value = "default")]
    pub format: String,
}
