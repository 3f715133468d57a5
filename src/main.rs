mod calc;
mod cmd;
mod data;
mod select;
mod ui;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datepick", about = "interactive multi-month date picker")]
struct Cli {
    /// Path to the directory containing config.yaml and selection.json
    /// (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Number of months to render, overriding config.yaml
    #[arg(long)]
    months: Option<u32>,

    /// Initial selection as comma-separated YYYY-MM-DD dates, overriding
    /// selection.json
    #[arg(long)]
    dates: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config files into the config directory
    Init,
    /// Print every date between START and END inclusive, one per line
    Range {
        /// Range start (YYYY-MM-DD)
        start: String,
        /// Range end (YYYY-MM-DD); argument order does not matter
        end: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so file I/O keeps working if
    // the process changes directory later.
    let config_dir = resolve_config_dir(&cli.config_dir)?;
    data::persistence::set_data_dir(config_dir);

    match cli.command {
        None => cmd::root::run(cli.months, cli.dates.as_deref()),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Range { start, end }) => cmd::range::run(&start, &end),
    }
}

fn resolve_config_dir(dir: &Path) -> anyhow::Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}
