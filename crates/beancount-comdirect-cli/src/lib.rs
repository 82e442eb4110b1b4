mod config;
mod extract;
mod identify;
mod input;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory as _, Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "beancount-comdirect",
    about = "Import comdirect account statement exports into beancount"
)]
#[command(disable_help_subcommand = true)]
struct Args {
    /// Config file path. Defaults to beancount-comdirect.toml in the current directory.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the account sections contained in each export
    Identify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Convert the configured account sections to beancount entries
    Extract {
        /// Write entries to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Order entries by date instead of file order
        #[arg(long)]
        sort: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    match path {
        Some(path) => Config::load_from_file(path).map(Some),
        None => Config::find_and_load(),
    }
}

pub fn run(args: impl IntoIterator<Item = String>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "beancount_comdirect=info".into());
    // already set when called repeatedly from one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    clap_complete::CompleteEnv::with_factory(Args::command).complete();

    let args = Args::parse_from(args);
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Identify { files } => identify::show_sections(&files, config.as_ref()),
        Commands::Extract {
            output,
            sort,
            files,
        } => {
            let config = config.context(
                "No config file found, create beancount-comdirect.toml or pass --config",
            )?;
            let entries = extract::extract_files(&files, &config, sort)?;
            extract::write_entries(&entries, output.as_deref())
        }
    }
}
