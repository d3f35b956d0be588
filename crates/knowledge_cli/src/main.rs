use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use knowledge::{Knowledge, SettingsStore};
use knowledge_cli::commands::export_cmd::{self, ExportArgs};
use knowledge_cli::commands::learn_cmd::{self, LearnArgs};
use knowledge_cli::commands::{init_cmd, learner_cmd};
use knowledge_cli::config::get_config_path;
use knowledge_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Knowledge CLI: gather configuration from environment variables, maps and files
#[derive(Parser)]
#[command(name = "knowledge")]
#[command(about = "Gather configuration from heterogeneous sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn variables from a source into the settings store
    Learn(LearnArgs),

    /// Learn variables from a source and export them
    Export(ExportArgs),

    /// Run the adapters of a configuration file and print the settings
    Gather {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Run the adapters of a configuration file into a YAML backup
    Backup {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Backup file, defaults to the configured `backup` entry
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a configuration file
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the CLI version
    Version,
}

fn run(command: Commands) -> Result<String, Error> {
    match command {
        Commands::Learn(args) => {
            let knowledge = Knowledge::with_config(args.knowledge_config());
            learn_cmd::execute(&args, &knowledge)
        }
        Commands::Export(args) => {
            let knowledge = Knowledge::with_config(args.knowledge_config());
            export_cmd::execute(&args, &knowledge)
        }
        Commands::Gather { config } => {
            learner_cmd::gather(&get_config_path(config.as_deref()), &SettingsStore::global())
        }
        Commands::Backup { config, output } => {
            learner_cmd::backup(&get_config_path(config.as_deref()), output)
        }
        Commands::Init { path } => init_cmd::execute(path.as_deref()),
        Commands::Version => Ok(format!(
            "knowledge version {}",
            option_env!("KNOWLEDGE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
        )),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_env("KNOWLEDGE_LOG"))
        .init();

    let cli = Cli::parse();
    let result = run(cli.command).and_then(|output| {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output.trim_end()).map_err(Error::Output)
    });

    if let Err(e) = result {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
