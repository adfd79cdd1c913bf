//! CLI binary entry point for zenodo-rdm

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zenodo_rdm_transforms::cli::commands::config::{handle_config_sample, handle_config_show};
use zenodo_rdm_transforms::cli::commands::legacy::{LegacyArgs, handle_legacy};
use zenodo_rdm_transforms::cli::commands::migrate::{MigrateArgs, handle_migrate};

#[derive(Parser)]
#[command(name = "zenodo-rdm")]
#[command(about = "Legacy serialization and migration transforms for Zenodo RDM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize RDM records to the legacy JSON format
    Legacy {
        /// RDM record JSON file (object or array), or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Vocabulary fixture file with awards and funders
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Directory containing .zenodo-rdm.toml
        #[arg(short, long, default_value = ".")]
        config_dir: PathBuf,
        /// Pretty-print output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Transform legacy record entries (JSON Lines) into RDM entries
    Migrate {
        /// Legacy JSON Lines file, or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Exit with an error when any record fails
        #[arg(long)]
        strict: bool,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print a sample configuration file
    Sample,
    /// Print the effective configuration
    Show {
        /// Directory containing .zenodo-rdm.toml
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Legacy {
            input,
            vocabulary,
            config_dir,
            pretty,
        } => handle_legacy(&LegacyArgs {
            input,
            vocabulary,
            config_dir,
            pretty,
        }),
        Commands::Migrate {
            input,
            output,
            strict,
        } => handle_migrate(&MigrateArgs {
            input,
            output,
            strict,
        }),
        Commands::Config { command } => match command {
            ConfigCommands::Sample => handle_config_sample(),
            ConfigCommands::Show { dir } => handle_config_show(&dir),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
