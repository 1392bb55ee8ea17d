//! guicfg CLI - Resolve the effective admin GUI settings.

use clap::Parser;
use guicfg::cli::{Cli, Commands, ConfigCommands};
use guicfg::commands::{self, CommandResult};
use guicfg::config::ProcessEnv;
use guicfg::storage::ConfigStore;
use std::process;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    init_logging();

    let result = ConfigStore::locate(cli.config_path.as_deref(), &ProcessEnv)
        .and_then(|store| run_command(cli.command, &store, human));

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` controls the filter.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(
    command: Option<Commands>,
    store: &ConfigStore,
    human: bool,
) -> Result<(), guicfg::Error> {
    match command.unwrap_or(Commands::Show { reveal: false }) {
        Commands::Show { reveal } => {
            let result = commands::show(store, ProcessEnv, reveal)?;
            output(&result, human);
        }
        Commands::Url => {
            let result = commands::url(store, ProcessEnv)?;
            output(&result, human);
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                let result = commands::config_path(store);
                output(&result, human);
            }
            ConfigCommands::Get { key } => {
                let result = commands::config_get(store, &key)?;
                output(&result, human);
            }
            ConfigCommands::Set { key, value } => {
                let result = commands::config_set(store, &key, &value)?;
                output(&result, human);
            }
        },
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: CommandResult>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
