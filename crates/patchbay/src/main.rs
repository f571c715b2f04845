// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Patchbay - plugin registry for template-driven project environments.
//!
//! This is the binary entry point for the `patchbay` command line.

mod app;
mod inspect;
mod plugins;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use patchbay_config::Settings;

use crate::app::App;

/// Patchbay - plugin registry for template-driven project environments.
#[derive(Parser, Debug)]
#[command(name = "patchbay", version, about, long_about = None)]
struct Cli {
    /// Project root holding `config.toml` (defaults to the user data directory).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage installed plugins.
    Plugins {
        #[command(subcommand)]
        action: PluginsCommand,
    },
    /// Print every enabled plugin's contribution to a template patch.
    Patches {
        /// Patch name.
        name: String,
        /// Separator printed between contributions.
        #[arg(long, default_value = "\n")]
        separator: String,
    },
    /// Print the services enabled plugins attach to a lifecycle hook.
    Hooks {
        /// Hook name.
        name: String,
    },
    /// Inspect the configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Run a command contributed by an enabled plugin.
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand, Debug)]
enum PluginsCommand {
    /// List installed plugins.
    List,
    /// Enable one or more installed plugins.
    Enable {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Disable one or more plugins.
    Disable {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the templates root of an installed plugin.
    Printroot { name: String },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print a configuration value after plugin overlays are applied.
    Printvalue { key: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match cli.root {
        Some(root) => Settings::for_root(root),
        None => Settings::default(),
    };
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    init_tracing(&settings.log_level);

    let Some(command) = cli.command else {
        println!("patchbay: use --help for available commands");
        return ExitCode::SUCCESS;
    };

    // Load and validate configuration at startup
    let config = match patchbay_config::load_and_validate(&settings.root) {
        Ok(config) => config,
        Err(errors) => {
            patchbay_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let app = match App::new(settings) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("patchbay: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Commands::Plugins { action } => match action {
            PluginsCommand::List => plugins::run_list(&app, &config),
            PluginsCommand::Enable { names } => plugins::run_enable(&app, &names),
            PluginsCommand::Disable { names } => plugins::run_disable(&app, &names),
            PluginsCommand::Printroot { name } => plugins::run_printroot(&app, &name),
        },
        Commands::Patches { name, separator } => {
            inspect::run_patches(&app, &config, &name, &separator)
        }
        Commands::Hooks { name } => inspect::run_hooks(&app, &config, &name),
        Commands::Config {
            action: ConfigCommand::Printvalue { key },
        } => inspect::run_printvalue(&app, config, &key),
        Commands::External(args) => plugins::run_external(&app, &config, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app.report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("patchbay={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
