mod app;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod service;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use input::{ItemCommand, Repl};
use persistence::{ensure_data_dir, init_local_data_dir, load_settings, save_settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasktally", version)]
#[command(about = "Projects, tasks and focused time tracking from the terminal", long_about = None)]
struct Cli {
    /// Data directory. Defaults to a local .tasktally, then ~/.tasktally
    #[arg(long, global = true, env = "TASKTALLY_DIR")]
    dir: Option<PathBuf>,

    /// Log store and timer activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Project(ItemCommand),
    /// Manage the tasks of one project interactively
    Repl { project_id: String },
    /// Initialize a local .tasktally directory in the current directory
    Init,
    /// Show or change settings
    Config {
        /// Countdown length used when `t` is given without --time
        #[arg(long)]
        timer_minutes: Option<u32>,
        /// chrono format string for listing dates
        #[arg(long)]
        date_format: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tasktally=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasktally=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Fatal errors bubble up; command errors are printed and end with success
fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Init => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized tasktally directory: {}", data_dir.display());
            println!();
            println!("tasktally will now use this local directory for storage.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config {
            timer_minutes,
            date_format,
        } => {
            let data_dir = ensure_data_dir(cli.dir)?;
            let path = data_dir.settings_file();
            let mut settings = load_settings(&path)?;

            if timer_minutes.is_some() || date_format.is_some() {
                if let Some(minutes) = timer_minutes {
                    settings.default_timer_minutes = minutes;
                }
                if let Some(format) = date_format {
                    settings.date_format = format;
                }
                save_settings(&path, &settings)?;
            }

            println!("Data directory:        {}", data_dir.root().display());
            println!("Default timer minutes: {}", settings.default_timer_minutes);
            println!("Date format:           {}", settings.date_format);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Repl { project_id } => {
            let app = App::new(ensure_data_dir(cli.dir)?)?;
            let repl = Repl::open(&app, &project_id)?;
            repl.run()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Project(command) => {
            let app = App::new(ensure_data_dir(cli.dir)?)?;
            if let Err(err) = app.run_project_command(command) {
                eprintln!("Error: {}", err);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
