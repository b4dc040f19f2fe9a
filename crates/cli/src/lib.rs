pub mod commands;
pub mod sink;

use std::process::ExitCode;

use caseboard_core::config::{AppConfig, LoadOptions};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "caseboard",
    about = "Crime-case dashboard CLI",
    long_about = "Fetch the case roster and model coefficients, apply date and grouping \
                  filters client-side, and render the dashboard charts.",
    after_help = "Examples:\n  caseboard dashboard --offline\n  caseboard dashboard --from 2024-01-01 --to 2024-03-31 --group-by location\n  caseboard predict --age 30 --ethnicity Mixed --location Central"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Load the roster and render all three charts")]
    Dashboard {
        #[arg(long, value_name = "DATE", help = "Inclusive start of the case-date window (YYYY-MM-DD)")]
        from: Option<NaiveDate>,
        #[arg(long, value_name = "DATE", help = "Inclusive end of the case-date window (YYYY-MM-DD)")]
        to: Option<NaiveDate>,
        #[arg(long, value_name = "PATH", help = "Grouping field for the category chart (e.g. case_type, location, victim.age)")]
        group_by: Option<String>,
        #[arg(long, help = "Use the built-in fixture roster instead of the API")]
        offline: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Rank model coefficients by absolute weight")]
    Coefficients {
        #[arg(long, help = "Use the built-in fixture coefficients instead of the API")]
        offline: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Ask the model to classify a hypothetical case")]
    Predict {
        #[arg(long, help = "Victim age")]
        age: u32,
        #[arg(long, help = "Victim ethnicity")]
        ethnicity: String,
        #[arg(long, help = "Case location")]
        location: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

fn init_logging(config: &AppConfig) {
    use caseboard_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .compact()
                .try_init();
        }
        Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .pretty()
                .try_init();
        }
        Json => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .json()
                .try_init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Best-effort: a broken config still reaches the command, which
    // reports the load error itself.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Dashboard { from, to, group_by, offline, json } => {
            commands::dashboard::run(commands::dashboard::DashboardArgs {
                from,
                to,
                group_by,
                offline,
                json,
            })
        }
        Command::Coefficients { offline, json } => commands::coefficients::run(offline, json),
        Command::Predict { age, ethnicity, location, json } => {
            commands::predict::run(age, ethnicity, location, json)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
