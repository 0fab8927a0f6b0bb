mod commands;
mod config;
mod logging;
mod render;

use clap::{Parser, Subcommand};
use commands::{with_schema, FormKind};
use config::CliConfig;
use console::style;
use logging::{init_logging, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "regform")]
#[command(about = "Validate and fill in registration forms")]
#[command(version)]
struct Cli {
    /// Log level or filter directive (overrides REGFORM_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON object of field values
    Validate {
        /// Form variant
        #[arg(long, value_enum)]
        form: FormKind,

        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Date used as today for the age rule (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in a form interactively
    Fill {
        /// Form variant
        #[arg(long, value_enum)]
        form: FormKind,

        /// Date used as today for the age rule (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Show the fields and rules of a form
    Rules {
        /// Form variant
        #[arg(long, value_enum)]
        form: FormKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn today(&self) -> Option<&str> {
        match self {
            Commands::Validate { today, .. } | Commands::Fill { today, .. } => today.as_deref(),
            Commands::Rules { .. } => None,
        }
    }
}

/// Exit status: 0 valid, 1 invalid input, 2 usage or I/O error
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = CliConfig::from_env()?.with_overrides(
        cli.log_level.as_deref(),
        cli.log_json,
        cli.command.today(),
    )?;

    init_logging(&LoggingConfig::from(&config))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Validate { form, input, json, .. } => {
            with_schema!(form, config, |schema| commands::validate::run(
                schema,
                input.as_deref(),
                json
            ))
        }
        Commands::Fill { form, .. } => {
            with_schema!(form, config, |schema| commands::fill::run(schema))?;
            Ok(true)
        }
        Commands::Rules { form, json } => {
            with_schema!(form, config, |schema| commands::rules::run(schema, json))?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "regform",
            "validate",
            "--form",
            "registration",
            "--input",
            "signup.json",
            "--today",
            "2024-06-15",
            "--log-json",
        ])
        .unwrap();

        assert!(cli.log_json);
        assert_eq!(cli.command.today(), Some("2024-06-15"));
        match cli.command {
            Commands::Validate { form, input, json, .. } => {
                assert_eq!(form, FormKind::Registration);
                assert_eq!(input, Some(PathBuf::from("signup.json")));
                assert!(!json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_form_is_required() {
        assert!(Cli::try_parse_from(["regform", "rules"]).is_err());
        assert!(Cli::try_parse_from(["regform", "rules", "--form", "bogus"]).is_err());
    }
}
