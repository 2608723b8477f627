use std::io::Read;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use queryinterp::cli::{Cli, Command};
use queryinterp::config::{Config, load_scope};
use queryinterp::{KNOWN_MACROS, SqlQuery, apply_template_variables, normalize_durations, quote_literal};

fn parse_level(level: Option<&str>) -> tracing::Level {
    match level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(level: Option<&str>) -> Result<()> {
    let level = parse_level(level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;
    Ok(())
}

fn read_template(file: Option<&std::path::PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).context(format!("Failed to read template: {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read template from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref().or(config.log_level.as_deref())).context("Failed to setup logging")?;
    info!("queryinterp starting");

    match cli.command {
        Command::Render { file, bindings, json } => {
            let template = read_template(file.as_ref())?;

            let mut scope = config.variables.clone();
            if let Some(path) = &bindings.vars_file {
                let from_file = load_scope(path).context(format!("Failed to load variables: {}", path.display()))?;
                scope = scope.merged(&from_file);
            }
            let from_flags = bindings.to_scope().context("Invalid variable binding")?;
            scope = scope.merged(&from_flags);
            debug!(vars = scope.len(), "main: scope assembled");

            let query = SqlQuery::raw(config.ref_id.clone(), template).with_format(config.format);
            let rendered = apply_template_variables(&query, &scope);

            if json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                println!("{}", rendered.query_text.trim_end_matches('\n'));
            }
        }
        Command::Quote { value } => {
            println!("{}", quote_literal(&value));
        }
        Command::Durations { text } => {
            println!("{}", normalize_durations(&text));
        }
        Command::Resource { kind, table } => {
            println!("{}", kind.into_resource(table).path());
        }
        Command::Macros => {
            for name in KNOWN_MACROS {
                println!("{}{}", "$__".dimmed(), name.cyan());
            }
        }
    }

    Ok(())
}
