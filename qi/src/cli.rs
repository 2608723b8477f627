//! CLI argument parsing for queryinterp

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::datasource::Resource;
use crate::error::{Error, Result};
use crate::variable::{INTERVAL_VARIABLE, Scope, Value, Variable};

#[derive(Parser, Debug)]
#[command(name = "qi")]
#[command(author, version, about = "Interpolate dashboard variables into SQL query templates", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a query template
    Render {
        /// Template file (reads stdin when omitted)
        file: Option<PathBuf>,

        #[command(flatten)]
        bindings: Bindings,

        /// Print the full query as JSON instead of the text
        #[arg(long)]
        json: bool,
    },

    /// Quote a value as a string literal
    Quote {
        #[arg(required = true)]
        value: String,
    },

    /// Expand shorthand durations (30s, 5m) in text
    Durations {
        #[arg(required = true)]
        text: String,
    },

    /// Print the request path of a backend resource
    Resource {
        #[arg(value_enum)]
        kind: ResourceKind,

        /// Table name (for `columns`)
        #[arg(short, long, required_if_eq("kind", "columns"))]
        table: Option<String>,
    },

    /// List the macros expanded by the query engine
    Macros,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    SqlInfo,
    Tables,
    Columns,
    Macros,
}

impl ResourceKind {
    pub fn into_resource(self, table: Option<String>) -> Resource {
        match self {
            Self::SqlInfo => Resource::SqlInfo,
            Self::Tables => Resource::Tables,
            Self::Columns => Resource::Columns {
                table: table.unwrap_or_default(),
            },
            Self::Macros => Resource::Macros,
        }
    }
}

/// Variable bindings given on the command line
#[derive(Args, Debug, Default, Clone)]
pub struct Bindings {
    /// Single text variable, NAME=VALUE
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Single number variable, NAME=NUMBER
    #[arg(short = 'n', long = "num", value_name = "NAME=NUMBER")]
    pub nums: Vec<String>,

    /// Multi-value variable, NAME=A,B,...
    #[arg(short = 'm', long = "multi", value_name = "NAME=A,B")]
    pub multi: Vec<String>,

    /// Include-all variable, NAME=A,B,...
    #[arg(short = 'a', long = "all", value_name = "NAME=A,B")]
    pub all: Vec<String>,

    /// Dashboard interval, bound as __interval (e.g. 30s)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// YAML file of bindings
    #[arg(long = "vars", value_name = "FILE")]
    pub vars_file: Option<PathBuf>,
}

/// Split `NAME=VALUE`, checking the name is usable as a placeholder
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (name, value) = input.split_once('=').ok_or_else(|| Error::InvalidAssignment {
        input: input.to_string(),
    })?;
    let name = name.trim();
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(Error::InvalidName { name: name.to_string() });
    }
    Ok((name.to_string(), value.to_string()))
}

fn split_values(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

impl Bindings {
    /// Build the scope described by the flags, not including `vars_file`
    pub fn to_scope(&self) -> Result<Scope> {
        let mut scope = Scope::new();

        for input in &self.vars {
            let (name, value) = parse_assignment(input)?;
            scope.insert(name, Variable::single(value));
        }

        for input in &self.nums {
            let (name, value) = parse_assignment(input)?;
            let number: serde_json::Number = value.trim().parse().map_err(|_| Error::InvalidNumber {
                name: name.clone(),
                value: value.clone(),
            })?;
            scope.insert(name, Variable::Single(Value::Number(number)));
        }

        for input in &self.multi {
            let (name, value) = parse_assignment(input)?;
            scope.insert(name, Variable::Multi(split_values(&value)));
        }

        for input in &self.all {
            let (name, value) = parse_assignment(input)?;
            scope.insert(name, Variable::IncludeAll(split_values(&value)));
        }

        if let Some(interval) = &self.interval {
            scope.insert(INTERVAL_VARIABLE, Variable::single(interval.clone()));
        }

        Ok(scope)
    }
}
