//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use community_core::RecordId;

/// Manage communities from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "community", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the community API (overrides config and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the field schema
    Schema,

    /// Print a table of communities
    List {
        /// Fetch only this page (1-based)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "all")]
        page: Option<u32>,

        /// Free-text filter
        #[arg(long)]
        search: Option<String>,

        /// Follow pages until the list is exhausted
        #[arg(long)]
        all: bool,
    },

    /// Create a community
    Create {
        /// Field value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
    },

    /// Update a community
    Update {
        /// Record id
        id: RecordId,

        /// Field value, repeatable; an empty value clears the field
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
    },

    /// Delete a community
    Delete {
        /// Record id
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// One `--set NAME=VALUE` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// Split `NAME=VALUE` at the first `=`
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }

    Ok(Assignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}
