use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use crate::data::session::{Entity, SENTINEL};
use crate::data::sql::Backend;

use super::constants::{APP_NAME, ENV_BACKEND, ENV_CONFIG, ENV_TABLE_NAME_PREFIX};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version, about = "Build guarded, paginated query sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// SQL backend (mysql, sqlite or postgres)
    #[arg(long, short = 'b', global = true, env = ENV_BACKEND, value_parser = parse_backend)]
    pub backend: Option<Backend>,

    /// Prefix prepended to the joined user table
    #[arg(long, global = true, env = ENV_TABLE_NAME_PREFIX)]
    pub table_prefix: Option<String>,
}

/// Parse backend from CLI/env string
fn parse_backend(s: &str) -> Result<Backend, String> {
    match s.to_lowercase().as_str() {
        "mysql" => Ok(Backend::Mysql),
        "sqlite" => Ok(Backend::Sqlite),
        "postgres" | "postgresql" => Ok(Backend::Postgres),
        _ => Err(format!(
            "Invalid backend '{}'. Valid options: mysql, sqlite, postgres",
            s
        )),
    }
}

/// Parse entity allowlist from CLI string
fn parse_entity(s: &str) -> Result<Entity, String> {
    match s.to_lowercase().as_str() {
        "user" => Ok(Entity::User),
        "organization" => Ok(Entity::Organization),
        "application" => Ok(Entity::Application),
        "token" => Ok(Entity::Token),
        _ => Err(format!(
            "Invalid entity '{}'. Valid options: user, organization, application, token",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Build a query session and print the rendered SQL with its parameters
    Plan(PlanArgs),
    /// Print the resolved configuration
    Config,
}

#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// Primary table to query
    #[arg(long)]
    pub table: String,

    /// Owning organization; empty means all owners
    #[arg(long, default_value = "")]
    pub owner: String,

    /// Row offset (-1 disables pagination)
    #[arg(long, default_value_t = SENTINEL, allow_negative_numbers = true)]
    pub offset: i64,

    /// Page size (-1 disables pagination)
    #[arg(long, default_value_t = SENTINEL, allow_negative_numbers = true)]
    pub limit: i64,

    /// Field for a single substring filter
    #[arg(long, default_value = "")]
    pub field: String,

    /// Value for the single substring filter
    #[arg(long, default_value = "")]
    pub value: String,

    /// JSON array of {"field": .., "value": ..} criteria (overrides --field/--value)
    #[arg(long, conflicts_with_all = ["field", "value"])]
    pub criteria: Option<String>,

    /// Sort field (defaults to created_time)
    #[arg(long, default_value = "")]
    pub sort_field: String,

    /// Sort order; only "ascend" sorts ascending
    #[arg(long, default_value = "")]
    pub sort_order: String,

    /// Use the user-aware variant (joins the user table when paginated)
    #[arg(long)]
    pub user: bool,

    /// Restrict fields to the column allowlist of an entity
    #[arg(long, value_parser = parse_entity)]
    pub entity: Option<Entity>,

    /// Render the matching COUNT(*) query instead
    #[arg(long)]
    pub count: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub table_prefix: Option<String>,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            backend: cli.backend,
            table_prefix: cli.table_prefix.clone(),
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig::from(&cli);
    (config, cli.command)
}
