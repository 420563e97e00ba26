//! Core application

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands, PlanArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::Engine;
use crate::data::session::{
    FieldGuard, Pagination, SessionBuilder, SortSpec, SqlParams, parse_criteria,
};

pub struct CoreApp {
    pub config: AppConfig,
    pub engine: Engine,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let app = Self::new(config);

        match command {
            Commands::Plan(args) => {
                let (sql, params) = app.render_plan(&args)?;
                println!("{}", sql);
                println!(
                    "{}",
                    serde_json::to_string(&params.values).context("Failed to encode parameters")?
                );
            }
            Commands::Config => {
                println!("backend: {}", app.config.database.backend);
                println!(
                    "table_name_prefix: {:?}",
                    app.config.database.table_name_prefix
                );
            }
        }
        Ok(())
    }

    pub fn new(config: AppConfig) -> Self {
        let engine = Engine::new(config.database.backend);
        Self { config, engine }
    }

    /// Build the session described by `args` and render it for the configured backend
    pub fn render_plan(&self, args: &PlanArgs) -> Result<(String, SqlParams)> {
        let guard = args
            .entity
            .map(FieldGuard::for_entity)
            .unwrap_or_else(FieldGuard::shape_only);
        let builder = SessionBuilder::new(&self.engine, &self.config, guard);

        let pagination = Pagination::from_raw(args.offset, args.limit);
        let sort = SortSpec::from_raw(&args.sort_field, &args.sort_order);

        let plan = match &args.criteria {
            Some(json) => {
                let criteria = parse_criteria(json).context("Failed to parse --criteria")?;
                if args.user {
                    builder.build_for_user_with_criteria(&args.owner, pagination, &criteria, &sort)
                } else {
                    builder.build_with_criteria(&args.owner, pagination, &criteria, &sort)
                }
            }
            None if args.user => {
                builder.build_for_user(&args.owner, pagination, &args.field, &args.value, &sort)
            }
            None => builder.build(&args.owner, pagination, &args.field, &args.value, &sort),
        }
        .context("Failed to build query session")?;

        let dialect = self.config.database.backend.dialect();
        let rendered = if args.count {
            plan.to_count_sql(&args.table, dialect)
        } else {
            plan.to_sql(&args.table, dialect)
        };
        tracing::debug!(table = %args.table, count = args.count, "Rendered plan");
        Ok(rendered)
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
