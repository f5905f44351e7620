use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use vizcatalog::accounts::{AccountAdapter, SignupPolicy};
use vizcatalog::config::AppConfig;
use vizcatalog::database::{
    catalog_summary, establish_connection, get_database_url, init_database, migrate_database,
    seed_data, MigrateDirection,
};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Optional YAML config file; command-line flags take precedence
    #[clap(short, long, global = true)]
    config: Option<String>,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database management
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Create the example catalog
    Seed {
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Show live row counts per entity
    Status {
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let config = match args.config.as_deref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let database = resolve_database(database, &config);
                info!("Initializing database: {}", database);
                init_database(&database).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                let database = resolve_database(database, &config);
                info!("Running database migration: {:?}", direction);
                migrate_database(&database, direction).await?;
            }
        },
        Commands::Seed { database } => {
            let database = resolve_database(database, &config);
            info!("Seeding database: {}", database);
            let db = init_database(&database).await?;
            seed_data::create_example_catalog(&db).await?;
        }
        Commands::Status { database } => {
            let database = resolve_database(database, &config);
            let db = establish_connection(&get_database_url(Some(database.as_str()))).await?;
            let summary = catalog_summary(&db).await?;

            println!("users:               {}", summary.users);
            println!("projects:            {}", summary.projects);
            println!("table stores:        {}", summary.table_stores);
            println!("table schemas:       {}", summary.table_schemas);
            println!("prep flows:          {}", summary.prep_flows);
            println!("prep flow params:    {}", summary.prep_flow_params);
            println!("qc reports:          {}", summary.qc_reports);
            println!("templates:           {}", summary.templates);
            println!("viz reports:         {}", summary.viz_reports);
            println!("viz workbooks:       {}", summary.viz_workbooks);
            println!("viz dashboards:      {}", summary.viz_dashboards);
            println!("dashboard filters:   {}", summary.viz_dashboard_filters);
            println!("dashboard params:    {}", summary.viz_dashboard_params);

            let adapter = AccountAdapter::new(&config.accounts);
            println!("registration open:   {}", adapter.is_open_for_signup());
        }
    }

    Ok(())
}

fn resolve_database(flag: Option<String>, config: &AppConfig) -> String {
    flag.unwrap_or_else(|| config.database.path.clone())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
