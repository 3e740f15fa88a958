//! ddlite CLI
//!
//! Command-line tool for inspecting and dumping SQLite databases.

use clap::{Parser, Subcommand};
use ddlite_core::ddl::Utility;
use ddlite_sqlite::{ColumnInfo, Database, DatabaseConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Inspect and dump SQLite databases.
#[derive(Debug, Parser)]
#[command(name = "ddlite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database location (file path, `:memory:` or `sqlite:` URL).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List user tables.
    Tables {
        /// Only list tables whose name matches this LIKE pattern.
        #[arg(long)]
        like: Option<String>,
    },

    /// Describe the columns of a table.
    Columns {
        /// Table name.
        table: String,

        /// Print JSON instead of a text table.
        #[arg(long)]
        json: bool,
    },

    /// Dump the schema and rows of one table, or of every table.
    Schema {
        /// Table name (all tables if not specified).
        table: Option<String>,
    },

    /// Drop a table.
    Drop {
        /// Table name.
        table: String,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Drop needs no connection in dry-run mode.
    if let Commands::Drop {
        ref table,
        dry_run: true,
    } = cli.command
    {
        println!("{}", Utility::new().drop_table(table.as_str()).query()?);
        return Ok(());
    }

    let config = DatabaseConfig::new(&cli.database).create_if_missing(false);
    let db = Database::connect_with(config).await?;

    match cli.command {
        Commands::Tables { like } => {
            for table in db.get_tables(like.as_deref()).await? {
                println!("{table}");
            }
        }

        Commands::Columns { table, json } => {
            let columns = db.get_columns(&table).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&columns)?);
            } else {
                print_columns(&columns);
            }
        }

        Commands::Schema { table } => {
            let dump = match table {
                Some(table) => db.get_table_schema(&table).await?,
                None => db.get_schema().await?,
            };
            println!("{dump}");
        }

        Commands::Drop { table, .. } => {
            let sql = Utility::new().drop_table(table.as_str()).query()?;
            db.execute_statement(&sql, Vec::new()).await?;
            info!(table = %table, "Table dropped");
        }
    }

    db.close().await;
    Ok(())
}

fn print_columns(columns: &[ColumnInfo]) {
    let width = columns
        .iter()
        .map(|column| column.field.len())
        .max()
        .unwrap_or(0)
        .max("Field".len());

    println!("{:<width$}  {:<16}  {:<4}  {:<16}  Key", "Field", "Type", "Null", "Default");
    for column in columns {
        println!(
            "{:<width$}  {:<16}  {:<4}  {:<16}  {}",
            column.field,
            column.data_type,
            if column.nullable { "YES" } else { "NO" },
            column.default.as_deref().unwrap_or("NULL"),
            column.key.map(|key| key.to_string()).unwrap_or_default(),
        );
    }
}
