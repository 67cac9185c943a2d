//! ddlforge CLI
//!
//! Renders DDL from schema metadata documents and compares them against
//! introspected catalog snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use ddlforge_core::{
    diff_schema, migration_sql, render_metadata, DatabaseSchema, Dialect, GeneratedSchema,
    Introspect, MigrationOptions, SchemaDiff, SchemaMetadata,
};

/// Dialect-aware DDL rendering and schema drift detection.
#[derive(Parser)]
#[command(name = "ddlforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect (postgres, mysql, mariadb).
    #[arg(short, long, global = true, env = "DDLFORGE_DIALECT", default_value = "postgres")]
    dialect: Dialect,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full DDL for a metadata document.
    Render {
        /// Schema metadata JSON file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Write the DDL here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare a metadata document with a catalog snapshot and print the
    /// migration SQL.
    Diff {
        /// Schema metadata JSON file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Introspected catalog JSON file.
        #[arg(short, long)]
        live: PathBuf,

        /// Print the diff as JSON instead of a summary.
        #[arg(long)]
        json: bool,

        /// Render ALTER and CREATE INDEX statements instead of TODO comments.
        #[arg(long)]
        emit_statements: bool,
    },

    /// Exit with status 1 when the catalog snapshot is out of date.
    Check {
        /// Schema metadata JSON file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Introspected catalog JSON file.
        #[arg(short, long)]
        live: PathBuf,
    },
}

/// A catalog snapshot dumped to JSON by an external introspection job.
struct CatalogSnapshot {
    contents: String,
}

impl CatalogSnapshot {
    fn open(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog snapshot {}", path.display()))?;
        Ok(Self { contents })
    }
}

impl Introspect for CatalogSnapshot {
    type Error = serde_json::Error;

    fn introspect_schema(&self) -> Result<DatabaseSchema, Self::Error> {
        serde_json::from_str(&self.contents)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn load_schema(path: &Path) -> anyhow::Result<GeneratedSchema> {
    let meta: SchemaMetadata = read_json(path)?;
    debug!(
        tables = meta.tables.len(),
        fields = meta.fields.len(),
        "loaded schema metadata"
    );
    Ok(GeneratedSchema::from_metadata(&meta))
}

fn load_diff(
    schema: &Path,
    live: &Path,
    dialect: Dialect,
) -> anyhow::Result<(GeneratedSchema, SchemaDiff)> {
    let generated = load_schema(schema)?;
    let snapshot = CatalogSnapshot::open(live)?;
    let catalog = snapshot
        .introspect_schema()
        .with_context(|| format!("invalid catalog snapshot {}", live.display()))?;
    let diff = diff_schema(&generated, &catalog, dialect);
    Ok((generated, diff))
}

fn render_command(schema: &Path, dialect: Dialect) -> anyhow::Result<String> {
    let meta: SchemaMetadata = read_json(schema)?;
    let sql = render_metadata(&meta, dialect)
        .with_context(|| format!("failed to render {} for {dialect}", schema.display()))?;
    Ok(sql)
}

fn diff_command(
    schema: &Path,
    live: &Path,
    dialect: Dialect,
    json: bool,
    options: MigrationOptions,
) -> anyhow::Result<String> {
    let (generated, diff) = load_diff(schema, live, dialect)?;

    let mut out = if json {
        let mut text = serde_json::to_string_pretty(&diff)?;
        text.push('\n');
        text
    } else {
        diff.to_string()
    };
    if diff.has_changes() {
        let statements = migration_sql(&diff, &generated, dialect, options)
            .context("failed to generate migration SQL")?;
        out.push('\n');
        for statement in statements {
            out.push_str(&statement);
            out.push('\n');
        }
    }
    Ok(out)
}

fn check_command(schema: &Path, live: &Path, dialect: Dialect) -> anyhow::Result<bool> {
    let (_, diff) = load_diff(schema, live, dialect)?;
    Ok(!diff.has_changes())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let dialect = cli.dialect;
    match cli.command {
        Commands::Render { schema, output } => {
            let sql = render_command(&schema, dialect)?;
            match output {
                Some(path) => {
                    fs::write(&path, sql)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Wrote {dialect} DDL to {}", path.display());
                }
                None => print!("{sql}"),
            }
        }

        Commands::Diff {
            schema,
            live,
            json,
            emit_statements,
        } => {
            let options = MigrationOptions {
                emit_column_statements: emit_statements,
            };
            print!("{}", diff_command(&schema, &live, dialect, json, options)?);
        }

        Commands::Check { schema, live } => {
            if !check_command(&schema, &live, dialect)? {
                info!("Schema drift detected; run `ddlforge diff` for details.");
                return Ok(ExitCode::FAILURE);
            }
            info!("Schema is up to date.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
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
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli)
}
