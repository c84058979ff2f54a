use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{info, warn};

use quote_cli::config::{DEFAULT_CONFIG_FILE, QuoteConfig};
use quote_cli::exporter::TextDocumentExporter;
use quote_cli::session::{HELP, Session};
use quote_cli::utils::parse_assignment;
use quote_cli::{app, csv_loader, logging};
use quote_core::flow::FormController;
use quote_core::{AnswerRecord, Field};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Motor insurance quotation.
///
/// Prices a policy from coverage, vehicle value and usage, and walks through
/// the four-step quote form with saved drafts and document export.
#[derive(Debug, Parser)]
#[command(name = "motor-quote", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Draft store backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Draft store connection string; for SQLite a file path or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Directory quote documents are written to.
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Log level or filter directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the annual premium.
    Quote {
        #[arg(long, default_value = "")]
        coverage: String,

        #[arg(long, default_value = "")]
        value: String,

        #[arg(long, default_value = "")]
        usage: String,

        /// Also print the monthly figure and savings.
        #[arg(long)]
        summary: bool,
    },

    /// Validate one step and print the error map as JSON.
    Validate {
        #[arg(long)]
        step: u8,

        /// Answer as `<field>=<value>`; repeatable.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(Field, String)>,
    },

    /// Fill in the form step by step.
    Interactive,

    /// Quote every row of a CSV file.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },

    /// Inspect or discard the saved draft.
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Debug, Subcommand)]
enum DraftAction {
    Show,
    Clear,
}

fn parse_field(s: &str) -> Result<(Field, String), String> {
    parse_assignment(s).map_err(|e| e.to_string())
}

// ─── configuration ───────────────────────────────────────────────────────────

fn resolve_config(cli: &Cli) -> anyhow::Result<QuoteConfig> {
    let mut config = QuoteConfig::load(&cli.config)?;

    if let Some(backend) = &cli.backend {
        config.store.backend = backend.clone();
    }
    if let Some(db) = &cli.db {
        config.store.connection_string = db.clone();
    }
    if let Some(dir) = &cli.export_dir {
        config.export.directory = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Quote {
            coverage,
            value,
            usage,
            summary,
        } => {
            let record = AnswerRecord::new()
                .with(Field::CoverageType, coverage)
                .with(Field::VehicleValue, value)
                .with(Field::VehicleUsage, usage);
            println!("{}", app::quote_report(&record, summary));
        }

        Command::Validate { step, fields } => {
            let record = fields
                .into_iter()
                .fold(AnswerRecord::new(), |record, (field, value)| record.with(field, value));
            println!("{}", app::validation_report(step, &record)?);
        }

        Command::Batch { file } => {
            let records = csv_loader::load_from_file(&file)
                .with_context(|| format!("cannot load answers from '{}'", file.display()))?;
            info!(rows = records.len(), "quoting batch");
            print!("{}", app::render_batch(&app::quote_batch(&records)));
        }

        Command::Draft { action } => {
            let store = app::open_store(&config.store_config()).await?;
            match action {
                DraftAction::Show => println!("{}", app::show_draft(&store).await?),
                DraftAction::Clear => {
                    app::discard_draft(&store).await?;
                    println!("Saved draft cleared.");
                }
            }
        }

        Command::Interactive => {
            let store = app::open_store(&config.store_config()).await?;
            let mut form = FormController::new(store);
            match form.restore().await {
                Ok(true) => println!("Restored saved progress."),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "saved draft could not be restored, starting fresh"),
            }

            println!("{HELP}\n");
            let exporter = TextDocumentExporter::new(&config.export.directory)
                .context("cannot load the quote document template")?;
            let mut session = Session::new(form, exporter);
            session
                .run(BufReader::new(tokio::io::stdin()), &mut std::io::stdout())
                .await?;
        }
    }

    Ok(())
}
