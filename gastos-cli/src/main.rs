use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gastos_core::{monthly_totals, parse_display_date, to_locale_currency};
use gastos_ingest::parse_statement_file;
use gastos_sync::{GatewayClient, ImportSession, submit_batch_with_progress};
use std::path::PathBuf;
use tracing::info;

mod config;
mod manual;
mod preview;
mod state;

#[derive(Parser, Debug)]
#[command(name = "gastos", version, about = "Import bank statements into your expense tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a C6 statement CSV, preview the drafts and optionally submit them
    Import {
        /// Path to the statement export (Windows-1252, `;`-separated)
        #[arg(long)]
        csv: PathBuf,

        /// Header lines to drop (default: config import.header_rows)
        #[arg(long)]
        header_rows: Option<usize>,

        /// Send every draft to the gateway after the preview
        #[arg(long)]
        submit: bool,

        /// List the rows that were left out and why
        #[arg(long)]
        show_skipped: bool,

        /// Print drafts as the JSON payloads that would be sent
        #[arg(long)]
        json: bool,
    },

    /// Stored expenses
    Expenses {
        #[command(subcommand)]
        command: ExpensesCommand,
    },

    /// Configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ExpensesCommand {
    /// List expenses, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Total spent per month
    Monthly,

    /// Create an expense by hand
    Add {
        #[command(flatten)]
        draft: manual::DraftArgs,
    },

    /// Replace a stored expense
    Edit {
        receipt_id: String,

        #[command(flatten)]
        draft: manual::DraftArgs,
    },

    /// Delete a stored expense
    Delete {
        receipt_id: String,

        /// The expense's date, DD/MM/YYYY
        #[arg(long)]
        date: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Import {
            csv,
            header_rows,
            submit,
            show_skipped,
            json,
        } => {
            let cfg = config::load_config()?;
            import(&cfg, csv, header_rows, submit, show_skipped, json).await?;
        }

        Command::Expenses { command } => {
            let cfg = config::load_config()?;
            let client = GatewayClient::new(cfg.gateway_url(), cfg.gateway_token());
            expenses(&client, command).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                println!("# effective gateway url: {}", cfg.gateway_url());
            }
        },
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn expenses(client: &GatewayClient, command: ExpensesCommand) -> Result<()> {
    match command {
        ExpensesCommand::List { limit } => {
            let expenses = client.list_expenses().await?;
            let shown = &expenses[..expenses.len().min(limit)];
            print!("{}", preview::render_expenses(shown));
            println!("\n{} of {} expenses", shown.len(), expenses.len());
        }
        ExpensesCommand::Monthly => {
            let months = monthly_totals(&client.list_expenses().await?);
            if months.is_empty() {
                println!("Not enough data for monthly totals.");
            } else {
                print!("{}", preview::render_monthly(&months));
            }
        }
        ExpensesCommand::Add { draft } => {
            let draft = manual::build_draft(&draft)?;
            client.create_expense(&draft).await?;
            info!(vendor = %draft.vendor, total = %draft.total, "expense created");
            println!("Created: {} {} {}", draft.date, draft.vendor, to_locale_currency(&draft.total));
        }
        ExpensesCommand::Edit { receipt_id, draft } => {
            let draft = manual::build_draft(&draft)?;
            client.update_expense(&receipt_id, &draft).await?;
            info!(%receipt_id, "expense updated");
            println!("Updated {receipt_id}: {} {} {}", draft.date, draft.vendor, to_locale_currency(&draft.total));
        }
        ExpensesCommand::Delete { receipt_id, date } => {
            let Some(date) = parse_display_date(&date) else {
                bail!("invalid date {date:?}: expected DD/MM/YYYY");
            };
            client.delete_expense(&receipt_id, date).await?;
            info!(%receipt_id, %date, "expense deleted");
            println!("Deleted {receipt_id}");
        }
    }
    Ok(())
}

async fn import(
    cfg: &config::Config,
    csv: PathBuf,
    header_rows: Option<usize>,
    submit: bool,
    show_skipped: bool,
    json: bool,
) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let header_rows = header_rows.unwrap_or(cfg.import.header_rows);

    let parsed = parse_statement_file(&csv, header_rows)
        .with_context(|| format!("parsing {}", csv.display()))?;
    let session = ImportSession::new().load(parsed);

    println!(
        "Parsed {} expenses from {} ({} rows skipped)\n",
        session.drafts().len(),
        csv.display(),
        session.skipped().len()
    );

    if session.drafts().is_empty() {
        println!("No valid expenses found: the file was read but had no importable rows.");
    } else if json {
        println!("{}", serde_json::to_string_pretty(session.drafts())?);
    } else {
        print!("{}", preview::render_drafts(session.drafts()));
    }

    if show_skipped && !session.skipped().is_empty() {
        println!("\nSkipped rows:");
        print!("{}", preview::render_skipped(session.skipped()));
    }

    if !submit {
        if !session.drafts().is_empty() {
            println!("\nNext: re-run with --submit to send these expenses.");
        }
        return Ok(());
    }

    let submission = match session.begin_submit() {
        Ok(s) => s,
        Err(_) => {
            println!("\nNothing to submit.");
            return Ok(());
        }
    };

    let client = GatewayClient::new(cfg.gateway_url(), cfg.gateway_token());
    println!("\nSending {} expenses to {} ...", submission.drafts().len(), client.expenses_url());
    info!(count = submission.drafts().len(), url = %client.expenses_url(), "submitting statement drafts");

    let report = submit_batch_with_progress(
        submission.drafts(),
        |draft| client.create_expense(draft),
        |done, total| eprint!("\r{done}/{total}"),
    )
    .await;
    eprintln!();
    info!(
        succeeded = report.result.succeeded,
        failed = report.result.failed,
        "statement submission finished"
    );

    let session = submission.finish(report);
    if let Some(report) = session.report() {
        print!("{}", preview::render_report(report));
    }

    Ok(())
}
