//! passbook - search bank statement CSVs by keyword and date range
//!
//! Usage:
//!   passbook search --account axis --keyword coffee --from 01/01/2023 --to 31/12/2023
//!   passbook filter --file statement.csv --from 2023-03-01 --to 2023-03-31
//!   passbook accounts
//!   passbook init-config

use passbook::config::{init_config, load_config, DEFAULT_CONFIG_FILE};
use passbook::date::parse_input_date;
use passbook::render::{write_chart, write_results, OutputFormat};
use passbook::source::AnySource;
use passbook::{
    filter_statement_file, Query, SearchEngine, SearchOutcome, SearchRequest, ViewState,
};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Search bank statement CSVs")]
struct Cli {
    /// Config file (default: ./passbook.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the statements of one or more accounts
    Search {
        /// Account code to include; repeat for several accounts
        #[arg(short, long = "account")]
        accounts: Vec<String>,

        /// Case-insensitive text to look for in descriptions
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// First date to include (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Last date to include (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Directory or URL holding csvFiles/, overriding the config
        #[arg(long)]
        base: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also print debit/credit chart series as JSON
        #[arg(long)]
        chart: bool,
    },

    /// Filter a single statement file
    Filter {
        #[arg(long)]
        file: PathBuf,

        #[arg(short, long, default_value = "")]
        keyword: String,

        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[arg(long)]
        chart: bool,
    },

    /// List the configured account codes
    Accounts,

    /// Write a default passbook.toml
    InitConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_input_date(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    match cli.command {
        Command::Search {
            accounts,
            keyword,
            from,
            to,
            base,
            format,
            chart,
        } => {
            let request = SearchRequest {
                keyword,
                start: from,
                end: to,
                accounts,
            };
            search(cli.config, request, base, format, chart).await
        }

        Command::Filter {
            file,
            keyword,
            from,
            to,
            format,
            chart,
        } => {
            let cfg = load_config(cli.config.as_deref()).context("loading config")?;
            let query = Query::new(keyword, from, to)?;
            let results = filter_statement_file(&file, &query, &cfg.columns)
                .with_context(|| format!("filtering {}", file.display()))?;

            let state = ViewState::populated(1, Arc::new(results));
            print_state(&state, format, chart)
        }

        Command::Accounts => {
            let cfg = load_config(cli.config.as_deref()).context("loading config")?;
            let mut out = stdout().lock();
            for name in cfg.registry()?.names() {
                writeln!(out, "{}", name)?;
            }
            Ok(())
        }

        Command::InitConfig { path } => {
            if init_config(&path)? {
                println!("Wrote {}", path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
            Ok(())
        }
    }
}

async fn search(
    config: Option<PathBuf>,
    request: SearchRequest,
    base: Option<String>,
    format: OutputFormat,
    chart: bool,
) -> Result<()> {
    let cfg = load_config(config.as_deref()).context("loading config")?;
    let base = base.unwrap_or_else(|| cfg.base.clone());
    let source = AnySource::from_base(&base)?;
    let engine = SearchEngine::new(source, cfg.registry()?, cfg.columns.clone());
    let rx = engine.subscribe();

    match engine.search(&request).await {
        Ok(SearchOutcome::Completed(_)) => {}
        Ok(SearchOutcome::Superseded { generation }) => {
            bail!("search {} was superseded", generation)
        }
        Err(e) => return Err(e).context("search failed"),
    }

    let state = rx.borrow().clone();
    print_state(&state, format, chart)
}

fn print_state(state: &ViewState, format: OutputFormat, chart: bool) -> Result<()> {
    let mut out = stdout().lock();
    write_results(state, format, &mut out)?;
    if chart {
        write_chart(&state.results.chart(), &mut out)?;
    }

    if state.results.skipped > 0 {
        warn!(
            skipped = state.results.skipped,
            "Some statement rows were malformed and left out"
        );
    }
    Ok(())
}
