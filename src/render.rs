//! Read-only output of a [`ViewState`]'s Result Set.

use crate::engine::ViewState;
use crate::filter::{ChartSeries, ResultSet};

use clap::ValueEnum;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

const HEADER: [&str; 5] = ["Date", "Description", "Debit", "Credit", "Balance"];

/// Sums of the debit and credit cells that read as numbers. Cells such as
/// `150 Dr` or `-` still appear in the table but add nothing here.
pub fn totals(results: &ResultSet) -> (Decimal, Decimal) {
    results
        .rows
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), row| {
            (
                debit + row.debit_amount().unwrap_or(Decimal::ZERO),
                credit + row.credit_amount().unwrap_or(Decimal::ZERO),
            )
        })
}

fn amount_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn render_table(results: &ResultSet) -> Table {
    let mut table = Table::new();
    table.set_header(HEADER.to_vec());

    for row in &results.rows {
        table.add_row(vec![
            Cell::new(&row.raw_date),
            Cell::new(&row.description),
            amount_cell(&row.debit),
            amount_cell(&row.credit),
            amount_cell(&row.balance),
        ]);
    }

    let (debit, credit) = totals(results);
    table.add_row(vec![
        Cell::new(""),
        Cell::new(format!("Total ({} rows)", results.len())),
        amount_cell(&debit.to_string()),
        amount_cell(&credit.to_string()),
        Cell::new(""),
    ]);

    table
}

pub fn write_csv<W: Write>(results: &ResultSet, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for row in &results.rows {
        wtr.write_record([
            &row.raw_date,
            &row.description,
            &row.debit,
            &row.credit,
            &row.balance,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_results<W: Write>(
    state: &ViewState,
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    let results = &state.results;
    match format {
        OutputFormat::Table => {
            if results.is_empty() {
                writeln!(writer, "No matching transactions")?;
            } else {
                writeln!(writer, "{}", render_table(results))?;
            }
        }
        OutputFormat::Csv => write_csv(results, &mut writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &**results)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Chart series for an external grouped-bar renderer.
pub fn write_chart<W: Write>(chart: &ChartSeries, mut writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, chart)?;
    writeln!(writer)?;
    Ok(())
}
