use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use paddy_cli::store::StateStore;
use paddy_cli::{csv_loader, report};
use paddy_core::models::{AnalysisMode, CalculationMode, CostType, InputMethod};
use paddy_core::state::{CalculatorEvent, CalculatorState, RowField};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Rice production cost calculator.
///
/// Keeps a cost table and farm parameters in a local state file, computes
/// per-rai and per-kilogram economics, and prints a formatted report.
#[derive(Debug, Parser)]
#[command(name = "paddy")]
struct Cli {
    /// Path of the saved calculator state.
    #[arg(long, default_value = "paddy.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the cost table, parameters, and mode selections.
    Show,

    /// Add a cost row.
    Add {
        /// Category label for the new row.
        category: String,

        /// Lump cost (simple input method).
        #[arg(long)]
        cost: Option<Decimal>,

        /// Quantity (detailed input method).
        #[arg(long)]
        quantity: Option<Decimal>,

        /// Unit for the quantity, free text (kg, bags, hours).
        #[arg(long)]
        unit: Option<String>,

        /// Price per unit (detailed input method).
        #[arg(long)]
        unit_price: Option<Decimal>,

        /// Mark the row as a fixed cost (advanced analysis).
        #[arg(long)]
        fixed: bool,
    },

    /// Remove a cost row by its number in `show` output.
    Remove { row: usize },

    /// Edit fields of an existing row; omitted fields are left unchanged.
    Edit {
        /// Row number in `show` output.
        row: usize,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        cost: Option<Decimal>,

        #[arg(long)]
        quantity: Option<Decimal>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        unit_price: Option<Decimal>,

        /// `variable` or `fixed`.
        #[arg(long)]
        cost_type: Option<String>,
    },

    /// Set farm-level parameters; omitted parameters are left unchanged.
    Set {
        /// Cultivated area in rai.
        #[arg(long)]
        area: Option<Decimal>,

        /// Expected yield in tons.
        #[arg(long = "yield")]
        yield_tons: Option<Decimal>,

        /// Expected selling price in baht per ton.
        #[arg(long)]
        price_per_ton: Option<Decimal>,
    },

    /// Select the input method, calculation mode, or analysis mode.
    Mode {
        /// `simple` or `detailed`.
        #[arg(long)]
        input: Option<String>,

        /// `perArea` or `total`.
        #[arg(long)]
        calculation: Option<String>,

        /// `basic` or `advanced`.
        #[arg(long)]
        analysis: Option<String>,
    },

    /// Compute and print the cost summary.
    Calculate,

    /// Compute the summary and print the full dated report.
    Report,

    /// Bulk-load cost rows from a CSV file.
    Import {
        file: PathBuf,

        /// Replace the existing rows instead of appending.
        #[arg(long)]
        replace: bool,
    },

    /// Discard the saved state and return to the default cost table.
    Reset,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── command handling ────────────────────────────────────────────────────────

/// Row-field events for the options the user actually passed.
fn collect_fields(
    category: Option<String>,
    cost: Option<Decimal>,
    quantity: Option<Decimal>,
    unit: Option<String>,
    unit_price: Option<Decimal>,
) -> Vec<RowField> {
    let mut fields = Vec::new();
    if let Some(value) = category {
        fields.push(RowField::Category(value));
    }
    if let Some(value) = cost {
        fields.push(RowField::SimpleCost(Some(value)));
    }
    if let Some(value) = quantity {
        fields.push(RowField::Quantity(Some(value)));
    }
    if let Some(value) = unit {
        fields.push(RowField::Unit(Some(value)));
    }
    if let Some(value) = unit_price {
        fields.push(RowField::UnitPrice(Some(value)));
    }
    fields
}

fn apply_fields(
    mut state: CalculatorState,
    index: usize,
    fields: Vec<RowField>,
) -> CalculatorState {
    for field in fields {
        state = state.apply(CalculatorEvent::EditRow { index, field });
    }
    state
}

/// Maps a 1-based row number from `show` output to a table index.
fn row_index(
    state: &CalculatorState,
    row: usize,
) -> Result<usize> {
    if row == 0 || row > state.rows.len() {
        bail!("no row {row} (the table has {} rows)", state.rows.len());
    }
    Ok(row - 1)
}

fn run(cli: Cli) -> Result<()> {
    let store = StateStore::new(&cli.state);

    match cli.command {
        Command::Show => {
            let state = store.load();
            print!("{}", report::render_table(&state));
        }

        Command::Add {
            category,
            cost,
            quantity,
            unit,
            unit_price,
            fixed,
        } => {
            let mut state = store.load().apply(CalculatorEvent::AddRow { category });
            let index = state.rows.len() - 1;
            state = apply_fields(state, index, collect_fields(None, cost, quantity, unit, unit_price));
            if fixed {
                state = state.apply(CalculatorEvent::EditRow {
                    index,
                    field: RowField::CostType(CostType::Fixed),
                });
            }
            store.save(&state)?;
            println!("Added row {}.", index + 1);
        }

        Command::Remove { row } => {
            let mut state = store.load();
            let index = row_index(&state, row)?;
            state = state.apply(CalculatorEvent::RemoveRow { index });
            store.save(&state)?;
            println!("Removed row {row}.");
        }

        Command::Edit {
            row,
            category,
            cost,
            quantity,
            unit,
            unit_price,
            cost_type,
        } => {
            let mut state = store.load();
            let index = row_index(&state, row)?;
            state = apply_fields(
                state,
                index,
                collect_fields(category, cost, quantity, unit, unit_price),
            );
            if let Some(token) = cost_type {
                let parsed = CostType::parse(&token).ok_or_else(|| {
                    anyhow!("unknown cost type '{token}' (expected 'variable' or 'fixed')")
                })?;
                state = state.apply(CalculatorEvent::EditRow {
                    index,
                    field: RowField::CostType(parsed),
                });
            }
            store.save(&state)?;
            println!("Updated row {row}.");
        }

        Command::Set {
            area,
            yield_tons,
            price_per_ton,
        } => {
            let mut state = store.load();
            if let Some(value) = area {
                state = state.apply(CalculatorEvent::SetArea(Some(value)));
            }
            if let Some(value) = yield_tons {
                state = state.apply(CalculatorEvent::SetYield(Some(value)));
            }
            if let Some(value) = price_per_ton {
                state = state.apply(CalculatorEvent::SetPricePerTon(Some(value)));
            }
            store.save(&state)?;
            println!("Parameters updated.");
        }

        Command::Mode {
            input,
            calculation,
            analysis,
        } => {
            let mut state = store.load();
            if let Some(token) = input {
                let method = InputMethod::parse(&token).ok_or_else(|| {
                    anyhow!("unknown input method '{token}' (expected 'simple' or 'detailed')")
                })?;
                state = state.apply(CalculatorEvent::SetInputMethod(method));
            }
            if let Some(token) = calculation {
                let mode = CalculationMode::parse(&token).ok_or_else(|| {
                    anyhow!("unknown calculation mode '{token}' (expected 'perArea' or 'total')")
                })?;
                state = state.apply(CalculatorEvent::SetCalculationMode(mode));
            }
            if let Some(token) = analysis {
                let mode = AnalysisMode::parse(&token).ok_or_else(|| {
                    anyhow!("unknown analysis mode '{token}' (expected 'basic' or 'advanced')")
                })?;
                state = state.apply(CalculatorEvent::SetAnalysisMode(mode));
            }
            store.save(&state)?;
            println!(
                "Input method: {}, calculation: {}, analysis: {}.",
                state.input_method.as_str(),
                state.calculation_mode.as_str(),
                state.analysis_mode.as_str(),
            );
        }

        Command::Calculate => {
            let mut state = store.load();
            let summary = state.calculate()?;
            print!("{}", report::render_summary(&summary));
            println!();
            println!("Cost breakdown");
            print!("{}", report::render_chart(&summary.categories));
        }

        Command::Report => {
            let mut state = store.load();
            state.calculate()?;
            print!("{}", report::render_report(&state, Local::now())?);
        }

        Command::Import { file, replace } => {
            let rows = csv_loader::load_from_file(&file)?;
            let count = rows.len();
            let mut state = store.load();
            if replace {
                state.rows.clear();
            }
            state.append_rows(rows);
            store.save(&state)?;
            println!("Imported {count} rows from '{}'.", file.display());
        }

        Command::Reset => {
            store.clear()?;
            println!("Cleared saved state; the next command starts from the default cost table.");
        }
    }

    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(state = %cli.state.display(), "using state file");

    run(cli)
}
