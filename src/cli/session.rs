use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use crate::application::{AppError, CashEntryForm, LedgerService, VaultMovementForm};
use crate::config::DisplayConfig;
use crate::domain::{
    format_cents, parse_amount, Cents, DrawerId, MovementType, Period, SaleType,
};
use crate::io::Exporter;

use super::render;

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(name = "loterica", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Cash drawer tab
    #[command(subcommand, alias = "caixa")]
    Cash(CashCommands),

    /// Vault tab
    #[command(subcommand, alias = "cofre")]
    Vault(VaultCommands),

    /// Inflow and outflow per day
    Chart {
        /// Output format: table, json, csv (default: bar chart)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Reports tab
    #[command(alias = "relatorios")]
    Report {
        /// Period: daily, weekly, monthly
        #[arg(short, long, default_value = "daily")]
        period: Period,

        /// Output format: table, json, csv
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write a session table to a file
    Export {
        /// What to export
        #[arg(value_enum)]
        target: ExportTarget,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Period for the report export
        #[arg(short, long, default_value = "daily")]
        period: Period,
    },

    /// Show how many records the session holds
    Status,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum CashCommands {
    /// Record a cash drawer entry
    Add {
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Operator name
        #[arg(short, long)]
        operator: String,

        /// Drawer: drawer1, drawer2, internal
        #[arg(short, long)]
        drawer: DrawerId,

        /// Sale type: bill-payment, withdrawal, deposit, other
        #[arg(long, default_value = "other")]
        sale_type: SaleType,

        /// Bill payments taken (e.g. "150.00")
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        bill_payment: Cents,

        /// Withdrawals paid out
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        withdrawal: Cents,

        /// Deposits taken
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        deposit: Cents,

        /// Total cash in
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        inflow: Cents,

        /// Total cash out
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        outflow: Cents,

        /// Cash counted at close
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        closing: Cents,

        /// Lottery tickets (bolão) sold
        #[arg(long, default_value_t = 0)]
        lottery_sales: u32,

        /// Scratch cards (raspadinha) sold
        #[arg(long, default_value_t = 0)]
        scratch_sales: u32,

        /// Lottery tickets in stock
        #[arg(long, default_value_t = 0)]
        lottery_stock: u32,

        /// Scratch cards in stock
        #[arg(long, default_value_t = 0)]
        scratch_stock: u32,
    },

    /// Show the cash drawer table
    List {
        /// Output format: table, json, csv
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
enum VaultCommands {
    /// Record a vault movement
    Add {
        /// Movement date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// What the movement was for
        #[arg(short, long, default_value = "")]
        description: String,

        /// Movement type: inflow, outflow
        #[arg(short = 't', long = "type")]
        movement_type: MovementType,

        /// Amount (e.g. "50.00" or "50")
        #[arg(short, long, value_parser = parse_amount)]
        amount: Cents,
    },

    /// Show the vault table
    List {
        /// Output format: table, json, csv
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportTarget {
    Cash,
    Vault,
    Chart,
    Report,
    /// All tables as one JSON document
    Session,
}

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session over one ledger.
///
/// Each line is handled to completion before the next is read. Commands
/// that append a record re-render the affected table straight away.
pub struct Session<'a, W: Write> {
    service: &'a LedgerService,
    display: &'a DisplayConfig,
    out: W,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(service: &'a LedgerService, display: &'a DisplayConfig, out: W) -> Self {
        Self {
            service,
            display,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `quit` or end of input. Returns the number of
    /// lines read.
    pub async fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<usize> {
        info!("Session started");
        if prompt {
            writeln!(
                self.out,
                "Lottery cash management. Tabs: cash, vault, report. Type 'help' for commands."
            )?;
        }

        let mut handled = 0;
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "loterica> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read session input")?;
            handled += 1;
            if self.execute_line(&line).await? == Flow::Quit {
                break;
            }
        }

        info!(lines = handled, "Session ended");
        Ok(handled)
    }

    /// Handle one line. Bad input and rejected submissions are reported on
    /// the session output; only storage and output failures are returned.
    pub async fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(message) => {
                writeln!(self.out, "Error: {}", message)?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() || words[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                write!(self.out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(command = ?parsed.command, "Executing session command");

        match self.dispatch(parsed.command).await {
            Ok(flow) => Ok(flow),
            Err(e) => match e.downcast_ref::<AppError>() {
                Some(AppError::InvalidRecord { .. }) => {
                    writeln!(self.out, "Error: {}", e)?;
                    Ok(Flow::Continue)
                }
                _ => Err(e),
            },
        }
    }

    async fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Cash(cmd) => self.run_cash_command(cmd).await?,
            SessionCommand::Vault(cmd) => self.run_vault_command(cmd).await?,
            SessionCommand::Chart { format } => self.run_chart_command(format).await?,
            SessionCommand::Report { period, format } => {
                self.run_report_command(period, format).await?
            }
            SessionCommand::Export {
                target,
                output,
                period,
            } => self.run_export_command(target, &output, period).await?,
            SessionCommand::Status => {
                let status = self.service.status().await?;
                render::status(&mut self.out, &status)?;
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn run_cash_command(&mut self, cmd: CashCommands) -> Result<()> {
        match cmd {
            CashCommands::Add {
                date,
                operator,
                drawer,
                sale_type,
                bill_payment,
                withdrawal,
                deposit,
                inflow,
                outflow,
                closing,
                lottery_sales,
                scratch_sales,
                lottery_stock,
                scratch_stock,
            } => {
                let form = CashEntryForm {
                    date: date.unwrap_or_else(today),
                    operator,
                    drawer,
                    sale_type,
                    bill_payment_amount: bill_payment,
                    withdrawal_amount: withdrawal,
                    deposit_amount: deposit,
                    inflow_amount: inflow,
                    outflow_amount: outflow,
                    closing_balance: closing,
                    lottery_ticket_sales: lottery_sales,
                    scratch_card_sales: scratch_sales,
                    lottery_ticket_stock: lottery_stock,
                    scratch_card_stock: scratch_stock,
                };
                let entry = self.service.record_cash_entry(form).await?;
                writeln!(
                    self.out,
                    "Saved cash drawer entry #{} ({}, {})",
                    entry.sequence, entry.drawer, entry.operator
                )?;

                let entries = self.service.cash_entries().await?;
                render::cash_table(&mut self.out, self.display, &entries)?;
            }

            CashCommands::List { format } => match format {
                OutputFormat::Table => {
                    let entries = self.service.cash_entries().await?;
                    render::cash_table(&mut self.out, self.display, &entries)?;
                }
                OutputFormat::Json => {
                    let entries = self.service.cash_entries().await?;
                    writeln!(self.out, "{}", serde_json::to_string_pretty(&entries)?)?;
                }
                OutputFormat::Csv => {
                    Exporter::new(self.service)
                        .export_cash_entries_csv(&mut self.out)
                        .await?;
                }
            },
        }
        Ok(())
    }

    async fn run_vault_command(&mut self, cmd: VaultCommands) -> Result<()> {
        match cmd {
            VaultCommands::Add {
                date,
                description,
                movement_type,
                amount,
            } => {
                let form = VaultMovementForm::new(
                    date.unwrap_or_else(today),
                    description,
                    movement_type,
                    amount,
                );
                let movement = self.service.record_vault_movement(form).await?;
                writeln!(
                    self.out,
                    "Saved vault movement #{} ({} {})",
                    movement.sequence,
                    movement.movement_type,
                    format_cents(movement.amount())
                )?;

                let movements = self.service.vault_movements().await?;
                render::vault_table(&mut self.out, self.display, &movements)?;
            }

            VaultCommands::List { format } => match format {
                OutputFormat::Table => {
                    let movements = self.service.vault_movements().await?;
                    render::vault_table(&mut self.out, self.display, &movements)?;
                }
                OutputFormat::Json => {
                    let movements = self.service.vault_movements().await?;
                    writeln!(self.out, "{}", serde_json::to_string_pretty(&movements)?)?;
                }
                OutputFormat::Csv => {
                    Exporter::new(self.service)
                        .export_vault_movements_csv(&mut self.out)
                        .await?;
                }
            },
        }
        Ok(())
    }

    async fn run_chart_command(&mut self, format: Option<OutputFormat>) -> Result<()> {
        match format {
            None => {
                let points = self.service.chart().await?;
                render::chart(&mut self.out, self.display, &points)?;
            }
            Some(OutputFormat::Table) => {
                let points = self.service.chart().await?;
                render::chart_table(&mut self.out, &points)?;
            }
            Some(OutputFormat::Json) => {
                let points = self.service.chart().await?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&points)?)?;
            }
            Some(OutputFormat::Csv) => {
                Exporter::new(self.service)
                    .export_chart_csv(&mut self.out)
                    .await?;
            }
        }
        Ok(())
    }

    async fn run_report_command(&mut self, period: Period, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => {
                let report = self.service.report(period).await?;
                render::report_table(&mut self.out, &report)?;
            }
            OutputFormat::Json => {
                let report = self.service.report(period).await?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
            OutputFormat::Csv => {
                Exporter::new(self.service)
                    .export_report_csv(period, &mut self.out)
                    .await?;
            }
        }
        Ok(())
    }

    async fn run_export_command(
        &mut self,
        target: ExportTarget,
        output: &Path,
        period: Period,
    ) -> Result<()> {
        // Report a bad path and keep the session going
        let file = match File::create(output) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %output.display(), error = %e, "Export failed");
                writeln!(
                    self.out,
                    "Error: failed to create output file {}: {}",
                    output.display(),
                    e
                )?;
                return Ok(());
            }
        };
        let exporter = Exporter::new(self.service);

        match target {
            ExportTarget::Cash => {
                let count = exporter.export_cash_entries_csv(file).await?;
                writeln!(self.out, "Exported {} cash drawer entries", count)?;
            }
            ExportTarget::Vault => {
                let count = exporter.export_vault_movements_csv(file).await?;
                writeln!(self.out, "Exported {} vault movements", count)?;
            }
            ExportTarget::Chart => {
                let count = exporter.export_chart_csv(file).await?;
                writeln!(self.out, "Exported {} chart days", count)?;
            }
            ExportTarget::Report => {
                let count = exporter.export_report_csv(period, file).await?;
                writeln!(self.out, "Exported {} report rows ({})", count, period)?;
            }
            ExportTarget::Session => {
                let snapshot = exporter.export_session_json(file).await?;
                writeln!(
                    self.out,
                    "Exported session: {} cash drawer entries, {} vault movements",
                    snapshot.cash_entries.len(),
                    snapshot.vault_movements.len()
                )?;
            }
        }
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Split a command line into words. Single and double quotes group words
/// ("--operator 'Ana Maria'"); there are no escapes.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
