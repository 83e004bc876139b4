use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{format_cents, CashDrawerEntry, Period, ReportSummary, VaultMovement};

/// Everything the session holds, for a one-way JSON download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub cash_entries: Vec<CashDrawerEntry>,
    pub vault_movements: Vec<VaultMovement>,
    pub report_summaries: Vec<ReportSummary>,
}

/// Writes the session tables as CSV or JSON. Amounts are written as
/// decimal strings ("100.00"), the way the tables show them.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export the cash drawer table to CSV
    pub async fn export_cash_entries_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.service.cash_entries().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "sequence",
            "date",
            "operator",
            "drawer",
            "sale_type",
            "bill_payment",
            "withdrawal",
            "deposit",
            "inflow",
            "outflow",
            "closing_balance",
            "lottery_ticket_sales",
            "scratch_card_sales",
            "lottery_ticket_stock",
            "scratch_card_stock",
        ])?;

        for entry in &entries {
            csv_writer.write_record([
                entry.sequence.to_string(),
                entry.date.to_string(),
                entry.operator.clone(),
                entry.drawer.as_str().to_string(),
                entry.sale_type.as_str().to_string(),
                format_cents(entry.bill_payment_amount),
                format_cents(entry.withdrawal_amount),
                format_cents(entry.deposit_amount),
                format_cents(entry.inflow_amount),
                format_cents(entry.outflow_amount),
                format_cents(entry.closing_balance),
                entry.lottery_ticket_sales.to_string(),
                entry.scratch_card_sales.to_string(),
                entry.lottery_ticket_stock.to_string(),
                entry.scratch_card_stock.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(entries.len())
    }

    /// Export the vault table to CSV
    pub async fn export_vault_movements_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let movements = self.service.vault_movements().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "sequence",
            "date",
            "description",
            "type",
            "inflow",
            "outflow",
            "balance",
        ])?;

        for movement in &movements {
            csv_writer.write_record([
                movement.sequence.to_string(),
                movement.date.to_string(),
                movement.description.clone(),
                movement.movement_type.as_str().to_string(),
                format_cents(movement.inflow_amount),
                format_cents(movement.outflow_amount),
                format_cents(movement.running_balance),
            ])?;
        }

        csv_writer.flush()?;
        Ok(movements.len())
    }

    /// Export the per-date chart series to CSV
    pub async fn export_chart_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let points = self.service.chart().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "total_inflow", "total_outflow"])?;
        for point in &points {
            csv_writer.write_record([
                point.date.to_string(),
                format_cents(point.totals.total_inflow),
                format_cents(point.totals.total_outflow),
            ])?;
        }

        csv_writer.flush()?;
        Ok(points.len())
    }

    /// Export the report table for a period to CSV
    pub async fn export_report_csv<W: Write>(&self, period: Period, writer: W) -> Result<usize> {
        let report = self.service.report(period).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["period", "total_inflow", "total_outflow", "closing_balance"])?;
        for summary in &report.summaries {
            csv_writer.write_record([
                summary.period.as_str().to_string(),
                format_cents(summary.total_inflow),
                format_cents(summary.total_outflow),
                format_cents(summary.closing_balance),
            ])?;
        }

        csv_writer.flush()?;
        Ok(report.summaries.len())
    }

    /// Export the whole session as a JSON snapshot
    pub async fn export_session_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let cash_entries = self.service.cash_entries().await?;
        let vault_movements = self.service.vault_movements().await?;
        let report_summaries = self.service.report(Period::default()).await?.summaries;

        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            cash_entries,
            vault_movements,
            report_summaries,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
