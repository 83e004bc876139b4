use std::io::Write;

use anyhow::Result;

use crate::application::{ReportView, SessionStatus};
use crate::config::DisplayConfig;
use crate::domain::{format_cents, CashDrawerEntry, ChartPoint, Cents, VaultMovement};

pub fn cash_table<W: Write>(
    out: &mut W,
    display: &DisplayConfig,
    entries: &[CashDrawerEntry],
) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No cash drawer entries yet.")?;
        return Ok(());
    }

    writeln!(out, "Cash drawers (amounts in {})", display.currency)?;
    writeln!(
        out,
        "{:>3} {:<10} {:<14} {:<15} {:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>7} {:>7} {:>7} {:>7}",
        "#",
        "DATE",
        "OPERATOR",
        "DRAWER",
        "SALE TYPE",
        "BILLS",
        "WITHDRAW",
        "DEPOSIT",
        "INFLOW",
        "OUTFLOW",
        "CLOSING",
        "BOL.S",
        "RASP.S",
        "BOL.ST",
        "RASP.ST"
    )?;
    writeln!(out, "{}", "-".repeat(163))?;
    for entry in entries {
        writeln!(
            out,
            "{:>3} {:<10} {:<14} {:<15} {:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>7} {:>7} {:>7} {:>7}",
            entry.sequence,
            entry.date.format("%Y-%m-%d"),
            truncate(&entry.operator, 14),
            entry.drawer.label(),
            entry.sale_type.as_str(),
            format_cents(entry.bill_payment_amount),
            format_cents(entry.withdrawal_amount),
            format_cents(entry.deposit_amount),
            format_cents(entry.inflow_amount),
            format_cents(entry.outflow_amount),
            format_cents(entry.closing_balance),
            entry.lottery_ticket_sales,
            entry.scratch_card_sales,
            entry.lottery_ticket_stock,
            entry.scratch_card_stock,
        )?;
    }
    Ok(())
}

pub fn vault_table<W: Write>(
    out: &mut W,
    display: &DisplayConfig,
    movements: &[VaultMovement],
) -> Result<()> {
    if movements.is_empty() {
        writeln!(out, "No vault movements yet.")?;
        return Ok(());
    }

    writeln!(out, "Vault (amounts in {})", display.currency)?;
    writeln!(
        out,
        "{:>3} {:<10} {:<30} {:>12} {:>12} {:>12}",
        "#", "DATE", "DESCRIPTION", "INFLOW", "OUTFLOW", "BALANCE"
    )?;
    writeln!(out, "{}", "-".repeat(84))?;
    for movement in movements {
        writeln!(
            out,
            "{:>3} {:<10} {:<30} {:>12} {:>12} {:>12}",
            movement.sequence,
            movement.date.format("%Y-%m-%d"),
            truncate(&movement.description, 30),
            format_cents(movement.inflow_amount),
            format_cents(movement.outflow_amount),
            format_cents(movement.running_balance),
        )?;
    }
    Ok(())
}

/// Horizontal bars of inflow (`#`) and outflow (`=`) per date, scaled so
/// the largest value spans `display.chart_width` characters.
pub fn chart<W: Write>(out: &mut W, display: &DisplayConfig, points: &[ChartPoint]) -> Result<()> {
    if points.is_empty() {
        writeln!(out, "No cash drawer entries to chart.")?;
        return Ok(());
    }

    let max = points
        .iter()
        .map(|p| p.totals.total_inflow.max(p.totals.total_outflow))
        .max()
        .unwrap_or(0);

    writeln!(
        out,
        "Inflow (#) and outflow (=) per day, in {}",
        display.currency
    )?;
    for point in points {
        writeln!(
            out,
            "{:<10}  in  {} {}",
            point.date.format("%Y-%m-%d"),
            bar('#', point.totals.total_inflow, max, display.chart_width),
            format_cents(point.totals.total_inflow)
        )?;
        writeln!(
            out,
            "{:<10}  out {} {}",
            "",
            bar('=', point.totals.total_outflow, max, display.chart_width),
            format_cents(point.totals.total_outflow)
        )?;
    }
    Ok(())
}

pub fn chart_table<W: Write>(out: &mut W, points: &[ChartPoint]) -> Result<()> {
    if points.is_empty() {
        writeln!(out, "No cash drawer entries to chart.")?;
        return Ok(());
    }

    writeln!(out, "{:<12} {:>12} {:>12} {:>12}", "DATE", "INFLOW", "OUTFLOW", "NET")?;
    writeln!(out, "{}", "-".repeat(51))?;
    for point in points {
        writeln!(
            out,
            "{:<12} {:>12} {:>12} {:>12}",
            point.date.format("%Y-%m-%d"),
            format_cents(point.totals.total_inflow),
            format_cents(point.totals.total_outflow),
            format_cents(point.totals.net())
        )?;
    }
    Ok(())
}

pub fn report_table<W: Write>(out: &mut W, report: &ReportView) -> Result<()> {
    writeln!(out, "Movement report")?;
    writeln!(out, "Period: {}", report.period)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>14}",
        "PERIOD", "TOTAL INFLOW", "TOTAL OUTFLOW", "CLOSING"
    )?;
    writeln!(out, "{}", "-".repeat(55))?;
    if report.is_empty() {
        writeln!(out, "(no report rows)")?;
    }
    for summary in &report.summaries {
        writeln!(
            out,
            "{:<10} {:>14} {:>14} {:>14}",
            summary.period,
            format_cents(summary.total_inflow),
            format_cents(summary.total_outflow),
            format_cents(summary.closing_balance)
        )?;
    }
    Ok(())
}

pub fn status<W: Write>(out: &mut W, status: &SessionStatus) -> Result<()> {
    writeln!(
        out,
        "Session: {} cash drawer entries, {} vault movements",
        status.cash_entries, status.vault_movements
    )?;
    Ok(())
}

fn bar(fill: char, value: Cents, max: Cents, width: usize) -> String {
    if value <= 0 || max <= 0 {
        return String::new();
    }
    let scaled = (value as i128 * width as i128 / max as i128) as usize;
    // Any non-zero amount gets at least one mark
    fill.to_string().repeat(scaled.max(1))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
