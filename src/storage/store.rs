use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{ConnectOptions, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    CashDrawerEntry, DailyTotals, DrawerId, MovementType, Period, ReportSummary, SaleType,
    VaultMovement,
};

use super::MIGRATION_001_INITIAL;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Session-scoped store for the cash drawer, vault and report tables.
///
/// Backed by an in-memory SQLite database on a single connection that is
/// never recycled, so the data lives exactly as long as the store. Appends
/// go to the end of their table; listings return the full table in
/// insertion order. No validation happens here.
pub struct LedgerStore {
    pool: SqlitePool,
}

impl LedgerStore {
    /// Open a fresh, empty store.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory database URL")?
            .disable_statement_logging();

        // Every connection to :memory: sees its own database, and closing the
        // only connection drops the data.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    // ========================
    // Cash drawer
    // ========================

    /// Append an entry to the cash drawer table and set its sequence number.
    pub async fn append_cash_entry(&self, entry: &mut CashDrawerEntry) -> Result<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO cash_drawer_entries (
                id, entry_date, operator, drawer, sale_type,
                bill_payment_cents, withdrawal_cents, deposit_cents,
                inflow_cents, outflow_cents, closing_balance_cents,
                lottery_ticket_sales, scratch_card_sales,
                lottery_ticket_stock, scratch_card_stock
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING sequence
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(&entry.operator)
        .bind(entry.drawer.as_str())
        .bind(entry.sale_type.as_str())
        .bind(entry.bill_payment_amount)
        .bind(entry.withdrawal_amount)
        .bind(entry.deposit_amount)
        .bind(entry.inflow_amount)
        .bind(entry.outflow_amount)
        .bind(entry.closing_balance)
        .bind(i64::from(entry.lottery_ticket_sales))
        .bind(i64::from(entry.scratch_card_sales))
        .bind(i64::from(entry.lottery_ticket_stock))
        .bind(i64::from(entry.scratch_card_stock))
        .fetch_one(&self.pool)
        .await
        .context("Failed to append cash drawer entry")?;

        entry.sequence = row.get("sequence");
        debug!(
            sequence = entry.sequence,
            drawer = entry.drawer.as_str(),
            date = %entry.date,
            "Appended cash drawer entry"
        );
        Ok(())
    }

    /// All cash drawer entries in insertion order.
    pub async fn list_cash_entries(&self) -> Result<Vec<CashDrawerEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT sequence, id, entry_date, operator, drawer, sale_type,
                   bill_payment_cents, withdrawal_cents, deposit_cents,
                   inflow_cents, outflow_cents, closing_balance_cents,
                   lottery_ticket_sales, scratch_card_sales,
                   lottery_ticket_stock, scratch_card_stock
            FROM cash_drawer_entries
            ORDER BY sequence
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list cash drawer entries")?;

        rows.iter().map(Self::row_to_cash_entry).collect()
    }

    pub async fn count_cash_entries(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM cash_drawer_entries")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count cash drawer entries")?;
        Ok(row.get("count"))
    }

    /// Sum inflow and outflow of the cash drawer entries per date.
    /// Recomputed on every call.
    pub async fn aggregate_for_chart(&self) -> Result<BTreeMap<NaiveDate, DailyTotals>> {
        let rows = sqlx::query(
            r#"
            SELECT
                entry_date,
                COALESCE(SUM(inflow_cents), 0) as total_inflow,
                COALESCE(SUM(outflow_cents), 0) as total_outflow
            FROM cash_drawer_entries
            GROUP BY entry_date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate cash drawer entries")?;

        let mut totals = BTreeMap::new();
        for row in rows {
            let date = parse_date(row.get("entry_date"))?;
            totals.insert(
                date,
                DailyTotals {
                    total_inflow: row.get("total_inflow"),
                    total_outflow: row.get("total_outflow"),
                },
            );
        }
        Ok(totals)
    }

    fn row_to_cash_entry(row: &SqliteRow) -> Result<CashDrawerEntry> {
        let id_str: String = row.get("id");
        let drawer_str: String = row.get("drawer");
        let sale_type_str: String = row.get("sale_type");

        Ok(CashDrawerEntry {
            id: Uuid::parse_str(&id_str).context("Invalid cash drawer entry ID")?,
            sequence: row.get("sequence"),
            date: parse_date(row.get("entry_date"))?,
            operator: row.get("operator"),
            drawer: DrawerId::from_str(&drawer_str)?,
            sale_type: SaleType::from_str(&sale_type_str)?,
            bill_payment_amount: row.get("bill_payment_cents"),
            withdrawal_amount: row.get("withdrawal_cents"),
            deposit_amount: row.get("deposit_cents"),
            inflow_amount: row.get("inflow_cents"),
            outflow_amount: row.get("outflow_cents"),
            closing_balance: row.get("closing_balance_cents"),
            lottery_ticket_sales: get_count(row, "lottery_ticket_sales")?,
            scratch_card_sales: get_count(row, "scratch_card_sales")?,
            lottery_ticket_stock: get_count(row, "lottery_ticket_stock")?,
            scratch_card_stock: get_count(row, "scratch_card_stock")?,
        })
    }

    // ========================
    // Vault
    // ========================

    /// Append a movement to the vault table and set its sequence number.
    pub async fn append_vault_movement(&self, movement: &mut VaultMovement) -> Result<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO vault_movements (
                id, movement_date, description, movement_type,
                inflow_cents, outflow_cents, running_balance_cents
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING sequence
            "#,
        )
        .bind(movement.id.to_string())
        .bind(movement.date.format(DATE_FORMAT).to_string())
        .bind(&movement.description)
        .bind(movement.movement_type.as_str())
        .bind(movement.inflow_amount)
        .bind(movement.outflow_amount)
        .bind(movement.running_balance)
        .fetch_one(&self.pool)
        .await
        .context("Failed to append vault movement")?;

        movement.sequence = row.get("sequence");
        debug!(
            sequence = movement.sequence,
            movement_type = movement.movement_type.as_str(),
            amount = movement.amount(),
            "Appended vault movement"
        );
        Ok(())
    }

    /// All vault movements in insertion order.
    pub async fn list_vault_movements(&self) -> Result<Vec<VaultMovement>> {
        let rows = sqlx::query(
            r#"
            SELECT sequence, id, movement_date, description, movement_type,
                   inflow_cents, outflow_cents, running_balance_cents
            FROM vault_movements
            ORDER BY sequence
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list vault movements")?;

        rows.iter().map(Self::row_to_vault_movement).collect()
    }

    pub async fn count_vault_movements(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM vault_movements")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count vault movements")?;
        Ok(row.get("count"))
    }

    fn row_to_vault_movement(row: &SqliteRow) -> Result<VaultMovement> {
        let id_str: String = row.get("id");
        let movement_type_str: String = row.get("movement_type");

        Ok(VaultMovement {
            id: Uuid::parse_str(&id_str).context("Invalid vault movement ID")?,
            sequence: row.get("sequence"),
            date: parse_date(row.get("movement_date"))?,
            description: row.get("description"),
            movement_type: MovementType::from_str(&movement_type_str)?,
            inflow_amount: row.get("inflow_cents"),
            outflow_amount: row.get("outflow_cents"),
            running_balance: row.get("running_balance_cents"),
        })
    }

    // ========================
    // Reports
    // ========================

    /// Rows of the reports table. Nothing writes to it, so this is empty
    /// for every session.
    pub async fn list_report_summaries(&self) -> Result<Vec<ReportSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT period, total_inflow_cents, total_outflow_cents, closing_balance_cents
            FROM report_summaries
            ORDER BY sequence
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list report summaries")?;

        rows.iter().map(Self::row_to_report_summary).collect()
    }

    fn row_to_report_summary(row: &SqliteRow) -> Result<ReportSummary> {
        let period_str: String = row.get("period");

        Ok(ReportSummary {
            period: Period::from_str(&period_str)?,
            total_inflow: row.get("total_inflow_cents"),
            total_outflow: row.get("total_outflow_cents"),
            closing_balance: row.get("closing_balance_cents"),
        })
    }
}

fn parse_date(value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .with_context(|| format!("Invalid stored date: {}", value))
}

fn get_count(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.get(column);
    u32::try_from(value).with_context(|| format!("Invalid {} count: {}", column, value))
}
