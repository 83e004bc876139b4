use tracing::{info, warn};

use crate::domain::{CashDrawerEntry, ChartPoint, Period, VaultMovement};
use crate::storage::LedgerStore;

use super::{AppError, CashEntryForm, ReportView, SessionStatus, VaultMovementForm};

/// Application service for one session.
///
/// Owns the session's store; the front end holds it and passes it by
/// reference to whatever handles a submission or a display query.
pub struct LedgerService {
    store: LedgerStore,
}

impl LedgerService {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Start a session with an empty in-memory store.
    pub async fn new_session() -> Result<Self, AppError> {
        let store = LedgerStore::open_in_memory().await?;
        info!("Opened session ledger");
        Ok(Self::new(store))
    }

    // ========================
    // Submissions
    // ========================

    /// Validate a cash drawer submission and append it.
    /// A rejected submission leaves the store untouched.
    pub async fn record_cash_entry(&self, form: CashEntryForm) -> Result<CashDrawerEntry, AppError> {
        let mut entry = form.into_entry().inspect_err(|e| {
            warn!(error = %e, "Rejected cash drawer submission");
        })?;
        self.store.append_cash_entry(&mut entry).await?;
        Ok(entry)
    }

    /// Validate a vault submission, resolve its inflow/outflow split and append it.
    pub async fn record_vault_movement(
        &self,
        form: VaultMovementForm,
    ) -> Result<VaultMovement, AppError> {
        let mut movement = form.into_movement().inspect_err(|e| {
            warn!(error = %e, "Rejected vault submission");
        })?;
        self.store.append_vault_movement(&mut movement).await?;
        Ok(movement)
    }

    // ========================
    // Display queries
    // ========================

    pub async fn cash_entries(&self) -> Result<Vec<CashDrawerEntry>, AppError> {
        Ok(self.store.list_cash_entries().await?)
    }

    pub async fn vault_movements(&self) -> Result<Vec<VaultMovement>, AppError> {
        Ok(self.store.list_vault_movements().await?)
    }

    /// Inflow/outflow per date, oldest date first.
    pub async fn chart(&self) -> Result<Vec<ChartPoint>, AppError> {
        let totals = self.store.aggregate_for_chart().await?;
        Ok(totals
            .into_iter()
            .map(|(date, totals)| ChartPoint { date, totals })
            .collect())
    }

    pub async fn report(&self, period: Period) -> Result<ReportView, AppError> {
        let summaries = self.store.list_report_summaries().await?;
        Ok(ReportView { period, summaries })
    }

    pub async fn status(&self) -> Result<SessionStatus, AppError> {
        Ok(SessionStatus {
            cash_entries: self.store.count_cash_entries().await?,
            vault_movements: self.store.count_vault_movements().await?,
        })
    }
}
