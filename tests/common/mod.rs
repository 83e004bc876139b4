// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use loterica::application::{CashEntryForm, LedgerService, VaultMovementForm};
use loterica::domain::{Cents, DrawerId, MovementType};

/// Helper to start a fresh session
pub async fn test_service() -> Result<LedgerService> {
    Ok(LedgerService::new_session().await?)
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// A cash drawer form with only the flow fields filled in
pub fn cash_form(
    date: &str,
    operator: &str,
    drawer: DrawerId,
    inflow: Cents,
    outflow: Cents,
) -> CashEntryForm {
    let mut form = CashEntryForm::new(parse_date(date), operator, drawer);
    form.inflow_amount = inflow;
    form.outflow_amount = outflow;
    form.closing_balance = inflow - outflow;
    form
}

pub fn vault_form(
    date: &str,
    description: &str,
    movement_type: MovementType,
    amount: Cents,
) -> VaultMovementForm {
    VaultMovementForm::new(parse_date(date), description, movement_type, amount)
}
