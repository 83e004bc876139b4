use chrono::NaiveDate;

use crate::domain::{
    format_cents, CashDrawerEntry, Cents, DrawerId, MovementType, SaleType, VaultMovement,
    MAX_AMOUNT,
};

use super::AppError;

/// Field values submitted by the cash drawer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashEntryForm {
    pub date: NaiveDate,
    pub operator: String,
    pub drawer: DrawerId,
    pub sale_type: SaleType,
    pub bill_payment_amount: Cents,
    pub withdrawal_amount: Cents,
    pub deposit_amount: Cents,
    pub inflow_amount: Cents,
    pub outflow_amount: Cents,
    pub closing_balance: Cents,
    pub lottery_ticket_sales: u32,
    pub scratch_card_sales: u32,
    pub lottery_ticket_stock: u32,
    pub scratch_card_stock: u32,
}

impl CashEntryForm {
    /// A form with every amount and counter at zero.
    pub fn new(date: NaiveDate, operator: impl Into<String>, drawer: DrawerId) -> Self {
        Self {
            date,
            operator: operator.into(),
            drawer,
            sale_type: SaleType::Other,
            bill_payment_amount: 0,
            withdrawal_amount: 0,
            deposit_amount: 0,
            inflow_amount: 0,
            outflow_amount: 0,
            closing_balance: 0,
            lottery_ticket_sales: 0,
            scratch_card_sales: 0,
            lottery_ticket_stock: 0,
            scratch_card_stock: 0,
        }
    }

    /// Check the submission and build the record to store.
    ///
    /// Counters are unsigned so only the operator and the currency fields
    /// need checking. Cross-field totals are deliberately left alone.
    pub fn into_entry(self) -> Result<CashDrawerEntry, AppError> {
        let operator = self.operator.trim();
        if operator.is_empty() {
            return Err(AppError::invalid("operator", "is required"));
        }

        let entry = CashDrawerEntry::new(self.date, operator, self.drawer)
            .with_sale_type(self.sale_type)
            .with_services(
                self.bill_payment_amount,
                self.withdrawal_amount,
                self.deposit_amount,
            )
            .with_flows(self.inflow_amount, self.outflow_amount, self.closing_balance)
            .with_sales(self.lottery_ticket_sales, self.scratch_card_sales)
            .with_stock(self.lottery_ticket_stock, self.scratch_card_stock);

        for (field, amount) in entry.amounts() {
            ensure_amount(field, amount)?;
        }
        Ok(entry)
    }
}

/// Field values submitted by the vault form. The inflow/outflow split is
/// resolved from `movement_type` when the record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultMovementForm {
    pub date: NaiveDate,
    pub description: String,
    pub movement_type: MovementType,
    pub amount: Cents,
}

impl VaultMovementForm {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        movement_type: MovementType,
        amount: Cents,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            movement_type,
            amount,
        }
    }

    pub fn into_movement(self) -> Result<VaultMovement, AppError> {
        ensure_amount("amount", self.amount)?;
        Ok(VaultMovement::new(
            self.date,
            self.description.trim(),
            self.movement_type,
            self.amount,
        ))
    }
}

fn ensure_amount(field: &str, amount: Cents) -> Result<(), AppError> {
    if amount < 0 {
        return Err(AppError::invalid(
            field,
            format!("must not be negative (got {})", format_cents(amount)),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::invalid(
            field,
            format!(
                "must not exceed {} (got {})",
                format_cents(MAX_AMOUNT),
                format_cents(amount)
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_cash_form_builds_entry() {
        let mut form = CashEntryForm::new(date(), "  Ana ", DrawerId::Drawer1);
        form.inflow_amount = 10000;
        form.outflow_amount = 2000;
        form.scratch_card_sales = 5;

        let entry = form.into_entry().unwrap();
        assert_eq!(entry.operator, "Ana");
        assert_eq!(entry.inflow_amount, 10000);
        assert_eq!(entry.outflow_amount, 2000);
        assert_eq!(entry.scratch_card_sales, 5);
    }

    #[test]
    fn test_cash_form_requires_operator() {
        let form = CashEntryForm::new(date(), "   ", DrawerId::Drawer1);
        match form.into_entry() {
            Err(AppError::InvalidRecord { field, .. }) => assert_eq!(field, "operator"),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_cash_form_rejects_negative_amount() {
        let mut form = CashEntryForm::new(date(), "Ana", DrawerId::Drawer2);
        form.closing_balance = -1;
        match form.into_entry() {
            Err(AppError::InvalidRecord { field, reason }) => {
                assert_eq!(field, "closing_balance");
                assert!(reason.contains("-0.01"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_cash_form_amount_upper_bound() {
        let mut form = CashEntryForm::new(date(), "Ana", DrawerId::Drawer1);
        form.inflow_amount = MAX_AMOUNT;
        assert_eq!(form.clone().into_entry().unwrap().inflow_amount, MAX_AMOUNT);

        form.inflow_amount = MAX_AMOUNT + 1;
        match form.into_entry() {
            Err(AppError::InvalidRecord { field, .. }) => assert_eq!(field, "inflow_amount"),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_vault_form_resolves_side() {
        let movement = VaultMovementForm::new(date(), "Sangria", MovementType::Outflow, 3000)
            .into_movement()
            .unwrap();
        assert_eq!(movement.inflow_amount, 0);
        assert_eq!(movement.outflow_amount, 3000);
        assert_eq!(movement.running_balance, 0);
    }

    #[test]
    fn test_vault_form_rejects_negative_amount() {
        let form = VaultMovementForm::new(date(), "", MovementType::Inflow, -500);
        assert!(matches!(
            form.into_movement(),
            Err(AppError::InvalidRecord { .. })
        ));
    }
}
