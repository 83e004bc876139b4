use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::label::{normalize_label, ParseLabelError};
use super::Cents;

pub type EntryId = Uuid;

/// The till a cash drawer entry was recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerId {
    Drawer1,
    Drawer2,
    /// Back-office drawer not operated at the counter
    InternalDrawer,
}

impl DrawerId {
    pub const ALL: [DrawerId; 3] = [DrawerId::Drawer1, DrawerId::Drawer2, DrawerId::InternalDrawer];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawerId::Drawer1 => "drawer1",
            DrawerId::Drawer2 => "drawer2",
            DrawerId::InternalDrawer => "internal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawerId::Drawer1 => "Drawer 1",
            DrawerId::Drawer2 => "Drawer 2",
            DrawerId::InternalDrawer => "Internal Drawer",
        }
    }
}

impl FromStr for DrawerId {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "drawer1" | "caixa1" | "1" => Ok(DrawerId::Drawer1),
            "drawer2" | "caixa2" | "2" => Ok(DrawerId::Drawer2),
            "internal" | "internaldrawer" | "caixainterno" | "interno" => {
                Ok(DrawerId::InternalDrawer)
            }
            _ => Err(ParseLabelError::new(
                "drawer",
                s,
                "drawer1, drawer2, internal",
            )),
        }
    }
}

impl fmt::Display for DrawerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    BillPayment,
    Withdrawal,
    Deposit,
    Other,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::BillPayment => "bill_payment",
            SaleType::Withdrawal => "withdrawal",
            SaleType::Deposit => "deposit",
            SaleType::Other => "other",
        }
    }
}

impl FromStr for SaleType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "billpayment" | "bill" | "pagamento" | "pagamentodeconta" => Ok(SaleType::BillPayment),
            "withdrawal" | "saque" => Ok(SaleType::Withdrawal),
            "deposit" | "deposito" => Ok(SaleType::Deposit),
            "other" | "outro" | "outros" => Ok(SaleType::Other),
            _ => Err(ParseLabelError::new(
                "sale type",
                s,
                "bill-payment, withdrawal, deposit, other",
            )),
        }
    }
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One submission of the cash drawer form.
///
/// Entries are immutable once stored. Amounts are only required to be
/// non-negative; `closing_balance` is taken as entered and never
/// reconciled against `inflow_amount - outflow_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashDrawerEntry {
    pub id: EntryId,
    /// Position in the cash drawer table, assigned by the store (1-based)
    pub sequence: i64,
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
    /// Bolão tickets sold
    pub lottery_ticket_sales: u32,
    /// Raspadinhas sold
    pub scratch_card_sales: u32,
    pub lottery_ticket_stock: u32,
    pub scratch_card_stock: u32,
}

impl CashDrawerEntry {
    /// Create an entry with all amounts and counters at zero.
    /// Sequence number is assigned by the store.
    pub fn new(date: NaiveDate, operator: impl Into<String>, drawer: DrawerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
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

    pub fn with_sale_type(mut self, sale_type: SaleType) -> Self {
        self.sale_type = sale_type;
        self
    }

    pub fn with_flows(mut self, inflow: Cents, outflow: Cents, closing_balance: Cents) -> Self {
        self.inflow_amount = inflow;
        self.outflow_amount = outflow;
        self.closing_balance = closing_balance;
        self
    }

    pub fn with_services(mut self, bill_payment: Cents, withdrawal: Cents, deposit: Cents) -> Self {
        self.bill_payment_amount = bill_payment;
        self.withdrawal_amount = withdrawal;
        self.deposit_amount = deposit;
        self
    }

    pub fn with_sales(mut self, lottery_tickets: u32, scratch_cards: u32) -> Self {
        self.lottery_ticket_sales = lottery_tickets;
        self.scratch_card_sales = scratch_cards;
        self
    }

    pub fn with_stock(mut self, lottery_tickets: u32, scratch_cards: u32) -> Self {
        self.lottery_ticket_stock = lottery_tickets;
        self.scratch_card_stock = scratch_cards;
        self
    }

    /// Every currency field with its column name, in table order.
    pub fn amounts(&self) -> [(&'static str, Cents); 6] {
        [
            ("bill_payment_amount", self.bill_payment_amount),
            ("withdrawal_amount", self.withdrawal_amount),
            ("deposit_amount", self.deposit_amount),
            ("inflow_amount", self.inflow_amount),
            ("outflow_amount", self.outflow_amount),
            ("closing_balance", self.closing_balance),
        ]
    }
}
