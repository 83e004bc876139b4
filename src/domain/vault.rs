use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::label::{normalize_label, ParseLabelError};
use super::{Cents, EntryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Cash put into the vault
    Inflow,
    /// Cash taken out of the vault
    Outflow,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inflow => "inflow",
            MovementType::Outflow => "outflow",
        }
    }
}

impl FromStr for MovementType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "inflow" | "in" | "entrada" => Ok(MovementType::Inflow),
            "outflow" | "out" | "saida" => Ok(MovementType::Outflow),
            _ => Err(ParseLabelError::new("movement type", s, "inflow, outflow")),
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single movement of cash in or out of the vault.
///
/// At most one of `inflow_amount` and `outflow_amount` is non-zero: the
/// side is chosen by the movement type at construction and the other side
/// is always zero. `running_balance` is recorded as zero and never computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultMovement {
    pub id: EntryId,
    /// Position in the vault table, assigned by the store (1-based)
    pub sequence: i64,
    pub date: NaiveDate,
    pub description: String,
    pub movement_type: MovementType,
    pub inflow_amount: Cents,
    pub outflow_amount: Cents,
    pub running_balance: Cents,
}

impl VaultMovement {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        movement_type: MovementType,
        amount: Cents,
    ) -> Self {
        let (inflow_amount, outflow_amount) = match movement_type {
            MovementType::Inflow => (amount, 0),
            MovementType::Outflow => (0, amount),
        };
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
            date,
            description: description.into(),
            movement_type,
            inflow_amount,
            outflow_amount,
            running_balance: 0,
        }
    }

    /// The amount on the side selected by the movement type.
    pub fn amount(&self) -> Cents {
        match self.movement_type {
            MovementType::Inflow => self.inflow_amount,
            MovementType::Outflow => self.outflow_amount,
        }
    }
}
