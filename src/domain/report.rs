use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::label::{normalize_label, ParseLabelError};
use super::Cents;

/// Reporting period offered by the report selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl FromStr for Period {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "daily" | "diario" => Ok(Period::Daily),
            "weekly" | "semanal" => Ok(Period::Weekly),
            "monthly" | "mensal" => Ok(Period::Monthly),
            _ => Err(ParseLabelError::new("period", s, "daily, weekly, monthly")),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A row of the reports table. Nothing produces these yet, so the table
/// is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub period: Period,
    pub total_inflow: Cents,
    pub total_outflow: Cents,
    pub closing_balance: Cents,
}

/// Cash drawer inflow and outflow summed over one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyTotals {
    pub total_inflow: Cents,
    pub total_outflow: Cents,
}

impl DailyTotals {
    pub fn net(&self) -> Cents {
        self.total_inflow - self.total_outflow
    }
}

/// One bar pair of the inflow/outflow chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: DailyTotals,
}
