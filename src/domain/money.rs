use thiserror::Error;

/// Currency amounts are integer cents so sums stay exact.
/// R$ 50,00 is stored as 5000.
pub type Cents = i64;

/// Largest amount a single field accepts: R$ 1.000.000.000,00.
/// Keeps per-day sums far inside `i64`.
pub const MAX_AMOUNT: Cents = 100_000_000_000;

/// Format cents with two decimal places.
/// Example: 5000 -> "50.00", 7 -> "0.07"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a non-negative decimal amount into cents.
///
/// Accepts "50", "50.5", "50.05" and a comma as decimal separator ("50,05"),
/// which is how amounts are written on the counter. At most two decimal
/// places are allowed; anything finer is rejected rather than silently cut.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    if input.starts_with('-') {
        return Err(ParseAmountError::Negative(input.to_string()));
    }

    let normalized = input.replace(',', ".");
    let (units_str, decimals_str) = match normalized.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (normalized.as_str(), ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(units_str) || !all_digits(decimals_str) {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }
    if units_str.is_empty() && decimals_str.is_empty() {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }
    if decimals_str.len() > 2 {
        return Err(ParseAmountError::TooPrecise(input.to_string()));
    }

    let units: Cents = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?
    };
    let decimals: Cents = match decimals_str.len() {
        0 => 0,
        // "12.5" means fifty cents
        1 => decimals_str.parse::<Cents>().unwrap_or(0) * 10,
        _ => decimals_str.parse().unwrap_or(0),
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimals))
        .filter(|&c| c <= MAX_AMOUNT)
        .ok_or_else(|| ParseAmountError::TooLarge(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}', use '50.00' or '50'")]
    InvalidFormat(String),

    #[error("amount '{0}' is negative")]
    Negative(String),

    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("amount '{0}' is above the maximum of 1000000000.00")]
    TooLarge(String),
}
