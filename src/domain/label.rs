use thiserror::Error;

/// Error for a selector value (drawer, sale type, movement type, period)
/// that matches none of the accepted labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseLabelError {
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Lowercase and drop separators so "Caixa 1", "caixa-1" and "CAIXA_1" compare equal.
pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
