use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A submitted form was rejected before anything was stored.
    #[error("Invalid record: {field} {reason}")]
    InvalidRecord { field: String, reason: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
