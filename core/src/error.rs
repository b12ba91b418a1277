use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown page '{slug}'")]
    UnknownPage { slug: String },

    #[error("Collection '{collection}' has no column '{column}'")]
    MissingColumn { collection: String, column: String },

    #[error("Collection '{collection}' row {row}: '{value}' is not a number")]
    BadCell {
        collection: String,
        /// 1-based, counting data rows only.
        row: usize,
        value: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeskError {
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to
    /// storage failures.
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
