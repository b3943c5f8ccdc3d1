//! Error taxonomy for indicator calls.
//!
//! Every failure is raised before any computation starts: a call either
//! returns a complete, aligned output or one of these errors.

/// Errors returned by indicator construction, validation and computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicatorError {
    /// The bar sequence is empty.
    #[error("No data provided for {indicator}")]
    NoData { indicator: String },

    /// The bar sequence is shorter than the indicator's minimum window.
    #[error("Insufficient data for {indicator}: required {required} bars, got {got}")]
    InsufficientData {
        indicator: String,
        required: usize,
        got: usize,
    },

    /// A period/multiplier is out of range, or a price pair is degenerate.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A bar violates the sequence contract (ordering, finiteness, high >= low).
    #[error("Malformed bar at index {index}: {reason}")]
    MalformedBars { index: usize, reason: String },

    /// An indicator configuration could not be parsed.
    #[error("Invalid indicator config: {0}")]
    Config(String),
}

impl IndicatorError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True for the "not enough bars" family (`NoData` and `InsufficientData`).
    pub fn is_data_shortage(&self) -> bool {
        matches!(self, Self::NoData { .. } | Self::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
