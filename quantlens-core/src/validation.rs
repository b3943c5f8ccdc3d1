//! Guards run at the start of every indicator call.
//!
//! Order of checks: parameters, then empty input, then length. Nothing here
//! has side effects beyond a debug event on rejection.

use crate::domain::Bar;
use crate::error::{IndicatorError, Result};

/// Reject an empty sequence or one shorter than `min_required` bars.
pub fn validate_data_length(bars: &[Bar], min_required: usize, indicator: &str) -> Result<()> {
    if bars.is_empty() {
        let err = IndicatorError::NoData {
            indicator: indicator.to_string(),
        };
        tracing::debug!(indicator, error = %err, "rejected input");
        return Err(err);
    }
    if bars.len() < min_required {
        let err = IndicatorError::InsufficientData {
            indicator: indicator.to_string(),
            required: min_required,
            got: bars.len(),
        };
        tracing::debug!(indicator, error = %err, "rejected input");
        return Err(err);
    }
    Ok(())
}

/// Periods must be >= 1.
pub fn validate_period(name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(IndicatorError::invalid_parameter(name, "must be >= 1"));
    }
    Ok(())
}

/// Multipliers must be finite and > 0.
pub fn validate_multiplier(name: &str, multiplier: f64) -> Result<()> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(IndicatorError::invalid_parameter(
            name,
            format!("must be a finite value > 0, got {multiplier}"),
        ));
    }
    Ok(())
}

/// Check the sequence contract: [`Bar::is_sane`] bars with strictly
/// increasing timestamps.
pub fn validate_bars(bars: &[Bar]) -> Result<()> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(malformed(index, insanity_reason(bar)));
        }
        if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
            return Err(malformed(index, "timestamp not strictly increasing"));
        }
    }
    Ok(())
}

fn insanity_reason(bar: &Bar) -> String {
    if !bar.is_finite() {
        "non-finite OHLCV field".to_string()
    } else if bar.low < 0.0 || bar.volume < 0.0 {
        "negative price or volume".to_string()
    } else if bar.high < bar.low {
        format!("high {} below low {}", bar.high, bar.low)
    } else {
        format!(
            "open {} / close {} outside [{}, {}]",
            bar.open, bar.close, bar.low, bar.high
        )
    }
}

fn malformed(index: usize, reason: impl Into<String>) -> IndicatorError {
    let err = IndicatorError::MalformedBars {
        index,
        reason: reason.into(),
    };
    tracing::debug!(error = %err, "rejected bar sequence");
    err
}
