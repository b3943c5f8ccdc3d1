//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a trailing window.
//! Output is reduced-length: `bars.len() - period + 1` values, where index 0
//! is the mean of bars `0..period`.

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::closes;
use crate::validation::{validate_data_length, validate_period};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self> {
        validate_period("period", period)?;
        Ok(Self {
            period,
            name: format!("SMA({period})"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");
        Ok(sma_of_series(&closes(bars), self.period))
    }
}

/// SMA of close prices. See [`Sma`].
pub fn sma(bars: &[Bar], period: usize) -> Result<Vec<f64>> {
    Sma::new(period)?.compute(bars)
}

/// Rolling mean of an arbitrary series, reduced-length.
///
/// Returns an empty vector when `values` is shorter than `period` or `period == 0`.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    result.push(sum / period as f64);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        result.push(sum / period as f64);
    }

    result
}
