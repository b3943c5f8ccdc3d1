//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: EMA[0] = close[0].
//! Output is full-length; values before index `period - 1` are warm-up values.

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::closes;
use crate::validation::{validate_data_length, validate_period};

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self> {
        validate_period("period", period)?;
        Ok(Self {
            period,
            name: format!("EMA({period})"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");
        Ok(ema_of_series(&closes(bars), self.period))
    }
}

/// EMA of close prices. See [`Ema`].
pub fn ema(bars: &[Bar], period: usize) -> Result<Vec<f64>> {
    Ema::new(period)?.compute(bars)
}

/// Full-length EMA of an arbitrary series, seeded with its first value.
///
/// Used directly by composed indicators (MACD signal line) that smooth a
/// derived series rather than closes.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let alpha = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    result.push(first);
    let mut prev = first;
    for &v in &values[1..] {
        let ema = v * alpha + prev * (1.0 - alpha);
        result.push(ema);
        prev = ema;
    }
    result
}
