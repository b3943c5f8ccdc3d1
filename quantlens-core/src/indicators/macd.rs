//! Moving Average Convergence/Divergence (MACD).
//!
//! macd = EMA(fast) - EMA(slow); signal = EMA(macd, signal_period);
//! histogram = macd - signal. All three series are full-length and aligned.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::indicators::closes;
use crate::indicators::ema::ema_of_series;
use crate::validation::{validate_data_length, validate_period};

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Three index-aligned MACD series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
    /// First index where both the slow EMA and the signal EMA are warmed up.
    pub warmup: usize,
}

impl MacdOutput {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    name: String,
}

impl Macd {
    /// Every period must be >= 1, and `fast_period` must be strictly less
    /// than `slow_period`; otherwise `InvalidParameter`.
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self> {
        validate_period("fast_period", fast_period)?;
        validate_period("slow_period", slow_period)?;
        validate_period("signal_period", signal_period)?;
        if fast_period >= slow_period {
            return Err(IndicatorError::invalid_parameter(
                "fast_period",
                format!("must be less than slow_period ({fast_period} >= {slow_period})"),
            ));
        }
        Ok(Self {
            fast_period,
            slow_period,
            signal_period,
            name: format!("MACD({fast_period},{slow_period},{signal_period})"),
        })
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
            name: format!(
                "MACD({DEFAULT_FAST_PERIOD},{DEFAULT_SLOW_PERIOD},{DEFAULT_SIGNAL_PERIOD})"
            ),
        }
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow_period + self.signal_period - 2
    }

    fn min_bars(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn compute(&self, bars: &[Bar]) -> Result<MacdOutput> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");

        let closes = closes(bars);
        let fast = ema_of_series(&closes, self.fast_period);
        let slow = ema_of_series(&closes, self.slow_period);

        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal_period);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(MacdOutput {
            macd,
            signal,
            histogram,
            warmup: self.lookback(),
        })
    }
}

/// MACD of close prices. See [`Macd`].
pub fn macd(
    bars: &[Bar],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput> {
    Macd::new(fast_period, slow_period, signal_period)?.compute(bars)
}
