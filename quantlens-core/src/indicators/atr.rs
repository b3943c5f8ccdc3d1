//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high[0] - low[0].
//! ATR is Wilder-smoothed TR: ATR[t] = (ATR[t-1] * (period-1) + TR[t]) / period.
//! Seed: ATR[period-1] = mean(TR[0..period]). Output is full-length: indices
//! before the seed repeat the seed, and a leading run of zero values (flat
//! opening bars) repeats the first positive ATR, so the series stays strictly
//! positive once any bar has range.

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::validation::{validate_data_length, validate_period};

pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Result<Self> {
        validate_period("period", period)?;
        Ok(Self {
            period,
            name: format!("ATR({period})"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
            name: format!("ATR({DEFAULT_ATR_PERIOD})"),
        }
    }
}

impl Indicator for Atr {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn min_bars(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");
        let mut atr = wilder_smooth(&true_range(bars), self.period);
        backfill_warmup(&mut atr, self.lookback());
        Ok(atr)
    }
}

/// ATR of the bar series. See [`Atr`].
pub fn atr(bars: &[Bar], period: usize) -> Result<Vec<f64>> {
    Atr::new(period)?.compute(bars)
}

/// Overwrite the warm-up prefix with the first settled positive value.
///
/// The fill index is `lookback`, or the first positive value after it when
/// the series opens flat. An all-zero series is left untouched.
fn backfill_warmup(values: &mut [f64], lookback: usize) {
    let Some(fill_at) = values
        .iter()
        .skip(lookback)
        .position(|&v| v > 0.0)
        .map(|i| i + lookback)
    else {
        return;
    };
    let fill = values[fill_at];
    values[..fill_at].fill(fill);
}

/// Compute the True Range series from bars.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let Some(first) = bars.first() else {
        return Vec::new();
    };

    let mut tr = Vec::with_capacity(bars.len());
    tr.push(first.range());
    tr.extend(bars.windows(2).map(|w| {
        let (h, l, pc) = (w[1].high, w[1].low, w[0].close);
        (h - l).max((h - pc).abs()).max((l - pc).abs())
    }));
    tr
}

/// Apply Wilder smoothing to a series, full-length.
///
/// The first `period` outputs are the expanding mean of the values seen so
/// far, so index `period - 1` is the simple-mean seed. Every later value is
/// `(prev * (period - 1) + x) / period`.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let n = period as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut prev = 0.0;
    for (i, &v) in values.iter().enumerate() {
        let smoothed = if i < period {
            sum += v;
            sum / (i + 1) as f64
        } else {
            (prev * (n - 1.0) + v) / n
        };
        result.push(smoothed);
        prev = smoothed;
    }
    result
}
