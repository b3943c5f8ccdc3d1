//! SuperTrend: ATR-based directional overlay with buy/sell classification.
//!
//! Inherently sequential: the final bands carry forward with hysteresis and
//! direction flips between support and resistance based on close vs the
//! previous bar's bands.
//!
//! Per bar:
//! - basic_upper = hl2 + mult * ATR, basic_lower = hl2 - mult * ATR
//! - final_upper = basic_upper if basic_upper < final_upper[t-1] or
//!   close[t-1] > final_upper[t-1], else final_upper[t-1]
//! - final_lower = basic_lower if basic_lower > final_lower[t-1] or
//!   close[t-1] < final_lower[t-1], else final_lower[t-1]
//! - down → up when close > final_upper[t-1]; up → down when close < final_lower[t-1]
//!
//! Output: the active band, lower band (support) when trending up, upper
//! band (resistance) when trending down. The state machine starts trending
//! down at bar 0; bars before `lookback()` ride on warm-up ATR values.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::atr::{true_range, wilder_smooth};
use crate::validation::{validate_data_length, validate_multiplier, validate_period};

pub const DEFAULT_SUPERTREND_PERIOD: usize = 10;
pub const DEFAULT_SUPERTREND_MULTIPLIER: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Buy,
    Sell,
    Hold,
}

/// Full-length SuperTrend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupertrendOutput {
    pub supertrend: Vec<f64>,
    pub direction: Vec<TrendDirection>,
    pub signal: Vec<TrendSignal>,
    pub upper_band: Vec<f64>,
    pub lower_band: Vec<f64>,
    /// First index whose ATR has a complete window.
    pub warmup: usize,
}

impl SupertrendOutput {
    pub fn len(&self) -> usize {
        self.supertrend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertrend.is_empty()
    }

    /// Bar indices carrying a `buy` signal.
    pub fn buy_indices(&self) -> Vec<usize> {
        self.indices_of(TrendSignal::Buy)
    }

    /// Bar indices carrying a `sell` signal.
    pub fn sell_indices(&self) -> Vec<usize> {
        self.indices_of(TrendSignal::Sell)
    }

    fn indices_of(&self, wanted: TrendSignal) -> Vec<usize> {
        self.signal
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == wanted)
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Result<Self> {
        validate_period("period", period)?;
        validate_multiplier("multiplier", multiplier)?;
        Ok(Self {
            period,
            multiplier,
            name: format!("SuperTrend({period},{multiplier})"),
        })
    }
}

impl Default for Supertrend {
    fn default() -> Self {
        Self {
            period: DEFAULT_SUPERTREND_PERIOD,
            multiplier: DEFAULT_SUPERTREND_MULTIPLIER,
            name: format!(
                "SuperTrend({DEFAULT_SUPERTREND_PERIOD},{DEFAULT_SUPERTREND_MULTIPLIER})"
            ),
        }
    }
}

impl Indicator for Supertrend {
    type Output = SupertrendOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn min_bars(&self) -> usize {
        self.period + 2
    }

    fn compute(&self, bars: &[Bar]) -> Result<SupertrendOutput> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");

        let n = bars.len();
        let atr = wilder_smooth(&true_range(bars), self.period);

        let mut out = SupertrendOutput {
            supertrend: Vec::with_capacity(n),
            direction: Vec::with_capacity(n),
            signal: Vec::with_capacity(n),
            upper_band: Vec::with_capacity(n),
            lower_band: Vec::with_capacity(n),
            warmup: self.lookback(),
        };

        let mut direction = TrendDirection::Down;
        for (i, bar) in bars.iter().enumerate() {
            let hl2 = bar.hl2();
            let basic_upper = hl2 + self.multiplier * atr[i];
            let basic_lower = hl2 - self.multiplier * atr[i];

            let (upper, lower, signal) = if i == 0 {
                (basic_upper, basic_lower, TrendSignal::Hold)
            } else {
                let prev_upper = out.upper_band[i - 1];
                let prev_lower = out.lower_band[i - 1];
                let prev_close = bars[i - 1].close;

                // Upper band only loosens once price has closed above it
                let upper = if basic_upper < prev_upper || prev_close > prev_upper {
                    basic_upper
                } else {
                    prev_upper
                };
                let lower = if basic_lower > prev_lower || prev_close < prev_lower {
                    basic_lower
                } else {
                    prev_lower
                };

                let next = match direction {
                    TrendDirection::Down if bar.close > prev_upper => TrendDirection::Up,
                    TrendDirection::Up if bar.close < prev_lower => TrendDirection::Down,
                    unchanged => unchanged,
                };
                let signal = match (direction, next) {
                    (TrendDirection::Down, TrendDirection::Up) => TrendSignal::Buy,
                    (TrendDirection::Up, TrendDirection::Down) => TrendSignal::Sell,
                    _ => TrendSignal::Hold,
                };
                direction = next;
                (upper, lower, signal)
            };

            out.supertrend.push(match direction {
                TrendDirection::Up => lower,
                TrendDirection::Down => upper,
            });
            out.direction.push(direction);
            out.signal.push(signal);
            out.upper_band.push(upper);
            out.lower_band.push(lower);
        }

        Ok(out)
    }
}

/// SuperTrend of the bar series. See [`Supertrend`].
pub fn supertrend(bars: &[Bar], period: usize, multiplier: f64) -> Result<SupertrendOutput> {
    Supertrend::new(period, multiplier)?.compute(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    /// close = start + step*i, high/low = close -/+ 1, so TR (and ATR) is a constant 2.
    fn linear_bars(start: f64, step: f64, n: usize) -> Vec<(f64, f64, f64, f64)> {
        (0..n)
            .map(|i| {
                let close = start + step * i as f64;
                (close, close + 1.0, close - 1.0, close)
            })
            .collect()
    }

    #[test]
    fn uptrend_flips_to_buy_once() {
        // upper band pins at 100 + 3*2 = 106 until close 107 crosses it at bar 7
        let bars = make_ohlc_bars(&linear_bars(100.0, 1.0, 20));
        let out = supertrend(&bars, 3, 3.0).unwrap();

        assert_eq!(out.buy_indices(), vec![7]);
        assert!(out.sell_indices().is_empty());
        assert_eq!(out.direction[6], TrendDirection::Down);
        assert_eq!(out.direction[7], TrendDirection::Up);
        assert_approx(out.supertrend[6], 106.0, DEFAULT_EPSILON);
        for i in 7..20 {
            assert_approx(out.supertrend[i], bars[i].close - 6.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn reversal_emits_sell() {
        let mut data = linear_bars(100.0, 1.0, 20);
        data.extend(linear_bars(118.0, -1.0, 20));
        let bars = make_ohlc_bars(&data);
        let out = supertrend(&bars, 3, 3.0).unwrap();

        let sells = out.sell_indices();
        assert_eq!(sells.len(), 1);
        assert!(sells[0] > 19);
        assert_eq!(*out.direction.last().unwrap(), TrendDirection::Down);
        for i in sells[0]..bars.len() {
            assert!(out.supertrend[i] > bars[i].close);
        }
    }

    #[test]
    fn signal_only_on_direction_change() {
        let mut data = linear_bars(100.0, 1.0, 20);
        data.extend(linear_bars(118.0, -1.0, 20));
        let bars = make_ohlc_bars(&data);
        let out = supertrend(&bars, 3, 2.0).unwrap();
        for i in 1..out.len() {
            let flipped = out.direction[i] != out.direction[i - 1];
            assert_eq!(flipped, out.signal[i] != TrendSignal::Hold, "bar {i}");
        }
        assert_eq!(out.signal[0], TrendSignal::Hold);
    }

    #[test]
    fn larger_multiplier_sits_further_from_price() {
        let bars = make_ohlc_bars(&linear_bars(100.0, 1.0, 30));
        let tight = supertrend(&bars, 3, 1.0).unwrap();
        let wide = supertrend(&bars, 3, 3.0).unwrap();
        let last = bars.len() - 1;
        let tight_gap = (bars[last].close - tight.supertrend[last]).abs();
        let wide_gap = (bars[last].close - wide.supertrend[last]).abs();
        assert_approx(tight_gap, 2.0, DEFAULT_EPSILON);
        assert_approx(wide_gap, 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn supertrend_too_few_bars() {
        let bars = make_ohlc_bars(&linear_bars(100.0, 1.0, 5));
        assert!(matches!(
            supertrend(&bars, 10, 3.0).unwrap_err(),
            IndicatorError::InsufficientData { required: 12, .. }
        ));
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&TrendSignal::Hold).unwrap(), "\"hold\"");
    }
}
