//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed: simple mean of the first `period` gains/losses.
//! Output is reduced by `period`: value k belongs to bar k + period.
//! Edge case: avg_loss == 0 → RSI = 100.

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::validation::{validate_data_length, validate_period};

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self> {
        validate_period("period", period)?;
        Ok(Self {
            period,
            name: format!("RSI({period})"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
            name: format!("RSI({DEFAULT_RSI_PERIOD})"),
        }
    }
}

impl Indicator for Rsi {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_bars(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");

        let period = self.period as f64;
        let (gains, losses): (Vec<f64>, Vec<f64>) = bars
            .windows(2)
            .map(|w| {
                let change = w[1].close - w[0].close;
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / period;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / period;

        let mut result = Vec::with_capacity(bars.len() - self.period);
        result.push(compute_rsi(avg_gain, avg_loss));

        for (&gain, &loss) in gains[self.period..].iter().zip(&losses[self.period..]) {
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            result.push(compute_rsi(avg_gain, avg_loss));
        }

        Ok(result)
    }
}

/// RSI of close prices. See [`Rsi`].
pub fn rsi(bars: &[Bar], period: usize) -> Result<Vec<f64>> {
    Rsi::new(period)?.compute(bars)
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = rsi(&bars, 3).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn rsi_all_losses() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = rsi(&bars, 3).unwrap();
        assert_approx(result[0], 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_prices_hit_zero_loss_rule() {
        let bars = make_bars(&[50.0, 50.0, 50.0, 50.0]);
        let result = rsi(&bars, 3).unwrap();
        assert_eq!(result, vec![100.0]);
    }

    #[test]
    fn rsi_mixed() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        // Seed: avg_gain = 0.34/3, avg_loss = 0.73/3 → RSI = 31.7757
        // Wilder step: avg_gain = (0.34/3*2 + 0.72)/3, avg_loss = (0.73/3*2)/3 → RSI = 66.0465
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = rsi(&bars, 3).unwrap();

        assert_eq!(result.len(), 2);
        assert_approx(result[0], 31.775_700_934_579_447, 1e-9);
        assert_approx(result[1], 66.046_511_627_906_97, 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = rsi(&bars, 3).unwrap();
        for (i, &v) in result.iter().enumerate() {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
        }
    }

    #[test]
    fn rsi_needs_period_plus_one_bars() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let err = rsi(&bars, 3).unwrap_err();
        assert!(matches!(err, IndicatorError::InsufficientData { required: 4, got: 3, .. }));
    }

    #[test]
    fn rsi_default_period() {
        let rsi = Rsi::default();
        assert_eq!(rsi.period(), 14);
        assert_eq!(rsi.min_bars(), 15);
        assert_eq!(rsi.name(), "RSI(14)");
    }
}
