//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N). All three bands share SMA's
//! reduced-length alignment.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::closes;
use crate::indicators::sma::sma_of_series;
use crate::validation::{validate_data_length, validate_multiplier, validate_period};

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_STD_DEV_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    /// Bar index that element 0 of each band belongs to (`period - 1`).
    pub offset: usize,
}

impl BollingerOutput {
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    /// `upper - lower` per index.
    pub fn width(&self) -> Vec<f64> {
        self.upper.iter().zip(&self.lower).map(|(u, l)| u - l).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Result<Self> {
        validate_period("period", period)?;
        validate_multiplier("std_dev_multiplier", multiplier)?;
        Ok(Self {
            period,
            multiplier,
            name: format!("Bollinger({period},{multiplier})"),
        })
    }
}

impl Default for Bollinger {
    fn default() -> Self {
        Self {
            period: DEFAULT_BOLLINGER_PERIOD,
            multiplier: DEFAULT_STD_DEV_MULTIPLIER,
            name: format!("Bollinger({DEFAULT_BOLLINGER_PERIOD},{DEFAULT_STD_DEV_MULTIPLIER})"),
        }
    }
}

impl Indicator for Bollinger {
    type Output = BollingerOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Result<BollingerOutput> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");

        let closes = closes(bars);
        let middle = sma_of_series(&closes, self.period);

        let (upper, lower): (Vec<f64>, Vec<f64>) = closes
            .windows(self.period)
            .zip(&middle)
            .map(|(window, &mean)| {
                let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>()
                    / self.period as f64;
                let band = self.multiplier * variance.sqrt();
                (mean + band, mean - band)
            })
            .unzip();

        Ok(BollingerOutput {
            upper,
            middle,
            lower,
            offset: self.period - 1,
        })
    }
}

/// Bollinger Bands of close prices. See [`Bollinger`].
pub fn bollinger_bands(bars: &[Bar], period: usize, multiplier: f64) -> Result<BollingerOutput> {
    Bollinger::new(period, multiplier)?.compute(bars)
}
