//! Ichimoku Cloud.
//!
//! - Tenkan-sen (conversion line): (highest high + lowest low) / 2 over `tenkan` bars
//! - Kijun-sen (base line): same over `kijun` bars
//! - Senkou Span A: (tenkan + kijun) / 2, charted `displacement` bars ahead
//! - Senkou Span B: midpoint over `senkou_b` bars, charted `displacement` bars ahead
//! - Chikou Span: close, charted `displacement` bars behind
//!
//! Every line is exposed index-aligned: value t is computed from bars up to t
//! and is NOT shifted. `IchimokuOutput::displacement` carries the charting
//! offset so callers can project the spans themselves. Before a line's window
//! fills, it is the midpoint of the bars seen so far (warm-up).

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::validation::{validate_data_length, validate_period};

pub const DEFAULT_TENKAN_PERIOD: usize = 9;
pub const DEFAULT_KIJUN_PERIOD: usize = 26;
pub const DEFAULT_SENKOU_B_PERIOD: usize = 52;
pub const DEFAULT_DISPLACEMENT: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudColor {
    Bullish,
    Bearish,
}

/// Five-step trading signal, ordered from most bearish to most bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IchimokuSignal {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
}

impl IchimokuSignal {
    /// Collapse a trend score in `-4..=4` into the five-value label.
    ///
    /// Four agreeing conditions are "strong", two or three are a plain
    /// buy/sell, anything weaker is neutral.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 4 => Self::StrongBuy,
            2..=3 => Self::Buy,
            -3..=-2 => Self::Sell,
            s if s <= -4 => Self::StrongSell,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IchimokuOutput {
    pub tenkan_sen: Vec<f64>,
    pub kijun_sen: Vec<f64>,
    pub senkou_span_a: Vec<f64>,
    pub senkou_span_b: Vec<f64>,
    pub chikou_span: Vec<f64>,
    pub cloud_color: Vec<CloudColor>,
    pub signal: Vec<IchimokuSignal>,
    /// Logical charting offset: spans belong `displacement` bars ahead, chikou behind.
    pub displacement: usize,
    /// First index where every line has a complete window.
    pub warmup: usize,
}

impl IchimokuOutput {
    pub fn len(&self) -> usize {
        self.tenkan_sen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenkan_sen.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
    displacement: usize,
    name: String,
}

impl Ichimoku {
    pub fn new(
        tenkan_period: usize,
        kijun_period: usize,
        senkou_b_period: usize,
        displacement: usize,
    ) -> Result<Self> {
        validate_period("tenkan_period", tenkan_period)?;
        validate_period("kijun_period", kijun_period)?;
        validate_period("senkou_b_period", senkou_b_period)?;
        validate_period("displacement", displacement)?;
        Ok(Self {
            tenkan_period,
            kijun_period,
            senkou_b_period,
            displacement,
            name: format!(
                "Ichimoku({tenkan_period},{kijun_period},{senkou_b_period},{displacement})"
            ),
        })
    }

    fn longest_window(&self) -> usize {
        self.tenkan_period
            .max(self.kijun_period)
            .max(self.senkou_b_period)
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self {
            tenkan_period: DEFAULT_TENKAN_PERIOD,
            kijun_period: DEFAULT_KIJUN_PERIOD,
            senkou_b_period: DEFAULT_SENKOU_B_PERIOD,
            displacement: DEFAULT_DISPLACEMENT,
            name: format!(
                "Ichimoku({DEFAULT_TENKAN_PERIOD},{DEFAULT_KIJUN_PERIOD},{DEFAULT_SENKOU_B_PERIOD},{DEFAULT_DISPLACEMENT})"
            ),
        }
    }
}

impl Indicator for Ichimoku {
    type Output = IchimokuOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        (self.longest_window() - 1).max(self.displacement)
    }

    fn min_bars(&self) -> usize {
        self.longest_window() + self.displacement
    }

    fn compute(&self, bars: &[Bar]) -> Result<IchimokuOutput> {
        validate_data_length(bars, self.min_bars(), &self.name)?;
        tracing::debug!(indicator = %self.name, bars = bars.len(), "computing");

        let tenkan_sen = rolling_midpoint(bars, self.tenkan_period);
        let kijun_sen = rolling_midpoint(bars, self.kijun_period);
        let senkou_span_b = rolling_midpoint(bars, self.senkou_b_period);
        let senkou_span_a: Vec<f64> = tenkan_sen
            .iter()
            .zip(&kijun_sen)
            .map(|(t, k)| (t + k) / 2.0)
            .collect();
        let chikou_span: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let cloud_color: Vec<CloudColor> = senkou_span_a
            .iter()
            .zip(&senkou_span_b)
            .map(|(a, b)| {
                if a > b {
                    CloudColor::Bullish
                } else {
                    CloudColor::Bearish
                }
            })
            .collect();

        let signal = (0..bars.len())
            .map(|i| {
                let close = bars[i].close;
                let cloud_top = senkou_span_a[i].max(senkou_span_b[i]);
                let cloud_bottom = senkou_span_a[i].min(senkou_span_b[i]);

                let price_vs_cloud = if close > cloud_top {
                    1
                } else if close < cloud_bottom {
                    -1
                } else {
                    0
                };
                let tk_cross = sign(tenkan_sen[i] - kijun_sen[i]);
                let cloud = match cloud_color[i] {
                    CloudColor::Bullish => 1,
                    CloudColor::Bearish => -1,
                };
                // Chikou compares today's close with the close it is charted against
                let chikou = if i >= self.displacement {
                    sign(close - bars[i - self.displacement].close)
                } else {
                    0
                };

                IchimokuSignal::from_score(price_vs_cloud + tk_cross + cloud + chikou)
            })
            .collect();

        Ok(IchimokuOutput {
            tenkan_sen,
            kijun_sen,
            senkou_span_a,
            senkou_span_b,
            chikou_span,
            cloud_color,
            signal,
            displacement: self.displacement,
            warmup: self.lookback(),
        })
    }
}

/// Ichimoku Cloud of the bar series. See [`Ichimoku`].
pub fn ichimoku(
    bars: &[Bar],
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
    displacement: usize,
) -> Result<IchimokuOutput> {
    Ichimoku::new(tenkan_period, kijun_period, senkou_b_period, displacement)?.compute(bars)
}

/// `(highest high + lowest low) / 2` over the trailing `period` bars, full-length.
///
/// Indices before `period - 1` use every bar seen so far.
pub fn rolling_midpoint(bars: &[Bar], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..bars.len())
        .map(|i| {
            let window = &bars[(i + 1).saturating_sub(period)..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            (highest + lowest) / 2.0
        })
        .collect()
}

fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
