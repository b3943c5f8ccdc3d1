//! Dispatch from an [`IndicatorConfig`] to the concrete indicator.
//!
//! `calculate` is the single entry point hosts use when the indicator is
//! chosen at runtime: it validates parameters, checks the bar sequence, and
//! returns one aligned output. Nothing is cached between calls.

use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;
use crate::domain::Bar;
use crate::error::Result;
use crate::indicator::Indicator;
use crate::indicators::{
    pivot_points, pivot_points_with_reference, Atr, Bollinger, BollingerOutput, Ema, Ichimoku,
    IchimokuOutput, Macd, MacdOutput, PivotPoints, Rsi, Sma, Supertrend, SupertrendOutput,
};
use crate::validation::validate_bars;

/// Result of one indicator request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IndicatorOutput {
    /// A single numeric series (SMA, EMA, RSI, ATR).
    Series(Vec<f64>),
    Macd(MacdOutput),
    Bollinger(BollingerOutput),
    Supertrend(SupertrendOutput),
    Ichimoku(IchimokuOutput),
    PivotPoints(PivotPoints),
}

impl IndicatorOutput {
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(values) => Some(values),
            _ => None,
        }
    }
}

/// Compute the indicator named by `config` over `bars`.
pub fn calculate(bars: &[Bar], config: &IndicatorConfig) -> Result<IndicatorOutput> {
    config.validate()?;
    validate_bars(bars)?;
    tracing::debug!(
        indicator = config.kind(),
        bars = bars.len(),
        ?config,
        "dispatching"
    );

    match *config {
        IndicatorConfig::Sma(p) => run(Sma::new(p.period)?, bars).map(IndicatorOutput::Series),
        IndicatorConfig::Ema(p) => run(Ema::new(p.period)?, bars).map(IndicatorOutput::Series),
        IndicatorConfig::Rsi(p) => run(Rsi::new(p.period)?, bars).map(IndicatorOutput::Series),
        IndicatorConfig::Atr(p) => run(Atr::new(p.period)?, bars).map(IndicatorOutput::Series),
        IndicatorConfig::Macd(p) => run(
            Macd::new(p.fast_period, p.slow_period, p.signal_period)?,
            bars,
        )
        .map(IndicatorOutput::Macd),
        IndicatorConfig::Bollinger(p) => run(Bollinger::new(p.period, p.std_dev_multiplier)?, bars)
            .map(IndicatorOutput::Bollinger),
        IndicatorConfig::Supertrend(p) => run(Supertrend::new(p.period, p.multiplier)?, bars)
            .map(IndicatorOutput::Supertrend),
        IndicatorConfig::Ichimoku(p) => run(
            Ichimoku::new(
                p.tenkan_period,
                p.kijun_period,
                p.senkou_b_period,
                p.displacement,
            )?,
            bars,
        )
        .map(IndicatorOutput::Ichimoku),
        IndicatorConfig::PivotPoints(p) => match p.reference_price {
            Some(price) => pivot_points_with_reference(bars, p.method, price),
            None => pivot_points(bars, p.method),
        }
        .map(IndicatorOutput::PivotPoints),
    }
}

/// Compute several requests over the same bars, failing on the first error.
pub fn calculate_all(bars: &[Bar], configs: &[IndicatorConfig]) -> Result<Vec<IndicatorOutput>> {
    configs.iter().map(|config| calculate(bars, config)).collect()
}

fn run<I: Indicator>(indicator: I, bars: &[Bar]) -> Result<I::Output> {
    indicator.compute(bars)
}
