//! Concrete indicator implementations.
//!
//! Layering is strictly bottom-up: averages (SMA, EMA) feed the oscillators
//! and bands (RSI, MACD, Bollinger, ATR), which feed the composite overlays
//! (SuperTrend, Ichimoku). Pivot Points and Fibonacci Retracement are
//! single-point level calculators outside the series machinery.
//!
//! Alignment conventions:
//! - Reduced-length (`bars.len() - period + 1` values, index 0 is the first
//!   full window): SMA, Bollinger Bands. RSI is reduced by `period` because
//!   its first value needs `period` price changes.
//! - Full-length (one value per bar, warm-up values before `lookback()`):
//!   EMA, MACD, ATR, SuperTrend, Ichimoku.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod ichimoku;
pub mod macd;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod supertrend;

pub use atr::{atr, true_range, wilder_smooth, Atr};
pub use bollinger::{bollinger_bands, Bollinger, BollingerOutput};
pub use ema::{ema, ema_of_series, Ema};
pub use fibonacci::{
    fibonacci_retracement, FibonacciLevel, FibonacciLevels, NearestLevel, Trend, FIBONACCI_RATIOS,
};
pub use ichimoku::{
    ichimoku, rolling_midpoint, CloudColor, Ichimoku, IchimokuOutput, IchimokuSignal,
};
pub use macd::{macd, Macd, MacdOutput};
pub use pivot::{
    pivot_points, pivot_points_with_reference, PivotMethod, PivotPoints, PivotPosition,
};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, sma_of_series, Sma};
pub use supertrend::{supertrend, Supertrend, SupertrendOutput, TrendDirection, TrendSignal};

/// Extract close prices.
pub(crate) fn closes(bars: &[crate::domain::Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let data: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_bars(&data)
}

/// Create daily bars from `(open, high, low, close)` tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            Bar::new(
                base + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                1000.0,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
