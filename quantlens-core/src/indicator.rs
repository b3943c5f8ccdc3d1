//! Indicator trait.
//!
//! Indicators are pure functions: bar history in, derived output out.
//! Every call validates its own inputs and keeps its accumulators local,
//! so implementations are freely shareable across threads.

use crate::domain::Bar;
use crate::error::Result;

/// Trait for series indicators.
///
/// # Look-ahead contamination guard
/// No output value at bar t >= `lookback()` may depend on price data from
/// bar t+1 or later. Warm-up values before `lookback()` may be back-filled.
pub trait Indicator: Send + Sync {
    /// Shape of the computed result (a series or a group of aligned series).
    type Output;

    /// Human-readable name (e.g., "SMA(20)", "ATR(14)").
    fn name(&self) -> &str;

    /// First output index whose value uses a complete history window.
    ///
    /// For full-length outputs, values before this index are warm-up values.
    /// Reduced-length outputs start fully warmed, so this is 0 for them.
    fn lookback(&self) -> usize;

    /// Minimum number of bars `compute` accepts.
    fn min_bars(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Result<Self::Output>;
}
