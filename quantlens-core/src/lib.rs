//! QuantLens Core: technical-indicator calculation engine.
//!
//! A pure function library: given a chronological bar sequence and indicator
//! parameters, it returns derived series, trading signals, or price levels.
//! - Windowed averages (SMA, EMA)
//! - Oscillators and bands (RSI, MACD, Bollinger Bands, ATR)
//! - Composite trend overlays (SuperTrend, Ichimoku Cloud)
//! - Static levels (Pivot Points, Fibonacci Retracement)
//!
//! Every call validates its inputs up front and either returns a complete,
//! aligned result or an [`IndicatorError`]. No state survives a call.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod indicators;
pub mod validation;

pub use config::IndicatorConfig;
pub use domain::Bar;
pub use engine::{calculate, calculate_all, IndicatorOutput};
pub use error::{IndicatorError, Result};
pub use indicator::Indicator;
pub use validation::{validate_bars, validate_data_length};
