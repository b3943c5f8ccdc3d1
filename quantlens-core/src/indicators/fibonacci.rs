//! Fibonacci Retracement levels between a swing high and a swing low.
//!
//! Uptrend: 0% = low, 100% = high, level(X) = low + X * (high - low).
//! Downtrend: 0% = high, 100% = low, level(X) = high - X * (high - low).
//! Extensions (127.2%, 161.8%) lie beyond the 100% level.

use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// Level labels and their ratios, in ascending percentage order.
pub const FIBONACCI_RATIOS: [(&str, f64); 9] = [
    ("0%", 0.0),
    ("23.6%", 0.236),
    ("38.2%", 0.382),
    ("50%", 0.5),
    ("61.8%", 0.618),
    ("78.6%", 0.786),
    ("100%", 1.0),
    ("127.2%", 1.272),
    ("161.8%", 1.618),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub name: String,
    pub ratio: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestLevel {
    pub name: String,
    pub price: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub trend: Trend,
    pub high: f64,
    pub low: f64,
    levels: Vec<FibonacciLevel>,
    pub current_price: Option<f64>,
    pub nearest: Option<NearestLevel>,
}

impl FibonacciLevels {
    /// All levels in ascending percentage order.
    pub fn levels(&self) -> &[FibonacciLevel] {
        &self.levels
    }

    /// Price of the level labelled `name` (e.g. "61.8%").
    pub fn get(&self, name: &str) -> Option<f64> {
        self.levels.iter().find(|l| l.name == name).map(|l| l.price)
    }

    pub fn nearest_level(&self) -> Option<f64> {
        self.nearest.as_ref().map(|n| n.price)
    }

    pub fn nearest_level_name(&self) -> Option<&str> {
        self.nearest.as_ref().map(|n| n.name.as_str())
    }
}

/// Compute retracement and extension levels, optionally locating `current_price`.
///
/// The nearest level is chosen by absolute distance; on a tie the lower
/// percentage wins.
pub fn fibonacci_retracement(
    high: f64,
    low: f64,
    trend: Trend,
    current_price: Option<f64>,
) -> Result<FibonacciLevels> {
    if !high.is_finite() || !low.is_finite() {
        return Err(IndicatorError::invalid_parameter(
            "high/low",
            "must be finite",
        ));
    }
    if high <= low {
        return Err(IndicatorError::invalid_parameter(
            "high",
            "High must be greater than low",
        ));
    }
    if let Some(price) = current_price {
        if !price.is_finite() {
            return Err(IndicatorError::invalid_parameter(
                "current_price",
                "must be finite",
            ));
        }
    }
    tracing::debug!(high, low, ?trend, "computing fibonacci retracement");

    let range = high - low;
    let (start, end) = match trend {
        Trend::Uptrend => (low, high),
        Trend::Downtrend => (high, low),
    };
    let levels: Vec<FibonacciLevel> = FIBONACCI_RATIOS
        .iter()
        .map(|&(name, ratio)| {
            // 0% and 100% are the swing points themselves, not a float product
            let price = if ratio == 0.0 {
                start
            } else if ratio == 1.0 {
                end
            } else {
                match trend {
                    Trend::Uptrend => low + ratio * range,
                    Trend::Downtrend => high - ratio * range,
                }
            };
            FibonacciLevel {
                name: name.to_string(),
                ratio,
                price,
            }
        })
        .collect();

    let nearest = current_price.and_then(|price| {
        let mut best: Option<NearestLevel> = None;
        for level in &levels {
            let distance = (level.price - price).abs();
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(NearestLevel {
                    name: level.name.clone(),
                    price: level.price,
                    distance,
                });
            }
        }
        best
    });

    Ok(FibonacciLevels {
        trend,
        high,
        low,
        levels,
        current_price,
        nearest,
    })
}
