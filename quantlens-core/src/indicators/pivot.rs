//! Pivot Points: support/resistance ladders from one bar's high, low and close.
//!
//! Computed from the most recent bar only; not a series. Each method is a pure
//! function of (H, L, C):
//! - Classic:   P = (H+L+C)/3, R1 = 2P-L, R2 = P+R, R3 = H+2(P-L) (supports mirrored)
//! - Fibonacci: P = (H+L+C)/3, P ± 0.382R, 0.618R, 1.000R
//! - Camarilla: P = (H+L+C)/3, C ± R*1.1/12, R*1.1/6, R*1.1/4
//! - Woodie:    P = (H+L+2C)/4, ladder as Classic
//!
//! where R = H - L.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::{IndicatorError, Result};
use crate::validation::validate_data_length;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMethod {
    #[default]
    Classic,
    Fibonacci,
    Camarilla,
    Woodie,
}

/// Band a reference price falls in, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PivotPosition {
    #[serde(rename = "below-S3")]
    BelowS3,
    #[serde(rename = "S3-S2")]
    S3S2,
    #[serde(rename = "S2-S1")]
    S2S1,
    #[serde(rename = "S1-P")]
    S1P,
    #[serde(rename = "P-R1")]
    PR1,
    #[serde(rename = "R1-R2")]
    R1R2,
    #[serde(rename = "R2-R3")]
    R2R3,
    #[serde(rename = "above-R3")]
    AboveR3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub method: PivotMethod,
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub reference_price: f64,
    pub position: PivotPosition,
}

impl PivotPoints {
    /// Build the ladder from one high/low/close triple; the close is the reference price.
    pub fn from_hlc(method: PivotMethod, high: f64, low: f64, close: f64) -> Result<Self> {
        if !(high.is_finite() && low.is_finite() && close.is_finite()) {
            return Err(IndicatorError::invalid_parameter(
                "high/low/close",
                "must be finite",
            ));
        }
        if high < low {
            return Err(IndicatorError::invalid_parameter(
                "high",
                format!("high {high} is below low {low}"),
            ));
        }

        let range = high - low;
        let (pivot, r1, r2, r3, s1, s2, s3) = match method {
            PivotMethod::Classic => classic_ladder(high, low, (high + low + close) / 3.0),
            PivotMethod::Woodie => classic_ladder(high, low, (high + low + 2.0 * close) / 4.0),
            PivotMethod::Fibonacci => {
                let p = (high + low + close) / 3.0;
                (
                    p,
                    p + 0.382 * range,
                    p + 0.618 * range,
                    p + range,
                    p - 0.382 * range,
                    p - 0.618 * range,
                    p - range,
                )
            }
            PivotMethod::Camarilla => {
                let p = (high + low + close) / 3.0;
                let step = range * 1.1;
                (
                    p,
                    close + step / 12.0,
                    close + step / 6.0,
                    close + step / 4.0,
                    close - step / 12.0,
                    close - step / 6.0,
                    close - step / 4.0,
                )
            }
        };

        let mut points = Self {
            method,
            pivot,
            r1,
            r2,
            r3,
            s1,
            s2,
            s3,
            reference_price: close,
            position: PivotPosition::PR1,
        };
        points.position = points.position_of(close);
        Ok(points)
    }

    /// Bucket a price into one of the eight bands around the ladder.
    ///
    /// A price exactly on a level belongs to the band above it, except that
    /// the resistance levels themselves close their band from below. The
    /// `S1-P`/`P-R1` split uses the pivot clamped into `[s1, r1]`; Camarilla
    /// ladders are centred on the close, so their pivot can sit outside it.
    pub fn position_of(&self, price: f64) -> PivotPosition {
        let center = self.pivot.max(self.s1).min(self.r1);
        if price > self.r3 {
            PivotPosition::AboveR3
        } else if price > self.r2 {
            PivotPosition::R2R3
        } else if price > self.r1 {
            PivotPosition::R1R2
        } else if price >= center {
            PivotPosition::PR1
        } else if price >= self.s1 {
            PivotPosition::S1P
        } else if price >= self.s2 {
            PivotPosition::S2S1
        } else if price >= self.s3 {
            PivotPosition::S3S2
        } else {
            PivotPosition::BelowS3
        }
    }

    /// Replace the reference price and recompute `position`.
    pub fn with_reference(mut self, price: f64) -> Self {
        self.reference_price = price;
        self.position = self.position_of(price);
        self
    }
}

fn classic_ladder(high: f64, low: f64, p: f64) -> (f64, f64, f64, f64, f64, f64, f64) {
    let range = high - low;
    (
        p,
        2.0 * p - low,
        p + range,
        high + 2.0 * (p - low),
        2.0 * p - high,
        p - range,
        low - 2.0 * (high - p),
    )
}

/// Pivot Points from the last bar, positioned against its close.
pub fn pivot_points(bars: &[Bar], method: PivotMethod) -> Result<PivotPoints> {
    validate_data_length(bars, 1, "PivotPoints")?;
    let last = bars[bars.len() - 1];
    tracing::debug!(?method, bars = bars.len(), "computing pivot points");
    PivotPoints::from_hlc(method, last.high, last.low, last.close)
}

/// Pivot Points from the last bar, positioned against a caller-supplied price.
pub fn pivot_points_with_reference(
    bars: &[Bar],
    method: PivotMethod,
    reference_price: f64,
) -> Result<PivotPoints> {
    if !reference_price.is_finite() {
        return Err(IndicatorError::invalid_parameter(
            "reference_price",
            "must be finite",
        ));
    }
    Ok(pivot_points(bars, method)?.with_reference(reference_price))
}
