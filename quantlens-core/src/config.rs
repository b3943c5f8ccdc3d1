//! Serializable indicator requests.
//!
//! One closed enum names every series indicator together with its parameter
//! set. Parameter structs default to the conventional settings, so a config
//! only needs to spell out what it changes:
//!
//! ```toml
//! indicator = "macd"
//! fast_period = 8
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::indicators::atr::DEFAULT_ATR_PERIOD;
use crate::indicators::bollinger::{DEFAULT_BOLLINGER_PERIOD, DEFAULT_STD_DEV_MULTIPLIER};
use crate::indicators::ichimoku::{
    DEFAULT_DISPLACEMENT, DEFAULT_KIJUN_PERIOD, DEFAULT_SENKOU_B_PERIOD, DEFAULT_TENKAN_PERIOD,
};
use crate::indicators::macd::{DEFAULT_FAST_PERIOD, DEFAULT_SIGNAL_PERIOD, DEFAULT_SLOW_PERIOD};
use crate::indicators::rsi::DEFAULT_RSI_PERIOD;
use crate::indicators::supertrend::{DEFAULT_SUPERTREND_MULTIPLIER, DEFAULT_SUPERTREND_PERIOD};
use crate::indicators::{Atr, Bollinger, Ema, Ichimoku, Macd, PivotMethod, Rsi, Sma, Supertrend};

pub const DEFAULT_AVERAGE_PERIOD: usize = 20;

// ─── Parameter sets ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AverageParams {
    pub period: usize,
}

impl Default for AverageParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_AVERAGE_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrParams {
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev_multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_BOLLINGER_PERIOD,
            std_dev_multiplier: DEFAULT_STD_DEV_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupertrendParams {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for SupertrendParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_SUPERTREND_PERIOD,
            multiplier: DEFAULT_SUPERTREND_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuParams {
    pub tenkan_period: usize,
    pub kijun_period: usize,
    pub senkou_b_period: usize,
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan_period: DEFAULT_TENKAN_PERIOD,
            kijun_period: DEFAULT_KIJUN_PERIOD,
            senkou_b_period: DEFAULT_SENKOU_B_PERIOD,
            displacement: DEFAULT_DISPLACEMENT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotParams {
    pub method: PivotMethod,
    /// Price to bucket against the ladder; the last close when absent.
    pub reference_price: Option<f64>,
}

// ─── Request enum ────────────────────────────────────────────────────

/// A named indicator together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "indicator", rename_all = "snake_case")]
pub enum IndicatorConfig {
    Sma(AverageParams),
    Ema(AverageParams),
    Rsi(RsiParams),
    Macd(MacdParams),
    Bollinger(BollingerParams),
    Atr(AtrParams),
    Supertrend(SupertrendParams),
    Ichimoku(IchimokuParams),
    PivotPoints(PivotParams),
}

impl IndicatorConfig {
    /// Parse a single indicator request from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| IndicatorError::Config(format!("parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single indicator request from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| IndicatorError::Config(format!("parse JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| IndicatorError::Config(format!("serialize TOML: {e}")))
    }

    /// Tag used in serialized form ("sma", "macd", ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sma(_) => "sma",
            Self::Ema(_) => "ema",
            Self::Rsi(_) => "rsi",
            Self::Macd(_) => "macd",
            Self::Bollinger(_) => "bollinger",
            Self::Atr(_) => "atr",
            Self::Supertrend(_) => "supertrend",
            Self::Ichimoku(_) => "ichimoku",
            Self::PivotPoints(_) => "pivot_points",
        }
    }

    /// Check every parameter without touching data.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Sma(p) => Sma::new(p.period).map(drop),
            Self::Ema(p) => Ema::new(p.period).map(drop),
            Self::Rsi(p) => Rsi::new(p.period).map(drop),
            Self::Atr(p) => Atr::new(p.period).map(drop),
            Self::Macd(p) => Macd::new(p.fast_period, p.slow_period, p.signal_period).map(drop),
            Self::Bollinger(p) => Bollinger::new(p.period, p.std_dev_multiplier).map(drop),
            Self::Supertrend(p) => Supertrend::new(p.period, p.multiplier).map(drop),
            Self::Ichimoku(p) => Ichimoku::new(
                p.tenkan_period,
                p.kijun_period,
                p.senkou_b_period,
                p.displacement,
            )
            .map(drop),
            Self::PivotPoints(p) => match p.reference_price {
                Some(price) if !price.is_finite() => Err(IndicatorError::invalid_parameter(
                    "reference_price",
                    "must be finite",
                )),
                _ => Ok(()),
            },
        }
    }

    /// Deterministic BLAKE3 digest of the canonical JSON form.
    ///
    /// Two configs with identical parameters share a fingerprint, so hosts can
    /// key cached series by `(dataset, fingerprint)`.
    pub fn fingerprint(&self) -> String {
        // serde_json::Value objects keep sorted keys, giving a canonical encoding
        let canonical = serde_json::to_value(self)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| format!("{self:?}"));
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}
