//! End-to-end indicator scenarios on 100 bars of synthetic data.
//!
//! Tests:
//! 1. RSI / MACD / SuperTrend / Ichimoku on one uptrend-biased sequence.
//! 2. Minimum-length and parameter failures per indicator.
//! 3. Idempotence: identical calls give bit-identical output.
//! 4. Concurrency: the same requests fanned out over rayon agree exactly.

use chrono::{Duration, TimeZone, Utc};
use quantlens_core::config::{
    AtrParams, AverageParams, BollingerParams, IchimokuParams, MacdParams, PivotParams,
    RsiParams, SupertrendParams,
};
use quantlens_core::indicators::{
    atr, bollinger_bands, ema, ichimoku, macd, pivot_points, rsi, sma, supertrend,
    IchimokuSignal, PivotMethod, TrendDirection, TrendSignal,
};
use quantlens_core::{calculate, Bar, IndicatorConfig, IndicatorError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Random walk with upward drift: each close moves `drift ± 1.5`.
fn random_walk(n: usize, drift: f64, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
    let mut close = 100.0;
    (0..n)
        .map(|i| {
            let open = close;
            close = (open + drift + rng.gen_range(-1.5..1.5)).max(1.0);
            let high = open.max(close) + rng.gen_range(0.1..1.0);
            let low = (open.min(close) - rng.gen_range(0.1..1.0)).max(0.0);
            let volume = rng.gen_range(0.0..10_000.0);
            // Irregular spacing: indicators work on ordinal windows
            let ts = base + Duration::minutes(i as i64 * 15 + (i as i64 % 3));
            Bar::new(ts, open, high, low, close, volume)
        })
        .collect()
}

fn all_configs() -> Vec<IndicatorConfig> {
    vec![
        IndicatorConfig::Sma(AverageParams { period: 20 }),
        IndicatorConfig::Ema(AverageParams { period: 20 }),
        IndicatorConfig::Rsi(RsiParams::default()),
        IndicatorConfig::Macd(MacdParams::default()),
        IndicatorConfig::Bollinger(BollingerParams::default()),
        IndicatorConfig::Atr(AtrParams::default()),
        IndicatorConfig::Supertrend(SupertrendParams::default()),
        IndicatorConfig::Ichimoku(IchimokuParams::default()),
        IndicatorConfig::PivotPoints(PivotParams::default()),
    ]
}

// ──────────────────────────────────────────────
// Scenario
// ──────────────────────────────────────────────

#[test]
fn hundred_bar_scenario() {
    let bars = random_walk(100, 0.8, 7);

    let rsi = rsi(&bars, 14).unwrap();
    assert!(!rsi.is_empty());
    assert_eq!(rsi.len(), 86);
    assert!(rsi.iter().all(|v| (0.0..=100.0).contains(v)));

    let macd = macd(&bars, 12, 26, 9).unwrap();
    assert_eq!(macd.macd.len(), macd.signal.len());
    assert_eq!(macd.signal.len(), macd.histogram.len());
    assert_eq!(macd.len(), 100);

    let st = supertrend(&bars, 10, 3.0).unwrap();
    assert_eq!(st.len(), 100);
    assert!(st
        .direction
        .iter()
        .all(|d| matches!(d, TrendDirection::Up | TrendDirection::Down)));
    assert!(st
        .signal
        .iter()
        .all(|s| matches!(s, TrendSignal::Buy | TrendSignal::Sell | TrendSignal::Hold)));
    assert!(!st.buy_indices().is_empty(), "uptrend should produce a buy");

    let cloud = ichimoku(&bars, 9, 26, 52, 26).unwrap();
    assert_eq!(cloud.len(), 100);
    let last = cloud.len() - 1;
    assert!(
        (cloud.senkou_span_a[last] - (cloud.tenkan_sen[last] + cloud.kijun_sen[last]) / 2.0).abs()
            < 1e-9
    );
    assert_eq!(cloud.cloud_color.len(), 100);
    assert_eq!(cloud.signal.len(), 100);
    assert!(cloud.signal.iter().all(|s| IchimokuSignal::StrongSell <= *s));
}

#[test]
fn full_length_and_reduced_length_alignment() {
    let bars = random_walk(60, 0.2, 11);
    assert_eq!(sma(&bars, 20).unwrap().len(), 41);
    assert_eq!(bollinger_bands(&bars, 20, 2.0).unwrap().len(), 41);
    assert_eq!(ema(&bars, 20).unwrap().len(), 60);
    assert_eq!(atr(&bars, 14).unwrap().len(), 60);
}

#[test]
fn ema_and_sma_differ_on_the_same_bar() {
    let bars = random_walk(40, 0.5, 3);
    let ema = ema(&bars, 10).unwrap();
    let sma = sma(&bars, 10).unwrap();
    // sma[0] is the window ending at bar 9
    assert!((ema[9] - sma[0]).abs() > 1e-9);
}

// ──────────────────────────────────────────────
// Failures
// ──────────────────────────────────────────────

#[test]
fn insufficient_data_per_indicator() {
    let short = random_walk(8, 0.5, 1);
    let cases: Vec<(&str, IndicatorError)> = vec![
        ("rsi", rsi(&short, 14).unwrap_err()),
        ("macd", macd(&short, 12, 26, 9).unwrap_err()),
        ("bollinger", bollinger_bands(&short, 20, 2.0).unwrap_err()),
        ("atr", atr(&short, 14).unwrap_err()),
        ("supertrend", supertrend(&short, 10, 3.0).unwrap_err()),
        ("sma", sma(&short, 20).unwrap_err()),
    ];
    for (name, err) in cases {
        assert!(
            err.to_string().contains("Insufficient data"),
            "{name}: {err}"
        );
    }
}

#[test]
fn ichimoku_needs_more_than_52_bars_and_passes_at_100() {
    let bars = random_walk(100, 0.5, 5);
    assert!(matches!(
        ichimoku(&bars[..51], 9, 26, 52, 26).unwrap_err(),
        IndicatorError::InsufficientData { .. }
    ));
    assert!(ichimoku(&bars, 9, 26, 52, 26).is_ok());
}

#[test]
fn zero_period_and_zero_multiplier_are_invalid() {
    let bars = random_walk(100, 0.5, 5);
    let errors = [
        sma(&bars, 0).unwrap_err(),
        ema(&bars, 0).unwrap_err(),
        rsi(&bars, 0).unwrap_err(),
        atr(&bars, 0).unwrap_err(),
        macd(&bars, 12, 26, 0).unwrap_err(),
        bollinger_bands(&bars, 20, 0.0).unwrap_err(),
        supertrend(&bars, 10, 0.0).unwrap_err(),
        supertrend(&bars, 0, 3.0).unwrap_err(),
        ichimoku(&bars, 9, 0, 52, 26).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, IndicatorError::InvalidParameter { .. }), "{err}");
    }
}

#[test]
fn pivot_points_fail_on_empty_input() {
    assert!(pivot_points(&[], PivotMethod::Woodie).is_err());
}

// ──────────────────────────────────────────────
// Purity
// ──────────────────────────────────────────────

#[test]
fn repeated_calls_are_bit_identical() {
    let bars = random_walk(100, 0.3, 42);
    for config in all_configs() {
        let first = calculate(&bars, &config).unwrap();
        let second = calculate(&bars, &config).unwrap();
        assert_eq!(first, second, "{}", config.kind());
    }
}

#[test]
fn parallel_calls_agree_with_sequential() {
    let bars = random_walk(100, 0.3, 42);
    let configs = all_configs();
    let sequential: Vec<_> = configs
        .iter()
        .map(|c| calculate(&bars, c).unwrap())
        .collect();

    let parallel: Vec<_> = (0..32)
        .into_par_iter()
        .map(|i| {
            let idx = i % configs.len();
            (idx, calculate(&bars, &configs[idx]).unwrap())
        })
        .collect();

    for (idx, output) in parallel {
        assert_eq!(output, sequential[idx]);
    }
}
