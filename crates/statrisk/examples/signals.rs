//! Example: Price Signals and Quantile Buckets
//!
//! Demonstrates the signal utilities on a simulated random-walk universe:
//! - `LookbackHigh` / `LookbackLow`: trailing 20-day extremes per symbol
//! - `LogReturns`: daily log returns per symbol
//! - `bucket_quantiles`: terciles of each symbol's distance from its high
//!
//! Run with: `cargo run --example signals --features full`

use chrono::{Days, NaiveDate};
use polars::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use statrisk::{
    traits::TimeSeriesTransform,
    utils::{LogReturns, LookbackConfig, LookbackHigh, LookbackLow, bucket_quantiles, with_signal},
};

const SYMBOLS: &[&str] = &["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"];
const DAYS: usize = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== statrisk: price signals ===\n");

    let prices = random_walk_prices(7)?;

    let window = LookbackConfig { window: 20, min_periods: 20 };
    let signals: [&dyn TimeSeriesTransform; 3] = [
        &LogReturns,
        &LookbackHigh::with_config(window)?,
        &LookbackLow::with_config(window)?,
    ];

    let mut lf = prices.lazy();
    for signal in signals {
        lf = with_signal(lf, signal, "close", "date", "symbol");
    }

    // Latest row per symbol
    let latest = lf
        .filter(col("date").eq(col("date").max()))
        .sort(["symbol"], SortMultipleOptions::default())
        .collect()?;

    let symbols: Vec<String> = latest
        .column("symbol")?
        .str()?
        .into_iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect();
    let close = f64_values(&latest, "close")?;
    let high = f64_values(&latest, "lookback_high")?;
    let low = f64_values(&latest, "lookback_low")?;
    let last_return = f64_values(&latest, "log_returns")?;

    let drawdown: Vec<f64> = close.iter().zip(&high).map(|(c, h)| c / h - 1.0).collect();
    let buckets = bucket_quantiles(&drawdown, 3)?;

    println!(
        "  {:<6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
        "symbol", "close", "20d high", "20d low", "last ret", "from high", "tercile"
    );
    for i in 0..symbols.len() {
        println!(
            "  {:<6} {:>9.2} {:>9.2} {:>9.2} {:>8.2}% {:>8.2}% {:>7}",
            symbols[i],
            close[i],
            high[i],
            low[i],
            last_return[i] * 100.0,
            drawdown[i] * 100.0,
            buckets[i].map_or_else(|| "-".to_string(), |b| b.to_string())
        );
    }

    Ok(())
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, PolarsError> {
    Ok(df.column(name)?.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn random_walk_prices(seed: u64) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = Normal::new(0.0, 0.015)?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;

    let mut dates = Vec::new();
    let mut symbols = Vec::new();
    let mut closes = Vec::new();
    for symbol in SYMBOLS {
        let mut log_price = 50f64.ln();
        for day in 0..DAYS {
            log_price += step.sample(&mut rng);
            dates.push(start + Days::new(day as u64));
            symbols.push(*symbol);
            closes.push(log_price.exp());
        }
    }

    Ok(DataFrame::new(vec![
        Column::new("date".into(), dates),
        Column::new("symbol".into(), symbols),
        Column::new("close".into(), closes),
    ])?)
}
