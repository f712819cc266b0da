//! Example: Statistical Risk Model on Simulated Prices
//!
//! Walks through the full statrisk workflow on synthetic data:
//! 1. Simulating daily closes for a small universe driven by latent factors
//! 2. Computing per-symbol log returns with Polars
//! 3. Pivoting the long frame into a dense returns matrix
//! 4. Fitting the PCA risk model and predicting portfolio risk
//!
//! Run with: `cargo run --example risk_model --features full`

use chrono::{Days, NaiveDate};
use polars::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use statrisk::{
    model::{RiskModelConfig, StatisticalRiskModel, SvdSolver},
    primitives::PortfolioWeights,
    utils::{LogReturns, returns_matrix_from_frame, with_signal},
};

/// Number of simulated trading days (~2 years)
const TRADING_DAYS: usize = 504;

/// Universe, grouped in threes by "sector"
const SYMBOLS: &[&str] =
    &["AAPL", "MSFT", "NVDA", "JPM", "BAC", "GS", "XOM", "CVX", "COP", "JNJ", "PFE", "MRK"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== statrisk: PCA risk model on simulated prices ===\n");

    // =========================================================================
    // SIMULATE PRICES
    // =========================================================================

    let prices = simulate_prices(42)?;
    println!("Simulated {} price rows for {} symbols\n", prices.height(), SYMBOLS.len());

    // =========================================================================
    // LOG RETURNS AND PIVOT
    // =========================================================================

    let returns_df = with_signal(prices.lazy(), &LogReturns, "close", "date", "symbol")
        .filter(col("log_returns").is_not_null())
        .collect()?;
    let returns = returns_matrix_from_frame(&returns_df, "log_returns")?;
    let (t, n) = returns.shape();
    println!("Returns matrix: {t} periods x {n} assets\n");

    // =========================================================================
    // FIT THE RISK MODEL
    // =========================================================================

    let config = RiskModelConfig { n_factors: 4, solver: SvdSolver::Full, ..Default::default() };
    let snapshot = StatisticalRiskModel::new(config).fit(&returns)?;

    println!("Explained variance ratio:");
    for (factor, ratio) in snapshot
        .betas()
        .factors()
        .iter()
        .zip(snapshot.model().explained_variance_ratio().iter())
    {
        println!("  {:<4} {:>6.2}%", factor.as_str(), ratio * 100.0);
    }

    println!("\nAnnualized factor volatility:");
    let factor_cov = snapshot.factor_cov();
    for (factor, var) in factor_cov.factors().iter().zip(factor_cov.diagonal().iter()) {
        println!("  {:<4} {:>6.2}%", factor.as_str(), var.sqrt() * 100.0);
    }

    println!("\nFactor betas:");
    print!("  {:<6}", "");
    for factor in snapshot.betas().factors() {
        print!("{:>8}", factor.as_str());
    }
    println!();
    for (symbol, row) in snapshot.betas().symbols().iter().zip(snapshot.betas().values().rows()) {
        print!("  {:<6}", symbol.as_str());
        for beta in row {
            print!("{beta:>8.3}");
        }
        println!();
    }

    println!("\nAnnualized idiosyncratic volatility:");
    for (symbol, var) in snapshot.idio_var_vector().iter() {
        println!("  {:<6} {:>6.2}%", symbol.as_str(), var.sqrt() * 100.0);
    }

    // =========================================================================
    // PORTFOLIO RISK
    // =========================================================================

    let portfolios = [
        ("equal weight", PortfolioWeights::equal(n)),
        ("tech vs energy", long_short(n, &[0, 1, 2], &[6, 7, 8])),
        ("banks only", long_short(n, &[3, 4, 5], &[])),
    ];

    println!("\nPredicted portfolio risk:");
    println!("  {:<16} {:>8} {:>8} {:>8} {:>8}", "portfolio", "total", "factor", "specific", "share");
    for (name, weights) in &portfolios {
        let risk = snapshot.predict_portfolio_risk(weights)?;
        let parts = snapshot.risk_decomposition(weights)?;
        println!(
            "  {name:<16} {:>7.2}% {:>7.2}% {:>7.2}% {:>7.1}%",
            risk * 100.0,
            parts.factor_risk * 100.0,
            parts.specific_risk * 100.0,
            parts.factor_share() * 100.0
        );
    }

    Ok(())
}

/// Two market-wide factors, a sector factor per group of three, and noise.
fn simulate_prices(seed: u64) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let market = Normal::new(0.0003, 0.010)?;
    let style = Normal::new(0.0, 0.006)?;
    let sector = Normal::new(0.0, 0.005)?;
    let noise = Normal::new(0.0, 0.008)?;

    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("invalid start date")?;
    let n_sectors = SYMBOLS.len().div_ceil(3);

    let mut dates = Vec::with_capacity(TRADING_DAYS * SYMBOLS.len());
    let mut symbols = Vec::with_capacity(TRADING_DAYS * SYMBOLS.len());
    let mut closes = Vec::with_capacity(TRADING_DAYS * SYMBOLS.len());
    let mut log_price = vec![100f64.ln(); SYMBOLS.len()];

    for day in 0..TRADING_DAYS {
        let date = start + Days::new(day as u64);
        let m = market.sample(&mut rng);
        let s = style.sample(&mut rng);
        let sectors: Vec<f64> = (0..n_sectors).map(|_| sector.sample(&mut rng)).collect();

        for (i, symbol) in SYMBOLS.iter().enumerate() {
            if day > 0 {
                let beta = 0.7 + 0.05 * i as f64;
                let tilt = if i % 2 == 0 { 1.0 } else { -1.0 };
                log_price[i] += beta * m + tilt * s + sectors[i / 3] + noise.sample(&mut rng);
            }
            dates.push(date);
            symbols.push(*symbol);
            closes.push(log_price[i].exp());
        }
    }

    Ok(DataFrame::new(vec![
        Column::new("date".into(), dates),
        Column::new("symbol".into(), symbols),
        Column::new("close".into(), closes),
    ])?)
}

/// Unit gross long leg and, optionally, an equal short leg.
fn long_short(n: usize, long: &[usize], short: &[usize]) -> PortfolioWeights {
    let mut weights = vec![0.0; n];
    for &i in long {
        weights[i] = 1.0 / long.len() as f64;
    }
    for &i in short {
        weights[i] = -1.0 / short.len() as f64;
    }
    PortfolioWeights::from(weights)
}
