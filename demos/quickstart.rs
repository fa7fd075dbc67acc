//! Quickstart example demonstrating basic usage of anofox-sweep.
//!
//! Run with: cargo run --example quickstart

use anofox_sweep::prelude::*;

fn print_table(title: &str, table: &Table, max_rows: usize) {
    println!("\n--- {title} ({} rows) ---", table.n_rows());
    let names = table.column_names();
    println!("{}", names.iter().map(|n| format!("{n:>14}")).collect::<String>());
    println!("{:-<width$}", "", width = 14 * names.len());
    for row in table.rows().take(max_rows) {
        let cells: String = row
            .iter()
            .map(|value| match value {
                Value::Null => format!("{:>14}", "NA"),
                Value::Number(x) => format!("{x:>14.4}"),
                Value::Text(s) => format!("{s:>14}"),
                Value::Period(p) => format!("{p:>14.3}"),
                Value::Timestamp(t) => format!("{:>14}", t.format("%Y-%m-%d")),
            })
            .collect();
        println!("{cells}");
    }
}

fn main() -> Result<()> {
    println!("=== anofox-sweep Quickstart ===");

    // 1. Monthly series with trend and seasonality, starting January 2020
    let values: Vec<f64> = (0..36)
        .map(|i| {
            100.0                                                   // base level
            + 0.8 * i as f64                                        // linear trend
            + 12.0 * (i as f64 * std::f64::consts::PI / 6.0).sin() // seasonal pattern
        })
        .collect();
    let series = TimeSeries::regular(values.clone(), 2020.0, 12.0)?;
    println!("Created monthly series with {} observations", series.len());

    // 2. Snapshot of a fitted ARIMA(1,0,1) with non-zero mean
    let residuals: Vec<f64> = (0..36).map(|i| ((i % 5) as f64 - 2.0) * 0.7).collect();
    let arima = ArimaFit::new(ArimaOrder::new(1, 0, 1), series.clone(), 2.1)
        .with_ar(&[0.71])
        .with_ma(&[-0.24])
        .with_intercept(114.2)
        .with_std_errors(vec![0.12, 0.17, 3.4])
        .with_information_criteria(-77.9, 163.8, Some(165.1), 170.1)
        .with_residuals(residuals);
    let model = ModelResult::from(arima);

    let normalizer = Normalizer::new();
    print_table("tidy", &normalizer.tidy(&model)?, 10);
    print_table("glance", &normalizer.glance(&model)?, 1);
    print_table("augment", &normalizer.augment(&model, &AugmentOptions::default())?, 6);

    // 3. STL decomposition components
    let season: Vec<f64> = (0..36)
        .map(|i| 12.0 * (i as f64 * std::f64::consts::PI / 6.0).sin())
        .collect();
    let trend: Vec<f64> = (0..36).map(|i| 100.0 + 0.8 * i as f64).collect();
    let stl = StlFit::new(series.clone(), season, trend, vec![0.0; 36]);
    print_table(
        "tidy_decomp",
        &normalizer.tidy_decomp(&stl.into(), &DecompOptions::default())?,
        6,
    );

    // 4. Forecast with 80% and 95% intervals, history included
    let mean = vec![130.0, 128.5, 127.9, 129.2, 131.0, 132.4];
    let forecast = ForecastResult::new("ARIMA(1,0,1) with non-zero mean", series, mean.clone())
        .with_interval(
            80.0,
            mean.iter().map(|m| m - 1.9).collect(),
            mean.iter().map(|m| m + 1.9).collect(),
        )?
        .with_interval(
            95.0,
            mean.iter().map(|m| m - 2.9).collect(),
            mean.iter().map(|m| m + 2.9).collect(),
        )?;
    let swept = normalizer.sweep(&forecast, &SweepOptions::default())?;
    print_table("sweep", &swept, swept.n_rows());

    Ok(())
}
