use chrono::{Datelike, Duration, NaiveDate};
use quota_forecast::{
    forecast, ForecastRequest, ModelName, QuotaContext, QuotaOutlook, TimeSeries,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Quota Forecast: Model Comparison Example");
    println!("========================================\n");

    // Create sample data
    println!("Creating sample landings...");
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("invalid start date")?;
    let history = create_sample_landings(start, 56)?;
    let quota = QuotaContext::new(
        400.0,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid quota start")?,
        NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("invalid quota end")?,
    )?;

    println!(
        "Sample data created: {} days, remaining quota {:.1} until {}\n",
        history.len(),
        quota.remaining_amount(),
        quota.end_date()
    );

    // Project the next two weeks with every model
    for model in ModelName::ALL {
        let request = ForecastRequest::new(history.clone(), quota.clone(), model, 14);
        let result = forecast(&request)?;
        let outlook = QuotaOutlook::assess(&result, &quota);

        println!("{}:", model);
        let rounded: Vec<String> = result.values().iter().map(|v| format!("{:.1}", v)).collect();
        println!("  Daily projection: [{}]", rounded.join(", "));
        println!("  Projected usage:  {:.1}", outlook.projected_usage);
        match outlook.exhausted_on {
            Some(date) => println!("  Exhausted on:     {}", date),
            None => println!("  Exhausted on:     not within horizon"),
        }
        println!();
    }

    println!("Summary:");
    println!("1. Flat models repeat one value for every forecast day");
    println!("2. Seasonal models pick up the weekend drop in landings");
    println!("3. Every projection stays within [0, remaining quota]");

    Ok(())
}

/// Daily landings with a slow upward trend and a weekly rhythm
fn create_sample_landings(
    start: NaiveDate,
    days: i64,
) -> Result<TimeSeries, Box<dyn std::error::Error>> {
    let values: Vec<f64> = (0..days)
        .map(|i| {
            let date = start + Duration::days(i);
            let weekday = date.weekday().num_days_from_monday();

            // Boats mostly stay in port at the weekend
            let base = if weekday >= 5 { 4.0 } else { 18.0 };
            let trend = 0.1 * i as f64;
            let noise = (i as f64 * 0.7).sin() * 1.5;

            (base + trend + noise).max(0.0)
        })
        .collect();

    Ok(TimeSeries::from_values(start, &values)?)
}
