use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use quota_forecast::aggregate::{daily_usage, Aggregator};
use quota_forecast::{CatchEvent, ForecastError};
use rstest::rstest;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

#[test]
fn test_daily_usage_sums_and_fills_gaps() {
    init_tracing();

    let events = vec![
        CatchEvent::new("2024-06-04", 5.0),
        CatchEvent::new("2024-06-04T13:00:00", 2.5),
        CatchEvent::new("2024-06-07 08:00:00", 3.0),
        CatchEvent::new("06/10/2024", 1.0),
    ];

    let series = daily_usage(&events, today(), 6).unwrap();

    assert_eq!(series.len(), 7);
    assert_eq!(
        series.points()[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
    );
    assert_eq!(series.last_date(), Some(today()));
    assert_eq!(series.values(), vec![7.5, 0.0, 0.0, 3.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_daily_usage_skips_bad_events() {
    init_tracing();

    let events = vec![
        CatchEvent::new("garbage", 100.0),
        CatchEvent::new("2024-06-09", -4.0),
        CatchEvent::new("2024-06-09", f64::NAN),
        CatchEvent::new("2024-05-01", 50.0),
        CatchEvent::new("2024-06-11", 50.0),
        CatchEvent::new("2024-06-09", 4.0),
    ];

    let series = daily_usage(&events, today(), 2).unwrap();
    assert_eq!(series.values(), vec![0.0, 4.0, 0.0]);
}

#[test]
fn test_daily_usage_without_events() {
    let aggregator = Aggregator::new(30).unwrap();
    let series = aggregator.daily_usage(&[], today()).unwrap();

    assert_eq!(series.len(), 31);
    assert!(series.values().iter().all(|v| *v == 0.0));
}

#[test]
fn test_daily_usage_dates_are_consecutive() {
    let series = daily_usage(&[], today(), 45).unwrap();

    for pair in series.points().windows(2) {
        assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
    }
}

#[rstest]
#[case(0)]
#[case(-3)]
fn test_non_positive_window_is_invalid(#[case] historical_days: i64) {
    assert!(matches!(
        Aggregator::new(historical_days),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        daily_usage(&[], today(), historical_days),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_window_beyond_calendar_range() {
    let aggregator = Aggregator::new(i64::MAX).unwrap();

    assert!(matches!(
        aggregator.daily_usage(&[], today()),
        Err(ForecastError::InvalidParameter(_))
    ));
}
