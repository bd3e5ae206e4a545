use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use quota_forecast::{
    forecast, ForecastError, ForecastRequest, ModelName, ModelParams, QuotaContext, TimeSeries,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn series(values: &[f64]) -> TimeSeries {
    TimeSeries::from_values(start_date(), values).unwrap()
}

fn quota(remaining: f64) -> QuotaContext {
    QuotaContext::new(
        remaining,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
    .unwrap()
}

fn random_series(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0.0..50.0)).collect()
}

#[test]
fn test_moving_average_scenario() {
    let params = ModelParams {
        window_size: Some(7),
        ..ModelParams::default()
    };
    let request = ForecastRequest::new(series(&[10.0; 7]), quota(1000.0), ModelName::MovingAverage, 3)
        .with_params(params);

    let result = forecast(&request).unwrap();
    assert_eq!(result.values(), vec![10.0, 10.0, 10.0]);
}

#[test]
fn test_linear_scenario() {
    let request = ForecastRequest::new(
        series(&[0.0, 10.0, 20.0, 30.0]),
        quota(1000.0),
        ModelName::Linear,
        2,
    );

    let result = forecast(&request).unwrap();
    assert_eq!(result.values(), vec![40.0, 50.0]);
}

#[test]
fn test_linear_scenario_clamped_to_remaining_quota() {
    let request = ForecastRequest::new(
        series(&[0.0, 10.0, 20.0, 30.0]),
        quota(45.0),
        ModelName::Linear,
        2,
    );

    let result = forecast(&request).unwrap();
    assert_eq!(result.values(), vec![40.0, 45.0]);
    // The raw trend line is kept for diagnostics
    assert_eq!(result.unconstrained(), &[40.0, 50.0]);
}

#[test]
fn test_result_dates_follow_last_observation() {
    let request = ForecastRequest::new(series(&[1.0, 2.0, 3.0]), quota(100.0), ModelName::Linear, 4);
    let result = forecast(&request).unwrap();

    let last = start_date() + Duration::days(2);
    let expected: Vec<NaiveDate> = (1..=4).map(|d| last + Duration::days(d)).collect();
    assert_eq!(result.dates(), expected);
    assert_eq!(result.horizon(), 4);
}

#[rstest]
fn test_every_model_respects_bounds(
    #[values(
        ModelName::Linear,
        ModelName::Exponential,
        ModelName::MovingAverage,
        ModelName::HoltWinters,
        ModelName::Seasonal,
        ModelName::ChangePoint
    )]
    model: ModelName,
    #[values(1, 7, 45)] seed: u64,
) {
    let remaining = 15.0;
    let request = ForecastRequest::new(series(&random_series(seed, 28)), quota(remaining), model, 14);

    let result = forecast(&request).unwrap();
    assert_eq!(result.horizon(), 14);
    for value in result.values() {
        assert!(
            (0.0..=remaining).contains(&value),
            "{} projected {} outside [0, {}]",
            model,
            value,
            remaining
        );
    }
}

#[rstest]
#[case(ModelName::Exponential)]
#[case(ModelName::MovingAverage)]
fn test_flat_models_repeat_one_value(#[case] model: ModelName) {
    let request = ForecastRequest::new(series(&random_series(3, 20)), quota(1000.0), model, 6);
    let values = forecast(&request).unwrap().values();

    assert!(values.iter().all(|v| *v == values[0]));
}

#[test]
fn test_linear_first_day_independent_of_horizon() {
    let data = series(&random_series(11, 30));
    let one = forecast(&ForecastRequest::new(data.clone(), quota(1000.0), ModelName::Linear, 1)).unwrap();
    let two = forecast(&ForecastRequest::new(data, quota(1000.0), ModelName::Linear, 2)).unwrap();

    assert_abs_diff_eq!(one.values()[0], two.values()[0], epsilon = 1e-9);
}

#[rstest]
#[case(ModelName::HoltWinters)]
#[case(ModelName::Seasonal)]
fn test_seasonal_models_minimum_history(#[case] model: ModelName) {
    let short = ForecastRequest::new(series(&[4.0; 6]), quota(100.0), model, 3);
    match forecast(&short) {
        Err(ForecastError::InsufficientData { needed, got, .. }) => {
            assert_eq!((needed, got), (7, 6));
        }
        other => panic!("Expected InsufficientData, got {:?}", other),
    }

    let exact = ForecastRequest::new(series(&[4.0; 7]), quota(100.0), model, 3);
    assert!(forecast(&exact).is_ok());
}

#[rstest]
#[case(ModelName::HoltWinters)]
#[case(ModelName::Seasonal)]
fn test_seasonal_models_follow_period_override(#[case] model: ModelName) {
    let params = ModelParams {
        period: Some(3),
        ..ModelParams::default()
    };

    let request = ForecastRequest::new(series(&[4.0; 3]), quota(100.0), model, 3).with_params(params);
    assert!(forecast(&request).is_ok());
}

#[test]
fn test_holt_winters_stays_below_remaining_quota() {
    let rising: Vec<f64> = (0..21).map(|i| i as f64 * 4.0).collect();
    let request = ForecastRequest::new(series(&rising), quota(60.0), ModelName::HoltWinters, 10);

    let result = forecast(&request).unwrap();
    assert!(result.unconstrained().iter().all(|v| *v <= 60.0));
    assert!(result.values().iter().all(|v| *v <= 60.0));
}

#[test]
fn test_zero_horizon_is_invalid() {
    let request = ForecastRequest::new(series(&[1.0, 2.0]), quota(10.0), ModelName::Linear, 0);
    assert!(matches!(
        forecast(&request),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_horizon_beyond_calendar_range() {
    let request = ForecastRequest::new(
        series(&[1.0, 2.0]),
        quota(10.0),
        ModelName::Linear,
        usize::MAX,
    );
    assert!(matches!(
        forecast(&request),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_seasonal_minimum_history_with_quiet_phase() {
    let params = ModelParams {
        period: Some(2),
        ..ModelParams::default()
    };
    let request = ForecastRequest::new(series(&[5.0, 0.0]), quota(100.0), ModelName::Seasonal, 4)
        .with_params(params);

    let values = forecast(&request).unwrap().values();
    for (value, expected) in values.iter().zip([5.0, 0.0, 5.0, 0.0]) {
        assert_abs_diff_eq!(*value, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_empty_series_is_insufficient() {
    let empty = TimeSeries::new(Vec::new()).unwrap();
    let request = ForecastRequest::new(empty, quota(10.0), ModelName::Exponential, 3);

    assert!(matches!(
        forecast(&request),
        Err(ForecastError::InsufficientData { needed: 1, got: 0, .. })
    ));
}

#[test]
fn test_invalid_params_are_not_replaced_by_another_model() {
    let params = ModelParams {
        alpha: Some(1.5),
        ..ModelParams::default()
    };
    let request =
        ForecastRequest::new(series(&[1.0, 2.0, 3.0]), quota(10.0), ModelName::Exponential, 2)
            .with_params(params);

    assert!(matches!(
        forecast(&request),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_zero_remaining_quota_projects_nothing() {
    let request = ForecastRequest::new(series(&[5.0; 10]), quota(0.0), ModelName::MovingAverage, 3);
    assert_eq!(forecast(&request).unwrap().values(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_model_name_parsing_and_wire_format() {
    assert_eq!("movingAverage".parse::<ModelName>().unwrap(), ModelName::MovingAverage);
    assert_eq!("HOLTWINTERS".parse::<ModelName>().unwrap(), ModelName::HoltWinters);
    assert!("arima".parse::<ModelName>().is_err());

    assert_eq!(
        serde_json::to_string(&ModelName::ChangePoint).unwrap(),
        "\"changePoint\""
    );
    assert_eq!(ModelName::Seasonal.to_string(), "seasonal");
}

#[test]
fn test_request_from_json() {
    let json = r#"{
        "series": [
            {"date": "2024-03-01", "value": 0.0},
            {"date": "2024-03-02", "value": 10.0},
            {"date": "2024-03-03", "value": 20.0},
            {"date": "2024-03-04", "value": 30.0}
        ],
        "quota": {"remainingAmount": 45.0, "startDate": "2024-01-01", "endDate": "2024-12-31"},
        "model": "linear",
        "horizonDays": 2
    }"#;

    let request: ForecastRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.params, ModelParams::default());

    let result = forecast(&request).unwrap();
    assert_eq!(result.values(), vec![40.0, 45.0]);

    let output = result.to_json().unwrap();
    assert!(output.contains("\"projectedValue\":45.0"));
    assert!(output.contains("\"date\":\"2024-03-06\""));
}

#[test]
fn test_request_json_rejects_invalid_quota_and_series() {
    let negative_quota = r#"{
        "series": [{"date": "2024-03-01", "value": 1.0}],
        "quota": {"remainingAmount": -5.0, "startDate": "2024-01-01", "endDate": "2024-12-31"},
        "model": "linear",
        "horizonDays": 1
    }"#;
    assert!(serde_json::from_str::<ForecastRequest>(negative_quota).is_err());

    let unordered = r#"{
        "series": [{"date": "2024-03-02", "value": 1.0}, {"date": "2024-03-01", "value": 1.0}],
        "quota": {"remainingAmount": 5.0, "startDate": "2024-01-01", "endDate": "2024-12-31"},
        "model": "linear",
        "horizonDays": 1
    }"#;
    assert!(serde_json::from_str::<ForecastRequest>(unordered).is_err());
}
