use tidyseries::{DType, Error, LabeledSeries, Scalar, NA};

fn sample() -> LabeledSeries<i32> {
    LabeledSeries::from_options(
        vec![1, 2, 3, 4, 5],
        vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)],
    )
    .unwrap()
}

#[test]
fn test_shift() {
    let series = LabeledSeries::from_i64(vec![1, 2, 3], vec![10, 20, 30]).unwrap();

    let forward = series.shift(1);
    assert_eq!(forward.labels(), series.labels());
    assert!(forward.get(&1).unwrap().is_na());
    assert_eq!(forward.get(&3), Some(&NA::Value(Scalar::Int(20))));

    let back = series.shift(-2);
    assert_eq!(back.get(&1), Some(&NA::Value(Scalar::Int(30))));
    assert_eq!(back.na_count(), 2);

    assert_eq!(series.shift(5).na_count(), 3);
}

#[test]
fn test_diff_and_pct_change() {
    let series = LabeledSeries::from_i64(vec![1, 2, 3], vec![100, 110, 99]).unwrap();

    let diff = series.diff(1).unwrap();
    assert_eq!(diff.dtype(), DType::Int64);
    assert!(diff.get(&1).unwrap().is_na());
    assert_eq!(diff.get(&3), Some(&NA::Value(Scalar::Int(-11))));

    let pct = series.pct_change(1).unwrap();
    assert!((pct.get_f64(&2).unwrap() - 0.1).abs() < 1e-12);
    assert!((pct.get_f64(&3).unwrap() + 0.1).abs() < 1e-12);
}

#[test]
fn test_diff_of_dates_gives_durations() {
    let d = |day| chrono::NaiveDate::from_ymd_opt(2000, 1, day).unwrap();
    let series = LabeledSeries::from_pairs(vec![(1, d(1)), (2, d(11))]).unwrap();

    let diff = series.diff(1).unwrap();
    assert_eq!(diff.dtype(), DType::Duration);
    assert_eq!(diff.get(&2).unwrap().to_string(), "10 days");
}

#[test]
fn test_rolling_mean_default_min_periods() {
    let mean = sample().rolling(2).unwrap().mean().unwrap();

    assert!(mean.get(&1).unwrap().is_na());
    assert_eq!(mean.get_f64(&2), Some(1.5));
    // Windows touching the gap lack enough values
    assert!(mean.get(&3).unwrap().is_na());
    assert!(mean.get(&4).unwrap().is_na());
    assert_eq!(mean.get_f64(&5), Some(4.5));
}

#[test]
fn test_rolling_with_min_periods() {
    let s = sample();
    let rolling = s.rolling(3).unwrap().min_periods(1);

    let sum = rolling.sum().unwrap();
    assert_eq!(sum.get_f64(&1), Some(1.0));
    assert_eq!(sum.get_f64(&3), Some(3.0));
    assert_eq!(sum.get_f64(&5), Some(9.0));

    assert_eq!(rolling.min().unwrap().get_f64(&4), Some(2.0));
    assert_eq!(rolling.max().unwrap().get_f64(&4), Some(4.0));

    let spread = rolling
        .aggregate(|w| w.iter().cloned().fold(f64::NEG_INFINITY, f64::max) - w[0])
        .unwrap();
    assert_eq!(spread.get_f64(&5), Some(1.0));
}

#[test]
fn test_rolling_validation() {
    assert!(matches!(sample().rolling(0), Err(Error::InvalidValue(_))));

    let dates = LabeledSeries::from_pairs(vec![(1, chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())]).unwrap();
    assert!(dates.rolling(2).unwrap_err().is_type_error());
}

#[test]
fn test_extreme_periods_shift_everything_out() {
    let series = LabeledSeries::from_i64(vec![1, 2, 3], vec![10, 20, 30]).unwrap();

    for periods in [i64::MIN, -i64::MAX, i64::MAX] {
        assert_eq!(series.shift(periods).na_count(), 3);
        assert_eq!(series.diff(periods).unwrap().na_count(), 3);
    }
}
