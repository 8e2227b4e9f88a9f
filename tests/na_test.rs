use tidyseries::NA;

#[test]
fn test_na_creation() {
    let value: NA<i32> = NA::Value(42);
    let na: NA<i32> = NA::NA;

    assert!(!value.is_na());
    assert!(value.is_value());
    assert_eq!(value.value(), Some(&42));

    assert!(na.is_na());
    assert!(!na.is_value());
    assert_eq!(na.value(), None);
}

#[test]
fn test_na_zip_propagates_missing() {
    let a = NA::Value(10);
    let b = NA::Value(5);
    let na = NA::<i32>::NA;

    let add = |x: &i32, y: &i32| NA::Value(x + y);
    assert_eq!(a.zip_with(&b, add), NA::Value(15));
    assert_eq!(a.zip_with(&na, add), NA::NA);
    assert_eq!(na.zip_with(&b, add), NA::NA);

    // The combining function itself may produce a missing value
    let div = |x: &i32, y: &i32| NA::<i32>::from(x.checked_div(*y));
    assert_eq!(a.zip_with(&NA::Value(0), div), NA::NA);
}

#[test]
fn test_na_conversions() {
    assert_eq!(NA::from(Some(3)), NA::Value(3));
    assert_eq!(NA::<i32>::from(None), NA::NA);
    assert_eq!(Option::<i32>::from(NA::Value(4)), Some(4));
    assert_eq!(NA::Value(2).map(|v| v * 2), NA::Value(4));
    assert_eq!(NA::NA.or(7), 7);
    assert_eq!(*NA::<i32>::NA.value_or(&1), 1);
}

#[test]
fn test_na_ordering_and_display() {
    assert!(NA::NA < NA::Value(i32::MIN));
    assert_eq!(NA::Value(1.5).to_string(), "1.5");
    assert_eq!(NA::<f64>::NA.to_string(), "NA");
    assert_eq!(format!("{:?}", NA::<f64>::NA), "NA");
}
