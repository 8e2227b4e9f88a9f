use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;
use tidyseries::{
    read_csv, read_csv_from_reader, write_csv, CsvConfig, CsvOptions, DType, Error,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_csv_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gdp.csv");
    fs::write(
        &path,
        "date,gdp,cpi\n2000-01-01,100,1.0\n2000-04-01,NA,1.25\n2000-07-01,104,\n",
    )
    .unwrap();

    let frame = read_csv(&path, &CsvOptions::default()).unwrap();
    assert_eq!(frame.len(), 3);
    assert_eq!(frame.index().name(), Some(&"date".to_string()));

    let gdp = frame.column("gdp").unwrap();
    assert_eq!(gdp.dtype(), DType::Int64);
    assert!(gdp.get(&date(2000, 4, 1)).unwrap().is_na());

    let cpi = frame.column("cpi").unwrap();
    assert_eq!(cpi.dtype(), DType::Float64);
    assert_eq!(cpi.get_f64(&date(2000, 4, 1)), Some(1.25));

    let out = dir.path().join("out.csv");
    write_csv(&frame, &out).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "date,gdp,cpi\n2000-01-01,100,1\n2000-04-01,,1.25\n2000-07-01,104,\n"
    );
}

#[test]
fn test_custom_format_delimiter_and_usecols() {
    let data = "when;a;b\n31/01/2000;1;2\n29/02/2000;3;4\n";
    let options = CsvOptions::default()
        .label_column("when")
        .date_format("%d/%m/%Y")
        .delimiter(b';')
        .usecols(["b"]);

    let frame = read_csv_from_reader(data.as_bytes(), &options).unwrap();

    assert_eq!(frame.column_names(), vec!["b"]);
    assert_eq!(frame.index().values(), &[date(2000, 1, 31), date(2000, 2, 29)]);
}

#[test]
fn test_options_from_config() {
    let mut config = CsvConfig::default();
    config.delimiter = "\t".to_string();
    config.na_values = vec!["-".to_string()];

    let options = CsvOptions::from_config("day", &config).unwrap();
    let frame = read_csv_from_reader("day\tv\n2001-01-01\t-\n".as_bytes(), &options).unwrap();
    assert_eq!(frame.column("v").unwrap().na_count(), 1);

    config.delimiter = "::".to_string();
    assert!(CsvOptions::from_config("day", &config).is_err());
}

#[test]
fn test_read_errors() {
    let options = CsvOptions::default();

    let missing_label = "year,v\n2000,1\n";
    assert!(matches!(
        read_csv_from_reader(missing_label.as_bytes(), &options),
        Err(Error::ColumnNotFound(_))
    ));

    let bad_label = "date,v\n2000-13-01,1\n";
    assert!(matches!(
        read_csv_from_reader(bad_label.as_bytes(), &options),
        Err(Error::Parse(_))
    ));

    let duplicate = "date,v\n2000-01-01,1\n2000-01-01,2\n";
    assert!(matches!(
        read_csv_from_reader(duplicate.as_bytes(), &options),
        Err(Error::DuplicateLabel(_))
    ));

    let bad_cell = "date,v\n2000-01-01,1\n2000-01-02,abc\n";
    match read_csv_from_reader(bad_cell.as_bytes(), &options) {
        Err(Error::Parse(msg)) => {
            assert!(msg.contains("row 2"));
            assert!(msg.contains("'v'"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }

    let unknown_col = options.clone().usecols(["w"]);
    assert!(matches!(
        read_csv_from_reader("date,v\n".as_bytes(), &unknown_col),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = read_csv(dir.path().join("nope.csv"), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
