use std::env;
use std::error::Error as StdError;
use std::io::{self, Write};
use std::process;

use chrono::NaiveDate;
use tidyseries::{
    binary_op, read_csv, BinaryOp, CsvOptions, Error, LabeledSeries, Result, TidyConfig,
};

const USAGE: &str = "\
Usage:
  tidyseries align <a.csv> <b.csv> <column> <op>
  tidyseries rebase <file.csv> <column> <start> <end>

op is one of add, sub, mul, div (or + - * /).
Dates use the configured date format (default %Y-%m-%d).";

fn main() {
    let config = match TidyConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(args: &[String], config: &TidyConfig) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("align") if args.len() == 5 => {
            let op: BinaryOp = args[4].parse()?;
            let left = load_column(&args[1], &args[3], config)?;
            let right = load_column(&args[2], &args[3], config)?;
            print_series(&binary_op(&left, &right, op)?)
        }
        Some("rebase") if args.len() == 5 => {
            let series = load_column(&args[1], &args[2], config)?;
            let start = parse_date(&args[3], &config.csv.date_format)?;
            let end = parse_date(&args[4], &config.csv.date_format)?;
            print_series(&series.rebase(start..=end)?)
        }
        Some("-h") | Some("--help") | Some("help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some("--version") => {
            println!("tidyseries {}", tidyseries::VERSION);
            Ok(())
        }
        _ => Err(Error::InvalidInput(format!("invalid arguments\n{}", USAGE))),
    }
}

/// Load a single value column, labelled by the first column of the file
fn load_column(path: &str, column: &str, config: &TidyConfig) -> Result<LabeledSeries<NaiveDate>> {
    let label_column = first_header(path, config)?;
    let options = CsvOptions::from_config(label_column, &config.csv)?.usecols([column]);
    let frame = read_csv(path, &options)?;
    Ok(frame.column(column)?.clone())
}

fn first_header(path: &str, config: &TidyConfig) -> Result<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.csv.delimiter_byte()?)
        .trim(csv::Trim::All)
        .from_path(path)?;
    rdr.headers()?
        .get(0)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("{} has no header row", path)))
}

fn parse_date(text: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, format)
        .map_err(|e| Error::Parse(format!("date '{}' does not match '{}': {}", text, format, e)))
}

fn print_series(series: &LabeledSeries<NaiveDate>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (label, value) in series.iter() {
        writeln!(out, "{},{}", label, value)?;
    }
    out.flush()?;
    Ok(())
}
