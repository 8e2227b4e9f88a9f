use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::config::CsvConfig;
use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::dataframe::SeriesFrame;
use crate::index::{Index, Label};
use crate::na::NA;
use crate::series::LabeledSeries;

/// Options controlling how a CSV file becomes a [`SeriesFrame`]
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Header of the date label column
    pub label_column: String,
    /// `chrono` format of the label column
    pub date_format: String,
    /// Field delimiter
    pub delimiter: u8,
    /// Cell contents read as missing
    pub na_values: Vec<String>,
    /// Value columns to keep; all of them when `None`
    pub usecols: Option<Vec<String>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        let config = CsvConfig::default();
        CsvOptions {
            label_column: "date".to_string(),
            date_format: config.date_format,
            delimiter: b',',
            na_values: config.na_values,
            usecols: None,
        }
    }
}

impl CsvOptions {
    /// Options for `label_column` using the loaded CSV configuration
    pub fn from_config(label_column: impl Into<String>, config: &CsvConfig) -> Result<Self> {
        Ok(CsvOptions {
            label_column: label_column.into(),
            date_format: config.date_format.clone(),
            delimiter: config.delimiter_byte()?,
            na_values: config.na_values.clone(),
            usecols: None,
        })
    }

    pub fn label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn usecols<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.usecols = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    fn is_na(&self, cell: &str) -> bool {
        self.na_values.iter().any(|na| na == cell)
    }
}

/// Read a date-labelled frame from a CSV file
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<SeriesFrame<NaiveDate>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let frame = read_csv_from_reader(file, options)?;
    log::info!(
        "loaded {} rows x {} columns from {}",
        frame.len(),
        frame.column_count(),
        path.display()
    );
    Ok(frame)
}

/// Read a date-labelled frame from any reader
///
/// # Errors
/// * `Error::ColumnNotFound` when the label column or a `usecols` entry is absent
/// * `Error::Parse` for a label or cell that cannot be read
/// * `Error::DuplicateLabel` when a date appears twice
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<SeriesFrame<NaiveDate>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let label_pos = headers
        .iter()
        .position(|h| *h == options.label_column)
        .ok_or_else(|| Error::ColumnNotFound(options.label_column.clone()))?;

    // Positions of the value columns to load, in output order
    let value_cols: Vec<(usize, &str)> = match &options.usecols {
        Some(wanted) => wanted
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .map(|pos| (pos, name.as_str()))
                    .ok_or_else(|| Error::ColumnNotFound(name.clone()))
            })
            .collect::<Result<_>>()?,
        None => headers
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != label_pos)
            .map(|(pos, h)| (pos, h.as_str()))
            .collect(),
    };

    let mut labels = Vec::new();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); value_cols.len()];

    for (row, result) in rdr.records().enumerate() {
        let record: StringRecord = result?;
        let raw_label = record.get(label_pos).unwrap_or_default();
        let label = NaiveDate::parse_from_str(raw_label, &options.date_format).map_err(|e| {
            Error::Parse(format!(
                "row {}: label '{}' does not match '{}': {}",
                row + 1,
                raw_label,
                options.date_format,
                e
            ))
        })?;
        labels.push(label);

        for (slot, (pos, _)) in value_cols.iter().enumerate() {
            cells[slot].push(record.get(*pos).unwrap_or_default().to_string());
        }
    }

    let index = Index::with_name(labels, Some(options.label_column.clone()))?;
    let mut frame = SeriesFrame::new(index.clone());
    for ((_, name), column) in value_cols.iter().zip(cells) {
        let (values, dtype) = parse_column(name, &column, options)?;
        let series = LabeledSeries::new(index.clone(), values, dtype)?;
        frame.add_column(*name, &series)?;
    }

    Ok(frame)
}

/// Parse one column of cells, choosing `Int64` when every present cell is an integer
fn parse_column(name: &str, cells: &[String], options: &CsvOptions) -> Result<(Vec<NA<Scalar>>, DType)> {
    let present: Vec<&String> = cells.iter().filter(|c| !options.is_na(c)).collect();

    if !present.is_empty() && present.iter().all(|c| c.parse::<i64>().is_ok()) {
        let values = cells
            .iter()
            .map(|c| match c.parse::<i64>() {
                Ok(v) if !options.is_na(c) => NA::Value(Scalar::Int(v)),
                _ => NA::NA,
            })
            .collect();
        return Ok((values, DType::Int64));
    }

    let values = cells
        .iter()
        .enumerate()
        .map(|(row, c)| {
            if options.is_na(c) {
                return Ok(NA::NA);
            }
            c.parse::<f64>()
                .map(|v| NA::Value(Scalar::Float(v)))
                .map_err(|_| {
                    Error::Parse(format!(
                        "row {}, column '{}': cannot parse '{}' as a number",
                        row + 1,
                        name,
                        c
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((values, DType::Float64))
}

/// Write a frame to a CSV file
pub fn write_csv<L: Label, P: AsRef<Path>>(frame: &SeriesFrame<L>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to_writer(frame, file)
}

/// Write a frame as CSV: the label column first, then every value column
///
/// Missing values are written as empty cells.
pub fn write_csv_to_writer<L: Label, W: Write>(frame: &SeriesFrame<L>, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let label_header = frame
        .index()
        .name()
        .cloned()
        .unwrap_or_else(|| "label".to_string());
    let mut header = vec![label_header];
    header.extend(frame.column_names().into_iter().map(String::from));
    wtr.write_record(&header)?;

    for (row, label) in frame.index().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(label.to_string());
        for (_, series) in frame.columns() {
            let cell = match series.iloc(row) {
                Some((_, NA::Value(v))) => v.to_string(),
                _ => String::new(),
            };
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
