use chrono::{Duration, NaiveDate};
use num_traits::ToPrimitive;
use std::fmt::{self, Display};

use crate::core::error::{Error, Result};

/// Element type of a series
///
/// Every series carries exactly one dtype. Operations are checked against
/// dtypes before any element is touched, so an undefined operation fails
/// even when all of the overlapping values are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 64-bit signed integers
    Int64,
    /// 64-bit floating point
    Float64,
    /// Calendar dates
    Date,
    /// Signed time spans
    Duration,
}

impl DType {
    /// Whether values of this dtype are plain numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int64 | DType::Float64)
    }

    /// Short lowercase name used in messages and CSV headers
    pub fn name(&self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Date => "date",
            DType::Duration => "duration",
        }
    }

    /// Convert a scalar into this dtype, widening integers into floats
    ///
    /// Returns `Error::Type` when the scalar cannot be stored in a series
    /// of this dtype.
    pub fn coerce(&self, value: Scalar) -> Result<Scalar> {
        match (self, value) {
            (DType::Int64, Scalar::Int(_))
            | (DType::Float64, Scalar::Float(_))
            | (DType::Date, Scalar::Date(_))
            | (DType::Duration, Scalar::Duration(_)) => Ok(value),
            (DType::Float64, Scalar::Int(v)) => Ok(Scalar::Float(v as f64)),
            (dtype, value) => Err(Error::Type(format!(
                "cannot store {} value '{}' in a {} series",
                value.dtype(),
                value,
                dtype
            ))),
        }
    }

    /// Smallest dtype able to hold values of both dtypes
    pub fn common(&self, other: DType) -> Option<DType> {
        match (self, other) {
            (a, b) if *a == b => Some(b),
            (DType::Int64, DType::Float64) | (DType::Float64, DType::Int64) => {
                Some(DType::Float64)
            }
            _ => None,
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single non-missing value held by a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Duration(Duration),
}

impl Scalar {
    /// The dtype this value naturally belongs to
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::Int(_) => DType::Int64,
            Scalar::Float(_) => DType::Float64,
            Scalar::Date(_) => DType::Date,
            Scalar::Duration(_) => DType::Duration,
        }
    }

    /// Numeric view of the value, `None` for dates and durations
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => v.to_f64(),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Scalar::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Scalar::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Scalar::Duration(d) => {
                if d.num_seconds() % 86_400 == 0 && d.subsec_nanos() == 0 {
                    write!(f, "{} days", d.num_days())
                } else {
                    write!(f, "{}", d)
                }
            }
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(value: NaiveDate) -> Self {
        Scalar::Date(value)
    }
}

impl From<Duration> for Scalar {
    fn from(value: Duration) -> Self {
        Scalar::Duration(value)
    }
}
