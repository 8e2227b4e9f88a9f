//! Label-aligned binary operations
//!
//! Every binary operation between two series runs in two steps. Both inputs
//! are first reindexed onto the sorted union of their labels, which inserts
//! `NA` wherever a label is absent; the operation is then applied pairwise,
//! and any pair touching `NA` yields `NA`. Alignment never depends on the
//! operation being applied.

use chrono::Duration;
use num_traits::ToPrimitive;
use std::fmt::{self, Display};
use std::ops::{Add, Div, Mul, Sub};

use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::index::{Index, JoinHow, Label};
use crate::na::NA;
use crate::series::LabeledSeries;

/// Element-wise arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// True division; integers divide to floats
    Div,
    /// Division rounded towards negative infinity
    FloorDiv,
    /// Remainder with the sign of the divisor
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }

    /// Dtype produced by applying this operation to the given dtypes
    ///
    /// # Errors
    /// `Error::Type` when the operation is undefined for the pair, e.g.
    /// dividing two dates.
    pub fn result_dtype(&self, left: DType, right: DType) -> Result<DType> {
        let dtype = match (self, left, right) {
            (_, DType::Int64, DType::Int64) => match self {
                BinaryOp::Div | BinaryOp::Pow => Some(DType::Float64),
                _ => Some(DType::Int64),
            },
            (_, l, r) if l.is_numeric() && r.is_numeric() => Some(DType::Float64),

            (BinaryOp::Sub, DType::Date, DType::Date) => Some(DType::Duration),
            (BinaryOp::Add | BinaryOp::Sub, DType::Date, DType::Duration) => Some(DType::Date),
            (BinaryOp::Add, DType::Duration, DType::Date) => Some(DType::Date),

            (BinaryOp::Add | BinaryOp::Sub, DType::Duration, DType::Duration) => {
                Some(DType::Duration)
            }
            (BinaryOp::Div, DType::Duration, DType::Duration) => Some(DType::Float64),
            (BinaryOp::Mul | BinaryOp::Div, DType::Duration, r) if r.is_numeric() => {
                Some(DType::Duration)
            }
            (BinaryOp::Mul, l, DType::Duration) if l.is_numeric() => Some(DType::Duration),

            _ => None,
        };

        dtype.ok_or_else(|| {
            Error::Type(format!(
                "unsupported operand dtypes for {}: '{}' and '{}'",
                self.symbol(),
                left,
                right
            ))
        })
    }

    /// Apply the operation to two present values
    ///
    /// Operand dtypes must already have passed [`BinaryOp::result_dtype`].
    /// Float arithmetic follows IEEE 754, so dividing by zero gives an
    /// infinity or NaN value. Integer overflow, integer division by zero and
    /// out-of-range dates give `NA`.
    pub fn apply(&self, left: &Scalar, right: &Scalar) -> NA<Scalar> {
        match (left, right) {
            (Scalar::Int(a), Scalar::Int(b)) => self.apply_int(*a, *b),
            (Scalar::Int(_) | Scalar::Float(_), Scalar::Int(_) | Scalar::Float(_)) => {
                match (left.as_f64(), right.as_f64()) {
                    (Some(a), Some(b)) => NA::Value(Scalar::Float(self.apply_float(a, b))),
                    _ => NA::NA,
                }
            }
            (Scalar::Date(a), Scalar::Date(b)) => match self {
                BinaryOp::Sub => NA::Value(Scalar::Duration(a.signed_duration_since(*b))),
                _ => NA::NA,
            },
            (Scalar::Date(a), Scalar::Duration(d)) => match self {
                BinaryOp::Add => NA::from(a.checked_add_signed(*d).map(Scalar::Date)),
                BinaryOp::Sub => NA::from(a.checked_sub_signed(*d).map(Scalar::Date)),
                _ => NA::NA,
            },
            (Scalar::Duration(d), Scalar::Date(a)) => match self {
                BinaryOp::Add => NA::from(a.checked_add_signed(*d).map(Scalar::Date)),
                _ => NA::NA,
            },
            (Scalar::Duration(a), Scalar::Duration(b)) => match self {
                BinaryOp::Add => NA::from(a.checked_add(b).map(Scalar::Duration)),
                BinaryOp::Sub => NA::from(a.checked_sub(b).map(Scalar::Duration)),
                BinaryOp::Div => NA::Value(Scalar::Float(duration_nanos(a) / duration_nanos(b))),
                _ => NA::NA,
            },
            (Scalar::Duration(d), other) => match (self, other.as_f64()) {
                (BinaryOp::Mul, Some(f)) => scale_duration(*d, f),
                (BinaryOp::Div, Some(f)) => scale_duration(*d, 1.0 / f),
                _ => NA::NA,
            },
            (other, Scalar::Duration(d)) => match (self, other.as_f64()) {
                (BinaryOp::Mul, Some(f)) => scale_duration(*d, f),
                _ => NA::NA,
            },
            // Dates against numbers never pass the dtype check
            (Scalar::Date(_), _) | (_, Scalar::Date(_)) => NA::NA,
        }
    }

    fn apply_int(&self, a: i64, b: i64) -> NA<Scalar> {
        let result = match self {
            BinaryOp::Add => a.checked_add(b).map(Scalar::Int),
            BinaryOp::Sub => a.checked_sub(b).map(Scalar::Int),
            BinaryOp::Mul => a.checked_mul(b).map(Scalar::Int),
            BinaryOp::Div => Some(Scalar::Float(a as f64 / b as f64)),
            BinaryOp::FloorDiv => floor_div_i64(a, b).map(Scalar::Int),
            BinaryOp::Mod => floor_mod_i64(a, b).map(Scalar::Int),
            BinaryOp::Pow => Some(Scalar::Float((a as f64).powf(b as f64))),
        };
        NA::from(result)
    }

    fn apply_float(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::FloorDiv => (a / b).floor(),
            BinaryOp::Mod => {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            }
            BinaryOp::Pow => a.powf(b),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for BinaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(BinaryOp::Add),
            "sub" | "-" => Ok(BinaryOp::Sub),
            "mul" | "*" => Ok(BinaryOp::Mul),
            "div" | "truediv" | "/" => Ok(BinaryOp::Div),
            "floordiv" | "//" => Ok(BinaryOp::FloorDiv),
            "mod" | "%" => Ok(BinaryOp::Mod),
            "pow" | "**" => Ok(BinaryOp::Pow),
            other => Err(Error::InvalidInput(format!("unknown operation '{}'", other))),
        }
    }
}

fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod_i64(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

/// Length of `d` in nanoseconds, in coarser units when the count overflows `i64`
fn duration_nanos(d: &Duration) -> f64 {
    match (d.num_nanoseconds(), d.num_microseconds()) {
        (Some(nanos), _) => nanos as f64,
        (None, Some(micros)) => micros as f64 * 1e3,
        (None, None) => d.num_milliseconds() as f64 * 1e6,
    }
}

fn scale_duration(d: Duration, factor: f64) -> NA<Scalar> {
    let nanos = duration_nanos(&d) * factor;
    let scaled = if let Some(n) = nanos.round().to_i64() {
        Some(Duration::nanoseconds(n))
    } else if let Some(micros) = (nanos / 1e3).round().to_i64() {
        Some(Duration::microseconds(micros))
    } else {
        (nanos / 1e6).round().to_i64().and_then(Duration::try_milliseconds)
    };
    NA::from(scaled.map(Scalar::Duration))
}

/// Fill strategy for labels introduced by reindexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Carry the value of the nearest earlier label forward
    Forward,
    /// Carry the value of the nearest later label backward
    Backward,
}

impl<L> LabeledSeries<L>
where
    L: Label,
{
    /// Conform the series to `index`
    ///
    /// Labels present in both keep their value; labels only in `index` get
    /// `NA`. Labels not in `index` are dropped.
    pub fn reindex(&self, index: &Index<L>) -> Self {
        let values = self
            .index()
            .get_indexer(index)
            .into_iter()
            .map(|pos| pos.map_or(NA::NA, |p| self.values()[p]))
            .collect();
        LabeledSeries::from_parts(index.clone(), values, self.dtype(), self.name().cloned())
    }

    /// Conform the series to `index`, filling new labels from neighbours
    ///
    /// Both indexes must be sorted ascending.
    pub fn reindex_fill(&self, index: &Index<L>, method: FillMethod) -> Result<Self> {
        if !self.index().is_monotonic_increasing() || !index.is_monotonic_increasing() {
            return Err(Error::InvalidInput(
                "reindex with a fill method requires sorted indexes".to_string(),
            ));
        }

        let labels = self.labels();
        let values = index
            .iter()
            .map(|label| match self.index().get_loc(label) {
                Some(pos) => self.values()[pos],
                None => {
                    let pos = match method {
                        FillMethod::Forward => labels
                            .partition_point(|l| l <= label)
                            .checked_sub(1),
                        FillMethod::Backward => {
                            Some(labels.partition_point(|l| l < label)).filter(|&p| p < labels.len())
                        }
                    };
                    pos.map_or(NA::NA, |p| self.values()[p])
                }
            })
            .collect();

        Ok(LabeledSeries::from_parts(
            index.clone(),
            values,
            self.dtype(),
            self.name().cloned(),
        ))
    }

    /// Apply `op` against `other` after aligning labels, see [`binary_op`]
    pub fn combine(&self, other: &LabeledSeries<L>, op: BinaryOp) -> Result<Self> {
        binary_op(self, other, op)
    }

    /// Apply `op` against `other`, see [`binary_op_fill`]
    pub fn combine_fill(
        &self,
        other: &LabeledSeries<L>,
        op: BinaryOp,
        fill_value: impl Into<Scalar>,
    ) -> Result<Self> {
        binary_op_fill(self, other, op, fill_value)
    }
}

/// Element-wise `op` over the sorted union of both label sets
///
/// Labels present in only one input, or missing in either, produce `NA`.
/// The operation is type-checked on dtypes before any value is computed.
///
/// # Example
/// ```
/// use tidyseries::{binary_op, BinaryOp, LabeledSeries};
///
/// let a = LabeledSeries::from_pairs(vec![(2000, 10), (2001, 20)]).unwrap();
/// let b = LabeledSeries::from_pairs(vec![(2001, 2), (2002, 4)]).unwrap();
/// let r = binary_op(&a, &b, BinaryOp::Div).unwrap();
///
/// assert_eq!(r.labels(), &[2000, 2001, 2002]);
/// assert_eq!(r.get_f64(&2001), Some(10.0));
/// assert!(r.get(&2000).unwrap().is_na());
/// ```
pub fn binary_op<L: Label>(
    left: &LabeledSeries<L>,
    right: &LabeledSeries<L>,
    op: BinaryOp,
) -> Result<LabeledSeries<L>> {
    let dtype = op.result_dtype(left.dtype(), right.dtype())?;
    let index = left.index().union(right.index());
    let (left, right) = (left.reindex(&index), right.reindex(&index));

    let mut lost = 0usize;
    let values = left
        .values()
        .iter()
        .zip(right.values().iter())
        .map(|(a, b)| {
            let result = a.zip_with(b, |a, b| op.apply(a, b));
            if result.is_na() && a.is_value() && b.is_value() {
                lost += 1;
            }
            result
        })
        .collect();

    log_alignment(op, &index, lost);
    Ok(LabeledSeries::from_parts(
        index,
        values,
        dtype,
        shared_name(&left, &right),
    ))
}

/// Like [`binary_op`], substituting `fill_value` where exactly one side is missing
///
/// Labels missing on both sides stay `NA`.
pub fn binary_op_fill<L: Label>(
    left: &LabeledSeries<L>,
    right: &LabeledSeries<L>,
    op: BinaryOp,
    fill_value: impl Into<Scalar>,
) -> Result<LabeledSeries<L>> {
    let fill = fill_value.into();
    let left_dtype = filled_dtype(left.dtype(), &fill)?;
    let right_dtype = filled_dtype(right.dtype(), &fill)?;
    let dtype = op.result_dtype(left_dtype, right_dtype)?;

    let index = left.index().union(right.index());
    let (left, right) = (left.reindex(&index), right.reindex(&index));

    let values = left
        .values()
        .iter()
        .zip(right.values().iter())
        .map(|(a, b)| {
            let result = match (a, b) {
                (NA::Value(a), NA::Value(b)) => op.apply(a, b),
                (NA::Value(a), NA::NA) => op.apply(a, &fill),
                (NA::NA, NA::Value(b)) => op.apply(&fill, b),
                (NA::NA, NA::NA) => NA::NA,
            };
            result.and_then(|s| NA::from(dtype.coerce(*s).ok()))
        })
        .collect();

    log::debug!(
        "aligned {} with fill {} over {} labels",
        op,
        fill,
        index.len()
    );
    Ok(LabeledSeries::from_parts(
        index,
        values,
        dtype,
        shared_name(&left, &right),
    ))
}

/// Reindex both series onto the index produced by `how`
pub fn align<L: Label>(
    left: &LabeledSeries<L>,
    right: &LabeledSeries<L>,
    how: JoinHow,
) -> (LabeledSeries<L>, LabeledSeries<L>) {
    let index = left.index().join(right.index(), how);
    (left.reindex(&index), right.reindex(&index))
}

fn filled_dtype(dtype: DType, fill: &Scalar) -> Result<DType> {
    dtype.common(fill.dtype()).ok_or_else(|| {
        Error::Type(format!(
            "fill value '{}' ({}) does not fit a {} series",
            fill,
            fill.dtype(),
            dtype
        ))
    })
}

fn shared_name<L: Label>(left: &LabeledSeries<L>, right: &LabeledSeries<L>) -> Option<String> {
    match (left.name(), right.name()) {
        (Some(a), Some(b)) if a == b => Some(a.clone()),
        _ => None,
    }
}

fn log_alignment<L: Label>(op: BinaryOp, index: &Index<L>, lost: usize) {
    log::debug!("aligned {} over {} labels", op, index.len());
    if lost > 0 {
        log::warn!(
            "{} of {} results of {} were out of range and set to NA",
            lost,
            index.len(),
            op
        );
    }
}

macro_rules! impl_series_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'a, L: Label> $trait<&'a LabeledSeries<L>> for &'a LabeledSeries<L> {
            type Output = Result<LabeledSeries<L>>;

            fn $method(self, other: &'a LabeledSeries<L>) -> Self::Output {
                binary_op(self, other, $op)
            }
        }
    };
}

impl_series_operator!(Add, add, BinaryOp::Add);
impl_series_operator!(Sub, sub, BinaryOp::Sub);
impl_series_operator!(Mul, mul, BinaryOp::Mul);
impl_series_operator!(Div, div, BinaryOp::Div);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div_i64(7, 2), Some(3));
        assert_eq!(floor_div_i64(-7, 2), Some(-4));
        assert_eq!(floor_div_i64(7, 0), None);
        assert_eq!(floor_div_i64(i64::MIN, -1), None);
    }

    #[test]
    fn modulo_takes_divisor_sign() {
        assert_eq!(floor_mod_i64(-7, 3), Some(2));
        assert_eq!(floor_mod_i64(7, -3), Some(-2));
        assert_eq!(floor_mod_i64(7, 0), None);
    }

    #[test]
    fn integer_overflow_is_na() {
        let result = BinaryOp::Add.apply(&Scalar::Int(i64::MAX), &Scalar::Int(1));
        assert!(result.is_na());
    }

    #[test]
    fn duration_scaling() {
        let d = Scalar::Duration(Duration::days(2));
        assert_eq!(
            BinaryOp::Mul.apply(&d, &Scalar::Int(3)),
            NA::Value(Scalar::Duration(Duration::days(6)))
        );
        assert_eq!(
            BinaryOp::Div.apply(&d, &Scalar::Float(2.0)),
            NA::Value(Scalar::Duration(Duration::days(1)))
        );
    }

    #[test]
    fn sub_millisecond_durations_keep_precision() {
        let a = Scalar::Duration(Duration::microseconds(500));
        let b = Scalar::Duration(Duration::microseconds(250));
        assert_eq!(BinaryOp::Div.apply(&a, &b), NA::Value(Scalar::Float(2.0)));

        let nanos = Scalar::Duration(Duration::nanoseconds(3));
        assert_eq!(
            BinaryOp::Div.apply(&nanos, &Scalar::Duration(Duration::nanoseconds(2))),
            NA::Value(Scalar::Float(1.5))
        );

        assert_eq!(
            BinaryOp::Mul.apply(&Scalar::Float(1.5), &b),
            NA::Value(Scalar::Duration(Duration::microseconds(375)))
        );
        assert_eq!(
            BinaryOp::Div.apply(&a, &Scalar::Int(4)),
            NA::Value(Scalar::Duration(Duration::microseconds(125)))
        );
    }

    #[test]
    fn long_durations_scale_in_coarser_units() {
        let long = Duration::days(200_000);
        assert!(long.num_nanoseconds().is_none());

        let doubled = BinaryOp::Mul.apply(&Scalar::Duration(long), &Scalar::Int(2));
        assert_eq!(doubled, NA::Value(Scalar::Duration(Duration::days(400_000))));

        let ratio = BinaryOp::Div.apply(
            &Scalar::Duration(long),
            &Scalar::Duration(Duration::days(100_000)),
        );
        assert_eq!(ratio, NA::Value(Scalar::Float(2.0)));
    }

    #[test]
    fn operation_names_parse() {
        assert_eq!("div".parse::<BinaryOp>().unwrap(), BinaryOp::Div);
        assert_eq!("**".parse::<BinaryOp>().unwrap(), BinaryOp::Pow);
        assert!("avg".parse::<BinaryOp>().is_err());
    }
}
