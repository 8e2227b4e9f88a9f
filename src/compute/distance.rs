//! Great-circle distance between coordinate arrays
//!
//! Spherical law of cosines over whole arrays. The cosine is clamped to
//! `[-1, 1]` before `acos`, so identical and antipodal points never give NaN.

use crate::config::ComputeConfig;
use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::index::Label;
use crate::na::NA;
use crate::parallel::ParallelUtils;
use crate::series::LabeledSeries;

/// Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Distance in kilometres between two points given in degrees
pub fn great_circle(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = (90.0 - lat1).to_radians();
    let phi2 = (90.0 - lat2).to_radians();
    let dtheta = (lng1 - lng2).to_radians();

    let cos = phi1.sin() * phi2.sin() * dtheta.cos() + phi1.cos() * phi2.cos();
    cos.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Element-wise [`great_circle`] over four equally long arrays
///
/// # Errors
/// `Error::LengthMismatch` when the arrays differ in length.
pub fn great_circle_vec(
    lat1: &[f64],
    lng1: &[f64],
    lat2: &[f64],
    lng2: &[f64],
    config: &ComputeConfig,
) -> Result<Vec<f64>> {
    let len = lat1.len();
    for other in [lng1.len(), lat2.len(), lng2.len()] {
        if other != len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: other,
            });
        }
    }

    Ok(ParallelUtils::map_indexed(config, len, |i| {
        great_circle(lat1[i], lng1[i], lat2[i], lng2[i])
    }))
}

/// Distance for labelled coordinates, aligned on the union of their labels
///
/// A label missing a coordinate in any of the four inputs gets `NA`.
pub fn great_circle_series<L: Label>(
    lat1: &LabeledSeries<L>,
    lng1: &LabeledSeries<L>,
    lat2: &LabeledSeries<L>,
    lng2: &LabeledSeries<L>,
    config: &ComputeConfig,
) -> Result<LabeledSeries<L>> {
    let index = lat1
        .index()
        .union(lng1.index())
        .union(lat2.index())
        .union(lng2.index());

    let columns = [lat1, lng1, lat2, lng2]
        .iter()
        .map(|s| s.reindex(&index).to_f64_vec())
        .collect::<Result<Vec<_>>>()?;

    let values = ParallelUtils::map_indexed(config, index.len(), |i| {
        match (
            columns[0][i].value(),
            columns[1][i].value(),
            columns[2][i].value(),
            columns[3][i].value(),
        ) {
            (Some(a), Some(b), Some(c), Some(d)) => {
                NA::Value(Scalar::Float(great_circle(*a, *b, *c, *d)))
            }
            _ => NA::NA,
        }
    });

    Ok(LabeledSeries::from_parts(index, values, DType::Float64, None))
}
