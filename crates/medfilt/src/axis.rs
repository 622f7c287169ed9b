//! N-Dimensional Filtering Along One Axis

use crate::error::FilterError;
use crate::filter::runner_for;
use crate::promote::Promote;
use ndarray::{Array, ArrayView, Axis, Dimension};
use running_median::{EdgePolicy, Sample};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Axis an n-dimensional array is filtered along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterAxis {
    /// First axis longer than one element
    #[default]
    Auto,
    /// Explicit 0-based axis
    Index(usize),
}

impl FilterAxis {
    /// Pick the concrete axis for an array of `shape`
    pub fn resolve(self, shape: &[usize]) -> Result<Axis, FilterError> {
        match self {
            FilterAxis::Auto => shape.iter().position(|&len| len > 1).map(Axis).ok_or_else(|| {
                FilterError::invalid("axis", format!("no axis longer than 1 in shape {shape:?}"))
            }),
            FilterAxis::Index(index) if index < shape.len() => Ok(Axis(index)),
            FilterAxis::Index(index) => Err(FilterError::invalid(
                "axis",
                format!("axis {index} out of range for {} dimensions", shape.len()),
            )),
        }
    }
}

impl fmt::Display for FilterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterAxis::Auto => write!(f, "auto"),
            FilterAxis::Index(index) => write!(f, "{index}"),
        }
    }
}

impl FromStr for FilterAxis {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(FilterAxis::Auto);
        }
        s.parse().map(FilterAxis::Index).map_err(|_| {
            FilterError::invalid("axis", format!("expected 'auto' or an axis index, got '{s}'"))
        })
    }
}

/// Median-filter every lane of `x` along `axis`
///
/// Each lane is an independent 1-D pass with its own tracker. The output has
/// the shape of the input.
pub fn filter_axis<T, D>(
    x: ArrayView<'_, T, D>,
    window: usize,
    policy: EdgePolicy,
    axis: FilterAxis,
) -> Result<Array<T::Output, D>, FilterError>
where
    T: Promote,
    D: Dimension,
{
    let runner = runner_for(window, policy)?;
    let axis = axis.resolve(x.shape())?;

    let mut out = x.mapv(T::promote);
    if let Some(index) = out.iter().position(|value| value.is_unordered()) {
        return Err(FilterError::invalid(
            "x",
            format!("element {index} (row-major) is NaN, missing values are not supported"),
        ));
    }

    debug!(
        "Filtering array of shape {:?} along axis {}",
        out.shape(),
        axis.index()
    );

    for (lane_index, mut lane) in out.lanes_mut(axis).into_iter().enumerate() {
        let filtered = runner.run(&lane.to_vec());
        trace!("Filtered lane {} ({} samples)", lane_index, filtered.len());
        for (dst, median) in lane.iter_mut().zip(filtered) {
            *dst = median;
        }
    }

    Ok(out)
}
