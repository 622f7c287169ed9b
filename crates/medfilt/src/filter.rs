//! 1-D Median Filter Entry Points

use crate::error::FilterError;
use crate::promote::Promote;
use running_median::{EdgePolicy, Sample, WindowRunner};
use std::num::NonZeroUsize;

/// Median-filter a sequence with windows of `window` samples
///
/// Returns one median per input sample. `window == 1` returns the input
/// values unchanged, as does a one-element input.
pub fn filter<T: Promote>(
    x: &[T],
    window: usize,
    policy: EdgePolicy,
) -> Result<Vec<T::Output>, FilterError> {
    let runner = runner_for(window, policy)?;
    let samples = promote_all(x.iter().copied())?;
    Ok(runner.run(&samples))
}

/// Same as [`filter`], with the edge policy given by name
/// (`"zeropad"` or `"truncate"`)
pub fn filter_named<T: Promote>(
    x: &[T],
    window: usize,
    policy: &str,
) -> Result<Vec<T::Output>, FilterError> {
    let policy: EdgePolicy = policy.parse()?;
    filter(x, window, policy)
}

pub(crate) fn runner_for(window: usize, policy: EdgePolicy) -> Result<WindowRunner, FilterError> {
    let window = NonZeroUsize::new(window)
        .ok_or_else(|| FilterError::invalid("window", "window length must be positive"))?;
    Ok(WindowRunner::new(window, policy))
}

/// Promote every sample, rejecting NaN before any filtering starts
pub(crate) fn promote_all<T, I>(samples: I) -> Result<Vec<T::Output>, FilterError>
where
    T: Promote,
    I: IntoIterator<Item = T>,
{
    samples
        .into_iter()
        .enumerate()
        .map(|(index, sample)| {
            let value = sample.promote();
            if value.is_unordered() {
                Err(FilterError::invalid(
                    "x",
                    format!("sample {index} is NaN, missing values are not supported"),
                ))
            } else {
                Ok(value)
            }
        })
        .collect()
}
