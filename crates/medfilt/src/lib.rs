//! Median Filtering
//!
//! Public entry points over the running-median core:
//! - `filter` / `filter_named` for 1-D slices
//! - `filter_axis` for n-dimensional arrays, one independent pass per lane
//!
//! Arguments are validated before any work starts. Float inputs keep their
//! type, integer inputs are promoted to `f64`.

mod axis;
mod error;
mod filter;
mod promote;

pub use axis::{filter_axis, FilterAxis};
pub use error::FilterError;
pub use filter::{filter, filter_named};
pub use promote::Promote;
pub use running_median::{EdgePolicy, Sample};
