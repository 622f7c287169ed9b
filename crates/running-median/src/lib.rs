//! Running Median
//!
//! Maintains the median of a sliding window in O(log n) per sample:
//! - `MedianTracker` splits the window into a max-heap lower half and a
//!   min-heap upper half, with a FIFO of handles deciding evictions
//! - `WindowRunner` drives a tracker across a whole sequence under an edge
//!   policy and aligns the medians with the input

mod error;
mod runner;
mod sample;
mod tracker;

pub use error::ParseEdgePolicyError;
pub use runner::{EdgePolicy, WindowRunner};
pub use sample::Sample;
pub use tracker::{MedianTracker, Partition};
