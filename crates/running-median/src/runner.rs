//! Window Runner
//!
//! Drives a [`MedianTracker`] over a full sequence. Output `y[i]` is the
//! median of the `n` positions starting at `i - n / 2`, so odd windows are
//! centred and even windows look back one sample further than they look
//! ahead. The edge policy decides what the positions outside the input
//! contribute.

use crate::error::ParseEdgePolicyError;
use crate::sample::Sample;
use crate::tracker::MedianTracker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;
use std::num::NonZeroUsize;
use std::str::FromStr;
use tracing::debug;

/// How windows that overhang the sequence are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Fixed-width window, positions outside the input read as zero
    #[default]
    ZeroPad,
    /// Positions outside the input are dropped, so the window shrinks
    Truncate,
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgePolicy::ZeroPad => write!(f, "zeropad"),
            EdgePolicy::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for EdgePolicy {
    type Err = ParseEdgePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("zeropad") {
            Ok(EdgePolicy::ZeroPad)
        } else if name.eq_ignore_ascii_case("truncate") {
            Ok(EdgePolicy::Truncate)
        } else {
            Err(ParseEdgePolicyError(s.to_string()))
        }
    }
}

/// One-shot median filter over a slice
#[derive(Debug, Clone, Copy)]
pub struct WindowRunner {
    window: NonZeroUsize,
    policy: EdgePolicy,
}

impl WindowRunner {
    /// Create a runner for windows of `window` samples
    pub fn new(window: NonZeroUsize, policy: EdgePolicy) -> Self {
        Self { window, policy }
    }

    /// Window length
    pub fn window(&self) -> usize {
        self.window.get()
    }

    /// Edge policy
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Filter `x`, returning exactly one median per input sample
    pub fn run<T: Sample>(&self, x: &[T]) -> Vec<T> {
        debug!(
            "Running median over {} samples: window={}, policy={}",
            x.len(),
            self.window,
            self.policy
        );

        if self.window.get() == 1 || x.len() <= 1 {
            return x.to_vec();
        }

        match self.policy {
            EdgePolicy::ZeroPad => self.run_zero_pad(x),
            EdgePolicy::Truncate => self.run_truncate(x),
        }
    }

    /// Stream zeros, the input, then zeros through a tracker and keep the
    /// median of every full window
    ///
    /// Conceptually the input is padded with `n - 1` zeros on both sides;
    /// only the `n / 2` leading and `ceil(n/2) - 1` trailing zeros that some
    /// output window covers are fed, so the window ending `n - 1` samples
    /// into the stream belongs to output 0.
    fn run_zero_pad<T: Sample>(&self, x: &[T]) -> Vec<T> {
        let n = self.window.get();
        let mut tracker = MedianTracker::new(self.window);

        let padded = iter::repeat(T::ZERO)
            .take(n / 2)
            .chain(x.iter().copied())
            .chain(iter::repeat(T::ZERO).take(n.div_ceil(2) - 1));

        padded
            .map(|value| tracker.observe(value))
            .skip(n - 1)
            .take(x.len())
            .collect()
    }

    /// Observe the raw input, then slide past its end without admitting
    /// anything so the trailing windows shrink
    fn run_truncate<T: Sample>(&self, x: &[T]) -> Vec<T> {
        let lead = self.window.get().div_ceil(2) - 1;
        let mut tracker = MedianTracker::new(self.window);
        let mut medians = Vec::with_capacity(x.len());
        let mut emitted = 0usize;

        for &value in x {
            let median = tracker.observe(value);
            if emitted >= lead {
                medians.push(median);
            }
            emitted += 1;
        }
        while medians.len() < x.len() {
            let Some(median) = tracker.skip() else {
                break;
            };
            if emitted >= lead {
                medians.push(median);
            }
            emitted += 1;
        }

        medians
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn runner(window: usize, policy: EdgePolicy) -> WindowRunner {
        WindowRunner::new(NonZeroUsize::new(window).unwrap(), policy)
    }

    /// Sort-based median of the window starting at `i - n / 2`
    fn brute_force(x: &[f64], n: usize, policy: EdgePolicy) -> Vec<f64> {
        (0..x.len())
            .map(|i| {
                let start = i as isize - (n / 2) as isize;
                let mut window: Vec<f64> = (start..start + n as isize)
                    .filter_map(|j| {
                        let sample = usize::try_from(j).ok().and_then(|j| x.get(j));
                        match sample {
                            Some(&v) => Some(v),
                            None if policy == EdgePolicy::ZeroPad => Some(0.0),
                            None => None,
                        }
                    })
                    .collect();
                window.sort_by(|a, b| a.partial_cmp(b).unwrap());
                let mid = window.len() / 2;
                if window.len() % 2 == 0 {
                    (window[mid - 1] + window[mid]) / 2.0
                } else {
                    window[mid]
                }
            })
            .collect()
    }

    #[test]
    fn test_zero_pad_ramp() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y = runner(3, EdgePolicy::ZeroPad).run(&x);
        assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 9.0]);
    }

    #[test]
    fn test_truncate_shrinks_at_edges() {
        let y = runner(3, EdgePolicy::Truncate).run(&[5.0, 1.0, 9.0, 2.0, 8.0]);
        assert_eq!(y, vec![3.0, 5.0, 2.0, 8.0, 5.0]);
    }

    #[test]
    fn test_zero_pad_pulls_edges_down() {
        let x = [3.0; 4];
        let y = runner(2, EdgePolicy::ZeroPad).run(&x);
        assert_eq!(y, vec![1.5, 3.0, 3.0, 3.0]);
        assert!(y.iter().all(|&v| v <= 3.0));

        let y = runner(8, EdgePolicy::ZeroPad).run(&x);
        assert_eq!(y, vec![1.5; 4]);
    }

    #[test]
    fn test_runner_settings() {
        let r = runner(5, EdgePolicy::Truncate);
        assert_eq!(r.window(), 5);
        assert_eq!(r.policy(), EdgePolicy::Truncate);
        assert_eq!(runner(2, EdgePolicy::default()).policy(), EdgePolicy::ZeroPad);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let x = [4.0, -2.0, 7.0];
        assert_eq!(runner(1, EdgePolicy::ZeroPad).run(&x), x.to_vec());
        assert_eq!(runner(1, EdgePolicy::Truncate).run(&x), x.to_vec());
    }

    #[test]
    fn test_single_sample() {
        for policy in [EdgePolicy::ZeroPad, EdgePolicy::Truncate] {
            assert_eq!(runner(5, policy).run(&[42.0f32]), vec![42.0]);
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: [f64; 0] = [];
        assert!(runner(3, EdgePolicy::Truncate).run(&empty).is_empty());
        assert!(runner(3, EdgePolicy::ZeroPad).run(&empty).is_empty());
    }

    #[test]
    fn test_window_wider_than_input() {
        let x = [1.0, 5.0, 3.0];
        for policy in [EdgePolicy::ZeroPad, EdgePolicy::Truncate] {
            assert_eq!(runner(7, policy).run(&x), brute_force(&x, 7, policy));
        }
    }

    #[test]
    fn test_constant_input_truncate() {
        let x = [2.5; 9];
        for n in 1..=9 {
            assert_eq!(runner(n, EdgePolicy::Truncate).run(&x), x.to_vec());
        }
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("zeropad".parse::<EdgePolicy>(), Ok(EdgePolicy::ZeroPad));
        assert_eq!(" Truncate".parse::<EdgePolicy>(), Ok(EdgePolicy::Truncate));
        assert_eq!(
            "symmetric".parse::<EdgePolicy>(),
            Err(ParseEdgePolicyError("symmetric".to_string()))
        );
        assert_eq!(EdgePolicy::default(), EdgePolicy::ZeroPad);
        assert_eq!(EdgePolicy::Truncate.to_string(), "truncate");
    }

    proptest! {
        #[test]
        fn prop_zero_pad_matches_brute_force(
            x in proptest::collection::vec(-30i32..30, 1..48),
            n in 1usize..48,
        ) {
            let x: Vec<f64> = x.into_iter().map(f64::from).collect();
            let n = n.min(x.len());
            let y = runner(n, EdgePolicy::ZeroPad).run(&x);
            prop_assert_eq!(y, brute_force(&x, n, EdgePolicy::ZeroPad));
        }

        #[test]
        fn prop_truncate_matches_brute_force(
            x in proptest::collection::vec(-30i32..30, 1..48),
            n in 1usize..48,
        ) {
            let x: Vec<f64> = x.into_iter().map(f64::from).collect();
            let n = n.min(x.len());
            let y = runner(n, EdgePolicy::Truncate).run(&x);
            prop_assert_eq!(y, brute_force(&x, n, EdgePolicy::Truncate));
        }

        #[test]
        fn prop_constant_zero_pad_interior(c in -100i32..100, len in 1usize..30, n in 1usize..30) {
            let c = f64::from(c);
            let x = vec![c; len];
            let y = runner(n, EdgePolicy::ZeroPad).run(&x);
            prop_assert_eq!(y.len(), len);
            for v in y {
                prop_assert!(v == c || (v - c / 2.0).abs() < 1e-12 || v == 0.0);
            }
        }
    }
}
