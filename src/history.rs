//! Bounded per-lane history of recent fits.
//!
//! The only state the pipeline carries across frames. Both sides are always
//! pushed together after a successful fit, so their lengths stay equal; the
//! oldest pair is evicted once the bound is reached. The coefficient-wise
//! mean of the buffered fits seeds the prior-guided search on the next frame.

use crate::types::PolyFit;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct FitHistory {
    left: VecDeque<PolyFit>,
    right: VecDeque<PolyFit>,
    capacity: usize,
}

impl FitHistory {
    /// Create an empty history bounded at `capacity` fits per lane.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            left: VecDeque::with_capacity(capacity),
            right: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of buffered fits (identical for both lanes).
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Record a fit pair, evicting the oldest pair past the bound.
    pub fn push(&mut self, left: PolyFit, right: PolyFit) {
        self.left.push_back(left);
        self.right.push_back(right);
        while self.left.len() > self.capacity {
            self.left.pop_front();
            self.right.pop_front();
        }
    }

    /// Coefficient-wise mean of the buffered fits, or `None` when empty.
    pub fn smoothed(&self) -> Option<(PolyFit, PolyFit)> {
        if self.is_empty() {
            return None;
        }
        Some((mean_fit(&self.left), mean_fit(&self.right)))
    }
}

fn mean_fit(fits: &VecDeque<PolyFit>) -> PolyFit {
    let n = fits.len() as f64;
    let mut sum = PolyFit::default();
    for fit in fits {
        sum.a += fit.a;
        sum.b += fit.b;
        sum.c += fit.c;
    }
    PolyFit {
        a: sum.a / n,
        b: sum.b / n,
        c: sum.c / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(c: f64) -> PolyFit {
        PolyFit { a: 0.0, b: 0.0, c }
    }

    #[test]
    fn stays_within_bound_and_keeps_sides_synchronized() {
        let mut hist = FitHistory::new(10);
        for i in 0..25 {
            hist.push(fit(i as f64), fit(1000.0 + i as f64));
        }
        assert_eq!(hist.len(), 10);
        // Oldest entries were evicted first
        let (left, right) = hist.smoothed().expect("non-empty history");
        assert!((left.c - 19.5).abs() < 1e-9, "left mean c = {}", left.c);
        assert!((right.c - 1019.5).abs() < 1e-9, "right mean c = {}", right.c);
    }

    #[test]
    fn smoothed_is_none_when_empty() {
        let hist = FitHistory::new(10);
        assert!(hist.smoothed().is_none());
        assert!(hist.is_empty());
    }

    #[test]
    fn smoothed_averages_coefficients() {
        let mut hist = FitHistory::new(4);
        hist.push(
            PolyFit {
                a: 1.0,
                b: 2.0,
                c: 3.0,
            },
            fit(0.0),
        );
        hist.push(
            PolyFit {
                a: 3.0,
                b: 4.0,
                c: 5.0,
            },
            fit(2.0),
        );
        let (left, right) = hist.smoothed().unwrap();
        assert_eq!(
            left,
            PolyFit {
                a: 2.0,
                b: 3.0,
                c: 4.0
            }
        );
        assert_eq!(right.c, 1.0);
    }
}
