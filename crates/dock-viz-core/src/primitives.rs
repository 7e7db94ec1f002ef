// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Core Primitives
//!
//! Small generic building blocks used by the rendering crate, most notably the
//! data ranges of chart axes.

use std::fmt;
use std::ops::Sub;

/// A closed interval `[start, end]` with `start <= end`.
///
/// # Examples
///
/// ```
/// use dock_viz_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(5));
/// assert_eq!(interval.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T> Interval<T> {
    /// Creates a new interval from two bounds in any order.
    ///
    /// If `b < a` the bounds are swapped, so the interval is always well-formed.
    /// Bounds that do not compare (NaN) are kept as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use dock_viz_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end
    }

    /// Checks whether `x` lies within the interval, both bounds included.
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start && x <= self.end
    }

    #[inline]
    pub fn length(&self) -> <T as Sub>::Output
    where
        T: Sub + Copy,
    {
        self.end - self.start
    }

    /// Smallest interval covering every value of the iterator, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dock_viz_core::primitives::Interval;
    ///
    /// let hull = Interval::hull([4.0, -1.0, 2.5]).unwrap();
    /// assert_eq!(hull, Interval::new(-1.0, 4.0));
    /// assert!(Interval::<f64>::hull([]).is_none());
    /// ```
    pub fn hull<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: PartialOrd + Copy,
    {
        let mut it = values.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        });
        Some(Self::new(lo, hi))
    }
}

impl Interval<f64> {
    /// Widens both ends by `pad`.
    #[inline]
    pub fn padded(&self, pad: f64) -> Self {
        Self::new(self.start - pad, self.end + pad)
    }

    /// Widens both ends by `fraction` of the length. A degenerate interval is widened by
    /// `fallback` instead, so it always maps onto a non-empty span.
    ///
    /// # Examples
    ///
    /// ```
    /// use dock_viz_core::primitives::Interval;
    ///
    /// assert_eq!(Interval::new(0.0, 10.0).with_margin(0.05, 1.0), Interval::new(-0.5, 10.5));
    /// assert_eq!(Interval::new(3.0, 3.0).with_margin(0.05, 1.0), Interval::new(2.0, 4.0));
    /// ```
    pub fn with_margin(&self, fraction: f64, fallback: f64) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.padded(len * fraction)
        } else {
            self.padded(fallback)
        }
    }

    /// Position of `v` relative to the interval: `0.0` at `start`, `1.0` at `end`.
    /// A zero-length interval maps everything to `0.5`.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            0.5
        } else {
            (v - self.start) / len
        }
    }

    /// Inverse of [`Interval::normalize`].
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.start + t * self.length()
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_bounds() {
        let i = Interval::new(7.5, -2.0);
        assert_eq!(i.start(), -2.0);
        assert_eq!(i.end(), 7.5);
        assert_eq!(i.length(), 9.5);
    }

    #[test]
    fn contains_is_closed() {
        let i = Interval::new(0, 3);
        assert!(i.contains(0));
        assert!(i.contains(3));
        assert!(!i.contains(4));
        assert!(!i.contains(-1));
    }

    #[test]
    fn normalize_and_lerp_are_inverse() {
        let i = Interval::new(-0.6, 2.6);
        for v in [-0.6, 0.0, 1.0, 2.6] {
            let t = i.normalize(v);
            assert!((i.lerp(t) - v).abs() < 1e-12);
        }
        assert_eq!(i.normalize(-0.6), 0.0);
        assert_eq!(i.normalize(2.6), 1.0);
    }

    #[test]
    fn degenerate_interval_normalizes_to_center() {
        let i = Interval::new(4.0, 4.0);
        assert_eq!(i.normalize(4.0), 0.5);
        assert_eq!(i.normalize(100.0), 0.5);
    }

    #[test]
    fn display() {
        assert_eq!(Interval::new(1, 2).to_string(), "[1, 2]");
    }
}
