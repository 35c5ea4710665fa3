//! Miscellaneous utility structs and functions.

use std::fmt::Debug;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed interval on the real number line, or on the tile indices of a map.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Creates an interval spanning the two values, in whichever order they are given.
    pub fn spanning(a: T, b: T) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl Interval<usize> {
    /// Iterates over every index in the interval, both ends included.
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    /// The number of indices in the interval, zero if `max < min`.
    pub fn count(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            self.max - self.min + 1
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;

    #[test]
    fn spanning_orders_ends() {
        assert_eq!(Interval::spanning(5.0, -2.0), Interval::new(-2.0, 5.0));
        assert_eq!(Interval::spanning(1, 3), Interval::new(1, 3));
    }

    #[test]
    fn index_interval_is_inclusive() {
        let range = Interval::new(2usize, 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(range.count(), 3);
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn reversed_index_interval_is_empty() {
        let range = Interval::new(5usize, 2);
        assert_eq!(range.count(), 0);
        assert_eq!(range.iter().count(), 0);
    }
}
