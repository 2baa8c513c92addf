//! Track distance between stations.

use std::fmt;

/// Error returned when constructing a non-positive distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {value}: must be greater than zero")]
pub struct InvalidDistance {
    value: i64,
}

impl InvalidDistance {
    /// The rejected value.
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A strictly positive length between two stations.
///
/// This type guarantees that any `Distance` value is greater than zero.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(30).unwrap();
/// assert_eq!(d.get(), 30);
///
/// assert!(Distance::new(0).is_err());
/// assert!(Distance::new(-5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(i64);

impl Distance {
    /// Create a distance from a raw length.
    pub fn new(value: i64) -> Result<Self, InvalidDistance> {
        if value <= 0 {
            return Err(InvalidDistance { value });
        }
        Ok(Distance(value))
    }

    /// Returns the stored length.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Subtract `other`, failing if the remainder would not be positive.
    pub fn checked_sub(self, other: Distance) -> Result<Distance, InvalidDistance> {
        Distance::new(self.0 - other.0)
    }

    /// Add `other`, returning `None` if the sum does not fit in an `i64`.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Distance)
    }
}


impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive() {
        assert_eq!(Distance::new(1).unwrap().get(), 1);
        assert_eq!(Distance::new(30).unwrap().get(), 30);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(Distance::new(0).unwrap_err().value(), 0);
        assert_eq!(Distance::new(-3).unwrap_err().value(), -3);
    }

    #[test]
    fn error_display() {
        let err = Distance::new(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid distance 0: must be greater than zero"
        );
    }

    #[test]
    fn checked_sub() {
        let long = Distance::new(30).unwrap();
        let short = Distance::new(3).unwrap();
        assert_eq!(long.checked_sub(short).unwrap().get(), 27);
        assert!(short.checked_sub(long).is_err());
        assert!(long.checked_sub(long).is_err());
    }

    #[test]
    fn checked_add() {
        let a = Distance::new(27).unwrap();
        let b = Distance::new(3).unwrap();
        assert_eq!(a.checked_add(b).unwrap().get(), 30);
    }

    #[test]
    fn checked_add_overflow() {
        let max = Distance::new(i64::MAX).unwrap();
        let one = Distance::new(1).unwrap();
        assert_eq!(max.checked_add(one), None);
        assert_eq!(
            Distance::new(i64::MAX - 1).unwrap().checked_add(one),
            Some(max)
        );
    }

    #[test]
    fn display_and_debug() {
        let d = Distance::new(33).unwrap();
        assert_eq!(d.to_string(), "33");
        assert_eq!(format!("{:?}", d), "Distance(33)");
    }
}
