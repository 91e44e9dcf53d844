//! Error types for splaymemo and the caches built on it

use std::fmt;

/// Result type alias for memoized computations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the memoized workloads
///
/// The data structures themselves never fail: a missing key is `None` and a
/// rotation without a child is a no-op. These variants cover bad arguments
/// coming from the caller and arithmetic that leaves the value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Range bounds reversed or past the end of the array
    InvalidRange {
        /// Inclusive left bound
        left: usize,
        /// Inclusive right bound
        right: usize,
        /// Array length
        len: usize,
    },

    /// Update index past the end of the array
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Result does not fit in the value type
    Overflow {
        /// Argument whose result overflowed
        n: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { left, right, len } => write!(
                f,
                "Invalid range: [{}, {}] for array of length {}",
                left, right, len
            ),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} (length {})", index, len)
            }
            Error::Overflow { n } => write!(f, "Overflow computing value for n = {}", n),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InvalidRange {
            left: 5,
            right: 2,
            len: 10,
        };
        assert_eq!(err.to_string(), "Invalid range: [5, 2] for array of length 10");

        let err = Error::Overflow { n: 187 };
        assert_eq!(err.to_string(), "Overflow computing value for n = 187");
    }
}
