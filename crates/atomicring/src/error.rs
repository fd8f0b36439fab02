//! Error types for ring buffer operations.

use thiserror::Error;

/// Errors returned by push, pop and peek.
///
/// Both variants are expected, recoverable outcomes of polling a bounded
/// buffer. No operation retries internally; the caller decides whether to
/// spin, sleep or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RingError {
    /// The buffer has no free slot. The value passed to `push_back` was dropped.
    #[error("ring buffer is full")]
    Full,

    /// The buffer holds no element.
    #[error("ring buffer is empty")]
    Empty,
}

impl RingError {
    /// Returns `true` if this is the `Full` rejection of a push.
    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Returns `true` if this is the `Empty` rejection of a pop or peek.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RingError::Full.to_string(), "ring buffer is full");
        assert_eq!(RingError::Empty.to_string(), "ring buffer is empty");
    }

    #[test]
    fn test_error_predicates() {
        assert!(RingError::Full.is_full());
        assert!(!RingError::Full.is_empty());
        assert!(RingError::Empty.is_empty());
        assert!(!RingError::Empty.is_full());
    }
}
