//! Wire-format errors.

use thiserror::Error;

/// Result alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;

/// Structural problems with a received buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Buffer is shorter than the scheme's fixed header
    #[error("message too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Header size of the scheme
        expected: usize,
        /// Bytes actually received
        actual: usize,
    },

    /// Key index field holds a negative value
    #[error("negative key index: {value}")]
    NegativeIndex {
        /// Decoded index
        value: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WireError::TooShort { expected: 40, actual: 3 };
        assert_eq!(err.to_string(), "message too short: expected at least 40 bytes, got 3");

        let err = WireError::NegativeIndex { value: -1 };
        assert_eq!(err.to_string(), "negative key index: -1");
    }
}
