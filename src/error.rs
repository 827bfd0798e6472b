//! Error types for lanewise batch operations.
//!
//! Lane operations themselves are total over IEEE-754 input and never fail.
//! Errors only arise at the slice surface, where the caller hands in buffers
//! whose lengths have to line up.

use thiserror::Error;

/// Errors that can occur when applying lane kernels over slices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    /// The two operands of a binary slice operation have different lengths.
    #[error("Length mismatch: left operand has {left} elements, right operand has {right}")]
    LengthMismatch {
        /// Length of the left (first) operand.
        left: usize,
        /// Length of the right (second) operand.
        right: usize,
    },
    /// The caller-provided output buffer does not match the input length.
    #[error("Output length mismatch: expected {expected} elements, got {got}")]
    OutputLength {
        /// Number of elements the output must hold.
        expected: usize,
        /// Number of elements the output actually holds.
        got: usize,
    },
}

/// Result type alias for lanewise batch operations.
pub type Result<T> = std::result::Result<T, LaneError>;

/// Creates a length mismatch error.
pub fn length_mismatch(left: usize, right: usize) -> LaneError {
    LaneError::LengthMismatch { left, right }
}

/// Creates an output length error.
pub fn output_length(expected: usize, got: usize) -> LaneError {
    LaneError::OutputLength { expected, got }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(8, 5);
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("8 elements"));
        assert!(display.contains("right operand has 5"));
    }

    #[test]
    fn test_output_length_display() {
        let error = output_length(16, 12);
        let display = format!("{}", error);
        assert!(display.contains("Output length mismatch"));
        assert!(display.contains("expected 16"));
        assert!(display.contains("got 12"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(length_mismatch(4, 3), length_mismatch(4, 3));
        assert_ne!(length_mismatch(4, 3), length_mismatch(3, 4));
        assert_ne!(length_mismatch(4, 3), output_length(4, 3));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = output_length(4, 0);

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
