//! Validation and arithmetic failures surfaced to the control panel.

use std::fmt;

/// Everything the core can refuse to do.
///
/// Over-selection is deliberately absent: extra clicks past the cluster size
/// are a capacity limit and are ignored, not reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Text that does not parse as the expected kind of number.
    InvalidNumber {
        /// Which input field the text came from.
        field: &'static str,
        /// The offending text, as entered.
        value: String,
    },
    /// A reuse index below zero.
    NegativeIndex {
        /// Which input field the value came from.
        field: &'static str,
        /// The parsed value.
        value: i64,
    },
    /// A reuse index too large for the lattice arithmetic.
    OutOfRange {
        /// Which input field the value came from.
        field: &'static str,
        /// The parsed value.
        value: i64,
        /// Largest accepted value.
        max: u32,
    },
    /// A division whose divisor is zero.
    DivisionByZero {
        /// Human-readable name of the zero divisor.
        divisor: &'static str,
    },
    /// The reuse pattern cannot change while seeds are being selected.
    PatternLocked,
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value } => {
                write!(f, "{field}: '{value}' is not a valid number")
            }
            Self::NegativeIndex { field, value } => {
                write!(f, "{field}: {value} must not be negative")
            }
            Self::OutOfRange { field, value, max } => {
                write!(f, "{field}: {value} exceeds the maximum of {max}")
            }
            Self::DivisionByZero { divisor } => write!(f, "division by zero: {divisor} is 0"),
            Self::PatternLocked => write!(f, "the reuse pattern is locked while selecting"),
        }
    }
}

impl std::error::Error for ToolError {}
