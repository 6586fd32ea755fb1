//! Error types for segment construction.

use crate::builder::BuilderState;
use alloc::string::String;

/// Errors that can occur while building a segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError {
    /// Effect name is not present in the device's effect table.
    UnknownEffect {
        /// The name that failed to resolve.
        name: String,
    },

    /// Palette name is not present in the device's palette table.
    UnknownPalette {
        /// The name that failed to resolve.
        name: String,
    },

    /// Operation called on a builder that has already been finalized.
    InvalidState {
        /// Human-readable description of the expected state, e.g. "Building"
        expected: &'static str,
        /// The actual current state
        actual: BuilderState,
    },

    /// More segments were committed than the device has slots for.
    CapacityExceeded {
        /// Number of committed segments.
        committed: usize,
        /// Device segment capacity.
        maxseg: usize,
    },

    /// A bound attribute holds a value the builder cannot use.
    ///
    /// Raised when `start` or `stop` was overwritten with a non-integer through
    /// `set`, or when a color slot index is out of range.
    InvalidBounds {
        /// The offending attribute key.
        key: &'static str,
    },
}

impl core::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SegmentError::UnknownEffect { name } => {
                write!(f, "unknown effect: {:?}", name)
            }
            SegmentError::UnknownPalette { name } => {
                write!(f, "unknown palette: {:?}", name)
            }
            SegmentError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but builder is in {:?}",
                    expected, actual
                )
            }
            SegmentError::CapacityExceeded { committed, maxseg } => {
                write!(
                    f,
                    "{} segments committed but device only has {} segment slots",
                    committed, maxseg
                )
            }
            SegmentError::InvalidBounds { key } => {
                write!(f, "segment attribute {:?} is not a usable bound", key)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SegmentError {}
