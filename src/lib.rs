#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SegmentBuilder`**: Fluent, single-use builder for one device state update
//! - **`Segment`**: One segment descriptor, an open map of WLED attribute names to JSON values
//! - **`CapabilityTable`**: Effect or palette name to device id, as reported by the device
//! - **`Sentinel`**: The reserved `"~"`, `"~-"` and `"r"` effect/palette values resolved on the device
//! - **`Rgbw`**: One of the four color slots of a segment
//! - **`WledNode`**: Device adapter that feeds builders and posts their results
//! - **`Transport`**: Trait to implement for your HTTP client
//!
//! Segments are contiguous: each one starts where the previous one stops. The
//! finished list always has exactly as many entries as the device has segment
//! slots; unused slots are sent as disabled padding segments.

extern crate alloc;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod builder;
pub mod capability;
pub mod colors;
pub mod device;
pub mod error;
pub mod segment;

pub use builder::{AttrSetter, BuilderState, SegmentBuilder};
pub use capability::{CapabilityTable, SOLID_EFFECT, Sentinel};
pub use colors::{BLACK, BLUE, DEFAULT_COLORS, GREEN, RED, Rgbw, WHITE};
pub use device::{DeviceError, DeviceInfo, LedInfo, Transport, WledNode, encode_state};
pub use error::SegmentError;
pub use segment::Segment;
