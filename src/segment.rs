//! The segment descriptor handed to the device.
//!
//! A [`Segment`] is an open attribute map rather than a closed struct: WLED
//! grows new segment keys between firmware releases, and the builder passes any
//! key the caller sets straight through to the wire.

use alloc::string::String;
use core::ops::Index;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire names of the attributes the builder itself manages.
pub mod keys {
    /// First LED of the segment (inclusive).
    pub const START: &str = "start";
    /// End of the segment (exclusive). `0` disables a padding slot.
    pub const STOP: &str = "stop";
    /// Four color slots.
    pub const COL: &str = "col";
    /// Effect id or sentinel.
    pub const FX: &str = "fx";
    /// Palette id or sentinel.
    pub const PAL: &str = "pal";
    /// Slot index, only present on padding segments.
    pub const ID: &str = "id";
}

static NULL: Value = Value::Null;

/// A single segment descriptor: attribute name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment(Map<String, Value>);

impl Segment {
    /// Creates an empty segment with no attributes.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Creates the placeholder emitted for an unused device slot.
    ///
    /// Carries only `id` and `stop = 0`, which tells the device to clear the slot.
    pub fn padding(id: usize) -> Self {
        let mut segment = Self::new();
        segment.insert(keys::ID, id);
        segment.insert(keys::STOP, 0u32);
        segment
    }

    /// Stores `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of attributes set on this segment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns `start` if it is present and a non-negative integer.
    pub fn start(&self) -> Option<u64> {
        self.get(keys::START).and_then(Value::as_u64)
    }

    /// Returns `stop` if it is present and a non-negative integer.
    pub fn stop(&self) -> Option<u64> {
        self.get(keys::STOP).and_then(Value::as_u64)
    }

    /// Returns the slot `id` of a padding segment.
    pub fn id(&self) -> Option<u64> {
        self.get(keys::ID).and_then(Value::as_u64)
    }

    /// Whether this is a disabled (zero-length padding) slot.
    pub fn is_padding(&self) -> bool {
        self.contains_key(keys::ID) && self.stop() == Some(0)
    }
}

impl Index<&str> for Segment {
    type Output = Value;

    /// Missing keys index to `Value::Null`, the same as `serde_json::Value`.
    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl From<Map<String, Value>> for Segment {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Segment> for Value {
    fn from(segment: Segment) -> Self {
        Value::Object(segment.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn padding_has_only_id_and_stop() {
        let segment = Segment::padding(3);
        assert_eq!(segment.len(), 2);
        assert_eq!(segment.id(), Some(3));
        assert_eq!(segment.stop(), Some(0));
        assert!(segment.is_padding());
        assert_eq!(serde_json::to_value(&segment).unwrap(), json!({"id": 3, "stop": 0}));
    }

    #[test]
    fn iter_walks_attributes_in_key_order() {
        let mut segment = Segment::new();
        segment.insert(keys::STOP, 4u32);
        segment.insert(keys::FX, 2u16);
        segment.insert("bri", 128u8);

        let keys: alloc::vec::Vec<&str> = segment.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["bri", "fx", "stop"]);
    }

    #[test]
    fn missing_key_indexes_to_null() {
        let segment = Segment::new();
        assert_eq!(segment["fx"], Value::Null);
        assert_eq!(segment.start(), None);
    }
}
