//! Shared test infrastructure for wled-segments integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wled_segments::{CapabilityTable, Segment, Transport};

// ============================================================================
// Capability Tables
// ============================================================================

/// Effect table with only the mandatory "Solid" entry, mapped to `solid_id`
pub fn solid_effects(solid_id: u16) -> CapabilityTable {
    [("Solid", solid_id)].into_iter().collect()
}

/// Effect table with "Solid" at 0 and "Test Effect" at 1
pub fn test_effects() -> CapabilityTable {
    [("Solid", 0), ("Test Effect", 1)].into_iter().collect()
}

/// Palette table with "Test Palette" at 1
pub fn test_palettes() -> CapabilityTable {
    [("Test Palette", 1)].into_iter().collect()
}

// ============================================================================
// Capture Callback
// ============================================================================

/// Records what the finalize callback received and how often it was called
pub struct Capture {
    calls: Cell<usize>,
    segments: RefCell<Option<Vec<Segment>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
            segments: RefCell::new(None),
        }
    }

    /// Callback suitable for passing to `SegmentBuilder::new`
    pub fn sink(&self) -> impl FnOnce(Vec<Segment>) + '_ {
        move |segments| {
            self.calls.set(self.calls.get() + 1);
            *self.segments.borrow_mut() = Some(segments);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn segments(&self) -> Option<Vec<Segment>> {
        self.segments.borrow().clone()
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mock transport: {}", self.0)
    }
}

/// In-memory device that serves canned GET responses and records POSTs
pub struct MockTransport {
    responses: HashMap<String, String>,
    posted: RefCell<Vec<(String, String)>>,
    fail_posts: Cell<bool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            posted: RefCell::new(Vec::new()),
            fail_posts: Cell::new(false),
        }
    }

    /// A device with `count` LEDs, `maxseg` slots and a few effects/palettes
    pub fn device(count: u32, maxseg: usize) -> Self {
        Self::new()
            .respond(
                "/json/info",
                &format!(
                    r#"{{"ver":"0.14.0","name":"WLED","leds":{{"count":{},"maxseg":{},"fps":0}},"arch":"esp32"}}"#,
                    count, maxseg
                ),
            )
            .respond("/json/effects", r#"["Solid","Blink","Breathe","Rainbow"]"#)
            .respond("/json/palettes", r#"["Default","* Random Cycle","Party"]"#)
    }

    pub fn respond(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(path.to_string(), body.to_string());
        self
    }

    pub fn fail_posts(&self) {
        self.fail_posts.set(true);
    }

    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.borrow().clone()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn get(&self, path: &str) -> Result<String, Self::Error> {
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| MockError(format!("404 {}", path)))
    }

    fn post(&self, path: &str, body: &str) -> Result<(), Self::Error> {
        if self.fail_posts.get() {
            return Err(MockError("connection reset".to_string()));
        }
        self.posted
            .borrow_mut()
            .push((path.to_string(), body.to_string()));
        Ok(())
    }
}
