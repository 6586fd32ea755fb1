//! Fluent builder for a device's segment list.
//!
//! Provides [`SegmentBuilder`], which accumulates contiguous segments through
//! chained calls, fills unused device slots with disabled padding segments and
//! hands the finished list to a caller-supplied callback.

use crate::capability::{CapabilityTable, SOLID_EFFECT, Sentinel};
use crate::colors::{COLOR_SLOTS, DEFAULT_COLORS, Rgbw, slots_to_value};
use crate::device::LedInfo;
use crate::error::SegmentError;
use crate::segment::{Segment, keys};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;
use serde_json::Value;

/// The lifecycle state of a segment builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuilderState {
    /// Accepting chained calls. A segment is always in progress.
    Building,
    /// `done` was called. Every further call fails with `InvalidState`.
    Done,
}

/// Builds the full segment list for one device state update.
///
/// The builder always holds one in-progress segment. Chained calls mutate it
/// in place, [`next`](Self::next) commits it and starts the following segment
/// where the committed one stops, and [`done`](Self::done) pads the list to
/// exactly `maxseg` entries before passing it to the callback.
///
/// ```
/// use wled_segments::{CapabilityTable, SegmentBuilder};
///
/// let effects = CapabilityTable::from_names(["Solid", "Blink"]);
/// let palettes = CapabilityTable::new();
///
/// let segments = SegmentBuilder::new(4, 30, &effects, &palettes, |segments| segments)
///     .unwrap()
///     .length(10).unwrap().fx("Blink").unwrap().next().unwrap()
///     .next().unwrap()
///     .done()
///     .unwrap();
///
/// assert_eq!(segments.len(), 4);
/// assert_eq!(segments[1].start(), Some(10));
/// assert_eq!(segments[1].stop(), Some(30));
/// ```
///
/// # Type Parameters
/// * `'t` - Lifetime of the borrowed effect and palette tables
/// * `F` - Callback receiving the finished list
pub struct SegmentBuilder<'t, F> {
    maxseg: usize,
    led_count: u32,
    effects: &'t CapabilityTable,
    palettes: &'t CapabilityTable,
    solid: u16,
    segments: Vec<Segment>,
    current: Segment,
    callback: Option<F>,
    state: BuilderState,
}

impl<'t, F, R> SegmentBuilder<'t, F>
where
    F: FnOnce(Vec<Segment>) -> R,
{
    /// Creates a builder for a device with `maxseg` slots and `led_count` LEDs.
    ///
    /// The first segment starts at LED 0 and spans the whole strip.
    ///
    /// # Errors
    /// * `UnknownEffect` - `effects` has no `"Solid"` entry to use as the default effect
    pub fn new(
        maxseg: usize,
        led_count: u32,
        effects: &'t CapabilityTable,
        palettes: &'t CapabilityTable,
        callback: F,
    ) -> Result<Self, SegmentError> {
        let solid = effects
            .get(SOLID_EFFECT)
            .ok_or_else(|| SegmentError::UnknownEffect {
                name: SOLID_EFFECT.to_string(),
            })?;

        Ok(Self {
            maxseg,
            led_count,
            effects,
            palettes,
            solid,
            segments: Vec::new(),
            current: fresh_segment(0, led_count, solid),
            callback: Some(callback),
            state: BuilderState::Building,
        })
    }

    /// Creates a builder sized from the LED section of a device's info report.
    pub fn from_info(
        info: &LedInfo,
        effects: &'t CapabilityTable,
        palettes: &'t CapabilityTable,
        callback: F,
    ) -> Result<Self, SegmentError> {
        Self::new(info.maxseg, info.count, effects, palettes, callback)
    }

    /// Finalizes the list and passes it to the callback.
    ///
    /// The in-progress segment is NOT committed: end the chain with
    /// [`next`](Self::next) before calling this if the last segment should be
    /// sent. Unused slots are filled with padding segments carrying their slot
    /// `id` and `stop = 0`. Returns whatever the callback returns.
    ///
    /// The builder is single-use: afterwards it is in `Done` state whether or
    /// not this call succeeded.
    ///
    /// # Errors
    /// * `InvalidState` - `done` was already called
    /// * `CapacityExceeded` - more than `maxseg` segments were committed; the
    ///   callback is not invoked
    pub fn done(&mut self) -> Result<R, SegmentError> {
        self.ensure_building()?;
        self.state = BuilderState::Done;

        let callback = self.callback.take().ok_or(SegmentError::InvalidState {
            expected: "Building",
            actual: BuilderState::Done,
        })?;

        let committed = self.segments.len();
        if committed > self.maxseg {
            #[cfg(feature = "tracing")]
            tracing::warn!(committed, maxseg = self.maxseg, "segment capacity exceeded");
            return Err(SegmentError::CapacityExceeded {
                committed,
                maxseg: self.maxseg,
            });
        }

        let mut segments = mem::take(&mut self.segments);
        segments.extend((committed..self.maxseg).map(Segment::padding));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            committed,
            padding = self.maxseg - committed,
            "segment list finalized"
        );

        Ok(callback(segments))
    }
}

impl<'t, F> SegmentBuilder<'t, F> {
    /// Commits the in-progress segment and starts the next one.
    ///
    /// The new segment starts where the committed one stops and, until
    /// shortened with [`length`](Self::length), runs to the end of the strip.
    /// No capacity check happens here; see [`done`](Self::done).
    ///
    /// # Errors
    /// * `InvalidState` - the builder is finalized
    /// * `InvalidBounds` - `stop` was overwritten with a non-integer
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        let start = self
            .current
            .stop()
            .ok_or(SegmentError::InvalidBounds { key: keys::STOP })?;

        let fresh = fresh_segment(start, self.led_count, self.solid);
        let committed = mem::replace(&mut self.current, fresh);
        self.segments.push(committed);

        #[cfg(feature = "tracing")]
        tracing::trace!(index = self.segments.len() - 1, start, "segment committed");

        Ok(self)
    }

    /// Shortens the in-progress segment to `length` LEDs from its start.
    ///
    /// # Errors
    /// * `InvalidState` - the builder is finalized
    /// * `InvalidBounds` - `start` was overwritten with a non-integer, or is so
    ///   large that `start + length` overflows
    pub fn length(&mut self, length: u32) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        let start = self
            .current
            .start()
            .ok_or(SegmentError::InvalidBounds { key: keys::START })?;

        let stop = start
            .checked_add(u64::from(length))
            .ok_or(SegmentError::InvalidBounds { key: keys::STOP })?;

        self.current.insert(keys::STOP, stop);
        Ok(self)
    }

    /// Selects the effect by name, or passes a sentinel (`"~"`, `"~-"`, `"r"`) through.
    ///
    /// # Errors
    /// * `InvalidState` - the builder is finalized
    /// * `UnknownEffect` - the name is not in the effect table; the segment is unchanged
    pub fn fx(&mut self, effect: &str) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        let value = resolve(effect, self.effects).ok_or_else(|| SegmentError::UnknownEffect {
            name: effect.to_string(),
        })?;

        self.current.insert(keys::FX, value);
        Ok(self)
    }

    /// Selects the palette by name, or passes a sentinel (`"~"`, `"~-"`, `"r"`) through.
    ///
    /// # Errors
    /// * `InvalidState` - the builder is finalized
    /// * `UnknownPalette` - the name is not in the palette table; the segment is unchanged
    pub fn pal(&mut self, palette: &str) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        let value =
            resolve(palette, self.palettes).ok_or_else(|| SegmentError::UnknownPalette {
                name: palette.to_string(),
            })?;

        self.current.insert(keys::PAL, value);
        Ok(self)
    }

    /// Stores any attribute on the in-progress segment, verbatim.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        self.current.insert(key, value);
        Ok(self)
    }

    /// Names an attribute for a one-argument setter, e.g. `builder.attr("bri").to(128)`.
    ///
    /// Equivalent to [`set`](Self::set) with the same key and value.
    pub fn attr(&mut self, key: impl Into<String>) -> AttrSetter<'_, 't, F> {
        AttrSetter {
            builder: self,
            key: key.into(),
        }
    }

    /// Replaces one of the four color slots.
    ///
    /// # Errors
    /// * `InvalidState` - the builder is finalized
    /// * `InvalidBounds` - `slot` is 4 or more
    pub fn color(&mut self, slot: usize, color: Rgbw) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        if slot >= COLOR_SLOTS {
            return Err(SegmentError::InvalidBounds { key: keys::COL });
        }

        let slots = self
            .current
            .get_mut(keys::COL)
            .and_then(Value::as_array_mut)
            .filter(|slots| slots.len() == COLOR_SLOTS);

        match slots {
            Some(slots) => slots[slot] = color.into(),
            None => {
                // `col` was replaced through `set`; start over from black
                let mut colors = DEFAULT_COLORS;
                colors[slot] = color;
                self.current.insert(keys::COL, slots_to_value(&colors));
            }
        }
        Ok(self)
    }

    /// Replaces all four color slots.
    pub fn colors(&mut self, colors: [Rgbw; COLOR_SLOTS]) -> Result<&mut Self, SegmentError> {
        self.ensure_building()?;
        self.current.insert(keys::COL, slots_to_value(&colors));
        Ok(self)
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Returns the segments committed so far.
    pub fn committed(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the in-progress segment.
    pub fn current(&self) -> &Segment {
        &self.current
    }

    /// Returns the number of device segment slots `done` pads to.
    pub fn maxseg(&self) -> usize {
        self.maxseg
    }

    /// Returns the strip length new segments extend to by default.
    pub fn led_count(&self) -> u32 {
        self.led_count
    }

    fn ensure_building(&self) -> Result<(), SegmentError> {
        match self.state {
            BuilderState::Building => Ok(()),
            actual => Err(SegmentError::InvalidState {
                expected: "Building",
                actual,
            }),
        }
    }
}

impl<F> core::fmt::Debug for SegmentBuilder<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentBuilder")
            .field("maxseg", &self.maxseg)
            .field("led_count", &self.led_count)
            .field("segments", &self.segments)
            .field("current", &self.current)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// One-argument setter returned by [`SegmentBuilder::attr`].
#[must_use = "the attribute is only stored once `to` is called"]
pub struct AttrSetter<'b, 't, F> {
    builder: &'b mut SegmentBuilder<'t, F>,
    key: String,
}

impl<'b, 't, F> AttrSetter<'b, 't, F> {
    /// Stores `value` under the named attribute and returns the builder.
    pub fn to(self, value: impl Into<Value>) -> Result<&'b mut SegmentBuilder<'t, F>, SegmentError> {
        let AttrSetter { builder, key } = self;
        builder.set(key, value)
    }
}

fn fresh_segment(start: u64, led_count: u32, solid: u16) -> Segment {
    let mut segment = Segment::new();
    segment.insert(keys::START, start);
    segment.insert(keys::STOP, led_count);
    segment.insert(keys::COL, slots_to_value(&DEFAULT_COLORS));
    segment.insert(keys::FX, solid);
    segment
}

fn resolve(name: &str, table: &CapabilityTable) -> Option<Value> {
    match Sentinel::parse(name) {
        Some(sentinel) => Some(Value::from(sentinel.as_str())),
        None => table.get(name).map(Value::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_only() -> CapabilityTable {
        CapabilityTable::from_names(["Solid"])
    }

    #[test]
    fn fresh_builder_spans_whole_strip() {
        let effects = solid_only();
        let palettes = CapabilityTable::new();
        let builder = SegmentBuilder::new(2, 12, &effects, &palettes, |s| s).unwrap();

        assert_eq!(builder.state(), BuilderState::Building);
        assert_eq!(builder.maxseg(), 2);
        assert_eq!(builder.led_count(), 12);
        assert_eq!(builder.current().start(), Some(0));
        assert_eq!(builder.current().stop(), Some(12));
        assert!(builder.committed().is_empty());
    }

    #[test]
    fn non_integer_stop_blocks_next() {
        let effects = solid_only();
        let palettes = CapabilityTable::new();
        let mut builder = SegmentBuilder::new(2, 12, &effects, &palettes, |s| s).unwrap();

        builder.set("stop", "end").unwrap();
        let result = builder.next();
        assert!(matches!(
            result,
            Err(SegmentError::InvalidBounds { key: "stop" })
        ));
        assert!(builder.committed().is_empty());
    }
}
