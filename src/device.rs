//! Device adapter plumbing for the WLED JSON API.
//!
//! Provides [`WledNode`], which reads a device's capacity and capability lists
//! through a [`Transport`] and hands out [`SegmentBuilder`]s whose callback
//! posts the finished segment list back as a state update. The HTTP client
//! itself is supplied by the caller; no retries happen here.

use crate::builder::SegmentBuilder;
use crate::capability::CapabilityTable;
use crate::error::SegmentError;
use crate::segment::Segment;
use alloc::string::String;
use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Device info report, including the LED section.
pub const INFO_PATH: &str = "/json/info";
/// JSON array of effect names; the position of a name is its id.
pub const EFFECTS_PATH: &str = "/json/effects";
/// JSON array of palette names; the position of a name is its id.
pub const PALETTES_PATH: &str = "/json/palettes";
/// State update endpoint accepting `{"seg": [...]}`.
pub const STATE_PATH: &str = "/json/state";

/// Trait for abstracting the HTTP connection to a device.
///
/// Implement this on top of whatever client your platform provides. Paths are
/// relative to the device's base URL, e.g. `/json/info`.
pub trait Transport {
    /// Error reported by the underlying client.
    type Error;

    /// Fetches `path` and returns the response body.
    fn get(&self, path: &str) -> Result<String, Self::Error>;

    /// Sends `body` as JSON to `path`.
    fn post(&self, path: &str, body: &str) -> Result<(), Self::Error>;
}

/// LED section of the device info report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedInfo {
    /// Total number of LEDs on the strip.
    pub count: u32,
    /// Number of segment slots the device supports.
    pub maxseg: usize,
}

/// The parts of `/json/info` the adapter uses. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub leds: LedInfo,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ver: Option<String>,
}

/// Body of a state update.
#[derive(Debug, Serialize)]
pub struct StateUpdate<'a> {
    pub seg: &'a [Segment],
}

/// Encodes a segment list as a `{"seg": [...]}` state update body.
pub fn encode_state(segments: &[Segment]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StateUpdate { seg: segments })
}

/// Errors that can occur while talking to a device.
#[derive(Debug)]
pub enum DeviceError<E> {
    /// The transport failed.
    Transport(E),
    /// A response could not be decoded, or a request could not be encoded.
    Json(serde_json::Error),
    /// Building the segment list failed.
    Segment(SegmentError),
}

impl<E: core::fmt::Display> core::fmt::Display for DeviceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeviceError::Transport(err) => write!(f, "transport error: {}", err),
            DeviceError::Json(err) => write!(f, "json error: {}", err),
            DeviceError::Segment(err) => write!(f, "segment error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + core::fmt::Display> std::error::Error for DeviceError<E> {}

impl<E> From<SegmentError> for DeviceError<E> {
    fn from(err: SegmentError) -> Self {
        DeviceError::Segment(err)
    }
}

impl<E> From<serde_json::Error> for DeviceError<E> {
    fn from(err: serde_json::Error) -> Self {
        DeviceError::Json(err)
    }
}

/// A WLED device reachable through a [`Transport`].
///
/// Capacity and capability tables are read once at [`connect`](Self::connect)
/// time and reused for every [`update`](Self::update).
pub struct WledNode<T: Transport> {
    transport: T,
    info: DeviceInfo,
    effects: CapabilityTable,
    palettes: CapabilityTable,
}

impl<T: Transport> WledNode<T> {
    /// Queries the device for its LED info, effects and palettes.
    pub fn connect(transport: T) -> Result<Self, DeviceError<T::Error>> {
        let info: DeviceInfo = read_json(&transport, INFO_PATH)?;
        let effects: Vec<String> = read_json(&transport, EFFECTS_PATH)?;
        let palettes: Vec<String> = read_json(&transport, PALETTES_PATH)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            leds = info.leds.count,
            maxseg = info.leds.maxseg,
            effects = effects.len(),
            palettes = palettes.len(),
            "connected to device"
        );

        Ok(Self {
            transport,
            info,
            effects: CapabilityTable::from_names(effects),
            palettes: CapabilityTable::from_names(palettes),
        })
    }

    /// Starts a new state update.
    ///
    /// Calling `done` on the returned builder posts the segment list to the
    /// device and returns the transport's result.
    pub fn update(
        &self,
    ) -> Result<
        SegmentBuilder<'_, impl FnOnce(Vec<Segment>) -> Result<(), DeviceError<T::Error>>>,
        DeviceError<T::Error>,
    > {
        SegmentBuilder::from_info(
            &self.info.leds,
            &self.effects,
            &self.palettes,
            move |segments: Vec<Segment>| self.send(&segments),
        )
        .map_err(DeviceError::Segment)
    }

    /// Posts a finished segment list to the device.
    pub fn send(&self, segments: &[Segment]) -> Result<(), DeviceError<T::Error>> {
        let body = encode_state(segments)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(segments = segments.len(), "posting state update");

        self.transport
            .post(STATE_PATH, &body)
            .map_err(DeviceError::Transport)
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn effects(&self) -> &CapabilityTable {
        &self.effects
    }

    pub fn palettes(&self) -> &CapabilityTable {
        &self.palettes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn read_json<T: Transport, D: DeserializeOwned>(
    transport: &T,
    path: &str,
) -> Result<D, DeviceError<T::Error>> {
    let body = transport.get(path).map_err(DeviceError::Transport)?;
    Ok(serde_json::from_str(&body)?)
}
