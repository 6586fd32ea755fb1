//! Device capability tables and dynamic effect sentinels.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Effect every device ships with; used as the default `fx` of new segments.
pub const SOLID_EFFECT: &str = "Solid";

/// Read-only mapping from an effect or palette name to its device id.
///
/// WLED reports its effects and palettes as plain name arrays where the
/// position of a name is its id, see [`CapabilityTable::from_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    ids: BTreeMap<String, u16>,
}

impl CapabilityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a device name list, assigning ids by position.
    ///
    /// If a name appears more than once the last position wins. Ids are
    /// `u16`, so names past position 65535 are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map_while(|(id, name)| u16::try_from(id).ok().map(|id| (name, id)))
            .collect()
    }

    /// Looks up the id registered for `name`.
    pub fn get(&self, name: &str) -> Option<u16> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over the known names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, u16)> for CapabilityTable {
    fn from_iter<I: IntoIterator<Item = (S, u16)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(|(name, id)| (name.into(), id)).collect(),
        }
    }
}

/// Dynamic effect/palette values resolved on the device instead of locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentinel {
    /// `"~"`: keep the current value.
    Keep,
    /// `"~-"`: cycle to the previous value.
    Cycle,
    /// `"r"`: pick a random value.
    Random,
}

impl Sentinel {
    /// Recognizes the three reserved strings; anything else is a name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "~" => Some(Sentinel::Keep),
            "~-" => Some(Sentinel::Cycle),
            "r" => Some(Sentinel::Random),
            _ => None,
        }
    }

    /// Returns the wire string for this sentinel.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentinel::Keep => "~",
            Sentinel::Cycle => "~-",
            Sentinel::Random => "r",
        }
    }
}
