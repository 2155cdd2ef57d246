//! The closed set of configurable dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One configurable dimension of the vanity assembly.
///
/// The declaration order is significant: it is the iteration order of a
/// [`ChoiceMap`](crate::choice_map::ChoiceMap) and therefore of every serialized session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotType {
    /// Cabinet depth in centimetres.
    Breadth,
    /// Cabinet width in centimetres.
    Width,
    /// Cabinet body finish, sized to the current breadth and width.
    Color,
    /// Top type: an insert basin or a counter top.
    Top,
    /// Insert basin model (insert-basin tops only).
    Insert,
    /// Counter top slab (counter tops only).
    Worktop,
    /// Sit-on basin (counter tops only).
    Basin,
    Tap,
    Handle,
    Stand,
}

impl SlotType {
    pub const ALL: [Self; 10] = [
        Self::Breadth,
        Self::Width,
        Self::Color,
        Self::Top,
        Self::Insert,
        Self::Worktop,
        Self::Basin,
        Self::Tap,
        Self::Handle,
        Self::Stand,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breadth => "breadth",
            Self::Width => "width",
            Self::Color => "color",
            Self::Top => "top",
            Self::Insert => "insert",
            Self::Worktop => "worktop",
            Self::Basin => "basin",
            Self::Tap => "tap",
            Self::Handle => "handle",
            Self::Stand => "stand",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlotType(pub String);

impl fmt::Display for UnknownSlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown slot type '{}'", self.0)
    }
}

impl std::error::Error for UnknownSlotType {}

impl FromStr for SlotType {
    type Err = UnknownSlotType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSlotType(s.to_owned()))
    }
}
