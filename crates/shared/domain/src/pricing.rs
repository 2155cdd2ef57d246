use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

bitflags! {
    /// Disjoint partition of the priced dimensions.
    ///
    /// An empty mask means "every category"; any other mask restricts a price to the
    /// contribution of the categories it names.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Category: u32 {
        const CABINET = 1 << 0;
        const TOP = 1 << 1;
        const BASIN = 1 << 2;
        const TAP = 1 << 3;
        const HANDLE = 1 << 4;
        const STAND = 1 << 5;
    }
}

impl Category {
    /// Mask selecting the total across all categories.
    pub const TOTAL: Self = Self::empty();

    /// Single-category masks in line-item order.
    pub const LINES: [Self; 6] =
        [Self::CABINET, Self::TOP, Self::BASIN, Self::TAP, Self::HANDLE, Self::STAND];

    /// Lower-case label of a single-category mask.
    #[must_use]
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 6] = ["cabinet", "top", "basin", "tap", "handle", "stand"];
        Self::LINES.iter().position(|line| *line == self).map_or("mixed", |idx| LABELS[idx])
    }

    /// Whether a price computed under `self` includes the contribution of `category`.
    #[must_use]
    pub const fn includes(self, category: Self) -> bool {
        self.is_empty() || self.intersects(category)
    }
}

impl From<u32> for Category {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// A price in minor currency units (cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_minor(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn from_major(units: u64) -> Self {
        Self(units * 100)
    }

    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
