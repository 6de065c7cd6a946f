// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance units and unit families.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::ScaleError;

/// A concrete length unit a scale bar can be labeled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// Meters (`m`).
    Meters,
    /// Kilometers (`km`).
    Kilometers,
    /// International miles (`mi`).
    Miles,
    /// International feet (`ft`).
    Feet,
    /// International yards (`yds`).
    Yards,
    /// Nautical miles (`nm`).
    NauticalMiles,
}

impl DistanceUnit {
    /// Every leaf unit, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Meters,
        Self::Kilometers,
        Self::Miles,
        Self::Feet,
        Self::Yards,
        Self::NauticalMiles,
    ];

    /// Short label shown after the value on the bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Miles => "mi",
            Self::Feet => "ft",
            Self::Yards => "yds",
            Self::NauticalMiles => "nm",
        }
    }

    /// Length of one unit in meters.
    #[must_use]
    pub fn meters(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1_000.0,
            Self::Miles => 1_609.344,
            Self::Feet => 0.3048,
            Self::Yards => 0.9144,
            Self::NauticalMiles => 1_852.0,
        }
    }

    /// Converts a length in meters into this unit.
    #[must_use]
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters()
    }

    /// Converts `value`, expressed in this unit, into `to`.
    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        if self == to {
            return value;
        }
        value * self.meters() / to.meters()
    }

    /// Returns the label for a raw unit token.
    ///
    /// Unlike [`UnitFamily::from_str`] this never fails: any token that does
    /// not name a leaf unit is labeled as meters. Family tokens (`imperial`,
    /// `metric`) are labeled with their untiered base unit.
    ///
    /// The meters default is long-standing behavior that callers may rely
    /// on, so it is kept, but it is reported at `warn` level because an
    /// unknown unit silently reading as meters is usually a mistake.
    #[must_use]
    pub fn label_for_token(token: &str) -> &'static str {
        match token.parse::<UnitFamily>() {
            Ok(family) => family.base_unit().label(),
            Err(_) => {
                log::warn!("unknown distance unit {token:?}, labeling as meters");
                Self::Meters.label()
            }
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The unit setting of a scale bar.
///
/// `Imperial` and `Metric` pick a display tier (miles/yards/feet or
/// kilometers/meters) based on the measured distance. The remaining
/// variants pin the bar to a single [`DistanceUnit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UnitFamily {
    /// Miles, dropping to yards and then feet for short distances.
    #[default]
    Imperial,
    /// Kilometers, dropping to meters for short distances.
    Metric,
    /// Always meters.
    Meters,
    /// Always kilometers.
    Kilometers,
    /// Always miles.
    Miles,
    /// Always feet.
    Feet,
    /// Always yards.
    Yards,
    /// Always nautical miles.
    NauticalMiles,
}

// Matched case-insensitively after trimming.
const FAMILY_TOKENS: &[(&str, UnitFamily)] = &[
    ("imperial", UnitFamily::Imperial),
    ("metric", UnitFamily::Metric),
    ("meters", UnitFamily::Meters),
    ("meter", UnitFamily::Meters),
    ("metres", UnitFamily::Meters),
    ("metre", UnitFamily::Meters),
    ("m", UnitFamily::Meters),
    ("kilometers", UnitFamily::Kilometers),
    ("kilometer", UnitFamily::Kilometers),
    ("kilometres", UnitFamily::Kilometers),
    ("kilometre", UnitFamily::Kilometers),
    ("km", UnitFamily::Kilometers),
    ("kms", UnitFamily::Kilometers),
    ("miles", UnitFamily::Miles),
    ("mile", UnitFamily::Miles),
    ("mi", UnitFamily::Miles),
    ("feet", UnitFamily::Feet),
    ("foot", UnitFamily::Feet),
    ("ft", UnitFamily::Feet),
    ("yards", UnitFamily::Yards),
    ("yard", UnitFamily::Yards),
    ("yds", UnitFamily::Yards),
    ("yrd", UnitFamily::Yards),
    ("yrds", UnitFamily::Yards),
    ("nauticalmiles", UnitFamily::NauticalMiles),
    ("nauticalmile", UnitFamily::NauticalMiles),
    ("nms", UnitFamily::NauticalMiles),
    ("nm", UnitFamily::NauticalMiles),
];

impl UnitFamily {
    /// Unit the true distance is measured in before any tier change.
    #[must_use]
    pub fn base_unit(self) -> DistanceUnit {
        match self {
            Self::Imperial | Self::Miles => DistanceUnit::Miles,
            Self::Metric | Self::Kilometers => DistanceUnit::Kilometers,
            Self::Meters => DistanceUnit::Meters,
            Self::Feet => DistanceUnit::Feet,
            Self::Yards => DistanceUnit::Yards,
            Self::NauticalMiles => DistanceUnit::NauticalMiles,
        }
    }

    /// Whether short distances switch to a smaller display unit.
    #[must_use]
    pub fn is_tiered(self) -> bool {
        matches!(self, Self::Imperial | Self::Metric)
    }

    /// Canonical token for this family.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
            Self::Meters => "meters",
            Self::Kilometers => "kilometers",
            Self::Miles => "miles",
            Self::Feet => "feet",
            Self::Yards => "yards",
            Self::NauticalMiles => "nauticalMiles",
        }
    }
}

impl FromStr for UnitFamily {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FAMILY_TOKENS
            .iter()
            .find(|(token, _)| token.eq_ignore_ascii_case(trimmed))
            .map(|&(_, family)| family)
            .ok_or_else(|| ScaleError::InvalidUnit {
                token: s.to_string(),
            })
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::UnitFamily;

    impl Serialize for UnitFamily {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.token())
        }
    }

    struct FamilyVisitor;

    impl Visitor<'_> for FamilyVisitor {
        type Value = UnitFamily;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a distance unit such as \"imperial\", \"metric\" or \"km\"")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for UnitFamily {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(FamilyVisitor)
        }
    }
}
