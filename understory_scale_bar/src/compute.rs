// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::nice::{SNAP_THRESHOLD, round_to_nice};
use crate::{DistanceUnit, ScaleError, UnitFamily};

/// Nice yard values below this drop the imperial bar to feet.
pub const YARDS_TO_FEET_THRESHOLD: f64 = 15.0;

/// Rounded distance, unit and bar scaling for one viewport state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleResult {
    /// The rounded distance shown on the bar, in [`ScaleResult::unit`].
    pub display_value: f64,
    /// Unit the display value is expressed in.
    pub unit: DistanceUnit,
    /// `display_value` divided by the true distance in the same unit.
    ///
    /// Usually in `(0, 1]`; two‑decimal rounding of small values can push
    /// it slightly above `1`. A fixed unit family measuring less than
    /// `0.005` of its unit rounds to a `display_value` of `0`, and the ratio
    /// is then `0` as well.
    pub width_ratio: f64,
}

impl ScaleResult {
    /// Label for [`ScaleResult::unit`].
    #[must_use]
    pub fn unit_label(&self) -> &'static str {
        self.unit.label()
    }

    /// Rendered bar width in pixels for a bar whose full length is
    /// `max_bar_length`.
    #[must_use]
    pub fn bar_width(&self, max_bar_length: f64) -> f64 {
        max_bar_length * self.width_ratio
    }
}

impl fmt::Display for ScaleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value, self.unit_label())
    }
}

/// Computes the scale bar readout for a measured distance.
///
/// `true_distance` is the geodesic distance spanned by `max_bar_length`
/// pixels, expressed in [`UnitFamily::base_unit`] of `family`. For
/// [`UnitFamily::Imperial`] and [`UnitFamily::Metric`], a rounded value
/// below `2` switches to a smaller unit: miles to yards (and yards to feet
/// when the rounded yards stay below `15`), or kilometers to meters. Fixed
/// unit families never switch.
///
/// Returns [`ScaleError::DegenerateInput`] unless both inputs are positive
/// and finite.
///
/// ```rust
/// use understory_scale_bar::{DistanceUnit, UnitFamily, compute_scale};
///
/// let scale = compute_scale(3.1, UnitFamily::Imperial, 100.0).unwrap();
/// assert_eq!(scale.display_value, 3.0);
/// assert_eq!(scale.unit, DistanceUnit::Miles);
/// assert_eq!(scale.to_string(), "3 mi");
/// assert!((scale.bar_width(100.0) - 96.77).abs() < 0.01);
/// ```
pub fn compute_scale(
    true_distance: f64,
    family: UnitFamily,
    max_bar_length: f64,
) -> Result<ScaleResult, ScaleError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(true_distance) || !valid(max_bar_length) {
        return Err(ScaleError::DegenerateInput {
            true_distance,
            max_bar_length,
        });
    }

    let mut unit = family.base_unit();
    let mut true_distance = true_distance;
    let mut nice = round_to_nice(true_distance);

    if nice < SNAP_THRESHOLD && family.is_tiered() {
        if family == UnitFamily::Imperial {
            true_distance *= 1_760.0;
            nice = round_to_nice(true_distance);
            unit = DistanceUnit::Yards;

            if nice < YARDS_TO_FEET_THRESHOLD {
                true_distance *= 3.0;
                nice = round_to_nice(true_distance);
                unit = DistanceUnit::Feet;
            }
        } else {
            true_distance *= 1_000.0;
            nice = round_to_nice(true_distance);
            unit = DistanceUnit::Meters;
        }
    }

    Ok(ScaleResult {
        display_value: nice,
        unit,
        width_ratio: nice / true_distance,
    })
}
