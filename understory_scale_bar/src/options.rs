// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{ScaleError, UnitFamily};

/// Default maximum bar length in pixels.
pub const DEFAULT_MAX_BAR_LENGTH: f64 = 100.0;

/// Configuration for a [`crate::ScaleBarControl`].
///
/// With the `serde` feature, options deserialize from a map like
/// `{ "units": "metric", "maxBarLength": 150 }`; both keys are optional.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScaleBarOptions {
    /// Unit family of the readout. Defaults to [`UnitFamily::Imperial`].
    pub units: UnitFamily,
    /// Full length of the bar in pixels. Defaults to `100`.
    pub max_bar_length: f64,
}

impl Default for ScaleBarOptions {
    fn default() -> Self {
        Self {
            units: UnitFamily::default(),
            max_bar_length: DEFAULT_MAX_BAR_LENGTH,
        }
    }
}

impl ScaleBarOptions {
    /// Returns these options with `units` replaced.
    #[must_use]
    pub fn with_units(mut self, units: UnitFamily) -> Self {
        self.units = units;
        self
    }

    /// Returns these options with the unit family parsed from `token`.
    pub fn with_units_str(self, token: &str) -> Result<Self, ScaleError> {
        Ok(self.with_units(token.parse()?))
    }

    /// Returns these options with `max_bar_length` replaced.
    #[must_use]
    pub fn with_max_bar_length(mut self, max_bar_length: f64) -> Self {
        self.max_bar_length = max_bar_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::ScaleBarOptions;
    use crate::{ScaleError, UnitFamily};

    #[test]
    fn defaults() {
        let opts = ScaleBarOptions::default();
        assert_eq!(opts.units, UnitFamily::Imperial);
        assert_eq!(opts.max_bar_length, 100.0);
    }

    #[test]
    fn builder() {
        let opts = ScaleBarOptions::default()
            .with_units_str("Kilometres")
            .unwrap()
            .with_max_bar_length(150.0);
        assert_eq!(opts.units, UnitFamily::Kilometers);
        assert_eq!(opts.max_bar_length, 150.0);
    }

    #[test]
    fn invalid_unit_token() {
        let err = ScaleBarOptions::default()
            .with_units_str("furlongs")
            .unwrap_err();
        assert!(matches!(err, ScaleError::InvalidUnit { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults_and_synonyms() {
        let opts: ScaleBarOptions = serde_json::from_str(r#"{ "units": "NM" }"#).unwrap();
        assert_eq!(opts.units, UnitFamily::NauticalMiles);
        assert_eq!(opts.max_bar_length, 100.0);

        let opts: ScaleBarOptions =
            serde_json::from_str(r#"{ "units": "metric", "maxBarLength": 80 }"#).unwrap();
        assert_eq!(opts.units, UnitFamily::Metric);
        assert_eq!(opts.max_bar_length, 80.0);

        assert!(serde_json::from_str::<ScaleBarOptions>(r#"{ "units": "furlongs" }"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_canonical_tokens() {
        let opts = ScaleBarOptions::default().with_units(UnitFamily::NauticalMiles);
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"units":"nauticalMiles","maxBarLength":100.0}"#);
    }
}
