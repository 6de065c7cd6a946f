// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// Errors produced while configuring or computing a scale bar.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleError {
    /// A unit token did not normalize to any known [`crate::UnitFamily`].
    ///
    /// Raised when options are built from a string. Hosts usually treat
    /// this as a configuration bug and either reject the control or fall
    /// back to [`crate::UnitFamily::default`].
    InvalidUnit {
        /// The token as it was supplied.
        token: String,
    },
    /// The measured distance or the bar length was not a positive, finite
    /// number.
    ///
    /// This happens when the host reports a degenerate pixel span, for
    /// example a zero-width map. The next viewport change usually yields a
    /// valid sample, so callers skip the update instead of failing.
    DegenerateInput {
        /// Distance measured across the bar span.
        true_distance: f64,
        /// Maximum bar length in pixels.
        max_bar_length: f64,
    },
}

impl ScaleError {
    /// Returns `true` for [`ScaleError::DegenerateInput`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUnit { token } => write!(f, "unrecognized distance unit {token:?}"),
            Self::DegenerateInput {
                true_distance,
                max_bar_length,
            } => write!(
                f,
                "cannot scale a distance of {true_distance} over {max_bar_length} pixels"
            ),
        }
    }
}

impl core::error::Error for ScaleError {}
