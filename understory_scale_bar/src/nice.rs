// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Values at or above this are snapped to the 1‑2‑3‑5 ladder; smaller values
/// are rounded to two decimals instead.
pub const SNAP_THRESHOLD: f64 = 2.0;

/// Ladder steps, largest first.
const STEPS: [f64; 5] = [10.0, 5.0, 3.0, 2.0, 1.0];

/// Rounds a distance to a value that reads well on a scale bar.
///
/// - For `x >= 2`, `x` is split into a power of ten `p` (one less than the
///   digit count of `floor(x)`) and a mantissa `x / p`. The mantissa is
///   snapped down to the largest of `10, 5, 3, 2, 1` that does not exceed
///   it, and the result is `p` times that step.
/// - For `x < 2`, `x` is rounded to two decimal places.
///
/// ```rust
/// use understory_scale_bar::round_to_nice;
///
/// assert_eq!(round_to_nice(1234.0), 1000.0);
/// assert_eq!(round_to_nice(4999.0), 3000.0);
/// assert_eq!(round_to_nice(23.0), 20.0);
/// assert_eq!(round_to_nice(1.2345), 1.23);
/// ```
#[must_use]
pub fn round_to_nice(x: f64) -> f64 {
    if x >= SNAP_THRESHOLD {
        let whole = libm::floor(x);
        let mut pow10 = 1.0_f64;
        while pow10 * 10.0 <= whole {
            pow10 *= 10.0;
        }
        let mantissa = x / pow10;
        let step = STEPS
            .iter()
            .copied()
            .find(|&s| mantissa >= s)
            .unwrap_or(1.0);
        return pow10 * step;
    }

    libm::round(100.0 * x) / 100.0
}
