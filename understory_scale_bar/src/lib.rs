// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scale_bar --heading-base-level=0

//! Understory Scale Bar: map scale bar readouts that follow the viewport.
//!
//! A scale bar shows how far a fixed number of pixels reaches on the ground
//! at the current view. This crate provides:
//! - [`compute_scale`]: turns a measured distance into a rounded readout, a
//!   unit, and the fraction of the bar to draw.
//! - [`UnitFamily`] / [`DistanceUnit`]: unit settings and their labels.
//!   `imperial` drops from miles to yards to feet for short distances, and
//!   `metric` from kilometers to meters.
//! - [`ScaleBarControl`]: subscribes to a host map's viewport changes and
//!   writes width and text into an [`OverlayElement`].
//! - [`MapView`] / [`ViewportEvents`]: what a host map must provide, plus
//!   [`MercatorMap`], a small Web‑Mercator host built on Kurbo transforms.
//!
//! It does **not** own a renderer or an element tree. Callers are expected
//! to create and style the overlay element themselves and hand it to the
//! control.
//!
//! ## Computing a readout
//!
//! ```rust
//! use understory_scale_bar::{UnitFamily, compute_scale};
//!
//! // 100 px cover 0.8 km. That is short, so the bar switches to meters.
//! let scale = compute_scale(0.8, UnitFamily::Metric, 100.0).unwrap();
//! assert_eq!(scale.to_string(), "500 m");
//!
//! // Draw 500 of the 800 meters: 62.5 px.
//! assert!((scale.bar_width(100.0) - 62.5).abs() < 1e-9);
//! ```
//!
//! ## Nice numbers
//!
//! Distances of `2` or more are snapped down to `1`, `2`, `3` or `5` times a
//! power of ten; smaller ones keep two decimals. See [`round_to_nice`].
//!
//! ## Unit tokens
//!
//! Unit settings parse case‑insensitively from tokens and common synonyms:
//!
//! ```rust
//! use understory_scale_bar::{ScaleBarOptions, UnitFamily};
//!
//! let opts = ScaleBarOptions::default().with_units_str("Kilometres").unwrap();
//! assert_eq!(opts.units, UnitFamily::Kilometers);
//! assert!(ScaleBarOptions::default().with_units_str("furlongs").is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
mod control;
mod error;
pub mod geo;
mod map;
pub mod mercator;
mod nice;
mod options;
mod units;

pub use compute::{ScaleResult, YARDS_TO_FEET_THRESHOLD, compute_scale};
pub use control::{OverlayElement, ScaleBarControl, measure_distance};
pub use error::ScaleError;
pub use geo::{Position, haversine_distance};
pub use map::{HandlerId, MapView, ViewportEvents, ViewportHandler, ViewportHandlers};
pub use mercator::MercatorMap;
pub use nice::{SNAP_THRESHOLD, round_to_nice};
pub use options::{DEFAULT_MAX_BAR_LENGTH, ScaleBarOptions};
pub use units::{DistanceUnit, UnitFamily};
