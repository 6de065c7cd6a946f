// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small Web‑Mercator map host.

use core::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::geo::{EARTH_RADIUS_METERS, Position};
use crate::map::{HandlerId, MapView, ViewportEvents, ViewportHandler, ViewportHandlers};

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: f64 = 512.0;

/// Largest latitude representable in Web‑Mercator, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Projects a position into normalized Mercator space, where the whole
/// world covers `[0, 1] x [0, 1]` with north at `y = 0`.
#[must_use]
pub fn project(pos: Position) -> Point {
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (pos.lon + 180.0) / 360.0;
    let y = 0.5 - libm::log(libm::tan(PI / 4.0 + lat / 2.0)) / (2.0 * PI);
    Point::new(x, y)
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(pt: Point) -> Position {
    let lon = pt.x * 360.0 - 180.0;
    let lat = libm::atan(libm::sinh(PI * (1.0 - 2.0 * pt.y))).to_degrees();
    Position::new(lon, lat)
}

/// Web‑Mercator map view with pan/zoom and viewport‑change notifications.
///
/// The view is `view_size` pixels with its origin at the top‑left corner.
/// At zoom `z` the world is `512 * 2^z` pixels square. Every call that
/// changes the view runs the registered [`ViewportHandler`]s afterwards.
#[derive(Debug)]
pub struct MercatorMap {
    view_size: Size,
    center: Position,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    world_to_view: Affine,
    view_to_world: Affine,
    handlers: ViewportHandlers,
}

impl MercatorMap {
    /// Creates a map of `view_size` pixels centered on `(0, 0)` at zoom `1`.
    ///
    /// Zoom is clamped to `[0, 24]` by default.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut map = Self {
            view_size,
            center: Position::default(),
            zoom: 1.0,
            min_zoom: 0.0,
            max_zoom: 24.0,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
            handlers: ViewportHandlers::new(),
        };
        map.rebuild_transforms();
        map
    }

    /// Returns the view size in pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Resizes the view, keeping the center position.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.changed();
    }

    /// Returns the geographic position at the view center.
    #[must_use]
    pub fn center(&self) -> Position {
        self.center
    }

    /// Moves the view so that `center` is in the middle.
    ///
    /// Latitude is clamped to the Mercator range.
    pub fn set_center(&mut self, center: Position) {
        let center = Position::new(center.lon, center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE));
        if self.center == center {
            return;
        }
        self.center = center;
        self.changed();
    }

    /// Returns the current zoom level.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.changed();
    }

    /// Sets the minimum and maximum zoom levels.
    ///
    /// The range is normalized so that `min_zoom <= max_zoom`, and the
    /// current zoom is clamped into it.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Pans the content by a delta in view pixels.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let center_world = project(self.center) - delta / self.world_size();
        self.set_center(unproject(center_world));
    }

    /// Scales the map by `factor` around an anchor in view coordinates.
    ///
    /// A factor of `2.0` zooms in one level. The position under the anchor
    /// stays under it as far as the zoom limits allow.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom + libm::log2(factor)).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor_world = self.view_to_world * anchor_view;
        let scale = libm::exp2(old_zoom - new_zoom);
        let center_world = project(self.center);
        let new_center_world = anchor_world + (center_world - anchor_world) * scale;

        self.zoom = new_zoom;
        self.center = unproject(new_center_world);
        self.changed();
    }

    /// Converts a geographic position into view coordinates.
    #[must_use]
    pub fn position_to_pixel(&self, pos: Position) -> Point {
        self.world_to_view * project(pos)
    }

    /// Returns the visible area in normalized Mercator coordinates.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let p0 = self.view_to_world * Point::ORIGIN;
        let p1 = self.view_to_world * Point::new(self.view_size.width, self.view_size.height);
        Rect::from_points(p0, p1)
    }

    /// Ground distance covered by one pixel at the view center, in meters.
    #[must_use]
    pub fn meters_per_pixel(&self) -> f64 {
        libm::cos(self.center.lat.to_radians()) * 2.0 * PI * EARTH_RADIUS_METERS
            / self.world_size()
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * libm::exp2(self.zoom)
    }

    fn rebuild_transforms(&mut self) {
        let view_center = self.view_size.to_vec2() * 0.5;
        let center_world = project(self.center).to_vec2();
        // Normalized world → view: recenter, scale to pixels, move to view center.
        self.world_to_view = Affine::translate(view_center)
            * Affine::scale(self.world_size())
            * Affine::translate(-center_world);
        self.view_to_world = self.world_to_view.inverse();
    }

    fn changed(&mut self) {
        self.rebuild_transforms();
        let mut handlers = core::mem::take(&mut self.handlers);
        handlers.notify(&*self);
        self.handlers = handlers;
    }
}

impl MapView for MercatorMap {
    fn center_pixel(&self) -> Point {
        Point::new(self.view_size.width * 0.5, self.view_size.height * 0.5)
    }

    fn pixel_to_position(&self, pixel: Point) -> Position {
        unproject(self.view_to_world * pixel)
    }
}

impl ViewportEvents for MercatorMap {
    fn on_viewport_change(&mut self, handler: ViewportHandler) -> HandlerId {
        self.handlers.insert(handler)
    }

    fn off_viewport_change(&mut self, id: HandlerId) -> bool {
        self.handlers.remove(id)
    }
}
