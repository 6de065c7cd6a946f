// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a host map must provide to drive a scale bar.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::DistanceUnit;
use crate::geo::{Position, haversine_distance};

/// Read access to a map's current view.
pub trait MapView {
    /// The center of the viewport in view (pixel) coordinates.
    fn center_pixel(&self) -> Point;

    /// Projects a view‑space pixel to a geographic position.
    fn pixel_to_position(&self, pixel: Point) -> Position;

    /// Geodesic distance between two positions, in `unit`.
    ///
    /// Defaults to [`haversine_distance`].
    fn distance(&self, a: Position, b: Position, unit: DistanceUnit) -> f64 {
        haversine_distance(a, b, unit)
    }
}

/// Callback run after the host's view changes.
pub type ViewportHandler = Box<dyn FnMut(&dyn MapView)>;

/// Identifies a registered [`ViewportHandler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// Subscription to viewport‑change notifications.
pub trait ViewportEvents {
    /// Registers `handler`, returning an id for [`ViewportEvents::off_viewport_change`].
    fn on_viewport_change(&mut self, handler: ViewportHandler) -> HandlerId;

    /// Removes a handler. Returns `false` if `id` was not registered.
    fn off_viewport_change(&mut self, id: HandlerId) -> bool;
}

/// A list of viewport handlers that hosts can embed to implement
/// [`ViewportEvents`].
///
/// Ids are handed out from a counter and never reused, so a stale id can
/// not remove a newer handler.
#[derive(Default)]
pub struct ViewportHandlers {
    next_id: u64,
    handlers: Vec<(HandlerId, ViewportHandler)>,
}

impl ViewportHandlers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler.
    pub fn insert(&mut self, handler: ViewportHandler) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Removes a handler by id.
    pub fn remove(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler, in registration order, against `view`.
    pub fn notify(&mut self, view: &dyn MapView) {
        for (_, handler) in &mut self.handlers {
            handler(view);
        }
    }
}

impl fmt::Debug for ViewportHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportHandlers")
            .field("next_id", &self.next_id)
            .field("len", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kurbo::Point;

    use super::{MapView, ViewportHandlers};
    use crate::DistanceUnit;
    use crate::geo::Position;

    struct Flat;

    impl MapView for Flat {
        fn center_pixel(&self) -> Point {
            Point::new(50.0, 50.0)
        }

        fn pixel_to_position(&self, pixel: Point) -> Position {
            Position::new(pixel.x * 0.001, -pixel.y * 0.001)
        }
    }

    #[test]
    fn handlers_run_until_removed() {
        let hits = Rc::new(Cell::new(0_u32));
        let mut handlers = ViewportHandlers::new();

        let counter = hits.clone();
        let id = handlers.insert(Box::new(move |_: &dyn MapView| {
            counter.set(counter.get() + 1);
        }));
        assert_eq!(handlers.len(), 1);

        handlers.notify(&Flat);
        handlers.notify(&Flat);
        assert_eq!(hits.get(), 2);

        assert!(handlers.remove(id));
        assert!(!handlers.remove(id));
        assert!(handlers.is_empty());

        handlers.notify(&Flat);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut handlers = ViewportHandlers::new();
        let a = handlers.insert(Box::new(|_: &dyn MapView| {}));
        assert!(handlers.remove(a));
        let b = handlers.insert(Box::new(|_: &dyn MapView| {}));
        assert_ne!(a, b);
        assert!(!handlers.remove(a));
        assert_eq!(handlers.len(), 1);
    }

    #[test]
    fn default_distance_is_haversine() {
        let view = Flat;
        let a = view.pixel_to_position(Point::new(0.0, 0.0));
        let b = view.pixel_to_position(Point::new(1000.0, 0.0));
        let d = view.distance(a, b, DistanceUnit::Kilometers);
        assert!((d - a.distance_to(b, DistanceUnit::Kilometers)).abs() < 1e-12);
        assert!(d > 0.0);
    }
}
