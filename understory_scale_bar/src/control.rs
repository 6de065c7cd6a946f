// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale bar control: viewport subscription and overlay updates.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString;
use core::cell::RefCell;

use kurbo::Point;

use crate::map::{HandlerId, MapView, ViewportEvents};
use crate::{ScaleBarOptions, ScaleError, ScaleResult, compute_scale};

/// The visual element a scale bar writes into.
///
/// Creating and styling the element is up to the host; the control only
/// resizes it, sets its text, and removes it on detach.
pub trait OverlayElement {
    /// Sets the rendered bar width in pixels.
    fn set_width_px(&mut self, width: f64);

    /// Sets the label text, for example `"300 ft"`.
    fn set_text(&mut self, text: &str);

    /// Removes the element from the host's overlay.
    fn remove(&mut self);
}

/// Measures the true distance spanned by the bar at the current view.
///
/// The span runs along the pixel row through the view center, from `x = 0`
/// to `x = max_bar_length`, and is measured in the base unit of
/// `options.units`.
#[must_use]
pub fn measure_distance(view: &dyn MapView, options: &ScaleBarOptions) -> f64 {
    let y = view.center_pixel().y;
    let a = view.pixel_to_position(Point::new(0.0, y));
    let b = view.pixel_to_position(Point::new(options.max_bar_length, y));
    view.distance(a, b, options.units.base_unit())
}

#[derive(Debug)]
struct State<E> {
    options: ScaleBarOptions,
    element: Option<E>,
    last: Option<ScaleResult>,
}

impl<E: OverlayElement> State<E> {
    fn update(&mut self, view: &dyn MapView) -> Result<ScaleResult, ScaleError> {
        let true_distance = measure_distance(view, &self.options);
        let scale = match compute_scale(
            true_distance,
            self.options.units,
            self.options.max_bar_length,
        ) {
            Ok(scale) => scale,
            Err(err) => {
                log::debug!("skipping scale bar update: {err}");
                return Err(err);
            }
        };

        if let Some(element) = self.element.as_mut() {
            element.set_width_px(scale.bar_width(self.options.max_bar_length));
            element.set_text(&scale.to_string());
        }
        log::trace!("scale bar now reads {scale} (ratio {:.3})", scale.width_ratio);
        self.last = Some(scale);
        Ok(scale)
    }
}

/// A scale bar that follows a host map's viewport.
///
/// [`ScaleBarControl::attach`] registers exactly one viewport handler with
/// the host and [`ScaleBarControl::detach`] removes it again. The handler
/// reaches the control's state through a weak reference, so the control
/// keeps working after being moved.
///
/// Call [`ScaleBarControl::detach`] before dropping an attached control.
/// The control holds no reference to its host, so dropping it cannot
/// unregister the handler: the element is removed and the handler becomes
/// a no-op, but it stays registered until the host drops it.
///
/// ```rust
/// use kurbo::Size;
/// use understory_scale_bar::{
///     MercatorMap, OverlayElement, Position, ScaleBarControl, ScaleBarOptions, UnitFamily,
/// };
///
/// #[derive(Debug, Default)]
/// struct Label(String);
///
/// impl OverlayElement for Label {
///     fn set_width_px(&mut self, _width: f64) {}
///     fn set_text(&mut self, text: &str) {
///         self.0 = text.to_string();
///     }
///     fn remove(&mut self) {}
/// }
///
/// let mut map = MercatorMap::new(Size::new(800.0, 600.0));
/// let mut control =
///     ScaleBarControl::new(ScaleBarOptions::default().with_units(UnitFamily::Metric));
/// control.attach(&mut map, Label::default());
///
/// map.set_center(Position::new(13.4, 52.5));
/// map.set_zoom(14.0);
/// let scale = control.last_result().unwrap();
/// assert_eq!(scale.unit_label(), "m");
///
/// control.detach(&mut map);
/// ```
#[derive(Debug)]
pub struct ScaleBarControl<E: OverlayElement> {
    state: Rc<RefCell<State<E>>>,
    subscription: Option<HandlerId>,
}

impl<E: OverlayElement + 'static> ScaleBarControl<E> {
    /// Creates a detached control.
    #[must_use]
    pub fn new(options: ScaleBarOptions) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                options,
                element: None,
                last: None,
            })),
            subscription: None,
        }
    }

    /// Returns the options the control was created with.
    #[must_use]
    pub fn options(&self) -> ScaleBarOptions {
        self.state.borrow().options
    }

    /// Returns `true` while a viewport handler is registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// The most recently applied readout, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<ScaleResult> {
        self.state.borrow().last
    }

    /// Attaches the control to `host`, writing into `element`.
    ///
    /// The element is updated immediately and then after every viewport
    /// change. Attaching an already attached control detaches it first.
    pub fn attach<H>(&mut self, host: &mut H, element: E)
    where
        H: MapView + ViewportEvents,
    {
        if self.is_attached() {
            self.detach(host);
        }

        self.state.borrow_mut().element = Some(element);

        let state: Weak<RefCell<State<E>>> = Rc::downgrade(&self.state);
        let id = host.on_viewport_change(Box::new(move |view: &dyn MapView| {
            let Some(state) = state.upgrade() else {
                return;
            };
            if let Ok(mut state) = state.try_borrow_mut() {
                // Degenerate spans are logged and skipped; the next change
                // normally brings a usable sample.
                let _ = state.update(view);
            }
        }));
        log::trace!("scale bar attached as {id:?}");
        self.subscription = Some(id);

        let _ = self.update(&*host);
    }

    /// Detaches the control from `host` and removes its element.
    ///
    /// Does nothing if the control is not attached.
    pub fn detach<H>(&mut self, host: &mut H)
    where
        H: ViewportEvents + ?Sized,
    {
        let Some(id) = self.subscription.take() else {
            return;
        };
        if !host.off_viewport_change(id) {
            log::warn!("scale bar handler {id:?} was already gone on detach");
        }
        let mut state = self.state.borrow_mut();
        if let Some(mut element) = state.element.take() {
            element.remove();
        }
        state.last = None;
    }

    /// Recomputes the readout for `view` and applies it to the element.
    ///
    /// On [`ScaleError::DegenerateInput`] the element is left untouched.
    pub fn update(&self, view: &dyn MapView) -> Result<ScaleResult, ScaleError> {
        self.state.borrow_mut().update(view)
    }
}

impl<E: OverlayElement> Drop for ScaleBarControl<E> {
    fn drop(&mut self) {
        let Some(id) = self.subscription.take() else {
            return;
        };
        log::warn!("scale bar dropped while attached; handler {id:?} stays registered as a no-op");
        let element = self
            .state
            .try_borrow_mut()
            .ok()
            .and_then(|mut state| state.element.take());
        if let Some(mut element) = element {
            element.remove();
        }
    }
}
