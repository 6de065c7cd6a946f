// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory scale bar demos.

use std::cell::RefCell;
use std::rc::Rc;

use understory_scale_bar::OverlayElement;

/// Pixels per character cell when drawing a bar in the terminal.
pub const PIXELS_PER_CELL: f64 = 4.0;

#[derive(Debug, Default)]
struct Frame {
    width: f64,
    text: String,
    removed: bool,
}

/// An overlay element that renders the bar as a line of text.
///
/// Clones share the same frame, so a demo can keep one handle for drawing
/// while the control owns another.
#[derive(Clone, Debug, Default)]
pub struct TerminalBar {
    frame: Rc<RefCell<Frame>>,
}

impl TerminalBar {
    /// Creates an empty bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current frame, for example `|=========| 300 ft`.
    pub fn render(&self) -> String {
        let frame = self.frame.borrow();
        if frame.removed {
            return String::from("(removed)");
        }
        #[expect(clippy::cast_possible_truncation, reason = "bar widths are small")]
        let cells = (frame.width / PIXELS_PER_CELL).round().max(1.0) as usize;
        format!("|{}| {}", "=".repeat(cells), frame.text)
    }
}

impl OverlayElement for TerminalBar {
    fn set_width_px(&mut self, width: f64) {
        self.frame.borrow_mut().width = width;
    }

    fn set_text(&mut self, text: &str) {
        self.frame.borrow_mut().text = text.to_owned();
    }

    fn remove(&mut self) {
        self.frame.borrow_mut().removed = true;
    }
}
