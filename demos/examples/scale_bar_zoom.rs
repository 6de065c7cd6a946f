// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zooms a Web‑Mercator map from continent to street level and prints the
//! scale bar after every step.
//!
//! The first argument is an optional JSON options object, for example:
//!   cargo run -p understory_demos --example scale_bar_zoom -- '{"units":"metric"}'
//!
//! Set `RUST_LOG=trace` to see the control's log output.

use std::env;
use std::process::ExitCode;

use kurbo::{Point, Size, Vec2};
use understory_demos::TerminalBar;
use understory_scale_bar::{MercatorMap, Position, ScaleBarControl, ScaleBarOptions};

fn main() -> ExitCode {
    env_logger::init();

    let options = match env::args().nth(1) {
        Some(json) => match serde_json::from_str::<ScaleBarOptions>(&json) {
            Ok(options) => options,
            Err(err) => {
                eprintln!("invalid options {json:?}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ScaleBarOptions::default(),
    };

    let mut map = MercatorMap::new(Size::new(1024.0, 768.0));
    map.set_center(Position::new(-122.335, 47.608));

    let bar = TerminalBar::new();
    let mut control = ScaleBarControl::new(options);
    control.attach(&mut map, bar.clone());

    println!("units: {}, max bar length: {} px", options.units, options.max_bar_length);
    for zoom in 1..=20 {
        map.set_zoom(f64::from(zoom));
        println!("zoom {zoom:>2}  {}", bar.render());
    }

    // Pan north and zoom around a corner; the bar follows every change.
    map.pan_by_view(Vec2::new(0.0, 300.0));
    println!("panned    {}", bar.render());
    map.zoom_about_view_point(Point::new(0.0, 0.0), 0.5);
    println!("zoomed    {}", bar.render());

    control.detach(&mut map);
    println!("detached  {}", bar.render());
    ExitCode::SUCCESS
}
