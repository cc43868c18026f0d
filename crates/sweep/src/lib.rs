#![deny(unsafe_code)]
//! Raster sweep strategy.
//!
//! The image travels horizontally until it reaches a horizontal bound, then
//! steps vertically by one viewport height (scaled by `step_fraction`), then
//! travels horizontally the other way. The result is a zig-zag that scans the
//! whole image row by row, reversing vertically when it reaches the top or
//! bottom.
//!
//! Horizontal and vertical motion never happen in the same tick. A scene that
//! can only pan vertically chains vertical steps back to back so the image
//! keeps moving.

use serde_json::{json, Value};
use stroll_core::params::param_f64;
use stroll_core::{DVec2, MotionStrategy, Position, Scene, SettingsChange};
use tracing::trace;

/// Default vertical step as a fraction of the viewport height.
const DEFAULT_STEP_FRACTION: f64 = 1.0;

/// Tunable parameters for [`Sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    /// Vertical step length as a fraction of the viewport height.
    pub step_fraction: f64,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            step_fraction: DEFAULT_STEP_FRACTION,
        }
    }
}

impl SweepParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            step_fraction: param_f64(params, "step_fraction", DEFAULT_STEP_FRACTION),
        }
    }
}

/// Deterministic zig-zag sweep.
///
/// `direction_x` and `direction_y` are always `+1` or `-1`. While
/// `step_remaining` is positive a vertical step is in progress and x holds
/// still.
#[derive(Debug, Clone)]
pub struct Sweep {
    params: SweepParams,
    direction_x: f64,
    direction_y: f64,
    step_remaining: f64,
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new(SweepParams::default())
    }
}

impl Sweep {
    /// Starts moving right and, on the first step, down.
    pub fn new(params: SweepParams) -> Self {
        Self {
            params,
            direction_x: 1.0,
            direction_y: 1.0,
            step_remaining: 0.0,
        }
    }

    pub fn from_json(params: &Value) -> Self {
        Self::new(SweepParams::from_json(params))
    }

    pub fn direction_x(&self) -> f64 {
        self.direction_x
    }

    pub fn direction_y(&self) -> f64 {
        self.direction_y
    }

    /// Pixels still owed on the pending vertical step (0 when none).
    pub fn vertical_step_remaining(&self) -> f64 {
        self.step_remaining
    }

    fn step_length(&self, scene: &Scene) -> f64 {
        (scene.viewport.height * self.params.step_fraction).max(0.0)
    }

    /// Moves x along `direction_x`; a bound hit flips direction and commits
    /// to a vertical step starting next tick.
    fn advance_horizontal(&mut self, scene: &Scene, x: f64, travel: f64) -> f64 {
        let next = x + self.direction_x * travel;
        let (next, hit) = if next < scene.min_x() {
            (scene.min_x(), true)
        } else if next > 0.0 {
            (0.0, true)
        } else {
            (next, false)
        };
        if hit {
            self.direction_x = -self.direction_x;
            if scene.pannable_y() {
                self.step_remaining = self.step_length(scene);
            }
            trace!(
                x = next,
                direction_x = self.direction_x,
                step = self.step_remaining,
                "sweep horizontal bounce"
            );
        }
        next
    }

    /// Moves y along `direction_y` by at most the remaining step. A bound hit
    /// points `direction_y` away from that bound and cancels the rest.
    ///
    /// `travel` carries the sign of the speed; the step is sized by its
    /// magnitude and "away" follows its sign.
    fn advance_vertical(&mut self, scene: &Scene, y: f64, travel: f64) -> f64 {
        let away = if travel < 0.0 { -1.0 } else { 1.0 };
        let step = self.step_remaining.min(travel.abs());
        let next = y + self.direction_y * away * step;
        self.step_remaining -= step;
        if next < scene.min_y() {
            self.direction_y = away;
            self.step_remaining = 0.0;
            trace!(y = scene.min_y(), "sweep vertical bounce");
            scene.min_y()
        } else if next > 0.0 {
            self.direction_y = -away;
            self.step_remaining = 0.0;
            trace!(y = 0.0, "sweep vertical bounce");
            0.0
        } else {
            next
        }
    }
}

impl MotionStrategy for Sweep {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn attach(&mut self, _scene: &Scene, _position: Position) {
        self.direction_x = 1.0;
        self.direction_y = 1.0;
        self.step_remaining = 0.0;
    }

    fn next_position(&mut self, scene: &Scene, delta_seconds: f64, position: Position) -> Position {
        let travel = scene.pixels_per_second() * delta_seconds;

        if !scene.pannable_y() {
            self.step_remaining = 0.0;
        } else if !scene.pannable_x() && self.step_remaining == 0.0 {
            self.step_remaining = self.step_length(scene);
        }

        let mut next = position;
        if self.step_remaining > 0.0 {
            next.y = self.advance_vertical(scene, position.y, travel);
        } else if scene.pannable_x() {
            next.x = self.advance_horizontal(scene, position.x, travel);
        }

        if !scene.pannable_x() {
            next.x = scene.centered_x();
        }
        if !scene.pannable_y() {
            next.y = scene.centered_y();
        }
        next
    }

    fn on_settings_changed(&mut self, scene: &Scene, _position: Position, change: &SettingsChange) {
        if !change.moves_geometry() {
            return;
        }
        self.step_remaining = if scene.pannable_y() {
            self.step_remaining.min(self.step_length(scene))
        } else {
            0.0
        };
    }

    fn heading(&self) -> DVec2 {
        if self.step_remaining > 0.0 {
            DVec2::new(0.0, self.direction_y)
        } else {
            DVec2::new(self.direction_x, 0.0)
        }
    }

    fn params(&self) -> Value {
        json!({
            "step_fraction": self.params.step_fraction,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "step_fraction": {
                "type": "number",
                "default": DEFAULT_STEP_FRACTION,
                "min": 0.05,
                "max": 4.0,
                "description": "Vertical step between horizontal passes, in viewport heights"
            }
        })
    }
}
