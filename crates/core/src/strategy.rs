//! The `MotionStrategy` trait every stroll pattern implements.
//!
//! The trait is object-safe so strategies can be used as
//! `Box<dyn MotionStrategy>` for runtime switching between patterns.

use glam::DVec2;
use serde_json::Value;

use crate::geometry::Position;
use crate::scene::Scene;
use crate::settings::SettingsChange;

/// Decides where the image moves each tick and how it reacts at the bounds.
///
/// A strategy owns its motion state (direction, pending steps) and nothing
/// else. Geometry is passed in as a [`Scene`] on every call. The controller
/// only calls [`next_position`](MotionStrategy::next_position) when the scene
/// is pannable, and trusts the returned position to respect the travel range
/// on pannable axes and to be centered on the others.
pub trait MotionStrategy {
    /// Registry name of the strategy, e.g. `"sweep"`.
    fn name(&self) -> &'static str;

    /// Called once when the controller is built, with the initial scene and
    /// the centered start position.
    fn attach(&mut self, _scene: &Scene, _position: Position) {}

    /// Computes the position after `delta_seconds`, updating motion state as
    /// a side effect.
    fn next_position(&mut self, scene: &Scene, delta_seconds: f64, position: Position)
        -> Position;

    /// Reconciles motion state after the controller applied a settings update.
    ///
    /// `scene` and `position` are already the post-update values.
    fn on_settings_changed(&mut self, scene: &Scene, position: Position, change: &SettingsChange);

    /// Current unit heading, or zero if the strategy has none.
    fn heading(&self) -> DVec2;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types, ranges and defaults.
    fn param_schema(&self) -> Value;
}

impl<S: MotionStrategy + ?Sized> MotionStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn attach(&mut self, scene: &Scene, position: Position) {
        (**self).attach(scene, position)
    }

    fn next_position(
        &mut self,
        scene: &Scene,
        delta_seconds: f64,
        position: Position,
    ) -> Position {
        (**self).next_position(scene, delta_seconds, position)
    }

    fn on_settings_changed(&mut self, scene: &Scene, position: Position, change: &SettingsChange) {
        (**self).on_settings_changed(scene, position, change)
    }

    fn heading(&self) -> DVec2 {
        (**self).heading()
    }

    fn params(&self) -> Value {
        (**self).params()
    }

    fn param_schema(&self) -> Value {
        (**self).param_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use serde_json::json;

    /// Moves right at full speed and stops at the right bound.
    struct MockStrategy {
        calls: usize,
        changes: usize,
    }

    impl MotionStrategy for MockStrategy {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn next_position(&mut self, scene: &Scene, dt: f64, position: Position) -> Position {
            self.calls += 1;
            let moved = Position::new(position.x + scene.pixels_per_second() * dt, position.y);
            scene.constrain(moved)
        }

        fn on_settings_changed(&mut self, _: &Scene, _: Position, _: &SettingsChange) {
            self.changes += 1;
        }

        fn heading(&self) -> DVec2 {
            DVec2::X
        }

        fn params(&self) -> Value {
            json!({"calls": self.calls})
        }

        fn param_schema(&self) -> Value {
            json!({"calls": {"type": "integer", "default": 0}})
        }
    }

    fn scene() -> Scene {
        Scene::new(
            Dimensions::new(100.0, 100.0),
            Dimensions::new(300.0, 100.0),
            1.0,
        )
    }

    #[test]
    fn strategy_trait_is_object_safe() {
        let mut s: Box<dyn MotionStrategy> = Box::new(MockStrategy { calls: 0, changes: 0 });
        let p = s.next_position(&scene(), 0.5, Position::new(-200.0, 0.0));
        assert_eq!(p, Position::new(-150.0, 0.0));
        assert_eq!(s.name(), "mock");
        assert_eq!(s.params()["calls"], 1);
    }

    #[test]
    fn boxed_strategy_forwards_settings_hook() {
        let mut s = Box::new(MockStrategy { calls: 0, changes: 0 });
        s.on_settings_changed(&scene(), Position::default(), &SettingsChange::default());
        assert_eq!(s.changes, 1);
        assert_eq!(s.heading(), DVec2::X);
    }

    #[test]
    fn default_attach_is_a_no_op() {
        let mut s = MockStrategy { calls: 0, changes: 0 };
        s.attach(&scene(), Position::default());
        assert_eq!(s.calls, 0);
        assert_eq!(s.changes, 0);
    }

    #[test]
    fn param_schema_has_expected_structure() {
        let s = MockStrategy { calls: 0, changes: 0 };
        assert_eq!(s.param_schema()["calls"]["type"], "integer");
    }
}
