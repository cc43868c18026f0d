#![deny(unsafe_code)]
//! Strategy registry: maps strategy names to implementations and renders
//! viewport paths.
//!
//! This crate sits between `stroll-core` (which defines the `MotionStrategy`
//! trait) and the individual strategy crates. The CLI depends on it so name
//! dispatch and parameter validation live in one place.

pub mod path;

#[cfg(feature = "png")]
pub mod trace;

use serde_json::Value;
use stroll_bounce::RandomBounce;
use stroll_core::params::{ensure_number, json_type_name};
use stroll_core::{DVec2, MotionStrategy, Position, RandomSource, Scene, SettingsChange, StrollError};
use stroll_sweep::Sweep;
use tracing::debug;

/// All available strategy names.
const STRATEGY_NAMES: &[&str] = &["sweep", "random-bounce"];

/// Enumeration of all available stroll strategies.
///
/// Wraps each strategy and delegates `MotionStrategy` methods.
/// Use [`StrategyKind::from_name`] for string-based construction.
#[derive(Debug)]
pub enum StrategyKind {
    /// Deterministic zig-zag raster scan.
    Sweep(Sweep),
    /// Free heading with randomized reflections.
    RandomBounce(RandomBounce),
}

impl StrategyKind {
    /// Constructs a strategy by name.
    ///
    /// `params` must be a JSON object (or null); known keys must hold numbers.
    /// `rng` is only consumed by stochastic strategies.
    pub fn from_name(
        name: &str,
        params: &Value,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, StrollError> {
        if !(params.is_object() || params.is_null()) {
            return Err(StrollError::ParamTypeMismatch {
                name: "params".to_owned(),
                expected: "object".to_owned(),
                got: json_type_name(params).to_owned(),
            });
        }
        let kind = match name {
            "sweep" => {
                ensure_number(params, "step_fraction")?;
                StrategyKind::Sweep(Sweep::from_json(params))
            }
            "random-bounce" => {
                ensure_number(params, "min_reflection")?;
                ensure_number(params, "max_retries")?;
                StrategyKind::RandomBounce(RandomBounce::from_json(params, rng))
            }
            _ => return Err(StrollError::UnknownStrategy(name.to_string())),
        };
        debug!(strategy = name, params = %kind.params(), "strategy constructed");
        Ok(kind)
    }

    /// Returns a slice of all recognized strategy names.
    pub fn list_strategies() -> &'static [&'static str] {
        STRATEGY_NAMES
    }

    fn inner(&self) -> &dyn MotionStrategy {
        match self {
            StrategyKind::Sweep(s) => s,
            StrategyKind::RandomBounce(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn MotionStrategy {
        match self {
            StrategyKind::Sweep(s) => s,
            StrategyKind::RandomBounce(s) => s,
        }
    }
}

impl MotionStrategy for StrategyKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn attach(&mut self, scene: &Scene, position: Position) {
        self.inner_mut().attach(scene, position)
    }

    fn next_position(&mut self, scene: &Scene, delta_seconds: f64, position: Position) -> Position {
        self.inner_mut().next_position(scene, delta_seconds, position)
    }

    fn on_settings_changed(&mut self, scene: &Scene, position: Position, change: &SettingsChange) {
        self.inner_mut().on_settings_changed(scene, position, change)
    }

    fn heading(&self) -> DVec2 {
        self.inner().heading()
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stroll_core::{Dimensions, MotionController, SettingsUpdate, Xorshift64};

    fn build(name: &str, params: Value) -> Result<StrategyKind, StrollError> {
        StrategyKind::from_name(name, &params, Box::new(Xorshift64::new(42)))
    }

    fn controller(name: &str, seed: u64) -> MotionController<StrategyKind> {
        let strategy =
            StrategyKind::from_name(name, &json!({}), Box::new(Xorshift64::new(seed))).unwrap();
        MotionController::new(
            Dimensions::new(640.0, 480.0),
            Dimensions::new(1920.0, 1080.0),
            2.0,
            0.25,
            strategy,
        )
    }

    #[test]
    fn from_name_builds_every_listed_strategy() {
        for name in StrategyKind::list_strategies() {
            let s = build(name, json!({})).unwrap();
            assert_eq!(s.name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = build("spiral", json!({}));
        assert!(matches!(result, Err(StrollError::UnknownStrategy(n)) if n == "spiral"));
    }

    #[test]
    fn from_name_accepts_null_params() {
        assert!(build("sweep", Value::Null).is_ok());
    }

    #[test]
    fn from_name_rejects_non_object_params() {
        let result = build("sweep", json!([1, 2]));
        assert!(matches!(
            result,
            Err(StrollError::ParamTypeMismatch { got, .. }) if got == "array"
        ));
    }

    #[test]
    fn from_name_rejects_mistyped_param() {
        let result = build("random-bounce", json!({"min_reflection": "high"}));
        match result {
            Err(StrollError::ParamTypeMismatch { name, got, .. }) => {
                assert_eq!(name, "min_reflection");
                assert_eq!(got, "string");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn from_name_passes_params_through() {
        let s = build("sweep", json!({"step_fraction": 0.5})).unwrap();
        assert_eq!(s.params()["step_fraction"], 0.5);
        let b = build("random-bounce", json!({"max_retries": 4})).unwrap();
        assert_eq!(b.params()["max_retries"], 4);
    }

    #[test]
    fn param_schema_matches_params_keys() {
        for name in StrategyKind::list_strategies() {
            let s = build(name, json!({})).unwrap();
            let params = s.params();
            let schema = s.param_schema();
            for key in params.as_object().unwrap().keys() {
                assert!(schema.get(key).is_some(), "{name}: schema missing {key}");
            }
        }
    }

    #[test]
    fn delegation_drives_a_controller() {
        for name in StrategyKind::list_strategies() {
            let mut c = controller(name, 3);
            let start = c.position();
            for _ in 0..10 {
                c.tick(1.0 / 30.0);
            }
            assert_ne!(c.position(), start, "{name} did not move");
            assert!((c.strategy().heading().length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn determinism_same_seed() {
        for name in StrategyKind::list_strategies() {
            let mut a = controller(name, 99);
            let mut b = controller(name, 99);
            for i in 0..400 {
                if i == 200 {
                    a.update_settings(SettingsUpdate::new().with_zoom(3.0));
                    b.update_settings(SettingsUpdate::new().with_zoom(3.0));
                }
                a.tick(1.0 / 60.0);
                b.tick(1.0 / 60.0);
                assert_eq!(a.position(), b.position(), "{name} diverged at tick {i}");
            }
        }
    }

    #[test]
    fn object_safety() {
        let s = build("sweep", json!({})).unwrap();
        let boxed: Box<dyn MotionStrategy> = Box::new(s);
        assert_eq!(boxed.name(), "sweep");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn strategy_name() -> impl Strategy<Value = &'static str> {
            prop::sample::select(STRATEGY_NAMES.to_vec())
        }

        proptest! {
            #[test]
            fn every_strategy_keeps_the_viewport_covered(
                name in strategy_name(),
                seed: u64,
                vw in 1.0_f64..1200.0,
                vh in 1.0_f64..1200.0,
                iw in 1.0_f64..5000.0,
                ih in 1.0_f64..5000.0,
                zoom in 0.5_f64..4.0,
                speed in -1.0_f64..1.0,
                dt in 0.0_f64..0.2,
                new_zoom in 0.5_f64..4.0,
            ) {
                let strategy = StrategyKind::from_name(
                    name,
                    &json!({}),
                    Box::new(Xorshift64::new(seed)),
                ).unwrap();
                let mut c = MotionController::new(
                    Dimensions::new(vw, vh),
                    Dimensions::new(iw, ih),
                    zoom,
                    speed,
                    strategy,
                );
                for i in 0..200 {
                    if i == 100 {
                        c.update_settings(SettingsUpdate::new().with_zoom(new_zoom));
                    }
                    c.tick(dt);
                    let s = c.scene();
                    let p = c.position();
                    prop_assert!(c.zoom_level() >= 1.0);
                    if s.pannable_x() {
                        prop_assert!(p.x <= 0.0 && p.x >= s.min_x(), "{} x={} min={}", name, p.x, s.min_x());
                    } else {
                        prop_assert_eq!(p.x, s.centered_x());
                    }
                    if s.pannable_y() {
                        prop_assert!(p.y <= 0.0 && p.y >= s.min_y(), "{} y={} min={}", name, p.y, s.min_y());
                    } else {
                        prop_assert_eq!(p.y, s.centered_y());
                    }
                }
            }
        }
    }
}
