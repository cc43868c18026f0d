//! Reproducible description of a stroll run.
//!
//! A [`Session`] captures everything needed to replay a run: strategy name,
//! viewport and image sizes, zoom, speed, strategy params, random seed, frame
//! count, frame delta and a script of settings updates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StrollError;
use crate::geometry::Dimensions;
use crate::settings::SettingsUpdate;

const DEFAULT_ZOOM: f64 = 1.5;
const DEFAULT_SPEED: f64 = 0.02;
const DEFAULT_TICKS: usize = 600;
const DEFAULT_DT: f64 = 1.0 / 60.0;

/// A settings update applied just before the given tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledUpdate {
    pub tick: usize,
    pub update: SettingsUpdate,
}

/// Reproducible run description.
///
/// With `seed` set, two identical sessions fed to the same binary produce
/// identical frames. Without it the run draws from OS entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub strategy: String,
    pub viewport: Dimensions,
    pub image: Dimensions,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "empty_params")]
    pub params: Value,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default)]
    pub script: Vec<ScheduledUpdate>,
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_ticks() -> usize {
    DEFAULT_TICKS
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Session {
    /// Creates a session with default zoom, speed, frame count and delta.
    pub fn new(strategy: &str, viewport: Dimensions, image: Dimensions) -> Self {
        Self {
            strategy: strategy.to_string(),
            viewport,
            image,
            zoom: DEFAULT_ZOOM,
            speed: DEFAULT_SPEED,
            params: empty_params(),
            seed: None,
            ticks: DEFAULT_TICKS,
            dt: DEFAULT_DT,
            script: Vec::new(),
        }
    }

    /// Rejects non-finite numbers and negative sizes anywhere in the session.
    ///
    /// Zero sizes are allowed: they simply yield a motionless image.
    pub fn validate(&self) -> Result<(), StrollError> {
        check_dimensions(self.viewport)?;
        check_dimensions(self.image)?;
        check_finite("zoom", self.zoom)?;
        check_finite("speed", self.speed)?;
        check_finite("dt", self.dt)?;
        for entry in &self.script {
            let u = &entry.update;
            if let Some(d) = u.viewport {
                check_dimensions(d)?;
            }
            if let Some(d) = u.image {
                check_dimensions(d)?;
            }
            if let Some(z) = u.zoom {
                check_finite("zoom", z)?;
            }
            if let Some(s) = u.speed {
                check_finite("speed", s)?;
            }
        }
        Ok(())
    }

    /// Script entries due at `tick`, in file order.
    pub fn updates_at(&self, tick: usize) -> impl Iterator<Item = &SettingsUpdate> {
        self.script
            .iter()
            .filter(move |s| s.tick == tick)
            .map(|s| &s.update)
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), StrollError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StrollError::NonFinite {
            field: field.to_owned(),
            value,
        })
    }
}

fn check_dimensions(d: Dimensions) -> Result<(), StrollError> {
    if d.width.is_finite() && d.height.is_finite() && d.width >= 0.0 && d.height >= 0.0 {
        Ok(())
    } else {
        Err(StrollError::InvalidDimensions {
            width: d.width,
            height: d.height,
        })
    }
}
