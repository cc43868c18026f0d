#![deny(unsafe_code)]
//! Core types and traits for stroll, a slow pan ("Ken Burns") motion engine.
//!
//! Provides the geometry value types, the [`Scene`] snapshot, the
//! [`MotionStrategy`] trait, the [`MotionController`] that owns geometry and
//! drives a strategy, injectable [`RandomSource`]s, settings updates,
//! [`Session`] descriptions and parameter helpers.

pub mod controller;
pub mod error;
pub mod geometry;
pub mod params;
pub mod rng;
pub mod scene;
pub mod session;
pub mod settings;
pub mod strategy;

pub use controller::{MotionController, MotionState};
pub use error::StrollError;
pub use geometry::{BoundingBox, Dimensions, Position};
pub use rng::{EntropySource, RandomSource, SequenceSource, Xorshift64};
pub use scene::{Scene, PAN_TOLERANCE};
pub use session::{ScheduledUpdate, Session};
pub use settings::{SettingsChange, SettingsUpdate};
pub use strategy::MotionStrategy;

pub use glam::DVec2;
