//! Core of the nature particle runtime: vectors, entities with pluggable
//! behavior, and the scene that owns and steps them once per frame.

pub mod color;
pub mod config;
pub mod entity;
pub mod error;
pub mod factory;
pub mod input;
pub mod integrator;
pub mod scene;
pub mod schedule;
pub mod surface;
pub mod vector;

pub use color::Hsl;
pub use config::SceneConfig;
pub use entity::{Entity, EntityId, Fate, StepContext};
pub use error::{NatureError, Result};
pub use factory::{entity_factory, Capabilities, EntityFactory, FactoryBuilder};
pub use input::{InputEvent, Listeners, NativeEvent, Viewport};
pub use scene::{FrameReport, Scene, SceneBuilder, SceneInfo};
pub use schedule::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{DrawCommand, NullSurface, Recorder, Surface};
pub use vector::{cos, radians, sin, Vector};

// Test helpers module (public for integration tests)
pub mod tests;
