//! Test helper utilities for nature tests

use crate::config::SceneConfig;
use crate::scene::{FrameReport, Scene, SceneBuilder};
use crate::schedule::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use crate::vector::Vector;
use std::cell::Cell;
use std::rc::Rc;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are componentwise approximately equal
pub fn approx_eq_vec(a: Vector, b: Vector, tol: f32) -> bool {
    approx_eq_f32(a.x(), b.x(), tol) && approx_eq_f32(a.y(), b.y(), tol)
}

/// Scheduler that counts requests and cancellations. Clones share counters,
/// so a test can keep one clone while the scene owns another.
#[derive(Debug, Clone, Default)]
pub struct CountingScheduler {
    requested: Rc<Cell<u64>>,
    cancelled: Rc<Cell<u64>>,
}

impl CountingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> u64 {
        self.requested.get()
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled.get()
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let n = self.requested.get();
        self.requested.set(n + 1);
        FrameHandle::new(n)
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {
        self.cancelled.set(self.cancelled.get() + 1);
    }
}

/// Start a scene with a throwaway scheduler
pub fn start_scene(builder: SceneBuilder) -> Scene {
    builder
        .start(CountingScheduler::new())
        .expect("scene should start")
}

/// A started scene of the given size with no hooks
pub fn empty_scene(width: f32, height: f32) -> Scene {
    start_scene(Scene::builder(SceneConfig::new(width, height)))
}

/// Run `frames` frames, panicking on engine errors
pub fn run_frames(scene: &mut Scene, surface: &mut dyn Surface, frames: usize) -> Vec<FrameReport> {
    (0..frames)
        .filter_map(|_| scene.frame(&mut *surface).expect("frame failed"))
        .collect()
}
