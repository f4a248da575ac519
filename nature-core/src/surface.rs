//! Drawing sink consumed by the engine.

use crate::color::Hsl;
use crate::vector::Vector;

/// Anything entities can be drawn onto
pub trait Surface {
    /// Clear the whole drawable region
    fn clear(&mut self);

    /// Fill a disc centered at `center`
    fn fill_disc(&mut self, center: Vector, radius: f32, color: Hsl);
}

/// A surface that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}

    fn fill_disc(&mut self, _center: Vector, _radius: f32, _color: Hsl) {}
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Disc {
        center: Vector,
        radius: f32,
        color: Hsl,
    },
}

/// Records draw calls in order. Used by headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discs drawn since the last clear
    pub fn discs_since_clear(&self) -> usize {
        self.commands
            .iter()
            .rev()
            .take_while(|c| **c != DrawCommand::Clear)
            .count()
    }

    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_disc(&mut self, center: Vector, radius: f32, color: Hsl) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }
}
