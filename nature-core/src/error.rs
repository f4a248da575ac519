use crate::entity::EntityId;
use thiserror::Error;

/// Errors raised by the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NatureError {
    /// An entity's kinematic state stopped being finite after a step
    #[error("entity {id} has non-finite {field} ({x}, {y})")]
    InvalidEntityState {
        id: EntityId,
        field: &'static str,
        x: f32,
        y: f32,
    },
    /// A scene configuration was rejected
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl NatureError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T, E = NatureError> = std::result::Result<T, E>;
