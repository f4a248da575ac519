//! Built-in scenes

mod fireworks;
mod snow;
mod swarm;

use nature_core::{SceneBuilder, SceneConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    Fireworks,
    Snow,
    Swarm,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Fireworks, Demo::Snow, Demo::Swarm];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Fireworks => "fireworks",
            Demo::Snow => "snow",
            Demo::Swarm => "swarm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::Fireworks => "rockets under gravity bursting into sparks; click to launch",
            Demo::Snow => "wobbling flakes that wrap around; arrow keys change the wind",
            Demo::Swarm => "boids chasing the pointer; click to add a flock",
        }
    }

    pub fn default_config(self) -> SceneConfig {
        match self {
            Demo::Fireworks => SceneConfig::new(900.0, 600.0).with_entity_cap(3000),
            Demo::Snow => SceneConfig::new(900.0, 600.0).with_entity_cap(400),
            Demo::Swarm => SceneConfig::new(900.0, 600.0).with_entity_cap(600),
        }
    }

    /// Hooks and listeners for this demo, ready to start
    pub fn builder(self, config: SceneConfig) -> SceneBuilder {
        match self {
            Demo::Fireworks => fireworks::scene(config),
            Demo::Snow => snow::scene(config),
            Demo::Swarm => swarm::scene(config),
        }
    }
}
