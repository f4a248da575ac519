use crate::demos::Demo;
use clap::Args;
use nature_core::SceneConfig;
use std::path::{Path, PathBuf};

/// Scene settings shared by every subcommand that builds a scene
#[derive(Args, Debug, Clone, Default)]
pub struct SceneArgs {
    /// TOML file with scene settings (watched for changes by `run`)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Surface width, overrides the config file
    #[arg(long)]
    pub width: Option<f32>,
    /// Surface height, overrides the config file
    #[arg(long)]
    pub height: Option<f32>,
    /// Maximum population kept at the start of each frame
    #[arg(long)]
    pub cap: Option<usize>,
}

impl SceneArgs {
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// The config file (or the demo's defaults) with command-line
    /// overrides applied
    pub fn resolve(&self, demo: Demo) -> nature_core::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => demo.default_config(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(cap) = self.cap {
            config.entity_cap = Some(cap);
        }
        config.validate()?;
        log::debug!("{} scene config: {:?}", demo.name(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_demo() {
        let config = SceneArgs::default().resolve(Demo::Snow).unwrap();
        assert_eq!(config, Demo::Snow.default_config());
    }

    #[test]
    fn test_overrides_apply() {
        let args = SceneArgs {
            width: Some(320.0),
            cap: Some(7),
            ..SceneArgs::default()
        };
        let config = args.resolve(Demo::Swarm).unwrap();
        assert_eq!(config.width, 320.0);
        assert_eq!(config.height, Demo::Swarm.default_config().height);
        assert_eq!(config.entity_cap, Some(7));
    }

    #[test]
    fn test_bad_override_rejected() {
        let args = SceneArgs {
            height: Some(0.0),
            ..SceneArgs::default()
        };
        assert!(args.resolve(Demo::Fireworks).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = SceneArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..SceneArgs::default()
        };
        assert!(args.resolve(Demo::Fireworks).is_err());
    }
}
