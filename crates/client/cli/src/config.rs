//! CLI configuration and the session it loads.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tactics_content::{ConfigLoader, SceneLoader};
use tactics_core::{GridConfig, GridMetric, Scene};

/// Files a command reads its session from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliConfig {
    pub grid_config: Option<PathBuf>,
    pub scene: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_GRID_CONFIG` - Grid config TOML (default: built-in grid)
    /// - `TACTICS_SCENE` - Scene snapshot, `.ron` or `.json`
    pub fn from_env() -> Self {
        Self {
            grid_config: read_path("TACTICS_GRID_CONFIG"),
            scene: read_path("TACTICS_SCENE"),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, grid_config: Option<PathBuf>, scene: Option<PathBuf>) -> Self {
        if grid_config.is_some() {
            self.grid_config = grid_config;
        }
        if scene.is_some() {
            self.scene = scene;
        }
        self
    }

    pub fn load(&self) -> Result<Session> {
        let grid = match &self.grid_config {
            Some(path) => ConfigLoader::load(path)?,
            None => GridConfig::default(),
        };
        let path = self
            .scene
            .as_deref()
            .context("no scene given: pass --scene or set TACTICS_SCENE")?;
        let scene = SceneLoader::load(path)?;

        tracing::info!(
            scene = %scene.name,
            tokens = scene.tokens.len(),
            diagonals = %grid.diagonals,
            "session loaded"
        );
        Ok(Session {
            scene,
            metric: GridMetric::new(grid),
        })
    }
}

/// A scene snapshot and the grid it is measured on.
#[derive(Clone, Debug)]
pub struct Session {
    pub scene: Scene,
    pub metric: GridMetric,
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn flags_override_environment() {
        let config = CliConfig {
            grid_config: Some("env.toml".into()),
            scene: Some("env.ron".into()),
        }
        .with_overrides(None, Some("flag.json".into()));

        assert_eq!(config.grid_config, Some(PathBuf::from("env.toml")));
        assert_eq!(config.scene, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn missing_scene_is_reported() {
        let err = CliConfig::default().load().unwrap_err();
        assert!(err.to_string().contains("TACTICS_SCENE"));
    }

    #[test]
    fn loads_scene_with_default_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yard.json");
        fs::write(
            &path,
            r#"{"name":"Yard","tokens":[{"id":"t1","actor":"a1","name":"Ash",
                "position":{"x":100.0,"y":100.0},"disposition":1}]}"#,
        )
        .unwrap();

        let session = CliConfig::default()
            .with_overrides(None, Some(path))
            .load()
            .unwrap();
        assert_eq!(session.scene.name, "Yard");
        assert_eq!(session.metric, GridMetric::default());
    }
}
