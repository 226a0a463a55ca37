//! Content factory for loading a session from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{GridConfig, Scene};

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, SceneLoader};
use crate::sheets::ActorSheet;

/// Content factory that loads session content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── grid.toml
/// ├── actors.ron
/// └── scenes/
///     ├── keep.ron
///     └── bridge.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load grid configuration from `grid.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_grid(&self) -> LoadResult<GridConfig> {
        let path = self.data_dir.join("grid.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no grid config, using defaults");
            return Ok(GridConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load actor sheets from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorSheet>> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Load a scene from `scenes/{name}.ron`, falling back to
    /// `scenes/{name}.json`.
    pub fn load_scene(&self, name: &str) -> LoadResult<Scene> {
        let scenes = self.data_dir.join("scenes");
        let ron = scenes.join(format!("{}.ron", name));
        if ron.exists() {
            return SceneLoader::load(&ron);
        }
        SceneLoader::load(&scenes.join(format!("{}.json", name)))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
