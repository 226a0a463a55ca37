//! Scene snapshot loader.
//!
//! A scene file holds the tokens placed on the battle grid. RON is the
//! hand-written format; JSON is accepted for snapshots exported by a host.

use std::path::Path;

use tactics_core::Scene;

use crate::loaders::{LoadResult, read_file};

/// Loader for scene snapshots from RON or JSON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load a scene, picking the format from the file extension
    /// (`.ron` or `.json`).
    pub fn load(path: &Path) -> LoadResult<Scene> {
        let content = read_file(path)?;
        let scene = match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron(&content)?,
            Some("json") => Self::from_json(&content)?,
            other => anyhow::bail!(
                "Unsupported scene format {:?} for {} (expected .ron or .json)",
                other.unwrap_or(""),
                path.display()
            ),
        };

        tracing::debug!(scene = %scene.name, tokens = scene.tokens.len(), "loaded scene");
        Ok(scene)
    }

    pub fn from_ron(content: &str) -> LoadResult<Scene> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))
    }

    pub fn from_json(content: &str) -> LoadResult<Scene> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene JSON: {}", e))
    }
}
