//! Grid configuration loader.

use std::path::Path;

use tactics_core::GridConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for grid configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load grid config from a TOML file.
    ///
    /// Missing keys keep their defaults, so an empty file yields
    /// [`GridConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GridConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GridConfig> {
        let config: GridConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse grid config TOML: {}", e))?;

        if config.size.is_nan() || config.size <= 0.0 {
            anyhow::bail!("Grid size must be positive, got {}", config.size);
        }
        if config.adjacency_threshold < 0.0 {
            anyhow::bail!(
                "Adjacency threshold must not be negative, got {}",
                config.adjacency_threshold
            );
        }

        tracing::debug!(
            size = config.size,
            adjacency = config.adjacency_threshold,
            diagonals = %config.diagonals,
            "loaded grid config"
        );
        Ok(config)
    }
}
