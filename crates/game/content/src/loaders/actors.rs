//! Actor sheet loader.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::sheets::ActorSheet;

/// Loader for actor sheets from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load actor sheets from a RON file.
    ///
    /// RON format: `Vec<ActorSheet>`. Actor ids must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<ActorSheet>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorSheet>> {
        let sheets: Vec<ActorSheet> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor sheets RON: {}", e))?;

        let mut seen = HashSet::new();
        for sheet in &sheets {
            if !seen.insert(&sheet.actor) {
                anyhow::bail!("Duplicate actor sheet for '{}'", sheet.actor.as_str());
            }
        }

        Ok(sheets)
    }
}
