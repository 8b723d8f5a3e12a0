//! Game configuration
//!
//! Every section is optional in the JSON file; missing fields take the
//! stock values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::sprite::palette::Palette;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub harvest: HarvestConfig,
    pub palette: Palette,
}

/// Texture generation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Base seed for every generator and the layout's variation picks
    pub seed: f64,
    /// Tree variations (each drawn at all four depletion states)
    pub tree_variations: u32,
    pub rock_variations: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { seed: 0.0, tree_variations: 3, rock_variations: 3 }
    }
}

/// Harvest timing, yields and reach
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HarvestConfig {
    /// How long interact must be held (ms)
    pub required_ms: f32,
    pub berry_yield: u32,
    pub wood_yield: u32,
    /// Interaction radius for bushes (px)
    pub bush_range: f32,
    /// Interaction radius for trees (px)
    pub tree_range: f32,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            required_ms: 3000.0,
            berry_yield: 3,
            wood_yield: 5,
            bush_range: 50.0,
            tree_range: 80.0,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values no generator or session can work with
    pub fn validate(&self) -> Result<()> {
        if !self.generation.seed.is_finite() {
            return Err(Error::Config("generation.seed must be finite".into()));
        }
        let ranges = [("harvest.bushRange", self.harvest.bush_range), ("harvest.treeRange", self.harvest.tree_range)];
        for (name, value) in ranges {
            if !(value >= 0.0) {
                return Err(Error::Config(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_game() {
        let config = GameConfig::default();
        assert_eq!(config.generation.tree_variations, 3);
        assert_eq!(config.generation.rock_variations, 3);
        assert_eq!(config.harvest.required_ms, 3000.0);
        assert_eq!((config.harvest.berry_yield, config.harvest.wood_yield), (3, 5));
        assert_eq!(config.palette, Palette::dark_fantasy());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "generation": {{ "seed": 42 }}, "harvest": {{ "requiredMs": 1500 }} }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.generation.seed, 42.0);
        assert_eq!(config.generation.tree_variations, 3);
        assert_eq!(config.harvest.required_ms, 1500.0);
        assert_eq!(config.harvest.tree_range, 80.0);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(GameConfig::load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_rejects_negative_range() {
        let mut config = GameConfig::default();
        config.harvest.bush_range = -1.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(GameConfig::load(&dir.path().join("nope.json")), Err(Error::Io(_))));
    }
}
