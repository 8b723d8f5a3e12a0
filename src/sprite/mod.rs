//! Procedural sprite generation
//!
//! All generators are pure functions of a seed and the palette. They run
//! once at startup and fill a `TextureRegistry` that the rest of the game
//! only reads.

pub mod random;
pub mod canvas;
pub mod palette;
pub mod shape;
pub mod registry;
pub mod rock;
pub mod tree;
pub mod bush;
pub mod house;
pub mod export;

pub use canvas::Canvas;
pub use palette::{Color, Palette, Tone};
pub use random::{rand, rand_range, SeedStream};
pub use registry::{RasterSurface, TextureKey, TextureRegistry};
pub use rock::RockGenerator;
pub use tree::{TreeGenerator, TreeParams, TreeSkeleton};
pub use bush::BushCompositor;
pub use house::generate_house;

use crate::config::GenerationConfig;

/// Generate every texture with the stock palette
///
/// `variation_count` applies to both trees and rocks.
pub fn generate_textures(seed: f64, variation_count: u32) -> TextureRegistry {
    let config = GenerationConfig {
        seed,
        tree_variations: variation_count,
        rock_variations: variation_count,
    };
    generate_textures_with(&config, &Palette::dark_fantasy())
}

/// Generate every texture described by `config`
pub fn generate_textures_with(config: &GenerationConfig, palette: &Palette) -> TextureRegistry {
    let mut registry = TextureRegistry::new();

    let trees = TreeGenerator::new(config.seed);
    for v in 0..config.tree_variations {
        for surface in trees.generate_states(palette, v) {
            registry.insert(surface);
        }
        log::debug!("Generated tree variation {}", v);
    }

    let rocks = RockGenerator::new(config.seed);
    for surface in rocks.generate_all(palette, config.rock_variations) {
        registry.insert(surface);
    }

    for surface in BushCompositor::new().generate_states(palette) {
        registry.insert(surface);
    }
    registry.insert(generate_house(palette));

    log::info!(
        "Generated {} textures ({} tree variations, {} rock variations)",
        registry.len(),
        config.tree_variations,
        config.rock_variations
    );
    registry
}
