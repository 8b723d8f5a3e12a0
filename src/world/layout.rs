//! Stock world layout

use glam::Vec2;

use super::World;
use super::object::ObjectKind;
use crate::config::GenerationConfig;
use crate::sprite::random::SeedStream;

pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 1200.0;

const TREES: [(f32, f32); 15] = [
    (200.0, 200.0),
    (350.0, 180.0),
    (500.0, 250.0),
    (700.0, 300.0),
    (900.0, 200.0),
    (1100.0, 350.0),
    (250.0, 500.0),
    (600.0, 600.0),
    (1000.0, 700.0),
    (1300.0, 400.0),
    (1400.0, 800.0),
    (400.0, 900.0),
    (800.0, 1000.0),
    (1200.0, 1000.0),
    (300.0, 1100.0),
];

const ROCKS: [(f32, f32); 8] = [
    (450.0, 400.0),
    (800.0, 450.0),
    (1100.0, 600.0),
    (300.0, 700.0),
    (950.0, 900.0),
    (1400.0, 500.0),
    (600.0, 200.0),
    (1300.0, 900.0),
];

const HOUSES: [(f32, f32); 3] = [(1200.0, 200.0), (200.0, 850.0), (1300.0, 700.0)];

const BUSHES: [(f32, f32); 12] = [
    (280.0, 350.0),
    (520.0, 480.0),
    (850.0, 380.0),
    (1150.0, 500.0),
    (380.0, 650.0),
    (720.0, 750.0),
    (1050.0, 850.0),
    (450.0, 1050.0),
    (900.0, 550.0),
    (1350.0, 550.0),
    (650.0, 350.0),
    (1200.0, 650.0),
];

/// Random index bases for variation picks, so trees and rocks draw
/// independently
const TREE_PICK_BASE: f64 = 5000.0;
const ROCK_PICK_BASE: f64 = 6000.0;

impl World {
    /// The stock 1600×1200 world with seeded tree and rock variations
    ///
    /// Placement order is trees, rocks, houses, bushes.
    pub fn default_layout(config: &GenerationConfig) -> Self {
        let mut world = World::new(WORLD_WIDTH, WORLD_HEIGHT);
        let picks = SeedStream::new(config.seed);

        for (i, &(x, y)) in TREES.iter().enumerate() {
            let variation = picks.count(0, config.tree_variations, TREE_PICK_BASE + i as f64);
            world.spawn(ObjectKind::Tree, Vec2::new(x, y), variation);
        }
        for (i, &(x, y)) in ROCKS.iter().enumerate() {
            let variation = picks.count(0, config.rock_variations, ROCK_PICK_BASE + i as f64);
            world.spawn(ObjectKind::Rock, Vec2::new(x, y), variation);
        }
        for &(x, y) in &HOUSES {
            world.spawn(ObjectKind::House, Vec2::new(x, y), 0);
        }
        for &(x, y) in &BUSHES {
            world.spawn(ObjectKind::Bush, Vec2::new(x, y), 0);
        }

        log::debug!(
            "World layout: {} trees, {} rocks, {} houses, {} bushes",
            TREES.len(),
            ROCKS.len(),
            HOUSES.len(),
            BUSHES.len()
        );
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::DepletionState;

    #[test]
    fn test_default_layout_counts() {
        let world = World::default_layout(&GenerationConfig::default());
        assert_eq!(world.of_kind(ObjectKind::Tree).count(), 15);
        assert_eq!(world.of_kind(ObjectKind::Rock).count(), 8);
        assert_eq!(world.of_kind(ObjectKind::House).count(), 3);
        assert_eq!(world.of_kind(ObjectKind::Bush).count(), 12);
        for obj in world.objects() {
            assert!(obj.position.x < WORLD_WIDTH && obj.position.y < WORLD_HEIGHT);
        }
    }

    #[test]
    fn test_depletable_objects_start_full() {
        let world = World::default_layout(&GenerationConfig::default());
        for obj in world.objects() {
            match obj.kind {
                ObjectKind::Tree | ObjectKind::Bush => assert_eq!(obj.depletion, Some(DepletionState::FULL)),
                ObjectKind::Rock | ObjectKind::House => assert_eq!(obj.depletion, None),
            }
        }
    }

    #[test]
    fn test_variations_in_range_and_seeded() {
        let config = GenerationConfig { seed: 9.0, tree_variations: 3, rock_variations: 2 };
        let a = World::default_layout(&config);
        let b = World::default_layout(&config);
        assert_eq!(a.objects(), b.objects());
        assert!(a.of_kind(ObjectKind::Tree).all(|o| o.variation < 3));
        assert!(a.of_kind(ObjectKind::Rock).all(|o| o.variation < 2));
    }

    #[test]
    fn test_layout_textures_exist() {
        let config = GenerationConfig::default();
        let world = World::default_layout(&config);
        let registry = crate::sprite::generate_textures_with(&config, &crate::sprite::Palette::default());
        for obj in world.objects() {
            assert!(registry.contains(&obj.texture_key()), "missing {}", obj.texture_key());
        }
    }
}
