//! Procedural rock sprites built from layered angular shapes.
//!
//! Each rock is five passes of irregular polygons drawn around the sprite
//! center: opaque stone chunks, dark cracks, moss, highlights and small
//! fragments. Counts, offsets, sizes and alphas all come from the seeded
//! random source, so a variation is reproducible from its seed alone.

use super::canvas::Canvas;
use super::palette::{Palette, Tone};
use super::random::SeedStream;
use super::registry::{RasterSurface, TextureKey};
use super::shape::draw_angular_shape;

/// Rock sprite width in pixels
pub const ROCK_WIDTH: u32 = 48;
/// Rock sprite height in pixels
pub const ROCK_HEIGHT: u32 = 48;

/// Seed distance between consecutive variations
pub const VARIATION_SEED_STEP: f64 = 1000.0;

/// One pass of angular shapes
#[derive(Debug, Clone, Copy)]
struct RockLayer {
    name: &'static str,
    /// Shape count is `min + floor(rand * span)`
    count: (u32, u32),
    /// Random index of the count draw; shapes use `base + 1 + i * stride`
    index_base: u32,
    stride: u32,
    /// Offset from center, as a multiple of rock size (full width)
    spread: f32,
    /// Radius `min + rand * span`
    radius: (f32, f32),
    vertices: (u32, u32),
    /// Alpha `min + rand * span`; `None` draws opaque
    alpha: Option<(f32, f32)>,
    tones: &'static [Tone],
}

const LAYERS: [RockLayer; 5] = [
    RockLayer {
        name: "chunks",
        count: (8, 6),
        index_base: 1,
        stride: 10,
        spread: 1.5,
        radius: (4.0, 10.0),
        vertices: (6, 3),
        alpha: None,
        tones: &[Tone::StoneGray, Tone::DarkStone, Tone::MossyStone],
    },
    RockLayer {
        name: "cracks",
        count: (15, 20),
        index_base: 500,
        stride: 10,
        spread: 1.8,
        radius: (1.0, 4.0),
        vertices: (5, 3),
        alpha: Some((0.6, 0.4)),
        tones: &[Tone::ShadowGreen],
    },
    RockLayer {
        name: "moss",
        count: (10, 15),
        index_base: 1000,
        stride: 10,
        spread: 1.5,
        radius: (2.0, 5.0),
        vertices: (4, 4),
        alpha: Some((0.5, 0.3)),
        tones: &[Tone::MossyStone],
    },
    RockLayer {
        name: "highlights",
        count: (8, 12),
        index_base: 1500,
        stride: 10,
        spread: 1.3,
        radius: (1.0, 3.0),
        vertices: (4, 3),
        alpha: Some((0.2, 0.3)),
        tones: &[Tone::Moonlight],
    },
    RockLayer {
        name: "details",
        count: (20, 30),
        index_base: 2000,
        stride: 10,
        spread: 2.0,
        radius: (0.5, 2.0),
        vertices: (3, 4),
        alpha: Some((0.4, 0.4)),
        tones: &[Tone::DarkStone, Tone::StoneGray, Tone::ShadowGreen],
    },
];

/// Generates rock sprite variations
#[derive(Debug, Clone, Copy)]
pub struct RockGenerator {
    base_seed: f64,
}

impl Default for RockGenerator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl RockGenerator {
    /// Create a generator; variation `v` uses seed `base_seed + v * 1000`
    pub fn new(base_seed: f64) -> Self {
        Self { base_seed }
    }

    /// Seed for one variation
    pub fn variation_seed(&self, variation: u32) -> f64 {
        self.base_seed + variation as f64 * VARIATION_SEED_STEP
    }

    /// Shape counts per layer, in draw order
    pub fn layer_counts(&self, variation: u32) -> [u32; 5] {
        let stream = SeedStream::new(self.variation_seed(variation));
        LAYERS.map(|layer| stream.count(layer.count.0, layer.count.1, layer.index_base as f64))
    }

    /// Draw one variation
    pub fn generate(&self, palette: &Palette, variation: u32) -> RasterSurface {
        let seed = self.variation_seed(variation);
        let stream = SeedStream::new(seed);
        let mut canvas = Canvas::new(ROCK_WIDTH, ROCK_HEIGHT);
        let cx = ROCK_WIDTH as f32 / 2.0;
        let cy = ROCK_HEIGHT as f32 / 2.0;
        let rock_size = 16.0 + stream.unit(0.0) as f32 * 6.0;

        for layer in &LAYERS {
            let count = stream.count(layer.count.0, layer.count.1, layer.index_base as f64);
            for i in 0..count {
                let b = (layer.index_base + 1 + i * layer.stride) as f64;
                let dx = (stream.unit(b) as f32 - 0.5) * rock_size * layer.spread;
                let dy = (stream.unit(b + 1.0) as f32 - 0.5) * rock_size * layer.spread;
                let radius = layer.radius.0 + stream.unit(b + 2.0) as f32 * layer.radius.1;
                let alpha = match layer.alpha {
                    Some((min, span)) => min + stream.unit(b + 3.0) as f32 * span,
                    None => 1.0,
                };
                let tone_idx = stream.count(0, layer.tones.len() as u32, b + 4.0) as usize;
                let vertices = stream.count(layer.vertices.0, layer.vertices.1, b + 5.0);
                let shape_seed = seed + stream.unit(b + 6.0) * 1.0e4;

                canvas.set_fill(palette.tone(layer.tones[tone_idx]), alpha);
                draw_angular_shape(&mut canvas, cx + dx, cy + dy, radius, vertices, shape_seed);
            }
            log::trace!("rock-v{}: {} {} shapes", variation, count, layer.name);
        }

        RasterSurface::new(TextureKey::Rock { variation }, canvas.into_image())
    }

    /// Draw variations `0..count`
    pub fn generate_all(&self, palette: &Palette, count: u32) -> Vec<RasterSurface> {
        (0..count).map(|v| self.generate(palette, v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_counts_in_range() {
        let generator = RockGenerator::default();
        for v in 0..50 {
            let [chunks, cracks, moss, highlights, details] = generator.layer_counts(v);
            assert!((8..=13).contains(&chunks));
            assert!((15..=34).contains(&cracks));
            assert!((10..=24).contains(&moss));
            assert!((8..=19).contains(&highlights));
            assert!((20..=49).contains(&details));
        }
    }

    #[test]
    fn test_rock_deterministic() {
        let palette = Palette::dark_fantasy();
        let generator = RockGenerator::new(7.0);
        let a = generator.generate(&palette, 1);
        let b = generator.generate(&palette, 1);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_variations_differ() {
        let palette = Palette::dark_fantasy();
        let rocks = RockGenerator::default().generate_all(&palette, 3);
        assert_eq!(rocks.len(), 3);
        assert_ne!(rocks[0].pixels(), rocks[1].pixels());
        assert_ne!(rocks[1].pixels(), rocks[2].pixels());
    }

    #[test]
    fn test_rock_shape() {
        let palette = Palette::dark_fantasy();
        let rock = RockGenerator::default().generate(&palette, 2);
        assert_eq!(rock.key().to_string(), "rock-v2");
        assert_eq!((rock.width(), rock.height()), (ROCK_WIDTH, ROCK_HEIGHT));
        assert!(rock.image().pixels().any(|p| p.0[3] == 255));
        assert!(rock.coverage() > 200);
        assert!(rock.coverage() < (ROCK_WIDTH * ROCK_HEIGHT) as usize);
    }
}
