//! Berry bush sprites
//!
//! Bushes use one fixed pixel-art recipe. Only the berry layer changes with
//! depletion state: a full bush shows every berry, a barren one none.

use super::canvas::Canvas;
use super::palette::{Palette, Tone};
use super::registry::{RasterSurface, TextureKey};
use crate::world::depletion::DepletionState;

/// Bush sprite width in pixels
pub const BUSH_WIDTH: u32 = 40;
/// Bush sprite height in pixels
pub const BUSH_HEIGHT: u32 = 40;

/// Berries drawn per depletion state 0..=3
pub const BERRIES_PER_STATE: [usize; 4] = [0, 3, 7, 12];

/// Foliage clusters `(x, y, size)`
const CLUSTERS: [(f32, f32, f32); 10] = [
    (20.0, 22.0, 12.0),
    (12.0, 20.0, 9.0),
    (29.0, 20.0, 10.0),
    (18.0, 13.0, 7.0),
    (24.0, 14.0, 7.0),
    (15.0, 27.0, 8.0),
    (25.0, 28.0, 8.0),
    (8.0, 25.0, 6.0),
    (33.0, 26.0, 6.0),
    (21.0, 30.0, 7.0),
];

/// A square overlay layer: one tone at one alpha
struct SquareLayer {
    tone: Tone,
    alpha: f32,
    squares: &'static [(f32, f32, f32)],
}

const SHADOWS: SquareLayer = SquareLayer {
    tone: Tone::ShadowGreen,
    alpha: 0.35,
    squares: &[(23.0, 26.0, 20.0), (14.0, 25.0, 14.0), (29.0, 24.0, 14.0), (20.0, 19.0, 16.0)],
};

const HIGHLIGHTS: SquareLayer = SquareLayer {
    tone: Tone::DarkGrass,
    alpha: 0.5,
    squares: &[(15.0, 16.0, 10.0), (24.0, 15.0, 10.0), (19.0, 26.0, 8.0), (10.0, 22.0, 7.0)],
};

const SPECKLES: SquareLayer = SquareLayer {
    tone: Tone::Moonlight,
    alpha: 0.18,
    squares: &[
        (13.0, 18.0, 2.4),
        (17.0, 14.0, 2.0),
        (22.0, 13.0, 2.2),
        (27.0, 15.0, 2.0),
        (30.0, 20.0, 2.2),
        (26.0, 26.0, 2.4),
        (18.0, 28.0, 2.2),
        (11.0, 26.0, 2.0),
        (9.0, 23.0, 1.8),
    ],
};

/// Twig rectangles `(x, y, w, h)`
const TWIGS: [(f32, f32, f32, f32); 5] = [
    (19.0, 29.0, 3.0, 8.0),
    (14.0, 27.0, 2.0, 5.0),
    (24.0, 27.0, 2.0, 5.0),
    (11.0, 24.0, 2.0, 4.0),
    (27.0, 24.0, 2.0, 4.0),
];
const TWIG_HIGHLIGHTS: [(f32, f32, f32, f32); 3] =
    [(20.0, 31.0, 1.0, 6.0), (15.0, 28.0, 1.0, 3.0), (25.0, 28.0, 1.0, 3.0)];

/// Berry positions `(x, y, size)`, in draw order
pub const BERRIES: [(f32, f32, f32); 12] = [
    (14.0, 15.0, 2.2),
    (18.0, 18.0, 2.0),
    (22.0, 16.0, 2.1),
    (26.0, 18.0, 1.9),
    (30.0, 22.0, 2.2),
    (24.0, 23.0, 2.4),
    (18.0, 24.0, 2.3),
    (12.0, 22.0, 2.0),
    (16.0, 28.0, 2.0),
    (26.0, 29.0, 2.0),
    (20.0, 11.0, 1.8),
    (28.0, 14.0, 1.7),
];

/// Number of berries shown at a depletion state
pub fn berries_for_state(state: DepletionState) -> usize {
    BERRIES_PER_STATE[state.value().min(DepletionState::FULL.value()) as usize].min(BERRIES.len())
}

fn draw_squares(canvas: &mut Canvas, palette: &Palette, layer: &SquareLayer) {
    canvas.set_fill(palette.tone(layer.tone), layer.alpha);
    for &(x, y, size) in layer.squares {
        canvas.fill_square(x, y, size);
    }
}

/// Composites berry bush sprites from the fixed recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct BushCompositor;

impl BushCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Draw the bush at one depletion state
    pub fn generate(&self, palette: &Palette, state: DepletionState) -> RasterSurface {
        let mut canvas = Canvas::new(BUSH_WIDTH, BUSH_HEIGHT);

        // Outline under the foliage
        canvas.set_fill(palette.shadow_green, 0.85);
        for &(x, y, size) in &CLUSTERS {
            canvas.fill_square(x + 0.5, y + 0.5, size * 2.0 + 2.4);
        }
        canvas.set_fill_color(palette.forest_green);
        for &(x, y, size) in &CLUSTERS {
            canvas.fill_square(x, y, size * 2.0);
        }

        draw_squares(&mut canvas, palette, &SHADOWS);
        draw_squares(&mut canvas, palette, &HIGHLIGHTS);
        draw_squares(&mut canvas, palette, &SPECKLES);

        canvas.set_fill_color(palette.dark_bark);
        for &(x, y, w, h) in &TWIGS {
            canvas.fill_rect(x, y, w, h);
        }
        canvas.set_fill(palette.old_wood, 0.9);
        for &(x, y, w, h) in &TWIG_HIGHLIGHTS {
            canvas.fill_rect(x, y, w, h);
        }

        let shown = berries_for_state(state);
        for &(x, y, size) in &BERRIES[..shown] {
            canvas.set_fill(palette.shadow_green, 0.5);
            canvas.fill_square(x + 0.7, y + 0.8, (size + 0.2) * 2.0);
            canvas.set_fill_color(palette.blood_red);
            canvas.fill_square(x, y, size * 2.0);
            canvas.set_fill(palette.moonlight, 0.55);
            canvas.fill_square(x - 0.6, y - 0.6, (size * 0.7).max(1.4));
            canvas.set_fill(palette.dark_bark, 0.75);
            canvas.fill_square(x + 0.2, y + 1.2, (size * 0.4).max(0.8));
        }
        log::trace!("berry-bush-{}: {} berries", state.value(), shown);

        RasterSurface::new(TextureKey::BerryBush { state: state.value() }, canvas.into_image())
    }

    /// Draw every depletion state, ordered full to barren
    pub fn generate_states(&self, palette: &Palette) -> Vec<RasterSurface> {
        DepletionState::ALL_DESCENDING.iter().map(|&s| self.generate(palette, s)).collect()
    }
}
