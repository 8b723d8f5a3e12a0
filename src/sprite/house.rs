//! House sprite: a single fixed drawing

use glam::Vec2;

use super::canvas::Canvas;
use super::palette::Palette;
use super::registry::{RasterSurface, TextureKey};

pub const HOUSE_WIDTH: u32 = 80;
pub const HOUSE_HEIGHT: u32 = 80;

/// Draw the house sprite
pub fn generate_house(palette: &Palette) -> RasterSurface {
    let mut canvas = Canvas::new(HOUSE_WIDTH, HOUSE_HEIGHT);

    // Walls
    canvas.set_fill_color(palette.old_wood);
    canvas.fill_rect(10.0, 30.0, 60.0, 50.0);

    // Door
    canvas.set_fill_color(palette.dark_bark);
    canvas.fill_rect(30.0, 55.0, 20.0, 25.0);

    // Windows, with candlelight in the left one
    canvas.set_fill_color(palette.shadow_green);
    canvas.fill_rect(15.0, 40.0, 15.0, 15.0);
    canvas.fill_rect(50.0, 40.0, 15.0, 15.0);
    canvas.set_fill(palette.torch_glow, 0.3);
    canvas.fill_rect(17.0, 42.0, 11.0, 11.0);

    // Roof
    canvas.set_fill_color(palette.dark_stone);
    canvas.fill_polygon(&[Vec2::new(5.0, 30.0), Vec2::new(40.0, 5.0), Vec2::new(75.0, 30.0)]);

    RasterSurface::new(TextureKey::House, canvas.into_image())
}
