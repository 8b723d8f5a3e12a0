//! CPU raster canvas with fill-style state
//!
//! A `Canvas` wraps an RGBA image and a current fill style. All primitives
//! sample pixel centers (no anti-aliasing) and composite the fill color with
//! source-over alpha blending, so output is bit-identical across runs.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::palette::Color;

/// Smallest radius/extent a primitive is drawn with
pub const MIN_EXTENT: f32 = 0.25;

/// Segments used to approximate a full circle
const CIRCLE_SEGMENTS: usize = 48;

/// Current fill color and opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Color,
    pub alpha: f32,
}

impl FillStyle {
    pub fn new(color: Color, alpha: f32) -> Self {
        Self { color, alpha: alpha.clamp(0.0, 1.0) }
    }

    pub fn opaque(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}

/// Drawing target for the sprite generators
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    fill: FillStyle,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            fill: FillStyle::opaque(Color::BLACK),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Set color and alpha for subsequent fills
    pub fn set_fill(&mut self, color: Color, alpha: f32) -> &mut Self {
        self.fill = FillStyle::new(color, alpha);
        self
    }

    /// Set an opaque fill color
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.set_fill(color, 1.0)
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    /// Read back a pixel (test and export helper)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Consume the canvas and return its pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Blend the current fill into one pixel
    fn blend(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let a = self.fill.alpha;
        if a <= 0.0 {
            return;
        }
        let src = self.fill.color;
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        let mix = |s: u8, d: u8| -> u8 {
            if out_a <= 0.0 {
                return 0;
            }
            let c = (s as f32 * a + d as f32 * dst_a * (1.0 - a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            mix(src.r, dst.0[0]),
            mix(src.g, dst.0[1]),
            mix(src.b, dst.0[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }

    /// Fill an axis-aligned rectangle from its top-left corner
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if !(w > 0.0 && h > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let x0 = (x - 0.5).ceil() as i32;
        let x1 = (x + w - 0.5).ceil() as i32;
        let y0 = (y - 0.5).ceil() as i32;
        let y1 = (y + h - 0.5).ceil() as i32;
        for py in y0.max(0)..y1.min(self.height() as i32) {
            for px in x0.max(0)..x1.min(self.width() as i32) {
                self.blend(px, py);
            }
        }
    }

    /// Fill a square centered on `(cx, cy)`
    pub fn fill_square(&mut self, cx: f32, cy: f32, size: f32) {
        let half = size / 2.0;
        self.fill_rect(cx - half, cy - half, size, size);
    }

    /// Fill an ellipse centered on `(cx, cy)` with full width/height `w`, `h`
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        let rx = (w / 2.0).max(MIN_EXTENT);
        let ry = (h / 2.0).max(MIN_EXTENT);
        if !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let y0 = (cy - ry - 0.5).floor() as i32;
        let y1 = (cy + ry + 0.5).ceil() as i32;
        let x0 = (cx - rx - 0.5).floor() as i32;
        let x1 = (cx + rx + 0.5).ceil() as i32;
        for py in y0.max(0)..y1.min(self.height() as i32) {
            for px in x0.max(0)..x1.min(self.width() as i32) {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend(px, py);
                }
            }
        }
    }

    /// Fill a circle
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let d = radius.max(MIN_EXTENT) * 2.0;
        self.fill_ellipse(cx, cy, d, d);
    }

    /// Fill the region enclosed by an arc from `start` to `end` radians and
    /// the chord joining its endpoints
    pub fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        let radius = radius.max(MIN_EXTENT);
        let sweep = (end - start).clamp(-std::f32::consts::TAU, std::f32::consts::TAU);
        let steps = ((sweep.abs() / std::f32::consts::TAU) * CIRCLE_SEGMENTS as f32).ceil().max(2.0) as usize;
        let points: Vec<Vec2> = (0..=steps)
            .map(|i| {
                let a = start + sweep * (i as f32 / steps as f32);
                Vec2::new(cx + a.cos() * radius, cy + a.sin() * radius)
            })
            .collect();
        self.fill_polygon(&points);
    }

    /// Stroke a straight segment with square ends and width `thickness`
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, thickness: f32) {
        let dir = to - from;
        let len = dir.length();
        if !(len > 0.0) {
            return;
        }
        let n = Vec2::new(-dir.y, dir.x) / len * (thickness.max(MIN_EXTENT * 2.0) / 2.0);
        self.fill_polygon(&[from + n, to + n, to - n, from - n]);
    }

    /// Fill a closed polygon (even-odd rule)
    pub fn fill_polygon(&mut self, points: &[Vec2]) {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y0 = ((min_y - 0.5).ceil() as i32).max(0);
        let y1 = ((max_y - 0.5).ceil() as i32).min(self.height() as i32);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for py in y0..y1 {
            let sy = py as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                // Half-open test so shared vertices count once
                if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                    let t = (sy - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let x0 = ((span[0] - 0.5).ceil() as i32).max(0);
                let x1 = ((span[1] - 0.5).ceil() as i32).min(self.width() as i32);
                for px in x0..x1 {
                    self.blend(px, py);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn count_filled(canvas: &Canvas) -> usize {
        let mut n = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y).unwrap()[3] > 0 {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_new_canvas_transparent() {
        let canvas = Canvas::new(8, 8);
        assert_eq!(count_filled(&canvas), 0);
    }

    #[test]
    fn test_fill_rect_exact_pixels() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_fill_color(RED);
        canvas.fill_rect(2.0, 3.0, 4.0, 2.0);
        assert_eq!(count_filled(&canvas), 8);
        assert_eq!(canvas.pixel(2, 3), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 4), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(6, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_fill_color(RED);
        canvas.fill_rect(-10.0, -10.0, 100.0, 100.0);
        assert_eq!(count_filled(&canvas), 16);
    }

    #[test]
    fn test_alpha_blend_over_opaque() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_fill_color(RED);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        canvas.set_fill(BLUE, 0.5);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let [r, g, b, a] = canvas.pixel(0, 0).unwrap();
        assert_eq!(a, 255);
        assert_eq!(g, 0);
        assert!((126..=129).contains(&r));
        assert!((126..=129).contains(&b));
    }

    #[test]
    fn test_alpha_on_transparent_keeps_color() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_fill(RED, 0.5);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let [r, _, _, a] = canvas.pixel(0, 0).unwrap();
        assert_eq!(r, 255);
        assert!((127..=128).contains(&a));
    }

    #[test]
    fn test_fill_circle_symmetric() {
        let mut canvas = Canvas::new(21, 21);
        canvas.set_fill_color(RED);
        canvas.fill_circle(10.5, 10.5, 5.0);
        assert!(canvas.pixel(10, 10).unwrap()[3] > 0);
        assert_eq!(canvas.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(canvas.pixel(5, 10), canvas.pixel(15, 10));
        assert_eq!(canvas.pixel(10, 5), canvas.pixel(10, 15));
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_fill_color(RED);
        canvas.fill_polygon(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]);
        let filled = count_filled(&canvas);
        assert!((40..=60).contains(&filled), "triangle covered {filled} pixels");
        assert!(canvas.pixel(1, 1).unwrap()[3] > 0);
        assert_eq!(canvas.pixel(9, 9).unwrap()[3], 0);
    }

    #[test]
    fn test_degenerate_polygon_ignored() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::ONE]);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::new(f32::NAN, 1.0), Vec2::ONE]);
        assert_eq!(count_filled(&canvas), 0);
    }

    #[test]
    fn test_stroke_line_width() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_fill_color(RED);
        canvas.stroke_line(Vec2::new(10.0, 18.0), Vec2::new(10.0, 2.0), 4.0);
        assert!(canvas.pixel(9, 10).unwrap()[3] > 0);
        assert!(canvas.pixel(11, 10).unwrap()[3] > 0);
        assert_eq!(canvas.pixel(14, 10).unwrap()[3], 0);
    }

    #[test]
    fn test_half_disc_arc() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_fill_color(RED);
        // Lower half (y grows downward)
        canvas.fill_arc(10.0, 10.0, 6.0, 0.0, std::f32::consts::PI);
        assert!(canvas.pixel(10, 13).unwrap()[3] > 0);
        assert_eq!(canvas.pixel(10, 6).unwrap()[3], 0);
    }
}
