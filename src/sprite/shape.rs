//! Irregular angular polygons

use glam::Vec2;

use super::canvas::{Canvas, MIN_EXTENT};
use super::random::rand_range;

/// Per-vertex radius jitter bounds
pub const RADIUS_JITTER: (f64, f64) = (0.7, 1.3);

/// Vertices of an irregular n-gon around `(cx, cy)`
///
/// Vertices are evenly spaced in angle; each radius is `base_radius`
/// scaled by `rand_range(0.7, 1.3, seed, vertex_index)`. Fewer than three
/// vertices are raised to three and bad radii are clamped, so this always
/// yields a fillable polygon.
pub fn angular_shape_points(cx: f32, cy: f32, base_radius: f32, vertex_count: u32, seed: f64) -> Vec<Vec2> {
    let vertex_count = vertex_count.max(3);
    let base_radius = if base_radius.is_finite() { base_radius.max(MIN_EXTENT) } else { MIN_EXTENT };

    (0..vertex_count)
        .map(|i| {
            let angle = (i as f32 / vertex_count as f32) * std::f32::consts::TAU;
            let jitter = rand_range(RADIUS_JITTER.0, RADIUS_JITTER.1, seed, i as f64) as f32;
            let r = base_radius * jitter;
            Vec2::new(cx + angle.cos() * r, cy + angle.sin() * r)
        })
        .collect()
}

/// Fill an irregular n-gon with the canvas's current fill style
pub fn draw_angular_shape(canvas: &mut Canvas, cx: f32, cy: f32, base_radius: f32, vertex_count: u32, seed: f64) {
    let points = angular_shape_points(cx, cy, base_radius, vertex_count, seed);
    canvas.fill_polygon(&points);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::palette::Color;

    #[test]
    fn test_vertex_radii_jittered() {
        let points = angular_shape_points(0.0, 0.0, 10.0, 8, 42.0);
        assert_eq!(points.len(), 8);
        for p in &points {
            let r = p.length();
            assert!(r >= 7.0 - 1e-3 && r < 13.0 + 1e-3, "radius {r}");
        }
        let radii: Vec<f32> = points.iter().map(|p| p.length()).collect();
        assert!(radii.windows(2).any(|w| (w[0] - w[1]).abs() > 0.01));
    }

    #[test]
    fn test_deterministic_shape() {
        assert_eq!(
            angular_shape_points(5.0, 5.0, 4.0, 6, 1005.0),
            angular_shape_points(5.0, 5.0, 4.0, 6, 1005.0)
        );
    }

    #[test]
    fn test_clamps_bad_parameters() {
        let points = angular_shape_points(0.0, 0.0, -3.0, 1, 1.0);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.is_finite()));
        let points = angular_shape_points(0.0, 0.0, f32::NAN, 5, 1.0);
        assert!(points.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_draw_fills_center() {
        let mut canvas = Canvas::new(32, 32);
        canvas.set_fill_color(Color::rgb(10, 20, 30));
        draw_angular_shape(&mut canvas, 16.0, 16.0, 8.0, 7, 3.0);
        assert_eq!(canvas.pixel(16, 16), Some([10, 20, 30, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
