//! Seeded random source
//!
//! Every drawing decision derives its value from a `(seed, index)` pair
//! through a sine hash, so a texture is a pure function of its seed.
//! There is no generator state to advance: callers pick an index for each
//! draw (usually a loop counter offset by a per-layer constant).

/// Weight applied to the seed inside the hash
pub const SEED_WEIGHT: f64 = 12.9898;
/// Weight applied to the draw index inside the hash
pub const INDEX_WEIGHT: f64 = 78.233;
/// Weight applied to the salt (branch depth) inside the hash
pub const SALT_WEIGHT: f64 = 45.123;
/// Output scale before taking the fractional part
pub const HASH_SCALE: f64 = 43758.5453;

/// Largest f64 strictly below 1.0
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

#[inline]
fn fract_hash(phase: f64) -> f64 {
    let v = phase.sin() * HASH_SCALE;
    let f = v - v.floor();
    // fract() of a tiny negative rounds up to exactly 1.0
    if f.is_finite() { f.clamp(0.0, BELOW_ONE) } else { 0.0 }
}

/// Deterministic float in `[0, 1)` for a `(seed, index)` pair
#[inline]
pub fn rand(seed: f64, index: f64) -> f64 {
    fract_hash(seed * SEED_WEIGHT + index * INDEX_WEIGHT)
}

/// Deterministic float in `[0, 1)` with an extra salt term
#[inline]
pub fn rand_salted(seed: f64, index: f64, salt: f64) -> f64 {
    fract_hash(seed * SEED_WEIGHT + index * INDEX_WEIGHT + salt * SALT_WEIGHT)
}

/// Deterministic float in `[min, max)` for a `(seed, index)` pair
///
/// Returns `min` when the range is empty or inverted.
#[inline]
pub fn rand_range(min: f64, max: f64, seed: f64, index: f64) -> f64 {
    scale_into(rand(seed, index), min, max)
}

/// Map a unit value into `[min, max)`, keeping the upper bound exclusive
fn scale_into(unit: f64, min: f64, max: f64) -> f64 {
    if !(max > min) {
        return min;
    }
    let v = min + unit * (max - min);
    if v >= max { prev_float(max).max(min) } else { v }
}

/// Next representable f64 toward negative infinity
fn prev_float(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// A seed/salt pair with convenience draws
///
/// Generators hold one of these per drawing context (a rock variation, a
/// branch node) and draw with explicit indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedStream {
    pub seed: f64,
    pub salt: f64,
}

impl SeedStream {
    /// Unsalted stream
    pub fn new(seed: f64) -> Self {
        Self { seed, salt: 0.0 }
    }

    /// Stream whose draws also mix in `salt`
    pub fn salted(seed: f64, salt: f64) -> Self {
        Self { seed, salt }
    }

    /// Float in `[0, 1)`
    #[inline]
    pub fn unit(&self, index: f64) -> f64 {
        if self.salt == 0.0 {
            rand(self.seed, index)
        } else {
            rand_salted(self.seed, index, self.salt)
        }
    }

    /// Float in `[min, max)`
    #[inline]
    pub fn range(&self, min: f64, max: f64, index: f64) -> f64 {
        scale_into(self.unit(index), min, max)
    }

    /// Integer in `[min, min + span)`: `min + floor(unit * span)`
    #[inline]
    pub fn count(&self, min: u32, span: u32, index: f64) -> u32 {
        min + ((self.unit(index) * span as f64).floor() as u32).min(span.saturating_sub(1))
    }

    /// `true` with probability `1 - threshold`
    #[inline]
    pub fn chance_above(&self, threshold: f64, index: f64) -> bool {
        self.unit(index) > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_deterministic() {
        for seed in [0.0, 1.0, 789.0, 123.456, -42.5, 1e6] {
            for index in [0.0, 1.0, 37.0, 500.5, 9999.0] {
                assert_eq!(rand(seed, index).to_bits(), rand(seed, index).to_bits());
            }
        }
    }

    #[test]
    fn test_rand_unit_range() {
        for s in 0..200 {
            for i in 0..200 {
                let v = rand(s as f64 * 3.7, i as f64);
                assert!((0.0..1.0).contains(&v), "rand({s}, {i}) = {v}");
            }
        }
    }

    #[test]
    fn test_rand_range_bounds() {
        let ranges = [(0.7, 1.3), (-0.7, 0.7), (2.0, 4.0), (0.0, std::f64::consts::TAU), (-10.0, -9.0)];
        for (min, max) in ranges {
            for i in 0..500 {
                let v = rand_range(min, max, 42.0, i as f64);
                assert!(v >= min && v < max, "{v} outside [{min}, {max})");
            }
        }
    }

    #[test]
    fn test_rand_range_degenerate() {
        assert_eq!(rand_range(5.0, 5.0, 1.0, 1.0), 5.0);
        assert_eq!(rand_range(5.0, 1.0, 1.0, 1.0), 5.0);
    }

    #[test]
    fn test_scale_into_keeps_upper_bound_exclusive() {
        assert!(scale_into(BELOW_ONE, 0.0, 1e-300) < 1e-300);
        assert!(scale_into(BELOW_ONE, -3.0, 0.0) < 0.0);
        assert!(scale_into(BELOW_ONE, -3.0, -1.0) < -1.0);
    }

    #[test]
    fn test_indices_decorrelate() {
        let a: Vec<f64> = (0..16).map(|i| rand(789.0, i as f64)).collect();
        let distinct = a.windows(2).filter(|w| (w[0] - w[1]).abs() > 1e-6).count();
        assert_eq!(distinct, a.len() - 1);
    }

    #[test]
    fn test_salt_changes_output() {
        let plain = SeedStream::new(789.0);
        let salted = SeedStream::salted(789.0, 7.0);
        assert_ne!(plain.unit(10.0), salted.unit(10.0));
        assert_eq!(salted.unit(10.0), rand_salted(789.0, 10.0, 7.0));
    }

    #[test]
    fn test_count_within_span() {
        let stream = SeedStream::new(1000.0);
        for i in 0..300 {
            let n = stream.count(8, 6, i as f64);
            assert!((8..14).contains(&n));
        }
    }
}
