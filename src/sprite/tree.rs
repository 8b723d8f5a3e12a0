//! Procedural tree sprites using recursive fractal branching
//!
//! Generation runs in two phases:
//! - Trace: the branch recursion is walked once per variation and captured
//!   as a flat `TreeSkeleton` (start/end, angle, length, thickness, depth
//!   and seed per node, plus bark stamps)
//! - Render: a stroke pass draws every branch, then a leaf pass scatters
//!   leaves along the same nodes at a density picked by depletion state
//!
//! The stump (state 0) is drawn separately and has no branches.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

use super::canvas::Canvas;
use super::palette::{Palette, Tone};
use super::random::SeedStream;
use super::registry::{RasterSurface, TextureKey};
use crate::world::depletion::DepletionState;

/// Tree sprite width in pixels
pub const TREE_WIDTH: u32 = 128;
/// Tree sprite height in pixels
pub const TREE_HEIGHT: u32 = 160;

/// Branches shorter than this are not drawn and don't recurse
pub const MIN_BRANCH_LENGTH: f32 = 3.0;
/// Seed offset between sibling branches
pub const SIBLING_SEED_STEP: f64 = 37.0;

/// Parameters for tree sprite generation
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Sprite width in pixels
    pub width: u32,
    /// Sprite height in pixels
    pub height: u32,
    /// Distance from the bottom edge to the trunk base
    pub base_margin: f32,
    /// Trunk height as a fraction of sprite height
    pub trunk_height_ratio: f32,
    /// Recursion depth of the trunk and base branches
    pub trunk_depth: u32,
    /// Recursion depth of mid-trunk branches
    pub mid_depth: u32,
    /// Leaf density for depletion states 1, 2 and 3
    pub leaf_density: [f32; 3],
    /// Stump width before size variation
    pub stump_width: f32,
    /// Stump height
    pub stump_height: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            width: TREE_WIDTH,
            height: TREE_HEIGHT,
            base_margin: 10.0,
            trunk_height_ratio: 0.65,
            trunk_depth: 7,
            mid_depth: 6,
            leaf_density: [0.25, 0.5, 1.0],
            stump_width: 24.0,
            stump_height: 30.0,
        }
    }
}

impl TreeParams {
    /// Leaf density for a depletion state; stumps have none
    pub fn density_for(&self, state: DepletionState) -> Option<f32> {
        match state.value() {
            0 => None,
            s => self.leaf_density.get(s as usize - 1).copied(),
        }
    }
}

/// Bark texture rectangle stamped on a thick branch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarkStamp {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One branch segment of a traced tree
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    pub start: Vec2,
    pub end: Vec2,
    pub angle: f32,
    pub length: f32,
    pub thickness: f32,
    /// Remaining recursion depth (always > 0 for stored nodes)
    pub depth: u32,
    pub seed: f64,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub bark: Option<BarkStamp>,
}

impl BranchNode {
    /// Draw stream for this node: its seed salted by its depth
    fn stream(&self) -> SeedStream {
        SeedStream::salted(self.seed, self.depth as f64)
    }

    /// Point at fraction `t` along the segment
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.start + (self.end - self.start) * t
    }

    /// Leaves this node carries at `density`
    pub fn leaf_count(&self, density: f32) -> u32 {
        ((self.length / 2.5) * density.max(0.0)).floor() as u32
    }
}

/// Starting parameters of a branch recursion
#[derive(Debug, Clone, Copy)]
struct BranchSeed {
    start: Vec2,
    angle: f32,
    length: f32,
    thickness: f32,
    depth: u32,
    seed: f64,
}

/// Captured branch geometry for one tree variation
///
/// Nodes are stored in pre-order (parent before children, siblings in
/// order), which is also the draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeSkeleton {
    nodes: Vec<BranchNode>,
    roots: Vec<usize>,
}

impl TreeSkeleton {
    pub fn nodes(&self) -> &[BranchNode] {
        &self.nodes
    }

    /// Indices of the top-level branches (trunk, base and mid branches)
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total leaves the leaf pass places at `density`
    pub fn leaf_count(&self, density: f32) -> u32 {
        self.nodes.iter().map(|n| n.leaf_count(density)).sum()
    }

    /// Trace a branch recursion rooted at `root`
    fn trace(&mut self, root: BranchSeed) {
        if let Some(idx) = self.trace_branch(None, root) {
            self.roots.push(idx);
        }
    }

    fn trace_branch(&mut self, parent: Option<usize>, b: BranchSeed) -> Option<usize> {
        // Negated compare also rejects NaN lengths
        if b.depth == 0 || !(b.length >= MIN_BRANCH_LENGTH) {
            return None;
        }

        let rng = SeedStream::salted(b.seed, b.depth as f64);
        let d = b.depth as f64;
        let end = b.start + Vec2::from_angle(b.angle) * b.length;

        let bark = if b.thickness > 3.0 && rng.chance_above(0.3, d * 77.0) {
            let tx = rng.range(0.2, 0.8, d * 88.0) as f32;
            let ty = rng.range(0.2, 0.8, d * 99.0) as f32;
            Some(BarkStamp {
                x: b.start.x + (end.x - b.start.x) * tx - 1.0,
                y: b.start.y + (end.y - b.start.y) * ty - 1.0,
                w: rng.range(1.0, 3.0, d * 111.0) as f32,
                h: rng.range(2.0, 4.0, d * 122.0) as f32,
            })
        } else {
            None
        };

        let idx = self.nodes.len();
        self.nodes.push(BranchNode {
            start: b.start,
            end,
            angle: b.angle,
            length: b.length,
            thickness: b.thickness,
            depth: b.depth,
            seed: b.seed,
            parent,
            children: Vec::new(),
            bark,
        });

        let child_count = if b.depth > 5 {
            rng.range(2.0, 4.0, d * 10.0).floor() as u32
        } else if b.depth > 3 {
            rng.range(2.0, 3.0, d * 10.0).floor() as u32
        } else {
            rng.range(1.0, 3.0, d * 10.0).floor() as u32
        };

        for i in 0..child_count {
            let fi = i as f64;
            let along = rng.range(0.5, 0.9, fi + d * 80.0) as f32;
            let child = BranchSeed {
                start: b.start + (end - b.start) * along,
                angle: b.angle + rng.range(-0.7, 0.7, fi + d * 50.0) as f32,
                length: b.length * rng.range(0.55, 0.8, fi + d * 60.0) as f32,
                thickness: (b.thickness * rng.range(0.5, 0.7, fi + d * 70.0) as f32).max(1.0),
                depth: b.depth - 1,
                seed: b.seed + fi * SIBLING_SEED_STEP,
            };
            if let Some(child_idx) = self.trace_branch(Some(idx), child) {
                self.nodes[idx].children.push(child_idx);
            }
        }

        Some(idx)
    }
}

/// Stroke every branch and stamp bark
pub fn render_branches(canvas: &mut Canvas, skeleton: &TreeSkeleton, palette: &Palette) {
    for node in skeleton.nodes() {
        canvas.set_fill_color(palette.dark_bark);
        canvas.stroke_line(node.start, node.end, node.thickness);
        if let Some(bark) = node.bark {
            canvas.set_fill_color(palette.old_wood);
            canvas.fill_rect(bark.x, bark.y, bark.w, bark.h);
        }
    }
}

/// Scatter leaves along every branch at `density`
pub fn render_leaves(canvas: &mut Canvas, skeleton: &TreeSkeleton, palette: &Palette, density: f32) {
    if !(density > 0.0) {
        return;
    }
    for node in skeleton.nodes() {
        let rng = node.stream();
        let d = node.depth as f64;
        for i in 0..node.leaf_count(density) {
            let fi = i as f64;
            let pos = node.point_at(rng.range(0.3, 1.0, fi + d * 200.0) as f32);
            let leaf_angle = rng.range(0.0, TAU as f64, fi + d * 300.0) as f32;
            let leaf_size = rng.range(2.0, 5.0, fi + d * 400.0) as f32 * density;

            let choice = rng.unit(fi + d * 500.0);
            let tone = if choice < 0.65 {
                Tone::ForestGreen
            } else if choice < 0.9 {
                Tone::DarkGrass
            } else {
                Tone::ShadowGreen
            };
            canvas.set_fill_color(palette.tone(tone));
            canvas.fill_arc(pos.x, pos.y, leaf_size, leaf_angle, leaf_angle + PI);

            if rng.chance_above(0.8, fi + d * 600.0) {
                canvas.set_fill(palette.dark_grass, 0.6);
                canvas.fill_ellipse(pos.x, pos.y, leaf_size, leaf_size * 0.6);
            }
        }
    }
}

/// Procedural tree sprite generator
#[derive(Debug, Clone, Default)]
pub struct TreeGenerator {
    base_seed: f64,
    params: TreeParams,
}

impl TreeGenerator {
    /// Create a generator with default parameters
    pub fn new(base_seed: f64) -> Self {
        Self { base_seed, params: TreeParams::default() }
    }

    /// Create generator with specific parameters
    pub fn with_params(base_seed: f64, params: TreeParams) -> Self {
        Self { base_seed, params }
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Seed for one variation
    pub fn variation_seed(&self, variation: u32) -> f64 {
        self.base_seed + variation as f64 * 123.456 + 789.0
    }

    /// Overall scale of a variation (cycles through 0.85, 0.95, 1.05)
    pub fn size_variation(&self, variation: u32) -> f32 {
        0.85 + (variation % 3) as f32 * 0.1
    }

    fn trunk_base(&self) -> Vec2 {
        Vec2::new(self.params.width as f32 / 2.0, self.params.height as f32 - self.params.base_margin)
    }

    /// Trace the full branch structure of one variation
    pub fn skeleton(&self, variation: u32) -> TreeSkeleton {
        let seed = self.variation_seed(variation);
        let size = self.size_variation(variation);
        let rng = SeedStream::new(seed);
        let base = self.trunk_base();
        let trunk_height = self.params.height as f32 * self.params.trunk_height_ratio;
        let up = -FRAC_PI_2;

        let mut skeleton = TreeSkeleton::default();

        // Main trunk
        skeleton.trace(BranchSeed {
            start: base,
            angle: up,
            length: trunk_height * 0.4,
            thickness: 10.0 * size,
            depth: self.params.trunk_depth,
            seed,
        });

        // Thick base branches
        let base_count = 2 + rng.count(0, 2, 11.0);
        for i in 0..base_count {
            let fi = i as f64;
            skeleton.trace(BranchSeed {
                start: Vec2::new(base.x, base.y - rng.range(5.0, 15.0, fi + 50.0) as f32),
                angle: up + rng.range(-0.4, 0.4, fi + 20.0) as f32,
                length: trunk_height * rng.range(0.35, 0.45, fi + 30.0) as f32,
                thickness: rng.range(8.0, 11.0, fi + 40.0) as f32 * size,
                depth: self.params.trunk_depth,
                seed: seed + fi * 100.0,
            });
        }

        // Branches spreading from mid-trunk
        let mid_count = 6 + rng.count(0, 4, 61.0);
        for i in 0..mid_count {
            let fi = i as f64;
            let side = if rng.unit(fi + 80.0) < 0.5 { -1.0 } else { 1.0 };
            skeleton.trace(BranchSeed {
                start: Vec2::new(
                    base.x + rng.range(-6.0, 6.0, fi + 120.0) as f32,
                    base.y - trunk_height * rng.range(0.2, 0.7, fi + 70.0) as f32,
                ),
                angle: side * rng.range(0.4, 1.3, fi + 90.0) as f32 + up,
                length: rng.range(20.0, 40.0, fi + 100.0) as f32 * size,
                thickness: rng.range(5.0, 8.0, fi + 110.0) as f32,
                depth: self.params.mid_depth,
                seed: seed + fi * 150.0,
            });
        }

        log::debug!(
            "tree v{}: {} base + {} mid branches, {} nodes",
            variation,
            base_count,
            mid_count,
            skeleton.len()
        );
        skeleton
    }

    /// Render one depletion state from a traced skeleton
    pub fn render(&self, palette: &Palette, skeleton: &TreeSkeleton, variation: u32, state: DepletionState) -> RasterSurface {
        let mut canvas = Canvas::new(self.params.width, self.params.height);
        match self.params.density_for(state) {
            Some(density) => {
                render_branches(&mut canvas, skeleton, palette);
                render_leaves(&mut canvas, skeleton, palette, density);
            }
            None => self.draw_stump(&mut canvas, palette, variation),
        }
        let key = TextureKey::Tree { state: state.value(), variation };
        RasterSurface::new(key, canvas.into_image())
    }

    /// Cut stump: bark block topped by concentric rings
    fn draw_stump(&self, canvas: &mut Canvas, palette: &Palette, variation: u32) {
        let w = self.params.stump_width * self.size_variation(variation);
        let x = self.params.width as f32 / 2.0;
        let y = self.params.height as f32 - 40.0;

        canvas.set_fill_color(palette.dark_bark);
        canvas.fill_rect(x - w / 2.0, y, w, self.params.stump_height);

        let rings = [
            (Tone::EarthBrown, 2.0),
            (Tone::OldWood, 2.5),
            (Tone::DarkBark, 3.5),
            (Tone::DarkBark, 6.0),
        ];
        for (tone, divisor) in rings {
            canvas.set_fill_color(palette.tone(tone));
            canvas.fill_circle(x, y, w / divisor);
        }
    }

    /// Draw one state of one variation
    pub fn generate(&self, palette: &Palette, variation: u32, state: DepletionState) -> RasterSurface {
        if state.is_barren() {
            return self.render(palette, &TreeSkeleton::default(), variation, state);
        }
        let skeleton = self.skeleton(variation);
        self.render(palette, &skeleton, variation, state)
    }

    /// Draw all four states of one variation, ordered full to stump
    pub fn generate_states(&self, palette: &Palette, variation: u32) -> Vec<RasterSurface> {
        let skeleton = self.skeleton(variation);
        DepletionState::ALL_DESCENDING
            .iter()
            .map(|&state| self.render(palette, &skeleton, variation, state))
            .collect()
    }

    /// Draw every state of variations `0..count`
    pub fn generate_all(&self, palette: &Palette, count: u32) -> Vec<RasterSurface> {
        (0..count).flat_map(|v| self.generate_states(palette, v)).collect()
    }
}
