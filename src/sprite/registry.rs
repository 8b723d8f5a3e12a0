//! Texture keys and the generated-texture registry

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::core::{Error, Result};
use crate::world::depletion::DepletionState;
use crate::world::object::ObjectKind;

/// Identifies one generated texture
///
/// The string form (via `Display`) is what a presentation layer uses:
/// `tree-2-v1`, `rock-v2`, `berry-bush-0`, `house`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKey {
    Tree { state: u8, variation: u32 },
    Rock { variation: u32 },
    /// Bushes share one recipe, so there is no variation
    BerryBush { state: u8 },
    House,
}

impl TextureKey {
    /// Key for an object of `kind` at `state` with `variation`
    ///
    /// States above full are clamped. Kinds that don't deplete ignore
    /// `state`; bushes and houses ignore `variation`.
    pub fn for_object(kind: ObjectKind, state: u8, variation: u32) -> Self {
        let state = state.min(DepletionState::FULL.value());
        match kind {
            ObjectKind::Tree => Self::Tree { state, variation },
            ObjectKind::Rock => Self::Rock { variation },
            ObjectKind::Bush => Self::BerryBush { state },
            ObjectKind::House => Self::House,
        }
    }

    /// Kind of object this texture depicts
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Tree { .. } => ObjectKind::Tree,
            Self::Rock { .. } => ObjectKind::Rock,
            Self::BerryBush { .. } => ObjectKind::Bush,
            Self::House => ObjectKind::House,
        }
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree { state, variation } => write!(f, "tree-{}-v{}", state, variation),
            Self::Rock { variation } => write!(f, "rock-v{}", variation),
            Self::BerryBush { state } => write!(f, "berry-bush-{}", state),
            Self::House => write!(f, "house"),
        }
    }
}

fn parse_state(s: &str) -> Option<u8> {
    s.parse::<u8>().ok().filter(|v| *v <= DepletionState::FULL.value())
}

fn parse_variation(s: &str) -> Option<u32> {
    s.strip_prefix('v')?.parse().ok()
}

impl FromStr for TextureKey {
    type Err = Error;

    /// Parses every form `Display` produces, plus the legacy tree alias
    /// `tree-<state>` which resolves to variation 0.
    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownTextureKey(s.to_string());

        if s == "house" {
            return Ok(Self::House);
        }
        if let Some(rest) = s.strip_prefix("berry-bush-") {
            return parse_state(rest).map(|state| Self::BerryBush { state }).ok_or_else(unknown);
        }
        if let Some(rest) = s.strip_prefix("rock-") {
            return parse_variation(rest).map(|variation| Self::Rock { variation }).ok_or_else(unknown);
        }
        if let Some(rest) = s.strip_prefix("tree-") {
            let mut parts = rest.splitn(2, '-');
            let state = parts.next().and_then(parse_state).ok_or_else(unknown)?;
            let variation = match parts.next() {
                Some(v) => parse_variation(v).ok_or_else(unknown)?,
                None => 0,
            };
            return Ok(Self::Tree { state, variation });
        }
        Err(unknown())
    }
}

/// A finished, immutable sprite
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    key: TextureKey,
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(key: TextureKey, image: RgbaImage) -> Self {
        Self { key, image }
    }

    pub fn key(&self) -> TextureKey {
        self.key
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Number of pixels with non-zero alpha
    pub fn coverage(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }
}

/// Generated textures keyed by `TextureKey`
///
/// Filled once at startup and read-only afterwards. Inserting an existing
/// key replaces the surface; surfaces are never patched in place.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    surfaces: HashMap<TextureKey, RasterSurface>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a surface under its own key, returning any surface it replaced
    pub fn insert(&mut self, surface: RasterSurface) -> Option<RasterSurface> {
        let replaced = self.surfaces.insert(surface.key(), surface);
        if let Some(old) = &replaced {
            log::debug!("Replaced texture {}", old.key());
        }
        replaced
    }

    pub fn get(&self, key: &TextureKey) -> Option<&RasterSurface> {
        self.surfaces.get(key)
    }

    pub fn contains(&self, key: &TextureKey) -> bool {
        self.surfaces.contains_key(key)
    }

    /// Resolve a string key from the presentation layer
    pub fn lookup(&self, key: &str) -> Result<&RasterSurface> {
        let parsed: TextureKey = key.parse()?;
        self.get(&parsed).ok_or_else(|| Error::UnknownTextureKey(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Keys in a stable order
    pub fn keys(&self) -> Vec<TextureKey> {
        let mut keys: Vec<TextureKey> = self.surfaces.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Surfaces in key order
    pub fn iter(&self) -> impl Iterator<Item = &RasterSurface> {
        self.keys().into_iter().filter_map(move |k| self.surfaces.get(&k))
    }
}
