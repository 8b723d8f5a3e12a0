//! Typed world object records

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::depletion::DepletionState;
use crate::sprite::registry::TextureKey;

/// Kind of world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    Tree,
    Rock,
    Bush,
    House,
}

impl ObjectKind {
    /// Whether objects of this kind carry a depletion counter
    pub fn is_depletable(self) -> bool {
        matches!(self, Self::Tree | Self::Bush)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Rock => "rock",
            Self::Bush => "bush",
            Self::House => "house",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable handle of an object within its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// A placed object
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec2,
    /// Texture variation, fixed at creation
    pub variation: u32,
    /// `None` for kinds that never deplete
    pub depletion: Option<DepletionState>,
}

impl WorldObject {
    /// Create an object; depletable kinds start full
    pub fn new(id: ObjectId, kind: ObjectKind, position: Vec2, variation: u32) -> Self {
        Self {
            id,
            kind,
            position,
            variation,
            depletion: kind.is_depletable().then_some(DepletionState::FULL),
        }
    }

    /// Texture this object currently displays
    pub fn texture_key(&self) -> TextureKey {
        let state = self.depletion.unwrap_or(DepletionState::FULL);
        TextureKey::for_object(self.kind, state.value(), self.variation)
    }

    /// True when a harvest would succeed
    pub fn is_harvestable(&self) -> bool {
        self.depletion.is_some_and(|s| !s.is_barren())
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}
