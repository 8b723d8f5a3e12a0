//! Depletion counters and the harvest transition

use std::fmt;

use serde::{Deserialize, Serialize};

use super::object::{ObjectKind, WorldObject};
use crate::config::HarvestConfig;
use crate::sprite::registry::TextureKey;

/// How many harvests an object has left
///
/// Starts at `FULL` and only ever counts down to `BARREN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepletionState(u8);

impl DepletionState {
    pub const FULL: Self = Self(3);
    pub const BARREN: Self = Self(0);

    /// Every state from full down to barren
    pub const ALL_DESCENDING: [Self; 4] = [Self(3), Self(2), Self(1), Self(0)];

    /// State clamped to `0..=3`
    pub const fn new(value: u8) -> Self {
        if value > Self::FULL.0 { Self::FULL } else { Self(value) }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_barren(self) -> bool {
        self.0 == 0
    }

    /// One step closer to barren, or `None` if already barren
    pub fn decremented(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl Default for DepletionState {
    fn default() -> Self {
        Self::FULL
    }
}

/// Resources the player can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Berries,
    Wood,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Berries => write!(f, "berries"),
            Self::Wood => write!(f, "wood"),
        }
    }
}

/// Amount granted per harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldTable {
    pub berries: u32,
    pub wood: u32,
}

impl Default for YieldTable {
    fn default() -> Self {
        Self { berries: 3, wood: 5 }
    }
}

impl From<&HarvestConfig> for YieldTable {
    fn from(config: &HarvestConfig) -> Self {
        Self { berries: config.berry_yield, wood: config.wood_yield }
    }
}

impl YieldTable {
    /// Resource and amount a harvest of `kind` grants
    pub fn for_kind(&self, kind: ObjectKind) -> Option<(ResourceKind, u32)> {
        match kind {
            ObjectKind::Bush => Some((ResourceKind::Berries, self.berries)),
            ObjectKind::Tree => Some((ResourceKind::Wood, self.wood)),
            ObjectKind::Rock | ObjectKind::House => None,
        }
    }
}

/// Result of one successful harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub resource: ResourceKind,
    pub amount: u32,
    pub new_state: DepletionState,
    /// Texture the object should now display
    pub texture_key: TextureKey,
}

/// Harvest `object` once
///
/// Decrements its depletion state and reports the yield plus the texture to
/// switch to. Returns `None` without touching the object when it is barren
/// or its kind can't be harvested.
pub fn harvest(object: &mut WorldObject, yields: &YieldTable) -> Option<HarvestOutcome> {
    let (resource, amount) = yields.for_kind(object.kind)?;
    let new_state = object.depletion?.decremented()?;
    object.depletion = Some(new_state);

    Some(HarvestOutcome {
        resource,
        amount,
        new_state,
        texture_key: TextureKey::for_object(object.kind, new_state.value(), object.variation),
    })
}

/// Running totals of collected resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTally {
    pub berries: u32,
    pub wood: u32,
}

impl ResourceTally {
    pub fn add(&mut self, resource: ResourceKind, amount: u32) {
        match resource {
            ResourceKind::Berries => self.berries = self.berries.saturating_add(amount),
            ResourceKind::Wood => self.wood = self.wood.saturating_add(amount),
        }
    }

    pub fn record(&mut self, outcome: &HarvestOutcome) {
        self.add(outcome.resource, outcome.amount);
    }

    pub fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Berries => self.berries,
            ResourceKind::Wood => self.wood,
        }
    }
}

impl fmt::Display for ResourceTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Berries: {}  Wood: {}", self.berries, self.wood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::object::ObjectId;
    use glam::Vec2;

    fn object(kind: ObjectKind) -> WorldObject {
        WorldObject::new(ObjectId(0), kind, Vec2::ZERO, 1)
    }

    #[test]
    fn test_state_clamped() {
        assert_eq!(DepletionState::new(9), DepletionState::FULL);
        assert_eq!(DepletionState::new(2).value(), 2);
        assert_eq!(DepletionState::BARREN.decremented(), None);
    }

    #[test]
    fn test_bush_three_harvests() {
        let mut bush = object(ObjectKind::Bush);
        let yields = YieldTable::default();
        let mut tally = ResourceTally::default();

        for expected in [2, 1, 0] {
            let outcome = harvest(&mut bush, &yields).unwrap();
            assert_eq!(outcome.new_state.value(), expected);
            assert_eq!(outcome.texture_key.to_string(), format!("berry-bush-{expected}"));
            tally.record(&outcome);
        }
        assert_eq!(tally.berries, 9);
        assert_eq!(bush.depletion, Some(DepletionState::BARREN));

        assert!(harvest(&mut bush, &yields).is_none());
        assert_eq!(bush.depletion, Some(DepletionState::BARREN));
    }

    #[test]
    fn test_tree_yields_wood_and_keeps_variation() {
        let mut tree = object(ObjectKind::Tree);
        let outcome = harvest(&mut tree, &YieldTable::default()).unwrap();
        assert_eq!(outcome.resource, ResourceKind::Wood);
        assert_eq!(outcome.amount, 5);
        assert_eq!(outcome.texture_key.to_string(), "tree-2-v1");
    }

    #[test]
    fn test_rock_and_house_not_harvestable() {
        for kind in [ObjectKind::Rock, ObjectKind::House] {
            let mut obj = object(kind);
            assert!(harvest(&mut obj, &YieldTable::default()).is_none());
            assert_eq!(obj.depletion, None);
        }
    }

    #[test]
    fn test_depletion_monotonic() {
        let mut tree = object(ObjectKind::Tree);
        let mut last = tree.depletion.unwrap();
        for _ in 0..10 {
            harvest(&mut tree, &YieldTable::default());
            let now = tree.depletion.unwrap();
            assert!(now <= last);
            last = now;
        }
        assert!(last.is_barren());
    }

    #[test]
    fn test_tally_summary() {
        let mut tally = ResourceTally::default();
        tally.add(ResourceKind::Berries, 6);
        tally.add(ResourceKind::Wood, 5);
        assert_eq!(tally.to_string(), "Berries: 6  Wood: 5");
        assert_eq!(tally.get(ResourceKind::Wood), 5);
    }
}
