//! Target selection and the per-player harvest controller

use std::fmt;

use glam::Vec2;

use super::depletion::{HarvestOutcome, ResourceTally, YieldTable, harvest};
use super::object::{ObjectId, ObjectKind, WorldObject};
use super::session::{HarvestSession, SessionEvent};
use crate::config::HarvestConfig;

/// Spatial access the harvest controller needs from a world
pub trait ObjectQuery {
    /// Objects of `kind` strictly closer than `radius` to `position`, in
    /// list order
    fn objects_in_range(&self, position: Vec2, radius: f32, kind: ObjectKind) -> Vec<&WorldObject>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject>;
}

/// Prompt shown for the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPrompt {
    #[default]
    None,
    Collect,
    Chop,
}

impl InteractionPrompt {
    pub fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Bush => Self::Collect,
            ObjectKind::Tree => Self::Chop,
            ObjectKind::Rock | ObjectKind::House => Self::None,
        }
    }
}

impl fmt::Display for InteractionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Collect => write!(f, "Hold E to collect"),
            Self::Chop => write!(f, "Hold E to chop"),
        }
    }
}

/// Interaction radius per harvestable kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRanges {
    pub bush: f32,
    pub tree: f32,
}

impl Default for InteractionRanges {
    fn default() -> Self {
        Self { bush: 50.0, tree: 80.0 }
    }
}

impl From<&HarvestConfig> for InteractionRanges {
    fn from(config: &HarvestConfig) -> Self {
        Self { bush: config.bush_range, tree: config.tree_range }
    }
}

/// Kinds scanned for targets, in priority order
const SCAN_ORDER: [ObjectKind; 2] = [ObjectKind::Bush, ObjectKind::Tree];

impl InteractionRanges {
    pub fn for_kind(&self, kind: ObjectKind) -> Option<f32> {
        match kind {
            ObjectKind::Bush => Some(self.bush),
            ObjectKind::Tree => Some(self.tree),
            ObjectKind::Rock | ObjectKind::House => None,
        }
    }
}

/// First harvestable object in range: bushes before trees, list order
/// within each kind
pub fn find_target<'a, Q: ObjectQuery>(world: &'a Q, position: Vec2, ranges: &InteractionRanges) -> Option<&'a WorldObject> {
    SCAN_ORDER.iter().find_map(|&kind| {
        let radius = ranges.for_kind(kind)?;
        world
            .objects_in_range(position, radius, kind)
            .into_iter()
            .find(|o| o.is_harvestable())
    })
}

/// Drives one player's harvesting from per-frame input
#[derive(Debug, Clone)]
pub struct Harvester {
    session: HarvestSession,
    yields: YieldTable,
    ranges: InteractionRanges,
    tally: ResourceTally,
    prompt: InteractionPrompt,
}

impl Default for Harvester {
    fn default() -> Self {
        Self::new(&HarvestConfig::default())
    }
}

impl Harvester {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            session: HarvestSession::new(config.required_ms),
            yields: YieldTable::from(config),
            ranges: InteractionRanges::from(config),
            tally: ResourceTally::default(),
            prompt: InteractionPrompt::None,
        }
    }

    /// Advance one frame; returns the harvest that completed this frame
    pub fn update<Q: ObjectQuery>(
        &mut self,
        world: &mut Q,
        player_pos: Vec2,
        interact_held: bool,
        delta_ms: f32,
    ) -> Option<HarvestOutcome> {
        let target = find_target(&*world, player_pos, &self.ranges).map(|o| (o.id, o.kind));
        self.prompt = target.map_or(InteractionPrompt::None, |(_, kind)| InteractionPrompt::for_kind(kind));

        match self.session.tick(target.map(|(id, _)| id), interact_held, delta_ms)? {
            SessionEvent::Started(id) => {
                log::debug!("Harvest started on {:?}", id);
                None
            }
            SessionEvent::Cancelled { target, reason } => {
                log::debug!("Harvest of {:?} cancelled: {:?}", target, reason);
                None
            }
            SessionEvent::Completed(id) => {
                let object = world.object_mut(id)?;
                let outcome = harvest(object, &self.yields)?;
                self.tally.record(&outcome);
                log::info!(
                    "Harvested {} {} from {} {:?} -> {} ({})",
                    outcome.amount,
                    outcome.resource,
                    object.kind,
                    id,
                    outcome.texture_key,
                    self.tally
                );
                Some(outcome)
            }
        }
    }

    /// Charge progress in `[0, 1]`
    pub fn session_progress(&self) -> f32 {
        self.session.progress()
    }

    /// Prompt for the target found on the last update
    pub fn current_prompt(&self) -> InteractionPrompt {
        self.prompt
    }

    pub fn session(&self) -> &HarvestSession {
        &self.session
    }

    pub fn tally(&self) -> &ResourceTally {
        &self.tally
    }

    pub fn ranges(&self) -> &InteractionRanges {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;
    use crate::world::depletion::{DepletionState, ResourceKind};

    fn hold(harvester: &mut Harvester, world: &mut World, pos: Vec2, ms: f32) -> Vec<HarvestOutcome> {
        let mut outcomes = Vec::new();
        let mut elapsed = 0.0;
        while elapsed < ms {
            outcomes.extend(harvester.update(world, pos, true, 100.0));
            elapsed += 100.0;
        }
        outcomes
    }

    #[test]
    fn test_bushes_take_priority_over_trees() {
        let mut world = World::new(500.0, 500.0);
        let tree = world.spawn(ObjectKind::Tree, Vec2::new(100.0, 100.0), 0);
        let bush = world.spawn(ObjectKind::Bush, Vec2::new(130.0, 100.0), 0);
        let pos = Vec2::new(110.0, 100.0);
        assert_eq!(find_target(&world, pos, &InteractionRanges::default()).map(|o| o.id), Some(bush));

        world.object_mut(bush).unwrap().depletion = Some(DepletionState::BARREN);
        assert_eq!(find_target(&world, pos, &InteractionRanges::default()).map(|o| o.id), Some(tree));
    }

    #[test]
    fn test_range_is_per_kind_and_strict() {
        let mut world = World::new(500.0, 500.0);
        world.spawn(ObjectKind::Bush, Vec2::new(0.0, 0.0), 0);
        let tree = world.spawn(ObjectKind::Tree, Vec2::new(0.0, 200.0), 0);
        let ranges = InteractionRanges::default();

        assert!(find_target(&world, Vec2::new(50.0, 0.0), &ranges).is_none());
        assert!(find_target(&world, Vec2::new(49.0, 0.0), &ranges).is_some());
        assert_eq!(find_target(&world, Vec2::new(0.0, 130.0), &ranges).map(|o| o.id), Some(tree));
    }

    #[test]
    fn test_list_order_breaks_ties() {
        let mut world = World::new(500.0, 500.0);
        let first = world.spawn(ObjectKind::Bush, Vec2::new(40.0, 0.0), 0);
        world.spawn(ObjectKind::Bush, Vec2::new(1.0, 0.0), 0);
        assert_eq!(find_target(&world, Vec2::ZERO, &InteractionRanges::default()).map(|o| o.id), Some(first));
    }

    #[test]
    fn test_prompts() {
        let mut world = World::new(500.0, 500.0);
        world.spawn(ObjectKind::Tree, Vec2::new(300.0, 300.0), 0);
        world.spawn(ObjectKind::Bush, Vec2::new(100.0, 100.0), 0);
        world.spawn(ObjectKind::Rock, Vec2::new(400.0, 100.0), 0);
        let mut harvester = Harvester::default();

        harvester.update(&mut world, Vec2::new(100.0, 110.0), false, 16.0);
        assert_eq!(harvester.current_prompt(), InteractionPrompt::Collect);
        harvester.update(&mut world, Vec2::new(300.0, 250.0), false, 16.0);
        assert_eq!(harvester.current_prompt(), InteractionPrompt::Chop);
        harvester.update(&mut world, Vec2::new(400.0, 100.0), false, 16.0);
        assert_eq!(harvester.current_prompt(), InteractionPrompt::None);
    }

    #[test]
    fn test_bush_harvested_three_times() {
        let mut world = World::new(500.0, 500.0);
        let bush = world.spawn(ObjectKind::Bush, Vec2::new(100.0, 100.0), 0);
        let pos = Vec2::new(100.0, 120.0);
        let mut harvester = Harvester::default();

        // Each cycle: start tick, 3000 ms of charge, then one tick back to idle
        let outcomes = hold(&mut harvester, &mut world, pos, 3_100.0 * 4.0);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(harvester.tally().get(ResourceKind::Berries), 9);
        assert_eq!(world.get(bush).unwrap().depletion, Some(DepletionState::BARREN));
        assert_eq!(outcomes[2].texture_key.to_string(), "berry-bush-0");
        assert_eq!(harvester.current_prompt(), InteractionPrompt::None);
    }

    #[test]
    fn test_exactly_one_harvest_per_charge() {
        let mut world = World::new(500.0, 500.0);
        let tree = world.spawn(ObjectKind::Tree, Vec2::new(100.0, 100.0), 1);
        let pos = Vec2::new(100.0, 150.0);
        let mut harvester = Harvester::default();

        harvester.update(&mut world, pos, true, 0.0);
        let outcome = harvester.update(&mut world, pos, true, 5_000.0).unwrap();
        assert_eq!(outcome.texture_key.to_string(), "tree-2-v1");
        assert_eq!(harvester.session_progress(), 1.0);
        assert!(harvester.update(&mut world, pos, true, 5_000.0).is_none());
        assert_eq!(harvester.session_progress(), 0.0);
        assert_eq!(world.get(tree).unwrap().depletion, Some(DepletionState::new(2)));
        assert_eq!(harvester.tally().wood, 5);
    }

    #[test]
    fn test_target_change_leaves_first_target_untouched() {
        let mut world = World::new(500.0, 500.0);
        let a = world.spawn(ObjectKind::Bush, Vec2::new(100.0, 100.0), 0);
        let b = world.spawn(ObjectKind::Bush, Vec2::new(300.0, 100.0), 0);
        let mut harvester = Harvester::default();

        hold(&mut harvester, &mut world, Vec2::new(100.0, 110.0), 2_500.0);
        assert!(harvester.session_progress() > 0.7);

        let outcomes = hold(&mut harvester, &mut world, Vec2::new(300.0, 110.0), 1_000.0);
        assert!(outcomes.is_empty());
        assert_eq!(world.get(a).unwrap().depletion, Some(DepletionState::FULL));
        assert_eq!(world.get(b).unwrap().depletion, Some(DepletionState::FULL));
        assert!(harvester.session_progress() < 0.5);
    }
}
