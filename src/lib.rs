//! Geselle - seeded sprite generation and harvesting for a top-down survival game
//!
//! Textures for every world object are generated once from a seed into a
//! [`sprite::TextureRegistry`]. At runtime a [`world::Harvester`] turns
//! per-frame input into depletion changes, yields and texture swaps.

pub mod core;
pub mod config;
pub mod sprite;
pub mod world;
