//! dk-core: Core combat and map-query logic for a dungeon skirmish game
//!
//! This crate contains the simulation with no I/O dependencies: the tile
//! grid and its spatial queries, creatures with skills, timed effects and
//! action stacks, and the turn driver tying them together. Rendering,
//! audio and networking consume the event stream; nothing here touches
//! them directly.

pub mod action;
pub mod creature;
pub mod effect;
pub mod entity;
pub mod game;
pub mod map;
pub mod skill;
pub mod stream;

pub use stream::{FieldReader, LoadError, ParseError};
