//! Core data models for player statistics.

mod battle;
mod ids;
mod player;
mod summary;

pub use battle::*;
pub use ids::*;
pub use player::*;
pub use summary::*;
