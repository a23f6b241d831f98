//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input, or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{collides, Rect};
pub use level::{level_spec, LevelSpec, ObstacleSpec};
pub use state::{
    ActiveEffects, Collectible, GamePhase, GameState, Goal, Motion, Obstacle, Player, PowerUp,
    PowerUpKind, SimEvent,
};
pub use tick::{tick, TickInput};
