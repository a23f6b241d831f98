//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{self, LevelSpec};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Level cleared, waiting for restart/advance input
    LevelComplete,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Base movement speed (field units per tick)
    pub speed: f32,
    /// Boosted speed while the boost flag is held
    pub hyper_speed: f32,
    /// Recent positions for rendering (newest last)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            rect: Rect::new(spawn.x, spawn.y, PLAYER_SIZE, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            hyper_speed: PLAYER_HYPER_SPEED,
            trail: Vec::with_capacity(PLAYER_TRAIL_LENGTH),
        }
    }

    /// Record current position to the trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.push(Vec2::new(self.rect.x, self.rect.y));
        if self.trail.len() > PLAYER_TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    /// Snap back to a spawn point (on death)
    pub fn respawn(&mut self, spawn: Vec2) {
        self.rect.x = spawn.x;
        self.rect.y = spawn.y;
        self.trail.clear();
    }
}

/// Motion policy an obstacle is tagged with. Each variant carries only the
/// fields its policy needs; `tick` dispatches over the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Integrate velocity, reflect the crossed component at field edges
    LinearBounce { velocity: Vec2 },
    /// Orbit the rect's center around an explicit anchor point
    Orbit {
        center: Vec2,
        radius: f32,
        angle: f32,
        angular_speed: f32,
    },
    /// Vertical-only bounce inside [min_y, max_y], hard-clamped after
    /// reflection so overshoot cannot drift
    OscillatingWall { speed_y: f32, min_y: f32, max_y: f32 },
    /// Home toward the player's current position at fixed scalar speed
    Follower { speed: f32 },
    /// Toggle visibility every `interval` ticks; invisible means intangible
    Blinking { interval: u32, timer: u32 },
    /// Teleport to a uniformly random in-bounds position every `interval`
    /// ticks
    Quantum { interval: u32, timer: u32 },
    /// Horizontal bounce plus an independent vertically-reflecting component
    Zigzag {
        velocity: Vec2,
        vertical_dir: f32,
        min_y: f32,
        max_y: f32,
    },
    /// Constant linear motion that wraps across the field edges
    ScreenWrap { velocity: Vec2 },
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub motion: Motion,
    /// Toggled by `Blinking`; always true for other policies
    pub visible: bool,
}

/// A pickup the player must gather before the goal opens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub rect: Rect,
    pub collected: bool,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Speed,
    SlowMotion,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Speed => "speed",
            PowerUpKind::SlowMotion => "slow_motion",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// The level exit zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

/// Active power-up effects, each expiring on its own countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_ticks: u32,
    pub speed_ticks: u32,
    pub slow_ticks: u32,
}

impl ActiveEffects {
    pub fn activate(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield_ticks = SHIELD_DURATION_TICKS,
            PowerUpKind::Speed => self.speed_ticks = SPEED_DURATION_TICKS,
            PowerUpKind::SlowMotion => self.slow_ticks = SLOW_DURATION_TICKS,
        }
    }

    /// Decay all countdowns by one tick
    pub fn tick_down(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.speed_ticks = self.speed_ticks.saturating_sub(1);
        self.slow_ticks = self.slow_ticks.saturating_sub(1);
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Player speed scale from the speed power-up
    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        if self.speed_ticks > 0 { SPEED_MULTIPLIER } else { 1.0 }
    }

    /// Global motion scale from the slow-motion power-up
    #[inline]
    pub fn time_multiplier(&self) -> f32 {
        if self.slow_ticks > 0 { SLOW_MULTIPLIER } else { 1.0 }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Simulation events for the presentation layer (rendering/audio/progress),
/// returned from `tick` for the caller to dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    PlayerDied,
    ItemCollected { points: u32 },
    PowerUpCollected { kind: PowerUpKind },
    LevelCompleted { elapsed_secs: f32, deaths: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG for quantum teleports, generated levels, and power-up placement
    pub rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    /// Deaths on the current level
    pub deaths: u32,
    /// Score
    pub score: u64,
    /// Consecutive-pickup counter
    pub combo: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick the current level started at
    pub level_start_tick: u64,
    /// Tick of the most recent pickup (for the combo window)
    pub last_pickup_tick: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player spawn point for the current level
    pub spawn: Vec2,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub goal: Goal,
    pub effects: ActiveEffects,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            deaths: 0,
            score: 0,
            combo: 0,
            time_ticks: 0,
            level_start_tick: 0,
            last_pickup_tick: 0,
            phase: GamePhase::Playing,
            spawn: Vec2::new(50.0, 300.0),
            player: Player::new(Vec2::new(50.0, 300.0)),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            goal: Goal {
                rect: Rect::new(
                    FIELD_WIDTH - 80.0,
                    FIELD_HEIGHT / 2.0 - GOAL_HEIGHT / 2.0,
                    GOAL_WIDTH,
                    GOAL_HEIGHT,
                ),
            },
            effects: ActiveEffects::default(),
            next_id: 1,
        };
        state.init_level();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// (Re)build all entities for the current level number
    pub fn init_level(&mut self) {
        let spec = level::level_spec(self.level, &mut self.rng);
        self.load_level(&spec);
        log::info!(
            "level {} loaded: {} obstacles, {} collectibles, {} power-ups",
            self.level,
            self.obstacles.len(),
            self.collectibles.len(),
            self.power_ups.len()
        );
    }

    /// Populate entities from a level descriptor
    pub fn load_level(&mut self, spec: &LevelSpec) {
        self.obstacles.clear();
        self.collectibles.clear();
        self.power_ups.clear();
        self.effects.clear();

        self.spawn = spec.spawn;
        self.player.respawn(spec.spawn);
        self.goal = Goal { rect: spec.goal };
        self.level_start_tick = self.time_ticks;
        self.combo = 0;

        for ob in &spec.obstacles {
            let id = self.next_entity_id();
            self.obstacles.push(Obstacle {
                id,
                rect: ob.rect,
                motion: ob.motion,
                visible: true,
            });
        }
        for &rect in &spec.collectibles {
            let id = self.next_entity_id();
            self.collectibles.push(Collectible {
                id,
                rect,
                collected: false,
            });
        }

        // Random power-up placement, deterministic per run seed
        let placements = level::roll_power_ups(&mut self.rng);
        for (kind, rect) in placements {
            let id = self.next_entity_id();
            self.power_ups.push(PowerUp {
                id,
                rect,
                kind,
                collected: false,
            });
        }

        self.phase = GamePhase::Playing;
    }

    /// Restart the current level from scratch; deaths, score, and combo all
    /// reset along with the per-level clock
    pub fn restart(&mut self) {
        self.deaths = 0;
        self.score = 0;
        self.combo = 0;
        self.init_level();
    }

    /// Move on to the next level (wraps back to 1 past the last)
    pub fn advance_level(&mut self) {
        self.level = if self.level >= MAX_LEVELS { 1 } else { self.level + 1 };
        self.deaths = 0;
        self.init_level();
    }

    /// Seconds spent on the current level
    pub fn level_elapsed_secs(&self) -> f32 {
        (self.time_ticks - self.level_start_tick) as f32 * SIM_DT
    }

    /// True once every collectible on the level has been gathered
    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_expire_independently() {
        let mut fx = ActiveEffects::default();
        fx.activate(PowerUpKind::Speed);
        fx.activate(PowerUpKind::SlowMotion);
        assert_eq!(fx.speed_multiplier(), SPEED_MULTIPLIER);
        assert_eq!(fx.time_multiplier(), SLOW_MULTIPLIER);

        for _ in 0..SPEED_DURATION_TICKS {
            fx.tick_down();
        }
        assert_eq!(fx.speed_multiplier(), 1.0);
        // Slow-motion outlives the speed boost
        assert_eq!(fx.time_multiplier(), SLOW_MULTIPLIER);

        for _ in 0..(SLOW_DURATION_TICKS - SPEED_DURATION_TICKS) {
            fx.tick_down();
        }
        assert_eq!(fx.time_multiplier(), 1.0);
    }

    #[test]
    fn new_game_has_one_player_one_goal_and_content() {
        let state = GameState::new(7);
        assert_eq!(state.level, 1);
        assert!(!state.collectibles.is_empty());
        assert!(!state.obstacles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.rect.x, state.spawn.x);
    }

    #[test]
    fn same_seed_builds_identical_levels() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.power_ups.len(), b.power_ups.len());
        for (pa, pb) in a.power_ups.iter().zip(&b.power_ups) {
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.rect, pb.rect);
        }
    }

    #[test]
    fn advance_wraps_past_last_level() {
        let mut state = GameState::new(1);
        state.level = MAX_LEVELS;
        state.advance_level();
        assert_eq!(state.level, 1);
    }
}
