//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Speeds are
//! per-tick increments, so motion is coupled to the fixed 60 Hz step by
//! design; the driver is responsible for calling this at that cadence.

use glam::Vec2;
use rand::Rng;

use super::collision::collides;
use super::state::{GamePhase, GameState, Motion, SimEvent};
use crate::combo_multiplier;
use crate::consts::*;

/// How far off-screen a wrapping obstacle travels before re-entering
const WRAP_MARGIN: f32 = 50.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Active direction flags (keyboard state unioned with the confirmed
    /// gesture, mapped by the driver)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Hyper-speed while held
    pub boost: bool,
    /// Unit movement vector when analog control is enabled and a pointing
    /// vector is live; takes precedence over the direction flags
    pub analog: Option<Vec2>,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep, returning the events the
/// presentation layer needs to react to.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::LevelComplete => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    update_player(state, input);
    update_obstacles(state);
    state.effects.tick_down();
    resolve_collisions(state, &mut events);
    check_win(state, &mut events);

    events
}

/// Integrate player movement from direction flags or the analog vector,
/// clamped to the field on both axes independently.
fn update_player(state: &mut GameState, input: &TickInput) {
    let base = if input.boost {
        state.player.hyper_speed
    } else {
        state.player.speed * state.effects.speed_multiplier()
    };
    let step = base * state.effects.time_multiplier();

    let rect = &mut state.player.rect;
    if let Some(dir) = input.analog {
        rect.x += dir.x * step;
        rect.y += dir.y * step;
    } else {
        // Opposing flags both apply and cancel; accepted behavior
        if input.up {
            rect.y -= step;
        }
        if input.down {
            rect.y += step;
        }
        if input.left {
            rect.x -= step;
        }
        if input.right {
            rect.x += step;
        }
    }
    rect.clamp_to_field(FIELD_WIDTH, FIELD_HEIGHT);

    state.player.record_trail();
}

/// Advance every obstacle under its motion policy.
fn update_obstacles(state: &mut GameState) {
    let tm = state.effects.time_multiplier();
    let player_center = state.player.rect.center();
    let rng = &mut state.rng;

    for ob in state.obstacles.iter_mut() {
        match &mut ob.motion {
            Motion::LinearBounce { velocity } => {
                ob.rect.x += velocity.x * tm;
                ob.rect.y += velocity.y * tm;
                // Crossing test, not containment, so a reflected obstacle
                // cannot re-trigger and stick on the boundary
                if ob.rect.x <= 0.0 || ob.rect.x >= FIELD_WIDTH - ob.rect.width {
                    velocity.x = -velocity.x;
                }
                if ob.rect.y <= 0.0 || ob.rect.y >= FIELD_HEIGHT - ob.rect.height {
                    velocity.y = -velocity.y;
                }
            }
            Motion::Orbit {
                center,
                radius,
                angle,
                angular_speed,
            } => {
                *angle += *angular_speed * tm;
                let pos = *center + *radius * Vec2::new(angle.cos(), angle.sin());
                ob.rect.set_center(pos);
            }
            Motion::OscillatingWall {
                speed_y,
                min_y,
                max_y,
            } => {
                ob.rect.y += *speed_y * tm;
                if ob.rect.y <= *min_y || ob.rect.y >= *max_y {
                    *speed_y = -*speed_y;
                }
                // Hard clamp so reflection overshoot cannot drift the wall
                // out of its band
                ob.rect.y = ob.rect.y.clamp(*min_y, *max_y);
            }
            Motion::Follower { speed } => {
                let delta = player_center - ob.rect.center();
                let dist = delta.length();
                if dist > 0.0 {
                    let step = delta / dist * *speed * tm;
                    ob.rect.x += step.x;
                    ob.rect.y += step.y;
                }
            }
            Motion::Blinking { interval, timer } => {
                *timer += 1;
                if *timer >= *interval {
                    ob.visible = !ob.visible;
                    *timer = 0;
                }
            }
            Motion::Quantum { interval, timer } => {
                *timer += 1;
                if *timer >= *interval {
                    ob.rect.x = rng.random::<f32>() * (FIELD_WIDTH - ob.rect.width);
                    ob.rect.y = rng.random::<f32>() * (FIELD_HEIGHT - ob.rect.height);
                    *timer = 0;
                }
            }
            Motion::Zigzag {
                velocity,
                vertical_dir,
                min_y,
                max_y,
            } => {
                ob.rect.x += velocity.x * tm;
                ob.rect.y += velocity.y * *vertical_dir * tm;
                // Vertical reflection band is independent of the horizontal
                // bounce
                if ob.rect.y <= *min_y || ob.rect.y >= *max_y {
                    *vertical_dir = -*vertical_dir;
                }
                if ob.rect.x <= 0.0 || ob.rect.x >= FIELD_WIDTH - ob.rect.width {
                    velocity.x = -velocity.x;
                }
            }
            Motion::ScreenWrap { velocity } => {
                ob.rect.x += velocity.x * tm;
                ob.rect.y += velocity.y * tm;
                if velocity.x > 0.0 && ob.rect.x > FIELD_WIDTH + WRAP_MARGIN {
                    ob.rect.x = -WRAP_MARGIN;
                } else if velocity.x < 0.0 && ob.rect.x < -WRAP_MARGIN {
                    ob.rect.x = FIELD_WIDTH + WRAP_MARGIN;
                }
                if velocity.y > 0.0 && ob.rect.y > FIELD_HEIGHT + WRAP_MARGIN {
                    ob.rect.y = -WRAP_MARGIN;
                } else if velocity.y < 0.0 && ob.rect.y < -WRAP_MARGIN {
                    ob.rect.y = FIELD_HEIGHT + WRAP_MARGIN;
                }
            }
        }
    }
}

/// Collision resolution in fixed order: obstacles, then collectibles, then
/// power-ups. The order is observable through event sequencing.
fn resolve_collisions(state: &mut GameState, events: &mut Vec<SimEvent>) {
    let player_rect = state.player.rect;

    let mut died = false;
    for ob in &state.obstacles {
        // Invisible blinkers are intangible
        if !ob.visible {
            continue;
        }
        if collides(&player_rect, &ob.rect) {
            if state.effects.shield_active() {
                // Absorbed silently; no event, no reset
                continue;
            }
            died = true;
            break;
        }
    }
    if died {
        state.deaths += 1;
        state.combo = 0;
        state.player.respawn(state.spawn);
        events.push(SimEvent::PlayerDied);
        log::debug!("player died (death #{})", state.deaths);
    }

    // Collectibles persist across deaths; only the position just possibly
    // reset above is used for the remaining checks
    let player_rect = state.player.rect;
    let now = state.time_ticks;
    for c in state.collectibles.iter_mut() {
        if !c.collected && collides(&player_rect, &c.rect) {
            c.collected = true;
            if state.combo > 0 && now - state.last_pickup_tick <= COMBO_WINDOW_TICKS {
                state.combo += 1;
            } else {
                state.combo = 1;
            }
            state.last_pickup_tick = now;
            let points = (COLLECTIBLE_POINTS * combo_multiplier(state.combo)) as u32;
            state.score += points as u64;
            events.push(SimEvent::ItemCollected { points });
        }
    }

    for p in state.power_ups.iter_mut() {
        if !p.collected && collides(&player_rect, &p.rect) {
            p.collected = true;
            state.effects.activate(p.kind);
            events.push(SimEvent::PowerUpCollected { kind: p.kind });
        }
    }
}

/// Level is cleared when the player overlaps the goal with every collectible
/// gathered. Checked after all collisions so a same-tick final pickup
/// counts.
fn check_win(state: &mut GameState, events: &mut Vec<SimEvent>) {
    if collides(&state.player.rect, &state.goal.rect) && state.all_collected() {
        state.phase = GamePhase::LevelComplete;
        events.push(SimEvent::LevelCompleted {
            elapsed_secs: state.level_elapsed_secs(),
            deaths: state.deaths,
        });
        log::info!(
            "level {} complete in {:.2}s with {} deaths",
            state.level,
            state.level_elapsed_secs(),
            state.deaths
        );
    }
}
