//! Timer-driven enemy creation with duplicate-word avoidance.

use rand::Rng;

use crate::config::{GameConfig, Vocabulary};
use crate::sim::entities::{EnemyKind, SpawnSide};

/// Accumulates frame time and says when a spawn attempt is due.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub timer_ms: f64,
    pub interval_ms: f64,
}

/// What a successful attempt should create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPlan {
    pub word: String,
    pub side: SpawnSide,
    pub kind: EnemyKind,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms,
        }
    }

    /// Advances the timer; returns true when an attempt is due. The timer is
    /// reset whether or not the attempt produces an enemy.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.timer_ms += dt_ms;
        if self.timer_ms > self.interval_ms {
            self.timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// Shortens the interval by one step without going under the floor.
    pub fn tighten(&mut self, step_ms: f64, floor_ms: f64) {
        self.interval_ms = (self.interval_ms - step_ms).max(floor_ms);
    }
}

/// Rolls a word and a side/kind. `None` when the rolled word is already on
/// screen; the caller just waits for the next interval.
pub fn plan_spawn<'a, R: Rng>(
    vocabulary: &Vocabulary,
    mut alive_words: impl Iterator<Item = &'a str>,
    cfg: &GameConfig,
    rng: &mut R,
) -> Option<SpawnPlan> {
    let words = vocabulary.words();
    let word = &words[rng.gen_range(0..words.len())];
    if alive_words.any(|w| w == word.as_str()) {
        log::trace!("spawn skipped: {word:?} already alive");
        return None;
    }
    let (kind, side) = if rng.gen_bool(cfg.flying_chance) {
        let side = match rng.gen_range(0.0..1.0) {
            r if r < 0.33 => SpawnSide::Top,
            r if r < 0.66 => SpawnSide::Left,
            _ => SpawnSide::Right,
        };
        (EnemyKind::Flying, side)
    } else {
        let side = if rng.gen_bool(0.5) {
            SpawnSide::Left
        } else {
            SpawnSide::Right
        };
        (EnemyKind::Ground, side)
    };
    Some(SpawnPlan {
        word: word.clone(),
        side,
        kind,
    })
}
