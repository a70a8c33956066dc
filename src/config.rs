//! Tunable constants for a play session plus the vocabulary enemies draw from.
//!
//! Defaults reproduce the shipped balance: 2s spawn interval shrinking by 100ms
//! per level down to 500ms, 10 points per kill, a level every 100 points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration or vocabulary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must lie within [0, 1] (got {value})")]
    NotAProbability { field: &'static str, value: f64 },
    #[error("minimum spawn interval {floor}ms exceeds the initial interval {initial}ms")]
    FloorAboveInitial { floor: f64, initial: f64 },
    #[error("vocabulary is empty")]
    EmptyVocabulary,
    #[error("word {0:?} must be non-empty lowercase ascii")]
    InvalidWord(String),
    #[error("invalid config json: {0}")]
    Json(String),
}

/// Every number the simulation reads. Distances are canvas pixels, times are
/// milliseconds, speeds are pixels per second unless noted "per tick".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    // terrain
    pub ground_base_margin: f64,
    pub ground_amplitude: f64,
    pub ground_frequency: f64,
    pub terrain_scroll_speed: f64,
    pub background_scroll_speed: f64,
    /// Distance between a sprite's top edge and the ground line it stands on.
    pub sprite_ground_offset: f64,

    // spawning / difficulty
    pub spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub flying_chance: f64,
    pub level_threshold: u32,
    pub speed_multiplier_step: f64,

    // enemies
    pub enemy_size: f64,
    pub enemy_base_speed: f64,
    pub enemy_speed_per_level: f64,
    pub flying_speed_factor: f64,
    pub jump_trigger_range: f64,
    pub jump_impulse: f64,
    pub gravity: f64,
    pub spawn_offscreen_distance: f64,
    pub top_spawn_y: f64,
    pub cruise_altitude_min: f64,
    pub cruise_altitude_span: f64,
    pub frame_interval_ms: f64,

    // player
    pub player_size: f64,
    pub collision_half_extent: f64,
    pub ranged_attack_ms: f64,
    pub melee_attack_ms: f64,
    pub melee_range: f64,

    // projectiles
    pub projectile_speed: f64,
    pub projectile_hit_radius: f64,
    pub projectile_spin: f64,

    // scoring
    pub ranged_kill_reward: u32,
    pub melee_kill_reward: u32,

    // cosmetics
    pub particle_life_decay: f64,
    pub particle_gravity: f64,
    pub spark_count: usize,
    pub blood_count: usize,
    pub kill_shake: f64,
    pub shake_decay: f64,

    // input
    pub visibility_margin: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ground_base_margin: 100.0,
            ground_amplitude: 30.0,
            ground_frequency: 0.01,
            terrain_scroll_speed: 100.0,
            background_scroll_speed: 50.0,
            sprite_ground_offset: 100.0,

            spawn_interval_ms: 2000.0,
            spawn_interval_step_ms: 100.0,
            min_spawn_interval_ms: 500.0,
            flying_chance: 0.3,
            level_threshold: 100,
            speed_multiplier_step: 0.1,

            enemy_size: 128.0,
            enemy_base_speed: 150.0,
            enemy_speed_per_level: 15.0,
            flying_speed_factor: 1.2,
            jump_trigger_range: 250.0,
            jump_impulse: -800.0,
            gravity: 2000.0,
            spawn_offscreen_distance: 150.0,
            top_spawn_y: -150.0,
            cruise_altitude_min: 50.0,
            cruise_altitude_span: 200.0,
            frame_interval_ms: 100.0,

            player_size: 128.0,
            collision_half_extent: 50.0,
            ranged_attack_ms: 100.0,
            melee_attack_ms: 300.0,
            melee_range: 200.0,

            projectile_speed: 1500.0,
            projectile_hit_radius: 40.0,
            projectile_spin: 25.0,

            ranged_kill_reward: 10,
            melee_kill_reward: 10,

            particle_life_decay: 0.05,
            particle_gravity: 0.8,
            spark_count: 8,
            blood_count: 20,
            kill_shake: 5.0,
            shake_decay: 0.5,

            visibility_margin: 200.0,
        }
    }
}

impl GameConfig {
    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("level_threshold", f64::from(self.level_threshold)),
            ("enemy_size", self.enemy_size),
            ("enemy_base_speed", self.enemy_base_speed),
            ("player_size", self.player_size),
            ("projectile_speed", self.projectile_speed),
            ("projectile_hit_radius", self.projectile_hit_radius),
            ("gravity", self.gravity),
            ("frame_interval_ms", self.frame_interval_ms),
            ("particle_life_decay", self.particle_life_decay),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.flying_chance) {
            return Err(ConfigError::NotAProbability {
                field: "flying_chance",
                value: self.flying_chance,
            });
        }
        if self.min_spawn_interval_ms > self.spawn_interval_ms {
            return Err(ConfigError::FloorAboveInitial {
                floor: self.min_spawn_interval_ms,
                initial: self.spawn_interval_ms,
            });
        }
        Ok(())
    }

    /// Parses a (possibly partial) JSON override on top of the defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Non-empty lowercase ASCII.
pub(crate) fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// The fixed word list enemies are labelled from. Words are unique and
/// lowercase ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for w in words {
            let w = w.into();
            if !is_valid_word(&w) {
                return Err(ConfigError::InvalidWord(w));
            }
            if !out.contains(&w) {
                out.push(w);
            }
        }
        if out.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(Self { words: out })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            words: crate::WORD_LIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_floor_above_initial() {
        let cfg = GameConfig {
            spawn_interval_ms: 400.0,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::FloorAboveInitial { .. })));
    }

    #[test]
    fn rejects_zero_threshold_and_nan_speed() {
        let cfg = GameConfig {
            level_threshold: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "level_threshold", .. })
        ));
        let cfg = GameConfig {
            projectile_speed: f64::NAN,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_flying_chance() {
        let cfg = GameConfig {
            flying_chance: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotAProbability { .. })));
    }

    #[test]
    fn vocabulary_rejects_bad_words_and_dedups() {
        assert_eq!(
            Vocabulary::new(Vec::<String>::new()),
            Err(ConfigError::EmptyVocabulary)
        );
        assert_eq!(
            Vocabulary::new(["claw", "Roar"]),
            Err(ConfigError::InvalidWord("Roar".into()))
        );
        assert_eq!(
            Vocabulary::new(["bite", ""]),
            Err(ConfigError::InvalidWord(String::new()))
        );
        let v = Vocabulary::new(["claw", "bite", "claw"]).unwrap();
        assert_eq!(v.words(), ["claw", "bite"]);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_override_keeps_defaults_for_missing_fields() {
        let cfg = GameConfig::from_json(r#"{ "spawn_interval_ms": 1500.0 }"#).unwrap();
        assert_eq!(cfg.spawn_interval_ms, 1500.0);
        assert_eq!(cfg.level_threshold, 100);
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }
}
