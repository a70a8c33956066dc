//! Combat simulation core.
//!
//! A [`Session`] owns every piece of mutable game state: the player, the live
//! enemies, projectiles in flight, particles, the typing lock, score and
//! difficulty. The host feeds it key presses through [`Session::handle_key`]
//! and frame deltas through [`Session::step`], then reads the state back for
//! drawing and drains [`GameEvent`]s for the HUD.
//!
//! Nothing here touches the browser, so the whole engine runs under plain
//! `cargo test`.

pub mod entities;
pub mod particles;
pub mod spawner;
pub mod targeting;
pub mod terrain;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{self, ConfigError, GameConfig, Vocabulary};
use entities::{AttackKind, Body, Enemy, EnemyId, EnemyKind, Flight, Player, Projectile, SpawnSide};
use particles::{Particle, ParticleKind};
use spawner::Spawner;
use targeting::{Key, KeyOutcome, Targeting};
use terrain::Terrain;

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    /// Terminal; the session no longer changes until restarted.
    GameOver,
}

/// Notifications for the score/level/input displays.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LevelUp { level: u32 },
    InputChanged(String),
    EnemySpawned { id: EnemyId, word: String },
    EnemyKilled { id: EnemyId, word: String, by: AttackKind },
    GameOver { score: u32 },
}

pub struct Session {
    cfg: GameConfig,
    vocabulary: Vocabulary,
    rng: SmallRng,
    viewport: Viewport,
    status: SessionStatus,
    score: u32,
    level: u32,
    speed_multiplier: f64,
    spawner: Spawner,
    terrain: Terrain,
    background_x: f64,
    shake: f64,
    shake_offset: (f64, f64),
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
    targeting: Targeting,
    next_enemy_id: u64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Starts a session. Fails when `cfg` breaks an invariant the step relies
    /// on (zero level threshold, a flying chance outside `0..=1`, ...).
    pub fn new(
        cfg: GameConfig,
        vocabulary: Vocabulary,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::build(cfg, vocabulary, viewport, seed))
    }

    /// Default balance and the built-in word list.
    pub fn with_defaults(viewport: Viewport, seed: u64) -> Self {
        Self::build(GameConfig::default(), Vocabulary::default(), viewport, seed)
    }

    fn build(cfg: GameConfig, vocabulary: Vocabulary, viewport: Viewport, seed: u64) -> Self {
        let mut session = Self {
            spawner: Spawner::new(cfg.spawn_interval_ms),
            terrain: Terrain::from_config(&cfg),
            player: Player::new(viewport.width, &cfg),
            cfg,
            vocabulary,
            rng: SmallRng::seed_from_u64(seed),
            viewport,
            status: SessionStatus::Playing,
            score: 0,
            level: 1,
            speed_multiplier: 1.0,
            background_x: 0.0,
            shake: 0.0,
            shake_offset: (0.0, 0.0),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            targeting: Targeting::Idle,
            next_enemy_id: 0,
            events: Vec::new(),
        };
        session.ground_player();
        session
    }

    /// Throws away all gameplay state and starts over at level 1. The rng keeps
    /// running so consecutive games differ.
    pub fn restart(&mut self) {
        self.status = SessionStatus::Playing;
        self.score = 0;
        self.level = 1;
        self.speed_multiplier = 1.0;
        self.spawner = Spawner::new(self.cfg.spawn_interval_ms);
        self.terrain = Terrain::from_config(&self.cfg);
        self.background_x = 0.0;
        self.shake = 0.0;
        self.shake_offset = (0.0, 0.0);
        self.player = Player::new(self.viewport.width, &self.cfg);
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.targeting.clear();
        self.events.clear();
        self.ground_player();
        log::debug!("session restarted");
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LevelUp { level: 1 });
        self.events.push(GameEvent::InputChanged(String::new()));
    }

    /// New canvas size. The player is recentred; spawn positions read the
    /// viewport at spawn time so they follow automatically.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.recenter(viewport.width);
        self.ground_player();
    }

    // --- accessors -------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    pub fn status(&self) -> SessionStatus {
        self.status
    }
    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }
    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawner.interval_ms
    }
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }
    pub fn background_x(&self) -> f64 {
        self.background_x
    }
    pub fn shake(&self) -> f64 {
        self.shake
    }
    /// Jitter to translate the whole frame by this step.
    pub fn shake_offset(&self) -> (f64, f64) {
        self.shake_offset
    }
    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }
    pub fn typed(&self) -> &str {
        self.targeting.typed()
    }

    /// Ground y under horizontal position `x` for the current frame.
    pub fn ground_height(&self, x: f64) -> f64 {
        self.terrain.ground_height(x, self.viewport.height)
    }

    /// Splits an enemy's word into the already-typed prefix and the rest, for
    /// two-colour label rendering. Only the locked enemy has a prefix.
    pub fn word_label<'a>(&self, enemy: &'a Enemy) -> (&'a str, &'a str) {
        match &self.targeting {
            Targeting::Locked { target, typed } if *target == enemy.id => {
                enemy.word.split_at(typed.len().min(enemy.word.len()))
            }
            _ => ("", enemy.word.as_str()),
        }
    }

    /// Hands over everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- input -----------------------------------------------------------------

    /// Applies one key press. Ignored once the game is over.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.is_over() {
            return KeyOutcome::Ignored;
        }
        let width = self.viewport.width;
        let margin = self.cfg.visibility_margin;
        let outcome = self
            .targeting
            .on_key(key, &self.enemies, |e| !e.doomed && e.is_visible(width, margin));
        if let KeyOutcome::Strike {
            target, finished, ..
        } = outcome
        {
            self.strike(target, finished);
        }
        if outcome != KeyOutcome::Ignored {
            self.events
                .push(GameEvent::InputChanged(self.targeting.typed().to_string()));
        }
        outcome
    }

    /// Fires at `target`. A finishing strike within melee range kills on the
    /// spot; otherwise a projectile carries the hit (and the kill, if
    /// `finished`).
    fn strike(&mut self, target: EnemyId, finished: bool) {
        let Some(idx) = self.enemies.iter().position(|e| e.id == target) else {
            return;
        };
        let (ex, _) = self.enemies[idx].center();
        let (px, _) = self.player.center();
        if finished && (ex - px).abs() < self.cfg.melee_range {
            self.player.attack(AttackKind::Melee, &self.cfg);
            self.kill(idx, AttackKind::Melee);
            return;
        }
        self.projectiles.push(Projectile::new(
            self.player.muzzle(),
            target,
            finished,
            self.cfg.projectile_speed,
        ));
        if finished {
            self.enemies[idx].doomed = true;
        }
        self.player.attack(AttackKind::Ranged, &self.cfg);
    }

    // --- spawning --------------------------------------------------------------

    /// Places a new enemy. Refuses words that are not lowercase ASCII and
    /// words already carried by a live enemy.
    pub fn spawn_enemy(&mut self, word: &str, side: SpawnSide, kind: EnemyKind) -> Option<EnemyId> {
        if !config::is_valid_word(word) {
            log::warn!("refusing to spawn invalid word {word:?}");
            return None;
        }
        if self.enemies.iter().any(|e| e.word == word) {
            return None;
        }
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let top_x = self.rng.gen_range(0.0..1.0) * (self.viewport.width - 100.0) + 50.0;
        let cruise_y =
            self.rng.gen_range(0.0..1.0) * self.cfg.cruise_altitude_span + self.cfg.cruise_altitude_min;
        let enemy = Enemy::spawn(
            id,
            word.to_string(),
            side,
            kind,
            self.level,
            self.speed_multiplier,
            self.viewport.width,
            top_x,
            cruise_y,
            &self.cfg,
        );
        log::debug!("spawned {kind:?} {id} {word:?} from {side:?}");
        self.events.push(GameEvent::EnemySpawned {
            id,
            word: enemy.word.clone(),
        });
        self.enemies.push(enemy);
        Some(id)
    }

    fn try_spawn(&mut self) {
        let plan = spawner::plan_spawn(
            &self.vocabulary,
            self.enemies.iter().map(|e| e.word.as_str()),
            &self.cfg,
            &mut self.rng,
        );
        if let Some(plan) = plan {
            self.spawn_enemy(&plan.word, plan.side, plan.kind);
        }
    }

    // --- simulation ------------------------------------------------------------

    /// Advances the world by `dt_ms` of wall-clock time. Does nothing once the
    /// game is over.
    pub fn step(&mut self, dt_ms: f64) {
        if self.is_over() {
            return;
        }
        let dt_ms = dt_ms.max(0.0);

        self.advance_scenery(dt_ms);

        let target_x = self
            .targeting
            .target()
            .and_then(|id| self.enemy(id))
            .map(|e| e.x);
        self.player.update(
            dt_ms,
            &self.terrain,
            self.viewport.height,
            self.cfg.sprite_ground_offset,
            target_x,
        );

        if self.spawner.tick(dt_ms) {
            self.try_spawn();
        }

        if let Some(id) = self.advance_enemies(dt_ms) {
            self.end(id);
            return;
        }

        self.advance_projectiles(dt_ms);

        let decay = self.cfg.particle_life_decay;
        for p in &mut self.particles {
            p.update(decay);
        }
        self.projectiles.retain(|p| p.active);
        self.particles.retain(|p| !p.is_dead());
    }

    fn advance_scenery(&mut self, dt_ms: f64) {
        let dt = dt_ms / 1000.0;
        self.terrain.scroll(self.cfg.terrain_scroll_speed * dt);
        self.background_x -= self.cfg.background_scroll_speed * dt;
        if self.background_x <= -self.viewport.width {
            self.background_x = 0.0;
        }
        if self.shake > 0.0 {
            self.shake = (self.shake - self.cfg.shake_decay).max(0.0);
        }
        self.shake_offset = if self.shake > 0.0 {
            (
                self.rng.gen_range(-0.5..0.5) * self.shake,
                self.rng.gen_range(-0.5..0.5) * self.shake,
            )
        } else {
            (0.0, 0.0)
        };
    }

    /// Moves enemies in spawn order and stops at the first one that caught
    /// the player; the rest stay where they were.
    fn advance_enemies(&mut self, dt_ms: f64) -> Option<EnemyId> {
        let player_x = self.player.x;
        for e in &mut self.enemies {
            e.update(dt_ms, player_x, &self.terrain, self.viewport.height, &self.cfg);
            if e.touches(&self.player, self.cfg.collision_half_extent) {
                return Some(e.id);
            }
        }
        None
    }

    fn advance_projectiles(&mut self, dt_ms: f64) {
        for i in 0..self.projectiles.len() {
            let target = self.projectiles[i].target;
            let Some(idx) = self.enemies.iter().position(|e| e.id == target) else {
                self.projectiles[i].active = false;
                continue;
            };
            let center = self.enemies[idx].center();
            let flight = self.projectiles[i].advance(
                dt_ms,
                center,
                self.cfg.projectile_hit_radius,
                self.cfg.projectile_spin,
            );
            if let Flight::Arrived { x, y } = flight {
                self.burst(x, y, ParticleKind::Spark);
                if self.projectiles[i].kill_shot {
                    self.kill(idx, AttackKind::Ranged);
                }
            }
        }
    }

    fn kill(&mut self, idx: usize, by: AttackKind) {
        let enemy = self.enemies.remove(idx);
        let (cx, cy) = enemy.center();
        self.burst(cx, cy, ParticleKind::Blood);
        self.score += match by {
            AttackKind::Ranged => self.cfg.ranged_kill_reward,
            AttackKind::Melee => self.cfg.melee_kill_reward,
        };
        self.shake = self.cfg.kill_shake;
        log::debug!("{} {:?} killed by {by:?}, score {}", enemy.id, enemy.word, self.score);
        self.events.push(GameEvent::EnemyKilled {
            id: enemy.id,
            word: enemy.word,
            by,
        });
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.check_level_up();
    }

    /// Levels up when the score sits exactly on a multiple of the threshold.
    /// A jump that steps over the multiple does not count.
    fn check_level_up(&mut self) {
        if self.score > 0 && self.score % self.cfg.level_threshold == 0 {
            self.level += 1;
            self.speed_multiplier += self.cfg.speed_multiplier_step;
            self.spawner
                .tighten(self.cfg.spawn_interval_step_ms, self.cfg.min_spawn_interval_ms);
            log::debug!(
                "level {} (speed x{:.1}, spawn every {}ms)",
                self.level,
                self.speed_multiplier,
                self.spawner.interval_ms
            );
            self.events.push(GameEvent::LevelUp { level: self.level });
        }
    }

    fn burst(&mut self, x: f64, y: f64, kind: ParticleKind) {
        let count = match kind {
            ParticleKind::Spark => self.cfg.spark_count,
            ParticleKind::Blood => self.cfg.blood_count,
        };
        particles::burst(
            &mut self.particles,
            x,
            y,
            kind,
            count,
            self.cfg.particle_gravity,
            &mut self.rng,
        );
    }

    fn end(&mut self, by: EnemyId) {
        self.status = SessionStatus::GameOver;
        log::debug!("caught by {by}; final score {}", self.score);
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    fn ground_player(&mut self) {
        self.player.y = self.ground_height(self.player.x + self.player.width / 2.0)
            - self.cfg.sprite_ground_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    /// No timed spawns: enemies only appear when a test places them.
    fn quiet() -> Session {
        let cfg = GameConfig {
            spawn_interval_ms: 1e12,
            ..GameConfig::default()
        };
        Session::new(cfg, Vocabulary::default(), VIEW, 1).unwrap()
    }

    fn type_word(s: &mut Session, word: &str) {
        for c in word.chars() {
            s.handle_key(Key::Letter(c));
        }
    }

    fn run_until_idle(s: &mut Session) {
        for _ in 0..200 {
            if s.projectiles().is_empty() {
                return;
            }
            s.step(16.0);
        }
        panic!("projectiles never landed");
    }

    #[test]
    fn fresh_session_state() {
        let s = quiet();
        assert_eq!(s.status(), SessionStatus::Playing);
        assert_eq!((s.score(), s.level()), (0, 1));
        assert_eq!(s.speed_multiplier(), 1.0);
        assert_eq!(s.player().x, 336.0);
        assert!((s.player().y - (s.ground_height(400.0) - 100.0)).abs() < 1e-9);
        assert!(s.enemies().is_empty());
    }

    #[test]
    fn spawn_enemy_refuses_duplicate_word() {
        let mut s = quiet();
        assert!(s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).is_some());
        assert!(s.spawn_enemy("claw", SpawnSide::Right, EnemyKind::Flying).is_none());
        assert_eq!(s.enemies().len(), 1);
    }

    #[test]
    fn partial_shots_never_kill() {
        let mut s = quiet();
        let id = s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        type_word(&mut s, "cla");
        assert_eq!(s.projectiles().len(), 3);
        assert!(s.projectiles().iter().all(|p| !p.kill_shot));
        run_until_idle(&mut s);
        assert!(s.enemy(id).is_some());
        assert_eq!(s.score(), 0);
        assert!(s.particles().iter().all(|p| p.color == (255, 255, 0)));
        assert_eq!(s.typed(), "cla");
    }

    #[test]
    fn kill_shot_removes_target_on_arrival() {
        let mut s = quiet();
        let id = s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        type_word(&mut s, "claw");
        assert_eq!(s.targeting(), &Targeting::Idle);
        assert!(s.enemy(id).unwrap().doomed);
        run_until_idle(&mut s);
        assert!(s.enemy(id).is_none());
        assert_eq!(s.score(), 10);
        assert_eq!(s.shake(), 5.0);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(10)));
        assert!(events.contains(&GameEvent::EnemyKilled {
            id,
            word: "claw".into(),
            by: AttackKind::Ranged
        }));
    }

    #[test]
    fn doomed_enemy_cannot_be_relocked() {
        let mut s = quiet();
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        let cut = s.spawn_enemy("cut", SpawnSide::Right, EnemyKind::Ground).unwrap();
        type_word(&mut s, "claw");
        s.handle_key(Key::Letter('c'));
        assert_eq!(s.targeting().target(), Some(cut));
    }

    #[test]
    fn melee_finisher_kills_immediately() {
        let mut s = quiet();
        let id = s.spawn_enemy("bite", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.enemies[0].x = s.player.x - 150.0;
        type_word(&mut s, "bite");
        assert!(s.enemy(id).is_none());
        assert_eq!(s.score(), 10);
        assert_eq!(s.player().state, entities::PlayerState::Attacking);
        assert!((s.player().attack_ms - 300.0).abs() < 1e-9);
        // three partial shots still in the air, their target is gone
        assert_eq!(s.projectiles().len(), 3);
        s.step(16.0);
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn orphaned_projectile_deactivates_without_collateral() {
        let mut s = quiet();
        let claw = s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        let bite = s.spawn_enemy("bite", SpawnSide::Right, EnemyKind::Ground).unwrap();
        type_word(&mut s, "claw");
        let idx = s.enemies.iter().position(|e| e.id == claw).unwrap();
        s.enemies.remove(idx);
        s.step(16.0);
        assert!(s.projectiles().is_empty());
        assert!(s.enemy(bite).is_some());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn level_up_on_exact_multiple() {
        let mut s = Session::with_defaults(VIEW, 1);
        s.score = 90;
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.kill(0, AttackKind::Ranged);
        assert_eq!(s.level(), 2);
        assert!((s.speed_multiplier() - 1.1).abs() < 1e-9);
        assert_eq!(s.spawn_interval_ms(), 1900.0);
    }

    #[test]
    fn skipped_multiple_does_not_level() {
        let mut s = Session::new(
            GameConfig {
                ranged_kill_reward: 15,
                spawn_interval_ms: 1e12,
                ..GameConfig::default()
            },
            Vocabulary::default(),
            VIEW,
            1,
        )
        .unwrap();
        s.score = 90;
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.kill(0, AttackKind::Ranged);
        assert_eq!(s.score(), 105);
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn spawn_interval_has_floor() {
        let mut s = quiet();
        s.spawner.interval_ms = 550.0;
        s.cfg.min_spawn_interval_ms = 500.0;
        s.score = 90;
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.kill(0, AttackKind::Ranged);
        assert_eq!(s.spawn_interval_ms(), 500.0);
    }

    #[test]
    fn touching_enemy_ends_session_and_freezes_state() {
        let mut s = quiet();
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.enemies[0].x = s.player.x - 1.0;
        s.step(1.0);
        assert!(s.is_over());
        assert!(s.drain_events().contains(&GameEvent::GameOver { score: 0 }));
        let x = s.enemies()[0].x;
        s.step(500.0);
        assert_eq!(s.enemies()[0].x, x);
        assert_eq!(s.handle_key(Key::Letter('c')), KeyOutcome::Ignored);
    }

    #[test]
    fn timed_spawns_reset_timer_even_when_skipped() {
        let cfg = GameConfig::default();
        let vocab = Vocabulary::new(["claw"]).unwrap();
        let mut s = Session::new(cfg, vocab, VIEW, 3).unwrap();
        s.step(2001.0);
        assert_eq!(s.enemies().len(), 1);
        s.step(2001.0);
        assert_eq!(s.enemies().len(), 1);
        assert_eq!(s.spawner.timer_ms, 0.0);
    }

    #[test]
    fn scenery_scrolls_and_shake_decays() {
        let mut s = quiet();
        s.shake = 1.0;
        s.step(1000.0);
        assert!((s.terrain().offset - 100.0).abs() < 1e-9);
        assert!((s.background_x() + 50.0).abs() < 1e-9);
        assert_eq!(s.shake(), 0.5);
        let (dx, dy) = s.shake_offset();
        assert!(dx.abs() <= 0.25 && dy.abs() <= 0.25);
        s.step(16.0);
        assert_eq!(s.shake_offset(), (0.0, 0.0));
    }

    #[test]
    fn word_label_splits_locked_enemy_only() {
        let mut s = quiet();
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.spawn_enemy("bite", SpawnSide::Right, EnemyKind::Ground).unwrap();
        type_word(&mut s, "cl");
        let claw = &s.enemies()[0];
        let bite = &s.enemies()[1];
        assert_eq!(s.word_label(claw), ("cl", "aw"));
        assert_eq!(s.word_label(bite), ("", "bite"));
    }

    #[test]
    fn restart_clears_everything() {
        let mut s = quiet();
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        type_word(&mut s, "cl");
        s.score = 50;
        s.status = SessionStatus::GameOver;
        s.restart();
        assert_eq!(s.status(), SessionStatus::Playing);
        assert_eq!(s.score(), 0);
        assert!(s.enemies().is_empty() && s.projectiles().is_empty());
        assert_eq!(s.targeting(), &Targeting::Idle);
        assert_eq!(s.spawn_interval_ms(), 1e12);
    }

    #[test]
    fn resize_recenters_player() {
        let mut s = quiet();
        s.resize(Viewport {
            width: 1200.0,
            height: 900.0,
        });
        assert_eq!(s.player().x, 536.0);
        assert!((s.player().y - (s.ground_height(600.0) - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let zero_threshold = GameConfig {
            level_threshold: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            Session::new(zero_threshold, Vocabulary::default(), VIEW, 1).err(),
            Some(ConfigError::NotPositive {
                field: "level_threshold",
                value: 0.0
            })
        );
        let bad_chance = GameConfig {
            flying_chance: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(
            Session::new(bad_chance, Vocabulary::default(), VIEW, 1).err(),
            Some(ConfigError::NotAProbability {
                field: "flying_chance",
                value: 1.5
            })
        );
    }

    #[test]
    fn spawn_enemy_refuses_malformed_words() {
        let mut s = quiet();
        assert_eq!(s.spawn_enemy("", SpawnSide::Left, EnemyKind::Ground), None);
        assert_eq!(s.spawn_enemy("Claw", SpawnSide::Left, EnemyKind::Ground), None);
        assert_eq!(s.spawn_enemy("cl aw", SpawnSide::Left, EnemyKind::Ground), None);
        assert!(s.enemies().is_empty());
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn first_catch_stops_the_enemy_pass() {
        let mut s = quiet();
        s.spawn_enemy("claw", SpawnSide::Left, EnemyKind::Ground).unwrap();
        s.spawn_enemy("bite", SpawnSide::Right, EnemyKind::Ground).unwrap();
        s.enemies[0].x = s.player.x - 1.0;
        let behind = s.enemies[1].clone();
        s.step(16.0);
        assert!(s.is_over());
        assert_eq!(s.enemies[1], behind);
    }
}
