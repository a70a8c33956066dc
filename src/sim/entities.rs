//! Player, enemies and projectiles.
//!
//! All sprites are axis-aligned boxes anchored at their top-left corner, the
//! same convention the renderer uses. Per-type behaviour is a small state
//! machine advanced from [`crate::sim::Session::step`]; entities only touch
//! their own fields here, cross-entity effects live in the session.

use std::fmt;

use crate::config::GameConfig;
use crate::sim::terrain::Terrain;

/// Shared shape queries for anything drawn as a sprite box.
pub trait Body {
    fn position(&self) -> (f64, f64);
    fn size(&self) -> (f64, f64);

    fn center(&self) -> (f64, f64) {
        let (x, y) = self.position();
        let (w, h) = self.size();
        (x + w / 2.0, y + h / 2.0)
    }
}

/// Looping frame counter for sprite sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frame: usize,
    pub frames: usize,
    pub interval_ms: f64,
    timer_ms: f64,
}

impl Animation {
    pub fn new(frames: usize, interval_ms: f64) -> Self {
        Self {
            frame: 0,
            frames: frames.max(1),
            interval_ms,
            timer_ms: 0.0,
        }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.timer_ms += dt_ms;
        if self.timer_ms > self.interval_ms {
            self.frame = (self.frame + 1) % self.frames;
            self.timer_ms = 0.0;
        }
    }
}

// --- Player ------------------------------------------------------------------

pub const PLAYER_RUN_FRAMES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Running,
    Attacking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Ranged,
    Melee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub facing_left: bool,
    pub state: PlayerState,
    /// Remaining attack pose time; meaningful only while attacking.
    pub attack_ms: f64,
    pub animation: Animation,
}

impl Player {
    /// Centred horizontally in a viewport `viewport_width` wide.
    pub fn new(viewport_width: f64, cfg: &GameConfig) -> Self {
        Self {
            x: viewport_width / 2.0 - cfg.player_size / 2.0,
            y: 0.0,
            width: cfg.player_size,
            height: cfg.player_size,
            facing_left: false,
            state: PlayerState::Running,
            attack_ms: 0.0,
            animation: Animation::new(PLAYER_RUN_FRAMES, cfg.frame_interval_ms),
        }
    }

    pub fn recenter(&mut self, viewport_width: f64) {
        self.x = viewport_width / 2.0 - self.width / 2.0;
    }

    /// Grounds the player, updates facing and advances the run cycle or the
    /// attack pose. `target_x` is the x of the locked enemy, if any.
    pub fn update(
        &mut self,
        dt_ms: f64,
        terrain: &Terrain,
        canvas_height: f64,
        ground_offset: f64,
        target_x: Option<f64>,
    ) {
        self.y = terrain.ground_height(self.x + self.width / 2.0, canvas_height) - ground_offset;

        match (self.state, target_x) {
            (PlayerState::Running, _) => self.facing_left = false,
            (PlayerState::Attacking, Some(tx)) => self.facing_left = tx < self.x,
            (PlayerState::Attacking, None) => {}
        }

        match self.state {
            PlayerState::Running => self.animation.advance(dt_ms),
            PlayerState::Attacking => {
                self.attack_ms -= dt_ms;
                if self.attack_ms <= 0.0 {
                    self.state = PlayerState::Running;
                }
            }
        }
    }

    pub fn attack(&mut self, kind: AttackKind, cfg: &GameConfig) {
        self.state = PlayerState::Attacking;
        self.attack_ms = match kind {
            AttackKind::Melee => cfg.melee_attack_ms,
            AttackKind::Ranged => cfg.ranged_attack_ms,
        };
    }

    /// Projectile muzzle: the middle of the sprite.
    pub fn muzzle(&self) -> (f64, f64) {
        self.center()
    }
}

impl Body for Player {
    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

// --- Enemy -------------------------------------------------------------------

pub const ENEMY_WALK_FRAMES: usize = 2;

/// Unique per session, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnSide {
    Left,
    Right,
    Top,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Raptor on foot.
    Ground,
    /// Pterodactyl; faster, spawns from any side.
    Flying,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalMotion {
    Grounded,
    Airborne { vy: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub word: String,
    pub side: SpawnSide,
    pub kind: EnemyKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal speed, fixed at spawn from level and speed multiplier.
    pub speed: f64,
    pub motion: VerticalMotion,
    pub facing_left: bool,
    pub animation: Animation,
    /// A kill shot is already on its way; not eligible as a fresh target.
    pub doomed: bool,
}

impl Enemy {
    /// Builds an enemy at its spawn position. `top_x` and `cruise_y` are the
    /// random draws for top-side x and flyer altitude respectively.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        id: EnemyId,
        word: String,
        side: SpawnSide,
        kind: EnemyKind,
        level: u32,
        speed_multiplier: f64,
        viewport_width: f64,
        top_x: f64,
        cruise_y: f64,
        cfg: &GameConfig,
    ) -> Self {
        let (x, mut y) = match side {
            SpawnSide::Top => (top_x, cfg.top_spawn_y),
            SpawnSide::Left => (-cfg.spawn_offscreen_distance, 0.0),
            SpawnSide::Right => (viewport_width + cfg.spawn_offscreen_distance, 0.0),
        };
        let mut speed =
            (cfg.enemy_base_speed + f64::from(level) * cfg.enemy_speed_per_level) * speed_multiplier;
        if kind == EnemyKind::Flying {
            speed *= cfg.flying_speed_factor;
            if side != SpawnSide::Top {
                y = cruise_y;
            }
        }
        Self {
            id,
            word,
            side,
            kind,
            x,
            y,
            width: cfg.enemy_size,
            height: cfg.enemy_size,
            speed,
            motion: VerticalMotion::Grounded,
            facing_left: false,
            animation: Animation::new(ENEMY_WALK_FRAMES, cfg.frame_interval_ms),
            doomed: false,
        }
    }

    /// Walks toward `player_x`, follows the ground and hops when close.
    pub fn update(
        &mut self,
        dt_ms: f64,
        player_x: f64,
        terrain: &Terrain,
        canvas_height: f64,
        cfg: &GameConfig,
    ) {
        let dt = dt_ms / 1000.0;
        let dist_to_player = (self.x - player_x).abs();
        self.facing_left = self.x > player_x;

        let dir = if player_x > self.x { 1.0 } else { -1.0 };
        self.x += dir * self.speed * dt;

        let ground_y =
            terrain.ground_height(self.x + self.width / 2.0, canvas_height) - cfg.sprite_ground_offset;
        match self.motion {
            VerticalMotion::Airborne { vy } => {
                let vy = vy + cfg.gravity * dt;
                self.y += vy * dt;
                if self.y > ground_y {
                    self.y = ground_y;
                    self.motion = VerticalMotion::Grounded;
                } else {
                    self.motion = VerticalMotion::Airborne { vy };
                }
            }
            VerticalMotion::Grounded => {
                self.y = ground_y;
                if dist_to_player < cfg.jump_trigger_range {
                    self.motion = VerticalMotion::Airborne {
                        vy: cfg.jump_impulse,
                    };
                }
            }
        }

        self.animation.advance(dt_ms);
    }

    /// Whether the enemy is close enough to the player to be lethal.
    pub fn touches(&self, player: &Player, half_extent: f64) -> bool {
        (self.x - player.x).abs() < half_extent && (self.y - player.y).abs() < half_extent
    }

    /// Inside the horizontal band where the player may pick it as a target.
    pub fn is_visible(&self, viewport_width: f64, margin: f64) -> bool {
        self.x > -margin && self.x < viewport_width + margin
    }
}

impl Body for Enemy {
    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

// --- Projectile --------------------------------------------------------------

/// What a projectile did this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flight {
    /// Still travelling.
    Moving,
    /// Reached the target centre at `(x, y)`.
    Arrived { x: f64, y: f64 },
}

/// Homing shuriken. The target is held by id so a vanished enemy is simply a
/// failed lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub target: EnemyId,
    pub speed: f64,
    /// Accumulated spin in turns.
    pub rotation: f64,
    pub kill_shot: bool,
    pub active: bool,
}

impl Projectile {
    pub fn new(origin: (f64, f64), target: EnemyId, kill_shot: bool, speed: f64) -> Self {
        Self {
            x: origin.0,
            y: origin.1,
            target,
            speed,
            rotation: 0.0,
            kill_shot,
            active: true,
        }
    }

    /// Steers straight at `target_center`; arrival deactivates the projectile.
    pub fn advance(
        &mut self,
        dt_ms: f64,
        target_center: (f64, f64),
        hit_radius: f64,
        spin: f64,
    ) -> Flight {
        let (tx, ty) = target_center;
        let dx = tx - self.x;
        let dy = ty - self.y;
        let dist = dx.hypot(dy);
        if dist < hit_radius {
            self.active = false;
            return Flight::Arrived { x: tx, y: ty };
        }
        let dt = dt_ms / 1000.0;
        // never step past the centre on a long frame
        let step = (self.speed * dt).min(dist);
        self.x += dx / dist * step;
        self.y += dy / dist * step;
        self.rotation += spin * dt;
        Flight::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    fn raptor(x: f64) -> Enemy {
        Enemy::spawn(
            EnemyId(1),
            "claw".into(),
            SpawnSide::Left,
            EnemyKind::Ground,
            1,
            1.0,
            800.0,
            0.0,
            0.0,
            &cfg(),
        )
        .at(x)
    }

    impl Enemy {
        fn at(mut self, x: f64) -> Self {
            self.x = x;
            self
        }
    }

    #[test]
    fn animation_wraps_after_interval() {
        let mut a = Animation::new(2, 100.0);
        a.advance(100.0);
        assert_eq!(a.frame, 0);
        a.advance(1.0);
        assert_eq!(a.frame, 1);
        a.advance(101.0);
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn spawn_positions_and_speeds() {
        let c = cfg();
        let left = Enemy::spawn(EnemyId(1), "a".into(), SpawnSide::Left, EnemyKind::Ground, 1, 1.0, 800.0, 0.0, 0.0, &c);
        assert_eq!(left.x, -150.0);
        assert!((left.speed - 165.0).abs() < 1e-9);

        let right = Enemy::spawn(EnemyId(2), "b".into(), SpawnSide::Right, EnemyKind::Flying, 2, 1.1, 800.0, 0.0, 120.0, &c);
        assert_eq!(right.x, 950.0);
        assert_eq!(right.y, 120.0);
        assert!((right.speed - 180.0 * 1.1 * 1.2).abs() < 1e-9);

        let top = Enemy::spawn(EnemyId(3), "c".into(), SpawnSide::Top, EnemyKind::Flying, 1, 1.0, 800.0, 333.0, 120.0, &c);
        assert_eq!((top.x, top.y), (333.0, -150.0));
    }

    #[test]
    fn enemy_walks_toward_player_and_faces_it() {
        let c = cfg();
        let terrain = Terrain::from_config(&c);
        let mut e = raptor(0.0);
        e.update(1000.0, 600.0, &terrain, 600.0, &c);
        assert!((e.x - 165.0).abs() < 1e-9);
        assert!(!e.facing_left);
        assert_eq!(e.motion, VerticalMotion::Grounded);

        let mut e = raptor(1000.0);
        e.update(100.0, 600.0, &terrain, 600.0, &c);
        assert!(e.facing_left);
        assert!(e.x < 1000.0);
    }

    #[test]
    fn enemy_jumps_near_player_then_lands() {
        let c = cfg();
        let terrain = Terrain::from_config(&c);
        let mut e = raptor(400.0);
        e.update(16.0, 500.0, &terrain, 600.0, &c);
        assert_eq!(e.motion, VerticalMotion::Airborne { vy: -800.0 });
        let ground = e.y;
        e.update(16.0, e.x, &terrain, 600.0, &c);
        assert!(e.y < ground);
        // 0.8s of flight is enough to come back down
        for _ in 0..60 {
            if e.motion == VerticalMotion::Grounded {
                break;
            }
            e.update(16.0, e.x, &terrain, 600.0, &c);
        }
        assert_eq!(e.motion, VerticalMotion::Grounded);
    }

    #[test]
    fn player_attack_pose_expires() {
        let c = cfg();
        let terrain = Terrain::from_config(&c);
        let mut p = Player::new(800.0, &c);
        assert_eq!(p.x, 336.0);
        p.attack(AttackKind::Ranged, &c);
        p.update(50.0, &terrain, 600.0, 100.0, Some(0.0));
        assert_eq!(p.state, PlayerState::Attacking);
        assert!(p.facing_left);
        p.update(60.0, &terrain, 600.0, 100.0, Some(0.0));
        assert_eq!(p.state, PlayerState::Running);
        p.update(1.0, &terrain, 600.0, 100.0, Some(0.0));
        assert!(!p.facing_left);
        assert!((p.y - (terrain.ground_height(400.0, 600.0) - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn projectile_homes_and_arrives() {
        let mut p = Projectile::new((0.0, 0.0), EnemyId(9), true, 1500.0);
        assert_eq!(p.advance(100.0, (300.0, 400.0), 40.0, 25.0), Flight::Moving);
        assert!((p.x - 90.0).abs() < 1e-9 && (p.y - 120.0).abs() < 1e-9);
        for _ in 0..3 {
            assert_eq!(p.advance(100.0, (300.0, 400.0), 40.0, 25.0), Flight::Moving);
        }
        assert!(p.x.hypot(p.y) > 499.0);
        assert_eq!(
            p.advance(100.0, (300.0, 400.0), 40.0, 25.0),
            Flight::Arrived { x: 300.0, y: 400.0 }
        );
        assert!(!p.active);
    }
}
