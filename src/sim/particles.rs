//! Cosmetic impact debris. Particles never influence gameplay.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Yellow flash on every projectile impact.
    Spark,
    /// Red spray when an enemy dies.
    Blood,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub gravity: f64,
    pub size: f64,
    /// `(r, g, b)` fill colour.
    pub color: (u8, u8, u8),
    /// Opacity, starts at 1 and counts down each tick.
    pub life: f64,
}

impl Particle {
    pub fn new<R: Rng>(x: f64, y: f64, kind: ParticleKind, gravity: f64, rng: &mut R) -> Self {
        let color = match kind {
            ParticleKind::Blood => (150 + rng.gen_range(0..50u8), 0, 0),
            ParticleKind::Spark => (255, 255, 0),
        };
        Self {
            x,
            y,
            vx: rng.gen_range(-7.5..7.5),
            vy: rng.gen_range(-15.0..0.0),
            gravity,
            size: rng.gen_range(2.0..6.0),
            color,
            life: 1.0,
        }
    }

    /// One fixed tick: integrate, fall, fade.
    pub fn update(&mut self, decay: f64) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += self.gravity;
        self.life -= decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Pushes `count` particles of `kind` centred on `(x, y)`.
pub fn burst<R: Rng>(
    out: &mut Vec<Particle>,
    x: f64,
    y: f64,
    kind: ParticleKind,
    count: usize,
    gravity: f64,
    rng: &mut R,
) {
    out.extend((0..count).map(|_| Particle::new(x, y, kind, gravity, rng)));
}
