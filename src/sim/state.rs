//! Scene state and core simulation types
//!
//! Everything here is transient: it lives for as long as the page does and
//! is never persisted.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Stable ball identity, handed out in creation order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub u32);

/// Strength of a collision effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Ball-ball, wall and ordinary cursor hits
    Standard,
    /// Cursor hits near a wall and shockwave hits: longer flash, double sparks
    Emergency,
}

impl Impact {
    /// Frames the radius bump lasts
    pub fn effect_frames(self) -> u32 {
        match self {
            Impact::Standard => EFFECT_FRAMES,
            Impact::Emergency => EMERGENCY_EFFECT_FRAMES,
        }
    }

    /// Sparks emitted for a given base burst size
    pub fn burst(self, base: usize) -> usize {
        match self {
            Impact::Standard => base,
            Impact::Emergency => base * 2,
        }
    }
}

/// Random hue in whole degrees, [0, 360)
pub fn random_hue(rng: &mut Pcg32) -> f32 {
    (rng.random::<f32>() * 360.0).floor()
}

/// A spark thrown off by a collision
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Inherited from the ball that emitted it
    pub hue: f32,
    /// 1.0 at spawn, multiplied by the decay factor every frame
    pub alpha: f32,
}

impl Particle {
    /// Spawn a spark at `pos` flying in a random direction
    pub fn spawn(rng: &mut Pcg32, pos: Vec2, hue: f32) -> Self {
        let radius =
            rng.random::<f32>() * (PARTICLE_RADIUS_MAX - PARTICLE_RADIUS_MIN) + PARTICLE_RADIUS_MIN;
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let force =
            rng.random::<f32>() * (PARTICLE_SPEED_MAX - PARTICLE_SPEED_MIN) + PARTICLE_SPEED_MIN;

        Self {
            pos,
            vel: polar_to_cartesian(force, angle),
            radius,
            hue,
            alpha: 1.0,
        }
    }

    /// Move one frame and fade
    pub fn advance(&mut self, decay: f32) {
        self.pos += self.vel;
        self.alpha *= decay;
    }

    /// Faded enough to drop
    pub fn is_spent(&self) -> bool {
        self.alpha < PARTICLE_MIN_ALPHA
    }
}

/// A bouncing ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius, fixed at creation
    pub radius: f32,
    pub hue: f32,
    /// Frames of radius bump left after a collision
    pub effect_timer: u32,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, vel: Vec2, radius: f32, hue: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            hue,
            effect_timer: 0,
        }
    }

    /// Random size, position and heading at minimum speed
    pub fn random(id: BallId, rng: &mut Pcg32, tuning: &Tuning, size: Vec2) -> Self {
        let radius = rng.random::<f32>() * (tuning.ball_size_max - tuning.ball_size_min)
            + tuning.ball_size_min;
        let pos = Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y);
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let vel = polar_to_cartesian(tuning.min_speed, angle);
        let hue = random_hue(rng);
        Self::new(id, pos, vel, radius, hue)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Radius as drawn: inflated by one pixel per remaining effect frame
    #[inline]
    pub fn display_radius(&self) -> f32 {
        self.radius + self.effect_timer as f32
    }

    /// Collision effect: new colour, radius bump and a spark burst.
    ///
    /// Sparks spawn at `at`, or at the ball centre when no contact point is
    /// given.
    pub fn impact(
        &mut self,
        at: Option<Vec2>,
        tier: Impact,
        burst: usize,
        rng: &mut Pcg32,
        particles: &mut Vec<Particle>,
    ) {
        self.hue = random_hue(rng);
        self.effect_timer = tier.effect_frames();
        let origin = at.unwrap_or(self.pos);
        for _ in 0..tier.burst(burst) {
            particles.push(Particle::spawn(rng, origin, self.hue));
        }
    }
}

/// An expanding ring spawned by a pointer press
#[derive(Debug, Clone)]
pub struct Shockwave {
    pub origin: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Balls already flung by this ring
    pub affected: HashSet<BallId>,
}

impl Shockwave {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            radius: 0.0,
            alpha: 1.0,
            affected: HashSet::new(),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Scene {
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Drawing surface size in CSS pixels
    pub size: Vec2,
    /// Last known cursor position
    pub pointer: Vec2,
    /// Balls in creation order
    pub balls: Vec<Ball>,
    pub particles: Vec<Particle>,
    /// Wall-hit sparks waiting for the next particle pass
    pub pending_particles: Vec<Particle>,
    pub shockwaves: Vec<Shockwave>,
    /// Frames stepped so far
    pub frame: u64,
    next_id: u32,
}

impl Scene {
    /// Create a scene with no balls
    pub fn empty(seed: u64, tuning: Tuning, size: Vec2) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            size,
            pointer: Vec2::new(MOUSE_START.0, MOUSE_START.1),
            balls: Vec::new(),
            particles: Vec::new(),
            pending_particles: Vec::new(),
            shockwaves: Vec::new(),
            frame: 0,
            next_id: 1,
        }
    }

    /// Create a scene populated with `tuning.ball_count` random balls
    pub fn new(seed: u64, tuning: Tuning, size: Vec2) -> Self {
        let mut scene = Self::empty(seed, tuning, size);
        for _ in 0..scene.tuning.ball_count {
            let id = scene.next_ball_id();
            let ball = Ball::random(id, &mut scene.rng, &scene.tuning, size);
            scene.balls.push(ball);
        }
        scene
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a ball explicitly, returning its ID
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> BallId {
        let id = self.next_ball_id();
        let hue = random_hue(&mut self.rng);
        self.balls.push(Ball::new(id, pos, vel, radius, hue));
        id
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Start a shockwave at `origin`
    pub fn press(&mut self, origin: Vec2) {
        log::debug!("shockwave at ({:.0}, {:.0})", origin.x, origin.y);
        self.shockwaves.push(Shockwave::new(origin));
    }

    /// Adopt a new surface size; balls left outside are pulled back in by
    /// the next wall check
    pub fn resize(&mut self, size: Vec2) {
        if size != self.size {
            log::info!("viewport resized to {}x{}", size.x, size.y);
            self.size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_spawns_balls() {
        let scene = Scene::new(7, Tuning::default(), Vec2::new(800.0, 600.0));
        assert_eq!(scene.balls.len(), BALL_COUNT);
        for ball in &scene.balls {
            assert!(ball.radius >= BALL_SIZE_MIN && ball.radius <= BALL_SIZE_MAX);
            assert!((0.0..=800.0).contains(&ball.pos.x));
            assert!((0.0..=600.0).contains(&ball.pos.y));
            assert!((ball.speed() - MIN_SPEED).abs() < 1e-4);
            assert!((0.0..360.0).contains(&ball.hue));
            assert_eq!(ball.effect_timer, 0);
        }
    }

    #[test]
    fn test_ball_ids_monotonic() {
        let mut scene = Scene::new(1, Tuning::default(), Vec2::new(100.0, 100.0));
        let ids: Vec<u32> = scene.balls.iter().map(|b| b.id.0).collect();
        assert_eq!(ids, (1..=BALL_COUNT as u32).collect::<Vec<_>>());

        let next = scene.spawn_ball(Vec2::ZERO, Vec2::X, 10.0);
        assert_eq!(next, BallId(BALL_COUNT as u32 + 1));
    }

    #[test]
    fn test_zero_size_surface_does_not_panic() {
        let scene = Scene::new(3, Tuning::default(), Vec2::ZERO);
        assert!(scene.balls.iter().all(|b| b.pos == Vec2::ZERO));
    }

    #[test]
    fn test_pointer_starts_offscreen() {
        let scene = Scene::empty(0, Tuning::default(), Vec2::new(100.0, 100.0));
        assert_eq!(scene.pointer, Vec2::new(-1000.0, -1000.0));
    }

    #[test]
    fn test_impact_standard() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        let mut ball = Ball::new(BallId(1), Vec2::new(10.0, 20.0), Vec2::X, 12.0, 400.0);

        ball.impact(None, Impact::Standard, PARTICLE_COUNT, &mut rng, &mut particles);

        assert_eq!(particles.len(), PARTICLE_COUNT);
        assert_eq!(ball.effect_timer, EFFECT_FRAMES);
        assert!(ball.hue < 360.0);
        for p in &particles {
            assert_eq!(p.pos, ball.pos);
            assert_eq!(p.hue, ball.hue);
            assert_eq!(p.alpha, 1.0);
            assert!(p.radius >= PARTICLE_RADIUS_MIN && p.radius <= PARTICLE_RADIUS_MAX);
            let speed = p.vel.length();
            assert!(speed >= PARTICLE_SPEED_MIN - 1e-4 && speed < PARTICLE_SPEED_MAX + 1e-4);
        }
    }

    #[test]
    fn test_impact_emergency_at_contact_point() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        let mut ball = Ball::new(BallId(1), Vec2::ZERO, Vec2::X, 12.0, 0.0);
        let contact = Vec2::new(3.0, 4.0);

        ball.impact(Some(contact), Impact::Emergency, PARTICLE_COUNT, &mut rng, &mut particles);

        assert_eq!(particles.len(), PARTICLE_COUNT * 2);
        assert_eq!(ball.effect_timer, EMERGENCY_EFFECT_FRAMES);
        assert!(particles.iter().all(|p| p.pos == contact));
    }

    #[test]
    fn test_display_radius_includes_effect() {
        let mut ball = Ball::new(BallId(1), Vec2::ZERO, Vec2::X, 12.0, 0.0);
        assert_eq!(ball.display_radius(), 12.0);
        ball.effect_timer = 7;
        assert_eq!(ball.display_radius(), 19.0);
    }

    #[test]
    fn test_particle_decay_and_prune() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut p = Particle::spawn(&mut rng, Vec2::ZERO, 120.0);

        let mut frames = 0;
        while !p.is_spent() {
            p.advance(PARTICLE_DECAY);
            frames += 1;
            let expected = PARTICLE_DECAY.powi(frames);
            assert!((p.alpha - expected).abs() < 1e-5);
        }
        // 0.94^74 ≈ 0.0103, 0.94^75 ≈ 0.0097
        assert_eq!(frames, 75);
    }

    #[test]
    fn test_press_spawns_fresh_shockwave() {
        let mut scene = Scene::empty(0, Tuning::default(), Vec2::new(100.0, 100.0));
        scene.press(Vec2::new(40.0, 50.0));
        assert_eq!(scene.shockwaves.len(), 1);
        let sw = &scene.shockwaves[0];
        assert_eq!(sw.origin, Vec2::new(40.0, 50.0));
        assert_eq!(sw.radius, 0.0);
        assert_eq!(sw.alpha, 1.0);
        assert!(sw.affected.is_empty());
    }
}
