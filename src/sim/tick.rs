//! Per-frame simulation step
//!
//! Advances the scene by exactly one display frame. All motion constants are
//! per-frame quantities, so the driver calls this at a fixed rate.

use glam::Vec2;

use super::collision::{bounce_walls, regulate_speed, repel_from_pointer, resolve_pair};
use super::state::{Impact, Scene};
use crate::tuning::Tuning;

/// Input gathered between two frames
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Latest cursor position
    pub pointer: Option<Vec2>,
    /// Pointer presses, oldest first (each spawns a shockwave)
    pub presses: Vec<Vec2>,
    /// New surface size
    pub resize: Option<Vec2>,
}

impl FrameInput {
    /// Drop one-shot input after it has been consumed
    pub fn clear_oneshots(&mut self) {
        self.presses.clear();
        self.resize = None;
    }
}

/// Advance the scene by one frame
pub fn tick(scene: &mut Scene, input: &FrameInput) {
    if let Some(size) = input.resize {
        scene.resize(size);
    }
    if let Some(pos) = input.pointer {
        scene.pointer = pos;
    }
    for &origin in &input.presses {
        scene.press(origin);
    }

    scene.decay_effects();
    scene.resolve_collisions();
    scene.propagate_shockwaves();
    scene.advance_particles();
    scene.advance_balls();

    scene.frame += 1;
}

impl Scene {
    /// Count down every ball's radius bump by one frame
    pub fn decay_effects(&mut self) {
        for ball in &mut self.balls {
            ball.effect_timer = ball.effect_timer.saturating_sub(1);
        }
    }

    /// Ball-ball pairs, interleaved with cursor repulsion.
    ///
    /// Ball `i` is checked against every later ball and then against the
    /// cursor before ball `i + 1` is considered.
    pub fn resolve_collisions(&mut self) {
        let Scene {
            tuning,
            rng,
            size,
            pointer,
            balls,
            particles,
            ..
        } = self;
        let burst = tuning.particle_count;

        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                let (head, tail) = balls.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                // Sparks start where the balls touched, not where they were pushed to
                let (at_a, at_b) = (a.pos, b.pos);
                if resolve_pair(a, b, tuning) {
                    a.impact(Some(at_a), Impact::Standard, burst, rng, particles);
                    b.impact(Some(at_b), Impact::Standard, burst, rng, particles);
                }
            }

            let ball = &mut balls[i];
            if let Some(hit) = repel_from_pointer(ball, *pointer, *size, tuning) {
                let tier = if hit.emergency {
                    Impact::Emergency
                } else {
                    Impact::Standard
                };
                ball.impact(Some(hit.contact), tier, burst, rng, particles);
            }
        }
    }

    /// Strike, grow and expire every shockwave
    pub fn propagate_shockwaves(&mut self) {
        let Scene {
            tuning,
            rng,
            balls,
            particles,
            shockwaves,
            ..
        } = self;
        let tuning: &Tuning = tuning;

        for sw in shockwaves.iter_mut() {
            for i in sw.strike(balls, tuning) {
                balls[i].impact(None, Impact::Emergency, tuning.particle_count, rng, particles);
            }
            sw.advance(tuning);
        }

        let before = shockwaves.len();
        shockwaves.retain(|sw| !sw.is_expired(tuning));
        if shockwaves.len() < before {
            log::debug!("{} shockwave(s) expired", before - shockwaves.len());
        }
    }

    /// Move and fade sparks, dropping the spent ones.
    ///
    /// Sparks queued by last frame's wall hits join first.
    pub fn advance_particles(&mut self) {
        self.particles.append(&mut self.pending_particles);
        let decay = self.tuning.particle_decay;
        for particle in &mut self.particles {
            particle.advance(decay);
        }
        self.particles.retain(|p| !p.is_spent());
    }

    /// Move balls, bounce them off the edges and apply friction.
    ///
    /// Wall-hit sparks are queued so they are first drawn after one particle
    /// pass, like every other spark.
    pub fn advance_balls(&mut self) {
        let Scene {
            tuning,
            rng,
            size,
            balls,
            pending_particles,
            ..
        } = self;

        for ball in balls.iter_mut() {
            ball.pos += ball.vel;
            let bounce = bounce_walls(ball, *size);
            for _ in 0..bounce.count() {
                ball.impact(None, Impact::Standard, tuning.particle_count, rng, pending_particles);
            }
            ball.vel = regulate_speed(ball.vel, tuning.min_speed, tuning.friction);
        }
    }
}
