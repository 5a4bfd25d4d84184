//! Shockwave propagation
//!
//! A ring grows from the press point. Any ball whose centre sits inside the
//! ring's band is flung outward, once per ring.

use super::state::{Ball, Shockwave};
use crate::consts::SHOCKWAVE_FADE;
use crate::outward_normal;
use crate::tuning::Tuning;

impl Shockwave {
    /// True when `dist` from the origin lies inside the ring's hit band
    #[inline]
    pub fn in_band(&self, dist: f32, thickness: f32) -> bool {
        (dist - self.radius).abs() < thickness
    }

    /// Fling every not-yet-affected ball inside the band.
    ///
    /// Returns the indices (into `balls`) of the balls hit this frame.
    pub fn strike(&mut self, balls: &mut [Ball], tuning: &Tuning) -> Vec<usize> {
        let mut hits = Vec::new();
        for (i, ball) in balls.iter_mut().enumerate() {
            if self.affected.contains(&ball.id) {
                continue;
            }
            let delta = ball.pos - self.origin;
            if self.in_band(delta.length(), tuning.shockwave_thickness) {
                ball.vel = outward_normal(delta) * tuning.shockwave_force;
                self.affected.insert(ball.id);
                hits.push(i);
            }
        }
        hits
    }

    /// Grow and fade by one frame
    pub fn advance(&mut self, tuning: &Tuning) {
        self.radius += tuning.shockwave_speed;
        self.alpha -= SHOCKWAVE_FADE;
    }

    pub fn is_expired(&self, tuning: &Tuning) -> bool {
        self.alpha <= 0.0 || self.radius > tuning.shockwave_max_radius
    }
}
