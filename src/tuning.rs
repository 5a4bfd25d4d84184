//! Effect tuning parameters
//!
//! Defaults come from [`crate::consts`]. A page can override any subset of
//! them with a JSON object; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning set is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be in {range} (got {value})")]
    OutOfUnitRange {
        field: &'static str,
        value: f32,
        range: &'static str,
    },
    #[error("{field} ({value}) must not be below min_speed ({min_speed})")]
    BelowMinSpeed {
        field: &'static str,
        value: f32,
        min_speed: f32,
    },
    #[error("ball_size_min ({min}) exceeds ball_size_max ({max})")]
    BallSizeRange { min: f32, max: f32 },
}

/// All tunable parameters of the effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ball_count: usize,
    pub min_speed: f32,
    pub max_boost_speed: f32,
    pub emergency_speed: f32,
    pub friction: f32,
    pub hitbox_scale: f32,
    pub ball_size_min: f32,
    pub ball_size_max: f32,

    /// Fade fill opacity per frame
    pub trail_alpha: f32,
    pub particle_count: usize,
    pub particle_decay: f32,

    pub link_distance: f32,
    pub link_width: f32,

    pub mouse_radius: f32,
    pub shockwave_max_radius: f32,
    pub shockwave_speed: f32,
    pub shockwave_force: f32,
    pub shockwave_thickness: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            min_speed: MIN_SPEED,
            max_boost_speed: MAX_BOOST_SPEED,
            emergency_speed: EMERGENCY_SPEED,
            friction: FRICTION,
            hitbox_scale: HITBOX_SCALE,
            ball_size_min: BALL_SIZE_MIN,
            ball_size_max: BALL_SIZE_MAX,

            trail_alpha: TRAIL_ALPHA,
            particle_count: PARTICLE_COUNT,
            particle_decay: PARTICLE_DECAY,

            link_distance: LINK_DISTANCE,
            link_width: LINK_WIDTH,

            mouse_radius: MOUSE_RADIUS,
            shockwave_max_radius: SHOCKWAVE_MAX_RADIUS,
            shockwave_speed: SHOCKWAVE_SPEED,
            shockwave_force: SHOCKWAVE_FORCE,
            shockwave_thickness: SHOCKWAVE_THICKNESS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the parameters keep the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("min_speed", self.min_speed),
            ("hitbox_scale", self.hitbox_scale),
            ("ball_size_min", self.ball_size_min),
            ("link_distance", self.link_distance),
            ("mouse_radius", self.mouse_radius),
            ("shockwave_max_radius", self.shockwave_max_radius),
            ("shockwave_speed", self.shockwave_speed),
            ("shockwave_thickness", self.shockwave_thickness),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::OutOfUnitRange {
                field: "friction",
                value: self.friction,
                range: "(0, 1]",
            });
        }
        if !(self.particle_decay > 0.0 && self.particle_decay < 1.0) {
            return Err(TuningError::OutOfUnitRange {
                field: "particle_decay",
                value: self.particle_decay,
                range: "(0, 1)",
            });
        }

        for (field, value) in [
            ("max_boost_speed", self.max_boost_speed),
            ("emergency_speed", self.emergency_speed),
        ] {
            if value < self.min_speed {
                return Err(TuningError::BelowMinSpeed {
                    field,
                    value,
                    min_speed: self.min_speed,
                });
            }
        }

        if self.ball_size_min > self.ball_size_max {
            return Err(TuningError::BallSizeRange {
                min: self.ball_size_min,
                max: self.ball_size_max,
            });
        }

        Ok(())
    }

    /// Collision distance between two circles of the given radii
    #[inline]
    pub fn hit_distance(&self, a: f32, b: f32) -> f32 {
        (a + b) * self.hitbox_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ball_count": 3, "friction": 0.9 }"#).unwrap();
        assert_eq!(tuning.ball_count, 3);
        assert!((tuning.friction - 0.9).abs() < 1e-6);
        assert_eq!(tuning.link_distance, LINK_DISTANCE);
        assert_eq!(tuning.shockwave_force, SHOCKWAVE_FORCE);
    }

    #[test]
    fn test_bad_json() {
        let err = Tuning::from_json("{ ball_count: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_min_speed() {
        let err = Tuning::from_json(r#"{ "min_speed": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "min_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_friction_above_one() {
        let tuning = Tuning {
            friction: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfUnitRange {
                field: "friction",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_boost_below_min() {
        let tuning = Tuning {
            max_boost_speed: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BelowMinSpeed {
                field: "max_boost_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inverted_size_range() {
        let tuning = Tuning {
            ball_size_min: 30.0,
            ball_size_max: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BallSizeRange { .. })
        ));
    }

    #[test]
    fn test_hit_distance_scales_radii() {
        let tuning = Tuning::default();
        assert!((tuning.hit_distance(10.0, 20.0) - 39.0).abs() < 1e-4);
    }

    #[test]
    fn test_error_message_names_field() {
        let tuning = Tuning {
            particle_decay: 1.0,
            ..Default::default()
        };
        let msg = tuning.validate().unwrap_err().to_string();
        assert!(msg.contains("particle_decay"));
    }
}
