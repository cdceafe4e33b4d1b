//! Data-driven game balance
//!
//! Every gameplay constant has a default in [`crate::consts`]. A JSON document
//! may override any subset of them; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Round length (seconds)
    pub round_seconds: u32,

    // === Cadence ===
    pub spawn_interval_ms: f64,
    pub countdown_interval_ms: f64,
    /// Every Nth spawn tick rolls for a bonus rat
    pub bonus_every: u32,
    pub bonus_chance: f32,

    // === Spawning ===
    pub spawn_margin: f32,
    pub aim_band_min: f32,
    pub aim_band_max: f32,
    pub rat_speed_min: f32,
    pub rat_speed_max: f32,
    pub rat_size: f32,

    // === Simulation ===
    pub remove_margin: f32,
    pub cat_speed: f32,
    pub cat_size: f32,
    pub arrive_epsilon: f32,
    pub max_frame_dt: f32,

    // === Presentation ===
    pub catch_feedback_ms: i32,

    // === Scheduling ===
    pub spawn_max_backlog: u32,
    pub countdown_max_backlog: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            bonus_every: BONUS_EVERY,
            bonus_chance: BONUS_CHANCE,

            spawn_margin: SPAWN_MARGIN,
            aim_band_min: AIM_BAND_MIN,
            aim_band_max: AIM_BAND_MAX,
            rat_speed_min: RAT_SPEED_MIN,
            rat_speed_max: RAT_SPEED_MAX,
            rat_size: RAT_SIZE,

            remove_margin: REMOVE_MARGIN,
            cat_speed: CAT_SPEED,
            cat_size: CAT_SIZE,
            arrive_epsilon: ARRIVE_EPSILON,
            max_frame_dt: MAX_FRAME_DT,

            catch_feedback_ms: CATCH_FEEDBACK_MS,

            spawn_max_backlog: SPAWN_MAX_BACKLOG,
            countdown_max_backlog: COUNTDOWN_MAX_BACKLOG,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON, then repair out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.round_seconds == 0 {
            log::warn!("round_seconds must be positive, using {}", defaults.round_seconds);
            self.round_seconds = defaults.round_seconds;
        }
        if !(self.spawn_interval_ms > 0.0) {
            self.spawn_interval_ms = defaults.spawn_interval_ms;
        }
        if !(self.countdown_interval_ms > 0.0) {
            self.countdown_interval_ms = defaults.countdown_interval_ms;
        }
        if self.bonus_every == 0 {
            self.bonus_every = defaults.bonus_every;
        }
        self.bonus_chance = clamp_unit(self.bonus_chance);

        self.aim_band_min = clamp_unit(self.aim_band_min);
        self.aim_band_max = clamp_unit(self.aim_band_max);
        if self.aim_band_min > self.aim_band_max {
            std::mem::swap(&mut self.aim_band_min, &mut self.aim_band_max);
        }
        self.rat_speed_min = positive_or(self.rat_speed_min, defaults.rat_speed_min);
        self.rat_speed_max = positive_or(self.rat_speed_max, defaults.rat_speed_max);
        if self.rat_speed_min > self.rat_speed_max {
            std::mem::swap(&mut self.rat_speed_min, &mut self.rat_speed_max);
        }
        self.rat_size = positive_or(self.rat_size, defaults.rat_size);

        self.cat_speed = positive_or(self.cat_speed, defaults.cat_speed);
        self.cat_size = positive_or(self.cat_size, defaults.cat_size);
        if self.arrive_epsilon < 0.0 || !self.arrive_epsilon.is_finite() {
            self.arrive_epsilon = defaults.arrive_epsilon;
        }
        if !(self.max_frame_dt > 0.0) {
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if self.spawn_margin < 0.0 || !self.spawn_margin.is_finite() {
            self.spawn_margin = defaults.spawn_margin;
        }
        if self.remove_margin < 0.0 || !self.remove_margin.is_finite() {
            self.remove_margin = defaults.remove_margin;
        }

        if self.catch_feedback_ms <= 0 {
            self.catch_feedback_ms = defaults.catch_feedback_ms;
        }

        self
    }
}

fn positive_or(v: f32, default: f32) -> f32 {
    if v > 0.0 && v.is_finite() { v } else { default }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_seconds": 30, "cat_speed": 900.0 }"#).unwrap();
        assert_eq!(tuning.round_seconds, 30);
        assert_eq!(tuning.cat_speed, 900.0);
        assert_eq!(tuning.spawn_margin, SPAWN_MARGIN);
        assert_eq!(tuning.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ round_seconds: ").is_err());
    }

    #[test]
    fn test_validated_repairs_ranges() {
        let tuning = Tuning {
            round_seconds: 0,
            spawn_interval_ms: -1.0,
            rat_speed_min: 300.0,
            rat_speed_max: 100.0,
            aim_band_min: 0.9,
            aim_band_max: 0.1,
            bonus_chance: 4.0,
            ..Default::default()
        }
        .validated();

        assert_eq!(tuning.round_seconds, ROUND_SECONDS);
        assert_eq!(tuning.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert!(tuning.rat_speed_min <= tuning.rat_speed_max);
        assert!(tuning.aim_band_min <= tuning.aim_band_max);
        assert_eq!(tuning.bonus_chance, 1.0);
    }

    #[test]
    fn test_validated_repairs_speeds_and_sizes() {
        let tuning = Tuning {
            cat_speed: -500.0,
            cat_size: 0.0,
            rat_size: -3.0,
            rat_speed_min: -260.0,
            rat_speed_max: f32::NAN,
            arrive_epsilon: -1.0,
            catch_feedback_ms: -10,
            ..Default::default()
        }
        .validated();

        assert_eq!(tuning.cat_speed, CAT_SPEED);
        assert_eq!(tuning.cat_size, CAT_SIZE);
        assert_eq!(tuning.rat_size, RAT_SIZE);
        assert_eq!(tuning.rat_speed_min, RAT_SPEED_MIN);
        assert_eq!(tuning.rat_speed_max, RAT_SPEED_MAX);
        assert_eq!(tuning.arrive_epsilon, ARRIVE_EPSILON);
        assert_eq!(tuning.catch_feedback_ms, CATCH_FEEDBACK_MS);
    }

    #[test]
    fn test_negative_cat_speed_from_json_still_closes_in() {
        use crate::sim::Pursuer;
        use glam::Vec2;

        let tuning = Tuning::from_json(r#"{ "cat_speed": -500.0, "rat_size": -3.0 }"#).unwrap();
        assert!(tuning.cat_speed > 0.0);
        assert!(tuning.rat_size > 0.0);

        let mut cat = Pursuer::new(
            Vec2::new(100.0, 100.0),
            tuning.cat_speed,
            Vec2::splat(tuning.cat_size),
        );
        cat.target = Vec2::new(200.0, 100.0);
        let before = cat.pos.distance(cat.target);
        cat.move_toward_target(0.05, tuning.arrive_epsilon);
        assert!(cat.pos.distance(cat.target) < before);
    }

    #[test]
    fn test_zero_arrive_epsilon_is_allowed() {
        let tuning = Tuning {
            arrive_epsilon: 0.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.arrive_epsilon, 0.0);
    }

    #[test]
    fn test_default_is_already_valid() {
        assert_eq!(Tuning::default().validated(), Tuning::default());
    }
}
