//! Data-driven game balance
//!
//! Every number a balance pass might want to touch. Defaults reproduce the
//! shipped game exactly; a JSON settings file can override any subset.

use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::*;

/// Balance knobs read by the simulation and the input layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// A target spawns every this many ticks
    pub spawn_interval_ticks: u64,
    /// Initial target altitude
    pub spawn_altitude: f32,
    /// Horizontal spawn range (min inclusive, max exclusive)
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Fall speed at the start of a run
    pub initial_fall_speed: f32,
    /// Projectile travel per tick
    pub projectile_step: f32,

    // === Input step sizes ===
    pub turret_rotate_step_deg: f32,
    pub turret_elevate_step: f32,
    pub bucket_key_step: f32,
    pub bucket_drag_step: f32,
    pub turret_drag_step: f32,
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub pan_key_step: f32,
    pub pan_drag_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            spawn_altitude: SPAWN_ALTITUDE,
            spawn_x_min: SPAWN_X_MIN,
            spawn_x_max: SPAWN_X_MAX,
            initial_fall_speed: INITIAL_FALL_SPEED,
            projectile_step: PROJECTILE_STEP,

            turret_rotate_step_deg: 5.0,
            turret_elevate_step: 0.2,
            bucket_key_step: 0.3,
            bucket_drag_step: 0.05,
            turret_drag_step: 0.03,
            zoom_step: 0.2,
            min_zoom: 0.2,
            pan_key_step: 0.2,
            pan_drag_step: 0.02,
        }
    }
}

impl Tuning {
    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spawn_interval_ticks == 0 {
            return Err(SettingsError::Invalid {
                field: "spawn_interval_ticks",
                reason: "must be at least 1".into(),
            });
        }
        if self.spawn_x_min.partial_cmp(&self.spawn_x_max) != Some(std::cmp::Ordering::Less) {
            return Err(SettingsError::Invalid {
                field: "spawn_x_min",
                reason: format!(
                    "spawn range [{}, {}) is empty",
                    self.spawn_x_min, self.spawn_x_max
                ),
            });
        }

        let positive = [
            ("initial_fall_speed", self.initial_fall_speed),
            ("projectile_step", self.projectile_step),
            ("zoom_step", self.zoom_step),
            ("min_zoom", self.min_zoom),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.spawn_interval_ticks, 50);
        assert_eq!(tuning.initial_fall_speed, 0.03);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "initial_fall_speed": 0.06 }"#).unwrap();
        assert_eq!(tuning.initial_fall_speed, 0.06);
        assert_eq!(tuning.spawn_interval_ticks, SPAWN_INTERVAL_TICKS);
        assert_eq!(tuning.projectile_step, PROJECTILE_STEP);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let tuning = Tuning {
            spawn_interval_ticks: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(SettingsError::Invalid {
                field: "spawn_interval_ticks",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_spawn_range() {
        let tuning = Tuning {
            spawn_x_min: 1.0,
            spawn_x_max: 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_spawn_bound() {
        let tuning = Tuning {
            spawn_x_max: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(SettingsError::Invalid {
                field: "spawn_x_min",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_speed() {
        let tuning = Tuning {
            initial_fall_speed: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
