use crate::CONFY_APP_NAME;
use crate::camera::director::Tunables;
use crate::camera::rig::{
    FOCUS_ROTATION_DURATION_S, IDLE_ROTATION_SPEED, INTRO_DURATION_S, MOMENTUM_FRICTION,
    ZOOM_ANIMATION_DURATION_S,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub auto_rotate: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { auto_rotate: true }
    }
}

impl ViewSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "view").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "view", self);
    }
}

/// Motion tuning overrides. Rarely touched; the defaults are the shipped feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSettings {
    pub intro_duration_s: f64,
    pub focus_duration_s: f64,
    pub zoom_duration_s: f64,
    pub idle_rotation_speed: f64,
    pub momentum_friction: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            intro_duration_s: INTRO_DURATION_S,
            focus_duration_s: FOCUS_ROTATION_DURATION_S,
            zoom_duration_s: ZOOM_ANIMATION_DURATION_S,
            idle_rotation_speed: IDLE_ROTATION_SPEED,
            momentum_friction: MOMENTUM_FRICTION,
        }
    }
}

impl MotionSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "motion").unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "motion", self);
    }

    pub fn tunables(&self) -> Tunables {
        Tunables {
            intro_duration_s: self.intro_duration_s,
            focus_duration_s: self.focus_duration_s,
            zoom_duration_s: self.zoom_duration_s,
            idle_rotation_speed: self.idle_rotation_speed,
            momentum_friction: self.momentum_friction,
        }
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub view: ViewSettings,
    pub motion: MotionSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            view: ViewSettings::load(),
            motion: MotionSettings::load(),
        }
    }
}
