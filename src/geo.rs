// State centroids and the longitude/latitude -> camera heading math.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::Deserialize;

use crate::camera::rig::MAX_TILT_ANGLE;
use crate::camera::smoothing::short_angle_dist;
use crate::camera::rig::{FOCUS_ROTATION_DURATION_S, ZOOM_ANIMATION_DURATION_S};
use crate::error::GlobeError;

/// Geographic center of the contiguous US; the globe's home framing.
pub const US_CENTER_LAT: f64 = 39.8283;
pub const US_CENTER_LON: f64 = -98.5795;

/// A rotation delta larger than this gets the longer focus duration.
const LONG_ROTATION_RADIANS: f64 = 0.3;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// Yaw that brings a longitude to face the camera (negated for rotation sense).
pub fn rotation_for_longitude(lon: f64) -> f64 {
    -(lon + 90.0) * (PI / 180.0)
}

/// Home heading centering the US in view.
pub fn us_home_yaw() -> f64 {
    rotation_for_longitude(US_CENTER_LON)
}

/// Pitch that frames a latitude: states south of the US center tilt the globe
/// up, northern states tilt it down. Normalized against a 45 degree span.
pub fn tilt_for_latitude(lat: f64) -> f64 {
    let lat_offset = US_CENTER_LAT - lat;
    -(lat_offset / 45.0) * MAX_TILT_ANGLE
}

/// Centroid lookup for camera targeting, loaded from the embedded table.
pub struct StateCentroids {
    by_name: HashMap<String, Centroid>,
}

impl StateCentroids {
    pub fn load() -> Result<Self, GlobeError> {
        let by_name: HashMap<String, Centroid> =
            serde_json::from_str(include_str!("../data/state_centroids.json"))?;
        Ok(Self { by_name })
    }

    pub fn get(&self, state: &str) -> Option<Centroid> {
        self.by_name.get(state).copied()
    }

    /// Focus target for a state; unknown names fall back to the US center.
    pub fn focus_target(&self, state: &str) -> FocusTarget {
        let c = self.get(state).unwrap_or(Centroid {
            lat: US_CENTER_LAT,
            lon: US_CENTER_LON,
        });
        FocusTarget {
            yaw: rotation_for_longitude(c.lon),
            pitch: tilt_for_latitude(c.lat),
        }
    }

    /// State names in a stable order, for cycling selection from the keyboard.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }
}

/// Absolute heading/tilt framing a selected state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub yaw: f64,
    pub pitch: f64,
}

/// Short rotations get the snappier zoom duration; long swings around the
/// globe get the full rotation duration.
pub fn focus_duration_s(current_yaw: f64, target_yaw: f64) -> f64 {
    if short_angle_dist(current_yaw, target_yaw).abs() > LONG_ROTATION_RADIANS {
        FOCUS_ROTATION_DURATION_S
    } else {
        ZOOM_ANIMATION_DURATION_S
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_table_loads() {
        let table = StateCentroids::load().expect("embedded table parses");
        assert_eq!(table.len(), 52);
        let ca = table.get("California").unwrap();
        assert!((ca.lat - 36.116203).abs() < 1e-6);
        assert!((ca.lon + 119.681564).abs() < 1e-6);
    }

    #[test]
    fn home_yaw_matches_us_center() {
        let yaw = us_home_yaw();
        assert!((yaw - (-(-98.5795 + 90.0) * PI / 180.0)).abs() < 1e-12);
        // A state on the US center longitude needs no rotation from home.
        assert!((rotation_for_longitude(US_CENTER_LON) - yaw).abs() < 1e-12);
    }

    #[test]
    fn tilt_sign_and_clamp_range() {
        // Florida is south of the US center: positive lat offset, negative tilt.
        assert!(tilt_for_latitude(27.77) < 0.0);
        // North Dakota is north: positive tilt.
        assert!(tilt_for_latitude(47.53) > 0.0);
        // Even Alaska stays within the tilt clamp once the rig clamps.
        assert!(tilt_for_latitude(US_CENTER_LAT).abs() < 1e-12);
    }

    #[test]
    fn focus_duration_rule() {
        let home = us_home_yaw();
        let table = StateCentroids::load().unwrap();
        // Hawaii is a long swing from the US center.
        let hi = table.focus_target("Hawaii");
        assert_eq!(focus_duration_s(home, hi.yaw), FOCUS_ROTATION_DURATION_S);
        // Kansas sits nearly on the home longitude.
        let ks = table.focus_target("Kansas");
        assert_eq!(focus_duration_s(home, ks.yaw), ZOOM_ANIMATION_DURATION_S);
    }
}
