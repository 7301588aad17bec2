// Composes the per-frame camera transform from the rig and the scroll
// modulation outputs.

use nalgebra_glm as glm;

use super::rig::{
    CAMERA_Y, CameraRig, EARTH_LOOK_OFFSET_Y, SIDEBAR_CAMERA_OFFSET, ZOOMED_CAMERA_Y_OFFSET,
    default_camera_distance, zoomed_camera_distance,
};

/// Everything a renderer needs to place the camera and draw the globe for one
/// frame. Pure output; mutating it has no effect on the next frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderTransform {
    pub eye: glm::DVec3,
    pub look_at: glm::DVec3,
    /// Globe rotation about the vertical axis.
    pub yaw: f64,
    /// Globe tilt.
    pub pitch: f64,
    pub earth_scale: f64,
    pub earth_opacity: f64,
    pub states_opacity: f64,
    /// Effective camera distance after scroll blending.
    pub distance: f64,
    /// 0 at the default orbit, 1 fully zoomed onto a state.
    pub zoom_progress: f64,
}

pub(super) struct ComposeInput<'a> {
    pub rig: &'a CameraRig,
    pub effective_distance: f64,
    pub scroll_y_offset: f64,
    pub intro_complete: bool,
    /// Eased intro progress, drives the dramatic low-angle approach.
    pub intro_eased: f64,
    pub earth_opacity: f64,
    pub states_opacity: f64,
    pub selected: bool,
}

pub(super) fn compose(input: &ComposeInput<'_>) -> RenderTransform {
    let default_dist = default_camera_distance();
    let zoomed_dist = zoomed_camera_distance();
    let zoom_progress = ((default_dist - input.effective_distance)
        / (default_dist - zoomed_dist))
        .clamp(0.0, 1.0);

    // Shift left for the sidebar only once the intro has handed off.
    let x_offset = if input.intro_complete {
        SIDEBAR_CAMERA_OFFSET * zoom_progress
    } else {
        0.0
    };

    // During the intro the camera rises from half height for a more dramatic
    // approach vector.
    let intro_y_multiplier = if input.intro_complete {
        1.0
    } else {
        0.5 + input.intro_eased * 0.5
    };

    let scroll_y = if input.intro_complete && !input.selected {
        input.scroll_y_offset
    } else {
        0.0
    };
    let zoom_y = if input.intro_complete {
        ZOOMED_CAMERA_Y_OFFSET * zoom_progress
    } else {
        0.0
    };
    let eye_y = (CAMERA_Y + zoom_y + scroll_y) * intro_y_multiplier;

    // Keep the eye on the sphere of the effective distance: the horizontal
    // leg shrinks as the vertical one grows.
    let horizontal = (input.effective_distance * input.effective_distance - eye_y * eye_y)
        .max(0.0)
        .sqrt();

    RenderTransform {
        eye: glm::vec3(x_offset, eye_y, horizontal.max(0.1)),
        look_at: glm::vec3(0.0, EARTH_LOOK_OFFSET_Y, 0.0),
        yaw: input.rig.yaw,
        pitch: input.rig.pitch,
        earth_scale: input.rig.earth_scale,
        earth_opacity: input.earth_opacity,
        states_opacity: input.states_opacity,
        distance: input.effective_distance,
        zoom_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::rig::{INTRO_START_DISTANCE, MAX_TILT_ANGLE};

    fn rig() -> CameraRig {
        let mut r = CameraRig::new(0.4);
        r.pitch = -0.2;
        r.distance = default_camera_distance();
        r.earth_scale = 1.0;
        r
    }

    fn settled(rig: &CameraRig, distance: f64) -> RenderTransform {
        compose(&ComposeInput {
            rig,
            effective_distance: distance,
            scroll_y_offset: 0.0,
            intro_complete: true,
            intro_eased: 1.0,
            earth_opacity: 1.0,
            states_opacity: 1.0,
            selected: false,
        })
    }

    #[test]
    fn default_distance_is_neutral() {
        let rig = rig();
        let t = settled(&rig, default_camera_distance());
        assert_eq!(t.zoom_progress, 0.0);
        assert_eq!(t.eye.x, 0.0);
        assert!((t.eye.y - CAMERA_Y).abs() < 1e-12);
        // Eye sits exactly on the orbit sphere.
        let len = (t.eye.x * t.eye.x + t.eye.y * t.eye.y + t.eye.z * t.eye.z).sqrt();
        assert!((len - default_camera_distance()).abs() < 1e-9);
        assert_eq!(t.look_at.y, EARTH_LOOK_OFFSET_Y);
    }

    #[test]
    fn zoomed_distance_applies_viewport_offsets() {
        let rig = rig();
        let t = settled(&rig, zoomed_camera_distance());
        assert!((t.zoom_progress - 1.0).abs() < 1e-12);
        assert!((t.eye.x - SIDEBAR_CAMERA_OFFSET).abs() < 1e-12);
        assert!((t.eye.y - (CAMERA_Y + ZOOMED_CAMERA_Y_OFFSET)).abs() < 1e-12);
    }

    #[test]
    fn intro_suppresses_offsets_and_halves_height() {
        let rig = CameraRig::new(0.0);
        let t = compose(&ComposeInput {
            rig: &rig,
            effective_distance: INTRO_START_DISTANCE,
            scroll_y_offset: 1.0,
            intro_complete: false,
            intro_eased: 0.0,
            earth_opacity: 0.0,
            states_opacity: 0.0,
            selected: false,
        });
        assert_eq!(t.eye.x, 0.0);
        assert!((t.eye.y - CAMERA_Y * 0.5).abs() < 1e-12);
        assert_eq!(t.zoom_progress, 0.0);
    }

    #[test]
    fn eye_z_never_collapses() {
        let rig = rig();
        // A distance smaller than the camera height cannot push the eye
        // through the globe.
        let t = compose(&ComposeInput {
            rig: &rig,
            effective_distance: 1.0,
            scroll_y_offset: 0.0,
            intro_complete: true,
            intro_eased: 1.0,
            earth_opacity: 1.0,
            states_opacity: 1.0,
            selected: true,
        });
        assert!(t.eye.z >= 0.1);
        assert!(t.pitch.abs() <= MAX_TILT_ANGLE);
    }
}
