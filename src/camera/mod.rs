// Camera orchestration: easing, smoothing, rig state, the animation state
// machine and the final transform composition.

pub mod director;
pub mod easing;
pub mod rig;
pub mod smoothing;
pub mod transform;

pub use director::{Director, FrameInput, Phase};
pub use rig::CameraRig;
pub use transform::RenderTransform;
