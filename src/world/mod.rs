mod camera;
mod daynight;
mod geometry;

pub use camera::{CameraMode, CameraPose, CameraRig, CameraRigConfig, RigCmd, ZoomState};
pub use daynight::{DayNight, FOG_FAR, FOG_NEAR, SceneColours};
pub use geometry::{Aabb, ObstacleSet};
