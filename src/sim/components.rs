use glam::{Vec2, Vec3};

use crate::defs::{AnimTag, SceneryInfo};
use crate::input::{Action, InputState};
use crate::world::{Aabb, RigCmd};

/// World-space position of an entity's feet.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec3);

/// Facing angle about +Y, radians; 0 = facing +Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heading(pub f32);

/// Uniform model scale.
#[derive(Debug, Clone, Copy)]
pub struct Scale(pub f32);

/// Scenery class reference.
#[derive(Debug, Copy, Clone)]
pub struct Prop(pub &'static SceneryInfo);

/// World box recomputed from the transform every frame.
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds(pub Aabb);

#[derive(Debug, Clone, Copy)]
pub enum Turn {
    /// Ease toward the travel direction at `rate` rad/s.
    Gradual { rate: f32 },
    /// Face the travel direction instantly.
    Snap,
}

/// Back-and-forth beat along a world axis.
#[derive(Debug, Clone, Copy)]
pub struct Patrol {
    pub axis: Vec3,
    pub min: f32,
    pub max: f32,
    /// Signed; the sign is the current travel direction.
    pub speed: f32,
    pub turn: Turn,
}

/// Avatar pose. Written exactly once per frame by the motion
/// integrator, then read by the camera rig and the renderer.
#[derive(Debug, Clone, Copy)]
pub struct AvatarPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Head-tilt cosmetics, mirrored from the rig.
    pub roll: f32,
    pub anim: AnimTag,
}

impl Default for AvatarPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            anim: AnimTag::Idle,
        }
    }
}

/// Input snapshot for the motion integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvatarCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (+ = local +X)
    pub rotate: f32,  // –1 … +1  (+ = toward +X)
    pub sprint: bool,
    /// Edge-triggered gesture request.
    pub wave: bool,
    pub dragging: bool,
    pub drag_delta: Vec2,
}

/// Everything the simulation consumes for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCmd {
    pub avatar: AvatarCmd,
    pub rig: RigCmd,
}

impl FrameCmd {
    /// Take one consistent snapshot of the input state. Drains the
    /// cursor accumulator; the event handlers keep mutating the flags
    /// for the next frame.
    pub fn sample(input: &mut InputState) -> Self {
        let held = input.held();
        let axis = |pos: Action, neg: Action| {
            let mut v = 0.0;
            if held.contains(pos) {
                v += 1.0;
            }
            if held.contains(neg) {
                v -= 1.0;
            }
            v
        };

        FrameCmd {
            avatar: AvatarCmd {
                forward: axis(Action::FORWARD, Action::BACKWARD),
                strafe: axis(Action::STRAFE_RIGHT, Action::STRAFE_LEFT),
                rotate: axis(Action::ROTATE_LEFT, Action::ROTATE_RIGHT),
                sprint: held.contains(Action::SPRINT),
                wave: false,
                dragging: input.drag_active(),
                drag_delta: input.consume_cursor_delta(),
            },
            rig: RigCmd {
                first_person: held.contains(Action::FIRST_PERSON),
                third_person: held.contains(Action::THIRD_PERSON),
                zoom_in: held.contains(Action::ZOOM_IN),
                zoom_out: held.contains(Action::ZOOM_OUT),
                tilt_left: held.contains(Action::TILT_LEFT),
                tilt_right: held.contains(Action::TILT_RIGHT),
                // Filled in by the session after the integrator ran.
                moving_forward: false,
                sprinting: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel_in_the_snapshot() {
        let mut input = InputState::new();
        input.press(Action::FORWARD);
        input.press(Action::BACKWARD);
        input.press(Action::STRAFE_LEFT);
        input.press(Action::STRAFE_RIGHT);
        let cmd = FrameCmd::sample(&mut input);
        assert_eq!(cmd.avatar.forward, 0.0);
        assert_eq!(cmd.avatar.strafe, 0.0);
    }

    #[test]
    fn sample_drains_the_cursor_delta() {
        let mut input = InputState::new();
        input.cursor_moved(Vec2::new(10.0, 10.0));
        input.cursor_moved(Vec2::new(14.0, 10.0));
        let cmd = FrameCmd::sample(&mut input);
        assert_eq!(cmd.avatar.drag_delta, Vec2::new(4.0, 0.0));
        let cmd = FrameCmd::sample(&mut input);
        assert_eq!(cmd.avatar.drag_delta, Vec2::ZERO);
    }

    #[test]
    fn rig_flags_mirror_held_actions() {
        let mut input = InputState::new();
        input.press(Action::FIRST_PERSON);
        input.press(Action::ZOOM_IN);
        input.press(Action::TILT_RIGHT);
        let cmd = FrameCmd::sample(&mut input);
        assert!(cmd.rig.first_person);
        assert!(cmd.rig.zoom_in);
        assert!(cmd.rig.tilt_right);
        assert!(!cmd.rig.third_person);
    }
}
