//! Avatar motion integrator.
//!
//! Turns one input snapshot plus an elapsed time into an updated
//! [`AvatarPose`]: local displacement from the held flags, the forward
//! component gated by the obstacle set, yaw from turn keys and mouse
//! drag, the displacement rotated into world space, and an animation
//! tag picked for the mixer.

use glam::{Mat3, Vec3};

use super::collision;
use super::components::{AvatarCmd, AvatarPose};
use crate::defs::AnimTag;
use crate::world::ObstacleSet;

pub const MOVE_SPEED: f32 = 10.0; // world units / second
pub const SPRINT_MULTIPLIER: f32 = 2.0;
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)
/// Degrees of yaw per pointer count while dragging.
pub const DRAG_SENSITIVITY: f32 = 0.15;
pub const PITCH_LIMIT: f32 = 80.0 * std::f32::consts::PI / 180.0;

/// What the caller gets back.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveResult {
    /// Net displacement was non-zero this frame.
    pub moving: bool,
    /// The surviving displacement had a forward component.
    pub moved_forward: bool,
    /// The gate zeroed the forward component.
    pub blocked_forward: bool,
}

pub fn integrate(
    pose: &mut AvatarPose,
    cmd: &AvatarCmd,
    speed: f32,
    half_extents: Vec3,
    obstacles: &ObstacleSet,
    dt: f32,
) -> MoveResult {
    /* -- 1: local displacement from the held flags ------------------ */
    let mut local = Vec3::new(cmd.strafe, 0.0, cmd.forward) * speed * dt;
    if cmd.sprint {
        local *= SPRINT_MULTIPLIER;
    }

    /* -- 2: gate the forward component against the obstacles -------- */
    // Only forward motion is checked; strafe and backpedal pass
    // unchecked, faithful to the source scene's behaviour.
    let mut result = MoveResult::default();
    if local.z > 0.0 {
        let ahead = Mat3::from_rotation_y(pose.yaw) * Vec3::new(0.0, 0.0, local.z);
        let projected =
            collision::avatar_box(pose.position, half_extents).translated(ahead);
        if collision::blocked(&projected, obstacles) {
            local.z = 0.0;
            result.blocked_forward = true;
        }
    }

    /* -- 3: yaw / pitch from turn keys and drag --------------------- */
    pose.yaw += cmd.rotate * TURN_RATE * dt;
    if cmd.dragging {
        let to_rad = DRAG_SENSITIVITY.to_radians();
        pose.yaw -= cmd.drag_delta.x * to_rad;
        pose.pitch =
            (pose.pitch - cmd.drag_delta.y * to_rad).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /* -- 4: movement is relative to the new facing ------------------ */
    pose.position += Mat3::from_rotation_y(pose.yaw) * local;

    /* -- 5: pick the animation tag ---------------------------------- */
    result.moving = local != Vec3::ZERO;
    result.moved_forward = local.z > 0.0;
    pose.anim = if result.moving && cmd.sprint {
        AnimTag::Run
    } else if result.moving {
        AnimTag::Walk
    } else {
        AnimTag::Idle
    };

    result
}
