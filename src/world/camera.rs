use glam::{EulerRot, Mat3, Mat4, Vec3};
use std::f32::consts::PI;

use crate::sim::AvatarPose;

/// Rig configuration. Offsets are in the avatar's local frame
/// (+Z = facing direction at yaw 0, +Y up).
#[derive(Clone, Copy, Debug)]
pub struct CameraRigConfig {
    /// Third-person boom, rotated by the avatar's yaw each frame.
    pub base_offset: Vec3,
    /// First-person eye point relative to the avatar's feet.
    pub head_offset: Vec3,
    /// Where the third-person camera aims, relative to the avatar.
    pub target_offset: Vec3,
    /// Boom length change per zoom level.
    pub zoom_step: f32,
    pub zoom_min: i32,
    pub zoom_max: i32,
    /// Head-tilt limit (radians) and per-frame blend factor.
    pub tilt_max: f32,
    pub tilt_blend: f32,
    /// Head-bob vertical amplitude and phase speed (walk / sprint).
    pub bob_amplitude: f32,
    pub bob_freq_walk: f32,
    pub bob_freq_run: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            base_offset: Vec3::new(0.0, 16.0, -15.5),
            head_offset: Vec3::new(0.0, 16.0, 0.0),
            target_offset: Vec3::new(0.0, 16.0, 0.0),
            zoom_step: 1.0,
            zoom_min: -6,
            zoom_max: 6,
            tilt_max: 0.3,
            tilt_blend: 0.2,
            bob_amplitude: 0.35,
            bob_freq_walk: 10.0,
            bob_freq_run: 16.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    FirstPerson,
    ThirdPerson,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomState {
    Normal,
    Zooming,
}

/// Per-frame rig command, sampled from the input state once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct RigCmd {
    pub first_person: bool,
    pub third_person: bool,
    /// Held states; the rig edge-detects level changes itself.
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub tilt_left: bool,
    pub tilt_right: bool,
    /// Avatar motion for this frame, used by the head-bob.
    pub moving_forward: bool,
    pub sprinting: bool,
}

/// Final camera placement handed to the renderer.
///
/// Cameras look down their local −Z (renderer convention), which is why
/// a first-person camera facing the avatar's +Z heading carries
/// `yaw = avatar yaw + π`.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CameraPose {
    /// Unit vector the camera looks along.
    pub fn look_dir(&self) -> Vec3 {
        Mat3::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll) * Vec3::NEG_Z
    }

    /// Camera-to-world transform for the renderer.
    pub fn world_from_camera(&self) -> Mat4 {
        Mat4::from_translation(self.eye)
            * Mat4::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }
}

/// First/third-person camera rig.
///
/// Pure function of the avatar pose apart from its own mode, zoom, tilt
/// and bob state; [`CameraRig::update`] is the only mutation point.
#[derive(Debug)]
pub struct CameraRig {
    cfg: CameraRigConfig,
    mode: CameraMode,
    zoom: ZoomState,
    zoom_level: i32,
    tilt: f32,
    bob_phase: f32,
    bob_active: bool,
}

impl CameraRig {
    pub fn new(cfg: CameraRigConfig) -> Self {
        Self {
            cfg,
            mode: CameraMode::ThirdPerson,
            zoom: ZoomState::Normal,
            zoom_level: 0,
            tilt: 0.0,
            bob_phase: 0.0,
            bob_active: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    #[inline]
    pub fn zoom_state(&self) -> ZoomState {
        self.zoom
    }

    #[inline]
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    #[inline]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Switch perspective, dropping all transient state (tilt, bob
    /// phase, zoom level) so the new mode starts from its base offset.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.zoom = ZoomState::Normal;
        self.zoom_level = 0;
        self.tilt = 0.0;
        self.bob_phase = 0.0;
        self.bob_active = false;
    }

    /// Boom offset after zoom: the configured base moved along its own
    /// axis by `level * step` (positive levels pull the camera in).
    pub fn effective_offset(&self) -> Vec3 {
        let base = self.cfg.base_offset;
        base - base.normalize_or_zero() * (self.zoom_level as f32 * self.cfg.zoom_step)
    }

    /// Advance rig state and derive the camera pose for this frame.
    pub fn update(&mut self, pose: &AvatarPose, cmd: &RigCmd, dt: f32) -> CameraPose {
        if cmd.first_person {
            self.set_mode(CameraMode::FirstPerson);
        } else if cmd.third_person {
            self.set_mode(CameraMode::ThirdPerson);
        }

        self.update_zoom(cmd);
        self.update_tilt(cmd);
        let bob = self.update_bob(cmd, dt);

        match self.mode {
            CameraMode::ThirdPerson => self.third_person_pose(pose),
            CameraMode::FirstPerson => self.first_person_pose(pose, bob),
        }
    }

    /* ── zoom state machine ─────────────────────────────────────────── */

    fn update_zoom(&mut self, cmd: &RigCmd) {
        if cmd.zoom_in || cmd.zoom_out {
            self.zoom = ZoomState::Zooming;
            // One request per held frame; clamped, so requests past the
            // limit leave the level unchanged.
            if cmd.zoom_in {
                self.zoom_level = (self.zoom_level + 1).min(self.cfg.zoom_max);
            }
            if cmd.zoom_out {
                self.zoom_level = (self.zoom_level - 1).max(self.cfg.zoom_min);
            }
        } else if self.zoom == ZoomState::Zooming {
            // Release returns the mode to its base offset.
            self.zoom = ZoomState::Normal;
            self.zoom_level = 0;
        }
    }

    /* ── head tilt ──────────────────────────────────────────────────── */

    fn update_tilt(&mut self, cmd: &RigCmd) {
        let target = match (cmd.tilt_left, cmd.tilt_right) {
            (true, false) => self.cfg.tilt_max,
            (false, true) => -self.cfg.tilt_max,
            _ => 0.0,
        };
        // Fixed per-frame blend toward the target, never a snap.
        self.tilt += (target - self.tilt) * self.cfg.tilt_blend;
    }

    /* ── head bob ───────────────────────────────────────────────────── */

    fn update_bob(&mut self, cmd: &RigCmd, dt: f32) -> f32 {
        if self.mode != CameraMode::FirstPerson {
            return 0.0;
        }
        let freq = if cmd.sprinting {
            self.cfg.bob_freq_run
        } else {
            self.cfg.bob_freq_walk
        };
        if cmd.moving_forward {
            self.bob_phase += freq * dt;
            self.bob_active = true;
        } else if self.bob_active {
            // Run the wave out to its next zero-crossing instead of
            // cutting off mid-cycle.
            let before = self.bob_phase.sin();
            self.bob_phase += self.cfg.bob_freq_walk * dt;
            if before == 0.0 || before.signum() != self.bob_phase.sin().signum() {
                self.bob_phase = 0.0;
                self.bob_active = false;
            }
        }
        if self.bob_active {
            self.cfg.bob_amplitude * self.bob_phase.sin()
        } else {
            0.0
        }
    }

    /* ── pose derivation ────────────────────────────────────────────── */

    fn third_person_pose(&self, pose: &AvatarPose) -> CameraPose {
        let boom = Mat3::from_rotation_y(pose.yaw) * self.effective_offset();
        let eye = pose.position + boom;
        let target = pose.position + self.cfg.target_offset;
        let dir = (target - eye).normalize_or_zero();
        CameraPose {
            eye,
            yaw: (-dir.x).atan2(-dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            roll: 0.0,
        }
    }

    fn first_person_pose(&self, pose: &AvatarPose, bob: f32) -> CameraPose {
        CameraPose {
            eye: pose.position + self.cfg.head_offset + Vec3::Y * bob,
            yaw: pose.yaw + PI,
            pitch: pose.pitch,
            roll: self.tilt,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraRigConfig::default())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
