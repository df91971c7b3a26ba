//! Session: the explicit simulation context.
//!
//! Owns the ECS world of scenery, the avatar, the camera rig, the
//! obstacle set and the day-night clock, and drives one frame in a
//! fixed order: wander → bounds refresh → avatar integration → mixers
//! → camera rig.

use glam::Vec3;
use hecs::{EntityBuilder, World};
use tracing::warn;

use crate::assets::ScenePack;
use crate::defs::{self, AnimTag, SceneryInfo};
use crate::world::{
    Aabb, CameraPose, CameraRig, DayNight, ObstacleSet, RigCmd, SceneColours,
};

use super::avatar as motion;
use super::collision;
use super::components::{
    AvatarPose, FrameCmd, Heading, Patrol, Position, Prop, Scale, Turn, WorldBounds,
};
use super::mixer::{ClipInfo, Mixer};
use super::wander::{refresh_bounds, wander};

/// Upper bound on a frame step; longer stalls lose time instead of
/// teleporting the avatar.
pub const MAX_DT: f32 = 0.1;

pub struct Avatar {
    pub pose: AvatarPose,
    pub info: &'static SceneryInfo,
    pub scale: f32,
    pub speed: f32,
    pub mixer: Mixer,
}

impl Avatar {
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.info.half_extents * self.scale
    }

    /// Tight world box, recomputed from the current pose.
    pub fn bounds(&self) -> Aabb {
        collision::avatar_box(self.pose.position, self.half_extents())
    }
}

/// What the renderer consumes after one frame.
pub struct FrameOutput {
    pub camera: CameraPose,
    pub colours: SceneColours,
}

pub struct Session {
    world: World,
    pub avatar: Avatar,
    pub rig: CameraRig,
    pub obstacles: ObstacleSet,
    pub daynight: DayNight,
}

impl Session {
    pub fn new(pack: &ScenePack) -> Self {
        let mut world = World::new();
        for prop in &pack.props {
            // Classes were validated when the pack was parsed.
            let info = defs::by_id(&prop.class).expect("pack validated at load");

            let mut builder = EntityBuilder::new();
            builder
                .add(Position(prop.position))
                .add(Heading(prop.yaw))
                .add(Scale(prop.scale))
                .add(Prop(info));

            if info.has_dynamic_bounds() {
                builder.add(WorldBounds(Aabb::from_center_half(
                    prop.position,
                    info.half_extents * prop.scale,
                )));
            }
            if let Some(p) = &prop.patrol {
                builder.add(Patrol {
                    axis: p.axis,
                    min: p.min,
                    max: p.max,
                    speed: p.speed,
                    turn: if p.snap_turn {
                        Turn::Snap
                    } else {
                        Turn::Gradual { rate: p.turn_rate }
                    },
                });
            }
            if let Some(mixer) = scenery_mixer(pack, prop.clip.as_deref(), info) {
                builder.add(mixer);
            }
            world.spawn(builder.build());
        }

        let info = defs::by_id(&pack.avatar.class).expect("pack validated at load");
        let avatar = Avatar {
            pose: AvatarPose {
                position: pack.avatar.position,
                yaw: pack.avatar.yaw,
                ..AvatarPose::default()
            },
            info,
            scale: pack.avatar.scale,
            speed: pack.avatar.speed,
            mixer: avatar_mixer(pack),
        };

        Self {
            world,
            avatar,
            rig: CameraRig::default(),
            obstacles: ObstacleSet::with_static(pack.static_obstacles()),
            daynight: DayNight::default(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run one frame. `dt` is wall-clock seconds since the previous
    /// frame, clamped to [`MAX_DT`].
    pub fn frame(&mut self, cmd: &FrameCmd, dt: f32) -> FrameOutput {
        let dt = dt.clamp(0.0, MAX_DT);
        self.daynight.advance(dt);

        wander(&mut self.world, dt);
        refresh_bounds(&mut self.world, &mut self.obstacles);

        let half_extents = self.avatar.half_extents();
        let moved = motion::integrate(
            &mut self.avatar.pose,
            &cmd.avatar,
            self.avatar.speed,
            half_extents,
            &self.obstacles,
            dt,
        );

        if cmd.avatar.wave {
            self.avatar.mixer.trigger(AnimTag::Wave);
        }
        self.avatar.mixer.request(self.avatar.pose.anim);
        self.avatar.mixer.update(dt);
        for (_, mixer) in self.world.query_mut::<&mut Mixer>() {
            mixer.update(dt);
        }

        let rig_cmd = RigCmd {
            moving_forward: moved.moved_forward,
            sprinting: cmd.avatar.sprint && moved.moving,
            ..cmd.rig
        };
        let camera = self.rig.update(&self.avatar.pose, &rig_cmd, dt);
        // Head tilt is cosmetic on the pose; the rig owns the smoothing.
        self.avatar.pose.roll = self.rig.tilt();

        FrameOutput {
            camera,
            colours: self.daynight.colours(),
        }
    }
}

/// Single-clip mixer for scenery, honouring the placement override.
fn scenery_mixer(
    pack: &ScenePack,
    override_clip: Option<&str>,
    info: &'static SceneryInfo,
) -> Option<Mixer> {
    let name = override_clip.or(info.clip)?;
    match pack.find_clip(name) {
        Some((id, clip)) => {
            let mut mixer = Mixer::new();
            mixer.map(
                AnimTag::Idle,
                ClipInfo {
                    id,
                    duration: clip.duration,
                    looping: clip.looping,
                },
            );
            Some(mixer)
        }
        None => {
            warn!(class = info.id, clip = name, "clip missing from pack; scenery stays static");
            None
        }
    }
}

/// Full tag table for the avatar; unmapped tags stay empty and the
/// mixer reports them once if they are ever requested.
fn avatar_mixer(pack: &ScenePack) -> Mixer {
    let mut mixer = Mixer::new();
    for tag in AnimTag::ALL {
        if let Some((id, clip)) = pack.find_clip(tag.clip_name()) {
            mixer.map(
                tag,
                ClipInfo {
                    id,
                    duration: clip.duration,
                    looping: clip.looping,
                },
            );
        }
    }
    mixer
}
