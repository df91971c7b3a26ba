//! Scene-pack loader.
//!
//! A pack is one little-endian binary file holding everything a scene
//! needs: the avatar definition, the animation clip directory, and the
//! prop placements. The whole file is read into memory and parsed in
//! one pass; classes are validated against the scenery table so a bad
//! pack fails at load, not mid-frame.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use glam::Vec3;
use thiserror::Error;

use crate::defs;

pub const SCENE_PACK_MAGIC: &[u8; 4] = b"GLDE";
pub const SCENE_PACK_VERSION: u16 = 1;

/// Errors that can be encountered while opening/parsing a scene pack.
#[derive(Error, Debug)]
pub enum ScenePackError {
    /// Underlying I/O failure – propagated unchanged. Truncated packs
    /// surface here as `UnexpectedEof`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header magic wasn't `GLDE`.
    #[error("not a scene pack")]
    BadMagic,

    #[error("unsupported scene pack version {0}")]
    UnsupportedVersion(u16),

    /// A string chunk wasn't valid UTF-8.
    #[error("malformed name string")]
    BadString,

    /// A placement names a class the scenery table doesn't know.
    #[error("unknown scenery class `{0}`")]
    UnknownClass(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipDef {
    pub name: String,
    pub duration: f32,
    pub looping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolDef {
    pub axis: Vec3,
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    /// Face the travel direction instantly instead of easing.
    pub snap_turn: bool,
    /// Radians per second while easing.
    pub turn_rate: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropPlacement {
    pub class: String,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    /// Clip override; `None` falls back to the class default.
    pub clip: Option<String>,
    pub patrol: Option<PatrolDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarDef {
    pub class: String,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub speed: f32,
}

/// Entire scene pack resident in memory.
#[derive(Debug)]
pub struct ScenePack {
    pub avatar: AvatarDef,
    pub clips: Vec<ClipDef>,
    pub props: Vec<PropPlacement>,
    /// fast name → index lookup
    by_name: HashMap<String, u16>,
}

impl ScenePack {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenePackError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScenePackError> {
        let mut cursor = bytes;
        let r = &mut cursor;

        /*----------- 1. header -----------------------------------------*/
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != SCENE_PACK_MAGIC {
            return Err(ScenePackError::BadMagic);
        }
        let version = r.read_u16::<LE>()?;
        if version != SCENE_PACK_VERSION {
            return Err(ScenePackError::UnsupportedVersion(version));
        }

        /*----------- 2. avatar -----------------------------------------*/
        let avatar = AvatarDef {
            class: read_string(r)?,
            position: read_vec3(r)?,
            yaw: r.read_f32::<LE>()?,
            scale: r.read_f32::<LE>()?,
            speed: r.read_f32::<LE>()?,
        };
        if defs::by_id(&avatar.class).is_none() {
            return Err(ScenePackError::UnknownClass(avatar.class));
        }

        /*----------- 3. clip directory ---------------------------------*/
        let n_clips = r.read_u16::<LE>()?;
        let mut clips = Vec::with_capacity(n_clips as usize);
        for _ in 0..n_clips {
            clips.push(ClipDef {
                name: read_string(r)?,
                duration: r.read_f32::<LE>()?,
                looping: r.read_u8()? & 0x01 != 0,
            });
        }

        /*----------- 4. prop placements --------------------------------*/
        let n_props = r.read_u16::<LE>()?;
        let mut props = Vec::with_capacity(n_props as usize);
        for _ in 0..n_props {
            let class = read_string(r)?;
            if defs::by_id(&class).is_none() {
                return Err(ScenePackError::UnknownClass(class));
            }
            let position = read_vec3(r)?;
            let yaw = r.read_f32::<LE>()?;
            let scale = r.read_f32::<LE>()?;
            let clip = match read_string(r)? {
                s if s.is_empty() => None,
                s => Some(s),
            };
            let patrol = match r.read_u8()? {
                0 => None,
                kind => Some(PatrolDef {
                    axis: read_vec3(r)?,
                    min: r.read_f32::<LE>()?,
                    max: r.read_f32::<LE>()?,
                    speed: r.read_f32::<LE>()?,
                    snap_turn: kind == 2,
                    turn_rate: r.read_f32::<LE>()?,
                }),
            };
            props.push(PropPlacement {
                class,
                position,
                yaw,
                scale,
                clip,
                patrol,
            });
        }

        /*----------- 5. build reverse index ----------------------------*/
        let mut by_name = HashMap::with_capacity(clips.len());
        for (i, clip) in clips.iter().enumerate() {
            by_name.entry(clip.name.clone()).or_insert(i as u16);
        }

        Ok(Self {
            avatar,
            clips,
            props,
            by_name,
        })
    }

    /// Locate a clip by name. Returns its directory index or `None`.
    pub fn find_clip(&self, name: &str) -> Option<(u16, &ClipDef)> {
        let id = *self.by_name.get(name)?;
        Some((id, &self.clips[id as usize]))
    }

    /// Bake the static obstacle list: every solid prop without dynamic
    /// bounds contributes its scaled, inset box.
    pub fn static_obstacles(&self) -> Vec<crate::world::Aabb> {
        use crate::world::Aabb;
        self.props
            .iter()
            .filter_map(|p| {
                let info = defs::by_id(&p.class)?;
                if !info.is_solid() || info.has_dynamic_bounds() {
                    return None;
                }
                let half = info.half_extents * p.scale;
                let aabb = Aabb::from_center_half(p.position + Vec3::Y * half.y, half);
                Some(aabb.expand(info.inset))
            })
            .collect()
    }

    /// Serialise in the exact layout `from_bytes` parses.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(SCENE_PACK_MAGIC)?;
        w.write_u16::<LE>(SCENE_PACK_VERSION)?;

        write_string(w, &self.avatar.class)?;
        write_vec3(w, self.avatar.position)?;
        w.write_f32::<LE>(self.avatar.yaw)?;
        w.write_f32::<LE>(self.avatar.scale)?;
        w.write_f32::<LE>(self.avatar.speed)?;

        w.write_u16::<LE>(self.clips.len() as u16)?;
        for clip in &self.clips {
            write_string(w, &clip.name)?;
            w.write_f32::<LE>(clip.duration)?;
            w.write_u8(clip.looping as u8)?;
        }

        w.write_u16::<LE>(self.props.len() as u16)?;
        for prop in &self.props {
            write_string(w, &prop.class)?;
            write_vec3(w, prop.position)?;
            w.write_f32::<LE>(prop.yaw)?;
            w.write_f32::<LE>(prop.scale)?;
            write_string(w, prop.clip.as_deref().unwrap_or(""))?;
            match &prop.patrol {
                None => w.write_u8(0)?,
                Some(p) => {
                    w.write_u8(if p.snap_turn { 2 } else { 1 })?;
                    write_vec3(w, p.axis)?;
                    w.write_f32::<LE>(p.min)?;
                    w.write_f32::<LE>(p.max)?;
                    w.write_f32::<LE>(p.speed)?;
                    w.write_f32::<LE>(p.turn_rate)?;
                }
            }
        }
        Ok(())
    }

    /// Assemble a pack in memory (the baking tool and tests use this;
    /// files go through `from_bytes` so the index is always built).
    pub fn assemble(
        avatar: AvatarDef,
        clips: Vec<ClipDef>,
        props: Vec<PropPlacement>,
    ) -> Self {
        let mut by_name = HashMap::with_capacity(clips.len());
        for (i, clip) in clips.iter().enumerate() {
            by_name.entry(clip.name.clone()).or_insert(i as u16);
        }
        Self {
            avatar,
            clips,
            props,
            by_name,
        }
    }
}

/* ── primitive readers / writers ────────────────────────────────────── */

fn read_string(r: &mut &[u8]) -> Result<String, ScenePackError> {
    let len = r.read_u8()? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| ScenePackError::BadString)
}

fn read_vec3(r: &mut &[u8]) -> Result<Vec3, ScenePackError> {
    Ok(Vec3::new(
        r.read_f32::<LE>()?,
        r.read_f32::<LE>()?,
        r.read_f32::<LE>()?,
    ))
}

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    debug_assert!(s.len() <= u8::MAX as usize);
    w.write_u8(s.len() as u8)?;
    w.write_all(s.as_bytes())
}

fn write_vec3<W: Write>(w: &mut W, v: Vec3) -> io::Result<()> {
    w.write_f32::<LE>(v.x)?;
    w.write_f32::<LE>(v.y)?;
    w.write_f32::<LE>(v.z)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pack() -> ScenePack {
        ScenePack::assemble(
            AvatarDef {
                class: "ADVENTURER".into(),
                position: Vec3::new(5.0, 3.4, 10.0),
                yaw: 0.0,
                scale: 8.0,
                speed: 10.0,
            },
            vec![
                ClipDef {
                    name: "CharacterArmature|Idle".into(),
                    duration: 2.0,
                    looping: true,
                },
                ClipDef {
                    name: "Eating".into(),
                    duration: 1.6,
                    looping: true,
                },
            ],
            vec![
                PropPlacement {
                    class: "TREE".into(),
                    position: Vec3::new(30.0, 0.0, -12.0),
                    yaw: 0.0,
                    scale: 15.0,
                    clip: None,
                    patrol: None,
                },
                PropPlacement {
                    class: "STAG".into(),
                    position: Vec3::new(80.0, 3.0, 10.0),
                    yaw: 1.5,
                    scale: 3.0,
                    clip: Some("Eating".into()),
                    patrol: Some(PatrolDef {
                        axis: Vec3::Z,
                        min: -60.0,
                        max: 10.0,
                        speed: 6.0,
                        snap_turn: false,
                        turn_rate: 1.5,
                    }),
                },
            ],
        )
    }

    fn roundtrip(pack: &ScenePack) -> ScenePack {
        let mut bytes = Vec::new();
        pack.write_to(&mut bytes).unwrap();
        ScenePack::from_bytes(&bytes).expect("reparse")
    }

    #[test]
    fn write_then_parse_preserves_everything() {
        let parsed = roundtrip(&sample_pack());
        assert_eq!(parsed.avatar, sample_pack().avatar);
        assert_eq!(parsed.clips, sample_pack().clips);
        assert_eq!(parsed.props, sample_pack().props);
    }

    #[test]
    fn clip_lookup_by_name() {
        let parsed = roundtrip(&sample_pack());
        let (id, clip) = parsed.find_clip("Eating").expect("Eating clip");
        assert_eq!(id, 1);
        assert!((clip.duration - 1.6).abs() < 1e-6);
        assert!(parsed.find_clip("Sleeping").is_none());
    }

    #[test]
    fn static_obstacles_skip_dynamic_and_apply_insets() {
        let parsed = roundtrip(&sample_pack());
        let obstacles = parsed.static_obstacles();
        // The stag has dynamic bounds; only the tree bakes.
        assert_eq!(obstacles.len(), 1);
        let tree = defs::by_id("TREE").unwrap();
        let raw_half = tree.half_extents * 15.0;
        let baked = obstacles[0].half_size();
        assert!((baked.x - (raw_half.x + tree.inset)).abs() < 1e-4);
    }

    #[test]
    fn rejects_garbage_magic() {
        let err = ScenePack::from_bytes(b"WYRM\x01\x00rest").unwrap_err();
        assert!(matches!(err, ScenePackError::BadMagic));
    }

    #[test]
    fn rejects_future_versions() {
        let mut bytes = Vec::new();
        sample_pack().write_to(&mut bytes).unwrap();
        bytes[4] = 9; // bump the version field
        let err = ScenePack::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ScenePackError::UnsupportedVersion(9)));
    }

    #[test]
    fn truncated_pack_fails_cleanly() {
        let mut bytes = Vec::new();
        sample_pack().write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() / 2);
        let err = ScenePack::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ScenePackError::Io(_)));
    }

    #[test]
    fn unknown_class_is_rejected_at_load() {
        let mut pack = sample_pack();
        pack.props[0].class = "GRIFFIN".into();
        let mut bytes = Vec::new();
        pack.write_to(&mut bytes).unwrap();
        let err = ScenePack::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ScenePackError::UnknownClass(c) if c == "GRIFFIN"));
    }

    #[test]
    fn loads_from_disk() {
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        let mut bytes = Vec::new();
        sample_pack().write_to(&mut bytes).unwrap();
        std::fs::write(tmp.path(), &bytes).unwrap();
        let parsed = ScenePack::from_file(tmp.path()).expect("load");
        assert_eq!(parsed.props.len(), 2);
    }
}
