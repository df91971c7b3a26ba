//! Static scenery class table.
//!
//! One row per model the scene packs may place. `half_extents` is the
//! model-space half-size of the mesh's tight bounding box at scale 1;
//! `inset` shrinks the *scaled* collision box for classes whose visual
//! silhouette is larger than the walkable footprint (tree canopies,
//! tent canvas).

use glam::Vec3;

use super::flags::PropFlags;

#[derive(Debug, Clone)]
pub struct SceneryInfo {
    pub id: &'static str,
    /// Default clip played when a placement names none.
    pub clip: Option<&'static str>,
    /// Model-space half-size of the mesh bounding box at scale 1.
    pub half_extents: Vec3,
    /// Signed margin applied to the scaled box (negative = shrink).
    pub inset: f32,
    pub flags: PropFlags,
}

impl SceneryInfo {
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.flags.contains(PropFlags::SOLID)
    }

    #[inline]
    pub fn has_dynamic_bounds(&self) -> bool {
        self.flags.contains(PropFlags::DYNAMIC_BOUNDS)
    }
}

const SOLID: PropFlags = PropFlags::SOLID;
const DYN: PropFlags = PropFlags::DYNAMIC_BOUNDS;
const ANIM: PropFlags = PropFlags::ANIMATED;
const LIGHT: PropFlags = PropFlags::EMITS_LIGHT;

pub const SCENERYINFO: &[SceneryInfo] = &[
    SceneryInfo {
        id: "ADVENTURER",
        clip: Some("CharacterArmature|Idle"),
        half_extents: Vec3::new(0.45, 0.95, 0.45),
        inset: 0.0,
        flags: ANIM.union(DYN),
    },
    SceneryInfo {
        id: "STAG",
        clip: Some("Eating"),
        half_extents: Vec3::new(0.9, 1.4, 1.5),
        inset: 0.0,
        flags: SOLID.union(DYN).union(ANIM),
    },
    SceneryInfo {
        id: "DEER",
        clip: Some("Eating"),
        half_extents: Vec3::new(0.7, 1.2, 1.3),
        inset: 0.0,
        flags: SOLID.union(DYN).union(ANIM),
    },
    SceneryInfo {
        id: "FOX",
        clip: Some("Gallop"),
        half_extents: Vec3::new(0.35, 0.55, 0.9),
        inset: 0.0,
        flags: SOLID.union(DYN).union(ANIM),
    },
    SceneryInfo {
        id: "WOLF",
        clip: Some("Eating"),
        half_extents: Vec3::new(0.5, 0.8, 1.2),
        inset: 0.0,
        flags: SOLID.union(DYN).union(ANIM),
    },
    // Sheep and the shepherd dog never blocked the player in the source
    // scene, so they stay out of the obstacle set.
    SceneryInfo {
        id: "SHEEP",
        clip: Some("Armature|Idle"),
        half_extents: Vec3::new(0.6, 0.9, 1.1),
        inset: 0.0,
        flags: ANIM,
    },
    SceneryInfo {
        id: "SHEPHERD",
        clip: Some("Idle_2"),
        half_extents: Vec3::new(0.4, 0.9, 1.1),
        inset: 0.0,
        flags: ANIM,
    },
    SceneryInfo {
        id: "RV",
        clip: None,
        half_extents: Vec3::new(1.2, 1.5, 2.8),
        inset: 0.0,
        flags: SOLID.union(DYN),
    },
    SceneryInfo {
        id: "CAMPFIRE",
        clip: None,
        half_extents: Vec3::new(0.8, 0.5, 0.8),
        inset: 0.0,
        flags: LIGHT,
    },
    SceneryInfo {
        id: "LANTERN",
        clip: None,
        half_extents: Vec3::new(0.3, 1.2, 0.3),
        inset: 0.0,
        flags: LIGHT,
    },
    SceneryInfo {
        id: "TREE",
        clip: None,
        half_extents: Vec3::new(1.0, 3.0, 1.0),
        inset: -11.0,
        flags: SOLID,
    },
    SceneryInfo {
        id: "WOODLOG",
        clip: None,
        half_extents: Vec3::new(1.2, 0.5, 0.6),
        inset: -1.9,
        flags: SOLID,
    },
    SceneryInfo {
        id: "TENT",
        clip: None,
        half_extents: Vec3::new(1.5, 1.2, 1.5),
        inset: -9.0,
        flags: SOLID,
    },
    SceneryInfo {
        id: "ROCK",
        clip: None,
        half_extents: Vec3::new(1.0, 0.8, 1.0),
        inset: -6.0,
        flags: SOLID,
    },
    SceneryInfo {
        id: "GRASS",
        clip: None,
        half_extents: Vec3::new(0.4, 0.3, 0.4),
        inset: 0.0,
        flags: PropFlags::empty(),
    },
    SceneryInfo {
        id: "GLASS_PANE",
        clip: None,
        half_extents: Vec3::new(3.75, 4.5, 0.5),
        inset: 0.0,
        flags: PropFlags::empty(),
    },
    SceneryInfo {
        id: "GUITAR",
        clip: None,
        half_extents: Vec3::new(0.3, 0.5, 0.1),
        inset: 0.0,
        flags: PropFlags::empty(),
    },
];

#[cfg(test)]
mod tests {
    use super::super::by_id;
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in SCENERYINFO.iter().enumerate() {
            for b in &SCENERYINFO[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let tree = by_id("TREE").expect("TREE class missing");
        assert!(tree.is_solid());
        assert!(tree.inset < 0.0);
        assert!(by_id("MARTIAN").is_none());
    }

    #[test]
    fn insets_only_shrink() {
        for info in SCENERYINFO {
            assert!(info.inset <= 0.0, "{} grows its box", info.id);
        }
    }
}
