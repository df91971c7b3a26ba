//! Rendering abstraction layer.
//!
//! The simulation never touches a pixel buffer. It produces a list of
//! [`DrawCall`]s in world space and hands them, with a [`Viewport`],
//! to a type implementing [`Renderer`]. Back-ends can be swapped
//! without touching the rig.

use glam::{Mat4, Vec2, Vec3};

use crate::world::{Aabb, CameraPose};

/// Pixel format of the frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Per-channel linear blend between two colours.
pub fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t) as u32) & 0xFF
    };
    (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

/// Distance fog; segments fade into `colour` between `near` and `far`.
#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub colour: Rgba,
    pub near: f32,
    pub far: f32,
}

/// One wireframe edge in world space.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub a: Vec3,
    pub b: Vec3,
    pub colour: Rgba,
}

pub enum DrawCall {
    Edge(Edge),
    /// Small screen-space cross, used for point lights.
    Marker { pos: Vec3, colour: Rgba },
}

/// Camera-derived projection state for one frame.
pub struct Viewport {
    view: Mat4,
    focal: f32,
    pub width: usize,
    pub height: usize,
    pub fog: Fog,
}

/// Anything closer than this to the eye plane is clipped away.
pub const NEAR_PLANE: f32 = 0.1;

impl Viewport {
    pub fn new(camera: &CameraPose, fov: f32, width: usize, height: usize, fog: Fog) -> Self {
        Self {
            view: camera.world_from_camera().inverse(),
            // focal = w / (2 * tan(fov/2)), pixels per unit at depth 1
            focal: width as f32 * 0.5 / (fov * 0.5).tan(),
            width,
            height,
            fog,
        }
    }

    /// World point into camera space (camera looks down −Z).
    #[inline]
    pub fn to_camera(&self, p: Vec3) -> Vec3 {
        self.view.transform_point3(p)
    }

    /// Camera-space depth along the view axis.
    #[inline]
    pub fn depth(cam_p: Vec3) -> f32 {
        -cam_p.z
    }

    /// Perspective-project a camera-space point onto the screen.
    /// Returns `None` in front of the near plane.
    pub fn project(&self, cam_p: Vec3) -> Option<Vec2> {
        let depth = Self::depth(cam_p);
        if depth < NEAR_PLANE {
            return None;
        }
        Some(Vec2::new(
            cam_p.x * self.focal / depth + self.width as f32 * 0.5,
            self.height as f32 * 0.5 - cam_p.y * self.focal / depth,
        ))
    }
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` loans the finished buffer to a user-supplied closure;
/// software callers typically forward it to their window manager.
pub trait Renderer {
    /// (Re)allocate scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize, clear: Rgba);

    /// Rasterise the draw list through `view` into the internal buffer.
    fn draw(&mut self, calls: &[DrawCall], view: &Viewport);

    /// Finish the frame and hand the buffer to `submit` exactly once.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/* ── draw-list helpers ──────────────────────────────────────────────── */

/// Append the twelve edges of a box to the draw list.
pub fn push_box_edges(out: &mut Vec<DrawCall>, aabb: &Aabb, colour: Rgba) {
    let (lo, hi) = (aabb.min, aabb.max);
    let c = [
        Vec3::new(lo.x, lo.y, lo.z),
        Vec3::new(hi.x, lo.y, lo.z),
        Vec3::new(hi.x, lo.y, hi.z),
        Vec3::new(lo.x, lo.y, hi.z),
        Vec3::new(lo.x, hi.y, lo.z),
        Vec3::new(hi.x, hi.y, lo.z),
        Vec3::new(hi.x, hi.y, hi.z),
        Vec3::new(lo.x, hi.y, hi.z),
    ];
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0), // bottom ring
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4), // top ring
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7), // verticals
    ];
    for (i, j) in EDGES {
        out.push(DrawCall::Edge(Edge {
            a: c[i],
            b: c[j],
            colour,
        }));
    }
}

/// Append a square ground grid centred on the origin at height `y`.
pub fn push_ground_grid(out: &mut Vec<DrawCall>, half: f32, step: f32, y: f32, colour: Rgba) {
    let mut s = -half;
    while s <= half + f32::EPSILON {
        out.push(DrawCall::Edge(Edge {
            a: Vec3::new(s, y, -half),
            b: Vec3::new(s, y, half),
            colour,
        }));
        out.push(DrawCall::Edge(Edge {
            a: Vec3::new(-half, y, s),
            b: Vec3::new(half, y, s),
            colour,
        }));
        s += step;
    }
}

pub mod software;
pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_rgba_endpoints_and_midpoint() {
        assert_eq!(lerp_rgba(0x00FF_8040, 0x0000_0000, 0.0), 0x00FF_8040);
        assert_eq!(lerp_rgba(0x00FF_8040, 0x0000_0000, 1.0), 0x0000_0000);
        assert_eq!(lerp_rgba(0x0000_0000, 0x00FF_FFFF, 0.5), 0x007F_7F7F);
    }

    #[test]
    fn box_has_twelve_edges() {
        let mut calls = Vec::new();
        let aabb = Aabb::from_center_half(Vec3::ZERO, Vec3::ONE);
        push_box_edges(&mut calls, &aabb, 0x00FF_FFFF);
        assert_eq!(calls.len(), 12);
    }

    #[test]
    fn projection_centres_the_look_axis() {
        let cam = CameraPose {
            eye: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        };
        let view = Viewport::new(
            &cam,
            std::f32::consts::FRAC_PI_2,
            640,
            480,
            Fog {
                colour: 0,
                near: 50.0,
                far: 120.0,
            },
        );
        // A point straight down the look axis lands on the screen centre.
        let p = view.to_camera(Vec3::new(0.0, 0.0, -10.0));
        let screen = view.project(p).expect("in front of camera");
        assert!((screen - Vec2::new(320.0, 240.0)).length() < 1e-3);
        // Behind the eye: rejected.
        let behind = view.to_camera(Vec3::new(0.0, 0.0, 10.0));
        assert!(view.project(behind).is_none());
    }
}
