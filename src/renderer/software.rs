//! Software wireframe back-end: near-plane clip, perspective project,
//! Bresenham rasterise into a `Vec<u32>` frame-buffer.

use glam::Vec3;
use smallvec::SmallVec;

use super::{DrawCall, Fog, NEAR_PLANE, Renderer, Rgba, Viewport, lerp_rgba};

#[derive(Default)]
pub struct Software {
    fb: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    /// Clip a camera-space segment against the near plane.
    /// Returns zero points (fully behind) or both clipped endpoints.
    fn clip_near(a: Vec3, b: Vec3) -> SmallVec<[Vec3; 2]> {
        let (da, db) = (Viewport::depth(a), Viewport::depth(b));
        let mut out = SmallVec::new();
        if da < NEAR_PLANE && db < NEAR_PLANE {
            return out;
        }
        let clip = |from: Vec3, d_from: f32, to: Vec3, d_to: f32| {
            let t = (NEAR_PLANE - d_from) / (d_to - d_from);
            from + (to - from) * t
        };
        out.push(if da < NEAR_PLANE {
            clip(a, da, b, db)
        } else {
            a
        });
        out.push(if db < NEAR_PLANE {
            clip(b, db, a, da)
        } else {
            b
        });
        out
    }

    fn fogged(colour: Rgba, depth: f32, fog: &Fog) -> Option<Rgba> {
        let t = (depth - fog.near) / (fog.far - fog.near);
        if t >= 1.0 {
            return None; // fully fogged out, matches the clear colour
        }
        Some(lerp_rgba(colour, fog.colour, t.max(0.0)))
    }

    fn plot(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.fb[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, width: usize, height: usize, clear: Rgba) {
        self.width = width;
        self.height = height;
        self.fb.clear();
        self.fb.resize(width * height, clear);
    }

    fn draw(&mut self, calls: &[DrawCall], view: &Viewport) {
        for call in calls {
            match call {
                DrawCall::Edge(edge) => {
                    let a = view.to_camera(edge.a);
                    let b = view.to_camera(edge.b);
                    let clipped = Self::clip_near(a, b);
                    let [ca, cb] = match clipped.as_slice() {
                        [ca, cb] => [*ca, *cb],
                        _ => continue,
                    };
                    let depth = Viewport::depth((ca + cb) * 0.5);
                    let Some(colour) = Self::fogged(edge.colour, depth, &view.fog) else {
                        continue;
                    };
                    let (Some(pa), Some(pb)) = (view.project(ca), view.project(cb)) else {
                        continue;
                    };
                    self.draw_line(pa.x as i32, pa.y as i32, pb.x as i32, pb.y as i32, colour);
                }
                DrawCall::Marker { pos, colour } => {
                    let p = view.to_camera(*pos);
                    let Some(colour) = Self::fogged(*colour, Viewport::depth(p), &view.fog) else {
                        continue;
                    };
                    let Some(s) = view.project(p) else { continue };
                    let (x, y) = (s.x as i32, s.y as i32);
                    for d in -2..=2 {
                        self.plot(x + d, y, colour);
                        self.plot(x, y + d, colour);
                    }
                }
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.fb, self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Edge;
    use crate::world::CameraPose;

    fn test_view() -> Viewport {
        Viewport::new(
            &CameraPose {
                eye: Vec3::ZERO,
                yaw: 0.0,
                pitch: 0.0,
                roll: 0.0,
            },
            std::f32::consts::FRAC_PI_2,
            64,
            64,
            Fog {
                colour: 0x0010_1010,
                near: 50.0,
                far: 120.0,
            },
        )
    }

    #[test]
    fn visible_edge_touches_the_buffer() {
        let mut sw = Software::default();
        sw.begin_frame(64, 64, 0);
        let calls = vec![DrawCall::Edge(Edge {
            a: Vec3::new(-1.0, 0.0, -5.0),
            b: Vec3::new(1.0, 0.0, -5.0),
            colour: 0x00FF_FFFF,
        })];
        sw.draw(&calls, &test_view());
        let mut touched = 0usize;
        sw.end_frame(|fb, _, _| touched = fb.iter().filter(|&&p| p != 0).count());
        assert!(touched > 0);
    }

    #[test]
    fn edge_behind_the_eye_is_rejected() {
        let mut sw = Software::default();
        sw.begin_frame(64, 64, 0);
        let calls = vec![DrawCall::Edge(Edge {
            a: Vec3::new(-1.0, 0.0, 5.0),
            b: Vec3::new(1.0, 0.0, 5.0),
            colour: 0x00FF_FFFF,
        })];
        sw.draw(&calls, &test_view());
        let mut touched = 0usize;
        sw.end_frame(|fb, _, _| touched = fb.iter().filter(|&&p| p != 0).count());
        assert_eq!(touched, 0);
    }

    #[test]
    fn segment_straddling_the_near_plane_is_clipped_not_dropped() {
        let a = Vec3::new(0.0, 0.0, -5.0); // in front (camera space)
        let b = Vec3::new(0.0, 0.0, 5.0); // behind
        let clipped = Software::clip_near(a, b);
        assert_eq!(clipped.len(), 2);
        assert!(Viewport::depth(clipped[1]) >= NEAR_PLANE - 1e-6);
    }

    #[test]
    fn fog_swallows_distant_edges() {
        let fog = Fog {
            colour: 0x0010_1010,
            near: 50.0,
            far: 120.0,
        };
        assert!(Software::fogged(0x00FF_FFFF, 200.0, &fog).is_none());
        assert_eq!(Software::fogged(0x00FF_FFFF, 10.0, &fog), Some(0x00FF_FFFF));
    }
}
