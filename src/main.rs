//! Minimal 2-D top-down scene-pack viewer.
//!
//! ```bash
//! cargo run --bin glade_rs -- <scene.pack>
//! ```
//!
//! Draws the static obstacle footprints, dynamic prop placements,
//! patrol beats and the avatar start, for sanity-checking a freshly
//! baked pack before walking through it in 3-D.

use minifb::{Key, Window, WindowOptions};
use std::error::Error;

use glade_rs::assets::ScenePack;
use glade_rs::defs;

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;

const COLOUR_STATIC: u32 = 0x00_FFFFFF;
const COLOUR_DYNAMIC: u32 = 0x00_50C878;
const COLOUR_PATROL: u32 = 0x00_806020;
const COLOUR_AVATAR: u32 = 0x00_4080FF;

fn main() -> Result<(), Box<dyn Error>> {
    // ─────────── parse CLI ────────────
    let mut args = std::env::args().skip(1);
    let pack_path = args.next().expect("usage: <prog> <scene.pack>");

    // ─────────── load the pack ────────
    let pack = ScenePack::from_file(&pack_path)?;
    println!(
        "{}: {} props, {} clips",
        pack_path,
        pack.props.len(),
        pack.clips.len()
    );

    // ─────────── world-space → screen-space transform ────────────
    let mut min = (f32::MAX, f32::MAX);
    let mut max = (f32::MIN, f32::MIN);
    let mut visit = |x: f32, z: f32| {
        min = (min.0.min(x), min.1.min(z));
        max = (max.0.max(x), max.1.max(z));
    };
    for b in pack.static_obstacles() {
        visit(b.min.x, b.min.z);
        visit(b.max.x, b.max.z);
    }
    for p in &pack.props {
        visit(p.position.x, p.position.z);
    }
    visit(pack.avatar.position.x, pack.avatar.position.z);

    let map_w = (max.0 - min.0).max(1.0);
    let map_h = (max.1 - min.1).max(1.0);
    let scale = (WIDTH as f32 / map_w).min(HEIGHT as f32 / map_h) * 0.9; // 10 % margin
    let offset_x = (WIDTH as f32 - map_w * scale) / 2.0;
    let offset_y = (HEIGHT as f32 - map_h * scale) / 2.0;

    let to_screen = |x: f32, z: f32| -> (i32, i32) {
        let sx = ((x - min.0) * scale + offset_x) as i32;
        let sy = HEIGHT as i32 - ((z - min.1) * scale + offset_y) as i32; // invert so +Z is up
        (sx, sy)
    };

    // ─────────── rasterise footprints ────────────
    let mut buffer = vec![0u32; WIDTH * HEIGHT];
    let rect = |buf: &mut [u32], x0: f32, z0: f32, x1: f32, z1: f32, colour: u32| {
        let (ax, ay) = to_screen(x0, z0);
        let (bx, by) = to_screen(x1, z1);
        draw_line(buf, WIDTH, HEIGHT, ax, ay, bx, ay, colour);
        draw_line(buf, WIDTH, HEIGHT, bx, ay, bx, by, colour);
        draw_line(buf, WIDTH, HEIGHT, bx, by, ax, by, colour);
        draw_line(buf, WIDTH, HEIGHT, ax, by, ax, ay, colour);
    };

    for b in pack.static_obstacles() {
        rect(&mut buffer, b.min.x, b.min.z, b.max.x, b.max.z, COLOUR_STATIC);
    }

    for prop in &pack.props {
        let Some(info) = defs::by_id(&prop.class) else {
            continue;
        };
        if info.has_dynamic_bounds() {
            let half = info.half_extents * prop.scale;
            rect(
                &mut buffer,
                prop.position.x - half.x,
                prop.position.z - half.z,
                prop.position.x + half.x,
                prop.position.z + half.z,
                COLOUR_DYNAMIC,
            );
        }
        if let Some(p) = &prop.patrol {
            // Draw the beat the prop walks.
            let across = prop.position - p.axis * prop.position.dot(p.axis);
            let a = across + p.axis * p.min;
            let b = across + p.axis * p.max;
            let (ax, ay) = to_screen(a.x, a.z);
            let (bx, by) = to_screen(b.x, b.z);
            draw_line(&mut buffer, WIDTH, HEIGHT, ax, ay, bx, by, COLOUR_PATROL);
        }
    }

    let (ax, ay) = to_screen(pack.avatar.position.x, pack.avatar.position.z);
    draw_line(&mut buffer, WIDTH, HEIGHT, ax - 6, ay, ax + 6, ay, COLOUR_AVATAR);
    draw_line(&mut buffer, WIDTH, HEIGHT, ax, ay - 6, ax, ay + 6, COLOUR_AVATAR);

    // ─────────── show window ────────────
    let mut window = Window::new("Scene layout", WIDTH, HEIGHT, WindowOptions::default())?;
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

/// Integer Bresenham line-drawing algorithm.
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
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
