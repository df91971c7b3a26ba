//! First/third-person walkabout through a baked scene pack.
//!
//! ```bash
//! cargo run --release -- assets/forest.pack
//! ```
//!
//! Controls: WASD move, arrows turn, Shift sprint, mouse drag look,
//! F/T first/third person, Z/X zoom, Q/E head tilt, Space wave.

use glam::{Vec2, Vec3};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use glade_rs::assets::{Loading, ScenePack};
use glade_rs::defs::PropFlags;
use glade_rs::input::{Action, InputState};
use glade_rs::renderer::{
    DrawCall, Fog, Renderer, Software, Viewport, push_box_edges, push_ground_grid,
};
use glade_rs::sim::{FrameCmd, Position, Prop, Scale, Session};
use glade_rs::world::{Aabb, CameraMode, FOG_FAR, FOG_NEAR};

const W: usize = 1280;
const H: usize = 800;
const FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;
const GROUND_Y: f32 = 3.2;

const COLOUR_STATIC: u32 = 0x00_9AA5B1;
const COLOUR_PROP: u32 = 0x00_50C878;
const COLOUR_AVATAR: u32 = 0x00_4080FF;
const COLOUR_LIGHT: u32 = 0x00_FFFF11;
const COLOUR_GRID: u32 = 0x00_638F32;

const BINDINGS: &[(Key, Action)] = &[
    (Key::W, Action::FORWARD),
    (Key::Up, Action::FORWARD),
    (Key::S, Action::BACKWARD),
    (Key::Down, Action::BACKWARD),
    (Key::A, Action::STRAFE_LEFT),
    (Key::D, Action::STRAFE_RIGHT),
    (Key::Left, Action::ROTATE_LEFT),
    (Key::Right, Action::ROTATE_RIGHT),
    (Key::LeftShift, Action::SPRINT),
    (Key::RightShift, Action::SPRINT),
    (Key::F, Action::FIRST_PERSON),
    (Key::T, Action::THIRD_PERSON),
    (Key::Z, Action::ZOOM_IN),
    (Key::X, Action::ZOOM_OUT),
    (Key::Q, Action::TILT_LEFT),
    (Key::E, Action::TILT_RIGHT),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pack_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/forest.pack".into());

    // The pack resolves in the background; frames render sky until then.
    let mut loading = Loading::spawn(move || ScenePack::from_file(&pack_path));
    let mut session: Option<Session> = None;

    let mut win = Window::new("Forest Stroll", W, H, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut input = InputState::new();
    let mut renderer = Software::default();
    let mut calls: Vec<DrawCall> = Vec::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        if session.is_none() {
            if let Some(pack) = loading.poll() {
                info!(
                    props = pack.props.len(),
                    clips = pack.clips.len(),
                    "scene ready"
                );
                session = Some(Session::new(pack));
            }
        }

        match session.as_mut() {
            Some(session) => {
                /* --------------- one consistent snapshot per frame ----- */
                pump_input(&win, &mut input);
                let mut cmd = FrameCmd::sample(&mut input);
                cmd.avatar.wave = win.is_key_pressed(Key::Space, KeyRepeat::No); // edge-trigger

                let out = session.frame(&cmd, dt);

                /* --------------- draw list ----------------------------- */
                calls.clear();
                push_ground_grid(&mut calls, 255.0, 30.0, GROUND_Y, COLOUR_GRID);
                for aabb in session.obstacles.static_boxes() {
                    push_box_edges(&mut calls, aabb, COLOUR_STATIC);
                }
                for (_, (pos, scale, prop)) in
                    session.world().query::<(&Position, &Scale, &Prop)>().iter()
                {
                    if prop.0.flags.contains(PropFlags::EMITS_LIGHT) {
                        calls.push(DrawCall::Marker {
                            pos: pos.0 + Vec3::Y * prop.0.half_extents.y * scale.0,
                            colour: COLOUR_LIGHT,
                        });
                    }
                    let half = prop.0.half_extents * scale.0;
                    let aabb = Aabb::from_center_half(pos.0 + Vec3::Y * half.y, half);
                    push_box_edges(&mut calls, &aabb, COLOUR_PROP);
                }
                if session.rig.mode() == CameraMode::ThirdPerson {
                    push_box_edges(&mut calls, &session.avatar.bounds(), COLOUR_AVATAR);
                }

                /* --------------- render -------------------------------- */
                let fog = Fog {
                    colour: out.colours.fog,
                    near: FOG_NEAR,
                    far: FOG_FAR,
                };
                let view = Viewport::new(&out.camera, FOV, W, H, fog);
                renderer.begin_frame(W, H, out.colours.fog);
                renderer.draw(&calls, &view);
                renderer.end_frame(|fb, w, h| {
                    acc_time += t0.elapsed();
                    acc_frames += 1;
                    win.update_with_buffer(fb, w, h).unwrap()
                });
            }
            None => {
                // Not loaded (or failed): plain sky, keep the window alive.
                renderer.begin_frame(W, H, 0x00_88939E);
                renderer.end_frame(|fb, w, h| win.update_with_buffer(fb, w, h).unwrap());
            }
        }

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Mirror the polled key/mouse state into the event-driven sampler.
fn pump_input(win: &Window, input: &mut InputState) {
    let mut held = Action::empty();
    for &(key, action) in BINDINGS {
        if win.is_key_down(key) {
            held.insert(action);
        }
    }
    for action in Action::all().iter() {
        if held.contains(action) {
            input.press(action);
        } else {
            input.release(action);
        }
    }

    if let Some((mx, my)) = win.get_mouse_pos(MouseMode::Pass) {
        input.cursor_moved(Vec2::new(mx, my));
    }
    input.set_drag(win.get_mouse_down(MouseButton::Left));
}
