//! gen_scene.rs - one-shot CLI to bake a scene pack, either from a
//! small text manifest or from the built-in forest scene.
//!
//! USAGE:
//! ```bash
//! cargo run --bin gen_scene -- --out assets/forest.pack
//! cargo run --bin gen_scene -- --manifest scene.txt --out assets/custom.pack
//! ```
//!
//! Manifest grammar, one statement per line (`#` starts a comment):
//! ```text
//! avatar ADVENTURER at 5 3.4 10 scale 8 speed 10
//! clip Eating 1.6 loop
//! prop STAG at 80 3 10 yaw 1.5 scale 3 clip Eating
//! prop FOX at 15 3 180 scale 3 clip Gallop patrol x -100 150 speed 30 snap
//! ```

use clap::Parser;
use glam::Vec3;
use regex::Regex;
use std::{fs, path::PathBuf};

use glade_rs::assets::{AvatarDef, ClipDef, PatrolDef, PropPlacement, ScenePack};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Text manifest to bake; omit for the built-in forest scene
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Output pack path
    #[arg(long, value_name = "FILE", default_value = "./assets/forest.pack")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let pack = match &opts.manifest {
        Some(path) => parse_manifest(&fs::read_to_string(path)?)?,
        None => default_scene(),
    };

    // Serialise, then reparse: a pack that fails its own loader never
    // reaches disk.
    let mut bytes = Vec::new();
    pack.write_to(&mut bytes)?;
    let checked = ScenePack::from_bytes(&bytes)?;

    if let Some(dir) = opts.out.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&opts.out, &bytes)?;

    println!(
        "Baked {} props and {} clips into {}",
        checked.props.len(),
        checked.clips.len(),
        opts.out.display()
    );
    Ok(())
}

// ------------------------------------------------------------------
//  Manifest parsing - deliberately tolerant of extra whitespace.
// ------------------------------------------------------------------

fn parse_manifest(src: &str) -> anyhow::Result<ScenePack> {
    let num = r"[-+]?[0-9]*\.?[0-9]+";
    let avatar_re = Regex::new(&format!(
        r"^avatar\s+(?P<class>\w+)\s+at\s+(?P<x>{num})\s+(?P<y>{num})\s+(?P<z>{num})(?:\s+yaw\s+(?P<yaw>{num}))?(?:\s+scale\s+(?P<scale>{num}))?(?:\s+speed\s+(?P<speed>{num}))?$"
    ))
    .unwrap();
    let clip_re = Regex::new(&format!(
        r"^clip\s+(?P<name>\S+)\s+(?P<duration>{num})(?P<loop>\s+loop)?$"
    ))
    .unwrap();
    let prop_re = Regex::new(&format!(
        r"^prop\s+(?P<class>\w+)\s+at\s+(?P<x>{num})\s+(?P<y>{num})\s+(?P<z>{num})(?:\s+yaw\s+(?P<yaw>{num}))?(?:\s+scale\s+(?P<scale>{num}))?(?:\s+clip\s+(?P<clip>\S+))?(?:\s+patrol\s+(?P<axis>[xz])\s+(?P<min>{num})\s+(?P<max>{num})\s+speed\s+(?P<pspeed>{num})(?:\s+turn\s+(?P<rate>{num}))?(?P<snap>\s+snap)?)?$"
    ))
    .unwrap();

    let get = |c: &regex::Captures, name: &str, default: f32| -> f32 {
        c.name(name)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };

    let mut avatar = None;
    let mut clips = Vec::new();
    let mut props = Vec::new();

    for (lineno, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if let Some(c) = avatar_re.captures(line) {
            avatar = Some(AvatarDef {
                class: c["class"].to_string(),
                position: Vec3::new(get(&c, "x", 0.0), get(&c, "y", 0.0), get(&c, "z", 0.0)),
                yaw: get(&c, "yaw", 0.0),
                scale: get(&c, "scale", 1.0),
                speed: get(&c, "speed", 10.0),
            });
        } else if let Some(c) = clip_re.captures(line) {
            clips.push(ClipDef {
                name: c["name"].to_string(),
                duration: get(&c, "duration", 1.0),
                looping: c.name("loop").is_some(),
            });
        } else if let Some(c) = prop_re.captures(line) {
            let patrol = c.name("axis").map(|axis| PatrolDef {
                axis: if axis.as_str() == "x" { Vec3::X } else { Vec3::Z },
                min: get(&c, "min", 0.0),
                max: get(&c, "max", 0.0),
                speed: get(&c, "pspeed", 1.0),
                snap_turn: c.name("snap").is_some(),
                turn_rate: get(&c, "rate", 1.5),
            });
            props.push(PropPlacement {
                class: c["class"].to_string(),
                position: Vec3::new(get(&c, "x", 0.0), get(&c, "y", 0.0), get(&c, "z", 0.0)),
                yaw: get(&c, "yaw", 0.0),
                scale: get(&c, "scale", 1.0),
                clip: c.name("clip").map(|m| m.as_str().to_string()),
                patrol,
            });
        } else {
            anyhow::bail!("manifest line {}: cannot parse `{line}`", lineno + 1);
        }
    }

    let avatar = avatar.ok_or_else(|| anyhow::anyhow!("manifest has no avatar statement"))?;
    Ok(ScenePack::assemble(avatar, clips, props))
}

// ------------------------------------------------------------------
//  Built-in forest scene
// ------------------------------------------------------------------

fn default_scene() -> ScenePack {
    let avatar = AvatarDef {
        class: "ADVENTURER".into(),
        position: Vec3::new(5.0, 3.4, 10.0),
        yaw: 0.0,
        scale: 8.0,
        speed: 10.0,
    };

    let clip = |name: &str, duration: f32, looping: bool| ClipDef {
        name: name.into(),
        duration,
        looping,
    };
    let clips = vec![
        clip("CharacterArmature|Idle", 2.4, true),
        clip("CharacterArmature|Walk", 1.0, true),
        clip("CharacterArmature|Run", 0.7, true),
        clip("CharacterArmature|Wave", 1.2, false),
        clip("CharacterArmature|Interact", 1.1, false),
        clip("CharacterArmature|Death", 2.0, false),
        clip("Eating", 1.6, true),
        clip("Walk", 1.1, true),
        clip("Gallop", 0.6, true),
        clip("Idle", 2.0, true),
        clip("Idle_2", 2.2, true),
        clip("Armature|Idle", 2.0, true),
        clip("Death", 2.0, false),
    ];

    let mut props = Vec::new();
    let mut place = |class: &str, x: f32, y: f32, z: f32, yaw: f32, scale: f32, clip: Option<&str>| {
        props.push(PropPlacement {
            class: class.into(),
            position: Vec3::new(x, y, z),
            yaw,
            scale,
            clip: clip.map(Into::into),
            patrol: None,
        });
    };

    /* lights & fixtures ------------------------------------------------ */
    place("CAMPFIRE", 7.0, 5.0, 53.0, 0.0, 5.0, None);
    place("LANTERN", 0.0, 15.0, -120.0, 0.0, 10.0, None);
    place("LANTERN", -40.0, 15.0, -120.0, 0.0, 10.0, None);
    place("LANTERN", -110.0, 15.0, -40.0, 0.0, 10.0, None);
    place("LANTERN", -110.0, 15.0, 55.0, 0.0, 10.0, None);

    /* wildlife --------------------------------------------------------- */
    place("STAG", 80.0, 3.0, 10.0, 0.0, 3.0, Some("Eating"));
    place("SHEPHERD", 2.0, 3.0, 72.0, 165f32.to_radians(), 7.0, Some("Idle_2"));
    place("DEER", 95.0, 3.0, -20.0, 2.0, 3.0, Some("Eating"));
    place("DEER", 100.0, 3.0, 10.0, 3.0, 3.0, Some("Eating"));
    place("DEER", 70.0, 3.0, -30.0, 4.0, 3.0, Some("Idle"));
    place("SHEEP", -130.0, 3.0, 10.0, 2.0, 2.5, Some("Armature|Idle"));
    place("SHEEP", -140.0, 3.0, 40.0, 4.0, 2.5, Some("Armature|Idle"));
    place("SHEEP", -140.0, 3.0, -20.0, 1.0, 2.5, Some("Armature|Idle"));
    place("DEER", -43.0, 8.5, 210.0, 0.0, 3.0, Some("Death"));
    place("WOLF", -30.0, 8.5, 210.0, 270f32.to_radians(), 3.0, Some("Eating"));
    place("RV", 10.0, -5.0, -70.0, 0.0, 12.0, None);

    /* glass panes by the cabins ---------------------------------------- */
    place("GLASS_PANE", -6.0, 16.0, -137.0, 0.0, 1.0, None);
    place("GLASS_PANE", -33.0, 16.0, -137.0, 0.0, 1.0, None);
    place("GLASS_PANE", -6.0, 16.0, -168.0, 0.0, 1.0, None);
    place("GLASS_PANE", -33.0, 16.0, -168.0, 0.0, 1.0, None);
    place("GLASS_PANE", 2.8, 16.0, -152.5, std::f32::consts::FRAC_PI_2, 1.0, None);

    /* forest dressing --------------------------------------------------- */
    for &(x, z) in &[
        (-60.0, -60.0),
        (-90.0, 20.0),
        (-20.0, -100.0),
        (35.0, -35.0),
        (60.0, 60.0),
        (110.0, 80.0),
        (-70.0, 120.0),
        (20.0, 140.0),
        (150.0, -70.0),
        (-150.0, -90.0),
        (90.0, 170.0),
        (-170.0, 150.0),
    ] {
        place("TREE", x, 3.0, z, 0.0, 15.0, None);
    }
    place("WOODLOG", 12.0, 3.0, 48.0, 0.7, 15.0, None);
    place("WOODLOG", -55.0, 3.0, 30.0, 2.1, 15.0, None);
    place("TENT", -15.0, 3.0, 60.0, 0.0, 15.0, None);
    place("ROCK", 40.0, 3.0, -80.0, 0.0, 15.0, None);
    place("ROCK", -95.0, 3.0, -75.0, 1.2, 15.0, None);
    for &(x, z) in &[(18.0, 25.0), (-12.0, 14.0), (52.0, 38.0), (-48.0, -22.0)] {
        place("GRASS", x, 3.0, z, 0.0, 15.0, None);
    }
    place("GUITAR", 10.0, 4.0, 50.0, 0.4, 15.0, None);

    /* the two patrollers ------------------------------------------------ */
    props.push(PropPlacement {
        class: "STAG".into(),
        position: Vec3::new(130.0, 3.0, -40.0),
        yaw: 0.0,
        scale: 3.0,
        clip: Some("Walk".into()),
        patrol: Some(PatrolDef {
            axis: Vec3::Z,
            min: -60.0,
            max: 10.0,
            speed: 6.0,
            snap_turn: false,
            turn_rate: 1.5,
        }),
    });
    props.push(PropPlacement {
        class: "FOX".into(),
        position: Vec3::new(15.0, 3.0, 180.0),
        yaw: 90f32.to_radians(),
        scale: 3.0,
        clip: Some("Gallop".into()),
        patrol: Some(PatrolDef {
            axis: Vec3::X,
            min: -100.0,
            max: 150.0,
            speed: 30.0,
            snap_turn: true,
            turn_rate: 0.0,
        }),
    });

    ScenePack::assemble(avatar, clips, props)
}
