//! Day-night colour cycle.
//!
//! One sinusoidal cycle lerps fog/clear, ambient and directional light
//! colours between their day and night endpoints. Purely cosmetic;
//! nothing in the rig reads it.

use crate::renderer::{Rgba, lerp_rgba};

const DAY_FOG: Rgba = 0x00E6_EAF0;
const NIGHT_FOG: Rgba = 0x0000_0000;
const DAY_AMBIENT: Rgba = 0x00E6_EAF0;
const NIGHT_AMBIENT: Rgba = 0x0017_1515;
const DAY_DIRECTIONAL: Rgba = 0x0047_596B;
const NIGHT_DIRECTIONAL: Rgba = 0x001B_1B1C;

pub const FOG_NEAR: f32 = 50.0;
pub const FOG_FAR: f32 = 120.0;

/// Colours for the current point in the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneColours {
    /// Fog and clear colour.
    pub fog: Rgba,
    pub ambient: Rgba,
    pub directional: Rgba,
}

#[derive(Debug)]
pub struct DayNight {
    cycle_len: f32,
    time: f32,
}

impl Default for DayNight {
    fn default() -> Self {
        Self {
            cycle_len: 300.0,
            time: 0.0,
        }
    }
}

impl DayNight {
    pub fn with_cycle(cycle_len: f32) -> Self {
        Self {
            cycle_len,
            time: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    /// 0 = full day, 1 = full night.
    pub fn factor(&self) -> f32 {
        let progress = (self.time % self.cycle_len) / self.cycle_len;
        0.5 * (1.0 + (progress * std::f32::consts::TAU).sin())
    }

    pub fn colours(&self) -> SceneColours {
        let t = self.factor();
        SceneColours {
            fog: lerp_rgba(DAY_FOG, NIGHT_FOG, t),
            ambient: lerp_rgba(DAY_AMBIENT, NIGHT_AMBIENT, t),
            directional: lerp_rgba(DAY_DIRECTIONAL, NIGHT_DIRECTIONAL, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_cycle_is_full_night() {
        let mut cycle = DayNight::with_cycle(300.0);
        cycle.advance(75.0);
        assert!((cycle.factor() - 1.0).abs() < 1e-5);
        let c = cycle.colours();
        assert_eq!(c.fog, NIGHT_FOG);
        assert_eq!(c.ambient, NIGHT_AMBIENT);
        assert_eq!(c.directional, NIGHT_DIRECTIONAL);
    }

    #[test]
    fn three_quarter_cycle_is_full_day() {
        let mut cycle = DayNight::with_cycle(300.0);
        cycle.advance(225.0);
        assert!(cycle.factor() < 1e-5);
        assert_eq!(cycle.colours().fog, DAY_FOG);
    }

    #[test]
    fn cycle_wraps() {
        let mut a = DayNight::with_cycle(300.0);
        let mut b = DayNight::with_cycle(300.0);
        a.advance(40.0);
        b.advance(340.0);
        assert!((a.factor() - b.factor()).abs() < 1e-4);
    }
}
