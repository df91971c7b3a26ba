//! Animation mixer.
//!
//! The integrator only ever names an [`AnimTag`]; the mixer owns the
//! tag → clip table (built once at load), the crossfade between the
//! outgoing and incoming clips, and one-shot playback with automatic
//! return to the underlying movement loop.

use tracing::warn;

use crate::defs::AnimTag;

/// Index of a clip inside the scene pack.
pub type ClipId = u16;

/// Everything playback needs, copied out of the pack at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipInfo {
    pub id: ClipId,
    pub duration: f32,
    pub looping: bool,
}

/// Crossfade length in seconds.
pub const CROSSFADE: f32 = 0.5;

#[derive(Debug)]
pub struct Mixer {
    slots: [Option<ClipInfo>; AnimTag::ALL.len()],
    warned: [bool; AnimTag::ALL.len()],
    active: AnimTag,
    time: f32,
    /// Outgoing tag and its remaining blend weight (1 → 0).
    fade: Option<(AnimTag, f32)>,
    /// Loop to return to once a one-shot finishes.
    resume: Option<AnimTag>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            slots: [None; AnimTag::ALL.len()],
            warned: [false; AnimTag::ALL.len()],
            active: AnimTag::Idle,
            time: 0.0,
            fade: None,
            resume: None,
        }
    }

    /// Bind `tag` to a clip. Called while the table is built at load.
    pub fn map(&mut self, tag: AnimTag, clip: ClipInfo) {
        self.slots[tag.index()] = Some(clip);
    }

    #[inline]
    pub fn active(&self) -> AnimTag {
        self.active
    }

    /// Clip behind the active tag, if the table has one.
    #[inline]
    pub fn clip(&self) -> Option<ClipInfo> {
        self.slots[self.active.index()]
    }

    /// Outgoing tag and blend weight while a crossfade is running.
    #[inline]
    pub fn fading(&self) -> Option<(AnimTag, f32)> {
        self.fade
    }

    /// Playback position inside the active clip, wrapped for loops.
    pub fn clip_time(&self) -> f32 {
        match self.clip() {
            Some(c) if c.looping && c.duration > 0.0 => self.time % c.duration,
            Some(c) => self.time.min(c.duration),
            None => 0.0,
        }
    }

    /// Ask for a movement loop. No-op when the tag is already active,
    /// when its clip is missing (warned once), or while a one-shot is
    /// still playing; the loop is remembered and resumed afterwards.
    pub fn request(&mut self, tag: AnimTag) {
        if tag == self.active {
            return;
        }
        if !self.slot_ok(tag) {
            return;
        }
        if self.resume.is_some() {
            self.resume = Some(tag);
            return;
        }
        self.start(tag);
    }

    /// Play a one-shot gesture, then return to the current loop.
    pub fn trigger(&mut self, tag: AnimTag) {
        if tag == self.active || !self.slot_ok(tag) {
            return;
        }
        if self.resume.is_none() {
            self.resume = Some(self.active);
        }
        self.start(tag);
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;

        if let Some((_, weight)) = self.fade.as_mut() {
            *weight -= dt / CROSSFADE;
        }
        if matches!(self.fade, Some((_, w)) if w <= 0.0) {
            self.fade = None;
        }

        // One-shot ran out: cross back into the remembered loop, or
        // clamp at the last frame (death pose) when there is none.
        if let Some(clip) = self.clip() {
            if !clip.looping && self.time >= clip.duration {
                if let Some(tag) = self.resume.take() {
                    self.start(tag);
                }
            }
        }
    }

    fn start(&mut self, tag: AnimTag) {
        self.fade = Some((self.active, 1.0));
        self.active = tag;
        self.time = 0.0;
    }

    fn slot_ok(&mut self, tag: AnimTag) -> bool {
        if self.slots[tag.index()].is_some() {
            return true;
        }
        if !self.warned[tag.index()] {
            self.warned[tag.index()] = true;
            warn!(tag = ?tag, "animation clip missing; action ignored");
        }
        false
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
