//! Input sampler: named action flags plus a mouse accumulator.
//!
//! Event handlers only ever set flags; the simulation reads one
//! consistent snapshot per frame and drains the cursor delta through
//! [`InputState::consume_cursor_delta`].

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Named boolean actions the rig understands.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Action: u16 {
        const FORWARD      = 0x0001;
        const BACKWARD     = 0x0002;
        const STRAFE_LEFT  = 0x0004;
        const STRAFE_RIGHT = 0x0008;
        const SPRINT       = 0x0010;
        const ROTATE_LEFT  = 0x0020;
        const ROTATE_RIGHT = 0x0040;
        const ZOOM_IN      = 0x0080;
        const ZOOM_OUT     = 0x0100;
        const TILT_LEFT    = 0x0200;
        const TILT_RIGHT   = 0x0400;
        const FIRST_PERSON = 0x0800;
        const THIRD_PERSON = 0x1000;
    }
}

/// Session-lifetime input state. Created once; mutated only by the
/// host's event handlers, read-only to the rig.
#[derive(Debug, Default)]
pub struct InputState {
    held: Action,
    cursor: Vec2,
    delta: Vec2,
    drag: bool,
    has_cursor: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key mapped to `action` went down. Unmapped keys never reach us.
    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(action);
    }

    #[inline]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    #[inline]
    pub fn held(&self) -> Action {
        self.held
    }

    /// Pointer moved to `pos` (window coordinates). Movement accumulates
    /// into the delta until the next sample.
    pub fn cursor_moved(&mut self, pos: Vec2) {
        if self.has_cursor {
            self.delta += pos - self.cursor;
        }
        self.cursor = pos;
        self.has_cursor = true;
    }

    /// A mouse button went down (`true`) or up (`false`).
    pub fn set_drag(&mut self, active: bool) {
        self.drag = active;
    }

    #[inline]
    pub fn drag_active(&self) -> bool {
        self.drag
    }

    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Accumulated pointer movement since the last sample; resets the
    /// accumulator.
    pub fn consume_cursor_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }
}
