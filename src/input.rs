use crate::constants::{
    ORBIT_RADIANS_PER_PX, WHEEL_ZOOM_MAX_FACTOR, WHEEL_ZOOM_MIN_FACTOR, WHEEL_ZOOM_PER_DELTA,
};
use glam::Vec2;

/// Pointer drag in CSS pixels, turned into orbit rotations.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = pos;
    }

    /// Yaw/pitch in radians for a move to `pos`; `None` when not dragging
    /// or when another pointer moved.
    pub fn update(&mut self, pointer_id: i32, pos: Vec2) -> Option<(f32, f32)> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let d = pos - self.last;
        self.last = pos;
        Some(orbit_delta(d))
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// Horizontal drag yaws, vertical drag pitches.
#[inline]
pub fn orbit_delta(d_px: Vec2) -> (f32, f32) {
    (-d_px.x * ORBIT_RADIANS_PER_PX, d_px.y * ORBIT_RADIANS_PER_PX)
}

/// Distance multiplier for a wheel event; positive `delta_y` zooms out.
#[inline]
pub fn wheel_zoom_factor(delta_y: f64) -> f32 {
    if !delta_y.is_finite() {
        return 1.0;
    }
    (1.0 + delta_y as f32 * WHEEL_ZOOM_PER_DELTA).clamp(WHEEL_ZOOM_MIN_FACTOR, WHEEL_ZOOM_MAX_FACTOR)
}
