//! Camera types shared with the web frontend.
//!
//! These avoid platform-specific APIs. The renderer projects the circuit
//! through a [`Camera`] built from the user-controlled [`OrbitCamera`].

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// A world point after projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Normalized device coordinates, y up.
    pub ndc: Vec2,
    /// Distance along the view axis (clip-space w).
    pub depth: f32,
}

impl ScreenPoint {
    /// Aspect-corrected view coordinates: x scaled by aspect so circles stay round.
    pub fn view(&self, aspect: f32) -> Vec2 {
        Vec2::new(self.ndc.x * aspect, self.ndc.y)
    }

    /// Position in CSS percent of the canvas, origin top-left.
    pub fn css_percent(&self) -> Vec2 {
        Vec2::new((self.ndc.x + 1.0) * 50.0, (1.0 - self.ndc.y) * 50.0)
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point; `None` when it lies behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= self.znear {
            return None;
        }
        Some(ScreenPoint {
            ndc: clip.xy() / clip.w,
            depth: clip.w,
        })
    }

    /// Screen radius (in NDC-y units) of a world-space radius seen at `depth`.
    pub fn projected_radius(&self, world_radius: f32, depth: f32) -> f32 {
        let focal = 1.0 / (self.fovy_radians * 0.5).tan();
        world_radius * focal / depth.max(self.znear)
    }
}

pub const ORBIT_DEFAULT_DISTANCE: f32 = 12.0;
pub const ORBIT_MIN_DISTANCE: f32 = 4.0;
pub const ORBIT_MAX_DISTANCE: f32 = 30.0;
pub const ORBIT_MAX_PITCH: f32 = 85.0_f32 * std::f32::consts::PI / 180.0;
pub const ORBIT_FOVY_DEGREES: f32 = 50.0;

/// Orbit controls around a fixed target: drag rotates, wheel zooms.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: ORBIT_DEFAULT_DISTANCE,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    /// Rotate by radians; pitch stays short of the poles so `up` is never parallel to the view.
    pub fn drag(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
    }

    /// `factor > 1` moves away, `< 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance =
                (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: ORBIT_FOVY_DEGREES.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_matches_front_view() {
        let orbit = OrbitCamera::default();
        let eye = orbit.eye();
        assert!((eye - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-5);
    }

    #[test]
    fn target_projects_to_center() {
        let cam = OrbitCamera::default().camera(16.0 / 9.0);
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!(p.ndc.length() < 1e-5);
        assert!((p.depth - 12.0).abs() < 1e-4);
        let css = p.css_percent();
        assert!((css.x - 50.0).abs() < 1e-3 && (css.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_eye_are_culled() {
        let cam = OrbitCamera::default().camera(1.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn right_of_target_projects_right() {
        let cam = OrbitCamera::default().camera(1.0);
        let p = cam.project(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert!(p.ndc.x > 0.0);
        assert!(p.ndc.y.abs() < 1e-5);
    }

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.drag(0.0, 10.0);
        assert!((orbit.pitch - ORBIT_MAX_PITCH).abs() < 1e-6);
        orbit.drag(0.0, -20.0);
        assert!((orbit.pitch + ORBIT_MAX_PITCH).abs() < 1e-6);
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
        orbit.zoom(0.0001);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(f32::NAN);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
    }

    #[test]
    fn closer_objects_look_bigger() {
        let cam = OrbitCamera::default().camera(1.0);
        assert!(cam.projected_radius(0.5, 6.0) > cam.projected_radius(0.5, 12.0));
    }
}
