use foundation::math::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{Camera, Rotation};

/// Degrees of rotation per pixel of pointer travel.
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 0.5;

/// Separate gains for vertical (tilt) and horizontal (spin) motion.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSensitivity {
    pub tilt_deg_per_px: f64,
    pub spin_deg_per_px: f64,
}

impl Default for DragSensitivity {
    fn default() -> Self {
        Self {
            tilt_deg_per_px: DEFAULT_DRAG_SENSITIVITY,
            spin_deg_per_px: DEFAULT_DRAG_SENSITIVITY,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragSession {
    start_px: Vec2,
    snapshot: Rotation,
}

/// Turns pointer drags over the globe into camera rotation.
///
/// Rotation during a drag is always `snapshot + delta * sensitivity`,
/// measured from the pointer-down position, so moves never accumulate
/// rounding error.
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    sensitivity: DragSensitivity,
    session: Option<DragSession>,
}

impl PointerController {
    pub fn new(sensitivity: DragSensitivity) -> Self {
        Self {
            sensitivity,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a drag session. A pointer-down while a session is already
    /// running is ignored and returns `false`.
    pub fn begin(&mut self, camera: &mut Camera, at_px: Vec2) -> bool {
        if self.session.is_some() {
            debug!("pointer-down ignored: drag already active");
            return false;
        }
        let Some(snapshot) = camera.begin_user_drag() else {
            return false;
        };
        self.session = Some(DragSession {
            start_px: at_px,
            snapshot,
        });
        true
    }

    /// Applies a pointer move. Returns `false` when no drag is active.
    ///
    /// If the camera left the dragging state underneath us (for example a
    /// reset during the drag) the session is dropped.
    pub fn update(&mut self, camera: &mut Camera, at_px: Vec2) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if !camera.is_user_dragging() {
            self.session = None;
            return false;
        }
        let delta = at_px - session.start_px;
        camera.set_drag_rotation(Rotation::new(
            session.snapshot.tilt_deg + delta.y * self.sensitivity.tilt_deg_per_px,
            session.snapshot.spin_deg + delta.x * self.sensitivity.spin_deg_per_px,
        ));
        true
    }

    /// Ends the drag where it is. Returns `false` when no drag was active.
    pub fn end(&mut self, camera: &mut Camera) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        camera.end_user_drag();
        true
    }
}

#[cfg(test)]
mod tests {
    use foundation::math::Vec2;

    use super::{DragSensitivity, PointerController};
    use crate::camera::{Camera, CameraMode, CameraSettings, Rotation};

    fn camera() -> Camera {
        Camera::new(CameraSettings::default()).unwrap()
    }

    #[test]
    fn drag_rotates_from_snapshot() {
        let mut cam = camera();
        let mut ptr = PointerController::default();

        assert!(ptr.begin(&mut cam, Vec2::new(100.0, 100.0)));
        ptr.update(&mut cam, Vec2::new(110.0, 90.0));
        assert_eq!(cam.rotation(), Rotation::new(15.0, 45.0));

        // Moves are absolute relative to the pointer-down position.
        ptr.update(&mut cam, Vec2::new(100.0, 140.0));
        assert_eq!(cam.rotation(), Rotation::new(40.0, 40.0));
    }

    #[test]
    fn release_keeps_rotation() {
        let mut cam = camera();
        let mut ptr = PointerController::default();
        ptr.begin(&mut cam, Vec2::new(0.0, 0.0));
        ptr.update(&mut cam, Vec2::new(20.0, 0.0));
        assert!(ptr.end(&mut cam));

        assert_eq!(cam.rotation(), Rotation::new(20.0, 50.0));
        assert!(!ptr.update(&mut cam, Vec2::new(500.0, 500.0)));
        assert_eq!(cam.rotation(), Rotation::new(20.0, 50.0));
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let mut cam = camera();
        let mut ptr = PointerController::default();
        assert!(ptr.begin(&mut cam, Vec2::new(0.0, 0.0)));
        assert!(!ptr.begin(&mut cam, Vec2::new(50.0, 50.0)));

        ptr.update(&mut cam, Vec2::new(10.0, 0.0));
        assert_eq!(cam.rotation(), Rotation::new(20.0, 45.0));
    }

    #[test]
    fn drag_suspends_but_preserves_auto_rotate() {
        let mut cam = camera();
        cam.toggle_rotate();
        let mut ptr = PointerController::default();

        ptr.begin(&mut cam, Vec2::new(0.0, 0.0));
        assert_eq!(cam.mode(), CameraMode::UserDragging);
        assert!(cam.auto_rotate());

        ptr.end(&mut cam);
        assert_eq!(cam.mode(), CameraMode::AutoRotating);
    }

    #[test]
    fn independent_axis_gains() {
        let mut cam = camera();
        let mut ptr = PointerController::new(DragSensitivity {
            tilt_deg_per_px: 0.1,
            spin_deg_per_px: 1.0,
        });
        ptr.begin(&mut cam, Vec2::new(0.0, 0.0));
        ptr.update(&mut cam, Vec2::new(10.0, 10.0));
        assert_eq!(cam.rotation(), Rotation::new(21.0, 50.0));
    }

    #[test]
    fn reset_mid_drag_drops_the_session() {
        let mut cam = camera();
        let mut ptr = PointerController::default();
        ptr.begin(&mut cam, Vec2::new(0.0, 0.0));
        cam.reset();

        assert!(!ptr.update(&mut cam, Vec2::new(30.0, 30.0)));
        assert!(!ptr.is_active());
        assert_eq!(cam.rotation(), Rotation::new(20.0, 40.0));
        assert!(ptr.begin(&mut cam, Vec2::new(0.0, 0.0)));
    }
}
