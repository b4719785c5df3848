//! Globe camera: rotation, zoom and the auto-rotate state machine.
//!
//! The camera is a plain owned value. Controllers such as
//! [`crate::PointerController`] borrow it mutably for the duration of a call
//! and never keep a copy of its state.

use foundation::error::{PlannerError, PlannerResult};
use foundation::math::ViewTransform;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ZOOM_STEP: f64 = 0.2;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.5;
pub const HOME_ZOOM: f64 = 1.0;
/// Degrees of spin added per auto-rotate tick.
pub const AUTO_ROTATE_STEP_DEG: f64 = 0.2;
pub const AUTO_ROTATE_INTERVAL_MS: u64 = 30;

/// Rotation in degrees: `tilt` about X (unconstrained), `spin` about Y
/// (kept in `[0, 360)`).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Rotation {
    pub tilt_deg: f64,
    pub spin_deg: f64,
}

impl Rotation {
    pub fn new(tilt_deg: f64, spin_deg: f64) -> Self {
        Self {
            tilt_deg,
            spin_deg: wrap_spin(spin_deg),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for Rotation {
    fn from([tilt, spin]: [f64; 2]) -> Self {
        Rotation::new(tilt, spin)
    }
}

impl From<Rotation> for [f64; 2] {
    fn from(r: Rotation) -> Self {
        [r.tilt_deg, r.spin_deg]
    }
}

pub fn wrap_spin(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub rotation: Rotation,
    pub zoom: f64,
    pub auto_rotate: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    Idle,
    AutoRotating,
    UserDragging,
}

/// Tunables for the camera, normally taken from the planner config.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub initial_rotation: Rotation,
    pub initial_zoom: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub auto_rotate_step_deg: f64,
    pub auto_rotate_interval_ms: u64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_rotation: Rotation::new(20.0, 40.0),
            initial_zoom: HOME_ZOOM,
            zoom_step: ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            auto_rotate_step_deg: AUTO_ROTATE_STEP_DEG,
            auto_rotate_interval_ms: AUTO_ROTATE_INTERVAL_MS,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(PlannerError::validation(format!(
                "zoom range [{}, {}] is empty",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(PlannerError::validation(format!(
                "initial zoom {} outside [{}, {}]",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&HOME_ZOOM) {
            return Err(PlannerError::validation("home zoom 1.0 outside zoom range"));
        }
        if !(self.zoom_step > 0.0) {
            return Err(PlannerError::validation("zoom step must be positive"));
        }
        if self.auto_rotate_interval_ms == 0 {
            return Err(PlannerError::validation(
                "auto-rotate interval must be positive",
            ));
        }
        if !self.auto_rotate_step_deg.is_finite() {
            return Err(PlannerError::validation("auto-rotate step must be finite"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    state: CameraState,
    settings: CameraSettings,
    dragging: bool,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> PlannerResult<Self> {
        settings.validate()?;
        Ok(Self {
            state: CameraState {
                rotation: settings.initial_rotation,
                zoom: settings.initial_zoom,
                auto_rotate: false,
            },
            settings,
            dragging: false,
        })
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn auto_rotate(&self) -> bool {
        self.state.auto_rotate
    }

    pub fn mode(&self) -> CameraMode {
        if self.dragging {
            CameraMode::UserDragging
        } else if self.state.auto_rotate {
            CameraMode::AutoRotating
        } else {
            CameraMode::Idle
        }
    }

    pub fn is_user_dragging(&self) -> bool {
        self.dragging
    }

    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform {
            tilt_deg: self.state.rotation.tilt_deg,
            spin_deg: self.state.rotation.spin_deg,
            zoom: self.state.zoom,
        }
    }

    /// Flips `Idle ⇄ AutoRotating`. Ignored while the user is dragging.
    ///
    /// Returns whether the flag changed.
    pub fn toggle_rotate(&mut self) -> bool {
        if self.dragging {
            debug!("toggle_rotate ignored during drag");
            return false;
        }
        self.state.auto_rotate = !self.state.auto_rotate;
        debug!(auto_rotate = self.state.auto_rotate, "auto-rotate toggled");
        true
    }

    /// Returns whether the zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom_clamped(self.state.zoom + self.settings.zoom_step)
    }

    /// Returns whether the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom_clamped(self.state.zoom - self.settings.zoom_step)
    }

    fn set_zoom_clamped(&mut self, zoom: f64) -> bool {
        let next = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        let changed = next != self.state.zoom;
        self.state.zoom = next;
        changed
    }

    /// Restores the configured rotation and zoom, stops auto-rotation and
    /// ends any drag.
    pub fn reset(&mut self) {
        self.state = CameraState {
            rotation: self.settings.initial_rotation,
            zoom: self.settings.initial_zoom,
            auto_rotate: false,
        };
        self.dragging = false;
    }

    /// Faces the prime meridian at zoom 1.0. Auto-rotate is left alone.
    pub fn home(&mut self) {
        self.state.rotation = Rotation::zero();
        self.state.zoom = HOME_ZOOM;
    }

    /// Applies `ticks` auto-rotate increments.
    ///
    /// Ticks are consumed without effect when auto-rotate is off or a drag
    /// is in progress. Returns whether the rotation changed.
    pub fn apply_auto_rotate_ticks(&mut self, ticks: u64) -> bool {
        if ticks == 0 || self.mode() != CameraMode::AutoRotating {
            return false;
        }
        let spin = self.state.rotation.spin_deg + self.settings.auto_rotate_step_deg * ticks as f64;
        self.state.rotation.spin_deg = wrap_spin(spin);
        true
    }

    /// Enters `UserDragging` and returns the rotation at this instant.
    ///
    /// Returns `None` if a drag is already in progress.
    pub fn begin_user_drag(&mut self) -> Option<Rotation> {
        if self.dragging {
            return None;
        }
        self.dragging = true;
        Some(self.state.rotation)
    }

    pub fn set_drag_rotation(&mut self, rotation: Rotation) {
        debug_assert!(self.dragging, "drag rotation applied outside a drag");
        self.state.rotation = Rotation::new(rotation.tilt_deg, rotation.spin_deg);
    }

    pub fn end_user_drag(&mut self) {
        self.dragging = false;
    }
}
