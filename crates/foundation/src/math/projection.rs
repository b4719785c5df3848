use super::{GeoCoord, Vec3};

/// Visual radius of the globe used when no explicit radius is configured.
pub const DEFAULT_GLOBE_RADIUS: f64 = 150.0;

/// Maps a latitude/longitude in degrees onto a sphere of `radius`.
///
/// Polar angle is measured from the +Y pole and azimuth starts at the
/// antimeridian, so (0, 0) lands on +X.
/// Inputs are expected to be validated; out-of-range values still produce a
/// point but it is meaningless.
pub fn project(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    let x = -(radius * phi.sin() * theta.cos());
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();

    Vec3::new(x, y, z)
}

pub fn project_coord(coord: GeoCoord, radius: f64) -> Vec3 {
    project(coord.lat_deg(), coord.lon_deg(), radius)
}

/// Live view applied on top of the sphere mapping.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    pub tilt_deg: f64,
    pub spin_deg: f64,
    pub zoom: f64,
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            tilt_deg: 0.0,
            spin_deg: 0.0,
            zoom: 1.0,
        }
    }

    /// Scale first, then spin about Y, then tilt about X.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        (p * self.zoom)
            .rotate_y_deg(self.spin_deg)
            .rotate_x_deg(self.tilt_deg)
    }
}

pub fn project_in_view(coord: GeoCoord, radius: f64, view: &ViewTransform) -> Vec3 {
    view.apply(project_coord(coord, radius))
}
