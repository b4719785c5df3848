use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

pub const MIN_LATITUDE_DEG: f64 = -90.0;
pub const MAX_LATITUDE_DEG: f64 = 90.0;
pub const MIN_LONGITUDE_DEG: f64 = -180.0;
pub const MAX_LONGITUDE_DEG: f64 = 180.0;

/// Geographic coordinate in degrees.
///
/// Constructed through [`GeoCoord::new`], which rejects values outside
/// latitude [-90, 90] and longitude [-180, 180]. Serialized as a
/// `[lat, lon]` pair.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoCoord {
    lat_deg: f64,
    lon_deg: f64,
}

impl GeoCoord {
    pub fn new(lat_deg: f64, lon_deg: f64) -> PlannerResult<Self> {
        if !lat_deg.is_finite() || !(MIN_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&lat_deg) {
            return Err(PlannerError::validation(format!(
                "latitude {lat_deg} outside [-90, 90]"
            )));
        }
        if !lon_deg.is_finite() || !(MIN_LONGITUDE_DEG..=MAX_LONGITUDE_DEG).contains(&lon_deg) {
            return Err(PlannerError::validation(format!(
                "longitude {lon_deg} outside [-180, 180]"
            )));
        }
        Ok(Self { lat_deg, lon_deg })
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }
}

impl TryFrom<[f64; 2]> for GeoCoord {
    type Error = PlannerError;

    fn try_from([lat, lon]: [f64; 2]) -> Result<Self, Self::Error> {
        GeoCoord::new(lat, lon)
    }
}

impl From<GeoCoord> for [f64; 2] {
    fn from(c: GeoCoord) -> Self {
        [c.lat_deg, c.lon_deg]
    }
}
