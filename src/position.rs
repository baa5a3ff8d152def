/// Geodetic coordinates of a resolved fix.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct LonLatAlt {
    /// Longitude [ddeg]
    pub lon_deg: f64,
    /// Latitude [ddeg]
    pub lat_deg: f64,
    /// Altitude above sea level [m]
    pub alt_m: f64,
}

impl LonLatAlt {
    /// Builds a new [LonLatAlt] from longitude and latitude in decimal
    /// degrees, and altitude above sea level in meters.
    pub fn new(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            alt_m,
        }
    }
}

impl std::fmt::Display for LonLatAlt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lon={:.5}° lat={:.5}° alt={:.1}m",
            self.lon_deg, self.lat_deg, self.alt_m
        )
    }
}

/// Per satellite pointing angles, from the receiver position.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct ElevationAzimuth {
    /// Elevation [deg]
    pub elev_deg: f64,
    /// Azimuth [deg]
    pub azim_deg: f64,
}

impl ElevationAzimuth {
    /// Builds a new [ElevationAzimuth] from angles expressed in radians.
    pub fn from_radians(elev_rad: f64, azim_rad: f64) -> Self {
        Self {
            elev_deg: elev_rad.to_degrees(),
            azim_deg: azim_rad.to_degrees(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ElevationAzimuth;

    #[test]
    fn radians_to_degrees() {
        let angles = ElevationAzimuth::from_radians(std::f64::consts::PI / 2.0, std::f64::consts::PI);
        assert!((angles.elev_deg - 90.0).abs() < 1.0E-12);
        assert!((angles.azim_deg - 180.0).abs() < 1.0E-12);
    }
}
