use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{trim_lon_lat, Distance};

/// A (longitude, latitude) point. Both coordinates are trimmed to 1e-7 degrees on construction,
/// so equality over `LonLat`s means equality over their serialized form too.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: trim_lon_lat(lon),
            latitude: trim_lon_lat(lat),
        }
    }

    /// Haversine distance between two points.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(earth_radius_m * c)
    }

    /// The point `dist` away along a compass bearing, in degrees clockwise from north. Measured
    /// on the same sphere `gps_dist` measures on, so projecting and measuring round-trip.
    pub fn project_away(self, dist: Distance, bearing_degs: f64) -> LonLat {
        let earth_radius_m = 6_371_000.0;
        let ang = dist.inner_meters() / earth_radius_m;
        let bearing = bearing_degs.to_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * ang.cos() + lat1.cos() * ang.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * ang.sin() * lat1.cos()).atan2(ang.cos() - lat1.sin() * lat2.sin());
        LonLat::new(lon2.to_degrees(), lat2.to_degrees())
    }

    pub fn to_hashable(self) -> HashableLonLat {
        HashableLonLat::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// A `LonLat` that can be a map key: coordinates are already quantized, so exact equality is the
/// right dedup test.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashableLonLat {
    lon_nan: NotNan<f64>,
    lat_nan: NotNan<f64>,
}

impl HashableLonLat {
    pub fn new(lon: f64, lat: f64) -> HashableLonLat {
        HashableLonLat {
            lon_nan: NotNan::new(trim_lon_lat(lon)).unwrap(),
            lat_nan: NotNan::new(trim_lon_lat(lat)).unwrap(),
        }
    }
}
