//! Geographic primitives for the graph preparation pipeline. Everything works directly in
//! (longitude, latitude) space; there's no projected world space here.

mod distance;
mod gps;
mod line;

pub use crate::distance::Distance;
pub use crate::gps::{HashableLonLat, LonLat};
pub use crate::line::{collinear_overlap, segment_intersection};

// Round to an arbitrary precision. Distances snap to a tenth of a millimeter.
pub(crate) fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// Coordinates get a finer trim; 1e-7 degrees is about a centimeter, the same precision the map
// data itself is stored with. Two points closer than this are the same point.
pub(crate) fn trim_lon_lat(x: f64) -> f64 {
    (x * 10_000_000.0).round() / 10_000_000.0
}
