use crate::LonLat;

// Twice the signed area of the triangle (o, a, b). Zero means collinear. Coordinates are
// quantized, so exact zero tests are meaningful here.
fn cross(o: LonLat, a: LonLat, b: LonLat) -> f64 {
    (a.longitude - o.longitude) * (b.latitude - o.latitude)
        - (a.latitude - o.latitude) * (b.longitude - o.longitude)
}

fn ranges_overlap(a1: f64, a2: f64, b1: f64, b2: f64) -> bool {
    a1.min(a2).max(b1.min(b2)) <= a1.max(a2).min(b1.max(b2))
}

/// Where segment (a1, a2) crosses segment (b1, b2), endpoints included. None if they don't touch
/// or are collinear; see `collinear_overlap` for that case.
pub fn segment_intersection(a1: LonLat, a2: LonLat, b1: LonLat, b2: LonLat) -> Option<LonLat> {
    if !ranges_overlap(a1.longitude, a2.longitude, b1.longitude, b2.longitude)
        || !ranges_overlap(a1.latitude, a2.latitude, b1.latitude, b2.latitude)
    {
        return None;
    }
    if cross(b1, b2, a1) * cross(b1, b2, a2) > 0.0 || cross(a1, a2, b1) * cross(a1, a2, b2) > 0.0 {
        return None;
    }

    let denom = (a2.longitude - a1.longitude) * (b2.latitude - b1.latitude)
        - (a2.latitude - a1.latitude) * (b2.longitude - b1.longitude);
    if denom == 0.0 {
        return None;
    }
    let t = ((b1.longitude - a1.longitude) * (b2.latitude - b1.latitude)
        - (b1.latitude - a1.latitude) * (b2.longitude - b1.longitude))
        / denom;
    Some(LonLat::new(
        a1.longitude + t * (a2.longitude - a1.longitude),
        a1.latitude + t * (a2.latitude - a1.latitude),
    ))
}

/// The overlapping sub-segment of two collinear segments, as its two endpoints. The endpoints
/// coincide when the segments only touch at a point. None if the segments aren't collinear or
/// don't overlap.
pub fn collinear_overlap(
    a1: LonLat,
    a2: LonLat,
    b1: LonLat,
    b2: LonLat,
) -> Option<(LonLat, LonLat)> {
    if cross(b1, b2, a1) != 0.0 || cross(b1, b2, a2) != 0.0 {
        return None;
    }

    // Everything lies on one line; order along its dominant axis.
    let horizontal = (b2.longitude - b1.longitude).abs() >= (b2.latitude - b1.latitude).abs();
    let key = |pt: LonLat| {
        if horizontal {
            pt.longitude
        } else {
            pt.latitude
        }
    };
    let (a_lo, a_hi) = if key(a1) <= key(a2) { (a1, a2) } else { (a2, a1) };
    let (b_lo, b_hi) = if key(b1) <= key(b2) { (b1, b2) } else { (b2, b1) };
    let lo = if key(a_lo) >= key(b_lo) { a_lo } else { b_lo };
    let hi = if key(a_hi) <= key(b_hi) { a_hi } else { b_hi };
    if key(lo) > key(hi) {
        return None;
    }
    Some((lo, hi))
}
