use geom::{collinear_overlap, segment_intersection, Distance, LonLat};

/// A rectangular approximation of a disk around a center point: the four corners come from
/// geodesic offsets at compass bearings 0, 90, 180 and 270. Callers that need the whole disk
/// covered must pad the radius themselves. Containment includes the boundary itself.
#[derive(Clone, Debug)]
pub struct BoundingPolygon {
    center: LonLat,
    // Counter-clockwise, starting northeast
    corners: [LonLat; 4],
}

impl BoundingPolygon {
    pub fn new(center: LonLat, radius: Distance) -> BoundingPolygon {
        let north = center.project_away(radius, 0.0);
        let east = center.project_away(radius, 90.0);
        let south = center.project_away(radius, 180.0);
        let west = center.project_away(radius, 270.0);
        BoundingPolygon {
            center,
            corners: [
                LonLat::new(east.longitude, north.latitude),
                LonLat::new(west.longitude, north.latitude),
                LonLat::new(west.longitude, south.latitude),
                LonLat::new(east.longitude, south.latitude),
            ],
        }
    }

    pub fn center(&self) -> LonLat {
        self.center
    }

    pub fn corners(&self) -> [LonLat; 4] {
        self.corners
    }

    /// A point exactly on the boundary counts as inside.
    pub fn contains(&self, pt: LonLat) -> bool {
        let ne = self.corners[0];
        let sw = self.corners[2];
        pt.longitude >= sw.longitude
            && pt.longitude <= ne.longitude
            && pt.latitude >= sw.latitude
            && pt.latitude <= ne.latitude
    }

    fn sides(&self) -> [(LonLat, LonLat); 4] {
        [
            (self.corners[0], self.corners[1]),
            (self.corners[1], self.corners[2]),
            (self.corners[2], self.corners[3]),
            (self.corners[3], self.corners[0]),
        ]
    }

    /// Where the segment from `inside` to `outside` crosses the boundary. A segment running
    /// exactly along a side touches it in a whole sub-segment; the candidate that is NOT a corner
    /// wins then, so the crossing never collapses onto an already-distinct corner node.
    pub fn clip_segment(&self, inside: LonLat, outside: LonLat) -> Option<LonLat> {
        let mut candidates: Vec<LonLat> = Vec::new();
        for (s1, s2) in self.sides() {
            if let Some((lo, hi)) = collinear_overlap(inside, outside, s1, s2) {
                candidates.push(lo);
                if hi != lo {
                    candidates.push(hi);
                }
            } else if let Some(pt) = segment_intersection(inside, outside, s1, s2) {
                candidates.push(pt);
            }
        }
        candidates.sort_by_key(|pt| pt.to_hashable());
        candidates.dedup();

        if candidates.len() > 1 && candidates.iter().any(|pt| !self.corners.contains(pt)) {
            let corners = self.corners;
            candidates.retain(|pt| !corners.contains(pt));
        }
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            // Still ambiguous; keep as much of the edge inside the region as possible.
            _ => candidates.into_iter().max_by_key(|pt| inside.gps_dist(*pt)),
        }
    }
}
