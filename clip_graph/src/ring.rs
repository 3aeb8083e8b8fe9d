use ordered_float::NotNan;

use geom::LonLat;

use crate::boundary::BoundingPolygon;
use crate::clip::PendingChanges;
use crate::graph::{Edge, Graph, NodeID};

/// A vertex eligible for the closing ring, with the coordinate its polar angle comes from.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryNode {
    pub id: NodeID,
    pub pt: LonLat,
}

/// Connects every boundary vertex into one closed cycle so the clipped region has no dangling
/// ends. The four corners always participate, even when no edge touched their sides. Skipped
/// entirely when clipping synthesized nothing; a graph that never touched the boundary stays
/// exactly as it was. Returns the ring size.
pub fn close_boundary_ring(
    graph: &Graph,
    boundary: &BoundingPolygon,
    changes: &mut PendingChanges,
) -> usize {
    if !changes.has_boundary_nodes() {
        return 0;
    }

    for corner in boundary.corners() {
        changes.boundary_node_at(corner);
    }

    let mut members: Vec<BoundaryNode> = changes
        .boundary_node_ids()
        .into_iter()
        .map(|id| BoundaryNode {
            id,
            pt: changes.node_pt(graph, id),
        })
        .collect();

    // Angle alone isn't a total order; two exactly co-angular points would make the walk order
    // depend on the container. The id settles it.
    let center = boundary.center();
    members.sort_by_key(|n| {
        let angle = (n.pt.latitude - center.latitude).atan2(n.pt.longitude - center.longitude);
        (NotNan::new(angle).unwrap(), n.id)
    });

    for idx in 0..members.len() {
        let a = members[idx];
        let b = members[(idx + 1) % members.len()];
        changes.link(Edge {
            from: a.id,
            to: b.id,
            length: a.pt.gps_dist(b.pt),
            is_water: false,
        });
    }
    members.len()
}
