use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use geom::{Distance, HashableLonLat, LonLat};

use crate::boundary::BoundingPolygon;
use crate::graph::{Edge, Graph, NodeAllocator, NodeID};

/// What happened to one original edge during clipping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EdgeOutcome {
    /// Both endpoints inside; the edge survives untouched.
    Kept,
    /// One endpoint was outside; the edge now ends at this boundary vertex.
    ClippedTo(NodeID),
    /// Both endpoints outside.
    // TODO An edge crossing the whole region with both endpoints outside lands here too and gets
    // dropped. Detect that case and clip it to two boundary vertices instead.
    DroppedOutside,
    /// One endpoint was outside, but no crossing point could be computed. Can't happen for a
    /// segment that properly straddles a convex region; reported upwards instead of silently
    /// losing the edge.
    DroppedDegenerate,
}

/// Mutations recorded during clipping and ring-building, applied in one batch afterwards. Nodes
/// are inserted before removals run, and new edges are linked last, so a removal can never take
/// out a node that a new edge is about to reference.
pub struct PendingChanges {
    allocator: NodeAllocator,
    by_coordinate: HashMap<HashableLonLat, NodeID>,
    new_nodes: BTreeMap<NodeID, LonLat>,
    boundary_nodes: BTreeSet<NodeID>,
    removed: BTreeSet<NodeID>,
    new_edges: Vec<Edge>,
}

impl PendingChanges {
    pub fn new(graph: &Graph) -> PendingChanges {
        let mut by_coordinate = HashMap::new();
        for (id, pt) in &graph.vertices {
            by_coordinate.insert(pt.to_hashable(), *id);
        }
        PendingChanges {
            allocator: NodeAllocator::new(graph),
            by_coordinate,
            new_nodes: BTreeMap::new(),
            boundary_nodes: BTreeSet::new(),
            removed: BTreeSet::new(),
            new_edges: Vec::new(),
        }
    }

    /// The vertex pinned to this boundary coordinate, allocating a fresh id the first time the
    /// coordinate shows up. Every node registered here joins the closing ring.
    pub fn boundary_node_at(&mut self, pt: LonLat) -> NodeID {
        let id = match self.by_coordinate.get(&pt.to_hashable()) {
            Some(id) => *id,
            None => {
                let id = self.allocator.allocate();
                self.by_coordinate.insert(pt.to_hashable(), id);
                self.new_nodes.insert(id, pt);
                id
            }
        };
        self.boundary_nodes.insert(id);
        id
    }

    pub fn mark_removed(&mut self, id: NodeID) {
        self.removed.insert(id);
    }

    pub fn link(&mut self, edge: Edge) {
        self.new_edges.push(edge);
    }

    pub fn has_boundary_nodes(&self) -> bool {
        !self.boundary_nodes.is_empty()
    }

    pub fn boundary_node_ids(&self) -> Vec<NodeID> {
        self.boundary_nodes.iter().copied().collect()
    }

    /// Position of a node, whether it's pending or already in the graph.
    pub fn node_pt(&self, graph: &Graph, id: NodeID) -> LonLat {
        self.new_nodes
            .get(&id)
            .copied()
            .unwrap_or_else(|| graph.vertices[&id])
    }

    /// Applies all recorded surgery: insert pending nodes, then remove marked vertices (and every
    /// edge touching them), then link the new edges. Exactly this order.
    pub fn apply(self, graph: &mut Graph) {
        for (id, pt) in self.new_nodes {
            graph.add_vertex(id, pt);
        }
        graph.remove_vertices(&self.removed);
        for e in self.new_edges {
            graph.edges.push(e);
        }
    }
}

/// Classifies every edge against the boundary and records the surgery needed: out-of-bounds
/// vertices go away, straddling edges get cut back to a synthesized vertex on the boundary.
/// Returns one outcome per edge, in the graph's edge order.
pub fn clip_edges(
    graph: &Graph,
    boundary: &BoundingPolygon,
    changes: &mut PendingChanges,
) -> Vec<EdgeOutcome> {
    // Every vertex out of bounds goes, whether or not an edge references it.
    for (id, pt) in &graph.vertices {
        if !boundary.contains(*pt) {
            changes.mark_removed(*id);
        }
    }

    let mut outcomes = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let from_pt = graph.vertices[&edge.from];
        let to_pt = graph.vertices[&edge.to];
        let outcome = match (boundary.contains(from_pt), boundary.contains(to_pt)) {
            (true, true) => EdgeOutcome::Kept,
            (false, false) => EdgeOutcome::DroppedOutside,
            (from_inside, _) => {
                let (inside_id, inside_pt, outside_id, outside_pt) = if from_inside {
                    (edge.from, from_pt, edge.to, to_pt)
                } else {
                    (edge.to, to_pt, edge.from, from_pt)
                };
                match boundary.clip_segment(inside_pt, outside_pt) {
                    Some(crossing) => {
                        let new_id = changes.boundary_node_at(crossing);
                        // The crossing can be the inside endpoint itself, when that vertex sits
                        // exactly on the boundary. Nothing left to link then.
                        if new_id != inside_id {
                            let length = if edge.is_water {
                                Distance::ZERO
                            } else {
                                inside_pt.gps_dist(crossing)
                            };
                            changes.link(Edge {
                                from: inside_id,
                                to: new_id,
                                length,
                                is_water: edge.is_water,
                            });
                        }
                        EdgeOutcome::ClippedTo(new_id)
                    }
                    None => {
                        warn!(
                            "{} -> {} straddles the boundary but has no crossing point; dropping it",
                            inside_id, outside_id
                        );
                        EdgeOutcome::DroppedDegenerate
                    }
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}
