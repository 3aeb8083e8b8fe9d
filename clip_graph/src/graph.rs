use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NodeID(pub i64);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

/// An undirected edge. `from` and `to` are storage order, not a direction. The same pair can
/// appear several times; each copy carries its own length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeID,
    pub to: NodeID,
    pub length: Distance,
    pub is_water: bool,
}

/// Vertices keyed by id, edges in insertion order. Adjacency is derived on demand, never stored,
/// so there's only one copy of the topology to keep consistent. The BTreeMap matters: everything
/// downstream enumerates vertices in id order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub vertices: BTreeMap<NodeID, LonLat>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph {
            vertices: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, id: NodeID, pt: LonLat) {
        self.vertices.insert(id, pt);
    }

    pub fn add_edge(&mut self, from: NodeID, to: NodeID, length: Distance, is_water: bool) {
        self.edges.push(Edge {
            from,
            to,
            length,
            is_water,
        });
    }

    /// Removes the vertices and, transitively, every edge referencing one of them.
    pub fn remove_vertices(&mut self, remove: &BTreeSet<NodeID>) {
        for id in remove {
            self.vertices.remove(id);
        }
        self.edges
            .retain(|e| !remove.contains(&e.from) && !remove.contains(&e.to));
    }

    /// Neighbor lists for every vertex, each sorted by (neighbor id, length) so enumeration order
    /// is reproducible. Parallel edges show up once per copy.
    pub fn adjacency(&self) -> BTreeMap<NodeID, Vec<(NodeID, Distance)>> {
        let mut result: BTreeMap<NodeID, Vec<(NodeID, Distance)>> = BTreeMap::new();
        for id in self.vertices.keys() {
            result.insert(*id, Vec::new());
        }
        for e in &self.edges {
            result.get_mut(&e.from).unwrap().push((e.to, e.length));
            if e.from != e.to {
                result.get_mut(&e.to).unwrap().push((e.from, e.length));
            }
        }
        for list in result.values_mut() {
            list.sort();
        }
        result
    }
}

/// Issues fresh vertex ids, strictly greater than anything the graph already uses. Ids are never
/// reused within one run, even after the vertex they were minted for goes away.
#[derive(Debug)]
pub struct NodeAllocator {
    next_id: i64,
}

impl NodeAllocator {
    pub fn new(graph: &Graph) -> NodeAllocator {
        let max = graph.vertices.keys().last().map(|id| id.0).unwrap_or(0);
        NodeAllocator { next_id: max + 1 }
    }

    pub fn allocate(&mut self) -> NodeID {
        let id = NodeID(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_stays_above_existing_ids() {
        let mut graph = Graph::new();
        graph.add_vertex(NodeID(7), LonLat::new(0.0, 0.0));
        graph.add_vertex(NodeID(3), LonLat::new(1.0, 0.0));

        let mut allocator = NodeAllocator::new(&graph);
        let a = allocator.allocate();
        let b = allocator.allocate();
        assert_eq!(a, NodeID(8));
        assert_eq!(b, NodeID(9));
    }

    #[test]
    fn remove_vertices_takes_edges_along() {
        let mut graph = Graph::new();
        graph.add_vertex(NodeID(1), LonLat::new(0.0, 0.0));
        graph.add_vertex(NodeID(2), LonLat::new(1.0, 0.0));
        graph.add_vertex(NodeID(3), LonLat::new(2.0, 0.0));
        graph.add_edge(NodeID(1), NodeID(2), Distance::meters(10.0), false);
        graph.add_edge(NodeID(2), NodeID(3), Distance::meters(10.0), false);
        graph.add_edge(NodeID(1), NodeID(3), Distance::meters(20.0), false);

        let remove: BTreeSet<NodeID> = [NodeID(2)].into_iter().collect();
        graph.remove_vertices(&remove);

        assert_eq!(graph.vertices.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, NodeID(1));
        assert_eq!(graph.edges[0].to, NodeID(3));
    }

    #[test]
    fn adjacency_is_sorted_and_symmetric() {
        let mut graph = Graph::new();
        graph.add_vertex(NodeID(1), LonLat::new(0.0, 0.0));
        graph.add_vertex(NodeID(2), LonLat::new(1.0, 0.0));
        graph.add_vertex(NodeID(3), LonLat::new(2.0, 0.0));
        graph.add_edge(NodeID(3), NodeID(1), Distance::meters(20.0), false);
        graph.add_edge(NodeID(1), NodeID(2), Distance::meters(10.0), false);
        // A parallel edge with its own weight
        graph.add_edge(NodeID(2), NodeID(1), Distance::meters(12.0), false);

        let adjacency = graph.adjacency();
        assert_eq!(
            adjacency[&NodeID(1)],
            vec![
                (NodeID(2), Distance::meters(10.0)),
                (NodeID(2), Distance::meters(12.0)),
                (NodeID(3), Distance::meters(20.0)),
            ]
        );
        assert_eq!(
            adjacency[&NodeID(2)],
            vec![
                (NodeID(1), Distance::meters(10.0)),
                (NodeID(1), Distance::meters(12.0)),
            ]
        );
        assert_eq!(adjacency[&NodeID(3)], vec![(NodeID(1), Distance::meters(20.0))]);
    }
}
