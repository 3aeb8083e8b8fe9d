//! End-to-end checks of the clipping pipeline against a small boundary near 60N.

use std::collections::BTreeMap;

use clip_graph::{
    prepare, read_adjacency_list, write_adjacency_list, BoundingPolygon, Graph, NodeID, Options,
};
use geom::{Distance, LonLat};

fn center() -> LonLat {
    LonLat::new(30.0, 60.0)
}

fn options() -> Options {
    Options {
        center: center(),
        radius: Distance::meters(1_000.0),
    }
}

fn serialize(graph: &Graph) -> String {
    let mut out = Vec::new();
    write_adjacency_list(graph, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn a_straddling_edge_is_cut_back_to_the_boundary() {
    let mut graph = Graph::new();
    let a = center();
    let b = LonLat::new(31.0, 60.0);
    graph.add_vertex(NodeID(1), a);
    graph.add_vertex(NodeID(2), b);
    graph.add_edge(NodeID(1), NodeID(2), a.gps_dist(b), false);
    let original_length = graph.edges[0].length;

    let (bounded, stats) = prepare(graph, None, &options()).unwrap();

    // The outside endpoint is gone, a vertex on the boundary replaced it.
    assert!(bounded.vertices.contains_key(&NodeID(1)));
    assert!(!bounded.vertices.contains_key(&NodeID(2)));
    assert!(bounded.vertices.contains_key(&NodeID(3)));
    assert_eq!(stats.clipped, 1);
    assert_eq!(stats.kept, 0);

    let replacement = bounded
        .edges
        .iter()
        .find(|e| (e.from, e.to) == (NodeID(1), NodeID(3)))
        .unwrap();
    assert!(replacement.length < original_length);
    assert_eq!(
        replacement.length,
        a.gps_dist(bounded.vertices[&NodeID(3)])
    );

    // The synthesized vertex joined the ring: its degree is the replacement plus two ring hops.
    assert_eq!(stats.ring_size, 5);
    assert_eq!(bounded.adjacency()[&NodeID(3)].len(), 3);
    // A crossing, four corners, and the interior endpoint
    assert_eq!(bounded.vertices.len(), 6);
    // One replacement plus five ring edges
    assert_eq!(bounded.edges.len(), 6);
}

#[test]
fn a_water_edge_crossing_the_boundary_stays_free() {
    let mut base = Graph::new();
    base.add_vertex(NodeID(1), center());

    let mut water = Graph::new();
    let w1 = LonLat::new(30.001, 60.0);
    let w2 = LonLat::new(31.0, 60.0);
    water.add_vertex(NodeID(10), w1);
    water.add_vertex(NodeID(11), w2);
    water.add_edge(NodeID(10), NodeID(11), w1.gps_dist(w2), false);

    let (bounded, stats) = prepare(base, Some(water), &options()).unwrap();

    assert_eq!(stats.clipped, 1);
    let replacement = bounded.edges.iter().find(|e| e.is_water).unwrap();
    assert_eq!(replacement.from, NodeID(10));
    assert_eq!(replacement.length, Distance::ZERO);
}

#[test]
fn overlapping_waterway_ids_abort_the_run() {
    let mut base = Graph::new();
    base.add_vertex(NodeID(1), center());

    let mut water = Graph::new();
    water.add_vertex(NodeID(1), LonLat::new(30.001, 60.0));

    assert!(prepare(base, Some(water), &options()).is_err());
}

#[test]
fn two_crossings_at_one_coordinate_synthesize_one_vertex() {
    let mut graph = Graph::new();
    let a = center();
    graph.add_vertex(NodeID(1), a);
    // Both outside to the east and collinear with a: both edges cross the east side at the same
    // point.
    graph.add_vertex(NodeID(2), LonLat::new(31.0, 60.0));
    graph.add_vertex(NodeID(3), LonLat::new(32.0, 60.0));
    graph.add_edge(NodeID(1), NodeID(2), Distance::meters(55_000.0), false);
    graph.add_edge(NodeID(1), NodeID(3), Distance::meters(110_000.0), false);

    let (bounded, stats) = prepare(graph, None, &options()).unwrap();

    assert_eq!(stats.clipped, 2);
    // Interior endpoint, ONE shared crossing, four corners
    assert_eq!(bounded.vertices.len(), 6);
    assert_eq!(stats.ring_size, 5);
    let replacements: Vec<_> = bounded
        .edges
        .iter()
        .filter(|e| (e.from, e.to) == (NodeID(1), NodeID(4)))
        .collect();
    assert_eq!(replacements.len(), 2);
    assert_eq!(replacements[0].length, replacements[1].length);
}

#[test]
fn a_fully_interior_graph_is_untouched() {
    let mut graph = Graph::new();
    graph.add_vertex(NodeID(1), LonLat::new(30.0, 60.0));
    graph.add_vertex(NodeID(2), LonLat::new(30.001, 60.0));
    graph.add_vertex(NodeID(3), LonLat::new(30.0, 60.001));
    graph.add_edge(NodeID(1), NodeID(2), Distance::meters(56.0), false);
    graph.add_edge(NodeID(1), NodeID(3), Distance::meters(111.0), false);

    let (bounded, stats) = prepare(graph.clone(), None, &options()).unwrap();

    assert_eq!(bounded, graph);
    assert_eq!(stats.kept, 2);
    assert_eq!(stats.ring_size, 0);
}

#[test]
fn every_surviving_vertex_is_in_bounds() {
    let opts = options();
    let boundary = BoundingPolygon::new(opts.center, opts.radius);

    // A coarse grid spilling far over the boundary on every side, linked along rows.
    let mut graph = Graph::new();
    let mut id = 0;
    let mut row_ids: Vec<Vec<NodeID>> = Vec::new();
    for i in 0..9 {
        let mut row = Vec::new();
        for j in 0..9 {
            id += 1;
            let pt = LonLat::new(29.96 + 0.01 * (j as f64), 59.98 + 0.005 * (i as f64));
            graph.add_vertex(NodeID(id), pt);
            row.push(NodeID(id));
        }
        row_ids.push(row);
    }
    for row in &row_ids {
        for pair in row.windows(2) {
            let length = graph.vertices[&pair[0]].gps_dist(graph.vertices[&pair[1]]);
            graph.add_edge(pair[0], pair[1], length, false);
        }
    }

    let (bounded, _) = prepare(graph, None, &opts).unwrap();

    assert!(!bounded.vertices.is_empty());
    for (id, pt) in &bounded.vertices {
        assert!(boundary.contains(*pt), "{} at {} survived out of bounds", id, pt);
    }
}

#[test]
fn the_boundary_ring_is_a_simple_cycle() {
    let mut graph = Graph::new();
    let a = center();
    graph.add_vertex(NodeID(1), a);
    // Crossings on three different sides
    for (id, out_pt) in [
        (2, LonLat::new(31.0, 60.0)),
        (3, LonLat::new(29.0, 60.0)),
        (4, LonLat::new(30.0, 61.0)),
    ] {
        graph.add_vertex(NodeID(id), out_pt);
        graph.add_edge(NodeID(1), NodeID(id), a.gps_dist(out_pt), false);
    }

    let (bounded, stats) = prepare(graph, None, &options()).unwrap();

    // Three crossings plus four corners
    assert_eq!(stats.ring_size, 7);

    // Ring edges are everything but the three replacements; as a cycle, there are exactly as
    // many of them as ring members, and each member touches exactly two.
    let ring_edges: Vec<_> = bounded.edges.iter().skip(3).collect();
    assert_eq!(ring_edges.len(), stats.ring_size);
    let mut ring_degree: BTreeMap<NodeID, usize> = BTreeMap::new();
    for e in &ring_edges {
        *ring_degree.entry(e.from).or_insert(0) += 1;
        *ring_degree.entry(e.to).or_insert(0) += 1;
    }
    assert_eq!(ring_degree.len(), stats.ring_size);
    assert!(ring_degree.values().all(|d| *d == 2));

    // Each hop is as long as the geodesic between its endpoints.
    for e in &ring_edges {
        assert_eq!(
            e.length,
            bounded.vertices[&e.from].gps_dist(bounded.vertices[&e.to])
        );
    }
}

#[test]
fn serializing_the_bounded_graph_round_trips() {
    let mut graph = Graph::new();
    let a = center();
    let b = LonLat::new(30.001, 60.0);
    let c = LonLat::new(31.0, 60.0);
    graph.add_vertex(NodeID(1), a);
    graph.add_vertex(NodeID(2), b);
    graph.add_vertex(NodeID(3), c);
    graph.add_edge(NodeID(1), NodeID(2), a.gps_dist(b), false);
    graph.add_edge(NodeID(2), NodeID(3), b.gps_dist(c), false);

    let (bounded, _) = prepare(graph, None, &options()).unwrap();

    let first = serialize(&bounded);
    let parsed = read_adjacency_list(first.as_bytes()).unwrap();
    assert_eq!(parsed.vertices, bounded.vertices);
    assert_eq!(serialize(&parsed), first);
}

#[test]
fn identical_inputs_produce_identical_bytes() {
    let mut graph = Graph::new();
    let a = center();
    graph.add_vertex(NodeID(1), a);
    for (id, lon, lat) in [(2, 30.002, 60.0), (3, 31.0, 60.0), (4, 30.0, 61.0)] {
        let pt = LonLat::new(lon, lat);
        graph.add_vertex(NodeID(id), pt);
        graph.add_edge(NodeID(1), NodeID(id), a.gps_dist(pt), false);
    }

    let (bounded1, _) = prepare(graph.clone(), None, &options()).unwrap();
    let (bounded2, _) = prepare(graph, None, &options()).unwrap();

    if bounded1 != bounded2 {
        panic!(
            "two runs over the same input diverged:\n{}\n{}",
            serde_json::to_string_pretty(&bounded1).unwrap(),
            serde_json::to_string_pretty(&bounded2).unwrap()
        );
    }
    assert_eq!(serialize(&bounded1), serialize(&bounded2));
}
