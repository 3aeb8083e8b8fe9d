//! Prepares a bounded, serializable street graph around a point of interest. A raw graph from a
//! map-data provider is topologically unbounded; this crate clips it to a rectangular region,
//! stitches every loose end onto a closed boundary ring, and writes a deterministic
//! adjacency-list artifact for the downstream partitioning tools.

#[macro_use]
extern crate log;

pub mod boundary;
pub mod clip;
pub mod graph;
pub mod ring;
pub mod serialize;
pub mod water;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

pub use crate::boundary::BoundingPolygon;
pub use crate::clip::{clip_edges, EdgeOutcome, PendingChanges};
pub use crate::graph::{Edge, Graph, NodeAllocator, NodeID};
pub use crate::ring::close_boundary_ring;
pub use crate::serialize::{read_adjacency_list, read_graph, write_adjacency_list, write_graph};
pub use crate::water::merge_waterways;

#[derive(Clone, Debug)]
pub struct Options {
    pub center: LonLat,
    pub radius: Distance,
}

/// How clipping went, per edge category, plus the size of the closing ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipStats {
    pub kept: usize,
    pub clipped: usize,
    pub dropped_outside: usize,
    pub dropped_degenerate: usize,
    pub ring_size: usize,
}

impl ClipStats {
    fn from_outcomes(outcomes: &[EdgeOutcome]) -> ClipStats {
        let mut stats = ClipStats::default();
        for outcome in outcomes {
            match outcome {
                EdgeOutcome::Kept => stats.kept += 1,
                EdgeOutcome::ClippedTo(_) => stats.clipped += 1,
                EdgeOutcome::DroppedOutside => stats.dropped_outside += 1,
                EdgeOutcome::DroppedDegenerate => stats.dropped_degenerate += 1,
            }
        }
        stats
    }
}

/// Runs the whole pipeline: build the boundary, overlay waterways, clip every edge, close the
/// boundary ring, then apply all the recorded surgery at once. Fails without producing a graph
/// if any edge hit a degenerate crossing; partial output would silently disconnect the region.
pub fn prepare(
    mut graph: Graph,
    waterways: Option<Graph>,
    opts: &Options,
) -> Result<(Graph, ClipStats)> {
    if graph.vertices.is_empty() {
        bail!("the provider graph has no vertices");
    }
    let boundary = BoundingPolygon::new(opts.center, opts.radius);

    if let Some(water) = waterways {
        water::merge_waterways(&mut graph, water)?;
    }

    info!(
        "clipping {} vertices / {} edges to {} around {}",
        graph.vertices.len(),
        graph.edges.len(),
        opts.radius,
        opts.center
    );
    let mut changes = PendingChanges::new(&graph);
    let outcomes = clip::clip_edges(&graph, &boundary, &mut changes);
    let ring_size = ring::close_boundary_ring(&graph, &boundary, &mut changes);

    let mut stats = ClipStats::from_outcomes(&outcomes);
    stats.ring_size = ring_size;
    ensure_no_degenerate(&stats)?;

    changes.apply(&mut graph);
    info!(
        "bounded graph has {} vertices / {} edges ({} kept, {} clipped, {} dropped, ring of {})",
        graph.vertices.len(),
        graph.edges.len(),
        stats.kept,
        stats.clipped,
        stats.dropped_outside,
        stats.ring_size
    );
    Ok((graph, stats))
}

fn ensure_no_degenerate(stats: &ClipStats) -> Result<()> {
    if stats.dropped_degenerate > 0 {
        bail!(
            "{} edges straddled the boundary without a computable crossing point; refusing to \
             silently lose them",
            stats.dropped_degenerate
        );
    }
    Ok(())
}
