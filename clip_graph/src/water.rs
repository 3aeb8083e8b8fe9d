use anyhow::{bail, Result};

use geom::Distance;

use crate::graph::Graph;

/// Merges a waterway graph into the base graph. Water edges stay topologically present but never
/// contribute travel cost, so every length becomes zero. The two id ranges must be disjoint;
/// quietly merging colliding ids would splice unrelated streets and waterways together.
pub fn merge_waterways(base: &mut Graph, water: Graph) -> Result<()> {
    for id in water.vertices.keys() {
        if base.vertices.contains_key(id) {
            bail!(
                "waterway graph reuses vertex id {}; the id ranges must be disjoint",
                id
            );
        }
    }

    info!(
        "merging {} waterway vertices and {} edges into the base graph",
        water.vertices.len(),
        water.edges.len()
    );
    for (id, pt) in water.vertices {
        base.add_vertex(id, pt);
    }
    for mut edge in water.edges {
        edge.length = Distance::ZERO;
        edge.is_water = true;
        base.edges.push(edge);
    }
    Ok(())
}
