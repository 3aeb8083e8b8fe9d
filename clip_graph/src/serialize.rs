use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Read, Write};
use std::str::SplitWhitespace;

use anyhow::{anyhow, Context, Result};

use geom::{Distance, LonLat};

use crate::graph::{Graph, NodeID};

// The downstream tools were written against files produced in a comma-decimal locale, so the
// wire format uses commas, not periods.
fn fmt_coordinate(x: f64) -> String {
    format!("{:.7}", x).replace('.', ",")
}

fn fmt_length(d: Distance) -> String {
    format!("{:.4}", d.inner_meters()).replace('.', ",")
}

/// Writes the graph as an adjacency list: a vertex count, then per vertex (in ascending id
/// order) its id, coordinates and degree, followed by one (id, x, y, length) tuple per incident
/// edge, sorted by (neighbor id, length). Field order and count are a frozen contract with the
/// downstream partitioning tools.
pub fn write_adjacency_list<W: Write>(graph: &Graph, out: &mut W) -> Result<()> {
    let adjacency = graph.adjacency();
    writeln!(out, "{}", graph.vertices.len())?;
    for (id, pt) in &graph.vertices {
        let neighbors = &adjacency[id];
        write!(
            out,
            "{} {} {} {}",
            id.0,
            fmt_coordinate(pt.longitude),
            fmt_coordinate(pt.latitude),
            neighbors.len()
        )?;
        for (neighbor, length) in neighbors {
            let neighbor_pt = graph.vertices[neighbor];
            write!(
                out,
                " {} {} {} {}",
                neighbor.0,
                fmt_coordinate(neighbor_pt.longitude),
                fmt_coordinate(neighbor_pt.latitude),
                fmt_length(*length)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, what: &str) -> Result<&'a str> {
        self.iter
            .next()
            .ok_or_else(|| anyhow!("truncated file; expected {}", what))
    }

    fn int(&mut self, what: &str) -> Result<i64> {
        let token = self.next(what)?;
        token
            .parse()
            .with_context(|| format!("bad {} {:?}", what, token))
    }

    fn number(&mut self, what: &str) -> Result<f64> {
        let token = self.next(what)?;
        token
            .replace(',', ".")
            .parse()
            .with_context(|| format!("bad {} {:?}", what, token))
    }
}

/// Parses the `write_adjacency_list` format back. Every undirected edge is listed in both of its
/// endpoints' records, so pair occurrences get halved; a provider file listing an edge on only
/// one side still yields that edge once.
pub fn read_adjacency_list<R: Read>(mut reader: R) -> Result<Graph> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    let mut tokens = Tokens {
        iter: contents.split_whitespace(),
    };

    let mut graph = Graph::new();
    let mut pair_counts: BTreeMap<(NodeID, NodeID, Distance), usize> = BTreeMap::new();

    let n = tokens.int("vertex count")?;
    for _ in 0..n {
        let id = NodeID(tokens.int("vertex id")?);
        let x = tokens.number("x coordinate")?;
        let y = tokens.number("y coordinate")?;
        graph.add_vertex(id, LonLat::new(x, y));

        let degree = tokens.int("degree")?;
        for _ in 0..degree {
            let neighbor = NodeID(tokens.int("neighbor id")?);
            let nx = tokens.number("neighbor x")?;
            let ny = tokens.number("neighbor y")?;
            let length = Distance::meters(tokens.number("edge length")?);
            // The neighbor's own record may come later (or not at all, for a truncated
            // provider extract); record the coordinates now.
            graph
                .vertices
                .entry(neighbor)
                .or_insert_with(|| LonLat::new(nx, ny));
            let key = if id <= neighbor {
                (id, neighbor, length)
            } else {
                (neighbor, id, length)
            };
            *pair_counts.entry(key).or_insert(0) += 1;
        }
    }

    for ((from, to, length), count) in pair_counts {
        for _ in 0..(count + 1) / 2 {
            graph.add_edge(from, to, length, false);
        }
    }
    Ok(graph)
}

pub fn write_graph(graph: &Graph, path: &str) -> Result<()> {
    let mut out = BufWriter::new(fs_err::File::create(path)?);
    write_adjacency_list(graph, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn read_graph(path: &str) -> Result<Graph> {
    read_adjacency_list(BufReader::new(fs_err::File::open(path)?))
        .with_context(|| format!("couldn't parse {}", path))
}
