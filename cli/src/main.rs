//! The interactive entry point: asks where to bound the graph, runs the pipeline, writes the
//! adjacency list.

#[macro_use]
extern crate log;

use std::io;

use anyhow::{bail, Context, Result};
use structopt::StructOpt;

use clip_graph::Options;
use geom::{Distance, LonLat};

// The defaults the original datasets were produced with.
const DEFAULT_CENTER_LAT: f64 = 59.93893094417527;
const DEFAULT_CENTER_LON: f64 = 30.32268115454809;
const DEFAULT_RADIUS_METERS: f64 = 50.0;
// The rectangle only approximates a disk of the requested radius, so always pad it.
const RADIUS_PADDING_METERS: f64 = 200.0;

#[derive(StructOpt)]
#[structopt(
    name = "clip_graph",
    about = "Clips a raw provider street graph to a bounded region and writes an adjacency list"
)]
struct Flags {
    /// The adjacency-list file with the raw street graph
    #[structopt(long)]
    graph: String,
    /// An adjacency-list file with waterway features, same schema
    #[structopt(long)]
    waterways: Option<String>,
    /// Where to write the bounded graph; defaults to graph_<lat> <lon>_<radius>.txt
    #[structopt(long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let flags = Flags::from_args();

    let lat = prompt_number("write center latitude or -:", DEFAULT_CENTER_LAT)?;
    let lon = prompt_number("write center longitude or -:", DEFAULT_CENTER_LON)?;
    let dist = prompt_number("write dist in meters or -:", DEFAULT_RADIUS_METERS)?;
    let radius = dist + RADIUS_PADDING_METERS;

    let graph = clip_graph::read_graph(&flags.graph)?;
    if graph.vertices.is_empty() {
        bail!("{} has no vertices; the provider returned no data", flags.graph);
    }

    let waterways = match flags.waterways {
        Some(path) if prompt_yes_no("include waterways? (y/n):")? => {
            Some(clip_graph::read_graph(&path)?)
        }
        _ => None,
    };

    let opts = Options {
        center: LonLat::new(lon, lat),
        radius: Distance::meters(radius),
    };
    let (bounded, stats) = clip_graph::prepare(graph, waterways, &opts)?;
    info!("{:?}", stats);

    let out_path = flags
        .output
        .unwrap_or_else(|| format!("graph_{} {}_{}.txt", lat, lon, radius));
    clip_graph::write_graph(&bounded, &out_path)?;
    println!("wrote {}", out_path);
    Ok(())
}

fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    println!("{}", prompt);
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed == "-" || trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .replace(',', ".")
        .parse()
        .with_context(|| format!("{:?} isn't a number", trimmed))
}

fn prompt_yes_no(prompt: &str) -> Result<bool> {
    println!("{}", prompt);
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    match line.trim() {
        "y" | "Y" | "yes" => Ok(true),
        "n" | "N" | "no" | "" => Ok(false),
        x => bail!("expected y or n, not {:?}", x),
    }
}
