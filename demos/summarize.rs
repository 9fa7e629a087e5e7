extern crate geojson;
extern crate geojson_topology;

use geojson::GeoJson;
use geojson_topology::{build, to_geojson, Document};
use std::env;
use std::fs::{self, File};

pub fn main() {
    // (Input path, optional output path for the re-exported GeoJSON)
    let mut args = env::args().skip(1);
    let input = args.next().expect("Usage: summarize <input.geojson> [output.geojson]");
    let output = args.next();

    let file = File::open(&input).expect("Unable to open file");
    let doc = Document::from_reader(file).expect("Unable to parse");
    let result = build(&doc).expect("Unable to build topology");

    let topo = result.topology();
    println!(
        "{}: {} nodes, {} ways, {} relations",
        input,
        topo.nodes().len(),
        topo.ways().len(),
        topo.relations().len()
    );
    match result.bounds() {
        Some(bounds) => println!("Bounds: {}", bounds),
        None => println!("Bounds: none"),
    }
    for primitive in topo.primitives().filter(|p| !p.tags().is_empty()) {
        println!("{}", primitive);
    }

    if let Some(path) = output {
        let geojson_string = GeoJson::FeatureCollection(to_geojson(&result)).to_string();
        fs::write(path, geojson_string).expect("Unable to write file");
    }
}
