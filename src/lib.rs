// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Convert [GeoJSON](https://tools.ietf.org/html/rfc7946) documents into a
//! topological graph of nodes, ways and relations.
//!
//! Every coordinate becomes a [`Node`], every line or polygon ring becomes a
//! [`Way`] referencing its nodes in order, and polygons with holes become
//! `multipolygon` [`Relation`]s. Feature properties are turned into string
//! tags. The result is a [`BoundedTopology`]: the graph plus the envelope
//! covering all of its nodes.
//!
//! # Example
//!
//! ```
//! use geojson_topology::{build, Document};
//!
//! let doc: Document = r#"{
//!     "type": "Feature",
//!     "properties": {"name": "a"},
//!     "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1], [2, 2]]}
//! }"#
//! .parse()
//! .unwrap();
//!
//! let result = build(&doc).unwrap();
//! assert_eq!(result.topology().nodes().len(), 3);
//! assert_eq!(result.topology().ways().len(), 1);
//! assert_eq!(result.topology().ways()[0].tags()["name"], "a");
//! ```
//!
//! Documents declaring a `crs` member are reprojected through a
//! [`CoordinateTransform`] obtained from a [`CrsResolver`]. The default
//! resolver only knows WGS84; plug in your own for anything else:
//!
//! ```
//! use geojson_topology::{BoxedTransform, Builder, CrsDefinition, Document, Error};
//!
//! fn halve(x: f64, y: f64) -> Result<(f64, f64), Error> {
//!     Ok((x / 2., y / 2.))
//! }
//!
//! let doc: Document = r#"{
//!     "type": "Point",
//!     "coordinates": [10, 20],
//!     "crs": {"type": "name", "properties": {"name": "local:halved"}}
//! }"#
//! .parse()
//! .unwrap();
//!
//! let builder = Builder::new().with_resolver(|def: &CrsDefinition| match def {
//!     CrsDefinition::Name(name) if name == "local:halved" => Ok(Box::new(halve) as BoxedTransform),
//!     other => Err(Error::UnknownCrs(other.to_string())),
//! });
//! let result = builder.build(&doc).unwrap();
//! assert_eq!(result.topology().nodes()[0].coord().lon(), 5.);
//! ```

/// Bounding box as used by GeoJSON: `[min_lon, min_lat, max_lon, max_lat]`
pub type Bbox = Vec<f64>;

/// A single GeoJSON position (x, y and optionally elevation)
pub type Position = Vec<f64>;

mod bounds;
pub use crate::bounds::{Bounds, LatLon};

mod builder;
pub use crate::builder::{build, build_with_transform, Builder};

mod config;
pub use crate::config::BuilderConfig;

mod crs;
pub use crate::crs::{
    BoxedTransform, CoordinateTransform, Crs, CrsDefinition, CrsResolver, DefaultFetcher, Identity, LinkFetcher,
    LinkedCrs, Wgs84Resolver, MAX_LINK_LENGTH,
};

mod document;
pub use crate::document::{Document, Feature, GeoJson};

mod error;
pub use crate::error::{Error, ErrorKind};

mod geometry;
pub use crate::geometry::Geometry;

mod tags;
pub use crate::tags::{tags_from_properties, Tags};

mod to_geojson;
pub use crate::to_geojson::to_geojson;

mod topology;
pub use crate::topology::{
    BoundedTopology, Member, Node, NodeId, Primitive, Relation, RelationId, Topology, Way, WayId,
};

mod util;

mod json {
    pub use serde::{Deserialize, Deserializer};
    pub use serde_json::{Map, Value as JsonValue};
    pub type JsonObject = Map<String, JsonValue>;
}

pub use crate::json::{JsonObject, JsonValue};
