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

use std::collections::BTreeSet;

use geojson::{Feature, FeatureCollection, Geometry as GeoJsonGeometry, Value as GeoJsonGeomValue};

use crate::json::{JsonObject, JsonValue};
use crate::{BoundedTopology, Member, NodeId, Position, Relation, Tags, Topology, Way, WayId};

fn make_ring(topo: &Topology, way: &Way) -> Vec<Position> {
    topo.way_coords(way).iter().map(|c| c.to_position()).collect()
}

fn make_properties(tags: &Tags, skip: Option<&str>) -> Option<JsonObject> {
    let properties: JsonObject = tags
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != skip)
        .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
        .collect();
    Some(properties)
}

fn make_feature(value: GeoJsonGeomValue, properties: Option<JsonObject>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(GeoJsonGeometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

fn convert_way(topo: &Topology, way: &Way) -> Feature {
    let ring = make_ring(topo, way);
    let value = if topo.is_closed(way) {
        GeoJsonGeomValue::Polygon(vec![ring])
    } else {
        GeoJsonGeomValue::LineString(ring)
    };
    make_feature(value, make_properties(way.tags(), None))
}

fn convert_relation(topo: &Topology, relation: &Relation) -> Feature {
    let mut outer = Vec::new();
    let mut inner = Vec::new();
    for (role, member) in relation.members() {
        let way = match *member {
            Member::Way(id) => topo.way(id),
            Member::Node(..) => None,
        };
        if let Some(way) = way {
            if role == "outer" {
                outer.push(make_ring(topo, way));
            } else {
                inner.push(make_ring(topo, way));
            }
        }
    }
    outer.append(&mut inner);
    make_feature(
        GeoJsonGeomValue::Polygon(outer),
        make_properties(relation.tags(), Some("type")),
    )
}

/// Convert a built topology back to a GeoJSON Feature collection.
///
/// Nodes that belong to no way become `Point` features, ways that belong to
/// no relation become `Polygon` (when closed) or `LineString` features, and
/// multipolygon relations become `Polygon` features with the outer ring
/// first. Tags are exported as string properties.
pub fn to_geojson(result: &BoundedTopology) -> FeatureCollection {
    let topo = result.topology();
    let way_nodes: BTreeSet<NodeId> = topo
        .ways()
        .iter()
        .flat_map(|w| w.nodes().iter().cloned())
        .collect();
    let relation_ways: BTreeSet<WayId> = topo
        .relations()
        .iter()
        .flat_map(|r| r.members().iter())
        .filter_map(|(_, m)| match *m {
            Member::Way(id) => Some(id),
            Member::Node(..) => None,
        })
        .collect();

    let mut features = Vec::new();
    for node in topo.nodes().iter().filter(|n| !way_nodes.contains(&n.id())) {
        features.push(make_feature(
            GeoJsonGeomValue::Point(node.coord().to_position()),
            make_properties(node.tags(), None),
        ));
    }
    for way in topo.ways().iter().filter(|w| !relation_ways.contains(&w.id())) {
        features.push(convert_way(topo, way));
    }
    for relation in topo.relations().iter().filter(|r| r.is_multipolygon()) {
        features.push(convert_relation(topo, relation));
    }

    FeatureCollection {
        bbox: result.bounds().map(|b| b.to_bbox()),
        features,
        foreign_members: None,
    }
}
