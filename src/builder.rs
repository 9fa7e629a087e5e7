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

use log::{debug, info, warn};

use crate::crs::{self, BoxedTransform};
use crate::{
    tags_from_properties, BoundedTopology, BuilderConfig, CoordinateTransform, CrsResolver,
    DefaultFetcher, Document, Error, Feature, GeoJson, Geometry, Identity, LatLon, LinkFetcher,
    Member, NodeId, Position, Tags, Topology, WayId, Wgs84Resolver,
};

/// Converts GeoJSON documents into [`BoundedTopology`] values.
///
/// A builder holds no state between calls: every call to [`Builder::build`]
/// starts from an empty topology, so one builder may serve several
/// documents, from several threads.
pub struct Builder {
    config: BuilderConfig,
    resolver: Box<dyn CrsResolver + Send + Sync>,
    fetcher: Option<Box<dyn LinkFetcher + Send + Sync>>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            config: BuilderConfig::default(),
            resolver: Box::new(Wgs84Resolver),
            fetcher: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `resolver` to turn declared coordinate reference systems into
    /// transforms. Defaults to [`Wgs84Resolver`].
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: CrsResolver + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// Use `fetcher` to retrieve `link` CRS definitions. Defaults to a
    /// [`DefaultFetcher`] honouring the configured timeout.
    pub fn with_fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: LinkFetcher + Send + Sync + 'static,
    {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the topology of `doc`, reprojecting through its declared CRS.
    ///
    /// Fails without producing anything when the CRS cannot be resolved, a
    /// position has fewer than two values or a coordinate cannot be
    /// transformed.
    pub fn build(&self, doc: &Document) -> Result<BoundedTopology, Error> {
        let transform = self.transform_for(doc)?;
        build_with_transform(doc, &*transform)
    }

    fn transform_for(&self, doc: &Document) -> Result<BoxedTransform, Error> {
        let declared = match doc.crs {
            Some(ref declared) if self.config.honor_crs => declared,
            Some(_) => {
                debug!("Ignoring declared CRS");
                return Ok(Box::new(Identity));
            }
            None => return Ok(Box::new(Identity)),
        };
        match self.fetcher {
            Some(ref fetcher) => crs::resolve(
                declared,
                self.resolver.as_ref(),
                fetcher.as_ref(),
                self.config.max_link_bytes,
            ),
            None => crs::resolve(
                declared,
                self.resolver.as_ref(),
                &DefaultFetcher::with_timeout(self.config.link_timeout()),
                self.config.max_link_bytes,
            ),
        }
    }
}

/// Build the topology of `doc` with the default [`Builder`].
pub fn build(doc: &Document) -> Result<BoundedTopology, Error> {
    Builder::new().build(doc)
}

/// Build the topology of `doc`, passing every coordinate through
/// `transform`. Any `crs` declared by the document is ignored.
pub fn build_with_transform(
    doc: &Document,
    transform: &dyn CoordinateTransform,
) -> Result<BoundedTopology, Error> {
    let mut topology = Topology::new();
    match doc.root {
        GeoJson::FeatureCollection(ref features) => {
            for feature in features {
                process_feature(&mut topology, transform, feature)?;
            }
        }
        GeoJson::Feature(ref feature) => process_feature(&mut topology, transform, feature)?,
        GeoJson::Geometry(ref geometry) => process_geometry(&mut topology, transform, None, geometry)?,
    }
    let result = BoundedTopology::new(topology);
    info!(
        "Built topology with {} primitives: {} nodes, {} ways and {} relations",
        result.topology().len(),
        result.topology().nodes().len(),
        result.topology().ways().len(),
        result.topology().relations().len()
    );
    Ok(result)
}

fn process_feature(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    feature: &Feature,
) -> Result<(), Error> {
    match feature.geometry {
        Some(ref geometry) => process_geometry(topology, transform, Some(feature), geometry),
        None => {
            debug!("Skipping feature without geometry");
            Ok(())
        }
    }
}

/// `feature` is the nearest enclosing feature; its tags go to the
/// primitives this geometry produces directly.
fn process_geometry(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    feature: Option<&Feature>,
    geometry: &Geometry,
) -> Result<(), Error> {
    match *geometry {
        Geometry::Point(ref pos) => {
            create_node(topology, transform, pos, feature_tags(feature))?;
        }
        Geometry::MultiPoint(ref positions) => {
            for pos in positions {
                create_node(topology, transform, pos, feature_tags(feature))?;
            }
        }
        Geometry::LineString(ref coords) => {
            process_line_string(topology, transform, feature, coords)?;
        }
        Geometry::MultiLineString(ref lines) => {
            for coords in lines {
                process_line_string(topology, transform, feature, coords)?;
            }
        }
        Geometry::Polygon(ref rings) => process_polygon(topology, transform, feature, rings)?,
        Geometry::MultiPolygon(ref polygons) => {
            for rings in polygons {
                process_polygon(topology, transform, feature, rings)?;
            }
        }
        Geometry::GeometryCollection(ref geometries) => {
            for member in geometries {
                process_geometry(topology, transform, feature, member)?;
            }
        }
        Geometry::Feature(ref nested) => process_feature(topology, transform, nested)?,
        Geometry::Unknown(..) => warn!("Unknown json object found: {}", geometry.type_name()),
    }
    Ok(())
}

fn process_line_string(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    feature: Option<&Feature>,
    coords: &[Position],
) -> Result<(), Error> {
    if coords.is_empty() {
        debug!("Skipping empty LineString");
        return Ok(());
    }
    create_way(topology, transform, coords, feature_tags(feature))?;
    Ok(())
}

/// A polygon with a single ring becomes a way, one with holes becomes a
/// multipolygon relation. Any empty ring drops the whole polygon.
fn process_polygon(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    feature: Option<&Feature>,
    rings: &[Vec<Position>],
) -> Result<(), Error> {
    if rings.is_empty() || rings.iter().any(Vec::is_empty) {
        debug!("Skipping Polygon with no rings or an empty ring");
        return Ok(());
    }
    if rings.len() == 1 {
        create_way(topology, transform, &rings[0], feature_tags(feature))?;
        return Ok(());
    }

    let mut members = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        let role = if i == 0 { "outer" } else { "inner" };
        let way = create_way(topology, transform, ring, Tags::new())?;
        members.push((role.to_string(), Member::Way(way)));
    }
    let mut tags = feature_tags(feature);
    tags.insert("type".to_string(), "multipolygon".to_string());
    topology.add_relation(members, tags);
    Ok(())
}

fn feature_tags(feature: Option<&Feature>) -> Tags {
    feature
        .map(|f| tags_from_properties(f.properties.as_ref()))
        .unwrap_or_default()
}

fn create_node(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    pos: &Position,
    tags: Tags,
) -> Result<NodeId, Error> {
    let coord = transform_position(transform, pos)?;
    Ok(topology.add_node(coord, tags))
}

/// `coords` must not be empty.
fn create_way(
    topology: &mut Topology,
    transform: &dyn CoordinateTransform,
    coords: &[Position],
    tags: Tags,
) -> Result<WayId, Error> {
    let mut nodes = Vec::with_capacity(coords.len());
    for pos in coords {
        nodes.push(create_node(topology, transform, pos, Tags::new())?);
    }
    Ok(topology.add_way(nodes, tags))
}

fn transform_position(transform: &dyn CoordinateTransform, pos: &Position) -> Result<LatLon, Error> {
    let (x, y) = match pos.as_slice() {
        [x, y, ..] => (*x, *y),
        _ => return Err(Error::PositionExpectedTwoValues),
    };
    let (lon, lat) = transform.transform(x, y)?;
    if !lon.is_finite() || !lat.is_finite() {
        return Err(Error::TransformFailed {
            x,
            y,
            reason: format!("non-finite result ({}, {})", lon, lat),
        });
    }
    Ok(LatLon::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuilderConfig, Crs, CrsDefinition, ErrorKind, LinkedCrs};

    fn decode(json_string: &str) -> Document {
        json_string.parse().unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn counts(result: &BoundedTopology) -> (usize, usize, usize) {
        let topo = result.topology();
        (topo.nodes().len(), topo.ways().len(), topo.relations().len())
    }

    fn offset(x: f64, y: f64) -> Result<(f64, f64), Error> {
        Ok((x + 100., y + 10.))
    }

    struct StubFetcher(&'static str);

    impl LinkFetcher for StubFetcher {
        fn fetch(&self, _href: &str, _max_bytes: u64) -> Result<LinkedCrs, Error> {
            Ok(LinkedCrs {
                content_type: None,
                text: self.0.to_string(),
            })
        }
    }

    #[test]
    fn bare_point_swaps_to_lat_lon() {
        let result = build(&decode(r#"{"type":"Point","coordinates":[3.5,-7.25]}"#)).unwrap();
        assert_eq!(counts(&result), (1, 0, 0));
        let node = &result.topology().nodes()[0];
        assert_eq!(node.coord(), LatLon::new(-7.25, 3.5));
        assert!(node.tags().is_empty());
        assert_eq!(
            result.bounds(),
            Some(crate::Bounds::from_point(LatLon::new(-7.25, 3.5)))
        );
    }

    #[test]
    fn tagged_line_string() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"name":"a"},
                "geometry":{"type":"LineString","coordinates":[[0,0],[1,1],[2,2]]}}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (3, 1, 0));
        let topo = result.topology();
        let way = &topo.ways()[0];
        assert_eq!(way.tags(), &tags(&[("name", "a")]));
        let coords: Vec<LatLon> = topo.way_coords(way);
        assert_eq!(
            coords,
            vec![LatLon::new(0., 0.), LatLon::new(1., 1.), LatLon::new(2., 2.)]
        );
        assert!(topo.nodes().iter().all(|n| n.tags().is_empty()));
    }

    #[test]
    fn polygon_with_hole_becomes_multipolygon() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"landuse":"forest"},
                "geometry":{"type":"Polygon","coordinates":[
                    [[0,0],[10,0],[10,10],[0,10],[0,0]],
                    [[2,2],[3,2],[3,3],[2,2]]
                ]}}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (9, 2, 1));
        let topo = result.topology();
        let relation = &topo.relations()[0];
        assert_eq!(
            relation.members(),
            &[
                ("outer".to_string(), Member::Way(WayId(1))),
                ("inner".to_string(), Member::Way(WayId(2))),
            ]
        );
        assert_eq!(
            relation.tags(),
            &tags(&[("landuse", "forest"), ("type", "multipolygon")])
        );
        assert!(topo.ways().iter().all(|w| w.tags().is_empty()));
        assert!(topo.is_closed(&topo.ways()[0]));
    }

    #[test]
    fn single_ring_polygon_is_a_tagged_way() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"building":"yes"},
                "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (4, 1, 0));
        assert_eq!(
            result.topology().ways()[0].tags(),
            &tags(&[("building", "yes")])
        );
    }

    #[test]
    fn degenerate_polygons_are_dropped() {
        for coordinates in &["[]", "[[]]", "[[[0,0],[1,0],[1,1],[0,0]], []]"] {
            let result = build(&decode(&format!(
                r#"{{"type":"Polygon","coordinates":{}}}"#,
                coordinates
            )))
            .unwrap();
            assert_eq!(counts(&result), (0, 0, 0));
            assert_eq!(result.bounds(), None);
        }
    }

    #[test]
    fn degenerate_polygon_leaves_bounds_unchanged() {
        let result = build(&decode(
            r#"{"type":"GeometryCollection","geometries":[
                {"type":"Point","coordinates":[1,2]},
                {"type":"Polygon","coordinates":[[[50,50],[60,60],[50,50]],[]]},
                {"type":"LineString","coordinates":[]}
            ]}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (1, 0, 0));
        assert_eq!(
            result.bounds(),
            Some(crate::Bounds::from_point(LatLon::new(2., 1.)))
        );
    }

    #[test]
    fn multi_geometries_share_feature_tags() {
        let result = build(&decode(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"k":"p"},
                 "geometry":{"type":"MultiPoint","coordinates":[[0,0],[1,1]]}},
                {"type":"Feature","properties":{"k":"l"},
                 "geometry":{"type":"MultiLineString","coordinates":[[[0,0],[1,1]],[],[[2,2],[3,3]]]}}
            ]}"#,
        ))
        .unwrap();
        let topo = result.topology();
        assert_eq!(counts(&result), (6, 2, 0));
        assert_eq!(topo.nodes()[0].tags(), &tags(&[("k", "p")]));
        assert_eq!(topo.nodes()[1].tags(), &tags(&[("k", "p")]));
        assert!(topo.ways().iter().all(|w| w.tags() == &tags(&[("k", "l")])));
    }

    #[test]
    fn multipolygon_makes_one_relation_per_polygon() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"name":"islands"},
                "geometry":{"type":"MultiPolygon","coordinates":[
                    [[[0,0],[4,0],[4,4],[0,0]],[[1,1],[2,1],[1,2],[1,1]]],
                    [[[10,10],[14,10],[14,14],[10,10]]],
                    [[[20,20],[24,20],[24,24],[20,20]],[[21,21],[22,21],[21,22],[21,21]]]
                ]}}"#,
        ))
        .unwrap();
        let topo = result.topology();
        assert_eq!(counts(&result), (20, 5, 2));
        for relation in topo.relations() {
            assert_eq!(relation.members().len(), 2);
            assert_eq!(relation.tags()["name"], "islands");
            assert!(relation.is_multipolygon());
        }
        // The single-ring polygon carries the tags itself
        let tagged: Vec<&crate::Way> = topo.ways().iter().filter(|w| !w.tags().is_empty()).collect();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].id(), WayId(3));
    }

    #[test]
    fn geometry_collection_inside_feature() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"a":1},
                "geometry":{"type":"GeometryCollection","geometries":[
                    {"type":"Point","coordinates":[0,0]},
                    {"type":"GeometryCollection","geometries":[
                        {"type":"LineString","coordinates":[[0,0],[1,1]]}
                    ]}
                ]}}"#,
        ))
        .unwrap();
        let topo = result.topology();
        assert_eq!(counts(&result), (3, 1, 0));
        assert_eq!(topo.nodes()[0].tags(), &tags(&[("a", "1")]));
        assert_eq!(topo.ways()[0].tags(), &tags(&[("a", "1")]));
    }

    #[test]
    fn bare_geometry_collection_has_no_tags() {
        let result = build(&decode(
            r#"{"type":"GeometryCollection","geometries":[
                {"type":"Point","coordinates":[0,0]},
                {"type":"LineString","coordinates":[[0,0],[1,1]]}
            ]}"#,
        ))
        .unwrap();
        assert!(result.topology().primitives().all(|p| p.tags().is_empty()));
    }

    #[test]
    fn nested_feature_uses_its_own_tags() {
        let result = build(&decode(
            r#"{"type":"Feature","properties":{"outer":"x"},
                "geometry":{"type":"GeometryCollection","geometries":[
                    {"type":"Point","coordinates":[0,0]},
                    {"type":"Feature","properties":{"inner":"y"},
                     "geometry":{"type":"Point","coordinates":[1,1]}}
                ]}}"#,
        ))
        .unwrap();
        let topo = result.topology();
        assert_eq!(topo.nodes()[0].tags(), &tags(&[("outer", "x")]));
        assert_eq!(topo.nodes()[1].tags(), &tags(&[("inner", "y")]));
    }

    #[test]
    fn unknown_geometry_is_skipped() {
        let result = build(&decode(
            r#"{"type":"GeometryCollection","geometries":[
                {"type":"Circle","center":[0,0],"radius":1},
                {"type":"Point","coordinates":[5,6]}
            ]}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (1, 0, 0));
    }

    #[test]
    fn feature_without_properties_gets_empty_tags() {
        let result = build(&decode(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":null,"geometry":{"type":"Point","coordinates":[0,0]}},
                {"type":"Feature","properties":{},"geometry":null}
            ]}"#,
        ))
        .unwrap();
        assert_eq!(counts(&result), (1, 0, 0));
        assert!(result.topology().nodes()[0].tags().is_empty());
    }

    #[test]
    fn short_position_is_an_error() {
        let doc = Document::new(GeoJson::Geometry(Geometry::Point(vec![1.0])));
        assert_eq!(build(&doc), Err(Error::PositionExpectedTwoValues));

        let parsed = geojson::GeoJson::Geometry(geojson::Geometry::new(geojson::Value::LineString(
            vec![vec![2.0, 3.0], vec![1.0]],
        )));
        let doc = Document::try_from(parsed).unwrap();
        assert_eq!(build(&doc), Err(Error::PositionExpectedTwoValues));
    }

    #[test]
    fn empty_document_has_no_primitives() {
        let result = build(&decode(r#"{"type":"FeatureCollection","features":[]}"#)).unwrap();
        assert!(result.topology().is_empty());
        assert_eq!(result.bounds(), None);
    }

    #[test]
    fn coincident_points_are_not_merged() {
        let result = build(&decode(
            r#"{"type":"MultiPoint","coordinates":[[1,1],[1,1]]}"#,
        ))
        .unwrap();
        let nodes = result.topology().nodes();
        assert_eq!(nodes.len(), 2);
        assert_ne!(nodes[0].id(), nodes[1].id());
        assert_eq!(nodes[0].coord(), nodes[1].coord());
    }

    #[test]
    fn building_twice_gives_equal_results() {
        let doc = decode(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"a","n":2},
                 "geometry":{"type":"Polygon","coordinates":[[[0,0],[4,0],[4,4],[0,0]],[[1,1],[2,1],[1,2],[1,1]]]}},
                {"type":"Feature","properties":{"name":"b"},
                 "geometry":{"type":"Point","coordinates":[9,9]}}
            ]}"#,
        );
        let builder = Builder::new();
        assert_eq!(builder.build(&doc), builder.build(&doc));
    }

    #[test]
    fn explicit_transform_is_applied_everywhere() {
        let doc = decode(
            r#"{"type":"GeometryCollection","geometries":[
                {"type":"Point","coordinates":[1,2]},
                {"type":"GeometryCollection","geometries":[
                    {"type":"LineString","coordinates":[[3,4],[5,6]]}
                ]}
            ]}"#,
        );
        let result = build_with_transform(&doc, &offset).unwrap();
        let coords: Vec<LatLon> = result.topology().nodes().iter().map(|n| n.coord()).collect();
        assert_eq!(
            coords,
            vec![
                LatLon::new(12., 101.),
                LatLon::new(14., 103.),
                LatLon::new(16., 105.),
            ]
        );
        assert_eq!(
            result.bounds().unwrap().to_bbox(),
            vec![101., 12., 105., 16.]
        );
    }

    #[test]
    fn unresolvable_named_crs_fails() {
        let doc = decode(
            r#"{"type":"FeatureCollection",
                "crs":{"type":"name","properties":{"name":"urn:ogc:def:crs:EPSG::2154"}},
                "features":[
                    {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[0,0]}},
                    {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}
                ]}"#,
        );
        let result = build(&doc);
        assert_eq!(
            result,
            Err(Error::UnknownCrs("urn:ogc:def:crs:EPSG::2154".to_string()))
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn wgs84_crs_is_identity() {
        let doc = decode(
            r#"{"type":"Point","coordinates":[1,2],
                "crs":{"type":"name","properties":{"name":"urn:ogc:def:crs:OGC:1.3:CRS84"}}}"#,
        );
        let result = build(&doc).unwrap();
        assert_eq!(result.topology().nodes()[0].coord(), LatLon::new(2., 1.));
    }

    #[test]
    fn unsupported_crs_type_fails() {
        let doc = decode(
            r#"{"type":"Point","coordinates":[1,2],"crs":{"type":"EPSG","properties":{"code":4326}}}"#,
        );
        assert_eq!(
            build(&doc),
            Err(Error::UnsupportedCrsType("EPSG".to_string()))
        );
    }

    #[test]
    fn custom_resolver() {
        let doc = decode(
            r#"{"type":"Point","coordinates":[1,2],
                "crs":{"type":"name","properties":{"name":"local:offset"}}}"#,
        );
        let builder = Builder::new().with_resolver(|def: &CrsDefinition| match def {
            CrsDefinition::Name(name) if name == "local:offset" => Ok(Box::new(offset) as BoxedTransform),
            other => Err(Error::UnknownCrs(other.to_string())),
        });
        let result = builder.build(&doc).unwrap();
        assert_eq!(result.topology().nodes()[0].coord(), LatLon::new(12., 101.));
    }

    #[test]
    fn linked_crs_goes_through_fetcher() {
        let doc = decode(
            r#"{"type":"Point","coordinates":[1,2],
                "crs":{"type":"link","properties":{"href":"http://example.com/crs","type":"proj4"}}}"#,
        );
        let ok = Builder::new().with_fetcher(StubFetcher("+proj=longlat +datum=WGS84 +no_defs"));
        assert_eq!(
            ok.build(&doc).unwrap().topology().nodes()[0].coord(),
            LatLon::new(2., 1.)
        );

        let merc = Builder::new().with_fetcher(StubFetcher("+proj=merc +datum=WGS84"));
        assert_eq!(
            merc.build(&doc),
            Err(Error::UnknownCrs("+proj=merc +datum=WGS84".to_string()))
        );

        let config = BuilderConfig {
            max_link_bytes: 8,
            ..BuilderConfig::default()
        };
        let small = Builder::new()
            .with_config(config)
            .with_fetcher(StubFetcher("+proj=longlat +datum=WGS84 +no_defs"));
        assert_eq!(
            small.build(&doc),
            Err(Error::CrsLinkTooLarge {
                href: "http://example.com/crs".to_string(),
                limit: 8
            })
        );
    }

    #[test]
    fn crs_can_be_ignored() {
        let doc = decode(
            r#"{"type":"Point","coordinates":[1,2],
                "crs":{"type":"name","properties":{"name":"EPSG:2154"}}}"#,
        );
        let config = BuilderConfig {
            honor_crs: false,
            ..BuilderConfig::default()
        };
        let result = Builder::new().with_config(config).build(&doc).unwrap();
        assert_eq!(result.topology().nodes()[0].coord(), LatLon::new(2., 1.));
    }

    #[test]
    fn transform_failure_aborts_the_build() {
        let doc = decode(
            r#"{"type":"MultiPoint","coordinates":[[1,2],[-1,2]]}"#,
        );
        let only_positive = |x: f64, y: f64| -> Result<(f64, f64), Error> {
            if x < 0. {
                Err(Error::TransformFailed {
                    x,
                    y,
                    reason: "outside of projection domain".to_string(),
                })
            } else {
                Ok((x, y))
            }
        };
        match build_with_transform(&doc, &only_positive) {
            Err(Error::TransformFailed { x, .. }) => assert_eq!(x, -1.),
            other => panic!("unexpected {:?}", other),
        }

        let nan = |_: f64, _: f64| -> Result<(f64, f64), Error> { Ok((f64::NAN, 0.)) };
        assert_eq!(
            build_with_transform(&doc, &nan).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidInput)
        );
    }

    #[test]
    fn documents_declared_crs_shape() {
        let doc = Document::new(GeoJson::Geometry(Geometry::Point(vec![0., 0.])))
            .with_crs(Crs::Name("EPSG:4326".to_string()));
        assert!(build(&doc).is_ok());
    }

    #[test]
    fn builds_from_several_threads() {
        let builder = Builder::new();
        let docs: Vec<Document> = (0..4)
            .map(|i| decode(&format!(r#"{{"type":"Point","coordinates":[{},0]}}"#, i)))
            .collect();
        std::thread::scope(|s| {
            let handles: Vec<_> = docs
                .iter()
                .map(|doc| s.spawn(|| builder.build(doc)))
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let result = handle.join().unwrap().unwrap();
                assert_eq!(result.topology().nodes()[0].coord().lon(), i as f64);
            }
        });
    }
}
