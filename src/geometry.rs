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

use crate::json::JsonObject;
use crate::{util, Error, Feature, Position};

/// Geometry Objects
///
/// [GeoJSON Format Specification § 3.1](https://tools.ietf.org/html/rfc7946#section-3.1)
///
/// Besides the seven geometry types, two lenient variants are accepted so
/// that real-world documents can be read without failing: a `Feature` found
/// where a geometry is expected, and geometries of an unrecognised type.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Point
    ///
    /// [GeoJSON Format Specification § 3.1.2](https://tools.ietf.org/html/rfc7946#section-3.1.2)
    Point(Position),

    /// MultiPoint
    ///
    /// [GeoJSON Format Specification § 3.1.3](https://tools.ietf.org/html/rfc7946#section-3.1.3)
    MultiPoint(Vec<Position>),

    /// LineString
    ///
    /// [GeoJSON Format Specification § 3.1.4](https://tools.ietf.org/html/rfc7946#section-3.1.4)
    LineString(Vec<Position>),

    /// MultiLineString
    ///
    /// [GeoJSON Format Specification § 3.1.5](https://tools.ietf.org/html/rfc7946#section-3.1.5)
    MultiLineString(Vec<Vec<Position>>),

    /// Polygon, as a list of rings: the exterior ring first, then the holes.
    ///
    /// [GeoJSON Format Specification § 3.1.6](https://tools.ietf.org/html/rfc7946#section-3.1.6)
    Polygon(Vec<Vec<Position>>),

    /// MultiPolygon
    ///
    /// [GeoJSON Format Specification § 3.1.7](https://tools.ietf.org/html/rfc7946#section-3.1.7)
    MultiPolygon(Vec<Vec<Vec<Position>>>),

    /// GeometryCollection
    ///
    /// [GeoJSON Format Specification § 3.1.8](https://tools.ietf.org/html/rfc7946#section-3.1.8)
    GeometryCollection(Vec<Geometry>),

    /// A Feature nested where a geometry was expected.
    Feature(Box<Feature>),

    /// A geometry whose `type` is not known, with that type name.
    Unknown(String),
}

impl Geometry {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let type_ = util::expect_type(&mut object)?;
        let value = match type_.as_str() {
            "Point" => Geometry::Point(util::get_coords_one_pos(&mut object)?),
            "MultiPoint" => Geometry::MultiPoint(util::get_coords_1d_pos(&mut object)?),
            "LineString" => Geometry::LineString(util::get_coords_1d_pos(&mut object)?),
            "MultiLineString" => Geometry::MultiLineString(util::get_coords_2d_pos(&mut object)?),
            "Polygon" => Geometry::Polygon(util::get_coords_2d_pos(&mut object)?),
            "MultiPolygon" => Geometry::MultiPolygon(util::get_coords_3d_pos(&mut object)?),
            "GeometryCollection" => {
                let members = util::get_geometries(&mut object)?;
                let mut geometries = Vec::with_capacity(members.len());
                for member in members {
                    geometries.push(Geometry::from_json_object(member)?);
                }
                Geometry::GeometryCollection(geometries)
            }
            "Feature" => Geometry::Feature(Box::new(Feature::from_members(object)?)),
            _ => Geometry::Unknown(type_),
        };
        Ok(value)
    }

    /// The GeoJSON `type` of this geometry.
    pub fn type_name(&self) -> &str {
        match *self {
            Geometry::Point(..) => "Point",
            Geometry::MultiPoint(..) => "MultiPoint",
            Geometry::LineString(..) => "LineString",
            Geometry::MultiLineString(..) => "MultiLineString",
            Geometry::Polygon(..) => "Polygon",
            Geometry::MultiPolygon(..) => "MultiPolygon",
            Geometry::GeometryCollection(..) => "GeometryCollection",
            Geometry::Feature(..) => "Feature",
            Geometry::Unknown(ref name) => name,
        }
    }
}

impl From<geojson::Geometry> for Geometry {
    fn from(geometry: geojson::Geometry) -> Self {
        geometry.value.into()
    }
}

impl From<geojson::Value> for Geometry {
    fn from(value: geojson::Value) -> Self {
        use geojson::Value;

        match value {
            Value::Point(pos) => Geometry::Point(pos),
            Value::MultiPoint(positions) => Geometry::MultiPoint(positions),
            Value::LineString(positions) => Geometry::LineString(positions),
            Value::MultiLineString(lines) => Geometry::MultiLineString(lines),
            Value::Polygon(rings) => Geometry::Polygon(rings),
            Value::MultiPolygon(polygons) => Geometry::MultiPolygon(polygons),
            Value::GeometryCollection(geometries) => {
                Geometry::GeometryCollection(geometries.into_iter().map(Geometry::from).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::json::{JsonObject, JsonValue};
    use crate::{Error, Geometry};

    fn decode(json_string: &str) -> Result<Geometry, Error> {
        let value: JsonValue = serde_json::from_str(json_string).unwrap();
        let object: JsonObject = match value {
            JsonValue::Object(o) => o,
            _ => unreachable!(),
        };
        Geometry::from_json_object(object)
    }

    #[test]
    fn decode_invalid_linestring() {
        let geojson_str = "{\"points\":[[0,0],[1,1]],\"type\":\"LineString\"}";

        // Decode should fail due to the absence of the 'coordinates' member:
        let result = decode(geojson_str);
        assert!(result.is_err());
        match result {
            Err(e) => assert_eq!(e, Error::ExpectedProperty(String::from("coordinates"))),
            _ => panic!(),
        }
    }

    #[test]
    fn decode_point() {
        let geometry = decode("{\"coordinates\":[1.1,2.1],\"type\":\"Point\"}").unwrap();
        assert_eq!(geometry, Geometry::Point(vec![1.1, 2.1]));
    }

    #[test]
    fn decode_polygon_with_hole() {
        let geometry = decode(
            "{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[4,0],[4,4],[0,0]],[[1,1],[2,1],[1,2],[1,1]]]}",
        )
        .unwrap();
        match geometry {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[1][0], vec![1.0, 1.0]);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn decode_unknown_type() {
        let geometry = decode("{\"type\":\"Circle\",\"radius\":3}").unwrap();
        assert_eq!(geometry, Geometry::Unknown("Circle".to_string()));
        assert_eq!(geometry.type_name(), "Circle");
    }

    #[test]
    fn decode_geometry_collection_with_nested_feature() {
        let geometry = decode(
            "{\"type\":\"GeometryCollection\",\"geometries\":[\
                {\"type\":\"Point\",\"coordinates\":[100.0,0.0]},\
                {\"type\":\"Feature\",\"properties\":{\"prop1\":1},\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,2]}}\
            ]}",
        )
        .unwrap();
        let members = match geometry {
            Geometry::GeometryCollection(members) => members,
            _ => panic!(),
        };
        assert_eq!(members[0], Geometry::Point(vec![100.0, 0.0]));
        match &members[1] {
            Geometry::Feature(feature) => {
                assert_eq!(feature.geometry, Some(Geometry::Point(vec![1.0, 2.0])));
                assert_eq!(feature.properties.as_ref().unwrap()["prop1"], 1);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn convert_from_geojson_crate() {
        let value = geojson::Value::GeometryCollection(vec![geojson::Geometry::new(
            geojson::Value::LineString(vec![vec![0., 0.], vec![1., 1.]]),
        )]);
        assert_eq!(
            Geometry::from(value),
            Geometry::GeometryCollection(vec![Geometry::LineString(vec![
                vec![0., 0.],
                vec![1., 1.]
            ])])
        );
    }
}
