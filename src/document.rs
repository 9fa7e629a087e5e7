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

use std::io::Read;
use std::str::FromStr;

use crate::json::{self, Deserialize, Deserializer, JsonObject, JsonValue};
use crate::{util, Crs, Error, Geometry};

/// GeoJSON Objects (FeatureCollection, Feature or a bare Geometry)
///
/// [GeoJSON Format Specification § 3](https://tools.ietf.org/html/rfc7946#section-3)
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
    /// [GeoJSON Format Specification § 3.3](https://tools.ietf.org/html/rfc7946#section-3.3)
    FeatureCollection(Vec<Feature>),
    /// [GeoJSON Format Specification § 3.2](https://tools.ietf.org/html/rfc7946#section-3.2)
    Feature(Feature),
    /// [GeoJSON Format Specification § 3.1](https://tools.ietf.org/html/rfc7946#section-3.1)
    Geometry(Geometry),
}

/// Feature Objects
///
/// [GeoJSON Format Specification § 3.2](https://tools.ietf.org/html/rfc7946#section-3.2)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    pub id: Option<JsonValue>,
    pub geometry: Option<Geometry>,
    pub properties: Option<JsonObject>,
}

impl Feature {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        match util::expect_type(&mut object)?.as_str() {
            "Feature" => Feature::from_members(object),
            other => Err(Error::ExpectedType {
                expected: "Feature".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    /// Decode a feature whose `type` member has already been consumed.
    pub(crate) fn from_members(mut object: JsonObject) -> Result<Self, Error> {
        let geometry = match util::get_geometry(&mut object)? {
            Some(g) => Some(Geometry::from_json_object(g)?),
            None => None,
        };
        Ok(Feature {
            id: util::get_id(&mut object)?,
            geometry,
            properties: util::get_properties(&mut object)?,
        })
    }
}

/// A parsed GeoJSON document: the root object plus the coordinate reference
/// system it declares, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: GeoJson,
    pub crs: Option<Crs>,
}

impl Document {
    pub fn new(root: GeoJson) -> Self {
        Document { root, crs: None }
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let crs = util::get_crs(&mut object)?;
        let type_ = util::expect_type(&mut object)?;
        let root = match type_.as_str() {
            "FeatureCollection" => {
                let members = util::get_features(&mut object)?;
                let mut features = Vec::with_capacity(members.len());
                for member in members {
                    features.push(Feature::from_json_object(member)?);
                }
                GeoJson::FeatureCollection(features)
            }
            "Feature" => GeoJson::Feature(Feature::from_members(object)?),
            _ => {
                // Put the type back so the geometry decoder sees the whole object
                object.insert("type".to_string(), JsonValue::String(type_));
                GeoJson::Geometry(Geometry::from_json_object(object)?)
            }
        };
        Ok(Document { root, crs })
    }

    pub fn from_json_value(value: JsonValue) -> Result<Self, Error> {
        match value {
            JsonValue::Object(object) => Document::from_json_object(object),
            _ => Err(Error::GeoJsonExpectedObject),
        }
    }

    /// Read and decode a whole document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let value: JsonValue = serde_json::from_reader(reader)?;
        Document::from_json_value(value)
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: JsonValue = serde_json::from_str(s)?;
        Document::from_json_value(value)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let val = json::JsonObject::deserialize(deserializer)?;

        Document::from_json_object(val).map_err(D::Error::custom)
    }
}

impl From<geojson::Feature> for Feature {
    fn from(feature: geojson::Feature) -> Self {
        Feature {
            id: feature.id.map(|id| match id {
                geojson::feature::Id::String(s) => JsonValue::String(s),
                geojson::feature::Id::Number(n) => JsonValue::Number(n),
            }),
            geometry: feature.geometry.map(Geometry::from),
            properties: feature.properties,
        }
    }
}

/// Convert a document parsed by the `geojson` crate. Its `crs` foreign
/// member, if any, is decoded as well.
impl TryFrom<geojson::GeoJson> for Document {
    type Error = Error;

    fn try_from(geojson: geojson::GeoJson) -> Result<Self, Self::Error> {
        let (root, foreign_members) = match geojson {
            geojson::GeoJson::FeatureCollection(fc) => (
                GeoJson::FeatureCollection(fc.features.into_iter().map(Feature::from).collect()),
                fc.foreign_members,
            ),
            geojson::GeoJson::Feature(mut f) => {
                let foreign_members = f.foreign_members.take();
                (GeoJson::Feature(f.into()), foreign_members)
            }
            geojson::GeoJson::Geometry(g) => {
                let foreign_members = g.foreign_members.clone();
                (GeoJson::Geometry(g.into()), foreign_members)
            }
        };
        let crs = match foreign_members {
            Some(mut members) => util::get_crs(&mut members)?,
            None => None,
        };
        Ok(Document { root, crs })
    }
}
