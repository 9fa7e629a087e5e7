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

use log::warn;

use crate::json::{JsonObject, JsonValue};
use crate::{Crs, Error, Position};

pub fn expect_type(value: &mut JsonObject) -> Result<String, Error> {
    let prop = expect_property(value, "type")?;
    expect_string(prop)
}

fn expect_string(value: JsonValue) -> Result<String, Error> {
    match value {
        JsonValue::String(s) => Ok(s),
        _ => Err(Error::ExpectedStringValue),
    }
}

pub fn expect_f64(value: &JsonValue) -> Result<f64, Error> {
    match value.as_f64() {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedF64Value),
    }
}

pub fn expect_array(value: &JsonValue) -> Result<&Vec<JsonValue>, Error> {
    match value.as_array() {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedArrayValue),
    }
}

fn expect_property(obj: &mut JsonObject, name: &'static str) -> Result<JsonValue, Error> {
    match obj.remove(name) {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedProperty(name.to_string())),
    }
}

fn get_coords_value(object: &mut JsonObject) -> Result<JsonValue, Error> {
    expect_property(object, "coordinates")
}

/// Retrieve a single Position from the value of the "coordinates" key.
///
/// Used by Geometry::Point
pub fn get_coords_one_pos(object: &mut JsonObject) -> Result<Position, Error> {
    let coords_json = get_coords_value(object)?;
    json_to_position(&coords_json)
}

/// Retrieve a one dimensional Vec of Positions from the value of the "coordinates" key.
///
/// Used by Geometry::MultiPoint and Geometry::LineString
pub fn get_coords_1d_pos(object: &mut JsonObject) -> Result<Vec<Position>, Error> {
    let coords_json = get_coords_value(object)?;
    json_to_1d_positions(&coords_json)
}

/// Retrieve a two dimensional Vec of Positions from the value of the "coordinates" key.
///
/// Used by Geometry::MultiLineString and Geometry::Polygon
pub fn get_coords_2d_pos(object: &mut JsonObject) -> Result<Vec<Vec<Position>>, Error> {
    let coords_json = get_coords_value(object)?;
    json_to_2d_positions(&coords_json)
}

/// Retrieve a three dimensional Vec of Positions from the value of the "coordinates" key.
///
/// Used by Geometry::MultiPolygon
pub fn get_coords_3d_pos(object: &mut JsonObject) -> Result<Vec<Vec<Vec<Position>>>, Error> {
    let coords_json = get_coords_value(object)?;
    json_to_3d_positions(&coords_json)
}

/// Retrieve the members of the 'geometries' member of a GeometryCollection,
/// still as raw objects.
pub fn get_geometries(object: &mut JsonObject) -> Result<Vec<JsonObject>, Error> {
    let geometries_json = expect_property(object, "geometries")?;
    expect_owned_array(geometries_json)?
        .into_iter()
        .map(expect_owned_object)
        .collect()
}

/// Retrieve the members of the 'features' member of a FeatureCollection,
/// still as raw objects. Members that are not objects are skipped.
pub fn get_features(object: &mut JsonObject) -> Result<Vec<JsonObject>, Error> {
    let features_json = expect_property(object, "features")?;
    Ok(expect_owned_array(features_json)?
        .into_iter()
        .filter_map(|feature| match feature {
            JsonValue::Object(o) => Some(o),
            other => {
                warn!("Skipping non-object member of 'features': {}", other);
                None
            }
        })
        .collect())
}

/// Retrieve the 'geometry' member of a Feature. `null` (or a missing member)
/// means no geometry.
pub fn get_geometry(object: &mut JsonObject) -> Result<Option<JsonObject>, Error> {
    match object.remove("geometry") {
        Some(JsonValue::Null) | None => Ok(None),
        Some(other) => expect_owned_object(other).map(Some),
    }
}

/// Used by Feature
pub fn get_id(object: &mut JsonObject) -> Result<Option<JsonValue>, Error> {
    Ok(object.remove("id"))
}

/// Retrieve the 'properties' member of a Feature if any.
///
/// Used by Feature
pub fn get_properties(object: &mut JsonObject) -> Result<Option<JsonObject>, Error> {
    match object.remove("properties") {
        // If there is any 'properties' member, it must be an Object:
        Some(JsonValue::Object(properties)) => Ok(Some(properties)),
        // Null is handled as if there is no 'properties' member:
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(Error::PropertiesExpectedObjectOrNull),
    }
}

/// Retrieve the non-standard 'crs' member of the root object if any.
///
/// Only the shape is checked here; whether the declared system can be used
/// is decided when the topology is built.
pub fn get_crs(object: &mut JsonObject) -> Result<Option<Crs>, Error> {
    match object.remove("crs") {
        Some(JsonValue::Object(crs)) => Crs::from_json_object(crs).map(Some),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(Error::CrsExpectedObjectOrNull),
    }
}

/// Retrieve a string member of an object, `None` when absent or `null`.
pub fn get_optional_string(object: &mut JsonObject, name: &'static str) -> Result<Option<String>, Error> {
    match object.remove(name) {
        Some(JsonValue::Null) | None => Ok(None),
        Some(v) => expect_string(v).map(Some),
    }
}

/// Retrieve a mandatory string member of an object.
pub fn get_string(object: &mut JsonObject, name: &'static str) -> Result<String, Error> {
    expect_string(expect_property(object, name)?)
}

/// Retrieve a mandatory object member of an object.
pub fn get_object(object: &mut JsonObject, name: &'static str) -> Result<JsonObject, Error> {
    expect_owned_object(expect_property(object, name)?)
}

fn json_to_position(json: &JsonValue) -> Result<Position, Error> {
    let coords_array = expect_array(json)?;
    if coords_array.len() < 2 {
        return Err(Error::PositionExpectedTwoValues);
    }
    let mut coords = Vec::with_capacity(coords_array.len());
    for position in coords_array {
        coords.push(expect_f64(position)?);
    }
    Ok(coords)
}

fn json_to_1d_positions(json: &JsonValue) -> Result<Vec<Position>, Error> {
    let coords_array = expect_array(json)?;
    let mut coords = Vec::with_capacity(coords_array.len());
    for item in coords_array {
        coords.push(json_to_position(item)?);
    }
    Ok(coords)
}

fn json_to_2d_positions(json: &JsonValue) -> Result<Vec<Vec<Position>>, Error> {
    let coords_array = expect_array(json)?;
    let mut coords = Vec::with_capacity(coords_array.len());
    for item in coords_array {
        coords.push(json_to_1d_positions(item)?);
    }
    Ok(coords)
}

fn json_to_3d_positions(json: &JsonValue) -> Result<Vec<Vec<Vec<Position>>>, Error> {
    let coords_array = expect_array(json)?;
    let mut coords = Vec::with_capacity(coords_array.len());
    for item in coords_array {
        coords.push(json_to_2d_positions(item)?);
    }
    Ok(coords)
}

fn expect_owned_array(value: JsonValue) -> Result<Vec<JsonValue>, Error> {
    match value {
        JsonValue::Array(v) => Ok(v),
        _ => Err(Error::ExpectedArrayValue),
    }
}

pub fn expect_owned_object(value: JsonValue) -> Result<JsonObject, Error> {
    match value {
        JsonValue::Object(o) => Ok(o),
        _ => Err(Error::ExpectedObjectValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> JsonObject {
        expect_owned_object(value).unwrap()
    }

    #[test]
    fn position_needs_two_numbers() {
        let mut obj = object(json!({"coordinates": [1.0]}));
        assert_eq!(
            get_coords_one_pos(&mut obj),
            Err(Error::PositionExpectedTwoValues)
        );

        let mut obj = object(json!({"coordinates": [1.0, "a"]}));
        assert_eq!(get_coords_one_pos(&mut obj), Err(Error::ExpectedF64Value));
    }

    #[test]
    fn elevation_is_kept() {
        let mut obj = object(json!({"coordinates": [[1.0, 2.0, 30.0], [3, 4]]}));
        assert_eq!(
            get_coords_1d_pos(&mut obj).unwrap(),
            vec![vec![1.0, 2.0, 30.0], vec![3.0, 4.0]]
        );
    }

    #[test]
    fn empty_rings_are_not_rejected() {
        let mut obj = object(json!({"coordinates": [[[0, 0], [1, 1]], []]}));
        let rings = get_coords_2d_pos(&mut obj).unwrap();
        assert_eq!(rings.len(), 2);
        assert!(rings[1].is_empty());
    }

    #[test]
    fn null_properties_are_absent() {
        let mut obj = object(json!({"properties": null}));
        assert_eq!(get_properties(&mut obj), Ok(None));

        let mut obj = object(json!({"properties": 3}));
        assert_eq!(
            get_properties(&mut obj),
            Err(Error::PropertiesExpectedObjectOrNull)
        );
    }

    #[test]
    fn missing_coordinates() {
        let mut obj = object(json!({"type": "Point"}));
        assert_eq!(
            get_coords_one_pos(&mut obj),
            Err(Error::ExpectedProperty("coordinates".to_string()))
        );
    }
}
