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

use std::collections::BTreeMap;

use crate::json::{JsonObject, JsonValue};

/// Tags of a primitive, ordered by key.
pub type Tags = BTreeMap<String, String>;

/// Convert the `properties` of a feature into tags.
///
/// Strings are taken verbatim, every other value is rendered as its JSON
/// text (`1.5`, `true`, `null`, `{"a":1}`).
pub fn tags_from_properties(properties: Option<&JsonObject>) -> Tags {
    properties
        .into_iter()
        .flatten()
        .map(|(key, value)| (key.clone(), tag_value(value)))
        .collect()
}

fn tag_value(value: &JsonValue) -> String {
    match *value {
        JsonValue::String(ref s) => s.clone(),
        ref other => other.to_string(),
    }
}
