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

/// Error when reading a GeoJSON document or building its topology
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    MalformedJson(String),
    GeoJsonExpectedObject,
    PropertiesExpectedObjectOrNull,
    PositionExpectedTwoValues,
    CrsExpectedObjectOrNull,
    ExpectedType { expected: String, actual: String },

    ExpectedStringValue,
    ExpectedProperty(String),
    ExpectedF64Value,
    ExpectedArrayValue,
    ExpectedObjectValue,

    UnsupportedCrsType(String),
    UnknownCrs(String),
    CrsLinkTooLarge { href: String, limit: u64 },
    CrsLinkUnreachable { href: String, reason: String },
    UnsupportedCrsLinkType(String),
    TransformFailed { x: f64, y: f64, reason: String },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document itself is malformed; raised while decoding, before any
    /// topology is built.
    Parse,
    /// The document is well formed but cannot be converted, e.g. because its
    /// coordinate reference system cannot be resolved.
    InvalidInput,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::UnsupportedCrsType(..)
            | Error::UnknownCrs(..)
            | Error::CrsLinkTooLarge { .. }
            | Error::CrsLinkUnreachable { .. }
            | Error::UnsupportedCrsLinkType(..)
            | Error::TransformFailed { .. } => ErrorKind::InvalidInput,
            _ => ErrorKind::Parse,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::MalformedJson(ref reason) => write!(f, "Encountered malformed JSON: {}", reason),
            Error::GeoJsonExpectedObject => {
                write!(f, "Expected a JSON object at the root of the GeoJSON document.")
            }
            Error::PropertiesExpectedObjectOrNull => {
                write!(
                    f,
                    "Encountered neither object type nor null type for \
                     'properties' object."
                )
            }
            Error::PositionExpectedTwoValues => {
                write!(f, "A position must contain at least two numbers.")
            }
            Error::CrsExpectedObjectOrNull => {
                write!(f, "Encountered neither object type nor null type for 'crs' object.")
            }
            Error::ExpectedType {
                ref expected,
                ref actual,
            } => write!(
                f,
                "Expected GeoJSON type '{}', found '{}'",
                expected, actual,
            ),
            Error::ExpectedStringValue => write!(f, "Expected a string value."),
            Error::ExpectedProperty(ref prop_name) => {
                write!(f, "Expected GeoJSON property '{}'.", prop_name)
            }
            Error::ExpectedF64Value => write!(f, "Expected a floating-point value."),
            Error::ExpectedArrayValue => write!(f, "Expected an array."),
            Error::ExpectedObjectValue => write!(f, "Expected an object."),
            Error::UnsupportedCrsType(ref kind) => {
                write!(f, "Unsupported CRS type '{}', expected 'name' or 'link'.", kind)
            }
            Error::UnknownCrs(ref name) => write!(f, "Unknown coordinate reference system '{}'.", name),
            Error::CrsLinkTooLarge { ref href, limit } => write!(
                f,
                "CRS definition at '{}' exceeds the maximum of {} bytes.",
                href, limit
            ),
            Error::CrsLinkUnreachable {
                ref href,
                ref reason,
            } => write!(f, "Unable to fetch CRS definition at '{}': {}", href, reason),
            Error::UnsupportedCrsLinkType(ref link_type) => {
                write!(f, "Unsupported CRS link type '{}'.", link_type)
            }
            Error::TransformFailed { x, y, ref reason } => write!(
                f,
                "Unable to transform coordinate ({}, {}): {}",
                x, y, reason
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedJson(err.to_string())
    }
}
