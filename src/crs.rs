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

//! Coordinate reference systems.
//!
//! GeoJSON documents written against the 2008 specification may carry a
//! `crs` member, either naming a system or linking to its definition. This
//! crate does no projection mathematics itself: a declared system is handed
//! to a [`CrsResolver`], which answers with a [`CoordinateTransform`] into
//! WGS84 longitude/latitude.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::time::Duration;

use log::debug;

use crate::json::JsonObject;
use crate::{util, Error};

/// Largest accepted CRS definition fetched through a `link` CRS, in bytes.
pub const MAX_LINK_LENGTH: u64 = 102_400;

/// The `crs` member of a GeoJSON document.
///
/// [GeoJSON 2008 § 3](https://geojson.org/geojson-spec.html#coordinate-reference-system-objects)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Crs {
    /// `{"type": "name", "properties": {"name": ...}}`
    Name(String),
    /// `{"type": "link", "properties": {"href": ..., "type": ...}}`
    Link {
        href: String,
        link_type: Option<String>,
    },
    /// Any other CRS type. Kept so that decoding succeeds; building fails.
    Unsupported(String),
}

impl Crs {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let kind = util::expect_type(&mut object)?;
        match kind.as_str() {
            "name" => {
                let mut properties = util::get_object(&mut object, "properties")?;
                Ok(Crs::Name(util::get_string(&mut properties, "name")?))
            }
            "link" => {
                let mut properties = util::get_object(&mut object, "properties")?;
                Ok(Crs::Link {
                    href: util::get_string(&mut properties, "href")?,
                    link_type: util::get_optional_string(&mut properties, "type")?,
                })
            }
            _ => Ok(Crs::Unsupported(kind)),
        }
    }
}

/// Maps a coordinate from a source system to WGS84 `(longitude, latitude)`.
pub trait CoordinateTransform {
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), Error>;
}

pub type BoxedTransform = Box<dyn CoordinateTransform + Send + Sync>;

/// Coordinates are already WGS84 longitude/latitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl CoordinateTransform for Identity {
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        Ok((x, y))
    }
}

impl<F> CoordinateTransform for F
where
    F: Fn(f64, f64) -> Result<(f64, f64), Error>,
{
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        self(x, y)
    }
}

/// What a [`CrsResolver`] is asked to turn into a transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrsDefinition {
    /// A named system, e.g. `urn:ogc:def:crs:EPSG::3857`.
    Name(String),
    /// A PROJ.4 definition string fetched through a link.
    Proj4(String),
    /// An OGC or ESRI WKT definition fetched through a link.
    Wkt(String),
}

impl fmt::Display for CrsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CrsDefinition::Name(ref name) => f.write_str(name),
            CrsDefinition::Proj4(ref text) | CrsDefinition::Wkt(ref text) => f.write_str(text.trim()),
        }
    }
}

/// Resolves a CRS definition to a transform into WGS84.
pub trait CrsResolver {
    fn resolve(&self, definition: &CrsDefinition) -> Result<BoxedTransform, Error>;
}

impl<F> CrsResolver for F
where
    F: Fn(&CrsDefinition) -> Result<BoxedTransform, Error>,
{
    fn resolve(&self, definition: &CrsDefinition) -> Result<BoxedTransform, Error> {
        self(definition)
    }
}

/// Resolver that only recognises the usual spellings of WGS84
/// longitude/latitude, all resolved to [`Identity`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Wgs84Resolver;

const WGS84_NAMES: &[&str] = &[
    "EPSG:4326",
    "CRS:84",
    "CRS84",
    "WGS84",
    "WGS 84",
    "URN:OGC:DEF:CRS:OGC:1.3:CRS84",
    "URN:OGC:DEF:CRS:OGC::CRS84",
    "HTTP://WWW.OPENGIS.NET/DEF/CRS/OGC/1.3/CRS84",
    "HTTP://WWW.OPENGIS.NET/DEF/CRS/EPSG/0/4326",
];

impl Wgs84Resolver {
    fn is_wgs84_name(name: &str) -> bool {
        let name = name.trim().to_ascii_uppercase();
        // urn:ogc:def:crs:EPSG:<version>:4326, the version may be empty
        let epsg_urn = name.starts_with("URN:OGC:DEF:CRS:EPSG:") && name.ends_with(":4326");
        epsg_urn || WGS84_NAMES.contains(&name.as_str())
    }

    fn is_wgs84_proj4(text: &str) -> bool {
        let params: Vec<String> = text
            .split_whitespace()
            .map(|p| p.to_ascii_lowercase())
            .collect();
        let has = |p: &str| params.iter().any(|q| q == p);
        if has("+init=epsg:4326") {
            return true;
        }
        let geographic = has("+proj=longlat") || has("+proj=lonlat");
        geographic && (has("+datum=wgs84") || has("+ellps=wgs84"))
    }

    fn is_wgs84_wkt(text: &str) -> bool {
        let text = text.trim_start().to_ascii_uppercase();
        let geographic = text.starts_with("GEOGCS[") || text.starts_with("GEOGCRS[");
        geographic && (text.contains("WGS 84") || text.contains("WGS_1984") || text.contains("WGS84"))
    }
}

impl CrsResolver for Wgs84Resolver {
    fn resolve(&self, definition: &CrsDefinition) -> Result<BoxedTransform, Error> {
        let known = match *definition {
            CrsDefinition::Name(ref name) => Wgs84Resolver::is_wgs84_name(name),
            CrsDefinition::Proj4(ref text) => Wgs84Resolver::is_wgs84_proj4(text),
            CrsDefinition::Wkt(ref text) => Wgs84Resolver::is_wgs84_wkt(text),
        };
        if known {
            Ok(Box::new(Identity))
        } else {
            Err(Error::UnknownCrs(definition.to_string()))
        }
    }
}

/// A CRS definition retrieved through a `link` CRS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedCrs {
    /// Media type reported by the source, when it reports one.
    pub content_type: Option<String>,
    pub text: String,
}

impl LinkedCrs {
    /// Interpret the fetched text according to the link's declared `type`,
    /// falling back to the reported content type and then to the text itself.
    pub fn definition(self, link_type: Option<&str>) -> Result<CrsDefinition, Error> {
        match link_type {
            Some(t) => match t.to_ascii_lowercase().as_str() {
                "proj4" => Ok(CrsDefinition::Proj4(self.text)),
                "ogcwkt" | "esriwkt" => Ok(CrsDefinition::Wkt(self.text)),
                _ => Err(Error::UnsupportedCrsLinkType(t.to_string())),
            },
            None => {
                let content_type = self
                    .content_type
                    .as_deref()
                    .map(|ct| ct.to_ascii_lowercase());
                match content_type.as_deref() {
                    Some(ct) if ct.contains("proj4") => Ok(CrsDefinition::Proj4(self.text)),
                    Some(ct) if ct.contains("wkt") => Ok(CrsDefinition::Wkt(self.text)),
                    None | Some("text/plain") | Some("application/octet-stream") => {
                        if self.text.trim_start().starts_with('+') {
                            Ok(CrsDefinition::Proj4(self.text))
                        } else {
                            Ok(CrsDefinition::Wkt(self.text))
                        }
                    }
                    Some(ct) if ct.starts_with("text/plain;") => {
                        LinkedCrs {
                            content_type: None,
                            text: self.text,
                        }
                        .definition(None)
                    }
                    Some(ct) => Err(Error::UnsupportedCrsLinkType(ct.to_string())),
                }
            }
        }
    }
}

/// Retrieves the definition a `link` CRS points at.
pub trait LinkFetcher {
    /// Fetch `href`, failing with [`Error::CrsLinkTooLarge`] when the payload
    /// is longer than `max_bytes`.
    fn fetch(&self, href: &str, max_bytes: u64) -> Result<LinkedCrs, Error>;
}

/// Fetches `http(s)://` links with `ureq` and reads anything else from the
/// local file system.
#[derive(Clone, Debug, Default)]
pub struct DefaultFetcher {
    timeout: Option<Duration>,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        DefaultFetcher::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        DefaultFetcher { timeout }
    }

    #[cfg(feature = "http")]
    fn fetch_http(&self, href: &str, max_bytes: u64) -> Result<LinkedCrs, Error> {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder
            .build()
            .get(href)
            .call()
            .map_err(|e| unreachable_link(href, e))?;
        let content_type = Some(response.content_type().to_string());
        let text = read_limited(response.into_reader(), href, max_bytes)?;
        Ok(LinkedCrs { content_type, text })
    }

    #[cfg(not(feature = "http"))]
    fn fetch_http(&self, href: &str, _max_bytes: u64) -> Result<LinkedCrs, Error> {
        Err(unreachable_link(href, "built without the `http` feature"))
    }

    fn fetch_file(&self, href: &str, max_bytes: u64) -> Result<LinkedCrs, Error> {
        let path = href.strip_prefix("file://").unwrap_or(href);
        let file = File::open(path).map_err(|e| unreachable_link(href, e))?;
        let text = read_limited(file, href, max_bytes)?;
        Ok(LinkedCrs {
            content_type: None,
            text,
        })
    }
}

impl LinkFetcher for DefaultFetcher {
    fn fetch(&self, href: &str, max_bytes: u64) -> Result<LinkedCrs, Error> {
        let lower = href.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            self.fetch_http(href, max_bytes)
        } else {
            self.fetch_file(href, max_bytes)
        }
    }
}

fn unreachable_link<E: fmt::Display>(href: &str, reason: E) -> Error {
    Error::CrsLinkUnreachable {
        href: href.to_string(),
        reason: reason.to_string(),
    }
}

fn read_limited<R: Read>(reader: R, href: &str, max_bytes: u64) -> Result<String, Error> {
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| unreachable_link(href, e))?;
    if buf.len() as u64 > max_bytes {
        return Err(Error::CrsLinkTooLarge {
            href: href.to_string(),
            limit: max_bytes,
        });
    }
    String::from_utf8(buf).map_err(|e| unreachable_link(href, e))
}

/// Turn a declared CRS into a transform, fetching linked definitions first.
pub(crate) fn resolve(
    crs: &Crs,
    resolver: &dyn CrsResolver,
    fetcher: &dyn LinkFetcher,
    max_link_bytes: u64,
) -> Result<BoxedTransform, Error> {
    match *crs {
        Crs::Name(ref name) => {
            debug!("Resolving named CRS '{}'", name);
            resolver.resolve(&CrsDefinition::Name(name.clone()))
        }
        Crs::Link {
            ref href,
            ref link_type,
        } => {
            debug!("Fetching linked CRS definition from '{}'", href);
            let linked = fetcher.fetch(href, max_link_bytes)?;
            if linked.text.len() as u64 > max_link_bytes {
                return Err(Error::CrsLinkTooLarge {
                    href: href.clone(),
                    limit: max_link_bytes,
                });
            }
            let definition = linked.definition(link_type.as_deref())?;
            resolver.resolve(&definition)
        }
        Crs::Unsupported(ref kind) => Err(Error::UnsupportedCrsType(kind.clone())),
    }
}
