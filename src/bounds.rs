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

use std::fmt;

use crate::Bbox;

/// A WGS84 coordinate, latitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// GeoJSON position for this coordinate: `[lon, lat]`.
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Axis-aligned envelope in latitude/longitude.
///
/// Invariant: `min` is component-wise less than or equal to `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: LatLon,
    max: LatLon,
}

impl Bounds {
    /// Degenerate envelope covering a single point.
    pub fn from_point(point: LatLon) -> Self {
        Bounds {
            min: point,
            max: point,
        }
    }

    pub fn min(&self) -> LatLon {
        self.min
    }

    pub fn max(&self) -> LatLon {
        self.max
    }

    /// Grow the envelope so that it also covers `point`.
    pub fn extend(&mut self, point: LatLon) {
        self.min = LatLon::new(self.min.lat.min(point.lat), self.min.lon.min(point.lon));
        self.max = LatLon::new(self.max.lat.max(point.lat), self.max.lon.max(point.lon));
    }

    /// GeoJSON bbox: `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn to_bbox(&self) -> Bbox {
        vec![self.min.lon, self.min.lat, self.max.lon, self.max.lat]
    }

    /// Fold `points` into an envelope; `None` when there are no points.
    pub fn accumulate<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = LatLon>,
    {
        points.into_iter().fold(None, |bounds, point| match bounds {
            None => Some(Bounds::from_point(point)),
            Some(mut b) => {
                b.extend(point);
                Some(b)
            }
        })
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.min, self.max)
    }
}
