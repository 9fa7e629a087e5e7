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

use std::time::Duration;

use serde::Deserialize;

use crate::{Error, MAX_LINK_LENGTH};

/// Settings of a [`Builder`](crate::Builder).
///
/// Missing fields take their default value, so `{}` is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Largest CRS definition accepted from a `link` CRS, in bytes.
    pub max_link_bytes: u64,
    /// Timeout for fetching a `link` CRS over HTTP. No timeout when unset.
    pub link_timeout_secs: Option<u64>,
    /// When false, a declared `crs` is ignored and coordinates are taken
    /// as WGS84 longitude/latitude.
    pub honor_crs: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            max_link_bytes: MAX_LINK_LENGTH,
            link_timeout_secs: None,
            honor_crs: true,
        }
    }
}

impl BuilderConfig {
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn link_timeout(&self) -> Option<Duration> {
        self.link_timeout_secs.map(Duration::from_secs)
    }
}
