//! The fixed set of JSON resources served to the map frontend.
//!
//! Every resource has a stable name (used as the aggregate key and the
//! fixture file stem) and a URL path on the resource server. Landmark sets
//! keep their historical `/dibiaoN` paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One named dataset exposed by the resource server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Metro,
    Bus,
    Route1,
    Route2,
    Route3,
    Landmark1,
    Landmark2,
    Landmark3,
}

/// Returned when a name does not match any [`Resource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl Resource {
    /// Every resource, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Metro,
        Self::Bus,
        Self::Route1,
        Self::Route2,
        Self::Route3,
        Self::Landmark1,
        Self::Landmark2,
        Self::Landmark3,
    ];

    /// Stable name, used as the aggregate key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Metro => "metro",
            Self::Bus => "bus",
            Self::Route1 => "route1",
            Self::Route2 => "route2",
            Self::Route3 => "route3",
            Self::Landmark1 => "landmark1",
            Self::Landmark2 => "landmark2",
            Self::Landmark3 => "landmark3",
        }
    }

    /// Path on the resource server.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Metro => "/metro",
            Self::Bus => "/bus",
            Self::Route1 => "/route1",
            Self::Route2 => "/route2",
            Self::Route3 => "/route3",
            Self::Landmark1 => "/dibiao1",
            Self::Landmark2 => "/dibiao2",
            Self::Landmark3 => "/dibiao3",
        }
    }

    /// File name of the static fixture backing this resource.
    #[must_use]
    pub const fn fixture_file(self) -> &'static str {
        match self {
            Self::Metro => "metro.json",
            Self::Bus => "bus.json",
            Self::Route1 => "route1.json",
            Self::Route2 => "route2.json",
            Self::Route3 => "route3.json",
            Self::Landmark1 => "landmark1.json",
            Self::Landmark2 => "landmark2.json",
            Self::Landmark3 => "landmark3.json",
        }
    }

    /// Position in [`Resource::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a resource by its server path (e.g. `/dibiao2`).
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}
