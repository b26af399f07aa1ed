//! Route Identifiers
//!
//! Lots are grouped into three fixed routes. The upstream sends the route as
//! free text, so anything outside the known set is kept as `Unrecognized`
//! instead of being dropped on the floor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three monitored route groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Route {
    Thoothukudi,
    Tirunelveli,
    Nagercoil,
}

impl Route {
    /// All routes, in display order
    pub const ALL: [Route; 3] = [Route::Thoothukudi, Route::Tirunelveli, Route::Nagercoil];

    /// Name as sent on the wire (`Route_en`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Thoothukudi => "Thoothukudi",
            Route::Tirunelveli => "Tirunelveli",
            Route::Nagercoil => "Nagercoil",
        }
    }

    /// Lowercase prefix used by the page element ids
    /// (`thoothukudi-route-progress`, `thoothukudi-lots-container`, ...)
    pub fn dom_prefix(&self) -> &'static str {
        match self {
            Route::Thoothukudi => "thoothukudi",
            Route::Tirunelveli => "tirunelveli",
            Route::Nagercoil => "nagercoil",
        }
    }

    /// Position in [`Route::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Route::Thoothukudi => 0,
            Route::Tirunelveli => 1,
            Route::Nagercoil => 2,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known route
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

/// Route field of a lot as received from the upstream
///
/// An absent or `null` route decodes to `Missing` instead of failing the
/// whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RouteTag {
    Known(Route),
    Unrecognized(String),
    #[default]
    Missing,
}

impl RouteTag {
    /// The known route, if any
    pub fn route(&self) -> Option<Route> {
        match self {
            RouteTag::Known(route) => Some(*route),
            RouteTag::Unrecognized(_) | RouteTag::Missing => None,
        }
    }
}

impl From<String> for RouteTag {
    fn from(raw: String) -> Self {
        // Matching is exact, like the upstream's own bucket filter
        match raw.parse::<Route>() {
            Ok(route) => RouteTag::Known(route),
            Err(_) => RouteTag::Unrecognized(raw),
        }
    }
}

impl From<Option<String>> for RouteTag {
    fn from(raw: Option<String>) -> Self {
        raw.map(RouteTag::from).unwrap_or_default()
    }
}

impl From<RouteTag> for Option<String> {
    fn from(tag: RouteTag) -> Self {
        match tag {
            RouteTag::Known(route) => Some(route.as_str().to_string()),
            RouteTag::Unrecognized(raw) => Some(raw),
            RouteTag::Missing => None,
        }
    }
}

impl From<Route> for RouteTag {
    fn from(route: Route) -> Self {
        RouteTag::Known(route)
    }
}
