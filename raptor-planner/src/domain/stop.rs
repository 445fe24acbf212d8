//! Stop and route identity types.
//!
//! The planner is generic over its stop and route types; these are the
//! concrete identities used by the in-memory network.

use std::fmt;
use std::sync::Arc;

/// A stop where passengers board, alight or start a walk.
///
/// Two stops are the same stop when both their id and name match. The name
/// is the display text used by name-based lookups.
///
/// # Examples
///
/// ```
/// use raptor_planner::domain::Stop;
///
/// let a = Stop::new(1, "Amsterdam Centraal");
/// assert_eq!(a.to_string(), "Amsterdam Centraal");
/// assert_eq!(a, Stop::new(1, "Amsterdam Centraal"));
/// assert_ne!(a, Stop::new(2, "Amsterdam Centraal"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stop {
    id: u32,
    name: Arc<str>,
}

impl Stop {
    /// Creates a stop.
    pub fn new(id: u32, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the numeric id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop({} {})", self.id, self.name)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A route: a fixed stop pattern shared by all its trips.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route {
    id: u32,
    name: Arc<str>,
}

impl Route {
    /// Creates a route.
    pub fn new(id: u32, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the numeric id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route({} {})", self.id, self.name)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
