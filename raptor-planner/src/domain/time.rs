//! Arrival times with an explicit "not reached" value.
//!
//! The planner keeps one best-known arrival per stop and round. Stops that
//! have not been reached yet hold [`ArrivalTime::Unreached`], which orders
//! after every real instant.

use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::ops::Add;

/// Best-known arrival at a stop.
///
/// The ordering is total: `At` values compare by instant and every `At` is
/// earlier than `Unreached`.
///
/// # Examples
///
/// ```
/// use raptor_planner::domain::ArrivalTime;
/// use chrono::NaiveDate;
///
/// let t = NaiveDate::from_ymd_opt(2019, 8, 27)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
///
/// assert!(ArrivalTime::At(t) < ArrivalTime::Unreached);
/// assert!(ArrivalTime::Unreached.is_unreached());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrivalTime {
    /// Reached at this instant.
    At(NaiveDateTime),
    /// Not reached (+infinity).
    Unreached,
}

impl ArrivalTime {
    /// Returns true if this is strictly earlier than `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if the stop has not been reached.
    pub fn is_unreached(&self) -> bool {
        matches!(self, ArrivalTime::Unreached)
    }

    /// Returns the instant, if reached.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            ArrivalTime::At(t) => Some(*t),
            ArrivalTime::Unreached => None,
        }
    }

    /// Add a duration.
    ///
    /// `Unreached` stays `Unreached`, and an instant that would overflow the
    /// calendar becomes `Unreached` rather than wrapping.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        match self {
            ArrivalTime::At(t) => t
                .checked_add_signed(duration)
                .map_or(ArrivalTime::Unreached, ArrivalTime::At),
            ArrivalTime::Unreached => ArrivalTime::Unreached,
        }
    }
}

impl From<NaiveDateTime> for ArrivalTime {
    fn from(value: NaiveDateTime) -> Self {
        ArrivalTime::At(value)
    }
}

impl Add<Duration> for ArrivalTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl fmt::Debug for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalTime::At(t) => write!(f, "ArrivalTime({})", t.format("%Y-%m-%d %H:%M")),
            ArrivalTime::Unreached => f.write_str("ArrivalTime(unreached)"),
        }
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalTime::At(t) => write!(f, "{}", t.format("%H:%M")),
            ArrivalTime::Unreached => f.write_str("--:--"),
        }
    }
}
