//! Great-circle geometry and travel-time estimates
//!
//! Pure functions, no I/O.

use std::cmp::Ordering;

use serde::Serialize;

use crate::core::models::Coordinates;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A determinable, non-negative distance in kilometres
///
/// "No distance" is modelled as `Option<Distance>` by callers, never as infinity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Wrap a kilometre value, rejecting negative or non-finite input
    #[must_use]
    pub fn from_km(km: f64) -> Option<Self> {
        (km.is_finite() && km >= 0.0).then_some(Self(km))
    }

    /// Distance in kilometres
    #[must_use]
    pub const fn km(self) -> f64 {
        self.0
    }

    /// Total order on distances
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}

/// Compare two optional distances, unknown distances last
#[must_use]
pub fn cmp_known_first(a: Option<Distance>, b: Option<Distance>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Great-circle distance in kilometres between two points given in degrees
///
/// Returns 0 for identical points, is symmetric in its arguments and never
/// negative. Range validation is the caller's job; any finite input yields a
/// finite result.
#[must_use]
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair outside [0, 1]
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance between two validated positions
#[must_use]
pub fn distance_between(a: Coordinates, b: Coordinates) -> Distance {
    Distance(haversine(a.latitude, a.longitude, b.latitude, b.longitude))
}

/// Distance between two optional positions, `None` if either side is missing
#[must_use]
pub fn distance_between_opt(a: Option<Coordinates>, b: Option<Coordinates>) -> Option<Distance> {
    Some(distance_between(a?, b?))
}

/// Estimated travel time to a site
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Eta {
    /// Under one hour, whole minutes
    Minutes(u32),
    /// One hour or more, rounded to one decimal
    Hours(f64),
}

impl std::fmt::Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minutes(m) => write!(f, "{m} mins"),
            Self::Hours(h) => write!(f, "{h} hours"),
        }
    }
}

/// Estimate arrival time at `speed_kmh`
///
/// A non-positive speed is treated as "never arrives" and reported in hours
/// as `f64::INFINITY`; config validation keeps that out of normal runs.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimated_arrival(distance: Distance, speed_kmh: f64) -> Eta {
    if speed_kmh <= 0.0 || !speed_kmh.is_finite() {
        return Eta::Hours(f64::INFINITY);
    }

    let hours = distance.km() / speed_kmh;
    if hours < 1.0 {
        Eta::Minutes((hours * 60.0).round() as u32)
    } else {
        Eta::Hours((hours * 10.0).round() / 10.0)
    }
}
