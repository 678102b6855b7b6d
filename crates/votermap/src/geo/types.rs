//! Basic coordinate types and tolerances shared by the containment tests.
//!
//! - `LatLng`: a WGS-84-style coordinate pair in degrees.
//! - `BBox`: closed axis-aligned lat/lng box, the cheap pre-filter.
//! - `GeoCfg`: sphere model used for great-circle distances.
//! - `ShapeError`: construction-time rejection of malformed geometry.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (the sphere the map widget measures on).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geometry configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCfg {
    /// Sphere radius for haversine distances, in meters.
    pub earth_radius_m: f64,
}

impl GeoCfg {
    /// Sphere of the given radius; it must be finite and strictly positive.
    pub fn new(earth_radius_m: f64) -> Result<Self, ShapeError> {
        if !earth_radius_m.is_finite() || earth_radius_m <= 0.0 {
            return Err(ShapeError::SphereRadius(earth_radius_m));
        }
        Ok(Self { earth_radius_m })
    }
}

impl Default for GeoCfg {
    fn default() -> Self {
        Self {
            earth_radius_m: EARTH_RADIUS_M,
        }
    }
}

/// A coordinate in degrees. Serializes as `{"lat": .., "lng": ..}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
    /// `(lat, lng)` as a column vector.
    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.lat, self.lng)
    }
    #[inline]
    pub fn from_vec2(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for LatLng {
    #[inline]
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Closed axis-aligned box; `min`/`max` are `(lat, lng)` vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl BBox {
    /// Smallest box enclosing `points`. None if `points` is empty.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let v0 = first.to_vec2();
        let (min, max) = rest.iter().fold((v0, v0), |(lo, hi), p| {
            let v = p.to_vec2();
            (lo.inf(&v), hi.sup(&v))
        });
        Some(Self { min, max })
    }

    /// Inclusive on every side, so it never rejects a point on the boundary.
    #[inline]
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min.x && p.lat <= self.max.x && p.lng >= self.min.y && p.lng <= self.max.y
    }

    #[inline]
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    #[inline]
    pub fn south_west(&self) -> LatLng {
        LatLng::from_vec2(self.min)
    }
    #[inline]
    pub fn north_east(&self) -> LatLng {
        LatLng::from_vec2(self.max)
    }
    #[inline]
    pub fn center(&self) -> LatLng {
        LatLng::from_vec2((self.min + self.max) * 0.5)
    }
}

/// Malformed geometry, rejected before any containment test runs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("polygon needs at least 3 vertices, got {got}")]
    TooFewVertices { got: usize },
    #[error("circle radius must be non-negative, got {0}")]
    NegativeRadius(f64),
    #[error("coordinates and radius must be finite numbers")]
    NonFinite,
    #[error("sphere radius must be a positive finite number, got {0}")]
    SphereRadius(f64),
}
