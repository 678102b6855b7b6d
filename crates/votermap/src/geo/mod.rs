//! Planar lat/lng rings and spherical circles.
//!
//! Purpose
//! - `Ring` answers point-in-polygon with even-odd ray casting in raw lat/lng
//!   degrees (no projection), the same convention the drawing layer uses.
//! - `Circle` answers containment by haversine surface distance in meters.
//! - `BBox` is the conservative pre-filter used before the ring test.
//!
//! Both shapes validate on construction, so the containment tests never see
//! malformed input.

pub mod rand;
mod ring;
mod sphere;
mod types;

pub use ring::{point_in_ring, Ring};
pub use sphere::{haversine_m, Circle};
pub use types::{BBox, GeoCfg, LatLng, ShapeError, EARTH_RADIUS_M};
