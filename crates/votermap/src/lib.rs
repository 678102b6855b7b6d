//! Voter selection by drawn map regions.
//!
//! The map widget, its markers and its drawing tools live elsewhere. This crate
//! owns the part with actual geometry in it:
//! - `geo`: lat/lng rings (even-odd point-in-polygon) and spherical circles.
//! - `shape`: the `Shape` sum type (polygon, rectangle, circle) with validation.
//! - `select`: which candidate ids fall inside a shape (bbox pre-filter first).
//! - `codec`: the persisted JSON format for shapes, candidates and results.
//!
//! Everything here is a pure function of its inputs; there is no global state.

pub mod codec;
pub mod geo;
pub mod select;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::codec::{
        decode_candidates, decode_shape, deserialize, encode_ids, encode_shape, restore,
        serialize, CodecError, Decoded, ItemError, SkippedItem,
    };
    pub use crate::geo::rand::{
        draw_ring_radial, scatter_candidates, RadialCfg, ReplayToken, VertexCount,
    };
    pub use crate::geo::{
        haversine_m, point_in_ring, BBox, Circle, GeoCfg, LatLng, Ring, ShapeError,
        EARTH_RADIUS_M,
    };
    pub use crate::select::{
        select_contained, select_contained_with, select_each, select_in_any, Candidate,
        SelectCfg, SelectionResult,
    };
    pub use crate::shape::{bounds_of, Shape, ShapeKind};
}
