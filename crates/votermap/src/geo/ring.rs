//! Polygon rings and the even-odd point-in-polygon test.
//!
//! A `Ring` is an ordered vertex list closed implicitly (last → first). The
//! vertex list is never closed by repeating the first point.
//!
//! Known limitations (even-odd convention, not corrected here)
//! - Self-intersecting rings: overlapping lobes cancel out.
//! - Degenerate rings (zero area, collinear or repeated vertices) are accepted
//!   as long as they have at least 3 vertices; results follow the crossing count.
//! - A point exactly on an edge may land on either side.

use super::types::{BBox, LatLng, ShapeError};

/// Validated polygon ring with its cached bounding box.
///
/// Invariants:
/// - At least 3 vertices, all finite.
/// - `bbox` encloses every vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    vertices: Vec<LatLng>,
    bbox: BBox,
}

impl Ring {
    pub fn new(vertices: Vec<LatLng>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices {
                got: vertices.len(),
            });
        }
        if !vertices.iter().all(LatLng::is_finite) {
            return Err(ShapeError::NonFinite);
        }
        let bbox = BBox::from_points(&vertices).ok_or(ShapeError::TooFewVertices { got: 0 })?;
        Ok(Self { vertices, bbox })
    }

    #[inline]
    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    #[inline]
    pub fn contains(&self, p: LatLng) -> bool {
        point_in_ring(&self.vertices, p)
    }

    pub fn into_vertices(self) -> Vec<LatLng> {
        self.vertices
    }
}

/// Even-odd ray casting with the ray running east (increasing lng) at fixed lat.
///
/// Edge `(v[i], v[j])` with `j = i - 1` (wrapping) counts as a crossing when its
/// endpoints straddle `p.lat` and its lng at `p.lat` lies strictly east of `p`.
/// Callers must pass at least one vertex; `Ring` guarantees three.
pub fn point_in_ring(vertices: &[LatLng], p: LatLng) -> bool {
    let Some(last) = vertices.len().checked_sub(1) else {
        return false;
    };
    let mut inside = false;
    let mut j = last;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[j];
        // Straddling implies a.lat != b.lat, so the division below is safe.
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let lng_at = (b.lng - a.lng) * (p.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if p.lng < lng_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
