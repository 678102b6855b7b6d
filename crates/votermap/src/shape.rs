//! Drawn regions as a closed sum type.
//!
//! `Polygon` and `Rectangle` share the ring containment test; the tag only
//! exists so persisted shapes come back as what the user drew.

use std::fmt;

use crate::geo::{BBox, Circle, GeoCfg, LatLng, Ring, ShapeError};

/// Shape type discriminator, as written in the persisted format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Polygon,
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Polygon, ShapeKind::Rectangle, ShapeKind::Circle];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A validated drawn region.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon(Ring),
    Rectangle(Ring),
    Circle(Circle),
}

impl Shape {
    pub fn polygon(vertices: Vec<LatLng>) -> Result<Self, ShapeError> {
        Ring::new(vertices).map(Shape::Polygon)
    }

    pub fn rectangle(vertices: Vec<LatLng>) -> Result<Self, ShapeError> {
        Ring::new(vertices).map(Shape::Rectangle)
    }

    /// Axis-aligned rectangle from two opposite corners, ring order SW, NW, NE, SE.
    pub fn rectangle_from_corners(a: LatLng, b: LatLng) -> Result<Self, ShapeError> {
        let (s, n) = (a.lat.min(b.lat), a.lat.max(b.lat));
        let (w, e) = (a.lng.min(b.lng), a.lng.max(b.lng));
        Self::rectangle(vec![
            LatLng::new(s, w),
            LatLng::new(n, w),
            LatLng::new(n, e),
            LatLng::new(s, e),
        ])
    }

    pub fn circle(center: LatLng, radius_m: f64) -> Result<Self, ShapeError> {
        Circle::new(center, radius_m).map(Shape::Circle)
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    /// Ring of a polygonal shape, None for circles.
    #[inline]
    pub fn ring(&self) -> Option<&Ring> {
        match self {
            Shape::Polygon(r) | Shape::Rectangle(r) => Some(r),
            Shape::Circle(_) => None,
        }
    }

    /// Precise containment, no pre-filter.
    pub fn contains(&self, p: LatLng, cfg: &GeoCfg) -> bool {
        match self {
            Shape::Polygon(r) | Shape::Rectangle(r) => r.contains(p),
            Shape::Circle(c) => c.contains(p, cfg),
        }
    }

    /// Lat/lng box enclosing the shape.
    pub fn bounds(&self, cfg: &GeoCfg) -> BBox {
        match self {
            Shape::Polygon(r) | Shape::Rectangle(r) => r.bbox(),
            Shape::Circle(c) => c.bbox(cfg),
        }
    }
}

/// Combined bounds of all shapes, e.g. to frame a restored drawing. None if empty.
pub fn bounds_of(shapes: &[Shape], cfg: &GeoCfg) -> Option<BBox> {
    shapes
        .iter()
        .map(|s| s.bounds(cfg))
        .reduce(|acc, b| acc.union(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }

    #[test]
    fn kind_tags_round_trip() {
        for k in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_tag(k.as_str()), Some(k));
            assert_eq!(k.to_string(), k.as_str());
        }
        assert_eq!(ShapeKind::from_tag("polyline"), None);
        assert_eq!(ShapeKind::from_tag("Polygon"), None);
    }

    #[test]
    fn two_vertex_polygon_is_rejected() {
        let err = Shape::polygon(vec![ll(0.0, 0.0), ll(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, ShapeError::TooFewVertices { got: 2 });
        assert!(Shape::rectangle(vec![ll(0.0, 0.0)]).is_err());
        assert_eq!(
            Shape::circle(ll(0.0, 0.0), -5.0),
            Err(ShapeError::NegativeRadius(-5.0))
        );
    }

    #[test]
    fn rectangle_from_corners_orders_ring() {
        let r = Shape::rectangle_from_corners(ll(2.0, 5.0), ll(-1.0, 3.0)).unwrap();
        assert_eq!(r.kind(), ShapeKind::Rectangle);
        let ring = r.ring().unwrap();
        assert_eq!(
            ring.vertices(),
            &[ll(-1.0, 3.0), ll(2.0, 3.0), ll(2.0, 5.0), ll(-1.0, 5.0)]
        );
        let cfg = GeoCfg::default();
        assert!(r.contains(ll(0.5, 4.0), &cfg));
        assert!(!r.contains(ll(0.5, 6.0), &cfg));
    }

    #[test]
    fn polygon_and_rectangle_share_containment() {
        let cfg = GeoCfg::default();
        let verts = vec![ll(0.0, 0.0), ll(0.0, 10.0), ll(10.0, 10.0), ll(10.0, 0.0)];
        let p = Shape::polygon(verts.clone()).unwrap();
        let r = Shape::rectangle(verts).unwrap();
        assert_ne!(p, r);
        for q in [ll(5.0, 5.0), ll(15.0, 15.0), ll(9.9, 0.1), ll(-0.1, 3.0)] {
            assert_eq!(p.contains(q, &cfg), r.contains(q, &cfg));
        }
        assert!(p.ring().is_some());
        assert!(Shape::circle(ll(0.0, 0.0), 1.0).unwrap().ring().is_none());
    }

    #[test]
    fn combined_bounds() {
        let cfg = GeoCfg::default();
        assert!(bounds_of(&[], &cfg).is_none());
        let shapes = vec![
            Shape::rectangle_from_corners(ll(0.0, 0.0), ll(1.0, 1.0)).unwrap(),
            Shape::polygon(vec![ll(-2.0, 3.0), ll(-1.0, 4.0), ll(-1.5, 5.0)]).unwrap(),
            Shape::circle(ll(0.0, 10.0), 0.0).unwrap(),
        ];
        let b = bounds_of(&shapes, &cfg).unwrap();
        assert_eq!(b.south_west(), ll(-2.0, 0.0));
        assert_eq!(b.north_east(), ll(1.0, 10.0));
    }
}
