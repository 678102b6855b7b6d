//! Great-circle distance and circle containment on a sphere.

use super::types::{BBox, GeoCfg, LatLng, ShapeError};
use nalgebra::Vector2;

/// Haversine surface distance between `a` and `b` in meters.
///
/// Symmetric in its arguments and exactly zero for identical points.
pub fn haversine_m(a: LatLng, b: LatLng, cfg: &GeoCfg) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let sin_dphi = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let sin_dlam = ((b.lng - a.lng).to_radians() / 2.0).sin();
    let h = sin_dphi * sin_dphi + phi1.cos() * phi2.cos() * sin_dlam * sin_dlam;
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * cfg.earth_radius_m * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Circle on the sphere: center plus surface radius in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: LatLng,
    radius_m: f64,
}

impl Circle {
    pub fn new(center: LatLng, radius_m: f64) -> Result<Self, ShapeError> {
        if !center.is_finite() || !radius_m.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if radius_m < 0.0 {
            return Err(ShapeError::NegativeRadius(radius_m));
        }
        Ok(Self { center, radius_m })
    }

    #[inline]
    pub fn center(&self) -> LatLng {
        self.center
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Boundary inclusive: `distance <= radius`.
    #[inline]
    pub fn contains(&self, p: LatLng, cfg: &GeoCfg) -> bool {
        haversine_m(self.center, p, cfg) <= self.radius_m
    }

    /// Lat/lng box enclosing the circle, used for framing views.
    ///
    /// Lat is clamped to the poles. Near a pole, or when the circle reaches
    /// over one, the lng extent is widened to the full range.
    pub fn bbox(&self, cfg: &GeoCfg) -> BBox {
        let dlat = (self.radius_m / cfg.earth_radius_m).to_degrees();
        let south = (self.center.lat - dlat).max(-90.0);
        let north = (self.center.lat + dlat).min(90.0);
        let cos_lat = self.center.lat.to_radians().cos();
        let dlng = if cos_lat > 1e-9 && south > -90.0 && north < 90.0 {
            (dlat / cos_lat).min(180.0)
        } else {
            180.0
        };
        BBox {
            min: Vector2::new(south, self.center.lng - dlng),
            max: Vector2::new(north, self.center.lng + dlng),
        }
    }
}
