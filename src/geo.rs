//! Geographic value types and degree-to-kilometer projection.

use std::f64::consts::PI;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KILOMETERS_PER_DEGREE: f64 = EARTH_RADIUS_KM * PI / 180.0;

/// A latitude/longitude pair in degrees. Longitude lives in (-180, 180];
/// values above 180 wrap by subtracting 360.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let mut longitude = longitude;
        while longitude > 180.0 {
            longitude -= 360.0;
        }
        Self { latitude, longitude }
    }

    /// The diametrically opposite point on the globe.
    pub fn antipode(&self) -> Self {
        Self::new(-self.latitude, self.longitude + 180.0)
    }
}

/// Converts geographic degree deltas into planar kilometers at a given
/// origin point. Only used for segment length/duration, so the interface
/// stays much smaller than a full forward/inverse map projection.
pub trait Projection {
    /// Kilometer extent of a (latitude, longitude) degree delta measured
    /// at `origin`.
    fn kilometers_size(&self, origin: GeoPoint, lat_delta: f64, lon_delta: f64) -> (f64, f64);

    /// Straight-line kilometers between two points, per `kilometers_size`
    /// evaluated at `from`. Coincident points yield 0.
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64 {
        let (h, w) = self.kilometers_size(
            from,
            (to.latitude - from.latitude).abs(),
            (to.longitude - from.longitude).abs(),
        );
        (w * w + h * h).sqrt()
    }
}

/// Spherical-Mercator-style local scale: one degree of latitude is a fixed
/// arc length, one degree of longitude shrinks with the cosine of latitude.
pub struct SphericalMercator;

impl Projection for SphericalMercator {
    fn kilometers_size(&self, origin: GeoPoint, lat_delta: f64, lon_delta: f64) -> (f64, f64) {
        let height = lat_delta * KILOMETERS_PER_DEGREE;
        let width = lon_delta * KILOMETERS_PER_DEGREE * origin.latitude.to_radians().cos();
        (height, width)
    }
}
