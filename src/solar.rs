//! Solar position astronomy.
//!
//! Computes the sub-solar point (where the sun is directly overhead) for a
//! UTC instant, using a low-precision solar ephemeris: the sun's ecliptic
//! longitude from the day count since J2000, rotated into equatorial and
//! then Earth-fixed coordinates via Greenwich Mean Sidereal Time.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use crate::geo::GeoPoint;

pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const GMST_BASE_DEG: f64 = 280.46061837;
pub const GMST_ROTATION_PER_DAY: f64 = 360.98564736629;
pub const GMST_CORRECTION: f64 = 0.000387933;

const SOLAR_MEAN_LONGITUDE_DEG: f64 = 280.460;
const SOLAR_MEAN_LONGITUDE_RATE: f64 = 0.9856474;
const SOLAR_MEAN_ANOMALY_DEG: f64 = 357.528;
const SOLAR_MEAN_ANOMALY_RATE: f64 = 0.9856003;
const ECLIPTIC_CENTER_1: f64 = 1.915;
const ECLIPTIC_CENTER_2: f64 = 0.020;
const OBLIQUITY_DEG: f64 = 23.439;
const OBLIQUITY_RATE: f64 = -0.0000004;

/// Sub-solar direction and the derived geographic point for one instant.
pub struct SolarPosition {
    /// Unit vector in the Earth-fixed frame: x toward (0°, 0°), y toward
    /// (0°, 90°E), z toward the north pole.
    pub direction: Vector3<f64>,
    pub point: GeoPoint,
    /// True when the sun sits below the equator, i.e. the northern
    /// hemisphere is in its long dark season.
    pub north_long_night: bool,
}

pub fn days_since_j2000(timestamp: DateTime<Utc>) -> f64 {
    let j2000 = DateTime::parse_from_rfc3339("2000-01-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    (timestamp - j2000).num_milliseconds() as f64 / (1000.0 * SECONDS_PER_DAY)
}

pub fn greenwich_mean_sidereal_time(timestamp: DateTime<Utc>) -> f64 {
    let days = days_since_j2000(timestamp);
    let centuries = days / DAYS_PER_JULIAN_CENTURY;
    let gmst_degrees = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * days
        + GMST_CORRECTION * centuries * centuries
        - centuries * centuries * centuries / 38710000.0;
    gmst_degrees.rem_euclid(360.0).to_radians()
}

/// Pure and total: every timestamp yields a position.
pub fn sub_solar_position(timestamp: DateTime<Utc>) -> SolarPosition {
    let days = days_since_j2000(timestamp);

    let mean_longitude = (SOLAR_MEAN_LONGITUDE_DEG + SOLAR_MEAN_LONGITUDE_RATE * days)
        .rem_euclid(360.0);
    let mean_anomaly = (SOLAR_MEAN_ANOMALY_DEG + SOLAR_MEAN_ANOMALY_RATE * days)
        .rem_euclid(360.0)
        .to_radians();
    let ecliptic_longitude = (mean_longitude
        + ECLIPTIC_CENTER_1 * mean_anomaly.sin()
        + ECLIPTIC_CENTER_2 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (OBLIQUITY_DEG + OBLIQUITY_RATE * days).to_radians();

    // Equatorial frame: x toward the vernal equinox, z along the pole.
    let equatorial = Vector3::new(
        ecliptic_longitude.cos(),
        obliquity.cos() * ecliptic_longitude.sin(),
        obliquity.sin() * ecliptic_longitude.sin(),
    );

    // Spin into the Earth-fixed frame so longitude reads off directly.
    let gmst = greenwich_mean_sidereal_time(timestamp);
    let (gmst_sin, gmst_cos) = gmst.sin_cos();
    let direction = Vector3::new(
        gmst_cos * equatorial.x + gmst_sin * equatorial.y,
        -gmst_sin * equatorial.x + gmst_cos * equatorial.y,
        equatorial.z,
    );

    let latitude = direction.z.asin().to_degrees();
    let longitude = direction.y.atan2(direction.x).to_degrees();

    SolarPosition {
        direction,
        point: GeoPoint::new(latitude, longitude),
        north_long_night: direction.z < 0.0,
    }
}
