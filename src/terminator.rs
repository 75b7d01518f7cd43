//! Day/night terminator geometry.
//!
//! Samples the boundary between the lit and dark hemispheres at fixed
//! longitude steps and closes it into a single polygon around whichever
//! pole is dark, so the result shades directly without a separate cap pass.

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;
use crate::solar::{self, SolarPosition};

/// Longitude sampling step used by the live map, in degrees.
pub const DEFAULT_LONGITUDE_STEP: f64 = 0.1;

/// One instant's terminator snapshot. Recomputed in full on every instant
/// change; there is no incremental update.
pub struct TerminatorState {
    pub sub_solar: GeoPoint,
    pub sub_lunar: GeoPoint,
    pub polygon: Vec<GeoPoint>,
}

impl TerminatorState {
    pub fn compute(instant: DateTime<Utc>, step: f64) -> Self {
        let sun = solar::sub_solar_position(instant);
        let polygon = closed_polygon(&sun, step);
        Self {
            sub_solar: sun.point,
            sub_lunar: sun.point.antipode(),
            polygon,
        }
    }
}

pub fn sub_solar_point(instant: DateTime<Utc>) -> GeoPoint {
    solar::sub_solar_position(instant).point
}

/// The sub-lunar point approximation: the sub-solar antipode.
pub fn sub_lunar_point(instant: DateTime<Utc>) -> GeoPoint {
    sub_solar_point(instant).antipode()
}

pub fn terminator_polygon(instant: DateTime<Utc>, step: f64) -> Vec<GeoPoint> {
    closed_polygon(&solar::sub_solar_position(instant), step)
}

/// Latitude at which the meridian `longitude` crosses the terminator. The
/// boundary is the great circle 90° from the sub-solar point, so the
/// crossing satisfies tan(lat) = -cos(longitude - sun_lon) / tan(sun_lat).
/// A sub-solar latitude of zero divides by zero and lands on ±90, which is
/// exactly the equinox terminator running pole to pole.
pub fn terminator_latitude(sub_solar: GeoPoint, longitude: f64) -> f64 {
    let hour_angle = (longitude - sub_solar.longitude).to_radians();
    (-hour_angle.cos() / sub_solar.latitude.to_radians().tan())
        .atan()
        .to_degrees()
}

fn closed_polygon(sun: &SolarPosition, step: f64) -> Vec<GeoPoint> {
    let mut points = boundary_curve(sun.point, step);
    let pole_latitude = if sun.north_long_night { 90.0 } else { -90.0 };
    close_toward_pole(&mut points, pole_latitude);
    points
}

/// Antimeridian-to-antimeridian sample of the day/night boundary. Sampled
/// by index rather than by accumulating `step`, so fractional steps cannot
/// drift past +180 and lose the final sample; the clamp keeps that last
/// longitude from wrapping to the far side.
fn boundary_curve(sub_solar: GeoPoint, step: f64) -> Vec<GeoPoint> {
    let samples = (360.0 / step).round() as usize;
    let mut points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let longitude = (-180.0 + i as f64 * step).min(180.0);
        points.push(GeoPoint::new(
            terminator_latitude(sub_solar, longitude),
            longitude,
        ));
    }
    points
}

/// Closes the sampled curve around the dark pole: whole-degree latitude
/// steps from the ceiling of the current last point up to the pole at
/// +180, the pole cap edge from +180 back to -180, then whole-degree steps
/// from the pole back down to the ceiling of the first point at -180. The
/// north and south closures are sign mirrors of each other, folded into
/// one routine by the pole selector.
fn close_toward_pole(points: &mut Vec<GeoPoint>, pole_latitude: f64) {
    let Some(last) = points.last() else { return };
    let toward_pole = if pole_latitude > 0.0 { 1.0 } else { -1.0 };

    let mut latitude = last.latitude.ceil();
    while latitude * toward_pole <= 90.0 {
        points.push(GeoPoint::new(latitude, 180.0));
        latitude += toward_pole;
    }

    let mut longitude = 180.0;
    while longitude >= -180.0 {
        points.push(GeoPoint::new(pole_latitude, longitude));
        longitude -= 1.0;
    }

    let first_latitude = points[0].latitude.ceil();
    let mut latitude = pole_latitude;
    while (latitude - first_latitude) * toward_pole >= 0.0 {
        points.push(GeoPoint::new(latitude, -180.0));
        latitude -= toward_pole;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn unit_vector(p: GeoPoint) -> Vector3<f64> {
        let lat = p.latitude.to_radians();
        let lon = p.longitude.to_radians();
        Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    #[test]
    fn sub_lunar_is_the_sub_solar_antipode() {
        for stamp in [
            "2000-01-01T12:00:00Z",
            "2024-06-20T20:51:00Z",
            "2031-11-03T04:15:30Z",
        ] {
            let sun = sub_solar_point(utc(stamp));
            let moon = sub_lunar_point(utc(stamp));
            assert!((moon.latitude + sun.latitude).abs() < 1e-12);
            let wrapped = GeoPoint::new(0.0, sun.longitude + 180.0).longitude;
            assert!((moon.longitude - wrapped).abs() < 1e-12);
            assert!(moon.longitude > -180.0 && moon.longitude <= 180.0);
        }
    }

    #[test]
    fn boundary_samples_sit_on_the_great_circle() {
        let sun = crate::solar::sub_solar_position(utc("2024-02-11T07:30:00Z"));
        let curve = boundary_curve(sun.point, 1.0);
        assert_eq!(curve.len(), 361);
        for p in &curve {
            let dot = unit_vector(*p).dot(&sun.direction);
            assert!(dot.abs() < 1e-6, "dot={} at {:?}", dot, p);
        }
    }

    #[test]
    fn fractional_step_keeps_the_final_antimeridian_sample() {
        let sun = GeoPoint::new(-23.4, 1.0);
        let curve = boundary_curve(sun, 0.1);
        assert_eq!(curve.len(), 3601);
        assert_eq!(curve.first().unwrap().longitude, -180.0);
        assert_eq!(curve.last().unwrap().longitude, 180.0);
    }

    #[test]
    fn meridian_90_degrees_from_the_sun_crosses_at_the_equator() {
        let sun = GeoPoint::new(15.0, 40.0);
        let lat = terminator_latitude(sun, 130.0);
        assert!(lat.abs() < 1e-9, "lat={}", lat);
    }

    #[test]
    fn june_polygon_wraps_the_dark_south_pole() {
        let polygon = terminator_polygon(utc("2024-06-20T12:00:00Z"), 1.0);
        assert!(polygon.iter().any(|p| p.latitude == -90.0));
        assert!(polygon.iter().all(|p| p.latitude < 89.0));
    }

    #[test]
    fn december_polygon_wraps_the_dark_north_pole() {
        let polygon = terminator_polygon(utc("2024-12-21T12:00:00Z"), 1.0);
        assert!(polygon.iter().any(|p| p.latitude == 90.0));
        assert!(polygon.iter().all(|p| p.latitude > -89.0));
    }

    #[test]
    fn polygon_opens_and_closes_on_the_antimeridian() {
        let polygon = terminator_polygon(utc("2024-12-21T12:00:00Z"), 1.0);
        let first = polygon.first().unwrap();
        let last = polygon.last().unwrap();
        assert_eq!(first.longitude, -180.0);
        assert_eq!(last.longitude, -180.0);
        // The closure walks back to the whole-degree ceiling of the first
        // sampled vertex, so the gap is under one degree of latitude.
        assert!((last.latitude - first.latitude).abs() <= 1.0);
    }

    #[test]
    fn pole_cap_edge_covers_every_whole_degree_of_longitude() {
        let polygon = terminator_polygon(utc("2024-06-20T12:00:00Z"), 1.0);
        let cap: Vec<_> = polygon.iter().filter(|p| p.latitude == -90.0).collect();
        // 361 cap points plus the two corner vertices where the meridian
        // walks also touch the pole.
        assert_eq!(cap.len(), 363);
        assert_eq!(cap.first().unwrap().longitude, 180.0);
        assert_eq!(cap.last().unwrap().longitude, -180.0);
    }

    #[test]
    fn state_recompute_is_self_consistent() {
        let instant = utc("2025-08-23T16:00:00Z");
        let state = TerminatorState::compute(instant, DEFAULT_LONGITUDE_STEP);
        assert_eq!(state.sub_lunar, state.sub_solar.antipode());
        assert!(!state.polygon.is_empty());
        let again = TerminatorState::compute(instant, DEFAULT_LONGITUDE_STEP);
        assert_eq!(state.polygon, again.polygon);
    }
}
