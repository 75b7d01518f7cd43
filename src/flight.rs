//! Per-flight simulation state.

use crate::geo::GeoPoint;
use crate::trajectory::Trajectory;

/// One tracked flight: identity and display metadata plus the trajectory it
/// flies and how far along it is. Position, course and the landed flag are
/// derived from elapsed time against the trajectory, never stored on their
/// own, so they cannot drift out of sync.
pub struct FlightInfo {
    pub plane_id: u32,
    pub name: String,
    pub origin: String,
    pub destination: String,
    speed_kmh: f64,
    cruise_altitude_km: f64,
    trajectory: Trajectory,
    current_flight_time: f64,
    position: GeoPoint,
    course: f64,
    landed: bool,
}

impl FlightInfo {
    pub fn new(
        plane_id: u32,
        name: String,
        origin: String,
        destination: String,
        speed_kmh: f64,
        cruise_altitude_km: f64,
        waypoints: &[GeoPoint],
        initial_flight_time: f64,
    ) -> Self {
        let trajectory = Trajectory::new(waypoints, speed_kmh);
        let mut flight = Self {
            plane_id,
            name,
            origin,
            destination,
            speed_kmh,
            cruise_altitude_km,
            trajectory,
            current_flight_time: 0.0,
            position: GeoPoint::default(),
            course: 0.0,
            landed: false,
        };
        flight.set_current_flight_time(initial_flight_time);
        flight
    }

    /// Moves the flight forward by `delta_hours` of simulated time. Landed
    /// flights stay put.
    pub fn advance(&mut self, delta_hours: f64) {
        if self.landed {
            return;
        }
        self.set_current_flight_time(self.current_flight_time + delta_hours);
    }

    /// Scrubs elapsed time to an absolute value and refreshes all derived
    /// state, including clearing the landed flag when scrubbed back before
    /// the arrival time.
    pub fn set_current_flight_time(&mut self, hours: f64) {
        self.current_flight_time = hours;
        self.refresh();
    }

    /// Swaps in a new route. Elapsed time is kept, so the flight re-lands
    /// or un-lands according to the new total duration.
    pub fn rebuild_trajectory(&mut self, waypoints: &[GeoPoint], speed_kmh: f64) {
        self.speed_kmh = speed_kmh;
        self.trajectory.rebuild(waypoints, speed_kmh);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.landed = self.current_flight_time >= self.trajectory.total_flight_time();
        self.position = self.trajectory.position_at(self.current_flight_time);
        self.course = self.trajectory.course_at(self.current_flight_time);
    }

    pub fn current_flight_time(&self) -> f64 {
        self.current_flight_time
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn course(&self) -> f64 {
        self.course
    }

    pub fn landed(&self) -> bool {
        self.landed
    }

    /// Total duration of the flight's route in hours.
    pub fn total_flight_time(&self) -> f64 {
        self.trajectory.total_flight_time()
    }

    /// Ground speed for display: zero once landed.
    pub fn speed_kmh(&self) -> f64 {
        if self.landed { 0.0 } else { self.speed_kmh }
    }

    /// Altitude for display: zero once landed.
    pub fn altitude_km(&self) -> f64 {
        if self.landed { 0.0 } else { self.cruise_altitude_km }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::KILOMETERS_PER_DEGREE;

    // One 10-degree equatorial leg flown in exactly one hour.
    fn one_hour_flight() -> FlightInfo {
        FlightInfo::new(
            7,
            "FM-101".into(),
            "Lisbon".into(),
            "Accra".into(),
            10.0 * KILOMETERS_PER_DEGREE,
            11.0,
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0)],
            0.0,
        )
    }

    #[test]
    fn advancing_moves_the_plane_along_the_route() {
        let mut flight = one_hour_flight();
        flight.advance(0.5);
        assert!((flight.position().longitude - 5.0).abs() < 1e-9);
        assert!(!flight.landed());
        assert!(flight.speed_kmh() > 0.0);
        assert!((flight.altitude_km() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn overshooting_the_total_lands_at_the_destination() {
        let mut flight = one_hour_flight();
        flight.advance(0.5);
        flight.advance(0.6);
        assert!(flight.landed());
        assert_eq!(flight.position(), GeoPoint::new(0.0, 10.0));
        assert_eq!(flight.speed_kmh(), 0.0);
        assert_eq!(flight.altitude_km(), 0.0);
    }

    #[test]
    fn advance_after_landing_is_a_no_op() {
        let mut flight = one_hour_flight();
        flight.advance(2.0);
        assert!(flight.landed());
        let elapsed = flight.current_flight_time();
        flight.advance(1.0);
        assert_eq!(flight.current_flight_time(), elapsed);
        assert_eq!(flight.position(), GeoPoint::new(0.0, 10.0));
    }

    #[test]
    fn total_flight_time_delegates_to_the_route() {
        let mut flight = one_hour_flight();
        assert!((flight.total_flight_time() - 1.0).abs() < 1e-9);
        // Landing flips exactly when elapsed reaches the total.
        flight.set_current_flight_time(flight.total_flight_time());
        assert!(flight.landed());

        flight.rebuild_trajectory(
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 20.0)],
            10.0 * KILOMETERS_PER_DEGREE,
        );
        assert!((flight.total_flight_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scrubbing_back_unlands_the_flight() {
        let mut flight = one_hour_flight();
        flight.advance(2.0);
        assert!(flight.landed());
        flight.set_current_flight_time(0.25);
        assert!(!flight.landed());
        assert!((flight.position().longitude - 2.5).abs() < 1e-9);
    }

    #[test]
    fn initial_flight_time_is_applied_at_construction() {
        let flight = FlightInfo::new(
            3,
            "FM-202".into(),
            "A".into(),
            "B".into(),
            10.0 * KILOMETERS_PER_DEGREE,
            10.0,
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0)],
            0.5,
        );
        assert!((flight.position().longitude - 5.0).abs() < 1e-9);
        assert!(!flight.landed());
    }

    #[test]
    fn empty_route_is_immediately_landed() {
        let flight = FlightInfo::new(
            1, "FM-0".into(), "A".into(), "A".into(), 800.0, 10.0, &[], 0.0,
        );
        assert!(flight.landed());
        assert_eq!(flight.position(), GeoPoint::default());
    }

    #[test]
    fn rebuilding_the_route_rederives_state_from_kept_elapsed_time() {
        let mut flight = one_hour_flight();
        flight.advance(0.9);
        flight.rebuild_trajectory(
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 20.0)],
            10.0 * KILOMETERS_PER_DEGREE,
        );
        // Same elapsed 0.9 h against a 2 h route: airborne at 9°E.
        assert!(!flight.landed());
        assert!((flight.position().longitude - 9.0).abs() < 1e-9);
    }
}
