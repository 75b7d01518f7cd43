//! Core engine for a live world map: the day/night terminator polygon and a
//! fleet of flights moving along timed piecewise-linear trajectories.
//!
//! The crate is pure computation. A host application owns the timers, the
//! map widget and any document I/O; it hands this crate wall-clock instants
//! and plan documents and draws whatever comes back.

pub mod clock;
pub mod flight;
pub mod geo;
pub mod plan;
pub mod solar;
pub mod terminator;
pub mod trajectory;

pub use clock::{FlightClockDriver, TerminatorClock};
pub use flight::FlightInfo;
pub use geo::{GeoPoint, Projection, SphericalMercator};
pub use plan::{parse_flight_plans, FlightPlan};
pub use solar::{sub_solar_position, SolarPosition};
pub use terminator::{sub_lunar_point, sub_solar_point, terminator_polygon, TerminatorState};
pub use trajectory::{Trajectory, TrajectorySegment};
