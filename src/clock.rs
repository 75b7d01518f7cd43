//! Simulation clocks.
//!
//! `FlightClockDriver` turns wall-clock ticks into scaled simulated hours and
//! pushes them into every flight. `TerminatorClock` keeps the instant the
//! terminator is drawn for, either free-running in big steady steps or
//! scrubbed manually in half-hour increments.

use chrono::{DateTime, Duration, Utc};

use crate::flight::FlightInfo;

pub const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;

/// Manual scrub increment for the terminator instant, in hours.
pub const DISCRETE_HOURS_STEP: f64 = 0.5;
/// Steady-mode increment per tick, in hours. Deliberately not a whole number
/// of days so the terminator visibly drifts instead of repeating.
pub const STEADY_HOURS_STEP: f64 = 24.5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum DriverState {
    Running,
    Stopped,
}

/// Advances a fleet of flights from wall-clock ticks. One simulated hour
/// passes per `speed_scale` milliseconds-worth of wall time divided by an
/// hour; at scale 1.0 the simulation runs in real time.
pub struct FlightClockDriver {
    flights: Vec<FlightInfo>,
    last_tick: DateTime<Utc>,
    speed_scale: f64,
    state: DriverState,
}

impl FlightClockDriver {
    pub fn new(flights: Vec<FlightInfo>, now: DateTime<Utc>) -> Self {
        Self {
            flights,
            last_tick: now,
            speed_scale: 1.0,
            state: DriverState::Running,
        }
    }

    /// Applies the wall time elapsed since the previous tick, scaled, to
    /// every flight. Ignored after shutdown.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.state == DriverState::Stopped {
            return;
        }
        let wall_ms = (now - self.last_tick).num_milliseconds() as f64;
        self.last_tick = now;
        let elapsed_hours = self.speed_scale * wall_ms / MILLISECONDS_PER_HOUR;
        for flight in &mut self.flights {
            flight.advance(elapsed_hours);
        }
    }

    /// Takes effect from the next tick onward; time already applied at the
    /// old scale is not revisited.
    pub fn set_speed_scale(&mut self, scale: f64) {
        self.speed_scale = scale;
    }

    pub fn speed_scale(&self) -> f64 {
        self.speed_scale
    }

    /// One-way teardown. Subsequent ticks are no-ops.
    pub fn shutdown(&mut self) {
        self.state = DriverState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn flights(&self) -> &[FlightInfo] {
        &self.flights
    }

    pub fn flights_mut(&mut self) -> &mut [FlightInfo] {
        &mut self.flights
    }
}

/// The instant the day/night terminator is computed for. Steady mode jumps
/// a large fixed step each tick; any manual adjustment drops out of steady
/// mode so the scrubbed instant stays put.
pub struct TerminatorClock {
    instant: DateTime<Utc>,
    steady: bool,
}

impl TerminatorClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant, steady: true }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn is_steady(&self) -> bool {
        self.steady
    }

    pub fn set_steady(&mut self, steady: bool) {
        self.steady = steady;
    }

    /// Periodic driver hook: advances only while in steady mode.
    pub fn tick(&mut self) {
        if self.steady {
            self.instant += hours(STEADY_HOURS_STEP);
        }
    }

    pub fn step_forward(&mut self) {
        self.advance_instant(DISCRETE_HOURS_STEP);
    }

    pub fn step_backward(&mut self) {
        self.advance_instant(-DISCRETE_HOURS_STEP);
    }

    /// Manual scrub by a signed number of hours; leaves steady mode.
    pub fn advance_instant(&mut self, hours_delta: f64) {
        self.steady = false;
        self.instant += hours(hours_delta);
    }

    /// Snaps to the given wall-clock instant; leaves steady mode.
    pub fn jump_to_now(&mut self, now: DateTime<Utc>) {
        self.steady = false;
        self.instant = now;
    }
}

fn hours(h: f64) -> Duration {
    Duration::milliseconds((h * MILLISECONDS_PER_HOUR).round() as i64)
}
