//! Timed piecewise-linear flight paths.
//!
//! A trajectory is a chain of segments between consecutive waypoints. Each
//! segment knows how long it takes to fly at the flight's speed, measured in
//! planar kilometers at the segment's start, so querying a position reduces
//! to walking segments until the remaining time fits inside one.

use crate::geo::{GeoPoint, Projection, SphericalMercator};

/// One leg between two waypoints, with its flight duration in hours and the
/// constant course flown along it.
#[derive(Clone, Copy, Debug)]
pub struct TrajectorySegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Hours to fly this leg. Infinite when the speed is zero, which keeps
    /// the position query pinned to the segment start.
    pub flight_time: f64,
    /// Degrees clockwise from north, from atan2 of the coordinate deltas.
    pub course: f64,
}

impl TrajectorySegment {
    fn new(start: GeoPoint, end: GeoPoint, speed_kmh: f64, projection: &impl Projection) -> Self {
        let distance = projection.distance_km(start, end);
        let flight_time = distance / speed_kmh;
        let course = (end.longitude - start.longitude)
            .atan2(end.latitude - start.latitude)
            .to_degrees();
        Self { start, end, flight_time, course }
    }

    /// Position after flying this segment for `elapsed` hours. Clamps to the
    /// end once the duration is reached; the `>=` also covers zero-length
    /// segments, where 0/0 would otherwise poison the interpolation.
    pub fn point_at(&self, elapsed: f64) -> GeoPoint {
        if elapsed >= self.flight_time {
            return self.end;
        }
        let fraction = elapsed / self.flight_time;
        GeoPoint::new(
            self.start.latitude + (self.end.latitude - self.start.latitude) * fraction,
            self.start.longitude + (self.end.longitude - self.start.longitude) * fraction,
        )
    }
}

/// Piecewise-linear path with timing. Rebuilt wholesale when the waypoint
/// list changes; queries never mutate it.
pub struct Trajectory {
    segments: Vec<TrajectorySegment>,
    /// Where a degenerate (zero-segment) trajectory sits: the lone waypoint
    /// when one was given, the default origin otherwise.
    resting_point: GeoPoint,
    projection: SphericalMercator,
}

impl Trajectory {
    pub fn new(waypoints: &[GeoPoint], speed_kmh: f64) -> Self {
        let mut trajectory = Self {
            segments: Vec::new(),
            resting_point: GeoPoint::default(),
            projection: SphericalMercator,
        };
        trajectory.rebuild(waypoints, speed_kmh);
        trajectory
    }

    /// Replaces every segment from the new waypoint list. Fewer than two
    /// waypoints leaves the trajectory empty.
    pub fn rebuild(&mut self, waypoints: &[GeoPoint], speed_kmh: f64) {
        self.segments.clear();
        self.resting_point = waypoints.first().copied().unwrap_or_default();
        for pair in waypoints.windows(2) {
            self.segments
                .push(TrajectorySegment::new(pair[0], pair[1], speed_kmh, &self.projection));
        }
    }

    pub fn segments(&self) -> &[TrajectorySegment] {
        &self.segments
    }

    pub fn total_flight_time(&self) -> f64 {
        self.segments.iter().map(|s| s.flight_time).sum()
    }

    pub fn start_point(&self) -> GeoPoint {
        self.segments.first().map_or(self.resting_point, |s| s.start)
    }

    pub fn end_point(&self) -> GeoPoint {
        self.segments.last().map_or(self.resting_point, |s| s.end)
    }

    /// Waypoint list snapshot, segment starts plus the final end. A caller
    /// drawing the route swaps this out whole rather than editing in place.
    pub fn path_points(&self) -> Vec<GeoPoint> {
        let mut points: Vec<GeoPoint> = self.segments.iter().map(|s| s.start).collect();
        if let Some(last) = self.segments.last() {
            points.push(last.end);
        }
        points
    }

    /// Position after `elapsed` hours from departure. Before departure means
    /// the start; past the total means the final destination; a degenerate
    /// trajectory always yields its resting point.
    pub fn position_at(&self, elapsed: f64) -> GeoPoint {
        match self.segment_at(elapsed) {
            Some((segment, into_segment)) => segment.point_at(into_segment),
            None => self.resting_point,
        }
    }

    /// Course flown at `elapsed` hours: the containing segment's constant
    /// course, the last segment's once landed, 0 when empty.
    pub fn course_at(&self, elapsed: f64) -> f64 {
        self.segment_at(elapsed).map(|(s, _)| s.course).unwrap_or(0.0)
    }

    /// The segment containing `elapsed` and the time already spent inside
    /// it. The last segment absorbs everything past the total, so callers
    /// get the clamped destination for free.
    fn segment_at(&self, elapsed: f64) -> Option<(&TrajectorySegment, f64)> {
        let (last, earlier) = self.segments.split_last()?;
        let mut remaining = elapsed.max(0.0);
        for segment in earlier {
            if segment.flight_time > remaining {
                return Some((segment, remaining));
            }
            remaining -= segment.flight_time;
        }
        Some((last, remaining))
    }
}
