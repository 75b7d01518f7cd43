//! Flight-plan document loading.
//!
//! Parses the plan document that seeds the simulation: one entry per plane
//! with its display metadata, cruise parameters, optional head-start elapsed
//! time, and waypoint path. This is the crate's input boundary, so the
//! preconditions the engine relies on (notably a positive speed) are checked
//! here and surfaced as errors instead of propagating into the math.

use serde_json::Value;

use crate::flight::FlightInfo;
use crate::geo::GeoPoint;

/// One plane's plan as loaded from the document, before it becomes a live
/// [`FlightInfo`].
#[derive(Clone, Debug)]
pub struct FlightPlan {
    pub plane_id: u32,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub speed_kmh: f64,
    pub cruise_altitude_km: f64,
    pub initial_flight_time: f64,
    pub waypoints: Vec<GeoPoint>,
}

impl FlightPlan {
    pub fn into_flight(self) -> FlightInfo {
        FlightInfo::new(
            self.plane_id,
            self.name,
            self.origin,
            self.destination,
            self.speed_kmh,
            self.cruise_altitude_km,
            &self.waypoints,
            self.initial_flight_time,
        )
    }
}

/// Parses a plan document of the form
/// `{"planes": [{"id", "name", "origin", "destination", "speed_kmh",
/// "altitude_km", "current_flight_time", "path": [{"lat", "lon"}, ...]}]}`.
pub fn parse_flight_plans(json: &str) -> Result<Vec<FlightPlan>, String> {
    let v: Value = serde_json::from_str(json).map_err(|e| format!("{}", e))?;
    let planes = v["planes"].as_array().ok_or("no planes")?;
    let mut plans = Vec::with_capacity(planes.len());
    for plane in planes {
        let name = plane["name"].as_str().unwrap_or("").to_string();
        let speed_kmh = plane["speed_kmh"].as_f64().unwrap_or(0.0);
        if speed_kmh <= 0.0 {
            return Err(format!("plane {:?}: speed must be positive", name));
        }
        plans.push(FlightPlan {
            plane_id: plane["id"].as_u64().unwrap_or(0) as u32,
            name,
            origin: plane["origin"].as_str().unwrap_or("").to_string(),
            destination: plane["destination"].as_str().unwrap_or("").to_string(),
            speed_kmh,
            cruise_altitude_km: plane["altitude_km"].as_f64().unwrap_or(0.0),
            initial_flight_time: plane["current_flight_time"].as_f64().unwrap_or(0.0),
            waypoints: extract_path(&plane["path"]),
        });
    }
    Ok(plans)
}

fn extract_path(arr: &Value) -> Vec<GeoPoint> {
    arr.as_array()
        .map(|points| {
            points
                .iter()
                .filter_map(|p| Some(GeoPoint::new(p["lat"].as_f64()?, p["lon"].as_f64()?)))
                .collect()
        })
        .unwrap_or_default()
}
