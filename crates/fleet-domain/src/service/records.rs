//! Create, update and delete transforms over the application state

use chrono::{DateTime, Utc};
use fleet_types::{AppState, DomainError, Part, Vehicle};

/// Insert or replace a vehicle keyed by id, stamping `updated_at` with now.
///
/// An existing vehicle keeps its position; a new one is appended.
pub fn upsert_vehicle(state: AppState, vehicle: Vehicle) -> AppState {
    upsert_vehicle_at(state, vehicle, Utc::now())
}

/// Same as [`upsert_vehicle`] with an explicit timestamp
pub fn upsert_vehicle_at(mut state: AppState, mut vehicle: Vehicle, now: DateTime<Utc>) -> AppState {
    vehicle.updated_at = now;
    match state.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
        Some(existing) => *existing = vehicle,
        None => state.vehicles.push(vehicle),
    }
    state
}

/// Remove a vehicle together with every part installed on it
pub fn delete_vehicle(mut state: AppState, id: &str) -> AppState {
    state.vehicles.retain(|v| v.id != id);
    state.parts.retain(|p| p.vehicle_id != id);
    state
}

/// Insert or replace a part keyed by id.
///
/// The owning vehicle must exist in `state`.
pub fn upsert_part(mut state: AppState, part: Part) -> Result<AppState, DomainError> {
    if !state.vehicles.iter().any(|v| v.id == part.vehicle_id) {
        return Err(DomainError::UnknownVehicle(part.vehicle_id));
    }
    match state.parts.iter_mut().find(|p| p.id == part.id) {
        Some(existing) => *existing = part,
        None => state.parts.push(part),
    }
    Ok(state)
}

/// Remove a single part
pub fn delete_part(mut state: AppState, id: &str) -> AppState {
    state.parts.retain(|p| p.id != id);
    state
}
