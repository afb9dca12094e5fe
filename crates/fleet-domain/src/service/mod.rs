//! Domain services

pub mod access;
pub mod records;
pub mod views;

pub use access::{authorize, is_allowed};
pub use records::{delete_part, delete_vehicle, upsert_part, upsert_vehicle, upsert_vehicle_at};
pub use views::{FleetSummary, PartFilter, VehicleFilter};
