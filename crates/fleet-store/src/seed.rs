//! Built-in dataset used on first run

use chrono::{DateTime, NaiveDate, Utc};
use fleet_types::{AppState, Part, PartCategory, Vehicle, VehicleType};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Two vehicles with one installed part each
pub fn seed_state() -> AppState {
    let vehicles = vec![
        Vehicle {
            id: "v1".to_string(),
            vehicle_number: "TRK-001".to_string(),
            vehicle_type: VehicleType::Truck,
            brand: "Isuzu".to_string(),
            model: "Giga".to_string(),
            year: 2019,
            chassis_number: Some("JALC4W16-7001234".to_string()),
            photo: None,
            updated_at: timestamp(1_704_067_200),
        },
        Vehicle {
            id: "v2".to_string(),
            vehicle_number: "BUS-014".to_string(),
            vehicle_type: VehicleType::Bus,
            brand: "Hino".to_string(),
            model: "Blue Ribbon".to_string(),
            year: 2021,
            chassis_number: None,
            photo: None,
            updated_at: timestamp(1_704_153_600),
        },
    ];

    let parts = vec![
        Part {
            id: "p1".to_string(),
            vehicle_id: "v1".to_string(),
            item_number: "OF-220".to_string(),
            third_item_number: "7-1234-55".to_string(),
            item_description: "Oil filter element".to_string(),
            description_line2: "Spin-on, 10 micron".to_string(),
            quantity: 2,
            supplier_name: "Northern Truck Parts".to_string(),
            installed_date: date(2024, 2, 12),
            category: PartCategory::Engine,
        },
        Part {
            id: "p2".to_string(),
            vehicle_id: "v2".to_string(),
            item_number: "TY-295-80".to_string(),
            third_item_number: String::new(),
            item_description: "Steer tyre 295/80R22.5".to_string(),
            description_line2: "Front axle".to_string(),
            quantity: 2,
            supplier_name: "RoadGrip Tyres".to_string(),
            installed_date: date(2024, 3, 4),
            category: PartCategory::Tyre,
        },
    ];

    AppState { vehicles, parts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let state = seed_state();
        assert_eq!(state.vehicles.len(), 2);
        assert_eq!(state.parts.len(), 2);
    }

    #[test]
    fn test_seed_parts_reference_seed_vehicles() {
        let state = seed_state();
        for part in &state.parts {
            assert!(state.vehicles.iter().any(|v| v.id == part.vehicle_id));
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(seed_state(), seed_state());
    }
}
