//! Filtered, read-only views over vehicles and parts
//!
//! Filters never reorder: results follow the order of `AppState`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fleet_types::{AppState, Part, PartCategory, Vehicle, VehicleType};
use serde::Serialize;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn normalized_query(query: &Option<String>) -> Option<String> {
    query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

/// Vehicle search criteria
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    /// Matched against number, brand, model and chassis number
    pub query: Option<String>,
    pub vehicle_type: Option<VehicleType>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(t) = self.vehicle_type {
            if vehicle.vehicle_type != t {
                return false;
            }
        }
        match normalized_query(&self.query) {
            Some(q) => {
                contains_ci(&vehicle.vehicle_number, &q)
                    || contains_ci(&vehicle.brand, &q)
                    || contains_ci(&vehicle.model, &q)
                    || vehicle
                        .chassis_number
                        .as_deref()
                        .map(|c| contains_ci(c, &q))
                        .unwrap_or(false)
            }
            None => true,
        }
    }

    pub fn apply<'a>(&self, state: &'a AppState) -> Vec<&'a Vehicle> {
        state.vehicles.iter().filter(|v| self.matches(v)).collect()
    }
}

/// Part search criteria
#[derive(Debug, Clone, Default)]
pub struct PartFilter {
    pub vehicle_id: Option<String>,
    /// Matched against item numbers, description lines and supplier
    pub query: Option<String>,
    pub category: Option<PartCategory>,
}

impl PartFilter {
    pub fn for_vehicle(vehicle_id: &str) -> Self {
        Self {
            vehicle_id: Some(vehicle_id.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, part: &Part) -> bool {
        if let Some(ref id) = self.vehicle_id {
            if &part.vehicle_id != id {
                return false;
            }
        }
        if let Some(c) = self.category {
            if part.category != c {
                return false;
            }
        }
        match normalized_query(&self.query) {
            Some(q) => [
                &part.item_number,
                &part.third_item_number,
                &part.item_description,
                &part.description_line2,
                &part.supplier_name,
            ]
            .iter()
            .any(|field| contains_ci(field, &q)),
            None => true,
        }
    }

    pub fn apply<'a>(&self, state: &'a AppState) -> Vec<&'a Part> {
        state.parts.iter().filter(|p| self.matches(p)).collect()
    }
}

pub fn find_vehicle<'a>(state: &'a AppState, id: &str) -> Option<&'a Vehicle> {
    state.vehicles.iter().find(|v| v.id == id)
}

pub fn find_part<'a>(state: &'a AppState, id: &str) -> Option<&'a Part> {
    state.parts.iter().find(|p| p.id == id)
}

/// Find a vehicle by its fleet number (case-insensitive, trimmed)
pub fn find_vehicle_by_number<'a>(state: &'a AppState, number: &str) -> Option<&'a Vehicle> {
    let number = number.trim();
    state
        .vehicles
        .iter()
        .find(|v| v.vehicle_number.trim().eq_ignore_ascii_case(number))
}

pub fn parts_for_vehicle<'a>(state: &'a AppState, vehicle_id: &str) -> Vec<&'a Part> {
    PartFilter::for_vehicle(vehicle_id).apply(state)
}

/// Dashboard counts over the whole register
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub vehicle_count: usize,
    pub part_count: usize,
    pub total_quantity: u64,
    /// Every type is present, zero counts included; keyed in declaration order
    pub vehicles_by_type: BTreeMap<VehicleType, usize>,
    pub parts_by_category: BTreeMap<PartCategory, usize>,
    pub last_updated_vehicle: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl FleetSummary {
    pub fn from_state(state: &AppState) -> Self {
        let vehicles_by_type = VehicleType::ALL
            .into_iter()
            .map(|t| (t, state.vehicles.iter().filter(|v| v.vehicle_type == t).count()))
            .collect();
        let parts_by_category = PartCategory::ALL
            .into_iter()
            .map(|c| (c, state.parts.iter().filter(|p| p.category == c).count()))
            .collect();
        let latest = state.vehicles.iter().max_by_key(|v| v.updated_at);

        Self {
            vehicle_count: state.vehicles.len(),
            part_count: state.parts.len(),
            total_quantity: state.parts.iter().map(|p| u64::from(p.quantity)).sum(),
            vehicles_by_type,
            parts_by_category,
            last_updated_vehicle: latest.map(|v| v.vehicle_number.clone()),
            last_updated_at: latest.map(|v| v.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state() -> AppState {
        let mut truck = Vehicle::new(
            "TRK-7".to_string(),
            VehicleType::Truck,
            "Volvo".to_string(),
            "FH16".to_string(),
            2020,
        )
        .with_chassis_number("YV2RT40A".to_string());
        truck.id = "t".to_string();
        truck.updated_at = DateTime::from_timestamp(100, 0).unwrap();

        let mut car = Vehicle::new(
            "CAR-2".to_string(),
            VehicleType::Car,
            "Toyota".to_string(),
            "Hilux".to_string(),
            2022,
        );
        car.id = "c".to_string();
        car.updated_at = DateTime::from_timestamp(200, 0).unwrap();

        let installed = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let mut filter = Part::new(
            "t".to_string(),
            "AF-10".to_string(),
            "Air filter".to_string(),
            1,
            installed,
            PartCategory::Engine,
        )
        .with_supplier("Volvo Parts".to_string());
        filter.id = "p1".to_string();
        let mut tyre = Part::new(
            "c".to_string(),
            "TY-1".to_string(),
            "All terrain tyre".to_string(),
            4,
            installed,
            PartCategory::Tyre,
        );
        tyre.id = "p2".to_string();
        let mut lamp = Part::new(
            "t".to_string(),
            "LMP-3".to_string(),
            "Head lamp".to_string(),
            2,
            installed,
            PartCategory::Electrical,
        )
        .with_description_line2("LED, left".to_string());
        lamp.id = "p3".to_string();

        AppState {
            vehicles: vec![truck, car],
            parts: vec![filter, tyre, lamp],
        }
    }

    #[test]
    fn test_vehicle_query_is_case_insensitive() {
        let state = state();
        let filter = VehicleFilter {
            query: Some("volvo".to_string()),
            ..Default::default()
        };
        let found = filter.apply(&state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "t");
    }

    #[test]
    fn test_vehicle_query_matches_chassis() {
        let state = state();
        let filter = VehicleFilter {
            query: Some("yv2rt".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&state).len(), 1);
    }

    #[test]
    fn test_vehicle_type_filter_and_blank_query() {
        let state = state();
        let filter = VehicleFilter {
            query: Some("   ".to_string()),
            vehicle_type: Some(VehicleType::Car),
        };
        let found = filter.apply(&state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].vehicle_number, "CAR-2");
    }

    #[test]
    fn test_parts_for_vehicle_keeps_order() {
        let state = state();
        let ids: Vec<_> = parts_for_vehicle(&state, "t").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);
    }

    #[test]
    fn test_part_filter_combines_criteria() {
        let state = state();
        let filter = PartFilter {
            vehicle_id: Some("t".to_string()),
            query: Some("led".to_string()),
            category: Some(PartCategory::Electrical),
        };
        let found = filter.apply(&state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p3");

        let by_supplier = PartFilter {
            query: Some("VOLVO PARTS".to_string()),
            ..Default::default()
        };
        assert_eq!(by_supplier.apply(&state).len(), 1);
    }

    #[test]
    fn test_find_vehicle_by_number() {
        let state = state();
        assert_eq!(find_vehicle_by_number(&state, " trk-7 ").map(|v| v.id.as_str()), Some("t"));
        assert!(find_vehicle_by_number(&state, "TRK-8").is_none());
    }

    #[test]
    fn test_summary() {
        let summary = FleetSummary::from_state(&state());
        assert_eq!(summary.vehicle_count, 2);
        assert_eq!(summary.part_count, 3);
        assert_eq!(summary.total_quantity, 7);
        assert_eq!(summary.vehicles_by_type[&VehicleType::Truck], 1);
        assert_eq!(summary.vehicles_by_type[&VehicleType::Bus], 0);
        assert_eq!(summary.parts_by_category[&PartCategory::Tyre], 1);
        assert_eq!(summary.last_updated_vehicle.as_deref(), Some("CAR-2"));
    }

    #[test]
    fn test_summary_of_empty_state() {
        let summary = FleetSummary::from_state(&AppState::default());
        assert_eq!(summary.vehicle_count, 0);
        assert!(summary.last_updated_at.is_none());
    }

    #[test]
    fn test_summary_json_uses_named_counts() {
        let json = serde_json::to_value(FleetSummary::from_state(&state())).unwrap();
        assert_eq!(json["vehiclesByType"]["Truck"], 1);
        assert_eq!(json["vehiclesByType"]["Equipment"], 0);
        assert_eq!(json["partsByCategory"]["Electrical"], 1);
        assert_eq!(json["totalQuantity"], 7);
    }
}
