//! Record types for vehicles, installed parts and the persisted state

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Deserialize null as default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize)]
pub enum VehicleType {
    Car,
    Truck,
    Bus,
    Equipment,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Truck,
        VehicleType::Bus,
        VehicleType::Equipment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Truck => "Truck",
            VehicleType::Bus => "Bus",
            VehicleType::Equipment => "Equipment",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown vehicle type: {}", s))
    }
}

/// Part category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize)]
pub enum PartCategory {
    Engine,
    Electrical,
    Body,
    Tyre,
    Other,
}

impl PartCategory {
    pub const ALL: [PartCategory; 5] = [
        PartCategory::Engine,
        PartCategory::Electrical,
        PartCategory::Body,
        PartCategory::Tyre,
        PartCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PartCategory::Engine => "Engine",
            PartCategory::Electrical => "Electrical",
            PartCategory::Body => "Body",
            PartCategory::Tyre => "Tyre",
            PartCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown part category: {}", s))
    }
}

/// Registered fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier, never changes after creation
    pub id: String,
    /// Fleet number painted on the vehicle (e.g., "TRK-014")
    pub vehicle_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    /// Photo as a `data:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Refreshed on every edit
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        vehicle_number: String,
        vehicle_type: VehicleType,
        brand: String,
        model: String,
        year: u16,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_number,
            vehicle_type,
            brand,
            model,
            year,
            chassis_number: None,
            photo: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_chassis_number(mut self, chassis_number: String) -> Self {
        self.chassis_number = Some(chassis_number);
        self
    }

    pub fn with_photo(mut self, photo: String) -> Self {
        self.photo = Some(photo);
        self
    }

    /// "Brand Model (Year)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// Maintenance part installed on a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    /// Owning vehicle (`Vehicle::id`)
    pub vehicle_id: String,
    pub item_number: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub third_item_number: String,
    pub item_description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description_line2: String,
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub supplier_name: String,
    pub installed_date: NaiveDate,
    pub category: PartCategory,
}

impl Part {
    pub fn new(
        vehicle_id: String,
        item_number: String,
        item_description: String,
        quantity: u32,
        installed_date: NaiveDate,
        category: PartCategory,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_id,
            item_number,
            third_item_number: String::new(),
            item_description,
            description_line2: String::new(),
            quantity,
            supplier_name: String::new(),
            installed_date,
            category,
        }
    }

    pub fn with_third_item_number(mut self, third_item_number: String) -> Self {
        self.third_item_number = third_item_number;
        self
    }

    pub fn with_description_line2(mut self, line: String) -> Self {
        self.description_line2 = line;
        self
    }

    pub fn with_supplier(mut self, supplier_name: String) -> Self {
        self.supplier_name = supplier_name;
        self
    }
}

/// Full application state, persisted as a single blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Acting role for the browsing and editing surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Technician,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Technician => write!(f, "technician"),
        }
    }
}

/// Operations subject to role gating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Browse,
    CreateVehicle,
    EditVehicle,
    DeleteVehicle,
    CreatePart,
    EditPart,
    DeletePart,
    ResetData,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::Browse => "browse records",
            Action::CreateVehicle => "create vehicles",
            Action::EditVehicle => "edit vehicles",
            Action::DeleteVehicle => "delete vehicles",
            Action::CreatePart => "create parts",
            Action::EditPart => "edit parts",
            Action::DeletePart => "delete parts",
            Action::ResetData => "reset data",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_serializes_camel_case() {
        let vehicle = Vehicle::new(
            "TRK-001".to_string(),
            VehicleType::Truck,
            "Isuzu".to_string(),
            "Giga".to_string(),
            2019,
        );
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["vehicleNumber"], "TRK-001");
        assert_eq!(json["type"], "Truck");
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("chassisNumber").is_none());
    }

    #[test]
    fn test_part_accepts_null_text_fields() {
        let json = r#"{
            "id": "p1",
            "vehicleId": "v1",
            "itemNumber": "OF-220",
            "thirdItemNumber": null,
            "itemDescription": "Oil filter",
            "descriptionLine2": null,
            "quantity": 2,
            "supplierName": null,
            "installedDate": "2024-03-01",
            "category": "Engine"
        }"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert_eq!(part.third_item_number, "");
        assert_eq!(part.supplier_name, "");
        assert_eq!(part.category, PartCategory::Engine);
    }

    #[test]
    fn test_enum_from_str_ignores_case() {
        assert_eq!("tyre".parse::<PartCategory>(), Ok(PartCategory::Tyre));
        assert_eq!(" BUS ".parse::<VehicleType>(), Ok(VehicleType::Bus));
        assert!("boat".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_role_defaults_to_technician() {
        assert_eq!(Role::default(), Role::Technician);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
