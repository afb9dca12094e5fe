//! CSV import of installed parts
//!
//! Expected CSV header:
//! vehicleNumber,itemNumber,thirdItemNumber,itemDescription,descriptionLine2,quantity,supplierName,installedDate,category
//!
//! Rows are attached to vehicles by fleet number. Rows that cannot be
//! matched or parsed are reported and skipped.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use fleet_domain::views::find_vehicle_by_number;
use fleet_types::{AppState, Error, Part, PartCategory, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartRow {
    vehicle_number: String,
    item_number: String,
    #[serde(default)]
    third_item_number: String,
    item_description: String,
    #[serde(default)]
    description_line2: String,
    quantity: u32,
    #[serde(default)]
    supplier_name: String,
    installed_date: String,
    category: String,
}

/// A row that was left out of the import
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the file, header included
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub parts: Vec<Part>,
    pub skipped: Vec<SkippedRow>,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid installed date: {}", value))
}

fn row_to_part(state: &AppState, row: PartRow) -> std::result::Result<Part, String> {
    let vehicle = find_vehicle_by_number(state, &row.vehicle_number)
        .ok_or_else(|| format!("unknown vehicle number: {}", row.vehicle_number))?;
    let installed_date = parse_date(&row.installed_date)?;
    let category: PartCategory = row.category.parse()?;

    if row.item_number.trim().is_empty() {
        return Err("item number is empty".to_string());
    }

    Ok(Part::new(
        vehicle.id.clone(),
        row.item_number,
        row.item_description,
        row.quantity,
        installed_date,
        category,
    )
    .with_third_item_number(row.third_item_number)
    .with_description_line2(row.description_line2)
    .with_supplier(row.supplier_name))
}

/// Parse parts from CSV text, matching rows against vehicles in `state`
pub fn read_parts_csv<R: Read>(reader: R, state: &AppState) -> Result<ImportReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["vehicleNumber", "itemNumber", "itemDescription", "quantity", "installedDate", "category"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::Import(format!("missing required column: {}", required)));
        }
    }

    let mut report = ImportReport::default();
    for (index, row) in csv_reader.deserialize::<PartRow>().enumerate() {
        let line = index + 2;
        let outcome = row
            .map_err(|e| e.to_string())
            .and_then(|row| row_to_part(state, row));
        match outcome {
            Ok(part) => report.parts.push(part),
            Err(reason) => report.skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(report)
}

/// Parse parts from a CSV file
pub fn load_parts_csv(path: &Path, state: &AppState) -> Result<ImportReport> {
    if !path.exists() {
        return Err(Error::NotFound(format!("CSV file {}", path.display())));
    }
    let file = std::fs::File::open(path)?;
    read_parts_csv(file, state)
}
