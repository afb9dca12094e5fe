//! Excel export functionality

use std::path::Path;

use fleet_domain::views::{find_vehicle, FleetSummary};
use fleet_types::{AppState, Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

fn xlsx(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the register to an Excel workbook (Summary, Vehicles, Parts)
pub fn export_to_excel(state: &AppState, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, state)?;

    let vehicles_sheet = workbook.add_worksheet();
    write_vehicles_sheet(vehicles_sheet, state)?;

    let parts_sheet = workbook.add_worksheet();
    write_parts_sheet(parts_sheet, state)?;

    workbook.save(output_path).map_err(xlsx)?;

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx)?;
    }
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, state: &AppState) -> Result<()> {
    sheet.set_name("Summary").map_err(xlsx)?;

    let header_format = Format::new().set_bold();
    let summary = FleetSummary::from_state(state);

    sheet
        .write_string_with_format(0, 0, "Fleet Register Report", &header_format)
        .map_err(xlsx)?;

    sheet.write_string(2, 0, "Vehicles:").map_err(xlsx)?;
    sheet
        .write_number(2, 1, summary.vehicle_count as f64)
        .map_err(xlsx)?;
    sheet.write_string(3, 0, "Parts:").map_err(xlsx)?;
    sheet
        .write_number(3, 1, summary.part_count as f64)
        .map_err(xlsx)?;
    sheet.write_string(4, 0, "Installed quantity:").map_err(xlsx)?;
    sheet
        .write_number(4, 1, summary.total_quantity as f64)
        .map_err(xlsx)?;

    sheet
        .write_string_with_format(6, 0, "Vehicles by Type", &header_format)
        .map_err(xlsx)?;
    let mut row = 7;
    for (vehicle_type, count) in &summary.vehicles_by_type {
        sheet.write_string(row, 0, vehicle_type.label()).map_err(xlsx)?;
        sheet.write_number(row, 1, *count as f64).map_err(xlsx)?;
        row += 1;
    }

    row += 1;
    sheet
        .write_string_with_format(row, 0, "Parts by Category", &header_format)
        .map_err(xlsx)?;
    row += 1;
    for (category, count) in &summary.parts_by_category {
        sheet.write_string(row, 0, category.label()).map_err(xlsx)?;
        sheet.write_number(row, 1, *count as f64).map_err(xlsx)?;
        row += 1;
    }

    sheet.set_column_width(0, 22).map_err(xlsx)?;

    Ok(())
}

fn write_vehicles_sheet(sheet: &mut Worksheet, state: &AppState) -> Result<()> {
    sheet.set_name("Vehicles").map_err(xlsx)?;

    write_headers(
        sheet,
        &[
            "Vehicle No.",
            "Type",
            "Brand",
            "Model",
            "Year",
            "Chassis No.",
            "Parts",
            "Updated",
        ],
    )?;

    for (row_idx, vehicle) in state.vehicles.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let part_count = state
            .parts
            .iter()
            .filter(|p| p.vehicle_id == vehicle.id)
            .count();

        sheet.write_string(row, 0, &vehicle.vehicle_number).map_err(xlsx)?;
        sheet.write_string(row, 1, vehicle.vehicle_type.label()).map_err(xlsx)?;
        sheet.write_string(row, 2, &vehicle.brand).map_err(xlsx)?;
        sheet.write_string(row, 3, &vehicle.model).map_err(xlsx)?;
        sheet.write_number(row, 4, f64::from(vehicle.year)).map_err(xlsx)?;
        if let Some(ref chassis) = vehicle.chassis_number {
            sheet.write_string(row, 5, chassis).map_err(xlsx)?;
        }
        sheet.write_number(row, 6, part_count as f64).map_err(xlsx)?;
        sheet
            .write_string(row, 7, vehicle.updated_at.format("%Y-%m-%d %H:%M").to_string())
            .map_err(xlsx)?;
    }

    sheet.set_column_width(0, 14).map_err(xlsx)?;
    sheet.set_column_width(5, 22).map_err(xlsx)?;
    sheet.set_column_width(7, 18).map_err(xlsx)?;

    Ok(())
}

fn write_parts_sheet(sheet: &mut Worksheet, state: &AppState) -> Result<()> {
    sheet.set_name("Parts").map_err(xlsx)?;

    write_headers(
        sheet,
        &[
            "Vehicle No.",
            "Item No.",
            "3rd Item No.",
            "Description",
            "Description 2",
            "Qty",
            "Supplier",
            "Installed",
            "Category",
        ],
    )?;

    for (row_idx, part) in state.parts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let vehicle_number = find_vehicle(state, &part.vehicle_id)
            .map(|v| v.vehicle_number.as_str())
            .unwrap_or("-");

        sheet.write_string(row, 0, vehicle_number).map_err(xlsx)?;
        sheet.write_string(row, 1, &part.item_number).map_err(xlsx)?;
        sheet.write_string(row, 2, &part.third_item_number).map_err(xlsx)?;
        sheet.write_string(row, 3, &part.item_description).map_err(xlsx)?;
        sheet.write_string(row, 4, &part.description_line2).map_err(xlsx)?;
        sheet.write_number(row, 5, f64::from(part.quantity)).map_err(xlsx)?;
        sheet.write_string(row, 6, &part.supplier_name).map_err(xlsx)?;
        sheet
            .write_string(row, 7, part.installed_date.format("%Y-%m-%d").to_string())
            .map_err(xlsx)?;
        sheet.write_string(row, 8, part.category.label()).map_err(xlsx)?;
    }

    sheet.set_column_width(0, 14).map_err(xlsx)?;
    sheet.set_column_width(3, 32).map_err(xlsx)?;
    sheet.set_column_width(4, 24).map_err(xlsx)?;
    sheet.set_column_width(6, 24).map_err(xlsx)?;

    Ok(())
}
