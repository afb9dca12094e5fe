//! Output formatting module

use fleet_domain::views::{find_vehicle, FleetSummary};
use fleet_types::{AppState, OutputFormat, Part, Result, Vehicle};
use serde_json::json;

/// Shorten `s` to `max_len` characters, ending with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_vehicles(format: OutputFormat, vehicles: &[&Vehicle], state: &AppState) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<12} {:<10} {:<28} {:>5} {:>6}",
        "ID", "Number", "Type", "Vehicle", "Parts", "Photo"
    );
    println!("{}", "-".repeat(104));

    for vehicle in vehicles {
        let part_count = state
            .parts
            .iter()
            .filter(|p| p.vehicle_id == vehicle.id)
            .count();
        println!(
            "{:<38} {:<12} {:<10} {:<28} {:>5} {:>6}",
            truncate(&vehicle.id, 38),
            truncate(&vehicle.vehicle_number, 12),
            vehicle.vehicle_type,
            truncate(&vehicle.display_name(), 28),
            part_count,
            if vehicle.photo.is_some() { "yes" } else { "-" }
        );
    }

    println!();
    println!("{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_vehicle_detail(format: OutputFormat, vehicle: &Vehicle, parts: &[&Part]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({ "vehicle": vehicle, "parts": parts }));
    }

    println!("\nVehicle {}", vehicle.vehicle_number);
    println!("===============");
    println!("ID:              {}", vehicle.id);
    println!("Type:            {}", vehicle.vehicle_type);
    println!("Brand:           {}", vehicle.brand);
    println!("Model:           {}", vehicle.model);
    println!("Year:            {}", vehicle.year);
    println!(
        "Chassis No.:     {}",
        vehicle.chassis_number.as_deref().unwrap_or("-")
    );
    println!(
        "Photo:           {}",
        if vehicle.photo.is_some() { "stored" } else { "-" }
    );
    println!(
        "Updated:         {}",
        vehicle.updated_at.format("%Y-%m-%d %H:%M UTC")
    );

    println!("\nInstalled parts ({})", parts.len());
    println!("-------------------");
    if parts.is_empty() {
        println!("None recorded.");
        return Ok(());
    }
    print_part_rows(parts, None);
    Ok(())
}

pub fn output_parts(format: OutputFormat, parts: &[&Part], state: &AppState) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(parts);
    }

    if parts.is_empty() {
        println!("No parts found.");
        return Ok(());
    }

    print_part_rows(parts, Some(state));
    println!();
    println!("{} part(s)", parts.len());
    Ok(())
}

fn print_part_rows(parts: &[&Part], state: Option<&AppState>) {
    println!(
        "{:<38} {:<12} {:<14} {:<30} {:>4} {:<11} {:<10}",
        "ID", "Vehicle", "Item No.", "Description", "Qty", "Installed", "Category"
    );
    println!("{}", "-".repeat(125));

    for part in parts {
        let vehicle = state
            .and_then(|s| find_vehicle(s, &part.vehicle_id))
            .map(|v| v.vehicle_number.clone())
            .unwrap_or_else(|| part.vehicle_id.clone());
        println!(
            "{:<38} {:<12} {:<14} {:<30} {:>4} {:<11} {:<10}",
            truncate(&part.id, 38),
            truncate(&vehicle, 12),
            truncate(&part.item_number, 14),
            truncate(&part.item_description, 30),
            part.quantity,
            part.installed_date.format("%Y-%m-%d"),
            part.category
        );
    }
}

fn import_preview_json(parts: &[&Part], skipped: usize) -> serde_json::Value {
    json!({
        "dryRun": true,
        "count": parts.len(),
        "skipped": skipped,
        "parts": parts,
    })
}

/// Parts a dry-run import would add; JSON mode emits one document
pub fn output_import_preview(
    format: OutputFormat,
    parts: &[&Part],
    skipped: usize,
    state: &AppState,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&import_preview_json(parts, skipped));
    }

    println!("[DRY RUN] {} part(s) would be imported", parts.len());
    output_parts(format, parts, state)
}

pub fn output_part(format: OutputFormat, part: &Part) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(part);
    }

    println!("\nPart {}", part.item_number);
    println!("===============");
    println!("ID:              {}", part.id);
    println!("Vehicle ID:      {}", part.vehicle_id);
    println!("3rd Item No.:    {}", part.third_item_number);
    println!("Description:     {}", part.item_description);
    if !part.description_line2.is_empty() {
        println!("                 {}", part.description_line2);
    }
    println!("Quantity:        {}", part.quantity);
    println!("Supplier:        {}", part.supplier_name);
    println!("Installed:       {}", part.installed_date.format("%Y-%m-%d"));
    println!("Category:        {}", part.category);
    Ok(())
}

pub fn output_summary(format: OutputFormat, summary: &FleetSummary) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(summary);
    }

    println!("Fleet Summary");
    println!("=============");
    println!("Vehicles:        {}", summary.vehicle_count);
    println!("Parts:           {}", summary.part_count);
    println!("Installed qty:   {}", summary.total_quantity);

    println!("\nBy vehicle type:");
    for (vehicle_type, count) in &summary.vehicles_by_type {
        println!("  {:<12} {:>5}", vehicle_type.label(), count);
    }

    println!("\nBy part category:");
    for (category, count) in &summary.parts_by_category {
        println!("  {:<12} {:>5}", category.label(), count);
    }

    if let (Some(number), Some(at)) = (&summary.last_updated_vehicle, summary.last_updated_at) {
        println!("\nLast updated:    {} ({})", number, at.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

pub fn output_tips(format: OutputFormat, vehicle: &Vehicle, tips: &[String], text: &str) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({ "vehicleId": vehicle.id, "tips": tips }));
    }

    println!("Maintenance tips for {} ({})", vehicle.vehicle_number, vehicle.display_name());
    println!();
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("TRK-1", 12), "TRK-1");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("Steer tyre 295/80R22.5", 10), "Steer t...");
    }

    #[test]
    fn test_import_preview_json_is_single_document() {
        use chrono::NaiveDate;
        use fleet_types::PartCategory;

        let part = Part::new(
            "v1".to_string(),
            "FF-10".to_string(),
            "Fuel filter".to_string(),
            1,
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            PartCategory::Engine,
        );
        let rendered = serde_json::to_string_pretty(&import_preview_json(&[&part], 2)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["dryRun"], true);
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["skipped"], 2);
        assert_eq!(parsed["parts"][0]["itemNumber"], "FF-10");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日野プロフィア大型", 6), "日野プ...");
    }
}
