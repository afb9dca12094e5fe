//! Command handlers

use crate::cli::{Cli, Commands, PartCommand, VehicleCommand};
use crate::output::{
    output_import_preview, output_part, output_parts, output_summary, output_tips,
    output_vehicle_detail, output_vehicles,
};
use chrono::Local;
use fleet_advisor::{render_tips, Advisor};
use fleet_app::export::export_to_excel;
use fleet_app::import::load_parts_csv;
use fleet_app::photo::{decode_photo, encode_photo};
use fleet_app::{Config, RegisterSession};
use fleet_domain::views::{PartFilter, VehicleFilter};
use fleet_types::{Error, OutputFormat, Part, Result, Role, Vehicle};
use std::path::PathBuf;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Config subcommand works on the file itself, not on overrides
    if let Commands::Config {
        show,
        set_role,
        set_data_dir,
        set_output,
        set_advisor,
        clear_advisor,
        set_photo_size,
        reset,
    } = cli.command
    {
        return cmd_config(ConfigChanges {
            show,
            set_role,
            set_data_dir,
            set_output,
            set_advisor,
            clear_advisor,
            set_photo_size,
            reset,
        });
    }

    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(role) = cli.role {
        config.role = role;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let format = cli.format.unwrap_or(config.output_format);

    debug!(role = %config.role, ?format, "executing command");
    let mut session = RegisterSession::open(&config, config.role)?;

    match cli.command {
        Commands::Vehicle { command } => cmd_vehicle(&mut session, &config, command, format),
        Commands::Part { command } => cmd_part(&mut session, command, format),
        Commands::Summary => output_summary(format, &session.summary()?),
        Commands::Tips { vehicle, part } => cmd_tips(&session, &config, &vehicle, part, format),
        Commands::Export { output } => cmd_export(&session, output),
        Commands::ImportParts { csv, dry_run } => cmd_import(&mut session, csv, dry_run, format),
        Commands::Reset { yes } => cmd_reset(&mut session, yes),
        Commands::Config { .. } => Ok(()),
    }
}

fn cmd_vehicle(
    session: &mut RegisterSession,
    config: &Config,
    command: VehicleCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        VehicleCommand::List {
            query,
            vehicle_type,
        } => {
            let filter = VehicleFilter {
                query,
                vehicle_type,
            };
            let vehicles = session.vehicles(&filter)?;
            output_vehicles(format, &vehicles, session.state())
        }

        VehicleCommand::Show { id } => {
            let vehicle = session.vehicle(&id)?;
            let parts = session.parts(&PartFilter::for_vehicle(&id))?;
            output_vehicle_detail(format, vehicle, &parts)
        }

        VehicleCommand::Add {
            number,
            vehicle_type,
            brand,
            model,
            year,
            chassis,
            photo,
        } => {
            let mut vehicle = Vehicle::new(number, vehicle_type, brand, model, year);
            if let Some(chassis) = chassis {
                vehicle = vehicle.with_chassis_number(chassis);
            }
            if let Some(path) = photo {
                vehicle = vehicle.with_photo(encode_photo(&path, config.photo_max_dimension)?);
            }
            let vehicle = session.add_vehicle(vehicle)?;
            output_vehicle_detail(format, vehicle, &[])
        }

        VehicleCommand::Edit {
            id,
            number,
            vehicle_type,
            brand,
            model,
            year,
            chassis,
            photo,
            clear_photo,
        } => {
            let photo = photo
                .map(|path| encode_photo(&path, config.photo_max_dimension))
                .transpose()?;

            session.edit_vehicle(&id, |vehicle| {
                if let Some(number) = number {
                    vehicle.vehicle_number = number;
                }
                if let Some(vehicle_type) = vehicle_type {
                    vehicle.vehicle_type = vehicle_type;
                }
                if let Some(brand) = brand {
                    vehicle.brand = brand;
                }
                if let Some(model) = model {
                    vehicle.model = model;
                }
                if let Some(year) = year {
                    vehicle.year = year;
                }
                if let Some(chassis) = chassis {
                    vehicle.chassis_number = Some(chassis).filter(|c| !c.trim().is_empty());
                }
                if clear_photo {
                    vehicle.photo = None;
                } else if photo.is_some() {
                    vehicle.photo = photo;
                }
            })?;

            let vehicle = session.vehicle(&id)?;
            let parts = session.parts(&PartFilter::for_vehicle(&id))?;
            output_vehicle_detail(format, vehicle, &parts)
        }

        VehicleCommand::Delete { id } => {
            let number = session.vehicle(&id)?.vehicle_number.clone();
            let removed_parts = session.delete_vehicle(&id)?;
            println!(
                "Deleted vehicle {} and {} installed part(s)",
                number, removed_parts
            );
            Ok(())
        }

        VehicleCommand::Photo { id, output } => {
            let vehicle = session.vehicle(&id)?;
            let data_url = vehicle.photo.as_deref().ok_or_else(|| {
                Error::NotFound(format!("photo for vehicle {}", vehicle.vehicle_number))
            })?;
            std::fs::write(&output, decode_photo(data_url)?)?;
            println!("Photo written to: {}", output.display());
            Ok(())
        }
    }
}

fn cmd_part(session: &mut RegisterSession, command: PartCommand, format: OutputFormat) -> Result<()> {
    match command {
        PartCommand::List {
            vehicle,
            query,
            category,
        } => {
            let filter = PartFilter {
                vehicle_id: vehicle,
                query,
                category,
            };
            let parts = session.parts(&filter)?;
            output_parts(format, &parts, session.state())
        }

        PartCommand::Add {
            vehicle,
            item_number,
            third_item_number,
            description,
            description2,
            quantity,
            supplier,
            installed,
            category,
        } => {
            let installed = installed.unwrap_or_else(|| Local::now().date_naive());
            let part = Part::new(vehicle, item_number, description, quantity, installed, category)
                .with_third_item_number(third_item_number)
                .with_description_line2(description2)
                .with_supplier(supplier);
            let part = session.add_part(part)?;
            output_part(format, part)
        }

        PartCommand::Edit {
            id,
            vehicle,
            item_number,
            third_item_number,
            description,
            description2,
            quantity,
            supplier,
            installed,
            category,
        } => {
            let part = session.edit_part(&id, |part| {
                if let Some(vehicle) = vehicle {
                    part.vehicle_id = vehicle;
                }
                if let Some(item_number) = item_number {
                    part.item_number = item_number;
                }
                if let Some(third) = third_item_number {
                    part.third_item_number = third;
                }
                if let Some(description) = description {
                    part.item_description = description;
                }
                if let Some(line2) = description2 {
                    part.description_line2 = line2;
                }
                if let Some(quantity) = quantity {
                    part.quantity = quantity;
                }
                if let Some(supplier) = supplier {
                    part.supplier_name = supplier;
                }
                if let Some(installed) = installed {
                    part.installed_date = installed;
                }
                if let Some(category) = category {
                    part.category = category;
                }
            })?;
            output_part(format, part)
        }

        PartCommand::Delete { id } => {
            let item_number = session.part(&id)?.item_number.clone();
            session.delete_part(&id)?;
            println!("Deleted part {}", item_number);
            Ok(())
        }
    }
}

fn cmd_tips(
    session: &RegisterSession,
    config: &Config,
    vehicle_id: &str,
    part_id: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let vehicle = session.vehicle(vehicle_id)?;
    let part = part_id
        .as_deref()
        .map(|id| session.vehicle_part(&vehicle.id, id))
        .transpose()?;

    let advisor = Advisor::from_command(config.advisor_command.as_deref());
    let tips = advisor.tips(vehicle, part);
    let text = render_tips(&tips);
    output_tips(format, vehicle, &tips, &text)
}

fn cmd_export(session: &RegisterSession, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "fleet-register-{}.xlsx",
            Local::now().format("%Y%m%d")
        ))
    });

    let summary = session.summary()?;
    export_to_excel(session.state(), &output)?;
    println!(
        "Exported {} vehicle(s) and {} part(s) to: {}",
        summary.vehicle_count,
        summary.part_count,
        output.display()
    );
    Ok(())
}

fn cmd_import(
    session: &mut RegisterSession,
    csv: PathBuf,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let report = load_parts_csv(&csv, session.state())?;

    for skipped in &report.skipped {
        eprintln!("Skipped line {}: {}", skipped.line, skipped.reason);
    }

    if dry_run {
        let parts: Vec<&Part> = report.parts.iter().collect();
        return output_import_preview(format, &parts, report.skipped.len(), session.state());
    }

    if report.parts.is_empty() {
        println!("Nothing to import");
        return Ok(());
    }

    let count = session.import_parts(report.parts)?;
    println!(
        "Imported {} part(s), skipped {} row(s)",
        count,
        report.skipped.len()
    );
    Ok(())
}

fn cmd_reset(session: &mut RegisterSession, yes: bool) -> Result<()> {
    if !yes {
        println!("This discards every saved vehicle and part and restores the built-in dataset.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    session.reset()?;
    let state = session.state();
    println!(
        "Register reset: {} vehicle(s), {} part(s)",
        state.vehicles.len(),
        state.parts.len()
    );
    Ok(())
}

struct ConfigChanges {
    show: bool,
    set_role: Option<Role>,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_advisor: Option<String>,
    clear_advisor: bool,
    set_photo_size: Option<u32>,
    reset: bool,
}

fn cmd_config(changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(role) = changes.set_role {
        config.role = role;
        modified = true;
    }

    if let Some(dir) = changes.set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = changes.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(command) = changes.set_advisor {
        config.advisor_command = Some(command);
        modified = true;
    }

    if changes.clear_advisor {
        config.advisor_command = None;
        modified = true;
    }

    if let Some(size) = changes.set_photo_size {
        if size == 0 {
            return Err(Error::Photo("photo size must be positive".to_string()));
        }
        config.photo_max_dimension = size;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
