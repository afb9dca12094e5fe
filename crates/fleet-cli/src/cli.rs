//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fleet_types::{OutputFormat, PartCategory, Role, VehicleType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleet-register")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Fleet asset register for vehicles and their installed parts")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Acting role (admin, technician). Uses config value if not specified.
    #[arg(long, global = true)]
    pub role: Option<Role>,

    /// Data directory override for this run
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and edit vehicles
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommand,
    },

    /// Browse and edit installed parts
    Part {
        #[command(subcommand)]
        command: PartCommand,
    },

    /// Show fleet totals
    Summary,

    /// Look up maintenance tips for a vehicle
    Tips {
        /// Vehicle ID
        vehicle: String,

        /// Narrow the tips to one installed part
        #[arg(long)]
        part: Option<String>,
    },

    /// Export the register to Excel
    Export {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Import parts from a CSV file
    ImportParts {
        /// Path to CSV file
        csv: PathBuf,

        /// Dry run - show what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Discard saved data and return to the built-in dataset
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default role
        #[arg(long)]
        set_role: Option<Role>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set maintenance tip advisor command
        #[arg(long)]
        set_advisor: Option<String>,

        /// Disable the maintenance tip advisor
        #[arg(long, conflicts_with = "set_advisor")]
        clear_advisor: bool,

        /// Set longest edge of stored photos in pixels
        #[arg(long)]
        set_photo_size: Option<u32>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// List vehicles
    List {
        /// Search vehicle number, brand, model or chassis number
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Only vehicles of this type
        #[arg(long = "type")]
        vehicle_type: Option<VehicleType>,
    },

    /// Show a vehicle with its installed parts
    Show {
        /// Vehicle ID
        id: String,
    },

    /// Register a vehicle
    Add {
        /// Fleet number (e.g., "TRK-014")
        #[arg(long)]
        number: String,

        #[arg(long = "type")]
        vehicle_type: VehicleType,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        year: u16,

        #[arg(long)]
        chassis: Option<String>,

        /// Image file to store as the vehicle photo
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Edit a vehicle
    Edit {
        /// Vehicle ID
        id: String,

        #[arg(long)]
        number: Option<String>,

        #[arg(long = "type")]
        vehicle_type: Option<VehicleType>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<u16>,

        #[arg(long)]
        chassis: Option<String>,

        #[arg(long)]
        photo: Option<PathBuf>,

        /// Remove the stored photo
        #[arg(long, conflicts_with = "photo")]
        clear_photo: bool,
    },

    /// Delete a vehicle and every part installed on it
    Delete {
        /// Vehicle ID
        id: String,
    },

    /// Write the stored photo to a file
    Photo {
        /// Vehicle ID
        id: String,

        /// Output image path
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum PartCommand {
    /// List parts
    List {
        /// Only parts installed on this vehicle ID
        #[arg(long)]
        vehicle: Option<String>,

        /// Search item numbers, descriptions and supplier
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Only parts in this category
        #[arg(long)]
        category: Option<PartCategory>,
    },

    /// Record a part installed on a vehicle
    Add {
        /// Vehicle ID
        #[arg(long)]
        vehicle: String,

        #[arg(long)]
        item_number: String,

        #[arg(long, default_value = "")]
        third_item_number: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "")]
        description2: String,

        #[arg(long, default_value = "1")]
        quantity: u32,

        #[arg(long, default_value = "")]
        supplier: String,

        /// Installation date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        installed: Option<NaiveDate>,

        #[arg(long)]
        category: PartCategory,
    },

    /// Edit a part
    Edit {
        /// Part ID
        id: String,

        /// Move the part to another vehicle ID
        #[arg(long)]
        vehicle: Option<String>,

        #[arg(long)]
        item_number: Option<String>,

        #[arg(long)]
        third_item_number: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        description2: Option<String>,

        #[arg(long)]
        quantity: Option<u32>,

        #[arg(long)]
        supplier: Option<String>,

        #[arg(long)]
        installed: Option<NaiveDate>,

        #[arg(long)]
        category: Option<PartCategory>,
    },

    /// Delete a part
    Delete {
        /// Part ID
        id: String,
    },
}
