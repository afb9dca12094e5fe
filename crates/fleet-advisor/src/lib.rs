//! Maintenance tip lookup
//!
//! Tips come from an optional external command. The lookup is advisory:
//! any failure degrades to an empty list or a fixed fallback text and is
//! only logged.

mod command;

pub use command::{parse_tips, CommandTipSource};

use fleet_types::{Part, Vehicle};
use thiserror::Error;
use tracing::warn;

/// Text shown when no tips could be produced
pub const FALLBACK_TIP: &str = "Maintenance tips are unavailable right now.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Invalid advisor command: {0}")]
    InvalidCommand(String),

    #[error("Advisor command failed to start: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Advisor command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Advisor response could not be parsed: {0}")]
    Parse(String),
}

/// Source of maintenance tips for a vehicle, optionally narrowed to a part
pub trait TipSource {
    fn maintenance_tips(
        &self,
        vehicle: &Vehicle,
        part: Option<&Part>,
    ) -> Result<Vec<String>, AdvisorError>;
}

/// Wraps an optional tip source and never fails
pub struct Advisor {
    source: Option<Box<dyn TipSource>>,
}

impl Advisor {
    pub fn new(source: Box<dyn TipSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Advisor with no source; always empty
    pub fn disabled() -> Self {
        Self { source: None }
    }

    /// Build from a configured command line, disabled when unset or blank
    pub fn from_command(command: Option<&str>) -> Self {
        match command.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cmd) => Self::new(Box::new(CommandTipSource::new(cmd))),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Tips for a vehicle, empty on failure
    pub fn tips(&self, vehicle: &Vehicle, part: Option<&Part>) -> Vec<String> {
        let Some(source) = self.source.as_ref() else {
            return Vec::new();
        };
        match source.maintenance_tips(vehicle, part) {
            Ok(tips) => tips
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Err(e) => {
                warn!(vehicle = %vehicle.vehicle_number, error = %e, "maintenance tip lookup failed");
                Vec::new()
            }
        }
    }

    /// Tips as free text, [`FALLBACK_TIP`] when none are available
    pub fn summary(&self, vehicle: &Vehicle, part: Option<&Part>) -> String {
        render_tips(&self.tips(vehicle, part))
    }
}

/// Bullet list of `tips`, or [`FALLBACK_TIP`] when empty
pub fn render_tips(tips: &[String]) -> String {
    if tips.is_empty() {
        FALLBACK_TIP.to_string()
    } else {
        tips.iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
