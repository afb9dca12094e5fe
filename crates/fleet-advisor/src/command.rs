//! Tip source backed by an external command
//!
//! The command receives `{"vehicle": ..., "part": ...}` on stdin and prints
//! either a JSON array of strings or `{"tips": [...]}` on stdout. Markdown
//! fences and chatter around the JSON are tolerated.

use std::io::Write;
use std::process::{Command, Stdio};

use fleet_types::{Part, Vehicle, VehicleType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AdvisorError, TipSource};

/// Vehicle fields sent to the advisor; the photo stays behind
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleInfo<'a> {
    id: &'a str,
    vehicle_number: &'a str,
    #[serde(rename = "type")]
    vehicle_type: VehicleType,
    brand: &'a str,
    model: &'a str,
    year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    chassis_number: Option<&'a str>,
}

#[derive(Serialize)]
struct TipRequest<'a> {
    vehicle: VehicleInfo<'a>,
    part: Option<&'a Part>,
}

impl<'a> TipRequest<'a> {
    fn new(vehicle: &'a Vehicle, part: Option<&'a Part>) -> Self {
        Self {
            vehicle: VehicleInfo {
                id: &vehicle.id,
                vehicle_number: &vehicle.vehicle_number,
                vehicle_type: vehicle.vehicle_type,
                brand: &vehicle.brand,
                model: &vehicle.model,
                year: vehicle.year,
                chassis_number: vehicle.chassis_number.as_deref(),
            },
            part,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TipResponse {
    List(Vec<String>),
    Object { tips: Vec<String> },
}

/// Parse tips out of command output.
///
/// Every `[` or `{` is tried as the start of the payload; the first one
/// that parses wins, so brackets in surrounding text are skipped.
pub fn parse_tips(stdout: &str) -> Result<Vec<String>, AdvisorError> {
    let found = stdout
        .char_indices()
        .filter(|(_, c)| *c == '[' || *c == '{')
        .find_map(|(i, _)| {
            serde_json::Deserializer::from_str(&stdout[i..])
                .into_iter::<TipResponse>()
                .next()
                .and_then(|parsed| parsed.ok())
        });

    match found {
        Some(TipResponse::List(tips)) | Some(TipResponse::Object { tips }) => Ok(tips),
        None => Err(AdvisorError::Parse(format!(
            "no tip list found - response: {}",
            stdout.trim()
        ))),
    }
}

pub struct CommandTipSource {
    command: String,
}

impl CommandTipSource {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl TipSource for CommandTipSource {
    fn maintenance_tips(
        &self,
        vehicle: &Vehicle,
        part: Option<&Part>,
    ) -> Result<Vec<String>, AdvisorError> {
        let mut parts = match shell_words::split(&self.command) {
            Ok(parts) if !parts.is_empty() => parts,
            _ => return Err(AdvisorError::InvalidCommand(self.command.clone())),
        };
        let program = parts.remove(0);

        let request = serde_json::to_vec(&TipRequest::new(vehicle, part))
            .map_err(|e| AdvisorError::Parse(e.to_string()))?;

        debug!(program = %program, args = ?parts, "running advisor command");

        let mut child = Command::new(&program)
            .args(&parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that ignores stdin may close it early
            if let Err(e) = stdin.write_all(&request) {
                debug!(error = %e, "advisor command did not read request");
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(AdvisorError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_tips(&String::from_utf8_lossy(&output.stdout))
    }
}
