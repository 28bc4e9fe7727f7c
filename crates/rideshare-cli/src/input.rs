use std::io::Read;
use std::path::Path;

use rideshare_core::CandidateRecord;

use crate::error::CliError;

pub const STDIN: &str = "-";

/// Reads one candidate record from a JSON file, or from stdin for `-`.
pub fn read_record(input: &str) -> Result<CandidateRecord, CliError> {
    let raw = if input == STDIN {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(Path::new(input))?
    };

    parse_record(&raw)
}

pub fn parse_record(raw: &str) -> Result<CandidateRecord, CliError> {
    if raw.trim().is_empty() {
        return Err(CliError::Input(String::from("offer input is empty")));
    }
    Ok(CandidateRecord::from_json_str(raw)?)
}
