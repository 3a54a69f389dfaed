use std::collections::HashMap;
use std::path::Path;

use hexblocks::HashKind;

use super::error::CliError;
use super::parse_util::{parse_bool, parse_byte, parse_hash_kind};
use super::types::Args;

/// Parse `key=value` lines. Blank lines, `;`/`#` comments and `[section]`
/// headers are skipped; keys are lower-cased.
pub(super) fn parse_ini(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().trim_matches('"').to_string();
        map.insert(key, value);
    }

    map
}

pub(super) fn load_ini(path: &Path) -> Result<HashMap<String, String>, std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_ini(&content))
}

fn ini_error(key: &str, err: impl std::fmt::Display) -> CliError {
    CliError::Ini {
        key: key.to_string(),
        message: err.to_string(),
    }
}

/// Fill settings not given on the command line from the parameter file.
pub(super) fn apply_ini(args: &mut Args, values: &HashMap<String, String>) -> Result<(), CliError> {
    if args.hash.is_none()
        && let Some(value) = values.get("hash")
    {
        args.hash = Some(parse_hash_kind(value).map_err(|e| ini_error("hash", e))?);
    }
    if args.bytes_per_line.is_none()
        && let Some(value) = values.get("bytes_per_line")
    {
        args.bytes_per_line = Some(parse_byte(value).map_err(|e| ini_error("bytes_per_line", e))?);
    }
    if args.fill_gaps.is_none()
        && let Some(value) = values.get("fill_gaps")
    {
        args.fill_gaps = Some(parse_byte(value).map_err(|e| ini_error("fill_gaps", e))?);
    }
    if !args.extended_address
        && let Some(value) = values.get("extended_address")
    {
        args.extended_address = parse_bool(value).map_err(|e| ini_error("extended_address", e))?;
    }
    if !args.lf_line_endings
        && let Some(value) = values.get("line_ending")
    {
        args.lf_line_endings = match value.to_ascii_lowercase().as_str() {
            "lf" => true,
            "crlf" => false,
            other => return Err(ini_error("line_ending", format!("unknown line ending '{other}'"))),
        };
    }
    Ok(())
}

pub(super) fn default_hash(args: &Args) -> HashKind {
    args.hash.unwrap_or_default()
}
