use std::path::PathBuf;

use super::parse_util::{parse_byte, parse_hash_kind, parse_index, split_option, strip_quotes};
use super::types::{Args, OutputFormat, ParseArgError};

type ValueParser = fn(&mut Args, &str, &str) -> Result<bool, ParseArgError>;

impl Args {
    pub fn parse() -> Result<Self, ParseArgError> {
        Self::parse_from(std::env::args().skip(1).collect())
    }

    pub fn parse_from(args: Vec<String>) -> Result<Self, ParseArgError> {
        let mut result = Args::default();
        let mut args_iter = args.iter();

        while let Some(arg) = args_iter.next() {
            // Handle -o specially (space-separated)
            if arg.eq_ignore_ascii_case("-o") {
                let next = args_iter
                    .next()
                    .ok_or(ParseArgError::MissingValue("-o".into()))?;
                result.output_file = Some(PathBuf::from(next));
                continue;
            }

            if let Some(opt) = option_text(arg) {
                parse_option(&mut result, opt)?;
            } else if result.input_file.is_none() {
                result.input_file = Some(PathBuf::from(arg));
            } else {
                return Err(ParseArgError::InvalidOption(arg.clone()));
            }
        }

        Ok(result)
    }
}

/// Option text without its prefix, or `None` for a positional argument.
/// A `/`-prefixed argument whose key contains a path separator or a dot is
/// an absolute path, not an option.
fn option_text(arg: &str) -> Option<&str> {
    if let Some(opt) = arg.strip_prefix('-') {
        return Some(opt);
    }
    let opt = arg.strip_prefix('/')?;
    let key = split_option(opt).map_or(opt, |(key, _)| key);
    (!key.contains(['/', '.'])).then_some(opt)
}

fn parse_simple_flag(args: &mut Args, opt_upper: &str) -> bool {
    match opt_upper {
        "S" => {
            args.silent = true;
            true
        }
        "V" => {
            args.verbose = true;
            true
        }
        "ELA" => {
            args.extended_address = true;
            true
        }
        "LF" => {
            args.lf_line_endings = true;
            true
        }
        _ => false,
    }
}

fn parse_path_option(args: &mut Args, key_upper: &str, value: &str) -> Result<bool, ParseArgError> {
    let path = || PathBuf::from(strip_quotes(value));
    match key_upper {
        "A" => {
            args.append_files.push(path());
            Ok(true)
        }
        "E" => {
            args.error_log = Some(path());
            Ok(true)
        }
        "P" => {
            args.ini_file = Some(path());
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn parse_value_option(
    args: &mut Args,
    key_upper: &str,
    value: &str,
) -> Result<bool, ParseArgError> {
    match key_upper {
        "H" => {
            args.hash = Some(parse_hash_kind(value)?);
            Ok(true)
        }
        "D" => {
            for index in value.split(',').filter(|v| !v.trim().is_empty()) {
                args.delete.push(parse_index(index)?);
            }
            Ok(true)
        }
        "BPL" => {
            args.bytes_per_line = Some(parse_byte(value)?);
            Ok(true)
        }
        "FG" => {
            args.fill_gaps = Some(parse_byte(value)?);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn set_output_format(args: &mut Args, format: OutputFormat) -> Result<(), ParseArgError> {
    if args.output_format.is_some() {
        return Err(ParseArgError::DuplicateOutputFormat);
    }
    args.output_format = Some(format);
    Ok(())
}

fn parse_output_option_value(
    args: &mut Args,
    key_upper: &str,
    value: &str,
) -> Result<bool, ParseArgError> {
    match key_upper {
        "XB" => {
            set_output_format(args, OutputFormat::Block(parse_index(value)?))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn parse_output_flag(args: &mut Args, opt_upper: &str) -> Result<bool, ParseArgError> {
    match opt_upper {
        "XI" => {
            set_output_format(args, OutputFormat::IntelHex)?;
            Ok(true)
        }
        "XN" => {
            set_output_format(args, OutputFormat::Binary)?;
            Ok(true)
        }
        "XB" => Err(ParseArgError::MissingValue("/XB".into())),
        _ => Ok(false),
    }
}

pub(super) fn parse_option(args: &mut Args, opt: &str) -> Result<(), ParseArgError> {
    let opt_upper = opt.to_ascii_uppercase();

    if parse_simple_flag(args, &opt_upper) {
        return Ok(());
    }
    if parse_output_flag(args, &opt_upper)? {
        return Ok(());
    }

    if let Some((key, value)) = split_option(opt) {
        let key_upper = key.to_ascii_uppercase();
        if value.is_empty() {
            return Err(ParseArgError::MissingValue(format!("/{key}")));
        }

        let parsers: &[ValueParser] = &[
            parse_output_option_value,
            parse_path_option,
            parse_value_option,
        ];
        for parser in parsers {
            if parser(args, &key_upper, value)? {
                return Ok(());
            }
        }
    }

    Err(ParseArgError::InvalidOption(opt.to_string()))
}

#[cfg(test)]
mod tests;
