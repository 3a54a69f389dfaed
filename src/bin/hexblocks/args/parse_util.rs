use hexblocks::HashKind;

use super::types::ParseArgError;

pub(super) fn split_option(opt: &str) -> Option<(&str, &str)> {
    if let Some(pos) = opt.find(':') {
        Some((&opt[..pos], &opt[pos + 1..]))
    } else if let Some(pos) = opt.find('=') {
        Some((&opt[..pos], &opt[pos + 1..]))
    } else {
        None
    }
}

pub(super) fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

/// Accepts decimal, `0x`/`0X` hex and `h`-suffixed hex.
pub(super) fn parse_number(s: &str) -> Result<u32, ParseArgError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseArgError::InvalidNumber("empty".to_string()));
    }

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(hex) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
        (16, hex)
    } else {
        (10, s)
    };

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return Err(ParseArgError::InvalidNumber(s.to_string()));
    }

    u32::from_str_radix(&cleaned, radix).map_err(|_| ParseArgError::InvalidNumber(s.to_string()))
}

pub(super) fn parse_byte(s: &str) -> Result<u8, ParseArgError> {
    let value = parse_number(s)?;
    u8::try_from(value).map_err(|_| ParseArgError::InvalidNumber(s.trim().to_string()))
}

pub(super) fn parse_index(s: &str) -> Result<usize, ParseArgError> {
    parse_number(s).map(|v| v as usize)
}

pub(super) fn parse_hash_kind(s: &str) -> Result<HashKind, ParseArgError> {
    strip_quotes(s)
        .parse()
        .map_err(|e: hexblocks::HashError| ParseArgError::InvalidHash(e.to_string()))
}

pub(super) fn parse_bool(s: &str) -> Result<bool, ParseArgError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ParseArgError::InvalidOption(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_option() {
        assert_eq!(split_option("H:SHA256"), Some(("H", "SHA256")));
        assert_eq!(split_option("BPL=32"), Some(("BPL", "32")));
        assert_eq!(split_option("XI"), None);
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("16").unwrap(), 16);
        assert_eq!(parse_number("0x10").unwrap(), 16);
        assert_eq!(parse_number("10h").unwrap(), 16);
        assert_eq!(parse_number("1_000").unwrap(), 1000);
        assert!(parse_number("").is_err());
        assert!(parse_number("0x").is_err());
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn test_parse_byte_range() {
        assert_eq!(parse_byte("0xFF").unwrap(), 0xFF);
        assert!(parse_byte("256").is_err());
    }

    #[test]
    fn test_parse_hash_kind() {
        assert_eq!(parse_hash_kind("crc32").unwrap(), HashKind::Crc32);
        assert_eq!(parse_hash_kind("\"SHA256\"").unwrap(), HashKind::Sha256);
        assert!(matches!(
            parse_hash_kind("MD5"),
            Err(ParseArgError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("Yes").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
