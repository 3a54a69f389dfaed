use super::*;
use hexblocks::HashKind;

fn parse(args: &[&str]) -> Result<Args, ParseArgError> {
    Args::parse_from(args.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_input_and_output() {
    let args = parse(&["in.hex", "/XI", "-o", "out.hex"]).unwrap();
    assert_eq!(args.input_file, Some(PathBuf::from("in.hex")));
    assert_eq!(args.output_file, Some(PathBuf::from("out.hex")));
    assert_eq!(args.output_format, Some(OutputFormat::IntelHex));
}

#[test]
fn test_dash_prefix_and_case_insensitive() {
    let args = parse(&["in.hex", "-h=sha256", "/xn", "/s"]).unwrap();
    assert_eq!(args.hash, Some(HashKind::Sha256));
    assert_eq!(args.output_format, Some(OutputFormat::Binary));
    assert!(args.silent);
}

#[test]
fn test_append_files_repeatable() {
    let args = parse(&["a.hex", "/A:b.hex", "/A:'c.hex'"]).unwrap();
    assert_eq!(
        args.append_files,
        vec![PathBuf::from("b.hex"), PathBuf::from("c.hex")]
    );
}

#[test]
fn test_delete_indices() {
    let args = parse(&["a.hex", "/D:3", "/D:0,1"]).unwrap();
    assert_eq!(args.delete, vec![3, 0, 1]);
}

#[test]
fn test_export_block() {
    let args = parse(&["a.hex", "/XB:2", "-o", "b.bin"]).unwrap();
    assert_eq!(args.output_format, Some(OutputFormat::Block(2)));
}

#[test]
fn test_export_block_requires_index() {
    let mut args = Args::default();
    assert!(matches!(
        parse_option(&mut args, "XB"),
        Err(ParseArgError::MissingValue(_))
    ));
}

#[test]
fn test_duplicate_output_format() {
    assert!(matches!(
        parse(&["a.hex", "/XI", "/XN"]),
        Err(ParseArgError::DuplicateOutputFormat)
    ));
}

#[test]
fn test_unknown_hash_rejected() {
    assert!(matches!(
        parse(&["a.hex", "/H:MD5"]),
        Err(ParseArgError::InvalidHash(_))
    ));
}

#[test]
fn test_write_options() {
    let args = parse(&["a.hex", "/BPL:0x20", "/ELA", "/LF", "/FG:0xFF"]).unwrap();
    assert_eq!(args.bytes_per_line, Some(32));
    assert!(args.extended_address);
    assert!(args.lf_line_endings);
    assert_eq!(args.fill_gaps, Some(0xFF));
}

#[test]
fn test_unknown_option() {
    let mut args = Args::default();
    assert!(matches!(
        parse_option(&mut args, "ZZ"),
        Err(ParseArgError::InvalidOption(_))
    ));
    assert!(matches!(
        parse_option(&mut args, "ZZ:1"),
        Err(ParseArgError::InvalidOption(_))
    ));
}

#[test]
fn test_missing_output_value() {
    assert!(matches!(
        parse(&["a.hex", "-o"]),
        Err(ParseArgError::MissingValue(_))
    ));
}

#[test]
fn test_second_positional_rejected() {
    assert!(matches!(
        parse(&["a.hex", "b.hex"]),
        Err(ParseArgError::InvalidOption(_))
    ));
}

#[test]
fn test_absolute_paths_are_positional() {
    let args = parse(&["/tmp/in.hex", "/A:/tmp/more.hex", "/XI", "-o", "/tmp/out.hex"]).unwrap();
    assert_eq!(args.input_file, Some(PathBuf::from("/tmp/in.hex")));
    assert_eq!(args.append_files, vec![PathBuf::from("/tmp/more.hex")]);
    assert_eq!(args.output_file, Some(PathBuf::from("/tmp/out.hex")));
}
