use std::path::PathBuf;

use hexblocks::HashKind;

#[derive(Debug, Clone, Default)]
pub struct Args {
    // Input
    pub input_file: Option<PathBuf>,

    // Append further files: /A:file
    pub append_files: Vec<PathBuf>,

    // Output (special: uses space separator)
    pub output_file: Option<PathBuf>,

    // Hash kind: /H:CRC32 or /H:SHA256
    pub hash: Option<HashKind>,

    // Delete blocks after loading: /D:index
    pub delete: Vec<usize>,

    // Output format (only one allowed)
    pub output_format: Option<OutputFormat>,

    // Output format options
    pub bytes_per_line: Option<u8>,
    pub extended_address: bool,
    pub lf_line_endings: bool,
    pub fill_gaps: Option<u8>,

    // Parameter file: /P:file
    pub ini_file: Option<PathBuf>,

    // Error log: /E:file
    pub error_log: Option<PathBuf>,

    // Silent mode: /S
    pub silent: bool,

    // Verbose logging: /V
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    IntelHex,     // /XI
    Binary,       // /XN
    Block(usize), // /XB:index
}

#[derive(Debug)]
pub enum ParseArgError {
    MissingInputFile,
    MissingOutputFile,
    InvalidOption(String),
    InvalidNumber(String),
    InvalidHash(String),
    DuplicateOutputFormat,
    MissingValue(String),
}

impl std::fmt::Display for ParseArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInputFile => write!(f, "missing input file"),
            Self::MissingOutputFile => write!(f, "missing output file (-o)"),
            Self::InvalidOption(s) => write!(f, "invalid option: {s}"),
            Self::InvalidNumber(s) => write!(f, "invalid number: {s}"),
            Self::InvalidHash(s) => write!(f, "{s}"),
            Self::DuplicateOutputFormat => write!(f, "multiple output formats specified"),
            Self::MissingValue(s) => write!(f, "missing value for {s}"),
        }
    }
}

impl std::error::Error for ParseArgError {}
