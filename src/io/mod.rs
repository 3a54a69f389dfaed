mod binary;
mod error;
mod intel_hex;
mod record;

pub use binary::{BinaryWriteOptions, save_binary_file, write_binary};
pub use error::{ParseError, RecordError};
pub use intel_hex::{
    Assembler, ExtendedAddressMode, Flow, IntelHexWriteOptions, LineEnding, intel_hex_lines,
    parse_intel_hex, read_intel_hex, save_intel_hex_file, write_intel_hex,
};
pub use record::{MAX_PAYLOAD, Record, RecordType, encode_record};
pub(crate) use record::write_hex_byte;
