pub mod block;
pub mod blocks;
pub mod error;
pub mod hash;
pub mod io;

pub use block::{Block, format_size};
pub use blocks::BlockCollection;
pub use error::Error;
pub use hash::{HashError, HashKind};
pub use io::{
    Assembler, BinaryWriteOptions, ExtendedAddressMode, Flow, IntelHexWriteOptions, LineEnding,
    ParseError, Record, RecordError, RecordType, encode_record, intel_hex_lines, parse_intel_hex,
    read_intel_hex, save_binary_file, save_intel_hex_file, write_binary, write_intel_hex,
};
