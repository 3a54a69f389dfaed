use std::fs::File;
use std::io::{BufRead, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use super::record::{Record, RecordType};
use super::{ParseError, RecordError};
use crate::{Block, BlockCollection, Error, HashKind};

const DEFAULT_BYTES_PER_LINE: usize = 16;
const BANK_SIZE: usize = 0x10000;

/// Whether Extended Linear Address records are written on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtendedAddressMode {
    /// Only Data and EOF records. Addresses above 64 KiB wrap in the
    /// 16-bit address field.
    #[default]
    Never,
    /// Emit the upper address bits before each block and whenever the
    /// 16-bit address wraps.
    PerBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntelHexWriteOptions {
    pub bytes_per_line: u8,
    pub extended_address: ExtendedAddressMode,
    pub line_ending: LineEnding,
}

impl Default for IntelHexWriteOptions {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE as u8,
            extended_address: ExtendedAddressMode::Never,
            line_ending: LineEnding::CrLf,
        }
    }
}

/// Outcome of feeding one record to the [`Assembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    EndOfFile,
}

/// Builds blocks from a record stream.
///
/// Tracks the upper address bits set by Extended Linear Address records and
/// the end of the block currently being extended. A Data record that does
/// not start exactly at that end opens a new block.
pub struct Assembler<'a> {
    blocks: &'a mut BlockCollection,
    hash: HashKind,
    current_address: u32,
    last_end: Option<u32>,
    open: Option<usize>,
}

impl<'a> Assembler<'a> {
    pub fn new(blocks: &'a mut BlockCollection, hash: HashKind) -> Self {
        Self {
            blocks,
            hash,
            current_address: 0,
            last_end: None,
            open: None,
        }
    }

    pub fn current_address(&self) -> u32 {
        self.current_address
    }

    /// Apply one record. `line` is only used for error reporting.
    pub fn feed(&mut self, record: &Record, line: usize) -> Result<Flow, ParseError> {
        trace!(
            "line {line}: {:?} record at {:#06X}, {} byte(s)",
            record.record_type,
            record.address,
            record.payload.len()
        );
        match record.record_type {
            RecordType::ExtendedLinearAddress => {
                let [high, low] = record.payload[..] else {
                    return Err(ParseError::InvalidExtendedAddress {
                        line,
                        len: record.payload.len(),
                    });
                };
                self.current_address = u32::from(u16::from_be_bytes([high, low])) << 16;
                trace!("line {line}: upper address bits {:#06X}", self.current_address >> 16);
            }
            RecordType::Data => {
                let address = record.absolute_address(self.current_address);
                self.current_address = address;

                let index = match self.open {
                    Some(index) if self.last_end == Some(address) => index,
                    _ => {
                        self.finalize();
                        let index = self.blocks.insert(Block::new(address));
                        debug!("line {line}: opened block {index} at {address:#010X}");
                        self.open = Some(index);
                        index
                    }
                };

                let block = &mut self.blocks.blocks_mut()[index];
                block.append(&record.payload);
                self.last_end = u32::try_from(record.payload.len())
                    .ok()
                    .and_then(|len| address.checked_add(len));
            }
            RecordType::EndOfFile => {
                debug!("line {line}: end of file record");
                self.finalize();
                return Ok(Flow::EndOfFile);
            }
            RecordType::StartSegmentAddress | RecordType::StartLinearAddress => {}
            RecordType::ExtendedSegmentAddress | RecordType::Unknown(_) => {
                return Err(ParseError::UnsupportedRecordType {
                    line,
                    record_type: record.record_type.code(),
                });
            }
        }
        Ok(Flow::Continue)
    }

    /// Hash the open block, if any, and stop extending it.
    pub fn finalize(&mut self) {
        let Some(index) = self.open.take() else {
            return;
        };
        let block = &mut self.blocks.blocks_mut()[index];
        block.update_hash(self.hash);
        debug!(
            "finalized block at {:#010X}: {} bytes, hash {}",
            block.base_address(),
            block.len(),
            block.hash()
        );
    }
}

/// Read Intel-HEX lines into `blocks` until an EOF record or the end of input.
///
/// Input that ends without an EOF record is accepted.
pub fn read_intel_hex<R: BufRead>(
    reader: R,
    blocks: &mut BlockCollection,
    hash: HashKind,
) -> Result<(), Error> {
    let mut assembler = Assembler::new(blocks, hash);

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::Parse(ParseError::InvalidUtf8 { line: line_num }),
            _ => Error::Io(e),
        })?;

        let text = match line_num {
            1 => line.strip_prefix('\u{FEFF}').unwrap_or(line.as_str()),
            _ => line.as_str(),
        };
        let record = Record::decode(text).map_err(|source| ParseError::Record {
            line: line_num,
            source,
        })?;

        if assembler.feed(&record, line_num)? == Flow::EndOfFile {
            return Ok(());
        }
    }

    warn!("input ended without an end-of-file record");
    assembler.finalize();
    Ok(())
}

/// Parse Intel-HEX input into a fresh collection.
pub fn parse_intel_hex(input: &[u8], hash: HashKind) -> Result<BlockCollection, Error> {
    let mut blocks = BlockCollection::new();
    read_intel_hex(input, &mut blocks, hash)?;
    Ok(blocks)
}

/// Encode blocks as Intel-HEX lines (without line terminators), in the
/// order given, followed by one EOF record.
///
/// The first line of each block is shortened so that later lines start on a
/// `bytes_per_line` address boundary.
pub fn intel_hex_lines(
    blocks: &[Block],
    options: &IntelHexWriteOptions,
) -> Result<Vec<String>, RecordError> {
    let bytes_per_line = match options.bytes_per_line {
        0 => DEFAULT_BYTES_PER_LINE,
        n => n as usize,
    };
    let per_block = options.extended_address == ExtendedAddressMode::PerBlock;
    let mut lines = Vec::new();

    for block in blocks {
        let data = block.bytes();
        let mut high = (block.base_address() >> 16) as u16;
        let mut low = (block.base_address() & 0xFFFF) as u16;

        if per_block {
            lines.push(Record::extended_linear_address(high).encode()?);
        }

        let misalignment = block.base_address() as usize % bytes_per_line;
        let mut chunk_len = bytes_per_line - misalignment;
        let mut offset = 0;

        // An empty block still gets one zero-length data record.
        loop {
            if per_block {
                chunk_len = chunk_len.min(BANK_SIZE - low as usize);
            }
            let end = (offset + chunk_len).min(data.len());
            lines.push(Record::data(low, &data[offset..end]).encode()?);

            let written = end - offset;
            offset = end;
            low = low.wrapping_add(written as u16);
            chunk_len = bytes_per_line;

            if offset >= data.len() {
                break;
            }
            if per_block && low == 0 {
                high = high.wrapping_add(1);
                lines.push(Record::extended_linear_address(high).encode()?);
            }
        }
    }

    lines.push(Record::end_of_file().encode()?);
    Ok(lines)
}

/// Write blocks as Intel-HEX text. CLI: /XI.
pub fn write_intel_hex<W: Write>(
    writer: &mut W,
    blocks: &[Block],
    options: &IntelHexWriteOptions,
) -> Result<(), Error> {
    let terminator = options.line_ending.as_str();
    for line in intel_hex_lines(blocks, options)? {
        writer.write_all(line.as_bytes())?;
        writer.write_all(terminator.as_bytes())?;
    }
    Ok(())
}

/// Write blocks to an Intel-HEX file, e.g. a single exported block.
pub fn save_intel_hex_file(
    path: impl AsRef<Path>,
    blocks: &[Block],
    options: &IntelHexWriteOptions,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_intel_hex(&mut writer, blocks, options)?;
    writer.flush()?;
    Ok(())
}
