//! Single-line Intel HEX record codec.

use super::RecordError;

const START_CODE: u8 = b':';
/// `:` plus length, address, type and checksum fields.
const MIN_LINE_LEN: usize = 11;
pub const MAX_PAYLOAD: usize = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Data,
    EndOfFile,
    ExtendedSegmentAddress,
    StartSegmentAddress,
    ExtendedLinearAddress,
    StartLinearAddress,
    /// Any code outside 00..=05. Decoding keeps it; loading rejects it.
    Unknown(u8),
}

impl RecordType {
    pub fn code(self) -> u8 {
        match self {
            Self::Data => 0x00,
            Self::EndOfFile => 0x01,
            Self::ExtendedSegmentAddress => 0x02,
            Self::StartSegmentAddress => 0x03,
            Self::ExtendedLinearAddress => 0x04,
            Self::StartLinearAddress => 0x05,
            Self::Unknown(code) => code,
        }
    }
}

impl From<u8> for RecordType {
    fn from(code: u8) -> Self {
        match code {
            0x00 => Self::Data,
            0x01 => Self::EndOfFile,
            0x02 => Self::ExtendedSegmentAddress,
            0x03 => Self::StartSegmentAddress,
            0x04 => Self::ExtendedLinearAddress,
            0x05 => Self::StartLinearAddress,
            other => Self::Unknown(other),
        }
    }
}

/// One decoded line of an Intel HEX file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub record_type: RecordType,
    pub address: u16,
    pub payload: Vec<u8>,
}

impl Record {
    pub fn new(record_type: RecordType, address: u16, payload: Vec<u8>) -> Self {
        Self {
            record_type,
            address,
            payload,
        }
    }

    pub fn data(address: u16, payload: &[u8]) -> Self {
        Self::new(RecordType::Data, address, payload.to_vec())
    }

    pub fn end_of_file() -> Self {
        Self::new(RecordType::EndOfFile, 0, Vec::new())
    }

    pub fn extended_linear_address(upper: u16) -> Self {
        Self::new(
            RecordType::ExtendedLinearAddress,
            0,
            upper.to_be_bytes().to_vec(),
        )
    }

    /// Decode `:LLAAAATT[DD...]CC`.
    ///
    /// The length byte is not cross-checked: the payload is everything
    /// between the type byte and the checksum byte.
    pub fn decode(line: &str) -> Result<Self, RecordError> {
        if line.is_empty() {
            return Err(RecordError::Empty);
        }
        // ':' plus an even number of digits
        if line.len().is_multiple_of(2) || line.len() < MIN_LINE_LEN {
            return Err(RecordError::InvalidLength(line.len()));
        }
        let Some(hex_str) = line.as_bytes().strip_prefix(&[START_CODE]) else {
            return Err(RecordError::InvalidPrefix);
        };

        let bytes = parse_hex_bytes(hex_str)?;
        validate_checksum(&bytes)?;

        let address = u16::from_be_bytes([bytes[1], bytes[2]]);
        let record_type = RecordType::from(bytes[3]);
        let payload = bytes[4..bytes.len() - 1].to_vec();

        Ok(Self {
            record_type,
            address,
            payload,
        })
    }

    pub fn encode(&self) -> Result<String, RecordError> {
        encode_record(self.record_type, self.address, &self.payload)
    }

    /// Absolute address of a Data record under the given upper address bits.
    pub fn absolute_address(&self, current_address: u32) -> u32 {
        (current_address & 0xFFFF_0000) | self.address as u32
    }
}

/// Encode one record line, checksum included. Payloads of 255 bytes or more
/// are rejected.
pub fn encode_record(
    record_type: RecordType,
    address: u16,
    payload: &[u8],
) -> Result<String, RecordError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(RecordError::PayloadTooLarge(payload.len()));
    }

    let byte_count = payload.len() as u8;
    let addr_bytes = address.to_be_bytes();
    let type_code = record_type.code();

    let sum = [byte_count, addr_bytes[0], addr_bytes[1], type_code]
        .iter()
        .chain(payload)
        .fold(0u8, |acc, &b| acc.wrapping_add(b));
    let checksum = (!sum).wrapping_add(1);

    let mut line = String::with_capacity(MIN_LINE_LEN + payload.len() * 2);
    line.push(START_CODE as char);
    write_hex_byte(&mut line, byte_count);
    write_hex_byte(&mut line, addr_bytes[0]);
    write_hex_byte(&mut line, addr_bytes[1]);
    write_hex_byte(&mut line, type_code);
    for &b in payload {
        write_hex_byte(&mut line, b);
    }
    write_hex_byte(&mut line, checksum);
    Ok(line)
}

pub(crate) fn write_hex_byte(output: &mut String, byte: u8) {
    const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";
    output.push(HEX_CHARS[(byte >> 4) as usize] as char);
    output.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
}

fn parse_hex_bytes(hex: &[u8]) -> Result<Vec<u8>, RecordError> {
    let mut out = Vec::with_capacity(hex.len() / 2);
    for pair in hex.chunks_exact(2) {
        let high = hex_digit(pair[0])?;
        let low = hex_digit(pair[1])?;
        out.push((high << 4) | low);
    }
    Ok(out)
}

fn hex_digit(b: u8) -> Result<u8, RecordError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        _ => Err(RecordError::InvalidHexDigit(b as char)),
    }
}

fn validate_checksum(bytes: &[u8]) -> Result<(), RecordError> {
    let Some((&actual, body)) = bytes.split_last() else {
        return Ok(());
    };
    let body_sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if body_sum.wrapping_add(actual) != 0 {
        return Err(RecordError::ChecksumMismatch {
            expected: (!body_sum).wrapping_add(1),
            actual,
        });
    }
    Ok(())
}
