//! Block content hashes.
//!
//! Two algorithms are supported, selected by name:
//! - `CRC32`: CRC-32 IEEE (ISO-HDLC), 4-byte big-endian digest
//! - `SHA256`: SHA-256, 32-byte digest
//!
//! Digests are rendered as uppercase hex without separators.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::io::write_hex_byte;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("unknown hash kind '{0}' (expected CRC32 or SHA256)")]
    UnknownHashKind(String),
}

/// Hash algorithm used for block digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashKind {
    #[default]
    Crc32,
    Sha256,
}

impl HashKind {
    pub const ALL: [HashKind; 2] = [HashKind::Crc32, HashKind::Sha256];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => "CRC32",
            Self::Sha256 => "SHA256",
        }
    }

    /// Size of the digest in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Crc32 => 4,
            Self::Sha256 => 32,
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Crc32 => crc32_iso_hdlc(data).to_be_bytes().to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
        }
    }

    pub fn hex_digest(&self, data: &[u8]) -> String {
        to_upper_hex(&self.digest(data))
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashKind {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| HashError::UnknownHashKind(trimmed.to_string()))
    }
}

/// CRC-32 IEEE (ISO-HDLC).
fn crc32_iso_hdlc(data: &[u8]) -> u32 {
    const CRC: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
    CRC.checksum(data)
}

fn to_upper_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        write_hex_byte(&mut out, b);
    }
    out
}
