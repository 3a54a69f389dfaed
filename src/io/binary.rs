use std::path::Path;

use crate::{Block, Error};

#[derive(Debug, Clone, Default)]
pub struct BinaryWriteOptions {
    /// If set, lays blocks out by address from the lowest base to the highest
    /// end and fills gaps with this byte.
    /// If None, block bytes are concatenated in the order given.
    pub fill_gaps: Option<u8>,
}

/// Write blocks as a raw binary image. CLI: /XN.
pub fn write_binary(blocks: &[Block], options: &BinaryWriteOptions) -> Vec<u8> {
    if blocks.is_empty() {
        return Vec::new();
    }

    if let Some(fill) = options.fill_gaps {
        return write_binary_filled(blocks, fill);
    }

    let total_len: usize = blocks.iter().map(Block::len).sum();
    let mut out = Vec::with_capacity(total_len);
    for block in blocks {
        out.extend_from_slice(block.bytes());
    }
    out
}

/// Later blocks overwrite earlier ones where they overlap.
fn write_binary_filled(blocks: &[Block], fill: u8) -> Vec<u8> {
    let start = blocks.iter().map(Block::base_address).min().unwrap_or(0) as u64;
    let end = blocks
        .iter()
        .map(|b| b.base_address() as u64 + b.len() as u64)
        .max()
        .unwrap_or(start);

    let mut out = vec![fill; (end - start) as usize];
    for block in blocks {
        let offset = (block.base_address() as u64 - start) as usize;
        out[offset..offset + block.len()].copy_from_slice(block.bytes());
    }
    out
}

pub fn save_binary_file(
    path: impl AsRef<Path>,
    blocks: &[Block],
    options: &BinaryWriteOptions,
) -> Result<(), Error> {
    std::fs::write(path.as_ref(), write_binary(blocks, options))?;
    Ok(())
}
