use std::path::Path;

use hexblocks::{
    BinaryWriteOptions, BlockCollection, ExtendedAddressMode, HashKind, IntelHexWriteOptions,
    LineEnding,
};

use super::error::CliError;
use super::types::{Args, OutputFormat, ParseArgError};

pub(super) fn load_blocks(
    input: &Path,
    append_files: &[impl AsRef<Path>],
    hash: HashKind,
) -> Result<BlockCollection, CliError> {
    let mut blocks = BlockCollection::new();
    blocks.load_file(input, hash, false)?;
    for path in append_files {
        blocks.load_file(path, hash, true)?;
    }
    Ok(blocks)
}

pub(super) fn intel_hex_options(args: &Args) -> IntelHexWriteOptions {
    let defaults = IntelHexWriteOptions::default();
    IntelHexWriteOptions {
        bytes_per_line: args.bytes_per_line.unwrap_or(defaults.bytes_per_line),
        extended_address: if args.extended_address {
            ExtendedAddressMode::PerBlock
        } else {
            ExtendedAddressMode::Never
        },
        line_ending: if args.lf_line_endings {
            LineEnding::Lf
        } else {
            LineEnding::CrLf
        },
    }
}

pub(super) fn binary_options(args: &Args) -> BinaryWriteOptions {
    BinaryWriteOptions {
        fill_gaps: args.fill_gaps,
    }
}

pub(super) fn write_output_for_args(blocks: &BlockCollection, args: &Args) -> Result<(), CliError> {
    let Some(format) = &args.output_format else {
        return Ok(());
    };
    let path = args
        .output_file
        .as_deref()
        .ok_or(ParseArgError::MissingOutputFile)?;

    match format {
        OutputFormat::IntelHex => blocks.save_file(path, &intel_hex_options(args))?,
        OutputFormat::Binary => {
            hexblocks::save_binary_file(path, blocks.blocks(), &binary_options(args))?
        }
        OutputFormat::Block(index) => {
            let block = blocks.get(*index).ok_or(CliError::BlockIndex {
                index: *index,
                count: blocks.len(),
            })?;
            let selected = std::slice::from_ref(block);
            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            match extension.as_str() {
                "bin" => hexblocks::save_binary_file(path, selected, &binary_options(args))?,
                "hex" => hexblocks::save_intel_hex_file(path, selected, &intel_hex_options(args))?,
                _ => return Err(CliError::UnsupportedExtension(extension)),
            }
        }
    }
    Ok(())
}

/// One line per block: index, address, length, size, hash.
pub(super) fn format_listing(blocks: &BlockCollection) -> String {
    let mut out = String::new();
    for (index, block) in blocks.iter().enumerate() {
        out.push_str(&format!(
            "{index:>4}  {}  {:>10}  {:<20}{}\n",
            block.display_address(),
            block.len(),
            block.display_length().trim_end(),
            block.display_hash()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexblocks::Block;

    #[test]
    fn test_format_listing() {
        let mut blocks = BlockCollection::new();
        blocks.insert(Block::with_data(0x1000, vec![0; 1025]));
        blocks.update_hash(HashKind::Crc32);
        let listing = format_listing(&blocks);
        assert_eq!(
            listing,
            "   0  0x00001000        1025  1 KB 1 B            0E3B57ED\n"
        );
    }

    #[test]
    fn test_intel_hex_options_from_args() {
        let args = Args {
            bytes_per_line: Some(32),
            extended_address: true,
            lf_line_endings: true,
            ..Default::default()
        };
        let options = intel_hex_options(&args);
        assert_eq!(options.bytes_per_line, 32);
        assert_eq!(options.extended_address, ExtendedAddressMode::PerBlock);
        assert_eq!(options.line_ending, LineEnding::Lf);

        let options = intel_hex_options(&Args::default());
        assert_eq!(options.bytes_per_line, 16);
        assert_eq!(options.extended_address, ExtendedAddressMode::Never);
        assert_eq!(options.line_ending, LineEnding::CrLf);
    }
}
