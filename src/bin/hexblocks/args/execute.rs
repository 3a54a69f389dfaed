use tracing::{debug, info};

use super::error::CliError;
use super::ini::{apply_ini, default_hash, load_ini};
use super::io::{format_listing, load_blocks, write_output_for_args};
use super::types::{Args, ParseArgError};

impl Args {
    pub fn execute(&self) -> Result<(), CliError> {
        let mut args = self.clone();
        if let Some(ref path) = self.ini_file {
            let values = load_ini(path)?;
            apply_ini(&mut args, &values)?;
        }
        args.run_pipeline()
    }

    fn run_pipeline(&self) -> Result<(), CliError> {
        let input = self
            .input_file
            .as_deref()
            .ok_or(ParseArgError::MissingInputFile)?;
        let hash = default_hash(self);

        let mut blocks = load_blocks(input, &self.append_files, hash)?;
        info!(
            "loaded {} block(s), {} byte(s) from {}",
            blocks.len(),
            blocks.total_bytes(),
            input.display()
        );

        self.apply_delete(&mut blocks)?;
        if !self.silent {
            print!("{}", format_listing(&blocks));
        }
        write_output_for_args(&blocks, self)
    }

    fn apply_delete(&self, blocks: &mut hexblocks::BlockCollection) -> Result<(), CliError> {
        let mut indices = self.delete.clone();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let count = blocks.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= count) {
            return Err(CliError::BlockIndex { index, count });
        }
        for index in indices {
            if let Some(block) = blocks.remove(index) {
                debug!("deleted block {index} at {}", block.display_address());
            }
        }
        Ok(())
    }
}
