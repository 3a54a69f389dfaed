use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::io::{IntelHexWriteOptions, read_intel_hex, save_intel_hex_file};
use crate::{Block, Error, HashKind};

/// Blocks ordered by ascending base address.
///
/// Insertion keeps the order by placing a new block before the first block
/// whose base address is strictly greater. Equal base addresses are allowed
/// and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCollection {
    blocks: Vec<Block>,
}

impl BlockCollection {
    pub fn new() -> Self {
        Self { blocks: vec![] }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Insert in address order and return the index the block landed at.
    pub fn insert(&mut self, block: Block) -> usize {
        let index = self
            .blocks
            .iter()
            .position(|b| b.base_address() > block.base_address())
            .unwrap_or(self.blocks.len());
        self.blocks.insert(index, block);
        index
    }

    pub fn remove(&mut self, index: usize) -> Option<Block> {
        (index < self.blocks.len()).then(|| self.blocks.remove(index))
    }

    pub fn total_bytes(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Recompute every block's hash. Returns the indices whose hash changed.
    pub fn update_hash(&mut self, kind: HashKind) -> Vec<usize> {
        self.blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(index, block)| block.update_hash(kind).then_some(index))
            .collect()
    }

    /// Load Intel-HEX lines into the collection. Without `append`, existing
    /// blocks are dropped first.
    pub fn load<R: BufRead>(
        &mut self,
        reader: R,
        hash: HashKind,
        append: bool,
    ) -> Result<(), Error> {
        if !append {
            self.clear();
        }
        read_intel_hex(reader, self, hash)
    }

    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        hash: HashKind,
        append: bool,
    ) -> Result<(), Error> {
        let file = File::open(path.as_ref())?;
        self.load(BufReader::new(file), hash, append)
    }

    pub fn save_file(
        &self,
        path: impl AsRef<Path>,
        options: &IntelHexWriteOptions,
    ) -> Result<(), Error> {
        save_intel_hex_file(path, &self.blocks, options)
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
