use crate::HashKind;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// A contiguous run of bytes anchored at an absolute address.
///
/// The cached hash is only refreshed by [`Block::update_hash`]; appending data
/// leaves it stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    base_address: u32,
    data: Vec<u8>,
    hash: String,
}

impl Block {
    pub fn new(base_address: u32) -> Self {
        Self::with_data(base_address, Vec::new())
    }

    pub fn with_data(base_address: u32, data: Vec<u8>) -> Self {
        debug_assert!(
            data.len() <= u32::MAX as usize,
            "block data exceeds u32::MAX bytes"
        );
        Self {
            base_address,
            data,
            hash: String::new(),
        }
    }

    pub fn base_address(&self) -> u32 {
        self.base_address
    }

    /// First address past the block, or `None` if that lies beyond the u32 range.
    pub fn end_address(&self) -> Option<u32> {
        u32::try_from(self.data.len())
            .ok()
            .and_then(|len| self.base_address.checked_add(len))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn append(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    /// Cached hash string, empty until the first update.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Recompute the cached hash. Returns `true` if the stored string changed.
    pub fn update_hash(&mut self, kind: HashKind) -> bool {
        let hash = kind.hex_digest(&self.data);
        if hash == self.hash {
            return false;
        }
        self.hash = hash;
        true
    }

    pub fn display_address(&self) -> String {
        format!("0x{:08X}", self.base_address)
    }

    pub fn display_length(&self) -> String {
        format_size(self.data.len())
    }

    pub fn display_hash(&self) -> &str {
        &self.hash
    }
}

/// Render a byte count as GB/MB/KB/B parts, largest first, skipping units
/// that would be zero. Each part is followed by a space; `0` renders empty.
pub fn format_size(len: usize) -> String {
    let mut result = String::new();
    let mut remaining = len as u64;
    for (power, unit) in SIZE_UNITS.iter().enumerate().rev() {
        let scale = 1u64 << (10 * power);
        if remaining >= scale {
            result.push_str(&format!("{} {} ", remaining / scale, unit));
            remaining %= scale;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 8] = [0x00, 0x6C, 0x07, 0x20, 0x95, 0xB8, 0x10, 0x08];

    #[test]
    fn test_new_block_is_empty() {
        let block = Block::new(0);
        assert_eq!(block.base_address(), 0);
        assert_eq!(block.len(), 0);
        assert!(block.is_empty());
        assert_eq!(block.hash(), "");
    }

    #[test]
    fn test_append_and_bytes() {
        let mut block = Block::new(0x1000);
        block.append(&SAMPLE);
        assert_eq!(block.base_address(), 0x1000);
        assert_eq!(block.len(), SAMPLE.len());
        assert_eq!(block.bytes(), &SAMPLE);
        assert_eq!(block.end_address(), Some(0x1008));
        assert_eq!(block.display_address(), "0x00001000");
        assert_eq!(block.display_length(), "8 B ");
    }

    #[test]
    fn test_end_address_overflow() {
        let block = Block::with_data(0xFFFF_FFFF, vec![0xAA]);
        assert_eq!(block.end_address(), None);
        let block = Block::with_data(0xFFFF_FFFE, vec![0xAA]);
        assert_eq!(block.end_address(), Some(0xFFFF_FFFF));
    }

    #[test]
    fn test_update_hash_reports_change() {
        let mut block = Block::new(0x1000);
        block.append(&SAMPLE);

        assert!(block.update_hash(HashKind::Crc32));
        assert_eq!(block.display_hash(), "F03AC219");
        assert!(!block.update_hash(HashKind::Crc32));

        assert!(block.update_hash(HashKind::Sha256));
        assert_eq!(
            block.display_hash(),
            "57F92927468C9B30CDA76613BE1A2322B93FE237B26FE6C882F2F97837B90CF3"
        );
    }

    #[test]
    fn test_hash_is_stale_after_append() {
        let mut block = Block::with_data(0, b"1".to_vec());
        block.update_hash(HashKind::Crc32);
        block.append(b"2");
        assert_eq!(block.hash(), "83DCEFB7");
        block.update_hash(HashKind::Crc32);
        assert_eq!(block.hash(), "4F5344CD");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "");
        assert_eq!(format_size(1023), "1023 B ");
        assert_eq!(format_size(1024), "1 KB ");
        assert_eq!(format_size(1025), "1 KB 1 B ");
        assert_eq!(format_size(3 * 1024 * 1024 + 5), "3 MB 5 B ");
        assert_eq!(format_size(1 << 30), "1 GB ");
    }
}
