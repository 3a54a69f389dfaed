#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use hexblocks::{Block, BlockCollection, HashKind, IntelHexWriteOptions, parse_intel_hex};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn temp_dir(prefix: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut dir = std::env::temp_dir();
    dir.push(format!("hexblocks_{prefix}_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_file(path: &Path, data: &[u8]) {
    std::fs::write(path, data).unwrap();
}

/// Save blocks as an Intel-HEX file with default options.
pub fn write_hex(path: &Path, blocks: &[Block]) {
    hexblocks::save_intel_hex_file(path, blocks, &IntelHexWriteOptions::default()).unwrap();
}

pub fn read_hex(path: &Path) -> BlockCollection {
    let data = std::fs::read(path).unwrap();
    parse_intel_hex(&data, HashKind::Crc32).unwrap()
}

pub fn run_hexblocks(args: &[String]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hexblocks"))
        .args(args)
        .output()
        .unwrap()
}

pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("hexblocks failed: {stderr}");
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.trim_end().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn summary(blocks: &BlockCollection) -> Vec<(u32, usize)> {
    blocks.iter().map(|b| (b.base_address(), b.len())).collect()
}
