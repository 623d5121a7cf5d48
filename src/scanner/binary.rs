//! Lightweight text/binary classification of file content

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected per file
pub const SNIFF_LEN: u64 = 512;

/// Control characters that never appear in text
fn is_binary_control(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

/// Classify a content prefix as a generic binary payload
///
/// Text never counts as binary. Text means `content_inspector` sees no binary
/// marker and no control byte other than whitespace or escape occurs. Non-text content is still
/// considered recognized when its magic bytes identify a media, document,
/// archive or font type; only unknown payloads and executables are binary.
pub fn is_binary_content(buffer: &[u8]) -> bool {
    if content_inspector::inspect(buffer).is_text()
        && !buffer.iter().copied().any(is_binary_control)
    {
        return false;
    }

    match infer::get(buffer) {
        Some(kind) => matches!(kind.matcher_type(), infer::MatcherType::App),
        None => true,
    }
}

/// Read up to [`SNIFF_LEN`] bytes of `path` and classify them
pub fn sniff_binary(path: &Path) -> Result<bool> {
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;

    let mut buffer = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut buffer)
        .with_context(|| format!("unable to read file {}", path.display()))?;

    Ok(is_binary_content(&buffer))
}
