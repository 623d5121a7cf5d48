//! Result stream writer
//!
//! stdout carries nothing but the ranked paths, one per line; diagnostics go
//! through `tracing` to stderr.

use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};

use crate::scanner::FileRecord;

/// Write one path per line to `writer`
pub fn write_paths<W: Write>(writer: W, files: &[FileRecord]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for file in files {
        writer.write_all(file.path.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write the ranked paths to stdout
///
/// A reader that goes away early (`prols | head`) is not an error.
pub fn emit(files: &[FileRecord]) -> Result<()> {
    match write_paths(io::stdout().lock(), files) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("unable to write results"),
    }
}
