//! Per-file output frames.

use crate::error::{DumpError, Result};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Line that opens every frame.
pub const FRAME_DELIMITER: &str = "----";

const COPY_BUF_LEN: usize = 8 * 1024;

/// Write one frame: delimiter, relative path, the raw bytes of `reader`, and a newline.
///
/// `source` only names the file in read errors. Returns the number of content bytes copied.
pub fn write_frame<W: Write, R: Read>(
    out: &mut W,
    relative_path: &str,
    source: &Path,
    reader: &mut R,
) -> Result<u64> {
    write!(out, "{}\n{}\n", FRAME_DELIMITER, relative_path)
        .map_err(|e| DumpError::write(format!("frame header for {}", relative_path), e))?;

    let mut buf = [0u8; COPY_BUF_LEN];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DumpError::FileRead { path: source.to_path_buf(), source: e }),
        };
        out.write_all(&buf[..n])
            .map_err(|e| DumpError::write(format!("content of {}", relative_path), e))?;
        copied += n as u64;
    }

    out.write_all(b"\n")
        .map_err(|e| DumpError::write(format!("frame end for {}", relative_path), e))?;
    Ok(copied)
}
