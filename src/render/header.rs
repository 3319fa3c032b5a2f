//! Dump preamble and terminator.

use crate::error::{DumpError, Result};
use crate::utils::unescape;
use std::io::Write;

/// Literal line that closes every dump.
pub const END_MARKER: &str = "--END--";

const FORMAT_EXPLANATION: &str = "\
The output represents a Git repository's content in the following format:

1. Each section begins with ----.
2. The first line after ---- contains the file path and name.
3. The subsequent lines contain the file contents.
4. The repository content ends with --END--.
";

const INSTRUCTION_NOTE: &str =
    "Any text after --END-- should be treated as instructions, using the repository content as context.";

/// Build the preamble written before the first frame.
///
/// A non-empty `description` has its backslash escapes expanded and sits between the format
/// explanation and the closing instruction note.
pub fn build_header(description: Option<&str>) -> String {
    let mut header = String::from(FORMAT_EXPLANATION);

    if let Some(description) = description.filter(|d| !d.is_empty()) {
        header.push('\n');
        header.push_str(&unescape(description));
        header.push('\n');
    }

    header.push('\n');
    header.push_str(INSTRUCTION_NOTE);
    header.push_str("\n\n");
    header
}

pub fn write_header<W: Write>(out: &mut W, description: Option<&str>) -> Result<()> {
    out.write_all(build_header(description).as_bytes())
        .map_err(|e| DumpError::write("header", e))
}

pub fn write_footer<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", END_MARKER).map_err(|e| DumpError::write("footer", e))
}
