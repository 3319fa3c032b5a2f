//! Output rendering (header, frames, terminator)

pub mod frame;
pub mod header;

pub use frame::{write_frame, FRAME_DELIMITER};
pub use header::{build_header, write_footer, write_header, END_MARKER};
