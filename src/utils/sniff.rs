//! Content sniffing for text/binary classification.
//!
//! Follows the usual web content-sniffing order: markup signatures first, then byte-order
//! marks and well-known magic numbers, then a scan for binary control bytes. Only the
//! first [`SNIFF_LEN`] bytes of a file are ever considered.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes sampled from each file.
pub const SNIFF_LEN: usize = 512;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Tags that mark a sample as HTML when they open it (case-insensitive, after whitespace).
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Exact leading-byte signatures, checked in order.
const MAGIC: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"%!PS-Adobe-", "application/postscript"),
    (b"\xFE\xFF", "text/plain; charset=utf-16be"),
    (b"\xFF\xFE", "text/plain; charset=utf-16le"),
    (b"\xEF\xBB\xBF", TEXT_PLAIN),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"\x00\x00\x02\x00", "image/x-icon"),
    (b"BM", "image/bmp"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"ID3", "audio/mpeg"),
    (b"OggS\x00", "application/ogg"),
    (b"MThd\x00\x00\x00\x06", "audio/midi"),
    (b"\x1A\x45\xDF\xA3", "video/webm"),
    (b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    (b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
    (b"PK\x03\x04", "application/zip"),
    (b"7z\xBC\xAF\x27\x1C", "application/x-7z-compressed"),
    (b"\x00asm", "application/wasm"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"\x7FELF", "application/x-executable"),
];

/// Result of sampling a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Text,
    Binary,
}

impl Classification {
    /// Anything outside `text/*` is binary.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("text/") {
            Self::Text
        } else {
            Self::Binary
        }
    }

    pub fn is_binary(self) -> bool {
        self == Self::Binary
    }
}

/// Classify the file at `path` by sniffing its first bytes.
///
/// Files that cannot be opened or read are classified as text.
pub fn classify_file(path: &Path) -> Classification {
    match sample_file(path) {
        Ok(sample) => Classification::from_content_type(sniff_content_type(&sample)),
        Err(err) => {
            tracing::debug!("Could not sample {}, treating as text: {}", path.display(), err);
            Classification::Text
        }
    }
}

fn sample_file(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut sample)?;
    Ok(sample)
}

/// Sniff a MIME content type from a byte sample. Only the first [`SNIFF_LEN`] bytes count.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    let first_non_ws = data.iter().position(|&b| !is_ws(b)).unwrap_or(data.len());
    let trimmed = &data[first_non_ws..];

    if HTML_TAGS.iter().any(|tag| is_html_tag(trimmed, tag)) {
        return "text/html; charset=utf-8";
    }
    if trimmed.starts_with(b"<?xml") {
        return "text/xml; charset=utf-8";
    }

    if let Some(&(_, content_type)) = MAGIC.iter().find(|(magic, _)| data.starts_with(magic)) {
        return content_type;
    }

    if let Some(content_type) = sniff_container(data) {
        return content_type;
    }

    if trimmed.iter().any(|&b| is_binary_byte(b)) {
        OCTET_STREAM
    } else {
        TEXT_PLAIN
    }
}

/// RIFF and ISO base media containers carry their type a few bytes in.
fn sniff_container(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 12 && data.starts_with(b"RIFF") {
        return match &data[8..12] {
            b"WEBP" => Some("image/webp"),
            b"WAVE" => Some("audio/wave"),
            b"AVI " => Some("video/avi"),
            _ => None,
        };
    }
    if is_mp4(data) {
        return Some("video/mp4");
    }
    None
}

/// An `ftyp` box whose declared size fits the sample, with an `mp4` major or compatible brand.
fn is_mp4(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if box_size < 12 || box_size % 4 != 0 || data.len() < box_size {
        return false;
    }
    // Offset 12 holds the minor version, so compatible brands start at 16.
    std::iter::once(8)
        .chain((16..box_size).step_by(4))
        .any(|offset| data.get(offset..offset + 3) == Some(b"mp4".as_slice()))
}

/// Case-insensitive tag prefix followed by a tag-terminating byte.
fn is_html_tag(data: &[u8], tag: &[u8]) -> bool {
    if data.len() < tag.len() + 1 {
        return false;
    }
    let matches_tag = data.iter().zip(tag).all(|(&d, &t)| d.to_ascii_uppercase() == t);
    matches_tag && matches!(data[tag.len()], b' ' | b'>')
}

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_text() {
        assert_eq!(sniff_content_type(b"fn main() {}\n"), TEXT_PLAIN);
        assert_eq!(sniff_content_type("héllo wörld 🚀".as_bytes()), TEXT_PLAIN);
    }

    #[test]
    fn test_empty_is_text() {
        assert_eq!(sniff_content_type(b""), TEXT_PLAIN);
        assert_eq!(Classification::from_content_type(sniff_content_type(b"")), Classification::Text);
    }

    #[test]
    fn test_markup_is_text() {
        assert_eq!(sniff_content_type(b"  <html><body></body></html>"), "text/html; charset=utf-8");
        assert_eq!(sniff_content_type(b"<!doctype html>\n"), "text/html; charset=utf-8");
        assert_eq!(sniff_content_type(b"<?xml version=\"1.0\"?>"), "text/xml; charset=utf-8");
        // `<a` must be followed by a space or `>` to count as HTML
        assert_eq!(sniff_content_type(b"<abc"), TEXT_PLAIN);
    }

    #[test]
    fn test_magic_numbers_are_binary() {
        let png = b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00\x00\x0DIHDR";
        assert_eq!(sniff_content_type(png), "image/png");
        assert_eq!(sniff_content_type(b"GIF89a...."), "image/gif");
        assert_eq!(sniff_content_type(b"%PDF-1.7\n"), "application/pdf");
        assert_eq!(sniff_content_type(b"PK\x03\x04rest"), "application/zip");
        assert_eq!(sniff_content_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(
            sniff_content_type(b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom"),
            "video/mp4"
        );
        assert_eq!(
            sniff_content_type(b"\x00\x00\x00\x14ftypisom\x00\x00\x02\x00mp41"),
            "video/mp4"
        );
    }

    #[test]
    fn test_ftyp_without_valid_box_is_text() {
        assert_eq!(sniff_content_type(b"abcdftyp some text here"), TEXT_PLAIN);
        // declared box size larger than the sample
        assert_eq!(sniff_content_type(b"\x00\x00\x01\x00ftypmp42"), OCTET_STREAM);
        // valid box, but no mp4 brand
        assert_eq!(sniff_content_type(b"\x00\x00\x00\x10ftypqt  \x00\x00\x00\x00"), OCTET_STREAM);
    }

    #[test]
    fn test_control_bytes_are_binary() {
        assert_eq!(sniff_content_type(b"abc\x00def"), OCTET_STREAM);
        assert_eq!(sniff_content_type(b"\x01\x02\x03"), OCTET_STREAM);
        // tab, newline, form feed, carriage return and escape are not binary bytes
        assert_eq!(sniff_content_type(b"a\tb\nc\x0Cd\re\x1B[0m"), TEXT_PLAIN);
    }

    #[test]
    fn test_byte_order_marks_are_text() {
        assert_eq!(sniff_content_type(b"\xFF\xFEh\x00i\x00"), "text/plain; charset=utf-16le");
        assert_eq!(sniff_content_type(b"\xFE\xFF\x00h\x00i"), "text/plain; charset=utf-16be");
        assert_eq!(sniff_content_type(b"\xEF\xBB\xBFhello"), TEXT_PLAIN);
    }

    #[test]
    fn test_only_first_512_bytes_are_sampled() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0);
        assert_eq!(sniff_content_type(&data), TEXT_PLAIN);
    }

    #[test]
    fn test_classify_file() {
        let mut text = NamedTempFile::new().unwrap();
        text.write_all(b"Normal text file").unwrap();
        text.flush().unwrap();
        assert_eq!(classify_file(text.path()), Classification::Text);

        let mut binary = NamedTempFile::new().unwrap();
        binary.write_all(&[0x00, 0x01, 0x02, 0x03]).unwrap();
        binary.flush().unwrap();
        assert!(classify_file(binary.path()).is_binary());
    }

    #[test]
    fn test_unreadable_file_is_text() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("missing.bin");
        assert_eq!(classify_file(&missing), Classification::Text);
    }
}
