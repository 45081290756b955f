//! Reading native content files and custom body files

use crate::core::front_matter;
use crate::core::Header;
use crate::error::{Result, SourceToolError};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Splits native content files into header and body
#[derive(Debug, Default)]
pub struct FrontMatterReader;

impl FrontMatterReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse the front matter of `src` and stream its body into a new file
    /// at `dst`.
    ///
    /// `dst` is only created once the header parsed cleanly, so a malformed
    /// file leaves nothing behind. Read and parse failures are per-record
    /// errors; failures writing `dst` are fatal.
    pub fn extract(&self, src: &Path, dst: &Path) -> Result<Header> {
        let file = File::open(src).map_err(|e| SourceToolError::read(src, e))?;
        let mut reader = BufReader::new(file);
        let parsed = front_matter::parse(&mut reader, src)?;

        let out = File::create(dst).map_err(|e| SourceToolError::write(dst, e))?;
        let mut out = BufWriter::new(out);
        out.write_all(&parsed.preamble)
            .map_err(|e| SourceToolError::write(dst, e))?;
        copy_stream(&mut reader, &mut out, src, dst)?;
        out.flush().map_err(|e| SourceToolError::write(dst, e))?;

        debug!(
            "extracted {} header fields from {}",
            parsed.header.len(),
            src.display()
        );
        Ok(parsed.header)
    }

    /// Read a body-only file from the custom tree
    pub fn read_body(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceToolError::source_missing(path),
            _ => SourceToolError::read(path, e),
        })
    }
}

/// `io::copy` that keeps read and write failures apart
fn copy_stream<R: BufRead, W: Write>(reader: &mut R, out: &mut W, src: &Path, dst: &Path) -> Result<()> {
    loop {
        let buf = reader
            .fill_buf()
            .map_err(|e| SourceToolError::read(src, e))?;
        if buf.is_empty() {
            return Ok(());
        }
        out.write_all(buf)
            .map_err(|e| SourceToolError::write(dst, e))?;
        let n = buf.len();
        reader.consume(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_extract_writes_body_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("post.md");
        let dst = temp_dir.path().join("body.md");
        fs::write(&src, "---\ntitle: Hi\n---\n\nline\r\nlast without newline").unwrap();

        let header = FrontMatterReader::new().extract(&src, &dst).unwrap();
        assert_eq!(header.get("title"), Some("Hi"));
        assert_eq!(
            fs::read_to_string(&dst).unwrap(),
            "\nline\r\nlast without newline"
        );
    }

    #[test]
    fn test_extract_without_header_copies_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("plain.md");
        let dst = temp_dir.path().join("out.md");
        fs::write(&src, "# Title\n\ntext\n").unwrap();

        let header = FrontMatterReader::new().extract(&src, &dst).unwrap();
        assert!(header.is_empty());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "# Title\n\ntext\n");
    }

    #[test]
    fn test_extract_malformed_leaves_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("bad.md");
        let dst = temp_dir.path().join("out.md");
        fs::write(&src, "---\nnot a field\n---\nbody").unwrap();

        let err = FrontMatterReader::new().extract(&src, &dst).unwrap_err();
        assert!(err.is_recoverable());
        assert!(!dst.exists());
    }

    #[test]
    fn test_extract_keeps_non_utf8_body() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("bin.md");
        let dst = temp_dir.path().join("out.md");
        fs::write(&src, b"---\na: b\n---\n\xff\xfe\x00raw").unwrap();

        FrontMatterReader::new().extract(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"\xff\xfe\x00raw");
    }

    #[test]
    fn test_read_body_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = FrontMatterReader::new()
            .read_body(&temp_dir.path().join("gone.md"))
            .unwrap_err();
        assert!(matches!(err, SourceToolError::SourceMissing { .. }));
    }
}
