//! Writing native content files (front matter block followed by body)

use crate::core::autofill::TITLE;
use crate::core::front_matter;
use crate::core::Header;
use crate::error::{Result, SourceToolError};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for the front matter writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Keys whose values are written double-quoted
    pub quoted_keys: Vec<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            quoted_keys: vec![TITLE.to_string()],
        }
    }
}

/// Front matter writer
#[derive(Debug, Default)]
pub struct FrontMatterWriter {
    config: WriterConfig,
}

impl FrontMatterWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Serialize `header` and `body` into a buffer
    pub fn write_to<W: Write>(&self, out: &mut W, header: &Header, body: &[u8]) -> std::io::Result<()> {
        let quoted: Vec<&str> = self.config.quoted_keys.iter().map(String::as_str).collect();
        front_matter::format(out, header, &quoted)?;
        out.write_all(body)
    }

    /// Create `dst` holding the header block followed by `body`.
    /// Any failure here is fatal for the run.
    pub fn write_file(&self, dst: &Path, header: &Header, body: &[u8]) -> Result<()> {
        let file = File::create(dst).map_err(|e| SourceToolError::write(dst, e))?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out, header, body)
            .and_then(|_| out.flush())
            .map_err(|e| SourceToolError::write(dst, e))?;
        debug!("wrote {} with {} header fields", dst.display(), header.len());
        Ok(())
    }
}
