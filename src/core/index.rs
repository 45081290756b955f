//! The metadata index (`headers.json`)
//!
//! Written once at the end of `init` and read once at the start of
//! `convert`. It is the only state shared between the two directions.

use crate::core::Header;
use crate::error::{Result, SourceToolError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

/// Front matter of one post or page.
///
/// `file_name` is the leaf name of a post (`hello.md`) or the directory name
/// of a page (`about`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(rename = "filename")]
    pub file_name: String,
    #[serde(default)]
    pub header: Header,
}

impl ContentRecord {
    pub fn new(file_name: impl Into<String>, header: Header) -> Self {
        Self {
            file_name: file_name.into(),
            header,
        }
    }

    /// Reject names that would escape the directory they are joined onto
    pub fn validate_name(&self) -> Result<()> {
        let reason = if self.file_name.is_empty() {
            Some("empty file name")
        } else {
            let mut components = Path::new(&self.file_name).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => None,
                _ => Some("file name must be a single path component"),
            }
        };
        match reason {
            Some(reason) => Err(SourceToolError::invalid_record(&self.file_name, reason)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataIndex {
    #[serde(default)]
    pub posts: Vec<ContentRecord>,
    #[serde(default)]
    pub pages: Vec<ContentRecord>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|e| SourceToolError::invalid_index("<memory>", e.to_string()))?;
        String::from_utf8(buf)
            .map_err(|e| SourceToolError::invalid_index("<memory>", e.to_string()))
    }

    pub fn from_json(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SourceToolError::invalid_index(path, e.to_string()))
    }

    /// Load an index file. A missing or malformed file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SourceToolError::invalid_index(path, e.to_string()))?;
        Self::from_json(&content, path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SourceToolError::write(path, e))
    }
}
