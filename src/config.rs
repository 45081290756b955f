//! Layout constants and per-run options

use std::path::PathBuf;

/// Names and limits describing the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Subdirectory of the root holding posts
    pub posts_dir: String,
    /// Metadata index file at the root of the custom tree
    pub index_file: String,
    /// Content file inside each page directory
    pub page_index: String,
    /// Maximum body bytes used for an autofilled description
    pub description_limit: usize,
    /// Appended to every autofilled description
    pub description_suffix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            posts_dir: "_posts".to_string(),
            index_file: "headers.json".to_string(),
            page_index: "index.md".to_string(),
            description_limit: 350,
            description_suffix: " ......".to_string(),
        }
    }
}

/// Options for `init` (native layout -> custom layout)
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Clear a non-empty destination instead of failing
    pub force: bool,
    pub layout: Layout,
}

impl InitOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            force: false,
            layout: Layout::default(),
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// Options for `convert` (custom layout -> native layout)
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub force: bool,
    /// Fill missing title/date/updated/description fields
    pub autofill: bool,
    pub layout: Layout,
}

impl ConvertOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            force: false,
            autofill: true,
            layout: Layout::default(),
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn autofill(mut self, autofill: bool) -> Self {
        self.autofill = autofill;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}
