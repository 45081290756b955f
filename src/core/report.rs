//! Outcome of one `init` or `convert` run
//!
//! Per-record failures are collected here instead of being logged inline.
//! [`Report::render`] emits them through the `log` facade once the run is
//! over.

use crate::error::SourceToolError;
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Page,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
            Self::Page => write!(f, "page"),
        }
    }
}

/// How much of a record made it to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Nothing recorded for this entry
    Skipped,
    /// Content written but assets are missing
    Incomplete,
}

#[derive(Debug)]
pub struct Issue {
    pub kind: IssueKind,
    pub content: ContentKind,
    pub path: PathBuf,
    pub reason: SourceToolError,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::Skipped => "skipped",
            IssueKind::Incomplete => "incomplete",
        };
        write!(
            f,
            "{} {} \"{}\": {}, you may need to handle it manually",
            what,
            self.content,
            self.path.display(),
            self.reason
        )
    }
}

/// State the destination directory was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationState {
    #[default]
    Empty,
    /// Did not exist and was created
    Created,
    /// Held this many entries, all removed under `--force`
    Cleared(usize),
}

#[derive(Debug, Default)]
pub struct Report {
    pub destination: PathBuf,
    pub destination_state: DestinationState,
    pub posts: Vec<String>,
    pub pages: Vec<String>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, content: ContentKind, name: impl Into<String>) {
        match content {
            ContentKind::Post => self.posts.push(name.into()),
            ContentKind::Page => self.pages.push(name.into()),
        }
    }

    pub fn skip(&mut self, content: ContentKind, path: impl Into<PathBuf>, reason: SourceToolError) {
        self.issues.push(Issue {
            kind: IssueKind::Skipped,
            content,
            path: path.into(),
            reason,
        });
    }

    pub fn incomplete(
        &mut self,
        content: ContentKind,
        path: impl Into<PathBuf>,
        reason: SourceToolError,
    ) {
        self.issues.push(Issue {
            kind: IssueKind::Incomplete,
            content,
            path: path.into(),
            reason,
        });
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Skipped)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Emit warnings for every issue and a summary line
    pub fn render(&self) {
        match self.destination_state {
            DestinationState::Created => warn!(
                "destination directory {} did not exist and was created",
                self.destination.display()
            ),
            DestinationState::Cleared(n) => warn!(
                "removed {} existing entries from {}",
                n,
                self.destination.display()
            ),
            DestinationState::Empty => {}
        }
        for issue in &self.issues {
            warn!("{}", issue);
        }
        info!(
            "{} posts, {} pages written to {} ({} issues)",
            self.posts.len(),
            self.pages.len(),
            self.destination.display(),
            self.issues.len()
        );
    }
}
