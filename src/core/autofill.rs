//! Derivation of missing header fields
//!
//! `title` comes from the file name, `date` and `updated` from the
//! version-control history, and `description` (posts only) from the body.
//! Fields already present are never touched.

use crate::config::Layout;
use crate::core::front_matter::quote;
use crate::core::Header;
use crate::error::{Result, SourceToolError};
use log::debug;
use regex::Regex;
use std::path::Path;

pub const TITLE: &str = "title";
pub const DATE: &str = "date";
pub const UPDATED: &str = "updated";
pub const DESCRIPTION: &str = "description";

/// Source of commit timestamps for a file
pub trait HistoryProvider {
    /// Timestamps of commits touching `relative` (relative to `root`),
    /// newest first. Fails with [`SourceToolError::HistoryUnavailable`].
    fn history(&self, root: &Path, relative: &Path) -> Result<Vec<String>>;
}

pub struct Autofill<'a> {
    history: &'a dyn HistoryProvider,
    markup: Regex,
    newlines: Regex,
    description_limit: usize,
    description_suffix: String,
}

impl<'a> Autofill<'a> {
    pub fn new(history: &'a dyn HistoryProvider, layout: &Layout) -> Result<Self> {
        Ok(Self {
            history,
            markup: Regex::new(r"[*#]")?,
            newlines: Regex::new(r"\r?\n")?,
            description_limit: layout.description_limit,
            description_suffix: layout.description_suffix.clone(),
        })
    }

    /// Fill a post header. On error `header` is left unchanged.
    pub fn fill_post(
        &self,
        header: &mut Header,
        file_name: &str,
        root: &Path,
        relative: &Path,
        body: &[u8],
    ) -> Result<()> {
        let dates = self.missing_dates(header, root, relative)?;
        self.fill_title(header, file_name);
        apply_dates(header, dates);
        if !header.contains_key(DESCRIPTION) {
            header.insert(DESCRIPTION, self.description(body));
        }
        Ok(())
    }

    /// Fill a page header. Pages get no description.
    pub fn fill_page(
        &self,
        header: &mut Header,
        file_name: &str,
        root: &Path,
        relative: &Path,
    ) -> Result<()> {
        let dates = self.missing_dates(header, root, relative)?;
        self.fill_title(header, file_name);
        apply_dates(header, dates);
        Ok(())
    }

    /// The title is stored bare; the writer quotes it on output.
    pub fn fill_title(&self, header: &mut Header, file_name: &str) {
        if header.contains_key(TITLE) {
            return;
        }
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        debug!("autofill title {:?} for {}", stem, file_name);
        header.insert(TITLE, stem);
    }

    fn missing_dates(
        &self,
        header: &Header,
        root: &Path,
        relative: &Path,
    ) -> Result<(Option<String>, Option<String>)> {
        let need_date = !header.contains_key(DATE);
        let need_updated = !header.contains_key(UPDATED);
        if !need_date && !need_updated {
            return Ok((None, None));
        }

        let history: Vec<String> = self
            .history
            .history(root, relative)?
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let (Some(newest), Some(oldest)) = (history.first(), history.last()) else {
            return Err(SourceToolError::history_unavailable(
                root.join(relative),
                "no commits touch this file",
            ));
        };
        debug!(
            "history of {}: {} commits, {} .. {}",
            relative.display(),
            history.len(),
            oldest,
            newest
        );

        Ok((
            need_date.then(|| oldest.clone()),
            need_updated.then(|| newest.clone()),
        ))
    }

    /// Up to `description_limit` bytes of body, cut on a char boundary, with
    /// markdown emphasis and headings removed and newlines flattened.
    pub fn description(&self, body: &[u8]) -> String {
        let mut end = body.len().min(self.description_limit);
        let text = loop {
            match std::str::from_utf8(&body[..end]) {
                Ok(text) => break text,
                Err(e) if e.error_len().is_none() => end = e.valid_up_to(),
                Err(e) => break std::str::from_utf8(&body[..e.valid_up_to()]).unwrap_or(""),
            }
        };
        let text = self.markup.replace_all(text, "");
        let text = self.newlines.replace_all(&text, " ");
        quote(&format!("{}{}", text.trim(), self.description_suffix))
    }
}

fn apply_dates(header: &mut Header, (date, updated): (Option<String>, Option<String>)) {
    if let Some(date) = date {
        header.insert(DATE, date);
    }
    if let Some(updated) = updated {
        header.insert(UPDATED, updated);
    }
}
