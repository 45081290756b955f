use crate::core::DestinationState;
use crate::error::{Result, SourceToolError};
use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Direct children of `dir` in file-name order
pub fn list_entries(dir: &Path) -> io::Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map_err(io::Error::from))
        .collect()
}

/// Duplicate the tree under `src` into `dst`.
///
/// A missing `src` is treated as empty and returns `Ok(false)`.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<bool> {
    copy_dir_except(src, dst, &[])
}

/// Like [`copy_dir`], leaving out the direct children of `src` named in
/// `skip`.
pub fn copy_dir_except(src: &Path, dst: &Path, skip: &[&str]) -> io::Result<bool> {
    if !src.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dst)?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() != 1 || !skip.iter().any(|name| e.file_name() == OsStr::new(name))
        });

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    debug!("copied {} to {}", src.display(), dst.display());
    Ok(true)
}

pub fn check_source_dir(path: &Path) -> Result<()> {
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| SourceToolError::invalid_source_dir(path, e.to_string()))
}

/// Make sure `path` is an empty directory before anything is written.
///
/// A missing directory is created. A non-empty one is an error unless
/// `force` is set, in which case every child is removed first.
pub fn prepare_destination(path: &Path, force: bool) -> Result<DestinationState> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| SourceToolError::write(path, e))?;
            return Ok(DestinationState::Created);
        }
        Err(e) => return Err(SourceToolError::Io(e)),
    };
    if !metadata.is_dir() {
        return Err(SourceToolError::destination_not_directory(path));
    }

    let entries: Vec<_> = fs::read_dir(path)?.collect::<io::Result<_>>()?;
    if entries.is_empty() {
        return Ok(DestinationState::Empty);
    }
    if !force {
        return Err(SourceToolError::destination_not_empty(path));
    }

    for entry in &entries {
        let child = entry.path();
        let removed = if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&child)
        } else {
            fs::remove_file(&child)
        };
        removed.map_err(|e| SourceToolError::write(&child, e))?;
    }
    Ok(DestinationState::Cleared(entries.len()))
}
