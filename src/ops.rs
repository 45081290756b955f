//! Directory orchestrators for `init` and `convert`
//!
//! Each walks one part of the source tree, hands every entry to the reader,
//! writer, autofill and tree copier, and sorts the outcome into the run
//! [`Report`]. Recoverable errors become report issues; everything else
//! aborts the run.

use crate::config::{ConvertOptions, InitOptions, Layout};
use crate::core::{
    Autofill, ContentKind, ContentRecord, HistoryProvider, MetadataIndex, Report,
};
use crate::error::{Result, SourceToolError};
use crate::io::{
    check_source_dir, copy_dir, copy_dir_except, list_entries, prepare_destination,
    FrontMatterReader, FrontMatterWriter,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Convert a native tree into the custom layout and write `headers.json`
pub fn run_init(opts: &InitOptions) -> Result<Report> {
    check_source_dir(&opts.source)?;
    check_distinct(&opts.source, &opts.destination)?;

    let mut report = Report::new(&opts.destination);
    report.destination_state = prepare_destination(&opts.destination, opts.force)?;

    let reader = FrontMatterReader::new();
    let index = MetadataIndex {
        posts: init_posts(&reader, opts, &mut report)?,
        pages: init_pages(&reader, opts, &mut report)?,
    };

    let index_path = opts.destination.join(&opts.layout.index_file);
    index.save(&index_path)?;
    info!(
        "wrote {} ({} posts, {} pages)",
        index_path.display(),
        index.posts.len(),
        index.pages.len()
    );
    Ok(report)
}

/// Rebuild a native tree from a custom tree and its `headers.json`
pub fn run_convert(opts: &ConvertOptions, history: &dyn HistoryProvider) -> Result<Report> {
    check_source_dir(&opts.source)?;
    check_distinct(&opts.source, &opts.destination)?;
    let index = MetadataIndex::load(&opts.source.join(&opts.layout.index_file))?;

    let mut report = Report::new(&opts.destination);
    report.destination_state = prepare_destination(&opts.destination, opts.force)?;

    let autofill = if opts.autofill {
        Some(Autofill::new(history, &opts.layout)?)
    } else {
        None
    };
    let ctx = ConvertContext {
        opts,
        reader: FrontMatterReader::new(),
        writer: FrontMatterWriter::new(),
        autofill,
    };

    convert_posts(&ctx, &index.posts, &mut report)?;
    convert_pages(&ctx, &index.pages, &mut report)?;
    Ok(report)
}

/// Keep the result, or file a recoverable error under `path`
fn settle<T>(
    result: Result<T>,
    kind: ContentKind,
    path: &Path,
    report: &mut Report,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            debug!("skipping {} {}: {}", kind, path.display(), e);
            report.skip(kind, path, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn check_distinct(source: &Path, destination: &Path) -> Result<()> {
    let (Ok(source_abs), Ok(destination_abs)) =
        (fs::canonicalize(source), fs::canonicalize(destination))
    else {
        return Ok(());
    };
    if source_abs.starts_with(&destination_abs) {
        return Err(SourceToolError::invalid_source_dir(
            source,
            format!(
                "destination {} is the source directory or one of its parents",
                destination.display()
            ),
        ));
    }
    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Name of a post's asset directory: the file name minus its extension
fn asset_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SourceToolError::write(path, e))
}

fn entry_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| {
            SourceToolError::invalid_record(
                path.to_string_lossy(),
                "file name is not valid UTF-8",
            )
        })
}

fn init_posts(
    reader: &FrontMatterReader,
    opts: &InitOptions,
    report: &mut Report,
) -> Result<Vec<ContentRecord>> {
    let src_dir = opts.source.join(&opts.layout.posts_dir);
    let dst_dir = opts.destination.join(&opts.layout.posts_dir);

    let entries = if src_dir.is_dir() {
        list_entries(&src_dir)
            .map_err(|e| SourceToolError::invalid_source_dir(&src_dir, e.to_string()))?
    } else {
        debug!("no posts directory at {}", src_dir.display());
        Vec::new()
    };
    create_dir(&dst_dir)?;

    let mut records = Vec::new();
    let mut asset_dirs = Vec::new();
    let mut stems = Vec::new();

    for entry in entries {
        let path = entry.path();
        if is_hidden(&entry.file_name().to_string_lossy()) {
            debug!("ignoring hidden entry {}", path.display());
            continue;
        }
        if entry.file_type().is_dir() {
            asset_dirs.push(path.to_path_buf());
            continue;
        }

        let result = entry_name(path).and_then(|name| {
            stems.push(asset_stem(&name).to_string());
            init_post(reader, &src_dir, &dst_dir, name)
        });
        if let Some(record) = settle(result, ContentKind::Post, path, report)? {
            report.record(ContentKind::Post, &record.file_name);
            records.push(record);
        }
    }

    report_orphan_assets(asset_dirs, &stems, report);

    info!("initialized {} posts from {}", records.len(), src_dir.display());
    Ok(records)
}

/// Skip-report every asset directory whose name matches none of `stems`
fn report_orphan_assets<S: AsRef<str>>(
    asset_dirs: Vec<PathBuf>,
    stems: &[S],
    report: &mut Report,
) {
    for dir in asset_dirs {
        let owned = dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| stems.iter().any(|s| s.as_ref() == n));
        if !owned {
            report.skip(
                ContentKind::Post,
                &dir,
                SourceToolError::invalid_record(
                    dir.to_string_lossy(),
                    "asset directory without a matching post",
                ),
            );
        }
    }
}

fn init_post(
    reader: &FrontMatterReader,
    src_dir: &Path,
    dst_dir: &Path,
    name: String,
) -> Result<ContentRecord> {
    let header = reader.extract(&src_dir.join(&name), &dst_dir.join(&name))?;

    let stem = asset_stem(&name);
    let src_assets = src_dir.join(stem);
    copy_dir(&src_assets, &dst_dir.join(stem))
        .map_err(|e| SourceToolError::asset_copy(&src_assets, e.to_string()))?;

    Ok(ContentRecord::new(name, header))
}

fn init_pages(
    reader: &FrontMatterReader,
    opts: &InitOptions,
    report: &mut Report,
) -> Result<Vec<ContentRecord>> {
    let layout = &opts.layout;
    let entries = list_entries(&opts.source)
        .map_err(|e| SourceToolError::invalid_source_dir(&opts.source, e.to_string()))?;

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_dir() || name == layout.posts_dir.as_str() || is_hidden(&name) {
            continue;
        }
        if same_dir(path, &opts.destination) {
            continue;
        }

        let result = entry_name(path)
            .and_then(|name| init_page(reader, layout, path, &opts.destination, name));
        if let Some(record) = settle(result, ContentKind::Page, path, report)? {
            report.record(ContentKind::Page, &record.file_name);
            records.push(record);
        }
    }

    info!("initialized {} pages from {}", records.len(), opts.source.display());
    Ok(records)
}

fn init_page(
    reader: &FrontMatterReader,
    layout: &Layout,
    page_dir: &Path,
    destination: &Path,
    name: String,
) -> Result<ContentRecord> {
    let src_index = page_dir.join(&layout.page_index);
    if !src_index.is_file() {
        return Err(SourceToolError::invalid_page(
            page_dir,
            format!("{} not found", layout.page_index),
        ));
    }

    let dst_page = destination.join(&name);
    create_dir(&dst_page)?;
    let header = reader.extract(&src_index, &dst_page.join(&layout.page_index))?;
    copy_dir_except(page_dir, &dst_page, &[layout.page_index.as_str()])
        .map_err(|e| SourceToolError::asset_copy(page_dir, e.to_string()))?;

    Ok(ContentRecord::new(name, header))
}

struct ConvertContext<'a> {
    opts: &'a ConvertOptions,
    reader: FrontMatterReader,
    writer: FrontMatterWriter,
    autofill: Option<Autofill<'a>>,
}

fn convert_posts(ctx: &ConvertContext, records: &[ContentRecord], report: &mut Report) -> Result<()> {
    let layout = &ctx.opts.layout;
    let src_dir = ctx.opts.source.join(&layout.posts_dir);
    let dst_dir = ctx.opts.destination.join(&layout.posts_dir);
    create_dir(&dst_dir)?;

    for record in records {
        let src_path = src_dir.join(&record.file_name);
        let result = convert_post(ctx, record, &dst_dir);
        if settle(result, ContentKind::Post, &src_path, report)?.is_none() {
            continue;
        }
        report.record(ContentKind::Post, &record.file_name);

        let stem = asset_stem(&record.file_name);
        let src_assets = src_dir.join(stem);
        if let Err(e) = copy_dir(&src_assets, &dst_dir.join(stem)) {
            report.incomplete(
                ContentKind::Post,
                &src_path,
                SourceToolError::asset_copy(&src_assets, e.to_string()),
            );
        }
    }

    if src_dir.is_dir() {
        let asset_dirs = list_entries(&src_dir)
            .map_err(|e| SourceToolError::invalid_source_dir(&src_dir, e.to_string()))?
            .into_iter()
            .filter(|e| e.file_type().is_dir() && !is_hidden(&e.file_name().to_string_lossy()))
            .map(|e| e.into_path())
            .collect();
        let stems: Vec<&str> = records.iter().map(|r| asset_stem(&r.file_name)).collect();
        report_orphan_assets(asset_dirs, &stems, report);
    }

    info!("converted {} posts into {}", report.posts.len(), dst_dir.display());
    Ok(())
}

fn convert_post(ctx: &ConvertContext, record: &ContentRecord, dst_dir: &Path) -> Result<()> {
    record.validate_name()?;
    let relative = Path::new(&ctx.opts.layout.posts_dir).join(&record.file_name);
    let body = ctx.reader.read_body(&ctx.opts.source.join(&relative))?;

    let mut header = record.header.clone();
    if let Some(autofill) = &ctx.autofill {
        autofill.fill_post(&mut header, &record.file_name, &ctx.opts.source, &relative, &body)?;
    }
    ctx.writer
        .write_file(&dst_dir.join(&record.file_name), &header, &body)
}

fn convert_pages(ctx: &ConvertContext, records: &[ContentRecord], report: &mut Report) -> Result<()> {
    let layout = &ctx.opts.layout;

    for record in records {
        let src_page = ctx.opts.source.join(&record.file_name);
        let dst_page = ctx.opts.destination.join(&record.file_name);
        let result = convert_page(ctx, record, &dst_page);
        if settle(result, ContentKind::Page, &src_page, report)?.is_none() {
            continue;
        }
        report.record(ContentKind::Page, &record.file_name);

        if let Err(e) = copy_dir_except(&src_page, &dst_page, &[layout.page_index.as_str()]) {
            report.incomplete(
                ContentKind::Page,
                &src_page,
                SourceToolError::asset_copy(&src_page, e.to_string()),
            );
        }
    }

    info!(
        "converted {} pages into {}",
        report.pages.len(),
        ctx.opts.destination.display()
    );
    Ok(())
}

fn convert_page(ctx: &ConvertContext, record: &ContentRecord, dst_page: &Path) -> Result<()> {
    record.validate_name()?;
    let layout = &ctx.opts.layout;
    let relative: PathBuf = Path::new(&record.file_name).join(&layout.page_index);
    let body = ctx.reader.read_body(&ctx.opts.source.join(&relative))?;

    let mut header = record.header.clone();
    if let Some(autofill) = &ctx.autofill {
        autofill.fill_page(&mut header, &record.file_name, &ctx.opts.source, &relative)?;
    }
    create_dir(dst_page)?;
    ctx.writer
        .write_file(&dst_page.join(&layout.page_index), &header, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_stem() {
        assert_eq!(asset_stem("hello.md"), "hello");
        assert_eq!(asset_stem("v1.2-notes.md"), "v1.2-notes");
        assert_eq!(asset_stem("README"), "README");
    }

    #[test]
    fn test_settle_routes_by_recoverability() {
        let mut report = Report::new("out");
        let path = Path::new("_posts/a.md");

        let kept = settle(Ok(1), ContentKind::Post, path, &mut report).unwrap();
        assert_eq!(kept, Some(1));

        let skipped: Option<()> = settle(
            Err(SourceToolError::invalid_front_matter(path, "bad")),
            ContentKind::Post,
            path,
            &mut report,
        )
        .unwrap();
        assert!(skipped.is_none());
        assert_eq!(report.skipped().count(), 1);

        let fatal: Result<Option<()>> = settle(
            Err(SourceToolError::destination_not_empty("out")),
            ContentKind::Post,
            path,
            &mut report,
        );
        assert!(fatal.is_err());
    }
}
