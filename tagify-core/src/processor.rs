//! Per-file processing: read, rewrite in memory, back up, write.
//!
//! A file is only written when its rewritten content differs from what was
//! read. The backup, when requested, receives the exact bytes that were read
//! and is overwritten on later runs.

use anyhow::{Context, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RewriteSummaryItem;
use crate::engine::RewriteEngine;

const BACKUP_SUFFIX: &str = ".bak";
const TMP_SUFFIX: &str = ".tagify.tmp";

/// Options for the ergonomic `process_file` API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Write the original content to `<path>.bak` before overwriting.
    pub backup: bool,
    /// Rewrite in memory only; never touch the filesystem.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// No rule changed the content; nothing was written.
    Unchanged,
    /// The file was rewritten, with the backup path if one was created.
    Updated { backup_path: Option<PathBuf> },
    /// Dry run: the file would have been rewritten.
    WouldUpdate,
}

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    pub summary: Vec<RewriteSummaryItem>,
    pub original: String,
    pub rewritten: String,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self.status, FileStatus::Unchanged)
    }
}

/// `index.html` → `index.html.bak`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Replaces `path` through a sibling temp file and a rename, keeping the
/// original permissions. A symlinked `path` has its target replaced.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let path = target.as_path();
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(TMP_SUFFIX);
    let tmp_path = PathBuf::from(tmp_name);

    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::set_permissions(&tmp_path, permissions)
        .with_context(|| format!("Failed to set permissions on {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

/// Runs `engine` over one file and persists the result when it changed.
pub fn process_file(
    engine: &dyn RewriteEngine,
    path: &Path,
    options: &ProcessOptions,
) -> Result<FileOutcome> {
    let source_id = path.display().to_string();
    debug!("Reading {}", source_id);
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", source_id))?;

    let rewrite = engine.rewrite(&original, &source_id)?;

    if rewrite.content == original {
        debug!("No changes for {}", source_id);
        return Ok(FileOutcome {
            path: path.to_path_buf(),
            status: FileStatus::Unchanged,
            summary: rewrite.summary,
            rewritten: rewrite.content,
            original,
        });
    }

    if options.dry_run {
        info!("Dry run: {} would be updated by the {} engine", source_id, engine.name());
        return Ok(FileOutcome {
            path: path.to_path_buf(),
            status: FileStatus::WouldUpdate,
            summary: rewrite.summary,
            rewritten: rewrite.content,
            original,
        });
    }

    let backup_path = if options.backup {
        let backup = backup_path_for(path);
        fs::write(&backup, &original)
            .with_context(|| format!("Failed to write backup {}", backup.display()))?;
        debug!("Wrote backup {}", backup.display());
        Some(backup)
    } else {
        None
    };

    write_atomically(path, &rewrite.content)?;
    info!("Updated {} with the {} engine", source_id, engine.name());

    Ok(FileOutcome {
        path: path.to_path_buf(),
        status: FileStatus::Updated { backup_path },
        summary: rewrite.summary,
        rewritten: rewrite.content,
        original,
    })
}
