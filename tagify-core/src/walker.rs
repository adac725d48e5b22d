//! File discovery for template trees.
//!
//! Symbolic links are followed, so a linked template is processed like any
//! other file. Link loops and unreadable entries are logged and skipped.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions processed by `tagify static` unless overridden.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &str = ".html,.htm,.djhtml,.django";

/// Extensions processed by `tagify links` unless overridden.
pub const DEFAULT_LINK_EXTENSIONS: &str = ".html,.htm";

/// Normalizes a comma-separated extension list to lower-case `.ext` entries.
pub fn parse_extensions(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|ext| ext.trim().trim_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .collect()
}

/// True when the file's lower-cased extension is in `extensions`.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
}

/// Lists the template files under `root`, depth-first, sorted by name within
/// each directory. With `recursive == false` only direct children are seen.
pub fn find_template_files(root: &Path, extensions: &[String], recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("Skipping unreadable entry under {}: {}", root.display(), e),
        }
    }

    debug!("Found {} template file(s) under {}", files.len(), root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_extensions_normalizes_entries() {
        assert_eq!(
            parse_extensions("html, .HTM,,..djhtml ,"),
            vec![".html".to_string(), ".htm".to_string(), ".djhtml".to_string()]
        );
        assert_eq!(parse_extensions(DEFAULT_TEMPLATE_EXTENSIONS).len(), 4);
    }

    #[test]
    fn has_extension_ignores_case_and_backups() {
        let exts = parse_extensions(DEFAULT_LINK_EXTENSIONS);
        assert!(has_extension(Path::new("a/INDEX.HTML"), &exts));
        assert!(has_extension(Path::new("b.htm"), &exts));
        assert!(!has_extension(Path::new("index.html.bak"), &exts));
        assert!(!has_extension(Path::new(".html"), &exts));
        assert!(!has_extension(Path::new("README"), &exts));
    }

    #[test]
    fn finds_files_recursively_or_flat() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("partials/deep")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("about.djhtml"), "").unwrap();
        fs::write(root.join("index.html.bak"), "").unwrap();
        fs::write(root.join("style.css"), "").unwrap();
        fs::write(root.join("partials/nav.htm"), "").unwrap();
        fs::write(root.join("partials/deep/footer.django"), "").unwrap();

        let exts = parse_extensions(DEFAULT_TEMPLATE_EXTENSIONS);
        let all = find_template_files(root, &exts, true);
        let names: Vec<String> = all
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            names,
            vec!["about.djhtml", "index.html", "partials/deep/footer.django", "partials/nav.htm"]
        );

        let flat = find_template_files(root, &exts, false);
        assert_eq!(flat.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_templates_and_survives_loops() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("site");
        let shared = dir.path().join("shared");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("base.html"), "").unwrap();
        symlink(shared.join("base.html"), root.join("base.html")).unwrap();
        symlink(&root, root.join("sub").join("loop")).unwrap();

        let exts = parse_extensions(DEFAULT_TEMPLATE_EXTENSIONS);
        let files = find_template_files(&root, &exts, true);
        assert_eq!(files, vec![root.join("base.html")]);
    }
}
