// tagify/tests/cli_integration_tests.rs
//! Command-line integration tests for the `tagify` binary.
//!
//! Each test builds a throwaway template tree with `tempfile`, runs the real
//! executable through `assert_cmd` and checks both the report on stdout and the
//! files left on disk. Output is passed through `strip_ansi_escapes` before
//! comparison.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn tagify() -> Command {
    let mut cmd = Command::cargo_bin("tagify").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn stdout_of(args: &[&str]) -> String {
    let output = tagify().args(args).output().unwrap();
    assert!(output.status.success(), "tagify {:?} failed: {:?}", args, output);
    String::from_utf8(strip_ansi_escapes_fn(&output.stdout)).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn static_converts_directory_and_keeps_exact_backup() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("index.html");
    let original = "<!DOCTYPE html>\r\n<link rel=\"stylesheet\" href=\"css/site.css\">\r\n<img src=\"photo.jpg\">\r\n";
    fs::write(&page, original)?;

    let out = stdout_of(&["static", path_str(dir.path())]);
    assert!(out.contains(&format!("Processing templates in {}...", dir.path().display())));
    assert!(out.contains(&format!("Created backup at {}.bak", page.display())));
    assert!(out.contains("Updated 1 files with static references."));

    let converted = fs::read_to_string(&page)?;
    assert!(converted.contains("{% load static %}"));
    assert!(converted.contains("href=\"{% static 'css/site.css' %}\""));
    assert!(converted.contains("<img src=\"{% static 'photo.jpg' %}\">"));
    assert_eq!(fs::read(dir.path().join("index.html.bak"))?, original.as_bytes());
    Ok(())
}

#[test]
fn static_second_run_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("about.html");
    fs::write(&page, "<html>\n<script src=\"js/app.js\"></script>\n</html>\n")?;

    stdout_of(&["static", path_str(dir.path())]);
    let first = fs::read_to_string(&page)?;
    let out = stdout_of(&["static", path_str(dir.path())]);

    assert!(out.contains(&format!("No changes needed for {}", page.display())));
    assert!(out.contains("No files needed updates."));
    assert_eq!(fs::read_to_string(&page)?, first);
    Ok(())
}

#[test]
fn static_no_backup_and_external_urls() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("gallery.html");
    fs::write(&page, "<img src=\"http://example.com/x.jpg\"><img src=\"img/a.png\">")?;

    stdout_of(&["static", path_str(dir.path()), "--no-backup"]);

    assert_eq!(
        fs::read_to_string(&page)?,
        "{% load static %}\n<img src=\"http://example.com/x.jpg\"><img src=\"{% static 'img/a.png' %}\">"
    );
    assert!(!dir.path().join("gallery.html.bak").exists());
    Ok(())
}

#[test]
fn static_dry_run_with_diff_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("faq.html");
    fs::write(&page, "<img src=\"q.png\">\n")?;

    let out = stdout_of(&["static", path_str(dir.path()), "--dry-run", "--diff"]);
    assert!(out.contains(&format!("Would update {}", page.display())));
    assert!(out.contains("+<img src=\"{% static 'q.png' %}\">"));
    assert!(out.contains("1 files would be updated with static references."));
    assert_eq!(fs::read_to_string(&page)?, "<img src=\"q.png\">\n");
    assert!(!dir.path().join("faq.html.bak").exists());
    Ok(())
}

#[test]
fn static_disable_skips_rule() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("style.html");
    fs::write(&page, "<div style=\"background: url('bg.jpg')\"></div>")?;

    stdout_of(&["static", path_str(dir.path()), "--no-backup", "--disable", "css_url"]);
    assert_eq!(
        fs::read_to_string(&page)?,
        "{% load static %}\n<div style=\"background: url('bg.jpg')\"></div>"
    );
    Ok(())
}

#[test]
fn static_invalid_path_exits_with_error() {
    tagify()
        .args(["static", "/no/such/templates"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: /no/such/templates is not a valid file or directory"));
}

#[test]
fn links_rewrites_pages() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("index.html");
    fs::write(
        &page,
        "<a href=\"index.html\">Home</a><a href=\"https://holisticfostercare.org/about.html\">About</a>",
    )?;

    let out = stdout_of(&["links", path_str(dir.path())]);
    assert!(out.contains("Found 1 HTML file(s) in"));
    assert!(out.contains(&format!("Updated {}", page.display())));
    assert!(out.contains("  - index.html → {% url \"home\" %}"));
    assert!(out.contains("Note: Some URLs may still need manual review"));
    assert_eq!(
        fs::read_to_string(&page)?,
        "<a href=\"{% url \"home\" %}\">Home</a><a href=\"{% url \"about\" %}\">About</a>"
    );
    Ok(())
}

#[test]
fn links_custom_config_overrides_route() -> Result<()> {
    let dir = tempdir()?;
    let page = dir.path().join("blog.html");
    fs::write(&page, "<a href=\"blog.html\">Blog</a>")?;
    let config = dir.path().join("rules.yaml");
    fs::write(&config, "links:\n  - href: \"blog.html\"\n    replace_with: \"{% url 'news' %}\"\n")?;

    stdout_of(&["links", path_str(dir.path()), "--config", path_str(&config)]);
    assert_eq!(fs::read_to_string(&page)?, "<a href=\"{% url 'news' %}\">Blog</a>");
    Ok(())
}

#[test]
fn links_invalid_directory_exits_with_error() {
    tagify()
        .args(["links", "/no/such/site"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a valid directory"));
}
