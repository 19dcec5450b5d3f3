//! Source hygiene checks run as part of the test suite.
//!
//! Each pattern below has a budget of zero in production code under `src/`
//! (sibling `*_test.rs` files are exempt). Lower a budget when you can; never
//! raise one.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn production_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

/// Fail when more than `max` lines across `src/` contain `pattern`.
fn assert_budget(pattern: &str, max: usize) {
    let files = production_sources();
    assert!(!files.is_empty(), "no sources found under src/");

    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.display().to_string(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let found: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits.iter().map(|(p, n)| format!("  {p}: {n}")).collect::<Vec<_>>().join("\n");
    assert!(found <= max, "`{pattern}` budget exceeded: found {found}, max {max}.\n{listing}");
}

// =============================================================
// Panics
// =============================================================

#[test]
fn no_unwrap() {
    assert_budget(".unwrap()", 0);
}

#[test]
fn no_expect() {
    assert_budget(".expect(", 0);
}

#[test]
fn no_panic() {
    assert_budget("panic!(", 0);
}

#[test]
fn no_unreachable() {
    assert_budget("unreachable!(", 0);
}

#[test]
fn no_todo_or_unimplemented() {
    assert_budget("todo!(", 0);
    assert_budget("unimplemented!(", 0);
}

// =============================================================
// Silent loss
// =============================================================

#[test]
fn no_silent_discard() {
    assert_budget("let _ =", 0);
}

#[test]
fn no_dot_ok() {
    assert_budget(".ok()", 0);
}

// =============================================================
// Structure
// =============================================================

#[test]
fn no_allow_dead_code() {
    assert_budget("#[allow(dead_code)]", 0);
}
