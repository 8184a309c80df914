//! Source hygiene for the widget crate.
//!
//! Widgets run inside browser event handlers with nobody to catch a panic or
//! a dropped error, so the crash and silent-loss budgets are all zero. The
//! remaining checks pin where page-lifetime leaks may live: closures are
//! leaked only by the `dom` helpers, and fire-and-forget timers only by the
//! one-shot reveals.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    name: String,
    content: String,
}

impl SourceFile {
    /// Lines that are code, not `//` comments.
    fn code_lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines().filter(|line| !line.trim_start().starts_with("//"))
    }

    fn count(&self, pattern: &str) -> usize {
        self.code_lines().filter(|line| line.contains(pattern)).count()
    }
}

/// Production sources under `src/`; `_test.rs` siblings are exempt.
fn sources() -> Vec<SourceFile> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect(&dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {}", dir.display());
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.file_name().unwrap_or_default().to_string_lossy().into_owned();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { name, content });
        }
    }
}

/// `(file, hits)` for every file containing `pattern` outside `allowed`.
fn offenders(files: &[SourceFile], pattern: &str, allowed: &[&str]) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|f| !allowed.contains(&f.name.as_str()))
        .map(|f| (f.name.clone(), f.count(pattern)))
        .filter(|(_, n)| *n > 0)
        .collect()
}

// =============================================================
// Budgets
// =============================================================

/// `(pattern, why it is banned)`. Every budget is zero.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "panics inside an event handler"),
    (".expect(", "panics inside an event handler"),
    ("panic!(", "panics inside an event handler"),
    ("unreachable!(", "panics inside an event handler"),
    ("todo!(", "panics inside an event handler"),
    ("unimplemented!(", "panics inside an event handler"),
    ("let _ =", "drops a result unseen; route it through error::report"),
    ("#[allow(unused_must_use)]", "drops a result unseen; route it through error::report"),
    ("#[allow(dead_code)]", "hides unused code; delete it instead"),
];

#[test]
fn banned_constructs_stay_at_zero() {
    let files = sources();
    let report: Vec<String> = BANNED
        .iter()
        .flat_map(|(pattern, why)| {
            offenders(&files, pattern, &[])
                .into_iter()
                .map(move |(file, n)| format!("  {file}: {n} x `{pattern}` ({why})"))
        })
        .collect();
    assert!(report.is_empty(), "banned constructs found:\n{}", report.join("\n"));
}

// =============================================================
// Leaks
// =============================================================

#[test]
fn closures_are_leaked_only_by_dom_helpers() {
    let files = sources();
    let hits = offenders(&files, "Closure::", &["dom.rs"]);
    assert!(hits.is_empty(), "build listeners through dom::listen and friends: {hits:?}");
}

#[test]
fn forgotten_timers_only_in_one_shot_reveals() {
    let files = sources();
    let hits = offenders(&files, ".forget()", &["dom.rs", "reveal.rs"]);
    assert!(hits.is_empty(), "store the Timeout in the widget so it can be cancelled: {hits:?}");
}

// =============================================================
// Async
// =============================================================

/// Bodies of every `spawn_local(...)` call in `content`.
fn spawned_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("spawn_local(") {
        let body = &rest[start + "spawn_local(".len()..];
        let mut depth = 1usize;
        let end = body
            .char_indices()
            .find(|&(_, c)| {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                depth == 0
            })
            .map_or(body.len(), |(i, _)| i);
        blocks.push(&body[..end]);
        rest = &body[end..];
    }
    blocks
}

#[test]
fn spawned_tasks_do_not_borrow_widget_state() {
    let files = sources();
    let mut spawned = 0;
    for file in &files {
        for block in spawned_blocks(&file.content) {
            spawned += 1;
            assert!(
                !block.contains(".borrow_mut()"),
                "{}: a RefCell borrow inside spawn_local can be held across an await",
                file.name
            );
        }
    }
    assert!(spawned > 0, "expected the contact form and video to spawn tasks");
}

#[test]
fn spawned_block_scanner_matches_nested_parens() {
    let src = "a(); spawn_local(async move { f(g(1)).await; }); x.borrow_mut();";
    assert_eq!(spawned_blocks(src), vec!["async move { f(g(1)).await; }"]);
}
