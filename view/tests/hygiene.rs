//! Hygiene: source-level rules for the view crate, checked at test time.
//!
//! Production files (everything under `src/` except `*_test.rs`) get a budget
//! per antipattern. Budgets only ever go down.

use std::fs;
use std::path::Path;

/// (pattern, budget, why it matters)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics in the page"),
    (".expect(", 0, "panics in the page"),
    ("panic!(", 0, "panics in the page"),
    ("unreachable!(", 0, "panics in the page"),
    ("todo!(", 0, "unfinished code"),
    ("unimplemented!(", 0, "unfinished code"),
    ("let _ =", 0, "discards an error unread"),
    (".ok()", 0, "discards an error unread"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_found() {
    let files = source_files();
    assert!(
        files.iter().any(|f| f.path.ends_with("router.rs")),
        "hygiene must run from the view crate root"
    );
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, budget, why) in BUDGETS {
        let found = hits(&files, pattern);
        let total: usize = found.iter().map(|(_, c)| c).sum();
        if total > *budget {
            let detail = found
                .iter()
                .map(|(path, count)| format!("    {path}: {count}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("`{pattern}` ({why}): found {total}, max {budget}\n{detail}"));
        }
    }
    assert!(failures.is_empty(), "budgets exceeded:\n{}", failures.join("\n"));
}

/// Only `src/browser/` may touch browser APIs; everything else must build and
/// test natively.
#[test]
fn browser_apis_stay_in_browser_module() {
    let offenders: Vec<String> = source_files()
        .into_iter()
        .filter(|f| !f.path.contains("browser"))
        .filter(|f| ["web_sys", "wasm_bindgen", "gloo_net", "js_sys"].iter().any(|api| f.content.contains(api)))
        .map(|f| f.path)
        .collect();
    assert!(offenders.is_empty(), "browser APIs outside src/browser: {offenders:?}");
}

/// A `foo_test.rs` next to `foo.rs` is dead unless `foo.rs` mounts it.
#[test]
fn sibling_test_files_are_mounted() {
    let Ok(entries) = fs::read_dir("src") else {
        return;
    };
    let mut unmounted = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(stem) = name.strip_suffix("_test.rs") else {
            continue;
        };
        let owner = Path::new("src").join(format!("{stem}.rs"));
        let owner = if owner.exists() { owner } else { Path::new("src").join("lib.rs") };
        let content = fs::read_to_string(&owner).unwrap_or_default();
        if !content.contains(&format!("#[path = \"{name}\"]")) {
            unmounted.push(name);
        }
    }
    assert!(unmounted.is_empty(), "test files not mounted: {unmounted:?}");
}
