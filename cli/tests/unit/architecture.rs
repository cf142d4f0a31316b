//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra → presentation) hold.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().starts_with("#[cfg(") && line.contains("test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-comment, non-test lines of every file under `src/<layer>`, with
/// their file path relative to the crate and 1-based line number.
fn production_lines(layer: &str) -> Vec<(String, usize, String)> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut out = Vec::new();
    for file in collect_rs_files(&dir) {
        // test-only helper module
        if file.ends_with("test_support.rs") {
            continue;
        }
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            if in_test || line.trim().starts_with("//") {
                continue;
            }
            out.push((rel.clone(), i + 1, line.to_string()));
        }
    }
    out
}

fn assert_no_match(layer: &str, forbidden: &[&str], what: &str) {
    let violations: Vec<String> = production_lines(layer)
        .into_iter()
        .filter(|(_, _, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(rel, n, line)| format!("{rel}:{n}: {}", line.trim()))
        .collect();
    assert!(
        violations.is_empty(),
        "{what}:\n{}",
        violations.join("\n")
    );
}

#[test]
fn domain_is_pure() {
    assert_no_match(
        "domain",
        &[
            "tokio",
            "std::process",
            "std::fs",
            "std::net",
            "crate::application",
            "crate::infra",
            "crate::commands",
            "crate::output",
        ],
        "domain/ must stay free of I/O and outer layers",
    );
}

#[test]
fn application_has_no_infra_or_presentation_imports() {
    assert_no_match(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "crate::app::"],
        "application/ must depend on domain/ and its own ports only",
    );
}

#[test]
fn application_spawns_no_processes() {
    assert_no_match(
        "application",
        &["Command::new", "std::fs::"],
        "application/ must go through the CommandRunner port",
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    assert_no_match(
        "infra",
        &["crate::commands", "crate::output", "crate::app::"],
        "infra/ must not import from the presentation layer",
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    assert_no_match(
        "infra",
        &["println!", "eprintln!"],
        "infra/ reports through tracing, not print macros",
    );
}

#[test]
fn only_infra_spawns_processes() {
    assert_no_match(
        "commands",
        &["Command::new", "TokioCommandRunner"],
        "commands/ must reach multipass through the provider traits",
    );
}
