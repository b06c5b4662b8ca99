//! Rough source line statistics.
//!
//! A line-oriented heuristic, not a parser: after stripping leading blanks,
//! empty lines are ignored, lines starting with `//`, `/*` or `*` count as
//! comments and any other line mentioning `;`, `class` or `return` counts
//! as logical. Every non-empty line is physical.

use std::{
    fs,
    ops::AddAssign,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::FleetError;

/// Extensions considered source files when walking a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["rs", "c", "cc", "cpp", "cxx", "h", "hpp", "java", "cs"];

/// Line counts for one or more files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    /// Non-empty lines.
    pub physical: usize,
    /// Lines that look like statements or declarations.
    pub logical: usize,
    /// Lines that start a comment or continue a block comment.
    pub comments: usize,
}

impl LineStats {
    /// Human-readable report block.
    pub fn render(&self) -> String {
        format!(
            "=== Code Analysis ===\nPhysical lines: {}\nLogical lines: {}\nComments: {}\n",
            self.physical, self.logical, self.comments
        )
    }
}

impl AddAssign for LineStats {
    fn add_assign(&mut self, rhs: Self) {
        self.physical += rhs.physical;
        self.logical += rhs.logical;
        self.comments += rhs.comments;
    }
}

static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(//|/\*|\*)").expect("invalid comment regex"));
static LOGICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";|class|return").expect("invalid logical regex"));

/// Classify every line of `source`.
pub fn analyze_source(source: &str) -> LineStats {
    let mut stats = LineStats::default();
    for line in source.lines() {
        let trimmed = line.trim_start_matches([' ', '\t']);
        if trimmed.is_empty() {
            continue;
        }
        stats.physical += 1;
        if COMMENT_RE.is_match(trimmed) {
            stats.comments += 1;
        } else if LOGICAL_RE.is_match(trimmed) {
            stats.logical += 1;
        }
    }
    stats
}

/// Analyze a single file.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<LineStats, FleetError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| FleetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(analyze_source(&source))
}

/// Analyze `root`: a file directly, or every source file below a directory.
pub fn analyze_tree(root: impl AsRef<Path>) -> Result<LineStats, FleetError> {
    let root = root.as_ref();
    if root.is_file() {
        return analyze_file(root);
    }

    let mut total = LineStats::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| FleetError::Walk {
            path: PathBuf::from(root),
            source,
        })?;
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        total += analyze_file(entry.path())?;
    }
    Ok(total)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
// header comment
class Widget {
    /* block
     * continued
     */
    int size;

    int get() { return size; }
    void noop() {}
};
"#;

    #[test]
    fn classifies_sample_lines() {
        let stats = analyze_source(SAMPLE);
        assert_eq!(
            stats,
            LineStats {
                physical: 9,
                logical: 4,
                comments: 4,
            }
        );
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(analyze_source(""), LineStats::default());
        assert_eq!(analyze_source("   \n\t\n"), LineStats::default());
    }

    #[test]
    fn renders_report() {
        let stats = LineStats {
            physical: 3,
            logical: 2,
            comments: 1,
        };
        assert_eq!(
            stats.render(),
            "=== Code Analysis ===\nPhysical lines: 3\nLogical lines: 2\nComments: 1\n"
        );
    }

    #[test]
    fn walks_source_files_only() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("src/nested"))?;
        fs::write(dir.path().join("src/main.rs"), "fn main() {\n    run();\n}\n")?;
        fs::write(dir.path().join("src/nested/lib.cpp"), "// note\nreturn 0;\n")?;
        fs::write(dir.path().join("README.md"), "return; class;\n")?;

        let stats = analyze_tree(dir.path())?;
        assert_eq!(
            stats,
            LineStats {
                physical: 5,
                logical: 2,
                comments: 1,
            }
        );

        let single = analyze_tree(dir.path().join("src/main.rs"))?;
        assert_eq!(single.physical, 3);
        Ok(())
    }

    #[test]
    fn missing_file_is_reported() {
        let err = analyze_file("/definitely/not/here.rs").unwrap_err();
        assert!(matches!(err, FleetError::Io { .. }));
    }
}
