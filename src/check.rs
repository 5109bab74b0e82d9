//! Content audit.
//!
//! Walks a file or directory of stored page bodies and reports, per file, the
//! embeds it references and anything an editor should look at:
//!
//! - tags whose kind no renderer handles (unless `check.allow_unknown_kinds`)
//! - `<!--vps:embed:` markers that are not well-formed tags, and tags whose id
//!   does not fit in 64 bits (unless `check.report_malformed` is off)
//!
//! Both kinds of problem are invisible in the published page: malformed
//! markers are plain HTML comments and unknown kinds render nothing.
//!
//! Files are analysed in parallel on the rayon pool sized by
//! `processing.max_processes`.

use crate::config::CheckConfig;
use crate::grammar::{MalformedMarker, find_malformed, scan_tags};
use crate::kind::EmbedKind;
use crate::reference::EmbedReference;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    UnknownKind { line: usize, kind: String, id: String },
    IdOutOfRange { line: usize, kind: String, id: String },
    Malformed(MalformedMarker),
}

impl Problem {
    pub fn line(&self) -> usize {
        match self {
            Problem::UnknownKind { line, .. } | Problem::IdOutOfRange { line, .. } => *line,
            Problem::Malformed(marker) => marker.line,
        }
    }
}

/// Audit result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the audited root (the file name when auditing one file).
    pub path: PathBuf,
    pub references: Vec<EmbedReference>,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
}

impl CheckReport {
    pub fn reference_count(&self) -> usize {
        self.files.iter().map(|f| f.references.len()).sum()
    }

    pub fn problem_count(&self) -> usize {
        self.files.iter().map(|f| f.problems.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Audit one document.
pub fn check_document(path: &Path, document: &str, config: &CheckConfig) -> FileReport {
    let mut references = Vec::new();
    let mut problems = Vec::new();
    let mut line = 1;
    let mut scanned = 0;

    for tag in scan_tags(document) {
        line += document[scanned..tag.start].matches('\n').count();
        scanned = tag.start;

        let Ok(target_id) = tag.id.parse::<u64>() else {
            if config.report_malformed {
                problems.push(Problem::IdOutOfRange {
                    line,
                    kind: tag.kind.to_string(),
                    id: tag.id.to_string(),
                });
            }
            continue;
        };
        let kind = EmbedKind::from(tag.kind);
        if !kind.is_known() && !config.allow_unknown_kinds {
            problems.push(Problem::UnknownKind {
                line,
                kind: tag.kind.to_string(),
                id: tag.id.to_string(),
            });
        }
        references.push(EmbedReference {
            kind,
            target_id,
            extra: tag.extra.map(str::to_string),
        });
    }

    if config.report_malformed {
        problems.extend(find_malformed(document).into_iter().map(Problem::Malformed));
    }
    problems.sort_by_key(Problem::line);

    FileReport {
        path: path.to_path_buf(),
        references,
        problems,
    }
}

/// List the page body files under `root`, sorted by path.
///
/// A `root` that is a file is returned as-is regardless of its extension.
pub fn collect_files(root: &Path, config: &CheckConfig) -> Result<Vec<PathBuf>, CheckError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches_ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| config.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
        if matches_ext {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Audit every page body file under `root`.
pub fn check_path(root: &Path, config: &CheckConfig) -> Result<CheckReport, CheckError> {
    let files = collect_files(root, config)?;

    let files = files
        .par_iter()
        .map(|file| {
            let document =
                fs::read_to_string(file).map_err(|e| CheckError::Read(file.clone(), e))?;
            let display = display_path(root, file);
            Ok(check_document(&display, &document, config))
        })
        .collect::<Result<Vec<_>, CheckError>>()?;

    Ok(CheckReport { files })
}

fn display_path(root: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| file.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strict() -> CheckConfig {
        CheckConfig::default()
    }

    #[test]
    fn clean_document_has_references_and_no_problems() {
        let report = check_document(
            Path::new("a.html"),
            "<p>x</p><!--vps:embed:gallery:5--><!--vps:embed:carousel:7:true:false:600-->",
            &strict(),
        );
        assert_eq!(report.references.len(), 2);
        assert_eq!(report.references[1].extra.as_deref(), Some("true:false:600"));
        assert!(report.problems.is_empty());
    }

    #[test]
    fn unknown_kind_is_a_problem_with_line() {
        let report = check_document(
            Path::new("a.html"),
            "<p>x</p>\n<p>y</p>\n<!--vps:embed:video:12-->",
            &strict(),
        );
        assert_eq!(report.references.len(), 1);
        assert_eq!(
            report.problems,
            vec![Problem::UnknownKind {
                line: 3,
                kind: "video".to_string(),
                id: "12".to_string()
            }]
        );
    }

    #[test]
    fn unknown_kind_allowed_by_config() {
        let config = CheckConfig {
            allow_unknown_kinds: true,
            ..CheckConfig::default()
        };
        let report = check_document(Path::new("a.html"), "<!--vps:embed:video:12-->", &config);
        assert!(report.problems.is_empty());
    }

    #[test]
    fn malformed_and_oversized_are_problems_in_line_order() {
        let doc = "<!--vps:embed:image:99999999999999999999999-->\n<!--vps:embed:image:-->";
        let report = check_document(Path::new("a.html"), doc, &strict());
        assert!(report.references.is_empty());
        assert_eq!(report.problems.len(), 2);
        assert!(matches!(report.problems[0], Problem::IdOutOfRange { line: 1, .. }));
        assert!(matches!(&report.problems[1], Problem::Malformed(m) if m.line == 2));
    }

    #[test]
    fn malformed_reporting_can_be_disabled() {
        let config = CheckConfig {
            report_malformed: false,
            ..CheckConfig::default()
        };
        let report = check_document(Path::new("a.html"), "<!--vps:embed:image:-->", &config);
        assert!(report.problems.is_empty());
    }

    #[test]
    fn check_path_walks_matching_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages/about")).unwrap();
        fs::write(tmp.path().join("pages/home.html"), "<!--vps:embed:hero:1-->").unwrap();
        fs::write(
            tmp.path().join("pages/about/index.htm"),
            "<!--vps:embed:gallery:2--><!--vps:embed:nope:3-->",
        )
        .unwrap();
        fs::write(tmp.path().join("pages/notes.txt"), "<!--vps:embed:bad:1-->").unwrap();

        let report = check_path(tmp.path(), &strict()).unwrap();
        let paths: Vec<_> = report.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("pages/about/index.htm"),
                PathBuf::from("pages/home.html")
            ]
        );
        assert_eq!(report.reference_count(), 3);
        assert_eq!(report.problem_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn check_path_on_single_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("body.txt");
        fs::write(&file, "<!--vps:embed:image:4-->").unwrap();

        let report = check_path(&file, &strict()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].path, PathBuf::from("body.txt"));
        assert!(report.is_clean());
    }

    #[test]
    fn check_path_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = check_path(&tmp.path().join("missing"), &strict());
        assert!(matches!(result, Err(CheckError::Walk(_))));
    }
}
