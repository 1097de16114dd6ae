//! Reading report files and resolving command-line file arguments

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::extractor::Extractor;
use crate::models::Summary;

/// Characters that mark an argument as a glob pattern rather than a path
const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Open a report file and run it through the extractor line by line
///
/// Fails if the file is missing, unreadable or not valid UTF-8. The error
/// message always names the file.
pub fn extract_file(path: &Path) -> Result<Summary> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    extract_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Run any buffered reader through the extractor
pub fn extract_reader<R: BufRead>(reader: R) -> Result<Summary> {
    let mut extractor = Extractor::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Invalid text at line {}", idx + 1))?;
        extractor.feed(&line);
    }
    Ok(extractor.finish())
}

/// File arguments after glob expansion
#[derive(Debug, Default)]
pub struct Expanded {
    /// Concrete paths, in argument order
    pub paths: Vec<PathBuf>,
    /// One error per pattern that was invalid or matched nothing
    pub failures: Vec<anyhow::Error>,
}

/// Resolve file arguments into concrete paths
///
/// Arguments are normally expanded by the shell already. An argument that
/// contains glob characters and does not name an existing file is matched
/// against files under its literal directory prefix instead. Other
/// arguments are passed through as-is; missing files surface later when
/// they are opened.
///
/// A pattern that fails to expand is recorded in [`Expanded::failures`]
/// and does not stop the remaining arguments from resolving.
pub fn expand_patterns<S: AsRef<str>>(args: &[S]) -> Expanded {
    let mut expanded = Expanded::default();

    for arg in args {
        let arg = arg.as_ref();
        if !is_glob(arg) || Path::new(arg).exists() {
            expanded.paths.push(PathBuf::from(arg));
            continue;
        }

        match expand_glob(arg) {
            Ok(matches) if matches.is_empty() => {
                expanded
                    .failures
                    .push(anyhow::anyhow!("No files match pattern '{}'", arg));
            }
            Ok(matches) => {
                log::debug!("Pattern '{}' matched {} files", arg, matches.len());
                expanded.paths.extend(matches);
            }
            Err(e) => expanded.failures.push(e),
        }
    }

    expanded
}

fn is_glob(arg: &str) -> bool {
    arg.contains(GLOB_CHARS)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher: GlobMatcher = Glob::new(pattern)
        .with_context(|| format!("Invalid glob pattern: {}", pattern))?
        .compile_matcher();

    let root = literal_prefix(pattern);
    log::debug!("Expanding '{}' under {}", pattern, root.display());

    // Patterns without '**' only look at their own directory level
    let max_depth = if pattern.contains("**") {
        usize::MAX
    } else {
        pattern_depth(pattern).saturating_sub(root_depth(&root)).max(1)
    };

    let mut matches: Vec<PathBuf> = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry while expanding '{}': {}", pattern, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| strip_dot(entry.into_path(), pattern))
        .filter(|path| matcher.is_match(path))
        .collect();

    matches.sort();
    Ok(matches)
}

/// Directory part of a pattern that precedes the first glob component
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    let components: Vec<&str> = pattern.split('/').collect();
    for component in &components[..components.len().saturating_sub(1)] {
        if is_glob(component) {
            break;
        }
        if component.is_empty() && prefix.as_os_str().is_empty() {
            prefix.push("/");
        } else {
            prefix.push(component);
        }
    }
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}

fn pattern_depth(pattern: &str) -> usize {
    pattern.split('/').filter(|c| !c.is_empty() && *c != ".").count()
}

fn root_depth(root: &Path) -> usize {
    if root == Path::new(".") {
        0
    } else {
        root.iter().filter(|c| *c != "/" && *c != ".").count()
    }
}

/// WalkDir under "." yields "./name" while bare patterns are written as "name"
fn strip_dot(path: PathBuf, pattern: &str) -> PathBuf {
    if !pattern.starts_with("./") && !Path::new(pattern).is_absolute() {
        path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
    } else {
        path
    }
}
