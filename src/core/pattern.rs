//! Dataset pattern resolution: turn a DSET template into a base directory plus
//! a glob, and list the physical files it matches.
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while locating the physical files of a dataset
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no file matches {pattern:?} in {base_dir}")]
    NoMatchingFiles { base_dir: PathBuf, pattern: String },
    #[error("invalid dataset pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("cannot list dataset files: {0}")]
    Io(#[from] glob::GlobError),
}

const TWO_DIGITS: &str = "[0-9][0-9]";
const THREE_DIGITS: &str = "[0-9][0-9][0-9]";
const FOUR_DIGITS: &str = "[0-9][0-9][0-9][0-9]";
const MONTH_NAME: &str = "[a-zA-Z][a-zA-Z][a-zA-Z]";

/// Fixed-width GrADS date templates and their glob equivalents
const DATE_TEMPLATES: &[(&str, &str)] = &[
    ("%y2", TWO_DIGITS),
    ("%y4", FOUR_DIGITS),
    ("%m2", TWO_DIGITS),
    ("%mc", MONTH_NAME),
    ("%d2", TWO_DIGITS),
    ("%j3", THREE_DIGITS),
    ("%h2", TWO_DIGITS),
    ("%h3", THREE_DIGITS),
    ("%n2", TWO_DIGITS),
    ("%f2", TWO_DIGITS),
    ("%f3", THREE_DIGITS),
];

/// Replace every recognised date template with a digit-class wildcard.
/// Variable-width templates such as `%m1` cannot be expressed as a glob and
/// are left untouched.
pub fn replace_date_templates(pattern: &str) -> String {
    DATE_TEMPLATES
        .iter()
        .fold(pattern.to_string(), |acc, (template, glob)| {
            acc.replace(template, glob)
        })
}

/// Where and what to search for a dataset's files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPattern {
    pub base_dir: PathBuf,
    /// Glob relative to `base_dir`, date templates already expanded
    pub glob: String,
}

impl ResolvedPattern {
    /// Resolve a DSET value. A leading `^` anchors the pattern at the CTL
    /// file's directory; otherwise it stands on its own. Leading directory
    /// components without templates are folded into `base_dir`.
    pub fn new(dataset_pattern: &str, ctl_path: &Path) -> Self {
        let (anchor, template) = match dataset_pattern.strip_prefix('^') {
            Some(rest) => (
                ctl_path.parent().map(Path::to_path_buf).unwrap_or_default(),
                rest,
            ),
            None => (PathBuf::new(), dataset_pattern),
        };

        let mut base_dir = anchor;
        let mut components: Vec<&str> = template.split('/').collect();
        let file_name = components.pop().unwrap_or_default();

        // An absolute pattern starts with an empty component
        if template.starts_with('/') {
            base_dir = PathBuf::from("/");
            components.remove(0);
        }

        let literal = components
            .iter()
            .take_while(|c| !c.contains('%'))
            .count();
        for dir in &components[..literal] {
            base_dir.push(dir);
        }

        let mut rest: Vec<&str> = components[literal..].to_vec();
        rest.push(file_name);

        if base_dir.as_os_str().is_empty() {
            base_dir = PathBuf::from(".");
        }

        Self {
            base_dir,
            glob: replace_date_templates(&rest.join("/")),
        }
    }

    /// Full glob string with `base_dir` escaped
    pub fn full_pattern(&self) -> String {
        let base = Pattern::escape(&self.base_dir.to_string_lossy());
        if base.ends_with('/') {
            format!("{}{}", base, self.glob)
        } else {
            format!("{}/{}", base, self.glob)
        }
    }

    /// Regular files matching the pattern, sorted lexicographically
    pub fn matching_files(&self) -> Result<Vec<PathBuf>, ResolutionError> {
        let pattern = self.full_pattern();
        debug!("Globbing {:?}", pattern);

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let entries = glob::glob_with(&pattern, options).map_err(|source| {
            ResolutionError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            }
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(ResolutionError::NoMatchingFiles {
                base_dir: self.base_dir.clone(),
                pattern: self.glob.clone(),
            });
        }

        info!("Found {} dataset file(s) in {:?}", files.len(), self.base_dir);
        Ok(files)
    }
}
