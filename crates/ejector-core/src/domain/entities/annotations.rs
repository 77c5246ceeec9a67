//! Conditional inclusion annotations embedded in template text.
//!
//! Template files carry two kinds of annotations that only matter at eject
//! time:
//!
//! - a file sentinel (`// @remove-file-on-eject`) that drops the whole file;
//! - begin/end marker pairs that delete the region between them, markers
//!   included.
//!
//! Both are expressed as [`AnnotationRule`]s inside one [`AnnotationRules`]
//! set and evaluated against file content in declaration order.

use regex::Regex;

use crate::domain::error::DomainError;

pub const FILE_SENTINEL: &str = "// @remove-file-on-eject";
pub const SCRIPT_BEGIN: &str = "// @remove-on-eject-begin";
pub const SCRIPT_END: &str = "// @remove-on-eject-end";
pub const APPLESCRIPT_BEGIN: &str = "-- @remove-on-eject-begin";
pub const APPLESCRIPT_END: &str = "-- @remove-on-eject-end";

/// A begin/end delimiter pair marking a region to delete.
#[derive(Debug, Clone)]
pub struct MarkerPair {
    regex: Regex,
}

impl MarkerPair {
    /// Build a pair from two regex fragments.
    ///
    /// The compiled pattern matches from `begin` through the *nearest*
    /// following `end` across line breaks, plus the rest of the end marker's
    /// line. A `begin` with no `end` after it does not match at all.
    pub fn new(begin: &str, end: &str) -> Result<Self, DomainError> {
        let pattern = format!(r"(?s)(?:{begin}).*?(?:{end})[ \t]*(?:\r?\n)?");
        let regex = Regex::new(&pattern).map_err(|e| DomainError::InvalidMarkerRule {
            pattern,
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Build a pair from literal marker text.
    pub fn literal(begin: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(&regex::escape(begin), &regex::escape(end))
    }

    /// Delete every non-overlapping marked region.
    pub fn strip(&self, content: &str) -> String {
        self.regex.replace_all(content, "").into_owned()
    }
}

/// One annotation rule.
#[derive(Debug, Clone)]
pub enum AnnotationRule {
    /// Omit the whole file when the pattern appears anywhere in it.
    SkipFile(Regex),
    /// Delete marked regions.
    StripRegion(MarkerPair),
}

/// Outcome of evaluating the rules against one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotated {
    /// The file must not be written.
    Skip,
    /// Write this (normalized) content.
    Keep(String),
}

/// An ordered set of annotation rules.
#[derive(Debug, Clone)]
pub struct AnnotationRules {
    rules: Vec<AnnotationRule>,
}

impl AnnotationRules {
    pub fn new(rules: Vec<AnnotationRule>) -> Self {
        Self { rules }
    }

    /// The rules every ejected template file is evaluated against: the file
    /// sentinel, then `//` markers, then AppleScript `--` markers.
    pub fn eject_defaults() -> Result<Self, DomainError> {
        let sentinel = Regex::new(&regex::escape(FILE_SENTINEL)).map_err(|e| {
            DomainError::InvalidMarkerRule {
                pattern: FILE_SENTINEL.into(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self::new(vec![
            AnnotationRule::SkipFile(sentinel),
            AnnotationRule::StripRegion(MarkerPair::literal(SCRIPT_BEGIN, SCRIPT_END)?),
            AnnotationRule::StripRegion(MarkerPair::literal(APPLESCRIPT_BEGIN, APPLESCRIPT_END)?),
        ]))
    }

    /// Evaluate all rules against `content`.
    ///
    /// Skip rules win over everything else. Otherwise regions are stripped
    /// pair by pair, trailing whitespace is trimmed, and exactly one newline
    /// is appended.
    pub fn apply(&self, content: &str) -> Annotated {
        let skipped = self.rules.iter().any(|rule| match rule {
            AnnotationRule::SkipFile(re) => re.is_match(content),
            AnnotationRule::StripRegion(_) => false,
        });
        if skipped {
            return Annotated::Skip;
        }

        let mut text = content.to_owned();
        for rule in &self.rules {
            if let AnnotationRule::StripRegion(pair) = rule {
                text = pair.strip(&text);
            }
        }

        let mut out = text.trim_end().to_owned();
        out.push('\n');
        Annotated::Keep(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> AnnotationRules {
        AnnotationRules::eject_defaults().unwrap()
    }

    fn keep(content: &str) -> String {
        match rules().apply(content) {
            Annotated::Keep(s) => s,
            Annotated::Skip => panic!("unexpected skip for {content:?}"),
        }
    }

    #[test]
    fn strips_script_region_with_markers() {
        let input = "a\n// @remove-on-eject-begin\nsecret\n// @remove-on-eject-end\nb";
        assert_eq!(keep(input), "a\nb\n");
    }

    #[test]
    fn strips_applescript_region() {
        let input = "tell app\n-- @remove-on-eject-begin\n-- license\n-- @remove-on-eject-end\nend tell\n";
        assert_eq!(keep(input), "tell app\nend tell\n");
    }

    #[test]
    fn strips_every_region_nearest_end_first() {
        let input = "1\n// @remove-on-eject-begin\nx\n// @remove-on-eject-end\n2\n\
                     // @remove-on-eject-begin\ny\n// @remove-on-eject-end\n3";
        assert_eq!(keep(input), "1\n2\n3\n");
    }

    #[test]
    fn unmatched_begin_leaves_content_alone() {
        let input = "a\n// @remove-on-eject-begin\nstill here\n";
        assert_eq!(keep(input), input);
    }

    #[test]
    fn content_without_markers_only_normalizes_newline() {
        assert_eq!(keep("const x = 1;   \n\n\n"), "const x = 1;\n");
        assert_eq!(keep("const x = 1;"), "const x = 1;\n");
    }

    #[test]
    fn empty_result_is_single_newline() {
        assert_eq!(keep(""), "\n");
        assert_eq!(
            keep("// @remove-on-eject-begin\nall of it\n// @remove-on-eject-end\n"),
            "\n"
        );
    }

    #[test]
    fn stripping_is_idempotent() {
        let input = "a\n// @remove-on-eject-begin\nsecret\n// @remove-on-eject-end\nb\n\n";
        let once = keep(input);
        assert_eq!(keep(&once), once);
    }

    #[test]
    fn sentinel_skips_whole_file() {
        let input = "// @remove-file-on-eject\nmodule.exports = {};\n";
        assert_eq!(rules().apply(input), Annotated::Skip);
    }

    #[test]
    fn sentinel_wins_over_regions() {
        let input = "// @remove-on-eject-begin\n// @remove-file-on-eject\n// @remove-on-eject-end\n";
        assert_eq!(rules().apply(input), Annotated::Skip);
    }

    #[test]
    fn custom_pair_accepts_regex_fragments() {
        let pair = MarkerPair::new(r"<!--\s*strip\s*-->", r"<!--\s*/strip\s*-->").unwrap();
        assert_eq!(pair.strip("x\n<!-- strip -->\ny\n<!--/strip-->\nz"), "x\nz");
    }

    #[test]
    fn invalid_fragment_is_reported() {
        assert!(matches!(
            MarkerPair::new("(", "x"),
            Err(DomainError::InvalidMarkerRule { .. })
        ));
    }
}
