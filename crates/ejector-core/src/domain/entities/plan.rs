use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One unit the planner must account for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: RelativePath,
    pub is_directory: bool,
    /// Known ahead of time to be dropped on eject. Files can also opt out
    /// through their content; see `AnnotationRules`.
    pub skip_on_eject: bool,
}

impl TemplateEntry {
    pub fn directory(path: RelativePath) -> Self {
        Self {
            path,
            is_directory: true,
            skip_on_eject: false,
        }
    }

    pub fn file(path: RelativePath) -> Self {
        Self {
            path,
            is_directory: false,
            skip_on_eject: false,
        }
    }

    pub fn skipped(mut self) -> Self {
        self.skip_on_eject = true;
        self
    }
}

/// A planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: RelativePath,
    pub skip_on_eject: bool,
}

/// The validated set of directories and files an ejection will create.
///
/// Built once by [`EjectionPlan::build`]; immutable afterwards. Directories
/// are ordered parents-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EjectionPlan {
    directories: Vec<RelativePath>,
    files: Vec<PlannedFile>,
}

impl EjectionPlan {
    /// Plan the ejection of `entries` into `destination`.
    ///
    /// `exists` answers whether an absolute path is already present. Every
    /// colliding path is collected before failing, so the user sees the
    /// whole list at once. Ancestors of a file that are neither enumerated
    /// nor already present are added to the directory list.
    pub fn build(
        destination: &Path,
        entries: &[TemplateEntry],
        exists: impl Fn(&Path) -> bool,
    ) -> Result<Self, DomainError> {
        let mut directories: Vec<RelativePath> = Vec::new();
        let mut seen_dirs: BTreeSet<RelativePath> = BTreeSet::new();
        let mut files: Vec<PlannedFile> = Vec::new();
        let mut seen_files: BTreeSet<RelativePath> = BTreeSet::new();
        let mut conflicts: Vec<PathBuf> = Vec::new();

        for entry in entries.iter().filter(|e| e.is_directory) {
            if seen_dirs.insert(entry.path.clone()) {
                directories.push(entry.path.clone());
            }
        }

        for entry in entries.iter().filter(|e| !e.is_directory) {
            if !seen_files.insert(entry.path.clone()) {
                continue;
            }
            for parent in entry.path.parents() {
                if seen_dirs.contains(&parent) || exists(&parent.under(destination)) {
                    continue;
                }
                seen_dirs.insert(parent.clone());
                directories.push(parent);
            }
            files.push(PlannedFile {
                path: entry.path.clone(),
                skip_on_eject: entry.skip_on_eject,
            });
        }

        for path in directories.iter().chain(files.iter().map(|f| &f.path)) {
            let absolute = path.under(destination);
            if exists(&absolute) {
                conflicts.push(absolute);
            }
        }

        if !conflicts.is_empty() {
            return Err(DomainError::DestinationConflict { paths: conflicts });
        }

        // Stable: siblings keep enumeration order.
        directories.sort_by_key(RelativePath::depth);

        Ok(Self { directories, files })
    }

    pub fn directories(&self) -> &[RelativePath] {
        &self.directories
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }
}
