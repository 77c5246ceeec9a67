//! Entry enumeration and file materialization.
//!
//! The planner consumes entries from any [`EntrySource`]; the
//! [`Materializer`] then turns a validated plan into directories and files,
//! running every file through the annotation rules on the way.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::ports::{EjectObserver, Filesystem},
    domain::{Annotated, AnnotationRules, EjectionPlan, RelativePath, TemplateEntry},
    error::EjectResult,
};

/// Something that can enumerate template entries.
pub trait EntrySource {
    fn entries(&self) -> EjectResult<Vec<TemplateEntry>>;
}

/// A hand-written entry list.
impl EntrySource for Vec<TemplateEntry> {
    fn entries(&self) -> EjectResult<Vec<TemplateEntry>> {
        Ok(self.clone())
    }
}

/// Lists the regular files directly inside each template folder.
pub struct FolderScan<'a> {
    filesystem: &'a dyn Filesystem,
    template_root: &'a Path,
    folders: &'a [PathBuf],
}

impl<'a> FolderScan<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, template_root: &'a Path, folders: &'a [PathBuf]) -> Self {
        Self {
            filesystem,
            template_root,
            folders,
        }
    }
}

impl EntrySource for FolderScan<'_> {
    fn entries(&self) -> EjectResult<Vec<TemplateEntry>> {
        let mut entries = Vec::new();
        for folder in self.folders {
            let folder = RelativePath::try_new(folder)?;
            let names = self.filesystem.list_files(&folder.under(self.template_root))?;
            entries.push(TemplateEntry::directory(folder.clone()));
            for name in names {
                entries.push(TemplateEntry::file(folder.join(name)?));
            }
        }
        Ok(entries)
    }
}

/// Result of a materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories_created: usize,
    pub written: Vec<RelativePath>,
    pub skipped: Vec<RelativePath>,
}

/// Writes a plan into the destination tree.
pub struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
    rules: &'a AnnotationRules,
    observer: &'a dyn EjectObserver,
}

impl<'a> Materializer<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        rules: &'a AnnotationRules,
        observer: &'a dyn EjectObserver,
    ) -> Self {
        Self {
            filesystem,
            rules,
            observer,
        }
    }

    /// Create every planned directory, then write every planned file.
    ///
    /// The first read or write failure stops the pass; files written before
    /// it stay on disk.
    #[instrument(skip_all, fields(source = %source_root.display(), destination = %destination_root.display()))]
    pub fn materialize(
        &self,
        plan: &EjectionPlan,
        source_root: &Path,
        destination_root: &Path,
    ) -> EjectResult<MaterializeReport> {
        let mut report = MaterializeReport::default();

        for dir in plan.directories() {
            self.filesystem.create_dir_all(&dir.under(destination_root))?;
            report.directories_created += 1;
        }

        for file in plan.files() {
            if file.skip_on_eject {
                debug!(path = %file.path, "Skipping flagged entry");
                self.observer.file_skipped(&file.path);
                report.skipped.push(file.path.clone());
                continue;
            }

            let content = self
                .filesystem
                .read_to_string(&file.path.under(source_root))?;

            match self.rules.apply(&content) {
                Annotated::Skip => {
                    debug!(path = %file.path, "File opted out of eject");
                    self.observer.file_skipped(&file.path);
                    report.skipped.push(file.path.clone());
                }
                Annotated::Keep(text) => {
                    self.filesystem
                        .write_file(&file.path.under(destination_root), &text)?;
                    debug!(path = %file.path, bytes = text.len(), "File written");
                    self.observer.file_added(&file.path);
                    report.written.push(file.path.clone());
                }
            }
        }

        Ok(report)
    }
}
