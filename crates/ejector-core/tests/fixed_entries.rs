//! Planning and materializing a hand-written entry list through the public API.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ejector_core::{
    application::{
        ApplicationError, EntrySource, Materializer, NoopObserver, ports::Filesystem,
    },
    domain::{AnnotationRules, EjectionPlan, RelativePath, TemplateEntry},
    error::EjectResult,
};

/// Just enough filesystem for a materializer run.
#[derive(Default)]
struct Tree {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl Tree {
    fn with(self, path: &str, content: &str) -> Self {
        self.files.lock().unwrap().insert(path.into(), content.into());
        self
    }

    fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl Filesystem for Tree {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> EjectResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "missing".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> EjectResult<()> {
        self.files.lock().unwrap().insert(path.to_path_buf(), content.into());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> EjectResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn list_files(&self, _dir: &Path) -> EjectResult<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn remove_file(&self, _path: &Path) -> EjectResult<()> {
        Ok(())
    }

    fn remove_dir_all(&self, _path: &Path) -> EjectResult<()> {
        Ok(())
    }
}

fn rel(p: &str) -> RelativePath {
    RelativePath::try_new(p).unwrap()
}

#[test]
fn fixed_list_flows_through_plan_and_materializer() {
    let fs = Tree::default()
        .with("/tpl/template/src/App.js", "// @remove-on-eject-begin\nx\n// @remove-on-eject-end\napp();")
        .with("/tpl/template/README.md", "readme");

    let entries = vec![
        TemplateEntry::file(rel("src/App.js")),
        TemplateEntry::file(rel("README.md")).skipped(),
    ];
    let entries = entries.entries().unwrap();

    let plan = EjectionPlan::build(Path::new("/out"), &entries, |p| fs.exists(p)).unwrap();
    assert_eq!(plan.directories(), &[rel("src")]);

    let rules = AnnotationRules::eject_defaults().unwrap();
    let report = Materializer::new(&fs, &rules, &NoopObserver)
        .materialize(&plan, Path::new("/tpl/template"), Path::new("/out"))
        .unwrap();

    assert_eq!(report.directories_created, 1);
    assert_eq!(report.written, vec![rel("src/App.js")]);
    assert_eq!(report.skipped, vec![rel("README.md")]);
    assert_eq!(fs.get("/out/src/App.js").as_deref(), Some("app();\n"));
    assert!(fs.get("/out/README.md").is_none());
}

#[test]
fn paths_escaping_the_root_are_rejected() {
    assert!(RelativePath::try_new("../outside").is_err());
    assert!(RelativePath::try_new("/etc/passwd").is_err());
}
