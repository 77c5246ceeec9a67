use serde_json::{Map, Value, json};

/// Placeholder the test runner expands to the project root.
pub const ROOT_DIR_TOKEN: &str = "<rootDir>";

/// Inputs for the test-runner configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunnerOptions {
    /// Explicit `rootDir`; omitted when `None`.
    pub root_dir: Option<String>,
    /// Building for an ejected project: JS transforms go through the
    /// project's own `babel-jest` instead of the template's transform.
    pub ejecting: bool,
    /// The project has its own test setup file.
    pub has_setup_file: bool,
}

/// Resolver used when ejecting: template-relative paths become
/// `<rootDir>`-relative.
pub fn root_dir_resolver(path: &str) -> String {
    format!("{ROOT_DIR_TOKEN}/{path}")
}

/// Build the test-runner configuration block.
///
/// `resolve` rewrites template-relative paths; when ejecting it is usually
/// [`root_dir_resolver`].
pub fn build_test_runner_config(resolve: impl Fn(&str) -> String, options: &TestRunnerOptions) -> Value {
    let js_transform = if options.ejecting {
        format!("{ROOT_DIR_TOKEN}/node_modules/babel-jest")
    } else {
        resolve("config/jest/babelTransform.js")
    };

    let mut transform = Map::new();
    transform.insert(r"^.+\.(js|jsx)$".into(), Value::String(js_transform));
    transform.insert(
        r"^.+\.css$".into(),
        Value::String(resolve("config/jest/cssTransform.js")),
    );
    transform.insert(
        r"^(?!.*\.(js|jsx|css|json)$)".into(),
        Value::String(resolve("config/jest/fileTransform.js")),
    );

    let mut config = Map::new();
    config.insert("collectCoverageFrom".into(), json!(["src/**/*.{js,jsx}"]));
    config.insert("setupFiles".into(), json!([resolve("config/polyfills.js")]));
    if options.has_setup_file {
        config.insert(
            "setupTestFrameworkScriptFile".into(),
            Value::String(format!("{ROOT_DIR_TOKEN}/src/setupTests.js")),
        );
    }
    config.insert(
        "testPathIgnorePatterns".into(),
        json!([format!(r"{ROOT_DIR_TOKEN}[/\\](build|docs|node_modules|scripts)[/\\]")]),
    );
    config.insert("testEnvironment".into(), json!("node"));
    config.insert("testURL".into(), json!("http://localhost"));
    config.insert("transform".into(), Value::Object(transform));
    config.insert(
        "transformIgnorePatterns".into(),
        json!([r"[/\\]node_modules[/\\].+\.(js|jsx)$"]),
    );
    config.insert(
        "moduleNameMapper".into(),
        json!({ "^react-native$": "react-native-web" }),
    );
    if let Some(root) = &options.root_dir {
        config.insert("rootDir".into(), Value::String(root.clone()));
    }

    Value::Object(config)
}
