//! Configuration for test generation

use std::path::PathBuf;

/// Feature-test root used when no output root is given.
pub const DEFAULT_OUTPUT_ROOT: &str = "tests/Feature";

/// Namespace of the feature-test root.
pub const BASE_NAMESPACE: &str = r"Tests\Feature";

/// Configuration for test generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Only routes whose URL starts with this prefix
    pub filter: Option<String>,
    /// Subdirectory under the output root; empty means the root itself
    pub directory: String,
    /// Chain generated functions with `@depends` annotations
    pub sync: bool,
    /// Random seed for reproducible values; `None` draws from entropy
    pub seed: Option<u64>,
    /// Feature-test root directory
    pub output_root: PathBuf,
    /// Test class template replacing the built-in one
    pub template: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            filter: None,
            directory: String::new(),
            sync: false,
            seed: None,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            template: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty filter matches every route.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = if filter.trim().is_empty() {
            None
        } else {
            Some(filter)
        };
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// The subdirectory with surrounding separators removed.
    fn directory_segment(&self) -> &str {
        self.directory.trim_matches(|c| c == '/' || c == '\\')
    }

    /// Directory the generated files are written to.
    pub fn destination(&self) -> PathBuf {
        let segment = self.directory_segment();
        if segment.is_empty() {
            self.output_root.clone()
        } else {
            self.output_root.join(segment)
        }
    }

    /// The namespace declaration line for generated classes.
    pub fn namespace_line(&self) -> String {
        let segment = self.directory_segment();
        if segment.is_empty() {
            format!("namespace {};", BASE_NAMESPACE)
        } else {
            format!("namespace {}\\{};", BASE_NAMESPACE, segment.replace('/', "\\"))
        }
    }
}
