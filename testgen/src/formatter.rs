//! Test formatting - renders accumulated cases into test classes
//!
//! Cases are collected per controller. Every [`TestFormatter::add_case`]
//! call re-renders the functions for the controller's current case set and
//! appends them to the controller's function list; [`TestFormatter::emit`]
//! then writes one test class per controller.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use testsmith_core::{Case, CaseKind, CaseSet, RouteDescriptor};
use tracing::{debug, info};

use crate::error::{GenerateError, GenerateResult};
use crate::template::Template;

/// Extension of generated test files.
pub const FILE_EXTENSION: &str = "php";

/// A rendered test function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub code: String,
}

/// Everything accumulated for one controller.
///
/// The route metadata is last-write-wins: when several routes share a
/// controller, only the latest route's action, URL, method and auth flag
/// are kept, while the function list keeps growing.
#[derive(Debug, Clone, Default)]
pub struct ControllerCases {
    pub action: String,
    pub url: String,
    pub method: String,
    pub requires_auth: bool,
    pub cases: CaseSet,
    pub functions: Vec<FunctionRecord>,
}

/// A test class ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub content: String,
}

/// Accumulates cases per controller and renders test classes.
#[derive(Debug, Clone)]
pub struct TestFormatter {
    namespace_line: String,
    sync: bool,
    template: Template,
    controllers: Vec<(String, ControllerCases)>,
}

impl TestFormatter {
    pub fn new(namespace_line: impl Into<String>, sync: bool) -> Self {
        Self {
            namespace_line: namespace_line.into(),
            sync,
            template: Template::default(),
            controllers: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Record a route's cases under its controller.
    ///
    /// The controller's route metadata and current case set are replaced
    /// by this call's, then one function per case kind of the case set is
    /// rendered, in case-set order, and appended to the function list.
    /// With sync enabled the first rendered function depends on the last
    /// function already in the list and each later one on its predecessor.
    pub fn add_case(&mut self, cases: CaseSet, route: &RouteDescriptor) {
        let sync = self.sync;
        let controller = self.controller_mut(&route.controller_name);
        controller.action = route.action_name.clone();
        controller.url = route.url.clone();
        controller.method = route.http_method.clone();
        controller.requires_auth = route.requires_auth;
        controller.cases = cases;

        let mut previous = controller.functions.last().map(|f| f.name.clone());
        let mut rendered = Vec::with_capacity(controller.cases.len());
        for case in controller.cases.iter() {
            let depends = if sync { previous.as_deref() } else { None };
            let function = render_function(controller, case, depends);
            previous = Some(function.name.clone());
            rendered.push(function);
        }

        debug!(
            controller = %route.controller_name,
            action = %route.action_name,
            functions = rendered.len(),
            "formatted cases"
        );
        controller.functions.extend(rendered);
    }

    fn controller_mut(&mut self, name: &str) -> &mut ControllerCases {
        let index = match self.controllers.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.controllers
                    .push((name.to_string(), ControllerCases::default()));
                self.controllers.len() - 1
            }
        };
        &mut self.controllers[index].1
    }

    pub fn controller(&self, name: &str) -> Option<&ControllerCases> {
        self.controllers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Controller names in first-seen order.
    pub fn controller_names(&self) -> impl Iterator<Item = &str> {
        self.controllers.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Render one test class per controller.
    pub fn render_files(&self) -> Vec<RenderedFile> {
        self.controllers
            .iter()
            .map(|(name, controller)| {
                let class_name = format!("{}Test", name);
                let body = controller
                    .functions
                    .iter()
                    .map(|f| f.code.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                RenderedFile {
                    file_name: format!("{}.{}", class_name, FILE_EXTENSION),
                    content: self.template.render(&self.namespace_line, &class_name, &body),
                }
            })
            .collect()
    }

    /// Write every test class into `destination`, creating it first.
    ///
    /// Stops at the first I/O error; files written before it stay on disk.
    /// Returns the written paths in controller order.
    pub fn emit(&self, destination: &Path) -> GenerateResult<Vec<PathBuf>> {
        self.emit_with(destination, |_| {})
    }

    /// Like [`emit`](Self::emit), calling `on_written` as soon as each file
    /// is in place, so files written before a failure are still reported.
    pub fn emit_with(
        &self,
        destination: &Path,
        mut on_written: impl FnMut(&Path),
    ) -> GenerateResult<Vec<PathBuf>> {
        fs::create_dir_all(destination)
            .map_err(|e| GenerateError::create_dir(destination, e))?;

        let mut written = Vec::new();
        for file in self.render_files() {
            let path = destination.join(&file.file_name);
            write_file(&path, &file.content)?;
            info!(path = %path.display(), "wrote test class");
            on_written(&path);
            written.push(path);
        }
        Ok(written)
    }
}

/// Write through a sibling temporary file renamed into place. On failure
/// neither a truncated test class nor the temporary file is left behind.
fn write_file(path: &Path, content: &str) -> GenerateResult<()> {
    let staging = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
    let file = File::create(&staging).map_err(|e| GenerateError::write(&staging, e))?;

    let result = stage(file, content)
        .map_err(|e| GenerateError::write(&staging, e))
        .and_then(|()| fs::rename(&staging, path).map_err(|e| GenerateError::write(path, e)));
    if result.is_err() {
        if let Err(e) = fs::remove_file(&staging) {
            debug!(path = %staging.display(), error = %e, "could not remove staging file");
        }
    }
    result
}

/// Write and flush; the handle is closed when this returns.
fn stage(file: File, content: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

/// `test<action>`, with `WithError` for the failure case.
pub fn function_name(action: &str, kind: CaseKind) -> String {
    match kind {
        CaseKind::Failure => format!("test{}WithError", action),
        CaseKind::Success => format!("test{}", action),
    }
}

fn render_function(
    controller: &ControllerCases,
    case: &Case,
    depends: Option<&str>,
) -> FunctionRecord {
    let name = function_name(&controller.action, case.kind);

    let mut doc = format!("\t/**\n\t * {}\n\t *\n", controller.action);
    if let Some(previous) = depends {
        doc.push_str(&format!("\t * @depends {}\n", previous));
    }
    doc.push_str("\t * @return void\n\t */\n");
    doc.push_str(&format!("\tpublic function {}()", name));

    let mut body = format!(
        "\t\t$response = $this->json('{}', '{}', [",
        controller.method.to_uppercase(),
        controller.url
    );
    let params = render_params(case);
    if params.is_empty() {
        body.push(']');
    } else {
        body.push_str(&format!("\n{}\n\t\t]", params));
    }
    if controller.requires_auth {
        body.push_str(", [\n\t\t\t'Authorization' => 'Bearer '\n\t\t]");
    }
    body.push_str(");");
    body.push_str(&format!(
        "\n\n\t\t$response->assertStatus({});\n",
        case.kind.expected_status()
    ));

    FunctionRecord {
        name,
        code: format!("{}\n\t{{\n{}\n\t}}\n", doc, body),
    }
}

/// One `"field" => literal` entry per line, comma-separated.
fn render_params(case: &Case) -> String {
    case.iter()
        .map(|(field, value)| {
            format!("\t\t\t{} => {}", php_string(field), php_string(value.as_str()))
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// A double-quoted PHP string: JSON escaping plus an escaped `$` so the
/// value is never interpolated.
fn php_string(text: &str) -> String {
    serde_json::Value::from(text).to_string().replace('$', "\\$")
}
