//! Test class template with named placeholders.
//!
//! The template is the skeleton of a feature test class. Three
//! placeholders are substituted per controller; everything else is
//! reproduced byte for byte.

use std::fs;
use std::path::Path;

use crate::error::{GenerateError, GenerateResult};

pub const NAMESPACE_PLACEHOLDER: &str = "{{NAMESPACE}}";
pub const CLASS_NAME_PLACEHOLDER: &str = "{{CLASS_NAME}}";
pub const BODY_PLACEHOLDER: &str = "{{BODY}}";

const FEATURE_TEST_TEMPLATE: &str = include_str!("../templates/FeatureTest.php.stub");

/// A test class skeleton.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(FEATURE_TEST_TEMPLATE)
    }
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template from a file.
    pub fn load(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let source =
            fs::read_to_string(path).map_err(|e| GenerateError::template_read(path, e))?;
        Ok(Self::new(source))
    }

    /// The template lines with placeholders substituted.
    pub fn render_lines(&self, namespace_line: &str, class_name: &str, body: &str) -> Vec<String> {
        self.source
            .lines()
            .map(|line| {
                line.replace(NAMESPACE_PLACEHOLDER, namespace_line)
                    .replace(CLASS_NAME_PLACEHOLDER, class_name)
                    .replace(BODY_PLACEHOLDER, body)
            })
            .collect()
    }

    /// Render to text, terminating every line with `\n`.
    pub fn render(&self, namespace_line: &str, class_name: &str, body: &str) -> String {
        let mut out = String::new();
        for line in self.render_lines(namespace_line, class_name, body) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_template_renders_class() {
        let rendered = Template::default().render(
            r"namespace Tests\Feature;",
            "UserTest",
            "\tBODY\n",
        );
        let expected = "<?php\n\
            \n\
            namespace Tests\\Feature;\n\
            \n\
            use Illuminate\\Foundation\\Testing\\RefreshDatabase;\n\
            use Illuminate\\Foundation\\Testing\\WithFaker;\n\
            use Tests\\TestCase;\n\
            \n\
            class UserTest extends TestCase\n\
            {\n\
            \tBODY\n\
            \n\
            }\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_custom_template() {
        let template = Template::new("{{NAMESPACE}}\nfinal class {{CLASS_NAME}} {\n{{BODY}}\n}");
        let rendered = template.render("namespace App;", "OrderTest", "x");
        assert_eq!(rendered, "namespace App;\nfinal class OrderTest {\nx\n}\n");
    }

    #[test]
    fn test_load_missing_template() {
        let err = Template::load("/no/such/template.stub").unwrap_err();
        assert!(matches!(err, GenerateError::TemplateRead { .. }));
    }
}
