//! End-to-end generation tests
//!
//! These tests run the whole pipeline from a route manifest to test
//! classes on disk.

use std::fs;

use pretty_assertions::assert_eq;
use testsmith_core::{DiscoveredRoute, FieldRuleSet, Manifest, RouteDescriptor};
use testsmith_testgen::{GenerateError, GeneratorConfig, TestGenerator};

fn users_route(auth: bool) -> DiscoveredRoute {
    let rules: FieldRuleSet = [("email", "required|email"), ("name", "required|string")]
        .into_iter()
        .collect();
    DiscoveredRoute::new(
        RouteDescriptor::new("/api/users", "POST", "User", "store").with_auth(auth),
        rules,
    )
}

fn config(root: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig::new().with_output_root(root).with_seed(42)
}

/// The quoted value of `"field" => "..."` in a rendered function.
fn param_value<'a>(code: &'a str, field: &str) -> &'a str {
    let marker = format!("\"{}\" => \"", field);
    let start = code.find(&marker).expect("field present") + marker.len();
    let end = start + code[start..].find('"').expect("closing quote");
    &code[start..end]
}

#[test]
fn test_store_route_produces_user_test() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = TestGenerator::new(config(dir.path()));

    let report = generator.generate(&vec![users_route(false)]).unwrap();

    let path = dir.path().join("UserTest.php");
    assert_eq!(report.files, vec![path.clone()]);
    assert_eq!(report.routes_matched, 1);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("<?php\n\nnamespace Tests\\Feature;\n"));
    assert!(content.contains("class UserTest extends TestCase\n{\n"));
    assert!(content.ends_with("\t}\n\n}\n"));

    let failure_at = content.find("public function teststoreWithError()").unwrap();
    let success_at = content.find("public function teststore()").unwrap();
    assert!(failure_at < success_at);

    let failure = &content[failure_at..success_at];
    let success = &content[success_at..];
    assert!(failure.contains("$this->json('POST', '/api/users', ["));
    assert!(failure.contains("$response->assertStatus(400);"));
    assert_eq!(param_value(failure, "email"), "");
    assert_eq!(param_value(failure, "name"), "");

    assert!(success.contains("$response->assertStatus(200);"));
    assert!(param_value(success, "email").contains('@'));
    assert!(!param_value(success, "name").is_empty());
    assert!(!content.contains("Authorization"));
}

#[test]
fn test_auth_route_sends_bearer_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = TestGenerator::new(config(dir.path()));
    generator.generate(&vec![users_route(true)]).unwrap();

    let content = fs::read_to_string(dir.path().join("UserTest.php")).unwrap();
    assert_eq!(content.matches("'Authorization' => 'Bearer '").count(), 2);
}

#[test]
fn test_date_format_rule_yields_formatted_date() {
    let rules: FieldRuleSet = [("event_date", "required|date_format:Y-m-d")].into_iter().collect();
    let route = DiscoveredRoute::new(
        RouteDescriptor::new("/api/events", "post", "Event", "store"),
        rules,
    );
    let mut generator = TestGenerator::new(GeneratorConfig::new().with_seed(9));
    let files = generator.render(&vec![route]).unwrap();

    let content = &files[0].content;
    let success = &content[content.find("public function teststore()").unwrap()..];
    let date = param_value(success, "event_date");
    let parts: Vec<&str> = date.split('-').collect();
    assert_eq!(parts.len(), 3, "{} is Y-m-d", date);
    assert_eq!(parts[0].len(), 4);
    assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
}

#[test]
fn test_filter_keeps_matching_prefix_only() {
    let manifest = Manifest::from_json(
        r#"{"routes": [
            {"url": "api/users", "method": "POST", "controller": "User", "action": "store",
             "rules": {"email": "required|email"}},
            {"url": "v2/api/orders", "method": "POST", "controller": "Order", "action": "store",
             "rules": {"total": "required|numeric"}}
        ]}"#,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut generator = TestGenerator::new(config(dir.path()).with_filter("/v2"));
    let report = generator.generate(&manifest).unwrap();

    assert_eq!(report.routes_seen, 2);
    assert_eq!(report.routes_matched, 1);
    assert_eq!(report.files, vec![dir.path().join("OrderTest.php")]);
    assert!(!dir.path().join("UserTest.php").exists());
}

#[test]
fn test_unmatched_filter_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = TestGenerator::new(config(dir.path()).with_filter("/nope"));
    let report = generator.generate(&vec![users_route(false)]).unwrap();
    assert_eq!(report.routes_matched, 0);
    assert!(report.files.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_sync_directory_and_shared_controller() {
    let mut update_rules = FieldRuleSet::new();
    update_rules.insert("phone", "required");
    let routes = vec![
        users_route(false),
        DiscoveredRoute::new(
            RouteDescriptor::new("/api/users/{id}", "PUT", "User", "update"),
            update_rules,
        ),
    ];

    let dir = tempfile::tempdir().unwrap();
    let mut generator =
        TestGenerator::new(config(dir.path()).with_directory("Api/V1").with_sync(true));
    let report = generator.generate(&routes).unwrap();

    let path = dir.path().join("Api").join("V1").join("UserTest.php");
    assert_eq!(report.files, vec![path.clone()]);

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("namespace Tests\\Feature\\Api\\V1;\n"));

    let depends: Vec<&str> = content
        .lines()
        .filter_map(|line| line.strip_prefix("\t * @depends "))
        .collect();
    assert_eq!(depends, vec!["teststoreWithError", "teststore", "testupdateWithError"]);
    assert!(content.contains("public function testupdate()"));
}

#[test]
fn test_regeneration_keeps_function_names() {
    let routes = vec![users_route(false), users_route(true)];
    let names = |seed: u64| -> Vec<String> {
        let mut generator = TestGenerator::new(GeneratorConfig::new().with_seed(seed));
        let files = generator.render(&routes).unwrap();
        files[0]
            .content
            .lines()
            .filter_map(|line| line.strip_prefix("\tpublic function "))
            .map(str::to_string)
            .collect()
    };
    let first = names(1);
    assert_eq!(first.len(), 4);
    assert_eq!(first, names(2));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let render = || {
        let mut generator = TestGenerator::new(GeneratorConfig::new().with_seed(5));
        generator.render(&vec![users_route(false)]).unwrap()
    };
    let a = render();
    let b = render();
    let success = &a[0].content[a[0].content.find("public function teststore()").unwrap()..];
    assert!(!param_value(success, "email").is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_destination_blocked_by_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("Feature");
    fs::write(&blocker, "not a directory").unwrap();

    let mut generator = TestGenerator::new(config(&blocker));
    let err = generator.generate(&vec![users_route(false)]).unwrap_err();
    assert!(matches!(err, GenerateError::CreateDir { .. }));
}

#[test]
fn test_custom_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("Custom.stub");
    fs::write(
        &template,
        "<?php\n{{NAMESPACE}}\nfinal class {{CLASS_NAME}} extends BaseTest\n{\n{{BODY}}\n}\n",
    )
    .unwrap();

    let mut generator =
        TestGenerator::new(config(&dir.path().join("out")).with_template(&template));
    generator.generate(&vec![users_route(false)]).unwrap();

    let content = fs::read_to_string(dir.path().join("out").join("UserTest.php")).unwrap();
    assert!(content.starts_with("<?php\nnamespace Tests\\Feature;\nfinal class UserTest extends BaseTest\n"));
}
