//! testsmith - generates feature tests from a route manifest
//!
//! Usage:
//!   testsmith --manifest routes.json [--filter /api] [--dir Api] [--sync]
//!
//! The manifest is the route table dumped by the host application, with
//! the validation rules of each route's request.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use testsmith_core::Manifest;
use testsmith_testgen::{GeneratorConfig, TestGenerator};

/// Generate feature tests for every route in a manifest
#[derive(Parser)]
#[command(name = "testsmith")]
#[command(about = "Automatically generates feature test cases for an application's routes", long_about = None)]
#[command(version)]
struct Cli {
    /// Route manifest (JSON)
    #[arg(short, long, env = "TESTSMITH_MANIFEST", default_value = "routes.json")]
    manifest: PathBuf,

    /// Only routes with this URL prefix, such as /api or /v2/api
    #[arg(short, long, env = "TESTSMITH_FILTER")]
    filter: Option<String>,

    /// Directory under the feature folder to store the test files in
    #[arg(short, long = "dir", env = "TESTSMITH_DIR", default_value = "")]
    directory: String,

    /// Add @depends annotations chaining each function to the previous one
    #[arg(short, long, env = "TESTSMITH_SYNC")]
    sync: bool,

    /// Seed for reproducible fake values
    #[arg(long, env = "TESTSMITH_SEED")]
    seed: Option<u64>,

    /// Feature-test root directory
    #[arg(long, env = "TESTSMITH_OUTPUT_ROOT", default_value = "tests/Feature")]
    output_root: PathBuf,

    /// Test class template replacing the built-in one
    #[arg(long, env = "TESTSMITH_TEMPLATE")]
    template: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "TESTSMITH_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let manifest = Manifest::load(&cli.manifest)
        .with_context(|| format!("loading routes from {}", cli.manifest.display()))?;

    let mut config = GeneratorConfig::new()
        .with_directory(cli.directory)
        .with_sync(cli.sync)
        .with_output_root(cli.output_root);
    if let Some(filter) = cli.filter {
        config = config.with_filter(filter);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(template) = cli.template {
        config = config.with_template(template);
    }

    let mut generator = TestGenerator::new(config);
    let report = generator.generate_with(&manifest, |path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("\x1b[32m{} Created Successfully\x1b[0m", name);
    })?;
    if report.routes_matched == 0 {
        println!("No routes matched; nothing generated.");
    }

    Ok(())
}
