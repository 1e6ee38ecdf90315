//! The generation pipeline: routes in, test classes out.

use std::path::{Path, PathBuf};

use testsmith_core::RouteSource;
use testsmith_synth::{FakeProvider, FakerProvider, ValueSynthesizer};
use tracing::{debug, info};

use crate::cases::build_cases;
use crate::config::GeneratorConfig;
use crate::error::GenerateResult;
use crate::formatter::{RenderedFile, TestFormatter};
use crate::template::Template;

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Routes supplied by the source
    pub routes_seen: usize,
    /// Routes that passed the filter
    pub routes_matched: usize,
    /// Test classes written, in controller order
    pub files: Vec<PathBuf>,
}

/// Main entry point for test generation
pub struct TestGenerator<P: FakeProvider = FakerProvider> {
    pub config: GeneratorConfig,
    synthesizer: ValueSynthesizer<P>,
}

impl TestGenerator<FakerProvider> {
    /// A generator over the `fake` crate, seeded from the config.
    pub fn new(config: GeneratorConfig) -> Self {
        let synthesizer = ValueSynthesizer::with_seed(config.seed);
        Self {
            config,
            synthesizer,
        }
    }
}

impl<P: FakeProvider> TestGenerator<P> {
    pub fn with_provider(config: GeneratorConfig, provider: P) -> Self {
        Self {
            config,
            synthesizer: ValueSynthesizer::new(provider),
        }
    }

    /// Build cases for every matching route and collect them per
    /// controller. Returns the formatter and the route counts.
    pub fn format(
        &mut self,
        source: &(impl RouteSource + ?Sized),
    ) -> GenerateResult<(TestFormatter, usize, usize)> {
        let template = match &self.config.template {
            Some(path) => Template::load(path)?,
            None => Template::default(),
        };
        let mut formatter = TestFormatter::new(self.config.namespace_line(), self.config.sync)
            .with_template(template);

        let routes = source.routes();
        let seen = routes.len();
        let mut matched = 0;
        for route in routes {
            let descriptor = &route.descriptor;
            if let Some(filter) = &self.config.filter {
                if !descriptor.matches_prefix(filter) {
                    debug!(route = %descriptor, filter = %filter, "route filtered out");
                    continue;
                }
            }
            matched += 1;
            debug!(route = %descriptor, fields = route.rules.len(), "building cases");
            let cases = build_cases(&route.rules, &mut self.synthesizer);
            formatter.add_case(cases, descriptor);
        }

        Ok((formatter, seen, matched))
    }

    /// Render the test classes without touching the file system.
    pub fn render(
        &mut self,
        source: &(impl RouteSource + ?Sized),
    ) -> GenerateResult<Vec<RenderedFile>> {
        let (formatter, _, _) = self.format(source)?;
        Ok(formatter.render_files())
    }

    /// Generate and write one test class per controller.
    pub fn generate(
        &mut self,
        source: &(impl RouteSource + ?Sized),
    ) -> GenerateResult<GenerationReport> {
        self.generate_with(source, |_| {})
    }

    /// Like [`generate`](Self::generate), calling `on_written` for each file
    /// as soon as it is written.
    pub fn generate_with(
        &mut self,
        source: &(impl RouteSource + ?Sized),
        on_written: impl FnMut(&Path),
    ) -> GenerateResult<GenerationReport> {
        let (formatter, routes_seen, routes_matched) = self.format(source)?;
        let destination = self.config.destination();
        let files = formatter.emit_with(&destination, on_written)?;

        info!(
            routes = routes_seen,
            matched = routes_matched,
            files = files.len(),
            destination = %destination.display(),
            "generation finished"
        );

        Ok(GenerationReport {
            routes_seen,
            routes_matched,
            files,
        })
    }
}
