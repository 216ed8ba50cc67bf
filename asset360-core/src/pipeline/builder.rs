use crate::{
    context::GenerationContext,
    error::Asset360Error,
    generators::material::first_batch_date,
    pipeline::{
        engine::PipelineEngine,
        stage::{schedule, Stage},
        state::Dataset,
    },
    validation::validate_config,
};
use asset360_schemas::config::GeneratorConfig;
use chrono::NaiveDateTime;

/// A fluent builder for constructing a `PipelineEngine`.
///
/// Only the configuration is mandatory. The seed falls back to the configuration's seed and
/// then to a freshly drawn one, so every run can be reproduced from its recorded seed.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<GeneratorConfig>,
    seed: Option<u64>,
    reference_time: Option<NaiveDateTime>,
    stages: Option<Vec<Stage>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the static catalogs the generators draw from.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides any seed given in the configuration.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fixes "now" for the run. Defaults to the current UTC time.
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Restricts the run to a subset of stages. They are reordered by dependency.
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = Some(stages);
        self
    }

    /// Consumes the builder and returns a ready-to-run `PipelineEngine`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no configuration was provided, it fails validation or the
    /// reference time precedes the first material batch date. Returns a scheduling error if
    /// the requested stages miss a dependency.
    pub fn build(self) -> Result<PipelineEngine, Asset360Error> {
        let config = self
            .config
            .ok_or_else(|| Asset360Error::ConfigError("Generator configuration is missing".to_string()))?;
        validate_config(&config)?;

        let stages = match self.stages {
            Some(stages) => schedule(&stages)?,
            None => schedule(&Stage::ALL)?,
        };

        let seed = self.seed.or(config.seed).unwrap_or_else(rand::random);
        let reference_time = self
            .reference_time
            .unwrap_or_else(|| chrono::Utc::now().naive_utc());
        if reference_time.date() < first_batch_date() {
            return Err(Asset360Error::ConfigError(format!(
                "Reference time {} is earlier than the first material batch date {}",
                reference_time,
                first_batch_date()
            )));
        }

        Ok(PipelineEngine {
            ctx: GenerationContext::seeded(seed, reference_time),
            config,
            schedule: stages,
            dataset: Dataset::default(),
        })
    }
}
