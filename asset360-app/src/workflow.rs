use crate::config::write_catalog;
use anyhow::{Context, Result};
use asset360_core::{
    analysis::{summarize, verify_integrity},
    pipeline::builder::PipelineBuilder,
    writer::{DatasetWriter, Manifest},
};
use asset360_schemas::config::GeneratorConfig;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line overrides and locations for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub reference_time: Option<NaiveDateTime>,
    pub num_products: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub tables: usize,
    pub total_rows: usize,
}

/// Generates the dataset, audits it and writes every table plus the manifest.
pub fn run(mut catalog: GeneratorConfig, options: &RunOptions) -> Result<RunReport> {
    println!("\n--- [Workflow] Generating dataset ---");

    if let Some(num_products) = options.num_products {
        catalog.num_products = num_products;
    }

    let mut builder = PipelineBuilder::new().with_config(catalog.clone());
    if let Some(seed) = options.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(reference_time) = options.reference_time {
        builder = builder.with_reference_time(reference_time);
    }

    let mut engine = builder.build().context("Failed to set up the generation pipeline")?;
    engine.run().context("Dataset generation failed")?;

    let seed = engine.get_seed().unwrap_or_default();
    let reference_time = engine.get_reference_time();
    let schedule = engine.get_schedule().to_vec();
    let dataset = engine.into_dataset();

    println!("\n--- [Workflow] Auditing dataset ---");
    let violations = verify_integrity(&dataset, reference_time.date());
    if violations.is_empty() {
        info!("Integrity audit passed");
    } else {
        warn!(count = violations.len(), "Integrity audit found violations");
        for violation in &violations {
            warn!("{}", violation);
        }
    }

    let summary = summarize(&dataset);
    if summary.total_skipped() > 0 {
        info!(skipped = summary.total_skipped(), "Work-order steps skipped");
    }

    println!("\n--- [Workflow] Writing tables to '{}' ---", options.output_dir.display());
    let writer = DatasetWriter::new(&options.output_dir)
        .with_context(|| format!("Failed to create output directory: {}", options.output_dir.display()))?;
    let tables = writer
        .write_dataset(&dataset, &schedule)
        .context("Failed to write tables")?;

    let report = RunReport {
        seed,
        tables: tables.len(),
        total_rows: summary.total_rows(),
    };

    writer
        .write_manifest(&Manifest {
            seed: Some(seed),
            reference_time,
            num_products: catalog.num_products,
            tables,
            summary,
        })
        .context("Failed to write manifest")?;

    // The effective catalog, with the resolved seed, reproduces this run
    catalog.seed = Some(seed);
    write_catalog(&options.output_dir.join("config.yaml"), &catalog)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_catalog;
    use chrono::NaiveDate;
    use std::{fs, path::Path};

    #[test]
    fn test_run_records_effective_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/config.yaml"))).unwrap();
        assert_ne!(catalog.num_products, 1);

        let options = RunOptions {
            output_dir: dir.path().to_path_buf(),
            seed: Some(5),
            reference_time: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(8, 0, 0),
            num_products: Some(1),
        };
        let report = run(catalog, &options).unwrap();
        assert_eq!(report.seed, 5);

        let written = load_catalog(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(written.num_products, 1);
        assert_eq!(written.seed, Some(5));

        let manifest: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(dir.path().join("manifest.json")).unwrap()).unwrap();
        assert_eq!(manifest["num_products"].as_u64(), Some(1));
        assert!(dir.path().join("lims.csv").exists());
    }
}
