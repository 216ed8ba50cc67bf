use anyhow::{Context, Result};
use asset360_schemas::{config::GeneratorConfig, file_formats::CatalogFile};
use std::{fs, path::Path};
use tracing::{info, warn};

pub const SUPPORTED_SCHEMA_VERSION: &str = "1.0";

/// Loads the generator catalog from a YAML file.
pub fn load_catalog(path: &Path) -> Result<GeneratorConfig> {
    println!("Loading catalog from '{}'...", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let catalog = parse_catalog(&content)
        .with_context(|| format!("Failed to parse YAML from {}", path.display()))?;

    info!(
        asset_types = catalog.asset_types.len(),
        locations = catalog.location_list.len(),
        num_products = catalog.num_products,
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Writes the catalog a run actually used, overrides applied, as a catalog file.
pub fn write_catalog(path: &Path, catalog: &GeneratorConfig) -> Result<()> {
    let file = CatalogFile {
        schema_version: SUPPORTED_SCHEMA_VERSION.to_string(),
        catalog: catalog.clone(),
    };
    let yaml = serde_yaml::to_string(&file).context("Failed to serialize catalog")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write catalog file: {}", path.display()))
}

fn parse_catalog(content: &str) -> Result<GeneratorConfig> {
    let file: CatalogFile = serde_yaml::from_str(content)?;
    if file.schema_version != SUPPORTED_SCHEMA_VERSION {
        warn!(
            found = %file.schema_version,
            supported = SUPPORTED_SCHEMA_VERSION,
            "Catalog schema version differs from the supported one"
        );
    }
    Ok(file.catalog)
}
