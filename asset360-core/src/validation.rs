use crate::{error::Asset360Error, generators::work_order::WORK_ORDER_PLAN};
use asset360_schemas::config::GeneratorConfig;
use std::collections::HashSet;

/// Rejects catalogs the generators cannot work from. Runs before any table is produced.
///
/// # Errors
///
/// Returns `ConfigError` describing the first problem found.
pub fn validate_config(config: &GeneratorConfig) -> Result<(), Asset360Error> {
    let fail = |msg: String| Err(Asset360Error::ConfigError(msg));

    if config.num_products == 0 {
        return fail("num_products must be at least 1".to_string());
    }
    if config.num_boms == 0 {
        return fail("num_boms must be at least 1".to_string());
    }
    if config.location_list.is_empty() {
        return fail("location_list is empty".to_string());
    }
    if config.pharma_asset_suppliers.is_empty() {
        return fail("pharma_asset_suppliers is empty".to_string());
    }
    if config.storage_locations.is_empty() {
        return fail("storage_locations is empty".to_string());
    }

    let known: HashSet<&str> = config.asset_types.iter().map(String::as_str).collect();
    for line in &config.asset_production_lines {
        if let Some(unknown) = line.assets.iter().find(|a| !known.contains(a.as_str())) {
            return fail(format!(
                "Line type '{}' lists unknown asset type '{}'",
                line.name, unknown
            ));
        }
    }
    for (task, asset_type) in &config.procedure_asset_types {
        if !known.contains(asset_type.as_str()) {
            return fail(format!(
                "Task '{}' maps to unknown asset type '{}'",
                task, asset_type
            ));
        }
    }
    for (procedure_type, _) in WORK_ORDER_PLAN {
        if !config.unit_procedure_types.contains_key(procedure_type) {
            return fail(format!(
                "unit_procedure_types has no '{}' entry",
                procedure_type
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset360_schemas::config::{GoodQtySampling, LocationRecord, ProductionLine};
    use indexmap::IndexMap;

    fn valid() -> GeneratorConfig {
        let mut unit_procedure_types = IndexMap::new();
        for (procedure_type, _) in WORK_ORDER_PLAN {
            unit_procedure_types.insert(procedure_type.to_string(), vec!["Task".to_string()]);
        }
        let mut procedure_asset_types = IndexMap::new();
        procedure_asset_types.insert("Task".to_string(), "Mixer".to_string());

        GeneratorConfig {
            asset_types: vec!["Mixer".into()],
            location_list: vec![LocationRecord {
                region: "Europe".into(),
                plant_name: "Kinsale".into(),
                country: "Ireland".into(),
            }],
            storage_locations: vec!["Cork".into()],
            procedure_asset_types,
            asset_production_lines: vec![ProductionLine {
                name: "Tier1-Production-Line".into(),
                assets: vec!["Mixer".into()],
            }],
            unit_procedure_types,
            pharma_asset_suppliers: vec!["GEA".into()],
            product_list: vec![],
            num_products: 1,
            num_boms: 1,
            facility_types: IndexMap::new(),
            country_codes: IndexMap::new(),
            seed: None,
            good_qty_sampling: GoodQtySampling::Shared,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_zero_products_rejected() {
        let mut config = valid();
        config.num_products = 0;
        assert!(matches!(validate_config(&config), Err(Asset360Error::ConfigError(_))));
    }

    #[test]
    fn test_unknown_asset_type_rejected() {
        let mut config = valid();
        config.asset_production_lines[0].assets.push("Autoclave".into());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Autoclave"));
    }

    #[test]
    fn test_missing_procedure_type_rejected() {
        let mut config = valid();
        config.unit_procedure_types.shift_remove("QMS");
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("QMS"));
    }
}
