use crate::{context::GenerationContext, error::Asset360Error};
use asset360_schemas::{
    asset::Asset,
    catalog::{Oem, UnitProcedure},
    config::GeneratorConfig,
    topology::Line,
    NOT_APPLICABLE,
};
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Installs one asset per asset type listed for each line's line type.
///
/// # Errors
///
/// Returns `ConfigError` when there is no OEM to assign.
pub fn generate_assets(
    ctx: &mut GenerationContext,
    lines: &[Line],
    oems: &[Oem],
    unit_procedures: &[UnitProcedure],
    config: &GeneratorConfig,
) -> Result<Vec<Asset>, Asset360Error> {
    // First procedure per asset type wins.
    let mut procedure_by_asset_type: HashMap<&str, &str> = HashMap::new();
    for procedure in unit_procedures {
        if let Some(asset_type) = &procedure.asset_type {
            procedure_by_asset_type
                .entry(asset_type.as_str())
                .or_insert(procedure.id.as_str());
        }
    }

    let mut assets = Vec::new();
    for line in lines {
        for asset_type in config.assets_for_line(&line.line_type) {
            let oem = oems
                .choose(&mut ctx.rng)
                .ok_or_else(|| Asset360Error::ConfigError("No OEM available for assets".to_string()))?;
            let id = format!("A{}", assets.len() + 1);
            assets.push(Asset {
                name: format!("{}:{}", id, asset_type),
                id,
                asset_type: asset_type.clone(),
                facility_id: line.facility_id.clone(),
                line_id: line.id.clone(),
                line_floor: line.floor,
                manufacturer_id: oem.id.clone(),
                unit_procedure_id: procedure_by_asset_type
                    .get(asset_type.as_str())
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            });
        }
    }

    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::ctx;
    use asset360_schemas::config::{GoodQtySampling, ProductionLine};
    use indexmap::IndexMap;

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            asset_types: vec!["Mixer".into(), "Blister Packer".into()],
            location_list: vec![],
            storage_locations: vec![],
            procedure_asset_types: IndexMap::new(),
            asset_production_lines: vec![
                ProductionLine {
                    name: "Tier1-Production-Line".into(),
                    assets: vec!["Mixer".into(), "Granulator".into()],
                },
                ProductionLine {
                    name: "Packaging Line".into(),
                    assets: vec!["Blister Packer".into()],
                },
            ],
            unit_procedure_types: IndexMap::new(),
            pharma_asset_suppliers: vec![],
            product_list: vec![],
            num_products: 1,
            num_boms: 1,
            facility_types: IndexMap::new(),
            country_codes: IndexMap::new(),
            seed: None,
            good_qty_sampling: GoodQtySampling::Shared,
        }
    }

    fn line(id: &str, line_type: &str) -> Line {
        Line {
            id: id.into(),
            name: format!("F-1-S1-{}-{}", line_type, id),
            facility_id: "F-1-S1".into(),
            line_type: line_type.into(),
            capacity: 50,
            floor: 1,
        }
    }

    #[test]
    fn test_asset_expansion_counts_and_ids() {
        let mut ctx = ctx(11);
        let lines = vec![
            line("L1", "Tier1-Production-Line"),
            line("L2", "Packaging Line"),
            line("L3", "General Line"),
        ];
        let oems = vec![Oem {
            id: "MFR1".into(),
            manufacturer_name: "GEA".into(),
        }];
        let procedures = vec![UnitProcedure {
            id: "PR1-1-MIM".into(),
            name: "Production-stage1-1-Mixing".into(),
            procedure_type: "Production-stage1".into(),
            task: "Mixing".into(),
            asset_type: Some("Mixer".into()),
        }];

        let assets = generate_assets(&mut ctx, &lines, &oems, &procedures, &config()).unwrap();
        assert_eq!(assets.len(), 3);
        assert_eq!(
            assets.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec!["A1", "A2", "A3"]
        );
        assert_eq!(assets[0].name, "A1:Mixer");
        assert_eq!(assets[0].unit_procedure_id, "PR1-1-MIM");
        assert_eq!(assets[1].unit_procedure_id, NOT_APPLICABLE);
        assert_eq!(assets[2].line_id, "L2");
        assert!(assets.iter().all(|a| a.manufacturer_id == "MFR1"));
    }

    #[test]
    fn test_missing_oem_is_a_config_error() {
        let mut ctx = ctx(1);
        let result = generate_assets(
            &mut ctx,
            &[line("L1", "Packaging Line")],
            &[],
            &[],
            &config(),
        );
        assert!(matches!(result, Err(Asset360Error::ConfigError(_))));
    }
}
