/// Shared fixtures for the pipeline integration tests
use asset360_core::pipeline::{builder::PipelineBuilder, state::Dataset};
use asset360_schemas::{
    config::{GeneratorConfig, GoodQtySampling, LocationRecord, ProductionLine},
    topology::FacilityType,
};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

pub fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn line(name: &str, assets: &[&str]) -> ProductionLine {
    ProductionLine {
        name: name.to_string(),
        assets: strings(assets),
    }
}

/// Two sites, every manufacturing facility type carrying a LIMS line.
pub fn config(num_products: usize) -> GeneratorConfig {
    let mut unit_procedure_types = IndexMap::new();
    unit_procedure_types.insert(
        "Production-stage1".to_string(),
        strings(&["Mixing Blend", "Wet Granulation", "Fermentation"]),
    );
    unit_procedure_types.insert(
        "Production-stage2".to_string(),
        strings(&["Tablet Compression", "Film Coating"]),
    );
    unit_procedure_types.insert("Cleaning".to_string(), strings(&["Clean In Place"]));
    unit_procedure_types.insert("QMS".to_string(), strings(&["Visual Inspection"]));
    unit_procedure_types.insert(
        "LIMS".to_string(),
        strings(&["Assay Test", "Dissolution Test", "Impurity Profile"]),
    );

    let mut procedure_asset_types = IndexMap::new();
    for (task, asset_type) in [
        ("Mixing Blend", "Mixer"),
        ("Wet Granulation", "Granulator"),
        ("Fermentation", "Bioreactor"),
        ("Tablet Compression", "Tablet Press"),
        ("Film Coating", "Coater"),
        ("Clean In Place", "CIP Skid"),
        ("Visual Inspection", "Inspection Station"),
        ("Assay Test", "HPLC"),
        ("Dissolution Test", "HPLC"),
        ("Impurity Profile", "HPLC"),
    ] {
        procedure_asset_types.insert(task.to_string(), asset_type.to_string());
    }

    let mut facility_types = IndexMap::new();
    facility_types.insert(
        FacilityType::ContinuousManufacturing,
        strings(&["Tier1-Production-Line", "Tier2-Production-Line", "Packaging-Line", "LIMS-Line"]),
    );
    facility_types.insert(
        FacilityType::BatchManufacturing,
        strings(&["Tier1-Production-Line", "Packaging-Line", "LIMS-Line"]),
    );
    facility_types.insert(FacilityType::ResearchAndDevelopment, strings(&["Pilot-Line"]));
    facility_types.insert(FacilityType::WarehousingAndDistribution, strings(&["Storage-Line"]));

    let mut country_codes = IndexMap::new();
    country_codes.insert("Ireland".to_string(), "IE".to_string());
    country_codes.insert("United States".to_string(), "US".to_string());

    GeneratorConfig {
        asset_types: strings(&[
            "Mixer",
            "Granulator",
            "Bioreactor",
            "Tablet Press",
            "Coater",
            "Blister Packer",
            "Inspection Station",
            "CIP Skid",
            "HPLC",
        ]),
        location_list: vec![
            LocationRecord {
                region: "Europe".into(),
                plant_name: "Kinsale".into(),
                country: "Ireland".into(),
            },
            LocationRecord {
                region: "North America".into(),
                plant_name: "Durham".into(),
                country: "United States".into(),
            },
        ],
        storage_locations: strings(&["Cork", "Raleigh", "Basel"]),
        procedure_asset_types,
        asset_production_lines: vec![
            line("Tier1-Production-Line", &["Mixer", "Granulator", "Bioreactor"]),
            line("Tier2-Production-Line", &["Tablet Press", "Coater"]),
            line("Packaging-Line", &["Blister Packer", "Inspection Station", "CIP Skid"]),
            line("LIMS-Line", &["HPLC"]),
            line("Pilot-Line", &["Mixer"]),
        ],
        unit_procedure_types,
        pharma_asset_suppliers: strings(&["GEA", "Syntegon", "Sartorius"]),
        product_list: strings(&["Amoxicillin", "Lisinopril"]),
        num_products,
        num_boms: 10,
        facility_types,
        country_codes,
        seed: None,
        good_qty_sampling: GoodQtySampling::Shared,
    }
}

pub fn generate(config: GeneratorConfig, seed: u64) -> Dataset {
    let mut engine = PipelineBuilder::new()
        .with_config(config)
        .with_seed(seed)
        .with_reference_time(reference_time())
        .build()
        .expect("valid pipeline");
    engine.run().expect("generation succeeds");
    engine.into_dataset()
}
