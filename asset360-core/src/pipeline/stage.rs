use crate::error::Asset360Error;
use std::collections::HashSet;

/// A named generation step producing exactly one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Region,
    Site,
    Facility,
    Line,
    Oem,
    UnitProcedure,
    Asset,
    AssetInfo,
    Operation,
    Oee,
    MachineAttributes,
    Maintenance,
    Calibration,
    Compliance,
    Product,
    ProcessOrder,
    Batch,
    Material,
    PlantMaterial,
    Recipe,
    Supplier,
    MaterialSupplier,
    WorkOrder,
    Lims,
}

impl Stage {
    /// Every stage, in the canonical order the generator runs them.
    pub const ALL: [Stage; 24] = [
        Stage::Region,
        Stage::Site,
        Stage::Facility,
        Stage::Line,
        Stage::Oem,
        Stage::UnitProcedure,
        Stage::Asset,
        Stage::AssetInfo,
        Stage::Operation,
        Stage::Oee,
        Stage::MachineAttributes,
        Stage::Maintenance,
        Stage::Calibration,
        Stage::Compliance,
        Stage::Product,
        Stage::ProcessOrder,
        Stage::Batch,
        Stage::Material,
        Stage::PlantMaterial,
        Stage::Recipe,
        Stage::Supplier,
        Stage::MaterialSupplier,
        Stage::WorkOrder,
        Stage::Lims,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Region => "region",
            Stage::Site => "site",
            Stage::Facility => "facility",
            Stage::Line => "line",
            Stage::Oem => "oem",
            Stage::UnitProcedure => "unit_procedure",
            Stage::Asset => "asset",
            Stage::AssetInfo => "asset_info",
            Stage::Operation => "asset_operation",
            Stage::Oee => "asset_oee",
            Stage::MachineAttributes => "asset_machine_attributes",
            Stage::Maintenance => "maintenance",
            Stage::Calibration => "calibration",
            Stage::Compliance => "compliance",
            Stage::Product => "product",
            Stage::ProcessOrder => "process_order",
            Stage::Batch => "batch",
            Stage::Material => "material",
            Stage::PlantMaterial => "plant_material",
            Stage::Recipe => "recipe",
            Stage::Supplier => "supplier",
            Stage::MaterialSupplier => "material_supplier_map",
            Stage::WorkOrder => "work_order",
            Stage::Lims => "lims",
        }
    }

    /// CSV file the stage's table is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            Stage::Region => "region.csv",
            Stage::Site => "site.csv",
            Stage::Facility => "facility.csv",
            Stage::Line => "line.csv",
            Stage::Oem => "oem.csv",
            Stage::UnitProcedure => "up.csv",
            Stage::Asset => "asset.csv",
            Stage::AssetInfo => "asset_info.csv",
            Stage::Operation => "asset_oper.csv",
            Stage::Oee => "asset_oee.csv",
            Stage::MachineAttributes => "asset_machine.csv",
            Stage::Maintenance => "maintenance.csv",
            Stage::Calibration => "calibration.csv",
            Stage::Compliance => "compliance.csv",
            Stage::Product => "product.csv",
            Stage::ProcessOrder => "po.csv",
            Stage::Batch => "batch.csv",
            Stage::Material => "material.csv",
            Stage::PlantMaterial => "plant_material.csv",
            Stage::Recipe => "recipe.csv",
            Stage::Supplier => "supplier.csv",
            Stage::MaterialSupplier => "material_supplier_rel.csv",
            Stage::WorkOrder => "wo.csv",
            Stage::Lims => "lims.csv",
        }
    }

    /// Upstream stages whose tables this stage reads.
    pub fn requires(&self) -> &'static [Stage] {
        match self {
            Stage::Region | Stage::Oem | Stage::UnitProcedure | Stage::Material | Stage::Supplier => &[],
            Stage::Site => &[Stage::Region],
            Stage::Facility => &[Stage::Site, Stage::Region],
            Stage::Line => &[Stage::Facility],
            Stage::Asset => &[Stage::Line, Stage::Oem, Stage::UnitProcedure],
            Stage::AssetInfo | Stage::Operation | Stage::Calibration | Stage::Compliance => {
                &[Stage::Asset]
            }
            Stage::Oee => &[Stage::Operation],
            Stage::MachineAttributes | Stage::Maintenance => &[Stage::Asset, Stage::Oee],
            Stage::Product => &[Stage::Site],
            Stage::ProcessOrder => &[Stage::Product],
            Stage::Batch => &[Stage::ProcessOrder, Stage::Product, Stage::Facility],
            Stage::PlantMaterial => &[Stage::Facility, Stage::Material],
            Stage::Recipe => &[Stage::Product, Stage::Material],
            Stage::MaterialSupplier => &[Stage::Material, Stage::Supplier],
            Stage::WorkOrder => &[Stage::Batch, Stage::UnitProcedure, Stage::Asset],
            Stage::Lims => &[Stage::WorkOrder],
        }
    }
}

/// Orders the requested stages so each runs after everything it requires.
///
/// Among stages that are ready at the same time the one listed first wins, so the canonical
/// list comes back unchanged and the random draws happen in a fixed sequence.
///
/// # Errors
///
/// Returns `MissingUpstreamStage` when a stage needs one that was not requested and
/// `DuplicateStage` when a stage is listed twice.
pub fn schedule(stages: &[Stage]) -> Result<Vec<Stage>, Asset360Error> {
    let mut requested = HashSet::new();
    for stage in stages {
        if !requested.insert(*stage) {
            return Err(Asset360Error::DuplicateStage(stage.name()));
        }
    }
    for stage in stages {
        if let Some(missing) = stage.requires().iter().find(|r| !requested.contains(*r)) {
            return Err(Asset360Error::MissingUpstreamStage {
                stage: stage.name(),
                missing: missing.name(),
            });
        }
    }

    let mut ordered = Vec::with_capacity(stages.len());
    let mut done: HashSet<Stage> = HashSet::new();
    while ordered.len() < stages.len() {
        let next = stages
            .iter()
            .find(|s| !done.contains(*s) && s.requires().iter().all(|r| done.contains(r)));
        match next {
            Some(stage) => {
                done.insert(*stage);
                ordered.push(*stage);
            }
            // Requirements form a DAG over `Stage`, so every requested stage is eventually ready.
            None => break,
        }
    }
    Ok(ordered)
}
