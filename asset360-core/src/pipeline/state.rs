use super::stage::Stage;
use asset360_schemas::{
    asset::{
        Asset, AssetInfo, AssetOee, AssetOperation, Calibration, Compliance, MachineAttributes,
        Maintenance,
    },
    catalog::{Oem, UnitProcedure},
    commercial::{Batch, ProcessOrder, Product},
    execution::{Lims, SkippedStep, WorkOrder},
    material::{Material, MaterialSupplierLink, PlantMaterial, RecipeLine, Supplier},
    topology::{Facility, Line, Region, Site},
};

/// Every table produced by a generation run. Tables of stages that did not run stay empty.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub regions: Vec<Region>,
    pub sites: Vec<Site>,
    pub facilities: Vec<Facility>,
    pub lines: Vec<Line>,
    pub oems: Vec<Oem>,
    pub unit_procedures: Vec<UnitProcedure>,
    pub assets: Vec<Asset>,
    pub asset_info: Vec<AssetInfo>,
    pub operations: Vec<AssetOperation>,
    pub oee: Vec<AssetOee>,
    pub machine_attributes: Vec<MachineAttributes>,
    pub maintenance: Vec<Maintenance>,
    pub calibration: Vec<Calibration>,
    pub compliance: Vec<Compliance>,
    pub products: Vec<Product>,
    pub process_orders: Vec<ProcessOrder>,
    pub batches: Vec<Batch>,
    pub materials: Vec<Material>,
    pub plant_materials: Vec<PlantMaterial>,
    pub recipes: Vec<RecipeLine>,
    pub suppliers: Vec<Supplier>,
    pub material_suppliers: Vec<MaterialSupplierLink>,
    pub work_orders: Vec<WorkOrder>,
    /// Work-order steps with no asset to run on. Not written as a table.
    pub skipped_steps: Vec<SkippedStep>,
    pub lims: Vec<Lims>,
}

impl Dataset {
    /// Number of rows in the table a stage produces.
    pub fn row_count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Region => self.regions.len(),
            Stage::Site => self.sites.len(),
            Stage::Facility => self.facilities.len(),
            Stage::Line => self.lines.len(),
            Stage::Oem => self.oems.len(),
            Stage::UnitProcedure => self.unit_procedures.len(),
            Stage::Asset => self.assets.len(),
            Stage::AssetInfo => self.asset_info.len(),
            Stage::Operation => self.operations.len(),
            Stage::Oee => self.oee.len(),
            Stage::MachineAttributes => self.machine_attributes.len(),
            Stage::Maintenance => self.maintenance.len(),
            Stage::Calibration => self.calibration.len(),
            Stage::Compliance => self.compliance.len(),
            Stage::Product => self.products.len(),
            Stage::ProcessOrder => self.process_orders.len(),
            Stage::Batch => self.batches.len(),
            Stage::Material => self.materials.len(),
            Stage::PlantMaterial => self.plant_materials.len(),
            Stage::Recipe => self.recipes.len(),
            Stage::Supplier => self.suppliers.len(),
            Stage::MaterialSupplier => self.material_suppliers.len(),
            Stage::WorkOrder => self.work_orders.len(),
            Stage::Lims => self.lims.len(),
        }
    }
}
