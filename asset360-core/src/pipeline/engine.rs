use super::{stage::Stage, state::Dataset};
use crate::{
    context::GenerationContext,
    error::Asset360Error,
    generators::{asset, attributes, catalog, commercial, lims, material, topology, work_order},
};
use asset360_schemas::config::GeneratorConfig;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

pub struct PipelineEngine {
    pub(super) ctx: GenerationContext,
    pub(super) config: GeneratorConfig,
    pub(super) schedule: Vec<Stage>,
    pub(super) dataset: Dataset,
}

impl PipelineEngine {
    /// Runs every scheduled stage in order. The first failing stage aborts the run.
    pub fn run(&mut self) -> Result<(), Asset360Error> {
        info!(
            stages = self.schedule.len(),
            seed = ?self.ctx.seed(),
            reference_time = %self.ctx.now(),
            "Starting generation"
        );

        for stage in self.schedule.clone() {
            self.run_stage(stage)?;
            info!(stage = stage.name(), rows = self.dataset.row_count(stage), "Stage complete");
        }

        info!("Generation complete.");
        Ok(())
    }

    fn run_stage(&mut self, stage: Stage) -> Result<(), Asset360Error> {
        let ctx = &mut self.ctx;
        let config = &self.config;
        let data = &mut self.dataset;

        match stage {
            Stage::Region => data.regions = topology::generate_regions(&config.location_list),
            Stage::Site => {
                data.sites = topology::generate_sites(&config.location_list, &config.country_codes)
            }
            Stage::Facility => {
                data.facilities = topology::generate_facilities(ctx, &data.sites, &data.regions)
            }
            Stage::Line => {
                data.lines = topology::generate_lines(ctx, &data.facilities, &config.facility_types)
            }
            Stage::Oem => data.oems = catalog::generate_oems(&config.pharma_asset_suppliers),
            Stage::UnitProcedure => {
                data.unit_procedures = catalog::generate_unit_procedures(
                    &config.unit_procedure_types,
                    &config.procedure_asset_types,
                )
            }
            Stage::Asset => {
                data.assets = asset::generate_assets(
                    ctx,
                    &data.lines,
                    &data.oems,
                    &data.unit_procedures,
                    config,
                )?
            }
            Stage::AssetInfo => data.asset_info = attributes::generate_asset_info(ctx, &data.assets),
            Stage::Operation => {
                data.operations = attributes::generate_asset_operations(
                    ctx,
                    &data.assets,
                    config.good_qty_sampling,
                )
            }
            Stage::Oee => data.oee = attributes::generate_oee(&data.operations),
            Stage::MachineAttributes => {
                data.machine_attributes =
                    attributes::generate_machine_attributes(ctx, &data.assets, &data.oee)
            }
            Stage::Maintenance => {
                data.maintenance = attributes::generate_maintenance(ctx, &data.assets, &data.oee)
            }
            Stage::Calibration => data.calibration = attributes::generate_calibration(ctx, &data.assets),
            Stage::Compliance => data.compliance = attributes::generate_compliance(ctx, &data.assets),
            Stage::Product => {
                data.products = commercial::generate_products(
                    ctx,
                    &config.product_list,
                    config.num_products,
                    &data.sites,
                )?
            }
            Stage::ProcessOrder => {
                data.process_orders =
                    commercial::generate_process_orders(ctx, &data.products, config.num_boms)?
            }
            Stage::Batch => {
                data.batches = commercial::generate_batches(
                    ctx,
                    &data.process_orders,
                    &data.products,
                    &data.facilities,
                )?
            }
            Stage::Material => {
                data.materials =
                    material::generate_materials(ctx, config.num_products, &config.storage_locations)?
            }
            Stage::PlantMaterial => {
                data.plant_materials =
                    material::generate_plant_materials(ctx, &data.facilities, &data.materials)
            }
            Stage::Recipe => {
                data.recipes = material::generate_recipes(ctx, &data.products, &data.materials)?
            }
            Stage::Supplier => data.suppliers = material::generate_suppliers(config.num_products),
            Stage::MaterialSupplier => {
                data.material_suppliers = material::assign_materials_to_suppliers(
                    ctx,
                    &data.materials,
                    &data.suppliers,
                )?
            }
            Stage::WorkOrder => {
                let outcomes = work_order::plan_work_orders(
                    ctx,
                    &data.batches,
                    &data.unit_procedures,
                    &data.assets,
                )?;
                let (work_orders, skipped) = work_order::partition_outcomes(outcomes);
                if !skipped.is_empty() {
                    warn!(
                        skipped = skipped.len(),
                        scheduled = work_orders.len(),
                        "Work-order steps without a matching asset were skipped"
                    );
                }
                for step in &skipped {
                    debug!(
                        batch = %step.batch_id,
                        unit_procedure = %step.unit_procedure_id,
                        reason = ?step.reason,
                        "Skipped step"
                    );
                }
                data.work_orders = work_orders;
                data.skipped_steps = skipped;
            }
            Stage::Lims => data.lims = lims::generate_lims(ctx, &data.work_orders),
        }
        Ok(())
    }

    pub fn get_dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.ctx.seed()
    }

    pub fn get_reference_time(&self) -> NaiveDateTime {
        self.ctx.now()
    }

    pub fn get_schedule(&self) -> &[Stage] {
        &self.schedule
    }
}
