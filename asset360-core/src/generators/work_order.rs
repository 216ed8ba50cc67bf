use crate::{context::GenerationContext, error::Asset360Error};
use asset360_schemas::{
    asset::Asset,
    catalog::UnitProcedure,
    commercial::Batch,
    execution::{SkipReason, SkippedStep, StepOutcome, WorkOrder, WorkOrderStatus},
};
use chrono::Duration;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Unit procedures sampled per batch, by procedure type, in execution order.
pub const WORK_ORDER_PLAN: [(&str, usize); 5] = [
    ("Production-stage1", 3),
    ("Production-stage2", 2),
    ("Cleaning", 1),
    ("QMS", 1),
    ("LIMS", 3),
];

pub const LIMS_PROCEDURE_TYPE: &str = "LIMS";

/// Lookup from (facility, asset type) to the first asset of that type in the facility.
struct AssetIndex<'a> {
    first_match: HashMap<(&'a str, &'a str), &'a Asset>,
}

impl<'a> AssetIndex<'a> {
    fn new(assets: &'a [Asset]) -> Self {
        let mut first_match = HashMap::new();
        for asset in assets {
            first_match
                .entry((asset.facility_id.as_str(), asset.asset_type.as_str()))
                .or_insert(asset);
        }
        Self { first_match }
    }

    fn find(&self, facility_id: &str, asset_type: &str) -> Option<&'a Asset> {
        self.first_match.get(&(facility_id, asset_type)).copied()
    }
}

fn procedures_by_type(unit_procedures: &[UnitProcedure]) -> IndexMap<&str, Vec<&UnitProcedure>> {
    let mut grouped: IndexMap<&str, Vec<&UnitProcedure>> = IndexMap::new();
    for procedure in unit_procedures {
        grouped
            .entry(procedure.procedure_type.as_str())
            .or_default()
            .push(procedure);
    }
    grouped
}

/// Samples `count` distinct procedures of one type.
fn sample_procedures<'a>(
    ctx: &mut GenerationContext,
    grouped: &IndexMap<&str, Vec<&'a UnitProcedure>>,
    procedure_type: &str,
    count: usize,
) -> Result<Vec<&'a UnitProcedure>, Asset360Error> {
    let candidates = grouped.get(procedure_type).map(Vec::as_slice).unwrap_or(&[]);
    if candidates.len() < count {
        return Err(Asset360Error::InsufficientCatalogEntries {
            procedure_type: procedure_type.to_string(),
            requested: count,
            available: candidates.len(),
        });
    }
    Ok(candidates.choose_multiple(&mut ctx.rng, count).copied().collect())
}

fn schedule_step(
    ctx: &mut GenerationContext,
    batch: &Batch,
    procedure: &UnitProcedure,
    assets: &AssetIndex<'_>,
) -> StepOutcome {
    let skipped = |reason| {
        StepOutcome::Skipped(SkippedStep {
            batch_id: batch.id.clone(),
            unit_procedure_id: procedure.id.clone(),
            facility_id: batch.facility_id.clone(),
            asset_type: procedure.asset_type.clone(),
            reason,
        })
    };

    let Some(asset_type) = procedure.asset_type.as_deref() else {
        return skipped(SkipReason::NoAssetType);
    };
    let Some(asset) = assets.find(&batch.facility_id, asset_type) else {
        return skipped(SkipReason::NoMatchingAsset);
    };

    let status = *WorkOrderStatus::ALL
        .choose(&mut ctx.rng)
        .unwrap_or(&WorkOrderStatus::Planned);
    let start_date = batch.start_date + Duration::days(1);
    let end_date = if status == WorkOrderStatus::InProgress {
        ctx.now()
    } else {
        start_date
    };

    StepOutcome::Scheduled(WorkOrder {
        id: format!("WO-{}-{}", batch.id, procedure.id),
        name: format!(
            "{}-{}-{}-{}",
            batch.id, procedure.procedure_type, batch.product_id, batch.facility_id
        ),
        wo_type: procedure.procedure_type.clone(),
        task: procedure.task.clone(),
        po_id: batch.po_id.clone(),
        product_id: batch.product_id.clone(),
        batch_id: batch.id.clone(),
        asset_type: asset.asset_type.clone(),
        asset_id: asset.id.clone(),
        status,
        start_date,
        end_date,
        facility_id: batch.facility_id.clone(),
        site_id: batch.site_id.clone(),
        unit_procedure_id: procedure.id.clone(),
        batch_qty: batch.qty,
    })
}

/// Plans the unit-procedure steps of every batch, binding each to the first asset of the
/// required type in the batch's facility.
///
/// Steps that cannot be bound are returned as [`StepOutcome::Skipped`] rather than dropped.
///
/// # Errors
///
/// Returns `InsufficientCatalogEntries` when a procedure type has fewer unit procedures than
/// the plan samples.
pub fn plan_work_orders(
    ctx: &mut GenerationContext,
    batches: &[Batch],
    unit_procedures: &[UnitProcedure],
    assets: &[Asset],
) -> Result<Vec<StepOutcome>, Asset360Error> {
    let grouped = procedures_by_type(unit_procedures);
    let index = AssetIndex::new(assets);
    let mut outcomes = Vec::new();

    for batch in batches {
        let mut steps = Vec::new();
        for (procedure_type, count) in WORK_ORDER_PLAN {
            steps.extend(sample_procedures(ctx, &grouped, procedure_type, count)?);
        }
        for procedure in steps {
            outcomes.push(schedule_step(ctx, batch, procedure, &index));
        }
    }

    Ok(outcomes)
}

/// Splits planned outcomes into emitted work orders and skipped steps, preserving order.
pub fn partition_outcomes(outcomes: Vec<StepOutcome>) -> (Vec<WorkOrder>, Vec<SkippedStep>) {
    let mut work_orders = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            StepOutcome::Scheduled(work_order) => work_orders.push(work_order),
            StepOutcome::Skipped(step) => skipped.push(step),
        }
    }
    (work_orders, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::ctx;
    use asset360_schemas::commercial::OrderStatus;

    fn procedure(procedure_type: &str, n: usize, asset_type: Option<&str>) -> UnitProcedure {
        UnitProcedure {
            id: format!("{}-{}", procedure_type, n),
            name: format!("{}-{}-Task{}", procedure_type, n, n),
            procedure_type: procedure_type.into(),
            task: format!("Task{}", n),
            asset_type: asset_type.map(String::from),
        }
    }

    fn catalog() -> Vec<UnitProcedure> {
        let mut procedures = Vec::new();
        for n in 1..=3 {
            procedures.push(procedure("Production-stage1", n, Some("Mixer")));
        }
        for n in 1..=2 {
            procedures.push(procedure("Production-stage2", n, Some("Tablet Press")));
        }
        procedures.push(procedure("Cleaning", 1, Some("CIP Skid")));
        procedures.push(procedure("QMS", 1, None));
        for n in 1..=3 {
            procedures.push(procedure("LIMS", n, Some("HPLC")));
        }
        procedures
    }

    fn asset(id: &str, asset_type: &str, facility_id: &str) -> Asset {
        Asset {
            id: id.into(),
            name: format!("{}:{}", id, asset_type),
            asset_type: asset_type.into(),
            facility_id: facility_id.into(),
            line_id: "L1".into(),
            line_floor: 1,
            manufacturer_id: "MFR1".into(),
            unit_procedure_id: "NA".into(),
        }
    }

    fn batch(facility_id: &str) -> Batch {
        let start = crate::generators::test_support::reference_time();
        Batch {
            id: "BPO1-1-1".into(),
            name: "Batch-BPO1-1-1-P1001-50".into(),
            po_id: "PO1".into(),
            product_id: "P1001".into(),
            site_id: "S1".into(),
            facility_id: facility_id.into(),
            warehouse_facility_id: "F-2-S1".into(),
            qty: 50,
            status: OrderStatus::Completed,
            start_date: start,
            end_date: start + Duration::days(1),
        }
    }

    #[test]
    fn test_steps_bind_first_matching_asset_and_skip_the_rest() {
        let mut ctx = ctx(29);
        let assets = vec![
            asset("A1", "Mixer", "F-1-S1"),
            asset("A2", "Mixer", "F-1-S1"),
            asset("A3", "HPLC", "F-1-S1"),
            asset("A4", "Tablet Press", "F-1-S2"),
        ];
        let outcomes = plan_work_orders(&mut ctx, &[batch("F-1-S1")], &catalog(), &assets).unwrap();
        assert_eq!(outcomes.len(), 10);

        let (work_orders, skipped) = partition_outcomes(outcomes);
        assert_eq!(work_orders.len(), 6);
        assert_eq!(skipped.len(), 4);
        assert!(work_orders
            .iter()
            .filter(|wo| wo.wo_type == "Production-stage1")
            .all(|wo| wo.asset_id == "A1"));
        assert!(work_orders
            .iter()
            .filter(|wo| wo.wo_type == LIMS_PROCEDURE_TYPE)
            .all(|wo| wo.asset_id == "A3"));
        assert_eq!(
            skipped.iter().filter(|s| s.reason == SkipReason::NoAssetType).count(),
            1
        );
        assert_eq!(
            skipped.iter().filter(|s| s.reason == SkipReason::NoMatchingAsset).count(),
            3
        );

        let ids: std::collections::HashSet<&str> =
            work_orders.iter().map(|wo| wo.id.as_str()).collect();
        assert_eq!(ids.len(), work_orders.len());
    }

    #[test]
    fn test_work_order_dates() {
        let mut ctx = ctx(37);
        let assets = vec![asset("A1", "Mixer", "F-1-S1")];
        let batches: Vec<Batch> = (0..20).map(|_| batch("F-1-S1")).collect();
        let outcomes = plan_work_orders(&mut ctx, &batches, &catalog(), &assets).unwrap();
        let (work_orders, _) = partition_outcomes(outcomes);

        assert_eq!(work_orders.len(), 60);
        for wo in &work_orders {
            assert_eq!(wo.start_date, batches[0].start_date + Duration::days(1));
            if wo.status == WorkOrderStatus::InProgress {
                assert_eq!(wo.end_date, ctx.now());
            } else {
                assert_eq!(wo.end_date, wo.start_date);
            }
            assert_eq!(wo.batch_qty, 50);
        }
    }

    #[test]
    fn test_short_catalog_is_rejected() {
        let mut ctx = ctx(1);
        let mut procedures = catalog();
        procedures.retain(|p| !(p.procedure_type == "LIMS" && p.id.ends_with('3')));
        let err = plan_work_orders(&mut ctx, &[batch("F-1-S1")], &procedures, &[]).unwrap_err();
        assert!(matches!(
            err,
            Asset360Error::InsufficientCatalogEntries { requested: 3, available: 2, .. }
        ));
    }
}
