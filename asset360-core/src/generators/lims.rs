use super::work_order::LIMS_PROCEDURE_TYPE;
use crate::context::GenerationContext;
use asset360_schemas::execution::{Lims, LimsStatus, WorkOrder};
use rand::{seq::SliceRandom, Rng};

const PASSED_SHARE: f64 = 0.90;
const IN_PROGRESS_SHARE: f64 = 0.07;

/// How many of `n` results fall in each status band: floor shares for passed and in
/// progress, the remainder failed.
pub fn lims_split(n: usize) -> (usize, usize, usize) {
    let passed = (n as f64 * PASSED_SHARE) as usize;
    let in_progress = (n as f64 * IN_PROGRESS_SHARE) as usize;
    (passed, in_progress, n - passed - in_progress)
}

/// One test result per LIMS work order, drawn from a fixed-proportion mixture and shuffled.
pub fn generate_lims(ctx: &mut GenerationContext, work_orders: &[WorkOrder]) -> Vec<Lims> {
    let lims_orders: Vec<&WorkOrder> = work_orders
        .iter()
        .filter(|wo| wo.wo_type == LIMS_PROCEDURE_TYPE)
        .collect();
    let (passed, in_progress, failed) = lims_split(lims_orders.len());

    let mut results: Vec<u32> = Vec::with_capacity(lims_orders.len());
    results.extend((0..passed).map(|_| ctx.rng.gen_range(LimsStatus::PASSED_THRESHOLD + 1..=100)));
    results.extend(
        (0..in_progress).map(|_| {
            ctx.rng
                .gen_range(LimsStatus::IN_PROGRESS_THRESHOLD + 1..LimsStatus::PASSED_THRESHOLD)
        }),
    );
    results.extend((0..failed).map(|_| ctx.rng.gen_range(60..LimsStatus::IN_PROGRESS_THRESHOLD)));
    results.shuffle(&mut ctx.rng);

    lims_orders
        .into_iter()
        .zip(results)
        .enumerate()
        .map(|(i, (wo, result))| Lims {
            id: format!("LIMS-{}", i + 1),
            name: format!("LIMS-{}-{}", wo.asset_id, wo.id),
            test: wo.task.clone(),
            result,
            asset_id: wo.asset_id.clone(),
            wo_id: wo.id.clone(),
            status: LimsStatus::from_result(result),
            facility_id: wo.facility_id.clone(),
            site_id: wo.site_id.clone(),
        })
        .collect()
}
