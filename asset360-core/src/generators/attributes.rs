//! Per-asset attribute tables: contracts, operation counters, OEE, sensor readings and the
//! maintenance, calibration and compliance histories.

use super::{padded_id, round2};
use crate::context::GenerationContext;
use asset360_schemas::{
    asset::{
        Asset, AssetInfo, AssetOee, AssetOperation, Calibration, Compliance, ComplianceStatus,
        MachineAttributes, Maintenance, YesNo,
    },
    config::GoodQtySampling,
};
use chrono::{Duration, Months, NaiveDate};
use rand::{seq::SliceRandom, Rng};
use std::collections::HashMap;

const MAINTENANCE_CREW: [&str; 3] = ["John", "Jane Smith", "Tony"];
const CALIBRATION_CREW: [&str; 3] = ["Smith", "Jackie", "Snow"];
const COMPLIANT_PROBABILITY: f64 = 0.7;
/// Assets below this OEE get the larger maintenance history.
const MAINTENANCE_OEE_THRESHOLD: f64 = 70.0;

pub fn generate_asset_info(ctx: &mut GenerationContext, assets: &[Asset]) -> Vec<AssetInfo> {
    let today = ctx.today();
    // Five candidate commissioning dates, one per year bucket going back five years.
    let commission_dates: Vec<NaiveDate> = (1..=5i64)
        .map(|i| today - Duration::days(ctx.rng.gen_range(365 * (i - 1)..365 * i)))
        .collect();

    assets
        .iter()
        .enumerate()
        .map(|(i, asset)| AssetInfo {
            id: padded_id("AI", i + 1),
            asset_id: asset.id.clone(),
            amc_years: ctx.rng.gen_range(1..5),
            warranty_years: ctx.rng.gen_range(1..5),
            has_insurance: if ctx.rng.gen_bool(0.5) { YesNo::Yes } else { YesNo::No },
            commission_date: *commission_dates.choose(&mut ctx.rng).unwrap_or(&today),
        })
        .collect()
}

pub fn generate_asset_operations(
    ctx: &mut GenerationContext,
    assets: &[Asset],
    sampling: GoodQtySampling,
) -> Vec<AssetOperation> {
    let shared_fraction = ctx.rng.gen_range(0.8..0.9);

    assets
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let total = ctx.rng.gen_range(500..1000u32);
            let downtime: f64 = ctx.rng.gen_range(10.0..20.0);
            let performance: f64 = ctx.rng.gen_range(85.0..100.0);
            let fraction = match sampling {
                GoodQtySampling::Shared => shared_fraction,
                GoodQtySampling::PerAsset => ctx.rng.gen_range(0.8..0.9),
            };
            let good_qty = f64::from(total) * fraction;

            AssetOperation {
                id: padded_id("AO", i + 1),
                asset_id: asset.id.clone(),
                total_production_qty: total,
                good_qty,
                downtime: round2(downtime),
                performance: round2(performance),
                availability: round2(100.0 - downtime),
                quality: round2(good_qty / f64::from(total) * 100.0),
            }
        })
        .collect()
}

/// Overall equipment effectiveness of one operation row, in percent.
pub fn oee_of(operation: &AssetOperation) -> f64 {
    round2(
        operation.availability / 100.0 * operation.performance / 100.0 * operation.quality / 100.0
            * 100.0,
    )
}

pub fn generate_oee(operations: &[AssetOperation]) -> Vec<AssetOee> {
    operations
        .iter()
        .enumerate()
        .map(|(i, operation)| AssetOee {
            asset_id: operation.asset_id.clone(),
            oee: oee_of(operation),
            id: padded_id("OEE", i + 1),
        })
        .collect()
}

/// Health band of an asset, selecting the sensor ranges its readings are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OeeBand {
    Healthy,
    Degraded,
    Failing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRanges {
    pub temperature: (f64, f64),
    pub pressure: (f64, f64),
    pub vibration: (f64, f64),
    pub noise: (f64, f64),
    pub throughput: (f64, f64),
}

impl OeeBand {
    /// Exactly 70 and exactly 50 both land in `Failing`.
    pub fn from_oee(oee: f64) -> Self {
        if oee > 70.0 {
            OeeBand::Healthy
        } else if oee > 50.0 && oee < 70.0 {
            OeeBand::Degraded
        } else {
            OeeBand::Failing
        }
    }

    pub fn ranges(&self) -> SensorRanges {
        match self {
            OeeBand::Healthy => SensorRanges {
                temperature: (20.0, 25.0),
                pressure: (0.8, 0.9),
                vibration: (5.0, 10.0),
                noise: (40.0, 50.0),
                throughput: (95.0, 100.0),
            },
            OeeBand::Degraded => SensorRanges {
                temperature: (18.0, 28.0),
                pressure: (0.7, 0.8),
                vibration: (10.0, 20.0),
                noise: (50.0, 60.0),
                throughput: (70.0, 90.0),
            },
            OeeBand::Failing => SensorRanges {
                temperature: (10.0, 20.0),
                pressure: (0.6, 0.7),
                vibration: (20.0, 30.0),
                noise: (60.0, 70.0),
                throughput: (60.0, 80.0),
            },
        }
    }
}

fn oee_lookup(oee: &[AssetOee]) -> HashMap<&str, f64> {
    let mut lookup = HashMap::new();
    for row in oee {
        lookup.entry(row.asset_id.as_str()).or_insert(row.oee);
    }
    lookup
}

fn sample(ctx: &mut GenerationContext, (low, high): (f64, f64)) -> f64 {
    round2(ctx.rng.gen_range(low..high))
}

pub fn generate_machine_attributes(
    ctx: &mut GenerationContext,
    assets: &[Asset],
    oee: &[AssetOee],
) -> Vec<MachineAttributes> {
    let oee_by_asset = oee_lookup(oee);

    assets
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let band = oee_by_asset
                .get(asset.id.as_str())
                .map_or(OeeBand::Healthy, |value| OeeBand::from_oee(*value));
            let ranges = band.ranges();
            MachineAttributes {
                id: padded_id("AM", i + 1),
                asset_id: asset.id.clone(),
                temperature: sample(ctx, ranges.temperature),
                pressure: sample(ctx, ranges.pressure),
                vibration: sample(ctx, ranges.vibration),
                noise: sample(ctx, ranges.noise),
                throughput: sample(ctx, ranges.throughput),
            }
        })
        .collect()
}

fn date_in_trailing_year(ctx: &mut GenerationContext) -> NaiveDate {
    ctx.today() - Duration::days(ctx.rng.gen_range(0..=365))
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Poorly performing assets accumulate more repair records.
pub fn generate_maintenance(
    ctx: &mut GenerationContext,
    assets: &[Asset],
    oee: &[AssetOee],
) -> Vec<Maintenance> {
    let oee_by_asset = oee_lookup(oee);
    let mut records = Vec::new();

    for asset in assets {
        let count = match oee_by_asset.get(asset.id.as_str()) {
            Some(value) if *value < MAINTENANCE_OEE_THRESHOLD => ctx.rng.gen_range(6.0..10.0_f64) as usize,
            Some(_) => ctx.rng.gen_range(1.0..5.0_f64) as usize,
            None => 1,
        };

        for _ in 0..count {
            let last_date = date_in_trailing_year(ctx);
            records.push(Maintenance {
                id: format!("MR{}", records.len() + 1),
                asset_id: asset.id.clone(),
                schedule: "On REPAIR".to_string(),
                last_date,
                next_date: add_months(last_date, 1),
                performed_by: MAINTENANCE_CREW
                    .choose(&mut ctx.rng)
                    .unwrap_or(&MAINTENANCE_CREW[0])
                    .to_string(),
                records: "Replaced filter and checked lubrication".to_string(),
            });
        }
    }

    records
}

/// One calibration per asset in the table, each landing on a random asset. Some assets get
/// several records and some none.
pub fn generate_calibration(ctx: &mut GenerationContext, assets: &[Asset]) -> Vec<Calibration> {
    let mut records = Vec::with_capacity(assets.len());

    for i in 0..assets.len() {
        let Some(asset) = assets.choose(&mut ctx.rng) else {
            break;
        };
        let last_date = date_in_trailing_year(ctx);
        records.push(Calibration {
            id: format!("CR{}", i + 1),
            asset_id: asset.id.clone(),
            schedule: "Quarterly".to_string(),
            last_date,
            next_date: add_months(last_date, 2),
            performed_by: CALIBRATION_CREW
                .choose(&mut ctx.rng)
                .unwrap_or(&CALIBRATION_CREW[0])
                .to_string(),
            records: "Calibration records details...".to_string(),
        });
    }

    records
}

pub fn generate_compliance(ctx: &mut GenerationContext, assets: &[Asset]) -> Vec<Compliance> {
    assets
        .iter()
        .map(|asset| Compliance {
            id: format!("ComplianceRecord_{}", asset.id),
            asset_id: asset.id.clone(),
            status: if ctx.rng.gen_bool(COMPLIANT_PROBABILITY) {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::NonCompliant
            },
            regulatory_references: "Regulatory references details...".to_string(),
            documentation: "Documentation details...".to_string(),
        })
        .collect()
}
