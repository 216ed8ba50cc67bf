use crate::{
    generators::{
        attributes::oee_of,
        commercial::split_quantity,
        material::{material_status, SUPPLIER_CAPACITY},
    },
    pipeline::{stage::Stage, state::Dataset},
};
use asset360_schemas::{
    execution::{LimsStatus, SkipReason},
    commercial::OrderStatus,
    NOT_APPLICABLE, UNKNOWN_FACILITY, UNKNOWN_REGION_ID, UNKNOWN_WAREHOUSE,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::{
    collections::{HashMap, HashSet},
    fmt,
};

/// Row counts and status breakdowns of a generated dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetSummary {
    pub row_counts: IndexMap<String, usize>,
    pub skipped_steps: IndexMap<SkipReason, usize>,
    pub lims_status: IndexMap<LimsStatus, usize>,
    pub process_order_status: IndexMap<OrderStatus, usize>,
}

impl DatasetSummary {
    pub fn total_rows(&self) -> usize {
        self.row_counts.values().sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_steps.values().sum()
    }
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let mut summary = DatasetSummary::default();

    for stage in Stage::ALL {
        summary
            .row_counts
            .insert(stage.name().to_string(), dataset.row_count(stage));
    }
    for step in &dataset.skipped_steps {
        *summary.skipped_steps.entry(step.reason.clone()).or_insert(0) += 1;
    }
    for record in &dataset.lims {
        *summary.lims_status.entry(record.status).or_insert(0) += 1;
    }
    for order in &dataset.process_orders {
        *summary.process_order_status.entry(order.status).or_insert(0) += 1;
    }

    summary
}

/// A broken reference or violated invariant found in a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityViolation {
    pub table: &'static str,
    pub row_id: String,
    pub detail: String,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.table, self.row_id, self.detail)
    }
}

/// Id sets of every referenced table, built once per audit.
struct Keys<'a> {
    region_names: HashSet<&'a str>,
    regions: HashSet<&'a str>,
    sites: HashSet<&'a str>,
    facilities: HashSet<&'a str>,
    lines: HashSet<&'a str>,
    oems: HashSet<&'a str>,
    unit_procedures: HashSet<&'a str>,
    assets: HashSet<&'a str>,
    products: HashSet<&'a str>,
    process_orders: HashSet<&'a str>,
    batches: HashSet<&'a str>,
    materials: HashSet<&'a str>,
    suppliers: HashSet<&'a str>,
    work_orders: HashSet<&'a str>,
}

impl<'a> Keys<'a> {
    fn new(d: &'a Dataset) -> Self {
        Self {
            region_names: d.regions.iter().map(|r| r.name.as_str()).collect(),
            regions: d.regions.iter().map(|r| r.id.as_str()).collect(),
            sites: d.sites.iter().map(|s| s.id.as_str()).collect(),
            facilities: d.facilities.iter().map(|f| f.id.as_str()).collect(),
            lines: d.lines.iter().map(|l| l.id.as_str()).collect(),
            oems: d.oems.iter().map(|o| o.id.as_str()).collect(),
            unit_procedures: d.unit_procedures.iter().map(|u| u.id.as_str()).collect(),
            assets: d.assets.iter().map(|a| a.id.as_str()).collect(),
            products: d.products.iter().map(|p| p.id.as_str()).collect(),
            process_orders: d.process_orders.iter().map(|p| p.id.as_str()).collect(),
            batches: d.batches.iter().map(|b| b.id.as_str()).collect(),
            materials: d.materials.iter().map(|m| m.id.as_str()).collect(),
            suppliers: d.suppliers.iter().map(|s| s.id.as_str()).collect(),
            work_orders: d.work_orders.iter().map(|w| w.id.as_str()).collect(),
        }
    }
}

#[derive(Default)]
struct Audit {
    violations: Vec<IntegrityViolation>,
}

impl Audit {
    fn fail(&mut self, table: &'static str, row_id: &str, detail: String) {
        self.violations.push(IntegrityViolation {
            table,
            row_id: row_id.to_string(),
            detail,
        });
    }

    /// Records a violation unless `value` is a known key or the column's sentinel.
    fn reference(
        &mut self,
        table: &'static str,
        row_id: &str,
        column: &str,
        value: &str,
        keys: &HashSet<&str>,
        sentinel: Option<&str>,
    ) {
        if keys.contains(value) || sentinel == Some(value) {
            return;
        }
        self.fail(table, row_id, format!("{} '{}' does not resolve", column, value));
    }
}

/// Audits every foreign key of the dataset together with the quantity, OEE, material-status
/// and supplier-capacity invariants. `today` is the run's reference date.
pub fn verify_integrity(d: &Dataset, today: NaiveDate) -> Vec<IntegrityViolation> {
    let k = Keys::new(d);
    let mut a = Audit::default();

    for s in &d.sites {
        a.reference("site", &s.id, "Region", &s.region, &k.region_names, None);
    }
    for f in &d.facilities {
        a.reference("facility", &f.id, "SiteID", &f.site_id, &k.sites, None);
        a.reference("facility", &f.id, "RegionID", &f.region_id, &k.regions, Some(UNKNOWN_REGION_ID));
    }
    for l in &d.lines {
        a.reference("line", &l.id, "FacilityID", &l.facility_id, &k.facilities, None);
    }
    for x in &d.assets {
        a.reference("asset", &x.id, "FacilityID", &x.facility_id, &k.facilities, None);
        a.reference("asset", &x.id, "LineID", &x.line_id, &k.lines, None);
        a.reference("asset", &x.id, "ManufacturerID", &x.manufacturer_id, &k.oems, None);
        a.reference(
            "asset",
            &x.id,
            "unitProcedureID",
            &x.unit_procedure_id,
            &k.unit_procedures,
            Some(NOT_APPLICABLE),
        );
    }

    let asset_refs = d
        .asset_info
        .iter()
        .map(|r| ("asset_info", &r.id, &r.asset_id))
        .chain(d.operations.iter().map(|r| ("asset_operation", &r.id, &r.asset_id)))
        .chain(d.oee.iter().map(|r| ("asset_oee", &r.id, &r.asset_id)))
        .chain(d.machine_attributes.iter().map(|r| ("asset_machine_attributes", &r.id, &r.asset_id)))
        .chain(d.maintenance.iter().map(|r| ("maintenance", &r.id, &r.asset_id)))
        .chain(d.calibration.iter().map(|r| ("calibration", &r.id, &r.asset_id)))
        .chain(d.compliance.iter().map(|r| ("compliance", &r.id, &r.asset_id)));
    for (table, id, asset_id) in asset_refs {
        a.reference(table, id, "AssetID", asset_id, &k.assets, None);
    }

    let operations: HashMap<&str, _> = d.operations.iter().map(|o| (o.asset_id.as_str(), o)).collect();
    for row in &d.oee {
        if let Some(op) = operations.get(row.asset_id.as_str()) {
            let expected = oee_of(op);
            if (row.oee - expected).abs() > 1e-9 {
                a.fail("asset_oee", &row.id, format!("OEE {} differs from computed {}", row.oee, expected));
            }
        }
    }

    for p in &d.products {
        a.reference("product", &p.id, "SiteID", &p.site_id, &k.sites, None);
    }
    for po in &d.process_orders {
        a.reference("process_order", &po.id, "ProductID", &po.product_id, &k.products, None);
    }
    for b in &d.batches {
        a.reference("batch", &b.id, "POID", &b.po_id, &k.process_orders, None);
        a.reference("batch", &b.id, "ProductID", &b.product_id, &k.products, None);
        a.reference("batch", &b.id, "SiteID", &b.site_id, &k.sites, None);
        a.reference("batch", &b.id, "FacilityID", &b.facility_id, &k.facilities, Some(UNKNOWN_FACILITY));
        a.reference(
            "batch",
            &b.id,
            "WarehouseFacilityID",
            &b.warehouse_facility_id,
            &k.facilities,
            Some(UNKNOWN_WAREHOUSE),
        );
    }

    let limits: HashMap<&str, u32> = d
        .products
        .iter()
        .map(|p| (p.id.as_str(), p.batch_size_limit))
        .collect();
    let mut batches_by_po: HashMap<&str, (u32, usize)> = HashMap::new();
    for b in &d.batches {
        let entry = batches_by_po.entry(b.po_id.as_str()).or_insert((0, 0));
        entry.0 += b.qty;
        entry.1 += 1;
    }
    for po in &d.process_orders {
        let (sum, count) = batches_by_po.get(po.id.as_str()).copied().unwrap_or((0, 0));
        if sum != po.qty {
            a.fail("process_order", &po.id, format!("batch quantities sum to {} instead of {}", sum, po.qty));
        }
        if let Some(limit) = limits.get(po.product_id.as_str()) {
            let expected = split_quantity(po.qty, *limit).len();
            if count != expected {
                a.fail("process_order", &po.id, format!("{} batches instead of {}", count, expected));
            }
        }
    }

    for m in &d.materials {
        if m.status != material_status(m.expiry_date, today) {
            a.fail("material", &m.id, format!("status {:?} contradicts expiry {}", m.status, m.expiry_date));
        }
    }
    for pm in &d.plant_materials {
        a.reference("plant_material", &pm.id, "FacilityID", &pm.facility_id, &k.facilities, None);
        a.reference("plant_material", &pm.id, "MaterialID", &pm.material_id, &k.materials, None);
    }
    for r in &d.recipes {
        a.reference("recipe", &r.id, "MaterialID", &r.material_id, &k.materials, None);
    }

    let mut load: IndexMap<&str, usize> = IndexMap::new();
    for link in &d.material_suppliers {
        a.reference("material_supplier_map", &link.material_id, "MaterialID", &link.material_id, &k.materials, None);
        a.reference("material_supplier_map", &link.material_id, "SupplierID", &link.supplier_id, &k.suppliers, None);
        *load.entry(link.supplier_id.as_str()).or_insert(0) += 1;
    }
    for (supplier, count) in load {
        if count > SUPPLIER_CAPACITY {
            a.fail("supplier", supplier, format!("serves {} materials", count));
        }
    }

    for w in &d.work_orders {
        a.reference("work_order", &w.id, "POID", &w.po_id, &k.process_orders, None);
        a.reference("work_order", &w.id, "ProductID", &w.product_id, &k.products, None);
        a.reference("work_order", &w.id, "BatchID", &w.batch_id, &k.batches, None);
        a.reference("work_order", &w.id, "AssetID", &w.asset_id, &k.assets, None);
        a.reference("work_order", &w.id, "FacilityID", &w.facility_id, &k.facilities, None);
        a.reference("work_order", &w.id, "SiteID", &w.site_id, &k.sites, None);
        a.reference("work_order", &w.id, "UnitProcedureID", &w.unit_procedure_id, &k.unit_procedures, None);
    }
    for l in &d.lims {
        a.reference("lims", &l.id, "AssetID", &l.asset_id, &k.assets, None);
        a.reference("lims", &l.id, "WOID", &l.wo_id, &k.work_orders, None);
        a.reference("lims", &l.id, "FacilityID", &l.facility_id, &k.facilities, None);
        a.reference("lims", &l.id, "SiteID", &l.site_id, &k.sites, None);
    }

    a.violations
}
