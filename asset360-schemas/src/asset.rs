use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One physical piece of equipment installed on a production line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Monotonic identifier, `A1`, `A2`, ...
    pub id: String,
    /// `"{id}:{asset_type}"`, used as the graph node caption.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "AType")]
    pub asset_type: String,
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    #[serde(rename = "LineID")]
    pub line_id: String,
    #[serde(rename = "LineFloor")]
    pub line_floor: u32,
    #[serde(rename = "ManufacturerID")]
    pub manufacturer_id: String,
    /// Unit procedure performed on this asset type, or `NA`.
    #[serde(rename = "unitProcedureID")]
    pub unit_procedure_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

/// Contractual information for an asset: warranty, annual maintenance contract, insurance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "AMCYears")]
    pub amc_years: u32,
    #[serde(rename = "WarrantyYears")]
    pub warranty_years: u32,
    #[serde(rename = "HasInsurance")]
    pub has_insurance: YesNo,
    #[serde(rename = "CommissionDate")]
    pub commission_date: NaiveDate,
}

/// Production counters for an asset. Percentages are stored rounded to two decimals and the
/// OEE table is computed from these rounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetOperation {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "TotalProductionQuantity")]
    pub total_production_qty: u32,
    #[serde(rename = "GoodQuantity")]
    pub good_qty: f64,
    #[serde(rename = "Downtime")]
    pub downtime: f64,
    #[serde(rename = "Performance")]
    pub performance: f64,
    #[serde(rename = "Availability")]
    pub availability: f64,
    #[serde(rename = "Quality")]
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetOee {
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "OEE")]
    pub oee: f64,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineAttributes {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Vibration")]
    pub vibration: f64,
    #[serde(rename = "Noise")]
    pub noise: f64,
    #[serde(rename = "Pressure")]
    pub pressure: f64,
    #[serde(rename = "Throughput")]
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "MaintenanceSchedule")]
    pub schedule: String,
    #[serde(rename = "LastMaintenanceDate")]
    pub last_date: NaiveDate,
    #[serde(rename = "NextMaintenanceDate")]
    pub next_date: NaiveDate,
    #[serde(rename = "MaintenancePerformedBy")]
    pub performed_by: String,
    #[serde(rename = "MaintenanceRecords")]
    pub records: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "CalibrationSchedule")]
    pub schedule: String,
    #[serde(rename = "LastCalibrationDate")]
    pub last_date: NaiveDate,
    #[serde(rename = "NextCalibrationDate")]
    pub next_date: NaiveDate,
    #[serde(rename = "CalibrationPerformedBy")]
    pub performed_by: String,
    #[serde(rename = "CalibrationRecords")]
    pub records: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    pub id: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "ComplianceStatus")]
    pub status: ComplianceStatus,
    #[serde(rename = "RegulatoryReferences")]
    pub regulatory_references: String,
    #[serde(rename = "Documentation")]
    pub documentation: String,
}
