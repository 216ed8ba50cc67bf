use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 5] = [
        WorkOrderStatus::Planned,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Cancelled,
        WorkOrderStatus::OnHold,
    ];
}

/// Execution of one unit procedure for one batch on one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// The procedure type of the executed unit procedure.
    #[serde(rename = "WOType")]
    pub wo_type: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "POID")]
    pub po_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "BatchID")]
    pub batch_id: String,
    #[serde(rename = "AssetType")]
    pub asset_type: String,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "Status")]
    pub status: WorkOrderStatus,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDateTime,
    /// Equal to the reference time for open (in progress) work orders.
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDateTime,
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    #[serde(rename = "SiteID")]
    pub site_id: String,
    #[serde(rename = "UnitProcedureID")]
    pub unit_procedure_id: String,
    #[serde(rename = "BatchQty")]
    pub batch_qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The unit procedure's task has no asset type in the catalog.
    NoAssetType,
    /// No asset of the required type sits in the batch's facility.
    NoMatchingAsset,
}

/// A unit-procedure step that could not be bound to an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedStep {
    pub batch_id: String,
    pub unit_procedure_id: String,
    pub facility_id: String,
    pub asset_type: Option<String>,
    pub reason: SkipReason,
}

/// The result of planning one unit-procedure step of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Scheduled(WorkOrder),
    Skipped(SkippedStep),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimsStatus {
    Passed,
    InProgress,
    Failed,
}

impl LimsStatus {
    pub const PASSED_THRESHOLD: u32 = 90;
    pub const IN_PROGRESS_THRESHOLD: u32 = 80;

    pub fn from_result(result: u32) -> Self {
        if result >= Self::PASSED_THRESHOLD {
            LimsStatus::Passed
        } else if result >= Self::IN_PROGRESS_THRESHOLD {
            LimsStatus::InProgress
        } else {
            LimsStatus::Failed
        }
    }
}

/// A laboratory test result attached to a LIMS work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lims {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Test")]
    pub test: String,
    #[serde(rename = "Result")]
    pub result: u32,
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "WOID")]
    pub wo_id: String,
    #[serde(rename = "Status")]
    pub status: LimsStatus,
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    #[serde(rename = "SiteID")]
    pub site_id: String,
}
