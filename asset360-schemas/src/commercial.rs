use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SiteID")]
    pub site_id: String,
    /// Largest quantity a single batch of this product may carry.
    #[serde(rename = "BatchSizeLimit")]
    pub batch_size_limit: u32,
    #[serde(rename = "FamilyID")]
    pub family_id: String,
    #[serde(rename = "RecipeID")]
    pub recipe_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Failed,
    #[serde(rename = "On Hold")]
    OnHold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOrder {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "BOMID")]
    pub bom_id: String,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDateTime,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDateTime,
}

/// A slice of a process order, no larger than the product's batch size limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "POID")]
    pub po_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "SiteID")]
    pub site_id: String,
    /// Manufacturing facility, or `Unknown_Facility`.
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    /// Warehousing facility, or `Unknown_Warehouse`.
    #[serde(rename = "WarehouseFacilityID")]
    pub warehouse_facility_id: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDateTime,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDateTime,
}
