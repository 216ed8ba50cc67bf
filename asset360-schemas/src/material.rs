use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "BatchDate")]
    pub batch_date: NaiveDate,
    #[serde(rename = "Storage")]
    pub storage: String,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,
    /// `Failed` once the expiry date is on or before the reference day.
    #[serde(rename = "Status")]
    pub status: MaterialStatus,
}

/// Placement of a material's stock at one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMaterial {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    #[serde(rename = "MaterialID")]
    pub material_id: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "Status")]
    pub status: MaterialStatus,
    #[serde(rename = "BatchDate")]
    pub batch_date: NaiveDate,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,
}

/// One material line of a product recipe. Lines sharing an `id` form one recipe, and that
/// id matches `Product::recipe_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MaterialID")]
    pub material_id: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSupplierLink {
    #[serde(rename = "MaterialID")]
    pub material_id: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: String,
}
