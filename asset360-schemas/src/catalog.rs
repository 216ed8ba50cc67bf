use serde::{Deserialize, Serialize};

/// An original equipment manufacturer that supplies assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oem {
    pub id: String,
    #[serde(rename = "ManufacturerName")]
    pub manufacturer_name: String,
}

/// A catalogued task bound to the asset type that performs it (e.g. "Mixing" on a mixer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProcedure {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// The procedure type, e.g. "Production-stage1" or "LIMS". Work orders inherit it as
    /// their `WOType`.
    #[serde(rename = "UPType")]
    pub procedure_type: String,
    #[serde(rename = "Task")]
    pub task: String,
    /// `None` when the task has no entry in the procedure→asset-type catalog.
    #[serde(rename = "AssetType")]
    pub asset_type: Option<String>,
}
