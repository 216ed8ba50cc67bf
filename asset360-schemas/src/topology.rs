use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Region *name*, not id. The loader joins on it.
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "CountryCode")]
    pub country_code: String,
}

/// The functional category of a facility. Determines which lines it houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    #[serde(rename = "Continuous Manufacturing")]
    ContinuousManufacturing,
    #[serde(rename = "Batch Manufacturing")]
    BatchManufacturing,
    #[serde(rename = "R&D")]
    ResearchAndDevelopment,
    #[serde(rename = "Warehousing and Distribution")]
    WarehousingAndDistribution,
}

impl FacilityType {
    pub const MANUFACTURING: [FacilityType; 2] = [
        FacilityType::ContinuousManufacturing,
        FacilityType::BatchManufacturing,
    ];

    pub const AUXILIARY: [FacilityType; 2] = [
        FacilityType::ResearchAndDevelopment,
        FacilityType::WarehousingAndDistribution,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FacilityType::ContinuousManufacturing => "Continuous Manufacturing",
            FacilityType::BatchManufacturing => "Batch Manufacturing",
            FacilityType::ResearchAndDevelopment => "R&D",
            FacilityType::WarehousingAndDistribution => "Warehousing and Distribution",
        }
    }

    pub fn is_manufacturing(&self) -> bool {
        Self::MANUFACTURING.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FType")]
    pub facility_type: FacilityType,
    #[serde(rename = "SiteID")]
    pub site_id: String,
    #[serde(rename = "RegionID")]
    pub region_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FacilityID")]
    pub facility_id: String,
    #[serde(rename = "LType")]
    pub line_type: String,
    #[serde(rename = "Capacity")]
    pub capacity: u32,
    #[serde(rename = "Floor")]
    pub floor: u32,
}
