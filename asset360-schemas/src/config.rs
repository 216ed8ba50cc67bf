use crate::topology::FacilityType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of the global location catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub region: String,
    #[serde(alias = "plant")]
    pub plant_name: String,
    pub country: String,
}

/// The asset types installed on every line of a given line type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub name: String,
    pub assets: Vec<String>,
}

/// How the good-quantity fraction of the operation table is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodQtySampling {
    /// One fraction for every asset in the run.
    #[default]
    Shared,
    /// A fresh fraction per asset.
    PerAsset,
}

/// Static catalogs driving a generation run.
///
/// Maps are ordered so that identifiers derived from catalog position are stable between
/// runs of the same configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub asset_types: Vec<String>,
    pub location_list: Vec<LocationRecord>,
    /// Storage locations materials are drawn from.
    pub storage_locations: Vec<String>,
    /// Task → asset type performing it.
    pub procedure_asset_types: IndexMap<String, String>,
    pub asset_production_lines: Vec<ProductionLine>,
    /// Procedure type → tasks of that type.
    pub unit_procedure_types: IndexMap<String, Vec<String>>,
    pub pharma_asset_suppliers: Vec<String>,
    pub product_list: Vec<String>,
    pub num_products: usize,
    #[serde(default = "default_num_boms")]
    pub num_boms: usize,
    /// Facility type → line types housed in a facility of that type.
    pub facility_types: IndexMap<FacilityType, Vec<String>>,
    /// Country name → ISO code.
    #[serde(default)]
    pub country_codes: IndexMap<String, String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub good_qty_sampling: GoodQtySampling,
}

fn default_num_boms() -> usize {
    10
}

impl GeneratorConfig {
    /// Asset types listed for a line type, or an empty slice for unknown line types.
    pub fn assets_for_line(&self, line_type: &str) -> &[String] {
        self.asset_production_lines
            .iter()
            .find(|line| line.name == line_type)
            .map(|line| line.assets.as_slice())
            .unwrap_or(&[])
    }
}
