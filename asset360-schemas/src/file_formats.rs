use crate::config::GeneratorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    pub catalog: GeneratorConfig,
}
