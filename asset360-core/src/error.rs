use thiserror::Error;

#[derive(Debug, Error)]
pub enum Asset360Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "Not enough suppliers: {materials} materials exceed the capacity of {suppliers} suppliers ({capacity} slots)"
    )]
    InsufficientCapacity {
        materials: usize,
        suppliers: usize,
        capacity: usize,
    },

    #[error(
        "Insufficient catalog entries for procedure type '{procedure_type}': requested {requested}, available {available}"
    )]
    InsufficientCatalogEntries {
        procedure_type: String,
        requested: usize,
        available: usize,
    },

    #[error("Stage '{stage}' requires stage '{missing}', which is not scheduled before it")]
    MissingUpstreamStage {
        stage: &'static str,
        missing: &'static str,
    },

    #[error("Stage '{0}' is scheduled more than once")]
    DuplicateStage(&'static str),

    #[error("Product '{0}' referenced by a process order does not exist")]
    ProductNotFound(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Failed to persist {} table(s): {}", .0.len(), .0.join(", "))]
    PersistenceFailed(Vec<String>),
}
