pub mod analysis;
pub mod context;
pub mod error;
pub mod generators;
pub mod pipeline;
pub mod validation;
pub mod writer;
