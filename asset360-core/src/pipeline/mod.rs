//! The generation pipeline: named stages, a dependency scheduler, and the engine that runs
//! them against a shared context.

pub mod builder;
pub mod engine;
pub mod stage;
pub mod state;
