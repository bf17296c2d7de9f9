//! Image export: stage nodes, cover loading, rasterization strategies

pub mod assets;
mod filename;
pub mod pipeline;
pub mod stage;
pub mod strategy;

pub use assets::{default_cache_dir, AssetLoader};
pub use pipeline::{ExportOutcome, ExportRequest, Exporter};
pub use stage::Stage;
