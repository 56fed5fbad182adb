//! Pipeline orchestration.
//!
//! [`run_pipeline`] takes every domain through load, transform and
//! validate, builds the device catalog from the accepted outputs and
//! produces the consolidated [`lcore_model::RunReport`]. [`run_ownership`]
//! then distributes the catalog across a generated wallet pool.

pub mod catalog;
pub mod orchestrator;
pub mod ownership;
pub mod pipeline_context;
pub mod sources;

pub use catalog::{build_catalog, category_counts};
pub use orchestrator::{PipelineRun, process_domain, run_pipeline};
pub use ownership::{OwnershipRun, run_ownership};
pub use pipeline_context::PipelineContext;
pub use sources::load_sources;
