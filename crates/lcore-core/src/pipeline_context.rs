//! Run-wide inputs shared by every pipeline stage.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lcore_standards::PipelineConfig;
use lcore_transform::TransformContext;
use lcore_validate::ValidationContext;

#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub config: PipelineConfig,
    /// SHA-256 of the configuration text, recorded in the run report.
    pub config_sha256: Option<String>,
    /// Directory holding the raw source files.
    pub data_dir: PathBuf,
    pub run_time: DateTime<Utc>,
    /// Include raw cell values in debug logs.
    pub log_data: bool,
}

impl PipelineContext {
    pub fn new(config: PipelineConfig, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            config_sha256: None,
            data_dir: data_dir.into(),
            run_time: Utc::now(),
            log_data: false,
        }
    }

    pub fn with_config_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.config_sha256 = Some(sha256.into());
        self
    }

    pub fn with_run_time(mut self, run_time: DateTime<Utc>) -> Self {
        self.run_time = run_time;
        self
    }

    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn transform_context(&self) -> TransformContext {
        TransformContext::new(self.config.pipeline.drop_ceiling).with_log_data(self.log_data)
    }

    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::new(
            self.run_time.timestamp(),
            self.config.pipeline.timestamp_tolerance_secs,
        )
    }
}
