use crate::domain::model::{HubArtifact, ModelId, StepOutcome, TruncationBounds};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn base_path(&self) -> &Path;
    fn create_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn copy_file(
        &self,
        source: &Path,
        path: &str,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model_name(&self) -> &str;
    fn output_root(&self) -> &str;
    fn revision(&self) -> &str;
    fn cache_dir(&self) -> Option<&str>;
    fn skip_model(&self) -> bool;
    fn fetch_dna(&self) -> bool;
    fn ensembl_endpoint(&self) -> &str;
    fn sequence_id(&self) -> Option<&str>;
    fn truncation_bounds(&self) -> Result<Option<TruncationBounds>>;
    fn dna_output_file(&self) -> &str;
    fn monitoring_enabled(&self) -> bool;
}

/// 解析模型名稱並把檔案下載到本機快取
#[async_trait]
pub trait ModelHub: Send + Sync {
    async fn list_files(&self, model: &ModelId, revision: &str) -> Result<Vec<String>>;
    async fn fetch_file(
        &self,
        model: &ModelId,
        revision: &str,
        filename: &str,
    ) -> Result<HubArtifact>;
}

pub trait Prompter: Send + Sync {
    fn prompt(&self, message: &str) -> Result<String>;
}

#[async_trait]
pub trait SetupStep: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<StepOutcome>;
}
