use crate::core::ModelHub;
use crate::domain::model::{HubArtifact, ModelId};
use crate::utils::error::Result;
use hf_hub::api::tokio::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;

/// 以 hf-hub 的 tokio API 存取 Hugging Face 模型中心
pub struct HfHubClient {
    api: Api,
}

impl HfHubClient {
    pub fn new(cache_dir: Option<PathBuf>, progress: bool) -> Result<Self> {
        let mut builder = ApiBuilder::new().with_progress(progress);
        if let Some(cache_dir) = cache_dir {
            tracing::debug!("Using hf-hub cache at {}", cache_dir.display());
            builder = builder.with_cache_dir(cache_dir);
        }

        Ok(Self {
            api: builder.build()?,
        })
    }

    fn repo(&self, model: &ModelId, revision: &str) -> ApiRepo {
        self.api.repo(Repo::with_revision(
            model.as_str().to_string(),
            RepoType::Model,
            revision.to_string(),
        ))
    }
}

#[async_trait::async_trait]
impl ModelHub for HfHubClient {
    async fn list_files(&self, model: &ModelId, revision: &str) -> Result<Vec<String>> {
        let info = self.repo(model, revision).info().await?;
        tracing::debug!("{} resolved to commit {}", model, info.sha);
        Ok(info.siblings.into_iter().map(|s| s.rfilename).collect())
    }

    async fn fetch_file(
        &self,
        model: &ModelId,
        revision: &str,
        filename: &str,
    ) -> Result<HubArtifact> {
        tracing::info!("⇣ Downloading {}", filename);
        let local_path = self.repo(model, revision).get(filename).await?;
        Ok(HubArtifact {
            filename: filename.to_string(),
            local_path,
        })
    }
}
