use crate::config::DEFAULT_REVISION;
use crate::core::artifacts::ArtifactPlan;
use crate::core::{ModelHub, SetupStep, Storage};
use crate::domain::model::{InstallReport, ModelId, OutputDirs, StepOutcome};
use crate::utils::error::Result;

/// 下載模型與 tokenizer 並寫入 `<root>/<id>_model` 與 `<root>/<id>_tokenizer`
pub struct ModelInstaller<H: ModelHub, S: Storage> {
    hub: H,
    storage: S,
    model: ModelId,
    revision: String,
}

impl<H: ModelHub, S: Storage> ModelInstaller<H, S> {
    pub fn new(hub: H, storage: S, model: ModelId) -> Self {
        Self {
            hub,
            storage,
            model,
            revision: DEFAULT_REVISION.to_string(),
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    pub fn output_dirs(&self) -> OutputDirs {
        OutputDirs::derive(self.storage.base_path(), &self.model)
    }

    pub async fn install(&self) -> Result<InstallReport> {
        let dirs = self.output_dirs();
        let model_dir = OutputDirs::model_dir_name(&self.model);
        let tokenizer_dir = OutputDirs::tokenizer_dir_name(&self.model);

        self.storage.create_dir(&model_dir).await?;
        self.storage.create_dir(&tokenizer_dir).await?;

        let cwd = std::env::current_dir()?;
        println!("The working directory is {}", cwd.display());
        tracing::debug!("Working directory: {}", cwd.display());

        println!("Downloading model and tokenizer...");
        tracing::info!(
            "⇣ Resolving {} at revision {}",
            self.model,
            self.revision
        );

        let listing = self.hub.list_files(&self.model, &self.revision).await?;
        tracing::debug!("Repository lists {} files", listing.len());

        let plan = ArtifactPlan::from_listing(&self.model, &listing)?;
        tracing::info!(
            "Planned {} model files and {} tokenizer files",
            plan.model_files.len(),
            plan.tokenizer_files.len()
        );

        self.copy_group(&plan.model_files, &model_dir).await?;
        self.copy_group(&plan.tokenizer_files, &tokenizer_dir).await?;

        println!("Model saved to {}", dirs.model_dir.display());
        println!("Tokenizer saved to {}", dirs.tokenizer_dir.display());
        tracing::debug!("✅ Model saved to {}", dirs.model_dir.display());
        tracing::debug!("✅ Tokenizer saved to {}", dirs.tokenizer_dir.display());

        Ok(InstallReport {
            model: self.model.clone(),
            dirs,
            model_files: plan.model_files,
            tokenizer_files: plan.tokenizer_files,
        })
    }

    async fn copy_group(&self, files: &[String], dir: &str) -> Result<()> {
        for filename in files {
            let artifact = self
                .hub
                .fetch_file(&self.model, &self.revision, filename)
                .await?;
            let target = format!("{}/{}", dir, artifact.filename);
            let bytes = self.storage.copy_file(&artifact.local_path, &target).await?;
            tracing::debug!("Copied {} ({} bytes) to {}", filename, bytes, target);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<H: ModelHub, S: Storage> SetupStep for ModelInstaller<H, S> {
    fn name(&self) -> &str {
        "model-install"
    }

    async fn run(&self) -> Result<StepOutcome> {
        Ok(StepOutcome::ModelInstalled(self.install().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HubArtifact;
    use crate::utils::error::SetupError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    struct FakeHub {
        cache: TempDir,
        files: HashMap<String, Vec<u8>>,
        fetched: Arc<Mutex<Vec<String>>>,
    }

    impl FakeHub {
        fn new(files: &[(&str, &[u8])]) -> Self {
            Self {
                cache: TempDir::new().unwrap(),
                files: files
                    .iter()
                    .map(|(name, data)| (name.to_string(), data.to_vec()))
                    .collect(),
                fetched: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait::async_trait]
    impl ModelHub for FakeHub {
        async fn list_files(&self, _model: &ModelId, _revision: &str) -> Result<Vec<String>> {
            Ok(self.files.keys().cloned().collect())
        }

        async fn fetch_file(
            &self,
            _model: &ModelId,
            _revision: &str,
            filename: &str,
        ) -> Result<HubArtifact> {
            let data = self.files.get(filename).ok_or_else(|| {
                SetupError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", filename),
                ))
            })?;
            let local_path = self.cache.path().join(filename);
            std::fs::write(&local_path, data)?;
            self.fetched.lock().await.push(filename.to_string());
            Ok(HubArtifact {
                filename: filename.to_string(),
                local_path,
            })
        }
    }

    #[derive(Clone)]
    struct MockStorage {
        base: PathBuf,
        dirs: Arc<Mutex<Vec<String>>>,
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new(base: &str) -> Self {
            Self {
                base: PathBuf::from(base),
                dirs: Arc::new(Mutex::new(Vec::new())),
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn base_path(&self) -> &Path {
            &self.base
        }

        async fn create_dir(&self, path: &str) -> Result<()> {
            self.dirs.lock().await.push(path.to_string());
            Ok(())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn copy_file(&self, source: &Path, path: &str) -> Result<u64> {
            let data = std::fs::read(source)?;
            let len = data.len() as u64;
            self.write_file(path, &data).await?;
            Ok(len)
        }
    }

    fn esm2() -> ModelId {
        ModelId::parse("facebook/esm2_t6_8M_UR50D").unwrap()
    }

    #[tokio::test]
    async fn test_install_copies_files_into_both_dirs() {
        let hub = FakeHub::new(&[
            ("config.json", b"{\"model_type\":\"esm\"}"),
            ("model.safetensors", b"weights"),
            ("tf_model.h5", b"tf weights"),
            ("tokenizer_config.json", b"{}"),
            ("vocab.txt", b"<cls>\n<pad>\n"),
            ("README.md", b"# esm2"),
        ]);
        let fetched = hub.fetched.clone();
        let storage = MockStorage::new("../pickle");
        let installer = ModelInstaller::new(hub, storage.clone(), esm2());

        let report = installer.install().await.unwrap();

        assert_eq!(
            report.dirs.model_dir,
            Path::new("../pickle").join("facebook_esm2_t6_8M_UR50D_model")
        );
        assert_eq!(report.model_files, vec!["config.json", "model.safetensors"]);
        assert_eq!(report.tokenizer_files, vec!["tokenizer_config.json", "vocab.txt"]);

        assert_eq!(
            *storage.dirs.lock().await,
            vec![
                "facebook_esm2_t6_8M_UR50D_model".to_string(),
                "facebook_esm2_t6_8M_UR50D_tokenizer".to_string()
            ]
        );
        assert_eq!(
            storage
                .get_file("facebook_esm2_t6_8M_UR50D_model/model.safetensors")
                .await
                .unwrap(),
            b"weights"
        );
        assert!(storage
            .get_file("facebook_esm2_t6_8M_UR50D_tokenizer/vocab.txt")
            .await
            .is_some());

        let fetched = fetched.lock().await;
        assert!(!fetched.contains(&"tf_model.h5".to_string()));
        assert!(!fetched.contains(&"README.md".to_string()));
    }

    #[tokio::test]
    async fn test_install_fails_without_weights_but_dirs_exist() {
        let hub = FakeHub::new(&[("config.json", b"{}"), ("vocab.txt", b"a")]);
        let storage = MockStorage::new("out");
        let installer = ModelInstaller::new(hub, storage.clone(), esm2());

        let result = installer.install().await;

        assert!(matches!(
            result,
            Err(SetupError::MissingArtifactError { .. })
        ));
        assert_eq!(storage.dirs.lock().await.len(), 2);
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_step_reports_install() {
        let hub = FakeHub::new(&[
            ("config.json", b"{}"),
            ("model.safetensors", b"w"),
            ("tokenizer.json", b"{}"),
        ]);
        let installer =
            ModelInstaller::new(hub, MockStorage::new("root"), esm2()).with_revision("v1");

        assert_eq!(installer.name(), "model-install");
        let outcome = installer.run().await.unwrap();
        assert!(matches!(outcome, StepOutcome::ModelInstalled(report) if report.tokenizer_files == vec!["tokenizer.json"]));
    }
}
