use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        let full_path = self.base_path.join(path);
        fs::create_dir_all(full_path)?;
        Ok(())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn copy_file(&self, source: &Path, path: &str) -> Result<u64> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // hf-hub 快取內是指向 blob 的符號連結, fs::copy 會跟隨連結複製實際內容
        let bytes = fs::copy(source, full_path)?;
        Ok(bytes)
    }
}
