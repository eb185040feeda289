use crate::config::{
    configured_bounds, validate_provider, DEFAULT_DNA_OUTPUT, DEFAULT_ENSEMBL_ENDPOINT, DEFAULT_MODEL_NAME,
    DEFAULT_OUTPUT_ROOT, DEFAULT_REVISION,
};
use crate::core::ConfigProvider;
use crate::domain::model::TruncationBounds;
use crate::utils::error::{Result, SetupError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub model: ModelConfig,
    pub dna: Option<DnaConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    pub revision: Option<String>,
    pub cache_dir: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaConfig {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub sequence_id: Option<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_output_root() -> String {
    DEFAULT_OUTPUT_ROOT.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SetupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SetupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PICKLE_DIR}); 未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SetupError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn dna_section(&self) -> Option<&DnaConfig> {
        self.dna.as_ref()
    }
}

impl ConfigProvider for TomlConfig {
    fn model_name(&self) -> &str {
        &self.model.name
    }

    fn output_root(&self) -> &str {
        &self.model.output_root
    }

    fn revision(&self) -> &str {
        self.model.revision.as_deref().unwrap_or(DEFAULT_REVISION)
    }

    fn cache_dir(&self) -> Option<&str> {
        self.model.cache_dir.as_deref()
    }

    fn skip_model(&self) -> bool {
        !self.model.enabled.unwrap_or(true)
    }

    fn fetch_dna(&self) -> bool {
        self.dna_section().map(|d| d.enabled).unwrap_or(false)
    }

    fn ensembl_endpoint(&self) -> &str {
        self.dna_section()
            .and_then(|d| d.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENSEMBL_ENDPOINT)
    }

    fn sequence_id(&self) -> Option<&str> {
        self.dna_section().and_then(|d| d.sequence_id.as_deref())
    }

    fn truncation_bounds(&self) -> Result<Option<TruncationBounds>> {
        match self.dna_section() {
            Some(dna) => configured_bounds(dna.start, dna.end),
            None => Ok(None),
        }
    }

    fn dna_output_file(&self) -> &str {
        self.dna_section()
            .and_then(|d| d.output_file.as_deref())
            .unwrap_or(DEFAULT_DNA_OUTPUT)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
