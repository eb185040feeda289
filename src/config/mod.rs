pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{ModelId, TruncationBounds};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_NAME: &str = "facebook/esm2_t6_8M_UR50D";
pub const DEFAULT_OUTPUT_ROOT: &str = "../pickle";
pub const DEFAULT_REVISION: &str = "main";
pub const DEFAULT_ENSEMBL_ENDPOINT: &str = "https://rest.ensembl.org/sequence/id";
pub const DEFAULT_DNA_OUTPUT: &str = "dna_data.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "model-setup"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Download a masked-language model, its tokenizer and optional DNA data for offline use")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_MODEL_NAME))]
    pub model_name: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_OUTPUT_ROOT))]
    pub output_root: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_REVISION))]
    pub revision: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Override the hf-hub cache directory"))]
    pub cache_dir: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Do not download the model and tokenizer"))]
    pub skip_model: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Fetch a DNA sequence from Ensembl"))]
    pub fetch_dna: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Ensembl id; prompted for when omitted"))]
    pub sequence_id: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "1-based start position for over-long sequences"))]
    pub start: Option<usize>,

    #[cfg_attr(feature = "cli", arg(long, help = "1-based inclusive end position for over-long sequences"))]
    pub end: Option<usize>,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_ENSEMBL_ENDPOINT))]
    pub ensembl_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_DNA_OUTPUT))]
    pub dna_output: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Load settings from a TOML file instead"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage per step"))]
    pub monitor: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            cache_dir: None,
            skip_model: false,
            fetch_dna: false,
            sequence_id: None,
            start: None,
            end: None,
            ensembl_endpoint: DEFAULT_ENSEMBL_ENDPOINT.to_string(),
            dna_output: DEFAULT_DNA_OUTPUT.to_string(),
            config: None,
            monitor: false,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn output_root(&self) -> &str {
        &self.output_root
    }

    fn revision(&self) -> &str {
        &self.revision
    }

    fn cache_dir(&self) -> Option<&str> {
        self.cache_dir.as_deref()
    }

    fn skip_model(&self) -> bool {
        self.skip_model
    }

    fn fetch_dna(&self) -> bool {
        self.fetch_dna
    }

    fn ensembl_endpoint(&self) -> &str {
        &self.ensembl_endpoint
    }

    fn sequence_id(&self) -> Option<&str> {
        self.sequence_id.as_deref()
    }

    fn truncation_bounds(&self) -> Result<Option<TruncationBounds>> {
        configured_bounds(self.start, self.end)
    }

    fn dna_output_file(&self) -> &str {
        &self.dna_output
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

/// 設定中的截斷範圍: 兩端需同時給定, 否則視為錯誤
pub(crate) fn configured_bounds(
    start: Option<usize>,
    end: Option<usize>,
) -> Result<Option<TruncationBounds>> {
    validation::validate_bounds_pair(start, end)?;
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(TruncationBounds::new(start, end)?)),
        _ => Ok(None),
    }
}

/// CLI 與 TOML 共用的設定檢查
pub(crate) fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    config.truncation_bounds()?;

    if !config.skip_model() {
        ModelId::parse(config.model_name())?;
        validation::validate_path("output_root", config.output_root())?;
        validation::validate_non_empty_string("revision", config.revision())?;
        if let Some(cache_dir) = config.cache_dir() {
            validation::validate_path("cache_dir", cache_dir)?;
        }
    }

    if config.fetch_dna() {
        validation::validate_url("ensembl_endpoint", config.ensembl_endpoint())?;
        validation::validate_path("dna_output", config.dna_output_file())?;
        if let Some(id) = config.sequence_id() {
            validation::validate_non_empty_string("sequence_id", id)?;
        }
    }

    Ok(())
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
