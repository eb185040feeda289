use crate::utils::error::{Result, SetupError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ensembl 序列超過此長度時需要截斷
pub const MAX_SEQUENCE_LENGTH: usize = 131_000;

/// 模型中心的識別名稱，例如 `facebook/esm2_t6_8M_UR50D`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| SetupError::InvalidConfigValueError {
            field: "model_name".to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("Model name cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("Model name cannot contain whitespace"));
        }
        if value.matches('/').count() > 1 {
            return Err(invalid("Model name must look like 'owner/name' or 'name'"));
        }
        if value.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
            return Err(invalid("Model name contains an empty or relative path component"));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 目錄名稱前綴: 所有路徑分隔字元換成底線
    pub fn dir_stem(&self) -> String {
        self.0.replace(|c: char| c == '/' || c == '\\', "_")
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub model_dir: PathBuf,
    pub tokenizer_dir: PathBuf,
}

impl OutputDirs {
    pub fn derive(root: &Path, model: &ModelId) -> Self {
        Self {
            model_dir: root.join(Self::model_dir_name(model)),
            tokenizer_dir: root.join(Self::tokenizer_dir_name(model)),
        }
    }

    pub fn model_dir_name(model: &ModelId) -> String {
        format!("{}_model", model.dir_stem())
    }

    pub fn tokenizer_dir_name(model: &ModelId) -> String {
        format!("{}_tokenizer", model.dir_stem())
    }
}

/// 模型中心快取中的單一檔案
#[derive(Debug, Clone)]
pub struct HubArtifact {
    pub filename: String,
    pub local_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub model: ModelId,
    pub dirs: OutputDirs,
    pub model_files: Vec<String>,
    pub tokenizer_files: Vec<String>,
}

/// 1-based、含結尾的截斷範圍; 只能經由 `new` 建立, 保證 1 <= start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationBounds {
    start: usize,
    end: usize,
}

impl TruncationBounds {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 {
            return Err(SetupError::InvalidInputError {
                input: start.to_string(),
                reason: "Start position is 1-based and must be at least 1".to_string(),
            });
        }
        if end < start {
            return Err(SetupError::InvalidInputError {
                input: end.to_string(),
                reason: format!("End position must not be before start position {}", start),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// 取出第 start 到第 end 個字元; end 超出序列長度時截到結尾
    pub fn apply(&self, sequence: &str) -> String {
        sequence
            .chars()
            .skip(self.start - 1)
            .take(self.end - self.start + 1)
            .collect()
    }
}

/// Ensembl `/sequence/id` 回傳的 JSON 物件，欄位順序原樣保留
#[derive(Debug, Clone, PartialEq)]
pub struct DnaRecord {
    payload: serde_json::Map<String, serde_json::Value>,
}

impl DnaRecord {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(payload) => {
                let record = Self { payload };
                record.sequence()?;
                Ok(record)
            }
            _ => Err(SetupError::MissingFieldError {
                field: "seq".to_string(),
            }),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.payload.get("id").and_then(|v| v.as_str())
    }

    pub fn sequence(&self) -> Result<&str> {
        self.payload
            .get("seq")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SetupError::MissingFieldError {
                field: "seq".to_string(),
            })
    }

    pub fn sequence_length(&self) -> Result<usize> {
        Ok(self.sequence()?.chars().count())
    }

    pub fn truncate(&mut self, bounds: TruncationBounds) -> Result<()> {
        let truncated = bounds.apply(self.sequence()?);
        self.payload
            .insert("seq".to_string(), serde_json::Value::String(truncated));
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.payload)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved {
        path: String,
        sequence_length: usize,
        truncated: bool,
    },
    Unavailable {
        status: u16,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    ModelInstalled(InstallReport),
    Sequence(FetchOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: String,
    pub outcome: StepOutcome,
}
