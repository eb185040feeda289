use crate::domain::model::ModelId;
use crate::utils::error::{Result, SetupError};

const TOKENIZER_FILES: &[&str] = &[
    "tokenizer.json",
    "tokenizer_config.json",
    "special_tokens_map.json",
    "added_tokens.json",
    "vocab.txt",
    "vocab.json",
    "merges.txt",
    "spiece.model",
    "sentencepiece.bpe.model",
    "source.spm",
    "target.spm",
];

const MODEL_CONFIG_FILES: &[&str] = &["config.json", "generation_config.json"];

const SAFETENSORS_INDEX: &str = "model.safetensors.index.json";
const PYTORCH_INDEX: &str = "pytorch_model.bin.index.json";

/// 把模型倉庫的檔案清單分成模型目錄與 tokenizer 目錄兩組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub model_files: Vec<String>,
    pub tokenizer_files: Vec<String>,
}

impl ArtifactPlan {
    pub fn from_listing(model: &ModelId, files: &[String]) -> Result<Self> {
        // 子目錄 (onnx/, 1_Pooling/ ...) 不屬於 save_pretrained 的輸出
        let mut top_level: Vec<&str> = files
            .iter()
            .map(String::as_str)
            .filter(|f| !f.contains('/'))
            .collect();
        top_level.sort_unstable();
        top_level.dedup();

        let mut model_files = Vec::new();
        let mut tokenizer_files = Vec::new();

        for file in &top_level {
            if is_tokenizer_file(file) {
                tokenizer_files.push(file.to_string());
            } else if MODEL_CONFIG_FILES.contains(file) || file.ends_with(".py") {
                model_files.push(file.to_string());
            }
        }

        if !model_files.iter().any(|f| f == "config.json") {
            return Err(missing(model, "config.json"));
        }

        let weights = select_weights(&top_level);
        if weights.is_empty() {
            return Err(missing(model, "weights (*.safetensors or pytorch_model*.bin)"));
        }
        model_files.extend(weights);

        if tokenizer_files.is_empty() {
            return Err(missing(model, "tokenizer files"));
        }

        model_files.sort();

        Ok(Self {
            model_files,
            tokenizer_files,
        })
    }
}

fn is_tokenizer_file(file: &str) -> bool {
    TOKENIZER_FILES.contains(&file)
        || file.ends_with(".model")
        || (file.starts_with("tokenization") && file.ends_with(".py"))
}

/// safetensors 優先; 沒有時才使用 pytorch_model*.bin
fn select_weights(files: &[&str]) -> Vec<String> {
    let safetensors: Vec<String> = files
        .iter()
        .filter(|f| f.ends_with(".safetensors") || **f == SAFETENSORS_INDEX)
        .map(|f| f.to_string())
        .collect();
    if safetensors.iter().any(|f| f.ends_with(".safetensors")) {
        return safetensors;
    }

    files
        .iter()
        .filter(|f| {
            (f.starts_with("pytorch_model") && f.ends_with(".bin")) || **f == PYTORCH_INDEX
        })
        .map(|f| f.to_string())
        .collect()
}

fn missing(model: &ModelId, artifact: &str) -> SetupError {
    SetupError::MissingArtifactError {
        model: model.to_string(),
        artifact: artifact.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    fn esm2() -> ModelId {
        ModelId::parse("facebook/esm2_t6_8M_UR50D").unwrap()
    }

    #[test]
    fn test_esm2_repository_listing() {
        let files = listing(&[
            ".gitattributes",
            "README.md",
            "config.json",
            "model.safetensors",
            "pytorch_model.bin",
            "special_tokens_map.json",
            "tf_model.h5",
            "tokenizer_config.json",
            "vocab.txt",
        ]);

        let plan = ArtifactPlan::from_listing(&esm2(), &files).unwrap();

        assert_eq!(plan.model_files, vec!["config.json", "model.safetensors"]);
        assert_eq!(
            plan.tokenizer_files,
            vec!["special_tokens_map.json", "tokenizer_config.json", "vocab.txt"]
        );
    }

    #[test]
    fn test_falls_back_to_pytorch_shards() {
        let files = listing(&[
            "config.json",
            "pytorch_model-00001-of-00002.bin",
            "pytorch_model-00002-of-00002.bin",
            "pytorch_model.bin.index.json",
            "tokenizer.json",
        ]);

        let plan = ArtifactPlan::from_listing(&esm2(), &files).unwrap();

        assert_eq!(
            plan.model_files,
            vec![
                "config.json",
                "pytorch_model-00001-of-00002.bin",
                "pytorch_model-00002-of-00002.bin",
                "pytorch_model.bin.index.json",
            ]
        );
    }

    #[test]
    fn test_remote_code_is_split_between_dirs() {
        let files = listing(&[
            "config.json",
            "model.safetensors",
            "modeling_custom.py",
            "tokenization_custom.py",
            "spm.model",
            "nested/config.json",
        ]);

        let plan = ArtifactPlan::from_listing(&esm2(), &files).unwrap();

        assert_eq!(
            plan.model_files,
            vec!["config.json", "model.safetensors", "modeling_custom.py"]
        );
        assert_eq!(plan.tokenizer_files, vec!["spm.model", "tokenization_custom.py"]);
    }

    #[test]
    fn test_missing_artifacts_are_reported() {
        let no_config = listing(&["model.safetensors", "vocab.txt"]);
        assert!(matches!(
            ArtifactPlan::from_listing(&esm2(), &no_config),
            Err(SetupError::MissingArtifactError { artifact, .. }) if artifact == "config.json"
        ));

        let no_weights = listing(&["config.json", "tf_model.h5", "vocab.txt"]);
        assert!(ArtifactPlan::from_listing(&esm2(), &no_weights).is_err());

        let no_tokenizer = listing(&["config.json", "model.safetensors"]);
        assert!(matches!(
            ArtifactPlan::from_listing(&esm2(), &no_tokenizer),
            Err(SetupError::MissingArtifactError { artifact, .. }) if artifact == "tokenizer files"
        ));
    }
}
