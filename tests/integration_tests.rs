use httpmock::prelude::*;
use model_setup::core::{StepOutcome, Storage};
use model_setup::utils::validation::Validate;
use model_setup::{CliConfig, FetchOutcome, LocalStorage, SetupEngine, TomlConfig};
use tempfile::TempDir;

#[tokio::test]
async fn test_dna_only_setup_from_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("dna_data.json");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sequence/id/ENSG00000012048")
            .header("Content-Type", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": "ENSG00000012048",
                "molecule": "dna",
                "seq": "ACGTACGTACGT"
            }));
    });

    // 將Windows路徑中的反斜杠轉為正斜杠以避免TOML解析問題
    let config_content = format!(
        r#"
[model]
enabled = false

[dna]
enabled = true
endpoint = "{}"
sequence_id = "ENSG00000012048"
output_file = "{}"
"#,
        server.url("/sequence/id"),
        output_file.display().to_string().replace('\\', "/")
    );

    let config = TomlConfig::from_toml_str(&config_content).unwrap();
    assert!(config.validate().is_ok());

    let engine = SetupEngine::from_config(&config).unwrap();
    assert_eq!(engine.step_names(), vec!["dna-fetch"]);

    let reports = engine.run().await.unwrap();

    api_mock.assert();
    assert_eq!(reports.len(), 1);
    assert!(matches!(
        &reports[0].outcome,
        StepOutcome::Sequence(FetchOutcome::Saved { sequence_length: 12, truncated: false, .. })
    ));

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&output_file).unwrap()).unwrap();
    assert_eq!(saved["seq"], "ACGTACGTACGT");
}

#[tokio::test]
async fn test_dna_setup_with_unavailable_sequence_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("dna_data.json");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sequence/id/ENSG99999999999");
        then.status(400);
    });

    let config = CliConfig {
        skip_model: true,
        fetch_dna: true,
        sequence_id: Some("ENSG99999999999".to_string()),
        ensembl_endpoint: server.url("/sequence/id"),
        dna_output: output_file.display().to_string(),
        ..CliConfig::default()
    };
    assert!(config.validate().is_ok());

    let engine = SetupEngine::from_config(&config).unwrap();
    let reports = engine.run().await.unwrap();

    assert!(matches!(
        reports[0].outcome,
        StepOutcome::Sequence(FetchOutcome::Unavailable { status: 400 })
    ));
    assert!(!output_file.exists());
}

#[tokio::test]
async fn test_local_storage_base_path_is_output_root() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());

    storage.create_dir("facebook_esm2_t6_8M_UR50D_model").await.unwrap();

    assert_eq!(storage.base_path(), temp_dir.path());
    assert!(temp_dir
        .path()
        .join("facebook_esm2_t6_8M_UR50D_model")
        .is_dir());
}
