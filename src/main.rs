use clap::Parser;
use model_setup::config::toml_config::MonitoringConfig;
use model_setup::core::{ConfigProvider, StepOutcome, StepReport};
use model_setup::utils::{logger, validation::Validate};
use model_setup::{CliConfig, FetchOutcome, Result, SetupEngine, SetupError, TomlConfig};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting model-setup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut config) => {
                    if cli.monitor {
                        config.monitoring = Some(MonitoringConfig { enabled: true });
                    }
                    run_setup(&config).await
                }
                Err(e) => Err(e),
            }
        }
        None => run_setup(&cli).await,
    };

    match result {
        Ok(reports) => {
            for report in &reports {
                log_report(report);
            }
            tracing::info!("✅ Setup completed successfully!");
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn run_setup<C: ConfigProvider + Validate>(config: &C) -> Result<Vec<StepReport>> {
    // 驗證配置
    config.validate()?;
    if config.monitoring_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = SetupEngine::from_config(config)?;
    engine.run().await
}

fn log_report(report: &StepReport) {
    match &report.outcome {
        StepOutcome::ModelInstalled(install) => tracing::info!(
            "{}: {} model files, {} tokenizer files",
            report.step,
            install.model_files.len(),
            install.tokenizer_files.len()
        ),
        StepOutcome::Sequence(FetchOutcome::Saved {
            path,
            sequence_length,
            truncated,
        }) => tracing::info!(
            "{}: {} bases saved to {} (truncated: {})",
            report.step,
            sequence_length,
            path,
            truncated
        ),
        StepOutcome::Sequence(FetchOutcome::Unavailable { status }) => {
            tracing::warn!("{}: nothing saved, Ensembl answered {}", report.step, status)
        }
    }
}

fn exit_with(e: SetupError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Setup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
