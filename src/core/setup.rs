use crate::adapters::{HfHubClient, StdinPrompter};
use crate::config::cli::LocalStorage;
use crate::core::dna_fetcher::DnaFetcher;
use crate::core::installer::ModelInstaller;
use crate::core::{ConfigProvider, SetupStep};
use crate::domain::model::{ModelId, StepReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::PathBuf;

pub struct SetupEngine {
    steps: Vec<Box<dyn SetupStep>>,
    monitor: SystemMonitor,
}

impl SetupEngine {
    pub fn new() -> Self {
        Self::new_with_monitoring(false)
    }

    pub fn new_with_monitoring(monitor_enabled: bool) -> Self {
        Self {
            steps: Vec::new(),
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依設定組裝步驟: 先安裝模型, 再視需要抓取 DNA 序列
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let mut engine = Self::new_with_monitoring(config.monitoring_enabled());

        if !config.skip_model() {
            let model = ModelId::parse(config.model_name())?;
            let hub = HfHubClient::new(config.cache_dir().map(PathBuf::from), true)?;
            let installer = ModelInstaller::new(hub, LocalStorage::new(config.output_root()), model)
                .with_revision(config.revision());
            engine.add_step(installer);
        } else {
            tracing::info!("⏭️ Model download skipped");
        }

        if config.fetch_dna() {
            let fetcher = DnaFetcher::new(LocalStorage::new("."), StdinPrompter::new())
                .with_endpoint(config.ensembl_endpoint())
                .with_sequence_id(config.sequence_id().map(str::to_string))
                .with_bounds(config.truncation_bounds()?)
                .with_output_file(config.dna_output_file());
            engine.add_step(fetcher);
        }

        Ok(engine)
    }

    pub fn add_step(&mut self, step: impl SetupStep + 'static) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self) -> Result<Vec<StepReport>> {
        tracing::info!("Starting setup with {} step(s)", self.steps.len());
        self.monitor.log_stats("Start");

        let mut reports = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            tracing::info!("▶️ Running step {}", step.name());
            let outcome = step.run().await?;
            self.monitor.log_stats(step.name());
            reports.push(StepReport {
                step: step.name().to_string(),
                outcome,
            });
        }

        self.monitor.log_final_stats();
        Ok(reports)
    }
}

impl Default for SetupEngine {
    fn default() -> Self {
        Self::new()
    }
}
