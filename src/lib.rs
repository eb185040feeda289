pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HfHubClient, StdinPrompter};
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{dna_fetcher::DnaFetcher, installer::ModelInstaller, setup::SetupEngine};
pub use domain::model::{DnaRecord, FetchOutcome, ModelId, OutputDirs, TruncationBounds};
pub use utils::error::{Result, SetupError};
